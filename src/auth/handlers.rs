use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{CreateUserRequest, GenerateTokenRequest, TokenResponse},
        jwt::JwtKeys,
        password,
        repo::UserRepo,
        repo_types::{normalize_email, User},
    },
    error::AppError,
    state::AppState,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user))
        .route("/users/generate_token", post(generate_token))
}

#[instrument(skip(users, payload))]
pub async fn create_user(
    State(users): State<UserRepo>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Json(payload) = payload?;

    let user = User::new(&payload.name, &payload.email, &payload.password).map_err(|e| {
        warn!(error = %e, "rejected user");
        e
    })?;
    users.create(&user).await.map_err(|e| {
        warn!(error = %e, email = %user.email, "create user failed");
        e
    })?;

    info!(user_id = %user.id, email = %user.email, "user created");
    Ok(StatusCode::CREATED)
}

#[instrument(skip(users, keys, payload))]
pub async fn generate_token(
    State(users): State<UserRepo>,
    State(keys): State<JwtKeys>,
    payload: Result<Json<GenerateTokenRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let Json(payload) = payload?;
    let email = normalize_email(&payload.email);

    let Some(user) = users.find_by_email(&email).await? else {
        password::verify_against_dummy(&payload.password);
        warn!(email = %email, "token requested for unknown email");
        return Err(invalid_credentials());
    };

    if !user.validate_password(&payload.password) {
        warn!(email = %email, user_id = %user.id, "invalid password");
        return Err(invalid_credentials());
    }

    let access_token = keys.sign(user.id)?;
    info!(user_id = %user.id, "token issued");
    Ok(Json(TokenResponse { access_token }))
}

fn invalid_credentials() -> AppError {
    AppError::Authentication("invalid credentials".into())
}
