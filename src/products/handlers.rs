use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    middleware,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{ListParams, ListQuery, ProductRequest, ProductResponse},
    repo::ProductRepo,
    repo_types::Product,
};
use crate::{
    auth::extractors::{verify_token, AuthUser},
    error::AppError,
    state::AppState,
};

/// Every route here sits behind token verification.
pub fn product_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route_layer(middleware::from_fn_with_state(state, verify_token))
}

#[instrument(skip(products, user, payload), fields(user_id = %user.user_id))]
pub async fn create_product(
    State(products): State<ProductRepo>,
    AuthUser(user): AuthUser,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let Json(payload) = payload?;
    let product = Product::new(&payload.name, payload.price)?;
    products.create(&product).await?;

    info!(product_id = %product.id, "product created");
    Ok((StatusCode::CREATED, Json(product.into())))
}

#[instrument(skip(products, user, query), fields(user_id = %user.user_id))]
pub async fn list_products(
    State(products): State<ProductRepo>,
    AuthUser(user): AuthUser,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let Query(query) = query?;
    let items = products
        .find_all(ListParams::from(query))
        .await?
        .into_iter()
        .map(ProductResponse::from)
        .collect();
    Ok(Json(items))
}

#[instrument(skip(products, user, id), fields(user_id = %user.user_id))]
pub async fn get_product(
    State(products): State<ProductRepo>,
    AuthUser(user): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ProductResponse>, AppError> {
    let Path(id) = id?;
    let product = products.find_by_id(id).await?;
    Ok(Json(product.into()))
}

#[instrument(skip(products, user, id, payload), fields(user_id = %user.user_id))]
pub async fn update_product(
    State(products): State<ProductRepo>,
    AuthUser(user): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    let Json(payload) = payload?;

    let mut product = products.find_by_id(id).await?;
    product.update(&payload.name, payload.price)?;
    products.update(&product).await?;

    info!(product_id = %id, "product updated");
    Ok(StatusCode::OK)
}

#[instrument(skip(products, user, id), fields(user_id = %user.user_id))]
pub async fn delete_product(
    State(products): State<ProductRepo>,
    AuthUser(user): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    products.delete(id).await?;

    info!(product_id = %id, "product deleted");
    Ok(StatusCode::OK)
}
