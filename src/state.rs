use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::auth::{jwt::JwtKeys, repo::UserRepo};
use crate::config::AppConfig;
use crate::db;
use crate::products::repo::ProductRepo;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub products: ProductRepo,
    pub users: UserRepo,
    pub keys: JwtKeys,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let pool = db::init_pool(&config.database_url).await?;
        Ok(Self::from_parts(pool, Arc::new(config)))
    }

    pub fn from_parts(db: SqlitePool, config: Arc<AppConfig>) -> Self {
        Self {
            products: ProductRepo::new(db.clone()),
            users: UserRepo::new(db),
            keys: JwtKeys::from_config(&config.jwt),
            config,
        }
    }

    #[cfg(test)]
    pub async fn fake() -> Self {
        let config = Arc::new(AppConfig {
            database_url: "sqlite::memory:".into(),
            jwt: crate::config::JwtConfig {
                secret: "test".into(),
                issuer: "test-issuer".into(),
                audience: "test-aud".into(),
                expires_in_secs: 300,
            },
            host: "127.0.0.1".into(),
            port: 0,
        });
        Self::from_parts(db::memory_pool().await, config)
    }
}

impl FromRef<AppState> for ProductRepo {
    fn from_ref(state: &AppState) -> Self {
        state.products.clone()
    }
}

impl FromRef<AppState> for UserRepo {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        state.keys.clone()
    }
}
