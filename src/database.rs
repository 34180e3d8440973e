use sqlx::pool::PoolConnection;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

use crate::error::{ServiceError, ServiceResult};
use crate::models::ProductAuthPolicy;
use crate::token::TokenService;

mod coupons;
mod orders;
mod products;
mod users;


#[derive(Clone)]
pub struct AppState {
    pub pool: Pool<Postgres>,
    pub tokens: TokenService,
    pub product_auth_policy: ProductAuthPolicy,
}

impl AppState {
    pub async fn connect(
        url: &str,
        max_connections: u32,
        tokens: TokenService,
        product_auth_policy: ProductAuthPolicy,
    ) -> ServiceResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;

        sqlx::migrate!()
            .run(&pool)
            .await
            .map_err(|err| ServiceError::InternalServerError(err.to_string()))?;

        Ok(Self::from_pool(pool, tokens, product_auth_policy))
    }

    pub fn from_pool(
        pool: Pool<Postgres>,
        tokens: TokenService,
        product_auth_policy: ProductAuthPolicy,
    ) -> Self {
        Self {
            pool,
            tokens,
            product_auth_policy,
        }
    }
}

/// A pooled connection scoped to a single request.
///
/// The connection returns to the pool when this value is dropped.
pub struct DatabaseConnection {
    pub connection: PoolConnection<Postgres>,
}

impl DatabaseConnection {
    pub async fn acquire(pool: &Pool<Postgres>) -> ServiceResult<Self> {
        let connection = pool.acquire().await?;
        Ok(Self { connection })
    }
}
