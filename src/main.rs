use log::{error, info};
use tokio::net::TcpListener;

use crate::database::AppState;
use crate::error::ServiceResult;
use crate::models::ProductAuthPolicy;
use crate::token::TokenService;

mod api;
mod database;
mod docs;
mod env;
mod error;
mod models;
mod pricing;
mod request_state;
mod token;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> ServiceResult<()> {
    let tokens = TokenService::from_secret(env::SECRET_KEY.as_bytes());
    let product_auth_policy = ProductAuthPolicy::from(env::PRODUCT_AUTH_POLICY.as_str());

    let app_state = AppState::connect(
        env::DATABASE_URL.as_str(),
        *env::DATABASE_MAX_CONNECTIONS,
        tokens,
        product_auth_policy,
    )
    .await?;
    info!("Connected to database, product routes are {:?}", product_auth_policy);

    let app = api::app(app_state);

    let address = format!("{}:{}", env::API_HOST.as_str(), env::API_PORT.as_str());
    let listener = TcpListener::bind(&address).await?;
    info!("Start http server at {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
