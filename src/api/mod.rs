use std::sync::Arc;

use aide::axum::ApiRouter;
use aide::gen::GenContext;
use aide::openapi::{OpenApi, Operation};
use aide::{OperationInput, OperationOutput};
use argon2rs::verifier::Encoded;
use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tower_http::cors::CorsLayer;

use crate::database::AppState;
use crate::docs::{api_docs, docs_routes};
use crate::error::{ServiceError, ServiceResult};

mod auth;
mod coupons;
mod orders;
mod products;
mod users;

pub fn init(app_state: AppState) -> ApiRouter {
    ApiRouter::new()
        .merge(auth::router(app_state.clone()))
        .merge(users::router(app_state.clone()))
        .merge(coupons::router(app_state.clone()))
        .merge(orders::router(app_state.clone()))
        .merge(products::router(app_state))
}

/// Full application: api routes, documentation and banner.
pub fn app(app_state: AppState) -> Router {
    let mut api = OpenApi::default();

    ApiRouter::new()
        .route("/", get(banner))
        .nest_api_service("/docs", docs_routes())
        .merge(init(app_state))
        .finish_api_with(&mut api, api_docs)
        .layer(Extension(Arc::new(api)))
        .layer(CorsLayer::permissive())
}

async fn banner() -> &'static str {
    "API do Delícias do Alf rodando com sucesso!"
}

#[derive(Debug, PartialEq, Serialize, JsonSchema)]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    pub fn new(message: &str) -> Json<Self> {
        Json(Self {
            message: message.to_owned(),
        })
    }
}

/// Response body of a newly stored resource, sent with status 201.
pub struct Created<T>(pub T);

impl<T: JsonSchema> OperationOutput for Created<T> {
    type Inner = T;
}
impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

/// JSON request body whose rejections are reported as `ServiceError::BadRequest`.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServiceError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl<T: JsonSchema> OperationInput for JsonBody<T> {
    fn operation_input(ctx: &mut GenContext, operation: &mut Operation) {
        Json::<T>::operation_input(ctx, operation);
    }
}

/// Hash a password with a fresh random salt.
///
/// The result is a self describing argon2i string that embeds the salt and
/// the hashing parameters.
pub fn password_hash_create(password: &str) -> ServiceResult<String> {
    let salt: [u8; 16] = rand::random();
    let encoded = Encoded::default2i(password.as_bytes(), &salt, b"", b"");

    String::from_utf8(encoded.to_u8())
        .map_err(|err| ServiceError::InternalServerError(err.to_string()))
}

/// Compares in constant time. A stored value that is not an encoded hash
/// never matches.
pub fn password_hash_verify(hash: &str, password: &str) -> ServiceResult<bool> {
    match Encoded::from_u8(hash.as_bytes()) {
        Ok(encoded) => Ok(encoded.verify(password.as_bytes())),
        Err(err) => {
            log::warn!("Stored password hash is invalid: {:?}", err);
            Ok(false)
        }
    }
}
