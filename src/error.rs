use aide::OperationOutput;
use axum::{extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse, Json};
use schemars::JsonSchema;
use serde_json::json;

/// Represent errors in the application
///
/// All `ServiceError`s can be transformed to http errors.
#[derive(Debug, Clone, PartialEq, JsonSchema)]
pub enum ServiceError {
    InternalServerError(String),
    NotFound,
    BadRequest(&'static str),
    Conflict(String),
    MissingToken,
    InvalidToken,
    InvalidCredentials,
    Forbidden,
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for ServiceError {}

/// Helper for `ServiceError` result
pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<sqlx::Error> for ServiceError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_error) = error {
            if db_error.is_unique_violation() {
                return ServiceError::Conflict(db_error.message().to_owned());
            }
        }

        log::error!("Database error: {}", error);
        ServiceError::InternalServerError(error.to_string())
    }
}

impl From<std::io::Error> for ServiceError {
    fn from(error: std::io::Error) -> Self {
        ServiceError::InternalServerError(error.to_string())
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        log::debug!("Rejected request body: {}", rejection.body_text());
        ServiceError::BadRequest("Corpo da requisição inválido")
    }
}

impl OperationOutput for ServiceError {
    type Inner = String;
}
impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ServiceError::InternalServerError(ref cause) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "cause": cause })),
            ),
            ServiceError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "Not found",
                })),
            ),
            ServiceError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
            }
            ServiceError::Conflict(ref cause) => (
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "Already exists",
                    "cause": cause,
                })),
            ),
            ServiceError::MissingToken => (
                StatusCode::FORBIDDEN,
                Json(json!({
                    "error": "Token obrigatório",
                })),
            ),
            ServiceError::InvalidToken => (
                StatusCode::FORBIDDEN,
                Json(json!({
                    "error": "Token inválido",
                })),
            ),
            ServiceError::Forbidden => (
                StatusCode::FORBIDDEN,
                Json(json!({
                    "error": "Acesso negado",
                })),
            ),
            ServiceError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "Credenciais inválidas",
                })),
            ),
        }
        .into_response()
    }
}
