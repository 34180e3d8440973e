use aide::axum::routing::post_with;
use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::Json;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::database::AppState;
use crate::error::{ServiceError, ServiceResult};
use crate::request_state::RequestState;

use super::{password_hash_verify, JsonBody};

pub fn router(app_state: AppState) -> ApiRouter {
    ApiRouter::new()
        .api_route("/login", post_with(login, login_docs))
        .with_state(app_state)
}

#[derive(Debug, PartialEq, Deserialize, JsonSchema)]
pub struct LoginDto {
    pub email: String,
    pub senha: String,
}

#[derive(Debug, PartialEq, Serialize, JsonSchema)]
pub struct LoginResponseDto {
    pub token: String,
    pub role: String,
    pub nome: String,
}

async fn login(
    state: RequestState,
    form: JsonBody<LoginDto>,
) -> ServiceResult<Json<LoginResponseDto>> {
    let form = form.0;
    let mut db = state.db().await?;

    if let Some(user) = db.get_user_by_email(&form.email).await? {
        if password_hash_verify(&user.password_hash, &form.senha)? {
            let token = state.tokens.issue(user.id, &user.role)?;
            log::info!("User {} logged in", user.id);

            return Ok(Json(LoginResponseDto {
                token,
                role: user.role.as_str().to_owned(),
                nome: user.name,
            }));
        }
    }

    log::info!("Failed login attempt for '{}'", form.email);
    Err(ServiceError::InvalidCredentials)
}

fn login_docs(op: TransformOperation) -> TransformOperation {
    op.description("Login with email and password. The returned token is valid for 8 hours.")
        .tag("auth")
        .response::<200, Json<LoginResponseDto>>()
        .response_with::<401, (), _>(|res| res.description("Invalid email or password!"))
}
