use aide::axum::routing::{post_with, put_with};
use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::Path;
use axum::Json;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::database::AppState;
use crate::error::{ServiceError, ServiceResult};
use crate::models::Role;
use crate::request_state::RequestState;
use crate::token::Session;

use super::{password_hash_create, Created, JsonBody, MessageDto};

pub fn router(app_state: AppState) -> ApiRouter {
    ApiRouter::new()
        .api_route("/usuarios", post_with(register_user, register_user_docs))
        .api_route("/usuarios/:id", put_with(update_user, update_user_docs))
        .with_state(app_state)
}

#[derive(Debug, PartialEq, Deserialize, JsonSchema)]
pub struct RegisterUserDto {
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub role: Option<String>,
}

async fn register_user(
    state: RequestState,
    form: JsonBody<RegisterUserDto>,
) -> ServiceResult<Created<MessageDto>> {
    let form = form.0;

    let role = form
        .role
        .as_deref()
        .filter(|role| !role.trim().is_empty())
        .map(Role::from)
        .unwrap_or(Role::Customer);
    let password_hash = password_hash_create(&form.senha)?;

    let mut db = state.db().await?;
    let user = db
        .create_user(&form.nome, &form.email, &password_hash, &role)
        .await?;
    log::info!("Registered user {} with role '{}'", user.id, user.role);

    Ok(Created(MessageDto {
        message: "Usuário cadastrado com sucesso".to_owned(),
    }))
}

fn register_user_docs(op: TransformOperation) -> TransformOperation {
    op.description("Register a new user. Users without a role become customers.")
        .tag("users")
        .response::<201, Json<MessageDto>>()
        .response_with::<409, (), _>(|res| res.description("The email is already registered!"))
}

#[derive(Debug, PartialEq, Deserialize, JsonSchema)]
pub struct UpdateUserDto {
    pub nome: String,
    pub email: String,
    pub senha: String,
    pub role: String,
}

async fn update_user(
    state: RequestState,
    session: Session,
    Path(id): Path<i32>,
    form: JsonBody<UpdateUserDto>,
) -> ServiceResult<Json<MessageDto>> {
    let form = form.0;
    let role = Role::from(form.role.as_str());
    let password_hash = password_hash_create(&form.senha)?;

    let mut db = state.db().await?;
    let user = db
        .update_user(id, &form.nome, &form.email, &password_hash, &role)
        .await?;

    if user.is_some() {
        log::info!("User {} updated user {}", session.user_id, id);
        return Ok(MessageDto::new("Usuário atualizado com sucesso"));
    }

    Err(ServiceError::NotFound)
}

fn update_user_docs(op: TransformOperation) -> TransformOperation {
    op.description("Replace name, email, password and role of a user.")
        .tag("users")
        .response::<200, Json<MessageDto>>()
        .response_with::<404, (), _>(|res| res.description("The requested user does not exist!"))
        .response_with::<403, (), _>(|res| res.description("Missing or invalid token!"))
        .response_with::<409, (), _>(|res| res.description("The email is already registered!"))
        .security_requirement("SessionToken")
}
