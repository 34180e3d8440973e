use aide::axum::routing::{get_with, put_with};
use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::Path;
use axum::Json;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::database::AppState;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{self, Role};
use crate::pricing::classify;
use crate::request_state::RequestState;
use crate::token::Session;

use super::{Created, JsonBody};

/// Roles that may see every order.
const ORDER_VIEWER_ROLES: [Role; 2] = [Role::Admin, Role::Waiter];

pub fn router(app_state: AppState) -> ApiRouter {
    ApiRouter::new()
        .api_route(
            "/pedidos",
            get_with(list_orders, list_orders_docs).post_with(create_order, create_order_docs),
        )
        .api_route(
            "/pedidos/:id/status",
            put_with(update_order_status, update_order_status_docs),
        )
        .with_state(app_state)
}

#[derive(Debug, PartialEq, Serialize, JsonSchema)]
pub struct OrderDto {
    pub id: i32,
    pub mesa: Option<String>,
    pub itens: serde_json::Value,
    pub total: f64,
    pub tipo: String,
    pub status: String,
}

impl From<&models::Order> for OrderDto {
    fn from(value: &models::Order) -> Self {
        Self {
            id: value.id,
            mesa: value.table.to_owned(),
            itens: value.items.to_owned(),
            total: value.total,
            tipo: value.order_type.as_str().to_owned(),
            status: value.status.to_owned(),
        }
    }
}

async fn list_orders(state: RequestState) -> ServiceResult<Json<Vec<OrderDto>>> {
    state.session_require_role(&ORDER_VIEWER_ROLES)?;

    let mut db = state.db().await?;
    let orders = db.get_all_orders().await?;
    Ok(Json(orders.iter().map(|o| o.into()).collect()))
}

fn list_orders_docs(op: TransformOperation) -> TransformOperation {
    op.description("List all orders, newest first.")
        .tag("orders")
        .response::<200, Json<Vec<OrderDto>>>()
        .response_with::<403, (), _>(|res| res.description("Missing token or permissions!"))
        .security_requirement_scopes("SessionToken", ["admin", "waiter"])
}

#[derive(Debug, PartialEq, Deserialize, JsonSchema)]
pub struct CreateOrderDto {
    pub mesa: Option<String>,
    #[serde(default)]
    pub itens: serde_json::Value,
    /// Trusted as submitted for customer orders.
    pub total: Option<f64>,
}

async fn create_order(
    state: RequestState,
    session: Session,
    form: JsonBody<CreateOrderDto>,
) -> ServiceResult<Created<OrderDto>> {
    let form = form.0;
    let items = if form.itens.is_null() {
        serde_json::Value::Array(Vec::new())
    } else {
        form.itens
    };
    let pricing = classify(&session.role, form.total.unwrap_or_default());

    let mut db = state.db().await?;
    let order = db
        .create_order(form.mesa.as_deref(), &items, pricing.total, pricing.order_type)
        .await?;
    log::info!(
        "User {} placed {} order {}",
        session.user_id,
        order.order_type.as_str(),
        order.id
    );

    Ok(Created(OrderDto::from(&order)))
}

fn create_order_docs(op: TransformOperation) -> TransformOperation {
    op.description("Place an order. Orders placed by waiters are house orders with a total of zero.")
        .tag("orders")
        .response::<201, Json<OrderDto>>()
        .response_with::<403, (), _>(|res| res.description("Missing or invalid token!"))
        .security_requirement("SessionToken")
}

#[derive(Debug, PartialEq, Deserialize, JsonSchema)]
pub struct UpdateOrderStatusDto {
    pub status: String,
}

async fn update_order_status(
    state: RequestState,
    _session: Session,
    Path(id): Path<i32>,
    form: JsonBody<UpdateOrderStatusDto>,
) -> ServiceResult<Json<OrderDto>> {
    let status = form.0.status;
    if status.trim().is_empty() {
        return Err(ServiceError::BadRequest("Status é obrigatório"));
    }

    let mut db = state.db().await?;
    let order = db.update_order_status(id, &status).await?;

    if let Some(order) = order {
        return Ok(Json(OrderDto::from(&order)));
    }

    Err(ServiceError::NotFound)
}

fn update_order_status_docs(op: TransformOperation) -> TransformOperation {
    op.description("Set the status of an order.")
        .tag("orders")
        .response::<200, Json<OrderDto>>()
        .response_with::<400, (), _>(|res| res.description("The status is missing!"))
        .response_with::<404, (), _>(|res| res.description("The requested order does not exist!"))
        .response_with::<403, (), _>(|res| res.description("Missing or invalid token!"))
        .security_requirement("SessionToken")
}
