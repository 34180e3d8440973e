use aide::axum::routing::get_with;
use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::Json;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::database::AppState;
use crate::error::{ServiceError, ServiceResult};
use crate::models;
use crate::request_state::RequestState;
use crate::token::Session;

use super::{Created, JsonBody};

pub fn router(app_state: AppState) -> ApiRouter {
    ApiRouter::new()
        .api_route(
            "/cupons",
            get_with(list_coupons, list_coupons_docs)
                .post_with(create_coupon, create_coupon_docs),
        )
        .with_state(app_state)
}

#[derive(Debug, PartialEq, Serialize, JsonSchema)]
pub struct CouponDto {
    pub id: i32,
    pub codigo: String,
    pub desconto: f64,
}

impl From<&models::Coupon> for CouponDto {
    fn from(value: &models::Coupon) -> Self {
        Self {
            id: value.id,
            codigo: value.code.to_owned(),
            desconto: value.discount,
        }
    }
}

/// Coupon codes are case insensitive and always stored uppercase.
pub fn normalize_coupon_code(code: &str) -> String {
    code.to_uppercase()
}

async fn list_coupons(state: RequestState) -> ServiceResult<Json<Vec<CouponDto>>> {
    let mut db = state.db().await?;
    let coupons = db.get_all_coupons().await?;
    Ok(Json(coupons.iter().map(|c| c.into()).collect()))
}

fn list_coupons_docs(op: TransformOperation) -> TransformOperation {
    op.description("List all coupons.")
        .tag("coupons")
        .response::<200, Json<Vec<CouponDto>>>()
}

#[derive(Debug, PartialEq, Deserialize, JsonSchema)]
pub struct SaveCouponDto {
    pub codigo: Option<String>,
    pub desconto: Option<f64>,
}

impl SaveCouponDto {
    /// A discount of zero counts as missing.
    fn validate(self) -> ServiceResult<models::Coupon> {
        let code = self
            .codigo
            .filter(|code| !code.trim().is_empty())
            .ok_or(ServiceError::BadRequest("Código e desconto são obrigatórios"))?;
        let discount = self
            .desconto
            .filter(|discount| *discount != 0.0)
            .ok_or(ServiceError::BadRequest("Código e desconto são obrigatórios"))?;

        Ok(models::Coupon {
            id: 0,
            code: normalize_coupon_code(&code),
            discount,
        })
    }
}

async fn create_coupon(
    state: RequestState,
    session: Session,
    form: JsonBody<SaveCouponDto>,
) -> ServiceResult<Created<CouponDto>> {
    let coupon = form.0.validate()?;

    let mut db = state.db().await?;
    let coupon = db.store_coupon(coupon).await?;
    log::info!("User {} created coupon '{}'", session.user_id, coupon.code);

    Ok(Created(CouponDto::from(&coupon)))
}

fn create_coupon_docs(op: TransformOperation) -> TransformOperation {
    op.description("Create a new coupon. The code is stored uppercase.")
        .tag("coupons")
        .response::<201, Json<CouponDto>>()
        .response_with::<400, (), _>(|res| res.description("Code or discount is missing!"))
        .response_with::<403, (), _>(|res| res.description("Missing or invalid token!"))
        .response_with::<409, (), _>(|res| res.description("The code already exists!"))
        .security_requirement("SessionToken")
}
