use aide::axum::routing::{get_with, put_with};
use aide::axum::ApiRouter;
use aide::transform::TransformOperation;
use axum::extract::Path;
use axum::Json;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::database::AppState;
use crate::error::{ServiceError, ServiceResult};
use crate::models;
use crate::request_state::{ProductAccess, RequestState};

use super::{Created, JsonBody, MessageDto};

pub fn router(app_state: AppState) -> ApiRouter {
    ApiRouter::new()
        .api_route(
            "/produtos/:id",
            put_with(update_product, update_product_docs)
                .delete_with(delete_product, delete_product_docs),
        )
        .api_route(
            "/produtos",
            get_with(list_products, list_products_docs)
                .post_with(create_product, create_product_docs),
        )
        .with_state(app_state)
}

#[derive(Debug, PartialEq, Serialize, JsonSchema)]
pub struct ProductDto {
    pub id: i32,
    pub nome: String,
    pub preco: f64,
    pub descricao: Option<String>,
    pub imagem: Option<String>,
}

impl From<&models::Product> for ProductDto {
    fn from(value: &models::Product) -> Self {
        Self {
            id: value.id,
            nome: value.name.to_owned(),
            preco: value.price,
            descricao: value.description.to_owned(),
            imagem: value.image.to_owned(),
        }
    }
}

async fn list_products(
    state: RequestState,
    _access: ProductAccess,
) -> ServiceResult<Json<Vec<ProductDto>>> {
    let mut db = state.db().await?;
    let products = db.get_all_products().await?;
    Ok(Json(products.iter().map(|p| p.into()).collect()))
}

fn list_products_docs(op: TransformOperation) -> TransformOperation {
    op.description("List all products ordered by name.")
        .tag("products")
        .response::<200, Json<Vec<ProductDto>>>()
}

#[derive(Debug, PartialEq, Deserialize, JsonSchema)]
pub struct SaveProductDto {
    pub nome: Option<String>,
    pub preco: Option<f64>,
    pub descricao: Option<String>,
    pub imagem: Option<String>,
}

impl SaveProductDto {
    fn into_product(self, id: i32) -> ServiceResult<models::Product> {
        let name = self
            .nome
            .filter(|name| !name.trim().is_empty())
            .ok_or(ServiceError::BadRequest("Nome e preço são obrigatórios"))?;
        let price = self
            .preco
            .ok_or(ServiceError::BadRequest("Nome e preço são obrigatórios"))?;

        Ok(models::Product {
            id,
            name,
            price,
            description: self.descricao,
            image: self.imagem,
        })
    }
}

async fn create_product(
    state: RequestState,
    _access: ProductAccess,
    form: JsonBody<SaveProductDto>,
) -> ServiceResult<Created<ProductDto>> {
    let product = form.0.into_product(0)?;

    let mut db = state.db().await?;
    let product = db
        .store_product(product)
        .await?
        .ok_or_else(|| ServiceError::InternalServerError("Product was not stored".to_owned()))?;

    Ok(Created(ProductDto::from(&product)))
}

fn create_product_docs(op: TransformOperation) -> TransformOperation {
    op.description("Create a new product.")
        .tag("products")
        .response::<201, Json<ProductDto>>()
        .response_with::<400, (), _>(|res| res.description("Name or price is missing!"))
}

async fn update_product(
    state: RequestState,
    _access: ProductAccess,
    Path(id): Path<i32>,
    form: JsonBody<SaveProductDto>,
) -> ServiceResult<Json<ProductDto>> {
    let product = form.0.into_product(id)?;

    let mut db = state.db().await?;
    let product = db.store_product(product).await?;

    if let Some(product) = product {
        return Ok(Json(ProductDto::from(&product)));
    }

    Err(ServiceError::NotFound)
}

fn update_product_docs(op: TransformOperation) -> TransformOperation {
    op.description("Update an existing product.")
        .tag("products")
        .response::<200, Json<ProductDto>>()
        .response_with::<400, (), _>(|res| res.description("Name or price is missing!"))
        .response_with::<404, (), _>(|res| res.description("The requested product does not exist!"))
}

async fn delete_product(
    state: RequestState,
    _access: ProductAccess,
    Path(id): Path<i32>,
) -> ServiceResult<Json<MessageDto>> {
    let mut db = state.db().await?;
    if db.delete_product(id).await? {
        return Ok(MessageDto::new("Produto removido com sucesso"));
    }

    Err(ServiceError::NotFound)
}

fn delete_product_docs(op: TransformOperation) -> TransformOperation {
    op.description("Delete a product.")
        .tag("products")
        .response::<200, Json<MessageDto>>()
        .response_with::<404, (), _>(|res| res.description("The requested product does not exist!"))
}
