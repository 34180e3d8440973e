use std::sync::Arc;

use aide::{
    axum::{
        routing::{get, get_with},
        ApiRouter, IntoApiResponse,
    },
    openapi::{OpenApi, Tag},
    redoc::Redoc,
    transform::TransformOpenApi,
};
use axum::{response::IntoResponse, Extension, Json};

pub fn api_docs(api: TransformOpenApi) -> TransformOpenApi {
    api.title("orderdesk")
        .summary("Orders, coupons, users and products of the restaurant")
        .description("Most mutating routes need a session token from `POST /login`, sent as `Authorization: Bearer <token>`.")
        .tag(Tag {
            name: "auth".into(),
            description: Some("Login".into()),
            ..Default::default()
        })
        .tag(Tag {
            name: "users".into(),
            description: Some("User registration and management".into()),
            ..Default::default()
        })
        .tag(Tag {
            name: "coupons".into(),
            description: Some("Discount coupons".into()),
            ..Default::default()
        })
        .tag(Tag {
            name: "orders".into(),
            description: Some("Table and customer orders".into()),
            ..Default::default()
        })
        .tag(Tag {
            name: "products".into(),
            description: Some("Product catalogue".into()),
            ..Default::default()
        })
        .security_scheme(
            "SessionToken",
            aide::openapi::SecurityScheme::Http {
                scheme: "bearer".into(),
                bearer_format: Some("JWT".into()),
                description: Some("Token returned by `POST /login`, valid for 8 hours.".into()),
                extensions: Default::default(),
            },
        )
}

pub fn docs_routes() -> ApiRouter {
    // Infer the content type of the redoc page, but nothing else.
    aide::gen::infer_responses(true);

    let router = ApiRouter::new()
        .api_route(
            "/",
            get_with(
                Redoc::new("/docs/api.json")
                    .with_title("orderdesk")
                    .axum_handler(),
                |op| op.description("This documentation page."),
            ),
        )
        .route("/api.json", get(serve_docs));

    aide::gen::infer_responses(false);

    router
}

async fn serve_docs(Extension(api): Extension<Arc<OpenApi>>) -> impl IntoApiResponse {
    Json(&*api).into_response()
}
