//! SwapCircle API: campus clothing-swap marketplace.
//!
//! Layout follows `domains/<name>/{models,services,handlers,routes}` with
//! shared database repositories, errors, middleware and clients under
//! [`shared`].

pub mod config;
pub mod domains;
pub mod openapi;
pub mod routes;
pub mod shared;

use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::openapi::ApiDoc;
use crate::routes::create_router;
use crate::shared::clients::UPLOADS_ROUTE;
use crate::shared::services::AppState;

/// CORS 설정 (허용 origin 은 설정에서)
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true)
}

/// 전체 애플리케이션 라우터 (API + Swagger + 업로드 파일)
/// Full application: API routes, Swagger UI, uploaded files, CORS and request tracing
pub fn build_app(app_state: AppState) -> Router {
    let cors = cors_layer(&app_state.config.cors_origins);
    let uploads = ServeDir::new(&app_state.config.upload_dir);

    Router::new()
        .merge(create_router())
        .merge(SwaggerUi::new("/api").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest_service(UPLOADS_ROUTE, uploads)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
