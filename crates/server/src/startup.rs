use crate::{analyze, routes, Snapshot};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::post,
    Router,
};
use hyper::{
    header::{ACCEPT, CONTENT_TYPE},
    Method,
};
use log::{info, warn};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub snapshot: Arc<Snapshot>,
}

#[derive(OpenApi)]
#[openapi(
    paths(routes::analyze::analyze),
    components(
        schemas(
            routes::analyze::AnalyzeRequest,
            routes::analyze::AnalyzeResponse
        )
    ),
    tags(
        (name = "climatecast api", description = "a RESTful api serving precomputed climate statistics, forecasts and anomaly labels for fixed locations")
    )
)]
struct ApiDoc;

pub fn build_app_state(cache_file: &str) -> Result<AppState, anyhow::Error> {
    let snapshot =
        Snapshot::load(cache_file).map_err(|e| anyhow!("error loading cache: {}", e))?;
    if snapshot.is_empty() {
        warn!("cache is empty, every request will return 404");
    }

    Ok(AppState {
        snapshot: Arc::new(snapshot),
    })
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([ACCEPT, CONTENT_TYPE])
        .allow_origin(Any);

    Router::new()
        .route("/analyze", post(analyze))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default();
    info!(target: "http_request","new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, time: {}", response.status().as_str(), response_time);

    response
}
