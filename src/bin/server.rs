use axum::{
    extract::State,
    http::{Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use screener::{analysis::AnalysisClient, core::config::AnalysisConfig};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

// Request/Response types
#[derive(Deserialize)]
struct AnalyzeRequest {
    stock_name: Option<String>,
}

#[derive(Serialize)]
struct AnalyzeResponse {
    stock_name: String,
    analysis: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

// Shared application state
struct AppState {
    analysis: AnalysisClient,
}

// Health check endpoint
async fn health() -> &'static str {
    "OK"
}

async fn analyze_stock(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let stock_name = req
        .stock_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "stock_name is required"))?;

    log::info!("Analyzing stock {}", stock_name);

    let analysis = state
        .analysis
        .analyze_stock(&stock_name)
        .await
        .map_err(|e| {
            log::error!("Analysis failed for {}: {}", stock_name, e);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;

    Ok(Json(AnalyzeResponse {
        stock_name,
        analysis,
    }))
}

fn router(analysis: AnalysisClient) -> Router {
    let app_state = Arc::new(AppState { analysis });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/analyze_stock", post(analyze_stock))
        .layer(cors)
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = AnalysisConfig::from_env()?;
    let addr = config.server_addr.clone();

    let app = router(AnalysisClient::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("Server running on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
