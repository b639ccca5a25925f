use axum::{
    extract::{rejection::JsonRejection, Json, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use alumni_search_engine::{
    store::StoreStats, Config, DirectoryFilter, DirectoryResponse, ErrorResponse, SearchEngine,
    SearchError, SearchResponse,
};

#[derive(Clone)]
struct AppState {
    engine: Arc<SearchEngine>,
}

#[derive(Debug, Deserialize)]
struct SearchRequest {
    /// Missing and null both read as an empty query
    #[serde(default)]
    query: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VerifyRequest {
    verified: Option<bool>,
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    success: bool,
    message: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    semantic: bool,
}

#[derive(Debug, Serialize)]
struct StatsResponse {
    success: bool,
    stats: StoreStats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "alumni_search_server=debug,alumni_search_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    tracing::info!("🚀 Starting Alumni Search Server");
    tracing::info!("📦 Database: {}", config.db_path);
    tracing::info!("🔌 Port: {}", config.port);

    let engine = SearchEngine::from_config(&config)?;

    let state = AppState {
        engine: Arc::new(engine),
    };

    let app = router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("🎓 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/alumni/ai-search", post(search_handler))
        .route("/api/alumni/public", get(directory_handler))
        .route("/api/admin/alumni/:id/verify", put(verify_handler))
        .route("/api/admin/stats", get(stats_handler))
        .fallback(not_found_handler)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: alumni_search_engine::VERSION.to_string(),
        semantic: state.engine.is_semantic_enabled(),
    })
}

async fn search_handler(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let Json(req) = payload.map_err(AppError::from_rejection)?;
    tracing::debug!("Search request: {:?}", req);

    let result = state.engine.search(req.query.as_deref().unwrap_or("")).await?;

    Ok(Json(result))
}

async fn directory_handler(
    State(state): State<AppState>,
    Query(filter): Query<DirectoryFilter>,
) -> Result<Json<DirectoryResponse>, AppError> {
    tracing::debug!("Directory request: {:?}", filter);

    Ok(Json(state.engine.directory(&filter).await?))
}

async fn verify_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(req) = payload.map_err(AppError::from_rejection)?;
    let verified = req
        .verified
        .ok_or_else(|| AppError::BadRequest("Verified status is required".to_string()))?;

    state.engine.verify(id, verified).await?;

    Ok(Json(MessageResponse {
        success: true,
        message: format!("Alumni {} successfully", if verified { "verified" } else { "unverified" }),
    }))
}

async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.engine.stats().await?;

    Ok(Json(StatsResponse { success: true, stats }))
}

async fn not_found_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Route not found")))
}

// Error handling
enum AppError {
    BadRequest(String),
    Engine(SearchError),
}

impl AppError {
    /// Unreadable body, wrong content type or wrong JSON shape
    fn from_rejection(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        Self::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Engine(SearchError::EmptyQuery) => {
                (StatusCode::BAD_REQUEST, SearchError::EmptyQuery.to_string())
            }
            AppError::Engine(SearchError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "Alumni not found".to_string())
            }
            AppError::Engine(e) => {
                tracing::error!("❌ Error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error".to_string())
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<SearchError>,
{
    fn from(err: E) -> Self {
        Self::Engine(err.into())
    }
}
