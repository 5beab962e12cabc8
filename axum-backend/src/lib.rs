use axum::{
    extract::{DefaultBodyLimit, Json},
    http::{header, Method, StatusCode},
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};
use plan_evaluator::{
    evaluate, Evaluation, GraphView, IdealRoom, PlanError, ReferenceCatalog, Suggestion,
    DEFAULT_ADJACENCY_TEXT, MIN_ROOM_SIZE,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

pub mod config;

pub use config::ServerConfig;

// Keeps a single request from holding the worker on a huge paste
pub const MAX_ADJACENCY_LINES: usize = 1_000;

#[derive(Debug, Deserialize)]
pub struct EvaluateRequest {
    /// Sizes merged over the catalog defaults; `null` removes a room
    #[serde(default)]
    pub sizes: HashMap<String, Option<f64>>,
    #[serde(default = "default_adjacency")]
    pub adjacency: String,
}

fn default_adjacency() -> String {
    DEFAULT_ADJACENCY_TEXT.to_string()
}

/// Scores rendered with two decimals for display
#[derive(Debug, Serialize)]
pub struct ScoreSummary {
    pub final_score: String,
    pub size_score: String,
    pub adjacency_score: String,
}

#[derive(Debug, Serialize)]
pub struct EvaluateResponse {
    pub final_score: f64,
    pub size_score: f64,
    pub adjacency_score: f64,
    pub summary: ScoreSummary,
    pub suggestions: Vec<String>,
    pub details: Vec<Suggestion>,
    pub matches_ideal: bool,
    pub ideal_graph: GraphView,
    pub candidate_graph: GraphView,
}

#[derive(Debug, Serialize)]
struct CatalogResponse {
    rooms: Vec<IdealRoom>,
    edges: Vec<(&'static str, &'static str)>,
    default_sizes: HashMap<String, f64>,
    default_adjacency: &'static str,
    min_room_size: f64,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(error: &str, message: String) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.to_string(),
            message,
        }),
    )
}

fn plan_error_response(err: PlanError) -> ApiError {
    let code = match err {
        PlanError::MissingCandidateSize(_) => "MISSING_ROOM_SIZE",
        PlanError::InvalidSize { .. } => "INVALID_SIZE",
        PlanError::MalformedAdjacency { .. } => "MALFORMED_ADJACENCY",
    };
    bad_request(code, err.to_string())
}

/// Merge request sizes over the catalog defaults
fn candidate_sizes(
    catalog: &ReferenceCatalog<'_>,
    overrides: HashMap<String, Option<f64>>,
) -> HashMap<String, f64> {
    let mut sizes = catalog.default_candidate_sizes();
    for (room, size) in overrides {
        match size {
            Some(size) => {
                sizes.insert(room, size);
            }
            None => {
                sizes.remove(&room);
            }
        }
    }
    sizes
}

/// Validate the request and run one evaluation cycle
fn run_evaluation(
    catalog: &ReferenceCatalog<'_>,
    request: EvaluateRequest,
) -> Result<(Evaluation, HashMap<String, f64>), ApiError> {
    let line_count = request.adjacency.lines().count();
    if line_count > MAX_ADJACENCY_LINES {
        warn!(
            "Request rejected: too many adjacency lines ({} > {})",
            line_count, MAX_ADJACENCY_LINES
        );
        return Err(bad_request(
            "INPUT_TOO_LARGE",
            format!(
                "Too many adjacency lines. Maximum allowed: {}. Received: {}",
                MAX_ADJACENCY_LINES, line_count
            ),
        ));
    }

    let sizes = candidate_sizes(catalog, request.sizes);
    catalog.validate_candidate_sizes(&sizes).map_err(|e| {
        warn!("Rejected candidate sizes: {}", e);
        plan_error_response(e)
    })?;

    let evaluation = evaluate(catalog, &sizes, &request.adjacency).map_err(plan_error_response)?;
    Ok((evaluation, sizes))
}

async fn health_check() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn catalog_handler() -> impl IntoResponse {
    let catalog = ReferenceCatalog::standard();
    Json(CatalogResponse {
        rooms: catalog.rooms().to_vec(),
        edges: catalog.edges().to_vec(),
        default_sizes: catalog.default_candidate_sizes(),
        default_adjacency: DEFAULT_ADJACENCY_TEXT,
        min_room_size: MIN_ROOM_SIZE,
    })
}

async fn evaluate_handler(
    Json(request): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, ApiError> {
    info!(
        "Received evaluation request with {} size overrides",
        request.sizes.len()
    );

    let catalog = ReferenceCatalog::standard();
    let (evaluation, sizes) = run_evaluation(&catalog, request)?;

    let ideal_graph = evaluation.ideal_view(&catalog);
    let candidate_graph = evaluation.candidate_view(&sizes);
    let report = evaluation.report;

    Ok(Json(EvaluateResponse {
        final_score: report.final_score,
        size_score: report.size_score,
        adjacency_score: report.adjacency_score,
        summary: ScoreSummary {
            final_score: format!("{:.2}", report.final_score),
            size_score: format!("{:.2}", report.size_score),
            adjacency_score: format!("{:.2}", report.adjacency_score),
        },
        suggestions: report.suggestion_messages(),
        matches_ideal: report.matches_ideal(),
        details: report.suggestions,
        ideal_graph,
        candidate_graph,
    }))
}

async fn render_ideal_handler() -> Html<String> {
    let catalog = ReferenceCatalog::standard();
    let view = GraphView::from_graph(&catalog.ideal_graph(), &catalog.ideal_sizes());
    Html(view.to_html("Ideal Plan Graph"))
}

async fn render_candidate_handler(
    Json(request): Json<EvaluateRequest>,
) -> Result<Html<String>, ApiError> {
    let catalog = ReferenceCatalog::standard();
    let (evaluation, sizes) = run_evaluation(&catalog, request)?;
    let view = evaluation.candidate_view(&sizes);
    Ok(Html(view.to_html("Candidate Plan Graph")))
}

/// Create the Axum app with all routes and middleware
pub fn create_app(config: &ServerConfig) -> Router {
    let origins = config.origin_headers();

    let cors = if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE])
    };

    Router::new()
        .route("/health", get(health_check))
        .route("/catalog", get(catalog_handler))
        .route("/evaluate", post(evaluate_handler))
        .route("/render/ideal", get(render_ideal_handler))
        .route("/render/candidate", post(render_candidate_handler))
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
