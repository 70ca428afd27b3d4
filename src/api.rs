// src/api.rs
//! HTTP boundary: validates requests, forwards them to the analyzers and
//! returns their results unchanged as JSON.
//!
//! Scoring runs on the blocking pool; a panic there surfaces as a 500 with a
//! short message and the process keeps serving.

use std::sync::Arc;

use axum::{
    extract::{FromRequest, State},
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{error, warn};

use crate::config::{Lexicon, PatternTables, Settings};
use crate::error::ApiError;
use crate::fakenews::{FakeNewsDetector, FakeNewsReport};
use crate::metrics;
use crate::resume::{RankedResume, ResumeItem, ResumeScreener, ScreeningResult};
use crate::sentiment::{SentimentAnalyzer, SentimentResult, SentimentStatistics};

pub const SERVICE_TITLE: &str = "Text Insight API";

/// The three façades; all read-only, shared across requests.
#[derive(Clone)]
pub struct AppState {
    pub sentiment: SentimentAnalyzer,
    pub resume: ResumeScreener,
    pub fakenews: FakeNewsDetector,
}

impl AppState {
    pub fn new(tables: Arc<PatternTables>) -> Self {
        Self {
            sentiment: SentimentAnalyzer::new(),
            resume: ResumeScreener::new(Arc::clone(&tables)),
            fakenews: FakeNewsDetector::new(tables),
        }
    }

    /// Load and compile the lexicon named by `settings`.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let tables = Lexicon::load_from_file(&settings.lexicon_path)?.compile()?;
        Ok(Self::new(Arc::new(tables)))
    }

    /// State backed by the built-in lexicon seed.
    pub fn seeded() -> anyhow::Result<Self> {
        Ok(Self::new(Arc::new(PatternTables::seed()?)))
    }
}

/// Router with CORS restricted to `cors_origins` (`*` allows any origin).
pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    let api = Router::new()
        .route("/sentiment/analyze", post(analyze_sentiment))
        .route("/sentiment/batch", post(analyze_sentiment_batch))
        .route("/sentiment/statistics", post(sentiment_statistics))
        .route("/resume/screen", post(screen_resume))
        .route("/resume/rank", post(rank_resumes))
        .route("/fakenews/detect", post(detect_fake_news));

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api", api)
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

/// Router with the default CORS origins.
pub fn router(state: AppState) -> Router {
    create_router(state, &Settings::default().cors_origins)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        return CorsLayer::very_permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

// ---- request / response bodies ----

/// `Json` extractor whose rejections (bad JSON, missing fields, wrong
/// content type) answer with the same `{error, detail}` body as validation.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, Deserialize)]
pub struct SentimentRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SentimentBatchRequest {
    pub texts: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResumeRequest {
    pub resume_text: String,
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct ResumeBatchRequest {
    pub resumes: Vec<ResumeItem>,
    pub job_description: String,
}

#[derive(Debug, Deserialize)]
pub struct FakeNewsRequest {
    pub text: String,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

// ---- handlers ----

async fn root() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        message: format!("Welcome to {SERVICE_TITLE}"),
    })
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".into(),
        message: "API is running".into(),
    })
}

async fn analyze_sentiment(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SentimentRequest>,
) -> Result<Json<SentimentResult>, ApiError> {
    require_text("text", &body.text)?;
    run_blocking("sentiment_analyze", move || state.sentiment.classify(&body.text)).await
}

async fn analyze_sentiment_batch(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SentimentBatchRequest>,
) -> Result<Json<Vec<SentimentResult>>, ApiError> {
    require_items("texts", &body.texts)?;
    run_blocking("sentiment_batch", move || {
        state.sentiment.classify_batch(&body.texts)
    })
    .await
}

async fn sentiment_statistics(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<SentimentBatchRequest>,
) -> Result<Json<SentimentStatistics>, ApiError> {
    require_items("texts", &body.texts)?;
    run_blocking("sentiment_statistics", move || {
        let results = state.sentiment.classify_batch(&body.texts);
        state.sentiment.statistics(&results)
    })
    .await
}

async fn screen_resume(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ResumeRequest>,
) -> Result<Json<ScreeningResult>, ApiError> {
    require_text("resume_text", &body.resume_text)?;
    require_text("job_description", &body.job_description)?;
    run_blocking("resume_screen", move || {
        state.resume.screen(&body.resume_text, &body.job_description)
    })
    .await
}

async fn rank_resumes(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<ResumeBatchRequest>,
) -> Result<Json<Vec<RankedResume>>, ApiError> {
    require_items("resumes", &body.resumes)?;
    require_text("job_description", &body.job_description)?;
    for (idx, r) in body.resumes.iter().enumerate() {
        require_text(&format!("resumes[{idx}].text"), &r.text)?;
    }
    run_blocking("resume_rank", move || {
        state.resume.rank(&body.resumes, &body.job_description)
    })
    .await
}

async fn detect_fake_news(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<FakeNewsRequest>,
) -> Result<Json<FakeNewsReport>, ApiError> {
    require_text("text", &body.text)?;
    run_blocking("fakenews_detect", move || {
        let source = body.source.as_deref().unwrap_or_default();
        state.fakenews.analyze(&body.text, source)
    })
    .await
}

// ---- helpers ----

fn require_text(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::invalid(format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_items<T>(field: &str, items: &[T]) -> Result<(), ApiError> {
    if items.is_empty() {
        return Err(ApiError::invalid(format!("{field} must contain at least one item")));
    }
    Ok(())
}

/// Run a scoring closure off the async workers and wrap its result as JSON.
async fn run_blocking<T, F>(endpoint: &'static str, f: F) -> Result<Json<T>, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    metrics::record_request(endpoint);
    match tokio::task::spawn_blocking(f).await {
        Ok(out) => Ok(Json(out)),
        Err(e) => {
            metrics::record_failure(endpoint);
            error!(endpoint, error = %e, "analysis failed");
            Err(ApiError::from(e))
        }
    }
}
