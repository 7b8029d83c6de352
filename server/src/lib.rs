use anyhow::Result;
use axum::{extract::State, http::StatusCode, routing::{get, post}, Json, Router};
use keyrank_core::persist::{load_model_dir, MetaFile, ModelPaths};
use keyrank_core::stats::{text_statistics, word_frequencies, DEFAULT_TOP_WORDS};
use keyrank_core::{CachedExtractor, Keyword, KeywordExtractor, TextStatistics, WordFrequency, DEFAULT_TOP_N};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub const MAX_TOP_N: usize = 100;
pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

#[derive(Deserialize)]
pub struct KeywordsRequest {
    pub text: String,
    #[serde(default = "default_n")]
    pub n: usize,
}
fn default_n() -> usize { DEFAULT_TOP_N }

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
    #[serde(default = "default_n")]
    pub n: usize,
    #[serde(default = "default_top_words")]
    pub top_words: usize,
}
fn default_top_words() -> usize { DEFAULT_TOP_WORDS }

#[derive(Serialize)]
pub struct KeywordsResponse {
    pub keywords: Vec<Keyword>,
    pub took_s: f64,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub keywords: Vec<Keyword>,
    pub word_frequencies: Vec<WordFrequency>,
    pub statistics: TextStatistics,
    pub took_s: f64,
}

#[derive(Serialize)]
pub struct ModelResponse {
    pub num_terms: usize,
    pub version: u32,
    pub created_at: String,
    pub source: Option<String>,
}

#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<CachedExtractor>,
    pub meta: Arc<MetaFile>,
}

pub fn build_app(model_dir: String, cache_capacity: usize) -> Result<Router> {
    // Model load failures are fatal before the router exists
    let (model, meta) = load_model_dir(&ModelPaths::new(&model_dir))?;
    let extractor = CachedExtractor::new(KeywordExtractor::new(Arc::new(model)), cache_capacity);
    let app_state = AppState { extractor: Arc::new(extractor), meta: Arc::new(meta) };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/model", get(model_handler))
        .route("/keywords", post(keywords_handler))
        .route("/analyze", post(analyze_handler))
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);
    Ok(app)
}

fn clamp_n(n: usize) -> usize { n.clamp(1, MAX_TOP_N) }

pub async fn keywords_handler(State(state): State<AppState>, Json(req): Json<KeywordsRequest>) -> Json<KeywordsResponse> {
    let start = Instant::now();
    let keywords = state.extractor.extract(&req.text, clamp_n(req.n)).into_vec();
    let took_s = start.elapsed().as_secs_f64();
    tracing::debug!(keywords = keywords.len(), took_s, "keywords request");
    Json(KeywordsResponse { keywords, took_s })
}

pub async fn analyze_handler(State(state): State<AppState>, Json(req): Json<AnalyzeRequest>) -> Result<Json<AnalyzeResponse>, (StatusCode, String)> {
    if req.text.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Please enter some text to analyze.".into()));
    }
    let start = Instant::now();
    let keywords = state.extractor.extract(&req.text, clamp_n(req.n)).into_vec();
    let word_frequencies = word_frequencies(&req.text, req.top_words);
    let statistics = text_statistics(&req.text);
    let took_s = start.elapsed().as_secs_f64();
    Ok(Json(AnalyzeResponse { keywords, word_frequencies, statistics, took_s }))
}

pub async fn model_handler(State(state): State<AppState>) -> Json<ModelResponse> {
    let meta = &state.meta;
    Json(ModelResponse {
        num_terms: state.extractor.extractor().model().len(),
        version: meta.version,
        created_at: meta.created_at.clone(),
        source: meta.source.clone(),
    })
}
