use anyhow::{Context, Result};
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use jobmatch_core::extract::{extract_pdf_text, Extraction};
use jobmatch_core::normalize::normalize;
use jobmatch_core::persist::{load_matcher_artifacts, ArtifactPaths};
use jobmatch_core::{rank, HashEmbedder, JobCorpus};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

const EMPTY_QUERY_WARNING: &str = "upload a resume or enter skills to get recommendations";

#[derive(Deserialize)]
pub struct MatchParams {
    pub skills: Option<String>,
}

#[derive(Serialize)]
pub struct MatchResponse {
    pub query: String,
    pub took_s: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub results: Vec<MatchHit>,
}

#[derive(Serialize)]
pub struct MatchHit {
    pub skills: String,
    /// Match score as a percentage, rounded to 2 decimals.
    pub score: f64,
    pub linkedin_url: String,
    pub naukri_url: String,
}

#[derive(Clone)]
pub struct AppState {
    pub corpus: Arc<JobCorpus>,
    pub embedder: Arc<HashEmbedder>,
}

/// Load the built artifacts, embed the corpus once, and wire up the routes.
/// Missing or corrupt artifacts fail here, at startup, with no retry.
pub fn build_app(artifacts_dir: &Path) -> Result<Router> {
    let paths = ArtifactPaths::new(artifacts_dir);
    let (postings, meta) = load_matcher_artifacts(&paths)
        .with_context(|| format!("loading corpus artifacts from {}", artifacts_dir.display()))?;
    tracing::info!(
        num_jobs = meta.num_jobs,
        version = meta.version,
        created_at = %meta.created_at,
        "loaded corpus artifacts"
    );

    let embedder = Arc::new(HashEmbedder::default());
    let corpus = Arc::new(JobCorpus::build(postings, embedder.as_ref()));
    let state = AppState { corpus, embedder };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/match", get(match_get).post(match_post))
        .with_state(state)
        .layer(cors);
    Ok(app)
}

/// Manual-skills queries, no document upload.
pub async fn match_get(
    State(state): State<AppState>,
    Query(params): Query<MatchParams>,
) -> Json<MatchResponse> {
    Json(run_match(&state, None, params.skills.as_deref()))
}

/// Multipart form: optional `resume` PDF part and/or optional `skills` text
/// part. A malformed multipart body is the one input error the client gets
/// told about; everything inside the PDF degrades silently.
pub async fn match_post(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MatchResponse>, (StatusCode, String)> {
    let mut resume: Option<Vec<u8>> = None;
    let mut skills: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?
    {
        match field.name() {
            Some("resume") => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
                resume = Some(bytes.to_vec());
            }
            Some("skills") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
                skills = Some(text);
            }
            _ => {}
        }
    }

    Ok(Json(run_match(&state, resume.as_deref(), skills.as_deref())))
}

/// Combine resume text and manual skills into one normalized query, then
/// rank. An empty effective query returns a warning and no results.
fn run_match(state: &AppState, resume: Option<&[u8]>, skills: Option<&str>) -> MatchResponse {
    let start = std::time::Instant::now();

    let mut query = String::new();
    if let Some(bytes) = resume {
        if let Extraction::Text(text) = extract_pdf_text(bytes) {
            query.push_str(&text);
        }
    }
    if let Some(manual) = skills {
        query.push(' ');
        query.push_str(manual);
    }
    let query = normalize(&query);

    if query.is_empty() {
        return MatchResponse {
            query,
            took_s: start.elapsed().as_secs_f64(),
            warning: Some(EMPTY_QUERY_WARNING.to_string()),
            results: vec![],
        };
    }

    let results = rank(&query, &state.corpus, state.embedder.as_ref())
        .into_iter()
        .map(|m| MatchHit {
            skills: m.posting.skills,
            score: score_percent(m.score),
            linkedin_url: m.links.linkedin,
            naukri_url: m.links.naukri,
        })
        .collect();

    MatchResponse {
        query,
        took_s: start.elapsed().as_secs_f64(),
        warning: None,
        results,
    }
}

fn score_percent(score: f32) -> f64 {
    (f64::from(score) * 10_000.0).round() / 100.0
}
