use axum::{extract::State, response::IntoResponse, routing::get, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::app::SharedState;
use crate::research::ideas;
use crate::research::pipeline;
use crate::research::types::{PipelineParams, SortKey};

#[derive(Serialize)]
struct Health {
    status: &'static str,
    version: &'static str,
}

pub fn build_router(state: SharedState) -> Router {
    // Every business route is reachable both bare and under /api; the
    // service has always exposed both spellings.
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/analyze", post(analyze))
        .route("/api/analyze", post(analyze))
        .route("/analyze_papers", post(analyze_papers))
        .route("/api/analyze_papers", post(analyze_papers))
        .route("/generate_ideas", post(generate_ideas))
        .route("/api/generate_ideas", post(generate_ideas))
        .route("/elaborate", post(elaborate))
        .route("/api/elaborate", post(elaborate))
        .route("/random_ideas", post(random_ideas))
        .route("/api/random_ideas", post(random_ideas))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health(State(state): State<SharedState>) -> impl IntoResponse {
    crate::metrics::inc_api_request("/health");
    Json(Health { status: "ok", version: state.version })
}

async fn metrics() -> impl IntoResponse {
    crate::metrics::inc_api_request("/metrics");
    let body = crate::metrics::gather_prometheus(env!("CARGO_PKG_VERSION"));
    ([("Content-Type", "text/plain; version=0.0.4")], body)
}

#[derive(Deserialize)]
struct AnalyzeReq {
    #[serde(default)]
    topic: String,
    #[serde(default = "def_num_papers")]
    num_papers: usize,
    #[serde(default = "def_num_ideas")]
    num_ideas: usize,
    #[serde(default = "def_word_limit")]
    word_limit: usize,
    #[serde(default = "def_sort")]
    sort: String,
    #[serde(default)]
    analysis_prompt: String,
}
fn def_num_papers() -> usize { 10 }
fn def_num_ideas() -> usize { 10 }
fn def_word_limit() -> usize { 250 }
fn def_sort() -> String { "relevance".to_string() }

#[derive(Serialize)]
struct AnalyzeResp {
    result: String,
}

async fn analyze(State(state): State<SharedState>, Json(req): Json<AnalyzeReq>) -> impl IntoResponse {
    crate::metrics::inc_api_request("/analyze");
    let params = PipelineParams {
        topic: req.topic,
        sort: SortKey::parse(&req.sort),
        num_papers: req.num_papers.max(1),
        num_ideas: req.num_ideas.max(1),
        word_limit: req.word_limit,
        analysis_prompt: req.analysis_prompt,
    };
    let result = pipeline::process_papers(&state.handles, &params).await;
    Json(AnalyzeResp { result })
}

#[derive(Deserialize)]
struct AnalyzePapersReq {
    #[serde(default)]
    topic: String,
    #[serde(default = "def_num_papers_small")]
    num_papers: usize,
}
fn def_num_papers_small() -> usize { 3 }

#[derive(Serialize)]
struct AnalyzePapersResp {
    papers: Vec<crate::research::types::PaperAnalysis>,
}

async fn analyze_papers(
    State(state): State<SharedState>,
    Json(req): Json<AnalyzePapersReq>,
) -> impl IntoResponse {
    crate::metrics::inc_api_request("/analyze_papers");
    let papers = match state
        .handles
        .papers
        .search(&req.topic, req.num_papers.max(1), SortKey::Relevance)
        .await
    {
        Ok(papers) => papers,
        Err(e) => {
            warn!(error = %e, "analyze_papers: search failed");
            vec![]
        }
    };
    let papers: Vec<_> = papers.into_iter().take(req.num_papers.max(1)).collect();
    let analyses =
        pipeline::analyze_batch(&state.handles, &papers, ideas::DEFAULT_ANALYSIS_PROMPT).await;
    Json(AnalyzePapersResp { papers: analyses })
}

#[derive(Deserialize)]
struct GenerateIdeasReq {
    #[serde(default)]
    limitations: String,
    #[serde(default)]
    topic: String,
    #[serde(default = "def_num_ideas_small")]
    num_ideas: usize,
    #[serde(default = "def_word_limit_small")]
    word_limit: usize,
}
fn def_num_ideas_small() -> usize { 3 }
fn def_word_limit_small() -> usize { 150 }

#[derive(Serialize)]
struct IdeaSummary {
    summary: String,
}

#[derive(Serialize)]
struct GenerateIdeasResp {
    ideas: Vec<IdeaSummary>,
}

async fn generate_ideas(
    State(state): State<SharedState>,
    Json(req): Json<GenerateIdeasReq>,
) -> impl IntoResponse {
    crate::metrics::inc_api_request("/generate_ideas");
    let prompt = ideas::idea_prompt(&req.limitations, &req.topic, req.num_ideas, req.word_limit);
    let ideas = match state.handles.gemini.generate(&prompt).await {
        Ok(text) => ideas::split_idea_list(&text)
            .into_iter()
            .map(|summary| IdeaSummary { summary })
            .collect(),
        Err(e) => {
            warn!(error = %e, "generate_ideas: backend unavailable");
            vec![]
        }
    };
    Json(GenerateIdeasResp { ideas })
}

#[derive(Deserialize)]
struct ElaborateReq {
    #[serde(default)]
    topic: String,
    #[serde(default)]
    idea_text: String,
    #[serde(default = "def_word_limit_elaborate")]
    word_limit: usize,
}
fn def_word_limit_elaborate() -> usize { 500 }

pub const ELABORATION_UNAVAILABLE: &str = "AI elaboration unavailable.";

#[derive(Serialize)]
struct ElaborateResp {
    result: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_error: Option<String>,
}

async fn elaborate(State(state): State<SharedState>, Json(req): Json<ElaborateReq>) -> impl IntoResponse {
    crate::metrics::inc_api_request("/elaborate");
    let prompt = ideas::elaboration_prompt(&req.idea_text, &req.topic, req.word_limit);
    let result = match state.handles.gemini.generate(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "elaborate: backend unavailable");
            ELABORATION_UNAVAILABLE.to_string()
        }
    };

    // The illustration is optional extra content; without an image key the
    // fields are omitted entirely.
    let (image, image_error) = if state.handles.images.has_key() {
        let subject = if req.idea_text.trim().is_empty() { &req.topic } else { &req.idea_text };
        let image_prompt = format!("Conceptual illustration of the research idea: {subject}");
        match state.handles.images.generate(&image_prompt).await {
            Ok(b64) => (Some(b64), None),
            Err(e) => {
                warn!(error = %e, "elaborate: image generation failed");
                (None, Some(e.to_string()))
            }
        }
    } else {
        (None, None)
    };

    Json(ElaborateResp { result, image, image_error })
}

#[derive(Deserialize)]
struct RandomIdeasReq {
    #[serde(default = "def_count")]
    count: usize,
}
fn def_count() -> usize { 5 }

#[derive(Serialize)]
struct RandomIdeasResp {
    ideas: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    images: Option<Vec<Option<String>>>,
}

async fn random_ideas(
    State(state): State<SharedState>,
    Json(req): Json<RandomIdeasReq>,
) -> impl IntoResponse {
    crate::metrics::inc_api_request("/random_ideas");
    let count = req.count.max(1);

    let papers = match state.handles.papers.trending().await {
        Ok(papers) => papers,
        Err(e) => {
            warn!(error = %e, "random_ideas: trending fetch failed");
            vec![]
        }
    };

    let mut idea_list: Vec<String> = Vec::new();
    if state.handles.gemini.has_key() && !papers.is_empty() {
        let prompt = ideas::gap_prompt(&papers, count);
        match state.handles.gemini.generate(&prompt).await {
            Ok(text) => idea_list = ideas::clean_gap_lines(&text, count),
            Err(e) => warn!(error = %e, "random_ideas: gap generation failed"),
        }
    }
    if idea_list.is_empty() {
        idea_list = ideas::fallback_sample(count);
    }

    let images = if state.handles.images.has_key() {
        let mut images = Vec::with_capacity(idea_list.len());
        for idea in &idea_list {
            let image_prompt = format!("Conceptual illustration of the research idea: {idea}");
            match state.handles.images.generate(&image_prompt).await {
                Ok(b64) => images.push(Some(b64)),
                Err(e) => {
                    warn!(error = %e, "random_ideas: image generation failed");
                    images.push(None);
                }
            }
        }
        Some(images)
    } else {
        None
    };

    Json(RandomIdeasResp { ideas: idea_list, images })
}
