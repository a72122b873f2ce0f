//! HTTP surface for job submission, progress polling, and artifact download
//!
//! A thin transport over the orchestrator: it owns the mapping from job ids
//! to job handles and accumulates each job's progress log in memory. The
//! core never sees a connection or a session id.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::crawler::{JobResult, Orchestrator, ProgressEvent};
use crate::output::open_artifact;
use crate::HarvestError;

/// Landing page served at the root route
const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>mailharvest</title></head>
<body>
<h1>mailharvest</h1>
<p>POST a JSON body of the form <code>{"urls": ["https://..."]}</code> to
<code>/jobs</code>, poll <code>/jobs/{id}</code> for progress, and fetch the
finished artifact from <code>/download/{filename}</code>.</p>
</body>
</html>
"#;

/// Shared state behind every handler
#[derive(Clone)]
pub struct AppState {
    orchestrator: Orchestrator,
    jobs: Arc<Mutex<HashMap<Uuid, JobEntry>>>,
}

/// What the server remembers about one submitted job
#[derive(Debug, Default)]
struct JobEntry {
    log: Vec<String>,
    result: Option<JobResult>,
}

/// Job submission request body
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub urls: Vec<String>,
}

/// Job submission response body
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub job_id: Uuid,
}

/// Status view returned by the polling endpoint
#[derive(Debug, Serialize)]
struct JobView {
    job_id: Uuid,
    state: &'static str,
    log: Vec<String>,
    result: Option<JobResult>,
}

/// Builds the application router
pub fn app(orchestrator: Orchestrator) -> Router {
    let state = AppState {
        orchestrator,
        jobs: Arc::new(Mutex::new(HashMap::new())),
    };

    Router::new()
        .route("/", get(index))
        .route("/jobs", post(submit_job))
        .route("/jobs/:id", get(job_status))
        .route("/download/:filename", get(download))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Binds the configured address and serves until the process exits
pub async fn run_server(config: &ServerConfig, orchestrator: Orchestrator) -> crate::Result<()> {
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app(orchestrator)).await?;
    Ok(())
}

async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}

/// Accepts a job, registers it, and spawns the event-draining driver
async fn submit_job(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> Response {
    if request.urls.is_empty() || request.urls.iter().any(|u| u.trim().is_empty()) {
        return (
            StatusCode::BAD_REQUEST,
            "urls must be a non-empty list of non-empty strings",
        )
            .into_response();
    }

    let mut handle = state.orchestrator.submit(request.urls);
    let job_id = handle.id();
    state
        .jobs
        .lock()
        .unwrap()
        .insert(job_id, JobEntry::default());

    let jobs = state.jobs.clone();
    tokio::spawn(async move {
        while let Some(event) = handle.next_event().await {
            let line = event.describe();
            let mut jobs = jobs.lock().unwrap();
            if let Some(entry) = jobs.get_mut(&job_id) {
                entry.log.push(line);
                if let ProgressEvent::Completed {
                    emails,
                    count,
                    artifact,
                } = event
                {
                    entry.result = Some(JobResult {
                        emails,
                        count,
                        artifact,
                    });
                }
            }
        }

        if let Err(e) = handle.wait().await {
            tracing::error!("Job {} driver failed: {}", job_id, e);
        }
    });

    Json(SubmitResponse { job_id }).into_response()
}

/// Returns the accumulated progress log and, once done, the result
async fn job_status(State(state): State<AppState>, Path(id): Path<Uuid>) -> Response {
    let jobs = state.jobs.lock().unwrap();
    match jobs.get(&id) {
        Some(entry) => {
            let view = JobView {
                job_id: id,
                state: if entry.result.is_some() {
                    "completed"
                } else {
                    "running"
                },
                log: entry.log.clone(),
                result: entry.result.clone(),
            };
            Json(view).into_response()
        }
        None => (StatusCode::NOT_FOUND, "Unknown job").into_response(),
    }
}

/// Serves a named artifact as a downloadable attachment
async fn download(State(state): State<AppState>, Path(filename): Path<String>) -> Response {
    match open_artifact(state.orchestrator.output_dir(), &filename) {
        Ok(bytes) => (
            StatusCode::OK,
            [
                (
                    header::CONTENT_TYPE,
                    "text/plain; charset=utf-8".to_string(),
                ),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", filename),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(HarvestError::ArtifactNotFound { .. }) => {
            (StatusCode::NOT_FOUND, "File not found").into_response()
        }
        Err(e) => {
            tracing::error!("Error reading artifact {}: {}", filename, e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to read artifact").into_response()
        }
    }
}
