//! Job orchestration
//!
//! The orchestrator owns the shared worker pool, HTTP client, and output
//! directory. Submitting a job spawns one URL task per seed on the pool,
//! joins them all regardless of completion order, unions the results, writes
//! the artifact, and reports completion through the job's event stream.
//!
//! Transports never appear here: `submit` hands back a [`JobHandle`] and the
//! caller maps it to whatever connection bookkeeping it needs.

use crate::crawler::task::process_url;
use crate::crawler::{progress_channel, ProgressEvent, ProgressSender, WorkerPool};
use crate::output::{artifact_name, write_artifact};
use crate::HarvestError;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use uuid::Uuid;

/// One extraction request over a list of seed URLs
///
/// Lives only for the duration of processing; nothing about it is persisted
/// beyond the artifact its result produces.
#[derive(Debug, Clone)]
pub struct Job {
    /// Unique id for this request
    pub id: Uuid,

    /// Seed page URLs, in submission order
    pub seeds: Vec<String>,

    /// When the request was received
    pub created_at: DateTime<Utc>,
}

impl Job {
    /// Creates a job over the given seed URLs
    pub fn new(seeds: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            seeds,
            created_at: Utc::now(),
        }
    }
}

/// The immutable outcome of a completed job
#[derive(Debug, Clone, serde::Serialize)]
pub struct JobResult {
    /// Deduplicated email addresses, in set-iteration order
    pub emails: Vec<String>,

    /// Cardinality of `emails`
    pub count: usize,

    /// Name of the artifact this result was written to
    pub artifact: String,
}

/// Cancellation signal observed by in-flight URL tasks
#[derive(Debug, Clone)]
pub struct CancelToken(watch::Receiver<bool>);

impl CancelToken {
    /// Returns true once the owning handle has requested cancellation
    pub fn is_cancelled(&self) -> bool {
        *self.0.borrow()
    }
}

/// Creates a linked cancel flag and token
pub fn cancel_pair() -> (watch::Sender<bool>, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (tx, CancelToken(rx))
}

/// A submitted job: its identity, event stream, and eventual result
///
/// Dropping the handle does not stop the job; only [`JobHandle::cancel`]
/// does, and even then tasks finish their current fetch first.
pub struct JobHandle {
    id: Uuid,
    created_at: DateTime<Utc>,
    events: mpsc::UnboundedReceiver<ProgressEvent>,
    result: JoinHandle<JobResult>,
    cancel: watch::Sender<bool>,
}

impl JobHandle {
    /// The job's unique id
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// When the job was submitted
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Receives the next progress event, or None once the job is done
    pub async fn next_event(&mut self) -> Option<ProgressEvent> {
        self.events.recv().await
    }

    /// Requests cancellation of the job's remaining work
    pub fn cancel(&self) {
        let _ = self.cancel.send(true);
    }

    /// Waits for the job to finish and returns its result
    pub async fn wait(self) -> crate::Result<JobResult> {
        self.result
            .await
            .map_err(|e| HarvestError::JobFailed(e.to_string()))
    }
}

/// Runs jobs over a shared bounded worker pool
///
/// All fields are cheap to clone; concurrent jobs from different callers
/// share the same pool capacity with FIFO admission and no further fairness
/// guarantee.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    pool: WorkerPool,
    client: Client,
    output_dir: PathBuf,
}

impl Orchestrator {
    /// Creates an orchestrator
    ///
    /// # Arguments
    ///
    /// * `pool` - The bounded executor URL tasks run on
    /// * `client` - The shared HTTP client
    /// * `output_dir` - Directory artifacts are written to
    pub fn new(pool: WorkerPool, client: Client, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            pool,
            client,
            output_dir: output_dir.into(),
        }
    }

    /// The directory artifacts are written to
    pub fn output_dir(&self) -> &std::path::Path {
        &self.output_dir
    }

    /// Submits a job and returns its handle
    ///
    /// The job starts running immediately; its tasks queue on the shared
    /// pool if all worker slots are busy.
    pub fn submit(&self, seeds: Vec<String>) -> JobHandle {
        let job = Job::new(seeds);
        let id = job.id;
        let created_at = job.created_at;

        let (progress, events) = progress_channel();
        let (cancel_tx, cancel) = cancel_pair();

        let orchestrator = self.clone();
        let result =
            tokio::spawn(async move { orchestrator.run_job(job, progress, cancel).await });

        JobHandle {
            id,
            created_at,
            events,
            result,
            cancel: cancel_tx,
        }
    }

    /// Runs a job to completion
    ///
    /// Dispatches one URL task per seed, waits for every task (a job's
    /// completion is gated on its slowest task), unions the per-task sets,
    /// persists the artifact, and emits the completion and elapsed-time
    /// events. Jobs always complete; there is no job-level timeout.
    pub async fn run_job(
        &self,
        job: Job,
        progress: ProgressSender,
        cancel: CancelToken,
    ) -> JobResult {
        let started = Instant::now();
        tracing::info!("Starting job {} with {} seed URLs", job.id, job.seeds.len());

        let mut handles = Vec::with_capacity(job.seeds.len());
        for url in &job.seeds {
            let client = self.client.clone();
            let url = url.clone();
            let progress = progress.clone();
            let cancel = cancel.clone();
            handles.push(
                self.pool
                    .spawn(async move { process_url(&client, &url, &progress, &cancel).await }),
            );
        }

        let mut all_emails: HashSet<String> = HashSet::new();
        for handle in handles {
            match handle.await {
                Ok(emails) => all_emails.extend(emails),
                Err(e) => tracing::error!("URL task in job {} did not finish: {}", job.id, e),
            }
        }

        let emails: Vec<String> = all_emails.into_iter().collect();
        let count = emails.len();
        let artifact = artifact_name(count);

        // The in-memory result outlives a failed write; the caller still
        // gets the emails even when the artifact never hit disk.
        match write_artifact(&self.output_dir, &artifact, &emails) {
            Ok(path) => tracing::info!("Artifact written to {}", path.display()),
            Err(e) => tracing::error!("Error writing artifact {}: {}", artifact, e),
        }

        progress.send(ProgressEvent::Completed {
            emails: emails.clone(),
            count,
            artifact: artifact.clone(),
        });

        let elapsed = started.elapsed();
        progress.send(ProgressEvent::Finished {
            elapsed_ms: elapsed.as_millis() as u64,
        });
        tracing::info!("Job {} completed: {} emails in {:?}", job.id, count, elapsed);

        JobResult {
            emails,
            count,
            artifact,
        }
    }
}
