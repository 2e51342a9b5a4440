use common::{Job, JobId};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse seed file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Seed files may be a bare array or a json-server `db.json` document.
#[derive(Deserialize)]
#[serde(untagged)]
enum SeedFile {
    Jobs(Vec<Job>),
    Db { jobs: Vec<Job> },
}

/// Reads jobs from `path`. A missing file yields an empty list.
pub fn load_seed(path: &Path) -> Result<Vec<Job>, SeedError> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "No seed file found, starting with an empty store");
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)?;
    let jobs = match serde_json::from_str::<SeedFile>(&content)? {
        SeedFile::Jobs(jobs) => jobs,
        SeedFile::Db { jobs } => jobs,
    };
    tracing::info!(path = %path.display(), count = jobs.len(), "Loaded seed jobs");
    Ok(jobs)
}

/// Ordered in-memory job collection. Cloning shares the underlying store.
#[derive(Clone, Default)]
pub struct JobStore {
    jobs: Arc<RwLock<Vec<Job>>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from seed jobs, assigning ids to any that lack one.
    pub fn with_jobs(jobs: Vec<Job>) -> Self {
        let mut seeded: Vec<Job> = Vec::with_capacity(jobs.len());
        for mut job in jobs {
            if job.id.is_none() {
                job.id = Some(next_id(&seeded));
            }
            seeded.push(job);
        }
        Self {
            jobs: Arc::new(RwLock::new(seeded)),
        }
    }

    /// Returns jobs in insertion order, truncated to `limit` when given.
    pub async fn list(&self, limit: Option<usize>) -> Vec<Job> {
        let jobs = self.jobs.read().await;
        let take = limit.unwrap_or(jobs.len());
        jobs.iter().take(take).cloned().collect()
    }

    pub async fn get(&self, id: &JobId) -> Option<Job> {
        let jobs = self.jobs.read().await;
        jobs.iter().find(|job| job.id.as_ref() == Some(id)).cloned()
    }

    /// Stores a new job under a fresh id. Any id on the payload is ignored.
    pub async fn insert(&self, mut job: Job) -> Job {
        let mut jobs = self.jobs.write().await;
        job.id = Some(next_id(&jobs));
        jobs.push(job.clone());
        job
    }

    /// Replaces the job stored under `id` wholesale. The path id wins over
    /// whatever id the payload carries.
    pub async fn replace(&self, id: &JobId, mut job: Job) -> Option<Job> {
        let mut jobs = self.jobs.write().await;
        let slot = jobs.iter_mut().find(|j| j.id.as_ref() == Some(id))?;
        job.id = Some(id.clone());
        *slot = job.clone();
        Some(job)
    }

    pub async fn remove(&self, id: &JobId) -> Option<Job> {
        let mut jobs = self.jobs.write().await;
        let pos = jobs.iter().position(|j| j.id.as_ref() == Some(id))?;
        Some(jobs.remove(pos))
    }

    pub async fn len(&self) -> usize {
        self.jobs.read().await.len()
    }
}

/// Next integer id after the largest numeric id present. When that would
/// overflow, the lowest unused positive integer is taken instead.
fn next_id(jobs: &[Job]) -> JobId {
    let used: HashSet<u64> = jobs
        .iter()
        .filter_map(|job| job.id.as_ref())
        .filter_map(|id| id.as_str().parse::<u64>().ok())
        .collect();

    let next = match used.iter().max() {
        None => 1,
        Some(max) => max
            .checked_add(1)
            .or_else(|| (1..).find(|n| !used.contains(n)))
            .unwrap_or(1),
    };
    JobId::from(next)
}
