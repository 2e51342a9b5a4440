//! The job list component: one fetch per mount, tracked as a tagged state.

use common::{Job, ListMode};
use tokio_util::sync::CancellationToken;

use crate::api::JobsClient;
use crate::error::ClientError;

/// Lifecycle of a list fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    /// Not fetching and nothing fetched (the fetch was cancelled).
    Idle,
    Loading,
    Success(Vec<Job>),
    /// The fetch failed; holds the reason.
    Error(String),
}

/// A mounted job list.
///
/// The mode is fixed for the lifetime of the instance; showing a different
/// mode means mounting a new list.
#[derive(Debug)]
pub struct JobListings {
    mode: ListMode,
    state: LoadState,
    token: CancellationToken,
    fetched: bool,
}

impl JobListings {
    /// Mounts a list. It reports loading until `load` settles.
    pub fn new(mode: ListMode) -> Self {
        Self::with_token(mode, CancellationToken::new())
    }

    /// Mounts a list whose fetch is aborted when `parent` is cancelled.
    pub fn with_parent(mode: ListMode, parent: &CancellationToken) -> Self {
        Self::with_token(mode, parent.child_token())
    }

    fn with_token(mode: ListMode, token: CancellationToken) -> Self {
        Self {
            mode,
            state: LoadState::Loading,
            token,
            fetched: false,
        }
    }

    /// Runs the fetch. Only the first call issues a request; later calls
    /// return the settled state.
    pub async fn load(&mut self, client: &JobsClient) -> &LoadState {
        if self.fetched {
            return &self.state;
        }
        self.fetched = true;
        self.state = LoadState::Loading;

        self.state = match client.list_jobs(self.mode, &self.token).await {
            Ok(jobs) => {
                tracing::debug!(mode = ?self.mode, count = jobs.len(), "Fetched jobs");
                LoadState::Success(jobs)
            }
            Err(ClientError::Cancelled) => {
                tracing::debug!(mode = ?self.mode, "Job fetch cancelled");
                LoadState::Idle
            }
            Err(e) => {
                tracing::error!(mode = ?self.mode, error = %e, "Error fetching jobs");
                LoadState::Error(e.to_string())
            }
        };
        &self.state
    }

    /// Aborts an in-flight fetch.
    pub fn unmount(&self) {
        self.token.cancel();
    }

    /// Token tied to this list's lifetime, for cancelling from another task.
    pub fn cancel_token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn mode(&self) -> ListMode {
        self.mode
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LoadState::Loading)
    }

    /// Fetched jobs, or nothing if the fetch has not succeeded.
    pub fn jobs(&self) -> &[Job] {
        match &self.state {
            LoadState::Success(jobs) => jobs,
            _ => &[],
        }
    }
}
