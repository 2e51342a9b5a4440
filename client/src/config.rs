use common::JobId;
use reqwest::Url;
use std::time::Duration;

use crate::error::{ClientError, Result};

/// Where the jobs API lives and how long to wait on it.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme, host and port of the backend, e.g. `http://127.0.0.1:3000`
    pub base_url: String,
    /// Per-request timeout. `None` leaves it to the platform defaults.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Collection endpoint.
    pub fn jobs_url(&self) -> Result<Url> {
        self.endpoint(None)
    }

    /// Item endpoint for `id`. The id is always a single encoded path
    /// segment, whatever characters it holds.
    pub fn job_url(&self, id: &JobId) -> Result<Url> {
        self.endpoint(Some(id))
    }

    fn endpoint(&self, id: Option<&JobId>) -> Result<Url> {
        let invalid = |reason: String| ClientError::InvalidUrl {
            url: self.base_url.clone(),
            reason,
        };

        let mut url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| invalid("cannot be a base URL".to_string()))?;
            segments.pop_if_empty().push("api").push("jobs");
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }
}
