//! Thin async wrappers around the `/api/jobs` endpoints.
//!
//! Every call issues exactly one request, never retries and can be aborted
//! through the `CancellationToken` it is handed. Mutations hand back what
//! the server said instead of discarding it.

use common::{Job, JobId, ListMode};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

#[derive(Debug, Clone)]
pub struct JobsClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl JobsClient {
    /// Fails when the base URL in `config` cannot carry the jobs endpoints.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.jobs_url()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    /// GET the collection. Home mode asks the server for `_limit=3`.
    pub async fn list_jobs(&self, mode: ListMode, token: &CancellationToken) -> Result<Vec<Job>> {
        let mut request = self.http.get(self.config.jobs_url()?);
        if let Some(limit) = mode.limit() {
            request = request.query(&[("_limit", limit)]);
        }
        let response = self.send(request, token).await?;
        read_json(response, token).await
    }

    /// GET a single job.
    pub async fn get_job(&self, id: &JobId, token: &CancellationToken) -> Result<Job> {
        let request = self.http.get(self.config.job_url(id)?);
        let response = self.send(request, token).await?;
        read_json(response, token).await
    }

    /// POST a new job and return the stored record, server-assigned id included.
    pub async fn create_job(&self, job: &Job, token: &CancellationToken) -> Result<Job> {
        let request = self.http.post(self.config.jobs_url()?).json(job);
        let response = self.send(request, token).await?;
        let created: Job = read_json(response, token).await?;
        tracing::info!(id = ?created.id, title = %created.title, "Job created");
        Ok(created)
    }

    /// PUT `job` over the stored record with the same id. This is a full
    /// replacement, not a merge.
    pub async fn update_job(&self, job: &Job, token: &CancellationToken) -> Result<Job> {
        let id = job.id.as_ref().ok_or(ClientError::MissingId)?;
        let request = self.http.put(self.config.job_url(id)?).json(job);
        let response = self.send(request, token).await?;
        let updated: Job = read_json(response, token).await?;
        tracing::info!(id = %id, "Job updated");
        Ok(updated)
    }

    /// DELETE the job with `id`.
    pub async fn delete_job(&self, id: &JobId, token: &CancellationToken) -> Result<()> {
        let request = self.http.delete(self.config.job_url(id)?);
        self.send(request, token).await?;
        tracing::info!(id = %id, "Job deleted");
        Ok(())
    }

    async fn send(&self, request: RequestBuilder, token: &CancellationToken) -> Result<Response> {
        let mut request = request.build()?;
        request
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        tracing::debug!(method = %request.method(), url = %request.url(), "Sending request");

        let response = tokio::select! {
            biased;
            _ = token.cancelled() => return Err(ClientError::Cancelled),
            response = self.http.execute(request) => response?,
        };

        let status = response.status();
        if !status.is_success() {
            let body = tokio::select! {
                biased;
                _ = token.cancelled() => return Err(ClientError::Cancelled),
                body = response.text() => body.unwrap_or_default(),
            };
            tracing::debug!(%status, "Request failed");
            return Err(ClientError::Status { status, body });
        }
        Ok(response)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response, token: &CancellationToken) -> Result<T> {
    let bytes = tokio::select! {
        biased;
        _ = token.cancelled() => return Err(ClientError::Cancelled),
        bytes = response.bytes() => bytes?,
    };
    Ok(serde_json::from_slice(&bytes)?)
}
