//! Path-to-page routing with a pre-render job loader.

use common::{Job, JobId, ListMode};
use tokio_util::sync::CancellationToken;

use crate::api::JobsClient;
use crate::error::Result;
use crate::listing::JobListings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Jobs,
    AddJob,
    Job(JobId),
    EditJob(JobId),
    NotFound,
}

impl Route {
    /// Matches a URL path. Query strings, fragments and trailing slashes
    /// are ignored.
    pub fn resolve(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["jobs"] => Route::Jobs,
            ["add-job"] => Route::AddJob,
            ["jobs", id] => Route::Job(JobId::from(*id)),
            ["edit-job", id] => Route::EditJob(JobId::from(*id)),
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Jobs => "/jobs".to_string(),
            Route::AddJob => "/add-job".to_string(),
            Route::Job(id) => format!("/jobs/{id}"),
            Route::EditJob(id) => format!("/edit-job/{id}"),
            Route::NotFound => "*".to_string(),
        }
    }
}

/// Fetches the job a detail or edit page needs before it renders.
///
/// Failures are handed back to the caller untouched.
pub async fn job_loader(client: &JobsClient, id: &JobId, token: &CancellationToken) -> Result<Job> {
    client.get_job(id, token).await
}

/// A resolved page with whatever its loader produced.
#[derive(Debug)]
pub enum Page {
    Home(JobListings),
    Jobs(JobListings),
    AddJob,
    Job(Job),
    EditJob(Job),
    NotFound,
}

impl Page {
    /// Runs the page's post-render fetch, if it has one.
    pub async fn run_effects(&mut self, client: &JobsClient) {
        if let Page::Home(listings) | Page::Jobs(listings) = self {
            listings.load(client).await;
        }
    }
}

/// Resolves paths into pages. Nothing is cached between navigations.
pub struct Router {
    client: JobsClient,
    root: CancellationToken,
    current: Option<CancellationToken>,
}

impl Router {
    pub fn new(client: JobsClient) -> Self {
        Self::with_token(client, CancellationToken::new())
    }

    /// Router whose requests all stop when `root` is cancelled.
    pub fn with_token(client: JobsClient, root: CancellationToken) -> Self {
        Self {
            client,
            root,
            current: None,
        }
    }

    pub fn client(&self) -> &JobsClient {
        &self.client
    }

    /// Leaves the current page and resolves `path`.
    ///
    /// Requests still running for the previous page are cancelled. Loader
    /// routes fetch their job before returning; list pages come back
    /// mounted but not yet fetched (see [`Page::run_effects`]).
    pub async fn navigate(&mut self, path: &str) -> Result<Page> {
        if let Some(previous) = self.current.take() {
            previous.cancel();
        }
        let token = self.root.child_token();
        self.current = Some(token.clone());

        let route = Route::resolve(path);
        tracing::info!(path, route = ?route, "Navigating");

        let page = match route {
            Route::Home => Page::Home(JobListings::with_parent(ListMode::Home, &token)),
            Route::Jobs => Page::Jobs(JobListings::with_parent(ListMode::Full, &token)),
            Route::AddJob => Page::AddJob,
            Route::Job(id) => Page::Job(job_loader(&self.client, &id, &token).await?),
            Route::EditJob(id) => Page::EditJob(job_loader(&self.client, &id, &token).await?),
            Route::NotFound => Page::NotFound,
        };
        Ok(page)
    }

    /// Navigates and runs the page's effects.
    pub async fn open(&mut self, path: &str) -> Result<Page> {
        let mut page = self.navigate(path).await?;
        page.run_effects(&self.client).await;
        Ok(page)
    }

    /// Cancels every request started through this router.
    pub fn shutdown(&self) {
        self.root.cancel();
    }
}
