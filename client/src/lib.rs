//! Jobs Client
//!
//! Browses and edits job postings held by a REST API: typed mutations,
//! the job list component, and a router with a pre-render job loader.

pub mod api;
pub mod config;
pub mod error;
pub mod listing;
pub mod render;
pub mod router;

pub use api::JobsClient;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use listing::{JobListings, LoadState};
pub use router::{job_loader, Page, Route, Router};
