//! Development jobs API
//!
//! An in-memory `/api/jobs` backend in the shape json-server exposes, so
//! the client has something real to talk to during development and tests.

pub mod routes;
pub mod store;

pub use routes::{app, serve};
pub use store::{JobStore, SeedError, load_seed};
