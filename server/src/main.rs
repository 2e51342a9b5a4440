//! Jobs API Server
//!
//! Serves an in-memory job collection over the REST API the jobs client
//! consumes, seeded from a JSON file.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use server::{JobStore, load_seed, serve};

#[derive(Parser, Debug)]
#[command(name = "jobs-server")]
#[command(version)]
#[command(about = "Development REST backend for job postings")]
struct Args {
    /// Address to listen on
    #[arg(long, env = "JOBS_API_ADDR", default_value = "127.0.0.1:3000")]
    addr: SocketAddr,

    /// Seed file (a JSON array of jobs or a `{ "jobs": [...] }` document)
    #[arg(long, default_value = "data/jobs.json")]
    data: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let jobs = load_seed(&args.data)?;
    let store = JobStore::with_jobs(jobs);
    tracing::info!(jobs = store.len().await, "Job store ready");

    serve(args.addr, store).await?;
    Ok(())
}
