//! `jobs` command line client
//!
//! Lists, shows, creates, edits and deletes job postings on a jobs API.

use anyhow::Context;
use clap::{Parser, Subcommand};
use common::{Job, JobId, ListMode};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use client::render::{render_job, render_listing, render_page};
use client::{job_loader, ClientConfig, JobListings, JobsClient, LoadState, Router};

#[derive(Parser, Debug)]
#[command(name = "jobs")]
#[command(version)]
#[command(about = "Browse and manage job postings")]
#[command(propagate_version = true)]
struct Args {
    /// Base URL of the jobs API
    #[arg(long, env = "JOBS_API_URL", default_value = "http://127.0.0.1:3000")]
    api_url: String,

    /// Request timeout in seconds (platform default when unset)
    #[arg(long)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List jobs
    List {
        /// Only the three most recent jobs
        #[arg(long)]
        home: bool,
    },

    /// Show one job
    Show { id: String },

    /// Create a job from a JSON file
    Add {
        #[arg(long)]
        file: PathBuf,
    },

    /// Replace a job with the contents of a JSON file
    Edit {
        id: String,

        #[arg(long)]
        file: PathBuf,
    },

    /// Delete a job
    Delete { id: String },

    /// Open an app path such as `/`, `/jobs` or `/jobs/2`
    Open { path: String },
}

fn read_job(path: &Path) -> anyhow::Result<Job> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
}

/// Cancels the returned token on Ctrl-C so in-flight requests are dropped.
fn install_interrupt_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, cancelling requests");
            token_clone.cancel();
        }
    });

    token
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = ClientConfig::new(args.api_url);
    if let Some(secs) = args.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    let client = JobsClient::new(config)?;
    let token = install_interrupt_handler();

    match args.command {
        Commands::List { home } => {
            let mut listings = JobListings::with_parent(ListMode::from_home_flag(home), &token);
            let state = listings.load(&client).await;
            if let LoadState::Error(reason) = state {
                eprintln!("❌ {reason}");
            }
            print!("{}", render_listing(&listings));
        }
        Commands::Show { id } => {
            let job = job_loader(&client, &JobId::from(id), &token).await?;
            print!("{}", render_job(&job));
        }
        Commands::Add { file } => {
            let mut job = read_job(&file)?;
            job.id = None;
            let created = client.create_job(&job, &token).await?;
            let id = created.id.map(|id| id.to_string()).unwrap_or_default();
            println!("✅ Job added (id {id})");
        }
        Commands::Edit { id, file } => {
            let job = read_job(&file)?.with_id(id);
            let updated = client.update_job(&job, &token).await?;
            println!("✅ Job updated");
            print!("{}", render_job(&updated));
        }
        Commands::Delete { id } => {
            client.delete_job(&JobId::from(id), &token).await?;
            println!("🗑️  Job deleted");
        }
        Commands::Open { path } => {
            let mut router = Router::with_token(client, token);
            let page = router.open(&path).await?;
            print!("{}", render_page(&page));
        }
    }

    Ok(())
}
