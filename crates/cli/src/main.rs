//! `enhancer` -- rate, enhance and re-rate one image from the terminal.
//!
//! Reads an image from disk, submits it to the enhancement service and
//! prints a before/after report. Optionally saves the enhanced image.
//!
//! # Environment variables
//!
//! | Variable                   | Required | Default                                  |
//! |----------------------------|----------|------------------------------------------|
//! | `ENHANCEMENT_ENDPOINT_URL` | no       | `http://localhost:8000/process/complete` |
//! | `ENHANCEMENT_TIMEOUT_SECS` | no       | `120` (`0` waits indefinitely)           |
//!
//! Command-line flags override the environment.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use enhancer_cli::download::{self, Target};
use enhancer_cli::{report, upload};
use enhancer_client::client::EnhancementClient;
use enhancer_client::config::ClientConfig;
use enhancer_core::session::Session;
use enhancer_core::workflow::WorkflowState;

#[derive(Debug, Parser)]
#[command(name = "enhancer", version, about = "Rate, enhance and re-rate an image")]
struct Args {
    /// Image to enhance.
    image: PathBuf,

    /// Enhancement endpoint URL.
    #[arg(long)]
    endpoint: Option<String>,

    /// Request timeout in seconds; 0 waits indefinitely.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Save the enhanced image to this path.
    #[arg(long, conflicts_with = "output_dir")]
    output: Option<PathBuf>,

    /// Save the enhanced image into this directory as `enhanced-<name>`.
    #[arg(long)]
    output_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "enhancer_cli=info,enhancer_client=info,enhancer_core=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = ClientConfig::from_env().context("loading client configuration")?;
    if let Some(endpoint) = args.endpoint {
        config.endpoint_url = endpoint;
    }
    if let Some(secs) = args.timeout_secs {
        config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
    }
    tracing::info!(endpoint = %config.endpoint_url, timeout = ?config.timeout, "Loaded client configuration");

    let client = EnhancementClient::new(&config)?;
    let mut session = Session::new(client);

    match upload::read_selected_file(&args.image) {
        Ok(file) => {
            session.select_file(file);
        }
        Err(e) => {
            tracing::error!(error = %e, "Could not read image");
            session.file_read_failed();
        }
    }

    if matches!(session.state(), WorkflowState::Preview { .. }) {
        println!("Processing {}...", args.image.display());
        session.submit().await;
    }

    match session.state() {
        WorkflowState::Success { result, .. } => {
            print!("{}", report::render(result));
            println!("History:");
            print!(
                "{}",
                report::render_history(session.history(), session.machine().active_key())
            );
        }
        WorkflowState::Error { message } => {
            anyhow::bail!("Enhancement failed: {message}");
        }
        other => anyhow::bail!("Unexpected workflow state: {}", other.name()),
    }

    let target = match (args.output, args.output_dir) {
        (Some(path), _) => Some(Target::File(path)),
        (None, Some(dir)) => Some(Target::Directory(dir)),
        (None, None) => None,
    };
    if let Some(target) = target {
        if let Some(enhanced) = session.download()? {
            let path = download::save(&enhanced, &target)?;
            println!("Saved enhanced image to {}", path.display());
        }
    }

    Ok(())
}
