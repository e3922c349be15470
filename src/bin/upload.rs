//! Operator CLI for batch gallery uploads.
//!
//! Logs in with the shared admin password, then runs the presign → PUT →
//! create sequence for the selected files as one all-or-nothing submission.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Mutex;

use decora_core::features::gallery::dtos::parse_keywords;
use decora_core::features::gallery::models::Category;
use decora_core::modules::uploader::{
    ApiTransport, FileStatus, UploadItem, UploadObserver, UploadOrchestrator, UploadPlan,
};

#[derive(Parser, Debug)]
#[command(
    name = "decora-upload",
    about = "Upload images to the Decora gallery as one gallery item"
)]
struct Args {
    /// Base URL of the API server
    #[arg(long, default_value = "http://localhost:3000")]
    api_base: String,

    /// Admin password (falls back to the ADMIN_PASSWORD env var)
    #[arg(long)]
    password: Option<String>,

    /// Category: birthdays, weddings or corporate
    #[arg(long)]
    category: String,

    /// Display title for the gallery item
    #[arg(long)]
    title: String,

    /// Comma or whitespace separated keywords
    #[arg(long, default_value = "")]
    keywords: String,

    /// Image files to upload, in display order
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

/// Prints status transitions and progress in ~10% steps
struct ConsoleObserver {
    filenames: Vec<String>,
    last_decile: Mutex<Vec<u8>>,
}

impl ConsoleObserver {
    fn new(filenames: Vec<String>) -> Self {
        let count = filenames.len();
        Self {
            filenames,
            last_decile: Mutex::new(vec![0; count]),
        }
    }
}

impl UploadObserver for ConsoleObserver {
    fn on_status(&self, index: usize, status: FileStatus) {
        let name = &self.filenames[index];
        match status {
            FileStatus::Pending => tracing::debug!("{}: preparing", name),
            FileStatus::Uploading => tracing::info!("{}: uploading", name),
            FileStatus::Success => tracing::info!("{}: done", name),
            FileStatus::Error => tracing::error!("{}: failed", name),
        }
    }

    fn on_progress(&self, index: usize, percent: u8) {
        let mut deciles = self.last_decile.lock().unwrap();
        let decile = percent / 10;
        if decile > deciles[index] {
            deciles[index] = decile;
            tracing::info!("{}: {}%", self.filenames[index], percent);
        }
    }
}

fn content_type_for(path: &std::path::Path) -> String {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
    .to_string()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let password = args
        .password
        .clone()
        .or_else(|| std::env::var("ADMIN_PASSWORD").ok())
        .context("Pass --password or set ADMIN_PASSWORD")?;

    let category = Category::from_str(&args.category).map_err(|e| anyhow::anyhow!(e))?;

    let mut files = Vec::with_capacity(args.files.len());
    let mut filenames = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let data = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.to_string())
            .unwrap_or_else(|| "unnamed".to_string());

        filenames.push(filename.clone());
        files.push(UploadItem {
            filename,
            content_type: content_type_for(path),
            data,
        });
    }

    tracing::info!("Logging in to {}", args.api_base);
    let transport = ApiTransport::login(&args.api_base, &password)
        .await
        .context("Login failed")?;

    let plan = UploadPlan {
        title: args.title,
        category,
        keywords: parse_keywords(&args.keywords),
        files,
    };

    let observer = ConsoleObserver::new(filenames);
    let orchestrator = UploadOrchestrator::new(transport);

    let created = orchestrator
        .run(plan, &observer)
        .await
        .context("Submission aborted")?;

    tracing::info!(
        "Created gallery item {} with {} image(s)",
        created.design_id,
        created.image_keys.len()
    );

    Ok(())
}
