//! Command-line client for the media backend.
//!
//! Run the server first with:
//!   cargo run --bin rust-media-backend
//!
//! Then drive it from a shell:
//!   cargo run --bin media_cli -- upload photo.jpg clip.mp4
//!   cargo run --bin media_cli -- list
//!   cargo run --bin media_cli -- delete uploads/1700000000000-photo.jpg

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::sync::mpsc;

use rust_media_backend::client::{MediaClient, UploadState};
use rust_media_backend::utils::media_type::{self, MediaKind};

#[derive(Parser)]
#[command(name = "media-cli")]
#[command(about = "Command-line client for the media backend", long_about = None)]
struct Cli {
    /// Backend base URL
    #[arg(short, long, default_value = "http://127.0.0.1:3000")]
    backend: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload one or more local files
    Upload {
        /// Paths to upload
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// List stored files, newest first
    List,

    /// Delete a stored file by its full key
    Delete {
        /// Object key, e.g. uploads/1700000000000-photo.jpg
        key: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = MediaClient::new(&cli.backend);

    match cli.command {
        Commands::Upload { paths } => {
            // Uploads are independent, so they all run at once.
            let mut handles = Vec::new();
            for path in &paths {
                let client = client.clone();
                let path = path.clone();
                handles.push(tokio::spawn(
                    async move { upload_one(&client, &path).await },
                ));
            }

            let mut failures = 0;
            for handle in handles {
                match handle.await? {
                    Ok(true) => {}
                    Ok(false) => failures += 1,
                    Err(e) => {
                        eprintln!("✗ {:#}", e);
                        failures += 1;
                    }
                }
            }

            print_gallery(&client).await;

            if failures > 0 {
                eprintln!("✗ {} of {} uploads failed", failures, paths.len());
                std::process::exit(1);
            }
        }

        Commands::List => print_gallery(&client).await,

        Commands::Delete { key } => match client.delete_file(&key).await {
            Ok(outcome) => {
                println!("✓ {}", outcome.message);
                print_gallery(&client).await;
            }
            Err(e) => {
                eprintln!("✗ {}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

/// Uploads a single file, printing tagged progress lines. Returns
/// whether the upload reached `Succeeded`.
async fn upload_one(client: &MediaClient, path: &Path) -> Result<bool> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .with_context(|| format!("{} has no file name", path.display()))?;
    let content_type = media_type::content_type_for(&file_name);

    let metadata = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("Cannot read {}", path.display()))?;
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Cannot open {}", path.display()))?;

    println!(
        "Uploading {} ({})",
        file_name,
        media_type::format_size(metadata.len())
    );

    let (tx, mut rx) = mpsc::unbounded_channel();
    let printer_name = file_name.clone();
    let printer = tokio::spawn(async move {
        // Uploads interleave, so every line carries the file name, and
        // progress only prints when it crosses the next 10% step.
        let mut last_decile = None;
        while let Some(state) = rx.recv().await {
            match state {
                UploadState::Requesting => {}
                UploadState::Uploading(p) => {
                    let decile = p.percentage / 10;
                    if last_decile != Some(decile) {
                        last_decile = Some(decile);
                        println!(
                            "  {}: {}% ({} / {} bytes)",
                            printer_name, p.percentage, p.loaded, p.total
                        );
                    }
                }
                UploadState::Succeeded { key } => {
                    println!("✓ {} uploaded as {}", printer_name, key);
                }
                UploadState::Failed { message } => {
                    eprintln!("✗ {}: {}", printer_name, message);
                }
                UploadState::Idle => {}
            }
        }
    });

    let outcome = client
        .upload_media(&file_name, content_type, file, metadata.len(), &tx)
        .await;

    drop(tx);
    let _ = printer.await;

    Ok(matches!(outcome, UploadState::Succeeded { .. }))
}

/// Prints the gallery, newest first.
async fn print_gallery(client: &MediaClient) {
    let files = match client.list_files().await {
        Ok(files) => files,
        Err(e) => {
            eprintln!("✗ {}", e);
            std::process::exit(1);
        }
    };

    if files.is_empty() {
        println!("No files uploaded yet");
        return;
    }

    println!("{} file(s):", files.len());
    for file in files {
        let kind = MediaKind::classify(&file.file_name, file.is_image);
        println!(
            "  [{}] {}  {}  {}",
            kind.label(),
            file.file_name,
            media_type::format_size(file.size.max(0) as u64),
            file.last_modified.format("%Y-%m-%d %H:%M:%S"),
        );
        println!("        key: {}", file.key);
    }
}
