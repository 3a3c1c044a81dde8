//! CLI Tooling
//!
//! Command-line interface over the synchronization check and the manifest
//! generator. Commands return their printable output as a string; the binary
//! prints it and maps errors to a non-zero exit.

use crate::error::SyncError;
use crate::generate::write_manifest;
use crate::manifest::{Manifest, ManifestFile};
use crate::verify::{check_sync, SyncStatus};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::info;

/// Depsync CLI - staleness checking for generated dependency manifests
#[derive(Parser)]
#[command(name = "depsync")]
#[command(about = "Staleness checking for generated dependency manifests")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check that a manifest is in sync with its inputs
    Check {
        /// Path to the generated manifest
        #[arg(long)]
        manifest: PathBuf,
        /// Path to the file holding the generator code hash
        #[arg(long)]
        generator_hash: PathBuf,
        /// Path to the dependency requirements list
        #[arg(long)]
        requirements: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Regenerate a manifest from its inputs
    Generate {
        /// Path the manifest is written to; an existing payload is carried over
        #[arg(long)]
        manifest: PathBuf,
        /// Path to the file holding the generator code hash
        #[arg(long)]
        generator_hash: PathBuf,
        /// Path to the dependency requirements list
        #[arg(long)]
        requirements: PathBuf,
        /// Command recorded in the header as the way to update the file
        #[arg(long)]
        update_command: Option<String>,
    },
}

/// Execute a command, returning its printable output.
pub fn execute(command: &Commands) -> Result<String, SyncError> {
    match command {
        Commands::Check {
            manifest,
            generator_hash,
            requirements,
            format,
        } => execute_check(manifest, generator_hash, requirements, format),
        Commands::Generate {
            manifest,
            generator_hash,
            requirements,
            update_command,
        } => execute_generate(manifest, generator_hash, requirements, update_command.as_deref()),
    }
}

fn execute_check(
    manifest_path: &Path,
    generator_hash_path: &Path,
    requirements_path: &Path,
    format: &str,
) -> Result<String, SyncError> {
    let status = check_sync(manifest_path, generator_hash_path, requirements_path)?;
    match status {
        SyncStatus::Current => {
            info!(manifest = %manifest_path.display(), "manifest is in sync");
            if format == "json" {
                let document = ManifestFile::decode(manifest_path)?;
                Ok(json!({
                    "synced": true,
                    "manifest": manifest_path.display().to_string(),
                    "integrity": document.integrity,
                })
                .to_string())
            } else {
                Ok(format!(
                    "{} is in sync with its inputs",
                    manifest_path.display()
                ))
            }
        }
        SyncStatus::Stale { manifest_path } => Err(SyncError::OutOfDate {
            path: manifest_path,
        }),
    }
}

fn execute_generate(
    manifest_path: &Path,
    generator_hash_path: &Path,
    requirements_path: &Path,
    update_command: Option<&str>,
) -> Result<String, SyncError> {
    // Regenerating in place keeps the payload and refreshes the digest.
    let payload = if manifest_path.exists() {
        ManifestFile::decode(manifest_path)?
            .manifest
            .unwrap_or_default()
    } else {
        Manifest::default()
    };

    write_manifest(
        &payload,
        manifest_path,
        generator_hash_path,
        requirements_path,
        update_command,
    )?;
    Ok(format!("wrote {}", manifest_path.display()))
}
