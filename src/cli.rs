//! Command-line front-end.
//!
//! Parses arguments, resolves configuration and wires the JSON-file store and
//! the presigned URL issuer into a [`GalleryItemManager`]. Results are printed
//! to stdout as JSON; failures are printed to stderr as a structured error.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info};

use crate::config::{load_config, ConfigError, GalleryConfig, DEFAULT_GALLERY_ID};
use crate::error_output::{to_error_json, ToStructuredError};
use crate::item::{
    CreatedItem, GalleryError, GalleryItem, GalleryItemManager, Geometry, ItemPatch, NewItem,
    Placement,
};
use crate::staging::{StagingError, StagingKey, UploadStager};
use crate::store::JsonFileItemStore;

/// Photo Gallery - ordered photo collections with direct-to-storage uploads
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Config file (default: ~/.photo-gallery/config.toml)
    #[arg(long, env = "PHOTO_GALLERY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Gallery to operate on
    #[arg(short, long, env = "PHOTO_GALLERY_GALLERY")]
    pub gallery: Option<String>,

    /// JSON file backing the item store
    #[arg(long, env = "PHOTO_GALLERY_STORE")]
    pub store: Option<PathBuf>,

    #[command(flatten)]
    pub staging: StagingArgs,

    /// Enable JSON log format
    #[arg(long, env = "PHOTO_GALLERY_LOG_JSON", default_value = "false")]
    pub log_json: bool,

    /// Log rotation period: daily, hourly, or never
    #[arg(long, env = "PHOTO_GALLERY_LOG_ROTATION", default_value = "daily")]
    pub log_rotation: String,

    /// Custom log directory (default: ~/.photo-gallery/logs)
    #[arg(long, env = "PHOTO_GALLERY_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Also write log events to stderr
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Overrides for the `[staging]` config table.
#[derive(clap::Args, Debug, Default)]
pub struct StagingArgs {
    /// S3-compatible endpoint, e.g. <https://s3.eu-west-1.amazonaws.com>
    #[arg(long, env = "PHOTO_GALLERY_S3_ENDPOINT")]
    pub s3_endpoint: Option<String>,

    #[arg(long, env = "PHOTO_GALLERY_S3_BUCKET")]
    pub s3_bucket: Option<String>,

    #[arg(long, env = "PHOTO_GALLERY_S3_REGION")]
    pub s3_region: Option<String>,

    #[arg(long, env = "PHOTO_GALLERY_S3_ACCESS_KEY_ID")]
    pub s3_access_key_id: Option<String>,

    #[arg(long, env = "PHOTO_GALLERY_S3_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub s3_secret_access_key: Option<String>,

    /// Upload URL lifetime in seconds
    #[arg(long, env = "PHOTO_GALLERY_UPLOAD_TTL")]
    pub upload_ttl: Option<u64>,
}

/// Neighbour keys for create and move.
#[derive(clap::Args, Debug, Default, Clone)]
pub struct PlacementArgs {
    /// Place the item before this key
    #[arg(long)]
    pub before: Option<String>,

    /// Place the item after this key
    #[arg(long)]
    pub after: Option<String>,
}

impl From<PlacementArgs> for Placement {
    fn from(args: PlacementArgs) -> Self {
        Placement {
            before: args.before,
            after: args.after,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create an item and print one upload URL per photo
    Create {
        /// Capture timestamp (ISO-8601)
        #[arg(long)]
        captured_at: String,

        #[arg(long, default_value = "")]
        location: String,

        /// Photo rectangle as x:y:width:height; repeat once per photo
        #[arg(long = "geometry", required = true)]
        geometry: Vec<Geometry>,

        #[command(flatten)]
        placement: PlacementArgs,
    },
    /// Show one item
    Get { item_id: String },
    /// List items in display order
    List {
        /// Only items whose photos are all processed
        #[arg(long)]
        public: bool,
    },
    /// Change the processed count or location of an item
    Update {
        item_id: String,

        #[arg(long)]
        processed_count: Option<u32>,

        #[arg(long)]
        location: Option<String>,
    },
    /// Delete an item
    Delete { item_id: String },
    /// Move an item to a new position
    Move {
        item_id: String,

        #[command(flatten)]
        placement: PlacementArgs,
    },
    /// Record that the photo stored under a staging key was processed
    Processed { staging_key: String },
}

impl Args {
    /// Apply flag and environment overrides on top of the file config.
    pub fn apply_overrides(&self, config: &mut GalleryConfig) -> Result<(), ConfigError> {
        if let Some(gallery) = &self.gallery {
            config.gallery_id.clone_from(gallery);
        }
        if let Some(store) = &self.store {
            config.store.path = Some(store.clone());
        }
        let staging = &mut config.staging;
        for (value, target) in [
            (&self.staging.s3_endpoint, &mut staging.endpoint),
            (&self.staging.s3_bucket, &mut staging.bucket),
            (&self.staging.s3_region, &mut staging.region),
            (&self.staging.s3_access_key_id, &mut staging.access_key_id),
            (&self.staging.s3_secret_access_key, &mut staging.secret_access_key),
        ] {
            if let Some(value) = value {
                target.clone_from(value);
            }
        }
        if let Some(ttl) = self.staging.upload_ttl {
            staging.ttl_seconds = ttl;
        }
        config.validate()
    }

    /// Gallery named on the command line, for error reports written before
    /// the config is loaded.
    #[must_use]
    pub fn gallery_hint(&self) -> &str {
        self.gallery.as_deref().unwrap_or(DEFAULT_GALLERY_ID)
    }
}

impl Command {
    fn issues_uploads(&self) -> bool {
        matches!(self, Command::Create { .. })
    }
}

/// What a command prints on success.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Output {
    Created(CreatedItem),
    Item(GalleryItem),
    Items(Vec<GalleryItem>),
    #[serde(rename_all = "camelCase")]
    Deleted { deleted: bool, item_id: String },
}

impl Output {
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
    }
}

/// Run one command against `manager`.
pub async fn execute(
    manager: &GalleryItemManager,
    gallery_id: &str,
    command: Command,
) -> Result<Output, GalleryError> {
    match command {
        Command::Create {
            captured_at,
            location,
            geometry,
            placement,
        } => {
            let new_item = NewItem {
                geometry,
                captured_at,
                location,
            };
            let created = manager
                .create_item(gallery_id, new_item, &placement.into())
                .await?;
            Ok(Output::Created(created))
        }
        Command::Get { item_id } => Ok(Output::Item(manager.get_item(gallery_id, &item_id).await?)),
        Command::List { public: true } => {
            Ok(Output::Items(manager.list_public_items(gallery_id).await?))
        }
        Command::List { public: false } => Ok(Output::Items(manager.list_items(gallery_id).await?)),
        Command::Update {
            item_id,
            processed_count,
            location,
        } => {
            let patch = ItemPatch {
                processed_count,
                location,
                ..ItemPatch::default()
            };
            Ok(Output::Item(
                manager.update_item(gallery_id, &item_id, &patch).await?,
            ))
        }
        Command::Delete { item_id } => {
            manager.delete_item(gallery_id, &item_id).await?;
            Ok(Output::Deleted {
                deleted: true,
                item_id,
            })
        }
        Command::Move { item_id, placement } => Ok(Output::Item(
            manager
                .move_item(gallery_id, &item_id, &placement.into())
                .await?,
        )),
        Command::Processed { staging_key } => Ok(Output::Item(
            manager.record_processed_photo(&staging_key).await?,
        )),
    }
}

/// Stands in for the presigned URL issuer on commands that issue no uploads.
struct StagingDisabled;

#[async_trait]
impl UploadStager for StagingDisabled {
    async fn issue_upload_target(
        &self,
        _key: &StagingKey,
        _ttl: Duration,
    ) -> Result<String, StagingError> {
        Err(StagingError::Service("staging is not configured".to_string()))
    }
}

fn report<E>(gallery: &str, log_file: &Path, err: &E) -> ExitCode
where
    E: ToStructuredError + std::error::Error + 'static,
{
    error!(error = %err, "Command failed");
    eprintln!("{}", to_error_json(gallery, &log_file.display().to_string(), err));
    ExitCode::FAILURE
}

/// Resolve configuration, build the services and run the parsed command.
pub async fn run(args: Args, log_file: &Path) -> ExitCode {
    let mut config = match load_config(args.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => return report(args.gallery_hint(), log_file, &e),
    };
    if let Err(e) = args.apply_overrides(&mut config) {
        return report(args.gallery_hint(), log_file, &e);
    }
    let gallery_id = config.gallery_id.clone();

    let stager: Arc<dyn UploadStager> = if args.command.issues_uploads() {
        match config.staging.stager() {
            Ok(stager) => Arc::new(stager),
            Err(e) => return report(&gallery_id, log_file, &e),
        }
    } else {
        Arc::new(StagingDisabled)
    };
    let store = match JsonFileItemStore::open(config.store_path()).await {
        Ok(store) => store,
        Err(e) => return report(&gallery_id, log_file, &e),
    };
    let manager = match GalleryItemManager::new(Arc::new(store), stager)
        .with_upload_ttl(config.staging.upload_ttl())
    {
        Ok(manager) => manager,
        Err(e) => return report(&gallery_id, log_file, &e),
    };

    info!(gallery = %gallery_id, command = ?args.command, "Running command");
    match execute(&manager, &gallery_id, args.command).await {
        Ok(output) => {
            println!("{}", output.to_json());
            ExitCode::SUCCESS
        }
        Err(e) => report(&gallery_id, log_file, &e),
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod cli_tests;
