//! Runtime configuration read from the environment (and `.env` via dotenvy).

use std::path::PathBuf;

use anyhow::{Result, anyhow};

pub const DEFAULT_OUTPUT_DIR: &str = "data";

/// Settings for the fetch → extract → upload pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `DATA_FETCH_URL`: where the published rounds document lives.
    pub data_fetch_url: Option<String>,
    /// `S3_BUCKET`: destination bucket; upload is skipped when unset.
    pub s3_bucket: Option<String>,
    /// `S3_PREFIX`: key prefix for uploaded artifacts.
    pub s3_prefix: String,
    /// `OUTPUT_DIR`: local directory for the input snapshot and artifacts.
    pub output_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            data_fetch_url: get("DATA_FETCH_URL"),
            s3_bucket: get("S3_BUCKET"),
            s3_prefix: get("S3_PREFIX").unwrap_or_default(),
            output_dir: get("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
        }
    }

    pub fn fetch_url(&self) -> Result<&str> {
        self.data_fetch_url
            .as_deref()
            .ok_or_else(|| anyhow!("DATA_FETCH_URL must be set"))
    }

    /// Where the fetched document is saved before extraction.
    pub fn input_snapshot_path(&self) -> PathBuf {
        self.output_dir.join("input.json")
    }
}
