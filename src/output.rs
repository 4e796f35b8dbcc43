//! Output naming and emission policy.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::Mode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputPolicy {
    /// Fixed output directory; none in development, where output is
    /// served from memory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    pub filename_template: String,

    pub chunk_filename_template: String,

    pub asset_filename_template: String,

    /// Remove stale files from `dir` before emitting.
    pub clean: bool,
}

impl OutputPolicy {
    /// Production writes content-hash-named files under a fixed
    /// directory and clears prior output first; development writes
    /// non-hashed names and keeps nothing on disk.
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Production => Self {
                dir: Some(PathBuf::from("dist")),
                filename_template: "static/js/[name].[contenthash:10].js".to_string(),
                chunk_filename_template: "static/js/[name].[contenthash:10].chunk.js".to_string(),
                asset_filename_template: "static/media/[hash:10][ext][query]".to_string(),
                clean: true,
            },
            Mode::Development => Self {
                dir: None,
                filename_template: "static/js/[name].js".to_string(),
                chunk_filename_template: "static/js/[name].chunk.js".to_string(),
                asset_filename_template: "static/media/[hash:10][ext][query]".to_string(),
                clean: false,
            },
        }
    }
}
