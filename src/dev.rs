//! Fixed constants handed to the external dev-serving collaborator.
//!
//! None of these are computed from (framework, mode); the assembler just
//! carries them alongside the build configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DevServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Open the browser once the server is up.
    #[serde(default = "default_flag")]
    pub open: bool,

    /// Hot module replacement.
    #[serde(default = "default_flag")]
    pub hot: bool,

    /// Serve the SPA shell for unknown routes.
    #[serde(default = "default_flag")]
    pub history_api_fallback: bool,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            open: true,
            hot: true,
            history_api_fallback: true,
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_flag() -> bool {
    true
}
