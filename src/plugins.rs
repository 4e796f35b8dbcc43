//! Conditionally gated plugin assembly.
//!
//! Candidates carry an explicit, inspectable condition instead of being
//! dropped through falsy-value filtering. Every condition is evaluated
//! exactly once per assembly.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::types::{Framework, Mode};

/// Predicate gating a plugin's inclusion.
///
/// `None` on a field means "any". Both fields must be satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PluginCondition {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<Framework>,
}

impl PluginCondition {
    pub const ALWAYS: PluginCondition = PluginCondition {
        mode: None,
        framework: None,
    };

    pub const PRODUCTION: PluginCondition = PluginCondition {
        mode: Some(Mode::Production),
        framework: None,
    };

    pub const DEVELOPMENT: PluginCondition = PluginCondition {
        mode: Some(Mode::Development),
        framework: None,
    };

    pub const fn for_framework(framework: Framework) -> Self {
        PluginCondition {
            mode: None,
            framework: Some(framework),
        }
    }

    pub fn is_met(&self, framework: Framework, mode: Mode) -> bool {
        self.mode.is_none_or(|m| m == mode) && self.framework.is_none_or(|f| f == framework)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginSpec {
    pub name: String,

    pub condition: PluginCondition,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub config: Value,
}

impl PluginSpec {
    fn new(name: &str, condition: PluginCondition) -> Self {
        Self {
            name: name.to_string(),
            condition,
            config: Value::Null,
        }
    }

    fn with_config(mut self, config: Value) -> Self {
        self.config = config;
        self
    }
}

/// Assembles the ordered plugin set for one (framework, mode) pair.
pub struct PluginOrchestrator;

impl PluginOrchestrator {
    /// Evaluate every candidate's condition once and keep the survivors
    /// in candidate order.
    pub fn build_plugins(framework: Framework, mode: Mode) -> Vec<PluginSpec> {
        let plugins: Vec<PluginSpec> = Self::candidates()
            .into_iter()
            .filter(|p| p.condition.is_met(framework, mode))
            .collect();
        tracing::debug!(count = plugins.len(), ?framework, ?mode, "gated plugin set");
        plugins
    }

    /// Full candidate set in activation order.
    ///
    /// The decomposition plugin sits before every plugin that can consume
    /// decomposed output (extraction, copying, minimization).
    fn candidates() -> Vec<PluginSpec> {
        vec![
            PluginSpec::new("eslint", PluginCondition::ALWAYS).with_config(json!({
                "context": crate::rules::SOURCE_DIR,
                "exclude": "node_modules",
                "cache": true,
                "cacheLocation": "node_modules/.cache/.eslintcache",
            })),
            PluginSpec::new("html", PluginCondition::ALWAYS).with_config(json!({
                "template": "public/index.html",
            })),
            PluginSpec::new(
                "vue-loader",
                PluginCondition::for_framework(Framework::Vue),
            ),
            // Build-time feature flags the Vue runtime reads. Both are
            // strict booleans: the legacy Options API stays available by
            // default, production devtools hooks stay off by default.
            PluginSpec::new("define", PluginCondition::for_framework(Framework::Vue))
                .with_config(json!({
                    "__VUE_OPTIONS_API__": true,
                    "__VUE_PROD_DEVTOOLS__": false,
                })),
            PluginSpec::new("css-extract", PluginCondition::PRODUCTION).with_config(json!({
                "filename": "static/css/[name].[contenthash:10].css",
                "chunkFilename": "static/css/[name].[contenthash:10].chunk.css",
            })),
            // The HTML template is excluded so the shell is not emitted
            // twice (the html plugin already writes it).
            PluginSpec::new("copy-static", PluginCondition::PRODUCTION).with_config(json!({
                "from": "public",
                "to": "dist",
                "ignore": ["**/index.html*"],
            })),
            PluginSpec::new("hot-module-replacement", PluginCondition::DEVELOPMENT),
            PluginSpec::new(
                "react-refresh",
                PluginCondition {
                    mode: Some(Mode::Development),
                    framework: Some(Framework::React),
                },
            ),
            PluginSpec::new("terser", PluginCondition::PRODUCTION),
            PluginSpec::new("css-minimizer", PluginCondition::PRODUCTION),
            // Lossless-only image re-encoding with a fixed, deterministic
            // toolchain per format.
            PluginSpec::new("image-minimizer", PluginCondition::PRODUCTION).with_config(json!({
                "gifsicle": { "interlaced": true },
                "jpegtran": { "progressive": true },
                "optipng": { "optimizationLevel": 5 },
                "svgo": {
                    "plugins": [
                        "preset-default",
                        "prefixIds",
                        { "name": "sortAttrs", "params": { "xmlnsOrder": "alphabetical" } },
                    ],
                },
            })),
        ]
    }
}
