//! Top-level assembly of one immutable build configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::chunks::{CacheGroup, ChunkSplitPolicy, RUNTIME_CHUNK_TEMPLATE};
use crate::error::Result;
use crate::output::OutputPolicy;
use crate::plugins::{PluginOrchestrator, PluginSpec};
use crate::rules::{ModuleRule, ModuleRuleSet};
use crate::types::{Framework, Mode};

pub const DEFAULT_ENTRY: &str = "src/main.js";

/// Source-map flavor per mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Devtool {
    SourceMap,
    CheapModuleSourceMap,
}

impl Devtool {
    fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Production => Devtool::SourceMap,
            Mode::Development => Devtool::CheapModuleSourceMap,
        }
    }
}

/// The assembled aggregate handed to the external bundler engine.
/// Never mutated after assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfiguration {
    pub entry: PathBuf,

    pub output: OutputPolicy,

    pub rules: Vec<ModuleRule>,

    pub cache_groups: Vec<CacheGroup>,

    /// Per-entry runtime bundle template; `[entry]` is replaced with the
    /// entry point's identifier.
    pub runtime_chunk_template: String,

    pub plugins: Vec<PluginSpec>,

    pub minimize: bool,

    pub devtool: Devtool,

    pub resolve_extensions: Vec<String>,

    pub mode: Mode,

    pub framework: Framework,
}

/// Composes rules, cache groups and plugins into one configuration.
///
/// Assembly is a pure function of the assembler's inputs: no I/O, no
/// shared mutable state, and identical inputs produce structurally
/// identical configurations.
#[derive(Debug, Clone)]
pub struct ConfigAssembler {
    framework: Framework,
    mode: Mode,
    entry: PathBuf,
    chunks: ChunkSplitPolicy,
}

impl ConfigAssembler {
    pub fn new(framework: Framework, mode: Mode) -> Self {
        Self {
            framework,
            mode,
            entry: PathBuf::from(DEFAULT_ENTRY),
            chunks: ChunkSplitPolicy::new(framework),
        }
    }

    pub fn with_entry(mut self, entry: impl Into<PathBuf>) -> Self {
        self.entry = entry.into();
        self
    }

    /// Isolate a different component library into its own bundle.
    pub fn with_component_library(mut self, name: impl Into<String>) -> Self {
        self.chunks = self.chunks.with_component_library(name);
        self
    }

    /// Drop the component-library cache group entirely.
    pub fn without_component_library(mut self) -> Self {
        self.chunks = self.chunks.without_component_library();
        self
    }

    pub fn assemble(&self) -> Result<BuildConfiguration> {
        tracing::debug!(
            framework = ?self.framework,
            mode = ?self.mode,
            "assembling build configuration"
        );

        let rules = ModuleRuleSet::build_rules(self.framework, self.mode)?;
        let cache_groups = self.chunks.build_groups()?;
        let plugins = PluginOrchestrator::build_plugins(self.framework, self.mode);

        Ok(BuildConfiguration {
            entry: self.entry.clone(),
            output: OutputPolicy::for_mode(self.mode),
            rules,
            cache_groups,
            runtime_chunk_template: RUNTIME_CHUNK_TEMPLATE.to_string(),
            plugins,
            minimize: self.mode.is_production(),
            devtool: Devtool::for_mode(self.mode),
            resolve_extensions: self.framework.resolve_extensions(),
            mode: self.mode,
            framework: self.framework,
        })
    }
}

/// One-shot assembly with the default entry and chunk policy.
pub fn assemble(framework: Framework, mode: Mode) -> Result<BuildConfiguration> {
    ConfigAssembler::new(framework, mode).assemble()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimize_tracks_mode() {
        let prod = assemble(Framework::React, Mode::Production).unwrap();
        assert!(prod.minimize);
        assert_eq!(prod.devtool, Devtool::SourceMap);

        let dev = assemble(Framework::React, Mode::Development).unwrap();
        assert!(!dev.minimize);
        assert_eq!(dev.devtool, Devtool::CheapModuleSourceMap);
    }

    #[test]
    fn entry_is_overridable() {
        let config = ConfigAssembler::new(Framework::Vue, Mode::Development)
            .with_entry("src/app.js")
            .assemble()
            .unwrap();
        assert_eq!(config.entry, PathBuf::from("src/app.js"));
    }

    #[test]
    fn component_library_override_reaches_cache_groups() {
        let config = ConfigAssembler::new(Framework::Vue, Mode::Production)
            .with_component_library("vuetify")
            .assemble()
            .unwrap();
        assert!(config.cache_groups.iter().any(|g| g.name == "chunk-vuetify"));
    }
}
