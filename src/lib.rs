//! packwright — build-configuration assembler for front-end bundles.
//!
//! Given a target framework variant and an environment mode, packwright
//! synthesizes a complete, internally consistent bundler configuration:
//! module transformation rules, asset classification policy,
//! code-splitting cache groups, and a conditionally gated plugin set.
//! The configuration is an immutable value handed to an external bundler
//! engine; the transformation engines themselves, the dev server and CLI
//! scaffolding are collaborators, not part of this crate.
//!
//! ```
//! use packwright::{assemble, Framework, Mode};
//!
//! let config = assemble(Framework::React, Mode::Production).unwrap();
//! assert!(config.minimize);
//! assert!(config.output.clean);
//! ```

pub mod assembler;
pub mod assets;
pub mod chunks;
pub mod dev;
pub mod error;
pub mod output;
pub mod plugins;
pub mod rules;
pub mod style;
pub mod types;

pub use assembler::{assemble, BuildConfiguration, ConfigAssembler, Devtool, DEFAULT_ENTRY};
pub use assets::{
    AssetClassifier, AssetDecision, AssetKind, AssetPolicy, AssetStrategy,
    DEFAULT_INLINE_THRESHOLD,
};
pub use chunks::{runtime_chunk_name, CacheGroup, ChunkSplitPolicy, RUNTIME_CHUNK_TEMPLATE};
pub use dev::DevServerConfig;
pub use error::{AssembleError, Result};
pub use output::OutputPolicy;
pub use plugins::{PluginCondition, PluginOrchestrator, PluginSpec};
pub use rules::{ensure_disjoint_extensions, ModuleRule, ModuleRuleSet, RuleEffect, SOURCE_DIR};
pub use style::{StyleChainBuilder, StyleDialect, DEFAULT_BROWSER_TARGETS};
pub use types::{Framework, Mode, TransformChain, TransformStep};
