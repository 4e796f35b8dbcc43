//! Error types for configuration assembly.
//!
//! Every error here is raised synchronously at assembly or construction
//! time. An inconsistent configuration must never reach the bundler
//! engine, so there is no deferred or retryable failure surface.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AssembleError>;

#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("unknown stylesheet dialect: {name}")]
    UnknownDialect { name: String },

    #[error("unrecognized asset category: {name}")]
    InvalidAssetType { name: String },

    #[error("cache groups '{first}' and '{second}' share priority {priority}")]
    DuplicateCacheGroupPriority {
        first: String,
        second: String,
        priority: i32,
    },

    #[error("extension '.{extension}' is claimed by both the '{first}' and '{second}' rules")]
    AmbiguousRulePattern {
        extension: String,
        first: String,
        second: String,
    },

    #[error("invalid rule pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
