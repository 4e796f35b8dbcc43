//! Stylesheet transformation chains.
//!
//! Every dialect lowers through the same pipeline, in application order:
//! dialect preprocessor (absent for plain CSS), cross-browser
//! compatibility normalization, module/url resolution, then either
//! extraction to a separate file (production, for long-term caching) or
//! injection into the running document (development, for fast iteration
//! without a full reload).

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{AssembleError, Result};
use crate::types::{Framework, Mode, TransformChain, TransformStep};

/// Browser targets shared by every compatibility-normalization step.
///
/// Resolved once at process start and never mutated; actual target
/// expansion is the compatibility collaborator's job, not ours.
pub const DEFAULT_BROWSER_TARGETS: &[&str] = &["last 2 versions", "> 1%", "not dead"];

/// Stylesheet authoring dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleDialect {
    Css,
    Less,
    Sass,
    Stylus,
}

impl StyleDialect {
    pub const ALL: [StyleDialect; 4] = [
        StyleDialect::Css,
        StyleDialect::Less,
        StyleDialect::Sass,
        StyleDialect::Stylus,
    ];

    /// Resolve a dialect from a file extension.
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext {
            "css" => Ok(StyleDialect::Css),
            "less" => Ok(StyleDialect::Less),
            "sass" | "scss" => Ok(StyleDialect::Sass),
            "styl" => Ok(StyleDialect::Stylus),
            other => Err(AssembleError::UnknownDialect { name: other.into() }),
        }
    }

    /// Diagnostic name used for the module rule covering this dialect.
    pub(crate) fn rule_name(self) -> &'static str {
        match self {
            StyleDialect::Css => "css",
            StyleDialect::Less => "less",
            StyleDialect::Sass => "sass",
            StyleDialect::Stylus => "stylus",
        }
    }

    /// Path pattern claiming this dialect's files.
    pub(crate) fn pattern(self) -> &'static str {
        match self {
            StyleDialect::Css => r"\.css$",
            StyleDialect::Less => r"\.less$",
            StyleDialect::Sass => r"\.s[ac]ss$",
            StyleDialect::Stylus => r"\.styl$",
        }
    }

    fn preprocessor(self) -> Option<&'static str> {
        match self {
            StyleDialect::Css => None,
            StyleDialect::Less => Some("less-loader"),
            StyleDialect::Sass => Some("sass-loader"),
            StyleDialect::Stylus => Some("stylus-loader"),
        }
    }
}

/// Builds the ordered transformation chain for one stylesheet dialect.
#[derive(Debug, Clone)]
pub struct StyleChainBuilder {
    framework: Framework,
    mode: Mode,
    targets: Vec<String>,
}

impl StyleChainBuilder {
    pub fn new(framework: Framework, mode: Mode) -> Self {
        Self {
            framework,
            mode,
            targets: DEFAULT_BROWSER_TARGETS.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Override the shared compatibility-target list.
    pub fn with_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets = targets.into_iter().map(Into::into).collect();
        self
    }

    /// Build the chain for `dialect`, stored in application order.
    pub fn build(&self, dialect: StyleDialect) -> TransformChain {
        let mut chain = Vec::with_capacity(4);

        if let Some(pre) = dialect.preprocessor() {
            let mut step = TransformStep::new(pre);
            if dialect == StyleDialect::Less {
                // Theme override map plus the inline-JS flag; the flag is
                // mode-independent.
                step = step
                    .with_option("modifyVars", json!({ "@primary-color": "#1DA57A" }))
                    .with_option("javascriptEnabled", true);
            }
            chain.push(step);
        }

        chain.push(
            TransformStep::new("postcss")
                .with_option("plugins", json!(["postcss-preset-env"]))
                .with_option("targets", json!(self.targets)),
        );
        chain.push(TransformStep::new("css-loader"));
        chain.push(self.finalizer());
        chain
    }

    /// Last step in application order: write a separate file in
    /// production, inject into the document in development.
    fn finalizer(&self) -> TransformStep {
        match self.mode {
            Mode::Production => TransformStep::new("css-extract"),
            Mode::Development => match self.framework {
                Framework::React => TransformStep::new("style-loader"),
                Framework::Vue => TransformStep::new("vue-style-loader"),
            },
        }
    }
}
