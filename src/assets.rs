//! Asset classification: inline embedding versus external emission.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AssembleError;

/// Images at or below this size are embedded as data URLs.
pub const DEFAULT_INLINE_THRESHOLD: u64 = 10 * 1024;

/// Asset category recognized by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Font,
    Other,
}

impl FromStr for AssetKind {
    type Err = AssembleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(AssetKind::Image),
            "font" => Ok(AssetKind::Font),
            "other" => Ok(AssetKind::Other),
            other => Err(AssembleError::InvalidAssetType { name: other.into() }),
        }
    }
}

/// Naming and inlining policy applied when classifying assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetPolicy {
    #[serde(default = "default_inline_threshold")]
    pub inline_threshold_bytes: u64,

    /// Template for inlined assets (data-URL encoding).
    #[serde(default = "default_inline_template")]
    pub inline_name_template: String,

    /// Content-hashed filename template for externalized assets.
    #[serde(default = "default_external_template")]
    pub external_name_template: String,
}

impl Default for AssetPolicy {
    fn default() -> Self {
        Self {
            inline_threshold_bytes: default_inline_threshold(),
            inline_name_template: default_inline_template(),
            external_name_template: default_external_template(),
        }
    }
}

fn default_inline_threshold() -> u64 {
    DEFAULT_INLINE_THRESHOLD
}

fn default_inline_template() -> String {
    "data:[mime];base64,[content]".to_string()
}

fn default_external_template() -> String {
    "static/media/[hash:10][ext][query]".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStrategy {
    Inline,
    External,
}

/// Outcome of classifying one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDecision {
    pub strategy: AssetStrategy,
    pub output_name_template: String,
}

/// Decides whether one asset is embedded or emitted as a separate file.
pub struct AssetClassifier;

impl AssetClassifier {
    /// Classify an asset of `kind` and `size_bytes` under `policy`.
    ///
    /// Only images are ever inlined; fonts and unmatched binary assets
    /// are externalized regardless of size. The size boundary is
    /// inclusive: a file exactly at the threshold inlines.
    pub fn classify(kind: AssetKind, size_bytes: u64, policy: &AssetPolicy) -> AssetDecision {
        let strategy = match kind {
            AssetKind::Image if size_bytes <= policy.inline_threshold_bytes => {
                AssetStrategy::Inline
            }
            _ => AssetStrategy::External,
        };
        let output_name_template = match strategy {
            AssetStrategy::Inline => policy.inline_name_template.clone(),
            AssetStrategy::External => policy.external_name_template.clone(),
        };
        AssetDecision {
            strategy,
            output_name_template,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_at_threshold_inlines() {
        let policy = AssetPolicy::default();
        let decision = AssetClassifier::classify(AssetKind::Image, 10240, &policy);
        assert_eq!(decision.strategy, AssetStrategy::Inline);
        assert_eq!(decision.output_name_template, policy.inline_name_template);
    }

    #[test]
    fn image_over_threshold_externalizes() {
        let policy = AssetPolicy::default();
        let decision = AssetClassifier::classify(AssetKind::Image, 10241, &policy);
        assert_eq!(decision.strategy, AssetStrategy::External);
        assert_eq!(decision.output_name_template, policy.external_name_template);
    }

    #[test]
    fn fonts_never_inline() {
        let policy = AssetPolicy::default();
        let decision = AssetClassifier::classify(AssetKind::Font, 1, &policy);
        assert_eq!(decision.strategy, AssetStrategy::External);
    }

    #[test]
    fn other_assets_externalize() {
        let policy = AssetPolicy::default();
        let decision = AssetClassifier::classify(AssetKind::Other, 0, &policy);
        assert_eq!(decision.strategy, AssetStrategy::External);
    }

    #[test]
    fn kind_parsing_rejects_unknown_categories() {
        assert_eq!("font".parse::<AssetKind>().unwrap(), AssetKind::Font);
        let err = "video".parse::<AssetKind>().unwrap_err();
        assert!(matches!(err, AssembleError::InvalidAssetType { .. }));
    }
}
