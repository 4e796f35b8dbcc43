use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Environment mode for one assembly run.
///
/// Set once per run and passed explicitly to every builder. Nothing in
/// this crate reads an ambient environment toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Development,
    Production,
}

impl Mode {
    pub fn is_production(self) -> bool {
        matches!(self, Mode::Production)
    }
}

/// Target front-end framework variant.
///
/// The framework determines the script extension set (React adds a
/// JSX-flavored extension, Vue adds its single-file-component format)
/// and which step injects styles into the document during development.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    React,
    Vue,
}

impl Framework {
    /// Extensions the resolver auto-completes for bare imports.
    pub fn resolve_extensions(self) -> Vec<String> {
        let exts: &[&str] = match self {
            Framework::React => &[".jsx", ".js", ".json"],
            Framework::Vue => &[".vue", ".js", ".json"],
        };
        exts.iter().map(|e| e.to_string()).collect()
    }
}

/// One named transformation step with open-ended options.
///
/// Options keep insertion order so two assemblies with identical inputs
/// serialize identically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformStep {
    pub name: String,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub options: IndexMap<String, Value>,
}

impl TransformStep {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: IndexMap::new(),
        }
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

/// Ordered transformation steps, stored in application order: the step
/// at index 0 runs first.
pub type TransformChain = Vec<TransformStep>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn mode_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Mode::Production).unwrap(), json!("production"));
        assert_eq!(serde_json::to_value(Framework::Vue).unwrap(), json!("vue"));
    }

    #[test]
    fn step_options_keep_insertion_order() {
        let step = TransformStep::new("postcss")
            .with_option("b", 1)
            .with_option("a", 2);
        let keys: Vec<_> = step.options.keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn resolve_extensions_depend_on_framework() {
        assert!(Framework::React.resolve_extensions().contains(&".jsx".to_string()));
        assert!(Framework::Vue.resolve_extensions().contains(&".vue".to_string()));
    }
}
