//! Cache groups: partitioning the dependency graph into stable bundles.

use serde::{Deserialize, Serialize};

use crate::error::{AssembleError, Result};
use crate::types::Framework;

pub const FRAMEWORK_GROUP_PRIORITY: i32 = 40;
pub const COMPONENT_LIBRARY_PRIORITY: i32 = 30;
pub const VENDOR_GROUP_PRIORITY: i32 = 20;

/// Per-entry runtime bundle naming template; `[entry]` is substituted
/// with the entry point's identifier. Keeping this deterministic keeps
/// bundle identity stable across rebuilds.
pub const RUNTIME_CHUNK_TEMPLATE: &str = "runtime~[entry].js";

/// Deterministic runtime-bundle name for one entry point.
pub fn runtime_chunk_name(entry: &str) -> String {
    RUNTIME_CHUNK_TEMPLATE.replace("[entry]", entry)
}

/// A named partition of the dependency graph, emitted as its own bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheGroup {
    pub name: String,

    /// Regex over the module's dependency path.
    pub pattern: String,

    /// When a module matches several groups, the higher priority claims it.
    pub priority: i32,
}

/// Groups third-party modules into named output bundles.
///
/// The isolated component library is configurable: the underlying need
/// is "split one hot, large dependency into its own bundle", not any
/// particular library name.
#[derive(Debug, Clone)]
pub struct ChunkSplitPolicy {
    framework: Framework,
    component_library: Option<String>,
}

impl ChunkSplitPolicy {
    pub fn new(framework: Framework) -> Self {
        let library = match framework {
            Framework::React => "antd",
            Framework::Vue => "element-plus",
        };
        Self {
            framework,
            component_library: Some(library.to_string()),
        }
    }

    /// Isolate a different component library into its own bundle.
    pub fn with_component_library(mut self, name: impl Into<String>) -> Self {
        self.component_library = Some(name.into());
        self
    }

    /// Drop the component-library group (dependency not in the graph).
    pub fn without_component_library(mut self) -> Self {
        self.component_library = None;
        self
    }

    /// Build the cache groups, highest priority first.
    pub fn build_groups(&self) -> Result<Vec<CacheGroup>> {
        let (runtime_name, runtime_pattern) = match self.framework {
            Framework::React => ("chunk-react", r"[\\/]node_modules[\\/]react(.*)?[\\/]"),
            Framework::Vue => ("chunk-vue", r"[\\/]node_modules[\\/]@?vue(.*)?[\\/]"),
        };

        let mut groups = vec![CacheGroup {
            name: runtime_name.to_string(),
            pattern: runtime_pattern.to_string(),
            priority: FRAMEWORK_GROUP_PRIORITY,
        }];
        if let Some(library) = &self.component_library {
            groups.push(CacheGroup {
                name: format!("chunk-{library}"),
                pattern: format!(r"[\\/]node_modules[\\/]{library}[\\/]"),
                priority: COMPONENT_LIBRARY_PRIORITY,
            });
        }
        groups.push(CacheGroup {
            name: "chunk-libs".to_string(),
            pattern: r"[\\/]node_modules[\\/]".to_string(),
            priority: VENDOR_GROUP_PRIORITY,
        });

        ensure_distinct_priorities(&groups)?;
        Ok(groups)
    }
}

/// Equal priorities would make group assignment order-dependent.
fn ensure_distinct_priorities(groups: &[CacheGroup]) -> Result<()> {
    for (i, a) in groups.iter().enumerate() {
        for b in &groups[i + 1..] {
            if a.priority == b.priority {
                return Err(AssembleError::DuplicateCacheGroupPriority {
                    first: a.name.clone(),
                    second: b.name.clone(),
                    priority: a.priority,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_have_strictly_descending_distinct_priorities() {
        for framework in [Framework::React, Framework::Vue] {
            let groups = ChunkSplitPolicy::new(framework).build_groups().unwrap();
            let priorities: Vec<_> = groups.iter().map(|g| g.priority).collect();
            assert_eq!(priorities, vec![40, 30, 20]);
        }
    }

    #[test]
    fn framework_group_comes_first() {
        let groups = ChunkSplitPolicy::new(Framework::Vue).build_groups().unwrap();
        assert_eq!(groups[0].name, "chunk-vue");
        assert_eq!(groups.last().unwrap().name, "chunk-libs");
    }

    #[test]
    fn component_library_is_configurable() {
        let groups = ChunkSplitPolicy::new(Framework::React)
            .with_component_library("chakra-ui")
            .build_groups()
            .unwrap();
        assert!(groups.iter().any(|g| g.name == "chunk-chakra-ui"));
    }

    #[test]
    fn component_library_group_can_be_dropped() {
        let groups = ChunkSplitPolicy::new(Framework::React)
            .without_component_library()
            .build_groups()
            .unwrap();
        let priorities: Vec<_> = groups.iter().map(|g| g.priority).collect();
        assert_eq!(priorities, vec![40, 20]);
    }

    #[test]
    fn duplicate_priorities_are_rejected() {
        let groups = vec![
            CacheGroup {
                name: "a".into(),
                pattern: "x".into(),
                priority: 40,
            },
            CacheGroup {
                name: "b".into(),
                pattern: "y".into(),
                priority: 40,
            },
        ];
        let err = ensure_distinct_priorities(&groups).unwrap_err();
        assert!(matches!(
            err,
            AssembleError::DuplicateCacheGroupPriority { priority: 40, .. }
        ));
    }

    #[test]
    fn runtime_chunk_name_is_deterministic() {
        assert_eq!(runtime_chunk_name("main"), "runtime~main.js");
        assert_eq!(runtime_chunk_name("main"), runtime_chunk_name("main"));
    }
}
