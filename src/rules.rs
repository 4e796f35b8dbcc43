//! Module rules: file-type patterns mapped to transformation chains.

use std::path::PathBuf;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::assets::AssetPolicy;
use crate::error::{AssembleError, Result};
use crate::style::{StyleChainBuilder, StyleDialect};
use crate::types::{Framework, Mode, TransformChain, TransformStep};

/// Directory holding the project's own sources. Lint and script
/// transformation never reach into dependency directories.
pub const SOURCE_DIR: &str = "src";

/// Extensions probed by the construction-time disjointness check.
/// Every extension a real project file can carry should appear here.
const PROBE_EXTENSIONS: &[&str] = &[
    "css", "less", "sass", "scss", "styl", "js", "jsx", "vue", "jpg", "png", "gif", "webp", "svg",
    "woff", "woff2", "ttf", "mp3", "mp4", "webm", "ogg", "wav",
];

/// What a matching rule does with the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleEffect {
    /// Run the file through an ordered transformation chain.
    Transform(TransformChain),
    /// Classify the file under an asset policy (inline vs external).
    Asset(AssetPolicy),
    /// Emit the file as-is under a naming template, never inlined.
    Resource { name_template: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleRule {
    /// Diagnostic name, unique within a rule set.
    pub name: String,

    /// Regex over the file path.
    pub pattern: String,

    /// Restrict matching to this directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<PathBuf>,

    pub effect: RuleEffect,
}

/// Builds the full ordered rule set for one (framework, mode) pair.
pub struct ModuleRuleSet;

impl ModuleRuleSet {
    pub fn build_rules(framework: Framework, mode: Mode) -> Result<Vec<ModuleRule>> {
        let styles = StyleChainBuilder::new(framework, mode);
        let policy = AssetPolicy::default();

        let mut rules = Vec::with_capacity(9);
        for dialect in StyleDialect::ALL {
            rules.push(ModuleRule {
                name: dialect.rule_name().to_string(),
                pattern: dialect.pattern().to_string(),
                include: None,
                effect: RuleEffect::Transform(styles.build(dialect)),
            });
        }

        rules.push(ModuleRule {
            name: "image".to_string(),
            pattern: r"\.(jpg|png|gif|webp|svg)$".to_string(),
            include: None,
            effect: RuleEffect::Asset(policy.clone()),
        });
        rules.push(ModuleRule {
            name: "font".to_string(),
            pattern: r"\.(woff2?|ttf)$".to_string(),
            include: None,
            effect: RuleEffect::Resource {
                name_template: policy.external_name_template.clone(),
            },
        });

        rules.push(script_rule(framework, mode));
        if framework == Framework::Vue {
            // Decomposes single-file components into script, template and
            // style blocks; the decomposition plugin must be active for
            // this rule to see output.
            rules.push(ModuleRule {
                name: "sfc".to_string(),
                pattern: r"\.vue$".to_string(),
                include: None,
                effect: RuleEffect::Transform(vec![TransformStep::new("vue-loader")]),
            });
        }

        // Remaining binary assets are always emitted externally.
        rules.push(ModuleRule {
            name: "media".to_string(),
            pattern: r"\.(mp3|mp4|webm|ogg|wav)$".to_string(),
            include: None,
            effect: RuleEffect::Resource {
                name_template: policy.external_name_template,
            },
        });

        ensure_disjoint_extensions(&rules)?;
        tracing::debug!(
            count = rules.len(),
            ?framework,
            ?mode,
            "assembled module rules"
        );
        Ok(rules)
    }
}

fn script_rule(framework: Framework, mode: Mode) -> ModuleRule {
    let mut chain = vec![
        // Lint runs first, scoped by the rule's include; findings are
        // reported but do not halt the chain.
        TransformStep::new("eslint")
            .with_option("failOnError", false)
            .with_option("cache", true),
        TransformStep::new("babel")
            .with_option("cacheDirectory", true)
            .with_option("cacheCompression", false),
    ];
    if mode == Mode::Development {
        chain.push(match framework {
            Framework::React => TransformStep::new("react-refresh"),
            Framework::Vue => TransformStep::new("vue-hot-reload"),
        });
    }
    let pattern = match framework {
        Framework::React => r"\.jsx?$",
        Framework::Vue => r"\.js$",
    };
    ModuleRule {
        name: "script".to_string(),
        pattern: pattern.to_string(),
        include: Some(PathBuf::from(SOURCE_DIR)),
        effect: RuleEffect::Transform(chain),
    }
}

/// Verify no two rules claim the same real file extension.
///
/// Overlap would make rule order load-bearing, which is a construction
/// defect rather than a runtime condition.
pub fn ensure_disjoint_extensions(rules: &[ModuleRule]) -> Result<()> {
    let compiled = rules
        .iter()
        .map(|r| Ok((r.name.as_str(), Regex::new(&r.pattern)?)))
        .collect::<Result<Vec<_>>>()?;

    for ext in PROBE_EXTENSIONS {
        let probe = format!("{SOURCE_DIR}/app.{ext}");
        let mut owner: Option<&str> = None;
        for (name, re) in &compiled {
            if re.is_match(&probe) {
                if let Some(first) = owner {
                    return Err(AssembleError::AmbiguousRulePattern {
                        extension: (*ext).to_string(),
                        first: first.to_string(),
                        second: (*name).to_string(),
                    });
                }
                owner = Some(name);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script_chain(rules: &[ModuleRule]) -> &TransformChain {
        let rule = rules.iter().find(|r| r.name == "script").expect("script rule");
        match &rule.effect {
            RuleEffect::Transform(chain) => chain,
            other => panic!("script rule is not a transform: {other:?}"),
        }
    }

    #[test]
    fn rule_sets_are_disjoint_for_all_inputs() {
        for framework in [Framework::React, Framework::Vue] {
            for mode in [Mode::Development, Mode::Production] {
                ModuleRuleSet::build_rules(framework, mode).expect("disjoint rule set");
            }
        }
    }

    #[test]
    fn development_script_rule_carries_live_reload_step() {
        let dev = ModuleRuleSet::build_rules(Framework::React, Mode::Development).unwrap();
        assert_eq!(script_chain(&dev).last().unwrap().name, "react-refresh");

        let prod = ModuleRuleSet::build_rules(Framework::React, Mode::Production).unwrap();
        assert!(script_chain(&prod).iter().all(|s| s.name != "react-refresh"));
    }

    #[test]
    fn vue_uses_its_own_instrumentation_step() {
        let dev = ModuleRuleSet::build_rules(Framework::Vue, Mode::Development).unwrap();
        assert_eq!(script_chain(&dev).last().unwrap().name, "vue-hot-reload");
    }

    #[test]
    fn lint_precedes_transpilation() {
        let rules = ModuleRuleSet::build_rules(Framework::Vue, Mode::Production).unwrap();
        let chain = script_chain(&rules);
        assert_eq!(chain[0].name, "eslint");
        assert_eq!(chain[0].options["failOnError"], serde_json::json!(false));
        assert_eq!(chain[1].name, "babel");
    }

    #[test]
    fn script_rule_is_scoped_to_project_sources() {
        let rules = ModuleRuleSet::build_rules(Framework::React, Mode::Development).unwrap();
        let script = rules.iter().find(|r| r.name == "script").unwrap();
        assert_eq!(script.include.as_deref(), Some(std::path::Path::new("src")));
    }

    #[test]
    fn sfc_rule_exists_only_for_vue() {
        let vue = ModuleRuleSet::build_rules(Framework::Vue, Mode::Production).unwrap();
        assert!(vue.iter().any(|r| r.name == "sfc"));

        let react = ModuleRuleSet::build_rules(Framework::React, Mode::Production).unwrap();
        assert!(react.iter().all(|r| r.name != "sfc"));
    }

    #[test]
    fn overlapping_patterns_are_rejected() {
        let rules = vec![
            ModuleRule {
                name: "a".into(),
                pattern: r"\.css$".into(),
                include: None,
                effect: RuleEffect::Resource {
                    name_template: "x".into(),
                },
            },
            ModuleRule {
                name: "b".into(),
                pattern: r"\.(css|less)$".into(),
                include: None,
                effect: RuleEffect::Resource {
                    name_template: "y".into(),
                },
            },
        ];
        let err = ensure_disjoint_extensions(&rules).unwrap_err();
        match err {
            AssembleError::AmbiguousRulePattern { extension, first, second } => {
                assert_eq!(extension, "css");
                assert_eq!(first, "a");
                assert_eq!(second, "b");
            }
            other => panic!("expected AmbiguousRulePattern, got {other:?}"),
        }
    }

    #[test]
    fn bad_pattern_surfaces_as_invalid_pattern() {
        let rules = vec![ModuleRule {
            name: "broken".into(),
            pattern: r"\.(css$".into(),
            include: None,
            effect: RuleEffect::Resource {
                name_template: "x".into(),
            },
        }];
        assert!(matches!(
            ensure_disjoint_extensions(&rules).unwrap_err(),
            AssembleError::InvalidPattern(_)
        ));
    }
}
