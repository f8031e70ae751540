//! Section filter settings linter - configurable rules for table info values.
//!
//! Settings values are accepted verbatim when built; this crate is where a
//! consumer checks them against the section syntax before handing them to
//! a demux.

mod rules;

pub use rules::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tuner_filter_core::SectionSettingsWithTableInfo;

// ---------------------------------------------------------------------------
// Lint severity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LintSeverity {
    Error,
    Warning,
    Info,
}

// ---------------------------------------------------------------------------
// Lint input and diagnostic
// ---------------------------------------------------------------------------

/// A built settings value together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsEntry {
    pub source: String,
    /// Position of the entry within its source document (0-based).
    pub index: usize,
    pub settings: SectionSettingsWithTableInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LintDiagnostic {
    pub rule: String,
    pub severity: LintSeverity,
    pub file: String,
    pub index: usize,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Lint rule trait
// ---------------------------------------------------------------------------

/// Trait that all lint rules must implement.
pub trait LintRule: Send + Sync {
    /// Unique rule identifier (e.g., "table-id-range").
    fn id(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// Default severity.
    fn default_severity(&self) -> LintSeverity;

    /// Run the rule against all entries and return diagnostics.
    fn check(&self, entries: &[SettingsEntry]) -> Vec<LintDiagnostic>;

    /// Build a diagnostic for `entry` with this rule's id and default severity.
    fn diagnostic(&self, entry: &SettingsEntry, message: String) -> LintDiagnostic {
        LintDiagnostic {
            rule: self.id().into(),
            severity: self.default_severity(),
            file: entry.source.clone(),
            index: entry.index,
            message,
        }
    }
}

// ---------------------------------------------------------------------------
// Lint configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleLevel {
    Off,
    #[default]
    Warn,
    Error,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LintConfig {
    #[serde(default)]
    pub rules: HashMap<String, RuleLevel>,
}

impl LintConfig {
    /// Check if a rule is enabled (not off).
    pub fn is_enabled(&self, rule_id: &str) -> bool {
        !matches!(self.rules.get(rule_id), Some(RuleLevel::Off))
    }

    /// Get the configured severity for a rule, or its default.
    pub fn severity_for(&self, rule: &dyn LintRule) -> LintSeverity {
        match self.rules.get(rule.id()) {
            Some(RuleLevel::Error) => LintSeverity::Error,
            Some(RuleLevel::Warn) => LintSeverity::Warning,
            Some(RuleLevel::Off) => LintSeverity::Warning,
            None => rule.default_severity(),
        }
    }
}

// ---------------------------------------------------------------------------
// Linter engine
// ---------------------------------------------------------------------------

pub struct Linter {
    rules: Vec<Box<dyn LintRule>>,
    config: LintConfig,
}

impl Linter {
    /// Create a new linter with all built-in rules.
    pub fn new(config: LintConfig) -> Self {
        Self {
            rules: builtin_rules(),
            config,
        }
    }

    /// Get a reference to the registered rules.
    pub fn rules(&self) -> &[Box<dyn LintRule>] {
        &self.rules
    }

    /// Run all enabled rules against the entries.
    pub fn lint(&self, entries: &[SettingsEntry]) -> Vec<LintDiagnostic> {
        let mut diagnostics = Vec::new();

        for rule in &self.rules {
            if !self.config.is_enabled(rule.id()) {
                tracing::debug!(rule = rule.id(), "lint rule disabled");
                continue;
            }
            let severity = self.config.severity_for(rule.as_ref());
            let mut results = rule.check(entries);
            for d in &mut results {
                d.severity = severity.clone();
            }
            tracing::debug!(rule = rule.id(), count = results.len(), "lint rule finished");
            diagnostics.extend(results);
        }

        diagnostics
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new(LintConfig::default())
    }
}

/// Return all built-in lint rules.
fn builtin_rules() -> Vec<Box<dyn LintRule>> {
    vec![
        Box::new(TableIdRangeRule),
        Box::new(ForbiddenTableIdRule),
        Box::new(VersionRangeRule),
        Box::new(DuplicateFilterRule),
    ]
}

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) fn entry(
    main_type: tuner_filter_core::FilterMainType,
    table_id: i32,
    version: i32,
    index: usize,
) -> SettingsEntry {
    let settings = SectionSettingsWithTableInfo::builder(
        &tuner_filter_core::GrantedCapabilities::tuner(),
        main_type,
    )
    .unwrap()
    .set_table_id(table_id)
    .set_version(version)
    .build();
    SettingsEntry {
        source: "test.json".into(),
        index,
        settings,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
