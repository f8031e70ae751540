//! Rule: version-range
//!
//! `version_number` is a 5-bit field, so only 0-31 can ever match.

use crate::{LintDiagnostic, LintRule, LintSeverity, SettingsEntry};

pub const MAX_VERSION: i32 = 31;

pub struct VersionRangeRule;

impl LintRule for VersionRangeRule {
    fn id(&self) -> &str {
        "version-range"
    }

    fn description(&self) -> &str {
        "Version must fit in 5 bits (0-31)"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Error
    }

    fn check(&self, entries: &[SettingsEntry]) -> Vec<LintDiagnostic> {
        let mut diagnostics = Vec::new();

        for e in entries {
            let version = e.settings.version();
            if !(0..=MAX_VERSION).contains(&version) {
                diagnostics.push(self.diagnostic(
                    e,
                    format!("Version {version} is out of range (0-{MAX_VERSION})"),
                ));
            }
        }

        diagnostics
    }
}
