//! Rule: duplicate-filter
//!
//! Reports entries that repeat an earlier entry's main type, table id and version.

use std::collections::HashMap;

use tuner_filter_core::{FilterMainType, Settings};

use crate::{LintDiagnostic, LintRule, LintSeverity, SettingsEntry};

pub struct DuplicateFilterRule;

impl LintRule for DuplicateFilterRule {
    fn id(&self) -> &str {
        "duplicate-filter"
    }

    fn description(&self) -> &str {
        "Each table filter should be configured once"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Info
    }

    fn check(&self, entries: &[SettingsEntry]) -> Vec<LintDiagnostic> {
        let mut seen: HashMap<(FilterMainType, i32, i32), &SettingsEntry> = HashMap::new();
        let mut diagnostics = Vec::new();

        for e in entries {
            let key = (e.settings.main_type(), e.settings.table_id(), e.settings.version());
            match seen.get(&key) {
                Some(first) => diagnostics.push(self.diagnostic(
                    e,
                    format!(
                        "Duplicate of {}[{}]: {}",
                        first.source, first.index, e.settings
                    ),
                )),
                None => {
                    seen.insert(key, e);
                }
            }
        }

        diagnostics
    }
}
