//! Rule: table-id-range
//!
//! `table_id` is an 8-bit field in every section header.

use crate::{LintDiagnostic, LintRule, LintSeverity, SettingsEntry};

pub const MAX_TABLE_ID: i32 = 0xFF;

pub struct TableIdRangeRule;

impl LintRule for TableIdRangeRule {
    fn id(&self) -> &str {
        "table-id-range"
    }

    fn description(&self) -> &str {
        "Table ID must fit in 8 bits (0-255)"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Error
    }

    fn check(&self, entries: &[SettingsEntry]) -> Vec<LintDiagnostic> {
        entries
            .iter()
            .filter(|e| !(0..=MAX_TABLE_ID).contains(&e.settings.table_id()))
            .map(|e| {
                self.diagnostic(
                    e,
                    format!(
                        "Table ID {} is out of range (0-{MAX_TABLE_ID})",
                        e.settings.table_id()
                    ),
                )
            })
            .collect()
    }
}
