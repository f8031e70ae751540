//! Rule: forbidden-table-id
//!
//! Table ID 0xFF is forbidden; it marks stuffing bytes after the last section.

use tuner_filter_core::FORBIDDEN_TABLE_ID;

use crate::{LintDiagnostic, LintRule, LintSeverity, SettingsEntry};

pub struct ForbiddenTableIdRule;

impl LintRule for ForbiddenTableIdRule {
    fn id(&self) -> &str {
        "forbidden-table-id"
    }

    fn description(&self) -> &str {
        "Table ID 0xFF never starts a section"
    }

    fn default_severity(&self) -> LintSeverity {
        LintSeverity::Warning
    }

    fn check(&self, entries: &[SettingsEntry]) -> Vec<LintDiagnostic> {
        entries
            .iter()
            .filter(|e| e.settings.table_id() == FORBIDDEN_TABLE_ID)
            .map(|e| {
                self.diagnostic(
                    e,
                    "Table ID 0xFF is forbidden; this filter will never match".into(),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry;
    use tuner_filter_core::FilterMainType;

    #[test]
    fn detects_forbidden() {
        let results = ForbiddenTableIdRule.check(&[entry(FilterMainType::Ts, 0xFF, 0, 3)]);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].index, 3);
        assert_eq!(results[0].rule, "forbidden-table-id");
    }

    #[test]
    fn ignores_others() {
        let results = ForbiddenTableIdRule.check(&[entry(FilterMainType::Ts, 0xFE, 0, 0)]);
        assert!(results.is_empty());
    }
}
