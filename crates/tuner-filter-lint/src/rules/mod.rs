//! Built-in lint rules.

pub mod duplicate_filter;
pub mod forbidden_table_id;
pub mod table_id_range;
pub mod version_range;

pub use duplicate_filter::DuplicateFilterRule;
pub use forbidden_table_id::ForbiddenTableIdRule;
pub use table_id_range::TableIdRangeRule;
pub use version_range::VersionRangeRule;
