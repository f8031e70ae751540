pub mod builder;
pub mod catalogs;
pub mod error;
pub mod ffi;
pub mod permission;
pub mod request;
pub mod types;

pub use builder::{SectionSettingsWithTableInfoBuilder, SettingsBuilder};
pub use catalogs::{format_table_id, table_name, ACCESS_TV_TUNER, API_VERSION, FORBIDDEN_TABLE_ID};
pub use error::{Result, TunerError};
pub use ffi::{build_multi_to_json, build_to_json, describe_to_json};
pub use permission::{check_tuner_permission, GrantedCapabilities, PermissionContext};
pub use request::{RequestDescription, SectionSettingsRequest};
pub use types::*;
