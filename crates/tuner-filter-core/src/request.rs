use serde::{Deserialize, Serialize};

use crate::catalogs::table_name;
use crate::error::Result;
use crate::permission::PermissionContext;
use crate::types::{FilterMainType, SectionSettingsWithTableInfo};

/// Serialized description of settings to build, as read from JSON/YAML
/// documents. It carries no authority by itself: turning it into a settings
/// value goes through the permission-gated builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SectionSettingsRequest {
    pub main_type: FilterMainType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i32>,
}

impl SectionSettingsRequest {
    pub fn new(main_type: FilterMainType) -> Self {
        Self {
            main_type,
            table_id: None,
            version: None,
        }
    }

    /// Build through [`SectionSettingsWithTableInfo::builder`]; only the fields
    /// present in the request are set.
    pub fn build_with(&self, ctx: &impl PermissionContext) -> Result<SectionSettingsWithTableInfo> {
        let mut builder = SectionSettingsWithTableInfo::builder(ctx, self.main_type)?;
        if let Some(table_id) = self.table_id {
            builder.set_table_id(table_id);
        }
        if let Some(version) = self.version {
            builder.set_version(version);
        }
        Ok(builder.build())
    }

    /// Normalized view of the request with defaults applied.
    pub fn describe(&self) -> RequestDescription {
        let table_id = self.table_id.unwrap_or(0);
        RequestDescription {
            main_type: self.main_type,
            main_type_raw: self.main_type.as_raw(),
            table_id,
            table_name: table_name(table_id).map(str::to_string),
            version: self.version.unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDescription {
    pub main_type: FilterMainType,
    pub main_type_raw: i32,
    pub table_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    pub version: i32,
}
