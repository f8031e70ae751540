use crate::types::{FilterMainType, FilterSettings, SectionSettingsWithTableInfo, Settings};

/// Base builder state shared by all settings builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsBuilder {
    main_type: FilterMainType,
}

impl SettingsBuilder {
    pub(crate) fn new(main_type: FilterMainType) -> Self {
        Self { main_type }
    }

    pub(crate) fn build_base(&self) -> FilterSettings {
        FilterSettings::new(self.main_type)
    }
}

impl Settings for SettingsBuilder {
    fn main_type(&self) -> FilterMainType {
        self.main_type
    }
}

/// Builder for [`SectionSettingsWithTableInfo`].
///
/// Obtained from [`SectionSettingsWithTableInfo::builder`]. Unset fields
/// default to zero. The builder is reusable: `build` does not consume or
/// reset it, and each call returns an independent snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSettingsWithTableInfoBuilder {
    base: SettingsBuilder,
    table_id: i32,
    version: i32,
}

impl SectionSettingsWithTableInfoBuilder {
    pub(crate) fn new(main_type: FilterMainType) -> Self {
        Self {
            base: SettingsBuilder::new(main_type),
            table_id: 0,
            version: 0,
        }
    }

    /// Sets table ID.
    pub fn set_table_id(&mut self, table_id: i32) -> &mut Self {
        self.table_id = table_id;
        self
    }

    /// Sets version.
    pub fn set_version(&mut self, version: i32) -> &mut Self {
        self.version = version;
        self
    }

    pub fn build(&self) -> SectionSettingsWithTableInfo {
        let settings =
            SectionSettingsWithTableInfo::new(self.base.build_base(), self.table_id, self.version);
        tracing::trace!(%settings, "built section settings");
        settings
    }
}

impl Settings for SectionSettingsWithTableInfoBuilder {
    fn main_type(&self) -> FilterMainType {
        self.base.main_type()
    }
}
