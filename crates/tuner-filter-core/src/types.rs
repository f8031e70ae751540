use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::builder::SectionSettingsWithTableInfoBuilder;
use crate::catalogs::format_table_id;
use crate::error::{Result, TunerError};
use crate::permission::{check_tuner_permission, PermissionContext};

// ---------------------------------------------------------------------------
// Filter main type
// ---------------------------------------------------------------------------

/// Broad category of a demux filter. Discriminants match the tuner HAL's
/// `DemuxFilterMainType` bit values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(i32)]
pub enum FilterMainType {
    Ts = 1,
    Mmtp = 2,
    Ip = 4,
    Tlv = 8,
    Alp = 16,
}

impl FilterMainType {
    pub const ALL: [FilterMainType; 5] = [
        FilterMainType::Ts,
        FilterMainType::Mmtp,
        FilterMainType::Ip,
        FilterMainType::Tlv,
        FilterMainType::Alp,
    ];

    pub fn as_raw(self) -> i32 {
        self as i32
    }

    pub fn name(self) -> &'static str {
        match self {
            FilterMainType::Ts => "ts",
            FilterMainType::Mmtp => "mmtp",
            FilterMainType::Ip => "ip",
            FilterMainType::Tlv => "tlv",
            FilterMainType::Alp => "alp",
        }
    }
}

impl TryFrom<i32> for FilterMainType {
    type Error = TunerError;

    fn try_from(raw: i32) -> Result<Self> {
        FilterMainType::ALL
            .into_iter()
            .find(|t| t.as_raw() == raw)
            .ok_or_else(|| TunerError::InvalidMainType(raw.to_string()))
    }
}

impl FromStr for FilterMainType {
    type Err = TunerError;

    /// Accepts a case-insensitive name (`ts`, `mmtp`, ...) or the raw HAL value.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(raw) = trimmed.parse::<i32>() {
            return FilterMainType::try_from(raw);
        }
        FilterMainType::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| TunerError::InvalidMainType(trimmed.to_string()))
    }
}

impl fmt::Display for FilterMainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Deserializes from the same spellings `FromStr` accepts, or from the raw
/// HAL value as a number.
impl<'de> Deserialize<'de> for FilterMainType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct MainTypeVisitor;

        impl Visitor<'_> for MainTypeVisitor {
            type Value = FilterMainType;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a filter main type name (ts, mmtp, ip, tlv, alp) or its raw value")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
                i32::try_from(v)
                    .map_err(|_| TunerError::InvalidMainType(v.to_string()))
                    .and_then(FilterMainType::try_from)
                    .map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
                i32::try_from(v)
                    .map_err(|_| TunerError::InvalidMainType(v.to_string()))
                    .and_then(FilterMainType::try_from)
                    .map_err(E::custom)
            }
        }

        deserializer.deserialize_any(MainTypeVisitor)
    }
}

// ---------------------------------------------------------------------------
// Settings capability and base settings
// ---------------------------------------------------------------------------

/// Capability shared by every filter settings type: the main filter type it
/// was created for.
pub trait Settings {
    fn main_type(&self) -> FilterMainType;
}

/// Base settings embedded by every concrete settings type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSettings {
    main_type: FilterMainType,
}

impl FilterSettings {
    pub(crate) fn new(main_type: FilterMainType) -> Self {
        Self { main_type }
    }
}

impl Settings for FilterSettings {
    fn main_type(&self) -> FilterMainType {
        self.main_type
    }
}

// ---------------------------------------------------------------------------
// Section settings with table info
// ---------------------------------------------------------------------------

/// Table information for a section filter: which table id and version the
/// filter should match.
///
/// Immutable once built. The only way to obtain a value is through
/// [`SectionSettingsWithTableInfo::builder`], which requires the tuner
/// capability. Values are stored exactly as given; range checking belongs to
/// whoever consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSettingsWithTableInfo {
    #[serde(flatten)]
    base: FilterSettings,
    table_id: i32,
    version: i32,
}

impl SectionSettingsWithTableInfo {
    pub(crate) fn new(base: FilterSettings, table_id: i32, version: i32) -> Self {
        Self {
            base,
            table_id,
            version,
        }
    }

    /// Creates a builder after checking that `ctx` holds the tuner capability.
    ///
    /// A denied check is returned as-is; no builder is produced.
    pub fn builder(
        ctx: &impl PermissionContext,
        main_type: FilterMainType,
    ) -> Result<SectionSettingsWithTableInfoBuilder> {
        check_tuner_permission(ctx)?;
        Ok(SectionSettingsWithTableInfoBuilder::new(main_type))
    }

    pub fn table_id(&self) -> i32 {
        self.table_id
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn base(&self) -> &FilterSettings {
        &self.base
    }
}

impl Settings for SectionSettingsWithTableInfo {
    fn main_type(&self) -> FilterMainType {
        self.base.main_type()
    }
}

impl fmt::Display for SectionSettingsWithTableInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} section filter: table_id={} version={}",
            self.main_type(),
            format_table_id(self.table_id),
            self.version
        )
    }
}
