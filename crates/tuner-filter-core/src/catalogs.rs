use std::collections::HashMap;
use std::sync::LazyLock;

/// Version of the JSON API surface (`ffi` module and C ABI).
pub const API_VERSION: &str = "1.0";

/// Platform capability required to create any tuner filter settings builder.
pub const ACCESS_TV_TUNER: &str = "android.permission.ACCESS_TV_TUNER";

/// `table_id` value reserved as forbidden by ISO/IEC 13818-1.
pub const FORBIDDEN_TABLE_ID: i32 = 0xFF;

/// Well-known section table ids (ISO/IEC 13818-1 Table 2-31, ETSI EN 300 468 Table 2).
/// Ids outside this map are still valid; they just have no display name.
pub static TABLE_NAMES: LazyLock<HashMap<i32, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();
    // MPEG-2 PSI
    m.insert(0x00, "program_association_section");
    m.insert(0x01, "conditional_access_section");
    m.insert(0x02, "TS_program_map_section");
    m.insert(0x03, "TS_description_section");
    m.insert(0x04, "ISO_IEC_14496_scene_description_section");
    m.insert(0x05, "ISO_IEC_14496_object_descriptor_section");
    // DVB SI
    m.insert(0x40, "network_information_section - actual_network");
    m.insert(0x41, "network_information_section - other_network");
    m.insert(0x42, "service_description_section - actual_transport_stream");
    m.insert(0x46, "service_description_section - other_transport_stream");
    m.insert(0x4A, "bouquet_association_section");
    m.insert(0x4E, "event_information_section - actual_transport_stream, present/following");
    m.insert(0x4F, "event_information_section - other_transport_stream, present/following");
    m.insert(0x70, "time_date_section");
    m.insert(0x71, "running_status_section");
    m.insert(0x72, "stuffing_section");
    m.insert(0x73, "time_offset_section");
    m.insert(0x7E, "discontinuity_information_section");
    m.insert(0x7F, "selection_information_section");
    m.insert(FORBIDDEN_TABLE_ID, "forbidden");
    m
});

/// Display name for a table id, if it is one of the well-known tables.
///
/// EIT schedule tables occupy whole ranges, so they are matched here rather
/// than listed one by one.
pub fn table_name(table_id: i32) -> Option<&'static str> {
    if let Some(name) = TABLE_NAMES.get(&table_id) {
        return Some(name);
    }
    match table_id {
        0x50..=0x5F => Some("event_information_section - actual_transport_stream, schedule"),
        0x60..=0x6F => Some("event_information_section - other_transport_stream, schedule"),
        _ => None,
    }
}

/// Render a table id the way section tables are usually written: `0x42` for
/// ids that fit the 8-bit field, plain decimal for anything else so stored
/// out-of-range values read back unchanged.
pub fn format_table_id(table_id: i32) -> String {
    if (0..=0xFF).contains(&table_id) {
        format!("{table_id:#04x}")
    } else {
        table_id.to_string()
    }
}
