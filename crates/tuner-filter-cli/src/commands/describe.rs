use std::path::Path;

use tuner_filter_core::{format_table_id, RequestDescription};

use crate::load;

/// Describe requests without building them; no capability is needed.
pub fn run_describe(input_path: &Path, format: &str) -> Result<String, String> {
    let (_, files) = load(input_path)?;

    if format == "json" {
        let items: Vec<serde_json::Value> = files
            .iter()
            .flat_map(|f| {
                f.requests.iter().enumerate().map(move |(index, r)| {
                    serde_json::json!({
                        "file": f.path,
                        "index": index,
                        "settings": r.describe(),
                    })
                })
            })
            .collect();
        return serde_json::to_string_pretty(&items)
            .map_err(|e| format!("JSON serialization error: {e}"));
    }

    let mut lines: Vec<String> = Vec::new();
    for f in &files {
        for (index, r) in f.requests.iter().enumerate() {
            lines.push(format!("{}[{index}]: {}", f.path, format_description(&r.describe())));
        }
    }
    Ok(lines.join("\n"))
}

fn format_description(d: &RequestDescription) -> String {
    let mut line = format!(
        "{} section filter: table_id={} version={}",
        d.main_type,
        format_table_id(d.table_id),
        d.version
    );
    if let Some(ref name) = d.table_name {
        line.push_str(&format!(" ({name})"));
    }
    line
}
