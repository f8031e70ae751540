use std::path::{Path, PathBuf};

use tuner_filter_core::{FilterMainType, SectionSettingsRequest};

use crate::reader::read_project_config;

pub struct BuildArgs {
    pub main_type: FilterMainType,
    pub table_id: Option<i32>,
    pub version: Option<i32>,
    pub format: String,
    pub output: Option<PathBuf>,
}

pub fn run_build(args: &BuildArgs, grants: &[String]) -> Result<String, String> {
    let config = read_project_config(Path::new("."))?.unwrap_or_default();
    let ctx = crate::capabilities(&config, grants);

    let request = SectionSettingsRequest {
        main_type: args.main_type,
        table_id: args.table_id,
        version: args.version,
    };
    let settings = request.build_with(&ctx).map_err(|e| e.to_string())?;

    let rendered = match args.format.as_str() {
        "yaml" => serde_yaml::to_string(&settings)
            .map_err(|e| format!("YAML serialization error: {e}"))?,
        _ => serde_json::to_string_pretty(&settings)
            .map_err(|e| format!("JSON serialization error: {e}"))?,
    };

    if let Some(ref out_path) = args.output {
        std::fs::write(out_path, &rendered)
            .map_err(|e| format!("Failed to write {}: {e}", out_path.display()))?;
        return Ok(format!("Written to {}", out_path.display()));
    }

    Ok(rendered)
}
