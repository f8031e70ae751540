use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tuner_filter_core::SectionSettingsRequest;
use tuner_filter_lint::LintConfig;

pub const CONFIG_FILE_NAME: &str = "tuner-filter.config.yaml";

const EXTENSIONS: [&str; 3] = ["json", "yaml", "yml"];

/// Requests read from one settings file.
pub struct SettingsFile {
    pub path: String,
    pub requests: Vec<SectionSettingsRequest>,
}

/// Project configuration from tuner-filter.config.yaml.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub name: Option<String>,
    /// Capabilities granted to every build in this project.
    pub capabilities: Vec<String>,
    /// Glob patterns relative to the config directory.
    pub sources: Option<Vec<String>>,
    pub lint: LintConfig,
}

/// Read project config from tuner-filter.config.yaml, if present.
pub fn read_project_config(dir_path: &Path) -> Result<Option<ProjectConfig>, String> {
    let config_path = dir_path.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(&config_path)
        .map_err(|e| format!("Failed to read {}: {}", config_path.display(), e))?;
    let config = serde_yaml::from_str(&content)
        .map_err(|e| format!("Invalid YAML config {}: {}", config_path.display(), e))?;
    tracing::debug!(path = %config_path.display(), "loaded project config");
    Ok(Some(config))
}

/// Read settings files from a path (file or directory).
pub fn read_settings_files(
    input_path: &Path,
    config: &ProjectConfig,
) -> Result<Vec<SettingsFile>, String> {
    if !input_path.exists() {
        return Err(format!("Path does not exist: {}", input_path.display()));
    }

    if input_path.is_file() {
        return Ok(vec![read_settings_file(input_path)?]);
    }

    if input_path.is_dir() {
        let paths = match config.sources {
            Some(ref s) if !s.is_empty() => expand_sources(input_path, s)?,
            _ => scan_directory(input_path)?,
        };
        return paths.iter().map(|p| read_settings_file(p)).collect();
    }

    Err(format!(
        "Path is neither a file nor a directory: {}",
        input_path.display()
    ))
}

fn read_settings_file(path: &Path) -> Result<SettingsFile, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let is_json = path.extension().is_some_and(|e| e == "json");
    let requests = if is_json {
        parse_json_document(&content)
    } else {
        parse_yaml_document(&content)
    }
    .map_err(|e| format!("Invalid settings in {}: {}", path.display(), e))?;

    Ok(SettingsFile {
        path: path.to_string_lossy().to_string(),
        requests,
    })
}

/// A settings document holds either a single request or a list of them.
/// The shape is picked first so field errors surface unchanged.
fn parse_json_document(content: &str) -> Result<Vec<SectionSettingsRequest>, String> {
    let value: serde_json::Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
    let requests = if value.is_array() {
        serde_json::from_value(value)
    } else {
        serde_json::from_value(value).map(|r| vec![r])
    };
    requests.map_err(|e| e.to_string())
}

fn parse_yaml_document(content: &str) -> Result<Vec<SectionSettingsRequest>, String> {
    let value: serde_yaml::Value = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
    let requests = if value.is_sequence() {
        serde_yaml::from_value(value)
    } else {
        serde_yaml::from_value(value).map(|r| vec![r])
    };
    requests.map_err(|e| e.to_string())
}

fn is_config_file(path: &Path) -> bool {
    path.file_name().is_some_and(|n| n == CONFIG_FILE_NAME)
}

fn glob_paths(pattern: &Path) -> Result<Vec<PathBuf>, String> {
    let pattern_str = pattern.to_string_lossy().replace('\\', "/");
    let entries = glob::glob(&pattern_str).map_err(|e| format!("Invalid glob pattern: {}", e))?;

    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => paths.push(path),
            Err(e) => return Err(format!("Glob error: {}", e)),
        }
    }
    Ok(paths)
}

fn scan_directory(dir_path: &Path) -> Result<Vec<PathBuf>, String> {
    let mut paths: Vec<PathBuf> = Vec::new();

    for ext in EXTENSIONS {
        for path in glob_paths(&dir_path.join(format!("**/*.{ext}")))? {
            // The config file is not a settings document
            if is_config_file(&path) {
                continue;
            }
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    paths.sort();
    Ok(paths)
}

fn expand_sources(base_dir: &Path, patterns: &[String]) -> Result<Vec<PathBuf>, String> {
    let mut paths: Vec<PathBuf> = Vec::new();

    for pattern in patterns {
        let mut matched: Vec<PathBuf> = glob_paths(&base_dir.join(pattern))
            .map_err(|e| format!("{e} (pattern '{pattern}')"))?
            .into_iter()
            .filter(|p| !is_config_file(p) && !paths.contains(p))
            .collect();
        matched.sort();
        paths.extend(matched);
    }

    Ok(paths)
}
