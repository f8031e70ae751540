mod commands;
mod logging;
mod reader;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use reader::{read_project_config, read_settings_files, ProjectConfig, SettingsFile};
use tuner_filter_core::{FilterMainType, GrantedCapabilities};
use tuner_filter_lint::SettingsEntry;

#[derive(Parser)]
#[command(
    name = "tuner-filter",
    version,
    about = "Tuner section filter settings - build, lint and describe table-info filters"
)]
struct Cli {
    /// Grant a capability to this invocation (repeatable, adds to the config file)
    #[arg(long = "grant", global = true, value_name = "CAPABILITY")]
    grants: Vec<String>,

    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build one settings value and print it
    Build {
        /// Filter main type: ts, mmtp, ip, tlv, alp (or the raw HAL value)
        #[arg(long)]
        main_type: FilterMainType,

        /// Section table ID (defaults to 0)
        #[arg(long, allow_hyphen_values = true)]
        table_id: Option<i32>,

        /// Table version (defaults to 0)
        #[arg(long, allow_hyphen_values = true)]
        version: Option<i32>,

        /// Output format: json (default) or yaml
        #[arg(long, default_value = "json")]
        format: String,

        /// Write output to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Lint settings files for out-of-range or duplicate filters
    Lint {
        /// Input path (file or directory, defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format: human (default), json or sarif
        #[arg(long, default_value = "human")]
        format: String,
    },

    /// Describe settings files in human-readable form
    Describe {
        /// Input path (file or directory, defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format: human (default) or json
        #[arg(long, default_value = "human")]
        format: String,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Build {
            main_type,
            table_id,
            version,
            format,
            output,
        } => {
            let args = commands::build::BuildArgs {
                main_type,
                table_id,
                version,
                format,
                output,
            };
            match commands::build::run_build(&args, &cli.grants) {
                Ok(out) => println!("{out}"),
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            }
        }
        Commands::Lint { path, format } => {
            match commands::lint::run_lint(&path, &format, &cli.grants) {
                Ok((output, error_count)) => {
                    println!("{output}");
                    if error_count > 0 {
                        process::exit(1);
                    }
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            }
        }
        Commands::Describe { path, format } => {
            match commands::describe::run_describe(&path, &format) {
                Ok(output) => println!("{output}"),
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            }
        }
    }
}

/// Directory whose `tuner-filter.config.yaml` applies to `input_path`.
fn config_dir(input_path: &Path) -> PathBuf {
    if input_path.is_dir() {
        return input_path.to_path_buf();
    }
    match input_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Capabilities from the config file plus any `--grant` flags.
pub fn capabilities(config: &ProjectConfig, grants: &[String]) -> GrantedCapabilities {
    config
        .capabilities
        .iter()
        .chain(grants.iter())
        .cloned()
        .collect()
}

/// Load the project config and settings files for `input_path`.
pub fn load(input_path: &Path) -> Result<(ProjectConfig, Vec<SettingsFile>), String> {
    let config = read_project_config(&config_dir(input_path))?.unwrap_or_default();
    let files = read_settings_files(input_path, &config)?;
    tracing::debug!(
        project = config.name.as_deref().unwrap_or("-"),
        files = files.len(),
        "loaded settings files"
    );

    if files.is_empty() {
        return Err(format!(
            "No settings files (.json, .yaml, .yml) found at: {}",
            input_path.display()
        ));
    }

    Ok((config, files))
}

/// Build every request in `files` through the permission-gated builder.
pub fn build_entries(
    files: &[SettingsFile],
    ctx: &GrantedCapabilities,
) -> Result<Vec<SettingsEntry>, String> {
    let mut entries = Vec::new();

    for file in files {
        for (index, request) in file.requests.iter().enumerate() {
            let settings = request
                .build_with(ctx)
                .map_err(|e| format!("{}[{index}]: {e}", file.path))?;
            entries.push(SettingsEntry {
                source: file.path.clone(),
                index,
                settings,
            });
        }
    }

    tracing::debug!(files = files.len(), entries = entries.len(), "built settings");
    Ok(entries)
}
