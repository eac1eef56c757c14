//! Print the resources found in a single file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use resmod_core::{NameConvention, ResourceType};
use resmod_dts::loader::load_source;
use resmod_style::parse_css;
use resmod_vector::{parse_vector, VectorParseOptions};

use crate::config::{load_config, ConfigFile};

#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Resource file to scan
    pub file: PathBuf,

    /// Include metadata (stylesheet source or svg element tree)
    #[arg(long)]
    pub meta: bool,

    /// Name convention: camel, pascal, snake or Snake
    #[arg(short = 'n', long)]
    pub convention: Option<NameConvention>,
}

/// Scan a resource and render the result as pretty JSON.
///
/// Returns `None` when the resource holds no identifier.
pub fn render(path: &Path, config: &ConfigFile, convention: NameConvention, meta: bool) -> Result<Option<String>> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let resource_type = ResourceType::from_extension(ext)
        .with_context(|| format!("Unsupported resource: {}", path.display()))?;

    let raw = load_source(path, resource_type, &config.sass.command)?;
    let failed = || format!("Failed to parse {}", path.display());

    let json = if resource_type.is_style() {
        let options = config.css_options(convention);
        match parse_css(&raw, &options).with_context(failed)? {
            Some(res) if meta => serde_json::to_string_pretty(&res)?,
            Some(res) => serde_json::to_string_pretty(&res.module)?,
            None => return Ok(None),
        }
    } else {
        let options = VectorParseOptions {
            include_meta: meta,
            ..config.svg_options(convention)
        };
        match parse_vector(&raw, &options).with_context(failed)? {
            Some(res) if meta => serde_json::to_string_pretty(&res)?,
            Some(res) => serde_json::to_string_pretty(&res.module)?,
            None => return Ok(None),
        }
    };

    Ok(Some(json))
}

/// Run the inspect command.
pub fn run(args: InspectArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let convention = args
        .convention
        .or(config.generate.convention)
        .unwrap_or_default();

    match render(&args.file, &config, convention, args.meta)? {
        Some(json) => println!("{}", json),
        None => tracing::warn!(
            "{} does not contain any id, class or variable",
            args.file.display()
        ),
    }

    Ok(())
}
