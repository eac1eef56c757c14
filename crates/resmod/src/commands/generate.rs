//! Declaration generation command.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use indexmap::IndexSet;
use resmod_core::{NameConvention, ResourceType};
use resmod_dts::group::is_merge_output;
use resmod_dts::{Alias, GenerateOptions, GenerateResult, Generator};
use walkdir::WalkDir;

use crate::config::{load_config, ConfigFile};

#[derive(Debug, Clone, Default, Args)]
pub struct GenerateArgs {
    /// Resource files, directories or glob patterns
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Output directory (defaults to the directory of each resource)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// One declaration per directory and file type
    #[arg(short, long)]
    pub merge: bool,

    /// Declare svg file names instead of their ids (requires --merge)
    #[arg(short, long)]
    pub wrap: bool,

    /// Name convention: camel, pascal, snake or Snake
    #[arg(short = 'n', long)]
    pub convention: Option<NameConvention>,

    /// Save merged resources to this file, "." saves next to the sources
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Import alias used in module names, e.g. @assets
    #[arg(long, requires = "alias_path")]
    pub alias_module: Option<String>,

    /// Directory the alias points to
    #[arg(long, requires = "alias_module")]
    pub alias_path: Option<PathBuf>,

    /// Command compiling scss and sass to css on stdout
    #[arg(long)]
    pub sass: Option<String>,
}

/// Combine command-line flags with the config file. Flags win.
pub fn resolve_options(args: &GenerateArgs, config: &ConfigFile, root: PathBuf) -> GenerateOptions {
    let file = &config.generate;
    let convention = args.convention.or(file.convention).unwrap_or_default();

    let alias = match (&args.alias_module, &args.alias_path) {
        (Some(module), Some(path)) => Some(Alias {
            module: module.clone(),
            path: strip_cur_dir(path),
        }),
        _ => file.alias.as_ref().map(|alias| Alias {
            module: alias.module.clone(),
            path: strip_cur_dir(&alias.path),
        }),
    };

    GenerateOptions {
        root,
        merge: args.merge || file.merge,
        wrap: args.wrap || file.wrap,
        output: args.output.clone().or_else(|| file.output.clone()),
        save: args.save.clone().or_else(|| file.save.clone()),
        alias,
        convention,
        css: config.css_options(convention),
        svg: config.svg_options(convention),
        sass_command: args
            .sass
            .clone()
            .unwrap_or_else(|| config.sass.command.clone()),
    }
}

fn strip_cur_dir(path: &Path) -> PathBuf {
    path.strip_prefix(".").unwrap_or(path).to_path_buf()
}

/// Whether a path is a resource the generator should pick up.
pub fn is_resource(path: &Path) -> bool {
    let supported = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(ResourceType::from_extension)
        .is_some();
    supported && !is_merge_output(path)
}

/// Expand files, directories and glob patterns into resource files.
///
/// Explicit files are kept as given so unsupported ones are reported by the
/// generator; directories and patterns only contribute resources.
pub fn collect_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = IndexSet::new();

    for input in inputs {
        let path = Path::new(input);

        if path.is_file() {
            files.insert(path.to_path_buf());
            continue;
        }

        if path.is_dir() {
            for entry in WalkDir::new(path)
                .follow_links(true)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path();
                if path.is_file() && is_resource(path) {
                    files.insert(path.to_path_buf());
                }
            }
            continue;
        }

        let before = files.len();
        for entry in glob::glob(input).with_context(|| format!("Invalid input pattern: {}", input))? {
            let path = entry.with_context(|| format!("Failed to expand {}", input))?;
            if path.is_file() && is_resource(&path) {
                files.insert(path);
            }
        }
        if files.len() == before {
            tracing::warn!("No resources match {}", input);
        }
    }

    Ok(files.into_iter().collect())
}

/// Collect inputs and run the generator once.
pub fn generate_once(generator: &Generator, inputs: &[String]) -> Result<GenerateResult> {
    let files = collect_inputs(inputs)?;
    if files.is_empty() {
        tracing::warn!("No resource files found");
        return Ok(GenerateResult::default());
    }

    tracing::debug!("Scanning {} files", files.len());
    let result = generator.run(&files)?;

    tracing::info!(
        "Generated {} declarations ({} skipped) in {}ms",
        result.declarations.len(),
        result.skipped,
        result.duration_ms
    );
    for saved in &result.saved {
        tracing::info!("Saved: {}", saved.display());
    }

    Ok(result)
}

/// Run the generate command.
pub fn run(args: GenerateArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let root = env::current_dir().context("Failed to resolve working directory")?;
    let generator = Generator::new(resolve_options(&args, &config, root));

    generate_once(&generator, &args.inputs)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn flags_override_config() {
        let config: ConfigFile = toml::from_str(
            r#"
[generate]
convention = "snake"
output = "types"

[generate.alias]
module = "@assets"
path = "./assets"
"#,
        )
        .unwrap();

        let args = GenerateArgs {
            convention: Some(NameConvention::Pascal),
            merge: true,
            ..Default::default()
        };
        let options = resolve_options(&args, &config, PathBuf::from("/work"));

        assert_eq!(options.convention, NameConvention::Pascal);
        assert_eq!(options.css.convention, NameConvention::Pascal);
        assert!(options.merge);
        assert_eq!(options.output, Some(PathBuf::from("types")));
        assert_eq!(
            options.alias,
            Some(Alias {
                module: "@assets".to_string(),
                path: PathBuf::from("assets"),
            })
        );
        assert_eq!(options.sass_command, "sass");
    }

    #[test]
    fn collects_directories_and_patterns() {
        let temp = tempdir().unwrap();
        let root = temp.path();
        touch(&root.join("icons/b.svg"));
        touch(&root.join("icons/a.svg"));
        touch(&root.join("icons/icons.mod.svg"));
        touch(&root.join("icons/readme.md"));
        touch(&root.join("styles/app.css"));
        touch(&root.join("styles/app.d.ts"));

        let files = collect_inputs(&[
            root.join("icons").display().to_string(),
            format!("{}/styles/*", root.display()),
            root.join("icons/a.svg").display().to_string(),
        ])
        .unwrap();

        assert_eq!(
            files,
            vec![
                root.join("icons/a.svg"),
                root.join("icons/b.svg"),
                root.join("styles/app.css"),
            ]
        );
    }

    #[test]
    fn unmatched_pattern_is_empty() {
        let temp = tempdir().unwrap();
        let files = collect_inputs(&[format!("{}/*.svg", temp.path().display())]).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn recognises_resources() {
        assert!(is_resource(Path::new("a/theme.scss")));
        assert!(is_resource(Path::new("a/icon.SVG")));
        assert!(!is_resource(Path::new("a/a.mod.css")));
        assert!(!is_resource(Path::new("a/a.d.ts")));
    }
}
