//! Configuration file (resmod.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use resmod_core::NameConvention;
use resmod_style::CssParseOptions;
use resmod_vector::VectorParseOptions;
use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub generate: GenerateSection,
    #[serde(default)]
    pub css: CssSection,
    #[serde(default)]
    pub svg: SvgSection,
    #[serde(default)]
    pub sass: SassSection,
}

#[derive(Debug, Deserialize, Default)]
pub struct GenerateSection {
    pub convention: Option<NameConvention>,
    #[serde(default)]
    pub merge: bool,
    #[serde(default)]
    pub wrap: bool,
    pub output: Option<PathBuf>,
    pub save: Option<PathBuf>,
    pub alias: Option<AliasSection>,
}

#[derive(Debug, Deserialize)]
pub struct AliasSection {
    pub module: String,
    pub path: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct CssSection {
    #[serde(default = "default_true")]
    pub class: bool,
    #[serde(default = "default_true")]
    pub id: bool,
    #[serde(default = "default_true")]
    pub variable: bool,
    #[serde(default)]
    pub exclude_symbol: bool,
    #[serde(default)]
    pub prefix: bool,
}

impl Default for CssSection {
    fn default() -> Self {
        Self {
            class: true,
            id: true,
            variable: true,
            exclude_symbol: false,
            prefix: false,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct SvgSection {
    #[serde(default)]
    pub prefix: bool,
}

#[derive(Debug, Deserialize)]
pub struct SassSection {
    #[serde(default = "default_sass_command")]
    pub command: String,
}

impl Default for SassSection {
    fn default() -> Self {
        Self {
            command: default_sass_command(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_sass_command() -> String {
    "sass".to_string()
}

impl ConfigFile {
    /// Css scanner settings from the `[css]` section.
    pub fn css_options(&self, convention: NameConvention) -> CssParseOptions {
        CssParseOptions {
            css_id: self.css.id,
            css_class: self.css.class,
            css_variable: self.css.variable,
            exclude_selector_symbol: self.css.exclude_symbol,
            prefix: self.css.prefix,
            convention,
            ..Default::default()
        }
    }

    /// Svg scanner settings from the `[svg]` section.
    pub fn svg_options(&self, convention: NameConvention) -> VectorParseOptions {
        VectorParseOptions {
            prefix: self.svg.prefix,
            convention,
            ..Default::default()
        }
    }
}

/// Load configuration if the file exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::info!("Loaded config from {}", path.display());
    Ok(config)
}
