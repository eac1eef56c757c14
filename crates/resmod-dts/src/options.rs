//! Generator options.

use std::path::{Component, Path, PathBuf};

use resmod_core::NameConvention;
use resmod_style::CssParseOptions;
use resmod_vector::VectorParseOptions;

/// Rewrites module names under a directory to an import alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    /// Alias used in import statements, e.g. `@assets`
    pub module: String,

    /// Directory the alias resolves to, relative to the working root
    pub path: PathBuf,
}

impl Alias {
    /// Rewrite a module name, relative to the working root, if it lies under
    /// the aliased directory.
    pub fn rewrite(&self, module_name: &str) -> Option<String> {
        let rest = Path::new(module_name).strip_prefix(&self.path).ok()?;
        let rest = to_slash(rest);
        let alias = self.module.trim_end_matches('/');
        if rest.is_empty() {
            Some(alias.to_string())
        } else {
            Some(format!("{alias}/{rest}"))
        }
    }
}

/// Configuration of a generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Working root; module names are relative to it
    pub root: PathBuf,

    /// One declaration per directory and extension instead of per file
    pub merge: bool,

    /// Declare file names instead of file content (svg only, with merge)
    pub wrap: bool,

    /// Output directory, defaults to the directory of each resource
    pub output: Option<PathBuf>,

    /// Where merged content is saved; `.` saves next to the sources
    pub save: Option<PathBuf>,

    /// Import alias for module names
    pub alias: Option<Alias>,

    /// Convention for keys and file identifiers
    pub convention: NameConvention,

    /// Css scanner settings; the convention is taken from `convention`
    pub css: CssParseOptions,

    /// Svg scanner settings; the convention is taken from `convention`
    pub svg: VectorParseOptions,

    /// External compiler for scss and sass, invoked as `<command> <file>`
    pub sass_command: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            merge: false,
            wrap: false,
            output: None,
            save: None,
            alias: None,
            convention: NameConvention::Camel,
            css: CssParseOptions::default(),
            svg: VectorParseOptions::default(),
            sass_command: "sass".to_string(),
        }
    }
}

impl GenerateOptions {
    /// Css options with the run's convention applied.
    pub fn css_options(&self) -> CssParseOptions {
        CssParseOptions {
            convention: self.convention,
            ..self.css.clone()
        }
    }

    /// Svg options with the run's convention applied.
    pub fn svg_options(&self) -> VectorParseOptions {
        VectorParseOptions {
            convention: self.convention,
            ..self.svg.clone()
        }
    }
}

/// Render a path with forward slashes, dropping `.` components.
pub(crate) fn to_slash(path: &Path) -> String {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::RootDir => parts.push(String::new()),
            other => parts.push(other.as_os_str().to_string_lossy().into_owned()),
        }
    }
    parts.join("/")
}
