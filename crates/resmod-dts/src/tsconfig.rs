//! `tsconfig.json` lookup for `declarationDir` output.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TsConfig {
    #[serde(default)]
    compiler_options: CompilerOptions,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CompilerOptions {
    #[serde(default)]
    declaration: bool,

    declaration_dir: Option<PathBuf>,
}

/// Resolve the declaration directory configured in `<root>/tsconfig.json`.
///
/// Returns `None` when the file is missing or unreadable, or when declarations
/// are not enabled.
pub fn declaration_dir(root: &Path) -> Option<PathBuf> {
    let path = root.join("tsconfig.json");
    let content = fs::read_to_string(&path).ok()?;
    let config: TsConfig = match serde_json::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Ignoring {}: {}", path.display(), e);
            return None;
        }
    };

    let options = config.compiler_options;
    if !options.declaration {
        return None;
    }
    options.declaration_dir.map(|dir| root.join(dir))
}

/// Path of the variable-form declaration for a module name.
///
/// The first path segment of the module name is dropped, so `src/icons`
/// lands at `<dir>/icons.d.ts`.
pub fn variable_declaration_path(dir: &Path, module_name: &str) -> PathBuf {
    let rest = module_name
        .split_once('/')
        .map(|(_, rest)| rest)
        .unwrap_or(module_name);
    dir.join(format!("{rest}.d.ts"))
}
