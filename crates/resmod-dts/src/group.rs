//! Grouping of input files by directory and extension.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use resmod_core::ResourceType;

use crate::generator::GenerateError;

/// Files sharing a directory and an extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceGroup {
    /// Directory holding the files
    pub dir: PathBuf,

    /// Extension without the leading dot, lowercased
    pub extension: String,

    pub resource_type: ResourceType,

    /// Files in input order
    pub files: Vec<PathBuf>,
}

impl ResourceGroup {
    /// Last component of the directory, used to name merged outputs.
    pub fn dir_name(&self) -> String {
        self.dir
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("resources")
            .to_string()
    }
}

/// Whether the file is the saved output of an earlier merge.
pub fn is_merge_output(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(".mod.svg") || name.ends_with(".mod.css"))
}

/// Group files by `(directory, extension)`, keeping first-seen order.
///
/// Merge outputs are skipped; an unsupported extension fails the whole call.
pub fn group_files(files: &[PathBuf]) -> Result<Vec<ResourceGroup>, GenerateError> {
    let mut groups: IndexMap<(PathBuf, String), ResourceGroup> = IndexMap::new();

    for file in files {
        if is_merge_output(file) {
            continue;
        }

        let extension = file
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let resource_type = ResourceType::from_extension(&extension)
            .ok_or_else(|| GenerateError::Unsupported(file.display().to_string()))?;
        let dir = file.parent().map(Path::to_path_buf).unwrap_or_default();

        groups
            .entry((dir.clone(), extension.clone()))
            .or_insert_with(|| ResourceGroup {
                dir,
                extension,
                resource_type,
                files: Vec::new(),
            })
            .files
            .push(file.clone());
    }

    Ok(groups.into_values().collect())
}
