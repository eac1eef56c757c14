//! Source loading, compiling scss and sass through an external command.

use std::fs;
use std::path::Path;
use std::process::Command;

use resmod_core::ResourceType;

use crate::generator::GenerateError;

/// Read a resource as text ready for scanning.
///
/// Scss and sass files are compiled with `command <file>`, which must print
/// css on stdout.
pub fn load_source(path: &Path, resource_type: ResourceType, command: &str) -> Result<String, GenerateError> {
    match resource_type {
        ResourceType::Scss | ResourceType::Sass => compile_sass(path, command),
        ResourceType::Css | ResourceType::Svg => fs::read_to_string(path)
            .map_err(|e| GenerateError::ReadError(format!("{}: {}", path.display(), e))),
    }
}

fn compile_sass(path: &Path, command: &str) -> Result<String, GenerateError> {
    let mut parts = command.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| GenerateError::Compile {
            path: path.display().to_string(),
            message: "empty compiler command".to_string(),
        })?;

    tracing::debug!("Compiling {} with {}", path.display(), command);

    let output = Command::new(program)
        .args(parts)
        .arg(path)
        .output()
        .map_err(|e| GenerateError::Compile {
            path: path.display().to_string(),
            message: format!("failed to run {program}: {e}"),
        })?;

    if !output.status.success() {
        return Err(GenerateError::Compile {
            path: path.display().to_string(),
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    String::from_utf8(output.stdout).map_err(|e| GenerateError::Compile {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn reads_plain_sources() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("app.css");
        fs::write(&file, ".app {}").unwrap();
        assert_eq!(load_source(&file, ResourceType::Css, "sass").unwrap(), ".app {}");
    }

    #[test]
    fn missing_file_is_read_error() {
        let temp = tempdir().unwrap();
        let err = load_source(&temp.path().join("nope.svg"), ResourceType::Svg, "sass").unwrap_err();
        assert!(matches!(err, GenerateError::ReadError(_)));
    }

    #[cfg(unix)]
    #[test]
    fn compiles_with_external_command() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("theme.scss");
        fs::write(&file, ".theme { color: red; }").unwrap();
        // `cat` stands in for a compiler that emits the input unchanged
        assert_eq!(
            load_source(&file, ResourceType::Scss, "cat").unwrap(),
            ".theme { color: red; }"
        );
    }

    #[test]
    fn unknown_compiler_fails() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("theme.sass");
        fs::write(&file, ".theme\n  color: red").unwrap();
        let err = load_source(&file, ResourceType::Sass, "resmod-no-such-compiler").unwrap_err();
        assert!(matches!(err, GenerateError::Compile { .. }));
    }
}
