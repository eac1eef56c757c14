//! Declaration generator.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use rayon::prelude::*;

use resmod_core::{file_identifier, ParseError, ResourceModule, ResourceType};
use resmod_style::parse_css;
use resmod_vector::{
    parse_vector, serialize_svg, wrap_merged_svg, SerializeError, SerializeOptions, SvgMetadata,
    VectorParseOptions,
};

use crate::declaration::Declaration;
use crate::group::{group_files, ResourceGroup};
use crate::loader::load_source;
use crate::options::{to_slash, GenerateOptions};
use crate::tsconfig::{declaration_dir, variable_declaration_path};

/// Errors that can occur during generation.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("Failed to read {0}")]
    ReadError(String),

    #[error("Failed to parse {path}: {source}")]
    Parse { path: String, source: ParseError },

    #[error("Failed to compile {path}: {message}")]
    Compile { path: String, message: String },

    #[error("Failed to write output: {0}")]
    WriteError(String),

    #[error("Unsupported resource: {0}")]
    Unsupported(String),

    #[error("wrap can only be used together with merge")]
    WrapRequiresMerge,

    #[error("wrap only supports svg resources: {0}")]
    WrapUnsupported(String),

    #[error("Failed to serialize merged svg: {0}")]
    Serialize(#[from] SerializeError),
}

/// Result of a generation run.
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Declaration files written, in input order
    pub declarations: Vec<PathBuf>,

    /// Merged resources saved
    pub saved: Vec<PathBuf>,

    /// Files or groups that yielded no identifier
    pub skipped: usize,

    /// Total run time in milliseconds
    pub duration_ms: u64,
}

/// A scanned resource file.
struct Scanned {
    module: ResourceModule,
    /// Source text after compilation
    raw: String,
    /// Element tree, for svg scanned with metadata
    metadata: Option<SvgMetadata>,
}

/// Generates `.d.ts` files for css and svg resources.
pub struct Generator {
    options: GenerateOptions,
    declaration_dir: Option<PathBuf>,
}

impl Generator {
    /// Create a generator. Reads `tsconfig.json` from the working root.
    pub fn new(options: GenerateOptions) -> Self {
        let declaration_dir = declaration_dir(&options.root);
        if let Some(dir) = &declaration_dir {
            tracing::debug!("Writing variable declarations to {}", dir.display());
        }
        Self {
            options,
            declaration_dir,
        }
    }

    pub fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Generate declarations for the given resource files.
    pub fn run(&self, files: &[PathBuf]) -> Result<GenerateResult, GenerateError> {
        let start = Instant::now();

        if self.options.wrap && !self.options.merge {
            return Err(GenerateError::WrapRequiresMerge);
        }

        let groups = group_files(files)?;
        let mut result = GenerateResult::default();

        if self.options.merge {
            for group in &groups {
                if self.options.wrap {
                    self.generate_wrapped(group, &mut result)?;
                } else {
                    self.generate_merged(group, &mut result)?;
                }
            }
        } else {
            let jobs: Vec<(&Path, ResourceType)> = groups
                .iter()
                .flat_map(|g| g.files.iter().map(|f| (f.as_path(), g.resource_type)))
                .collect();

            let outcomes: Vec<Result<Option<PathBuf>, GenerateError>> = jobs
                .par_iter()
                .map(|(file, resource_type)| self.generate_file(file, *resource_type))
                .collect();

            for outcome in outcomes {
                match outcome? {
                    Some(path) => result.declarations.push(path),
                    None => result.skipped += 1,
                }
            }
        }

        result.duration_ms = start.elapsed().as_millis() as u64;
        Ok(result)
    }

    /// One declaration per file, named after the file stem.
    fn generate_file(&self, file: &Path, resource_type: ResourceType) -> Result<Option<PathBuf>, GenerateError> {
        let Some(scanned) = self.scan(file, resource_type, false)? else {
            warn_empty(file, resource_type);
            return Ok(None);
        };

        let dir = match &self.options.output {
            Some(output) => output.clone(),
            None => parent_dir(file),
        };
        let target = dir.join(format!("{}.d.ts", file_stem(file)));
        let declaration = Declaration::new(self.module_name(file), scanned.module);

        self.write_declaration(&target, &declaration)?;
        Ok(Some(target))
    }

    /// One declaration per group, keys merged first-write-wins.
    fn generate_merged(&self, group: &ResourceGroup, result: &mut GenerateResult) -> Result<(), GenerateError> {
        let is_svg = group.resource_type == ResourceType::Svg;
        let save = self.options.save.is_some();
        let mut module = ResourceModule::new();
        let mut merged = String::new();

        for file in &group.files {
            let Some(scanned) = self.scan(file, group.resource_type, save && is_svg)? else {
                warn_empty(file, group.resource_type);
                continue;
            };
            if scanned.module.is_empty() {
                warn_empty(file, group.resource_type);
            }
            if save {
                self.append_merged(&mut merged, file, &scanned, false)?;
            }
            module.merge(scanned.module);
        }

        if save {
            result.saved.push(self.save_merged(group, &merged)?);
        }

        if module.is_empty() {
            tracing::warn!(
                "{} resources in {} do not contain any id, class or variable",
                group.extension,
                group.dir.display()
            );
            result.skipped += 1;
            return Ok(());
        }

        let target = self.merged_target(group);
        let declaration = Declaration::new(self.module_name(&group.dir), module);
        self.write_declaration(&target, &declaration)?;
        result.declarations.push(target);
        Ok(())
    }

    /// One declaration per group keyed by file identifiers.
    fn generate_wrapped(&self, group: &ResourceGroup, result: &mut GenerateResult) -> Result<(), GenerateError> {
        if group.resource_type != ResourceType::Svg {
            let file = group.files.first().map(|f| f.display().to_string());
            return Err(GenerateError::WrapUnsupported(file.unwrap_or_default()));
        }

        let save = self.options.save.is_some();
        let mut module = ResourceModule::new();
        let mut merged = String::new();

        for file in &group.files {
            let identifier = self.identifier(file)?;
            module.insert(identifier, file_stem(file));

            if save {
                if let Some(scanned) = self.scan(file, group.resource_type, true)? {
                    self.append_merged(&mut merged, file, &scanned, true)?;
                }
            }
        }

        if save {
            result.saved.push(self.save_merged(group, &merged)?);
        }

        let target = self.merged_target(group);
        let declaration = Declaration::new(self.module_name(&group.dir), module);
        self.write_declaration(&target, &declaration)?;
        result.declarations.push(target);
        Ok(())
    }

    /// Scan one file. Returns `None` when nothing was found.
    fn scan(&self, file: &Path, resource_type: ResourceType, include_meta: bool) -> Result<Option<Scanned>, GenerateError> {
        let raw = load_source(file, resource_type, &self.options.sass_command)?;
        let parse_error = |source: ParseError| GenerateError::Parse {
            path: file.display().to_string(),
            source,
        };

        if resource_type.is_style() {
            let resources = parse_css(&raw, &self.options.css_options()).map_err(parse_error)?;
            return Ok(resources.map(|res| Scanned {
                module: res.module,
                raw: res.metadata.raw,
                metadata: None,
            }));
        }

        let options = VectorParseOptions {
            include_meta,
            ..self.options.svg_options()
        };
        let resources = parse_vector(&raw, &options).map_err(parse_error)?;
        Ok(resources.map(|res| Scanned {
            module: res.module,
            raw,
            metadata: Some(res.metadata),
        }))
    }

    /// Append a scanned file to the merged content.
    fn append_merged(&self, merged: &mut String, file: &Path, scanned: &Scanned, use_given_id: bool) -> Result<(), GenerateError> {
        match &scanned.metadata {
            Some(metadata) => {
                let options = SerializeOptions {
                    merge: true,
                    id: Some(self.identifier(file)?),
                    use_given_id,
                    ..Default::default()
                };
                merged.push_str(&serialize_svg(metadata, &options)?);
            }
            None => {
                merged.push_str(&scanned.raw);
                if !scanned.raw.ends_with('\n') {
                    merged.push('\n');
                }
            }
        }
        Ok(())
    }

    /// Write merged content, wrapping svg in a sprite container.
    fn save_merged(&self, group: &ResourceGroup, merged: &str) -> Result<PathBuf, GenerateError> {
        let target = match &self.options.save {
            Some(save) if save.as_os_str() != "." => save.clone(),
            _ => group
                .dir
                .join(format!("{}.mod.{}", group.dir_name(), group.extension)),
        };

        let content = if group.resource_type == ResourceType::Svg {
            wrap_merged_svg(merged)
        } else {
            merged.to_string()
        };

        write_file(&target, &content)?;
        tracing::info!("Saved merged resources to {}", target.display());
        Ok(target)
    }

    fn merged_target(&self, group: &ResourceGroup) -> PathBuf {
        let dir = self.options.output.clone().unwrap_or_else(|| group.dir.clone());
        dir.join(format!("{}.{}.d.ts", group.dir_name(), group.extension))
    }

    /// Module name of a path: relative to the working root, alias applied.
    fn module_name(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.options.root).unwrap_or(path);
        let name = to_slash(relative);
        let name = if name.is_empty() { ".".to_string() } else { name };

        match &self.options.alias {
            Some(alias) => alias.rewrite(&name).unwrap_or(name),
            None => name,
        }
    }

    fn identifier(&self, file: &Path) -> Result<String, GenerateError> {
        file_identifier(file, self.options.convention).map_err(|source| GenerateError::Parse {
            path: file.display().to_string(),
            source,
        })
    }

    fn write_declaration(&self, target: &Path, declaration: &Declaration) -> Result<(), GenerateError> {
        write_file(target, &declaration.render())?;
        tracing::info!("Generated {}", target.display());

        if let Some(dir) = &self.declaration_dir {
            let path = variable_declaration_path(dir, &declaration.module_name);
            write_file(&path, &declaration.render_variable())?;
            tracing::debug!("Generated {}", path.display());
        }
        Ok(())
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), GenerateError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| GenerateError::WriteError(e.to_string()))?;
        }
    }
    fs::write(path, content)
        .map_err(|e| GenerateError::WriteError(format!("{}: {}", path.display(), e)))
}

fn warn_empty(file: &Path, resource_type: ResourceType) {
    tracing::warn!(
        "{} resource does not contain any id, class or variable: {}",
        resource_type.as_str(),
        file.display()
    );
}

fn file_stem(file: &Path) -> String {
    file.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}

fn parent_dir(file: &Path) -> PathBuf {
    file.parent().map(Path::to_path_buf).unwrap_or_default()
}
