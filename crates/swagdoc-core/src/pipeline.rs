use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;

use crate::config::SwagdocConfig;
use crate::encode::{OutputFormat, write_output};
use crate::error::GenerateError;
use crate::info::assemble_info;
use crate::model::Swagger;
use crate::resource::{EntryParser, ResourceWalker};
use crate::transform::normalize_pagination;

/// Directory under the project root that is always searched for modules.
pub const VENDOR_DIR: &str = "vendor";

/// Everything one run needs. Relative `entry`, `output_dir`, and
/// `search_roots` are resolved against `project_root`.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateOptions {
    pub project_root: PathBuf,
    pub entry: PathBuf,
    pub output_dir: PathBuf,
    pub format: OutputFormat,
    pub search_roots: Vec<PathBuf>,
}

impl GenerateOptions {
    /// Build options from a config file, rejecting unsupported formats.
    pub fn from_config(config: &SwagdocConfig) -> Result<Self, GenerateError> {
        Ok(Self {
            project_root: PathBuf::from(&config.project),
            entry: PathBuf::from(&config.entry),
            output_dir: PathBuf::from(&config.output),
            format: config.format.parse()?,
            search_roots: config.search_roots.iter().map(PathBuf::from).collect(),
        })
    }

    pub fn entry_path(&self) -> PathBuf {
        self.project_root.join(&self.entry)
    }

    pub fn output_path(&self) -> PathBuf {
        self.project_root.join(&self.output_dir)
    }

    /// Module search roots in lookup order: `vendor/` first, then the
    /// configured roots.
    pub fn search_roots(&self) -> Vec<PathBuf> {
        std::iter::once(self.project_root.join(VENDOR_DIR))
            .chain(self.search_roots.iter().map(|r| self.project_root.join(r)))
            .collect()
    }
}

fn check_project_root(root: &Path) -> Result<PathBuf, GenerateError> {
    let invalid = |source| GenerateError::InvalidProjectPath {
        path: root.to_path_buf(),
        source,
    };
    let canonical = fs::canonicalize(root).map_err(invalid)?;
    if !canonical.is_dir() {
        return Err(invalid(io::Error::other("not a directory")));
    }
    Ok(canonical)
}

/// Assemble the document: global info from the entry file, paths and
/// definitions from every import, then pagination normalization.
pub fn build_spec<F>(options: &GenerateOptions, frontend: &mut F) -> Result<Swagger, GenerateError>
where
    F: EntryParser + ResourceWalker,
{
    let root = check_project_root(&options.project_root)?;
    let entry_path = root.join(&options.entry);
    info!("parsing entry file {}", entry_path.display());

    let entry = frontend.parse_entry(&entry_path)?;
    let mut spec = Swagger::new();
    assemble_info(&mut spec, &entry.comments);

    for import in &entry.imports {
        info!("walking {}", import.name);
        let output = frontend.walk(import)?;
        spec.merge(output);
    }

    normalize_pagination(&mut spec);
    Ok(spec)
}

/// Build the document and write it to the output directory.
pub fn generate<F>(options: &GenerateOptions, frontend: &mut F) -> Result<PathBuf, GenerateError>
where
    F: EntryParser + ResourceWalker,
{
    let spec = build_spec(options, frontend)?;
    write_output(&spec, &options.output_path(), options.format)
}
