//! The boundary between the core and a source frontend.
//!
//! A frontend reduces the entry file to its comment blocks and imports, and
//! walks each imported resource package into path and definition entries.
//! The core only merges what the frontend returns.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::debug;

use crate::error::SourceError;
use crate::model::{PathItem, Schema, Swagger, Tag};

/// An import declared by the entry file (or by a walked package).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// The imported identifier as written in source.
    pub name: String,
    /// An explicit file path given alongside the import, relative to `base_dir`.
    pub path_hint: Option<String>,
    /// Directory the import is resolved against first.
    pub base_dir: PathBuf,
}

/// The parts of the entry file the core consumes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFile {
    /// Top-level comment blocks, in source order, one string per block.
    pub comments: Vec<String>,
    pub imports: Vec<Import>,
}

/// Path, definition, and tag entries produced by walking one import.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalkOutput {
    pub paths: IndexMap<String, PathItem>,
    pub definitions: IndexMap<String, Schema>,
    pub tags: Vec<String>,
}

impl WalkOutput {
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.definitions.is_empty() && self.tags.is_empty()
    }

    /// Fold another walk result into this one with the same rules as
    /// [`Swagger::merge`].
    pub fn extend(&mut self, other: WalkOutput) {
        for (route, item) in other.paths {
            self.paths.entry(route).or_default().merge(item);
        }
        for (name, schema) in other.definitions {
            self.definitions.entry(name).or_insert(schema);
        }
        for tag in other.tags {
            if !self.tags.contains(&tag) {
                self.tags.push(tag);
            }
        }
    }
}

/// Reduces the entry file to comment blocks and imports.
pub trait EntryParser {
    fn parse_entry(&mut self, path: &Path) -> Result<EntryFile, SourceError>;
}

/// Walks one imported resource package, recursing into its own imports.
///
/// Implementations must be idempotent per package: walking an import that
/// resolves to an already-walked package returns an empty output.
pub trait ResourceWalker {
    fn walk(&mut self, import: &Import) -> Result<WalkOutput, SourceError>;
}

impl Swagger {
    /// Merge a walk result. Operations merge per method with the incoming one
    /// winning; definitions are only inserted when the name is free; tags are
    /// deduplicated by name.
    pub fn merge(&mut self, output: WalkOutput) {
        debug!(
            "merging {} paths, {} definitions",
            output.paths.len(),
            output.definitions.len()
        );
        for (route, item) in output.paths {
            self.paths.entry(route).or_default().merge(item);
        }
        for (name, schema) in output.definitions {
            self.definitions.entry(name).or_insert(schema);
        }
        for name in output.tags {
            if !self.tags.iter().any(|t| t.name == name) {
                self.tags.push(Tag {
                    name,
                    description: String::new(),
                });
            }
        }
    }
}
