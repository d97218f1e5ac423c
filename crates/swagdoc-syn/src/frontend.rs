use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use syn::{Attribute, Expr, ExprLit, ImplItem, Item, ItemMod, Lit, Meta};

use swagdoc_core::{EntryFile, EntryParser, Import, ResourceWalker, SourceError, WalkOutput};

use crate::definition::{enum_definition, struct_definition};
use crate::docs::{doc_block, item_attrs};
use crate::operation::{RouteOperation, parse_operation};
use crate::resolve::{ModuleResolver, module_dir};

/// Reads Rust sources: the entry file's `//!`/`///` blocks and `mod`
/// declarations, and the handlers and types of every module it declares.
#[derive(Debug, Default)]
pub struct RustSourceFrontend {
    resolver: ModuleResolver,
    visited: HashSet<PathBuf>,
}

impl RustSourceFrontend {
    /// `search_roots` are tried, in order, for modules not found next to
    /// their declaration.
    pub fn new(search_roots: Vec<PathBuf>) -> Self {
        Self {
            resolver: ModuleResolver::new(search_roots),
            visited: HashSet::new(),
        }
    }

    /// A file loaded through `#[path]` owns its directory, like a `mod.rs`.
    fn walk_file(&mut self, path: &Path, via_path_attr: bool) -> Result<WalkOutput, SourceError> {
        debug!("walking {}", path.display());
        let file = read_source(path)?;
        let file_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let mut out = WalkOutput::default();
        let mod_dir = module_dir(path, via_path_attr);
        self.walk_items(&file.items, &mod_dir, &file_dir, &mut out)?;
        Ok(out)
    }

    fn walk_items(
        &mut self,
        items: &[Item],
        mod_dir: &Path,
        file_dir: &Path,
        out: &mut WalkOutput,
    ) -> Result<(), SourceError> {
        for item in items {
            match item {
                Item::Fn(f) => {
                    if let Some(route) = parse_operation(&f.sig.ident.to_string(), &f.attrs) {
                        add_operation(out, route);
                    }
                }
                Item::Impl(block) => {
                    for impl_item in &block.items {
                        let ImplItem::Fn(f) = impl_item else {
                            continue;
                        };
                        if let Some(route) = parse_operation(&f.sig.ident.to_string(), &f.attrs) {
                            add_operation(out, route);
                        }
                    }
                }
                Item::Struct(s) => {
                    if let Some((name, schema)) = struct_definition(s) {
                        add_definition(out, name, schema);
                    }
                }
                Item::Enum(e) => {
                    if let Some((name, schema)) = enum_definition(e) {
                        add_definition(out, name, schema);
                    }
                }
                Item::Mod(m) => match &m.content {
                    Some((_, content)) => {
                        // `#[path]` inside an inline module is relative to the module's directory.
                        let child_dir = mod_dir.join(m.ident.to_string());
                        self.walk_items(content, &child_dir, &child_dir, out)?;
                    }
                    None => {
                        let nested = self.walk(&mod_import(m, mod_dir, file_dir))?;
                        out.extend(nested);
                    }
                },
                _ => {}
            }
        }
        Ok(())
    }
}

impl EntryParser for RustSourceFrontend {
    fn parse_entry(&mut self, path: &Path) -> Result<EntryFile, SourceError> {
        let file = read_source(path)?;
        let file_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let mod_dir = module_dir(path, true);

        let comments = std::iter::once(file.attrs.as_slice())
            .chain(file.items.iter().map(item_attrs))
            .filter_map(doc_block)
            .collect();
        let imports = file
            .items
            .iter()
            .filter_map(|item| match item {
                Item::Mod(m) if m.content.is_none() => Some(mod_import(m, &mod_dir, &file_dir)),
                _ => None,
            })
            .collect();

        Ok(EntryFile { comments, imports })
    }
}

impl ResourceWalker for RustSourceFrontend {
    fn walk(&mut self, import: &Import) -> Result<WalkOutput, SourceError> {
        let path = self.resolver.resolve(import)?;
        let canonical = fs::canonicalize(&path).map_err(|source| SourceError::Io {
            path: path.clone(),
            source,
        })?;
        if !self.visited.insert(canonical) {
            debug!("{} already walked", path.display());
            return Ok(WalkOutput::default());
        }
        self.walk_file(&path, import.path_hint.is_some())
    }
}

fn read_source(path: &Path) -> Result<syn::File, SourceError> {
    let source = fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    syn::parse_file(&source).map_err(|err| {
        let start = err.span().start();
        SourceError::Syntax {
            path: path.to_path_buf(),
            message: format!("{err} at line {}, column {}", start.line, start.column + 1),
        }
    })
}

fn mod_import(item: &ItemMod, mod_dir: &Path, file_dir: &Path) -> Import {
    let path_hint = path_attr(&item.attrs);
    Import {
        name: item.ident.to_string(),
        base_dir: if path_hint.is_some() {
            file_dir.to_path_buf()
        } else {
            mod_dir.to_path_buf()
        },
        path_hint,
    }
}

/// The value of `#[path = "..."]`, if present.
fn path_attr(attrs: &[Attribute]) -> Option<String> {
    attrs
        .iter()
        .filter(|a| a.path().is_ident("path"))
        .find_map(|a| match &a.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => Some(s.value()),
                _ => None,
            },
            _ => None,
        })
}

fn add_operation(out: &mut WalkOutput, route: RouteOperation) {
    let RouteOperation {
        path,
        method,
        operation,
    } = route;
    for tag in &operation.tags {
        if !out.tags.contains(tag) {
            out.tags.push(tag.clone());
        }
    }
    let item = out.paths.entry(path.clone()).or_default();
    if item.set_operation(method, operation).is_some() {
        warn!("{} {path} is documented more than once, keeping the last", method.as_str().to_uppercase());
    }
}

fn add_definition(out: &mut WalkOutput, name: String, schema: swagdoc_core::model::Schema) {
    if out.definitions.contains_key(&name) {
        debug!("definition {name} already present, keeping the first");
        return;
    }
    out.definitions.insert(name, schema);
}
