use std::path::{Path, PathBuf};

use swagdoc_core::{Import, SourceError};

/// Locates the file behind an out-of-line `mod name;` declaration.
#[derive(Debug, Clone, Default)]
pub struct ModuleResolver {
    search_roots: Vec<PathBuf>,
}

impl ModuleResolver {
    pub fn new(search_roots: Vec<PathBuf>) -> Self {
        Self { search_roots }
    }

    /// Try `#[path]` first if given, otherwise `name.rs` and `name/mod.rs`
    /// next to the declaration, then under each search root (where a vendored
    /// crate's `name/src/lib.rs` also counts).
    pub fn resolve(&self, import: &Import) -> Result<PathBuf, SourceError> {
        let candidates = self.candidates(import);
        if let Some(found) = candidates.iter().find(|p| p.is_file()) {
            return Ok(found.clone());
        }
        Err(SourceError::ModuleNotFound {
            name: import.name.clone(),
            searched: candidates,
        })
    }

    fn candidates(&self, import: &Import) -> Vec<PathBuf> {
        if let Some(hint) = &import.path_hint {
            return vec![import.base_dir.join(hint)];
        }
        let name = &import.name;
        let mut out = vec![
            import.base_dir.join(format!("{name}.rs")),
            import.base_dir.join(name).join("mod.rs"),
        ];
        for root in &self.search_roots {
            out.push(root.join(format!("{name}.rs")));
            out.push(root.join(name).join("mod.rs"));
            out.push(root.join(name).join("src").join("lib.rs"));
        }
        out
    }
}

/// The directory child modules of `file` live in. Crate roots, files loaded
/// through `#[path]` (`owns_dir`), and `mod.rs` files own their directory;
/// any other `foo.rs` owns `foo/`.
pub fn module_dir(file: &Path, owns_dir: bool) -> PathBuf {
    let parent = file.parent().map(Path::to_path_buf).unwrap_or_default();
    let stem = file.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
    if owns_dir || matches!(stem, "mod" | "lib" | "main") {
        parent
    } else {
        parent.join(stem)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn import(name: &str, base_dir: &Path) -> Import {
        Import {
            name: name.to_string(),
            path_hint: None,
            base_dir: base_dir.to_path_buf(),
        }
    }

    #[test]
    fn module_dirs() {
        assert_eq!(module_dir(Path::new("src/main.rs"), true), PathBuf::from("src"));
        assert_eq!(module_dir(Path::new("src/api/mod.rs"), false), PathBuf::from("src/api"));
        assert_eq!(module_dir(Path::new("src/api.rs"), false), PathBuf::from("src/api"));
        assert_eq!(module_dir(Path::new("src/entry.rs"), true), PathBuf::from("src"));
    }

    #[test]
    fn resolves_local_then_search_roots() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        let vendor = dir.path().join("vendor");
        fs::create_dir_all(src.join("users")).unwrap();
        fs::create_dir_all(vendor.join("billing").join("src")).unwrap();
        fs::write(src.join("orders.rs"), "").unwrap();
        fs::write(src.join("users").join("mod.rs"), "").unwrap();
        fs::write(vendor.join("billing").join("src").join("lib.rs"), "").unwrap();

        let resolver = ModuleResolver::new(vec![vendor.clone()]);
        assert_eq!(resolver.resolve(&import("orders", &src)).unwrap(), src.join("orders.rs"));
        assert_eq!(
            resolver.resolve(&import("users", &src)).unwrap(),
            src.join("users").join("mod.rs")
        );
        assert_eq!(
            resolver.resolve(&import("billing", &src)).unwrap(),
            vendor.join("billing").join("src").join("lib.rs")
        );

        let err = resolver.resolve(&import("missing", &src)).unwrap_err();
        match err {
            SourceError::ModuleNotFound { name, searched } => {
                assert_eq!(name, "missing");
                assert_eq!(searched.len(), 5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn path_hint_is_exclusive() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("handlers_v2.rs"), "").unwrap();
        fs::write(dir.path().join("handlers.rs"), "").unwrap();
        let resolver = ModuleResolver::default();
        let mut imp = import("handlers", dir.path());
        imp.path_hint = Some("handlers_v2.rs".to_string());
        assert_eq!(resolver.resolve(&imp).unwrap(), dir.path().join("handlers_v2.rs"));
    }
}
