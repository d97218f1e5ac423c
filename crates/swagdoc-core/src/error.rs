use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by a source frontend while parsing or walking files.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Syntax { path: PathBuf, message: String },

    #[error("module `{name}` not found (searched: {})", format_searched(.searched))]
    ModuleNotFound {
        name: String,
        searched: Vec<PathBuf>,
    },
}

fn format_searched(searched: &[PathBuf]) -> String {
    searched
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("invalid project path {path}: {source}")]
    InvalidProjectPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("unsupported output format `{0}`, only json and yaml are supported")]
    UnsupportedFormat(String),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to encode YAML: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
