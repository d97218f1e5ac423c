use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Project configuration loaded from `.swagdoc.yaml`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SwagdocConfig {
    /// Project root; relative paths below are resolved against it.
    pub project: String,
    /// File holding the global `@` annotations and the module declarations.
    pub entry: String,
    pub output: String,
    /// `json` or `yaml`. Kept as text so an unsupported value surfaces as a
    /// generation error rather than a config parse error.
    pub format: String,
    /// Extra directories searched for modules after the project's `vendor/`.
    pub search_roots: Vec<String>,
}

impl Default for SwagdocConfig {
    fn default() -> Self {
        Self {
            project: ".".to_string(),
            entry: "src/main.rs".to_string(),
            output: "docs".to_string(),
            format: "json".to_string(),
            search_roots: Vec::new(),
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".swagdoc.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<SwagdocConfig>, String> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read config {}: {}", path.display(), e))?;
    let config: SwagdocConfig = serde_yaml_ng::from_str(&content)
        .map_err(|e| format!("failed to parse config {}: {}", path.display(), e))?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# swagdoc configuration
project: .
entry: src/main.rs    # holds //! @APIVersion, @Title, ... and the `mod` declarations
output: docs
format: json          # json | yaml

# Directories searched for modules not found next to the declaring file.
# The project's vendor/ directory is always searched first.
search_roots: []
  # - ../shared-handlers
"#
}
