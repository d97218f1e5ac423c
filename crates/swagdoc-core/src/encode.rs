use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::info;

use crate::error::GenerateError;
use crate::model::Swagger;

/// File name written for JSON output.
pub const JSON_FILE: &str = "swagger.json";
/// File name written for YAML output.
pub const YAML_FILE: &str = "swagger.yaml";

/// Serialization format of the output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Json => JSON_FILE,
            Self::Yaml => YAML_FILE,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            other => Err(GenerateError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Serialize `spec` in the given format.
pub fn encode(spec: &Swagger, format: OutputFormat) -> Result<Vec<u8>, GenerateError> {
    let data = match format {
        OutputFormat::Json => serde_json::to_vec_pretty(spec)?,
        OutputFormat::Yaml => serde_yaml_ng::to_string(spec)?.into_bytes(),
    };
    Ok(data)
}

/// Encode `spec` and write it into `output_dir` under the format's fixed file
/// name. The directory is created if missing. Returns the written path.
pub fn write_output(
    spec: &Swagger,
    output_dir: &Path,
    format: OutputFormat,
) -> Result<PathBuf, GenerateError> {
    let data = encode(spec, format)?;

    fs::create_dir_all(output_dir).map_err(|source| GenerateError::Write {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let path = output_dir.join(format.file_name());
    fs::write(&path, data).map_err(|source| GenerateError::Write {
        path: path.clone(),
        source,
    })?;
    set_readable(&path)?;

    info!("wrote {}", path.display());
    Ok(path)
}

#[cfg(unix)]
fn set_readable(path: &Path) -> Result<(), GenerateError> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o644)).map_err(|source| {
        GenerateError::Write {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(not(unix))]
fn set_readable(_path: &Path) -> Result<(), GenerateError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_supported_formats() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("yaml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
    }

    #[test]
    fn rejects_other_formats() {
        let err = "xml".parse::<OutputFormat>().unwrap_err();
        assert!(matches!(err, GenerateError::UnsupportedFormat(ref f) if f == "xml"));
        assert!(err.to_string().contains("xml"));
        assert!("JSON".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn json_has_top_level_keys() {
        let data = encode(&Swagger::new(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&data).unwrap();
        assert_eq!(value["swagger"], "2.0");
        assert!(value.get("info").is_some());
        assert!(value["paths"].is_object());
        assert!(value["definitions"].is_object());
        assert!(value.get("host").is_none());
    }

    #[test]
    fn yaml_round_trips() {
        let mut spec = Swagger::new();
        spec.info.title = "Store".to_string();
        spec.host = "api.example.com".to_string();
        let data = encode(&spec, OutputFormat::Yaml).unwrap();
        let back: Swagger = serde_yaml_ng::from_str(std::str::from_utf8(&data).unwrap()).unwrap();
        assert_eq!(back, spec);
    }

    #[test]
    fn writes_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("docs");
        let path = write_output(&Swagger::new(), &out, OutputFormat::Yaml).unwrap();
        assert_eq!(path, out.join("swagger.yaml"));
        assert!(path.exists());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o644);
        }
    }
}
