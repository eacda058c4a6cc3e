//! Configuration file formats, command-line overrides and loading

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, warn};

use deplens_core::error::DeplensError;
use crate::analysis::{AnalysisConfig, KNOWN_KEYS};
use crate::ConfigResult;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Pick the format from the file extension
    pub fn from_path(path: &Utf8Path) -> ConfigResult<Self> {
        match path.extension().map(str::to_ascii_lowercase).as_deref() {
            Some("toml") => Ok(Self::Toml),
            Some("json") | Some("conf") => Ok(Self::Json),
            other => Err(DeplensError::ConfigParse {
                path: path.to_string(),
                message: format!(
                    "unsupported file extension '{}' (expected .toml, .json or .conf)",
                    other.unwrap_or("")
                ),
            }),
        }
    }
}

/// Parse configuration text without validating it.
///
/// Unknown keys are logged and ignored. `origin` names the source in errors.
pub fn parse_config(content: &str, format: ConfigFormat, origin: &str) -> ConfigResult<AnalysisConfig> {
    let parse_error = |message: String| DeplensError::ConfigParse {
        path: origin.to_string(),
        message,
    };

    match format {
        ConfigFormat::Toml => {
            let table: toml::Table = toml::from_str(content).map_err(|e| parse_error(e.to_string()))?;
            warn_unknown_keys(table.keys().map(String::as_str), origin);
            toml::from_str(content).map_err(|e| parse_error(e.to_string()))
        },
        ConfigFormat::Json => {
            let value: serde_json::Value =
                serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?;
            match value.as_object() {
                Some(object) => warn_unknown_keys(object.keys().map(String::as_str), origin),
                None => return Err(parse_error("top level must be an object".to_string())),
            }
            serde_json::from_value(value).map_err(|e| parse_error(e.to_string()))
        },
    }
}

fn warn_unknown_keys<'a>(keys: impl Iterator<Item = &'a str>, origin: &str) {
    for key in keys.filter(|key| !KNOWN_KEYS.contains(key)) {
        warn!("Unknown parameter '{}' in {}", key, origin);
    }
}

/// Load and parse a configuration file
pub async fn load_from_file(path: &Utf8Path) -> ConfigResult<AnalysisConfig> {
    let format = ConfigFormat::from_path(path)?;
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| DeplensError::io(format!("Failed to read {}", path), e))?;

    debug!("Loaded configuration from {}", path);
    parse_config(&content, format, path.as_str())
}

/// Values supplied on the command line; each one replaces the file's value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub package_name: Option<String>,
    pub package_version: Option<String>,
    pub repository_url: Option<String>,
    pub test_mode: Option<bool>,
    pub fixture_path: Option<Utf8PathBuf>,
}

impl ConfigOverrides {
    /// Layer these overrides on top of `config`
    pub fn apply(self, config: &mut AnalysisConfig) {
        if let Some(name) = self.package_name {
            config.package_name = name;
        }
        if let Some(version) = self.package_version {
            config.package_version = version;
        }
        if let Some(url) = self.repository_url {
            config.repository_url = url;
        }
        if let Some(test_mode) = self.test_mode {
            config.test_mode = test_mode;
        }
        if let Some(path) = self.fixture_path {
            config.fixture_path = Some(path);
        }
    }
}

/// Main configuration loading interface
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: Utf8PathBuf,
}

impl ConfigLoader {
    /// Create a loader for the configuration file at `path`
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Load the file (if present), apply overrides and validate.
    ///
    /// A missing file is tolerated only when the package name comes from
    /// the overrides; defaults fill in everything else.
    pub async fn load(&self, overrides: ConfigOverrides) -> ConfigResult<AnalysisConfig> {
        let mut config = if self.path.exists() {
            load_from_file(&self.path).await?
        } else if overrides.package_name.is_some() {
            debug!("No configuration at {}, using defaults", self.path);
            AnalysisConfig::default()
        } else {
            return Err(DeplensError::config(
                "config",
                format!("configuration file '{}' not found and no --package given", self.path),
            ));
        };

        overrides.apply(&mut config);
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn utf8(path: std::path::PathBuf) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(path).unwrap()
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Utf8Path::new("a.toml")).unwrap(), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path(Utf8Path::new("a.JSON")).unwrap(), ConfigFormat::Json);
        assert_eq!(ConfigFormat::from_path(Utf8Path::new("a.conf")).unwrap(), ConfigFormat::Json);
        assert!(ConfigFormat::from_path(Utf8Path::new("a.xml")).is_err());
        assert!(ConfigFormat::from_path(Utf8Path::new("config")).is_err());
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config = parse_config("package_name = \"requests\"\n", ConfigFormat::Toml, "test").unwrap();
        assert_eq!(config.package_name, "requests");
        assert_eq!(config.repository_url, "https://pypi.org/pypi");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_parse_full_toml() {
        let toml = r#"
package_name = "flask"
package_version = "2.3.3"
repository_url = "https://mirror.example/pypi"
test_mode = true
fixture_path = "fixtures/flask.txt"
timeout_secs = 5
output_path = "out/flask.mmd"
substring_filter = "dev"
ascii_tree = true
"#;
        let config = parse_config(toml, ConfigFormat::Toml, "test").unwrap();
        assert_eq!(config.package_version, "2.3.3");
        assert!(config.test_mode);
        assert_eq!(config.fixture_path.as_deref(), Some(Utf8Path::new("fixtures/flask.txt")));
        assert_eq!(config.output_path, "out/flask.mmd");
        assert!(config.ascii_tree);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_json_with_unknown_key() {
        let json = r#"{"package_name": "numpy", "max_depth": 3, "test_mode": false}"#;
        let config = parse_config(json, ConfigFormat::Json, "test").unwrap();
        assert_eq!(config.package_name, "numpy");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_config("package_name = ", ConfigFormat::Toml, "bad.toml").unwrap_err(),
            DeplensError::ConfigParse { ref path, .. } if path == "bad.toml"
        ));
        assert!(parse_config("[1, 2]", ConfigFormat::Json, "bad.json").is_err());
        assert!(parse_config(r#"{"test_mode": "yes"}"#, ConfigFormat::Json, "bad.json").is_err());
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config = AnalysisConfig {
            package_name: "flask".to_string(),
            ..AnalysisConfig::default()
        };
        ConfigOverrides {
            package_name: Some("django".to_string()),
            test_mode: Some(true),
            fixture_path: Some(Utf8PathBuf::from("deps.txt")),
            ..ConfigOverrides::default()
        }
        .apply(&mut config);

        assert_eq!(config.package_name, "django");
        assert!(config.test_mode);
        assert_eq!(config.repository_url, "https://pypi.org/pypi");
    }

    #[tokio::test]
    async fn test_loader_reads_and_validates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = utf8(dir.path().join("deplens.toml"));
        fs::write(&path, "package_name = \"requests\"\npackage_version = \"2.25.1\"\n").unwrap();

        let config = ConfigLoader::new(path).load(ConfigOverrides::default()).await.unwrap();
        assert_eq!(config.package_name, "requests");
        assert_eq!(config.package_version, "2.25.1");
    }

    #[tokio::test]
    async fn test_loader_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = utf8(dir.path().join("deplens.json"));
        fs::write(&path, r#"{"package_name": ""}"#).unwrap();

        let error = ConfigLoader::new(path).load(ConfigOverrides::default()).await.unwrap_err();
        assert!(matches!(error, DeplensError::ConfigValidation { .. }));
    }

    #[tokio::test]
    async fn test_loader_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader::new(utf8(dir.path().join("absent.toml")));

        assert!(loader.load(ConfigOverrides::default()).await.is_err());

        let config = loader
            .load(ConfigOverrides {
                package_name: Some("six".to_string()),
                ..ConfigOverrides::default()
            })
            .await
            .unwrap();
        assert_eq!(config.package_name, "six");
    }
}
