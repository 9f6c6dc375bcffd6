use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub bom: BomConfig,
    pub downloader: DownloaderConfig,
    pub interactive: InteractiveConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BomConfig {
    /// Column holding the distributor part numbers
    pub column: String,
    /// `auto` or a single delimiter character
    pub delimiter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloaderConfig {
    pub program: String,
    pub install_hint: String,
}

/// What to ask for when no BOM path is given on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptMode {
    #[default]
    Identifier,
    Bom,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractiveConfig {
    pub enabled: bool,
    pub prompt: PromptMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file_path: Option<String>,
}

impl AppConfig {
    /// Layer defaults, `./bomfetch.*`, an optional explicit file and
    /// `BOMFETCH__SECTION__KEY` environment variables, in that order.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let mut builder = Config::builder()
            .add_source(File::with_name("bomfetch").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder
            .add_source(Environment::with_prefix("BOMFETCH").separator("__"))
            .build()?
            .try_deserialize()
    }
}

impl Default for BomConfig {
    fn default() -> Self {
        Self {
            column: "Supplier Part".to_string(),
            delimiter: "auto".to_string(),
        }
    }
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            program: "easyeda2kicad".to_string(),
            install_hint: "pip install easyeda2kicad".to_string(),
        }
    }
}

impl Default for InteractiveConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            prompt: PromptMode::Identifier,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "text".to_string(),
            file_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.bom.column, "Supplier Part");
        assert_eq!(config.bom.delimiter, "auto");
        assert_eq!(config.downloader.program, "easyeda2kicad");
        assert!(config.interactive.enabled);
        assert_eq!(config.interactive.prompt, PromptMode::Identifier);
    }

    #[test]
    fn test_explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[bom]\ncolumn = \"LCSC\"\n\n[interactive]\nprompt = \"bom\"").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(config.bom.column, "LCSC");
        assert_eq!(config.bom.delimiter, "auto");
        assert_eq!(config.interactive.prompt, PromptMode::Bom);
        assert!(config.interactive.enabled);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
