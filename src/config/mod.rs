pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_socket_addr, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use toml_config::TomlConfig;

pub const DEFAULT_MODEL_PATH: &str = "models/best_model.json";
pub const DEFAULT_BIND: &str = "127.0.0.1:8501";

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "titanic-survival")]
#[command(about = "Interactive Titanic survival prediction page")]
pub struct CliConfig {
    /// Path to an optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Path to the classifier artifact (JSON)
    #[arg(long)]
    pub model_path: Option<String>,

    /// Socket address to serve the page on
    #[arg(long)]
    pub bind: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

/// Effective settings after merging the config file with command line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub model_path: String,
    pub bind: String,
    pub verbose: bool,
    pub json_logs: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: DEFAULT_MODEL_PATH.to_string(),
            bind: DEFAULT_BIND.to_string(),
            verbose: false,
            json_logs: false,
        }
    }
}

impl AppConfig {
    /// 命令列參數優先於設定檔，設定檔優先於預設值
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        Ok(Self::merge(cli, &file))
    }

    pub fn merge(cli: &CliConfig, file: &TomlConfig) -> Self {
        let defaults = Self::default();
        Self {
            model_path: cli
                .model_path
                .clone()
                .or_else(|| file.model_path().map(str::to_string))
                .unwrap_or(defaults.model_path),
            bind: cli
                .bind
                .clone()
                .or_else(|| file.bind().map(str::to_string))
                .unwrap_or(defaults.bind),
            verbose: cli.verbose || file.verbose().unwrap_or(false),
            json_logs: cli.json_logs || file.json_logs().unwrap_or(false),
        }
    }
}

impl ConfigProvider for AppConfig {
    fn model_path(&self) -> &str {
        &self.model_path
    }

    fn bind_address(&self) -> &str {
        &self.bind
    }

    fn verbose(&self) -> bool {
        self.verbose
    }

    fn json_logs(&self) -> bool {
        self.json_logs
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_path("model.path", &self.model_path)?;
        validate_socket_addr("server.bind", &self.bind)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file_or_flags() {
        let config = AppConfig::resolve(&CliConfig::default()).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = TomlConfig::from_toml_str(
            r#"
[server]
bind = "0.0.0.0:9000"

[model]
path = "from-file.json"

[logging]
json = true
"#,
        )
        .unwrap();

        let cli = CliConfig {
            model_path: Some("from-cli.json".to_string()),
            ..CliConfig::default()
        };

        let config = AppConfig::merge(&cli, &file);
        assert_eq!(config.model_path, "from-cli.json");
        assert_eq!(config.bind, "0.0.0.0:9000");
        assert!(config.json_logs);
        assert!(!config.verbose);
    }

    #[test]
    fn test_parse_cli_flags() {
        let cli = CliConfig::parse_from([
            "titanic-survival",
            "--model-path",
            "m.json",
            "--bind",
            "127.0.0.1:9999",
            "-v",
        ]);
        assert_eq!(cli.model_path.as_deref(), Some("m.json"));
        assert_eq!(cli.bind.as_deref(), Some("127.0.0.1:9999"));
        assert!(cli.verbose);
    }

    #[test]
    fn test_invalid_bind_fails_validation() {
        let config = AppConfig {
            bind: "not-an-address".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_config_file_is_config_error() {
        let cli = CliConfig {
            config: Some("/definitely/not/here.toml".to_string()),
            ..CliConfig::default()
        };
        assert!(matches!(
            AppConfig::resolve(&cli),
            Err(crate::utils::error::AppError::ConfigError { .. })
        ));
    }
}
