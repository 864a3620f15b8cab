use config::{Config as ConfigLoader, ConfigError, File};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub generator: GeneratorConfig,
    pub storage: StorageConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            generator: GeneratorConfig::default(),
            storage: StorageConfig::default(),
            cors: CorsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Base URL of the remote generation service.
    pub base_url: String,
    /// Upper bound on one outbound generation call, in seconds.
    pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5001".to_string(),
            timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory generated images are written to; created on startup.
    pub output_dir: String,
    /// Path of the single-document history log.
    pub history_path: String,
    /// Root of the prebuilt single-page frontend.
    pub frontend_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: "static/generated_images".to_string(),
            history_path: "history.json".to_string(),
            frontend_dir: "frontend/build".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub enabled: bool,
    pub origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. Built-in defaults
    /// 2. config/default.toml
    /// 3. config/{ENV}.toml (if ENV is set)
    /// 4. Environment variables (SERVER_PORT, GENERATOR_BASE_URL, ...)
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false));

        let mut cfg: Config = builder.build()?.try_deserialize()?;
        cfg.apply_env_overrides()?;

        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));

        let config = builder.build()?;
        config.try_deserialize()
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("SERVER_PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::Message("SERVER_PORT must be a port number".to_string()))?;
        }
        if let Ok(url) = std::env::var("GENERATOR_BASE_URL") {
            self.generator.base_url = url;
        }
        if let Ok(secs) = std::env::var("GENERATOR_TIMEOUT_SECS") {
            self.generator.timeout_secs = secs.parse().map_err(|_| {
                ConfigError::Message("GENERATOR_TIMEOUT_SECS must be a number".to_string())
            })?;
        }
        if let Ok(dir) = std::env::var("STORAGE_OUTPUT_DIR") {
            self.storage.output_dir = dir;
        }
        if let Ok(path) = std::env::var("STORAGE_HISTORY_PATH") {
            self.storage.history_path = path;
        }
        if let Ok(dir) = std::env::var("STORAGE_FRONTEND_DIR") {
            self.storage.frontend_dir = dir;
        }
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_structure() {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 3000

            [generator]
            base_url = "http://localhost:9000"
            timeout_secs = 30

            [storage]
            output_dir = "out/images"
            history_path = "out/history.json"
            frontend_dir = "web/dist"

            [cors]
            enabled = true
            origins = ["http://localhost:3000"]

            [logging]
            level = "debug"
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.generator.base_url, "http://localhost:9000");
        assert_eq!(config.storage.output_dir, "out/images");
    }

    #[test]
    fn test_defaults_match_documented_values() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.generator.base_url, "http://localhost:5001");
        assert_eq!(config.storage.output_dir, "static/generated_images");
        assert_eq!(config.storage.history_path, "history.json");
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let toml = r#"
            [server]
            port = 8080
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.generator.base_url, "http://localhost:5001");
    }
}
