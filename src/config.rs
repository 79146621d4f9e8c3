//! Application configuration
//!
//! Loaded from a TOML file (default `~/.config/hotel-backoffice/config.toml`).
//! Every field has a default, so a partial file is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::shared::errors::InfraError;

/// Root configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub logging: LoggingConfig,
    pub booking: BookingConfig,
    pub documents: DocumentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub api_host: String,
    pub api_port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// Full connection URL; wins over `sqlite_path` when set
    pub url: Option<String>,
    pub sqlite_path: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: None,
            sqlite_path: "./hotel.db".to_string(),
        }
    }
}

impl DatabaseSection {
    pub fn connection_url(&self) -> String {
        match &self.url {
            Some(url) => url.clone(),
            None => format!("sqlite://{}?mode=rwc", self.sqlite_path),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// tracing `EnvFilter` directive, overridden by `RUST_LOG`
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// Booking policy switches
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// Delete the client and payment created by a full booking that
    /// failed afterwards. When off they are left orphaned.
    pub rollback_partial_failures: bool,
    /// Serialize availability check + insert per room inside this process
    pub serialize_room_bookings: bool,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            rollback_partial_failures: true,
            serialize_room_bookings: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    pub hotel_name: String,
    /// Currency code printed next to prices
    pub currency: String,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            hotel_name: "Hotel".to_string(),
            currency: "USD".to_string(),
        }
    }
}

impl AppConfig {
    /// Read and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self, InfraError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| InfraError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, InfraError> {
        toml::from_str(raw).map_err(|e| InfraError::Config(e.to_string()))
    }

    pub fn api_address(&self) -> String {
        format!("{}:{}", self.server.api_host, self.server.api_port)
    }
}

/// `<config dir>/hotel-backoffice/config.toml`, or `./config.toml` when the
/// platform has no config directory.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("hotel-backoffice").join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.server.api_port, 8080);
        assert!(cfg.booking.rollback_partial_failures);
        assert!(cfg.booking.serialize_room_bookings);
        assert_eq!(cfg.database.connection_url(), "sqlite://./hotel.db?mode=rwc");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [server]
            api_port = 9090

            [booking]
            rollback_partial_failures = false

            [documents]
            hotel_name = "Hotel Los Viejos"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.api_port, 9090);
        assert_eq!(cfg.server.api_host, "0.0.0.0");
        assert!(!cfg.booking.rollback_partial_failures);
        assert!(cfg.booking.serialize_room_bookings);
        assert_eq!(cfg.documents.hotel_name, "Hotel Los Viejos");
        assert_eq!(cfg.documents.currency, "USD");
    }

    #[test]
    fn explicit_url_wins() {
        let cfg = AppConfig::from_toml(
            r#"
            [database]
            url = "postgres://localhost/hotel"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.database.connection_url(), "postgres://localhost/hotel");
    }

    #[test]
    fn load_reads_file_and_reports_missing() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nformat = \"json\"").unwrap();
        let cfg = AppConfig::load(file.path()).unwrap();
        assert_eq!(cfg.logging.format, "json");

        let missing = AppConfig::load(Path::new("/definitely/not/here.toml"));
        assert!(matches!(missing, Err(InfraError::Config(_))));
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        assert!(AppConfig::from_toml("server = [").is_err());
    }
}
