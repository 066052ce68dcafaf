//! Runtime configuration, read once from the environment at startup.

use std::env;
use std::path::PathBuf;

/// Development defaults; every value has an environment override.
pub mod defaults {
    pub const HOST: &str = "0.0.0.0";
    pub const PORT: u16 = 10000;
    pub const DB_PATH: &str = "cnaps.db";
    pub const DATA_PATH: &str = "data.json";
    pub const UPLOAD_DIR: &str = "uploads";
    pub const FONTS_DIR: &str = "fonts";
    pub const SMTP_FROM: &str = "no-reply@formation-cnaps.fr";
    pub const OPS_EMAIL: &str = "secretariat@formation-cnaps.fr";
}

/// SMTP settings; present only when `SMTP_HOST` is set.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub from: String,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind host
    pub host: String,
    /// Server bind port
    pub port: u16,
    /// SQLite database holding the dossier table
    pub db_path: PathBuf,
    /// JSON file holding the submission list
    pub data_path: PathBuf,
    /// Directory for uploaded and generated files
    pub upload_dir: PathBuf,
    /// TTF directory used when rendering attestations
    pub fonts_dir: PathBuf,
    /// Notification transport; notifications are disabled when absent
    pub smtp: Option<SmtpConfig>,
    /// Recipient of the internal copy of each notification
    pub ops_email: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `HOST`, `PORT`: bind address (default 0.0.0.0:10000)
    /// - `DB_PATH`: dossier SQLite database (default cnaps.db)
    /// - `DATA_PATH`: submission list JSON file (default data.json)
    /// - `UPLOAD_DIR`: stored file directory (default uploads)
    /// - `FONTS_DIR`: fonts for attestation rendering (default fonts)
    /// - `SMTP_HOST`, `SMTP_USERNAME`, `SMTP_PASSWORD`, `SMTP_FROM`:
    ///   notification transport; without a host, delivery is skipped
    /// - `OPS_EMAIL`: internal copy recipient
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("HOST").unwrap_or_else(|_| defaults::HOST.to_string());
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue("PORT must be a valid port number"))?,
            Err(_) => defaults::PORT,
        };

        let smtp = env::var("SMTP_HOST").ok().map(|smtp_host| SmtpConfig {
            host: smtp_host,
            username: env::var("SMTP_USERNAME").ok(),
            password: env::var("SMTP_PASSWORD").ok(),
            from: env::var("SMTP_FROM").unwrap_or_else(|_| defaults::SMTP_FROM.to_string()),
        });

        Ok(Config {
            host,
            port,
            db_path: path_var("DB_PATH", defaults::DB_PATH),
            data_path: path_var("DATA_PATH", defaults::DATA_PATH),
            upload_dir: path_var("UPLOAD_DIR", defaults::UPLOAD_DIR),
            fonts_dir: path_var("FONTS_DIR", defaults::FONTS_DIR),
            smtp,
            ops_email: env::var("OPS_EMAIL").unwrap_or_else(|_| defaults::OPS_EMAIL.to_string()),
        })
    }

    /// The address the HTTP server binds.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn path_var(name: &str, default: &str) -> PathBuf {
    env::var(name)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            db_path: PathBuf::from("cnaps.db"),
            data_path: PathBuf::from("data.json"),
            upload_dir: PathBuf::from("uploads"),
            fonts_dir: PathBuf::from("fonts"),
            smtp: None,
            ops_email: defaults::OPS_EMAIL.to_string(),
        };

        assert_eq!(config.bind_address(), "127.0.0.1:8080");
    }
}
