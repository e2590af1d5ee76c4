use std::env;
use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_MODEL_PATH: &str = "model.onnx";

/// Upper bound on a `/predict` body. Eight numbers fit comfortably.
pub const JSON_PAYLOAD_LIMIT: usize = 16 * 1024;

/// Origins allowed to call the API from a browser.
pub const ALLOWED_ORIGINS: &[&str] = &[
    "https://house-price-frontend-eta.vercel.app",
    "http://127.0.0.1:5173",
    "http://localhost:5173",
];

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub model_path: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            workers: num_cpus::get(),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `WORKERS` and `MODEL_PATH` from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = match lookup("PORT") {
            Some(value) => parse_value("PORT", value)?,
            None => defaults.port,
        };
        let workers = match lookup("WORKERS") {
            Some(value) => match parse_value::<usize>("WORKERS", value.clone())? {
                0 => return Err(ConfigError::InvalidValue { key: "WORKERS", value }),
                n => n,
            },
            None => defaults.workers,
        };
        let model_path = lookup("MODEL_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.model_path);

        Ok(Self {
            host,
            port,
            workers,
            model_path,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}
