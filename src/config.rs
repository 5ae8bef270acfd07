mod cors;
mod server;

pub use cors::{AllowList, CorsConfig, CorsPreset};
pub use server::ServerConfig;

use crate::error::{AppError, AppResult};
use serde::Serialize;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let server_port = parse_var(&lookup, "SERVER_PORT", 8000u16)?;

        // CORS config: start from the preset, then apply per-field overrides
        let preset = match lookup("CORS_PRESET") {
            Some(raw) => raw.parse()?,
            None => CorsPreset::Permissive,
        };
        let mut cors = CorsConfig::from_preset(preset);

        if let Some(raw) = lookup("CORS_ALLOW_ORIGINS") {
            cors.allow_origins = AllowList::parse(&raw);
        }
        cors.allow_credentials =
            parse_var(&lookup, "CORS_ALLOW_CREDENTIALS", cors.allow_credentials)?;
        if let Some(raw) = lookup("CORS_ALLOW_METHODS") {
            cors.allow_methods = AllowList::parse(&raw);
        }
        if let Some(raw) = lookup("CORS_ALLOW_HEADERS") {
            cors.allow_headers = AllowList::parse(&raw);
        }
        if let Some(raw) = lookup("CORS_EXPOSE_HEADERS") {
            cors.expose_headers = match AllowList::parse(&raw) {
                AllowList::List(headers) => headers,
                AllowList::Any => {
                    return Err(AppError::Configuration(
                        "CORS_EXPOSE_HEADERS does not accept '*'".to_string(),
                    ))
                }
            };
        }
        if let Some(raw) = lookup("CORS_MAX_AGE_SECONDS") {
            cors.max_age_seconds = if raw.trim().is_empty() {
                None
            } else {
                Some(raw.trim().parse().map_err(|_| {
                    AppError::Configuration("Invalid CORS_MAX_AGE_SECONDS".to_string())
                })?)
            };
        }

        let config = Config {
            server: ServerConfig {
                host: server_host,
                port: server_port,
            },
            cors: cors.normalized()?,
        };

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> AppResult<()> {
        self.server.validate().map_err(AppError::Configuration)?;
        self.cors.validate()
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Configuration(format!("Invalid {}", key))),
        None => Ok(default),
    }
}
