//! Configuration loading tests.
//!
//! These tests feed variables through `Config::from_lookup` so they never
//! touch the process environment.

use corsgate::config::{AllowList, Config, CorsConfig};
use corsgate::error::AppError;
use std::collections::HashMap;

fn load(vars: &[(&str, &str)]) -> Result<Config, AppError> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_lookup(|key| vars.get(key).cloned())
}

/// Test module for preset selection
mod preset_tests {
    use super::*;

    #[test]
    fn test_default_preset_is_permissive() {
        let config = load(&[]).unwrap();
        assert_eq!(config.cors, CorsConfig::permissive());
    }

    #[test]
    fn test_restrictive_preset() {
        let config = load(&[("CORS_PRESET", "restrictive")]).unwrap();
        assert_eq!(config.cors, CorsConfig::restrictive_defaults());
    }

    #[test]
    fn test_unknown_preset() {
        let err = load(&[("CORS_PRESET", "wide-open")]).unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }
}

/// Test module for per-field overrides
mod override_tests {
    use super::*;

    #[test]
    fn test_restricted_origins_with_credentials() {
        let config = load(&[
            ("CORS_ALLOW_ORIGINS", "https://app.example.com, https://admin.example.com"),
            ("CORS_ALLOW_CREDENTIALS", "true"),
            ("CORS_ALLOW_METHODS", "get,post"),
            ("CORS_ALLOW_HEADERS", "Content-Type,Authorization"),
        ])
        .unwrap();

        assert!(config.cors.allow_credentials);
        assert_eq!(
            config.cors.allow_origins,
            AllowList::list(["https://app.example.com", "https://admin.example.com"])
        );
        assert_eq!(config.cors.allow_methods, AllowList::list(["GET", "POST"]));
        assert_eq!(
            config.cors.allow_headers,
            AllowList::list(["content-type", "authorization"])
        );
    }

    #[test]
    fn test_wildcard_origin_with_credentials_rejected() {
        let err = load(&[("CORS_ALLOW_CREDENTIALS", "true")]).unwrap_err();
        assert!(matches!(err, AppError::InvalidCorsPolicy(_)));
    }

    #[test]
    fn test_restrictive_preset_with_wildcard_origin_rejected() {
        let err = load(&[("CORS_PRESET", "restrictive"), ("CORS_ALLOW_ORIGINS", "*")]).unwrap_err();
        assert!(matches!(err, AppError::InvalidCorsPolicy(_)));
    }

    #[test]
    fn test_restrictive_preset_without_credentials_accepts_wildcard_origin() {
        let config = load(&[
            ("CORS_PRESET", "restrictive"),
            ("CORS_ALLOW_ORIGINS", "*"),
            ("CORS_ALLOW_CREDENTIALS", "false"),
        ])
        .unwrap();
        assert!(config.cors.allow_origins.is_any());
    }

    #[test]
    fn test_invalid_bool() {
        let err = load(&[("CORS_ALLOW_CREDENTIALS", "yes")]).unwrap_err();
        assert!(err.to_string().contains("CORS_ALLOW_CREDENTIALS"));
    }

    #[test]
    fn test_origin_with_path_rejected() {
        let err = load(&[("CORS_ALLOW_ORIGINS", "http://localhost:5173/app")]).unwrap_err();
        assert!(matches!(err, AppError::InvalidCorsPolicy(_)));
    }

    #[test]
    fn test_empty_origin_list_rejected() {
        assert!(load(&[("CORS_ALLOW_ORIGINS", " , ")]).is_err());
    }

    #[test]
    fn test_max_age() {
        let config = load(&[("CORS_MAX_AGE_SECONDS", "7200")]).unwrap();
        assert_eq!(config.cors.max_age_seconds, Some(7200));

        let config = load(&[("CORS_MAX_AGE_SECONDS", "")]).unwrap();
        assert_eq!(config.cors.max_age_seconds, None);

        assert!(load(&[("CORS_MAX_AGE_SECONDS", "-1")]).is_err());
    }

    #[test]
    fn test_expose_headers() {
        let config = load(&[("CORS_EXPOSE_HEADERS", "X-Request-Id, X-Total-Count")]).unwrap();
        assert_eq!(
            config.cors.expose_headers,
            vec!["x-request-id".to_string(), "x-total-count".to_string()]
        );

        assert!(load(&[("CORS_EXPOSE_HEADERS", "*")]).is_err());
    }
}

/// Test module for server settings
mod server_tests {
    use super::*;

    #[test]
    fn test_server_overrides() {
        let config = load(&[("SERVER_HOST", "0.0.0.0"), ("SERVER_PORT", "9000")]).unwrap();
        assert_eq!(config.server.addr(), "0.0.0.0:9000");
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("SERVER_PORT", "70000")]).unwrap_err();
        assert!(err.to_string().contains("SERVER_PORT"));
    }
}
