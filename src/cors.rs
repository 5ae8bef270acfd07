//! Conversion of a [`CorsConfig`] into the `tower-http` CORS middleware.
//!
//! Origin matching, preflight answers and header injection are all done by
//! [`CorsLayer`]; this module only validates the policy and translates each
//! field into the layer's types.

use crate::config::{AllowList, CorsConfig};
use crate::error::{AppError, AppResult};
use http::{HeaderName, HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer, ExposeHeaders};

/// Build the CORS layer for the given policy.
///
/// # Errors
///
/// Returns `AppError::InvalidCorsPolicy` if the policy fails validation, for
/// example credentials combined with a wildcard origin. `CorsLayer` panics on
/// such combinations, so they are rejected here first.
pub fn build_cors_layer(config: &CorsConfig) -> AppResult<CorsLayer> {
    let config = config.normalized()?;

    let allow_origin = match &config.allow_origins {
        AllowList::Any => AllowOrigin::from(Any),
        AllowList::List(origins) => AllowOrigin::list(
            origins
                .iter()
                .map(|o| HeaderValue::from_str(o).map_err(|_| invalid("origin", o)))
                .collect::<AppResult<Vec<_>>>()?,
        ),
    };

    let allow_methods = match &config.allow_methods {
        AllowList::Any => AllowMethods::from(Any),
        AllowList::List(methods) => AllowMethods::list(
            methods
                .iter()
                .map(|m| Method::from_bytes(m.as_bytes()).map_err(|_| invalid("method", m)))
                .collect::<AppResult<Vec<_>>>()?,
        ),
    };

    let allow_headers = match &config.allow_headers {
        AllowList::Any => AllowHeaders::from(Any),
        AllowList::List(headers) => AllowHeaders::list(header_names(headers)?),
    };

    let mut layer = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(allow_methods)
        .allow_headers(allow_headers)
        .allow_credentials(config.allow_credentials);

    if !config.expose_headers.is_empty() {
        layer = layer.expose_headers(ExposeHeaders::list(header_names(&config.expose_headers)?));
    }

    if let Some(secs) = config.max_age_seconds {
        layer = layer.max_age(Duration::from_secs(secs));
    }

    tracing::debug!(
        origins = ?config.allow_origins,
        credentials = config.allow_credentials,
        methods = ?config.allow_methods,
        headers = ?config.allow_headers,
        "Built CORS layer"
    );

    Ok(layer)
}

fn header_names(names: &[String]) -> AppResult<Vec<HeaderName>> {
    names
        .iter()
        .map(|h| HeaderName::from_bytes(h.as_bytes()).map_err(|_| invalid("header name", h)))
        .collect()
}

fn invalid(kind: &str, value: &str) -> AppError {
    AppError::InvalidCorsPolicy(format!("invalid {} '{}'", kind, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permissive_layer_builds() {
        assert!(build_cors_layer(&CorsConfig::permissive()).is_ok());
    }

    #[test]
    fn test_restrictive_layer_builds() {
        assert!(build_cors_layer(&CorsConfig::restrictive_defaults()).is_ok());
    }

    #[test]
    fn test_credentials_with_wildcard_is_an_error_not_a_panic() {
        let config = CorsConfig {
            allow_credentials: true,
            ..CorsConfig::permissive()
        };
        let err = build_cors_layer(&config).unwrap_err();
        assert!(matches!(err, AppError::InvalidCorsPolicy(_)));
    }
}
