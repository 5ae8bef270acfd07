use crate::error::{AppError, AppResult};
use http::{HeaderName, Method};
use serde::{Serialize, Serializer};
use std::str::FromStr;
use url::Url;

/// Token that stands for "allow anything" in origin, method and header lists
pub const WILDCARD: &str = "*";

/// Origins used by the restrictive preset when none are configured
pub const DEFAULT_RESTRICTIVE_ORIGINS: [&str; 3] = [
    "http://localhost:5173",
    "http://127.0.0.1:5173",
    "http://localhost:3000",
];

/// Either the `*` wildcard or an explicit list of values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowList {
    Any,
    List(Vec<String>),
}

impl AllowList {
    /// Parse a comma-separated list. A `*` anywhere in the list means `Any`.
    pub fn parse(raw: &str) -> Self {
        let entries: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if entries.iter().any(|e| e == WILDCARD) {
            AllowList::Any
        } else {
            AllowList::List(entries)
        }
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AllowList::List(items.into_iter().map(Into::into).collect())
    }

    pub fn is_any(&self) -> bool {
        matches!(self, AllowList::Any)
    }
}

impl Serialize for AllowList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AllowList::Any => serializer.serialize_str(WILDCARD),
            AllowList::List(items) => items.serialize(serializer),
        }
    }
}

/// Named starting points for a CORS policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorsPreset {
    /// Any origin, method and header; no credentials
    Permissive,
    /// Known dashboard origins with credentials and a fixed verb/header set
    Restrictive,
}

impl FromStr for CorsPreset {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(CorsPreset::Permissive),
            "restrictive" => Ok(CorsPreset::Restrictive),
            other => Err(AppError::Configuration(format!(
                "Invalid CORS_PRESET '{}': expected 'permissive' or 'restrictive'",
                other
            ))),
        }
    }
}

/// CORS configuration handed to the HTTP middleware at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorsConfig {
    /// Origins allowed to read responses (`*` for all origins)
    pub allow_origins: AllowList,

    /// Whether cookies and authorization headers may accompany requests
    pub allow_credentials: bool,

    /// Methods allowed in cross-origin requests
    pub allow_methods: AllowList,

    /// Request headers allowed in cross-origin requests
    pub allow_headers: AllowList,

    /// Response headers the browser may expose to scripts
    pub expose_headers: Vec<String>,

    /// How long browsers may cache a preflight answer
    pub max_age_seconds: Option<u64>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self::permissive()
    }
}

impl CorsConfig {
    pub fn from_preset(preset: CorsPreset) -> Self {
        match preset {
            CorsPreset::Permissive => Self::permissive(),
            CorsPreset::Restrictive => Self::restrictive_defaults(),
        }
    }

    /// Allow every origin, method and header. Credentials stay off since
    /// browsers refuse credentialed responses carrying a wildcard origin.
    pub fn permissive() -> Self {
        Self {
            allow_origins: AllowList::Any,
            allow_credentials: false,
            allow_methods: AllowList::Any,
            allow_headers: AllowList::Any,
            expose_headers: vec!["x-request-id".to_string()],
            max_age_seconds: Some(600),
        }
    }

    /// Allow only the given origins, with credentials enabled
    pub fn restrictive<I, S>(origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allow_origins: AllowList::list(origins),
            allow_credentials: true,
            allow_methods: AllowList::list(["GET", "POST", "PUT", "DELETE", "OPTIONS"]),
            allow_headers: AllowList::list(["content-type", "authorization"]),
            expose_headers: vec!["x-request-id".to_string()],
            max_age_seconds: Some(600),
        }
    }

    pub fn restrictive_defaults() -> Self {
        Self::restrictive(DEFAULT_RESTRICTIVE_ORIGINS)
    }

    /// Validate CORS configuration values
    pub fn validate(&self) -> AppResult<()> {
        self.normalized().map(|_| ())
    }

    /// Return a validated copy with origins in serialized form, methods
    /// upper-cased, header names lower-cased and duplicates removed.
    pub fn normalized(&self) -> AppResult<Self> {
        if self.allow_credentials {
            if self.allow_origins.is_any() {
                return Err(AppError::InvalidCorsPolicy(
                    "allow_credentials cannot be combined with a wildcard origin".to_string(),
                ));
            }
            if self.allow_methods.is_any() {
                return Err(AppError::InvalidCorsPolicy(
                    "allow_credentials requires an explicit method list".to_string(),
                ));
            }
            if self.allow_headers.is_any() {
                return Err(AppError::InvalidCorsPolicy(
                    "allow_credentials requires an explicit header list".to_string(),
                ));
            }
        }

        let allow_origins = match &self.allow_origins {
            AllowList::Any => AllowList::Any,
            AllowList::List(origins) => {
                if origins.is_empty() {
                    return Err(AppError::InvalidCorsPolicy(
                        "allow_origins is empty; list origins or use '*'".to_string(),
                    ));
                }
                let normalized = origins
                    .iter()
                    .map(|o| normalize_origin(o))
                    .collect::<AppResult<Vec<_>>>()?;
                AllowList::List(dedup(normalized))
            }
        };

        let allow_methods = match &self.allow_methods {
            AllowList::Any => AllowList::Any,
            AllowList::List(methods) => {
                if methods.is_empty() {
                    return Err(AppError::InvalidCorsPolicy(
                        "allow_methods is empty; list methods or use '*'".to_string(),
                    ));
                }
                let normalized = methods
                    .iter()
                    .map(|m| normalize_method(m))
                    .collect::<AppResult<Vec<_>>>()?;
                AllowList::List(dedup(normalized))
            }
        };

        let allow_headers = match &self.allow_headers {
            AllowList::Any => AllowList::Any,
            AllowList::List(headers) => {
                let normalized = headers
                    .iter()
                    .map(|h| normalize_header(h))
                    .collect::<AppResult<Vec<_>>>()?;
                AllowList::List(dedup(normalized))
            }
        };

        let expose_headers = self
            .expose_headers
            .iter()
            .map(|h| normalize_header(h))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self {
            allow_origins,
            allow_credentials: self.allow_credentials,
            allow_methods,
            allow_headers,
            expose_headers: dedup(expose_headers),
            max_age_seconds: self.max_age_seconds,
        })
    }
}

/// Reduce an origin to `scheme://host[:port]`, rejecting anything with a path
pub fn normalize_origin(raw: &str) -> AppResult<String> {
    // A single trailing `/` parses to the root path; anything more is a path
    let trimmed = raw.trim();
    let invalid = |reason: &str| {
        AppError::InvalidCorsPolicy(format!("invalid origin '{}': {}", raw.trim(), reason))
    };

    let url = Url::parse(trimmed).map_err(|e| invalid(&e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(invalid("scheme must be http or https"));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host"));
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(invalid("credentials are not part of an origin"));
    }
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("an origin has no path, query or fragment"));
    }

    Ok(url.origin().ascii_serialization())
}

fn normalize_method(raw: &str) -> AppResult<String> {
    let upper = raw.trim().to_ascii_uppercase();
    Method::from_bytes(upper.as_bytes())
        .map(|m| m.as_str().to_string())
        .map_err(|_| AppError::InvalidCorsPolicy(format!("invalid method '{}'", raw.trim())))
}

fn normalize_header(raw: &str) -> AppResult<String> {
    HeaderName::from_str(raw.trim())
        .map(|h| h.as_str().to_string())
        .map_err(|_| AppError::InvalidCorsPolicy(format!("invalid header name '{}'", raw.trim())))
}

fn dedup(values: Vec<String>) -> Vec<String> {
    let mut seen = Vec::with_capacity(values.len());
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}
