//! Gateway configuration.
//!
//! A [`GatewayConfig`] is built once at process start from validated parts and
//! handed to the gateway implementation. Nothing reads configuration from the
//! environment after that point.

use crate::{ConfigError, ObjectTypeId};

/// Default CRM API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.hubapi.com";

// ---------------------------------------------------------------------------
// Base URL
// ---------------------------------------------------------------------------

/// Absolute base URL of the CRM API, stored without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Parses a base URL.
    ///
    /// Accepts only absolute `http://` or `https://` URLs with a host part.
    /// Trailing slashes are removed so paths can be appended with `/`.
    pub fn parse(value: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = value.into();
        let trimmed = raw.trim().trim_end_matches('/');

        let rest = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"));

        match rest {
            Some(host) if !host.is_empty() && !host.contains(char::is_whitespace) => {
                Ok(Self(trimmed.to_string()))
            }
            _ => Err(ConfigError::InvalidBaseUrl { value: raw }),
        }
    }

    /// Returns the URL as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BaseUrl {
    fn default() -> Self {
        Self(DEFAULT_API_BASE_URL.to_string())
    }
}

impl std::fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Credential
// ---------------------------------------------------------------------------

/// Static bearer credential for the CRM (a private-app access token).
///
/// Has no `Display` impl and `Debug` prints a placeholder.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Wraps a token, returning `None` if it is blank.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let v = value.into();
        if v.trim().is_empty() {
            None
        } else {
            Some(Self(v))
        }
    }

    /// Returns the raw token for building the `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiToken(***)")
    }
}

// ---------------------------------------------------------------------------
// Gateway configuration
// ---------------------------------------------------------------------------

/// Immutable configuration for a record gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// CRM API base URL.
    pub base_url: BaseUrl,
    /// Bearer credential sent on every call.
    pub token: ApiToken,
    /// Custom-object type the gateway reads and writes.
    pub object_type: ObjectTypeId,
}

impl GatewayConfig {
    /// Creates a configuration from already-validated parts.
    pub fn new(base_url: BaseUrl, token: ApiToken, object_type: ObjectTypeId) -> Self {
        Self {
            base_url,
            token,
            object_type,
        }
    }

    /// Builds a configuration from raw strings, validating each part.
    ///
    /// A [`ConfigError::Missing`] names the environment variable to fix.
    pub fn from_raw(
        base_url: &str,
        token: &str,
        object_type: &str,
    ) -> Result<Self, ConfigError> {
        let base_url = BaseUrl::parse(base_url)?;
        let token = ApiToken::new(token).ok_or(ConfigError::Missing {
            name: "HUBSPOT_API_KEY",
        })?;
        let object_type = ObjectTypeId::new(object_type).ok_or(ConfigError::Missing {
            name: "CUSTOM_OBJECT_ID",
        })?;

        Ok(Self::new(base_url, token, object_type))
    }

    /// Returns the objects collection URL: `{base}/crm/v3/objects/{object_type}`.
    pub fn objects_url(&self) -> String {
        format!(
            "{}/crm/v3/objects/{}",
            self.base_url.as_str(),
            self.object_type.as_str()
        )
    }
}
