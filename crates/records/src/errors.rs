//! Error types for the custom-object gateway domain.
//!
//! [`UpstreamError`] covers every way a call to the CRM can fail. It is the only
//! error a [`crate::RecordGateway`] returns; presentation-level errors (unknown
//! route, view rendering) are defined by the crate that serves HTTP.
//!
//! [`ConfigError`] is produced while building a [`crate::GatewayConfig`] and
//! never after startup.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Upstream errors
// ---------------------------------------------------------------------------

/// A failed call to the CRM.
///
/// None of these are retried. The caller renders a generic failure page and
/// logs [`UpstreamError::body`] when present; the body is never shown to an
/// end user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// The CRM answered with a non-success status code.
    #[error("CRM responded with HTTP {status}")]
    Status {
        /// HTTP status code returned by the CRM.
        status: u16,
        /// Raw response body, if one could be read.
        body: Option<String>,
    },

    /// The request never produced a response (DNS, connect, TLS, IO).
    #[error("CRM request failed: {message}")]
    Transport {
        /// Description of the transport failure.
        message: String,
    },

    /// The CRM answered with a success status but the body was not the
    /// expected JSON shape.
    #[error("CRM response could not be decoded: {message}")]
    Decode {
        /// Description of the decoding failure.
        message: String,
        /// Raw response body.
        body: Option<String>,
    },
}

impl UpstreamError {
    /// Returns the raw response body the CRM sent back, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } | Self::Decode { body, .. } => body.as_deref(),
            Self::Transport { .. } => None,
        }
    }

    /// Returns the HTTP status the CRM answered with, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Invalid gateway configuration.
///
/// Produced at load time; the server never starts with an invalid config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required value was empty.
    #[error("Configuration error: {name} must not be empty")]
    Missing {
        /// Name of the missing setting (the environment variable name).
        name: &'static str,
    },

    /// The API base URL is not an absolute `http` or `https` URL.
    #[error("Configuration error: invalid API base URL '{value}'")]
    InvalidBaseUrl {
        /// The rejected value.
        value: String,
    },
}
