//! Errors raised while constructing the CRM client.
//!
//! Call-time failures are [`records::UpstreamError`]; this type only covers
//! setup.

use thiserror::Error;

/// Failure to build a [`crate::HubSpotClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The underlying HTTP client could not be constructed (e.g. TLS backend
    /// initialisation failed).
    #[error("Failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}
