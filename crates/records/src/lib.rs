//! Core domain for the custom-object gateway.
//!
//! This crate contains every domain concept, newtype identifier, shared value
//! type, and error type used throughout the workspace. Infrastructure crates
//! implement the traits defined here; they never add domain rules.
//!
//! ## Architectural Layer
//!
//! **Domain + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; infrastructure crates define *how* to supply it.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`identifiers`] | Newtype identifiers (`ObjectTypeId`, `RecordId`, `RequestId`) |
//! | [`types`] | Record value types (`Record`, `RecordProperties`, `RecordFields`, `Timestamp`) |
//! | [`config`] | Immutable gateway configuration (`GatewayConfig`, `BaseUrl`, `ApiToken`) |
//! | [`errors`] | `UpstreamError` and `ConfigError` |
//! | [`gateway`] | The `RecordGateway` port trait |

pub mod config;
pub mod errors;
pub mod gateway;
pub mod identifiers;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use config::{ApiToken, BaseUrl, GatewayConfig, DEFAULT_API_BASE_URL};
pub use errors::{ConfigError, UpstreamError};
pub use gateway::RecordGateway;
pub use identifiers::{ObjectTypeId, RecordId, RequestId};
pub use types::{Record, RecordFields, RecordProperties, Timestamp, PROPERTY_NAMES};
