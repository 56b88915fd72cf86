//! Custom-object gateway CRM adapter.
//!
//! Implements the [`records::RecordGateway`] trait over the HubSpot CRM v3
//! objects API: a JSON request/response protocol carried on HTTPS and
//! authenticated with a static private-app bearer token.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** URL construction, authentication headers, status
//! handling, and JSON (de)serialisation all live here. The presentation layer
//! sees only [`records::RecordGateway`] and [`records::UpstreamError`].
//!
//! ## Endpoints
//!
//! | Operation | Request |
//! |-----------|---------|
//! | `list_records` | `GET {base}/crm/v3/objects/{objectType}?properties=name,venue,date,genre` |
//! | `create_record` | `POST {base}/crm/v3/objects/{objectType}` with `{"properties": {...}}` |
//!
//! Neither call is retried, paginated, or given a timeout.

mod client;
mod error;
mod wire;

pub use client::HubSpotClient;
pub use error::ClientError;
