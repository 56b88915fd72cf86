//! The record gateway port.
//!
//! [`RecordGateway`] is the one seam between the presentation layer and the
//! CRM. The `hubspot` crate implements it over HTTP; tests implement it in
//! memory.

use async_trait::async_trait;

use crate::{Record, RecordFields, UpstreamError};

/// Reads and appends records of one custom-object type.
///
/// Each call performs exactly one outbound request. Implementations must not
/// retry, cache, or validate input; the CRM is the authority on every record.
#[async_trait]
pub trait RecordGateway: Send + Sync {
    /// Lists the records of the configured object type.
    ///
    /// Returns the CRM's result list unmodified and in the order received.
    /// Only the first page is returned.
    async fn list_records(&self) -> Result<Vec<Record>, UpstreamError>;

    /// Creates one record from `fields`.
    ///
    /// The fields are forwarded as-is; an empty or missing value is the CRM's
    /// to accept or reject.
    async fn create_record(&self, fields: RecordFields) -> Result<(), UpstreamError>;
}
