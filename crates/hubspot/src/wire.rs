//! Request and response bodies of the CRM v3 objects API.
//!
//! Only the members this gateway reads are declared; serde ignores the rest.

use records::{Record, RecordFields};
use serde::{Deserialize, Serialize};

/// Body of `GET /crm/v3/objects/{objectType}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse {
    pub(crate) results: Vec<Record>,
    #[serde(default)]
    pub(crate) paging: Option<Paging>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Paging {
    #[serde(default)]
    pub(crate) next: Option<NextPage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NextPage {
    pub(crate) after: String,
}

/// Body of `POST /crm/v3/objects/{objectType}`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateRequest<'a> {
    pub(crate) properties: &'a RecordFields,
}
