//! Route functions.
//!
//! One plain async function per route, independent of any HTTP transport. Each
//! takes the gateway and its parsed input and returns the view to render or a
//! [`RouteError`]. The axum handlers in [`crate::server`] only extract input
//! and turn the result into a response.

use records::{RecordFields, RecordGateway};

use crate::views::{FormView, ListingView};
use crate::{Operation, RouteError};

/// Path of the listing page.
pub const HOME_PATH: &str = "/";
/// Path of the submission form (GET) and its target (POST).
pub const FORM_PATH: &str = "/update-cobj";

/// Result of a successful form submission: send the browser elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeeOther {
    /// Redirect target.
    pub location: &'static str,
}

/// `GET /`: lists the records.
pub async fn home(gateway: &dyn RecordGateway) -> Result<ListingView, RouteError> {
    let records = gateway
        .list_records()
        .await
        .map_err(|e| RouteError::upstream(Operation::List, e))?;

    Ok(ListingView::new(&records))
}

/// `GET /update-cobj`: the empty submission form. No backend call.
pub fn submission_form() -> FormView {
    FormView::default()
}

/// `POST /update-cobj`: creates a record and redirects to the listing.
///
/// `fields` are forwarded as submitted. An empty or missing value is not
/// rejected here; the CRM decides.
pub async fn submit(
    gateway: &dyn RecordGateway,
    fields: RecordFields,
) -> Result<SeeOther, RouteError> {
    gateway
        .create_record(fields)
        .await
        .map_err(|e| RouteError::upstream(Operation::Create, e))?;

    Ok(SeeOther {
        location: HOME_PATH,
    })
}

/// Any other path.
pub fn not_found() -> RouteError {
    RouteError::NotFound
}
