//! HTML views.
//!
//! Each view is an `askama` template struct holding a title and whatever the
//! page lists. Templates live in `crates/web/templates/` and share
//! `layout.html`.

use askama::Template;
use axum::response::Html;
use records::Record;

use crate::RouteError;

/// Title of the listing page.
pub const LISTING_TITLE: &str = "Music Events | Integrating With HubSpot I Practicum";
/// Title of the submission form page.
pub const FORM_TITLE: &str = "Update Custom Object Form | Integrating With HubSpot I Practicum";
/// Title of every error page.
pub const ERROR_TITLE: &str = "Error | Integrating With HubSpot I Practicum";

/// Renders `view` into an HTML response body.
pub fn render<T: Template>(view: &T) -> Result<Html<String>, RouteError> {
    Ok(Html(view.render()?))
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// The homepage: one table row per record, in the order the CRM returned them.
#[derive(Debug, Template)]
#[template(path = "homepage.html")]
pub struct ListingView {
    /// Page title.
    pub title: &'static str,
    /// Table rows.
    pub rows: Vec<RecordRow>,
}

impl ListingView {
    /// Builds the listing from records, preserving their order.
    pub fn new(records: &[Record]) -> Self {
        Self {
            title: LISTING_TITLE,
            rows: records.iter().map(RecordRow::from).collect(),
        }
    }
}

/// One record flattened for display. Unset properties render as empty cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRow {
    /// CRM record id, or empty.
    pub id: String,
    /// Event name.
    pub name: String,
    /// Venue.
    pub venue: String,
    /// Date, as stored.
    pub date: String,
    /// Genre.
    pub genre: String,
}

impl From<&Record> for RecordRow {
    fn from(record: &Record) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            id: record
                .id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            name: text(&record.properties.name),
            venue: text(&record.properties.venue),
            date: text(&record.properties.date),
            genre: text(&record.properties.genre),
        }
    }
}

// ---------------------------------------------------------------------------
// Submission form
// ---------------------------------------------------------------------------

/// The empty record submission form.
#[derive(Debug, Template)]
#[template(path = "updates.html")]
pub struct FormView {
    /// Page title.
    pub title: &'static str,
}

impl Default for FormView {
    fn default() -> Self {
        Self { title: FORM_TITLE }
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Generic failure page.
#[derive(Debug, Template)]
#[template(path = "error.html")]
pub struct ErrorView {
    /// Page title.
    pub title: &'static str,
    /// User-facing message.
    pub message: &'static str,
}

impl ErrorView {
    /// Creates an error page showing `message`.
    pub fn new(message: &'static str) -> Self {
        Self {
            title: ERROR_TITLE,
            message,
        }
    }
}
