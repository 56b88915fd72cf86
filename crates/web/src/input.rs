//! Submission bodies.
//!
//! `POST /update-cobj` takes its fields from a urlencoded form or a JSON
//! object, picked by `Content-Type`. Any other body is left unparsed and
//! submits a record with no fields.

use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use records::RecordFields;
use serde_json::{Map, Value};

use crate::RouteError;

/// Joins the values of a field submitted more than once.
pub const MULTI_VALUE_SEPARATOR: &str = ";";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Form,
    Json,
    Unparsed,
}

fn body_kind(request: &Request) -> BodyKind {
    let Some(content_type) = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return BodyKind::Unparsed;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.as_str() {
        "application/x-www-form-urlencoded" => BodyKind::Form,
        "application/json" => BodyKind::Json,
        _ => BodyKind::Unparsed,
    }
}

/// Reads the record fields out of a submission request.
///
/// A form or JSON body that fails to decode is a [`RouteError::InvalidBody`].
pub(crate) async fn read_fields(request: Request) -> Result<RecordFields, RouteError> {
    match body_kind(&request) {
        BodyKind::Form => {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(request, &())
                .await
                .map_err(|e| RouteError::invalid_body(e.body_text()))?;
            Ok(from_pairs(pairs))
        }
        BodyKind::Json => {
            let Json(object) = Json::<Map<String, Value>>::from_request(request, &())
                .await
                .map_err(|e| RouteError::invalid_body(e.body_text()))?;
            Ok(from_json(object))
        }
        BodyKind::Unparsed => {
            tracing::warn!("Submission body is neither a form nor JSON; submitting empty fields");
            Ok(RecordFields::default())
        }
    }
}

fn slot<'a>(fields: &'a mut RecordFields, key: &str) -> Option<&'a mut Option<String>> {
    match key {
        "name" => Some(&mut fields.name),
        "venue" => Some(&mut fields.venue),
        "date" => Some(&mut fields.date),
        "genre" => Some(&mut fields.genre),
        _ => None,
    }
}

fn append(slot: &mut Option<String>, value: String) {
    match slot {
        Some(existing) => {
            existing.push_str(MULTI_VALUE_SEPARATOR);
            existing.push_str(&value);
        }
        None => *slot = Some(value),
    }
}

/// Collects form pairs. `name[]` counts as `name`; unknown keys are dropped.
fn from_pairs(pairs: Vec<(String, String)>) -> RecordFields {
    let mut fields = RecordFields::default();
    for (key, value) in pairs {
        let key = key.strip_suffix("[]").unwrap_or(&key);
        if let Some(slot) = slot(&mut fields, key) {
            append(slot, value);
        }
    }
    fields
}

fn from_json(mut object: Map<String, Value>) -> RecordFields {
    RecordFields {
        name: object.remove("name").and_then(text),
        venue: object.remove("venue").and_then(text),
        date: object.remove("date").and_then(text),
        genre: object.remove("genre").and_then(text),
    }
}

// Scalars keep their JSON spelling; arrays are joined like repeated form keys.
fn text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(text)
                .collect::<Vec<_>>()
                .join(MULTI_VALUE_SEPARATOR),
        ),
        other => Some(other.to_string()),
    }
}
