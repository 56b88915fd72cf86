//! Route and server errors.
//!
//! [`RouteError`] is what a route function returns when it cannot produce its
//! page. It never escapes a handler: [`IntoResponse`] turns every variant into
//! the rendered error view with the status from [`RouteError::status`].

use std::net::SocketAddr;

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use records::UpstreamError;
use thiserror::Error;

use crate::views::ErrorView;

// ---------------------------------------------------------------------------
// Route errors
// ---------------------------------------------------------------------------

/// Which gateway operation an [`RouteError::Upstream`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Listing records for the homepage.
    List,
    /// Creating a record from the submission form.
    Create,
}

impl Operation {
    /// The generic message shown to the user when this operation fails.
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::List => "Failed to fetch music events",
            Self::Create => "Failed to create music event",
        }
    }
}

/// A request that could not be served normally.
#[derive(Debug, Error)]
pub enum RouteError {
    /// The CRM call behind the route failed.
    #[error("{message}: {source}", message = .operation.failure_message())]
    Upstream {
        /// The gateway operation that failed.
        operation: Operation,
        /// The upstream failure.
        #[source]
        source: UpstreamError,
    },

    /// No route matches the request path and method.
    #[error("Page not found")]
    NotFound,

    /// A form or JSON submission body could not be decoded.
    #[error("Invalid submission body: {reason}")]
    InvalidBody {
        /// Why decoding failed.
        reason: String,
    },

    /// A view template failed to render.
    #[error("Failed to render view: {0}")]
    Render(#[from] askama::Error),
}

impl RouteError {
    /// Wraps an upstream failure of `operation`.
    pub fn upstream(operation: Operation, source: UpstreamError) -> Self {
        Self::Upstream { operation, source }
    }

    /// Wraps a body decoding failure.
    pub fn invalid_body(reason: impl Into<String>) -> Self {
        Self::InvalidBody {
            reason: reason.into(),
        }
    }

    /// HTTP status the error view is served with.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Upstream { .. } | Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InvalidBody { .. } => StatusCode::BAD_REQUEST,
        }
    }

    /// Message shown on the error view. Never includes upstream detail.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Upstream { operation, .. } => operation.failure_message(),
            Self::NotFound => "Page not found",
            Self::InvalidBody { .. } => "Invalid submission",
            Self::Render(_) => "Something went wrong",
        }
    }

    fn log(&self) {
        match self {
            Self::Upstream { operation, source } => tracing::error!(
                error = %source,
                upstream_status = source.status(),
                upstream_body = source.body(),
                "{}",
                operation.failure_message()
            ),
            Self::NotFound => tracing::debug!("No route matched"),
            Self::InvalidBody { reason } => {
                tracing::warn!(reason = %reason, "Rejected submission body")
            }
            Self::Render(e) => tracing::error!(error = %e, "Failed to render view"),
        }
    }
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        self.log();

        let status = self.status();
        let view = ErrorView::new(self.user_message());
        match view.render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to render error view");
                (status, self.user_message()).into_response()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Server errors
// ---------------------------------------------------------------------------

/// Failure to start or run the HTTP server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The listen address could not be bound.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// Address the server tried to listen on.
        addr: SocketAddr,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The accept loop terminated with an IO error.
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}
