//! HTTP server: axum router, handlers, and the accept loop.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{HeaderName, HeaderValue};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use records::RecordGateway;
use tower::{Layer, ServiceBuilder};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::routes::{self, SeeOther, FORM_PATH, HOME_PATH};
use crate::{input, views};
use crate::{RouteError, ServerError};

/// Header carrying the per-request id, set on the request and echoed on the response.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Shared application state: the gateway, nothing else.
#[derive(Clone)]
pub struct AppState {
    gateway: Arc<dyn RecordGateway>,
}

impl AppState {
    /// Creates state around `gateway`.
    pub fn new(gateway: Arc<dyn RecordGateway>) -> Self {
        Self { gateway }
    }
}

/// The complete HTTP service: the router behind trailing-slash normalisation.
pub type App = NormalizePath<Router>;

/// Builds the application.
///
/// `GET /`, `GET /update-cobj`, `POST /update-cobj`; every other path or
/// method is a 404 error page. A trailing slash is ignored, so
/// `/update-cobj/` serves the form too.
pub fn router(gateway: Arc<dyn RecordGateway>) -> App {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let router = Router::new()
        .route(HOME_PATH, get(home))
        .route(FORM_PATH, get(submission_form).post(submit))
        .method_not_allowed_fallback(not_found)
        .fallback(not_found)
        .with_state(AppState::new(gateway))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), NewRequestId))
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(PropagateRequestIdLayer::new(request_id)),
        );

    // Router layers run after routing; path normalisation has to sit outside.
    NormalizePathLayer::trim_trailing_slash().layer(router)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn home(State(state): State<AppState>) -> Result<Html<String>, RouteError> {
    let view = routes::home(state.gateway.as_ref()).await?;
    views::render(&view)
}

async fn submission_form() -> Result<Html<String>, RouteError> {
    views::render(&routes::submission_form())
}

async fn submit(State(state): State<AppState>, request: Request) -> Result<SeeOther, RouteError> {
    let fields = input::read_fields(request).await?;
    routes::submit(state.gateway.as_ref(), fields).await
}

async fn not_found() -> RouteError {
    routes::not_found()
}

impl IntoResponse for SeeOther {
    fn into_response(self) -> Response {
        Redirect::to(self.location).into_response()
    }
}

// ---------------------------------------------------------------------------
// Request ids and tracing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
struct NewRequestId;

impl MakeRequestId for NewRequestId {
    fn make_request_id<B>(
        &mut self,
        _request: &Request<B>,
    ) -> Option<tower_http::request_id::RequestId> {
        let id = records::RequestId::new_random().to_string();
        HeaderValue::from_str(&id)
            .ok()
            .map(tower_http::request_id::RequestId::new)
    }
}

fn request_span(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
    app: App,
}

impl Server {
    /// Creates a server that will listen on `addr` and serve `gateway`'s records.
    pub fn new(addr: SocketAddr, gateway: Arc<dyn RecordGateway>) -> Self {
        Self {
            addr,
            app: router(gateway),
        }
    }

    /// Binds the listen address and serves until Ctrl+C or SIGTERM.
    ///
    /// In-flight requests are allowed to finish before this returns.
    pub async fn run(self) -> Result<(), ServerError> {
        let listener = tokio::net::TcpListener::bind(self.addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: self.addr,
                source,
            })?;

        let local = listener.local_addr().unwrap_or(self.addr);
        tracing::info!(addr = %local, "Server is running on http://{local}");

        let service = axum::ServiceExt::<Request>::into_make_service(self.app);
        axum::serve(listener, service)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(ServerError::Serve)?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
