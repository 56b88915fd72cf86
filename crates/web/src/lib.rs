//! Custom-object gateway presentation layer.
//!
//! Serves three pages over HTTP and nothing else:
//!
//! | Route | Behaviour |
//! |-------|-----------|
//! | `GET /` | list records, render the listing |
//! | `GET /update-cobj` | render the empty submission form |
//! | `POST /update-cobj` | create a record from a form or JSON body, `303` back to `/` |
//! | any other path or method | `404` error page |
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** The route logic in [`routes`] is a set of plain async
//! functions over [`records::RecordGateway`]; [`server`] adapts them to axum.
//! Every failure ends at the route boundary as a rendered error page
//! ([`RouteError`]); nothing propagates further and the server keeps serving.

pub mod error;
mod input;
pub mod routes;
pub mod server;
pub mod views;

pub use error::{Operation, RouteError, ServerError};
pub use input::MULTI_VALUE_SEPARATOR;
pub use server::{router, App, AppState, Server, REQUEST_ID_HEADER};
