//! # portal
//!
//! Transport-agnostic core of the agriboard dashboard client.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser app (`client`) and the operator CLI (`cli`) both drive the
//! remote agricultural management API through this crate. Each supplies a
//! [`Transport`] for its platform; everything above the wire lives here:
//!
//! - [`http`]: request model and the refresh-once-on-401 client
//! - [`session`]: the shared session store (current user, roles, permissions)
//! - [`guard`]: route gating decisions driven by session state
//! - [`routes`]: the static route table of the dashboard
//! - [`pagination`] / [`resources`]: cursor-paginated listings and mutations
//!
//! Everything is single-threaded async: futures are `!Send` so the same code
//! runs on the WASM event loop and inside a native `block_on`.

pub mod config;
pub mod error;
pub mod guard;
pub mod http;
pub mod pagination;
pub mod resources;
pub mod routes;
pub mod session;
pub mod types;

#[cfg(test)]
mod testing;

pub use config::ClientConfig;
pub use error::{ApiError, FieldErrors};
pub use guard::{Navigation, Redirect};
pub use http::{ApiRequest, HttpClient, Method, RawResponse, Transport};
pub use pagination::{Cursor, InfiniteQuery, ListQuery, Page};
pub use routes::{RouteMeta, RouteName};
pub use session::{AuthOutcome, Session, SessionState, SessionStatus};
pub use types::{AuthResponse, Credentials, Registration, User};
