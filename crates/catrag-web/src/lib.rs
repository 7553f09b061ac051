//! Single-page question UI and JSON API over the query service.

mod error;
mod handlers;
mod page;
mod router;
mod server;

pub use error::WebError;
pub use router::build_router;
pub use server::{AppState, WebServer};
