//! HTTP surface of Mongo Studio
//!
//! [`AppState::route`] is the whole API as a pure async function of
//! `(method, path, query, body)`; [`StudioServer`] wraps it in a hyper
//! accept loop that adds body limits, CORS headers and request logging.

pub mod handlers;
pub mod response;
mod router;
pub mod server;

pub use response::HttpResponse;
pub use router::AppState;
pub use server::StudioServer;
