//! HTTP server mode.
//!
//! Serves the display payload for one address, so a display can poll for
//! it instead of having it pushed.

mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
