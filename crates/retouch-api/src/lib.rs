//! Retouch API Library
//!
//! HTTP surface of the image editing service: application state, routes,
//! the `POST /processimage` handler and error-to-response mapping.

mod handlers;
pub mod setup;

pub mod error;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use setup::{build_router, initialize_app};
pub use state::AppState;
