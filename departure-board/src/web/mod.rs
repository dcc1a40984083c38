//! Web layer for the departure board.
//!
//! A small JSON API over the nearest-station snapshot service.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::{AppState, LiveService, SharedCatalog};
