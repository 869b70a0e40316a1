//! Web layer for the transit companion service.
//!
//! Provides HTTP endpoints for route queries, station lookup and user
//! wallets, and serves the static front-end.

mod dto;
mod routes;
mod state;

#[cfg(test)]
mod routes_tests;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
