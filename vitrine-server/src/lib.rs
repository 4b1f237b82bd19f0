//! HTTP layer for the vitrine gallery.
//!
//! Two surfaces share one router: unauthenticated public reads of the
//! published catalog, and an admin API behind HTTP Basic auth that owns
//! every mutation.

pub mod auth;
pub mod errors;
pub mod handlers;
pub mod infra;
pub mod routes;

pub use errors::{AppError, AppResult};
pub use infra::app_state::AppState;
pub use infra::config::Config;

#[cfg(test)]
mod tests;
