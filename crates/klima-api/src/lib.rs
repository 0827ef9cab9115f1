//! Klima API Library
//!
//! This crate provides the HTTP handlers, error mapping and application setup
//! of the pass service.

mod api_doc;
pub mod constants;
mod handlers;
pub mod services;
pub mod setup;

pub mod error;
pub mod state;

pub use error::{ErrorResponse, HttpAppError};
pub use state::AppState;
