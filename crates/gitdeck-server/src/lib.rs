//! gitdeck-server library
//!
//! This module exports the router, handlers and configuration of the
//! `gitdeck` binary for use in integration tests.

pub mod config;
pub mod error;
pub mod handlers;
pub mod server;

pub use config::{Config, ConfigError};
pub use error::ApiError;
pub use server::{AppState, router, serve};
