//! # APR Common Library
//!
//! Shared code for the Annual Program Report services including:
//! - Database initialization and store-error classification
//! - Business codes and localized messages
//! - Configuration loading
//! - Utility functions

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod time;

pub use error::{Error, Result};
