//! Database initialization and store-error classification

pub mod errors;
pub mod init;

pub use errors::*;
pub use init::*;
