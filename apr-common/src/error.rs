//! Error type shared by the APR crates

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Store failure; see [`Error::is_authorization_failure`]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bad or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Stored data violates an expectation (e.g. a malformed uuid column)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// True when the store refused the operation for lack of rights
    ///
    /// Only database errors qualify; see [`crate::db::is_authorization_failure`].
    pub fn is_authorization_failure(&self) -> bool {
        match self {
            Error::Database(e) => crate::db::is_authorization_failure(e),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_are_not_authorization_failures() {
        assert!(!Error::Config("bad".to_string()).is_authorization_failure());
        assert!(!Error::Database(sqlx::Error::RowNotFound).is_authorization_failure());
    }
}
