//! Classification of store failures
//!
//! SQLite reports refused operations through a small set of primary result
//! codes. Extended result codes carry the primary code in their low byte.

/// SQLITE_PERM: access permission denied
const SQLITE_PERM: i32 = 3;
/// SQLITE_READONLY: attempt to write a readonly database
const SQLITE_READONLY: i32 = 8;
/// SQLITE_AUTH: authorization denied
const SQLITE_AUTH: i32 = 23;

/// True when the store refused the operation as an authorization failure
pub fn is_authorization_failure(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .and_then(|code| code.parse::<i32>().ok())
            .map(is_authorization_code)
            .unwrap_or(false),
        _ => false,
    }
}

/// True when a (possibly extended) SQLite result code denotes an authorization failure
pub fn is_authorization_code(code: i32) -> bool {
    matches!(code & 0xff, SQLITE_PERM | SQLITE_READONLY | SQLITE_AUTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_codes() {
        assert!(is_authorization_code(3));
        assert!(is_authorization_code(8));
        assert!(is_authorization_code(23));
        assert!(!is_authorization_code(1));
        assert!(!is_authorization_code(19));
    }

    #[test]
    fn test_extended_codes() {
        // SQLITE_READONLY_DBMOVED
        assert!(is_authorization_code(1032));
        // SQLITE_AUTH_USER
        assert!(is_authorization_code(279));
        // SQLITE_CONSTRAINT_FOREIGNKEY
        assert!(!is_authorization_code(787));
        // SQLITE_CONSTRAINT_UNIQUE
        assert!(!is_authorization_code(2067));
    }

    #[test]
    fn test_non_database_errors() {
        assert!(!is_authorization_failure(&sqlx::Error::RowNotFound));
        assert!(!is_authorization_failure(&sqlx::Error::PoolTimedOut));
    }
}
