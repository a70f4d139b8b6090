//! HTTP API handlers

pub mod context;
pub mod health;
pub mod response;
pub mod settings;
pub mod tasks;

pub use context::RequestContext;
pub use health::health_routes;
pub use response::{ApiError, ApiResponse, ApiResult, Envelope};
pub use settings::setting_routes;
pub use tasks::task_routes;

use serde::Deserialize;

/// Query of a bulk delete: `?ids=1,2`
#[derive(Debug, Deserialize)]
pub struct IdsQuery {
    pub ids: String,
}

impl IdsQuery {
    /// The comma-separated ids; at least one is required
    pub fn parse(&self) -> Result<Vec<i64>, String> {
        let ids = self
            .ids
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<i64>().map_err(|_| format!("invalid id '{}'", part)))
            .collect::<Result<Vec<_>, _>>()?;

        if ids.is_empty() {
            return Err("ids must list at least one id".to_string());
        }
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(value: &str) -> IdsQuery {
        IdsQuery { ids: value.to_string() }
    }

    #[test]
    fn test_ids_comma_separated() {
        assert_eq!(ids("1,2,3").parse(), Ok(vec![1, 2, 3]));
        assert_eq!(ids("4, 5 ,").parse(), Ok(vec![4, 5]));
    }

    #[test]
    fn test_ids_rejects_bad_input() {
        assert!(ids("").parse().is_err());
        assert!(ids(" , ").parse().is_err());
        assert!(ids("1,abc").parse().is_err());
    }
}
