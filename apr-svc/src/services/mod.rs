//! Task and setting services
//!
//! Services own the orchestration between HTTP handlers and the record
//! store: audit stamping, report master resolution, grouping, and mapping of
//! store failures onto [`crate::error::ServiceError`] kinds.

pub mod audit;
pub mod settings;
pub mod tasks;

pub use audit::{Actor, AuditStamp, Auditable};
pub use settings::SettingService;
pub use tasks::TaskService;

use tracing::{error, warn};

use crate::error::ServiceError;

/// Log a store failure and classify it for the caller
fn store_failure(operation: &str, err: apr_common::Error, fallback: ServiceError) -> ServiceError {
    let classified = ServiceError::from_store(&err, fallback);
    match classified {
        ServiceError::UnauthorizedAccess(_) => {
            warn!("{} refused by store: {}", operation, err)
        }
        _ => error!("{} failed: {}", operation, err),
    }
    classified
}

/// Stamp for a mutation, or `UnauthorizedAccess` when the actor is blank
fn require_stamp(
    actor: &Actor,
    resource: crate::error::Resource,
) -> Result<AuditStamp, ServiceError> {
    AuditStamp::for_actor(actor).ok_or_else(|| {
        warn!("Rejected {} mutation without a named actor", resource);
        ServiceError::UnauthorizedAccess(resource)
    })
}
