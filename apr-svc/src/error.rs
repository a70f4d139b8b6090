//! Service error kinds
//!
//! Each kind maps to one business code per resource. Store detail is logged
//! where the error is raised and never carried to the caller.

use apr_common::api::BusinessCode;
use thiserror::Error;

/// Resource a service operation acted on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Task,
    Setting,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Task => f.write_str("report task"),
            Resource::Setting => f.write_str("report setting"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{0} not found")]
    NotFound(Resource),

    #[error("failed to list {0}s")]
    ListFailed(Resource),

    #[error("failed to fetch {0}")]
    GetFailed(Resource),

    #[error("failed to create {0}")]
    CreationFailed(Resource),

    #[error("failed to update {0}")]
    UpdateFailed(Resource),

    #[error("failed to delete {0}")]
    DeletionFailed(Resource),

    #[error("unauthorized access to {0}")]
    UnauthorizedAccess(Resource),

    #[error("invalid request: {0}")]
    InvalidInput(String),
}

/// Convenience Result type for service operations
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

impl ServiceError {
    /// Pick the failure kind for a store error on a mutating operation
    ///
    /// Authorization failures reported by the store become
    /// `UnauthorizedAccess`; anything else becomes `fallback`.
    pub fn from_store(err: &apr_common::Error, fallback: ServiceError) -> ServiceError {
        match (&fallback, err.is_authorization_failure()) {
            (ServiceError::CreationFailed(r), true)
            | (ServiceError::UpdateFailed(r), true)
            | (ServiceError::DeletionFailed(r), true) => ServiceError::UnauthorizedAccess(*r),
            _ => fallback,
        }
    }

    pub fn business_code(&self) -> BusinessCode {
        use Resource::{Setting, Task};

        match self {
            ServiceError::NotFound(Task) => BusinessCode::TaskNotFound,
            ServiceError::ListFailed(Task) => BusinessCode::TaskListFailed,
            ServiceError::GetFailed(Task) => BusinessCode::TaskGetFailed,
            ServiceError::CreationFailed(Task) => BusinessCode::TaskCreationFailed,
            ServiceError::UpdateFailed(Task) => BusinessCode::TaskUpdateFailed,
            ServiceError::DeletionFailed(Task) => BusinessCode::TaskDeletionFailed,
            ServiceError::UnauthorizedAccess(Task) => BusinessCode::TaskUnauthorizedAccess,

            ServiceError::NotFound(Setting) => BusinessCode::SettingNotFound,
            ServiceError::ListFailed(Setting) => BusinessCode::SettingListFailed,
            ServiceError::GetFailed(Setting) => BusinessCode::SettingGetFailed,
            ServiceError::CreationFailed(Setting) => BusinessCode::SettingCreationFailed,
            ServiceError::UpdateFailed(Setting) => BusinessCode::SettingUpdateFailed,
            ServiceError::DeletionFailed(Setting) => BusinessCode::SettingDeletionFailed,
            ServiceError::UnauthorizedAccess(Setting) => BusinessCode::SettingUnauthorizedAccess,

            ServiceError::InvalidInput(_) => BusinessCode::InvalidRequest,
        }
    }
}
