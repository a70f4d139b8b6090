//! Business codes
//!
//! Every outcome reported to a caller carries a business code. The code picks
//! the HTTP status and the key of the user-facing message.

use axum::http::StatusCode;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessCode {
    TaskListSuccess,
    TaskCreateSuccess,
    TaskGetSuccess,
    TaskUpdateSuccess,
    TaskDeleteSuccess,
    TaskNotFound,
    TaskListFailed,
    TaskGetFailed,
    TaskCreationFailed,
    TaskUpdateFailed,
    TaskDeletionFailed,
    TaskUnauthorizedAccess,

    SettingListSuccess,
    SettingCreateSuccess,
    SettingGetSuccess,
    SettingUpdateSuccess,
    SettingDeleteSuccess,
    SettingNotFound,
    SettingListFailed,
    SettingGetFailed,
    SettingCreationFailed,
    SettingUpdateFailed,
    SettingDeletionFailed,
    SettingUnauthorizedAccess,

    InvalidRequest,
}

impl BusinessCode {
    pub const ALL: [BusinessCode; 25] = [
        BusinessCode::TaskListSuccess,
        BusinessCode::TaskCreateSuccess,
        BusinessCode::TaskGetSuccess,
        BusinessCode::TaskUpdateSuccess,
        BusinessCode::TaskDeleteSuccess,
        BusinessCode::TaskNotFound,
        BusinessCode::TaskListFailed,
        BusinessCode::TaskGetFailed,
        BusinessCode::TaskCreationFailed,
        BusinessCode::TaskUpdateFailed,
        BusinessCode::TaskDeletionFailed,
        BusinessCode::TaskUnauthorizedAccess,
        BusinessCode::SettingListSuccess,
        BusinessCode::SettingCreateSuccess,
        BusinessCode::SettingGetSuccess,
        BusinessCode::SettingUpdateSuccess,
        BusinessCode::SettingDeleteSuccess,
        BusinessCode::SettingNotFound,
        BusinessCode::SettingListFailed,
        BusinessCode::SettingGetFailed,
        BusinessCode::SettingCreationFailed,
        BusinessCode::SettingUpdateFailed,
        BusinessCode::SettingDeletionFailed,
        BusinessCode::SettingUnauthorizedAccess,
        BusinessCode::InvalidRequest,
    ];

    /// Stable wire name, also the message lookup key
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessCode::TaskListSuccess => "APR_TASK_LIST_SUCCESS",
            BusinessCode::TaskCreateSuccess => "APR_TASK_CREATE_SUCCESS",
            BusinessCode::TaskGetSuccess => "APR_TASK_GET_SUCCESS",
            BusinessCode::TaskUpdateSuccess => "APR_TASK_UPDATE_SUCCESS",
            BusinessCode::TaskDeleteSuccess => "APR_TASK_DELETE_SUCCESS",
            BusinessCode::TaskNotFound => "APR_TASK_NOT_FOUND",
            BusinessCode::TaskListFailed => "APR_TASK_LIST_FAILED",
            BusinessCode::TaskGetFailed => "APR_TASK_GET_FAILED",
            BusinessCode::TaskCreationFailed => "APR_TASK_CREATION_FAILED",
            BusinessCode::TaskUpdateFailed => "APR_TASK_UPDATE_FAILED",
            BusinessCode::TaskDeletionFailed => "APR_TASK_DELETION_FAILED",
            BusinessCode::TaskUnauthorizedAccess => "APR_TASK_UNAUTHORIZED_ACCESS",
            BusinessCode::SettingListSuccess => "APR_SETTING_LIST_SUCCESS",
            BusinessCode::SettingCreateSuccess => "APR_SETTING_CREATE_SUCCESS",
            BusinessCode::SettingGetSuccess => "APR_SETTING_GET_SUCCESS",
            BusinessCode::SettingUpdateSuccess => "APR_SETTING_UPDATE_SUCCESS",
            BusinessCode::SettingDeleteSuccess => "APR_SETTING_DELETE_SUCCESS",
            BusinessCode::SettingNotFound => "APR_SETTING_NOT_FOUND",
            BusinessCode::SettingListFailed => "APR_SETTING_LIST_FAILED",
            BusinessCode::SettingGetFailed => "APR_SETTING_GET_FAILED",
            BusinessCode::SettingCreationFailed => "APR_SETTING_CREATION_FAILED",
            BusinessCode::SettingUpdateFailed => "APR_SETTING_UPDATE_FAILED",
            BusinessCode::SettingDeletionFailed => "APR_SETTING_DELETION_FAILED",
            BusinessCode::SettingUnauthorizedAccess => "APR_SETTING_UNAUTHORIZED_ACCESS",
            BusinessCode::InvalidRequest => "APR_INVALID_REQUEST",
        }
    }

    pub fn http_status(&self) -> StatusCode {
        match self {
            BusinessCode::TaskCreateSuccess | BusinessCode::SettingCreateSuccess => {
                StatusCode::CREATED
            }

            BusinessCode::TaskListSuccess
            | BusinessCode::TaskGetSuccess
            | BusinessCode::TaskUpdateSuccess
            | BusinessCode::TaskDeleteSuccess
            | BusinessCode::SettingListSuccess
            | BusinessCode::SettingGetSuccess
            | BusinessCode::SettingUpdateSuccess
            | BusinessCode::SettingDeleteSuccess => StatusCode::OK,

            BusinessCode::TaskNotFound | BusinessCode::SettingNotFound => StatusCode::NOT_FOUND,

            BusinessCode::TaskUnauthorizedAccess | BusinessCode::SettingUnauthorizedAccess => {
                StatusCode::UNAUTHORIZED
            }

            BusinessCode::InvalidRequest => StatusCode::BAD_REQUEST,

            BusinessCode::TaskListFailed
            | BusinessCode::TaskGetFailed
            | BusinessCode::TaskCreationFailed
            | BusinessCode::TaskUpdateFailed
            | BusinessCode::TaskDeletionFailed
            | BusinessCode::SettingListFailed
            | BusinessCode::SettingGetFailed
            | BusinessCode::SettingCreationFailed
            | BusinessCode::SettingUpdateFailed
            | BusinessCode::SettingDeletionFailed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for BusinessCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BusinessCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
