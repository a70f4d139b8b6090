//! Report task and setting models
//!
//! Stored rows, the grouped report DTOs built from them, and the partial
//! records accepted by update endpoints. JSON field names are camelCase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a logical report: one per (program, department, college, year)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportKey {
    pub program_id: i64,
    pub department_id: String,
    pub college_id: String,
    pub academic_year: i32,
}

/// Deduplicated parent of every task row sharing a [`ReportKey`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMaster {
    pub report_id: Uuid,
    #[serde(flatten)]
    pub key: ReportKey,
}

/// A stored task row
///
/// `id` is `None` until the row has been persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetail {
    pub id: Option<i64>,
    pub report_id: Uuid,
    #[serde(flatten)]
    pub key: ReportKey,
    pub responsible: Option<String>,
    pub section_id: i64,
    pub active: bool,
    pub created_by: Option<String>,
    pub creation_datetime: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
    pub update_datetime: Option<DateTime<Utc>>,
}

/// One task inside a [`ReportTaskGroup`], also the task shape of a save request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskEntry {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub responsible: Option<String>,
    pub section_id: i64,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub creation_datetime: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub update_datetime: Option<DateTime<Utc>>,
}

impl From<&TaskDetail> for TaskEntry {
    fn from(detail: &TaskDetail) -> Self {
        Self {
            id: detail.id,
            responsible: detail.responsible.clone(),
            section_id: detail.section_id,
            active: detail.active,
            created_by: detail.created_by.clone(),
            creation_datetime: detail.creation_datetime,
            updated_by: detail.updated_by.clone(),
            update_datetime: detail.update_datetime,
        }
    }
}

/// Tasks of one report, grouped under their shared key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTaskGroup {
    #[serde(flatten)]
    pub key: ReportKey,
    pub report_id: Uuid,
    pub tasks: Vec<TaskEntry>,
}

/// Body of a task save: one report key plus the tasks to create or update
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveTasksRequest {
    #[serde(flatten)]
    pub key: ReportKey,
    #[serde(default)]
    pub tasks: Vec<TaskEntry>,
}

/// Partial task record for update-by-id
///
/// Only the fields listed here are overlay-eligible; identity and audit
/// fields are never taken from the caller.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetailPatch {
    pub program_id: Option<i64>,
    pub department_id: Option<String>,
    pub college_id: Option<String>,
    pub academic_year: Option<i32>,
    pub responsible: Option<String>,
    pub section_id: Option<i64>,
    pub active: Option<bool>,
}

impl TaskDetailPatch {
    /// Overlay the present fields onto `task`
    ///
    /// Returns true when the report key changed.
    pub fn apply(&self, task: &mut TaskDetail) -> bool {
        let original_key = task.key.clone();

        if let Some(program_id) = self.program_id {
            task.key.program_id = program_id;
        }
        if let Some(department_id) = &self.department_id {
            task.key.department_id = department_id.clone();
        }
        if let Some(college_id) = &self.college_id {
            task.key.college_id = college_id.clone();
        }
        if let Some(academic_year) = self.academic_year {
            task.key.academic_year = academic_year;
        }
        if let Some(responsible) = &self.responsible {
            task.responsible = Some(responsible.clone());
        }
        if let Some(section_id) = self.section_id {
            task.section_id = section_id;
        }
        if let Some(active) = self.active {
            task.active = active;
        }

        task.key != original_key
    }
}

/// A report section setting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    #[serde(default)]
    pub id: Option<i64>,
    pub section_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub creation_datetime: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_by: Option<String>,
    #[serde(default)]
    pub update_datetime: Option<DateTime<Utc>>,
}

/// Partial setting record for update-by-id
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingPatch {
    pub section_name: Option<String>,
    pub description: Option<String>,
    pub display_order: Option<i32>,
    pub active: Option<bool>,
}

impl SettingPatch {
    pub fn apply(&self, setting: &mut Setting) {
        if let Some(section_name) = &self.section_name {
            setting.section_name = section_name.clone();
        }
        if let Some(description) = &self.description {
            setting.description = Some(description.clone());
        }
        if let Some(display_order) = self.display_order {
            setting.display_order = Some(display_order);
        }
        if let Some(active) = self.active {
            setting.active = active;
        }
    }
}

fn default_active() -> bool {
    true
}
