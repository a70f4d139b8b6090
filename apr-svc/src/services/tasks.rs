//! Report task service

use std::collections::HashSet;

use sqlx::SqlitePool;
use tracing::{debug, info};

use super::audit::{stamp_for_save, Actor, AuditStamp, Auditable};
use super::{require_stamp, store_failure};
use crate::db;
use crate::error::{Resource, ServiceError, ServiceResult};
use crate::grouping::group_tasks;
use crate::models::{ReportKey, ReportTaskGroup, SaveTasksRequest, TaskDetail, TaskDetailPatch};

const TASK: Resource = Resource::Task;

#[derive(Clone)]
pub struct TaskService {
    db: SqlitePool,
}

impl TaskService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Every stored task, grouped by report key
    pub async fn list(&self) -> ServiceResult<Vec<ReportTaskGroup>> {
        let rows = db::tasks::find_all(&self.db)
            .await
            .map_err(|e| store_failure("List report tasks", e, ServiceError::ListFailed(TASK)))?;

        let groups = group_tasks(&rows);
        debug!("Listed {} task rows in {} groups", rows.len(), groups.len());
        Ok(groups)
    }

    /// Save a batch of tasks under one report key
    ///
    /// The report master for the key is resolved (or created) and every task
    /// is written in the same transaction. Returns the saved rows grouped.
    pub async fn save(
        &self,
        request: SaveTasksRequest,
        actor: &Actor,
    ) -> ServiceResult<Vec<ReportTaskGroup>> {
        validate_key(&request.key)?;
        let stamp = require_stamp(actor, TASK)?;

        let saved = self
            .save_in_transaction(&request, &stamp)
            .await
            .map_err(|e| {
                store_failure("Save report tasks", e, ServiceError::CreationFailed(TASK))
            })?;

        info!(
            "Saved {} tasks for program {} / {} / {} / {} by {}",
            saved.len(),
            request.key.program_id,
            request.key.department_id,
            request.key.college_id,
            request.key.academic_year,
            stamp.actor
        );
        Ok(group_tasks(&saved))
    }

    async fn save_in_transaction(
        &self,
        request: &SaveTasksRequest,
        stamp: &AuditStamp,
    ) -> apr_common::Result<Vec<TaskDetail>> {
        let mut tx = db::begin_immediate(&self.db).await?;

        let master = db::report_master::find_or_create(&mut *tx, &request.key).await?;

        let requested: Vec<i64> = request.tasks.iter().filter_map(|entry| entry.id).collect();
        let known: HashSet<i64> = db::tasks::find_by_ids(&mut *tx, &requested)
            .await?
            .into_iter()
            .filter_map(|task| task.id)
            .collect();

        let details: Vec<TaskDetail> = request
            .tasks
            .iter()
            .map(|entry| {
                // An id with no stored row is saved as a new task
                let id = entry.id.filter(|id| known.contains(id));
                if id.is_none() && entry.id.is_some() {
                    debug!("Task id {:?} not stored; saving as new", entry.id);
                }
                let is_new = id.is_none();
                let mut detail = TaskDetail {
                    id,
                    report_id: master.report_id,
                    key: request.key.clone(),
                    responsible: entry.responsible.clone(),
                    section_id: entry.section_id,
                    active: entry.active,
                    created_by: None,
                    creation_datetime: None,
                    updated_by: None,
                    update_datetime: None,
                };
                if !is_new {
                    detail.created_by = entry.created_by.clone();
                    detail.creation_datetime = entry.creation_datetime;
                }
                stamp_for_save(&mut detail, is_new, stamp);
                detail
            })
            .collect();

        let saved = db::tasks::save_all(&mut *tx, &details).await?;
        tx.commit().await?;

        Ok(saved)
    }

    pub async fn get(&self, id: i64) -> ServiceResult<TaskDetail> {
        db::tasks::find_by_id(&self.db, id)
            .await
            .map_err(|e| store_failure("Fetch report task", e, ServiceError::GetFailed(TASK)))?
            .ok_or(ServiceError::NotFound(TASK))
    }

    /// Tasks of one report, grouped
    ///
    /// `NotFound` when no task row references the report id.
    pub async fn list_by_report(&self, report_id: &str) -> ServiceResult<Vec<ReportTaskGroup>> {
        let rows = db::tasks::find_by_report_id(&self.db, report_id)
            .await
            .map_err(|e| store_failure("Fetch report tasks", e, ServiceError::GetFailed(TASK)))?;

        if rows.is_empty() {
            debug!("No tasks for report {}", report_id);
            return Err(ServiceError::NotFound(TASK));
        }

        Ok(group_tasks(&rows))
    }

    /// The single task group of one report
    pub async fn tasks_for_report(&self, report_id: &str) -> ServiceResult<ReportTaskGroup> {
        self.list_by_report(report_id)
            .await?
            .into_iter()
            .next()
            .ok_or(ServiceError::NotFound(TASK))
    }

    /// Merge `patch` onto the stored task and save it
    ///
    /// The read and the write share one transaction, so a task deleted
    /// concurrently is reported as `NotFound` rather than written back. A
    /// changed report key moves the task under the report master for the
    /// new key.
    pub async fn update(
        &self,
        id: i64,
        patch: TaskDetailPatch,
        actor: &Actor,
    ) -> ServiceResult<TaskDetail> {
        let stamp = require_stamp(actor, TASK)?;
        let fail = |e: apr_common::Error| {
            store_failure("Update report task", e, ServiceError::UpdateFailed(TASK))
        };

        let mut tx = db::begin_immediate(&self.db).await.map_err(fail)?;

        let mut task = db::tasks::find_by_ids(&mut *tx, &[id])
            .await
            .map_err(fail)?
            .pop()
            .ok_or(ServiceError::NotFound(TASK))?;

        if patch.apply(&mut task) {
            validate_key(&task.key)?;
            let master = db::report_master::find_or_create(&mut *tx, &task.key)
                .await
                .map_err(fail)?;
            debug!("Task {} moved to report {}", id, master.report_id);
            task.report_id = master.report_id;
        }
        task.stamp_updated(&stamp);

        let updated = db::tasks::save_all(&mut *tx, std::slice::from_ref(&task))
            .await
            .map_err(fail)?
            .pop()
            .ok_or(ServiceError::NotFound(TASK))?;
        tx.commit().await.map_err(|e| fail(e.into()))?;

        info!("Updated task {} by {}", id, stamp.actor);
        Ok(updated)
    }

    /// Delete every listed task; unknown ids are skipped
    pub async fn delete(&self, ids: &[i64], actor: Option<&Actor>) -> ServiceResult<()> {
        let deleted = db::tasks::delete_by_ids(&self.db, ids)
            .await
            .map_err(|e| {
                store_failure("Delete report tasks", e, ServiceError::DeletionFailed(TASK))
            })?;

        info!(
            "Deleted {} of {} requested tasks (by {})",
            deleted,
            ids.len(),
            actor.map(Actor::name).unwrap_or("anonymous")
        );
        Ok(())
    }
}

fn validate_key(key: &ReportKey) -> ServiceResult<()> {
    if key.department_id.trim().is_empty() {
        return Err(ServiceError::InvalidInput("departmentId must not be blank".to_string()));
    }
    if key.college_id.trim().is_empty() {
        return Err(ServiceError::InvalidInput("collegeId must not be blank".to_string()));
    }
    Ok(())
}
