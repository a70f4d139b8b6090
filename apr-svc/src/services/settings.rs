//! Report setting service

use std::collections::HashSet;

use sqlx::SqlitePool;
use tracing::{debug, info};

use super::audit::{stamp_for_save, Actor, AuditStamp, Auditable};
use super::{require_stamp, store_failure};
use crate::db;
use crate::error::{Resource, ServiceError, ServiceResult};
use crate::models::{Setting, SettingPatch};

const SETTING: Resource = Resource::Setting;

#[derive(Clone)]
pub struct SettingService {
    db: SqlitePool,
}

impl SettingService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Setting>> {
        db::settings::find_all(&self.db)
            .await
            .map_err(|e| {
                store_failure("List report settings", e, ServiceError::ListFailed(SETTING))
            })
    }

    pub async fn get(&self, id: i64) -> ServiceResult<Setting> {
        db::settings::find_by_id(&self.db, id)
            .await
            .map_err(|e| {
                store_failure("Fetch report setting", e, ServiceError::GetFailed(SETTING))
            })?
            .ok_or(ServiceError::NotFound(SETTING))
    }

    /// Save a list of settings in one transaction
    pub async fn save(&self, settings: Vec<Setting>, actor: &Actor) -> ServiceResult<Vec<Setting>> {
        for setting in &settings {
            validate(setting)?;
        }
        let stamp = require_stamp(actor, SETTING)?;

        let saved = self
            .save_in_transaction(settings, &stamp)
            .await
            .map_err(|e| {
                store_failure("Save report settings", e, ServiceError::CreationFailed(SETTING))
            })?;

        info!("Saved {} settings by {}", saved.len(), stamp.actor);
        Ok(saved)
    }

    async fn save_in_transaction(
        &self,
        mut settings: Vec<Setting>,
        stamp: &AuditStamp,
    ) -> apr_common::Result<Vec<Setting>> {
        let mut tx = db::begin_immediate(&self.db).await?;

        let requested: Vec<i64> = settings.iter().filter_map(|s| s.id).collect();
        let known: HashSet<i64> = db::settings::find_by_ids(&mut *tx, &requested)
            .await?
            .into_iter()
            .filter_map(|s| s.id)
            .collect();

        for setting in &mut settings {
            // An id with no stored row is saved as a new setting
            if setting.id.is_some_and(|id| !known.contains(&id)) {
                debug!("Setting id {:?} not stored; saving as new", setting.id);
                setting.id = None;
                setting.created_by = None;
                setting.creation_datetime = None;
            }
            let is_new = setting.id.is_none();
            if is_new {
                setting.updated_by = None;
                setting.update_datetime = None;
            }
            stamp_for_save(setting, is_new, stamp);
        }

        let saved = db::settings::save_all(&mut *tx, &settings).await?;
        tx.commit().await?;

        Ok(saved)
    }

    /// Merge `patch` onto the stored setting and save it
    ///
    /// Read and write share one transaction.
    pub async fn update(
        &self,
        id: i64,
        patch: SettingPatch,
        actor: &Actor,
    ) -> ServiceResult<Setting> {
        let stamp = require_stamp(actor, SETTING)?;
        let fail = |e: apr_common::Error| {
            store_failure("Update report setting", e, ServiceError::UpdateFailed(SETTING))
        };

        let mut tx = db::begin_immediate(&self.db).await.map_err(fail)?;

        let mut setting = db::settings::find_by_ids(&mut *tx, &[id])
            .await
            .map_err(fail)?
            .pop()
            .ok_or(ServiceError::NotFound(SETTING))?;

        patch.apply(&mut setting);
        validate(&setting)?;
        setting.stamp_updated(&stamp);

        let updated = db::settings::save_all(&mut *tx, std::slice::from_ref(&setting))
            .await
            .map_err(fail)?
            .pop()
            .ok_or(ServiceError::NotFound(SETTING))?;
        tx.commit().await.map_err(|e| fail(e.into()))?;

        info!("Updated setting {} by {}", id, stamp.actor);
        Ok(updated)
    }

    /// Delete every listed setting; unknown ids are skipped
    ///
    /// Fails with `DeletionFailed` while any task still references one of
    /// the settings.
    pub async fn delete(&self, ids: &[i64], actor: Option<&Actor>) -> ServiceResult<()> {
        let deleted = db::settings::delete_by_ids(&self.db, ids)
            .await
            .map_err(|e| {
                store_failure("Delete report settings", e, ServiceError::DeletionFailed(SETTING))
            })?;

        info!(
            "Deleted {} of {} requested settings (by {})",
            deleted,
            ids.len(),
            actor.map(Actor::name).unwrap_or("anonymous")
        );
        Ok(())
    }
}

fn validate(setting: &Setting) -> ServiceResult<()> {
    if setting.section_name.trim().is_empty() {
        return Err(ServiceError::InvalidInput("sectionName must not be blank".to_string()));
    }
    Ok(())
}
