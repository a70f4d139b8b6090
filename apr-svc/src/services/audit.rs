//! Audit stamping
//!
//! Services stamp actor and time onto records before handing them to the
//! store; the store never fills these fields itself.

use chrono::{DateTime, Utc};

use crate::models::{Setting, TaskDetail};

/// Name of the user performing a mutation (the `username` request header)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor(String);

impl Actor {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

/// Who and when, applied to one mutation
#[derive(Debug, Clone)]
pub struct AuditStamp {
    pub actor: String,
    pub at: DateTime<Utc>,
}

impl AuditStamp {
    /// Stamp for `actor` at the current time
    ///
    /// A blank actor cannot be attributed and yields `None`.
    pub fn for_actor(actor: &Actor) -> Option<Self> {
        let name = actor.name().trim();
        if name.is_empty() {
            return None;
        }

        Some(Self {
            actor: name.to_string(),
            at: apr_common::time::now(),
        })
    }
}

/// Records carrying creation and update attribution
pub trait Auditable {
    fn stamp_created(&mut self, stamp: &AuditStamp);
    fn stamp_updated(&mut self, stamp: &AuditStamp);
}

impl Auditable for TaskDetail {
    fn stamp_created(&mut self, stamp: &AuditStamp) {
        self.created_by = Some(stamp.actor.clone());
        self.creation_datetime = Some(stamp.at);
    }

    fn stamp_updated(&mut self, stamp: &AuditStamp) {
        self.updated_by = Some(stamp.actor.clone());
        self.update_datetime = Some(stamp.at);
    }
}

impl Auditable for Setting {
    fn stamp_created(&mut self, stamp: &AuditStamp) {
        self.created_by = Some(stamp.actor.clone());
        self.creation_datetime = Some(stamp.at);
    }

    fn stamp_updated(&mut self, stamp: &AuditStamp) {
        self.updated_by = Some(stamp.actor.clone());
        self.update_datetime = Some(stamp.at);
    }
}

/// Stamp a record about to be saved
///
/// New records (no id) get a creation stamp; records that already have an id
/// get an update stamp and keep whatever creation stamp they carry.
pub fn stamp_for_save<T: Auditable>(record: &mut T, is_new: bool, stamp: &AuditStamp) {
    if is_new {
        record.stamp_created(stamp);
    } else {
        record.stamp_updated(stamp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_actor_has_no_stamp() {
        assert!(AuditStamp::for_actor(&Actor::new("")).is_none());
        assert!(AuditStamp::for_actor(&Actor::new("   ")).is_none());
    }

    #[test]
    fn test_actor_is_trimmed() {
        let stamp = AuditStamp::for_actor(&Actor::new(" alice ")).unwrap();
        assert_eq!(stamp.actor, "alice");
    }

    #[test]
    fn test_stamp_for_save() {
        let stamp = AuditStamp::for_actor(&Actor::new("alice")).unwrap();
        let mut setting = Setting {
            id: None,
            section_name: "Mission".to_string(),
            description: None,
            display_order: None,
            active: true,
            created_by: None,
            creation_datetime: None,
            updated_by: None,
            update_datetime: None,
        };

        stamp_for_save(&mut setting, true, &stamp);
        assert_eq!(setting.created_by.as_deref(), Some("alice"));
        assert!(setting.updated_by.is_none());

        setting.created_by = Some("carol".to_string());
        stamp_for_save(&mut setting, false, &stamp);
        assert_eq!(setting.created_by.as_deref(), Some("carol"));
        assert_eq!(setting.updated_by.as_deref(), Some("alice"));
        assert_eq!(setting.update_datetime, Some(stamp.at));
    }
}
