// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use std::sync::Arc;

use decom::ActivityUpdate;
use decom_audit::{Actor, AuditEvent, Cause};
use decom_domain::{ActivityAggregate, ActivityId, CatalogMaterial, MaterialCatalog, MaterialId};
use decom_persistence::{ActivityStore, Persistence, PersistenceError};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("planner-7"), String::from("user"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-10 09:30 UTC)
}

pub fn mid(value: &str) -> MaterialId {
    MaterialId::new(value).unwrap()
}

pub fn create_test_catalog() -> Arc<MaterialCatalog> {
    Arc::new(
        MaterialCatalog::new(vec![
            CatalogMaterial::new(mid("cable-1"), String::from("Feeder cable")),
            CatalogMaterial::new(mid("antenna-1"), String::from("Panel antenna")),
            CatalogMaterial::new(mid("rru-1"), String::from("Remote radio unit")),
        ])
        .unwrap(),
    )
}

/// A store that delegates to an in-memory database but can be told to
/// reject every update.
pub struct FailingStore {
    pub inner: Persistence,
    pub fail_updates: bool,
}

impl FailingStore {
    pub fn new() -> Self {
        Self {
            inner: Persistence::new_in_memory().unwrap(),
            fail_updates: false,
        }
    }
}

impl ActivityStore for FailingStore {
    fn create_activity(
        &mut self,
        site_code: &str,
        actor: &Actor,
        cause: &Cause,
    ) -> Result<ActivityAggregate, PersistenceError> {
        self.inner.create_activity(site_code, actor, cause)
    }

    fn load_activity(
        &mut self,
        activity_id: ActivityId,
    ) -> Result<ActivityAggregate, PersistenceError> {
        self.inner.load_activity(activity_id)
    }

    fn list_activities(&mut self) -> Result<Vec<ActivityAggregate>, PersistenceError> {
        self.inner.list_activities()
    }

    fn update_activity(
        &mut self,
        activity_id: ActivityId,
        update: &ActivityUpdate,
        event: &AuditEvent,
    ) -> Result<ActivityAggregate, PersistenceError> {
        if self.fail_updates {
            return Err(PersistenceError::WriteRejected(String::from(
                "store unavailable",
            )));
        }
        self.inner.update_activity(activity_id, update, event)
    }

    fn audit_timeline(
        &mut self,
        activity_id: ActivityId,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        self.inner.audit_timeline(activity_id)
    }
}

pub fn create_activity<S: ActivityStore>(store: &mut S) -> ActivityAggregate {
    store
        .create_activity("SITE-001", &create_test_actor(), &create_test_cause())
        .unwrap()
}

pub fn audit_count<S: ActivityStore>(store: &mut S, activity_id: ActivityId) -> usize {
    store.audit_timeline(activity_id).unwrap().len()
}
