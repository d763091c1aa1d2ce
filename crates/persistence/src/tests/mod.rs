// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod initialization_tests;

use crate::{ActivityStore, Persistence};
use decom::{Command, TransitionResult, apply};
use decom_audit::{Actor, Cause};
use decom_domain::{ActivityAggregate, CatalogMaterial, MaterialCatalog, MaterialId};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("planner-7"), String::from("user"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Field request"))
}

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-10 09:30 UTC)
}

pub fn create_test_catalog() -> MaterialCatalog {
    MaterialCatalog::new(vec![
        CatalogMaterial::new(
            MaterialId::new("cable-1").unwrap(),
            String::from("Feeder cable"),
        ),
        CatalogMaterial::new(
            MaterialId::new("antenna-1").unwrap(),
            String::from("Panel antenna"),
        ),
    ])
    .unwrap()
}

pub fn create_activity(persistence: &mut Persistence, site_code: &str) -> ActivityAggregate {
    persistence
        .create_activity(site_code, &create_test_actor(), &create_test_cause())
        .unwrap()
}

/// Applies a command and persists the result, returning the stored aggregate.
pub fn apply_and_persist(
    persistence: &mut Persistence,
    activity: &ActivityAggregate,
    command: Command,
) -> ActivityAggregate {
    let result: TransitionResult = apply(
        &create_test_catalog(),
        activity,
        command,
        create_test_actor(),
        create_test_cause(),
        test_now(),
    )
    .unwrap();
    persistence
        .update_activity(activity.activity_id, &result.update, &result.audit_event)
        .unwrap()
}
