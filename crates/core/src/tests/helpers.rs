// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use decom_audit::{Actor, Cause};
use decom_domain::{
    ActivityAggregate, ActivityId, CatalogMaterial, DismantledMaterialLine, MaterialCatalog,
    MaterialCondition, MaterialId, SurveyMaterialLine,
};
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("planner-7"), String::from("user"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Field request"))
}

pub fn test_now() -> OffsetDateTime {
    datetime!(2026-03-10 09:30 UTC)
}

pub fn test_today() -> Date {
    date!(2026 - 03 - 10)
}

pub fn mid(value: &str) -> MaterialId {
    MaterialId::new(value).unwrap()
}

pub fn create_test_catalog() -> MaterialCatalog {
    MaterialCatalog::new(vec![
        CatalogMaterial::new(mid("cable-1"), String::from("Feeder cable")),
        CatalogMaterial::new(mid("antenna-1"), String::from("Panel antenna")),
        CatalogMaterial::new(mid("rru-1"), String::from("Remote radio unit")),
    ])
    .unwrap()
}

pub fn catalog_material(catalog: &MaterialCatalog, id: &str) -> CatalogMaterial {
    catalog.require(&mid(id)).unwrap().clone()
}

pub fn survey_line(id: &str, name: &str, quantity: u32) -> SurveyMaterialLine {
    SurveyMaterialLine {
        material_id: mid(id),
        name: name.to_string(),
        quantity,
        condition: MaterialCondition::Good,
        can_be_reused: true,
        notes: String::new(),
    }
}

pub fn dismantled_line(id: &str, name: &str, quantity: u32, notes: &str) -> DismantledMaterialLine {
    DismantledMaterialLine {
        material_id: mid(id),
        name: name.to_string(),
        quantity_dismantled: quantity,
        condition_after_dismantling: MaterialCondition::Fair,
        damage_notes: notes.to_string(),
        dismantling_date: date!(2026 - 03 - 01),
    }
}

/// An activity whose survey holds cable x10 and antenna x3.
pub fn create_surveyed_activity() -> ActivityAggregate {
    let mut activity: ActivityAggregate = ActivityAggregate::new(ActivityId::new(1), "SITE-001");
    activity.survey.materials = vec![
        survey_line("cable-1", "Feeder cable", 10),
        survey_line("antenna-1", "Panel antenna", 3),
    ];
    activity
}
