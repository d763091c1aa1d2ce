// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{catalog_material, create_test_catalog, mid, survey_line};
use crate::{EditBuffer, ManualSelection, SurveyDraft};
use decom_domain::{MaterialCatalog, MaterialCondition, SurveyRecord};

#[test]
fn test_edit_buffer_accumulates_fields_per_material() {
    let mut edits: EditBuffer = EditBuffer::new();
    edits.set_quantity(&mid("cable-1"), Some(3));
    edits.set_condition(&mid("cable-1"), MaterialCondition::Poor);
    edits.set_damage_notes(&mid("antenna-1"), "dented");

    assert_eq!(edits.len(), 2);
    let cable = edits.get(&mid("cable-1")).unwrap();
    assert_eq!(cable.quantity_dismantled, Some(3));
    assert_eq!(cable.condition_after_dismantling, Some(MaterialCondition::Poor));
    assert_eq!(cable.damage_notes, None);

    edits.set_quantity(&mid("cable-1"), None);
    assert_eq!(edits.get(&mid("cable-1")).unwrap().quantity_dismantled, None);

    edits.discard(&mid("antenna-1"));
    assert!(edits.get(&mid("antenna-1")).is_none());

    edits.clear();
    assert!(edits.is_empty());
}

#[test]
fn test_edit_buffer_deserializes_from_json_object() {
    let edits: EditBuffer = serde_json::from_str(
        r#"{"cable-1": {"quantityDismantled": 4, "conditionAfterDismantling": "fair"}}"#,
    )
    .unwrap();

    let cable = edits.get(&mid("cable-1")).unwrap();
    assert_eq!(cable.quantity_dismantled, Some(4));
    assert_eq!(cable.condition_after_dismantling, Some(MaterialCondition::Fair));
    assert_eq!(cable.damage_notes, None);
}

#[test]
fn test_manual_toggle_out_discards_draft() {
    let catalog: MaterialCatalog = create_test_catalog();
    let rru = catalog_material(&catalog, "rru-1");
    let mut manual: ManualSelection = ManualSelection::new();

    assert!(manual.toggle(&rru));
    assert!(manual.set_quantity(&mid("rru-1"), Some(4)));
    assert!(manual.set_damage_notes(&mid("rru-1"), "water damage"));
    assert!(!manual.toggle(&rru));
    assert!(manual.is_empty());

    // Re-selecting starts from the defaults again
    assert!(manual.toggle(&rru));
    let entry = &manual.entries()[0];
    assert_eq!(entry.quantity, Some(1));
    assert_eq!(entry.condition_after_dismantling, MaterialCondition::Good);
    assert!(entry.damage_notes.is_empty());
}

#[test]
fn test_manual_setters_require_selection() {
    let mut manual: ManualSelection = ManualSelection::new();

    assert!(!manual.set_quantity(&mid("cable-1"), Some(2)));
    assert!(!manual.set_condition(&mid("cable-1"), MaterialCondition::Scrap));
    assert!(!manual.set_damage_notes(&mid("cable-1"), "x"));
    assert!(manual.is_empty());
}

#[test]
fn test_manual_select_is_idempotent() {
    let catalog: MaterialCatalog = create_test_catalog();
    let cable = catalog_material(&catalog, "cable-1");
    let mut manual: ManualSelection = ManualSelection::new();

    manual.select(&cable);
    manual.set_quantity(&mid("cable-1"), Some(9));
    manual.select(&cable);

    assert_eq!(manual.entries().len(), 1);
    assert_eq!(manual.entries()[0].quantity, Some(9));
}

#[test]
fn test_survey_draft_toggle_applies_defaults() {
    let catalog: MaterialCatalog = create_test_catalog();
    let record: SurveyRecord = SurveyRecord {
        materials: vec![survey_line("cable-1", "Feeder cable", 10)],
        ..SurveyRecord::default()
    };
    let mut draft: SurveyDraft = SurveyDraft::from_record(&record);

    assert!(draft.toggle(&catalog_material(&catalog, "antenna-1")));
    let antenna = &draft.lines()[1];
    assert_eq!(antenna.quantity, 1);
    assert_eq!(antenna.condition, MaterialCondition::Good);
    assert!(antenna.can_be_reused);

    assert!(draft.set_quantity(&mid("antenna-1"), 6));
    assert!(draft.set_can_be_reused(&mid("antenna-1"), false));
    assert!(draft.set_notes(&mid("antenna-1"), "rusted bracket"));
    assert!(!draft.set_quantity(&mid("rru-1"), 2));

    assert!(!draft.toggle(&catalog_material(&catalog, "cable-1")));
    let lines = draft.into_lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 6);
    assert!(!lines[0].can_be_reused);
    assert_eq!(lines[0].notes, "rusted bracket");
}
