// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory form state held between user edits and an explicit submit.
//!
//! None of these buffers is part of the persisted aggregate. They are merged
//! into a record only when the corresponding command is applied, so
//! incomplete input never leaks into a partial write.

use decom_domain::{
    CatalogMaterial, MaterialCondition, MaterialId, SurveyMaterialLine, SurveyRecord,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pending edits for one survey-backed dismantling line.
///
/// The quantity is kept as raw signed input; it is clamped to the surveyed
/// bound when resolved, never rejected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftLine {
    #[serde(default)]
    pub quantity_dismantled: Option<i64>,
    #[serde(default)]
    pub condition_after_dismantling: Option<MaterialCondition>,
    #[serde(default)]
    pub damage_notes: Option<String>,
}

/// Survey-driven edit buffer, keyed by material id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EditBuffer {
    drafts: BTreeMap<MaterialId, DraftLine>,
}

impl EditBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            drafts: BTreeMap::new(),
        }
    }

    /// Returns the draft for a material.
    #[must_use]
    pub fn get(&self, material_id: &MaterialId) -> Option<&DraftLine> {
        self.drafts.get(material_id)
    }

    /// Replaces the whole draft for a material.
    pub fn insert(&mut self, material_id: MaterialId, draft: DraftLine) {
        self.drafts.insert(material_id, draft);
    }

    /// Sets (or clears, with `None`) the raw dismantled quantity.
    pub fn set_quantity(&mut self, material_id: &MaterialId, quantity: Option<i64>) {
        self.entry(material_id).quantity_dismantled = quantity;
    }

    /// Sets the condition after dismantling.
    pub fn set_condition(&mut self, material_id: &MaterialId, condition: MaterialCondition) {
        self.entry(material_id).condition_after_dismantling = Some(condition);
    }

    /// Sets the damage notes.
    pub fn set_damage_notes(&mut self, material_id: &MaterialId, notes: &str) {
        self.entry(material_id).damage_notes = Some(notes.to_string());
    }

    /// Drops any draft for a material.
    pub fn discard(&mut self, material_id: &MaterialId) {
        self.drafts.remove(material_id);
    }

    /// Drops every draft.
    pub fn clear(&mut self) {
        self.drafts.clear();
    }

    /// Returns true if no draft is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    /// Number of materials with a draft.
    #[must_use]
    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    fn entry(&mut self, material_id: &MaterialId) -> &mut DraftLine {
        self.drafts.entry(material_id.clone()).or_default()
    }
}

/// One material chosen directly from the catalog in manual mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualEntry {
    pub material_id: MaterialId,
    /// Captured from the catalog at selection time.
    pub name: String,
    /// Raw input; only values of at least 1 are submitted.
    pub quantity: Option<i64>,
    pub condition_after_dismantling: MaterialCondition,
    #[serde(default)]
    pub damage_notes: String,
}

/// Manual-mode selection state, independent of any survey line.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManualSelection {
    entries: Vec<ManualEntry>,
}

impl ManualSelection {
    /// Creates an empty selection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Toggles a catalog material in or out of the selection.
    ///
    /// Returns true if the material is selected afterwards. Deselecting drops
    /// the entry together with its draft values.
    pub fn toggle(&mut self, material: &CatalogMaterial) -> bool {
        if self.is_selected(&material.id) {
            self.deselect(&material.id);
            false
        } else {
            self.select(material);
            true
        }
    }

    /// Adds a catalog material with a quantity of one, if not already selected.
    pub fn select(&mut self, material: &CatalogMaterial) {
        if self.is_selected(&material.id) {
            return;
        }
        self.entries.push(ManualEntry {
            material_id: material.id.clone(),
            name: material.name.clone(),
            quantity: Some(1),
            condition_after_dismantling: MaterialCondition::Good,
            damage_notes: String::new(),
        });
    }

    /// Removes a material and its draft values.
    pub fn deselect(&mut self, material_id: &MaterialId) {
        self.entries.retain(|entry| &entry.material_id != material_id);
    }

    /// Returns true if the material is selected.
    #[must_use]
    pub fn is_selected(&self, material_id: &MaterialId) -> bool {
        self.entries.iter().any(|e| &e.material_id == material_id)
    }

    /// Sets the raw quantity of a selected material.
    ///
    /// Returns false if the material is not selected.
    pub fn set_quantity(&mut self, material_id: &MaterialId, quantity: Option<i64>) -> bool {
        self.entry_mut(material_id)
            .map(|entry| entry.quantity = quantity)
            .is_some()
    }

    /// Sets the condition of a selected material.
    ///
    /// Returns false if the material is not selected.
    pub fn set_condition(&mut self, material_id: &MaterialId, condition: MaterialCondition) -> bool {
        self.entry_mut(material_id)
            .map(|entry| entry.condition_after_dismantling = condition)
            .is_some()
    }

    /// Sets the damage notes of a selected material.
    ///
    /// Returns false if the material is not selected.
    pub fn set_damage_notes(&mut self, material_id: &MaterialId, notes: &str) -> bool {
        self.entry_mut(material_id)
            .map(|entry| entry.damage_notes = notes.to_string())
            .is_some()
    }

    /// Selected entries in selection order.
    #[must_use]
    pub fn entries(&self) -> &[ManualEntry] {
        &self.entries
    }

    /// Returns true if nothing is selected.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops the whole selection.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn entry_mut(&mut self, material_id: &MaterialId) -> Option<&mut ManualEntry> {
        self.entries
            .iter_mut()
            .find(|entry| &entry.material_id == material_id)
    }
}

/// Survey form state: the selected material lines being edited.
///
/// Each selected line is its own edit state, so toggling a material out
/// cannot leave orphaned form data behind.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SurveyDraft {
    lines: Vec<SurveyMaterialLine>,
}

impl SurveyDraft {
    /// Starts a draft from the persisted survey materials.
    #[must_use]
    pub fn from_record(record: &SurveyRecord) -> Self {
        Self {
            lines: record.materials.clone(),
        }
    }

    /// Toggles a catalog material in or out of the survey selection.
    ///
    /// A newly selected material gets the catalog defaults (one unit, good,
    /// reusable). Returns true if the material is selected afterwards.
    pub fn toggle(&mut self, material: &CatalogMaterial) -> bool {
        if self.is_selected(&material.id) {
            self.lines.retain(|line| line.material_id != material.id);
            false
        } else {
            self.lines.push(SurveyMaterialLine::from_catalog(material));
            true
        }
    }

    /// Returns true if the material is selected.
    #[must_use]
    pub fn is_selected(&self, material_id: &MaterialId) -> bool {
        self.lines.iter().any(|l| &l.material_id == material_id)
    }

    /// Sets the surveyed quantity of a selected line.
    ///
    /// Returns false if the material is not selected.
    pub fn set_quantity(&mut self, material_id: &MaterialId, quantity: u32) -> bool {
        self.line_mut(material_id)
            .map(|line| line.quantity = quantity)
            .is_some()
    }

    /// Sets the surveyed condition of a selected line.
    ///
    /// Returns false if the material is not selected.
    pub fn set_condition(&mut self, material_id: &MaterialId, condition: MaterialCondition) -> bool {
        self.line_mut(material_id)
            .map(|line| line.condition = condition)
            .is_some()
    }

    /// Sets the reuse flag of a selected line.
    ///
    /// Returns false if the material is not selected.
    pub fn set_can_be_reused(&mut self, material_id: &MaterialId, can_be_reused: bool) -> bool {
        self.line_mut(material_id)
            .map(|line| line.can_be_reused = can_be_reused)
            .is_some()
    }

    /// Sets the notes of a selected line.
    ///
    /// Returns false if the material is not selected.
    pub fn set_notes(&mut self, material_id: &MaterialId, notes: &str) -> bool {
        self.line_mut(material_id)
            .map(|line| line.notes = notes.to_string())
            .is_some()
    }

    /// The selected lines in selection order.
    #[must_use]
    pub fn lines(&self) -> &[SurveyMaterialLine] {
        &self.lines
    }

    /// Consumes the draft, yielding the lines to submit.
    #[must_use]
    pub fn into_lines(self) -> Vec<SurveyMaterialLine> {
        self.lines
    }

    fn line_mut(&mut self, material_id: &MaterialId) -> Option<&mut SurveyMaterialLine> {
        self.lines
            .iter_mut()
            .find(|line| &line.material_id == material_id)
    }
}
