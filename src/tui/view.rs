// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Trailmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trailmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{Coords, MarkerRef, Workout, WorkoutDetail, WorkoutId, WorkoutKind};
use crate::view::{Controls, ViewPort};

/// What the list pane shows for one workout. Captured at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryRow {
    pub id: WorkoutId,
    pub kind: WorkoutKind,
    pub description: String,
    pub distance: f64,
    pub duration: f64,
    pub detail: WorkoutDetail,
}

impl EntryRow {
    fn from_workout(workout: &Workout) -> Self {
        Self {
            id: workout.id().clone(),
            kind: workout.kind(),
            description: workout.description().to_owned(),
            distance: workout.distance(),
            duration: workout.duration(),
            detail: *workout.detail(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub workout_id: WorkoutId,
    pub kind: WorkoutKind,
    pub coords: Coords,
    pub label: String,
}

/// The terminal's copy of list entries and map markers, as instructed by the collection.
#[derive(Debug, Default)]
pub struct TerminalView {
    entries: Vec<EntryRow>,
    markers: BTreeMap<MarkerRef, MapMarker>,
    next_marker: u64,
    pending: BTreeSet<WorkoutId>,
    controls: Option<Controls>,
    focus_request: Option<Coords>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[EntryRow] {
        &self.entries
    }

    pub fn markers(&self) -> impl Iterator<Item = &MapMarker> {
        self.markers.values()
    }

    pub fn is_pending_delete(&self, workout_id: &WorkoutId) -> bool {
        self.pending.contains(workout_id)
    }

    pub fn controls(&self) -> Option<&Controls> {
        self.controls.as_ref()
    }

    /// The last focus request, cleared on read.
    pub fn take_focus_request(&mut self) -> Option<Coords> {
        self.focus_request.take()
    }
}

impl ViewPort for TerminalView {
    fn render_entry(&mut self, workout: &Workout) {
        let row = EntryRow::from_workout(workout);
        match self.entries.iter_mut().find(|existing| existing.id == row.id) {
            Some(existing) => *existing = row,
            None => self.entries.push(row),
        }
    }

    fn render_marker(&mut self, workout: &Workout) -> MarkerRef {
        self.next_marker += 1;
        let marker = MarkerRef::new(self.next_marker);
        self.markers.insert(
            marker,
            MapMarker {
                workout_id: workout.id().clone(),
                kind: workout.kind(),
                coords: workout.coords(),
                label: workout.description().to_owned(),
            },
        );
        marker
    }

    fn remove_marker(&mut self, marker: MarkerRef) {
        self.markers.remove(&marker);
    }

    fn clear_entries(&mut self) {
        self.entries.clear();
        self.pending.clear();
    }

    fn focus_view(&mut self, coords: Coords) {
        self.focus_request = Some(coords);
    }

    fn mark_pending_delete(&mut self, workout_id: &WorkoutId) {
        self.pending.insert(workout_id.clone());
    }

    fn render_controls(&mut self, controls: &Controls) {
        self.controls = Some(*controls);
    }
}
