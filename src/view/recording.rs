// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Trailmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trailmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use super::{Controls, MarkerRef, ViewPort};
use crate::model::{Coords, Workout, WorkoutId};

/// One call made against a [`RecordingViewPort`].
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCall {
    RenderEntry(WorkoutId),
    RenderMarker(WorkoutId, MarkerRef),
    RemoveMarker(MarkerRef),
    ClearEntries,
    FocusView(Coords),
    MarkPendingDelete(WorkoutId),
    RenderControls(Controls),
}

/// An in-memory view that keeps the current list and marker state and a log of every call.
///
/// Used by tests and benches; also handy for driving the collection without a terminal.
#[derive(Debug, Default)]
pub struct RecordingViewPort {
    entries: Vec<WorkoutId>,
    markers: BTreeMap<MarkerRef, WorkoutId>,
    next_marker: u64,
    focus: Option<Coords>,
    pending: Vec<WorkoutId>,
    controls: Option<Controls>,
    calls: Vec<ViewCall>,
}

impl RecordingViewPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry ids in the order they are currently listed.
    pub fn entries(&self) -> &[WorkoutId] {
        &self.entries
    }

    pub fn entry_ids(&self) -> Vec<&str> {
        self.entries.iter().map(WorkoutId::as_str).collect()
    }

    /// Ids that currently have a marker on the map, sorted.
    pub fn marker_ids(&self) -> Vec<&str> {
        let mut ids = self.markers.values().map(WorkoutId::as_str).collect::<Vec<_>>();
        ids.sort_unstable();
        ids
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn focus(&self) -> Option<Coords> {
        self.focus
    }

    pub fn pending(&self) -> &[WorkoutId] {
        &self.pending
    }

    pub fn controls(&self) -> Option<&Controls> {
        self.controls.as_ref()
    }

    pub fn calls(&self) -> &[ViewCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl ViewPort for RecordingViewPort {
    fn render_entry(&mut self, workout: &Workout) {
        let id = workout.id().clone();
        if !self.entries.contains(&id) {
            self.entries.push(id.clone());
        }
        self.calls.push(ViewCall::RenderEntry(id));
    }

    fn render_marker(&mut self, workout: &Workout) -> MarkerRef {
        self.next_marker += 1;
        let marker = MarkerRef::new(self.next_marker);
        self.markers.insert(marker, workout.id().clone());
        self.calls
            .push(ViewCall::RenderMarker(workout.id().clone(), marker));
        marker
    }

    fn remove_marker(&mut self, marker: MarkerRef) {
        self.markers.remove(&marker);
        self.calls.push(ViewCall::RemoveMarker(marker));
    }

    fn clear_entries(&mut self) {
        self.entries.clear();
        self.pending.clear();
        self.calls.push(ViewCall::ClearEntries);
    }

    fn focus_view(&mut self, coords: Coords) {
        self.focus = Some(coords);
        self.calls.push(ViewCall::FocusView(coords));
    }

    fn mark_pending_delete(&mut self, workout_id: &WorkoutId) {
        if !self.pending.contains(workout_id) {
            self.pending.push(workout_id.clone());
        }
        self.calls.push(ViewCall::MarkPendingDelete(workout_id.clone()));
    }

    fn render_controls(&mut self, controls: &Controls) {
        self.controls = Some(*controls);
        self.calls.push(ViewCall::RenderControls(*controls));
    }
}
