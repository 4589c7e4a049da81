// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Trailmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trailmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rendering seam between the collection and whatever draws it.
//!
//! The collection never reads anything back from the view except the [`MarkerRef`] handed out by
//! [`ViewPort::render_marker`].

mod recording;

pub use crate::model::MarkerRef;
pub use recording::{RecordingViewPort, ViewCall};

use crate::model::{Coords, Workout, WorkoutId};
use crate::ops::{Filter, SortDirection};

/// A list pane plus a map with markers.
pub trait ViewPort {
    /// Inserts (or re-inserts) the list entry for `workout`. Calling it twice for the same id
    /// must not produce two entries.
    fn render_entry(&mut self, workout: &Workout);

    fn render_marker(&mut self, workout: &Workout) -> MarkerRef;

    fn remove_marker(&mut self, marker: MarkerRef);

    /// Drops every list entry. Markers are untouched.
    fn clear_entries(&mut self);

    fn focus_view(&mut self, coords: Coords);

    /// Shows the "deleting" affordance on an entry while a deferred delete is pending.
    fn mark_pending_delete(&mut self, _workout_id: &WorkoutId) {}

    fn render_controls(&mut self, _controls: &Controls) {}
}

/// Which collection-level controls to offer, and what they currently show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    /// "Delete all" only makes sense with at least two workouts.
    pub delete_all_visible: bool,
    pub sort_visible: bool,
    pub filter: Filter,
    /// Direction of the last distance sort, if any.
    pub distance_sort: Option<SortDirection>,
    pub duration_sort: Option<SortDirection>,
}

impl<V: ViewPort + ?Sized> ViewPort for &mut V {
    fn render_entry(&mut self, workout: &Workout) {
        (**self).render_entry(workout);
    }

    fn render_marker(&mut self, workout: &Workout) -> MarkerRef {
        (**self).render_marker(workout)
    }

    fn remove_marker(&mut self, marker: MarkerRef) {
        (**self).remove_marker(marker);
    }

    fn clear_entries(&mut self) {
        (**self).clear_entries();
    }

    fn focus_view(&mut self, coords: Coords) {
        (**self).focus_view(coords);
    }

    fn mark_pending_delete(&mut self, workout_id: &WorkoutId) {
        (**self).mark_pending_delete(workout_id);
    }

    fn render_controls(&mut self, controls: &Controls) {
        (**self).render_controls(controls);
    }
}
