// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Trailmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trailmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

impl<V: ViewPort, B: KeyValueStore> WorkoutCollection<V, B> {
    fn require_index(&self, workout_id: &WorkoutId) -> Result<usize, CollectionError> {
        self.index_of(workout_id)
            .ok_or_else(|| CollectionError::NotFound { workout_id: workout_id.clone() })
    }

    fn build_workout(
        &mut self,
        coords: Coords,
        input: &WorkoutInput,
    ) -> Result<Workout, ValidationError> {
        let created_at = (self.clock)();
        let millis = u64::try_from(created_at.timestamp_millis()).unwrap_or(0);
        let workouts = &self.workouts;
        let id = self
            .ids
            .next_id(millis, |candidate| workouts.iter().any(|w| w.id().as_str() == candidate));
        Workout::new(id, coords, input, created_at)
    }

    fn canonical_visible_ids(&self) -> Vec<WorkoutId> {
        self.workouts
            .iter()
            .filter(|w| self.filter.matches(w.kind()))
            .map(|w| w.id().clone())
            .collect()
    }

    /// Adds marker and list entry for a newly visible workout at the end of the list.
    fn show_workout(&mut self, index: usize) {
        let marker = self.view.render_marker(&self.workouts[index]);
        self.workouts[index].set_marker(Some(marker));
        self.view.render_entry(&self.workouts[index]);
        self.displayed.push(self.workouts[index].id().clone());
    }

    fn remove_all_markers(&mut self) {
        for workout in &mut self.workouts {
            if let Some(marker) = workout.take_marker() {
                self.view.remove_marker(marker);
            }
        }
    }

    /// Rebuilds markers and list from scratch in canonical order.
    fn redraw_all(&mut self) {
        self.remove_all_markers();
        for workout in &mut self.workouts {
            if self.filter.matches(workout.kind()) {
                let marker = self.view.render_marker(workout);
                workout.set_marker(Some(marker));
            }
        }
        self.displayed = self.canonical_visible_ids();
        self.redraw_entries();
        self.push_controls();
    }

    /// Re-lists `displayed` without touching markers.
    fn redraw_entries(&mut self) {
        let Self { workouts, displayed, view, deletes, .. } = self;
        view.clear_entries();
        for workout_id in displayed.iter() {
            let Some(workout) = workouts.iter().find(|w| w.id() == workout_id) else {
                continue;
            };
            view.render_entry(workout);
            if deletes.is_pending(workout_id) {
                view.mark_pending_delete(workout_id);
            }
        }
    }

    fn push_controls(&mut self) {
        let controls = self.controls();
        self.view.render_controls(&controls);
    }
}
