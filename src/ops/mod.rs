// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Trailmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trailmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The workout collection and every operation that changes it.
//!
//! [`WorkoutCollection`] owns the canonical ordered list. Each mutation validates first, then
//! changes the list, persists the whole list through the archive, and finally tells the view
//! what to redraw. The view and the archive never change the list on their own.

mod arrange;
mod deferred;
mod edit;

use std::fmt;
use std::time::{Duration, Instant};

use chrono::{DateTime, FixedOffset, Local};
use tracing::{debug, warn};

pub use arrange::{Filter, SortDirection, SortField, SortState};
pub use deferred::{DeleteQueue, DeleteTicket, DEFAULT_DELETE_DELAY};
pub use edit::EditSession;

use crate::model::{
    Coords, ValidationError, Workout, WorkoutId, WorkoutIdGenerator, WorkoutInput,
};
use crate::store::{KeyValueStore, WorkoutArchive};
use crate::view::{Controls, ViewPort};

/// Source of creation timestamps.
pub type Clock = fn() -> DateTime<FixedOffset>;

fn local_now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    Validation(ValidationError),
    NotFound { workout_id: WorkoutId },
    EditInProgress { editing: WorkoutId },
    NoActiveEdit,
}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { workout_id } => write!(f, "workout not found (id={workout_id})"),
            Self::EditInProgress { editing } => {
                write!(f, "another workout is being edited (id={editing})")
            }
            Self::NoActiveEdit => f.write_str("no workout is being edited"),
        }
    }
}

impl std::error::Error for CollectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for CollectionError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

/// The canonical workout list plus its view and persistence.
///
/// Markers exist exactly for the workouts that pass the active filter. The list pane shows the
/// same subset, in canonical order until a sort reorders it.
pub struct WorkoutCollection<V, B> {
    workouts: Vec<Workout>,
    displayed: Vec<WorkoutId>,
    view: V,
    archive: WorkoutArchive<B>,
    edit: EditSession,
    sort: SortState,
    filter: Filter,
    deletes: DeleteQueue,
    ids: WorkoutIdGenerator,
    clock: Clock,
}

impl<V: ViewPort, B: KeyValueStore> WorkoutCollection<V, B> {
    /// An empty collection. Call [`WorkoutCollection::load`] to pick up stored workouts.
    pub fn new(view: V, archive: WorkoutArchive<B>) -> Self {
        Self {
            workouts: Vec::new(),
            displayed: Vec::new(),
            view,
            archive,
            edit: EditSession::default(),
            sort: SortState::default(),
            filter: Filter::default(),
            deletes: DeleteQueue::default(),
            ids: WorkoutIdGenerator::new(),
            clock: local_now,
        }
    }

    pub fn with_delete_delay(mut self, delay: Duration) -> Self {
        self.deletes = DeleteQueue::new(delay);
        self
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    pub fn get(&self, workout_id: &WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|w| w.id() == workout_id)
    }

    pub fn index_of(&self, workout_id: &WorkoutId) -> Option<usize> {
        self.workouts.iter().position(|w| w.id() == workout_id)
    }

    /// Ids in list-pane order.
    pub fn displayed(&self) -> &[WorkoutId] {
        &self.displayed
    }

    pub fn displayed_workouts(&self) -> impl Iterator<Item = &Workout> {
        self.displayed.iter().filter_map(|id| self.get(id))
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    pub fn edit_session(&self) -> &EditSession {
        &self.edit
    }

    pub fn is_delete_pending(&self, workout_id: &WorkoutId) -> bool {
        self.deletes.is_pending(workout_id)
    }

    pub fn pending_ticket(&self, workout_id: &WorkoutId) -> Option<DeleteTicket> {
        self.deletes.ticket_for(workout_id)
    }

    pub fn delete_delay(&self) -> Duration {
        self.deletes.delay()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn archive(&self) -> &WorkoutArchive<B> {
        &self.archive
    }

    pub fn controls(&self) -> Controls {
        let offer_bulk = self.workouts.len() >= 2;
        Controls {
            delete_all_visible: offer_bulk,
            sort_visible: offer_bulk,
            filter: self.filter,
            distance_sort: self.sort.last(SortField::Distance),
            duration_sort: self.sort.last(SortField::Duration),
        }
    }

    /// Replaces the in-memory list with whatever the archive holds and redraws everything.
    /// Returns the number of workouts loaded.
    pub fn load(&mut self) -> usize {
        let loaded = self.archive.load();
        self.remove_all_markers();
        self.workouts = loaded;
        self.edit.close();
        self.deletes.clear();
        self.redraw_all();
        debug!(count = self.workouts.len(), "collection loaded");
        self.workouts.len()
    }

    pub fn create(
        &mut self,
        coords: Coords,
        input: &WorkoutInput,
    ) -> Result<&Workout, CollectionError> {
        if let Some(editing) = self.edit.target_id() {
            return Err(CollectionError::EditInProgress { editing: editing.clone() });
        }
        input.validate()?;

        let workout = self.build_workout(coords, input)?;
        debug!(workout_id = %workout.id(), kind = %workout.kind(), "workout created");
        self.workouts.push(workout);
        let index = self.workouts.len() - 1;

        if self.filter.matches(self.workouts[index].kind()) {
            self.show_workout(index);
        }
        self.archive.save(&self.workouts);
        self.push_controls();
        Ok(&self.workouts[index])
    }

    /// Opens an edit session for `workout_id` and returns its current values for a form.
    pub fn begin_edit(&mut self, workout_id: &WorkoutId) -> Result<WorkoutInput, CollectionError> {
        let index = self.require_index(workout_id)?;
        self.edit
            .begin(workout_id.clone(), index)
            .map_err(|editing| CollectionError::EditInProgress { editing })?;
        debug!(workout_id = %workout_id, index, "edit session opened");
        Ok(self.workouts[index].to_input())
    }

    /// Replaces the edited workout with one built from `input`, at the same position.
    ///
    /// The replacement gets a fresh id and timestamp but keeps the original coordinates. The
    /// type may change. On a validation error the session stays open.
    pub fn commit_edit(&mut self, input: &WorkoutInput) -> Result<&Workout, CollectionError> {
        let Some(target_id) = self.edit.target_id().cloned() else {
            return Err(CollectionError::NoActiveEdit);
        };
        input.validate()?;

        let Some(index) = self.index_of(&target_id) else {
            self.edit.close();
            warn!(workout_id = %target_id, "edit target vanished, session closed");
            return Err(CollectionError::NotFound { workout_id: target_id });
        };

        let coords = self.workouts[index].coords();
        let replacement = self.build_workout(coords, input)?;

        let mut original = self.workouts.remove(index);
        if let Some(marker) = original.take_marker() {
            self.view.remove_marker(marker);
        }
        self.deletes.cancel_for(&target_id);
        debug!(
            from = %target_id,
            to = %replacement.id(),
            index,
            "workout replaced by edit"
        );
        self.workouts.insert(index, replacement);
        self.edit.close();

        self.archive.save(&self.workouts);
        self.redraw_all();
        Ok(&self.workouts[index])
    }

    /// Closes the edit session without touching the list. Returns whether one was open.
    pub fn cancel_edit(&mut self) -> bool {
        let was_open = self.edit.close();
        if was_open {
            debug!("edit session cancelled");
        }
        was_open
    }

    /// Removes a workout right away and focuses the map where it was.
    pub fn delete_one(&mut self, workout_id: &WorkoutId) -> Result<Workout, CollectionError> {
        let index = self.require_index(workout_id)?;
        let mut removed = self.workouts.remove(index);
        if let Some(marker) = removed.take_marker() {
            self.view.remove_marker(marker);
        }
        self.deletes.cancel_for(workout_id);
        if self.edit.targets(workout_id) {
            self.edit.close();
        }
        self.displayed.retain(|id| id != workout_id);
        debug!(workout_id = %workout_id, index, "workout deleted");

        self.archive.save(&self.workouts);
        self.redraw_entries();
        self.view.focus_view(removed.coords());
        self.push_controls();
        Ok(removed)
    }

    /// Schedules a delete that commits once the configured delay has passed.
    ///
    /// Until then the collection is unchanged; asking again for the same workout returns the
    /// ticket already issued.
    pub fn request_delete(
        &mut self,
        workout_id: &WorkoutId,
        now: Instant,
    ) -> Result<DeleteTicket, CollectionError> {
        self.require_index(workout_id)?;
        if let Some(ticket) = self.deletes.ticket_for(workout_id) {
            return Ok(ticket);
        }
        let ticket = self.deletes.schedule(workout_id.clone(), now);
        self.view.mark_pending_delete(workout_id);
        debug!(workout_id = %workout_id, ticket = ticket.raw(), "delete scheduled");
        Ok(ticket)
    }

    /// Returns whether the ticket was still pending.
    pub fn cancel_delete(&mut self, ticket: DeleteTicket) -> bool {
        let Some(workout_id) = self.deletes.cancel(ticket) else {
            return false;
        };
        debug!(workout_id = %workout_id, ticket = ticket.raw(), "scheduled delete cancelled");
        self.redraw_entries();
        true
    }

    /// Commits every scheduled delete whose time has come. Returns the ids actually removed.
    pub fn run_due_deletes(&mut self, now: Instant) -> Vec<WorkoutId> {
        let mut deleted = Vec::new();
        for (ticket, workout_id) in self.deletes.take_due(now) {
            match self.delete_one(&workout_id) {
                Ok(_) => deleted.push(workout_id),
                Err(_) => {
                    warn!(workout_id = %workout_id, ticket = ticket.raw(), "scheduled delete target is gone");
                }
            }
        }
        deleted
    }

    pub fn next_delete_due(&self) -> Option<Instant> {
        self.deletes.next_due()
    }

    /// Empties the collection and the stored copy. Returns how many workouts were removed.
    pub fn delete_all(&mut self) -> usize {
        if self.workouts.is_empty() {
            return 0;
        }
        let count = self.workouts.len();
        self.remove_all_markers();
        self.workouts.clear();
        self.displayed.clear();
        self.deletes.clear();
        self.edit.close();
        debug!(count, "all workouts deleted");

        self.archive.save(&self.workouts);
        self.view.clear_entries();
        self.push_controls();
        count
    }

    /// Re-lists the visible workouts ordered by `field`. The direction alternates per field,
    /// starting ascending. The canonical order and the stored copy are not affected.
    pub fn sort(&mut self, field: SortField) -> SortDirection {
        let direction = self.sort.toggle(field);
        let mut visible = self
            .workouts
            .iter()
            .filter(|w| self.filter.matches(w.kind()))
            .collect::<Vec<_>>();
        arrange::sort_workouts(&mut visible, field, direction);
        self.displayed = visible.into_iter().map(|w| w.id().clone()).collect();
        debug!(field = field.label(), ?direction, "workouts sorted");

        self.redraw_entries();
        self.push_controls();
        direction
    }

    /// Moves to the next type filter and brings markers and list in line with it.
    pub fn cycle_filter(&mut self) -> Filter {
        let previous = self.filter;
        let next = previous.next();
        self.filter = next;

        for index in 0..self.workouts.len() {
            let kind = self.workouts[index].kind();
            match (previous.matches(kind), next.matches(kind)) {
                (true, false) => {
                    if let Some(marker) = self.workouts[index].take_marker() {
                        self.view.remove_marker(marker);
                    }
                }
                (false, true) => {
                    let marker = self.view.render_marker(&self.workouts[index]);
                    self.workouts[index].set_marker(Some(marker));
                }
                _ => {}
            }
        }
        self.displayed = self.canonical_visible_ids();
        debug!(filter = %next, "filter changed");

        self.redraw_entries();
        self.push_controls();
        next
    }

    /// Centres the map on a workout.
    pub fn focus_workout(&mut self, workout_id: &WorkoutId) -> Result<Coords, CollectionError> {
        let index = self.require_index(workout_id)?;
        let coords = self.workouts[index].coords();
        self.view.focus_view(coords);
        Ok(coords)
    }

    /// Drops the stored copy and empties the collection without writing an empty list back.
    pub fn reset(&mut self) {
        self.archive.clear();
        self.remove_all_markers();
        self.workouts.clear();
        self.displayed.clear();
        self.deletes.clear();
        self.edit.close();
        self.view.clear_entries();
        self.push_controls();
        debug!("collection reset");
    }
}

// View reconciliation helpers shared by the operations above.
include!("reconcile.rs");

#[cfg(test)]
mod tests;
