// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Trailmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trailmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

use crate::model::WorkoutId;

pub const DEFAULT_DELETE_DELAY: Duration = Duration::from_millis(1200);

/// Handle for a scheduled delete; used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeleteTicket(u64);

impl DeleteTicket {
    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone)]
struct PendingDelete {
    ticket: DeleteTicket,
    workout_id: WorkoutId,
    due: Instant,
}

/// Deletes waiting for their delay to elapse. At most one entry per workout.
///
/// Time is passed in rather than read, so callers (and tests) own the clock.
#[derive(Debug, Clone)]
pub struct DeleteQueue {
    delay: Duration,
    next_ticket: u64,
    pending: Vec<PendingDelete>,
}

impl Default for DeleteQueue {
    fn default() -> Self {
        Self::new(DEFAULT_DELETE_DELAY)
    }
}

impl DeleteQueue {
    pub fn new(delay: Duration) -> Self {
        Self { delay, next_ticket: 0, pending: Vec::new() }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn ticket_for(&self, workout_id: &WorkoutId) -> Option<DeleteTicket> {
        self.pending
            .iter()
            .find(|entry| &entry.workout_id == workout_id)
            .map(|entry| entry.ticket)
    }

    pub fn is_pending(&self, workout_id: &WorkoutId) -> bool {
        self.ticket_for(workout_id).is_some()
    }

    pub fn pending_ids(&self) -> impl Iterator<Item = &WorkoutId> {
        self.pending.iter().map(|entry| &entry.workout_id)
    }

    /// Schedules a delete due `delay` after `now`. A workout that is already pending keeps its
    /// original ticket and due time.
    pub fn schedule(&mut self, workout_id: WorkoutId, now: Instant) -> DeleteTicket {
        if let Some(ticket) = self.ticket_for(&workout_id) {
            return ticket;
        }
        self.next_ticket += 1;
        let ticket = DeleteTicket(self.next_ticket);
        self.pending.push(PendingDelete { ticket, workout_id, due: now + self.delay });
        ticket
    }

    pub fn cancel(&mut self, ticket: DeleteTicket) -> Option<WorkoutId> {
        let idx = self.pending.iter().position(|entry| entry.ticket == ticket)?;
        Some(self.pending.remove(idx).workout_id)
    }

    pub fn cancel_for(&mut self, workout_id: &WorkoutId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|entry| &entry.workout_id != workout_id);
        before != self.pending.len()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.pending.iter().map(|entry| entry.due).min()
    }

    /// Removes and returns every entry due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<(DeleteTicket, WorkoutId)> {
        let mut due = Vec::new();
        let mut idx = 0;
        while idx < self.pending.len() {
            if self.pending[idx].due <= now {
                due.push(self.pending.remove(idx));
            } else {
                idx += 1;
            }
        }
        due.sort_by_key(|entry| (entry.due, entry.ticket));
        due.into_iter().map(|entry| (entry.ticket, entry.workout_id)).collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
