// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Trailmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trailmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::WorkoutId;

/// Which workout, if any, is being replaced by an in-progress edit.
///
/// `target_index` is where the workout sat when the session opened. The collection re-resolves
/// the id on commit, so the index is informational once other entries have been removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Closed,
    Open {
        target_id: WorkoutId,
        target_index: usize,
    },
}

impl EditSession {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn target_id(&self) -> Option<&WorkoutId> {
        match self {
            Self::Open { target_id, .. } => Some(target_id),
            Self::Closed => None,
        }
    }

    pub fn target_index(&self) -> Option<usize> {
        match self {
            Self::Open { target_index, .. } => Some(*target_index),
            Self::Closed => None,
        }
    }

    pub fn targets(&self, workout_id: &WorkoutId) -> bool {
        self.target_id() == Some(workout_id)
    }

    /// Opens (or refreshes) the session. Fails with the current target when a different
    /// workout is already being edited.
    pub fn begin(&mut self, target_id: WorkoutId, target_index: usize) -> Result<(), WorkoutId> {
        if let Some(editing) = self.target_id() {
            if editing != &target_id {
                return Err(editing.clone());
            }
        }
        *self = Self::Open { target_id, target_index };
        Ok(())
    }

    /// Returns whether a session was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.is_open();
        *self = Self::Closed;
        was_open
    }
}
