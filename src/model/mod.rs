// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Trailmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trailmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A workout is an immutable record (running or cycling) pinned to a map position. Everything
//! derived from its inputs (pace, speed, description) is computed once at construction.

pub mod coords;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod workout;

pub use coords::{Coords, CoordsError};
pub use ids::{Id, IdError, WorkoutId, WorkoutIdGenerator};
pub use workout::{
    FieldProblem, InvalidField, MarkerRef, ParseWorkoutKindError, ValidationError, Workout,
    WorkoutDetail, WorkoutField, WorkoutInput, WorkoutKind, WorkoutParts,
};
