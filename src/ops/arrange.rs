// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Trailmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trailmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Display-only ordering and filtering.

use std::fmt;

use crate::model::{Workout, WorkoutKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    Distance,
    Duration,
}

impl SortField {
    pub fn key(self, workout: &Workout) -> f64 {
        match self {
            Self::Distance => workout.distance(),
            Self::Duration => workout.duration(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::Duration => "duration",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "↑",
            Self::Descending => "↓",
        }
    }
}

/// Per-field direction toggles. Each field starts ascending and alternates on every sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    distance: Option<SortDirection>,
    duration: Option<SortDirection>,
}

impl SortState {
    pub fn last(&self, field: SortField) -> Option<SortDirection> {
        match field {
            SortField::Distance => self.distance,
            SortField::Duration => self.duration,
        }
    }

    /// Advances the toggle for `field` and returns the direction to sort in now.
    pub fn toggle(&mut self, field: SortField) -> SortDirection {
        let slot = match field {
            SortField::Distance => &mut self.distance,
            SortField::Duration => &mut self.duration,
        };
        let next = slot.map_or(SortDirection::Ascending, SortDirection::flip);
        *slot = Some(next);
        next
    }
}

/// Workout type filter; cycles all → running → cycling → all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    #[default]
    All,
    Running,
    Cycling,
}

impl Filter {
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Running,
            Self::Running => Self::Cycling,
            Self::Cycling => Self::All,
        }
    }

    pub fn matches(self, kind: WorkoutKind) -> bool {
        match self {
            Self::All => true,
            Self::Running => kind == WorkoutKind::Running,
            Self::Cycling => kind == WorkoutKind::Cycling,
        }
    }

    /// Label shown on the filter control.
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "filter by type",
            Self::Running => "running",
            Self::Cycling => "cycling",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stable sort: equal keys keep their incoming order in both directions.
pub(crate) fn sort_workouts(items: &mut [&Workout], field: SortField, direction: SortDirection) {
    items.sort_by(|a, b| {
        let ord = field.key(a).total_cmp(&field.key(b));
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}
