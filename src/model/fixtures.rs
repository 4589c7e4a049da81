// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Trailmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trailmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{DateTime, Duration, FixedOffset, TimeZone};

use super::coords::Coords;
use super::ids::WorkoutId;
use super::workout::{Workout, WorkoutInput};

fn wid(value: &str) -> WorkoutId {
    WorkoutId::new(value).expect("workout id")
}

pub(crate) fn lisbon() -> Coords {
    Coords::new(38.7223, -9.1393).expect("coords")
}

/// 2024-04-14 09:30 at UTC+2.
pub(crate) fn spring_morning() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(2 * 3600)
        .expect("offset")
        .with_ymd_and_hms(2024, 4, 14, 9, 30, 0)
        .single()
        .expect("timestamp")
}

/// A clock that always reads [`spring_morning`].
pub(crate) fn frozen_clock() -> DateTime<FixedOffset> {
    spring_morning()
}

pub(crate) fn running(id: &str, distance: f64, duration: f64, cadence: f64) -> Workout {
    Workout::new(
        wid(id),
        lisbon(),
        &WorkoutInput::running(distance, duration, cadence),
        spring_morning(),
    )
    .expect("valid running")
}

pub(crate) fn cycling(id: &str, distance: f64, duration: f64, elevation_gain: f64) -> Workout {
    Workout::new(
        wid(id),
        lisbon().offset(0.01, 0.01),
        &WorkoutInput::cycling(distance, duration, elevation_gain),
        spring_morning() + Duration::days(1),
    )
    .expect("valid cycling")
}

/// Two runs and two rides, deliberately unsorted by distance and duration.
pub(crate) fn mixed_week() -> Vec<Workout> {
    vec![
        running("1", 5.2, 24.0, 178.0),
        cycling("2", 27.0, 95.0, 523.0),
        running("3", 10.0, 52.0, 165.0),
        cycling("4", 12.5, 40.0, -120.0),
    ]
}
