// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Trailmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trailmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Duration, FixedOffset, TimeZone};
use trailmark::model::{Coords, MarkerRef, Workout, WorkoutId, WorkoutInput};
use trailmark::store::{MemoryStore, WorkoutArchive};
use trailmark::view::ViewPort;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(prefix: &str) -> Self {
        let pid = std::process::id();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut path = std::env::temp_dir();
        path.push(format!("trailmark_bench_{prefix}_{pid}_{nanos}_{counter}"));
        std::fs::create_dir_all(&path).expect("create temp dir");

        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// A view that only hands out marker refs.
#[derive(Debug, Default)]
pub struct NullView {
    next_marker: u64,
}

impl ViewPort for NullView {
    fn render_entry(&mut self, _workout: &Workout) {}

    fn render_marker(&mut self, _workout: &Workout) -> MarkerRef {
        self.next_marker += 1;
        MarkerRef::new(self.next_marker)
    }

    fn remove_marker(&mut self, _marker: MarkerRef) {}

    fn clear_entries(&mut self) {}

    fn focus_view(&mut self, _coords: Coords) {}
}

pub fn epoch() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .expect("offset")
        .with_ymd_and_hms(2024, 1, 1, 7, 0, 0)
        .single()
        .expect("timestamp")
}

/// `count` workouts alternating running and cycling, with distances and durations scrambled by a
/// fixed stride so sorts have real work to do.
pub fn workouts(count: usize) -> Vec<Workout> {
    let origin = Coords::new(46.5, 7.5).expect("origin");
    (0..count)
        .map(|idx| {
            let scrambled = (idx * 7919) % 997;
            let distance = 1.0 + scrambled as f64 / 10.0;
            let duration = 5.0 + ((idx * 104_729) % 613) as f64 / 3.0;
            let input = if idx % 2 == 0 {
                WorkoutInput::running(distance, duration, 150.0 + (idx % 40) as f64)
            } else {
                WorkoutInput::cycling(distance, duration, (idx % 900) as f64 - 300.0)
            };
            let coords = origin.offset((idx % 50) as f64 * 0.01, (idx / 50) as f64 * 0.01);
            let id = WorkoutId::new(format!("{}", 1_700_000_000_000u64 + idx as u64)).expect("id");
            Workout::new(id, coords, &input, epoch() + Duration::hours(idx as i64))
                .expect("valid workout")
        })
        .collect()
}

pub fn seeded_store(count: usize) -> MemoryStore {
    let mut archive = WorkoutArchive::new(MemoryStore::new());
    assert!(archive.save(&workouts(count)));
    archive.into_backend()
}
