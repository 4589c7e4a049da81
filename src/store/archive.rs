// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Trailmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trailmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{KeyValueStore, StoreError};
use crate::model::{Coords, Workout, WorkoutDetail, WorkoutId, WorkoutParts};

/// Key the collection is stored under.
pub const WORKOUTS_KEY: &str = "workouts";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedWorkout {
    id: String,
    coords: [f64; 2],
    distance: f64,
    duration: f64,
    #[serde(alias = "date")]
    created_at: DateTime<FixedOffset>,
    description: String,
    #[serde(flatten)]
    detail: PersistedDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum PersistedDetail {
    Running {
        cadence: f64,
        pace: f64,
    },
    #[serde(rename_all = "camelCase")]
    Cycling {
        elevation_gain: f64,
        speed: f64,
    },
}

impl From<&Workout> for PersistedWorkout {
    fn from(workout: &Workout) -> Self {
        let detail = match *workout.detail() {
            WorkoutDetail::Running { cadence, pace } => PersistedDetail::Running { cadence, pace },
            WorkoutDetail::Cycling { elevation_gain, speed } => {
                PersistedDetail::Cycling { elevation_gain, speed }
            }
        };
        Self {
            id: workout.id().to_string(),
            coords: workout.coords().to_array(),
            distance: workout.distance(),
            duration: workout.duration(),
            created_at: *workout.created_at(),
            description: workout.description().to_owned(),
            detail,
        }
    }
}

impl PersistedWorkout {
    fn into_workout(self) -> Result<Workout, String> {
        let id = WorkoutId::new(&self.id).map_err(|err| format!("id: {err}"))?;
        let coords = Coords::try_from(self.coords).map_err(|err| format!("coords: {err}"))?;
        let detail = match self.detail {
            PersistedDetail::Running { cadence, pace } => WorkoutDetail::Running { cadence, pace },
            PersistedDetail::Cycling { elevation_gain, speed } => {
                WorkoutDetail::Cycling { elevation_gain, speed }
            }
        };
        Workout::restore(WorkoutParts {
            id,
            coords,
            distance: self.distance,
            duration: self.duration,
            created_at: self.created_at,
            description: self.description,
            detail,
        })
        .map_err(|err| err.to_string())
    }
}

/// Saves and loads the whole collection under [`WORKOUTS_KEY`].
///
/// Nothing here returns an error: failed writes and unreadable data are logged and the caller
/// carries on with what it has in memory.
#[derive(Debug, Clone)]
pub struct WorkoutArchive<B> {
    backend: B,
}

impl<B: KeyValueStore> WorkoutArchive<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Overwrites the stored collection. Returns whether the write went through.
    pub fn save(&mut self, workouts: &[Workout]) -> bool {
        match self.try_save(workouts) {
            Ok(()) => {
                debug!(count = workouts.len(), "saved workouts");
                true
            }
            Err(err) => {
                warn!(error = %err, count = workouts.len(), "failed to save workouts");
                false
            }
        }
    }

    fn try_save(&mut self, workouts: &[Workout]) -> Result<(), StoreError> {
        let records = workouts.iter().map(PersistedWorkout::from).collect::<Vec<_>>();
        let json = serde_json::to_string(&records)
            .map_err(|source| StoreError::Json { key: WORKOUTS_KEY.to_owned(), source })?;
        self.backend.set(WORKOUTS_KEY, &json)
    }

    /// Reads the stored collection in stored order.
    ///
    /// A missing key, unreadable backend or a document that is not a JSON array yields an empty
    /// collection. Individual records that do not describe a valid workout, or repeat an id
    /// already seen, are skipped.
    pub fn load(&self) -> Vec<Workout> {
        let raw = match self.backend.get(WORKOUTS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(error = %err, "failed to read stored workouts");
                return Vec::new();
            }
        };

        let records = match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
            Ok(records) => records,
            Err(source) => {
                let err = StoreError::Json { key: WORKOUTS_KEY.to_owned(), source };
                warn!(error = %err, "stored workouts are not a JSON array, starting empty");
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        let mut workouts = Vec::with_capacity(records.len());
        for (index, record) in records.into_iter().enumerate() {
            let workout = serde_json::from_value::<PersistedWorkout>(record)
                .map_err(|err| err.to_string())
                .and_then(PersistedWorkout::into_workout);
            match workout {
                Ok(workout) if seen.insert(workout.id().clone()) => workouts.push(workout),
                Ok(workout) => {
                    warn!(index, workout_id = %workout.id(), "skipping duplicate stored workout");
                }
                Err(reason) => warn!(index, %reason, "skipping unreadable stored workout"),
            }
        }
        debug!(count = workouts.len(), "loaded workouts");
        workouts
    }

    /// Removes the stored collection entirely.
    pub fn clear(&mut self) -> bool {
        match self.backend.remove(WORKOUTS_KEY) {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "failed to clear stored workouts");
                false
            }
        }
    }
}
