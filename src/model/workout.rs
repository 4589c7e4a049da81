// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Trailmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trailmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use smallvec::SmallVec;

use super::coords::Coords;
use super::ids::WorkoutId;

/// The workout variant tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Cycling => "cycling",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Running => "Running",
            Self::Cycling => "Cycling",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Self::Running => Self::Cycling,
            Self::Cycling => Self::Running,
        }
    }

    /// The field that carries the variant-specific value.
    pub fn extra_field(self) -> WorkoutField {
        match self {
            Self::Running => WorkoutField::Cadence,
            Self::Cycling => WorkoutField::ElevationGain,
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutKind {
    type Err = ParseWorkoutKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "running" => Ok(Self::Running),
            "cycling" => Ok(Self::Cycling),
            other => Err(ParseWorkoutKindError { value: other.to_owned() }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWorkoutKindError {
    value: String,
}

impl fmt::Display for ParseWorkoutKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown workout type {:?} (expected running|cycling)", self.value)
    }
}

impl std::error::Error for ParseWorkoutKindError {}

/// Numeric workout fields that are validated on construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkoutField {
    Distance,
    Duration,
    Cadence,
    ElevationGain,
    /// The stored pace/speed of a restored record.
    Metric,
}

impl WorkoutField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Distance => "distance",
            Self::Duration => "duration",
            Self::Cadence => "cadence",
            Self::ElevationGain => "elevationGain",
            Self::Metric => "pace/speed",
        }
    }
}

impl fmt::Display for WorkoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProblem {
    NotFinite,
    NotPositive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidField {
    pub field: WorkoutField,
    pub problem: FieldProblem,
}

/// Rejected workout input; names every offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    kind: WorkoutKind,
    fields: SmallVec<[InvalidField; 3]>,
}

impl ValidationError {
    pub fn kind(&self) -> WorkoutKind {
        self.kind
    }

    pub fn fields(&self) -> &[InvalidField] {
        &self.fields
    }

    pub fn contains(&self, field: WorkoutField) -> bool {
        self.fields.iter().any(|invalid| invalid.field == field)
    }

    /// The short user-facing message shown next to the form.
    pub fn message(&self) -> &'static str {
        match self.kind {
            WorkoutKind::Running => "Inputs must be positive numbers!",
            WorkoutKind::Cycling => "Distance and duration must be positive numbers!",
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())?;
        for (idx, invalid) in self.fields.iter().enumerate() {
            let sep = if idx == 0 { " (" } else { ", " };
            let problem = match invalid.problem {
                FieldProblem::NotFinite => "not a number",
                FieldProblem::NotPositive => "not positive",
            };
            write!(f, "{sep}{}: {problem}", invalid.field)?;
        }
        if !self.fields.is_empty() {
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Raw numbers for a new or replacement workout, as entered in a form.
///
/// `extra` is the cadence for running and the elevation gain for cycling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkoutInput {
    pub kind: WorkoutKind,
    pub distance: f64,
    pub duration: f64,
    pub extra: f64,
}

impl WorkoutInput {
    pub fn running(distance: f64, duration: f64, cadence: f64) -> Self {
        Self { kind: WorkoutKind::Running, distance, duration, extra: cadence }
    }

    pub fn cycling(distance: f64, duration: f64, elevation_gain: f64) -> Self {
        Self { kind: WorkoutKind::Cycling, distance, duration, extra: elevation_gain }
    }

    /// Coerces form text the way a browser number input does: blank is `0`, anything that is
    /// not a number becomes NaN and is reported by [`WorkoutInput::validate`].
    pub fn parse(kind: WorkoutKind, distance: &str, duration: &str, extra: &str) -> Self {
        Self {
            kind,
            distance: parse_form_number(distance),
            duration: parse_form_number(duration),
            extra: parse_form_number(extra),
        }
    }

    /// Running needs all three numbers finite and positive. Cycling needs all three finite but
    /// only distance and duration positive: elevation loss is a valid ride.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut fields = SmallVec::new();
        check_positive(&mut fields, WorkoutField::Distance, self.distance);
        check_positive(&mut fields, WorkoutField::Duration, self.duration);
        match self.kind {
            WorkoutKind::Running => check_positive(&mut fields, WorkoutField::Cadence, self.extra),
            WorkoutKind::Cycling => {
                check_finite(&mut fields, WorkoutField::ElevationGain, self.extra);
            }
        }

        if fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { kind: self.kind, fields })
        }
    }
}

fn parse_form_number(raw: &str) -> f64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0.0;
    }
    raw.parse::<f64>().unwrap_or(f64::NAN)
}

fn check_finite(fields: &mut SmallVec<[InvalidField; 3]>, field: WorkoutField, value: f64) -> bool {
    if value.is_finite() {
        return true;
    }
    fields.push(InvalidField { field, problem: FieldProblem::NotFinite });
    false
}

fn check_positive(fields: &mut SmallVec<[InvalidField; 3]>, field: WorkoutField, value: f64) {
    if check_finite(fields, field, value) && value <= 0.0 {
        fields.push(InvalidField { field, problem: FieldProblem::NotPositive });
    }
}

/// Extreme but finite inputs can still overflow pace or speed, which JSON cannot store.
fn check_metric(detail: &WorkoutDetail) -> Result<(), ValidationError> {
    if detail.metric().is_finite() {
        return Ok(());
    }
    let mut fields = SmallVec::new();
    fields.push(InvalidField { field: WorkoutField::Metric, problem: FieldProblem::NotFinite });
    Err(ValidationError { kind: detail.kind(), fields })
}

/// Variant-specific data: the entered value plus the metric derived from it at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutDetail {
    /// `pace` is min/km.
    Running { cadence: f64, pace: f64 },
    /// `speed` is km/h.
    Cycling { elevation_gain: f64, speed: f64 },
}

impl WorkoutDetail {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            Self::Running { .. } => WorkoutKind::Running,
            Self::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    pub fn extra(&self) -> f64 {
        match self {
            Self::Running { cadence, .. } => *cadence,
            Self::Cycling { elevation_gain, .. } => *elevation_gain,
        }
    }

    pub fn metric(&self) -> f64 {
        match self {
            Self::Running { pace, .. } => *pace,
            Self::Cycling { speed, .. } => *speed,
        }
    }
}

/// Opaque handle to a rendered map marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerRef(u64);

impl MarkerRef {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Stored fields of a workout, used to rebuild one without re-deriving anything.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutParts {
    pub id: WorkoutId,
    pub coords: Coords,
    pub distance: f64,
    pub duration: f64,
    pub created_at: DateTime<FixedOffset>,
    pub description: String,
    pub detail: WorkoutDetail,
}

/// A logged exercise session.
///
/// Everything except the marker handle is fixed at construction. Two workouts are equal when
/// their ids are equal; use [`Workout::same_record`] to compare contents.
#[derive(Debug, Clone)]
pub struct Workout {
    id: WorkoutId,
    coords: Coords,
    distance: f64,
    duration: f64,
    created_at: DateTime<FixedOffset>,
    description: String,
    detail: WorkoutDetail,
    marker: Option<MarkerRef>,
}

impl Workout {
    pub fn new(
        id: WorkoutId,
        coords: Coords,
        input: &WorkoutInput,
        created_at: DateTime<FixedOffset>,
    ) -> Result<Self, ValidationError> {
        input.validate()?;

        let detail = match input.kind {
            WorkoutKind::Running => WorkoutDetail::Running {
                cadence: input.extra,
                pace: input.duration / input.distance,
            },
            WorkoutKind::Cycling => WorkoutDetail::Cycling {
                elevation_gain: input.extra,
                speed: input.distance / (input.duration / 60.0),
            },
        };
        check_metric(&detail)?;

        Ok(Self {
            id,
            coords,
            distance: input.distance,
            duration: input.duration,
            description: describe(input.kind, &created_at),
            created_at,
            detail,
            marker: None,
        })
    }

    /// Rebuilds a stored workout. Inputs are re-validated, the stored description and metric are
    /// kept as they are.
    pub fn restore(parts: WorkoutParts) -> Result<Self, ValidationError> {
        let kind = parts.detail.kind();
        let input = WorkoutInput {
            kind,
            distance: parts.distance,
            duration: parts.duration,
            extra: parts.detail.extra(),
        };
        input.validate()?;
        check_metric(&parts.detail)?;

        Ok(Self {
            id: parts.id,
            coords: parts.coords,
            distance: parts.distance,
            duration: parts.duration,
            created_at: parts.created_at,
            description: parts.description,
            detail: parts.detail,
            marker: None,
        })
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn kind(&self) -> WorkoutKind {
        self.detail.kind()
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn created_at(&self) -> &DateTime<FixedOffset> {
        &self.created_at
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn detail(&self) -> &WorkoutDetail {
        &self.detail
    }

    pub fn pace(&self) -> Option<f64> {
        match self.detail {
            WorkoutDetail::Running { pace, .. } => Some(pace),
            WorkoutDetail::Cycling { .. } => None,
        }
    }

    pub fn speed(&self) -> Option<f64> {
        match self.detail {
            WorkoutDetail::Cycling { speed, .. } => Some(speed),
            WorkoutDetail::Running { .. } => None,
        }
    }

    pub fn marker(&self) -> Option<MarkerRef> {
        self.marker
    }

    pub(crate) fn set_marker(&mut self, marker: Option<MarkerRef>) {
        self.marker = marker;
    }

    pub(crate) fn take_marker(&mut self) -> Option<MarkerRef> {
        self.marker.take()
    }

    /// The values a form needs to edit this workout.
    pub fn to_input(&self) -> WorkoutInput {
        WorkoutInput {
            kind: self.kind(),
            distance: self.distance,
            duration: self.duration,
            extra: self.detail.extra(),
        }
    }

    pub fn to_parts(&self) -> WorkoutParts {
        WorkoutParts {
            id: self.id.clone(),
            coords: self.coords,
            distance: self.distance,
            duration: self.duration,
            created_at: self.created_at,
            description: self.description.clone(),
            detail: self.detail,
        }
    }

    /// Field-by-field comparison of everything that is persisted.
    pub fn same_record(&self, other: &Self) -> bool {
        self.to_parts() == other.to_parts()
    }
}

impl PartialEq for Workout {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Workout {}

impl Hash for Workout {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

fn describe(kind: WorkoutKind, created_at: &DateTime<FixedOffset>) -> String {
    format!("{} on {}", kind.label(), created_at.format("%B %-d"))
}
