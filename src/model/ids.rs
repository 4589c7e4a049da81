// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Trailmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trailmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use smol_str::SmolStr;

/// A stable, typed identifier.
///
/// Ids are opaque strings. The only enforced shape is "non-empty, no whitespace" so they survive
/// being printed in list entries and round-tripped through the JSON store unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id<T> {
    value: SmolStr,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    pub fn new(value: impl AsRef<str>) -> Result<Self, IdError> {
        let value = value.as_ref();
        validate_id(value)?;
        Ok(Self {
            value: SmolStr::new(value),
            _marker: PhantomData,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value.to_string()
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> AsRef<str> for Id<T> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<T> Borrow<str> for Id<T> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl<T> TryFrom<String> for Id<T> {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Empty,
    ContainsWhitespace,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("id must not be empty"),
            Self::ContainsWhitespace => f.write_str("id must not contain whitespace"),
        }
    }
}

impl std::error::Error for IdError {}

fn validate_id(value: &str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    if value.chars().any(char::is_whitespace) {
        return Err(IdError::ContainsWhitespace);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WorkoutIdTag {}
pub type WorkoutId = Id<WorkoutIdTag>;

/// Hands out time-derived workout ids.
///
/// Ids are the creation time in milliseconds. Two workouts created within the same millisecond
/// (or after the wall clock stepped backwards) get the next free value instead.
#[derive(Debug, Clone, Default)]
pub struct WorkoutIdGenerator {
    last: u64,
}

impl WorkoutIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, now_millis: u64, is_taken: impl Fn(&str) -> bool) -> WorkoutId {
        let mut candidate = now_millis.max(self.last.saturating_add(1));
        loop {
            let id = WorkoutId::new(candidate.to_string())
                .expect("decimal digits are a valid workout id");
            if !is_taken(id.as_str()) {
                self.last = candidate;
                return id;
            }
            candidate = candidate.saturating_add(1);
        }
    }
}
