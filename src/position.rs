// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Trailmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trailmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Where the user is. Consulted once at startup to place the map and the home marker.

use std::fmt;

use crate::model::Coords;

pub trait PositionSource {
    fn current_position(&mut self) -> Result<Coords, PositionError>;
}

/// A position known up front (configured origin, demo mode).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPosition(Coords);

impl FixedPosition {
    pub fn new(coords: Coords) -> Self {
        Self(coords)
    }
}

impl PositionSource for FixedPosition {
    fn current_position(&mut self) -> Result<Coords, PositionError> {
        Ok(self.0)
    }
}

/// No position available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unavailable;

impl PositionSource for Unavailable {
    fn current_position(&mut self) -> Result<Coords, PositionError> {
        Err(PositionError::Unavailable)
    }
}

impl<P: PositionSource + ?Sized> PositionSource for Box<P> {
    fn current_position(&mut self) -> Result<Coords, PositionError> {
        (**self).current_position()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    Unavailable,
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable => f.write_str(
                "could not get your position (set --origin <lat,lng> or TRAILMARK_ORIGIN)",
            ),
        }
    }
}

impl std::error::Error for PositionError {}
