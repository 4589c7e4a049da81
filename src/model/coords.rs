// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Trailmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trailmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

/// A WGS84 position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coords {
    lat: f64,
    lng: f64,
}

impl Coords {
    /// 0°N 0°E, where the map starts when nothing better is known.
    pub const NULL_ISLAND: Self = Self { lat: 0.0, lng: 0.0 };

    pub fn new(lat: f64, lng: f64) -> Result<Self, CoordsError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(CoordsError::Latitude(lat));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(CoordsError::Longitude(lng));
        }
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn to_array(self) -> [f64; 2] {
        [self.lat, self.lng]
    }

    /// Moves by the given deltas, clamping latitude and wrapping longitude into range.
    pub fn offset(self, d_lat: f64, d_lng: f64) -> Self {
        let lat = (self.lat + d_lat).clamp(-90.0, 90.0);
        let mut lng = self.lng + d_lng;
        if lng > 180.0 {
            lng -= 360.0;
        } else if lng < -180.0 {
            lng += 360.0;
        }
        Self { lat, lng }
    }
}

impl TryFrom<[f64; 2]> for Coords {
    type Error = CoordsError;

    fn try_from([lat, lng]: [f64; 2]) -> Result<Self, Self::Error> {
        Self::new(lat, lng)
    }
}

impl fmt::Display for Coords {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5}, {:.5}", self.lat, self.lng)
    }
}

/// Parses `"<lat>,<lng>"`.
impl FromStr for Coords {
    type Err = CoordsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((lat, lng)) = s.split_once(',') else {
            return Err(CoordsError::Syntax(s.to_owned()));
        };
        let lat = lat.trim().parse::<f64>().map_err(|_| CoordsError::Syntax(s.to_owned()))?;
        let lng = lng.trim().parse::<f64>().map_err(|_| CoordsError::Syntax(s.to_owned()))?;
        Self::new(lat, lng)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CoordsError {
    Latitude(f64),
    Longitude(f64),
    Syntax(String),
}

impl fmt::Display for CoordsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latitude(value) => write!(f, "latitude out of range: {value}"),
            Self::Longitude(value) => write!(f, "longitude out of range: {value}"),
            Self::Syntax(raw) => write!(f, "expected \"<lat>,<lng>\", got {raw:?}"),
        }
    }
}

impl std::error::Error for CoordsError {}
