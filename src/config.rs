// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Trailmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trailmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Runtime settings: defaults, then `TRAILMARK_*` environment variables. The binary applies its
//! command-line flags last.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::model::{Coords, CoordsError};
use crate::ops::DEFAULT_DELETE_DELAY;
use crate::position::{FixedPosition, PositionSource, Unavailable};
use crate::store::{FileStore, WriteDurability};

pub const ENV_STORE: &str = "TRAILMARK_STORE";
pub const ENV_ORIGIN: &str = "TRAILMARK_ORIGIN";
pub const ENV_DURABLE_WRITES: &str = "TRAILMARK_DURABLE_WRITES";
pub const ENV_DELETE_DELAY_MS: &str = "TRAILMARK_DELETE_DELAY_MS";
pub const ENV_LOG: &str = "TRAILMARK_LOG";

pub const DEFAULT_LOG_FILTER: &str = "trailmark=info";
pub const LOG_FILE_NAME: &str = "trailmark.log";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub store_dir: PathBuf,
    pub durability: WriteDurability,
    /// Home position. `None` means no position is available.
    pub origin: Option<Coords>,
    pub delete_delay: Duration,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from("."),
            durability: WriteDurability::default(),
            origin: None,
            delete_delay: DEFAULT_DELETE_DELAY,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl Settings {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().overlay_env(|name| std::env::var(name).ok())
    }

    /// Overlays values found through `lookup`; unset or blank variables keep the current value.
    pub fn overlay_env(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        if let Some(dir) = get(ENV_STORE) {
            self.store_dir = PathBuf::from(dir);
        }
        if let Some(raw) = get(ENV_ORIGIN) {
            self.origin = Some(parse_origin(ENV_ORIGIN, &raw)?);
        }
        if let Some(raw) = get(ENV_DURABLE_WRITES) {
            self.durability = if parse_flag(ENV_DURABLE_WRITES, &raw)? {
                WriteDurability::Durable
            } else {
                WriteDurability::BestEffort
            };
        }
        if let Some(raw) = get(ENV_DELETE_DELAY_MS) {
            self.delete_delay = parse_delay_ms(ENV_DELETE_DELAY_MS, &raw)?;
        }
        if let Some(filter) = get(ENV_LOG) {
            self.log_filter = filter;
        }
        Ok(self)
    }

    pub fn file_store(&self) -> FileStore {
        FileStore::new(&self.store_dir).with_durability(self.durability)
    }

    pub fn log_path(&self) -> PathBuf {
        self.store_dir.join(LOG_FILE_NAME)
    }

    pub fn position_source(&self) -> Box<dyn PositionSource> {
        match self.origin {
            Some(coords) => Box::new(FixedPosition::new(coords)),
            None => Box::new(Unavailable),
        }
    }
}

pub fn parse_origin(source: &'static str, raw: &str) -> Result<Coords, ConfigError> {
    raw.parse::<Coords>()
        .map_err(|err| ConfigError::Origin { source_name: source, error: err })
}

pub fn parse_delay_ms(source: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::Invalid {
            source_name: source,
            value: raw.to_owned(),
            expected: "a whole number of milliseconds",
        })
}

fn parse_flag(source: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            source_name: source,
            value: raw.to_owned(),
            expected: "true or false",
        }),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    Origin {
        source_name: &'static str,
        error: CoordsError,
    },
    Invalid {
        source_name: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Origin { source_name, error } => write!(f, "invalid {source_name}: {error}"),
            Self::Invalid { source_name, value, expected } => {
                write!(f, "invalid {source_name} {value:?}: expected {expected}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Origin { error, .. } => Some(error),
            Self::Invalid { .. } => None,
        }
    }
}
