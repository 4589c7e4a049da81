// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Trailmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trailmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence.
//!
//! A small key-value backend ([`KeyValueStore`]) plus the adapter that keeps the whole workout
//! collection under one key as a JSON array ([`WorkoutArchive`]).

mod archive;
mod file_store;
mod memory;

use std::fmt;
use std::io;
use std::path::PathBuf;

pub use archive::{WorkoutArchive, WORKOUTS_KEY};
pub use file_store::{FileStore, WriteDurability};
pub use memory::MemoryStore;

/// String values stored under short string keys.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replaces any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
    Json { key: String, source: serde_json::Error },
    InvalidKey { key: String },
    SymlinkRefused { path: PathBuf },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { key, source } => write!(f, "json error under key {key:?}: {source}"),
            Self::InvalidKey { key } => {
                write!(f, "invalid store key {key:?} (allowed: A-Z a-z 0-9 _ -)")
            }
            Self::SymlinkRefused { path } => {
                write!(f, "refusing to write through symlink at {path:?}")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidKey { .. } | Self::SymlinkRefused { .. } => None,
        }
    }
}

pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey { key: key.to_owned() })
    }
}
