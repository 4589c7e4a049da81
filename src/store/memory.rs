// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Trailmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trailmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use super::{validate_key, KeyValueStore, StoreError};

/// A process-local store. Writes can be switched off to exercise failure paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
    reject_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every `set`/`remove` fail with an io error until turned off again.
    pub fn set_reject_writes(&mut self, reject: bool) {
        self.reject_writes = reject;
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn check_writable(&self, key: &str) -> Result<(), StoreError> {
        if self.reject_writes {
            return Err(StoreError::Io {
                path: PathBuf::from(key),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "store is read-only"),
            });
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_key(key)?;
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.check_writable(key)?;
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.check_writable(key)?;
        self.values.remove(key);
        Ok(())
    }
}
