// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Trailmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trailmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Trailmark: a terminal workout log.
//!
//! Runs and rides are pinned to a position, listed with their pace or speed, and kept in a
//! key-value store as one JSON document. [`ops::WorkoutCollection`] owns the list and drives a
//! [`view::ViewPort`]; [`tui`] is the interactive front-end.

pub mod config;
pub mod logging;
pub mod model;
pub mod ops;
pub mod position;
pub mod store;
pub mod tui;
pub mod view;
