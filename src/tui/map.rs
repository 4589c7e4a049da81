// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Trailmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trailmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Equirectangular map pane: world outline, workout markers, home, crosshair and draft marker.

use ratatui::{
    prelude::*,
    symbols,
    widgets::{
        canvas::{Canvas, Map, MapResolution},
        Block, Borders,
    },
};

use super::view::MapMarker;
use crate::model::{Coords, WorkoutKind};

pub(crate) const DEFAULT_ZOOM: u8 = 6;
pub(crate) const MAX_ZOOM: u8 = 12;

const RUNNING_COLOR: Color = Color::LightGreen;
const CYCLING_COLOR: Color = Color::Yellow;
const OUTLINE_COLOR: Color = Color::DarkGray;
const CROSSHAIR_COLOR: Color = Color::LightCyan;
const HOME_COLOR: Color = Color::LightBlue;
const DRAFT_COLOR: Color = Color::LightMagenta;

pub(crate) fn kind_color(kind: WorkoutKind) -> Color {
    match kind {
        WorkoutKind::Running => RUNNING_COLOR,
        WorkoutKind::Cycling => CYCLING_COLOR,
    }
}

pub(crate) fn kind_glyph(kind: WorkoutKind) -> &'static str {
    match kind {
        WorkoutKind::Running => "R",
        WorkoutKind::Cycling => "C",
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct MapState {
    center: Coords,
    crosshair: Coords,
    zoom: u8,
}

impl MapState {
    pub(crate) fn new(center: Coords) -> Self {
        Self { center, crosshair: center, zoom: DEFAULT_ZOOM }
    }

    #[cfg(test)]
    pub(crate) fn center(&self) -> Coords {
        self.center
    }

    pub(crate) fn crosshair(&self) -> Coords {
        self.crosshair
    }

    pub(crate) fn zoom(&self) -> u8 {
        self.zoom
    }

    fn lng_span(&self) -> f64 {
        360.0 / f64::from(1u32 << self.zoom)
    }

    fn lat_span(&self) -> f64 {
        self.lng_span() / 2.0
    }

    pub(crate) fn x_bounds(&self) -> [f64; 2] {
        let half = self.lng_span() / 2.0;
        [self.center.lng() - half, self.center.lng() + half]
    }

    pub(crate) fn y_bounds(&self) -> [f64; 2] {
        let half = self.lat_span() / 2.0;
        [self.center.lat() - half, self.center.lat() + half]
    }

    pub(crate) fn contains(&self, coords: Coords) -> bool {
        let [x0, x1] = self.x_bounds();
        let [y0, y1] = self.y_bounds();
        (x0..=x1).contains(&coords.lng()) && (y0..=y1).contains(&coords.lat())
    }

    /// Moves the crosshair by whole steps; the map follows once it leaves the visible area.
    pub(crate) fn nudge(&mut self, lat_steps: i8, lng_steps: i8) {
        let step = self.lng_span() / 16.0;
        self.crosshair = self
            .crosshair
            .offset(f64::from(lat_steps) * step / 2.0, f64::from(lng_steps) * step);
        if !self.contains(self.crosshair) {
            self.center = self.crosshair;
        }
    }

    pub(crate) fn focus(&mut self, coords: Coords) {
        self.center = coords;
        self.crosshair = coords;
    }

    pub(crate) fn zoom_in(&mut self) {
        self.zoom = (self.zoom + 1).min(MAX_ZOOM);
        self.center = self.crosshair;
    }

    pub(crate) fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(1);
    }
}

pub(crate) struct MapLayers<'a> {
    pub(crate) markers: Vec<&'a MapMarker>,
    pub(crate) home: Option<Coords>,
    pub(crate) draft: Option<Coords>,
    pub(crate) highlighted: Option<&'a MapMarker>,
}

pub(crate) fn render_map(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &MapState,
    layers: &MapLayers<'_>,
    title: String,
) {
    let resolution = if state.zoom() >= 4 { MapResolution::High } else { MapResolution::Low };
    let crosshair = state.crosshair();
    let canvas = Canvas::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .marker(symbols::Marker::Braille)
        .x_bounds(state.x_bounds())
        .y_bounds(state.y_bounds())
        .paint(|ctx| {
            ctx.draw(&Map { color: OUTLINE_COLOR, resolution });
            ctx.layer();

            if let Some(home) = layers.home {
                ctx.print(
                    home.lng(),
                    home.lat(),
                    Span::styled("⌂", Style::default().fg(HOME_COLOR)),
                );
            }
            for marker in &layers.markers {
                let mut style = Style::default().fg(kind_color(marker.kind));
                if layers.highlighted.is_some_and(|h| h.workout_id == marker.workout_id) {
                    style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
                }
                ctx.print(
                    marker.coords.lng(),
                    marker.coords.lat(),
                    Span::styled(kind_glyph(marker.kind), style),
                );
            }
            if let Some(draft) = layers.draft {
                ctx.print(
                    draft.lng(),
                    draft.lat(),
                    Span::styled("◆ New workout here", Style::default().fg(DRAFT_COLOR)),
                );
            } else {
                ctx.print(
                    crosshair.lng(),
                    crosshair.lat(),
                    Span::styled("+", Style::default().fg(CROSSHAIR_COLOR)),
                );
            }
        });
    frame.render_widget(canvas, area);
}
