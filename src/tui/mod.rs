// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Trailmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trailmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use chrono::{Local, TimeDelta};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Terminal,
};
use tracing::{debug, info};

mod form;
mod map;
pub mod view;

pub use view::{EntryRow, MapMarker, TerminalView};

use crate::model::{
    Coords, ValidationError, Workout, WorkoutDetail, WorkoutId, WorkoutIdGenerator, WorkoutInput,
    WorkoutKind,
};
use crate::ops::{Filter, SortField, WorkoutCollection};
use crate::position::PositionError;
use crate::store::{KeyValueStore, MemoryStore, WorkoutArchive};
use form::{FormField, FormMode, FormOutcome, WorkoutForm};
use map::{MapLayers, MapState};

const TICK_INTERVAL: Duration = Duration::from_millis(250);
const TOAST_TTL: Duration = Duration::from_secs(2);
const SELECTED_COLOR: Color = Color::LightGreen;
const PENDING_DELETE_COLOR: Color = Color::LightRed;
const ERROR_COLOR: Color = Color::LightRed;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const FOOTER_BRAND_COLOR: Color = Color::White;
const FOOTER_BRAND: &str = "trailmark";

/// Runs the interactive terminal UI until the user quits.
///
/// The collection is loaded here. `home` is the user's position; without one the map starts at
/// the first stored workout (or 0,0) and new workouts cannot be placed.
pub fn run<B: KeyValueStore>(
    collection: WorkoutCollection<TerminalView, B>,
    home: Result<Coords, PositionError>,
) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(collection, home);
    app.start();

    while !app.should_quit {
        app.tick(Instant::now());
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(app.poll_timeout(Instant::now()))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    app.handle_key_code(key.code);
                }
                _ => {}
            }
        }
    }

    info!("terminal ui closed");
    Ok(())
}

/// An in-memory store seeded with a handful of workouts around `origin`.
pub fn demo_store(origin: Coords) -> Result<MemoryStore, ValidationError> {
    let now = Local::now().fixed_offset();
    let mut ids = WorkoutIdGenerator::new();
    let seeds = [
        (4, (0.012, -0.021), WorkoutInput::running(5.2, 24.0, 178.0)),
        (3, (-0.034, 0.046), WorkoutInput::cycling(27.0, 95.0, 523.0)),
        (2, (0.027, 0.013), WorkoutInput::running(10.0, 52.0, 172.0)),
        (1, (-0.008, -0.057), WorkoutInput::cycling(12.5, 40.0, -120.0)),
    ];

    let mut workouts = Vec::with_capacity(seeds.len());
    for (days_ago, (d_lat, d_lng), input) in seeds {
        let created_at = now - TimeDelta::days(days_ago);
        let millis = u64::try_from(created_at.timestamp_millis()).unwrap_or_default();
        let id = ids.next_id(millis, |_| false);
        workouts.push(Workout::new(id, origin.offset(d_lat, d_lng), &input, created_at)?);
    }

    let mut archive = WorkoutArchive::new(MemoryStore::new());
    archive.save(&workouts);
    Ok(archive.into_backend())
}

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    expires_at: Instant,
}

struct App<B> {
    collection: WorkoutCollection<TerminalView, B>,
    home: Option<Coords>,
    position_notice: Option<String>,
    map: MapState,
    cursor: usize,
    form: Option<WorkoutForm>,
    show_help: bool,
    toast: Option<Toast>,
    should_quit: bool,
}

impl<B: KeyValueStore> App<B> {
    fn new(
        collection: WorkoutCollection<TerminalView, B>,
        home: Result<Coords, PositionError>,
    ) -> Self {
        let (home, position_notice) = match home {
            Ok(coords) => (Some(coords), None),
            Err(err) => (None, Some(err.to_string())),
        };
        let center = home.unwrap_or(Coords::NULL_ISLAND);
        Self {
            collection,
            home,
            position_notice,
            map: MapState::new(center),
            cursor: 0,
            form: None,
            show_help: false,
            toast: None,
            should_quit: false,
        }
    }

    fn start(&mut self) {
        let loaded = self.collection.load();
        if self.home.is_none() {
            if let Some(first) = self.collection.workouts().first() {
                self.map.focus(first.coords());
            }
        }
        if loaded > 0 {
            self.set_toast(format!("Loaded {loaded} workouts"));
        }
    }

    /// Commits due deletes and applies whatever focus the collection asked for.
    fn tick(&mut self, now: Instant) {
        let deleted = self.collection.run_due_deletes(now);
        match deleted.len() {
            0 => {}
            1 => self.set_toast("Workout deleted"),
            n => self.set_toast(format!("Deleted {n} workouts")),
        }
        if let Some(coords) = self.collection.view_mut().take_focus_request() {
            self.map.focus(coords);
        }
        self.clamp_cursor();
    }

    fn poll_timeout(&self, now: Instant) -> Duration {
        self.collection
            .next_delete_due()
            .map_or(TICK_INTERVAL, |due| due.saturating_duration_since(now).min(TICK_INTERVAL))
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    fn entries(&self) -> &[EntryRow] {
        self.collection.view().entries()
    }

    fn selected_id(&self) -> Option<WorkoutId> {
        self.entries().get(self.cursor).map(|row| row.id.clone())
    }

    fn select(&mut self, workout_id: &WorkoutId) {
        if let Some(index) = self.entries().iter().position(|row| &row.id == workout_id) {
            self.cursor = index;
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.entries().len();
        self.cursor = if len == 0 { 0 } else { self.cursor.min(len - 1) };
    }

    fn draft(&self) -> Option<Coords> {
        match self.form.as_ref().map(|form| &form.mode) {
            Some(FormMode::New { coords }) => Some(*coords),
            _ => None,
        }
    }

    /// Returns `true` once the app should quit.
    fn handle_key_code(&mut self, code: KeyCode) -> bool {
        if self.position_notice.take().is_some() {
            return self.should_quit;
        }
        if let Some(form) = self.form.as_mut() {
            match form.handle_key(code) {
                FormOutcome::Continue => {}
                FormOutcome::Submit => self.submit_form(),
                FormOutcome::Cancel => self.cancel_form(),
            }
            return self.should_quit;
        }
        if self.show_help {
            if matches!(code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return self.should_quit;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Up => self.map.nudge(1, 0),
            KeyCode::Down => self.map.nudge(-1, 0),
            KeyCode::Left => self.map.nudge(0, -1),
            KeyCode::Right => self.map.nudge(0, 1),
            KeyCode::Char('+') | KeyCode::Char('=') => self.map.zoom_in(),
            KeyCode::Char('-') => self.map.zoom_out(),
            KeyCode::Char('c') => self.center_on_home(),
            KeyCode::Char('j') => {
                self.cursor = self.cursor.saturating_add(1);
                self.clamp_cursor();
            }
            KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Enter => self.focus_selected(),
            KeyCode::Char('n') => self.open_new_form(),
            KeyCode::Char('e') => self.open_edit_form(),
            KeyCode::Char('x') => self.request_delete_selected(),
            KeyCode::Char('u') => self.cancel_delete_selected(),
            KeyCode::Char('D') => self.delete_all(),
            KeyCode::Char('s') => self.sort(SortField::Distance),
            KeyCode::Char('t') => self.sort(SortField::Duration),
            KeyCode::Char('f') => {
                let filter = self.collection.cycle_filter();
                self.cursor = 0;
                self.set_toast(format!("Showing: {}", filter_toast_label(filter)));
            }
            _ => {}
        }
        self.should_quit
    }

    fn center_on_home(&mut self) {
        match self.home {
            Some(home) => self.map.focus(home),
            None => self.set_toast("Position unavailable"),
        }
    }

    fn focus_selected(&mut self) {
        let Some(workout_id) = self.selected_id() else {
            return;
        };
        if let Err(err) = self.collection.focus_workout(&workout_id) {
            self.set_toast(err.to_string());
        }
    }

    fn open_new_form(&mut self) {
        if self.home.is_none() {
            self.set_toast("Position unavailable: new workouts are disabled");
            return;
        }
        self.form = Some(WorkoutForm::new_at(self.map.crosshair()));
    }

    fn open_edit_form(&mut self) {
        let Some(workout_id) = self.selected_id() else {
            return;
        };
        match self.collection.begin_edit(&workout_id) {
            Ok(snapshot) => self.form = Some(WorkoutForm::edit(workout_id, &snapshot)),
            Err(err) => self.set_toast(err.to_string()),
        }
    }

    fn submit_form(&mut self) {
        let Some(form) = self.form.as_ref() else {
            return;
        };
        let input = form.to_input();
        let result = match &form.mode {
            FormMode::New { coords } => {
                let coords = *coords;
                self.collection.create(coords, &input).map(|w| w.id().clone())
            }
            FormMode::Edit { .. } => self.collection.commit_edit(&input).map(|w| w.id().clone()),
        };

        match result {
            Ok(workout_id) => {
                debug!(workout_id = %workout_id, "form submitted");
                self.form = None;
                self.select(&workout_id);
                self.set_toast("Workout saved");
            }
            Err(err) => {
                if let Some(form) = self.form.as_mut() {
                    form.error = Some(err.to_string());
                }
            }
        }
    }

    fn cancel_form(&mut self) {
        if let Some(WorkoutForm { mode: FormMode::Edit { .. }, .. }) = self.form.take() {
            self.collection.cancel_edit();
        }
    }

    fn request_delete_selected(&mut self) {
        let Some(workout_id) = self.selected_id() else {
            return;
        };
        match self.collection.request_delete(&workout_id, Instant::now()) {
            Ok(_) => self.set_toast("Deleting... (u to undo)"),
            Err(err) => self.set_toast(err.to_string()),
        }
    }

    fn cancel_delete_selected(&mut self) {
        let Some(ticket) = self
            .selected_id()
            .and_then(|workout_id| self.collection.pending_ticket(&workout_id))
        else {
            return;
        };
        if self.collection.cancel_delete(ticket) {
            self.set_toast("Delete cancelled");
        }
    }

    fn delete_all(&mut self) {
        if !self.collection.controls().delete_all_visible {
            return;
        }
        let removed = self.collection.delete_all();
        self.cursor = 0;
        self.set_toast(format!("Deleted {removed} workouts"));
    }

    fn sort(&mut self, field: SortField) {
        if !self.collection.controls().sort_visible {
            return;
        }
        let direction = self.collection.sort(field);
        self.cursor = 0;
        self.set_toast(format!("Sorted by {} {}", field.label(), direction.arrow()));
    }
}

fn filter_toast_label(filter: Filter) -> &'static str {
    match filter {
        Filter::All => "all workouts",
        other => other.label(),
    }
}

fn draw<B: KeyValueStore>(frame: &mut Frame<'_>, app: &mut App<B>) {
    let area = frame.size();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[0]);

    let selected = app.selected_id();
    let view = app.collection.view();
    let layers = MapLayers {
        markers: view.markers().collect(),
        home: app.home,
        draft: app.draft(),
        highlighted: view
            .markers()
            .find(|marker| selected.as_ref() == Some(&marker.workout_id)),
    };
    let map_tail = format!("{} · zoom {}", app.map.crosshair(), app.map.zoom());
    map::render_map(frame, panes[0], &app.map, &layers, pane_title("Map", Some(&map_tail)));

    render_entries(frame, app, panes[1]);

    let toast_suffix = match app.toast.as_ref() {
        Some(toast) if toast.expires_at > Instant::now() => toast.message.clone(),
        Some(_) => {
            app.toast = None;
            String::new()
        }
        None => String::new(),
    };
    frame.render_widget(Paragraph::new(footer_help_line(app, &toast_suffix)), rows[1]);

    if app.form.is_some() {
        render_form(frame, app, rows[0]);
    }
    if app.show_help {
        render_help(frame, rows[0]);
    }
    if let Some(notice) = app.position_notice.as_deref() {
        render_notice(frame, notice, rows[0]);
    }
}

fn render_entries<B: KeyValueStore>(frame: &mut Frame<'_>, app: &App<B>, area: Rect) {
    let view = app.collection.view();
    let count = format!("{}/{}", view.entries().len(), app.collection.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(pane_title("Workouts", Some(&count)));

    if view.entries().is_empty() {
        let hint = if app.collection.is_empty() {
            "No workouts yet. Move the crosshair and press n."
        } else {
            "No workouts match the filter. Press f."
        };
        let paragraph = Paragraph::new(Span::styled(hint, Style::default().fg(Color::DarkGray)))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let items = view
        .entries()
        .iter()
        .map(|row| ListItem::new(entry_lines(row, view.is_pending_delete(&row.id))))
        .collect::<Vec<_>>();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(SELECTED_COLOR).add_modifier(Modifier::BOLD))
        .highlight_symbol("▌");
    let mut state = ListState::default().with_selected(Some(app.cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_form<B: KeyValueStore>(frame: &mut Frame<'_>, app: &App<B>, main_area: Rect) {
    let Some(form) = app.form.as_ref() else {
        return;
    };
    let area = centered_rect(60, 50, main_area);
    frame.render_widget(Clear, area);
    let block = Block::default().borders(Borders::ALL).title(pane_title(form.title(), None));
    let inner = block.inner(area);

    let kind = match form.kind {
        WorkoutKind::Running => "‹ Running ›",
        WorkoutKind::Cycling => "‹ Cycling ›",
    };
    let mut lines = vec![
        form_row("Type", kind, "", form.focus == FormField::Kind),
        form_row("Distance", &form.distance, "km", form.focus == FormField::Distance),
        form_row("Duration", &form.duration, "min", form.focus == FormField::Duration),
        form_row(form.extra_label(), &form.extra, form.extra_unit(), form.focus == FormField::Extra),
        Line::default(),
    ];
    if let Some(error) = form.error.as_deref() {
        lines.push(Line::from(Span::styled(error.to_owned(), Style::default().fg(ERROR_COLOR))));
        lines.push(Line::default());
    }
    lines.push(Line::from(Span::styled(
        "Tab next field · Space toggles type · Enter save · Esc cancel",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);

    let focused_text = match form.focus {
        FormField::Kind => None,
        FormField::Distance => Some((1u16, form.distance.as_str())),
        FormField::Duration => Some((2, form.duration.as_str())),
        FormField::Extra => Some((3, form.extra.as_str())),
    };
    if let Some((row, text)) = focused_text {
        let x = inner.x + FORM_LABEL_WIDTH as u16 + text.chars().count() as u16;
        if row < inner.height && x < inner.x + inner.width {
            frame.set_cursor(x, inner.y + row);
        }
    }
}

fn render_notice(frame: &mut Frame<'_>, notice: &str, main_area: Rect) {
    let area = centered_rect(60, 30, main_area);
    frame.render_widget(Clear, area);
    let lines = vec![
        Line::from(Span::styled(notice.to_owned(), Style::default().fg(ERROR_COLOR))),
        Line::default(),
        Line::from("Stored workouts are still shown. Adding new ones is disabled."),
        Line::default(),
        Line::from(Span::styled("Press any key", Style::default().fg(Color::DarkGray))),
    ];
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(pane_title("Position", None)))
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

include!("chrome.rs");

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}
