// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Trailmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trailmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

const FORM_LABEL_WIDTH: usize = 11;

fn pane_title(label: &str, tail: Option<&str>) -> String {
    let mut title = format!("─ {label}");
    if let Some(tail) = tail {
        let tail = tail.trim();
        if !tail.is_empty() {
            title.push_str(" ─ ");
            title.push_str(tail);
        }
    }
    title.push(' ');
    title
}

/// The two lines a list entry occupies: description, then the numbers.
fn entry_lines(row: &EntryRow, pending_delete: bool) -> Vec<Line<'static>> {
    let accent = Style::default().fg(map::kind_color(row.kind));
    let mut title = vec![
        Span::styled(format!("{} ", map::kind_glyph(row.kind)), accent.add_modifier(Modifier::BOLD)),
        Span::raw(row.description.clone()),
    ];
    if pending_delete {
        title.push(Span::styled(
            "  Deleting...",
            Style::default().fg(PENDING_DELETE_COLOR).add_modifier(Modifier::ITALIC),
        ));
    }

    let (metric, extra) = match row.detail {
        WorkoutDetail::Running { cadence, pace } => {
            (format!("{pace:.1} min/km"), format!("{cadence} spm"))
        }
        WorkoutDetail::Cycling { elevation_gain, speed } => {
            (format!("{speed:.1} km/h"), format!("{elevation_gain} m"))
        }
    };
    let numbers = Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{} km", row.distance), accent),
        Span::raw("  "),
        Span::raw(format!("{} min", row.duration)),
        Span::raw("  "),
        Span::raw(metric),
        Span::raw("  "),
        Span::raw(extra),
    ]);
    vec![Line::from(title), numbers]
}

fn form_row(label: &str, value: &str, unit: &str, focused: bool) -> Line<'static> {
    let label_style = if focused {
        Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(FOOTER_LABEL_COLOR)
    };
    let mut spans = vec![
        Span::styled(format!("{label:<width$}", width = FORM_LABEL_WIDTH), label_style),
        Span::raw(value.to_owned()),
    ];
    if !unit.is_empty() {
        spans.push(Span::styled(format!(" {unit}"), Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans)
}

fn footer_help_line<B: KeyValueStore>(app: &App<B>, toast_message: &str) -> Line<'static> {
    let controls = app.collection.view().controls().copied().unwrap_or_else(|| app.collection.controls());
    let mut spans = Vec::<Span<'static>>::new();

    spans.push(Span::styled(
        FOOTER_BRAND.to_owned(),
        Style::default().fg(FOOTER_BRAND_COLOR).add_modifier(Modifier::BOLD),
    ));
    push_footer_entry(&mut spans, "help", "?");
    push_footer_entry_maybe_disabled(&mut spans, "new", "n", app.home.is_none());
    push_footer_entry(&mut spans, "edit", "e");
    push_footer_entry(&mut spans, "delete", "x");
    push_footer_entry_maybe_disabled(&mut spans, "delete all", "D", !controls.delete_all_visible);

    let sort_value = format!(
        "s{} t{}",
        controls.distance_sort.map_or("", |dir| dir.arrow()),
        controls.duration_sort.map_or("", |dir| dir.arrow()),
    );
    push_footer_entry_maybe_disabled(&mut spans, "sort", &sort_value, !controls.sort_visible);
    push_footer_entry(&mut spans, controls.filter.label(), "f");
    push_footer_entry(&mut spans, "quit", "q");

    if !toast_message.is_empty() {
        spans.push(Span::styled(" | ".to_owned(), Style::default().fg(FOOTER_LABEL_COLOR)));
        spans.push(Span::raw(toast_message.to_owned()));
    }

    Line::from(spans)
}

fn help_key_style() -> Style {
    Style::default()
        .fg(FOOTER_KEY_COLOR)
        .add_modifier(Modifier::BOLD)
}

fn help_header_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = (100u16.saturating_sub(height_percent)) / 2;
    let horizontal_margin = (100u16.saturating_sub(width_percent)) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

fn help_kv(key: &str, desc: &str, key_width: usize, key_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>width$}", width = key_width), key_style),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

const HELP_SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Map",
        &[
            ("←/↑/↓/→", "move the crosshair"),
            ("+/-", "zoom in / out"),
            ("c", "center on your position"),
        ],
    ),
    (
        "Workouts",
        &[
            ("j/k", "select next / previous"),
            ("Enter", "show the selected workout on the map"),
            ("n", "new workout at the crosshair"),
            ("e", "edit the selected workout"),
            ("x", "delete the selected workout"),
            ("u", "undo a pending delete"),
            ("D", "delete all workouts"),
        ],
    ),
    (
        "List",
        &[
            ("s", "sort by distance (again to flip)"),
            ("t", "sort by duration (again to flip)"),
            ("f", "cycle type filter"),
        ],
    ),
    (
        "Form",
        &[
            ("Tab/Shift-Tab", "next / previous field"),
            ("Space", "toggle running / cycling"),
            ("Enter", "save"),
            ("Esc", "cancel"),
        ],
    ),
    ("Global", &[("?", "toggle this help"), ("q", "quit")]),
];

fn render_help(frame: &mut Frame<'_>, main_area: Rect) {
    let area = centered_rect(70, 84, main_area);
    frame.render_widget(Clear, area);

    let key_style = help_key_style();
    let header_style = help_header_style();
    let key_col_width = HELP_SECTIONS
        .iter()
        .flat_map(|(_, rows)| rows.iter())
        .map(|(key, _)| key.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = Vec::<Line<'static>>::new();
    for (idx, (header, rows)) in HELP_SECTIONS.iter().enumerate() {
        if idx > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(format!("--- {header} ---"), header_style)));
        for (key, desc) in rows.iter() {
            lines.push(help_kv(key, desc, key_col_width, key_style));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(pane_title("Help", Some("? or Esc to close"))))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, value: &str) {
    push_footer_entry_maybe_disabled(spans, label, value, false);
}

fn push_footer_entry_maybe_disabled(
    spans: &mut Vec<Span<'static>>,
    label: &str,
    value: &str,
    disabled: bool,
) {
    if !spans.is_empty() {
        spans.push(Span::styled(
            " | ".to_owned(),
            Style::default().fg(FOOTER_LABEL_COLOR),
        ));
    }
    spans.push(Span::styled(
        format!("{}:", footer_label_ucfirst(label)),
        Style::default().fg(FOOTER_LABEL_COLOR),
    ));
    spans.extend(footer_value_spans(value, disabled));
}

fn footer_label_ucfirst(label: &str) -> String {
    let lower = label.to_lowercase();
    let mut chars = lower.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut out = first.to_uppercase().collect::<String>();
    out.push_str(chars.as_str());
    out
}

fn footer_value_spans(value: &str, disabled: bool) -> Vec<Span<'static>> {
    let color = if disabled {
        Color::DarkGray
    } else {
        FOOTER_KEY_COLOR
    };
    vec![Span::styled(
        value.to_owned(),
        Style::default()
            .fg(color)
            .add_modifier(Modifier::BOLD),
    )]
}
