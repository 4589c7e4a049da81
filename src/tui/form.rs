// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Trailmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trailmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crossterm::event::KeyCode;

use crate::model::{Coords, WorkoutId, WorkoutInput, WorkoutKind};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FormMode {
    New { coords: Coords },
    Edit { target_id: WorkoutId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Kind,
    Distance,
    Duration,
    Extra,
}

impl FormField {
    const ORDER: [Self; 4] = [Self::Kind, Self::Distance, Self::Duration, Self::Extra];

    fn next(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormOutcome {
    Continue,
    Submit,
    Cancel,
}

/// The new/edit workout form. Holds raw text; parsing happens on submit.
#[derive(Debug, Clone)]
pub(crate) struct WorkoutForm {
    pub(crate) mode: FormMode,
    pub(crate) kind: WorkoutKind,
    pub(crate) distance: String,
    pub(crate) duration: String,
    pub(crate) extra: String,
    pub(crate) focus: FormField,
    pub(crate) error: Option<String>,
}

impl WorkoutForm {
    pub(crate) fn new_at(coords: Coords) -> Self {
        Self {
            mode: FormMode::New { coords },
            kind: WorkoutKind::Running,
            distance: String::new(),
            duration: String::new(),
            extra: String::new(),
            focus: FormField::Distance,
            error: None,
        }
    }

    pub(crate) fn edit(target_id: WorkoutId, snapshot: &WorkoutInput) -> Self {
        Self {
            mode: FormMode::Edit { target_id },
            kind: snapshot.kind,
            distance: snapshot.distance.to_string(),
            duration: snapshot.duration.to_string(),
            extra: snapshot.extra.to_string(),
            focus: FormField::Distance,
            error: None,
        }
    }

    pub(crate) fn title(&self) -> &'static str {
        match self.mode {
            FormMode::New { .. } => "New workout",
            FormMode::Edit { .. } => "Edit workout",
        }
    }

    pub(crate) fn extra_label(&self) -> &'static str {
        match self.kind {
            WorkoutKind::Running => "Cadence",
            WorkoutKind::Cycling => "Elev Gain",
        }
    }

    pub(crate) fn extra_unit(&self) -> &'static str {
        match self.kind {
            WorkoutKind::Running => "step/min",
            WorkoutKind::Cycling => "meters",
        }
    }

    pub(crate) fn to_input(&self) -> WorkoutInput {
        WorkoutInput::parse(self.kind, &self.distance, &self.duration, &self.extra)
    }

    fn focused_text(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Kind => None,
            FormField::Distance => Some(&mut self.distance),
            FormField::Duration => Some(&mut self.duration),
            FormField::Extra => Some(&mut self.extra),
        }
    }

    pub(crate) fn handle_key(&mut self, code: KeyCode) -> FormOutcome {
        match code {
            KeyCode::Esc => return FormOutcome::Cancel,
            KeyCode::Enter => return FormOutcome::Submit,
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right if self.focus == FormField::Kind => {
                self.kind = self.kind.toggle();
            }
            KeyCode::Backspace => {
                if let Some(text) = self.focused_text() {
                    text.pop();
                }
            }
            KeyCode::Char(ch) if ch.is_ascii_digit() || matches!(ch, '.' | '-' | 'e' | 'E') => {
                if let Some(text) = self.focused_text() {
                    text.push(ch);
                }
            }
            _ => {}
        }
        FormOutcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;

    use super::{FormField, FormOutcome, WorkoutForm};
    use crate::model::{Coords, WorkoutId, WorkoutInput, WorkoutKind};

    fn type_text(form: &mut WorkoutForm, text: &str) {
        for ch in text.chars() {
            form.handle_key(KeyCode::Char(ch));
        }
    }

    #[test]
    fn typing_fills_fields_in_tab_order() {
        let mut form = WorkoutForm::new_at(Coords::new(0.0, 0.0).expect("coords"));
        type_text(&mut form, "5.2");
        form.handle_key(KeyCode::Tab);
        type_text(&mut form, "24");
        form.handle_key(KeyCode::Tab);
        type_text(&mut form, "178x");

        assert_eq!(form.to_input(), WorkoutInput::running(5.2, 24.0, 178.0));
        assert_eq!(form.handle_key(KeyCode::Enter), FormOutcome::Submit);
    }

    #[test]
    fn space_on_type_field_toggles_kind() {
        let mut form = WorkoutForm::new_at(Coords::new(0.0, 0.0).expect("coords"));
        form.handle_key(KeyCode::BackTab);
        assert_eq!(form.focus, FormField::Kind);
        form.handle_key(KeyCode::Char(' '));
        assert_eq!(form.kind, WorkoutKind::Cycling);
        assert_eq!(form.extra_label(), "Elev Gain");
    }

    #[test]
    fn edit_form_is_prefilled_and_backspace_edits() {
        let snapshot = WorkoutInput::cycling(27.0, 95.0, -12.5);
        let mut form = WorkoutForm::edit(WorkoutId::new("1").expect("id"), &snapshot);
        assert_eq!(form.to_input(), snapshot);

        form.handle_key(KeyCode::Backspace);
        assert_eq!(form.distance, "2");
        assert_eq!(form.handle_key(KeyCode::Esc), FormOutcome::Cancel);
    }
}
