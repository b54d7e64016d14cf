//! # Form Fields Component
//!
//! Renders a [`Form`] as one line per field: a fixed-width label column
//! followed by the typed value. The focused field is highlighted and ends in
//! a cursor mark; read-only fields are dimmed; flags show as check boxes.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::core::form::{Field, FieldKind, Form};
use crate::tui::component::Component;

const LABEL_COLUMN: usize = 22;

pub struct FormFields<'a> {
    pub form: &'a Form,
    /// Dim everything while a submission is in flight.
    pub busy: bool,
}

impl<'a> FormFields<'a> {
    pub fn new(form: &'a Form, busy: bool) -> Self {
        Self { form, busy }
    }

    fn line(&self, field: &'a Field, focused: bool) -> Line<'a> {
        let pad = LABEL_COLUMN.saturating_sub(field.label.width());
        let label = format!("{}{}", field.label, " ".repeat(pad));

        let value = match field.kind {
            FieldKind::Flag => if field.flag { "[x]" } else { "[ ]" }.to_string(),
            FieldKind::DateTime if field.value.is_empty() && !focused => {
                "YYYY-MM-DDTHH:MM".to_string()
            }
            FieldKind::Date if field.value.is_empty() && !focused => "YYYY-MM-DD".to_string(),
            _ => field.value.clone(),
        };
        let placeholder = field.value.is_empty()
            && matches!(field.kind, FieldKind::DateTime | FieldKind::Date)
            && !focused;

        let mut value_style = Style::default().fg(Color::White);
        if field.read_only || placeholder || self.busy {
            value_style = value_style.fg(Color::DarkGray);
        }
        if focused {
            value_style = value_style.add_modifier(Modifier::BOLD);
        }
        let label_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let mut spans = vec![
            Span::styled(if focused { "› " } else { "  " }, label_style),
            Span::styled(label, label_style),
            Span::styled(value, value_style),
        ];
        if focused && field.kind != FieldKind::Flag {
            spans.push(Span::styled("▏", Style::default().fg(Color::Cyan)));
        }
        if field.read_only {
            spans.push(Span::styled("  (read-only)", Style::default().fg(Color::DarkGray)));
        }
        Line::from(spans)
    }
}

impl Component for FormFields<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .form
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| self.line(field, i == self.form.focus))
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entity::{EntityKind, EntitySnapshot};
    use crate::test_support::sample_habitat;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(form: &Form) -> String {
        let backend = TestBackend::new(70, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| FormFields::new(form, false).render(f, f.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_blank_form_shows_placeholders_and_boxes() {
        let text = rendered(&Form::blank(EntityKind::Habitat));
        assert!(text.contains("Area (m²)"));
        assert!(text.contains("YYYY-MM-DDTHH:MM"));
        assert!(text.contains("[ ]"));
    }

    #[test]
    fn test_edit_form_marks_id_read_only() {
        let snapshot = EntitySnapshot::Habitat(sample_habitat(1001, "Sabana"));
        let text = rendered(&Form::editing(&snapshot));
        assert!(text.contains("1001"));
        assert!(text.contains("(read-only)"));
        assert!(text.contains("Sabana"));
    }
}
