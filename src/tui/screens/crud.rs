use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{busy_line, dim, entity_card, flash_line, input_line, screen_block, split_header};
use crate::core::screen::ScreenId;
use crate::core::view::{DeleteView, FormMode, FormView, ListView, LookupView};
use crate::tui::component::Component;
use crate::tui::components::{EntityTable, FormFields};

pub struct FormScreen<'a> {
    pub view: &'a FormView,
    pub screen: ScreenId,
    pub spinner_frame: usize,
}

impl Component for FormScreen<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = screen_block(self.screen.label());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let busy = !self.view.pending.is_empty();
        let [fields_area, _, status_area] = Layout::vertical([
            Constraint::Length(self.view.form.fields.len() as u16),
            Constraint::Length(1),
            Constraint::Length(2),
        ])
        .areas(inner);

        FormFields::new(&self.view.form, busy).render(frame, fields_area);

        let verb = match self.view.mode {
            FormMode::Create => "Creating",
            FormMode::Edit => "Saving",
        };
        let status = if busy {
            vec![busy_line(true, self.spinner_frame, &format!("{verb} {}…", self.view.kind))]
        } else {
            vec![flash_line(self.view.flash.as_ref())]
        };
        frame.render_widget(Paragraph::new(status), status_area);
    }
}

pub struct LookupScreen<'a> {
    pub view: &'a LookupView,
    pub screen: ScreenId,
    pub spinner_frame: usize,
}

impl Component for LookupScreen<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let busy = !self.view.pending.is_empty();
        let label = format!("{} ID", self.view.kind.title());
        let lines = vec![
            dim(format!(
                "Enter the ID of the {} to {}.",
                self.view.kind,
                match self.view.target {
                    ScreenId::DeleteAnimal | ScreenId::DeleteHabitat | ScreenId::DeleteKeeper =>
                        "delete",
                    _ => "edit",
                }
            )),
            Line::default(),
            input_line(&label, &self.view.input),
            Line::default(),
            if busy {
                busy_line(true, self.spinner_frame, "Looking up…")
            } else {
                flash_line(self.view.flash.as_ref())
            },
        ];
        frame.render_widget(
            Paragraph::new(lines).block(screen_block(self.screen.label())),
            area,
        );
    }
}

pub struct DeleteScreen<'a> {
    pub view: &'a DeleteView,
    pub screen: ScreenId,
    pub spinner_frame: usize,
}

impl Component for DeleteScreen<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let busy = !self.view.pending.is_empty();
        let mut lines = entity_card(&self.view.snapshot);
        lines.push(Line::default());

        if busy {
            lines.push(busy_line(true, self.spinner_frame, "Deleting…"));
        } else if self.view.armed {
            lines.push(Line::from(vec![
                Span::styled(
                    format!(
                        "Delete {} \"{}\"? ",
                        self.view.snapshot.kind(),
                        self.view.snapshot.display_name()
                    ),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled("[y/n]", Style::default().fg(Color::Yellow)),
            ]));
        } else {
            lines.push(dim("Press Enter to delete. This cannot be undone."));
        }
        lines.push(flash_line(self.view.flash.as_ref()));

        frame.render_widget(
            Paragraph::new(lines).block(screen_block(self.screen.label())),
            area,
        );
    }
}

pub struct ListScreen<'a> {
    pub view: &'a ListView,
    pub screen: ScreenId,
    pub spinner_frame: usize,
}

impl Component for ListScreen<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = screen_block(self.screen.label());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (header_area, table_area) = split_header(inner, 2);
        let busy = !self.view.pending.is_empty();
        let summary = if busy {
            busy_line(true, self.spinner_frame, "Loading…")
        } else if self.view.flash.is_some() {
            flash_line(self.view.flash.as_ref())
        } else if self.view.loaded && self.view.items.is_empty() {
            dim(format!("No {}s to show.", self.view.kind))
        } else {
            dim(format!("{} shown", self.view.items.len()))
        };
        let header = vec![
            Line::from(vec![
                Span::styled("Filter: ", Style::default().fg(Color::Gray)),
                Span::styled(
                    self.view.filter.label(self.view.kind),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
                Span::styled("  (←/→ to change)", Style::default().fg(Color::DarkGray)),
            ]),
            summary,
        ];
        frame.render_widget(Paragraph::new(header), header_area);

        EntityTable::snapshots(&self.view.items)
            .with_cursor(self.view.cursor)
            .render(frame, table_area);
    }
}
