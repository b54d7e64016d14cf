use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use super::{
    animal_card, busy_line, dim, flash_line, habitat_card, input_line, keeper_card, screen_block,
    split_header,
};
use crate::core::screen::ScreenId;
use crate::core::view::{AnimalKeeperView, HabitatLookupView, QueryView};
use crate::tui::component::Component;
use crate::tui::components::EntityTable;

pub struct QueryScreen<'a> {
    pub view: &'a QueryView,
    pub screen: ScreenId,
    pub spinner_frame: usize,
}

impl QueryScreen<'_> {
    fn mode_tabs(&self) -> Line<'static> {
        let mut spans = vec![Span::styled("Search by: ", Style::default().fg(Color::Gray))];
        for (i, mode) in self.view.modes.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
            }
            let style = if *mode == self.view.mode() {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(mode.label(), style));
        }
        Line::from(spans)
    }
}

impl Component for QueryScreen<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = screen_block(self.screen.label());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (header_area, table_area) = split_header(inner, 5);
        let mode = self.view.mode();
        let busy = !self.view.pending.is_empty();
        let status = if busy {
            busy_line(true, self.spinner_frame, "Searching…")
        } else if self.view.flash.is_some() {
            flash_line(self.view.flash.as_ref())
        } else if self.view.searched {
            dim(format!("{} found", self.view.results.len()))
        } else {
            Line::default()
        };
        let header = vec![
            self.mode_tabs(),
            Line::default(),
            input_line(mode.label(), &self.view.input),
            Line::default(),
            status,
        ];
        frame.render_widget(Paragraph::new(header), header_area);

        if !self.view.results.is_empty() {
            EntityTable::snapshots(&self.view.results)
                .with_cursor(self.view.cursor)
                .render(frame, table_area);
        }
    }
}

pub struct HabitatLookupScreen<'a> {
    pub view: &'a HabitatLookupView,
    pub screen: ScreenId,
    pub spinner_frame: usize,
}

impl Component for HabitatLookupScreen<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = screen_block(self.screen.label());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let busy = !self.view.pending.is_empty();
        let mut lines = vec![
            input_line("Habitat ID", &self.view.input),
            if busy {
                busy_line(true, self.spinner_frame, "Looking up…")
            } else {
                flash_line(self.view.flash.as_ref())
            },
        ];
        let Some(habitat) = &self.view.habitat else {
            frame.render_widget(Paragraph::new(lines), inner);
            return;
        };
        lines.extend(habitat_card(habitat));

        if !self.view.with_animals {
            frame.render_widget(Paragraph::new(lines), inner);
            return;
        }

        let animals = habitat.animals.as_deref().unwrap_or_default();
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            format!("Animals living here: {}", animals.len()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        let (header_area, table_area) = split_header(inner, lines.len() as u16);
        frame.render_widget(Paragraph::new(lines), header_area);
        if animals.is_empty() {
            frame.render_widget(Paragraph::new(dim("No animals in this habitat.")), table_area);
        } else {
            EntityTable::animals(animals).render(frame, table_area);
        }
    }
}

pub struct AnimalKeeperScreen<'a> {
    pub view: &'a AnimalKeeperView,
    pub screen: ScreenId,
    pub spinner_frame: usize,
}

impl Component for AnimalKeeperScreen<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let busy = !self.view.pending.is_empty();
        let mut lines = vec![
            input_line("Animal ID", &self.view.input),
            if busy {
                busy_line(true, self.spinner_frame, "Looking up…")
            } else {
                flash_line(self.view.flash.as_ref())
            },
        ];
        if let Some(record) = &self.view.record {
            let heading = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
            lines.push(Line::from(Span::styled("Animal", heading)));
            lines.extend(animal_card(&record.animal));
            lines.push(Line::default());
            lines.push(Line::from(Span::styled("Keeper", heading)));
            match &record.keeper {
                Some(keeper) => lines.extend(keeper_card(keeper)),
                None => lines.push(dim("No keeper assigned yet.")),
            }
        }
        frame.render_widget(
            Paragraph::new(lines).block(screen_block(self.screen.label())),
            area,
        );
    }
}
