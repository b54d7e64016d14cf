use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use super::{dim, screen_block, spinner_glyph};
use crate::core::screen::ScreenId;
use crate::core::view::{AboutView, ApiStatus};
use crate::tui::component::Component;

pub struct AboutScreen<'a> {
    pub view: &'a AboutView,
    pub api_url: &'a str,
    pub spinner_frame: usize,
}

impl AboutScreen<'_> {
    fn status_span(&self) -> Span<'static> {
        match self.view.status {
            ApiStatus::Online => Span::styled(
                "● online",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            ApiStatus::Offline => Span::styled(
                "● offline",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            ApiStatus::Checking => Span::styled(
                format!("{} {}", spinner_glyph(self.spinner_frame), ApiStatus::Checking.label()),
                Style::default().fg(Color::Yellow),
            ),
        }
    }
}

impl Component for AboutScreen<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from(Span::styled(
                "Menagerie",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            dim("A terminal front end for the zoo management service."),
            Line::default(),
            Line::from(vec![
                Span::styled("Backend  ", Style::default().fg(Color::Gray)),
                Span::raw(self.api_url.to_string()),
            ]),
            Line::from(vec![
                Span::styled("Status   ", Style::default().fg(Color::Gray)),
                self.status_span(),
            ]),
            Line::default(),
            Line::from("Manage animals, habitats and keepers from the menu on the left."),
            Line::from("Edit and delete start with a lookup by ID; the record found is"),
            Line::from("carried into the form so nothing is fetched twice."),
        ];
        if self.view.status == ApiStatus::Offline {
            lines.push(Line::default());
            lines.push(Line::from(Span::styled(
                "The backend did not answer. Start it, then press Enter to check again.",
                Style::default().fg(Color::Red),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .block(screen_block(ScreenId::About.label()))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}
