//! # TitleBar Component
//!
//! Top status bar: which backend we talk to, the screen on display, and the
//! latest status notice.
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(
//!     app.api_url.clone(),
//!     app.screen().label(),
//!     app.status_message.clone(),
//!     app.view.is_busy(),
//! );
//! title_bar.render(frame, title_area);
//! ```
//!
//! ## Conditional Formatting
//!
//! 1. **Busy**: `"Menagerie @ http://… | List animals | … | working…"`
//! 2. **Status message**: `"Menagerie @ http://… | List animals | Keeper created"`
//! 3. **Default**: `"Menagerie @ http://… | List animals"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Top status bar component.
pub struct TitleBar {
    /// Backend base URL.
    pub api_url: String,
    /// Label of the screen on display.
    pub screen_label: &'static str,
    /// Notice carried over from the last transition.
    pub status_message: String,
    /// Whether the current screen is waiting on the backend.
    pub busy: bool,
}

impl TitleBar {
    pub fn new(
        api_url: String,
        screen_label: &'static str,
        status_message: String,
        busy: bool,
    ) -> Self {
        Self {
            api_url,
            screen_label,
            status_message,
            busy,
        }
    }

    fn text(&self) -> String {
        let mut text = format!("Menagerie @ {} | {}", self.api_url, self.screen_label);
        if !self.status_message.is_empty() && self.status_message != self.screen_label {
            text.push_str(" | ");
            text.push_str(&self.status_message);
        }
        if self.busy {
            text.push_str(" | working…");
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let line = Line::from(Span::styled(
            self.text(),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        frame.render_widget(line, area);
    }
}
