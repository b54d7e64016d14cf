use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{Sidebar, TitleBar};
use crate::tui::screens::{help_text, screen_component};
use crate::tui::{Focus, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Width of the menu column, borders included.
pub const SIDEBAR_WIDTH: u16 = 28;

const SIDEBAR_HELP: &str = "↑/↓: move | Enter: open | Tab: screen | q/Ctrl+C: quit";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, body_area, help_area] = layout.areas(frame.area());
    let [sidebar_area, main_area] =
        Layout::horizontal([Length(SIDEBAR_WIDTH), Min(0)]).areas(body_area);

    let screen = app.screen();
    TitleBar::new(
        app.api_url.clone(),
        screen.label(),
        app.status_message.clone(),
        app.view.is_busy(),
    )
    .render(frame, title_area);

    Sidebar::new(&mut tui.sidebar, screen, tui.focus == Focus::Sidebar)
        .render(frame, sidebar_area);

    screen_component(app, tui.spinner_frame).render(frame, main_area);

    let help = match tui.focus {
        Focus::Sidebar => SIDEBAR_HELP,
        Focus::Screen => help_text(screen),
    };
    frame.render_widget(
        Line::from(Span::styled(help, Style::default().fg(Color::DarkGray))),
        help_area,
    );
}
