//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Focus
//!
//! Keys go either to the sidebar (pick a screen) or to the screen on
//! display. Opening a screen from the sidebar focuses it; Esc on a screen
//! with nowhere to go back to returns focus to the sidebar.
//!
//! ## Redraw Strategy
//!
//! - **Busy** (a request is in flight): draws every ~80ms to animate the spinner.
//! - **Idle**: sleeps up to 250ms, only redraws on events, responses or resize.
//!
//! The About screen re-probes the backend every `health_interval`.

mod component;
mod components;
mod event;
mod screens;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::Hide;
use crossterm::event::{
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::core::action::{Action, ApiResponse, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::screen::ScreenId;
use crate::core::state::App;
use crate::core::view::Input;
use crate::gateway::{ApiRequest, EntityGateway, HttpGateway, execute as execute_request};
use crate::tui::component::EventHandler;
use crate::tui::components::{SidebarEvent, SidebarState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which half of the body receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Screen,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub focus: Focus,
    pub sidebar: SidebarState,
    pub spinner_frame: usize,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            focus: Focus::Sidebar,
            sidebar: SidebarState::new(),
            spinner_frame: 0,
        }
    }
}

/// What a key pressed while a screen has focus turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ScreenCommand {
    Input(Input),
    FocusSidebar,
}

fn screen_command(event: &TuiEvent, screen: ScreenId) -> Option<ScreenCommand> {
    let input = match event {
        TuiEvent::Escape if screen.back_target().is_some() => Input::Back,
        TuiEvent::Escape => return Some(ScreenCommand::FocusSidebar),
        TuiEvent::Tab => Input::NextField,
        TuiEvent::BackTab => Input::PrevField,
        TuiEvent::CursorUp => Input::Up,
        TuiEvent::CursorDown => Input::Down,
        TuiEvent::CursorLeft => Input::CyclePrev,
        TuiEvent::CursorRight => Input::CycleNext,
        TuiEvent::Submit => Input::Submit,
        TuiEvent::InputChar(c) => Input::Char(*c),
        TuiEvent::Backspace => Input::Backspace,
        TuiEvent::Refresh => Input::Refresh,
        TuiEvent::ForceQuit | TuiEvent::Resize => return None,
    };
    Some(ScreenCommand::Input(input))
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Press/release reporting is harmlessly ignored by terminals that lack it
        execute!(
            stdout(),
            Hide,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (hidden cursor, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), PopKeyboardEnhancementFlags);
    }
}

/// Build the HTTP gateway from a resolved config.
pub fn build_gateway(config: &ResolvedConfig) -> Arc<dyn EntityGateway> {
    Arc::new(HttpGateway::new(config.base_url.clone(), config.timeout))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let gateway = build_gateway(&config);
    let mut app = App::from_config(gateway, &config);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut last_tick = Instant::now();
    let mut seen_generation = app.generation;
    let mut needs_redraw = true; // Force first frame

    let effect = update(&mut app, Action::Navigate(config.start_screen));
    let mut should_quit = dispatch(&app, effect, &tx);
    if config.start_screen != ScreenId::About {
        tui.focus = Focus::Screen;
    }

    while !should_quit {
        // Keep the menu highlight on whatever the core navigated to
        if app.generation != seen_generation {
            seen_generation = app.generation;
            tui.sidebar.follow(app.screen());
        }

        let busy = app.view.is_busy();
        if busy {
            needs_redraw = true;
        }

        if needs_redraw {
            tui.spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if busy {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let action = match (&event, tui.focus) {
                (TuiEvent::Resize, _) => continue,
                (TuiEvent::ForceQuit, _) => Some(Action::Quit),
                (_, Focus::Sidebar) => match tui.sidebar.handle_event(&event) {
                    Some(SidebarEvent::Open(screen)) => {
                        tui.focus = Focus::Screen;
                        Some(Action::Navigate(screen))
                    }
                    Some(SidebarEvent::FocusScreen) => {
                        tui.focus = Focus::Screen;
                        None
                    }
                    Some(SidebarEvent::Quit) => Some(Action::Quit),
                    None => None,
                },
                (_, Focus::Screen) => match screen_command(&event, app.screen()) {
                    Some(ScreenCommand::Input(input)) => Some(Action::Input(input)),
                    Some(ScreenCommand::FocusSidebar) => {
                        tui.focus = Focus::Sidebar;
                        None
                    }
                    None => None,
                },
            };
            if let Some(action) = action {
                let effect = update(&mut app, action);
                if dispatch(&app, effect, &tx) {
                    should_quit = true;
                    break;
                }
            }
        }

        if last_tick.elapsed() >= config.health_interval {
            last_tick = Instant::now();
            let effect = update(&mut app, Action::Tick);
            should_quit |= dispatch(&app, effect, &tx);
        }

        // Handle background task actions (gateway responses)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if dispatch(&app, effect, &tx) {
                should_quit = true;
                break;
            }
        }
    }

    info!("Shutting down");
    ratatui::restore();
    Ok(())
}

/// Carry out an effect. Returns true when the app should exit.
fn dispatch(app: &App, effect: Effect, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::Request {
            generation,
            request,
        } => {
            spawn_request(app.gateway.clone(), generation, request, tx.clone());
            false
        }
    }
}

fn spawn_request(
    gateway: Arc<dyn EntityGateway>,
    generation: u64,
    request: ApiRequest,
    tx: mpsc::Sender<Action>,
) {
    info!("Spawning request {:?} (generation {})", request, generation);
    tokio::spawn(async move {
        let started = Instant::now();
        let result = execute_request(gateway.as_ref(), request.clone()).await;
        debug!(
            "Request {:?} finished in {}ms (ok={})",
            request,
            started.elapsed().as_millis(),
            result.is_ok()
        );
        if tx
            .send(Action::Response(ApiResponse {
                generation,
                request,
                result,
            }))
            .is_err()
        {
            warn!("Failed to send response: receiver dropped");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_goes_back_from_selection_screens() {
        assert_eq!(
            screen_command(&TuiEvent::Escape, ScreenId::EditAnimal),
            Some(ScreenCommand::Input(Input::Back))
        );
        assert_eq!(
            screen_command(&TuiEvent::Escape, ScreenId::ListAnimals),
            Some(ScreenCommand::FocusSidebar)
        );
    }

    #[test]
    fn test_keys_map_to_inputs() {
        let screen = ScreenId::CreateKeeper;
        let cases = [
            (TuiEvent::Tab, Input::NextField),
            (TuiEvent::BackTab, Input::PrevField),
            (TuiEvent::CursorLeft, Input::CyclePrev),
            (TuiEvent::CursorRight, Input::CycleNext),
            (TuiEvent::Submit, Input::Submit),
            (TuiEvent::InputChar('x'), Input::Char('x')),
            (TuiEvent::Refresh, Input::Refresh),
        ];
        for (event, input) in cases {
            assert_eq!(
                screen_command(&event, screen),
                Some(ScreenCommand::Input(input))
            );
        }
        assert_eq!(screen_command(&TuiEvent::Resize, screen), None);
    }

    #[tokio::test]
    async fn test_spawned_request_reports_back() {
        let gateway = Arc::new(crate::test_support::InMemoryGateway::new());
        gateway.seed_animal(crate::test_support::sample_animal(1, "Leo"));
        let (tx, rx) = mpsc::channel();

        spawn_request(gateway, 7, ApiRequest::GetAnimal(1), tx);

        let action = tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_secs(5)))
            .await
            .unwrap()
            .unwrap();
        match action {
            Action::Response(response) => {
                assert_eq!(response.generation, 7);
                assert_eq!(response.request, ApiRequest::GetAnimal(1));
                assert!(response.result.is_ok());
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn test_tui_state_starts_on_sidebar() {
        let tui = TuiState::new();
        assert_eq!(tui.focus, Focus::Sidebar);
        assert_eq!(tui.sidebar.selected_screen(), Some(ScreenId::About));
    }
}
