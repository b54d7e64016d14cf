//! # Sidebar Component
//!
//! Left-hand menu of every screen that can be opened directly, grouped by
//! entity. Edit and delete screens are absent; they are reached through
//! their search step.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SidebarState` lives in `TuiState`
//! - `Sidebar` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::entity::EntityKind;
use crate::core::screen::ScreenId;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Persistent state for the sidebar.
pub struct SidebarState {
    pub entries: Vec<ScreenId>,
    pub selected: usize,
    pub list_state: ListState,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self::new()
    }
}

impl SidebarState {
    pub fn new() -> Self {
        Self {
            entries: ScreenId::menu().collect(),
            selected: 0,
            list_state: ListState::default(),
        }
    }

    pub fn selected_screen(&self) -> Option<ScreenId> {
        self.entries.get(self.selected).copied()
    }

    /// Move the highlight to `screen`, or to the search step it came from.
    pub fn follow(&mut self, screen: ScreenId) {
        let target = screen.back_target().unwrap_or(screen);
        if let Some(index) = self.entries.iter().position(|s| *s == target) {
            self.selected = index;
        }
    }
}

/// Events emitted by the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarEvent {
    /// Navigate to the highlighted screen and focus it.
    Open(ScreenId),
    /// Focus the current screen without navigating.
    FocusScreen,
    Quit,
}

impl EventHandler for SidebarState {
    type Event = SidebarEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<SidebarEvent> {
        match event {
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            TuiEvent::CursorDown => {
                if !self.entries.is_empty() {
                    self.selected = (self.selected + 1).min(self.entries.len() - 1);
                }
                None
            }
            TuiEvent::Submit | TuiEvent::CursorRight => {
                self.selected_screen().map(SidebarEvent::Open)
            }
            TuiEvent::Tab => Some(SidebarEvent::FocusScreen),
            TuiEvent::InputChar('q') => Some(SidebarEvent::Quit),
            _ => None,
        }
    }
}

/// Transient render wrapper for the sidebar.
pub struct Sidebar<'a> {
    state: &'a mut SidebarState,
    /// Screen on display, marked in the list.
    current: ScreenId,
    focused: bool,
}

impl<'a> Sidebar<'a> {
    pub fn new(state: &'a mut SidebarState, current: ScreenId, focused: bool) -> Self {
        Self {
            state,
            current,
            focused,
        }
    }
}

fn group_heading(group: Option<EntityKind>) -> &'static str {
    match group {
        None => "General",
        Some(EntityKind::Animal) => "Animals",
        Some(EntityKind::Habitat) => "Habitats",
        Some(EntityKind::Keeper) => "Keepers",
    }
}

impl Component for Sidebar<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border = if self.focused {
            Color::Cyan
        } else {
            Color::DarkGray
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Menagerie ")
            .title_alignment(Alignment::Left)
            .padding(Padding::horizontal(1));

        let label_width = area.width.saturating_sub(6) as usize; // borders + padding + marker
        let current = self.current.back_target().unwrap_or(self.current);

        let mut items = Vec::new();
        let mut selected_row = None;
        let mut last_group = None;
        for (i, screen) in self.state.entries.iter().enumerate() {
            let group = Some(screen.group());
            if last_group != group {
                items.push(ListItem::new(Line::from(Span::styled(
                    group_heading(screen.group()),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))));
                last_group = group;
            }

            let style = if i == self.state.selected && self.focused {
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else if *screen == current {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let marker = if *screen == current { "▸ " } else { "  " };
            if i == self.state.selected {
                selected_row = Some(items.len());
            }
            items.push(ListItem::new(Line::from(vec![
                Span::styled(marker, style),
                Span::styled(truncate_str(screen.label(), label_width), style),
            ])));
        }

        self.state.list_state.select(selected_row);
        let list = List::new(items).block(block);
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

/// Truncate a string to fit within `max_width` columns, adding "…" if needed.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
