//! # Screens
//!
//! One render wrapper per view state. `screen_component` picks the wrapper
//! for whatever the core is currently showing; the wrappers borrow the view
//! for a single frame and hold no state of their own.
//!
//! Shared bits live here: the spinner, flash and input lines, entity cards
//! and the per-screen key help shown in the bottom bar.

mod about;
mod crud;
mod relations;
mod search;

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Padding};

use crate::core::entity::{Animal, EntitySnapshot, Habitat, Keeper};
use crate::core::screen::ScreenId;
use crate::core::state::App;
use crate::core::view::{Flash, ViewState};
use crate::tui::component::Component;
use crate::tui::components::entity_table::{format_datetime, yes_no};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner_glyph(frame: usize) -> &'static str {
    SPINNER[frame % SPINNER.len()]
}

/// The component that renders the current view.
pub fn screen_component<'a>(app: &'a App, spinner_frame: usize) -> Box<dyn Component + 'a> {
    let screen = app.screen();
    match &app.view {
        ViewState::About(view) => Box::new(about::AboutScreen {
            view,
            api_url: &app.api_url,
            spinner_frame,
        }),
        ViewState::Form(view) => Box::new(crud::FormScreen {
            view,
            screen,
            spinner_frame,
        }),
        ViewState::Lookup(view) => Box::new(crud::LookupScreen {
            view,
            screen,
            spinner_frame,
        }),
        ViewState::Delete(view) => Box::new(crud::DeleteScreen {
            view,
            screen,
            spinner_frame,
        }),
        ViewState::List(view) => Box::new(crud::ListScreen {
            view,
            screen,
            spinner_frame,
        }),
        ViewState::Query(view) => Box::new(search::QueryScreen {
            view,
            screen,
            spinner_frame,
        }),
        ViewState::HabitatLookup(view) => Box::new(search::HabitatLookupScreen {
            view,
            screen,
            spinner_frame,
        }),
        ViewState::AnimalKeeper(view) => Box::new(search::AnimalKeeperScreen {
            view,
            screen,
            spinner_frame,
        }),
        ViewState::HabitatsWithAnimals(view) => Box::new(relations::HabitatsWithAnimalsScreen {
            view,
            screen,
            spinner_frame,
        }),
        ViewState::AnimalsWithKeepers(view) => Box::new(relations::AnimalsWithKeepersScreen {
            view,
            screen,
            spinner_frame,
        }),
        ViewState::AssignKeeper(view) => Box::new(relations::AssignKeeperScreen {
            view,
            screen,
            spinner_frame,
        }),
    }
}

/// Key help for the bottom bar while a screen has focus.
pub fn help_text(screen: ScreenId) -> &'static str {
    match screen {
        ScreenId::About => "Enter/Ctrl+R: check backend | Esc: menu | Ctrl+C: quit",
        ScreenId::CreateAnimal | ScreenId::CreateHabitat | ScreenId::CreateKeeper => {
            "Tab/Shift+Tab: field | Space: toggle | Enter: create | Esc: menu"
        }
        ScreenId::EditAnimal | ScreenId::EditHabitat | ScreenId::EditKeeper => {
            "Tab/Shift+Tab: field | Space: toggle | Enter: save | Esc: back"
        }
        ScreenId::DeleteAnimal | ScreenId::DeleteHabitat | ScreenId::DeleteKeeper => {
            "Enter: delete | y/n: confirm | Esc: cancel"
        }
        ScreenId::ListAnimals | ScreenId::ListHabitats | ScreenId::ListKeepers => {
            "↑/↓: move | ←/→: filter | Ctrl+R: reload | Esc: menu"
        }
        ScreenId::SearchEditAnimal
        | ScreenId::SearchEditHabitat
        | ScreenId::SearchEditKeeper
        | ScreenId::SearchDeleteAnimal
        | ScreenId::SearchDeleteHabitat
        | ScreenId::SearchDeleteKeeper
        | ScreenId::SearchHabitat
        | ScreenId::HabitatDetail
        | ScreenId::AnimalKeeperDetail => "Type an ID | Enter: look up | Esc: menu",
        ScreenId::SearchAnimals | ScreenId::SearchKeeper => {
            "←/→ or Tab: search by | Enter: search | ↑/↓: move | Esc: menu"
        }
        ScreenId::HabitatsWithAnimals => "↑/↓: move | Enter/Space: fold | Ctrl+R: reload | Esc: menu",
        ScreenId::AnimalsWithKeepers => "↑/↓: move | Ctrl+R: reload | Esc: menu",
        ScreenId::AssignKeeper => {
            "Type animal ID, Enter: load | ↑/↓: keeper | Enter: assign | Esc: menu"
        }
    }
}

pub(crate) fn screen_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .padding(Padding::horizontal(1))
}

pub(crate) fn flash_line(flash: Option<&Flash>) -> Line<'_> {
    match flash {
        Some(flash) => {
            let color = if flash.is_error() {
                Color::Red
            } else {
                Color::Green
            };
            Line::from(Span::styled(
                flash.text(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
        }
        None => Line::default(),
    }
}

pub(crate) fn input_line<'a>(label: &'a str, value: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::Cyan)),
        Span::styled(value, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled("▏", Style::default().fg(Color::Cyan)),
    ])
}

/// Spinner plus `text` while busy, empty otherwise.
pub(crate) fn busy_line(busy: bool, spinner_frame: usize, text: &str) -> Line<'static> {
    if busy {
        Line::from(Span::styled(
            format!("{} {text}", spinner_glyph(spinner_frame)),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::default()
    }
}

pub(crate) fn dim(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(text.into(), Style::default().fg(Color::DarkGray)))
}

fn pair(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<20}"), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn optional_id(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_else(|| "none".to_string())
}

pub(crate) fn animal_card(a: &Animal) -> Vec<Line<'static>> {
    vec![
        pair("ID", a.id.to_string()),
        pair("Name", a.name.clone()),
        pair("Weight", format!("{:.1} kg", a.weight)),
        pair("Born", format_datetime(&a.birth_date_time)),
        pair("Wild", yes_no(a.is_wild).to_string()),
        pair("Habitat", optional_id(a.habitat_id)),
        pair("Keeper", optional_id(a.keeper_id)),
    ]
}

pub(crate) fn habitat_card(h: &Habitat) -> Vec<Line<'static>> {
    vec![
        pair("ID", h.id.to_string()),
        pair("Name", h.name.clone()),
        pair("Area", format!("{:.1} m²", h.area)),
        pair("Established", format_datetime(&h.established_date)),
        pair("Visitor accessible", yes_no(h.is_visitor_accessible).to_string()),
        pair("Covered", yes_no(h.is_covered).to_string()),
    ]
}

pub(crate) fn keeper_card(k: &Keeper) -> Vec<Line<'static>> {
    vec![
        pair("ID", k.id.to_string()),
        pair("Name", k.full_name()),
        pair("Email", k.email.clone()),
        pair("Hired", k.hire_date.to_string()),
        pair("Specialization", k.specialization.clone()),
        pair("Active", yes_no(k.is_active).to_string()),
        pair("Experience", format!("{} years", k.years_of_experience)),
    ]
}

pub(crate) fn entity_card(snapshot: &EntitySnapshot) -> Vec<Line<'static>> {
    match snapshot {
        EntitySnapshot::Animal(a) => animal_card(a),
        EntitySnapshot::Habitat(h) => habitat_card(h),
        EntitySnapshot::Keeper(k) => keeper_card(k),
    }
}

/// Split `area` into a header of `lines` rows and the remainder.
pub(crate) fn split_header(area: Rect, lines: u16) -> (Rect, Rect) {
    let header = lines.min(area.height);
    (
        Rect {
            height: header,
            ..area
        },
        Rect {
            y: area.y + header,
            height: area.height - header,
            ..area
        },
    )
}
