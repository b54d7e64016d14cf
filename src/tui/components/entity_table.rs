//! # Entity Table Component
//!
//! One table layout per entity kind, shared by the list, search and
//! relation screens. The cursor row is highlighted and kept in view through
//! a `TableState` built each frame.

use chrono::NaiveDateTime;
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Cell, Row, Table, TableState};

use crate::core::entity::{Animal, AnimalWithKeeper, EntitySnapshot, Habitat, Keeper};
use crate::tui::component::Component;

pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

fn optional_id(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn animal_cells(a: &Animal) -> Vec<String> {
    vec![
        a.id.to_string(),
        a.name.clone(),
        format!("{:.1}", a.weight),
        format_datetime(&a.birth_date_time),
        yes_no(a.is_wild).to_string(),
        optional_id(a.habitat_id),
        optional_id(a.keeper_id),
    ]
}

pub fn habitat_cells(h: &Habitat) -> Vec<String> {
    vec![
        h.id.to_string(),
        h.name.clone(),
        format!("{:.1}", h.area),
        format_datetime(&h.established_date),
        yes_no(h.is_visitor_accessible).to_string(),
        yes_no(h.is_covered).to_string(),
    ]
}

pub fn keeper_cells(k: &Keeper) -> Vec<String> {
    vec![
        k.id.to_string(),
        k.full_name(),
        k.email.clone(),
        k.hire_date.to_string(),
        k.specialization.clone(),
        yes_no(k.is_active).to_string(),
        k.years_of_experience.to_string(),
    ]
}

const ANIMAL_HEADER: [&str; 7] = ["ID", "Name", "Weight", "Born", "Wild", "Habitat", "Keeper"];
const ANIMAL_WIDTHS: [Constraint; 7] = [
    Constraint::Length(6),
    Constraint::Min(12),
    Constraint::Length(8),
    Constraint::Length(16),
    Constraint::Length(5),
    Constraint::Length(8),
    Constraint::Length(7),
];

const HABITAT_HEADER: [&str; 6] = ["ID", "Name", "Area", "Established", "Visitors", "Covered"];
const HABITAT_WIDTHS: [Constraint; 6] = [
    Constraint::Length(6),
    Constraint::Min(12),
    Constraint::Length(9),
    Constraint::Length(16),
    Constraint::Length(9),
    Constraint::Length(8),
];

const KEEPER_HEADER: [&str; 7] = ["ID", "Name", "Email", "Hired", "Specialization", "Active", "Years"];
const KEEPER_WIDTHS: [Constraint; 7] = [
    Constraint::Length(6),
    Constraint::Min(14),
    Constraint::Min(16),
    Constraint::Length(10),
    Constraint::Min(12),
    Constraint::Length(6),
    Constraint::Length(5),
];

const PAIRING_HEADER: [&str; 5] = ["Animal ID", "Animal", "Keeper ID", "Keeper", "Specialization"];
const PAIRING_WIDTHS: [Constraint; 5] = [
    Constraint::Length(9),
    Constraint::Min(12),
    Constraint::Length(9),
    Constraint::Min(14),
    Constraint::Min(12),
];

/// A table of rows with an optional highlighted cursor.
pub struct EntityTable {
    header: &'static [&'static str],
    widths: &'static [Constraint],
    rows: Vec<Vec<String>>,
    cursor: Option<usize>,
}

impl EntityTable {
    pub fn animals<'a>(animals: impl IntoIterator<Item = &'a Animal>) -> Self {
        Self::build(&ANIMAL_HEADER, &ANIMAL_WIDTHS, animals.into_iter().map(animal_cells))
    }

    pub fn habitats<'a>(habitats: impl IntoIterator<Item = &'a Habitat>) -> Self {
        Self::build(&HABITAT_HEADER, &HABITAT_WIDTHS, habitats.into_iter().map(habitat_cells))
    }

    pub fn keepers<'a>(keepers: impl IntoIterator<Item = &'a Keeper>) -> Self {
        Self::build(&KEEPER_HEADER, &KEEPER_WIDTHS, keepers.into_iter().map(keeper_cells))
    }

    /// Homogeneous snapshots, as held by the list and search views.
    pub fn snapshots(items: &[EntitySnapshot]) -> Self {
        match items.first() {
            Some(EntitySnapshot::Habitat(_)) => Self::habitats(items.iter().filter_map(|s| match s {
                EntitySnapshot::Habitat(h) => Some(h),
                _ => None,
            })),
            Some(EntitySnapshot::Keeper(_)) => Self::keepers(items.iter().filter_map(|s| match s {
                EntitySnapshot::Keeper(k) => Some(k),
                _ => None,
            })),
            _ => Self::animals(items.iter().filter_map(|s| match s {
                EntitySnapshot::Animal(a) => Some(a),
                _ => None,
            })),
        }
    }

    pub fn pairings(rows: &[AnimalWithKeeper]) -> Self {
        Self::build(
            &PAIRING_HEADER,
            &PAIRING_WIDTHS,
            rows.iter().map(|row| match &row.keeper {
                Some(k) => vec![
                    row.animal.id.to_string(),
                    row.animal.name.clone(),
                    k.id.to_string(),
                    k.full_name(),
                    k.specialization.clone(),
                ],
                None => vec![
                    row.animal.id.to_string(),
                    row.animal.name.clone(),
                    "-".to_string(),
                    "(unassigned)".to_string(),
                    String::new(),
                ],
            }),
        )
    }

    fn build(
        header: &'static [&'static str],
        widths: &'static [Constraint],
        rows: impl Iterator<Item = Vec<String>>,
    ) -> Self {
        Self {
            header,
            widths,
            rows: rows.collect(),
            cursor: None,
        }
    }

    pub fn with_cursor(mut self, cursor: usize) -> Self {
        if !self.rows.is_empty() {
            self.cursor = Some(cursor.min(self.rows.len() - 1));
        }
        self
    }
}

impl Component for EntityTable {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let header = Row::new(self.header.iter().map(|h| Cell::from(*h))).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
        let rows = self
            .rows
            .iter()
            .map(|cells| Row::new(cells.iter().map(|c| Cell::from(c.as_str()))));
        let table = Table::new(rows, self.widths.iter().copied())
            .header(header)
            .column_spacing(1)
            .row_highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );

        let mut state = TableState::default().with_selected(self.cursor);
        frame.render_stateful_widget(table, area, &mut state);
    }
}
