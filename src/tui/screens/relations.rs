use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, ListState, Paragraph};

use super::{animal_card, busy_line, dim, flash_line, input_line, screen_block, split_header};
use crate::core::screen::ScreenId;
use crate::core::view::{AnimalsWithKeepersView, AssignKeeperView, Flash, HabitatsWithAnimalsView};
use crate::tui::component::Component;
use crate::tui::components::EntityTable;
use crate::tui::components::entity_table::yes_no;

fn load_status(
    busy: bool,
    spinner_frame: usize,
    flash: Option<&Flash>,
    summary: String,
) -> Line<'_> {
    if busy {
        busy_line(true, spinner_frame, "Loading…")
    } else if flash.is_some() {
        flash_line(flash)
    } else {
        dim(summary)
    }
}

pub struct HabitatsWithAnimalsScreen<'a> {
    pub view: &'a HabitatsWithAnimalsView,
    pub screen: ScreenId,
    pub spinner_frame: usize,
}

impl Component for HabitatsWithAnimalsScreen<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = screen_block(self.screen.label());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (header_area, list_area) = split_header(inner, 2);
        let view = self.view;
        let summary = if view.loaded && view.habitats.is_empty() {
            "No habitats yet.".to_string()
        } else {
            format!(
                "{} habitats, {} animals",
                view.habitats.len(),
                view.total_animals()
            )
        };
        let status = load_status(
            !view.pending.is_empty(),
            self.spinner_frame,
            view.flash.as_ref(),
            summary,
        );
        frame.render_widget(Paragraph::new(vec![status]), header_area);

        let mut items = Vec::new();
        let mut selected_row = None;
        for (i, habitat) in view.habitats.iter().enumerate() {
            let expanded = view.is_expanded(habitat);
            let style = if i == view.cursor {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            };
            if i == view.cursor {
                selected_row = Some(items.len());
            }
            items.push(ListItem::new(Line::from(Span::styled(
                format!(
                    "{} {} ({}, {} animals)",
                    if expanded { "▾" } else { "▸" },
                    habitat.name,
                    habitat.id,
                    habitat.animal_count()
                ),
                style,
            ))));
            if !expanded {
                continue;
            }
            let animals = habitat.animals.as_deref().unwrap_or_default();
            if animals.is_empty() {
                items.push(ListItem::new(dim("    (empty)")));
            }
            for animal in animals {
                items.push(ListItem::new(Line::from(vec![
                    Span::raw("    "),
                    Span::styled(animal.name.clone(), Style::default().fg(Color::White)),
                    Span::styled(
                        format!(
                            "  #{}  {:.1} kg  wild: {}",
                            animal.id,
                            animal.weight,
                            yes_no(animal.is_wild)
                        ),
                        Style::default().fg(Color::Gray),
                    ),
                ])));
            }
        }

        let mut state = ListState::default().with_selected(selected_row);
        frame.render_stateful_widget(List::new(items), list_area, &mut state);
    }
}

pub struct AnimalsWithKeepersScreen<'a> {
    pub view: &'a AnimalsWithKeepersView,
    pub screen: ScreenId,
    pub spinner_frame: usize,
}

impl Component for AnimalsWithKeepersScreen<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = screen_block(self.screen.label());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (header_area, table_area) = split_header(inner, 2);
        let view = self.view;
        let assigned = view.rows.iter().filter(|r| r.keeper.is_some()).count();
        let summary = if view.loaded && view.rows.is_empty() {
            "No animals yet.".to_string()
        } else {
            format!("{} animals, {} with a keeper", view.rows.len(), assigned)
        };
        let status = load_status(
            !view.pending.is_empty(),
            self.spinner_frame,
            view.flash.as_ref(),
            summary,
        );
        frame.render_widget(Paragraph::new(vec![status]), header_area);

        EntityTable::pairings(&view.rows)
            .with_cursor(view.cursor)
            .render(frame, table_area);
    }
}

pub struct AssignKeeperScreen<'a> {
    pub view: &'a AssignKeeperView,
    pub screen: ScreenId,
    pub spinner_frame: usize,
}

impl Component for AssignKeeperScreen<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = screen_block(self.screen.label());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let view = self.view;
        let busy = !view.pending.is_empty();
        let mut lines = vec![
            input_line("Animal ID", &view.input),
            if busy {
                busy_line(true, self.spinner_frame, "Working…")
            } else {
                flash_line(view.flash.as_ref())
            },
        ];
        match &view.animal {
            Some(animal) => {
                lines.extend(animal_card(animal));
                lines.push(Line::default());
                lines.push(match view.selected_keeper() {
                    Some(keeper) => Line::from(vec![
                        Span::styled("Press Enter to assign ", Style::default().fg(Color::Gray)),
                        Span::styled(
                            keeper.full_name(),
                            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(format!(" to {}", animal.name), Style::default().fg(Color::Gray)),
                    ]),
                    None => dim("No active keepers available."),
                });
            }
            None => lines.push(dim("Enter an animal ID and press Enter to load it.")),
        }
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Active keepers",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));

        let (header_area, table_area) = split_header(inner, lines.len() as u16);
        frame.render_widget(Paragraph::new(lines), header_area);
        EntityTable::keepers(&view.keepers)
            .with_cursor(view.keeper_cursor)
            .render(frame, table_area);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::core::action::{Action, update};
    use crate::core::screen::ScreenId;
    use crate::core::view::Input;
    use crate::test_support::{
        InMemoryGateway, drive, sample_animal, sample_habitat, sample_keeper, test_app_with,
        type_text,
    };
    use crate::tui::screens::tests::render_app;

    #[tokio::test]
    async fn test_habitats_fold_hides_animals() {
        let gateway = Arc::new(InMemoryGateway::new());
        gateway.seed_habitat(sample_habitat(1001, "Sabana"));
        let mut leo = sample_animal(1, "Leo");
        leo.habitat_id = Some(1001);
        gateway.seed_animal(leo);
        let mut app = test_app_with(gateway.clone());

        drive(&mut app, &gateway, Action::Navigate(ScreenId::HabitatsWithAnimals)).await;
        let text = render_app(&app);
        assert!(text.contains("▾ Sabana (1001, 1 animals)"));
        assert!(text.contains("Leo"));

        update(&mut app, Action::Input(Input::Submit));
        let text = render_app(&app);
        assert!(text.contains("▸ Sabana"));
        assert!(!text.contains("Leo"));
    }

    #[tokio::test]
    async fn test_animals_with_keepers_summary() {
        let gateway = Arc::new(InMemoryGateway::new());
        gateway.seed_keeper(sample_keeper(5, "Ana", "Ruiz"));
        let mut leo = sample_animal(1, "Leo");
        leo.keeper_id = Some(5);
        gateway.seed_animal(leo);
        gateway.seed_animal(sample_animal(2, "Nala"));
        let mut app = test_app_with(gateway.clone());

        drive(&mut app, &gateway, Action::Navigate(ScreenId::AnimalsWithKeepers)).await;
        let text = render_app(&app);
        assert!(text.contains("2 animals, 1 with a keeper"));
        assert!(text.contains("(unassigned)"));
    }

    #[tokio::test]
    async fn test_assign_prompt_names_keeper() {
        let gateway = Arc::new(InMemoryGateway::new());
        gateway.seed_keeper(sample_keeper(5, "Ana", "Ruiz"));
        gateway.seed_animal(sample_animal(1, "Leo"));
        let mut app = test_app_with(gateway.clone());

        drive(&mut app, &gateway, Action::Navigate(ScreenId::AssignKeeper)).await;
        assert!(render_app(&app).contains("Enter an animal ID"));
        type_text(&mut app, "1");
        drive(&mut app, &gateway, Action::Input(Input::Submit)).await;
        assert!(render_app(&app).contains("Press Enter to assign Ana Ruiz to Leo"));
    }
}
