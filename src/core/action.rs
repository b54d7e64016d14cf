//! # Actions
//!
//! Everything that can happen in Menagerie becomes an `Action`.
//! User picks a screen in the sidebar? That's `Action::Navigate(screen)`.
//! The backend answers? That's `Action::Response(..)`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` for the event loop to carry out. No
//! I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! ## Stale responses
//!
//! Every request leaves with the generation that was current when it was
//! issued. Navigating bumps the generation, so a response that arrives after
//! the user has moved on is dropped instead of landing on the wrong screen.

use log::debug;

use crate::core::screen::ScreenId;
use crate::core::state::App;
use crate::core::view::{Input, Navigation};
use crate::gateway::{ApiPayload, ApiRequest, GatewayError};

/// A finished gateway call, tagged with the generation that issued it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub generation: u64,
    pub request: ApiRequest,
    pub result: Result<ApiPayload, GatewayError>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Jump to a screen (sidebar or startup).
    Navigate(ScreenId),
    /// Key input for the screen on display.
    Input(Input),
    /// Periodic timer while the app is idle.
    Tick,
    Response(ApiResponse),
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    /// Run `request` in the background and send back an `Action::Response`
    /// tagged with `generation`.
    Request { generation: u64, request: ApiRequest },
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,
        Action::Navigate(screen) => app.navigate(Navigation::to(screen)),
        Action::Input(input) => {
            let outcome = app.view.input(input);
            app.apply(outcome)
        }
        Action::Tick => {
            let outcome = app.view.tick();
            app.apply(outcome)
        }
        Action::Response(response) => {
            if response.generation != app.generation {
                debug!(
                    "Dropping stale response for {:?} (generation {} != {})",
                    response.request, response.generation, app.generation
                );
                return Effect::None;
            }
            let outcome = app.view.respond(response.request, response.result);
            app.apply(outcome)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::core::entity::EntityKind;
    use crate::core::view::{Flash, ViewState};
    use crate::test_support::{
        InMemoryGateway, drive, request_of, respond, sample_animal, sample_habitat, test_app,
        test_app_with, type_text,
    };

    // ========================================================================
    // Reducer basics
    // ========================================================================

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }

    #[test]
    fn test_navigate_to_list_requests_data() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Navigate(ScreenId::ListAnimals));
        assert_eq!(app.screen(), ScreenId::ListAnimals);
        assert_eq!(
            request_of(&effect),
            Some(&ApiRequest::ListAnimals(Default::default()))
        );
    }

    #[test]
    fn test_tick_only_polls_on_about() {
        let mut app = test_app();
        // The About view starts idle in a fresh app.
        assert!(matches!(
            update(&mut app, Action::Tick),
            Effect::Request {
                request: ApiRequest::Health,
                ..
            }
        ));
        update(&mut app, Action::Navigate(ScreenId::CreateHabitat));
        assert_eq!(update(&mut app, Action::Tick), Effect::None);
    }

    // ========================================================================
    // Edit flow
    // ========================================================================

    #[test]
    fn test_lookup_hit_moves_to_edit_with_selection() {
        let mut app = test_app();
        update(&mut app, Action::Navigate(ScreenId::SearchEditAnimal));
        type_text(&mut app, "12345");
        let effect = update(&mut app, Action::Input(Input::Submit));
        assert_eq!(request_of(&effect), Some(&ApiRequest::GetAnimal(12345)));

        let animal = sample_animal(12345, "León");
        respond(&mut app, effect, Ok(ApiPayload::Animal(animal.clone())));

        assert_eq!(app.screen(), ScreenId::EditAnimal);
        assert_eq!(app.navigator.selected_animal(), Some(&animal));
        let ViewState::Form(form) = &app.view else {
            panic!("expected the edit form");
        };
        assert_eq!(form.form.fields[1].value, "León");
    }

    #[test]
    fn test_edit_save_returns_to_list_and_releases_selection() {
        let mut app = test_app();
        update(&mut app, Action::Navigate(ScreenId::SearchEditAnimal));
        type_text(&mut app, "12345");
        let effect = update(&mut app, Action::Input(Input::Submit));
        respond(
            &mut app,
            effect,
            Ok(ApiPayload::Animal(sample_animal(12345, "León"))),
        );

        let effect = update(&mut app, Action::Input(Input::Submit));
        let Some(ApiRequest::UpdateAnimal(sent)) = request_of(&effect).cloned() else {
            panic!("expected an update request, got {effect:?}");
        };
        let effect = respond(&mut app, effect, Ok(ApiPayload::Animal(sent)));

        assert_eq!(app.screen(), ScreenId::ListAnimals);
        assert!(app.navigator.selected_animal().is_none());
        assert_eq!(app.status_message, "Animal \"León\" updated");
        assert!(matches!(effect, Effect::Request { .. }));
    }

    #[test]
    fn test_back_from_edit_releases_selection() {
        let mut app = test_app();
        update(&mut app, Action::Navigate(ScreenId::SearchEditHabitat));
        type_text(&mut app, "1001");
        let effect = update(&mut app, Action::Input(Input::Submit));
        respond(
            &mut app,
            effect,
            Ok(ApiPayload::Habitat(sample_habitat(1001, "Sabana"))),
        );
        assert_eq!(app.screen(), ScreenId::EditHabitat);

        update(&mut app, Action::Input(Input::Back));
        assert_eq!(app.screen(), ScreenId::SearchEditHabitat);
        assert!(app.navigator.selection(EntityKind::Habitat).is_none());
    }

    // ========================================================================
    // Delete flow
    // ========================================================================

    fn at_delete_habitat(app: &mut App) {
        update(app, Action::Navigate(ScreenId::SearchDeleteHabitat));
        type_text(app, "1001");
        let effect = update(app, Action::Input(Input::Submit));
        respond(
            app,
            effect,
            Ok(ApiPayload::Habitat(sample_habitat(1001, "Sabana"))),
        );
        assert_eq!(app.screen(), ScreenId::DeleteHabitat);
    }

    #[test]
    fn test_delete_completion_goes_to_list() {
        let mut app = test_app();
        at_delete_habitat(&mut app);
        assert_eq!(update(&mut app, Action::Input(Input::Submit)), Effect::None);
        let effect = update(&mut app, Action::Input(Input::Submit));
        assert_eq!(request_of(&effect), Some(&ApiRequest::DeleteHabitat(1001)));

        respond(&mut app, effect, Ok(ApiPayload::Done));
        assert_eq!(app.screen(), ScreenId::ListHabitats);
        assert!(app.navigator.selected_habitat().is_none());
    }

    #[test]
    fn test_delete_conflict_shows_server_message_and_stays() {
        let mut app = test_app();
        at_delete_habitat(&mut app);
        update(&mut app, Action::Input(Input::Submit));
        let effect = update(&mut app, Action::Input(Input::Submit));

        let message = "Habitat 1001 still has 3 animals";
        respond(&mut app, effect, Err(GatewayError::conflict(message)));

        assert_eq!(app.screen(), ScreenId::DeleteHabitat);
        assert!(app.navigator.selected_habitat().is_some());
        let ViewState::Delete(view) = &app.view else {
            panic!("expected the delete view");
        };
        assert_eq!(view.flash, Some(Flash::Error(message.to_string())));
        assert!(!view.armed);
    }

    #[test]
    fn test_lookup_miss_stays_without_selection() {
        let mut app = test_app();
        update(&mut app, Action::Navigate(ScreenId::SearchDeleteAnimal));
        type_text(&mut app, "999");
        let effect = update(&mut app, Action::Input(Input::Submit));
        respond(&mut app, effect, Err(GatewayError::NotFound));

        assert_eq!(app.screen(), ScreenId::SearchDeleteAnimal);
        assert!(app.navigator.selected_animal().is_none());
        let ViewState::Lookup(view) = &app.view else {
            panic!("expected the lookup view");
        };
        assert!(view.flash.as_ref().is_some_and(Flash::is_error));
    }

    // ========================================================================
    // Stale responses
    // ========================================================================

    #[test]
    fn test_response_after_navigation_is_dropped() {
        let mut app = test_app();
        update(&mut app, Action::Navigate(ScreenId::SearchEditAnimal));
        type_text(&mut app, "12345");
        let lookup = update(&mut app, Action::Input(Input::Submit));

        // The user leaves before the lookup returns.
        update(&mut app, Action::Navigate(ScreenId::CreateKeeper));
        let effect = respond(
            &mut app,
            lookup,
            Ok(ApiPayload::Animal(sample_animal(12345, "León"))),
        );

        assert_eq!(effect, Effect::None);
        assert_eq!(app.screen(), ScreenId::CreateKeeper);
        assert!(app.navigator.selected_animal().is_none());
    }

    #[test]
    fn test_submit_while_in_flight_is_ignored() {
        let mut app = test_app();
        update(&mut app, Action::Navigate(ScreenId::SearchEditKeeper));
        type_text(&mut app, "4");
        assert!(matches!(
            update(&mut app, Action::Input(Input::Submit)),
            Effect::Request { .. }
        ));
        assert_eq!(update(&mut app, Action::Input(Input::Submit)), Effect::None);
        assert!(app.view.is_busy());
    }

    // ========================================================================
    // Full loop against the in-memory backend
    // ========================================================================

    #[tokio::test]
    async fn test_delete_referenced_habitat_round_trip() {
        let gateway = Arc::new(InMemoryGateway::new());
        gateway.seed_habitat(sample_habitat(1001, "Sabana"));
        let mut lion = sample_animal(1, "León");
        lion.habitat_id = Some(1001);
        gateway.seed_animal(lion);

        let mut app = test_app_with(gateway.clone());
        drive(&mut app, &gateway, Action::Navigate(ScreenId::SearchDeleteHabitat)).await;
        type_text(&mut app, "1001");
        drive(&mut app, &gateway, Action::Input(Input::Submit)).await;
        assert_eq!(app.screen(), ScreenId::DeleteHabitat);

        drive(&mut app, &gateway, Action::Input(Input::Submit)).await;
        drive(&mut app, &gateway, Action::Input(Input::Submit)).await;

        assert_eq!(app.screen(), ScreenId::DeleteHabitat);
        let ViewState::Delete(view) = &app.view else {
            panic!("expected the delete view");
        };
        assert_eq!(
            view.flash.as_ref().map(Flash::text),
            Some("Cannot delete habitat: it still has animals assigned")
        );
    }

    #[tokio::test]
    async fn test_create_then_list_round_trip() {
        let gateway = Arc::new(InMemoryGateway::new());
        let mut app = test_app_with(gateway.clone());

        drive(&mut app, &gateway, Action::Navigate(ScreenId::CreateAnimal)).await;
        type_text(&mut app, "7");
        update(&mut app, Action::Input(Input::NextField));
        type_text(&mut app, "Nala");
        update(&mut app, Action::Input(Input::NextField));
        type_text(&mut app, "120");
        update(&mut app, Action::Input(Input::NextField));
        type_text(&mut app, "2020-01-01T08:00");
        drive(&mut app, &gateway, Action::Input(Input::Submit)).await;

        assert_eq!(app.screen(), ScreenId::CreateAnimal);
        assert_eq!(gateway.animal(7).map(|a| a.name), Some("Nala".to_string()));

        drive(&mut app, &gateway, Action::Navigate(ScreenId::ListAnimals)).await;
        let ViewState::List(list) = &app.view else {
            panic!("expected the list view");
        };
        assert_eq!(list.items.len(), 1);
        assert!(!app.view.is_busy());
    }
}
