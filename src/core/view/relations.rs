//! Screens about how entities relate: animals per habitat, keepers per
//! animal, and assigning a keeper.

use std::collections::BTreeSet;

use crate::core::entity::{Animal, AnimalWithKeeper, Habitat, Keeper};
use crate::core::form::parse_id;
use crate::core::screen::ScreenId;
use crate::core::view::{Flash, Input, Navigation, Outcome, ScreenView, failure_text, issue, step};
use crate::gateway::{ApiPayload, ApiRequest, GatewayError, TriFilter};

// ============================================================================
// Habitats with their animals
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitatsWithAnimalsView {
    pub habitats: Vec<Habitat>,
    /// Ids of habitats whose animal list is unfolded.
    pub expanded: BTreeSet<i64>,
    pub cursor: usize,
    pub loaded: bool,
    pub flash: Option<Flash>,
    pub pending: Vec<ApiRequest>,
}

impl HabitatsWithAnimalsView {
    pub fn total_animals(&self) -> usize {
        self.habitats.iter().map(Habitat::animal_count).sum()
    }

    pub fn is_expanded(&self, habitat: &Habitat) -> bool {
        self.expanded.contains(&habitat.id)
    }

    fn toggle_selected(&mut self) {
        if let Some(habitat) = self.habitats.get(self.cursor)
            && !self.expanded.remove(&habitat.id)
        {
            self.expanded.insert(habitat.id);
        }
    }
}

impl ScreenView for HabitatsWithAnimalsView {
    fn pending(&self) -> &[ApiRequest] {
        &self.pending
    }

    fn pending_mut(&mut self) -> &mut Vec<ApiRequest> {
        &mut self.pending
    }

    fn input(&mut self, input: Input) -> Outcome {
        match input {
            Input::Up | Input::Down => {
                self.cursor = step(self.cursor, self.habitats.len(), input == Input::Down);
            }
            Input::Submit | Input::Char(' ') => self.toggle_selected(),
            Input::Refresh if self.pending.is_empty() => {
                return issue(&mut self.pending, ApiRequest::HabitatsWithAnimals);
            }
            _ => {}
        }
        Outcome::Stay
    }

    fn on_response(
        &mut self,
        _request: ApiRequest,
        result: Result<ApiPayload, GatewayError>,
    ) -> Outcome {
        self.loaded = true;
        match result {
            Ok(ApiPayload::Habitats(habitats)) => {
                // Everything starts unfolded.
                self.expanded = habitats.iter().map(|h| h.id).collect();
                self.habitats = habitats;
                self.cursor = self.cursor.min(self.habitats.len().saturating_sub(1));
                self.flash = None;
            }
            Ok(_) => {}
            Err(e) => {
                self.habitats.clear();
                self.flash = Some(Flash::Error(failure_text(&e, "load habitats")));
            }
        }
        Outcome::Stay
    }
}

// ============================================================================
// Animals with their keepers
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimalsWithKeepersView {
    pub rows: Vec<AnimalWithKeeper>,
    pub cursor: usize,
    pub loaded: bool,
    pub flash: Option<Flash>,
    pub pending: Vec<ApiRequest>,
}

impl ScreenView for AnimalsWithKeepersView {
    fn pending(&self) -> &[ApiRequest] {
        &self.pending
    }

    fn pending_mut(&mut self) -> &mut Vec<ApiRequest> {
        &mut self.pending
    }

    fn input(&mut self, input: Input) -> Outcome {
        match input {
            Input::Up | Input::Down => {
                self.cursor = step(self.cursor, self.rows.len(), input == Input::Down);
            }
            Input::Refresh if self.pending.is_empty() => {
                return issue(&mut self.pending, ApiRequest::AnimalsWithKeepers);
            }
            _ => {}
        }
        Outcome::Stay
    }

    fn on_response(
        &mut self,
        _request: ApiRequest,
        result: Result<ApiPayload, GatewayError>,
    ) -> Outcome {
        self.loaded = true;
        match result {
            Ok(ApiPayload::AnimalsWithKeepers(rows)) => {
                self.rows = rows;
                self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
                self.flash = None;
            }
            Ok(_) => {}
            Err(e) => {
                self.rows.clear();
                self.flash = Some(Flash::Error(failure_text(&e, "load animals and keepers")));
            }
        }
        Outcome::Stay
    }
}

// ============================================================================
// Assign a keeper to an animal
// ============================================================================

/// Two steps on one screen: find the animal by id, then pick one of the
/// active keepers and confirm.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssignKeeperView {
    pub input: String,
    pub animal: Option<Animal>,
    pub keepers: Vec<Keeper>,
    pub keeper_cursor: usize,
    pub flash: Option<Flash>,
    pub pending: Vec<ApiRequest>,
}

impl AssignKeeperView {
    /// Only active keepers can take on animals.
    pub fn keepers_request() -> ApiRequest {
        ApiRequest::ListKeepers(TriFilter::Only)
    }

    pub fn selected_keeper(&self) -> Option<&Keeper> {
        self.keepers.get(self.keeper_cursor)
    }

    fn is_assigning(&self) -> bool {
        self.pending
            .iter()
            .any(|r| matches!(r, ApiRequest::AssignKeeper { .. }))
    }

    fn submit(&mut self) -> Outcome {
        if self.is_assigning() {
            return Outcome::Stay;
        }
        let Some(animal) = &self.animal else {
            return match parse_id(&self.input, "Animal ID") {
                Ok(id) => {
                    self.pending.retain(|r| !matches!(r, ApiRequest::GetAnimal(_)));
                    issue(&mut self.pending, ApiRequest::GetAnimal(id))
                }
                Err(_) => {
                    self.flash = Some(Flash::Error("Enter a valid numeric animal ID.".into()));
                    Outcome::Stay
                }
            };
        };
        let Some(keeper) = self.selected_keeper() else {
            self.flash = Some(Flash::Error("There are no active keepers to assign.".into()));
            return Outcome::Stay;
        };
        let request = ApiRequest::AssignKeeper {
            animal_id: animal.id,
            keeper_id: keeper.id,
        };
        issue(&mut self.pending, request)
    }

    /// The id box changed: drop the found animal and any lookup still out
    /// for the previous id.
    fn forget_animal(&mut self) {
        self.animal = None;
        self.pending.retain(|r| !matches!(r, ApiRequest::GetAnimal(_)));
    }

    fn preselect_current_keeper(&mut self) {
        let current = self.animal.as_ref().and_then(|a| a.keeper_id);
        if let Some(index) = current.and_then(|id| self.keepers.iter().position(|k| k.id == id)) {
            self.keeper_cursor = index;
        }
    }
}

impl ScreenView for AssignKeeperView {
    fn pending(&self) -> &[ApiRequest] {
        &self.pending
    }

    fn pending_mut(&mut self) -> &mut Vec<ApiRequest> {
        &mut self.pending
    }

    fn input(&mut self, input: Input) -> Outcome {
        match input {
            Input::Char(c) if c.is_ascii_digit() => {
                self.input.push(c);
                self.forget_animal();
            }
            Input::Backspace => {
                self.input.pop();
                self.forget_animal();
            }
            Input::Up | Input::Down => {
                self.keeper_cursor =
                    step(self.keeper_cursor, self.keepers.len(), input == Input::Down);
            }
            Input::Submit => return self.submit(),
            Input::Refresh => {
                self.pending.retain(|r| !matches!(r, ApiRequest::ListKeepers(_)));
                return issue(&mut self.pending, Self::keepers_request());
            }
            _ => {}
        }
        Outcome::Stay
    }

    fn on_response(
        &mut self,
        request: ApiRequest,
        result: Result<ApiPayload, GatewayError>,
    ) -> Outcome {
        match (request, result) {
            (ApiRequest::ListKeepers(_), Ok(ApiPayload::Keepers(keepers))) => {
                self.keepers = keepers;
                self.keeper_cursor = 0;
                self.preselect_current_keeper();
            }
            (ApiRequest::ListKeepers(_), Err(e)) => {
                self.keepers.clear();
                self.flash = Some(Flash::Error(failure_text(&e, "load keepers")));
            }
            (ApiRequest::GetAnimal(_), Ok(ApiPayload::Animal(animal))) => {
                self.flash = None;
                self.animal = Some(animal);
                self.preselect_current_keeper();
            }
            (ApiRequest::GetAnimal(id), Err(GatewayError::NotFound)) => {
                self.animal = None;
                self.flash = Some(Flash::Error(format!("No animal found with ID {id}.")));
            }
            (ApiRequest::GetAnimal(_), Err(e)) => {
                self.animal = None;
                self.flash = Some(Flash::Error(failure_text(&e, "look up the animal")));
            }
            (ApiRequest::AssignKeeper { .. }, Ok(_)) => {
                let animal = self.animal.as_ref().map(|a| a.name.clone()).unwrap_or_default();
                let keeper = self
                    .selected_keeper()
                    .map(Keeper::full_name)
                    .unwrap_or_default();
                return Outcome::Navigate(
                    Navigation::to(ScreenId::AnimalsWithKeepers)
                        .with_notice(format!("{keeper} now looks after {animal}")),
                );
            }
            (ApiRequest::AssignKeeper { .. }, Err(e)) => {
                self.flash = Some(Flash::Error(failure_text(&e, "assign the keeper")));
            }
            (request, _) => log::debug!("Unexpected payload for {request:?}"),
        }
        Outcome::Stay
    }
}
