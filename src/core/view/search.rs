//! Read-only searches: animals and keepers by attribute, a habitat by id,
//! an animal together with its keeper.

use crate::core::entity::{AnimalWithKeeper, EntityKind, EntitySnapshot, Habitat};
use crate::core::form::{parse_count, parse_id, parse_positive, required};
use crate::core::view::{Flash, Input, Outcome, ScreenView, failure_text, issue, step};
use crate::gateway::{ApiPayload, ApiRequest, GatewayError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    AnimalsByWeight,
    AnimalsByName,
    KeepersByName,
    KeepersBySpecialization,
    KeepersByExperience,
}

impl QueryMode {
    pub const ANIMALS: &'static [QueryMode] = &[QueryMode::AnimalsByWeight, QueryMode::AnimalsByName];
    pub const KEEPERS: &'static [QueryMode] = &[
        QueryMode::KeepersByName,
        QueryMode::KeepersBySpecialization,
        QueryMode::KeepersByExperience,
    ];

    pub fn label(self) -> &'static str {
        match self {
            QueryMode::AnimalsByWeight => "Minimum weight (kg)",
            QueryMode::AnimalsByName => "Name contains",
            QueryMode::KeepersByName => "Name contains",
            QueryMode::KeepersBySpecialization => "Specialization",
            QueryMode::KeepersByExperience => "Minimum years of experience",
        }
    }

    pub fn kind(self) -> EntityKind {
        match self {
            QueryMode::AnimalsByWeight | QueryMode::AnimalsByName => EntityKind::Animal,
            _ => EntityKind::Keeper,
        }
    }

    fn accepts(self, c: char, current: &str) -> bool {
        match self {
            QueryMode::AnimalsByWeight => {
                c.is_ascii_digit() || (c == '.' && !current.contains('.'))
            }
            QueryMode::KeepersByExperience => c.is_ascii_digit(),
            _ => !c.is_control(),
        }
    }

    fn request(self, raw: &str) -> Result<ApiRequest, String> {
        let label = self.label();
        let parsed = match self {
            QueryMode::AnimalsByWeight => parse_positive(raw, label).map(ApiRequest::AnimalsByWeight),
            QueryMode::AnimalsByName => required(raw, label).map(ApiRequest::AnimalsByName),
            QueryMode::KeepersByName => required(raw, label).map(ApiRequest::KeepersByName),
            QueryMode::KeepersBySpecialization => {
                required(raw, label).map(ApiRequest::KeepersBySpecialization)
            }
            QueryMode::KeepersByExperience => {
                parse_count(raw, label).map(ApiRequest::KeepersByExperience)
            }
        };
        parsed.map_err(|e| e.to_string())
    }
}

/// Attribute search with switchable modes (left/right) and a results table.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryView {
    pub modes: &'static [QueryMode],
    pub mode_index: usize,
    pub input: String,
    pub results: Vec<EntitySnapshot>,
    pub cursor: usize,
    /// True once a search has completed, so "no results" can be told
    /// apart from "not searched yet".
    pub searched: bool,
    pub flash: Option<Flash>,
    pub pending: Vec<ApiRequest>,
}

impl QueryView {
    pub fn new(modes: &'static [QueryMode]) -> Self {
        Self {
            modes,
            mode_index: 0,
            input: String::new(),
            results: Vec::new(),
            cursor: 0,
            searched: false,
            flash: None,
            pending: Vec::new(),
        }
    }

    pub fn mode(&self) -> QueryMode {
        self.modes[self.mode_index % self.modes.len()]
    }

    fn switch(&mut self, forward: bool) {
        let len = self.modes.len();
        self.mode_index = if forward {
            (self.mode_index + 1) % len
        } else {
            (self.mode_index + len - 1) % len
        };
        self.input.clear();
        self.results.clear();
        self.cursor = 0;
        self.searched = false;
        self.flash = None;
        self.pending.clear();
    }
}

impl ScreenView for QueryView {
    fn pending(&self) -> &[ApiRequest] {
        &self.pending
    }

    fn pending_mut(&mut self) -> &mut Vec<ApiRequest> {
        &mut self.pending
    }

    fn input(&mut self, input: Input) -> Outcome {
        match input {
            Input::Char(c) if self.mode().accepts(c, &self.input) => self.input.push(c),
            Input::Backspace => {
                self.input.pop();
            }
            Input::CycleNext | Input::NextField => self.switch(true),
            Input::CyclePrev | Input::PrevField => self.switch(false),
            Input::Up | Input::Down => {
                self.cursor = step(self.cursor, self.results.len(), input == Input::Down);
            }
            Input::Submit | Input::Refresh => match self.mode().request(&self.input) {
                Ok(request) => {
                    self.pending.clear();
                    return issue(&mut self.pending, request);
                }
                Err(message) => self.flash = Some(Flash::Error(message)),
            },
            _ => {}
        }
        Outcome::Stay
    }

    fn on_response(
        &mut self,
        _request: ApiRequest,
        result: Result<ApiPayload, GatewayError>,
    ) -> Outcome {
        let kind = self.mode().kind();
        self.searched = true;
        self.cursor = 0;
        match result {
            Ok(payload) => {
                self.results = payload.into_snapshots().unwrap_or_default();
                self.flash = if self.results.is_empty() {
                    Some(Flash::Error(format!("No {kind}s match this search.")))
                } else {
                    None
                };
            }
            Err(e) => {
                self.results.clear();
                self.flash = Some(Flash::Error(failure_text(&e, &format!("search {kind}s"))));
            }
        }
        Outcome::Stay
    }
}

// ============================================================================
// Habitat by id
// ============================================================================

/// Single-habitat lookup. With `with_animals` set it asks for the
/// habitat's animals too (the detail screen).
#[derive(Debug, Clone, PartialEq)]
pub struct HabitatLookupView {
    pub with_animals: bool,
    pub input: String,
    pub habitat: Option<Habitat>,
    pub flash: Option<Flash>,
    pub pending: Vec<ApiRequest>,
}

impl HabitatLookupView {
    pub fn new(with_animals: bool) -> Self {
        Self {
            with_animals,
            input: String::new(),
            habitat: None,
            flash: None,
            pending: Vec::new(),
        }
    }
}

impl ScreenView for HabitatLookupView {
    fn pending(&self) -> &[ApiRequest] {
        &self.pending
    }

    fn pending_mut(&mut self) -> &mut Vec<ApiRequest> {
        &mut self.pending
    }

    fn input(&mut self, input: Input) -> Outcome {
        match input {
            Input::Char(c) if c.is_ascii_digit() => self.input.push(c),
            Input::Backspace => {
                self.input.pop();
            }
            Input::Submit if self.pending.is_empty() => match parse_id(&self.input, "Habitat ID") {
                Ok(id) => {
                    let request = if self.with_animals {
                        ApiRequest::HabitatWithAnimals(id)
                    } else {
                        ApiRequest::GetHabitat(id)
                    };
                    return issue(&mut self.pending, request);
                }
                Err(_) => self.flash = Some(Flash::Error("Enter a valid numeric ID.".into())),
            },
            _ => {}
        }
        Outcome::Stay
    }

    fn on_response(
        &mut self,
        request: ApiRequest,
        result: Result<ApiPayload, GatewayError>,
    ) -> Outcome {
        match result {
            Ok(ApiPayload::Habitat(habitat)) => {
                self.flash = None;
                self.habitat = Some(habitat);
            }
            Ok(_) => {
                self.flash = Some(Flash::Error("The server sent an unexpected response.".into()));
            }
            Err(GatewayError::NotFound) => {
                let id = match request {
                    ApiRequest::GetHabitat(id) | ApiRequest::HabitatWithAnimals(id) => id,
                    _ => 0,
                };
                self.habitat = None;
                self.flash = Some(Flash::Error(format!("No habitat found with ID {id}.")));
            }
            Err(e) => {
                self.habitat = None;
                self.flash = Some(Flash::Error(failure_text(&e, "look up the habitat")));
            }
        }
        Outcome::Stay
    }
}

// ============================================================================
// Animal with its keeper
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimalKeeperView {
    pub input: String,
    pub record: Option<AnimalWithKeeper>,
    pub flash: Option<Flash>,
    pub pending: Vec<ApiRequest>,
}

impl ScreenView for AnimalKeeperView {
    fn pending(&self) -> &[ApiRequest] {
        &self.pending
    }

    fn pending_mut(&mut self) -> &mut Vec<ApiRequest> {
        &mut self.pending
    }

    fn input(&mut self, input: Input) -> Outcome {
        match input {
            Input::Char(c) if c.is_ascii_digit() => self.input.push(c),
            Input::Backspace => {
                self.input.pop();
            }
            Input::Submit if self.pending.is_empty() => match parse_id(&self.input, "Animal ID") {
                Ok(id) => return issue(&mut self.pending, ApiRequest::AnimalWithKeeper(id)),
                Err(_) => self.flash = Some(Flash::Error("Enter a valid numeric ID.".into())),
            },
            _ => {}
        }
        Outcome::Stay
    }

    fn on_response(
        &mut self,
        _request: ApiRequest,
        result: Result<ApiPayload, GatewayError>,
    ) -> Outcome {
        self.record = None;
        match result {
            Ok(ApiPayload::AnimalWithKeeper(record)) => {
                self.flash = None;
                self.record = Some(record);
            }
            Ok(_) => {
                self.flash = Some(Flash::Error("The server sent an unexpected response.".into()));
            }
            Err(GatewayError::NotFound) => {
                self.flash = Some(Flash::Error("Animal not found.".into()));
            }
            Err(e) => {
                self.flash = Some(Flash::Error(failure_text(&e, "load the animal")));
            }
        }
        Outcome::Stay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_animal, sample_habitat, sample_keeper};

    #[test]
    fn test_weight_query_validates_before_request() {
        let mut view = QueryView::new(QueryMode::ANIMALS);
        view.input(Input::Char('x'));
        assert_eq!(view.input, "");
        assert_eq!(view.input(Input::Submit), Outcome::Stay);
        assert!(view.flash.is_some());

        view.input(Input::Char('1'));
        view.input(Input::Char('0'));
        view.input(Input::Char('0'));
        assert_eq!(
            view.input(Input::Submit),
            Outcome::Request(ApiRequest::AnimalsByWeight(100.0))
        );
    }

    #[test]
    fn test_mode_switch_resets_search() {
        let mut view = QueryView::new(QueryMode::KEEPERS);
        view.input(Input::Char('A'));
        view.searched = true;
        view.input(Input::CyclePrev);
        assert_eq!(view.mode(), QueryMode::KeepersByExperience);
        assert!(view.input.is_empty());
        assert!(!view.searched);
    }

    #[test]
    fn test_empty_keeper_results_flag_no_match() {
        let mut view = QueryView::new(QueryMode::KEEPERS);
        view.on_response(
            ApiRequest::KeepersByName("zz".into()),
            Ok(ApiPayload::Keepers(vec![])),
        );
        assert!(view.searched);
        assert_eq!(
            view.flash,
            Some(Flash::Error("No keepers match this search.".into()))
        );

        view.on_response(
            ApiRequest::KeepersByName("Ana".into()),
            Ok(ApiPayload::Keepers(vec![sample_keeper(1, "Ana", "Ruiz")])),
        );
        assert_eq!(view.results.len(), 1);
        assert!(view.flash.is_none());
    }

    #[test]
    fn test_habitat_detail_asks_for_animals() {
        let mut view = HabitatLookupView::new(true);
        view.input(Input::Char('7'));
        assert_eq!(
            view.input(Input::Submit),
            Outcome::Request(ApiRequest::HabitatWithAnimals(7))
        );
        let mut habitat = sample_habitat(7, "Selva");
        habitat.animals = Some(vec![sample_animal(1, "Mono")]);
        view.on_response(ApiRequest::HabitatWithAnimals(7), Ok(ApiPayload::Habitat(habitat)));
        assert_eq!(view.habitat.as_ref().map(Habitat::animal_count), Some(1));
    }

    #[test]
    fn test_habitat_not_found_names_id() {
        let mut view = HabitatLookupView::new(false);
        view.on_response(ApiRequest::GetHabitat(42), Err(GatewayError::NotFound));
        assert_eq!(
            view.flash,
            Some(Flash::Error("No habitat found with ID 42.".into()))
        );
    }

    #[test]
    fn test_animal_keeper_not_found() {
        let mut view = AnimalKeeperView::default();
        view.on_response(ApiRequest::AnimalWithKeeper(3), Err(GatewayError::NotFound));
        assert!(view.record.is_none());
        assert_eq!(view.flash, Some(Flash::Error("Animal not found.".into())));
    }
}
