//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};

use crate::core::action::{Action, ApiResponse, Effect, update};
use crate::core::entity::{Animal, AnimalWithKeeper, Habitat, Keeper};
use crate::core::state::App;
use crate::gateway::{ApiRequest, EntityGateway, GatewayError, TriFilter, execute};

/// Backend fake holding everything in ordered maps.
///
/// Mirrors the server's rules that matter to the client: duplicate ids
/// conflict on create, missing ids are 404, and habitats or keepers that
/// animals still reference cannot be deleted.
#[derive(Default)]
pub struct InMemoryGateway {
    animals: Mutex<BTreeMap<i64, Animal>>,
    habitats: Mutex<BTreeMap<i64, Habitat>>,
    keepers: Mutex<BTreeMap<i64, Keeper>>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_animal(&self, animal: Animal) {
        self.animals.lock().unwrap().insert(animal.id, animal);
    }

    pub fn seed_habitat(&self, habitat: Habitat) {
        self.habitats.lock().unwrap().insert(habitat.id, habitat);
    }

    pub fn seed_keeper(&self, keeper: Keeper) {
        self.keepers.lock().unwrap().insert(keeper.id, keeper);
    }

    pub fn animal(&self, id: i64) -> Option<Animal> {
        self.animals.lock().unwrap().get(&id).cloned()
    }

    fn animals_in(&self, habitat_id: i64) -> Vec<Animal> {
        self.animals
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.habitat_id == Some(habitat_id))
            .cloned()
            .collect()
    }

    fn with_animals(&self, mut habitat: Habitat) -> Habitat {
        habitat.animals = Some(self.animals_in(habitat.id));
        habitat
    }
}

fn keep(filter: TriFilter, value: bool) -> bool {
    match filter {
        TriFilter::All => true,
        TriFilter::Only => value,
        TriFilter::Without => !value,
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[async_trait]
impl EntityGateway for InMemoryGateway {
    fn name(&self) -> &str {
        "in-memory"
    }

    async fn health(&self) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn list_animals(&self, filter: TriFilter) -> Result<Vec<Animal>, GatewayError> {
        Ok(self
            .animals
            .lock()
            .unwrap()
            .values()
            .filter(|a| keep(filter, a.is_wild))
            .cloned()
            .collect())
    }

    async fn get_animal(&self, id: i64) -> Result<Animal, GatewayError> {
        self.animal(id).ok_or(GatewayError::NotFound)
    }

    async fn create_animal(&self, animal: &Animal) -> Result<Animal, GatewayError> {
        let mut animals = self.animals.lock().unwrap();
        if animals.contains_key(&animal.id) {
            return Err(GatewayError::conflict(format!(
                "Animal with id {} already exists",
                animal.id
            )));
        }
        animals.insert(animal.id, animal.clone());
        Ok(animal.clone())
    }

    async fn update_animal(&self, animal: &Animal) -> Result<Animal, GatewayError> {
        let mut animals = self.animals.lock().unwrap();
        match animals.get_mut(&animal.id) {
            Some(slot) => {
                *slot = animal.clone();
                Ok(animal.clone())
            }
            None => Err(GatewayError::NotFound),
        }
    }

    async fn delete_animal(&self, id: i64) -> Result<(), GatewayError> {
        self.animals
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(GatewayError::NotFound)
    }

    async fn animals_by_weight(&self, min_weight: f64) -> Result<Vec<Animal>, GatewayError> {
        Ok(self
            .animals
            .lock()
            .unwrap()
            .values()
            .filter(|a| a.weight >= min_weight)
            .cloned()
            .collect())
    }

    async fn animals_by_name(&self, name: &str) -> Result<Vec<Animal>, GatewayError> {
        Ok(self
            .animals
            .lock()
            .unwrap()
            .values()
            .filter(|a| contains_ignore_case(&a.name, name))
            .cloned()
            .collect())
    }

    async fn animal_with_keeper(&self, id: i64) -> Result<AnimalWithKeeper, GatewayError> {
        let animal = self.animal(id).ok_or(GatewayError::NotFound)?;
        let keeper = animal
            .keeper_id
            .and_then(|k| self.keepers.lock().unwrap().get(&k).cloned());
        Ok(AnimalWithKeeper { animal, keeper })
    }

    async fn animals_with_keepers(&self) -> Result<Vec<AnimalWithKeeper>, GatewayError> {
        let animals: Vec<Animal> = self.animals.lock().unwrap().values().cloned().collect();
        let keepers = self.keepers.lock().unwrap();
        Ok(animals
            .into_iter()
            .map(|animal| {
                let keeper = animal.keeper_id.and_then(|k| keepers.get(&k).cloned());
                AnimalWithKeeper { animal, keeper }
            })
            .collect())
    }

    async fn assign_keeper(&self, animal_id: i64, keeper_id: i64) -> Result<(), GatewayError> {
        if !self.keepers.lock().unwrap().contains_key(&keeper_id) {
            return Err(GatewayError::NotFound);
        }
        let mut animals = self.animals.lock().unwrap();
        let animal = animals.get_mut(&animal_id).ok_or(GatewayError::NotFound)?;
        animal.keeper_id = Some(keeper_id);
        Ok(())
    }

    async fn list_habitats(&self, filter: TriFilter) -> Result<Vec<Habitat>, GatewayError> {
        Ok(self
            .habitats
            .lock()
            .unwrap()
            .values()
            .filter(|h| keep(filter, h.is_covered))
            .cloned()
            .collect())
    }

    async fn get_habitat(&self, id: i64) -> Result<Habitat, GatewayError> {
        self.habitats
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(GatewayError::NotFound)
    }

    async fn create_habitat(&self, habitat: &Habitat) -> Result<Habitat, GatewayError> {
        let mut habitats = self.habitats.lock().unwrap();
        if habitats.contains_key(&habitat.id) {
            return Err(GatewayError::Conflict { message: None });
        }
        habitats.insert(habitat.id, habitat.clone());
        Ok(habitat.clone())
    }

    async fn update_habitat(&self, habitat: &Habitat) -> Result<Habitat, GatewayError> {
        let mut habitats = self.habitats.lock().unwrap();
        match habitats.get_mut(&habitat.id) {
            Some(slot) => {
                *slot = habitat.clone();
                Ok(habitat.clone())
            }
            None => Err(GatewayError::NotFound),
        }
    }

    async fn delete_habitat(&self, id: i64) -> Result<(), GatewayError> {
        if !self.animals_in(id).is_empty() {
            return Err(GatewayError::conflict(
                "Cannot delete habitat: it still has animals assigned",
            ));
        }
        self.habitats
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(GatewayError::NotFound)
    }

    async fn habitat_with_animals(&self, id: i64) -> Result<Habitat, GatewayError> {
        let habitat = self.get_habitat(id).await?;
        Ok(self.with_animals(habitat))
    }

    async fn habitats_with_animals(&self) -> Result<Vec<Habitat>, GatewayError> {
        let habitats: Vec<Habitat> = self.habitats.lock().unwrap().values().cloned().collect();
        Ok(habitats.into_iter().map(|h| self.with_animals(h)).collect())
    }

    async fn list_keepers(&self, filter: TriFilter) -> Result<Vec<Keeper>, GatewayError> {
        Ok(self
            .keepers
            .lock()
            .unwrap()
            .values()
            .filter(|k| keep(filter, k.is_active))
            .cloned()
            .collect())
    }

    async fn get_keeper(&self, id: i64) -> Result<Keeper, GatewayError> {
        self.keepers
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .ok_or(GatewayError::NotFound)
    }

    async fn create_keeper(&self, keeper: &Keeper) -> Result<Keeper, GatewayError> {
        let mut keepers = self.keepers.lock().unwrap();
        if keepers.contains_key(&keeper.id) {
            return Err(GatewayError::Conflict { message: None });
        }
        keepers.insert(keeper.id, keeper.clone());
        Ok(keeper.clone())
    }

    async fn update_keeper(&self, keeper: &Keeper) -> Result<Keeper, GatewayError> {
        let mut keepers = self.keepers.lock().unwrap();
        match keepers.get_mut(&keeper.id) {
            Some(slot) => {
                *slot = keeper.clone();
                Ok(keeper.clone())
            }
            None => Err(GatewayError::NotFound),
        }
    }

    async fn delete_keeper(&self, id: i64) -> Result<(), GatewayError> {
        let referenced = self
            .animals
            .lock()
            .unwrap()
            .values()
            .any(|a| a.keeper_id == Some(id));
        if referenced {
            return Err(GatewayError::Conflict { message: None });
        }
        self.keepers
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or(GatewayError::NotFound)
    }

    async fn keepers_by_name(&self, name: &str) -> Result<Vec<Keeper>, GatewayError> {
        Ok(self
            .keepers
            .lock()
            .unwrap()
            .values()
            .filter(|k| contains_ignore_case(&k.full_name(), name))
            .cloned()
            .collect())
    }

    async fn keepers_by_specialization(
        &self,
        specialization: &str,
    ) -> Result<Vec<Keeper>, GatewayError> {
        Ok(self
            .keepers
            .lock()
            .unwrap()
            .values()
            .filter(|k| contains_ignore_case(&k.specialization, specialization))
            .cloned()
            .collect())
    }

    async fn keepers_by_experience(&self, min_years: u32) -> Result<Vec<Keeper>, GatewayError> {
        Ok(self
            .keepers
            .lock()
            .unwrap()
            .values()
            .filter(|k| k.years_of_experience >= min_years)
            .cloned()
            .collect())
    }
}

fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(12, 0, 0))
        .unwrap()
}

pub fn sample_animal(id: i64, name: &str) -> Animal {
    Animal {
        id,
        name: name.to_string(),
        weight: 190.5,
        birth_date_time: noon(2019, 3, 15),
        is_wild: true,
        habitat_id: None,
        keeper_id: None,
    }
}

pub fn sample_habitat(id: i64, name: &str) -> Habitat {
    Habitat {
        id,
        name: name.to_string(),
        area: 5000.0,
        established_date: noon(2001, 6, 1),
        is_visitor_accessible: true,
        is_covered: false,
        animals: None,
    }
}

pub fn sample_keeper(id: i64, first_name: &str, last_name: &str) -> Keeper {
    Keeper {
        id,
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: format!("{}@zoo.test", first_name.to_lowercase()),
        hire_date: NaiveDate::from_ymd_opt(2015, 9, 1).unwrap(),
        specialization: "Mammals".to_string(),
        is_active: true,
        years_of_experience: 8,
    }
}

/// Creates a test App backed by the given fake.
pub fn test_app_with(gateway: Arc<InMemoryGateway>) -> App {
    App::new(gateway, "http://zoo.test".to_string())
}

/// Creates a test App backed by an empty fake.
pub fn test_app() -> App {
    test_app_with(Arc::new(InMemoryGateway::new()))
}

/// Apply an action and run every request it triggers against `gateway`
/// until the app settles, the way the event loop would.
pub async fn drive(app: &mut App, gateway: &InMemoryGateway, action: Action) {
    let mut effect = update(app, action);
    while let Effect::Request {
        generation,
        request,
    } = effect
    {
        let result = execute(gateway, request.clone()).await;
        effect = update(
            app,
            Action::Response(ApiResponse {
                generation,
                request,
                result,
            }),
        );
    }
}

/// Feed a canned response for the request the app is waiting on.
pub fn respond(
    app: &mut App,
    effect: Effect,
    result: Result<crate::gateway::ApiPayload, GatewayError>,
) -> Effect {
    let Effect::Request {
        generation,
        request,
    } = effect
    else {
        panic!("expected a request effect, got {effect:?}");
    };
    update(
        app,
        Action::Response(ApiResponse {
            generation,
            request,
            result,
        }),
    )
}

/// Type a string into whatever has focus.
pub fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        let _ = update(app, Action::Input(crate::core::view::Input::Char(c)));
    }
}

pub fn request_of(effect: &Effect) -> Option<&ApiRequest> {
    match effect {
        Effect::Request { request, .. } => Some(request),
        _ => None,
    }
}
