//! Gateway calls as data.
//!
//! `core::update` never performs I/O; it describes the call it wants as an
//! [`ApiRequest`] and the event loop runs it through [`execute`]. The result
//! comes back as an [`ApiPayload`].

use log::debug;

use crate::core::entity::{
    Animal, AnimalWithKeeper, EntityKind, EntitySnapshot, Habitat, Keeper,
};
use crate::gateway::client::{EntityGateway, GatewayError};

/// Three-way list filter. What "only" means depends on the entity:
/// wild animals, covered habitats, active keepers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TriFilter {
    #[default]
    All,
    Only,
    Without,
}

impl TriFilter {
    pub fn next(self) -> Self {
        match self {
            TriFilter::All => TriFilter::Only,
            TriFilter::Only => TriFilter::Without,
            TriFilter::Without => TriFilter::All,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            TriFilter::All => TriFilter::Without,
            TriFilter::Only => TriFilter::All,
            TriFilter::Without => TriFilter::Only,
        }
    }

    /// `is_wild` query value for the animals endpoint.
    pub fn wild_param(self) -> &'static str {
        match self {
            TriFilter::All => "all",
            TriFilter::Only => "wild",
            TriFilter::Without => "no_wild",
        }
    }

    /// Boolean query value for the habitat/keeper endpoints; `None` means no filter.
    pub fn bool_param(self) -> Option<&'static str> {
        match self {
            TriFilter::All => None,
            TriFilter::Only => Some("true"),
            TriFilter::Without => Some("false"),
        }
    }

    pub fn label(self, kind: EntityKind) -> &'static str {
        match (kind, self) {
            (_, TriFilter::All) => "all",
            (EntityKind::Animal, TriFilter::Only) => "wild",
            (EntityKind::Animal, TriFilter::Without) => "domestic",
            (EntityKind::Habitat, TriFilter::Only) => "covered",
            (EntityKind::Habitat, TriFilter::Without) => "open air",
            (EntityKind::Keeper, TriFilter::Only) => "active",
            (EntityKind::Keeper, TriFilter::Without) => "inactive",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    Health,
    ListAnimals(TriFilter),
    GetAnimal(i64),
    CreateAnimal(Animal),
    UpdateAnimal(Animal),
    DeleteAnimal(i64),
    AnimalsByWeight(f64),
    AnimalsByName(String),
    AnimalWithKeeper(i64),
    AnimalsWithKeepers,
    AssignKeeper { animal_id: i64, keeper_id: i64 },
    ListHabitats(TriFilter),
    GetHabitat(i64),
    CreateHabitat(Habitat),
    UpdateHabitat(Habitat),
    DeleteHabitat(i64),
    HabitatWithAnimals(i64),
    HabitatsWithAnimals,
    ListKeepers(TriFilter),
    GetKeeper(i64),
    CreateKeeper(Keeper),
    UpdateKeeper(Keeper),
    DeleteKeeper(i64),
    KeepersByName(String),
    KeepersBySpecialization(String),
    KeepersByExperience(u32),
}

impl ApiRequest {
    pub fn list(kind: EntityKind, filter: TriFilter) -> Self {
        match kind {
            EntityKind::Animal => ApiRequest::ListAnimals(filter),
            EntityKind::Habitat => ApiRequest::ListHabitats(filter),
            EntityKind::Keeper => ApiRequest::ListKeepers(filter),
        }
    }

    pub fn get(kind: EntityKind, id: i64) -> Self {
        match kind {
            EntityKind::Animal => ApiRequest::GetAnimal(id),
            EntityKind::Habitat => ApiRequest::GetHabitat(id),
            EntityKind::Keeper => ApiRequest::GetKeeper(id),
        }
    }

    pub fn create(snapshot: EntitySnapshot) -> Self {
        match snapshot {
            EntitySnapshot::Animal(a) => ApiRequest::CreateAnimal(a),
            EntitySnapshot::Habitat(h) => ApiRequest::CreateHabitat(h),
            EntitySnapshot::Keeper(k) => ApiRequest::CreateKeeper(k),
        }
    }

    pub fn update(snapshot: EntitySnapshot) -> Self {
        match snapshot {
            EntitySnapshot::Animal(a) => ApiRequest::UpdateAnimal(a),
            EntitySnapshot::Habitat(h) => ApiRequest::UpdateHabitat(h),
            EntitySnapshot::Keeper(k) => ApiRequest::UpdateKeeper(k),
        }
    }

    pub fn delete(kind: EntityKind, id: i64) -> Self {
        match kind {
            EntityKind::Animal => ApiRequest::DeleteAnimal(id),
            EntityKind::Habitat => ApiRequest::DeleteHabitat(id),
            EntityKind::Keeper => ApiRequest::DeleteKeeper(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiPayload {
    Healthy,
    Animal(Animal),
    Animals(Vec<Animal>),
    Habitat(Habitat),
    Habitats(Vec<Habitat>),
    Keeper(Keeper),
    Keepers(Vec<Keeper>),
    AnimalWithKeeper(AnimalWithKeeper),
    AnimalsWithKeepers(Vec<AnimalWithKeeper>),
    /// Success with no body worth keeping (delete, assign).
    Done,
}

impl ApiPayload {
    pub fn into_snapshot(self) -> Option<EntitySnapshot> {
        match self {
            ApiPayload::Animal(a) => Some(a.into()),
            ApiPayload::Habitat(h) => Some(h.into()),
            ApiPayload::Keeper(k) => Some(k.into()),
            _ => None,
        }
    }

    pub fn into_snapshots(self) -> Option<Vec<EntitySnapshot>> {
        match self {
            ApiPayload::Animals(v) => Some(v.into_iter().map(Into::into).collect()),
            ApiPayload::Habitats(v) => Some(v.into_iter().map(Into::into).collect()),
            ApiPayload::Keepers(v) => Some(v.into_iter().map(Into::into).collect()),
            _ => None,
        }
    }
}

/// Run one request against a gateway.
pub async fn execute(
    gateway: &dyn EntityGateway,
    request: ApiRequest,
) -> Result<ApiPayload, GatewayError> {
    debug!("Executing {:?} via {}", request, gateway.name());
    let payload = match request {
        ApiRequest::Health => gateway.health().await.map(|_| ApiPayload::Healthy)?,
        ApiRequest::ListAnimals(filter) => ApiPayload::Animals(gateway.list_animals(filter).await?),
        ApiRequest::GetAnimal(id) => ApiPayload::Animal(gateway.get_animal(id).await?),
        ApiRequest::CreateAnimal(a) => ApiPayload::Animal(gateway.create_animal(&a).await?),
        ApiRequest::UpdateAnimal(a) => ApiPayload::Animal(gateway.update_animal(&a).await?),
        ApiRequest::DeleteAnimal(id) => gateway.delete_animal(id).await.map(|_| ApiPayload::Done)?,
        ApiRequest::AnimalsByWeight(w) => ApiPayload::Animals(gateway.animals_by_weight(w).await?),
        ApiRequest::AnimalsByName(name) => {
            ApiPayload::Animals(gateway.animals_by_name(&name).await?)
        }
        ApiRequest::AnimalWithKeeper(id) => {
            ApiPayload::AnimalWithKeeper(gateway.animal_with_keeper(id).await?)
        }
        ApiRequest::AnimalsWithKeepers => {
            ApiPayload::AnimalsWithKeepers(gateway.animals_with_keepers().await?)
        }
        ApiRequest::AssignKeeper {
            animal_id,
            keeper_id,
        } => gateway
            .assign_keeper(animal_id, keeper_id)
            .await
            .map(|_| ApiPayload::Done)?,
        ApiRequest::ListHabitats(filter) => {
            ApiPayload::Habitats(gateway.list_habitats(filter).await?)
        }
        ApiRequest::GetHabitat(id) => ApiPayload::Habitat(gateway.get_habitat(id).await?),
        ApiRequest::CreateHabitat(h) => ApiPayload::Habitat(gateway.create_habitat(&h).await?),
        ApiRequest::UpdateHabitat(h) => ApiPayload::Habitat(gateway.update_habitat(&h).await?),
        ApiRequest::DeleteHabitat(id) => {
            gateway.delete_habitat(id).await.map(|_| ApiPayload::Done)?
        }
        ApiRequest::HabitatWithAnimals(id) => {
            ApiPayload::Habitat(gateway.habitat_with_animals(id).await?)
        }
        ApiRequest::HabitatsWithAnimals => {
            ApiPayload::Habitats(gateway.habitats_with_animals().await?)
        }
        ApiRequest::ListKeepers(filter) => ApiPayload::Keepers(gateway.list_keepers(filter).await?),
        ApiRequest::GetKeeper(id) => ApiPayload::Keeper(gateway.get_keeper(id).await?),
        ApiRequest::CreateKeeper(k) => ApiPayload::Keeper(gateway.create_keeper(&k).await?),
        ApiRequest::UpdateKeeper(k) => ApiPayload::Keeper(gateway.update_keeper(&k).await?),
        ApiRequest::DeleteKeeper(id) => gateway.delete_keeper(id).await.map(|_| ApiPayload::Done)?,
        ApiRequest::KeepersByName(name) => {
            ApiPayload::Keepers(gateway.keepers_by_name(&name).await?)
        }
        ApiRequest::KeepersBySpecialization(spec) => {
            ApiPayload::Keepers(gateway.keepers_by_specialization(&spec).await?)
        }
        ApiRequest::KeepersByExperience(years) => {
            ApiPayload::Keepers(gateway.keepers_by_experience(years).await?)
        }
    };
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{InMemoryGateway, sample_animal, sample_habitat};

    #[test]
    fn test_filter_cycles_both_ways() {
        let mut filter = TriFilter::default();
        for _ in 0..3 {
            filter = filter.next();
        }
        assert_eq!(filter, TriFilter::All);
        assert_eq!(TriFilter::All.prev(), TriFilter::Without);
        assert_eq!(TriFilter::Without.wild_param(), "no_wild");
        assert_eq!(TriFilter::All.bool_param(), None);
        assert_eq!(TriFilter::Only.label(EntityKind::Keeper), "active");
    }

    #[test]
    fn test_execute_get_and_missing() {
        let gateway = InMemoryGateway::new();
        gateway.seed_animal(sample_animal(12345, "León"));

        let found = tokio_test::block_on(execute(&gateway, ApiRequest::get(EntityKind::Animal, 12345)));
        assert_eq!(
            found.unwrap().into_snapshot().map(|s| s.id()),
            Some(12345)
        );

        let missing = tokio_test::block_on(execute(&gateway, ApiRequest::GetAnimal(1)));
        assert_eq!(missing, Err(GatewayError::NotFound));
    }

    #[test]
    fn test_execute_delete_referenced_habitat_conflicts() {
        let gateway = InMemoryGateway::new();
        gateway.seed_habitat(sample_habitat(1001, "Sabana"));
        let mut lion = sample_animal(1, "León");
        lion.habitat_id = Some(1001);
        gateway.seed_animal(lion);

        let result = tokio_test::block_on(execute(&gateway, ApiRequest::DeleteHabitat(1001)));
        assert!(matches!(result, Err(GatewayError::Conflict { .. })));
    }

    #[test]
    fn test_list_payload_into_snapshots() {
        let payload = ApiPayload::Animals(vec![sample_animal(1, "a"), sample_animal(2, "b")]);
        let ids: Vec<i64> = payload
            .into_snapshots()
            .unwrap()
            .iter()
            .map(EntitySnapshot::id)
            .collect();
        assert_eq!(ids, vec![1, 2]);
        assert!(ApiPayload::Done.into_snapshots().is_none());
    }
}
