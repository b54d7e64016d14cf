//! # Screens
//!
//! The closed set of navigable screens. A `ScreenId` is the only thing the
//! navigator needs to know about "where" the user is.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::core::entity::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    About,
    // Animals
    CreateAnimal,
    ListAnimals,
    SearchAnimals,
    SearchEditAnimal,
    EditAnimal,
    SearchDeleteAnimal,
    DeleteAnimal,
    // Habitats
    CreateHabitat,
    ListHabitats,
    SearchHabitat,
    SearchEditHabitat,
    EditHabitat,
    SearchDeleteHabitat,
    DeleteHabitat,
    HabitatDetail,
    HabitatsWithAnimals,
    // Keepers
    CreateKeeper,
    ListKeepers,
    SearchKeeper,
    SearchEditKeeper,
    EditKeeper,
    SearchDeleteKeeper,
    DeleteKeeper,
    AnimalsWithKeepers,
    AnimalKeeperDetail,
    AssignKeeper,
}

impl ScreenId {
    pub const ALL: [ScreenId; 27] = [
        ScreenId::About,
        ScreenId::CreateAnimal,
        ScreenId::ListAnimals,
        ScreenId::SearchAnimals,
        ScreenId::SearchEditAnimal,
        ScreenId::EditAnimal,
        ScreenId::SearchDeleteAnimal,
        ScreenId::DeleteAnimal,
        ScreenId::CreateHabitat,
        ScreenId::ListHabitats,
        ScreenId::SearchHabitat,
        ScreenId::SearchEditHabitat,
        ScreenId::EditHabitat,
        ScreenId::SearchDeleteHabitat,
        ScreenId::DeleteHabitat,
        ScreenId::HabitatDetail,
        ScreenId::HabitatsWithAnimals,
        ScreenId::CreateKeeper,
        ScreenId::ListKeepers,
        ScreenId::SearchKeeper,
        ScreenId::SearchEditKeeper,
        ScreenId::EditKeeper,
        ScreenId::SearchDeleteKeeper,
        ScreenId::DeleteKeeper,
        ScreenId::AnimalsWithKeepers,
        ScreenId::AnimalKeeperDetail,
        ScreenId::AssignKeeper,
    ];

    /// The fallback rendered when a screen's required selection is missing.
    pub const FALLBACK: ScreenId = ScreenId::About;

    /// Stable tag, also accepted by `FromStr` and the `start_screen` config key.
    pub fn as_str(self) -> &'static str {
        match self {
            ScreenId::About => "about",
            ScreenId::CreateAnimal => "create",
            ScreenId::ListAnimals => "list",
            ScreenId::SearchAnimals => "search-animals",
            ScreenId::SearchEditAnimal => "search-edit",
            ScreenId::EditAnimal => "edit",
            ScreenId::SearchDeleteAnimal => "search-delete",
            ScreenId::DeleteAnimal => "delete",
            ScreenId::CreateHabitat => "create-habitat",
            ScreenId::ListHabitats => "list-habitats",
            ScreenId::SearchHabitat => "search-habitat",
            ScreenId::SearchEditHabitat => "search-edit-habitat",
            ScreenId::EditHabitat => "edit-habitat",
            ScreenId::SearchDeleteHabitat => "search-delete-habitat",
            ScreenId::DeleteHabitat => "delete-habitat",
            ScreenId::HabitatDetail => "habitat-detail",
            ScreenId::HabitatsWithAnimals => "habitats-with-animals",
            ScreenId::CreateKeeper => "create-keeper",
            ScreenId::ListKeepers => "list-keepers",
            ScreenId::SearchKeeper => "search-keeper",
            ScreenId::SearchEditKeeper => "search-edit-keeper",
            ScreenId::EditKeeper => "edit-keeper",
            ScreenId::SearchDeleteKeeper => "search-delete-keeper",
            ScreenId::DeleteKeeper => "delete-keeper",
            ScreenId::AnimalsWithKeepers => "animals-with-keepers",
            ScreenId::AnimalKeeperDetail => "animal-keeper-detail",
            ScreenId::AssignKeeper => "assign-keeper",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScreenId::About => "About",
            ScreenId::CreateAnimal => "Create animal",
            ScreenId::ListAnimals => "List animals",
            ScreenId::SearchAnimals => "Search animals",
            ScreenId::SearchEditAnimal => "Find animal to edit",
            ScreenId::EditAnimal => "Edit animal",
            ScreenId::SearchDeleteAnimal => "Find animal to delete",
            ScreenId::DeleteAnimal => "Delete animal",
            ScreenId::CreateHabitat => "Create habitat",
            ScreenId::ListHabitats => "List habitats",
            ScreenId::SearchHabitat => "Find habitat",
            ScreenId::SearchEditHabitat => "Find habitat to edit",
            ScreenId::EditHabitat => "Edit habitat",
            ScreenId::SearchDeleteHabitat => "Find habitat to delete",
            ScreenId::DeleteHabitat => "Delete habitat",
            ScreenId::HabitatDetail => "Habitat detail",
            ScreenId::HabitatsWithAnimals => "Habitats with animals",
            ScreenId::CreateKeeper => "Create keeper",
            ScreenId::ListKeepers => "List keepers",
            ScreenId::SearchKeeper => "Search keepers",
            ScreenId::SearchEditKeeper => "Find keeper to edit",
            ScreenId::EditKeeper => "Edit keeper",
            ScreenId::SearchDeleteKeeper => "Find keeper to delete",
            ScreenId::DeleteKeeper => "Delete keeper",
            ScreenId::AnimalsWithKeepers => "Animals with keepers",
            ScreenId::AnimalKeeperDetail => "Animal keeper detail",
            ScreenId::AssignKeeper => "Assign keeper",
        }
    }

    /// The entity kind that must be held for this screen to render.
    pub fn required_selection(self) -> Option<EntityKind> {
        match self {
            ScreenId::EditAnimal | ScreenId::DeleteAnimal => Some(EntityKind::Animal),
            ScreenId::EditHabitat | ScreenId::DeleteHabitat => Some(EntityKind::Habitat),
            ScreenId::EditKeeper | ScreenId::DeleteKeeper => Some(EntityKind::Keeper),
            _ => None,
        }
    }

    /// Sidebar group heading, `None` for top-level entries.
    pub fn group(self) -> Option<EntityKind> {
        match self {
            ScreenId::About => None,
            ScreenId::CreateAnimal
            | ScreenId::ListAnimals
            | ScreenId::SearchAnimals
            | ScreenId::SearchEditAnimal
            | ScreenId::EditAnimal
            | ScreenId::SearchDeleteAnimal
            | ScreenId::DeleteAnimal => Some(EntityKind::Animal),
            ScreenId::CreateHabitat
            | ScreenId::ListHabitats
            | ScreenId::SearchHabitat
            | ScreenId::SearchEditHabitat
            | ScreenId::EditHabitat
            | ScreenId::SearchDeleteHabitat
            | ScreenId::DeleteHabitat
            | ScreenId::HabitatDetail
            | ScreenId::HabitatsWithAnimals => Some(EntityKind::Habitat),
            ScreenId::CreateKeeper
            | ScreenId::ListKeepers
            | ScreenId::SearchKeeper
            | ScreenId::SearchEditKeeper
            | ScreenId::EditKeeper
            | ScreenId::SearchDeleteKeeper
            | ScreenId::DeleteKeeper
            | ScreenId::AnimalsWithKeepers
            | ScreenId::AnimalKeeperDetail
            | ScreenId::AssignKeeper => Some(EntityKind::Keeper),
        }
    }

    /// Screens reachable from the sidebar. Edit/delete screens are only
    /// entered through their search step.
    pub fn menu() -> impl Iterator<Item = ScreenId> {
        Self::ALL
            .into_iter()
            .filter(|screen| screen.required_selection().is_none())
    }

    /// Where "back" leads from a screen that holds a selection.
    pub fn back_target(self) -> Option<ScreenId> {
        match self {
            ScreenId::EditAnimal => Some(ScreenId::SearchEditAnimal),
            ScreenId::DeleteAnimal => Some(ScreenId::SearchDeleteAnimal),
            ScreenId::EditHabitat => Some(ScreenId::SearchEditHabitat),
            ScreenId::DeleteHabitat => Some(ScreenId::SearchDeleteHabitat),
            ScreenId::EditKeeper => Some(ScreenId::SearchEditKeeper),
            ScreenId::DeleteKeeper => Some(ScreenId::SearchDeleteKeeper),
            _ => None,
        }
    }

    /// The list screen for an entity kind.
    pub fn list_for(kind: EntityKind) -> ScreenId {
        match kind {
            EntityKind::Animal => ScreenId::ListAnimals,
            EntityKind::Habitat => ScreenId::ListHabitats,
            EntityKind::Keeper => ScreenId::ListKeepers,
        }
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown screen: {0}")]
pub struct UnknownScreen(pub String);

impl FromStr for ScreenId {
    type Err = UnknownScreen;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScreenId::ALL
            .into_iter()
            .find(|screen| screen.as_str() == s)
            .ok_or_else(|| UnknownScreen(s.to_string()))
    }
}
