//! # View Navigator
//!
//! In-memory replacement for a URL router: which screen is showing, and which
//! entity (if any) has been handed from a search step to the edit/delete step
//! that follows it.
//!
//! ```text
//!   search-edit ──found──▶ edit ──back──▶ search-edit
//!        │                  │
//!   (not found: stay)   (saved) ──▶ list
//! ```
//!
//! Mutation only happens through [`ViewNavigator::transition`] and
//! [`ViewNavigator::clear_selection`]. [`ViewNavigator::render`] is pure.

use log::debug;

use crate::core::entity::{Animal, EntityKind, EntitySnapshot, Habitat, Keeper};
use crate::core::screen::ScreenId;

/// One optional snapshot per entity kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selections {
    pub animal: Option<Animal>,
    pub habitat: Option<Habitat>,
    pub keeper: Option<Keeper>,
}

impl Selections {
    fn get(&self, kind: EntityKind) -> Option<EntitySnapshot> {
        match kind {
            EntityKind::Animal => self.animal.clone().map(EntitySnapshot::Animal),
            EntityKind::Habitat => self.habitat.clone().map(EntitySnapshot::Habitat),
            EntityKind::Keeper => self.keeper.clone().map(EntitySnapshot::Keeper),
        }
    }

    fn is_held(&self, kind: EntityKind) -> bool {
        match kind {
            EntityKind::Animal => self.animal.is_some(),
            EntityKind::Habitat => self.habitat.is_some(),
            EntityKind::Keeper => self.keeper.is_some(),
        }
    }

    fn store(&mut self, snapshot: EntitySnapshot) {
        match snapshot {
            EntitySnapshot::Animal(a) => self.animal = Some(a),
            EntitySnapshot::Habitat(h) => self.habitat = Some(h),
            EntitySnapshot::Keeper(k) => self.keeper = Some(k),
        }
    }

    fn clear(&mut self, kind: EntityKind) {
        match kind {
            EntityKind::Animal => self.animal = None,
            EntityKind::Habitat => self.habitat = None,
            EntityKind::Keeper => self.keeper = None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewNavigator {
    current: ScreenId,
    selections: Selections,
}

impl Default for ViewNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewNavigator {
    pub fn new() -> Self {
        Self::starting_at(ScreenId::About)
    }

    pub fn starting_at(screen: ScreenId) -> Self {
        Self {
            current: screen,
            selections: Selections::default(),
        }
    }

    pub fn current(&self) -> ScreenId {
        self.current
    }

    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    pub fn selection(&self, kind: EntityKind) -> Option<EntitySnapshot> {
        self.selections.get(kind)
    }

    pub fn selected_animal(&self) -> Option<&Animal> {
        self.selections.animal.as_ref()
    }

    pub fn selected_habitat(&self) -> Option<&Habitat> {
        self.selections.habitat.as_ref()
    }

    pub fn selected_keeper(&self) -> Option<&Keeper> {
        self.selections.keeper.as_ref()
    }

    /// Switch to `target`, optionally handing it an entity.
    ///
    /// Slots the target does not need are emptied. A payload is kept only
    /// when its kind is the one `target` requires.
    pub fn transition(&mut self, target: ScreenId, payload: Option<EntitySnapshot>) {
        let required = target.required_selection();
        debug!(
            "Navigator: {} -> {} (payload: {:?})",
            self.current,
            target,
            payload.as_ref().map(|p| (p.kind(), p.id()))
        );
        self.current = target;

        for kind in EntityKind::ALL {
            if required != Some(kind) {
                self.selections.clear(kind);
            }
        }

        if let Some(snapshot) = payload {
            if required == Some(snapshot.kind()) {
                self.selections.store(snapshot);
            } else {
                debug!(
                    "Navigator: dropping {} payload, {} does not hold one",
                    snapshot.kind(),
                    target
                );
            }
        }
    }

    /// Drop the held entity of `kind`. Idempotent; never changes the screen.
    pub fn clear_selection(&mut self, kind: EntityKind) {
        self.selections.clear(kind);
    }

    /// The screen that should actually be drawn for `screen` given the
    /// current selections.
    pub fn resolve(&self, screen: ScreenId) -> ScreenId {
        match screen.required_selection() {
            Some(kind) if !self.selections.is_held(kind) => ScreenId::FALLBACK,
            _ => screen,
        }
    }

    /// The screen to draw right now.
    pub fn render(&self) -> ScreenId {
        self.resolve(self.current)
    }
}
