//! # Screen Views
//!
//! Per-screen state. Every time the navigator lands on a screen, a fresh
//! [`ViewState`] is built for it by [`ViewState::enter`]; nothing survives a
//! transition except the navigator's selections.
//!
//! ```text
//! Input ──▶ view.input() ──▶ Outcome ──▶ update() ──▶ Effect
//!                               ▲
//! Response ──▶ view.respond() ──┘
//! ```
//!
//! Views never perform I/O. They describe calls as [`ApiRequest`] values and
//! remember which ones they are waiting on; a response for anything else is
//! ignored.

mod about;
mod crud;
mod relations;
mod search;

pub use about::{AboutView, ApiStatus};
pub use crud::{DeleteView, FormMode, FormView, ListView, LookupView};
pub use relations::{AnimalsWithKeepersView, AssignKeeperView, HabitatsWithAnimalsView};
pub use search::{AnimalKeeperView, HabitatLookupView, QueryMode, QueryView};

use log::{debug, warn};

use crate::core::entity::{EntityKind, EntitySnapshot};
use crate::core::navigator::ViewNavigator;
use crate::core::screen::ScreenId;
use crate::gateway::{ApiPayload, ApiRequest, GatewayError};

/// Screen-level input, already stripped of any terminal detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Char(char),
    Backspace,
    NextField,
    PrevField,
    Up,
    Down,
    /// Left/right: cycle a filter or search mode, or flip a flag.
    CycleNext,
    CyclePrev,
    Submit,
    Back,
    Refresh,
}

/// One-line feedback shown inside a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flash {
    Success(String),
    Error(String),
}

impl Flash {
    pub fn text(&self) -> &str {
        match self {
            Flash::Success(text) | Flash::Error(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Flash::Error(_))
    }
}

/// A request to move the navigator.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    pub target: ScreenId,
    pub payload: Option<EntitySnapshot>,
    /// Selection to drop after the move (a finished edit or delete).
    pub clear: Option<EntityKind>,
    /// Status bar text for the new screen.
    pub notice: Option<String>,
}

impl Navigation {
    pub fn to(target: ScreenId) -> Self {
        Self {
            target,
            payload: None,
            clear: None,
            notice: None,
        }
    }

    pub fn with_payload(mut self, payload: EntitySnapshot) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn clearing(mut self, kind: EntityKind) -> Self {
        self.clear = Some(kind);
        self
    }

    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }
}

/// What a view wants done after handling something.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Stay,
    Request(ApiRequest),
    Navigate(Navigation),
}

/// Behaviour shared by every screen view.
pub(crate) trait ScreenView {
    /// Requests issued by this view and not yet answered.
    fn pending(&self) -> &[ApiRequest];
    fn pending_mut(&mut self) -> &mut Vec<ApiRequest>;
    fn input(&mut self, input: Input) -> Outcome;
    fn on_response(
        &mut self,
        request: ApiRequest,
        result: Result<ApiPayload, GatewayError>,
    ) -> Outcome;
}

/// Record `request` as in flight and hand it to the event loop.
pub(crate) fn issue(pending: &mut Vec<ApiRequest>, request: ApiRequest) -> Outcome {
    pending.push(request.clone());
    Outcome::Request(request)
}

/// Message for a failed call that the view does not handle specially.
pub(crate) fn failure_text(err: &GatewayError, what: &str) -> String {
    warn!("Could not {what}: {err}");
    match err {
        GatewayError::Conflict {
            message: Some(message),
        } => message.clone(),
        GatewayError::NotFound => format!("Could not {what}: it no longer exists."),
        _ => format!("Could not {what}. Check that the server is running and try again."),
    }
}

/// Move a list cursor one step, clamped to `len`.
pub(crate) fn step(cursor: usize, len: usize, down: bool) -> usize {
    if len == 0 {
        0
    } else if down {
        (cursor + 1).min(len - 1)
    } else {
        cursor.saturating_sub(1)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    About(AboutView),
    Form(FormView),
    Lookup(LookupView),
    Delete(DeleteView),
    List(ListView),
    Query(QueryView),
    HabitatLookup(HabitatLookupView),
    HabitatsWithAnimals(HabitatsWithAnimalsView),
    AnimalsWithKeepers(AnimalsWithKeepersView),
    AnimalKeeper(AnimalKeeperView),
    AssignKeeper(AssignKeeperView),
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::About(AboutView::default())
    }
}

impl ViewState {
    /// Fresh state for `screen`, plus the request it makes on entry.
    ///
    /// `screen` should already be resolved by the navigator; a selection
    /// screen reached without its selection falls back to About.
    pub fn enter(screen: ScreenId, navigator: &ViewNavigator) -> (Self, Option<ApiRequest>) {
        let (mut view, request) = Self::build(screen, navigator);
        if let Some(request) = &request {
            view.view_mut().pending_mut().push(request.clone());
        }
        debug!("Entered {screen} (initial request: {request:?})");
        (view, request)
    }

    fn build(screen: ScreenId, navigator: &ViewNavigator) -> (Self, Option<ApiRequest>) {
        use ScreenId::*;
        match screen {
            About => (ViewState::About(AboutView::default()), Some(ApiRequest::Health)),
            CreateAnimal | CreateHabitat | CreateKeeper => {
                let kind = screen.group().unwrap_or(EntityKind::Animal);
                (ViewState::Form(FormView::create(screen, kind)), None)
            }
            EditAnimal | EditHabitat | EditKeeper | DeleteAnimal | DeleteHabitat
            | DeleteKeeper => {
                let selection = screen
                    .required_selection()
                    .and_then(|kind| navigator.selection(kind));
                match selection {
                    Some(snapshot) => {
                        if matches!(screen, EditAnimal | EditHabitat | EditKeeper) {
                            (ViewState::Form(FormView::edit(screen, snapshot)), None)
                        } else {
                            (ViewState::Delete(DeleteView::new(screen, snapshot)), None)
                        }
                    }
                    _ => Self::build(ScreenId::FALLBACK, navigator),
                }
            }
            ListAnimals | ListHabitats | ListKeepers => {
                let kind = screen.group().unwrap_or(EntityKind::Animal);
                let view = ListView::new(kind);
                let request = view.request();
                (ViewState::List(view), Some(request))
            }
            SearchEditAnimal | SearchDeleteAnimal | SearchEditHabitat | SearchDeleteHabitat
            | SearchEditKeeper | SearchDeleteKeeper => {
                let target = match screen {
                    SearchEditAnimal => EditAnimal,
                    SearchDeleteAnimal => DeleteAnimal,
                    SearchEditHabitat => EditHabitat,
                    SearchDeleteHabitat => DeleteHabitat,
                    SearchEditKeeper => EditKeeper,
                    _ => DeleteKeeper,
                };
                let kind = screen.group().unwrap_or(EntityKind::Animal);
                (ViewState::Lookup(LookupView::new(kind, target)), None)
            }
            SearchAnimals => (ViewState::Query(QueryView::new(QueryMode::ANIMALS)), None),
            SearchKeeper => (ViewState::Query(QueryView::new(QueryMode::KEEPERS)), None),
            SearchHabitat => (
                ViewState::HabitatLookup(HabitatLookupView::new(false)),
                None,
            ),
            HabitatDetail => (ViewState::HabitatLookup(HabitatLookupView::new(true)), None),
            HabitatsWithAnimals => (
                ViewState::HabitatsWithAnimals(HabitatsWithAnimalsView::default()),
                Some(ApiRequest::HabitatsWithAnimals),
            ),
            AnimalsWithKeepers => (
                ViewState::AnimalsWithKeepers(AnimalsWithKeepersView::default()),
                Some(ApiRequest::AnimalsWithKeepers),
            ),
            AnimalKeeperDetail => (ViewState::AnimalKeeper(AnimalKeeperView::default()), None),
            AssignKeeper => (
                ViewState::AssignKeeper(AssignKeeperView::default()),
                Some(AssignKeeperView::keepers_request()),
            ),
        }
    }

    fn view(&self) -> &dyn ScreenView {
        match self {
            ViewState::About(v) => v,
            ViewState::Form(v) => v,
            ViewState::Lookup(v) => v,
            ViewState::Delete(v) => v,
            ViewState::List(v) => v,
            ViewState::Query(v) => v,
            ViewState::HabitatLookup(v) => v,
            ViewState::HabitatsWithAnimals(v) => v,
            ViewState::AnimalsWithKeepers(v) => v,
            ViewState::AnimalKeeper(v) => v,
            ViewState::AssignKeeper(v) => v,
        }
    }

    fn view_mut(&mut self) -> &mut dyn ScreenView {
        match self {
            ViewState::About(v) => v,
            ViewState::Form(v) => v,
            ViewState::Lookup(v) => v,
            ViewState::Delete(v) => v,
            ViewState::List(v) => v,
            ViewState::Query(v) => v,
            ViewState::HabitatLookup(v) => v,
            ViewState::HabitatsWithAnimals(v) => v,
            ViewState::AnimalsWithKeepers(v) => v,
            ViewState::AnimalKeeper(v) => v,
            ViewState::AssignKeeper(v) => v,
        }
    }

    /// True while any request issued by this view is unanswered.
    pub fn is_busy(&self) -> bool {
        !self.view().pending().is_empty()
    }

    pub fn input(&mut self, input: Input) -> Outcome {
        self.view_mut().input(input)
    }

    /// Deliver a gateway result. Results for requests this view is not
    /// waiting on are dropped.
    pub fn respond(
        &mut self,
        request: ApiRequest,
        result: Result<ApiPayload, GatewayError>,
    ) -> Outcome {
        let view = self.view_mut();
        let Some(index) = view.pending().iter().position(|r| *r == request) else {
            debug!("Ignoring response for {request:?}: not pending in this view");
            return Outcome::Stay;
        };
        view.pending_mut().remove(index);
        view.on_response(request, result)
    }

    /// Periodic health probe; only the About screen reacts.
    pub fn tick(&mut self) -> Outcome {
        match self {
            ViewState::About(about) => about.poll(),
            _ => Outcome::Stay,
        }
    }
}
