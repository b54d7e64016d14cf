//! # Application State
//!
//! Core business state for Menagerie. This module contains domain logic
//! only, no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── gateway: Arc<dyn EntityGateway>  // backend access, cloned into tasks
//! ├── navigator: ViewNavigator         // current screen + held selections
//! ├── view: ViewState                  // state of the screen on display
//! ├── generation: u64                  // bumped on every transition
//! ├── status_message: String           // status bar text
//! └── api_url: String                  // shown in the title bar
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use log::{debug, info};

use crate::core::action::Effect;
use crate::core::config::ResolvedConfig;
use crate::core::navigator::ViewNavigator;
use crate::core::screen::ScreenId;
use crate::core::view::{Navigation, Outcome, ViewState};
use crate::gateway::EntityGateway;

pub struct App {
    pub gateway: Arc<dyn EntityGateway>,
    pub navigator: ViewNavigator,
    pub view: ViewState,
    /// Identifies the screen visit that issued a request. Responses carrying
    /// an older generation belong to a screen that is gone and are dropped.
    pub generation: u64,
    pub status_message: String,
    pub api_url: String,
}

impl App {
    pub fn new(gateway: Arc<dyn EntityGateway>, api_url: String) -> Self {
        Self {
            gateway,
            navigator: ViewNavigator::new(),
            view: ViewState::default(),
            generation: 0,
            status_message: String::from("Welcome to Menagerie!"),
            api_url,
        }
    }

    pub fn from_config(gateway: Arc<dyn EntityGateway>, config: &ResolvedConfig) -> Self {
        Self::new(gateway, config.base_url.clone())
    }

    /// The screen actually on display.
    pub fn screen(&self) -> ScreenId {
        self.navigator.render()
    }

    /// Turn a view's outcome into an effect for the event loop.
    pub fn apply(&mut self, outcome: Outcome) -> Effect {
        match outcome {
            Outcome::Stay => Effect::None,
            Outcome::Request(request) => Effect::Request {
                generation: self.generation,
                request,
            },
            Outcome::Navigate(navigation) => self.navigate(navigation),
        }
    }

    /// Move the navigator and rebuild the view for wherever it lands.
    pub fn navigate(&mut self, navigation: Navigation) -> Effect {
        let Navigation {
            target,
            payload,
            clear,
            notice,
        } = navigation;
        self.navigator.transition(target, payload);
        if let Some(kind) = clear {
            self.navigator.clear_selection(kind);
        }
        self.generation += 1;

        let screen = self.navigator.render();
        if screen != target {
            info!("{target} needs a selection; showing {screen} instead");
        }
        self.status_message = notice.unwrap_or_else(|| screen.label().to_string());

        let (view, request) = ViewState::enter(screen, &self.navigator);
        self.view = view;
        debug!("Now on {screen} (generation {})", self.generation);
        match request {
            Some(request) => Effect::Request {
                generation: self.generation,
                request,
            },
            None => Effect::None,
        }
    }
}
