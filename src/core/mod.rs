//! # Core Application Logic
//!
//! This module contains Menagerie's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Navigator (screens)  │
//!                    │  • Views (screen state) │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                 ┌──────────────┴──────────────┐
//!                 ▼                             ▼
//!          ┌────────────┐                ┌────────────┐
//!          │    TUI     │                │  Gateway   │
//!          │  Adapter   │                │  (reqwest) │
//!          │ (ratatui)  │                │            │
//!          └────────────┘                └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`entity`]: Animal, Habitat, Keeper and the snapshot wrapper
//! - [`screen`]: The closed set of screens
//! - [`navigator`]: Current screen plus the selection handed between screens
//! - [`form`]: Create/edit forms and their validation
//! - [`view`]: Per-screen state and input handling
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: Layered configuration

pub mod action;
pub mod config;
pub mod entity;
pub mod form;
pub mod navigator;
pub mod screen;
pub mod state;
pub mod view;
