//! # TUI Components
//!
//! Reusable building blocks for the terminal interface. Screens under
//! `tui::screens` compose these; none of them touch `App` directly.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as parameters:
//! - `TitleBar`: Top status bar with backend URL, screen label and notice
//! - `FormFields`: Label/value lines for an entity form
//! - `EntityTable`: Per-kind table with a highlighted cursor row
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that manage local state and emit events:
//! - `Sidebar`: Screen menu; emits `SidebarEvent`
//!
//! ## Props-Based Data Flow
//!
//! Components receive external data as "props" (constructor arguments), not
//! by reading global state. This keeps dependencies explicit and components
//! testable against a `TestBackend`.
//!
//! ```rust,ignore
//! // Good: Dependencies are explicit
//! TitleBar::new(app.api_url.clone(), app.screen().label(), status, busy).render(frame, area);
//!
//! // Bad: Hidden dependency on global state
//! title_bar.render(frame, area); // reads from global App
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs     (Top status bar)
//! ├── sidebar.rs       (Screen menu)
//! ├── form_fields.rs   (Entity form lines)
//! └── entity_table.rs  (Entity tables and cell formatting)
//! ```

mod title_bar;
pub use title_bar::TitleBar;

pub mod entity_table;
pub mod form_fields;
pub mod sidebar;
pub use entity_table::EntityTable;
pub use form_fields::FormFields;
pub use sidebar::{Sidebar, SidebarEvent, SidebarState};
