//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Display components that receive all data as props:
//! - `TitleBar`: app name, data status badge, status message
//! - `TabBar`: Hymns / Scripture selector
//! - `Preview`: operator view of the current item with navigation hints
//! - `Projection`: full-screen congregation view
//! - `ErrorPopup`: centered error overlay
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `InputBox`: single-line entry for hymn numbers and references
//!
//! Components receive external data as props, never by reaching into `App`:
//!
//! ```rust,ignore
//! // Good: dependencies are explicit
//! TitleBar::new(app.data_status().clone(), app.status_message.clone()).render(frame, area);
//! ```
//!
//! ```text
//! components/
//! ├── mod.rs           (this file)
//! ├── title_bar.rs
//! ├── tab_bar.rs
//! ├── input_box.rs
//! ├── preview.rs
//! ├── projection.rs
//! └── error_popup.rs
//! ```

mod error_popup;
mod input_box;
mod preview;
mod projection;
mod tab_bar;
mod title_bar;

pub use error_popup::ErrorPopup;
pub use input_box::{InputBox, InputEvent};
pub use preview::Preview;
pub use projection::Projection;
pub use tab_bar::TabBar;
pub use title_bar::TitleBar;
