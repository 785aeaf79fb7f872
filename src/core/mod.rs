//! # Core Application Logic
//!
//! This module contains Pulpit's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Reference parser     │
//!                    │  • Navigator            │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │    TUI     │              │    CLI     │
//!           │  Adapter   │              │ (one-shot) │
//!           │ (ratatui)  │              │            │
//!           └────────────┘              └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`reference`]: Free-text scripture references ("John 3:16-18")
//! - [`books`]: Canonical book names and ordering
//! - [`navigation`]: The `Navigator`, current item plus lazy verse extension
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum, everything that can happen in the app
//! - [`config`]: Layered configuration

pub mod action;
pub mod books;
pub mod config;
pub mod navigation;
pub mod reference;
pub mod state;
