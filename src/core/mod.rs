//! # Core Application Logic
//!
//! This module contains Newsflash's view state and the rules that keep it
//! consistent. It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • ArticleList          │
//!                    │  • CategoryState        │
//!                    │  • Surface (toast/modal)│
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌─────────────┐                         ┌─────────────┐
//!     │ Coordinator │  effects → gateway      │    TUI      │
//!     │  (tokio)    │  results → actions      │  (ratatui)  │
//!     └─────────────┘                         └─────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct that owns every state region
//! - [`action`]: The `Action` enum, the `Effect` enum and `update()`
//! - [`articles`]: Article list, list query and request ordering
//! - [`category`]: Category tree, selection and tree traversal
//! - [`surface`]: Toast notifications, modals and the scroll lock
//! - [`process`]: URL processing form and its validation
//! - [`fallback`]: Offline dataset
//! - [`config`]: Settings file and override resolution

pub mod action;
pub mod articles;
pub mod category;
pub mod config;
pub mod fallback;
pub mod process;
pub mod state;
pub mod surface;
