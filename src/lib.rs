//! Newsflash library exports for testing

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub mod coordinator;
pub mod core;
pub mod gateway;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// How the article list is laid out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn toggle(self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }
}
