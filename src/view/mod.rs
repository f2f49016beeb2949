//! View models for the dashboard pages.
//!
//! Each loader pulls what a page needs through [`QueryClient`](crate::QueryClient)
//! and folds the outcome into a [`ViewState`] the renderer can match on.

mod actions;
mod dashboard;
mod leaderboard;

pub use actions::*;
pub use dashboard::*;
pub use leaderboard::*;

use serde::Serialize;

/// What a page should show.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum ViewState<T> {
    /// Waiting on a required input (an id or region name); nothing was requested.
    Idle,
    Loading,
    /// The primary data failed to load; carries the user-facing message.
    Failed(String),
    /// Loaded, but there is nothing to show.
    Empty,
    Ready(T),
}

impl<T> ViewState<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn into_ready(self) -> Option<T> {
        match self {
            ViewState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ViewState<U> {
        match self {
            ViewState::Idle => ViewState::Idle,
            ViewState::Loading => ViewState::Loading,
            ViewState::Failed(message) => ViewState::Failed(message),
            ViewState::Empty => ViewState::Empty,
            ViewState::Ready(value) => ViewState::Ready(f(value)),
        }
    }
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Loading
    }
}
