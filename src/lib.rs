//! Client library for the CodeTrack coding-activity dashboard.
//!
//! [`CodeTrackClient`] maps each REST endpoint to one async method.
//! [`QueryClient`] layers a staleness-bounded cache, enablement gating and
//! user notifications on top, and the [`view`] module turns query results
//! into page-ready view models.

pub use client::CodeTrackClient;
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use model::*;
pub use query::{Notifier, QueryCache, QueryClient, QueryKey, Scope, TracingNotifier};

pub mod analytics;
pub(crate) mod api;
mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod view;
