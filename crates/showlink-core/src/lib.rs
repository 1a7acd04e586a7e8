//! Series title resolution and batch favorite/list mutation against the
//! TMDB catalog, with per-item outcome reconciliation and reporting.

pub mod builder;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod reconcile;
pub mod report;
pub mod resolver;
pub mod service;

#[cfg(test)]
mod testing;

pub use config::AppConfig;
pub use error::CoreError;
pub use models::{
    BatchResult, ItemOutcome, MutationMode, MutationTarget, OutcomeStatus, Resolution,
    TitleResolution,
};
pub use service::{MutationSettings, WatchlistService};
