//! Lunch menu aggregator for the Lindholmen area: one adapter per
//! restaurant, a retrying fetch runner, per-weekday JSON snapshots and
//! keyword-based emoji tagging.

pub mod config;
pub mod cycle;
pub mod error;
pub mod model;
pub mod render;
pub mod runner;
pub mod scrapers;
pub mod snapshot;
pub mod tags;
pub mod text;
