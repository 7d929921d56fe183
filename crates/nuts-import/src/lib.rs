//! NUTS import pipeline.
//!
//! Loads the handled countries, downloads the RAMON feed, upserts every item
//! in document order while tracking the current parent per level, then
//! deletes records that disappeared upstream. Generic over any
//! [`nuts_core::store::NutsStore`] and any [`nuts_ramon::FeedSource`].

pub mod config;
pub mod countries;
pub mod error;
pub mod hierarchy;
pub mod importer;

pub use error::{Error, Result};
pub use importer::{ImportSummary, Importer, NodeOutcome};
