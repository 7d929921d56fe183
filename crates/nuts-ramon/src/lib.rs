//! Reader for the Eurostat RAMON NUTS classification feed.
//!
//! Downloads the hierarchic XML export, repairs its prologue, parses it into
//! an owned element tree and maps `Item` elements to typed fields. Knows
//! nothing about storage; `nuts-import` wires it to a store.

pub mod error;
pub mod fetch;
pub mod mapping;
pub mod xml;

pub use error::{Error, Result};
pub use fetch::{FeedSource, RamonClient, RamonConfig, StaticFeed};
pub use mapping::{NUTS_FIELDS, NutsItem};
pub use xml::Element;
