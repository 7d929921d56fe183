//! Core types and trait definitions for the NUTS region store.
//!
//! This crate is deliberately free of HTTP, XML and database dependencies.
//! The feed reader, the importer and the storage backends all depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod country;
pub mod error;
pub mod nuts;
pub mod store;

pub use error::{Error, Result};
