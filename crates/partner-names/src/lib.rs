//! Test-support helpers for partner name composition.
//!
//! A partner carries a display `name` plus optional `lastname` and
//! `firstname`. These helpers compute what the three fields should hold after
//! a write, compare a record against that expectation and build the create
//! payloads the checks usually start from.

pub mod case;
pub mod compose;
pub mod error;
pub mod fixtures;

pub use case::{NameCase, NamedRecord};
pub use compose::{ExpectedNames, clean_name, join_names};
pub use error::{NameField, NameMismatch};
pub use fixtures::{NewPartner, NewUser};
