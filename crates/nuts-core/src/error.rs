//! Error types for `nuts-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("country is required for NUTS {code} (level {level})")]
  CountryRequired { level: u8, code: String },

  #[error("NUTS level {0} is outside 1..=5")]
  InvalidLevel(u8),

  #[error("NUTS field `{0}` must not be empty")]
  EmptyField(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
