//! Error type for `nuts-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Rejected by `NutsFields::validate` before touching the database.
  #[error(transparent)]
  Core(#[from] nuts_core::Error),

  #[error("sqlite: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("malformed id in store: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("malformed timestamp in store: {0}")]
  DateParse(String),

  #[error("stored NUTS level {0} does not fit in a u8")]
  BadLevel(i64),

  #[error("no NUTS record with id {0}")]
  NutsNotFound(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
