//! NUTS records, one row per territorial unit.
//!
//! A record is identified by a UUID but keyed, for import purposes, by the
//! composite `(level, code)`. Re-importing the same pair updates the record in
//! place; its identity never changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Lowest NUTS level carried by the feed (the country tier).
pub const MIN_LEVEL: u8 = 1;
/// Deepest NUTS level carried by the feed.
pub const MAX_LEVEL: u8 = 5;

// ─── Persisted record ────────────────────────────────────────────────────────

/// A stored NUTS region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutsRecord {
  pub nuts_id:    Uuid,
  pub level:      u8,
  pub code:       String,
  pub name:       String,
  pub country_id: Option<Uuid>,
  /// The most recent record one level up at the time this one was imported.
  pub parent_id:  Option<Uuid>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl NutsRecord {
  /// The writable subset of this record.
  pub fn fields(&self) -> NutsFields {
    NutsFields {
      level:      self.level,
      code:       self.code.clone(),
      name:       self.name.clone(),
      country_id: self.country_id,
      parent_id:  self.parent_id,
    }
  }
}

// ─── Write payload ───────────────────────────────────────────────────────────

/// Every field written on create and overwritten on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutsFields {
  pub level:      u8,
  pub code:       String,
  pub name:       String,
  pub country_id: Option<Uuid>,
  pub parent_id:  Option<Uuid>,
}

impl NutsFields {
  /// Check the constraints a backend must enforce before writing.
  pub fn validate(&self) -> Result<()> {
    if !(MIN_LEVEL..=MAX_LEVEL).contains(&self.level) {
      return Err(Error::InvalidLevel(self.level));
    }
    if self.code.is_empty() {
      return Err(Error::EmptyField("code"));
    }
    if self.name.is_empty() {
      return Err(Error::EmptyField("name"));
    }
    if self.country_id.is_none() {
      return Err(Error::CountryRequired {
        level: self.level,
        code:  self.code.clone(),
      });
    }
    Ok(())
  }
}
