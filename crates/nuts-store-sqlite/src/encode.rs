//! Column codecs and row structs for the `nuts` and `countries` tables.
//!
//! Ids are hyphenated lowercase text; timestamps are RFC 3339 text.

use chrono::{DateTime, Utc};
use nuts_core::{country::Country, nuts::NutsRecord};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Column codecs ───────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(text: &str) -> Result<Uuid> { Uuid::parse_str(text).map_err(Error::from) }

pub fn encode_dt(at: DateTime<Utc>) -> String { at.to_rfc3339() }

pub fn decode_dt(text: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(text)
    .map(|at| at.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{text:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list shared by every `nuts` SELECT; order matches [`RawNuts`].
pub const NUTS_COLUMNS: &str =
  "nuts_id, level, code, name, country_id, parent_id, created_at, updated_at";

/// Raw values read directly from a `nuts` row.
pub struct RawNuts {
  pub nuts_id:    String,
  pub level:      i64,
  pub code:       String,
  pub name:       String,
  pub country_id: Option<String>,
  pub parent_id:  Option<String>,
  pub created_at: String,
  pub updated_at: String,
}

impl RawNuts {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      nuts_id:    row.get(0)?,
      level:      row.get(1)?,
      code:       row.get(2)?,
      name:       row.get(3)?,
      country_id: row.get(4)?,
      parent_id:  row.get(5)?,
      created_at: row.get(6)?,
      updated_at: row.get(7)?,
    })
  }

  pub fn into_record(self) -> Result<NutsRecord> {
    Ok(NutsRecord {
      nuts_id:    decode_uuid(&self.nuts_id)?,
      level:      u8::try_from(self.level).map_err(|_| Error::BadLevel(self.level))?,
      code:       self.code,
      name:       self.name,
      country_id: self.country_id.as_deref().map(decode_uuid).transpose()?,
      parent_id:  self.parent_id.as_deref().map(decode_uuid).transpose()?,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw strings read directly from a `countries` row.
pub struct RawCountry {
  pub country_id: String,
  pub code:       String,
  pub name:       String,
}

impl RawCountry {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      country_id: row.get(0)?,
      code:       row.get(1)?,
      name:       row.get(2)?,
    })
  }

  pub fn into_country(self) -> Result<Country> {
    Ok(Country {
      country_id: decode_uuid(&self.country_id)?,
      code:       self.code,
      name:       self.name,
    })
  }
}
