//! [`SqliteStore`]: the SQLite implementation of [`NutsStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, types::Value};
use uuid::Uuid;

use nuts_core::{
  country::Country,
  nuts::{NutsFields, NutsRecord},
  store::{NutsQuery, NutsStore},
};

use crate::{
  encode::{
    NUTS_COLUMNS, RawCountry, RawNuts, decode_dt, decode_uuid, encode_dt, encode_uuid,
  },
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A NUTS store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. Clones share
/// that connection, so a unit of work opened through one clone spans calls
/// made through the others.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> { self.exec_batch(SCHEMA).await }

  async fn exec_batch(&self, sql: &'static str) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(sql)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Placeholder list `?1, ?2, …, ?n` for an `IN (…)` clause.
fn placeholders(n: usize) -> String {
  (1..=n).map(|i| format!("?{i}")).collect::<Vec<_>>().join(", ")
}

fn opt_uuid_value(id: Option<Uuid>) -> Value {
  id.map_or(Value::Null, |id| Value::Text(encode_uuid(id)))
}

// ─── NutsStore impl ──────────────────────────────────────────────────────────

impl NutsStore for SqliteStore {
  type Error = Error;

  // ── Unit of work ──────────────────────────────────────────────────────────

  async fn begin(&self) -> Result<()> { self.exec_batch("BEGIN IMMEDIATE").await }

  async fn commit(&self) -> Result<()> { self.exec_batch("COMMIT").await }

  async fn rollback(&self) -> Result<()> { self.exec_batch("ROLLBACK").await }

  // ── Countries ─────────────────────────────────────────────────────────────

  async fn add_country(&self, code: &str, name: &str) -> Result<Country> {
    let country = Country {
      country_id: Uuid::new_v4(),
      code:       code.to_owned(),
      name:       name.to_owned(),
    };

    let id_str   = encode_uuid(country.country_id);
    let code_str = country.code.clone();
    let name_str = country.name.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO countries (country_id, code, name) VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, code_str, name_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(country)
  }

  async fn find_country_by_code(&self, code: &str) -> Result<Option<Country>> {
    let code_str = code.to_owned();

    let raw: Option<RawCountry> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT country_id, code, name FROM countries WHERE code = ?1",
            rusqlite::params![code_str],
            RawCountry::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawCountry::into_country).transpose()
  }

  async fn list_countries(&self) -> Result<Vec<Country>> {
    let raws: Vec<RawCountry> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT country_id, code, name FROM countries ORDER BY code")?;
        let rows = stmt
          .query_map([], RawCountry::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawCountry::into_country).collect()
  }

  // ── NUTS records ──────────────────────────────────────────────────────────

  async fn find_nuts(&self, level: u8, code: &str) -> Result<Option<NutsRecord>> {
    let code_str = code.to_owned();

    let raw: Option<RawNuts> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {NUTS_COLUMNS} FROM nuts WHERE level = ?1 AND code = ?2"),
            rusqlite::params![level, code_str],
            RawNuts::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawNuts::into_record).transpose()
  }

  async fn get_nuts(&self, id: Uuid) -> Result<Option<NutsRecord>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawNuts> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {NUTS_COLUMNS} FROM nuts WHERE nuts_id = ?1"),
            rusqlite::params![id_str],
            RawNuts::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawNuts::into_record).transpose()
  }

  async fn create_nuts(&self, fields: NutsFields) -> Result<NutsRecord> {
    fields.validate()?;

    let now = Utc::now();
    let record = NutsRecord {
      nuts_id:    Uuid::new_v4(),
      level:      fields.level,
      code:       fields.code,
      name:       fields.name,
      country_id: fields.country_id,
      parent_id:  fields.parent_id,
      created_at: now,
      updated_at: now,
    };

    let id_str      = encode_uuid(record.nuts_id);
    let level       = record.level;
    let code        = record.code.clone();
    let name        = record.name.clone();
    let country_val = opt_uuid_value(record.country_id);
    let parent_val  = opt_uuid_value(record.parent_id);
    let at_str      = encode_dt(now);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO nuts (
             nuts_id, level, code, name, country_id, parent_id,
             created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
          rusqlite::params![
            id_str,
            level,
            code,
            name,
            country_val,
            parent_val,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(record)
  }

  async fn update_nuts(&self, id: Uuid, fields: NutsFields) -> Result<NutsRecord> {
    fields.validate()?;

    let now         = Utc::now();
    let id_str      = encode_uuid(id);
    let level       = fields.level;
    let code        = fields.code.clone();
    let name        = fields.name.clone();
    let country_val = opt_uuid_value(fields.country_id);
    let parent_val  = opt_uuid_value(fields.parent_id);
    let at_str      = encode_dt(now);

    let created_at: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "UPDATE nuts
             SET level = ?2, code = ?3, name = ?4, country_id = ?5,
                 parent_id = ?6, updated_at = ?7
             WHERE nuts_id = ?1
             RETURNING created_at",
            rusqlite::params![
              id_str,
              level,
              code,
              name,
              country_val,
              parent_val,
              at_str,
            ],
            |row| row.get(0),
          )
          .optional()?)
      })
      .await?;

    let created_at = created_at.ok_or(Error::NutsNotFound(id))?;

    Ok(NutsRecord {
      nuts_id:    id,
      level:      fields.level,
      code:       fields.code,
      name:       fields.name,
      country_id: fields.country_id,
      parent_id:  fields.parent_id,
      created_at: decode_dt(&created_at)?,
      updated_at: now,
    })
  }

  async fn nuts_ids_in_countries(&self, country_ids: &[Uuid]) -> Result<Vec<Uuid>> {
    if country_ids.is_empty() {
      return Ok(Vec::new());
    }

    let ids: Vec<String> = country_ids.iter().copied().map(encode_uuid).collect();

    let raws: Vec<String> = self
      .conn
      .call(move |conn| {
        let sql = format!(
          "SELECT nuts_id FROM nuts WHERE country_id IN ({})",
          placeholders(ids.len())
        );
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(ids.iter()), |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;

    raws.iter().map(|s| decode_uuid(s)).collect()
  }

  async fn delete_nuts(&self, ids: &[Uuid]) -> Result<usize> {
    if ids.is_empty() {
      return Ok(0);
    }

    let ids: Vec<String> = ids.iter().copied().map(encode_uuid).collect();

    let deleted = self
      .conn
      .call(move |conn| {
        // A savepoint nests inside an open unit of work.
        let sp = conn.savepoint()?;
        let mut deleted = 0;
        {
          let mut stmt = sp.prepare("DELETE FROM nuts WHERE nuts_id = ?1")?;
          for id in &ids {
            deleted += stmt.execute(rusqlite::params![id])?;
          }
        }
        sp.commit()?;
        Ok(deleted)
      })
      .await?;

    Ok(deleted)
  }

  async fn list_nuts(&self, query: &NutsQuery) -> Result<Vec<NutsRecord>> {
    // Build WHERE clause dynamically; placeholders are numbered in push order.
    let mut conds: Vec<String> = vec![];
    let mut params: Vec<Value> = vec![];

    if let Some(level) = query.level {
      params.push(Value::Integer(level.into()));
      conds.push(format!("level = ?{}", params.len()));
    }
    if let Some(country_id) = query.country_id {
      params.push(Value::Text(encode_uuid(country_id)));
      conds.push(format!("country_id = ?{}", params.len()));
    }
    if let Some(parent_id) = query.parent_id {
      params.push(Value::Text(encode_uuid(parent_id)));
      conds.push(format!("parent_id = ?{}", params.len()));
    }

    let where_clause = if conds.is_empty() {
      String::new()
    } else {
      format!("WHERE {}", conds.join(" AND "))
    };

    params.push(Value::Integer(query.limit.map_or(-1, |l| l as i64)));
    let limit_idx = params.len();
    params.push(Value::Integer(query.offset.unwrap_or(0) as i64));
    let offset_idx = params.len();

    let sql = format!(
      "SELECT {NUTS_COLUMNS} FROM nuts
       {where_clause}
       ORDER BY level, code
       LIMIT ?{limit_idx} OFFSET ?{offset_idx}"
    );

    let raws: Vec<RawNuts> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawNuts::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawNuts::into_record).collect()
  }
}
