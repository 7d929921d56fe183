//! The `NutsStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `nuts-store-sqlite`).
//! The importer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  country::Country,
  nuts::{NutsFields, NutsRecord},
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`NutsStore::list_nuts`].
#[derive(Debug, Clone, Default)]
pub struct NutsQuery {
  pub level:      Option<u8>,
  pub country_id: Option<Uuid>,
  pub parent_id:  Option<Uuid>,
  pub limit:      Option<usize>,
  pub offset:     Option<usize>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a NUTS store backend.
///
/// All methods return `Send` futures so the trait can be used from a
/// multi-threaded tokio runtime.
pub trait NutsStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Unit of work ──────────────────────────────────────────────────────

  /// Open a unit of work. Every call on this store until [`commit`] or
  /// [`rollback`] belongs to it. Units do not nest.
  ///
  /// [`commit`]: NutsStore::commit
  /// [`rollback`]: NutsStore::rollback
  fn begin(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Make every write since [`begin`](NutsStore::begin) durable.
  fn commit(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Discard every write since [`begin`](NutsStore::begin).
  fn rollback(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Countries ─────────────────────────────────────────────────────────

  /// Create and persist a country. Codes are unique.
  fn add_country<'a>(
    &'a self,
    code: &'a str,
    name: &'a str,
  ) -> impl Future<Output = Result<Country, Self::Error>> + Send + 'a;

  /// Look up a country by exact code. Returns `None` if not found.
  fn find_country_by_code<'a>(
    &'a self,
    code: &'a str,
  ) -> impl Future<Output = Result<Option<Country>, Self::Error>> + Send + 'a;

  /// All stored countries, ordered by code.
  fn list_countries(
    &self,
  ) -> impl Future<Output = Result<Vec<Country>, Self::Error>> + Send + '_;

  // ── NUTS records ──────────────────────────────────────────────────────

  /// Look up a record by its exact `(level, code)` key.
  fn find_nuts<'a>(
    &'a self,
    level: u8,
    code: &'a str,
  ) -> impl Future<Output = Result<Option<NutsRecord>, Self::Error>> + Send + 'a;

  /// Retrieve a record by id. Returns `None` if not found.
  fn get_nuts(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<NutsRecord>, Self::Error>> + Send + '_;

  /// Validate and insert a new record.
  fn create_nuts(
    &self,
    fields: NutsFields,
  ) -> impl Future<Output = Result<NutsRecord, Self::Error>> + Send + '_;

  /// Validate and overwrite every field of an existing record, keeping its id.
  fn update_nuts(
    &self,
    id: Uuid,
    fields: NutsFields,
  ) -> impl Future<Output = Result<NutsRecord, Self::Error>> + Send + '_;

  /// Ids of every record whose country is one of `country_ids`.
  fn nuts_ids_in_countries<'a>(
    &'a self,
    country_ids: &'a [Uuid],
  ) -> impl Future<Output = Result<Vec<Uuid>, Self::Error>> + Send + 'a;

  /// Delete the given records in one unit of work; returns how many went.
  /// Children of a deleted record lose their parent reference.
  fn delete_nuts<'a>(
    &'a self,
    ids: &'a [Uuid],
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  /// List records matching `query`, ordered by level then code.
  fn list_nuts<'a>(
    &'a self,
    query: &'a NutsQuery,
  ) -> impl Future<Output = Result<Vec<NutsRecord>, Self::Error>> + Send + 'a;
}
