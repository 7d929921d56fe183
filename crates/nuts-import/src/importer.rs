//! [`Importer`]: the find-or-create and prune engine.

use std::collections::HashSet;

use nuts_core::{
  nuts::{NutsFields, NutsRecord},
  store::NutsStore,
};
use nuts_ramon::{
  Element, FeedSource, NutsItem,
  mapping::{NUTS_FIELDS, is_data_node, map_node},
  xml::parse_document,
};
use serde::Serialize;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::{
  countries::CountryTable,
  hierarchy::{CountryCursor, StateMapping, TraversalState},
  Error, Result,
};

/// Tag of the data elements in the RAMON export.
const ITEM_TAG: &str = "Item";

// ─── Outcomes ─────────────────────────────────────────────────────────────────

/// What happened to one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeOutcome {
  /// Not a data item (no `id` / `idLevel`); nothing was written.
  Skipped,
  Created(NutsRecord),
  Updated(NutsRecord),
}

impl NodeOutcome {
  pub fn record(&self) -> Option<&NutsRecord> {
    match self {
      Self::Skipped => None,
      Self::Created(r) | Self::Updated(r) => Some(r),
    }
  }
}

/// Counts reported by a successful run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
  pub created: usize,
  pub updated: usize,
  pub skipped: usize,
  pub deleted: usize,
}

// ─── Importer ─────────────────────────────────────────────────────────────────

/// Imports a RAMON feed into a store.
///
/// Holds no per-run state; every [`run`](Self::run) builds its own
/// [`TraversalState`].
pub struct Importer<S, F, M = CountryCursor> {
  store:   S,
  feed:    F,
  mapping: M,
}

impl<S, F> Importer<S, F>
where
  S: NutsStore,
  F: FeedSource,
{
  /// An importer using the default [`CountryCursor`] mapping.
  pub fn new(store: S, feed: F) -> Self {
    Self { store, feed, mapping: CountryCursor }
  }
}

impl<S, F, M> Importer<S, F, M>
where
  S: NutsStore,
  F: FeedSource,
  M: StateMapping,
{
  /// Replace the relation mapping applied to every item.
  pub fn with_mapping<M2: StateMapping>(self, mapping: M2) -> Importer<S, F, M2> {
    Importer {
      store: self.store,
      feed: self.feed,
      mapping,
    }
  }

  /// Run one complete import.
  ///
  /// The feed is fetched and parsed first. Loading countries, snapshotting
  /// deletion candidates, the upserts and the prune then run as one unit of
  /// work on the store: any error rolls all of them back.
  pub async fn run(&self) -> Result<ImportSummary> {
    let xml = self.feed.fetch().await?;
    let dom = parse_document(&xml)?;

    self.store.begin().await.map_err(Error::store)?;
    match self.sync(&dom).await {
      Ok(summary) => {
        self.store.commit().await.map_err(Error::store)?;
        info!(
          created = summary.created,
          updated = summary.updated,
          skipped = summary.skipped,
          deleted = summary.deleted,
          "NUTS import completed"
        );
        Ok(summary)
      }
      Err(e) => {
        if let Err(rollback) = self.store.rollback().await {
          error!(error = %rollback, "rollback after failed import failed");
        }
        warn!(error = %e, "NUTS import rolled back");
        Err(e)
      }
    }
  }

  async fn sync(&self, dom: &Element) -> Result<ImportSummary> {
    let countries = CountryTable::load(&self.store)
      .await
      .map_err(Error::store)?;

    let mut stale: HashSet<Uuid> = self
      .store
      .nuts_ids_in_countries(&countries.resolved_ids())
      .await
      .map_err(Error::store)?
      .into_iter()
      .collect();
    debug!(candidates = stale.len(), "deletion candidates snapshotted");

    let mut state = TraversalState::new(countries);
    let mut summary = ImportSummary::default();

    for node in dom.descendants_named(ITEM_TAG) {
      debug!(
        level = node.attr("idLevel").unwrap_or("N/A"),
        id = node.attr("id").unwrap_or("N/A"),
        "reading item"
      );

      let outcome = self.create_or_update(node, &mut state).await?;
      match &outcome {
        NodeOutcome::Skipped => summary.skipped += 1,
        NodeOutcome::Created(_) => summary.created += 1,
        NodeOutcome::Updated(_) => summary.updated += 1,
      }
      if let Some(record) = outcome.record() {
        stale.remove(&record.nuts_id);
      }
    }

    if !stale.is_empty() {
      let ids: Vec<Uuid> = stale.into_iter().collect();
      summary.deleted = self.store.delete_nuts(&ids).await.map_err(Error::store)?;
      info!("{} NUTS entries deleted", summary.deleted);
    }

    Ok(summary)
  }

  /// Upsert one element, keyed by `(level, code)`, and advance the parent
  /// cursor. Elements that are not data items are skipped untouched.
  ///
  /// Writes go straight to the store; [`run`](Self::run) wraps them in a
  /// unit of work.
  pub async fn create_or_update(
    &self,
    node: &Element,
    state: &mut TraversalState,
  ) -> Result<NodeOutcome> {
    if !is_data_node(node) {
      return Ok(NodeOutcome::Skipped);
    }

    let mapped = map_node(node, NUTS_FIELDS)?;
    let relations = self.mapping.relations(&mapped, node, state);
    let item = NutsItem::from_fields(&mapped)?;

    let fields = NutsFields {
      level:      item.level,
      code:       item.code,
      name:       item.name,
      country_id: relations.country_id,
      parent_id:  state.parent_for(item.level),
    };

    let existing = self
      .store
      .find_nuts(fields.level, &fields.code)
      .await
      .map_err(Error::store)?;

    let outcome = match existing {
      Some(found) => NodeOutcome::Updated(
        self
          .store
          .update_nuts(found.nuts_id, fields)
          .await
          .map_err(Error::store)?,
      ),
      None => NodeOutcome::Created(
        self.store.create_nuts(fields).await.map_err(Error::store)?,
      ),
    };

    if let Some(record) = outcome.record() {
      state.record_visit(record.level, record.nuts_id);
    }
    Ok(outcome)
  }
}
