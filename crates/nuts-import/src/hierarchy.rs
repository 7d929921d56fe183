//! Per-run traversal state and the pluggable relation mapping.
//!
//! Items arrive in document order, so a node's parent is simply the last
//! record seen one level up, and its country is the last level-1 item seen.
//! Both cursors live in [`TraversalState`], which is created fresh for every
//! run and threaded through each step.

use nuts_ramon::{Element, mapping::MappedFields};
use tracing::warn;
use uuid::Uuid;

use crate::countries::CountryTable;

/// Number of levels that can act as a parent (1–4).
const PARENT_SLOTS: usize = 4;

// ─── Traversal state ─────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct TraversalState {
  pub countries:   CountryTable,
  /// Slot `level - 1` holds the most recent record at that level.
  parents:         [Option<Uuid>; PARENT_SLOTS],
  current_country: Option<Uuid>,
}

impl TraversalState {
  pub fn new(countries: CountryTable) -> Self {
    Self {
      countries,
      parents: [None; PARENT_SLOTS],
      current_country: None,
    }
  }

  /// The parent a record at `level` should point to. Only levels 2–5 have one.
  pub fn parent_for(&self, level: u8) -> Option<Uuid> {
    match level {
      2..=5 => self.parents[usize::from(level) - 2],
      _ => None,
    }
  }

  /// Remember `id` as the latest record at `level`. Levels outside 1–4 are
  /// never parents and are ignored.
  pub fn record_visit(&mut self, level: u8, id: Uuid) {
    if (1..=4).contains(&level) {
      self.parents[usize::from(level) - 1] = Some(id);
    }
  }

  pub fn current_country(&self) -> Option<Uuid> { self.current_country }

  pub fn set_current_country(&mut self, country_id: Option<Uuid>) {
    self.current_country = country_id;
  }
}

// ─── Relation mapping ────────────────────────────────────────────────────────

/// Relational fields contributed by a [`StateMapping`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Relations {
  pub country_id: Option<Uuid>,
}

/// Computes relational fields for one item from its mapped values, the raw
/// element and the traversal state.
///
/// Implemented for any matching closure, so callers can swap the default
/// [`CountryCursor`] for their own logic.
pub trait StateMapping: Send + Sync {
  fn relations(
    &self,
    fields: &MappedFields,
    node: &Element,
    state: &mut TraversalState,
  ) -> Relations;
}

impl<F> StateMapping for F
where
  F: Fn(&MappedFields, &Element, &mut TraversalState) -> Relations + Send + Sync,
{
  fn relations(
    &self,
    fields: &MappedFields,
    node: &Element,
    state: &mut TraversalState,
  ) -> Relations {
    self(fields, node, state)
  }
}

/// Default mapping: a level-1 item's code names its country, and every item
/// belongs to the country of the most recent level-1 item.
#[derive(Debug, Clone, Copy, Default)]
pub struct CountryCursor;

impl StateMapping for CountryCursor {
  fn relations(
    &self,
    fields: &MappedFields,
    _node: &Element,
    state: &mut TraversalState,
  ) -> Relations {
    if fields.integer("level") == Some(1) {
      let code = fields.text("code").unwrap_or_default();
      if !state.countries.contains(code) {
        warn!(code, "level-1 item is not a handled country");
      }
      let country_id = state.countries.get(code);
      state.set_current_country(country_id);
    }

    Relations {
      country_id: state.current_country(),
    }
  }
}
