//! The handled countries and their per-run lookup table.

use std::collections::BTreeMap;

use nuts_core::store::NutsStore;
use tracing::{debug, info};
use uuid::Uuid;

/// EU member states covered by the NUTS 2013 feed, by ISO-3166 code.
pub const HANDLED_COUNTRIES: [(&str, &str); 28] = [
  ("BE", "Belgium"),
  ("BG", "Bulgaria"),
  ("CZ", "Czech Republic"),
  ("DK", "Denmark"),
  ("DE", "Germany"),
  ("EE", "Estonia"),
  ("IE", "Ireland"),
  ("GR", "Greece"),
  ("ES", "Spain"),
  ("FR", "France"),
  ("HR", "Croatia"),
  ("IT", "Italy"),
  ("CY", "Cyprus"),
  ("LV", "Latvia"),
  ("LT", "Lithuania"),
  ("LU", "Luxembourg"),
  ("HU", "Hungary"),
  ("MT", "Malta"),
  ("NL", "Netherlands"),
  ("AT", "Austria"),
  ("PL", "Poland"),
  ("PT", "Portugal"),
  ("RO", "Romania"),
  ("SI", "Slovenia"),
  ("SK", "Slovakia"),
  ("FI", "Finland"),
  ("SE", "Sweden"),
  ("GB", "United Kingdom"),
];

/// Eurostat codes that differ from ISO-3166: `(feed code, ISO code)`.
pub const COUNTRY_ALIASES: [(&str, &str); 2] = [("EL", "GR"), ("UK", "GB")];

/// Feed country code → resolved country id, built once per run.
///
/// Every handled code and alias has an entry; the value is `None` when the
/// store has no such country.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryTable {
  entries: BTreeMap<String, Option<Uuid>>,
}

impl CountryTable {
  /// Resolve every handled country against `store`, then apply the aliases.
  /// Missing countries are not an error.
  pub async fn load<S: NutsStore>(store: &S) -> Result<Self, S::Error> {
    let mut entries = BTreeMap::new();
    for (code, _) in HANDLED_COUNTRIES {
      let found = store.find_country_by_code(code).await?;
      if found.is_none() {
        debug!(code, "country not found in store");
      }
      entries.insert(code.to_owned(), found.map(|c| c.country_id));
    }

    let mut table = Self { entries };
    table.apply_aliases();
    info!(
      resolved = table.resolved_ids().len(),
      handled = HANDLED_COUNTRIES.len(),
      "countries loaded"
    );
    Ok(table)
  }

  /// Build a table from explicit entries, aliases included.
  pub fn from_entries<I, K>(entries: I) -> Self
  where
    I: IntoIterator<Item = (K, Option<Uuid>)>,
    K: Into<String>,
  {
    let mut table = Self {
      entries: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
    };
    table.apply_aliases();
    table
  }

  fn apply_aliases(&mut self) {
    for (alias, iso) in COUNTRY_ALIASES {
      let target = self.entries.get(iso).copied().flatten();
      self.entries.insert(alias.to_owned(), target);
    }
  }

  /// Whether `code` is a handled country or alias, resolved or not.
  pub fn contains(&self, code: &str) -> bool { self.entries.contains_key(code) }

  /// The resolved country id for `code`, if any.
  pub fn get(&self, code: &str) -> Option<Uuid> {
    self.entries.get(code).copied().flatten()
  }

  /// Distinct resolved ids, in code order.
  pub fn resolved_ids(&self) -> Vec<Uuid> {
    let mut ids: Vec<Uuid> = Vec::new();
    for id in self.entries.values().flatten() {
      if !ids.contains(id) {
        ids.push(*id);
      }
    }
    ids
  }
}

/// Insert every handled country the store does not know yet.
/// Returns how many were added.
pub async fn seed_countries<S: NutsStore>(store: &S) -> Result<usize, S::Error> {
  let mut added = 0;
  for (code, name) in HANDLED_COUNTRIES {
    if store.find_country_by_code(code).await?.is_none() {
      store.add_country(code, name).await?;
      added += 1;
    }
  }
  info!(added, "countries seeded");
  Ok(added)
}
