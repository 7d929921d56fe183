//! Countries, the reference every NUTS region hangs off.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored country, addressed by its ISO-3166 alpha-2 code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
  pub country_id: Uuid,
  pub code:       String,
  pub name:       String,
}
