//! Mismatch reported by [`NameCase::expect`](crate::NameCase::expect).

use std::fmt;

use thiserror::Error;

/// The three name fields, in the order they are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameField {
  Name,
  Lastname,
  Firstname,
}

impl NameField {
  pub const ALL: [Self; 3] = [Self::Name, Self::Lastname, Self::Firstname];

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Name => "name",
      Self::Lastname => "lastname",
      Self::Firstname => "firstname",
    }
  }
}

impl fmt::Display for NameField {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("test case ({case}) failed with wrong {field}: expected {expected:?}, got {actual:?}")]
pub struct NameMismatch {
  pub case:     u32,
  pub field:    NameField,
  pub expected: Option<String>,
  pub actual:   Option<String>,
}
