//! Declarative field table and the generic node mapper.
//!
//! Each [`FieldSpec`] says where a value lives (a child path, optionally an
//! attribute on the resolved element), how to type it and whether it must be
//! present. [`map_node`] walks the table in order and produces
//! [`MappedFields`]; [`NutsItem`] is the typed view the importer consumes.

use tracing::debug;

use crate::{
  error::{Error, Result},
  xml::{Element, PathStep},
};

// ─── Field table ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
  /// Parsed with `i64::from_str`; unparsable input becomes `0`.
  Integer,
  Text,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
  pub name:      &'static str,
  /// Child path from the item element; empty means the item itself.
  pub path:      &'static [PathStep],
  /// Attribute to read on the resolved element; `None` reads its text.
  pub attribute: Option<&'static str>,
  pub kind:      FieldKind,
  pub required:  bool,
}

const LABEL_ALL: &[PathStep] = &[
  PathStep::tag("Label"),
  PathStep::with_attr("LabelText", "language", "ALL"),
];

const LABEL_EN: &[PathStep] = &[
  PathStep::tag("Label"),
  PathStep::with_attr("LabelText", "language", "EN"),
];

/// The RAMON `Item` layout. Order matters: `level` is resolved first.
pub const NUTS_FIELDS: &[FieldSpec] = &[
  FieldSpec {
    name:      "level",
    path:      &[],
    attribute: Some("idLevel"),
    kind:      FieldKind::Integer,
    required:  true,
  },
  FieldSpec {
    name:      "code",
    path:      LABEL_ALL,
    attribute: None,
    kind:      FieldKind::Text,
    required:  true,
  },
  FieldSpec {
    name:      "name",
    path:      LABEL_EN,
    attribute: None,
    kind:      FieldKind::Text,
    required:  true,
  },
];

// ─── Mapped values ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
  Integer(i64),
  Text(String),
}

impl FieldValue {
  /// `0` and `""` count as absent for required-field checks.
  pub fn is_empty(&self) -> bool {
    match self {
      Self::Integer(n) => *n == 0,
      Self::Text(s) => s.is_empty(),
    }
  }
}

/// Field values in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappedFields {
  values: Vec<(&'static str, FieldValue)>,
}

impl MappedFields {
  pub fn get(&self, name: &str) -> Option<&FieldValue> {
    self
      .values
      .iter()
      .find(|(k, _)| *k == name)
      .map(|(_, v)| v)
  }

  pub fn integer(&self, name: &str) -> Option<i64> {
    match self.get(name)? {
      FieldValue::Integer(n) => Some(*n),
      FieldValue::Text(_) => None,
    }
  }

  pub fn text(&self, name: &str) -> Option<&str> {
    match self.get(name)? {
      FieldValue::Text(s) => Some(s),
      FieldValue::Integer(_) => None,
    }
  }

  pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldValue)> {
    self.values.iter().map(|(k, v)| (*k, v))
  }
}

// ─── Mapper ──────────────────────────────────────────────────────────────────

/// Whether `node` is a data item at all: it needs non-empty `id` and
/// `idLevel` attributes. Anything else is skipped without error.
pub fn is_data_node(node: &Element) -> bool {
  let present = |key: &str| node.attr(key).is_some_and(|v| !v.is_empty());
  present("id") && present("idLevel")
}

/// Resolve every entry of `table` against `node`.
pub fn map_node(node: &Element, table: &[FieldSpec]) -> Result<MappedFields> {
  let mut mapped = MappedFields::default();

  for field in table {
    let raw = match node.find(field.path) {
      Some(target) => match field.attribute {
        Some(attr) => target.attr(attr).unwrap_or_default(),
        None => target.text.as_str(),
      },
      None => {
        debug!(field = field.name, path = ?field.path, "path not found");
        ""
      }
    };

    let value = match field.kind {
      FieldKind::Integer => FieldValue::Integer(raw.trim().parse().unwrap_or(0)),
      FieldKind::Text => FieldValue::Text(raw.to_owned()),
    };

    if field.required && value.is_empty() {
      return Err(Error::MissingField(field.name));
    }
    mapped.values.push((field.name, value));
  }

  Ok(mapped)
}

// ─── Typed item ──────────────────────────────────────────────────────────────

/// One RAMON item, typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NutsItem {
  pub level: u8,
  pub code:  String,
  pub name:  String,
}

impl NutsItem {
  /// Type the output of [`map_node`] run with [`NUTS_FIELDS`].
  pub fn from_fields(fields: &MappedFields) -> Result<Self> {
    let level = fields.integer("level").unwrap_or(0);
    Ok(Self {
      level: u8::try_from(level).map_err(|_| Error::OutOfRange {
        field: "level",
        value: level,
      })?,
      code:  fields.text("code").unwrap_or_default().to_owned(),
      name:  fields.text("name").unwrap_or_default().to_owned(),
    })
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
