//! Name cleaning and composition.

/// Collapse every whitespace run into one space and trim the ends.
/// Blank or absent input gives `None`.
pub fn clean_name(name: Option<&str>) -> Option<String> {
  let cleaned = name?.split_whitespace().collect::<Vec<_>>().join(" ");
  (!cleaned.is_empty()).then_some(cleaned)
}

/// Display name for a person: `"last first"`, whichever part exists alone,
/// or `""` when neither does.
pub fn join_names(lastname: Option<&str>, firstname: Option<&str>) -> String {
  let lastname = lastname.filter(|s| !s.is_empty());
  let firstname = firstname.filter(|s| !s.is_empty());
  match (lastname, firstname) {
    (Some(last), Some(first)) => format!("{last} {first}"),
    (Some(only), None) | (None, Some(only)) => only.to_owned(),
    (None, None) => String::new(),
  }
}

/// What the three name fields should hold once a write has settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedNames {
  pub name:      String,
  pub lastname:  Option<String>,
  pub firstname: Option<String>,
}

impl ExpectedNames {
  /// Clean both parts. An explicit non-empty `name` wins (cleaned, possibly
  /// to `""`); otherwise the name is composed from the cleaned parts.
  pub fn new(lastname: Option<&str>, firstname: Option<&str>, name: Option<&str>) -> Self {
    let lastname = clean_name(lastname);
    let firstname = clean_name(firstname);
    let name = match name.filter(|n| !n.is_empty()) {
      Some(explicit) => clean_name(Some(explicit)).unwrap_or_default(),
      None => join_names(lastname.as_deref(), firstname.as_deref()),
    };
    Self { name, lastname, firstname }
  }
}
