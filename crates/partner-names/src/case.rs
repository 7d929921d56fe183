//! Numbered name checks.

use crate::{
  compose::ExpectedNames,
  error::{NameField, NameMismatch},
};

/// Read access to the three name fields of whatever record is under test.
pub trait NamedRecord {
  fn name(&self) -> Option<&str>;
  fn lastname(&self) -> Option<&str>;
  fn firstname(&self) -> Option<&str>;

  fn field(&self, field: NameField) -> Option<&str> {
    match field {
      NameField::Name => self.name(),
      NameField::Lastname => self.lastname(),
      NameField::Firstname => self.firstname(),
    }
  }
}

/// Numbers successive checks so a failure names the case it came from.
///
/// The counter starts at `0`; call [`next_case`](Self::next_case) before each
/// scenario.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameCase {
  counter: u32,
}

impl NameCase {
  pub fn new() -> Self { Self::default() }

  /// Advance to the next case and return its number.
  pub fn next_case(&mut self) -> u32 {
    self.counter += 1;
    self.counter
  }

  pub fn current(&self) -> u32 { self.counter }

  /// Compare `record` with `expected`, field by field in
  /// [`NameField::ALL`] order, stopping at the first difference.
  pub fn expect<R>(&self, record: &R, expected: &ExpectedNames) -> Result<(), NameMismatch>
  where
    R: NamedRecord + ?Sized,
  {
    for field in NameField::ALL {
      let want = match field {
        NameField::Name => Some(expected.name.as_str()),
        NameField::Lastname => expected.lastname.as_deref(),
        NameField::Firstname => expected.firstname.as_deref(),
      };
      let got = record.field(field);
      if got != want {
        return Err(NameMismatch {
          case:     self.counter,
          field,
          expected: want.map(str::to_owned),
          actual:   got.map(str::to_owned),
        });
      }
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  struct Partner {
    name:      String,
    lastname:  Option<String>,
    firstname: Option<String>,
  }

  impl NamedRecord for Partner {
    fn name(&self) -> Option<&str> { Some(&self.name) }
    fn lastname(&self) -> Option<&str> { self.lastname.as_deref() }
    fn firstname(&self) -> Option<&str> { self.firstname.as_deref() }
  }

  fn partner(name: &str, lastname: Option<&str>, firstname: Option<&str>) -> Partner {
    Partner {
      name:      name.into(),
      lastname:  lastname.map(Into::into),
      firstname: firstname.map(Into::into),
    }
  }

  #[test]
  fn counter_advances() {
    let mut case = NameCase::new();
    assert_eq!(case.current(), 0);
    assert_eq!(case.next_case(), 1);
    assert_eq!(case.next_case(), 2);
    assert_eq!(case.current(), 2);
  }

  #[test]
  fn matching_record_passes() {
    let mut case = NameCase::new();
    case.next_case();
    let expected = ExpectedNames::new(Some("Doe"), Some(" Jane "), None);
    case.expect(&partner("Doe Jane", Some("Doe"), Some("Jane")), &expected).unwrap();
  }

  #[test]
  fn name_is_checked_first() {
    let mut case = NameCase::new();
    case.next_case();
    case.next_case();
    let expected = ExpectedNames::new(Some("Doe"), Some("Jane"), None);

    let err = case
      .expect(&partner("Jane Doe", Some("Doe"), None), &expected)
      .unwrap_err();
    assert_eq!(err, NameMismatch {
      case:     2,
      field:    NameField::Name,
      expected: Some("Doe Jane".into()),
      actual:   Some("Jane Doe".into()),
    });
    assert_eq!(
      err.to_string(),
      "test case (2) failed with wrong name: expected Some(\"Doe Jane\"), got Some(\"Jane Doe\")"
    );
  }

  #[test]
  fn missing_firstname_is_reported() {
    let case = NameCase::new();
    let expected = ExpectedNames::new(Some("Doe"), Some("Jane"), None);
    let err = case
      .expect(&partner("Doe Jane", Some("Doe"), None), &expected)
      .unwrap_err();
    assert_eq!(err.field, NameField::Firstname);
    assert_eq!(err.actual, None);
  }

  #[test]
  fn company_expects_no_parts() {
    let case = NameCase::new();
    let expected = ExpectedNames::new(None, None, Some("Acme  Corp"));
    case.expect(&partner("Acme Corp", None, None), &expected).unwrap();
  }
}
