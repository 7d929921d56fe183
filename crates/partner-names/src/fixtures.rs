//! Create payloads for partners and users.

use serde::Serialize;

/// Payload for creating a partner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewPartner {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub lastname:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub firstname:  Option<String>,
  pub is_company: bool,
}

impl NewPartner {
  /// A person, named by its parts only.
  pub fn contact(lastname: Option<&str>, firstname: Option<&str>) -> Self {
    Self {
      name:       None,
      lastname:   lastname.map(str::to_owned),
      firstname:  firstname.map(str::to_owned),
      is_company: false,
    }
  }

  /// A company, named by its display name only.
  pub fn company(name: &str) -> Self {
    Self {
      name:       Some(name.to_owned()),
      lastname:   None,
      firstname:  None,
      is_company: true,
    }
  }
}

/// Payload for creating a user. The login is derived from the case counter
/// so every case gets a fresh one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewUser {
  pub login:     String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name:      Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub lastname:  Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub firstname: Option<String>,
}

impl NewUser {
  /// A non-empty `name` replaces the parts entirely.
  pub fn new(
    counter: u32,
    lastname: Option<&str>,
    firstname: Option<&str>,
    name: Option<&str>,
  ) -> Self {
    let login = format!("email_{counter}@example.com");
    match name.filter(|n| !n.is_empty()) {
      Some(name) => Self {
        login,
        name: Some(name.to_owned()),
        lastname: None,
        firstname: None,
      },
      None => Self {
        login,
        name: None,
        lastname: lastname.map(str::to_owned),
        firstname: firstname.map(str::to_owned),
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn contact_payload() {
    let p = NewPartner::contact(Some("Doe"), Some("Jane"));
    assert_eq!(
      serde_json::to_value(&p).unwrap(),
      json!({ "lastname": "Doe", "firstname": "Jane", "is_company": false })
    );
  }

  #[test]
  fn company_payload() {
    let p = NewPartner::company("Acme");
    assert_eq!(
      serde_json::to_value(&p).unwrap(),
      json!({ "name": "Acme", "is_company": true })
    );
  }

  #[test]
  fn user_login_follows_counter() {
    let u = NewUser::new(7, Some("Doe"), Some("Jane"), None);
    assert_eq!(u.login, "email_7@example.com");
    assert_eq!(u.name, None);
    assert_eq!(u.lastname.as_deref(), Some("Doe"));
  }

  #[test]
  fn user_name_replaces_parts() {
    let u = NewUser::new(1, Some("Doe"), Some("Jane"), Some("Jane Doe"));
    assert_eq!(
      serde_json::to_value(&u).unwrap(),
      json!({ "login": "email_1@example.com", "name": "Jane Doe" })
    );

    let empty = NewUser::new(2, Some("Doe"), None, Some(""));
    assert_eq!(empty.name, None);
    assert_eq!(empty.lastname.as_deref(), Some("Doe"));
  }
}
