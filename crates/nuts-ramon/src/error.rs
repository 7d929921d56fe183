//! Error types for the RAMON feed reader.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("got an error when trying to download {url}: {message}")]
  Fetch { url: String, message: String },

  #[error("got an error {status} when trying to download the file {url}")]
  HttpStatus { status: u16, url: String },

  #[error("downloaded file is not a valid XML file")]
  InvalidFormat,

  #[error("xml error: {0}")]
  Xml(String),

  #[error("value not found for mandatory field {0}")]
  MissingField(&'static str),

  #[error("value {value} out of range for field {field}")]
  OutOfRange { field: &'static str, value: i64 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
