//! Downloading the RAMON export.
//!
//! The service occasionally prepends junk before the XML prologue, so every
//! payload goes through [`repair_payload`] before parsing.

use std::{future::Future, time::Duration};

use reqwest::Client;
use serde::Deserialize;
use tracing::info;

use crate::error::{Error, Result};

const XML_PROLOGUE: &str = "<?xml";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Where and how to request the classification export.
///
/// Every field defaults to the NUTS 2013 English hierarchic XML download.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RamonConfig {
  pub base_url:     String,
  pub path:         String,
  pub target_url:   String,
  pub nomenclature: String,
  pub format:       String,
  pub language:     String,
  pub layout:       String,
  /// Request timeout in seconds; `0` waits forever.
  pub timeout_secs: u64,
}

impl Default for RamonConfig {
  fn default() -> Self {
    Self {
      base_url:     "http://ec.europa.eu".into(),
      path:         "/eurostat/ramon/nomenclatures/index.cfm".into(),
      target_url:   "ACT_OTH_CLS_DLD".into(),
      nomenclature: "NUTS_2013".into(),
      format:       "XML".into(),
      language:     "EN".into(),
      layout:       "HIERARCHIC".into(),
      timeout_secs: 300,
    }
  }
}

impl RamonConfig {
  /// The full download URL, query parameters in fixed order.
  pub fn url(&self) -> String {
    let params = [
      ("TargetUrl", &self.target_url),
      ("StrNom", &self.nomenclature),
      ("StrFormat", &self.format),
      ("StrLanguageCode", &self.language),
      ("StrLayoutCode", &self.layout),
    ];
    let query = params
      .iter()
      .map(|(k, v)| format!("{k}={v}"))
      .collect::<Vec<_>>()
      .join("&");
    format!(
      "{}{}?{query}",
      self.base_url.trim_end_matches('/'),
      self.path
    )
  }
}

// ─── Sources ──────────────────────────────────────────────────────────────────

/// Something that yields a repaired XML payload.
pub trait FeedSource: Send + Sync {
  fn fetch(&self) -> impl Future<Output = Result<String>> + Send + '_;
}

/// HTTP client for the RAMON download endpoint.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct RamonClient {
  client: Client,
  config: RamonConfig,
}

impl RamonClient {
  pub fn new(config: RamonConfig) -> Result<Self> {
    let mut builder = Client::builder();
    if config.timeout_secs > 0 {
      builder = builder.timeout(Duration::from_secs(config.timeout_secs));
    }
    let client = builder.build().map_err(|e| Error::Fetch {
      url:     config.url(),
      message: e.to_string(),
    })?;
    Ok(Self { client, config })
  }
}

impl FeedSource for RamonClient {
  async fn fetch(&self) -> Result<String> {
    let url = self.config.url();
    info!("Starting to download {url}");

    let fetch_err = |e: reqwest::Error| Error::Fetch {
      url:     url.clone(),
      message: e.to_string(),
    };

    let resp = self.client.get(&url).send().await.map_err(fetch_err)?;
    if !resp.status().is_success() {
      return Err(Error::HttpStatus {
        status: resp.status().as_u16(),
        url:    url.clone(),
      });
    }

    let body = resp.text().await.map_err(fetch_err)?;
    info!("Downloaded {} bytes", body.len());

    repair_payload(&body).map(str::to_owned)
  }
}

/// A payload already in memory, e.g. a previously saved download.
#[derive(Debug, Clone)]
pub struct StaticFeed(pub String);

impl FeedSource for StaticFeed {
  async fn fetch(&self) -> Result<String> {
    repair_payload(&self.0).map(str::to_owned)
  }
}

// ─── Repair ───────────────────────────────────────────────────────────────────

/// Drop everything before the XML prologue.
///
/// Greedy: the cut happens at the *last* `<?xml` marker, so any number of
/// prepended fragments (including stray prologues) are discarded. Fails with
/// [`Error::InvalidFormat`] when no marker exists.
pub fn repair_payload(content: &str) -> Result<&str> {
  content
    .rfind(XML_PROLOGUE)
    .map(|pos| &content[pos..])
    .ok_or(Error::InvalidFormat)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
