//! `nuts-import` binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! store and imports the NUTS classification from Eurostat RAMON.
//!
//! ```
//! nuts-import seed-countries
//! nuts-import run
//! nuts-import run --from-file nuts_2013.xml --json
//! nuts-import list --level 2 --country FR
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use nuts_core::store::{NutsQuery, NutsStore};
use nuts_import::{
  Importer, config::ImportConfig, countries::seed_countries,
};
use nuts_ramon::{RamonClient, StaticFeed};
use nuts_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Eurostat NUTS region importer")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Download the classification and synchronise the store.
  Run {
    /// Import a previously saved export instead of downloading.
    #[arg(long, value_name = "FILE")]
    from_file: Option<PathBuf>,
    /// Print the summary as JSON.
    #[arg(long)]
    json:      bool,
  },

  /// Insert any handled country missing from the store.
  SeedCountries,

  /// Print stored NUTS records.
  List {
    #[arg(long)]
    level:   Option<u8>,
    /// Country code, e.g. `FR`.
    #[arg(long)]
    country: Option<String>,
    /// Emit JSON instead of a table.
    #[arg(long)]
    json:    bool,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let cfg = ImportConfig::load(&cli.config).context("failed to read configuration")?;
  let store_path = cfg.resolved_store_path();
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  match cli.command {
    Command::Run { from_file, json } => {
      let summary = match from_file {
        Some(path) => {
          let body = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read {path:?}"))?;
          Importer::new(store, StaticFeed(body)).run().await
        }
        None => {
          let client = RamonClient::new(cfg.ramon).context("failed to build HTTP client")?;
          Importer::new(store, client).run().await
        }
      }
      .context("NUTS import failed")?;

      if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
      } else {
        println!(
          "created {}, updated {}, skipped {}, deleted {}",
          summary.created, summary.updated, summary.skipped, summary.deleted
        );
      }
    }

    Command::SeedCountries => {
      let added = seed_countries(&store).await.context("failed to seed countries")?;
      println!("{added} countries added");
    }

    Command::List { level, country, json } => {
      let country_id = match country {
        Some(code) => Some(
          store
            .find_country_by_code(&code)
            .await?
            .with_context(|| format!("unknown country {code}"))?
            .country_id,
        ),
        None => None,
      };

      let query = NutsQuery { level, country_id, ..Default::default() };
      let records = store.list_nuts(&query).await.context("failed to list records")?;

      if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
      } else {
        for r in &records {
          println!("{}  {:<6} {}", r.level, r.code, r.name);
        }
      }
    }
  }

  Ok(())
}
