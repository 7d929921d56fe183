//! SQL schema for the NUTS SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS countries (
    country_id  TEXT PRIMARY KEY,
    code        TEXT NOT NULL UNIQUE,   -- ISO-3166 alpha-2
    name        TEXT NOT NULL
);

-- (level, code) is the import key; nuts_id is the stable identity.
CREATE TABLE IF NOT EXISTS nuts (
    nuts_id     TEXT PRIMARY KEY,
    level       INTEGER NOT NULL CHECK (level BETWEEN 1 AND 5),
    code        TEXT NOT NULL,
    name        TEXT NOT NULL,
    country_id  TEXT REFERENCES countries(country_id),
    parent_id   TEXT REFERENCES nuts(nuts_id) ON DELETE SET NULL,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL,
    UNIQUE (level, code)
);

CREATE INDEX IF NOT EXISTS nuts_country_idx ON nuts(country_id);
CREATE INDEX IF NOT EXISTS nuts_parent_idx  ON nuts(parent_id);

PRAGMA user_version = 1;
";
