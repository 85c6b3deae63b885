use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use sqlx::postgres::PgConnectOptions;

/// Connection settings for the reporting database, read from the
/// environment: `PG_HOST`, `PG_DBNAME`, `PG_USER`, `PG_PASSWORD` and an
/// optional `PG_PORT` (default 5432).
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub dbname: String,
    pub user: String,
    pub password: String,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        let port = match env::var("PG_PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("PG_PORT is not a valid port number: {raw}"))?,
            Err(_) => 5432,
        };

        Ok(Self {
            host: require("PG_HOST")?,
            port,
            dbname: require("PG_DBNAME")?,
            user: require("PG_USER")?,
            password: require("PG_PASSWORD")?,
        })
    }

    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.dbname)
            .username(&self.user)
            .password(&self.password)
    }
}

fn require(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("{key} must be set"))
}

/// The export files one run loads, discovered inside a single export
/// directory. File names follow the point-of-sale export conventions
/// (`MenuExport_<guid>.json`, `OrderDetails.csv`, ...); when dated
/// re-exports coexist the lexically last match wins.
#[derive(Debug, Clone)]
pub struct ExportBundle {
    pub menus: PathBuf,
    pub orders: PathBuf,
    pub checks: PathBuf,
    pub time_entries: PathBuf,
}

impl ExportBundle {
    pub fn discover(dir: &Path) -> Result<Self> {
        Ok(Self {
            menus: find_export(dir, "MenuExport*.json")?,
            orders: find_export(dir, "OrderDetails*.csv")?,
            checks: find_export(dir, "CheckDetails*.csv")?,
            time_entries: find_export(dir, "TimeEntries*.csv")?,
        })
    }
}

fn find_export(dir: &Path, pattern: &str) -> Result<PathBuf> {
    let full_pattern = dir.join(pattern);
    let pattern_str = full_pattern
        .to_str()
        .context("export directory path is not valid UTF-8")?;

    let mut matches: Vec<PathBuf> = glob::glob(pattern_str)
        .with_context(|| format!("invalid glob pattern {pattern_str}"))?
        .filter_map(std::result::Result::ok)
        .collect();
    matches.sort();

    match matches.pop() {
        Some(path) => Ok(path),
        None => bail!("no file matching {pattern} under {}", dir.display()),
    }
}
