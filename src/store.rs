//! Persisted home/work locations
//!
//! Both records live as JSON under fixed keys in a fjall keyspace. Reads
//! fall back to the configured defaults when a key is missing or cannot be
//! decoded, writes are persisted immediately.

use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use fjall::{Database, Keyspace, PersistMode};
use serde::{Deserialize, Serialize};
use tokio::task;
use tracing::{debug, info, warn};

use crate::CommuteError;
use crate::config::DefaultsConfig;
use crate::models::Location;

const KEYSPACE: &str = "locations";
const HOME_KEY: &str = "commute_home";
const WORK_KEY: &str = "commute_work";

/// Which saved location
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Home,
    Work,
}

impl Slot {
    fn key(self) -> &'static str {
        match self {
            Slot::Home => HOME_KEY,
            Slot::Work => WORK_KEY,
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Slot::Home => "Home",
            Slot::Work => "Work",
        }
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Slot::Home => f.write_str("home"),
            Slot::Work => f.write_str("work"),
        }
    }
}

impl FromStr for Slot {
    type Err = CommuteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "home" => Ok(Slot::Home),
            "work" => Ok(Slot::Work),
            other => Err(CommuteError::validation(format!(
                "Unknown location '{other}', expected 'home' or 'work'"
            ))),
        }
    }
}

/// Open (or create) the database shared by the location store and the route cache
pub fn open_database(path: impl AsRef<Path>) -> Result<Database> {
    let path = path.as_ref();
    std::fs::create_dir_all(path)
        .with_context(|| format!("Failed to create data directory: {}", path.display()))?;
    Database::builder(path)
        .open()
        .map_err(|e| CommuteError::store(format!("Failed to open database: {e}")).into())
}

#[derive(Clone)]
pub struct LocationStore {
    db: Database,
    store: Keyspace,
    defaults: DefaultsConfig,
}

impl LocationStore {
    pub fn new(db: &Database, defaults: DefaultsConfig) -> Result<Self> {
        let store = db
            .keyspace(KEYSPACE, fjall::KeyspaceCreateOptions::default)
            .map_err(|e| CommuteError::store(format!("Failed to open location keyspace: {e}")))?;
        Ok(Self {
            db: db.clone(),
            store,
            defaults,
        })
    }

    pub async fn home(&self) -> Result<Location> {
        self.get(Slot::Home).await
    }

    pub async fn work(&self) -> Result<Location> {
        self.get(Slot::Work).await
    }

    pub async fn set_home(&self, location: Location) -> Result<()> {
        self.set(Slot::Home, location).await
    }

    pub async fn set_work(&self, location: Location) -> Result<()> {
        self.set(Slot::Work, location).await
    }

    fn fallback(&self, slot: Slot) -> Location {
        match slot {
            Slot::Home => self.defaults.home.clone(),
            Slot::Work => self.defaults.work.clone(),
        }
    }

    /// Saved location for `slot`, or its default
    pub async fn get(&self, slot: Slot) -> Result<Location> {
        let store = self.store.clone();
        let key = slot.key();

        let bytes = task::spawn_blocking(move || -> fjall::Result<Option<Vec<u8>>> {
            Ok(store.get(key.as_bytes())?.map(|v| v.to_vec()))
        })
        .await?
        .map_err(|e| CommuteError::store(format!("Failed to read {slot} location: {e}")))?;

        let Some(bytes) = bytes else {
            debug!("No saved {slot} location, using default");
            return Ok(self.fallback(slot));
        };

        match serde_json::from_slice::<Location>(&bytes) {
            Ok(location) => Ok(location),
            Err(e) => {
                warn!("Saved {slot} location is unreadable ({e}), using default");
                Ok(self.fallback(slot))
            }
        }
    }

    /// Validate and persist a location
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn set(&self, slot: Slot, location: Location) -> Result<()> {
        location.validate()?;

        let bytes = serde_json::to_vec(&location)?;
        let store = self.store.clone();
        let db = self.db.clone();
        let key = slot.key();

        task::spawn_blocking(move || -> fjall::Result<()> {
            store.insert(key.as_bytes().to_vec(), bytes)?;
            db.persist(PersistMode::SyncAll)
        })
        .await?
        .map_err(|e| CommuteError::store(format!("Failed to save {slot} location: {e}")))?;

        info!("Saved {slot} location: {location}");
        Ok(())
    }

    /// Forget both saved locations
    pub async fn reset(&self) -> Result<()> {
        let store = self.store.clone();
        let db = self.db.clone();

        task::spawn_blocking(move || -> fjall::Result<()> {
            store.remove(HOME_KEY.as_bytes().to_vec())?;
            store.remove(WORK_KEY.as_bytes().to_vec())?;
            db.persist(PersistMode::SyncAll)
        })
        .await?
        .map_err(|e| CommuteError::store(format!("Failed to reset locations: {e}")))?;

        Ok(())
    }
}
