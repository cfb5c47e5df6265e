//! Single-record store for the selected place.
//!
//! The file is a flat JSON object of string values, like a preferences file.
//! The place lives under [`PLACE_KEY`] as its own JSON string.

use anyhow::{Context, Result, anyhow};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::{config::Config, model::Place};

pub const PLACE_KEY: &str = "place";

type Records = BTreeMap<String, String>;

#[derive(Debug, Clone)]
pub struct PlaceStore {
    path: PathBuf,
}

impl PlaceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.place_store_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrites any previously saved place. Last write wins.
    pub fn save(&self, place: &Place) -> Result<()> {
        // An unreadable file is replaced rather than blocking the save.
        let mut records = self.read_records().unwrap_or_default();
        let json = serde_json::to_string(place).context("Failed to serialize place")?;
        records.insert(PLACE_KEY.to_string(), json);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        let contents =
            serde_json::to_string_pretty(&records).context("Failed to serialize place store")?;
        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write place store: {}", self.path.display()))?;

        Ok(())
    }

    /// Reads the saved place. Fails when nothing was saved or the record is
    /// malformed; guard with [`PlaceStore::exists`].
    pub fn load(&self) -> Result<Place> {
        let records = self.read_records()?;
        let json = records.get(PLACE_KEY).ok_or_else(|| {
            anyhow!(
                "No place saved yet.\n\
                 Hint: run `sunny search <query> --select` to pick one."
            )
        })?;

        serde_json::from_str(json).with_context(|| {
            format!("Saved place is malformed in {}", self.path.display())
        })
    }

    pub fn exists(&self) -> bool {
        self.read_records()
            .map(|records| records.contains_key(PLACE_KEY))
            .unwrap_or(false)
    }

    fn read_records(&self) -> Result<Records> {
        if !self.path.exists() {
            return Ok(Records::new());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read place store: {}", self.path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse place store: {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_place;

    fn store() -> (tempfile::TempDir, PlaceStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = PlaceStore::new(dir.path().join("prefs").join("sunny_weather.json"));
        (dir, store)
    }

    #[test]
    fn save_then_load_roundtrip() {
        let (_dir, store) = store();
        assert!(!store.exists());

        let place = sample_place("北京市");
        store.save(&place).expect("save");

        assert!(store.exists());
        assert_eq!(store.load().expect("load"), place);
    }

    #[test]
    fn last_write_wins() {
        let (_dir, store) = store();
        store.save(&sample_place("first")).expect("save");
        store.save(&sample_place("second")).expect("save");

        assert_eq!(store.load().expect("load").name, "second");
    }

    #[test]
    fn load_without_record_fails_with_hint() {
        let (_dir, store) = store();
        let err = store.load().unwrap_err();
        assert!(err.to_string().contains("No place saved yet"));
    }

    #[test]
    fn record_is_a_json_string_under_fixed_key() {
        let (_dir, store) = store();
        store.save(&sample_place("x")).expect("save");

        let raw = fs::read_to_string(store.path()).expect("read");
        let records: Records = serde_json::from_str(&raw).expect("flat string map");
        let place: Place = serde_json::from_str(&records[PLACE_KEY]).expect("place json");
        assert_eq!(place.name, "x");
    }

    #[test]
    fn malformed_record_fails_to_load() {
        let (_dir, store) = store();
        fs::create_dir_all(store.path().parent().expect("parent")).expect("mkdir");
        fs::write(store.path(), r#"{"place":"{not json"}"#).expect("write");

        assert!(store.exists());
        let err = store.load().unwrap_err();
        assert!(err.to_string().contains("Saved place is malformed"));
    }

    #[test]
    fn corrupt_file_is_replaced_on_save() {
        let (_dir, store) = store();
        fs::create_dir_all(store.path().parent().expect("parent")).expect("mkdir");
        fs::write(store.path(), "garbage").expect("write");

        assert!(!store.exists());
        store.save(&sample_place("fresh")).expect("save");
        assert_eq!(store.load().expect("load").name, "fresh");
    }
}
