//! Roster and team split persistence
//!
//! Both values are stored as JSON strings under two fixed keys. A missing or
//! corrupt roster is replaced with the default one on load, so after
//! [`RosterStore::load_roster`] the roster key always holds a valid roster.
//! A missing split is simply absent.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::consts::{ROSTER_KEY, ROSTER_SIZE, SPLIT_KEY};
use crate::player::{RawPlayer, Roster, default_roster};
use crate::splitter::TeamSplit;
use crate::storage::KeyValueStorage;

/// Storage keys and fallback data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub roster_key: String,
    pub split_key: String,
    pub default_roster: Roster,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            roster_key: ROSTER_KEY.to_string(),
            split_key: SPLIT_KEY.to_string(),
            default_roster: default_roster(),
        }
    }
}

/// Stored split, players still raw
#[derive(serde::Deserialize)]
struct RawTeamSplit {
    dark: Vec<RawPlayer>,
    light: Vec<RawPlayer>,
}

pub struct RosterStore<S: KeyValueStorage> {
    storage: S,
    config: StoreConfig,
}

impl<S: KeyValueStorage> RosterStore<S> {
    pub fn new(storage: S, config: StoreConfig) -> Self {
        Self { storage, config }
    }

    pub fn with_defaults(storage: S) -> Self {
        Self::new(storage, StoreConfig::default())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Read and parse a key; missing, unreadable, or malformed data is `None`
    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let json = match self.storage.get_item(key) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Failed to read '{}': {}", key, e);
                return None;
            }
        };
        match serde_json::from_str(&json) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring malformed data under '{}': {}", key, e);
                None
            }
        }
    }

    fn write<T: Serialize>(&mut self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(json) => {
                if let Err(e) = self.storage.set_item(key, &json) {
                    log::warn!("Failed to save '{}': {}", key, e);
                }
            }
            Err(e) => log::warn!("Failed to serialize '{}': {}", key, e),
        }
    }

    /// Load the saved roster, falling back to (and saving) the default
    pub fn load_roster(&mut self) -> Roster {
        let stored = self
            .read::<Vec<RawPlayer>>(&self.config.roster_key)
            .filter(|rows| rows.len() == ROSTER_SIZE);

        if let Some(rows) = stored {
            log::info!("Loaded roster from storage");
            return Roster::from_raw(&rows);
        }

        log::info!("No saved roster, using defaults");
        let roster = self.config.default_roster.clone();
        self.save_roster(&roster);
        roster
    }

    pub fn save_roster(&mut self, roster: &Roster) {
        let key = self.config.roster_key.clone();
        self.write(&key, roster);
        log::debug!("Roster saved ({} players)", roster.len());
    }

    /// Load the last generated split, if one was saved
    pub fn load_team_split(&self) -> Option<TeamSplit> {
        let raw = self.read::<RawTeamSplit>(&self.config.split_key)?;
        if raw.dark.len() + raw.light.len() != ROSTER_SIZE {
            log::warn!(
                "Ignoring saved split with {} players",
                raw.dark.len() + raw.light.len()
            );
            return None;
        }
        log::info!("Loaded team split from storage");
        Some(TeamSplit {
            dark: Roster::from_raw(&raw.dark).players().to_vec(),
            light: Roster::from_raw(&raw.light).players().to_vec(),
        })
    }

    pub fn save_team_split(&mut self, teams: &TeamSplit) {
        let key = self.config.split_key.clone();
        self.write(&key, teams);
        log::info!("Team split saved");
    }

    /// Remove both saved roster and saved split
    pub fn clear(&mut self) {
        for key in [&self.config.roster_key, &self.config.split_key] {
            if let Err(e) = self.storage.remove_item(key) {
                log::warn!("Failed to remove '{}': {}", key, e);
            }
        }
        log::info!("Saved data cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Player;
    use crate::splitter::split;
    use crate::storage::{MemoryStorage, StorageError};

    fn store() -> RosterStore<MemoryStorage> {
        RosterStore::with_defaults(MemoryStorage::new())
    }

    fn custom_roster() -> Roster {
        Roster::new(
            (1..=10)
                .map(|i| Player::new(format!("Amigo {}", i), 50 + i, "MC"))
                .collect(),
        )
    }

    #[test]
    fn test_empty_storage_loads_and_saves_defaults() {
        let mut store = store();
        let roster = store.load_roster();
        assert_eq!(roster, default_roster());
        assert!(store.storage().contains_key(ROSTER_KEY));

        // Self-healed: second load reads the stored copy
        assert_eq!(store.load_roster(), default_roster());
    }

    #[test]
    fn test_roster_round_trip() {
        let mut store = store();
        let roster = custom_roster();
        store.save_roster(&roster);
        assert_eq!(store.load_roster(), roster);
    }

    #[test]
    fn test_malformed_roster_falls_back() {
        let mut storage = MemoryStorage::new();
        storage.set_item(ROSTER_KEY, "{not json").unwrap();
        let mut store = RosterStore::with_defaults(storage);

        assert_eq!(store.load_roster(), default_roster());
        let saved = store.storage().get_item(ROSTER_KEY).unwrap().unwrap();
        assert_eq!(saved, serde_json::to_string(&default_roster()).unwrap());
    }

    #[test]
    fn test_wrong_length_roster_falls_back() {
        let mut store = store();
        let short = Roster::new(custom_roster().players()[..9].to_vec());
        store.save_roster(&short);
        assert_eq!(store.load_roster(), default_roster());
    }

    #[test]
    fn test_loaded_roster_is_normalized() {
        let mut rows: Vec<serde_json::Value> = (0..10)
            .map(|i| serde_json::json!({"name": format!("N{}", i), "rating": 70, "pos": "MC"}))
            .collect();
        rows[2] = serde_json::json!({"name": "  ", "rating": "abc"});
        rows[5] = serde_json::json!({"name": "Big", "rating": 250, "pos": "DEL"});

        let mut storage = MemoryStorage::new();
        storage
            .set_item(ROSTER_KEY, &serde_json::to_string(&rows).unwrap())
            .unwrap();
        let mut store = RosterStore::with_defaults(storage);

        let roster = store.load_roster();
        assert_eq!(roster.players()[2], Player::new("Jugador 3", 1, "-"));
        assert_eq!(roster.players()[5], Player::new("Big", 100, "DEL"));
    }

    #[test]
    fn test_team_split_absent_until_saved() {
        let mut store = store();
        assert_eq!(store.load_team_split(), None);

        let teams = split(&default_roster()).unwrap();
        store.save_team_split(&teams);
        assert_eq!(store.load_team_split(), Some(teams));
    }

    #[test]
    fn test_team_split_overwritten() {
        let mut store = store();
        store.save_team_split(&split(&default_roster()).unwrap());
        let second = split(&custom_roster()).unwrap();
        store.save_team_split(&second);
        assert_eq!(store.load_team_split(), Some(second));
    }

    #[test]
    fn test_malformed_team_split_is_absent() {
        let mut storage = MemoryStorage::new();
        storage.set_item(SPLIT_KEY, "[1,2,3]").unwrap();
        let store = RosterStore::with_defaults(storage);
        assert_eq!(store.load_team_split(), None);
        // Absence is not healed
        assert!(store.storage().contains_key(SPLIT_KEY));
    }

    #[test]
    fn test_incomplete_team_split_is_absent() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(SPLIT_KEY, r#"{"dark":[{"name":"A","rating":5,"pos":"MC"}],"light":[]}"#)
            .unwrap();
        let store = RosterStore::with_defaults(storage);
        assert_eq!(store.load_team_split(), None);
    }

    #[test]
    fn test_clear_removes_both_keys() {
        let mut store = store();
        store.save_roster(&custom_roster());
        store.save_team_split(&split(&custom_roster()).unwrap());

        store.clear();
        assert!(store.storage().is_empty());
        assert_eq!(store.load_team_split(), None);
        assert_eq!(store.load_roster(), default_roster());
    }

    #[test]
    fn test_custom_keys() {
        let config = StoreConfig {
            roster_key: "r".to_string(),
            split_key: "s".to_string(),
            default_roster: custom_roster(),
        };
        let mut store = RosterStore::new(MemoryStorage::new(), config);
        assert_eq!(store.load_roster(), custom_roster());
        assert!(store.storage().contains_key("r"));
        assert!(!store.storage().contains_key(ROSTER_KEY));
    }

    /// Backend whose reads and writes always fail
    struct BrokenStorage;

    impl KeyValueStorage for BrokenStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }
        fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("quota exceeded".to_string()))
        }
        fn remove_item(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    #[test]
    fn test_broken_storage_degrades_to_defaults() {
        let mut store = RosterStore::with_defaults(BrokenStorage);
        assert_eq!(store.load_roster(), default_roster());
        assert_eq!(store.load_team_split(), None);
        store.clear();
    }
}
