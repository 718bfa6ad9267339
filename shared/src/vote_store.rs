use serde::Deserialize;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};
use crate::error::StorageError;
use crate::models::{PhotoId, UserId, VoteRecord};

pub const VOTE_KEY_PREFIX: &str = "votes_";

/// Durable string storage scoped to one browser profile (or one process).
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self { Self::default() }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// Older clients wrote a bare array of ids.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredVotes {
    Legacy(Vec<PhotoId>),
    Record(VoteRecord),
}

#[derive(Debug, Clone)]
pub struct VoteStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> VoteStore<S> {
    pub fn new(storage: S) -> Self { Self { storage } }

    pub fn key(user: &UserId) -> String {
        format!("{}{}", VOTE_KEY_PREFIX, user)
    }

    pub fn load(&self, user: &UserId) -> BTreeSet<PhotoId> {
        self.load_record(user).unwrap_or_default()
    }

    /// `None` when the user has never saved a vote set. Unreadable or malformed
    /// records count as an empty set.
    pub fn load_record(&self, user: &UserId) -> Option<BTreeSet<PhotoId>> {
        let raw = match self.storage.get(&Self::key(user)) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(user = %user, error = %e, "Could not read stored votes");
                return Some(BTreeSet::new());
            }
        };

        match serde_json::from_str::<StoredVotes>(&raw) {
            Ok(StoredVotes::Record(record)) => Some(record.photo_ids),
            Ok(StoredVotes::Legacy(ids)) => {
                debug!(user = %user, "Read legacy vote list");
                Some(ids.into_iter().collect())
            }
            Err(e) => {
                warn!(user = %user, error = %e, "Discarding malformed vote record");
                Some(BTreeSet::new())
            }
        }
    }

    pub fn save(&mut self, user: &UserId, votes: &BTreeSet<PhotoId>) -> Result<(), StorageError> {
        let record = VoteRecord { photo_ids: votes.clone() };
        let json = serde_json::to_string(&record).map_err(|e| StorageError::Encode(e.to_string()))?;
        self.storage.set(&Self::key(user), &json)
    }

    pub fn storage(&self) -> &S { &self.storage }
    pub fn storage_mut(&mut self) -> &mut S { &mut self.storage }
    pub fn into_storage(self) -> S { self.storage }
}
