use std::collections::{BTreeSet, HashMap, HashSet};
use tracing::{debug, warn};
use crate::catalog::PhotoCatalog;
use crate::error::{StorageError, VoteError};
use crate::models::*;
use crate::vote_store::{KeyValueStorage, VoteStore};

/// Sole writer of photo vote counters and per-user vote sets.
///
/// Every user's set mirrors the catalog's voter lists: `photo ∈ votes[user]`
/// exactly when `user ∈ photo.voters`.
#[derive(Debug)]
pub struct VoteAggregator<S> {
    catalog: PhotoCatalog,
    store: VoteStore<S>,
    ledger: HashMap<UserId, BTreeSet<PhotoId>>,
    unsaved: HashSet<UserId>,
}

impl<S: KeyValueStorage> VoteAggregator<S> {
    pub fn new(catalog: PhotoCatalog, store: VoteStore<S>) -> Self {
        Self { catalog, store, ledger: HashMap::new(), unsaved: HashSet::new() }
    }

    pub fn catalog(&self) -> &PhotoCatalog { &self.catalog }
    pub fn store(&self) -> &VoteStore<S> { &self.store }
    pub fn store_mut(&mut self) -> &mut VoteStore<S> { &mut self.store }
    pub fn into_store(self) -> VoteStore<S> { self.store }

    /// Brings a user's stored votes into the catalog. A stored record wins over
    /// the catalog's voter lists; without one the catalog is taken as is.
    pub fn load_user(&mut self, user: &UserId) {
        if self.ledger.contains_key(user) {
            return;
        }

        let votes = match self.store.load_record(user) {
            Some(stored) => {
                let mut applied = BTreeSet::new();
                for photo in self.catalog.iter_mut() {
                    let wanted = stored.contains(&photo.id) && photo.photographer_id != *user;
                    if wanted {
                        photo.add_voter(user.clone());
                        applied.insert(photo.id.clone());
                    } else {
                        photo.remove_voter(user);
                    }
                }
                if applied.len() != stored.len() {
                    debug!(user = %user, dropped = stored.len() - applied.len(), "Ignored stored votes for unknown or own photos");
                }
                applied
            }
            None => self.catalog.iter()
                .filter(|p| p.has_voter(user))
                .map(|p| p.id.clone())
                .collect(),
        };
        self.ledger.insert(user.clone(), votes);
    }

    pub fn can_vote(&self, user: Option<&UserId>, photo_id: &PhotoId) -> Result<(), VoteError> {
        let user = user.ok_or(VoteError::NotAuthenticated)?;
        let photo = self.catalog.get(photo_id)
            .ok_or_else(|| VoteError::UnknownPhoto(photo_id.clone()))?;
        if photo.photographer_id == *user {
            return Err(VoteError::SelfVoteRejected(photo_id.clone()));
        }
        Ok(())
    }

    /// Casts the vote if absent, retracts it if present. Refused operations
    /// leave all state untouched; a failed save does not undo the vote.
    pub fn toggle_vote(&mut self, user: Option<&UserId>, photo_id: &PhotoId) -> Result<VoteResult, VoteError> {
        self.can_vote(user, photo_id)?;
        let user = user.ok_or(VoteError::NotAuthenticated)?;
        self.load_user(user);

        let photo = self.catalog.get_mut(photo_id)
            .ok_or_else(|| VoteError::UnknownPhoto(photo_id.clone()))?;
        let votes = self.ledger.entry(user.clone()).or_default();

        let action = if votes.remove(photo_id) {
            photo.remove_voter(user);
            VoteAction::Retracted
        } else {
            votes.insert(photo_id.clone());
            photo.add_voter(user.clone());
            VoteAction::Cast
        };
        debug_assert_eq!(votes.contains(photo_id), photo.has_voter(user));
        let count = photo.votes();

        debug!(user = %user, photo = %photo_id, ?action, votes = count, "Vote toggled");

        Ok(VoteResult {
            photo_id: photo_id.clone(),
            action,
            votes: count,
            persistence_warning: self.persist(user).err(),
        })
    }

    /// Saves a user's set again after an earlier write failed.
    pub fn retry_persist(&mut self, user: &UserId) -> Result<(), VoteError> {
        if !self.unsaved.contains(user) {
            return Ok(());
        }
        self.persist(user).map_err(VoteError::PersistenceWriteFailure)
    }

    pub fn has_unsaved_votes(&self, user: &UserId) -> bool {
        self.unsaved.contains(user)
    }

    /// A loaded user's vote set, or the catalog's view for users not loaded yet.
    pub fn votes_of(&self, user: &UserId) -> BTreeSet<PhotoId> {
        match self.ledger.get(user) {
            Some(votes) => votes.clone(),
            None => self.catalog.iter()
                .filter(|p| p.has_voter(user))
                .map(|p| p.id.clone())
                .collect(),
        }
    }

    pub fn has_voted(&self, user: &UserId, photo_id: &PhotoId) -> bool {
        match self.ledger.get(user) {
            Some(votes) => votes.contains(photo_id),
            None => self.catalog.get(photo_id).is_some_and(|p| p.has_voter(user)),
        }
    }

    pub fn vote_count(&self, user: &UserId) -> usize {
        self.votes_of(user).len()
    }

    pub fn submission_stats(&self, user: &UserId) -> SubmissionStats {
        self.catalog.iter()
            .filter(|p| p.photographer_id == *user)
            .fold(SubmissionStats::default(), |stats, p| SubmissionStats {
                submissions: stats.submissions + 1,
                votes_received: stats.votes_received + p.votes(),
            })
    }

    fn persist(&mut self, user: &UserId) -> Result<(), StorageError> {
        let votes = self.ledger.get(user).cloned().unwrap_or_default();
        match self.store.save(user, &votes) {
            Ok(()) => {
                self.unsaved.remove(user);
                Ok(())
            }
            Err(e) => {
                warn!(user = %user, error = %e, "Vote kept in memory but not saved");
                self.unsaved.insert(user.clone());
                Err(e)
            }
        }
    }
}
