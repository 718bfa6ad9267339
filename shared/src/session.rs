use tracing::info;
use crate::aggregator::VoteAggregator;
use crate::catalog::PhotoCatalog;
use crate::error::VoteError;
use crate::filter::{filter, CategoryFilter};
use crate::models::*;
use crate::ranking::{rank, RankedPhoto, LEADERBOARD_SIZE};
use crate::vote_store::{KeyValueStorage, VoteStore};

/// Contest state of one signed-in user, from sign-in until sign-out.
#[derive(Debug)]
pub struct ContestSession<S> {
    user: CurrentUser,
    aggregator: VoteAggregator<S>,
}

impl<S: KeyValueStorage> ContestSession<S> {
    pub fn sign_in(user: Option<CurrentUser>, catalog: PhotoCatalog, storage: S) -> Result<Self, VoteError> {
        let user = user.ok_or(VoteError::NotAuthenticated)?;
        let mut aggregator = VoteAggregator::new(catalog, VoteStore::new(storage));
        aggregator.load_user(&user.id);
        info!(user = %user.id, votes = aggregator.vote_count(&user.id), "Contest session started");
        Ok(Self { user, aggregator })
    }

    pub fn user(&self) -> &CurrentUser { &self.user }
    pub fn aggregator(&self) -> &VoteAggregator<S> { &self.aggregator }
    pub fn photos(&self) -> &[Photo] { self.aggregator.catalog().photos() }

    pub fn toggle_vote(&mut self, photo_id: &PhotoId) -> Result<VoteResult, VoteError> {
        self.aggregator.toggle_vote(Some(&self.user.id), photo_id)
    }

    pub fn can_vote(&self, photo_id: &PhotoId) -> Result<(), VoteError> {
        self.aggregator.can_vote(Some(&self.user.id), photo_id)
    }

    pub fn retry_persist(&mut self) -> Result<(), VoteError> {
        self.aggregator.retry_persist(&self.user.id)
    }

    pub fn has_unsaved_votes(&self) -> bool {
        self.aggregator.has_unsaved_votes(&self.user.id)
    }

    pub fn has_voted(&self, photo_id: &PhotoId) -> bool {
        self.aggregator.has_voted(&self.user.id, photo_id)
    }

    pub fn is_own_photo(&self, photo: &Photo) -> bool {
        self.user.is_photographer_of(photo)
    }

    pub fn ranked(&self) -> Vec<RankedPhoto<'_>> {
        rank(self.photos())
    }

    /// Top entries of the current view. Positions and badges stay contest-wide.
    pub fn leaderboard(&self, category: &CategoryFilter) -> Vec<RankedPhoto<'_>> {
        let mut top = self.visible(category);
        top.truncate(LEADERBOARD_SIZE);
        top
    }

    pub fn visible(&self, category: &CategoryFilter) -> Vec<RankedPhoto<'_>> {
        filter(self.ranked(), category)
    }

    pub fn activity(&self) -> VotingActivity {
        let SubmissionStats { submissions, votes_received } = self.aggregator.submission_stats(&self.user.id);
        VotingActivity {
            photos_voted: self.aggregator.vote_count(&self.user.id),
            submissions,
            votes_received,
        }
    }

    pub fn sign_out(self) -> S {
        info!(user = %self.user.id, "Contest session ended");
        self.aggregator.into_store().into_storage()
    }
}
