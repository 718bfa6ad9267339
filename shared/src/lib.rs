pub mod error;
pub mod models;
pub mod validation;
pub mod user_info;
pub mod catalog;
pub mod vote_store;
pub mod aggregator;
pub mod ranking;
pub mod filter;
pub mod session;

pub use error::{Error, ErrorCode, ErrorResponse, VoteError, StorageError, CatalogError};
pub use models::*;
pub use validation::*;
pub use user_info::*;
pub use catalog::{PhotoCatalog, seed_photos};
pub use vote_store::{KeyValueStorage, MemoryStorage, VoteStore, VOTE_KEY_PREFIX};
pub use aggregator::VoteAggregator;
pub use ranking::{rank, leaderboard, LeaderboardEntry, RankBadge, RankedPhoto, LEADERBOARD_SIZE};
pub use filter::{filter, filter_photos, CategoryFilter};
pub use session::ContestSession;

#[cfg(test)]
mod tests;
