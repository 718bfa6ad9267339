use serde::{Serialize, Deserialize};
use crate::models::Photo;

pub const LEADERBOARD_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RankBadge { Gold, Silver, Bronze }

impl RankBadge {
    pub const fn for_position(position: usize) -> Option<Self> {
        match position {
            1 => Some(RankBadge::Gold),
            2 => Some(RankBadge::Silver),
            3 => Some(RankBadge::Bronze),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RankBadge::Gold => "1st",
            RankBadge::Silver => "2nd",
            RankBadge::Bronze => "3rd",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedPhoto<'a> {
    /// 1-based position in the full ranking.
    pub position: usize,
    pub badge: Option<RankBadge>,
    pub photo: &'a Photo,
}

impl RankedPhoto<'_> {
    pub fn to_entry(&self) -> LeaderboardEntry {
        LeaderboardEntry { position: self.position, badge: self.badge, photo: self.photo.clone() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub position: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<RankBadge>,
    pub photo: Photo,
}

/// Orders photos by votes, most first. Equal counts keep catalog order.
pub fn rank(photos: &[Photo]) -> Vec<RankedPhoto<'_>> {
    let mut sorted: Vec<_> = photos.iter().enumerate().collect();
    sorted.sort_unstable_by(|(ia, a), (ib, b)| {
        b.votes().cmp(&a.votes()).then_with(|| ia.cmp(ib))
    });

    sorted.into_iter()
        .enumerate()
        .map(|(i, (_, photo))| {
            let position = i + 1;
            RankedPhoto { position, badge: RankBadge::for_position(position), photo }
        })
        .collect()
}

pub fn leaderboard(photos: &[Photo], size: usize) -> Vec<RankedPhoto<'_>> {
    let mut ranked = rank(photos);
    ranked.truncate(size);
    ranked
}
