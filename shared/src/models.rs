use serde::{Serialize, Deserialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use time::{Date, OffsetDateTime};
use uuid::Uuid;
use crate::error::StorageError;
use crate::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoId(String);

impl PhotoId {
    pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for PhotoId {
    fn from(id: &str) -> Self { Self(id.to_string()) }
}

impl From<String> for PhotoId {
    fn from(id: String) -> Self { Self(id) }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self { Self(id.to_string()) }
}

impl From<String> for UserId {
    fn from(id: String) -> Self { Self(id) }
}

impl From<Uuid> for UserId {
    fn from(id: Uuid) -> Self { Self(id.to_string()) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Deep Space")] DeepSpace,
    #[serde(rename = "Planetary")] Planetary,
    #[serde(rename = "Wide Field")] WideField,
    #[serde(rename = "Lunar")] Lunar,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::DeepSpace, Category::Planetary, Category::WideField, Category::Lunar];

    pub const fn name(self) -> &'static str {
        match self {
            Category::DeepSpace => "Deep Space",
            Category::Planetary => "Planetary",
            Category::WideField => "Wide Field",
            Category::Lunar => "Lunar",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL.into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| ValidationError::UnknownCategory(s.to_string()))
    }
}

/// Descriptive metadata of a contest entry, as entered on upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoSubmission {
    pub id: PhotoId,
    pub title: String,
    pub photographer: String,
    pub photographer_id: UserId,
    pub description: String,
    pub image_url: String,
    pub category: Category,
    pub upload_date: Date,
}

/// A contest entry. `votes` always equals the number of distinct `voters`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Photo {
    pub id: PhotoId,
    pub title: String,
    pub photographer: String,
    pub photographer_id: UserId,
    pub description: String,
    pub image_url: String,
    pub category: Category,
    pub upload_date: Date,
    votes: u32,
    voters: Vec<UserId>,
}

impl Photo {
    pub fn submitted(submission: PhotoSubmission) -> Self {
        let PhotoSubmission { id, title, photographer, photographer_id, description, image_url, category, upload_date } = submission;
        Self { id, title, photographer, photographer_id, description, image_url, category, upload_date, votes: 0, voters: Vec::new() }
    }

    /// Replaces the voter list, dropping repeated ids.
    pub fn with_voters(mut self, voters: impl IntoIterator<Item = UserId>) -> Self {
        self.voters.clear();
        self.votes = 0;
        for voter in voters {
            self.add_voter(voter);
        }
        self
    }

    pub fn votes(&self) -> u32 { self.votes }
    pub fn voters(&self) -> &[UserId] { &self.voters }

    pub fn has_voter(&self, user: &UserId) -> bool {
        self.voters.contains(user)
    }

    pub fn is_consistent(&self) -> bool {
        let distinct: BTreeSet<_> = self.voters.iter().collect();
        distinct.len() == self.voters.len() && self.votes as usize == self.voters.len()
    }

    pub fn submission(&self) -> PhotoSubmission {
        PhotoSubmission {
            id: self.id.clone(),
            title: self.title.clone(),
            photographer: self.photographer.clone(),
            photographer_id: self.photographer_id.clone(),
            description: self.description.clone(),
            image_url: self.image_url.clone(),
            category: self.category,
            upload_date: self.upload_date,
        }
    }

    pub(crate) fn add_voter(&mut self, user: UserId) -> bool {
        if self.has_voter(&user) {
            return false;
        }
        self.voters.push(user);
        self.votes += 1;
        true
    }

    pub(crate) fn remove_voter(&mut self, user: &UserId) -> bool {
        let Some(pos) = self.voters.iter().position(|v| v == user) else { return false };
        self.voters.remove(pos);
        self.votes -= 1;
        true
    }
}

/// Persisted form of one user's vote set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    pub photo_ids: BTreeSet<PhotoId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VoteAction {
    Cast,
    Retracted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteResult {
    pub photo_id: PhotoId,
    pub action: VoteAction,
    pub votes: u32,
    /// Set when the in-memory vote stands but the durable write failed.
    pub persistence_warning: Option<StorageError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl CurrentUser {
    pub fn is_photographer_of(&self, photo: &Photo) -> bool {
        photo.photographer_id == self.id
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionStats {
    pub submissions: usize,
    pub votes_received: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingActivity {
    pub photos_voted: usize,
    pub submissions: usize,
    pub votes_received: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "backend", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct MemberAccount {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreatedMember {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}
