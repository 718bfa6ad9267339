use std::collections::HashMap;
use time::macros::date;
use crate::error::CatalogError;
use crate::models::*;
use crate::validation::validate_submission;

/// Contest entries in submission order, indexed by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhotoCatalog {
    photos: Vec<Photo>,
    index: HashMap<PhotoId, usize>,
}

impl PhotoCatalog {
    pub fn new(photos: Vec<Photo>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(photos.len());
        for (i, photo) in photos.iter().enumerate() {
            validate_submission(&photo.submission())
                .map_err(|e| CatalogError::InvalidPhoto(photo.id.clone(), e))?;
            if !photo.is_consistent() {
                return Err(CatalogError::InconsistentVotes(photo.id.clone()));
            }
            if photo.has_voter(&photo.photographer_id) {
                return Err(CatalogError::SelfVote(photo.id.clone()));
            }
            if index.insert(photo.id.clone(), i).is_some() {
                return Err(CatalogError::DuplicatePhoto(photo.id.clone()));
            }
        }
        Ok(Self { photos, index })
    }

    pub fn seeded() -> Result<Self, CatalogError> {
        Self::new(seed_photos())
    }

    pub fn get(&self, id: &PhotoId) -> Option<&Photo> {
        self.index.get(id).map(|&i| &self.photos[i])
    }

    pub fn contains(&self, id: &PhotoId) -> bool { self.index.contains_key(id) }
    pub fn photos(&self) -> &[Photo] { &self.photos }
    pub fn iter(&self) -> impl Iterator<Item = &Photo> { self.photos.iter() }
    pub fn len(&self) -> usize { self.photos.len() }
    pub fn is_empty(&self) -> bool { self.photos.is_empty() }

    pub(crate) fn get_mut(&mut self, id: &PhotoId) -> Option<&mut Photo> {
        let i = *self.index.get(id)?;
        self.photos.get_mut(i)
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Photo> { self.photos.iter_mut() }
}

impl IntoIterator for PhotoCatalog {
    type Item = Photo;
    type IntoIter = std::vec::IntoIter<Photo>;

    fn into_iter(self) -> Self::IntoIter { self.photos.into_iter() }
}

// Ballots cast at the exhibition by members who are not in the recorded list
// get synthetic ids so every counted vote has a voter.
fn exhibition_voters(photo: &str, members: &[&str], total: usize) -> Vec<UserId> {
    members.iter()
        .map(|&m| UserId::from(m))
        .chain((members.len()..total).map(|n| UserId::from(format!("exhibition-ballot-{}-{}", photo, n + 1))))
        .collect()
}

fn entry(
    id: &str,
    title: &str,
    (photographer, photographer_id): (&str, &str),
    description: &str,
    image_url: &str,
    category: Category,
    upload_date: time::Date,
) -> PhotoSubmission {
    PhotoSubmission {
        id: PhotoId::from(id),
        title: title.into(),
        photographer: photographer.into(),
        photographer_id: UserId::from(photographer_id),
        description: description.into(),
        image_url: image_url.into(),
        category,
        upload_date,
    }
}

/// The Celestial Photography Exhibition entries the contest opens with.
pub fn seed_photos() -> Vec<Photo> {
    let seed = [
        (
            entry("1", "Orion Nebula", ("Sarah Chen", "2"),
                "A stunning view of the Orion Nebula captured with a 200mm telescope during winter.",
                "https://images.pexels.com/photos/2150/sky-space-dark-galaxy.jpg?auto=compress&cs=tinysrgb&w=800",
                Category::DeepSpace, date!(2024-02-15)),
            &["1", "3", "4", "5"][..], 24,
        ),
        (
            entry("2", "Jupiter and Moons", ("Mike Rodriguez", "3"),
                "Jupiter with its four largest moons clearly visible through our club telescope.",
                "https://images.pexels.com/photos/2152/sky-earth-space-working.jpg?auto=compress&cs=tinysrgb&w=800",
                Category::Planetary, date!(2024-02-20)),
            &["1", "2", "5"][..], 18,
        ),
        (
            entry("3", "Milky Way Core", ("Emily Watson", "4"),
                "The bright core of our galaxy captured during a summer camping trip.",
                "https://images.pexels.com/photos/1169754/pexels-photo-1169754.jpeg?auto=compress&cs=tinysrgb&w=800",
                Category::WideField, date!(2024-02-25)),
            &["1", "2", "3", "6"][..], 32,
        ),
        (
            entry("4", "Andromeda Galaxy", ("David Park", "7"),
                "Our neighboring galaxy captured in stunning detail over multiple nights.",
                "https://images.pexels.com/photos/355906/pexels-photo-355906.jpeg?auto=compress&cs=tinysrgb&w=800",
                Category::DeepSpace, date!(2024-03-01)),
            &["2", "4", "5", "6"][..], 28,
        ),
        (
            entry("5", "Saturn's Rings", ("Lisa Zhang", "8"),
                "The majestic rings of Saturn captured during opposition.",
                "https://images.pexels.com/photos/2034892/pexels-photo-2034892.jpeg?auto=compress&cs=tinysrgb&w=800",
                Category::Planetary, date!(2024-03-05)),
            &["1", "3", "4"][..], 21,
        ),
        (
            entry("6", "Lunar Eclipse Sequence", ("Alex Kumar", "9"),
                "A composite image showing the progression of a total lunar eclipse.",
                "https://images.pexels.com/photos/33109/pexels-photo.jpg?auto=compress&cs=tinysrgb&w=800",
                Category::Lunar, date!(2024-03-08)),
            &["1", "2", "5", "7", "8"][..], 35,
        ),
    ];

    seed.into_iter()
        .map(|(submission, members, total)| {
            let voters = exhibition_voters(submission.id.as_str(), members, total);
            Photo::submitted(submission).with_voters(voters)
        })
        .collect()
}
