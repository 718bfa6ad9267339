use std::fmt;
use std::str::FromStr;
use crate::models::{Category, Photo};
use crate::ranking::RankedPhoto;
use crate::validation::ValidationError;

pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn options() -> impl Iterator<Item = CategoryFilter> {
        std::iter::once(CategoryFilter::All).chain(Category::ALL.into_iter().map(CategoryFilter::Only))
    }

    pub fn matches(&self, photo: &Photo) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => photo.category == *category,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "All Categories",
            CategoryFilter::Only(category) => category.name(),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Only(category) => f.write_str(category.name()),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_CATEGORIES {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

/// Restricts a ranking to one category. Positions stay those of the full ranking.
pub fn filter<'a>(ranked: Vec<RankedPhoto<'a>>, category: &CategoryFilter) -> Vec<RankedPhoto<'a>> {
    ranked.into_iter().filter(|r| category.matches(r.photo)).collect()
}

pub fn filter_photos<'a>(photos: &'a [Photo], category: &CategoryFilter) -> Vec<&'a Photo> {
    photos.iter().filter(|p| category.matches(p)).collect()
}
