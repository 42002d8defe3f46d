use serde::{Deserialize, Serialize};

use super::{Candidate, MatchResult, MovieDetails, MovieId, Query};
use crate::error::AppResult;

/// Row of the scraped curated ratings table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuratedRating {
    #[serde(rename = "Name")]
    pub name: String,
    /// Rating as written by the reviewer, e.g. `7/10`
    #[serde(rename = "Rating")]
    pub rating: String,
    #[serde(rename = "Notes", default)]
    pub notes: String,
}

impl CuratedRating {
    /// Numeric score out of ten
    pub fn score(&self) -> Option<u8> {
        let raw = self.rating.trim();
        let raw = raw.strip_suffix("/10").unwrap_or(raw);
        raw.trim().parse().ok()
    }

    pub fn to_query(&self) -> AppResult<Query> {
        Query::new(self.name.trim(), Some(self.notes.clone()))
    }
}

/// Row of the resolved provider ratings table
///
/// Unresolved titles keep their name and leave every other column empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularRating {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Rating")]
    pub rating: Option<f64>,
    #[serde(rename = "TMDB ID")]
    pub movie_id: Option<MovieId>,
    #[serde(rename = "Votes")]
    pub votes: Option<u32>,
}

impl PopularRating {
    pub fn resolved(name: impl Into<String>, candidate: &Candidate) -> Self {
        Self {
            name: name.into(),
            rating: Some(candidate.vote_average),
            movie_id: Some(candidate.id),
            votes: Some(candidate.vote_count),
        }
    }

    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rating: None,
            movie_id: None,
            votes: None,
        }
    }

    pub fn from_match(name: impl Into<String>, result: &MatchResult) -> Self {
        match result {
            MatchResult::Resolved(candidate) => Self::resolved(name, candidate),
            MatchResult::Unresolved => Self::unresolved(name),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.rating.is_some() && self.movie_id.is_some()
    }
}

/// Row of the merged table handed to the plotting step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparedRating {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Popular Rating")]
    pub popular_rating: f64,
    #[serde(rename = "Curated Rating")]
    pub curated_rating: u8,
    /// Genre names joined with `"; "`
    #[serde(rename = "Genres")]
    pub genres: String,
}

impl ComparedRating {
    pub fn new(details: &MovieDetails, popular_rating: f64, curated_rating: u8) -> Self {
        Self {
            title: details.title.clone(),
            popular_rating,
            curated_rating,
            genres: details.genres.join("; "),
        }
    }
}
