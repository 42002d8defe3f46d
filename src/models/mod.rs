use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, sync::OnceLock};

use crate::error::{AppError, AppResult};

pub mod rating;

pub use rating::{ComparedRating, CuratedRating, PopularRating};

/// Provider-assigned movie identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u64);

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One provider-supplied movie competing to match a query title
///
/// Only `title` and `vote_count` are read by the matching logic. The id and
/// the remaining fields are carried through to the result sink unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: MovieId,
    pub title: String,
    /// Popularity signal, used only as an eligibility gate
    pub vote_count: u32,
    pub vote_average: f64,
    pub release_date: Option<String>,
}

impl Candidate {
    pub fn new(id: u64, title: impl Into<String>, vote_count: u32) -> Self {
        Self {
            id: MovieId(id),
            title: title.into(),
            vote_count,
            vote_average: 0.0,
            release_date: None,
        }
    }

    pub fn with_vote_average(mut self, vote_average: f64) -> Self {
        self.vote_average = vote_average;
        self
    }
}

/// A title to resolve, with an optional free-text hint (review notes)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    title: String,
    hint: Option<String>,
}

fn release_year_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\((\d{4})\)").expect("release year pattern is valid"))
}

impl Query {
    /// Creates a query, rejecting blank titles
    pub fn new(title: impl Into<String>, hint: Option<String>) -> AppResult<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Query title cannot be empty".to_string(),
            ));
        }
        let hint = hint.filter(|h| !h.trim().is_empty());
        Ok(Self { title, hint })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Four-digit year written in parentheses somewhere in the hint, e.g. `(2019)`
    pub fn release_year(&self) -> Option<u16> {
        let hint = self.hint.as_deref()?;
        release_year_pattern()
            .captures(hint)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }
}

/// Outcome of resolving one query
#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult {
    Resolved(Candidate),
    Unresolved,
}

impl MatchResult {
    pub fn is_resolved(&self) -> bool {
        matches!(self, MatchResult::Resolved(_))
    }

    pub fn candidate(&self) -> Option<&Candidate> {
        match self {
            MatchResult::Resolved(candidate) => Some(candidate),
            MatchResult::Unresolved => None,
        }
    }
}

/// Canonical details of a resolved movie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: MovieId,
    pub title: String,
    pub genres: Vec<String>,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Response from GET /search/movie
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResponse {
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
}

/// One entry of a TMDB movie search
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub vote_count: u32,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub release_date: Option<String>,
}

impl From<TmdbMovie> for Candidate {
    fn from(movie: TmdbMovie) -> Self {
        Candidate {
            id: MovieId(movie.id),
            title: movie.title,
            vote_count: movie.vote_count,
            vote_average: movie.vote_average,
            // TMDB sends "" for unknown dates
            release_date: movie.release_date.filter(|d| !d.is_empty()),
        }
    }
}

/// Response from GET /movie/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub id: u64,
    pub name: String,
}

impl TryFrom<TmdbMovieDetails> for MovieDetails {
    type Error = AppError;

    fn try_from(details: TmdbMovieDetails) -> AppResult<Self> {
        let title = details.title.ok_or_else(|| {
            AppError::ExternalApi(format!("Movie {} response missing title", details.id))
        })?;

        Ok(MovieDetails {
            id: MovieId(details.id),
            title,
            genres: details.genres.into_iter().map(|g| g.name).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_rejects_blank_title() {
        assert!(matches!(
            Query::new("", None),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            Query::new("   ", None),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_query_release_year_from_hint() {
        let query = Query::new("Dune", Some("(2021) seen in IMAX".to_string())).unwrap();
        assert_eq!(query.release_year(), Some(2021));
    }

    #[test]
    fn test_query_release_year_ignores_bare_numbers() {
        let query = Query::new("Dune", Some("rewatched 2024".to_string())).unwrap();
        assert_eq!(query.release_year(), None);

        let query = Query::new("Dune", Some("(12345)".to_string())).unwrap();
        assert_eq!(query.release_year(), None);
    }

    #[test]
    fn test_query_blank_hint_is_none() {
        let query = Query::new("Dune", Some("  ".to_string())).unwrap();
        assert_eq!(query.hint(), None);
        assert_eq!(query.release_year(), None);
    }

    #[test]
    fn test_movie_id_display() {
        assert_eq!(format!("{}", MovieId(438631)), "438631");
    }

    #[test]
    fn test_tmdb_movie_to_candidate() {
        let json = r#"{
            "id": 438631,
            "title": "Dune",
            "vote_count": 12000,
            "vote_average": 7.8,
            "release_date": "2021-09-15",
            "popularity": 120.5
        }"#;

        let movie: TmdbMovie = serde_json::from_str(json).unwrap();
        let candidate = Candidate::from(movie);
        assert_eq!(candidate.id, MovieId(438631));
        assert_eq!(candidate.title, "Dune");
        assert_eq!(candidate.vote_count, 12000);
        assert_eq!(candidate.vote_average, 7.8);
        assert_eq!(candidate.release_date.as_deref(), Some("2021-09-15"));
    }

    #[test]
    fn test_tmdb_movie_missing_votes_defaults_to_zero() {
        let json = r#"{"id": 1, "title": "Obscure", "release_date": ""}"#;
        let candidate = Candidate::from(serde_json::from_str::<TmdbMovie>(json).unwrap());
        assert_eq!(candidate.vote_count, 0);
        assert_eq!(candidate.release_date, None);
    }

    #[test]
    fn test_tmdb_details_to_movie_details() {
        let json = r#"{
            "id": 438631,
            "title": "Dune",
            "genres": [{"id": 878, "name": "Science Fiction"}, {"id": 12, "name": "Adventure"}]
        }"#;

        let details: TmdbMovieDetails = serde_json::from_str(json).unwrap();
        let details = MovieDetails::try_from(details).unwrap();
        assert_eq!(details.title, "Dune");
        assert_eq!(details.genres, vec!["Science Fiction", "Adventure"]);
    }

    #[test]
    fn test_tmdb_details_missing_title() {
        let json = r#"{"id": 7, "genres": []}"#;
        let details: TmdbMovieDetails = serde_json::from_str(json).unwrap();
        let result = MovieDetails::try_from(details);
        assert!(matches!(result, Err(AppError::ExternalApi(_))));
    }

    #[test]
    fn test_match_result_accessors() {
        let resolved = MatchResult::Resolved(Candidate::new(1, "Up", 10));
        assert!(resolved.is_resolved());
        assert_eq!(resolved.candidate().map(|c| c.title.as_str()), Some("Up"));
        assert!(!MatchResult::Unresolved.is_resolved());
        assert!(MatchResult::Unresolved.candidate().is_none());
    }
}
