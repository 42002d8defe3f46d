use crate::{
    error::AppResult,
    models::{Candidate, MovieDetails, MovieId},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
///
/// Providers supply ranked search candidates for a title and canonical
/// details for a resolved id. Candidate order must reflect the provider's
/// own ranking, since the selector breaks ties by position.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieProvider: Send + Sync {
    /// Search for movies by title, optionally narrowed to a release year
    async fn search_movies(&self, title: &str, year: Option<u16>) -> AppResult<Vec<Candidate>>;

    /// Fetch canonical title and genres for a movie
    async fn movie_details(&self, id: MovieId) -> AppResult<MovieDetails>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
