/// The Movie Database (TMDB) provider
///
/// API Flow:
/// 1. Title Search: /search/movie → ranked movies with vote counts and averages
/// 2. Details: /movie/{id} → canonical title and genres
///
/// Authenticates with a v4 read access token sent as a bearer token.
use crate::{
    error::{AppError, AppResult},
    models::{Candidate, MovieDetails, MovieId, TmdbMovieDetails, TmdbSearchResponse},
    services::providers::MovieProvider,
};
use reqwest::{Client as HttpClient, RequestBuilder, Response};

const PROVIDER_NAME: &str = "tmdb";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    token: String,
    api_url: String,
    language: String,
}

impl TmdbProvider {
    pub fn new(token: String, api_url: String, language: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            token,
            api_url: api_url.trim_end_matches('/').to_string(),
            language,
        }
    }

    /// Query parameters for a title search
    fn search_params(&self, title: &str, year: Option<u16>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("query", title.to_string()),
            ("include_adult", "false".to_string()),
            ("language", self.language.clone()),
            ("page", "1".to_string()),
        ];
        if let Some(year) = year {
            params.push(("primary_release_year", year.to_string()));
        }
        params
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
    }

    async fn ensure_success(response: Response) -> AppResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::ExternalApi(format!(
            "TMDB API returned status {}: {}",
            status, body
        )))
    }

    fn parse_search_response(body: &str) -> AppResult<Vec<Candidate>> {
        let response: TmdbSearchResponse = serde_json::from_str(body).map_err(|e| {
            tracing::error!(error = %e, response = %body, "Failed to deserialize TMDB search response");
            AppError::ExternalApi(format!("Failed to parse TMDB search response: {}", e))
        })?;
        Ok(response.results.into_iter().map(Candidate::from).collect())
    }

    fn parse_details_response(body: &str) -> AppResult<MovieDetails> {
        let details: TmdbMovieDetails = serde_json::from_str(body).map_err(|e| {
            tracing::error!(error = %e, response = %body, "Failed to deserialize TMDB details response");
            AppError::ExternalApi(format!("Failed to parse TMDB details response: {}", e))
        })?;
        MovieDetails::try_from(details)
    }
}

#[async_trait::async_trait]
impl MovieProvider for TmdbProvider {
    async fn search_movies(&self, title: &str, year: Option<u16>) -> AppResult<Vec<Candidate>> {
        if title.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let url = format!("{}/search/movie", self.api_url);
        let response = self
            .authorized(self.http_client.get(&url))
            .query(&self.search_params(title, year))
            .send()
            .await?;
        let body = Self::ensure_success(response).await?.text().await?;
        let candidates = Self::parse_search_response(&body)?;

        tracing::debug!(
            query = %title,
            year = ?year,
            results = candidates.len(),
            provider = PROVIDER_NAME,
            "Title search completed"
        );

        Ok(candidates)
    }

    async fn movie_details(&self, id: MovieId) -> AppResult<MovieDetails> {
        let url = format!("{}/movie/{}", self.api_url, id);
        let response = self
            .authorized(self.http_client.get(&url))
            .query(&[("language", self.language.as_str())])
            .send()
            .await?;
        let body = Self::ensure_success(response).await?.text().await?;
        let details = Self::parse_details_response(&body)?;

        tracing::debug!(
            movie_id = %id,
            genres = details.genres.len(),
            provider = PROVIDER_NAME,
            "Movie details fetched"
        );

        Ok(details)
    }

    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
