use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API read access token (v4 bearer token)
    #[serde(default)]
    pub tmdb_token: Option<String>,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Language passed to TMDB search and detail lookups
    #[serde(default = "default_tmdb_language")]
    pub tmdb_language: String,

    /// Scraped curated ratings (`Name,Rating,Notes`)
    #[serde(default = "default_curated_ratings_path")]
    pub curated_ratings_path: PathBuf,

    /// Resolved provider ratings (`Name,Rating,TMDB ID,Votes`)
    #[serde(default = "default_popular_ratings_path")]
    pub popular_ratings_path: PathBuf,

    /// Merged output consumed by the plotting step
    #[serde(default = "default_compared_ratings_path")]
    pub compared_ratings_path: PathBuf,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_language() -> String {
    "en-US".to_string()
}

fn default_curated_ratings_path() -> PathBuf {
    PathBuf::from("data/curated_ratings.csv")
}

fn default_popular_ratings_path() -> PathBuf {
    PathBuf::from("data/popular_ratings.csv")
}

fn default_compared_ratings_path() -> PathBuf {
    PathBuf::from("data/compared_ratings.csv")
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Resolves the TMDB token, preferring an explicit override
    pub fn require_token(&self, override_token: Option<String>) -> anyhow::Result<String> {
        override_token
            .or_else(|| self.tmdb_token.clone())
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("TMDB token not provided (set TMDB_TOKEN or pass --tmdb-token)"))
    }
}
