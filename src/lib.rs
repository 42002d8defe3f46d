//! Resolves hand-curated movie titles against a metadata provider and merges
//! the two sets of ratings.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{AppError, AppResult};
