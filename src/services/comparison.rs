use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::{ComparedRating, CuratedRating, PopularRating},
    services::providers::MovieProvider,
};

/// Merges curated and provider ratings into rows for the plotting step
///
/// Rows follow the order of `popular`. Unresolved popular rows are skipped.
/// The provider's canonical title replaces the curated spelling, since
/// curated names are often abbreviated or misspelled.
pub async fn compare_ratings(
    provider: &dyn MovieProvider,
    curated: &[CuratedRating],
    popular: &[PopularRating],
) -> AppResult<Vec<ComparedRating>> {
    let curated_by_name: HashMap<&str, &CuratedRating> =
        curated.iter().map(|c| (c.name.trim(), c)).collect();

    let total = popular.len();
    let progress_every = (total / 10).max(1);
    let mut compared = Vec::with_capacity(total);

    for (index, row) in popular.iter().enumerate() {
        let (Some(popular_rating), Some(movie_id)) = (row.rating, row.movie_id) else {
            tracing::debug!(name = %row.name, "Skipping unresolved title");
            continue;
        };

        let curated_row = curated_by_name.get(row.name.trim()).ok_or_else(|| {
            AppError::NotFound(format!("No curated rating found for {}", row.name))
        })?;
        let curated_score = curated_row.score().ok_or_else(|| {
            AppError::InvalidInput(format!(
                "Unparseable curated rating {:?} for {}",
                curated_row.rating, row.name
            ))
        })?;

        let details = provider.movie_details(movie_id).await?;
        compared.push(ComparedRating::new(&details, popular_rating, curated_score));

        let processed = index + 1;
        if processed % progress_every == 0 {
            tracing::info!(processed, total, "Comparison progress");
        }
    }

    tracing::info!(
        compared = compared.len(),
        total,
        provider = provider.name(),
        "Completed comparing ratings"
    );

    Ok(compared)
}
