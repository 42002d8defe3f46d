use std::{collections::HashMap, fs, sync::Mutex};

use reelmatch::{
    models::{Candidate, MovieDetails, MovieId, PopularRating, Query},
    services::{
        comparison::compare_ratings, BatchResolver, BatchStatus, MovieProvider, NoopSink,
    },
    storage, AppError, AppResult,
};
use tempfile::tempdir;

/// Provider backed by canned search results, recording every search it serves
#[derive(Default)]
struct InMemoryProvider {
    searches: HashMap<String, Vec<Candidate>>,
    details: HashMap<MovieId, MovieDetails>,
    served: Mutex<Vec<(String, Option<u16>)>>,
}

impl InMemoryProvider {
    fn with_search(mut self, title: &str, candidates: Vec<Candidate>) -> Self {
        self.searches.insert(title.to_string(), candidates);
        self
    }

    fn with_details(mut self, id: u64, title: &str, genres: &[&str]) -> Self {
        self.details.insert(
            MovieId(id),
            MovieDetails {
                id: MovieId(id),
                title: title.to_string(),
                genres: genres.iter().map(|g| g.to_string()).collect(),
            },
        );
        self
    }

    fn served(&self) -> Vec<(String, Option<u16>)> {
        self.served.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl MovieProvider for InMemoryProvider {
    async fn search_movies(&self, title: &str, year: Option<u16>) -> AppResult<Vec<Candidate>> {
        self.served.lock().unwrap().push((title.to_string(), year));
        Ok(self.searches.get(title).cloned().unwrap_or_default())
    }

    async fn movie_details(&self, id: MovieId) -> AppResult<MovieDetails> {
        self.details
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("movie {}", id)))
    }

    fn name(&self) -> &'static str {
        "in_memory"
    }
}

fn library_provider() -> InMemoryProvider {
    InMemoryProvider::default()
        .with_search(
            "Shang-Chi",
            vec![Candidate::new(
                566525,
                "Shang-Chi and the Legend of the Ten Rings",
                9000,
            )
            .with_vote_average(7.5)],
        )
        .with_search(
            "Dune",
            vec![
                Candidate::new(841, "Dune", 3000).with_vote_average(6.2),
                Candidate::new(999, "Dune Drifter", 0),
            ],
        )
        .with_search(
            "The Matirx",
            vec![
                Candidate::new(603, "The Matrix", 25000).with_vote_average(8.2),
                Candidate::new(604, "The Matrix Reloaded", 10000).with_vote_average(7.0),
            ],
        )
        .with_details(
            566525,
            "Shang-Chi and the Legend of the Ten Rings",
            &["Action", "Adventure", "Fantasy"],
        )
        .with_details(841, "Dune", &["Science Fiction"])
        .with_details(603, "The Matrix", &["Action", "Science Fiction"])
}

#[tokio::test]
async fn test_resolve_then_compare_round_trip() {
    let dir = tempdir().unwrap();
    let curated_path = dir.path().join("curated.csv");
    let popular_path = dir.path().join("popular.csv");
    let compared_path = dir.path().join("compared.csv");

    let mut curated_csv = String::from("Name,Rating,Notes\n");
    curated_csv.push_str("Shang-Chi,8/10,\n");
    curated_csv.push_str("Dune,7/10,(1984)\n");
    curated_csv.push_str("The Matirx,10/10,\n");
    // Pad to a batch where one unresolved title stays under the threshold
    for i in 0..17 {
        curated_csv.push_str(&format!("Filler {i},5/10,\n"));
    }
    fs::write(&curated_path, curated_csv).unwrap();

    let mut provider = library_provider();
    for i in 0..17 {
        let title = format!("Filler {i}");
        provider = provider.with_search(&title, vec![Candidate::new(10_000 + i, &title, 1)]);
        provider = provider.with_details(10_000 + i, &title, &["Drama"]);
    }
    let provider = provider.with_search("Filler 16", vec![]);

    let curated = storage::read_curated_ratings(&curated_path).unwrap();
    let queries: Vec<Query> = curated.iter().map(|r| r.to_query().unwrap()).collect();

    let report = BatchResolver::new(&provider, &NoopSink)
        .run(&queries)
        .await
        .unwrap();
    assert_eq!(report.status(), BatchStatus::Completed);
    assert_eq!(report.resolved_count(), 19);
    assert_eq!(provider.served()[1], ("Dune".to_string(), Some(1984)));

    let rows: Vec<PopularRating> = report
        .into_resolutions()
        .unwrap()
        .iter()
        .map(|r| PopularRating::from_match(r.query.title(), &r.result))
        .collect();
    storage::write_popular_ratings(&popular_path, &rows).unwrap();

    let popular = storage::read_popular_ratings(&popular_path).unwrap();
    assert_eq!(popular[0].movie_id, Some(MovieId(566525)));
    assert_eq!(popular[1].movie_id, Some(MovieId(841)));
    assert_eq!(popular[2].movie_id, Some(MovieId(603)));
    assert!(!popular[19].is_resolved());

    let compared = compare_ratings(&provider, &curated, &popular).await.unwrap();
    storage::write_compared_ratings(&compared_path, &compared).unwrap();

    assert_eq!(compared.len(), 19);
    assert_eq!(compared[0].title, "Shang-Chi and the Legend of the Ten Rings");
    assert_eq!(compared[0].genres, "Action; Adventure; Fantasy");
    assert_eq!(compared[2].title, "The Matrix");
    assert_eq!(compared[2].curated_rating, 10);

    let written = fs::read_to_string(&compared_path).unwrap();
    assert!(written.starts_with("Title,Popular Rating,Curated Rating,Genres\n"));
}

#[tokio::test]
async fn test_aborted_batch_stops_issuing_searches() {
    let provider = InMemoryProvider::default();
    let queries: Vec<Query> = (1..=20)
        .map(|i| Query::new(format!("Unknown {i}"), None).unwrap())
        .collect();

    let report = BatchResolver::new(&provider, &NoopSink)
        .run(&queries)
        .await
        .unwrap();

    assert_eq!(report.status(), BatchStatus::Aborted);
    let served = provider.served();
    assert_eq!(served.len(), 2);
    assert!(served.iter().all(|(title, _)| title != "Unknown 4"));
    assert!(matches!(
        report.into_resolutions(),
        Err(AppError::BatchAborted {
            failed: 2,
            total: 20
        })
    ));
}
