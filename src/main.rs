use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::Instrument;
use uuid::Uuid;

use reelmatch::{
    config::Config,
    models::{PopularRating, Query},
    services::{
        comparison::compare_ratings, BatchResolver, MovieProvider, TmdbProvider, TracingSink,
    },
    storage, AppError, AppResult,
};

/// Match curated movie ratings against TMDB
#[derive(Parser, Debug)]
#[command(name = "reelmatch", version)]
struct Cli {
    /// TMDB read access token, overrides TMDB_TOKEN
    #[arg(long, global = true)]
    tmdb_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve every curated title to a TMDB movie and record its rating
    Resolve {
        /// Curated ratings CSV (Name,Rating,Notes)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Popular ratings CSV to write
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Merge curated and popular ratings with canonical titles and genres
    Compare {
        #[arg(long)]
        curated: Option<PathBuf>,
        #[arg(long)]
        popular: Option<PathBuf>,
        /// Compared ratings CSV to write
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };
    let token = match config.require_token(cli.tmdb_token.clone()) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!(error = %e, "Missing credentials");
            std::process::exit(1);
        }
    };

    let provider = TmdbProvider::new(
        token,
        config.tmdb_api_url.clone(),
        config.tmdb_language.clone(),
    );

    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("run", run_id = %run_id);

    let result = match cli.command {
        Command::Resolve { input, output } => {
            resolve(
                &provider,
                &input.unwrap_or_else(|| config.curated_ratings_path.clone()),
                &output.unwrap_or_else(|| config.popular_ratings_path.clone()),
            )
            .instrument(span)
            .await
        }
        Command::Compare {
            curated,
            popular,
            output,
        } => {
            compare(
                &provider,
                &curated.unwrap_or_else(|| config.curated_ratings_path.clone()),
                &popular.unwrap_or_else(|| config.popular_ratings_path.clone()),
                &output.unwrap_or_else(|| config.compared_ratings_path.clone()),
            )
            .instrument(span)
            .await
        }
    };

    if let Err(e) = result {
        tracing::error!(run_id = %run_id, error = %e, "Run failed");
        std::process::exit(e.exit_code());
    }
}

async fn resolve(provider: &dyn MovieProvider, input: &Path, output: &Path) -> AppResult<()> {
    let queries = storage::read_curated_ratings(input)?
        .iter()
        .map(|row| row.to_query())
        .collect::<AppResult<Vec<Query>>>()?;

    let sink = TracingSink::new();
    let report = BatchResolver::new(provider, &sink).run(&queries).await?;

    tracing::info!(
        status = ?report.status(),
        resolved = report.resolved_count(),
        failed = report.state().failed_count(),
        duration_ms = (report.finished_at - report.started_at).num_milliseconds(),
        "Batch finished"
    );

    // Aborted batches leave the previous output untouched
    let rows: Vec<PopularRating> = report
        .into_resolutions()?
        .iter()
        .map(|r| PopularRating::from_match(r.query.title(), &r.result))
        .collect();

    storage::write_popular_ratings(output, &rows)
}

async fn compare(
    provider: &dyn MovieProvider,
    curated: &Path,
    popular: &Path,
    output: &Path,
) -> AppResult<()> {
    let curated_rows = storage::read_curated_ratings(curated)?;
    let popular_rows = storage::read_popular_ratings(popular)?;
    if popular_rows.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "No popular ratings found in {}",
            popular.display()
        )));
    }

    let compared = compare_ratings(provider, &curated_rows, &popular_rows).await?;
    storage::write_compared_ratings(output, &compared)
}
