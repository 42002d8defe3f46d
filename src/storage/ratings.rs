use serde::{de::DeserializeOwned, Serialize};
use std::{fs, path::Path};

use crate::{
    error::AppResult,
    models::{ComparedRating, CuratedRating, PopularRating},
};

/// Reads every row of a headed CSV table
///
/// Rows shorter than the header are padded with empty fields, so a scraped
/// row that stops after its rating still reads with empty notes.
fn read_rows<T: DeserializeOwned>(path: &Path) -> AppResult<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut rows: Vec<T> = Vec::new();
    for record in reader.records() {
        let mut record = record?;
        while record.len() < headers.len() {
            record.push_field("");
        }
        rows.push(record.deserialize(Some(&headers))?);
    }

    tracing::debug!(path = %path.display(), rows = rows.len(), "Read rating table");
    Ok(rows)
}

/// Writes a headed CSV table, creating parent directories as needed
fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> AppResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    tracing::info!(path = %path.display(), rows = rows.len(), "Wrote rating table");
    Ok(())
}

/// Reads the scraped curated table (`Name,Rating,Notes`)
pub fn read_curated_ratings(path: &Path) -> AppResult<Vec<CuratedRating>> {
    read_rows(path)
}

/// Reads the resolved provider table (`Name,Rating,TMDB ID,Votes`)
pub fn read_popular_ratings(path: &Path) -> AppResult<Vec<PopularRating>> {
    read_rows(path)
}

pub fn write_popular_ratings(path: &Path, rows: &[PopularRating]) -> AppResult<()> {
    write_rows(path, rows)
}

pub fn write_compared_ratings(path: &Path, rows: &[ComparedRating]) -> AppResult<()> {
    write_rows(path, rows)
}
