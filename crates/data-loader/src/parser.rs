//! Parser for the movie dataset CSV.
//!
//! The dataset is the IMDB top-1000 export with TMDB columns joined on:
//! `Series_Title,Released_Year,Certificate,Runtime,Genre,IMDB_Rating,Overview,
//! Meta_score,Director,Star1,...,No_of_Votes,Gross,tmdb_runtime,...`
//!
//! Column names are a contract: the required ones are checked against the
//! header row before any record is read. Optional columns may be missing
//! entirely.

use crate::error::{DataLoadError, Result};
use crate::types::{Movie, TmdbMetadata};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Columns the loader refuses to run without
pub const REQUIRED_COLUMNS: &[&str] = &[
    "Series_Title",
    "Released_Year",
    "Runtime",
    "Genre",
    "IMDB_Rating",
    "Director",
    "Star1",
];

/// One CSV row as it appears on disk.
///
/// Numeric columns are read as text because the source is dirty
/// ("142 min", "28,341,469", a stray "PG" in the year column) and are
/// cleaned in `into_movie`.
#[derive(Debug, Deserialize)]
struct MovieRecord {
    #[serde(rename = "Series_Title")]
    title: String,
    #[serde(rename = "Released_Year", default)]
    year: Option<String>,
    #[serde(rename = "Certificate", default)]
    certificate: Option<String>,
    #[serde(rename = "Runtime", default)]
    runtime: Option<String>,
    #[serde(rename = "Genre", default)]
    genre: Option<String>,
    #[serde(rename = "IMDB_Rating", default)]
    rating: Option<String>,
    #[serde(rename = "Overview", default)]
    overview: Option<String>,
    #[serde(rename = "Meta_score", default)]
    meta_score: Option<String>,
    #[serde(rename = "Director", default)]
    director: Option<String>,
    #[serde(rename = "Star1", default)]
    star: Option<String>,
    #[serde(rename = "No_of_Votes", default)]
    votes: Option<String>,
    #[serde(rename = "Gross", default)]
    gross: Option<String>,
    #[serde(rename = "tmdb_runtime", default)]
    tmdb_runtime: Option<String>,
    #[serde(rename = "tmdb_revenue", default)]
    tmdb_revenue: Option<String>,
    #[serde(rename = "tmdb_budget", default)]
    tmdb_budget: Option<String>,
    #[serde(rename = "tmdb_original_language", default)]
    tmdb_original_language: Option<String>,
    #[serde(rename = "tmdb_popularity", default)]
    tmdb_popularity: Option<String>,
    #[serde(rename = "tmdb_genres", default)]
    tmdb_genres: Option<String>,
}

impl MovieRecord {
    fn into_movie(self, file: &str, line: u64) -> Result<Movie> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(DataLoadError::ParseError {
                file: file.to_string(),
                line,
                reason: "Missing Series_Title".to_string(),
            });
        }

        let runtime = self.runtime.as_deref().and_then(clean_runtime);
        let tmdb_runtime = self.tmdb_runtime.as_deref().and_then(parse_float_minutes);

        Ok(Movie {
            year: self.year.as_deref().and_then(parse_year),
            certificate: non_empty(self.certificate),
            // Fall back to TMDB's runtime when the IMDB one is unusable
            runtime: runtime.or(tmdb_runtime),
            genre: self.genre.unwrap_or_default(),
            rating: parse_float("IMDB_Rating", self.rating.as_deref())?,
            overview: non_empty(self.overview),
            meta_score: parse_float("Meta_score", self.meta_score.as_deref())?,
            director: self.director.unwrap_or_default(),
            star: self.star.unwrap_or_default(),
            votes: self.votes.as_deref().and_then(parse_count),
            gross: self.gross.as_deref().and_then(parse_count),
            tmdb: TmdbMetadata {
                runtime: tmdb_runtime,
                revenue: parse_float("tmdb_revenue", self.tmdb_revenue.as_deref())?,
                budget: parse_float("tmdb_budget", self.tmdb_budget.as_deref())?,
                original_language: non_empty(self.tmdb_original_language),
                popularity: parse_float("tmdb_popularity", self.tmdb_popularity.as_deref())?,
                genres: non_empty(self.tmdb_genres),
            },
            title,
        })
    }
}

/// Parse the movie CSV file into movies, in file order
pub fn parse_movies(path: &Path) -> Result<Vec<Movie>> {
    let file = path.display().to_string();
    if !path.is_file() {
        return Err(DataLoadError::FileNotFound { path: file });
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    check_required_columns(&headers, &file)?;

    let mut movies = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let raw: MovieRecord =
            record
                .deserialize(Some(&headers))
                .map_err(|e| DataLoadError::ParseError {
                    file: file.clone(),
                    line,
                    reason: e.to_string(),
                })?;

        movies.push(raw.into_movie(&file, line)?);
    }

    debug!("Parsed {} movie records from {}", movies.len(), file);
    Ok(movies)
}

/// Fail fast if any required column is absent from the header row
pub fn check_required_columns(headers: &csv::StringRecord, file: &str) -> Result<()> {
    for &column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataLoadError::MissingColumn {
                file: file.to_string(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

/// Strip every non-digit from a runtime value and parse the rest
///
/// Example: "142 min" -> Some(142)
///          "N/A"     -> None
pub fn clean_runtime(raw: &str) -> Option<u32> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    digits.parse().ok()
}

/// TMDB stores runtime as a float ("142.0")
fn parse_float_minutes(raw: &str) -> Option<u32> {
    let minutes: f64 = raw.trim().parse().ok()?;
    if minutes.is_finite() && minutes > 0.0 {
        Some(minutes.round() as u32)
    } else {
        None
    }
}

/// Parse a release year; anything that isn't an integer counts as missing
fn parse_year(raw: &str) -> Option<i32> {
    match raw.trim().parse() {
        Ok(year) => Some(year),
        Err(_) => {
            debug!("Ignoring non-numeric release year '{}'", raw);
            None
        }
    }
}

/// Parse a count that may carry thousands separators
///
/// Example: "28,341,469" -> Some(28341469)
fn parse_count(raw: &str) -> Option<u64> {
    let digits: String = raw.chars().filter(|c| *c != ',').collect();
    digits.trim().parse().ok()
}

fn parse_float<T: std::str::FromStr>(field: &str, raw: Option<&str>) -> Result<Option<T>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| DataLoadError::InvalidValue {
                field: field.to_string(),
                value: value.to_string(),
            }),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
