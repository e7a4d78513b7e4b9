pub mod table;

use std::path::Path;

use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{AppConfig, DropPolicy};
use crate::models::{observed_year_range, Dataset, DatasetSummary, Film};
use table::{RawRecord, TableError};

#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed reading dataset {origin}: {source}")]
    Unreadable {
        origin: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV in {origin}: {source}")]
    Malformed {
        origin: String,
        #[source]
        source: csv::Error,
    },
    #[error("dataset {origin} has no column named '{column}'")]
    MissingColumn { origin: String, column: String },
    #[error("dataset {origin} has no data rows")]
    Empty { origin: String },
    #[error("all {rows_read} rows of {origin} were dropped as incomplete")]
    NothingUsable { origin: String, rows_read: usize },
}

pub fn load_dataset(path: &Path, config: &AppConfig) -> Result<Dataset, DataLoadError> {
    let origin = path.display().to_string();
    let bytes = std::fs::read(path).map_err(|source| DataLoadError::Unreadable {
        origin: origin.clone(),
        source,
    })?;
    parse_dataset(&bytes, &origin, config)
}

pub fn parse_dataset(bytes: &[u8], origin: &str, config: &AppConfig) -> Result<Dataset, DataLoadError> {
    let records = table::read_records(bytes, &config.columns).map_err(|err| match err {
        TableError::Csv(source) => DataLoadError::Malformed {
            origin: origin.to_string(),
            source,
        },
        TableError::MissingColumn(column) => DataLoadError::MissingColumn {
            origin: origin.to_string(),
            column,
        },
    })?;

    let rows_read = records.len();
    if rows_read == 0 {
        return Err(DataLoadError::Empty {
            origin: origin.to_string(),
        });
    }

    let films = clean_records(records, config.drop_policy);
    let rows_dropped = rows_read - films.len();
    if films.is_empty() {
        return Err(DataLoadError::NothingUsable {
            origin: origin.to_string(),
            rows_read,
        });
    }

    if rows_dropped > 0 {
        warn!(
            policy = ?config.drop_policy,
            rows_dropped,
            rows_read,
            "dropped incomplete rows from {}",
            origin
        );
    }

    let summary = DatasetSummary {
        source_hash: sha256_hex(bytes),
        rows_read,
        rows_kept: films.len(),
        rows_dropped,
        year_range: observed_year_range(&films),
    };
    info!(
        rows_kept = summary.rows_kept,
        year_range = ?summary.year_range,
        "loaded dataset {}",
        origin
    );

    Ok(Dataset { films, summary })
}

// A value that fails coercion becomes None; the row itself is kept.
pub fn clean_records(records: Vec<RawRecord>, policy: DropPolicy) -> Vec<Film> {
    records
        .into_iter()
        .filter(|record| match policy {
            DropPolicy::AnyColumn => record.blank_cells == 0 && !record.missing_required(),
            DropPolicy::RequiredColumns => !record.missing_required(),
        })
        .map(|record| Film {
            title: record.title.unwrap_or_default(),
            year: record.year.as_deref().and_then(parse_year),
            rating: record.rating.as_deref().and_then(parse_rating),
            votes: record.votes.as_deref().and_then(parse_votes),
            genres: normalize_genres(record.genre.as_deref()),
        })
        .collect()
}

pub fn normalize_genres(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    raw.split(',')
        .map(|token| title_case(token.trim()))
        .filter(|token| !token.is_empty())
        .collect()
}

// sci-fi -> Sci-Fi, 3d -> 3D: a letter is upper-cased only after a non-letter.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_letter = true;
        } else {
            out.push(c);
            prev_letter = false;
        }
    }
    out
}

fn parse_integral(value: &str) -> Option<f64> {
    let parsed = value.trim().parse::<f64>().ok()?;
    (parsed.is_finite() && parsed.fract() == 0.0).then_some(parsed)
}

fn parse_year(value: &str) -> Option<i32> {
    let trimmed = value.trim();
    trimmed.parse::<i32>().ok().or_else(|| {
        parse_integral(trimmed)
            .filter(|v| *v >= i32::MIN as f64 && *v <= i32::MAX as f64)
            .map(|v| v as i32)
    })
}

fn parse_rating(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_votes(value: &str) -> Option<u64> {
    let trimmed = value.trim();
    trimmed.parse::<u64>().ok().or_else(|| {
        parse_integral(trimmed)
            .filter(|v| *v >= 0.0 && *v <= u64::MAX as f64)
            .map(|v| v as u64)
    })
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
