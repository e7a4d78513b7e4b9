use std::io::Read;

use crate::config::ColumnConfig;

const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub fn is_missing(value: &str) -> bool {
    NA_TOKENS.contains(&value.trim())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    pub title: Option<String>,
    pub year: Option<String>,
    pub rating: Option<String>,
    pub votes: Option<String>,
    pub genre: Option<String>,
    pub blank_cells: usize,
}

impl RawRecord {
    pub fn missing_required(&self) -> bool {
        self.title.is_none()
            || self.year.is_none()
            || self.rating.is_none()
            || self.votes.is_none()
            || self.genre.is_none()
    }
}

#[derive(Debug)]
pub enum TableError {
    Csv(csv::Error),
    MissingColumn(String),
}

impl From<csv::Error> for TableError {
    fn from(err: csv::Error) -> Self {
        TableError::Csv(err)
    }
}

struct ColumnIndexes {
    title: usize,
    year: usize,
    rating: usize,
    votes: usize,
    genre: usize,
}

pub fn read_records<R: Read>(input: R, columns: &ColumnConfig) -> Result<Vec<RawRecord>, TableError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let position = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    };
    let idx = ColumnIndexes {
        title: position(&columns.title)?,
        year: position(&columns.year)?,
        rating: position(&columns.rating)?,
        votes: position(&columns.votes)?,
        genre: position(&columns.genre)?,
    };
    let width = headers.len();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let cell = |i: usize| {
            row.get(i)
                .filter(|v| !is_missing(v))
                .map(|v| v.trim().to_string())
        };

        // Short rows count their absent trailing cells as blank.
        let present_blank = row.iter().take(width).filter(|v| is_missing(v)).count();
        let absent = width.saturating_sub(row.len());

        records.push(RawRecord {
            title: cell(idx.title),
            year: cell(idx.year),
            rating: cell(idx.rating),
            votes: cell(idx.votes),
            genre: cell(idx.genre),
            blank_cells: present_blank + absent,
        });
    }

    Ok(records)
}
