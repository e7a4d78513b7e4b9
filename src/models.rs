use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub title: String,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub votes: Option<u64>,
    pub genres: Vec<String>,
}

impl Film {
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub genre: Option<String>,
    pub year: Option<i32>,
}

impl FilterCriteria {
    pub fn is_unfiltered(&self) -> bool {
        self.genre.is_none() && self.year.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedFilm {
    pub title: String,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub votes: Option<u64>,
}

impl From<&Film> for RankedFilm {
    fn from(film: &Film) -> Self {
        Self {
            title: film.title.clone(),
            year: film.year,
            rating: film.rating,
            votes: film.votes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Selection {
    Empty,
    Matches {
        count: usize,
        average_rating: Option<f64>,
        top: Vec<RankedFilm>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub source_hash: String,
    pub rows_read: usize,
    pub rows_kept: usize,
    pub rows_dropped: usize,
    pub year_range: Option<(i32, i32)>,
}

#[derive(Debug, Clone)]
pub struct Dataset {
    pub films: Vec<Film>,
    pub summary: DatasetSummary,
}

pub fn observed_year_range(films: &[Film]) -> Option<(i32, i32)> {
    let mut years = films.iter().filter_map(|film| film.year);
    let first = years.next()?;
    Some(years.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y))))
}
