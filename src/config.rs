use std::env;
use std::path::PathBuf;

use crate::ranking::DEFAULT_TOP_N;
use crate::resolver::SimilarityMetric;

#[derive(Clone, Debug)]
pub struct ColumnConfig {
    pub title: String,
    pub year: String,
    pub rating: String,
    pub votes: String,
    pub genre: String,
}

impl ColumnConfig {
    pub fn required(&self) -> [&str; 5] {
        [
            self.title.as_str(),
            self.year.as_str(),
            self.rating.as_str(),
            self.votes.as_str(),
            self.genre.as_str(),
        ]
    }
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            title: "Series_Title".to_string(),
            year: "Released_Year".to_string(),
            rating: "IMDB_Rating".to_string(),
            votes: "No_of_Votes".to_string(),
            genre: "Genre".to_string(),
        }
    }
}

// AnyColumn drops a row for a blank cell in any column, used by the report or not.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropPolicy {
    AnyColumn,
    RequiredColumns,
}

impl DropPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "any" | "any_column" | "all" => Some(DropPolicy::AnyColumn),
            "required" | "required_columns" => Some(DropPolicy::RequiredColumns),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MatchConfig {
    pub cutoff: f64,
    pub max_suggestions: usize,
    pub metric: SimilarityMetric,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            cutoff: 0.6,
            max_suggestions: 3,
            metric: SimilarityMetric::Levenshtein,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct YearConfig {
    pub floor: i32,
    pub fallback_ceiling: i32,
}

impl Default for YearConfig {
    fn default() -> Self {
        Self {
            floor: 1900,
            fallback_ceiling: 2100,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub columns: ColumnConfig,
    pub drop_policy: DropPolicy,
    pub matching: MatchConfig,
    pub years: YearConfig,
    pub top_n: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/imdb_top_1000.csv"),
            columns: ColumnConfig::default(),
            drop_policy: DropPolicy::AnyColumn,
            matching: MatchConfig::default(),
            years: YearConfig::default(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            data_path: env::var("MOVIE_INSIGHTS_DATA")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            columns: ColumnConfig {
                title: env::var("MOVIE_INSIGHTS_COL_TITLE").unwrap_or(defaults.columns.title),
                year: env::var("MOVIE_INSIGHTS_COL_YEAR").unwrap_or(defaults.columns.year),
                rating: env::var("MOVIE_INSIGHTS_COL_RATING").unwrap_or(defaults.columns.rating),
                votes: env::var("MOVIE_INSIGHTS_COL_VOTES").unwrap_or(defaults.columns.votes),
                genre: env::var("MOVIE_INSIGHTS_COL_GENRE").unwrap_or(defaults.columns.genre),
            },
            drop_policy: env::var("MOVIE_INSIGHTS_DROP_POLICY")
                .ok()
                .and_then(|v| DropPolicy::parse(&v))
                .unwrap_or(defaults.drop_policy),
            matching: MatchConfig {
                cutoff: env::var("MOVIE_INSIGHTS_FUZZY_CUTOFF")
                    .ok()
                    .and_then(|v| v.parse::<f64>().ok())
                    .filter(|v| (0.0..=1.0).contains(v))
                    .unwrap_or(defaults.matching.cutoff),
                max_suggestions: env::var("MOVIE_INSIGHTS_MAX_SUGGESTIONS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.matching.max_suggestions),
                metric: env::var("MOVIE_INSIGHTS_SIMILARITY")
                    .ok()
                    .and_then(|v| SimilarityMetric::parse(&v))
                    .unwrap_or(defaults.matching.metric),
            },
            years: YearConfig {
                floor: env::var("MOVIE_INSIGHTS_YEAR_FLOOR")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.years.floor),
                fallback_ceiling: env::var("MOVIE_INSIGHTS_YEAR_CEILING")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(defaults.years.fallback_ceiling),
            },
            top_n: env::var("MOVIE_INSIGHTS_TOP_N")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|n: &usize| *n > 0)
                .unwrap_or(defaults.top_n),
        }
    }
}
