use std::cmp::Ordering;

use regex::Regex;
use tracing::debug;

use crate::config::{MatchConfig, YearConfig};
use crate::models::Film;
use crate::vocabulary::{canonical_key, GenreVocabulary};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimilarityMetric {
    Levenshtein,
    JaroWinkler,
    SorensenDice,
}

impl SimilarityMetric {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "levenshtein" => Some(SimilarityMetric::Levenshtein),
            "jaro_winkler" | "jaro-winkler" => Some(SimilarityMetric::JaroWinkler),
            "sorensen_dice" | "sorensen-dice" | "dice" => Some(SimilarityMetric::SorensenDice),
            _ => None,
        }
    }

    pub fn score(self, a: &str, b: &str) -> f64 {
        match self {
            SimilarityMetric::Levenshtein => strsim::normalized_levenshtein(a, b),
            SimilarityMetric::JaroWinkler => strsim::jaro_winkler(a, b),
            SimilarityMetric::SorensenDice => strsim::sorensen_dice(a, b),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenreLookup {
    Skip,
    Resolved(String),
    Suggestions(Vec<String>),
    NotFound,
}

pub struct GenreResolver<'a> {
    vocabulary: &'a GenreVocabulary,
    matching: MatchConfig,
    separators: Regex,
}

impl<'a> GenreResolver<'a> {
    pub fn new(vocabulary: &'a GenreVocabulary, matching: MatchConfig) -> Self {
        Self {
            vocabulary,
            matching,
            separators: Regex::new(r"[,\s/]+").unwrap_or_else(|_| Regex::new("^$").unwrap()),
        }
    }

    pub fn resolve(&self, input: &str) -> GenreLookup {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return GenreLookup::Skip;
        }

        let key = canonical_key(trimmed);
        if let Some(genre) = self.vocabulary.representative(&key) {
            debug!(input = trimmed, genre, "genre resolved by canonical key");
            return GenreLookup::Resolved(genre.to_string());
        }

        for token in self.separators.split(trimmed) {
            if let Some(genre) = self.vocabulary.representative(&canonical_key(token)) {
                debug!(input = trimmed, token, genre, "genre resolved by token");
                return GenreLookup::Resolved(genre.to_string());
            }
        }

        let suggestions = self.suggest(&key);
        debug!(input = trimmed, ?suggestions, "genre unresolved");
        if suggestions.is_empty() {
            GenreLookup::NotFound
        } else {
            GenreLookup::Suggestions(suggestions)
        }
    }

    pub fn suggest(&self, key: &str) -> Vec<String> {
        if key.is_empty() || self.matching.max_suggestions == 0 {
            return Vec::new();
        }

        let mut scored: Vec<(f64, &str)> = self
            .vocabulary
            .keys()
            .map(|candidate| (self.matching.metric.score(key, candidate), candidate))
            .filter(|(score, _)| *score >= self.matching.cutoff)
            .collect();
        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(b.1))
        });

        scored
            .into_iter()
            .take(self.matching.max_suggestions)
            .filter_map(|(_, candidate)| self.vocabulary.representative(candidate))
            .map(str::to_string)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearBounds {
    pub lower: i32,
    pub upper: i32,
}

impl YearBounds {
    pub fn from_films(films: &[Film], policy: YearConfig) -> Self {
        let min = films.iter().filter_map(|f| f.year).min();
        let max = films.iter().filter_map(|f| f.year).max();
        Self {
            lower: min.map_or(policy.floor, |y| y.max(policy.floor)),
            upper: max.unwrap_or(policy.fallback_ceiling),
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.lower..=self.upper).contains(&year)
    }

    pub fn resolve(&self, input: &str) -> YearLookup {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return YearLookup::Skip;
        }
        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return YearLookup::NotANumber;
        }
        match trimmed.parse::<i32>() {
            Ok(year) if self.contains(year) => YearLookup::Valid(year),
            _ => YearLookup::OutOfRange,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearLookup {
    Skip,
    Valid(i32),
    NotANumber,
    OutOfRange,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> GenreVocabulary {
        GenreVocabulary::from_genres([
            "Action", "Comedy", "Crime", "Drama", "Film-Noir", "Sci-Fi", "Thriller", "War",
        ])
    }

    fn film(year: Option<i32>) -> Film {
        Film {
            title: "t".to_string(),
            year,
            rating: None,
            votes: None,
            genres: vec![],
        }
    }

    #[test]
    fn blank_input_skips() {
        let vocab = vocab();
        let resolver = GenreResolver::new(&vocab, MatchConfig::default());
        assert_eq!(resolver.resolve(""), GenreLookup::Skip);
        assert_eq!(resolver.resolve("   \t"), GenreLookup::Skip);
    }

    #[test]
    fn canonical_match_ignores_spelling() {
        let vocab = vocab();
        let resolver = GenreResolver::new(&vocab, MatchConfig::default());
        assert_eq!(
            resolver.resolve("sci fi"),
            GenreLookup::Resolved("Sci-Fi".to_string())
        );
        assert_eq!(
            resolver.resolve("FILM NOIR"),
            GenreLookup::Resolved("Film-Noir".to_string())
        );
    }

    #[test]
    fn every_known_genre_resolves_to_itself() {
        let vocab = vocab();
        let resolver = GenreResolver::new(&vocab, MatchConfig::default());
        for genre in vocab.keys().filter_map(|k| vocab.representative(k)) {
            assert_eq!(resolver.resolve(genre), GenreLookup::Resolved(genre.to_string()));
        }
    }

    #[test]
    fn compound_input_falls_back_to_first_known_token() {
        let vocab = vocab();
        let resolver = GenreResolver::new(&vocab, MatchConfig::default());
        assert_eq!(
            resolver.resolve("Crime Thriller"),
            GenreLookup::Resolved("Crime".to_string())
        );
        assert_eq!(
            resolver.resolve("space/war"),
            GenreLookup::Resolved("War".to_string())
        );
        assert_eq!(
            resolver.resolve("dark, comedy"),
            GenreLookup::Resolved("Comedy".to_string())
        );
    }

    #[test]
    fn typo_yields_suggestions_not_a_match() {
        let vocab = vocab();
        let resolver = GenreResolver::new(&vocab, MatchConfig::default());
        match resolver.resolve("dramma") {
            GenreLookup::Suggestions(s) => assert_eq!(s[0], "Drama"),
            other => panic!("expected suggestions, got {other:?}"),
        }
    }

    #[test]
    fn suggestions_are_capped() {
        let vocab =
            GenreVocabulary::from_genres(["Genre E", "Genre D", "Genre C", "Genre B", "Genre A"]);
        let resolver = GenreResolver::new(&vocab, MatchConfig::default());
        match resolver.resolve("genrex") {
            GenreLookup::Suggestions(s) => assert_eq!(s, vec!["Genre A", "Genre B", "Genre C"]),
            other => panic!("expected suggestions, got {other:?}"),
        }
    }

    #[test]
    fn nonsense_is_not_found() {
        let vocab = vocab();
        let resolver = GenreResolver::new(&vocab, MatchConfig::default());
        assert_eq!(resolver.resolve("zzz"), GenreLookup::NotFound);
        assert_eq!(resolver.resolve("!!!"), GenreLookup::NotFound);
    }

    #[test]
    fn metric_names_parse() {
        assert_eq!(
            SimilarityMetric::parse("Jaro-Winkler"),
            Some(SimilarityMetric::JaroWinkler)
        );
        assert_eq!(SimilarityMetric::parse("soundex"), None);
        assert!((SimilarityMetric::SorensenDice.score("drama", "drama") - 1.0).abs() < 1e-9);
    }

    #[test]
    fn year_bounds_follow_data_with_floor() {
        let films = vec![film(Some(1921)), film(None), film(Some(2020))];
        let bounds = YearBounds::from_films(&films, YearConfig::default());
        assert_eq!(bounds, YearBounds { lower: 1921, upper: 2020 });

        let early = vec![film(Some(1895)), film(Some(1950))];
        assert_eq!(YearBounds::from_films(&early, YearConfig::default()).lower, 1900);

        let none = YearBounds::from_films(&[film(None)], YearConfig::default());
        assert_eq!(none, YearBounds { lower: 1900, upper: 2100 });
    }

    #[test]
    fn year_input_is_validated() {
        let bounds = YearBounds { lower: 1920, upper: 2020 };
        assert_eq!(bounds.resolve(""), YearLookup::Skip);
        assert_eq!(bounds.resolve(" 1994 "), YearLookup::Valid(1994));
        assert_eq!(bounds.resolve("1920"), YearLookup::Valid(1920));
        assert_eq!(bounds.resolve("2021"), YearLookup::OutOfRange);
        assert_eq!(bounds.resolve("99999999999"), YearLookup::OutOfRange);
        assert_eq!(bounds.resolve("-1994"), YearLookup::NotANumber);
        assert_eq!(bounds.resolve("19x4"), YearLookup::NotANumber);
        assert_eq!(bounds.resolve("1994.0"), YearLookup::NotANumber);
    }
}
