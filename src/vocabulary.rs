use std::collections::{BTreeMap, BTreeSet};

use crate::models::Film;

pub fn canonical_key(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct GenreVocabulary {
    representatives: BTreeMap<String, String>,
    display: BTreeSet<String>,
}

impl GenreVocabulary {
    pub fn build(films: &[Film]) -> Self {
        let display: BTreeSet<String> = films
            .iter()
            .flat_map(|film| film.genres.iter().cloned())
            .collect();

        // BTreeSet iterates in sorted order, so the lexicographically
        // smallest spelling claims each key.
        let mut representatives = BTreeMap::new();
        for genre in &display {
            let key = canonical_key(genre);
            if key.is_empty() {
                continue;
            }
            representatives.entry(key).or_insert_with(|| genre.clone());
        }

        Self {
            representatives,
            display,
        }
    }

    pub fn from_genres<I, S>(genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let film = Film {
            title: String::new(),
            year: None,
            rating: None,
            votes: None,
            genres: genres.into_iter().map(Into::into).collect(),
        };
        Self::build(std::slice::from_ref(&film))
    }

    pub fn representative(&self, key: &str) -> Option<&str> {
        self.representatives.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.representatives.keys().map(String::as_str)
    }

    pub fn display_genres(&self) -> impl Iterator<Item = &str> {
        self.display.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.representatives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.representatives.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_key_ignores_case_and_punctuation() {
        assert_eq!(canonical_key("Sci-Fi"), "scifi");
        assert_eq!(canonical_key("sci fi"), canonical_key("SCIFI"));
        assert_eq!(canonical_key("Film-Noir"), canonical_key("film noir"));
        assert_eq!(canonical_key(" -- "), "");
    }

    #[test]
    fn smallest_display_form_wins_per_key() {
        let vocab = GenreVocabulary::from_genres(["Sci-Fi", "Sci Fi", "SciFi", "Drama"]);
        assert_eq!(vocab.len(), 2);
        // ' ' < '-' < 'F' in byte order.
        assert_eq!(vocab.representative("scifi"), Some("Sci Fi"));
        assert_eq!(vocab.representative("drama"), Some("Drama"));
        assert_eq!(vocab.display_genres().count(), 4);
    }

    #[test]
    fn build_is_independent_of_row_order() {
        let make = |genres: &[&str]| Film {
            title: "t".to_string(),
            year: None,
            rating: None,
            votes: None,
            genres: genres.iter().map(|g| g.to_string()).collect(),
        };
        let forward = vec![make(&["Film-Noir", "Crime"]), make(&["Film Noir"])];
        let backward = vec![make(&["Film Noir"]), make(&["Crime", "Film-Noir"])];

        let pairs = |vocab: &GenreVocabulary| -> Vec<(String, String)> {
            vocab
                .keys()
                .filter_map(|k| Some((k.to_string(), vocab.representative(k)?.to_string())))
                .collect()
        };
        let a = pairs(&GenreVocabulary::build(&forward));
        let b = pairs(&GenreVocabulary::build(&backward));
        assert_eq!(a.len(), 2);
        assert_eq!(a, b);
    }

    #[test]
    fn empty_dataset_gives_empty_vocabulary() {
        let vocab = GenreVocabulary::build(&[]);
        assert!(vocab.is_empty());
        assert_eq!(vocab.keys().count(), 0);
        assert_eq!(vocab.display_genres().count(), 0);
    }

    #[test]
    fn punctuation_only_genres_are_not_indexed() {
        let vocab = GenreVocabulary::from_genres(["--", "Drama"]);
        assert_eq!(vocab.representative(""), None);
        assert_eq!(vocab.len(), 1);
    }
}
