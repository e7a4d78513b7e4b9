use std::cmp::Ordering;

use tracing::debug;

use crate::models::{Film, FilterCriteria, RankedFilm, Selection};

pub const DEFAULT_TOP_N: usize = 5;

pub fn filter_films<'a>(films: &'a [Film], criteria: &FilterCriteria) -> Vec<&'a Film> {
    films
        .iter()
        .filter(|film| match &criteria.genre {
            Some(genre) => film.has_genre(genre),
            None => true,
        })
        .filter(|film| match criteria.year {
            Some(year) => film.year == Some(year),
            None => true,
        })
        .collect()
}

pub fn filter_and_rank(films: &[Film], criteria: &FilterCriteria, top_n: usize) -> Selection {
    let mut matches = filter_films(films, criteria);
    if matches.is_empty() {
        debug!(?criteria, "no films matched");
        return Selection::Empty;
    }

    let count = matches.len();
    let average_rating = mean_rating(&matches);

    // Stable, so full ties keep dataset order.
    matches.sort_by(|a, b| compare_rank(a, b));

    let top = matches
        .into_iter()
        .take(top_n)
        .map(RankedFilm::from)
        .collect();

    Selection::Matches {
        count,
        average_rating,
        top,
    }
}

fn mean_rating(films: &[&Film]) -> Option<f64> {
    let ratings: Vec<f64> = films.iter().filter_map(|f| f.rating).collect();
    if ratings.is_empty() {
        return None;
    }
    Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
}

fn compare_rank(a: &Film, b: &Film) -> Ordering {
    descending_present(a.rating, b.rating, |x, y| {
        x.partial_cmp(&y).unwrap_or(Ordering::Equal)
    })
    .then_with(|| descending_present(a.votes, b.votes, |x, y| x.cmp(&y)))
}

fn descending_present<T: Copy>(
    a: Option<T>,
    b: Option<T>,
    cmp: impl Fn(T, T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => cmp(y, x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
