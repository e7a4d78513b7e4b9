use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::info;

use crate::config::AppConfig;
use crate::models::{Dataset, FilterCriteria, Selection};
use crate::prompt::Prompter;
use crate::ranking::filter_and_rank;
use crate::report;
use crate::resolver::{GenreResolver, YearBounds};
use crate::vocabulary::GenreVocabulary;

pub struct Indices {
    pub vocabulary: GenreVocabulary,
    pub year_bounds: YearBounds,
}

impl Indices {
    pub fn build(dataset: &Dataset, config: &AppConfig) -> Self {
        let vocabulary = GenreVocabulary::build(&dataset.films);
        let year_bounds = YearBounds::from_films(&dataset.films, config.years);
        info!(
            genres = vocabulary.len(),
            lower = year_bounds.lower,
            upper = year_bounds.upper,
            "built lookup indices"
        );
        Self {
            vocabulary,
            year_bounds,
        }
    }
}

pub fn run_session<R: BufRead, W: Write>(
    config: &AppConfig,
    dataset: &Dataset,
    input: R,
    output: W,
) -> Result<Selection> {
    let indices = Indices::build(dataset, config);
    let resolver = GenreResolver::new(&indices.vocabulary, config.matching.clone());
    let mut prompter = Prompter::new(input, output);

    let criteria = FilterCriteria {
        genre: prompter.ask_genre(&resolver)?,
        year: prompter.ask_year(indices.year_bounds)?,
    };
    if criteria.is_unfiltered() {
        info!("no filters given; ranking the whole dataset");
    } else {
        info!(genre = ?criteria.genre, year = ?criteria.year, "filtering");
    }

    let selection = filter_and_rank(&dataset.films, &criteria, config.top_n);

    let out = prompter.output();
    writeln!(out)?;
    write!(out, "{}", report::render(&selection))?;
    out.flush()?;

    Ok(selection)
}
