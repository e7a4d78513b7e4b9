use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use movie_insights::config::AppConfig;
use movie_insights::ingest::load_dataset;
use movie_insights::models::FilterCriteria;
use movie_insights::ranking::filter_and_rank;
use movie_insights::report;
use movie_insights::resolver::{GenreLookup, GenreResolver, YearLookup};
use movie_insights::session::Indices;

#[derive(Parser, Debug)]
#[command(name = "report")]
#[command(about = "Print the top-rated films for a genre and/or release year")]
struct Cli {
    #[arg(long)]
    data: Option<PathBuf>,
    #[arg(long)]
    genre: Option<String>,
    #[arg(long)]
    year: Option<String>,
    #[arg(long)]
    top: Option<usize>,
    #[arg(long, default_value_t = false)]
    json: bool,
    #[arg(long, default_value_t = false)]
    list_genres: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = AppConfig::from_env();
    if let Some(path) = cli.data {
        config.data_path = path;
    }
    if let Some(top) = cli.top.filter(|n| *n > 0) {
        config.top_n = top;
    }

    let dataset = load_dataset(&config.data_path, &config)
        .with_context(|| format!("failed loading {}", config.data_path.display()))?;
    let indices = Indices::build(&dataset, &config);

    if cli.list_genres {
        for genre in indices.vocabulary.display_genres() {
            println!("{genre}");
        }
        return Ok(());
    }

    let resolver = GenreResolver::new(&indices.vocabulary, config.matching.clone());
    let genre = match cli.genre.as_deref().map(|g| resolver.resolve(g)) {
        None | Some(GenreLookup::Skip) => None,
        Some(GenreLookup::Resolved(genre)) => Some(genre),
        Some(GenreLookup::Suggestions(suggestions)) => anyhow::bail!(
            "unknown genre {:?}; did you mean: {}?",
            cli.genre.unwrap_or_default(),
            suggestions.join(", ")
        ),
        Some(GenreLookup::NotFound) => anyhow::bail!(
            "unknown genre {:?}; run with --list-genres to see the known ones",
            cli.genre.unwrap_or_default()
        ),
    };

    let bounds = indices.year_bounds;
    let year = match cli.year.as_deref().map(|y| bounds.resolve(y)) {
        None | Some(YearLookup::Skip) => None,
        Some(YearLookup::Valid(year)) => Some(year),
        Some(YearLookup::NotANumber) | Some(YearLookup::OutOfRange) => anyhow::bail!(
            "invalid year {:?}; expected a number between {} and {}",
            cli.year.unwrap_or_default(),
            bounds.lower,
            bounds.upper
        ),
    };

    let criteria = FilterCriteria { genre, year };
    let selection = filter_and_rank(&dataset.films, &criteria, config.top_n);

    if cli.json {
        let body = serde_json::json!({
            "criteria": criteria,
            "dataset": dataset.summary,
            "selection": selection,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        print!("{}", report::render(&selection));
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
