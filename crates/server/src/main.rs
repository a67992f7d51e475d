//! Simple test harness for the recommendation engine.
//!
//! Loads the corpus, prints the facet lists and runs one request of each
//! kind, so the whole pipeline can be eyeballed end to end.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

use server::{Engine, EngineConfig, FacetQuery, MovieRecommendation};

const DEFAULT_DATA_FILE: &str = "data/updated_imdb_top_1000.csv";

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info,server=debug,similarity=debug,pipeline=debug")
        .init();

    info!("Starting ReelRecs engine test harness");

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

    let engine = Engine::load(&path, EngineConfig::default())
        .with_context(|| format!("failed to build engine from {:?}", path))?;
    info!("Engine ready ({} movies)", engine.corpus().len());

    info!("Genres: {}", engine.list_genres().join(", "));
    info!("Decades: {}", engine.list_decades().join(", "));
    info!("Runtime buckets: {}", engine.list_runtime_buckets().join(", "));
    info!("Top directors: {}", engine.list_top_directors().join(", "));
    info!("Top stars: {}", engine.list_top_stars().join(", "));

    let facets = FacetQuery::new()
        .with_genre("Action")
        .with_decade("1980")
        .with_director("Steven Spielberg")
        .with_star("Tom Hanks");
    info!("Facet query: {}", facets.to_query_string());
    print_results(&engine.query_by_facets(&facets)?);

    let text = "Action 1980 Steven Spielberg Tom Hanks";
    info!("Free-text query: {}", text);
    print_results(&engine.query_by_text(text)?);

    let title = "Cast Away";
    info!("Movies similar to {}", title);
    match engine.similar_to(title) {
        Ok(results) => print_results(&results),
        Err(e) => info!("{}", e),
    }

    Ok(())
}

fn print_results(results: &[MovieRecommendation]) {
    for (i, rec) in results.iter().enumerate() {
        info!(
            "{}. {} ({}) - {} - Rating: {} - Score: {:.3}",
            i + 1,
            rec.title,
            rec.year.map(|y| y.to_string()).unwrap_or_else(|| "????".to_string()),
            rec.genre,
            rec.rating.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string()),
            rec.score
        );
        info!("   Directed by {}, starring {}", rec.director, rec.star);
    }
}
