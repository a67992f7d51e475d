use data_loader::Corpus;
use std::path::Path;
use std::time::Instant;

fn main() {
    let path = Path::new("data/updated_imdb_top_1000.csv");

    println!("Loading movie corpus...\n");

    let start = Instant::now();
    let corpus = Corpus::load_from_file(path)
        .expect("Failed to load corpus");
    let elapsed = start.elapsed();

    let with_runtime = corpus.movies().iter().filter(|m| m.runtime.is_some()).count();
    let with_year = corpus.movies().iter().filter(|m| m.year.is_some()).count();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", corpus.len());
    println!("With runtime: {}", with_runtime);
    println!("With year: {}", with_year);
    println!("Duplicate titles: {}", corpus.duplicate_titles().len());
    println!("TMDB metadata: {}", corpus.has_secondary_metadata());
    println!("\nPerformance: {:.0} movies/second",
             corpus.len() as f64 / elapsed.as_secs_f64());
}
