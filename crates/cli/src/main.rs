use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use data_loader::RowId;
use server::{Engine, EngineConfig, FacetQuery, ItemViewMode, MovieRecommendation};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::debug;

/// ReelRecs - Movie Recommendation Engine
#[derive(Parser)]
#[command(name = "reel-recs")]
#[command(about = "Content-based movie recommendations over the IMDB top 1000", long_about = None)]
struct Cli {
    /// Path to the movie CSV file
    #[arg(short, long, env = "REEL_RECS_DATA", default_value = "data/updated_imdb_top_1000.csv")]
    data_file: PathBuf,

    /// Number of results per request
    #[arg(short = 'k', long, default_value = "10")]
    limit: usize,

    /// Length of the top director / star lists
    #[arg(long, default_value = "10")]
    top_n: usize,

    /// Feature view used for item similarity
    #[arg(long, value_enum, default_value_t = ItemView::Auto)]
    item_view: ItemView,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ItemView {
    /// Rich view when TMDB columns are present
    Auto,
    Rich,
    Facet,
}

impl From<ItemView> for ItemViewMode {
    fn from(view: ItemView) -> Self {
        match view {
            ItemView::Auto => ItemViewMode::Auto,
            ItemView::Rich => ItemViewMode::Rich,
            ItemView::Facet => ItemViewMode::Facet,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies from facet selections or free text
    Recommend {
        #[arg(long)]
        genre: Option<String>,

        /// Decade, e.g. 1980
        #[arg(long)]
        decade: Option<String>,

        #[arg(long)]
        director: Option<String>,

        #[arg(long)]
        star: Option<String>,

        /// Runtime bucket, e.g. 90-119
        #[arg(long)]
        runtime: Option<String>,

        /// Free text; takes precedence over the facet options
        #[arg(long)]
        text: Option<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show movies similar to a title
    Similar {
        /// Exact movie title
        #[arg(long)]
        title: String,

        #[arg(long)]
        json: bool,
    },

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// List the selectable facet values
    Facets,

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        // keep stdout clean for --json
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = EngineConfig::new()
        .with_top_k(cli.limit)
        .with_facet_top_n(cli.top_n)
        .with_item_view(cli.item_view.into());

    eprintln!("Loading movies from {}...", cli.data_file.display());
    let start = Instant::now();
    let engine = Arc::new(
        Engine::load(&cli.data_file, config).context("Failed to build the recommendation engine")?,
    );
    eprintln!(
        "{} Indexed {} movies in {:?}",
        "✓".green(),
        engine.corpus().len(),
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            genre,
            decade,
            director,
            star,
            runtime,
            text,
            json,
        } => {
            let facets = FacetQuery {
                genre,
                decade,
                director,
                star,
                runtime_bucket: runtime,
            };
            handle_recommend(&engine, &facets, text.as_deref(), json)?
        }
        Commands::Similar { title, json } => handle_similar(&engine, &title, json)?,
        Commands::Search { title } => handle_search(&engine, &title),
        Commands::Facets => handle_facets(&engine),
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(engine, requests, concurrent).await?,
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(
    engine: &Engine,
    facets: &FacetQuery,
    text: Option<&str>,
    json: bool,
) -> Result<()> {
    let recommendations = engine.recommend(facets, text)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
    } else {
        print_recommendations("Movie Recommendations:", &recommendations);
    }
    Ok(())
}

/// Handle the 'similar' command
fn handle_similar(engine: &Engine, title: &str, json: bool) -> Result<()> {
    let recommendations = engine.similar_to(title)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
    } else {
        print_recommendations(&format!("Movies similar to '{}':", title), &recommendations);
    }
    Ok(())
}

/// Handle the 'search' command
fn handle_search(engine: &Engine, title: &str) {
    let title_lower = title.to_lowercase();

    // (row, relevance) where 0 is an exact match and 1 a substring match
    let mut matches: Vec<(RowId, u8)> = engine
        .corpus()
        .iter()
        .filter_map(|(row, movie)| {
            let candidate = movie.title.to_lowercase();
            if candidate == title_lower {
                Some((row, 0))
            } else if candidate.contains(&title_lower) {
                Some((row, 1))
            } else {
                None
            }
        })
        .collect();

    // Exact matches first, then corpus order
    matches.sort_by_key(|&(row, relevance)| (relevance, row));

    println!("{}", format!("Search results for '{}':", title).bold().blue());
    if matches.is_empty() {
        println!("  no matching titles");
    }
    for (row, _) in matches.iter().take(20) {
        if let Some(movie) = engine.corpus().get_movie(*row) {
            println!(
                "{}: {} ({}) [{}] rating {}",
                row,
                movie.title,
                display_or(movie.year, "????"),
                movie.genre,
                display_or(movie.rating, "-")
            );
        }
    }
}

/// Handle the 'facets' command
fn handle_facets(engine: &Engine) {
    let sections = [
        ("Genres", engine.list_genres()),
        ("Decades", engine.list_decades()),
        ("Runtime buckets", engine.list_runtime_buckets()),
    ];
    for (name, values) in sections {
        println!("{}", format!("{}:", name).bold().blue());
        for value in values {
            println!("{}{}", "• ".green(), value);
        }
    }

    print_ranked("Top directors", engine.list_top_directors(), |name| {
        engine.director_count(name)
    });
    print_ranked("Top stars", engine.list_top_stars(), |name| engine.star_count(name));
}

/// Print a ranked people list with each person's movie count
fn print_ranked(header: &str, names: Vec<String>, count: impl Fn(&str) -> usize) {
    println!("{}", format!("{}:", header).bold().blue());
    for name in names {
        let movies = count(&name);
        println!("{}{} ({} movies)", "• ".green(), name, movies);
    }
}

/// One benchmark request
#[derive(Debug, PartialEq)]
enum BenchRequest {
    Similar(RowId),
    Facet(String),
}

impl BenchRequest {
    /// Odd requests are genre facet queries, unless the corpus lists no genres
    fn pick(i: usize, row: RowId, genres: &[String], pick: usize) -> Self {
        if i % 2 == 1 && !genres.is_empty() {
            BenchRequest::Facet(genres[pick % genres.len()].clone())
        } else {
            BenchRequest::Similar(row)
        }
    }
}

/// Handle the 'benchmark' command
async fn handle_benchmark(engine: Arc<Engine>, requests: usize, concurrent: usize) -> Result<()> {
    let movies = engine.corpus().len();
    let genres = engine.list_genres();
    let permits = Arc::new(Semaphore::new(concurrent.max(1)));

    // Alternate item-similarity and facet requests over random movies
    let started = Instant::now();
    let mut handles = Vec::with_capacity(requests);
    for i in 0..requests {
        let request = BenchRequest::pick(
            i,
            rand::random::<u32>() as usize % movies,
            &genres,
            rand::random::<u32>() as usize,
        );
        let engine = engine.clone();
        let permits = permits.clone();

        handles.push(tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            let handle = tokio::task::spawn_blocking(move || {
                let start = Instant::now();
                match request {
                    BenchRequest::Similar(row) => {
                        let title = engine
                            .corpus()
                            .get_movie(row)
                            .map(|m| m.title.clone())
                            .unwrap_or_default();
                        engine.similar_to(&title)?;
                    }
                    BenchRequest::Facet(genre) => {
                        engine.query_by_facets(&FacetQuery::new().with_genre(genre))?;
                    }
                }
                Ok::<_, anyhow::Error>(start.elapsed())
            });
            let elapsed = handle.await??;
            Ok::<_, anyhow::Error>(elapsed)
        }));
    }

    // Wait for all tasks to complete and collect timings
    let mut timings = Vec::with_capacity(requests);
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }
    let wall_clock = started.elapsed();

    if timings.is_empty() {
        println!("No requests made");
        return Ok(());
    }
    debug!("Collected {} timings", timings.len());

    timings.sort();
    let total: Duration = timings.iter().sum();
    let avg_latency = total / timings.len() as u32;
    let percentile = |p: f64| timings[((timings.len() - 1) as f64 * p).round() as usize];
    let throughput = timings.len() as f64 / wall_clock.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Requests: {} ({} concurrent)", timings.len(), concurrent);
    println!("Total time: {:?}", wall_clock);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

fn display_or<T: ToString>(value: Option<T>, missing: &str) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| missing.to_string())
}

/// Helper function to format and print recommendations
fn print_recommendations(header: &str, recommendations: &[MovieRecommendation]) {
    println!("{}", header.bold().blue());
    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} ({}) [{}] - Rating: {} - Score: {:.3}",
            (i + 1).to_string().green(),
            rec.title,
            display_or(rec.year, "????"),
            rec.genre,
            display_or(rec.rating, "-"),
            rec.score
        );
        println!("   {} / {}", rec.director, rec.star);
    }
}
