//! Facet Catalog - selectable options for structured queries.
//!
//! All lists are computed once from the corpus and are deterministic:
//! nothing depends on hash-map iteration order.

use crate::features::{DerivedFields, runtime_label};
use data_loader::Corpus;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Default length of the director and star lists
pub const DEFAULT_TOP_N: usize = 10;

/// Distinct facet values derived from the corpus
#[derive(Debug, Clone, Default)]
pub struct FacetCatalog {
    /// Exploded genre tags in order of first appearance
    genres: Vec<String>,
    /// Ascending decades
    decades: Vec<i32>,
    /// Ascending runtime buckets
    runtime_buckets: Vec<u32>,
    /// Directors by descending appearance count
    directors: Vec<(String, usize)>,
    /// Lead stars by descending appearance count
    stars: Vec<(String, usize)>,
}

impl FacetCatalog {
    /// Build the catalog from a corpus and its derived fields (row-aligned)
    pub fn build(corpus: &Corpus, derived: &[DerivedFields]) -> Self {
        let mut genres = Vec::new();
        let mut seen_genres = HashSet::new();
        for movie in corpus.movies() {
            for tag in movie.genre_tags() {
                if seen_genres.insert(tag) {
                    genres.push(tag.to_string());
                }
            }
        }

        let decades: BTreeSet<i32> = derived.iter().filter_map(|d| d.decade).collect();
        let runtime_buckets: BTreeSet<u32> =
            derived.iter().filter_map(|d| d.runtime_bucket).collect();

        Self {
            genres,
            decades: decades.into_iter().collect(),
            runtime_buckets: runtime_buckets.into_iter().collect(),
            directors: rank_by_count(corpus.movies().iter().map(|m| m.director.as_str())),
            stars: rank_by_count(corpus.movies().iter().map(|m| m.star.as_str())),
        }
    }

    /// Distinct genre tags, order of first appearance
    pub fn genres(&self) -> Vec<String> {
        self.genres.clone()
    }

    /// Distinct decades, ascending, as plain integers ("1980")
    pub fn decades(&self) -> Vec<String> {
        self.decades.iter().map(i32::to_string).collect()
    }

    /// The `n` directors with the most movies
    pub fn top_directors(&self, n: usize) -> Vec<String> {
        top_names(&self.directors, n)
    }

    /// The `n` lead stars with the most movies
    pub fn top_stars(&self, n: usize) -> Vec<String> {
        top_names(&self.stars, n)
    }

    /// Distinct runtime-bucket labels ("90-119"), ascending by bucket
    pub fn runtime_buckets(&self) -> Vec<String> {
        self.runtime_buckets.iter().copied().map(runtime_label).collect()
    }

    /// Appearance count for a director, 0 if unknown
    pub fn director_count(&self, name: &str) -> usize {
        count_of(&self.directors, name)
    }

    pub fn star_count(&self, name: &str) -> usize {
        count_of(&self.stars, name)
    }
}

/// Count non-empty names and order them by count descending, ties by first
/// appearance
fn rank_by_count<'a>(names: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    // name -> (count, first row)
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (row, name) in names.enumerate() {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        counts.entry(name).or_insert((0, row)).0 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(name, (count, first))| (name, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));

    ranked
        .into_iter()
        .map(|(name, count, _)| (name.to_string(), count))
        .collect()
}

fn top_names(ranked: &[(String, usize)], n: usize) -> Vec<String> {
    ranked.iter().take(n).map(|(name, _)| name.clone()).collect()
}

fn count_of(ranked: &[(String, usize)], name: &str) -> usize {
    ranked
        .iter()
        .find(|(candidate, _)| candidate == name)
        .map(|(_, count)| *count)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureSynthesizer;
    use data_loader::Movie;

    fn movie(title: &str, genre: &str, year: i32, runtime: Option<u32>, director: &str, star: &str) -> Movie {
        Movie {
            title: title.to_string(),
            genre: genre.to_string(),
            year: Some(year),
            runtime,
            director: director.to_string(),
            star: star.to_string(),
            ..Default::default()
        }
    }

    fn build_catalog() -> FacetCatalog {
        let corpus = Corpus::from_movies(vec![
            movie("Jaws", "Adventure, Thriller", 1975, Some(124), "Steven Spielberg", "Roy Scheider"),
            movie("Psycho", "Horror, Mystery, Thriller", 1960, Some(109), "Alfred Hitchcock", "Anthony Perkins"),
            movie("E.T.", "Family, Sci-Fi", 1982, Some(115), "Steven Spielberg", "Henry Thomas"),
            movie("Vertigo", "Mystery, Romance, Thriller", 1958, Some(128), "Alfred Hitchcock", "James Stewart"),
            movie("Rear Window", "Mystery, Thriller", 1954, None, "Alfred Hitchcock", "James Stewart"),
            movie("Heat", "Action, Crime, Drama", 1995, Some(170), "Michael Mann", "Al Pacino"),
            movie("No Director", "", 2001, Some(95), "", ""),
        ]);
        let synthesizer = FeatureSynthesizer::new(&corpus);
        FacetCatalog::build(&corpus, synthesizer.derived())
    }

    #[test]
    fn test_genres_in_first_appearance_order() {
        let catalog = build_catalog();
        assert_eq!(
            catalog.genres(),
            vec!["Adventure", "Thriller", "Horror", "Mystery", "Family", "Sci-Fi", "Romance", "Action", "Crime", "Drama"]
        );
    }

    #[test]
    fn test_decades_sorted_without_decimals() {
        let catalog = build_catalog();
        assert_eq!(catalog.decades(), vec!["1950", "1960", "1970", "1980", "1990", "2000"]);
    }

    #[test]
    fn test_runtime_buckets_skip_missing() {
        let catalog = build_catalog();
        assert_eq!(catalog.runtime_buckets(), vec!["90-119", "120-149", "150-179"]);
    }

    #[test]
    fn test_top_directors_by_count_then_first_appearance() {
        let catalog = build_catalog();
        assert_eq!(
            catalog.top_directors(DEFAULT_TOP_N),
            vec!["Alfred Hitchcock", "Steven Spielberg", "Michael Mann"]
        );
        assert_eq!(catalog.top_directors(1), vec!["Alfred Hitchcock"]);
        assert_eq!(catalog.director_count("Alfred Hitchcock"), 3);
        assert_eq!(catalog.director_count("Nobody"), 0);
    }

    #[test]
    fn test_top_stars_ties_keep_first_appearance() {
        let catalog = build_catalog();
        assert_eq!(
            catalog.top_stars(3),
            vec!["James Stewart", "Roy Scheider", "Anthony Perkins"]
        );
        assert_eq!(catalog.star_count("James Stewart"), 2);
    }
}
