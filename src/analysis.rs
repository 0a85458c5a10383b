//! Movie rows to chart inputs: explode genres (and regions), then aggregate.

use std::fmt::Write as _;

use crate::charts::{bar, boxplot, heatmap, ChartKind};
use crate::database_ops::Movie;
use crate::error::AppError;
use crate::normalization::{canonical_tokens, expand, ExplodedRow, GENRE_MAP, REGION_MAP};
use crate::stats::{
    count_by_category, distribution_by_category, mean_by_category, mean_grid, BoxStats,
    CategoryCount, CategoryMean, NoData, RatingGrid,
};

pub fn explode_genres(movies: &[Movie]) -> Vec<ExplodedRow<Movie>> {
    expand(movies, |m| m.genres.as_deref(), &GENRE_MAP)
}

/// (genre, rating) pairs; rows without a rating are skipped.
fn rated(rows: &[ExplodedRow<Movie>]) -> impl Iterator<Item = (&str, f64)> {
    rows.iter()
        .filter_map(|row| row.record.rating.map(|r| (row.token.as_str(), r)))
}

pub fn genre_means(movies: &[Movie]) -> Result<Vec<CategoryMean>, NoData> {
    mean_by_category(rated(&explode_genres(movies)))
}

pub fn genre_counts(movies: &[Movie]) -> Result<Vec<CategoryCount>, NoData> {
    let rows = explode_genres(movies);
    count_by_category(rows.iter().map(|row| row.token.as_str()))
}

pub fn genre_distribution(movies: &[Movie]) -> Result<Vec<BoxStats>, NoData> {
    distribution_by_category(rated(&explode_genres(movies)))
}

/// Mean rating per (genre, region). A movie with two genres and two regions
/// feeds four cells.
pub fn genre_region_grid(movies: &[Movie]) -> Result<RatingGrid, NoData> {
    let rows = explode_genres(movies);
    let observations: Vec<(&str, String, f64)> = rows
        .iter()
        .filter_map(|row| row.record.rating.map(|rating| (row, rating)))
        .flat_map(|(row, rating)| {
            canonical_tokens(row.record.region.as_deref(), &REGION_MAP)
                .into_iter()
                .map(move |region| (row.token.as_str(), region, rating))
        })
        .collect();
    mean_grid(
        observations
            .iter()
            .map(|(genre, region, rating)| (*genre, region.as_str(), *rating)),
    )
}

/// Aggregate and draw one chart.
pub fn render(kind: ChartKind, movies: &[Movie]) -> Result<Vec<u8>, AppError> {
    let png = match kind {
        ChartKind::AvgRatingByGenre => bar::avg_rating_by_genre(&genre_means(movies)?)?,
        ChartKind::MovieCountByGenre => bar::movie_count_by_genre(&genre_counts(movies)?)?,
        ChartKind::RatingDistributionByGenre => {
            boxplot::rating_distribution_by_genre(&genre_distribution(movies)?)?
        }
        ChartKind::HeatmapAvgRating => heatmap::heatmap_avg_rating(&genre_region_grid(movies)?)?,
    };
    Ok(png)
}

/// Plain-text table of the numbers behind one chart.
pub fn describe(kind: ChartKind, movies: &[Movie]) -> Result<String, NoData> {
    let mut out = format!("{}\n", kind.title());
    // writing into a String cannot fail
    match kind {
        ChartKind::AvgRatingByGenre => {
            for m in genre_means(movies)? {
                let _ = writeln!(out, "  {:<14} {:>5.2}  (n={})", m.category, m.mean, m.count);
            }
        }
        ChartKind::MovieCountByGenre => {
            for c in genre_counts(movies)? {
                let _ = writeln!(out, "  {:<14} {:>5}", c.category, c.count);
            }
        }
        ChartKind::RatingDistributionByGenre => {
            for b in genre_distribution(movies)? {
                let _ = writeln!(
                    out,
                    "  {:<14} q1={:.2} median={:.2} q3={:.2} whiskers=[{:.2}, {:.2}] outliers={}",
                    b.category,
                    b.q1,
                    b.median,
                    b.q3,
                    b.whisker_low,
                    b.whisker_high,
                    b.outliers.len()
                );
            }
        }
        ChartKind::HeatmapAvgRating => {
            let grid = genre_region_grid(movies)?;
            let _ = writeln!(
                out,
                "  {} genres x {} regions, {} cells filled",
                grid.rows.len(),
                grid.columns.len(),
                grid.filled()
            );
            for (r, genre) in grid.rows.iter().enumerate() {
                for (c, region) in grid.columns.iter().enumerate() {
                    if let Some(v) = grid.get(r, c) {
                        let _ = writeln!(out, "  {genre:<14} {region:<16} {v:>4.1}");
                    }
                }
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: i64, genres: Option<&str>, region: Option<&str>, rating: Option<f64>) -> Movie {
        Movie {
            id,
            title: Some(format!("movie {id}")),
            url: None,
            genres: genres.map(str::to_string),
            region: region.map(str::to_string),
            rating,
        }
    }

    fn three_movies() -> Vec<Movie> {
        vec![
            movie(1, Some("剧情"), Some("美国"), Some(8.0)),
            movie(2, Some("剧情/喜剧"), Some("美国 / 日本"), Some(9.0)),
            movie(3, Some("喜剧"), Some("日本"), Some(7.0)),
        ]
    }

    #[test]
    fn end_to_end_explosion() {
        let rows = explode_genres(&three_movies());
        let pairs: Vec<(&str, Option<f64>)> =
            rows.iter().map(|r| (r.token.as_str(), r.record.rating)).collect();
        assert_eq!(
            pairs,
            vec![
                ("Drama", Some(8.0)),
                ("Drama", Some(9.0)),
                ("Comedy", Some(9.0)),
                ("Comedy", Some(7.0))
            ]
        );
    }

    #[test]
    fn end_to_end_means_and_counts() {
        let movies = three_movies();
        let means = genre_means(&movies).unwrap();
        assert_eq!(means[0].category, "Drama");
        assert!((means[0].mean - 8.5).abs() < 1e-9);
        assert_eq!(means[1].category, "Comedy");
        assert!((means[1].mean - 8.0).abs() < 1e-9);

        let counts = genre_counts(&movies).unwrap();
        let pairs: Vec<(&str, usize)> = counts.iter().map(|c| (c.category.as_str(), c.count)).collect();
        assert_eq!(pairs, vec![("Drama", 2), ("Comedy", 2)]);
    }

    #[test]
    fn unmapped_genres_are_excluded_everywhere() {
        let mut movies = three_movies();
        movies.push(movie(4, Some("同性"), Some("美国"), Some(1.0)));
        movies.push(movie(5, Some(""), Some("美国"), Some(1.0)));
        movies.push(movie(6, None, Some("美国"), Some(1.0)));

        let means = genre_means(&movies).unwrap();
        assert_eq!(means.len(), 2);
        assert!((means[0].mean - 8.5).abs() < 1e-9);
        assert_eq!(genre_counts(&movies).unwrap().len(), 2);
        let grid = genre_region_grid(&movies).unwrap();
        assert_eq!(grid.rows, vec!["Comedy", "Drama"]);
    }

    #[test]
    fn counts_include_unrated_movies() {
        let movies = vec![movie(1, Some("战争"), None, None), movie(2, Some("战争"), None, Some(9.0))];
        assert_eq!(genre_counts(&movies).unwrap()[0].count, 2);
        assert_eq!(genre_means(&movies).unwrap()[0].count, 1);
    }

    #[test]
    fn nothing_translatable_means_no_data() {
        let movies = vec![movie(1, Some("同性"), Some("美国"), Some(9.0)), movie(2, None, None, None)];
        assert_eq!(genre_means(&movies), Err(NoData));
        assert_eq!(genre_counts(&movies), Err(NoData));
        assert_eq!(genre_distribution(&movies), Err(NoData));
        assert_eq!(genre_region_grid(&movies), Err(NoData));
        assert_eq!(genre_means(&[]), Err(NoData));
        assert!(matches!(
            render(ChartKind::AvgRatingByGenre, &movies),
            Err(AppError::NoData(NoData))
        ));
    }

    #[test]
    fn grid_crosses_genres_with_regions() {
        let grid = genre_region_grid(&three_movies()).unwrap();
        assert_eq!(grid.columns, vec!["Japan", "USA"]);
        assert_eq!(grid.value("Drama", "USA"), Some(8.5));
        assert_eq!(grid.value("Drama", "Japan"), Some(9.0));
        assert_eq!(grid.value("Comedy", "Japan"), Some(8.0));
        assert_eq!(grid.value("Comedy", "USA"), Some(9.0));
    }

    #[test]
    fn grid_skips_untranslatable_regions() {
        let movies = vec![
            movie(1, Some("剧情"), Some("墨西哥"), Some(9.0)),
            movie(2, Some("剧情"), Some("法国"), Some(8.0)),
        ];
        let grid = genre_region_grid(&movies).unwrap();
        assert_eq!(grid.columns, vec!["France"]);
        assert_eq!(grid.filled(), 1);
    }

    #[test]
    fn describe_lists_every_category() {
        let text = describe(ChartKind::MovieCountByGenre, &three_movies()).unwrap();
        assert!(text.starts_with("Number of Movies by Genre"));
        assert!(text.contains("Drama"));
        assert!(text.contains("Comedy"));
        let heat = describe(ChartKind::HeatmapAvgRating, &three_movies()).unwrap();
        assert!(heat.contains("USA"));
        assert!(heat.contains("2 genres x 2 regions, 4 cells filled"));
    }
}
