//! PNG chart rendering.
//!
//! Each chart draws into an in-memory RGB canvas with plotters and is then
//! encoded to PNG with `image`. Nothing touches the filesystem.

pub mod bar;
pub mod boxplot;
pub mod colormap;
pub mod heatmap;

use std::io::Cursor;

use plotters::coord::Shift;
use plotters::prelude::*;
use thiserror::Error;

use crate::database_ops::movies::MovieFilter;

pub(crate) type Canvas<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

pub(crate) const FONT: &str = "sans-serif";

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("drawing failed: {0}")]
    Draw(String),
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("pixel buffer does not fit a {0}x{1} image")]
    Buffer(u32, u32),
}

pub(crate) fn draw_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Draw(e.to_string())
}

/// The four dashboard charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum ChartKind {
    AvgRatingByGenre,
    MovieCountByGenre,
    RatingDistributionByGenre,
    HeatmapAvgRating,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::AvgRatingByGenre,
        ChartKind::MovieCountByGenre,
        ChartKind::RatingDistributionByGenre,
        ChartKind::HeatmapAvgRating,
    ];

    /// File name under `/plots/`.
    pub fn file_name(self) -> &'static str {
        match self {
            ChartKind::AvgRatingByGenre => "avg_rating_by_genre.png",
            ChartKind::MovieCountByGenre => "movie_count_by_genre.png",
            ChartKind::RatingDistributionByGenre => "rating_distribution_by_genre.png",
            ChartKind::HeatmapAvgRating => "heatmap_avg_rating.png",
        }
    }

    pub fn route(self) -> String {
        format!("/plots/{}", self.file_name())
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::AvgRatingByGenre => "Average Rating by Genre",
            ChartKind::MovieCountByGenre => "Number of Movies by Genre",
            ChartKind::RatingDistributionByGenre => "Rating Distribution by Genre",
            ChartKind::HeatmapAvgRating => "Average Rating by Genre and Region",
        }
    }

    /// Rows the chart needs from the dataset.
    pub fn filter(self) -> MovieFilter {
        match self {
            ChartKind::AvgRatingByGenre | ChartKind::RatingDistributionByGenre => {
                MovieFilter::RatedGenres
            }
            ChartKind::MovieCountByGenre => MovieFilter::WithGenres,
            ChartKind::HeatmapAvgRating => MovieFilter::RatedGenresWithRegion,
        }
    }
}

/// Draw with `draw` on a fresh white `size` canvas and return PNG bytes.
pub(crate) fn render_png<F>(size: (u32, u32), draw: F) -> Result<Vec<u8>, ChartError>
where
    F: FnOnce(&Canvas<'_>) -> Result<(), ChartError>,
{
    let (width, height) = size;
    let mut pixels = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, size).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;
        draw(&root)?;
        root.present().map_err(draw_err)?;
    }
    encode_png(width, height, pixels)
}

pub(crate) fn encode_png(width: u32, height: u32, pixels: Vec<u8>) -> Result<Vec<u8>, ChartError> {
    let img = image::RgbImage::from_raw(width, height, pixels)
        .ok_or(ChartError::Buffer(width, height))?;
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Label for the centre of segment `i`, blank for anything else.
pub(crate) fn segment_label(value: &SegmentValue<usize>, labels: &[String]) -> String {
    match value {
        SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
        _ => String::new(),
    }
}

pub(crate) fn title_font() -> TextStyle<'static> {
    TextStyle::from((FONT, 28).into_font().style(FontStyle::Bold))
}

pub(crate) fn axis_desc_font() -> TextStyle<'static> {
    TextStyle::from((FONT, 20).into_font())
}

/// Category tick labels, turned on their side so long names fit.
pub(crate) fn category_tick_font() -> TextStyle<'static> {
    TextStyle::from((FONT, 15).into_font().transform(FontTransform::Rotate90))
}

pub(crate) fn tick_font() -> TextStyle<'static> {
    TextStyle::from((FONT, 15).into_font())
}
