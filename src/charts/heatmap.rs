use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::colormap::{text_on, ylgnbu};
use super::{
    axis_desc_font, draw_err, render_png, segment_label, tick_font, title_font, Canvas,
    ChartError, FONT,
};
use crate::stats::RatingGrid;

pub const SIZE: (u32, u32) = (1600, 1000);
const COLORBAR_WIDTH: u32 = 170;
const COLORBAR_STEPS: usize = 120;

pub fn heatmap_avg_rating(grid: &RatingGrid) -> Result<Vec<u8>, ChartError> {
    render_png(SIZE, |root| draw_heatmap(root, grid))
}

/// Colour-scale bounds; a flat grid gets a small artificial spread.
pub fn value_span(grid: &RatingGrid) -> (f64, f64) {
    match grid.range() {
        Some((lo, hi)) if hi > lo => (lo, hi),
        Some((lo, _)) => (lo - 0.05, lo + 0.05),
        None => (0.0, 1.0),
    }
}

fn draw_heatmap(root: &Canvas<'_>, grid: &RatingGrid) -> Result<(), ChartError> {
    let (width, _) = root.dim_in_pixel();
    let (main, bar) = root.split_horizontally(width.saturating_sub(COLORBAR_WIDTH) as i32);
    let (lo, hi) = value_span(grid);
    let n_rows = grid.rows.len();
    let n_cols = grid.columns.len();

    // first genre on top: segment k on the y axis shows row n_rows - 1 - k
    let y_labels: Vec<String> = grid.rows.iter().rev().cloned().collect();

    let mut chart = ChartBuilder::on(&main)
        .caption("Average Rating by Genre and Region", title_font())
        .margin(24)
        .x_label_area_size(150)
        .y_label_area_size(140)
        .build_cartesian_2d((0..n_cols).into_segmented(), (0..n_rows).into_segmented())
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Region")
        .y_desc("Genre")
        .axis_desc_style(axis_desc_font())
        .x_labels(n_cols + 1)
        .y_labels(n_rows + 1)
        .x_label_formatter(&|v| segment_label(v, &grid.columns))
        .y_label_formatter(&|v| segment_label(v, &y_labels))
        .x_label_style(tick_font().transform(FontTransform::Rotate90))
        .y_label_style(tick_font())
        .draw()
        .map_err(draw_err)?;

    let cells: Vec<(usize, usize, f64)> = (0..n_rows)
        .flat_map(|r| (0..n_cols).map(move |c| (r, c)))
        .filter_map(|(r, c)| grid.get(r, c).map(|v| (r, c, v)))
        .collect();
    let shade = |v: f64| ylgnbu((v - lo) / (hi - lo));

    chart
        .draw_series(cells.iter().map(|&(r, c, v)| {
            let y = n_rows - 1 - r;
            Rectangle::new(
                [
                    (SegmentValue::Exact(c), SegmentValue::Exact(y)),
                    (SegmentValue::Exact(c + 1), SegmentValue::Exact(y + 1)),
                ],
                shade(v).filled(),
            )
        }))
        .map_err(draw_err)?;

    chart
        .draw_series(cells.iter().map(|&(r, c, v)| {
            let y = n_rows - 1 - r;
            let mut style = TextStyle::from((FONT, 14).into_font())
                .pos(Pos::new(HPos::Center, VPos::Center));
            style.color = text_on(shade(v)).to_backend_color();
            Text::new(
                format!("{v:.1}"),
                (SegmentValue::CenterOf(c), SegmentValue::CenterOf(y)),
                style,
            )
        }))
        .map_err(draw_err)?;

    draw_colorbar(&bar, lo, hi)
}

fn draw_colorbar(area: &Canvas<'_>, lo: f64, hi: f64) -> Result<(), ChartError> {
    let mut chart = ChartBuilder::on(area)
        .margin_top(70)
        .margin_bottom(174)
        .margin_left(10)
        .margin_right(20)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..1.0, lo..hi)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_desc("Avg Rating")
        .axis_desc_style(axis_desc_font())
        .y_label_style(tick_font())
        .y_label_formatter(&|v| format!("{v:.2}"))
        .draw()
        .map_err(draw_err)?;

    let step = (hi - lo) / COLORBAR_STEPS as f64;
    chart
        .draw_series((0..COLORBAR_STEPS).map(|k| {
            let from = lo + step * k as f64;
            let to = from + step;
            Rectangle::new(
                [(0.0, from), (1.0, to)],
                ylgnbu((k as f64 + 0.5) / COLORBAR_STEPS as f64).filled(),
            )
        }))
        .map_err(draw_err)?;

    Ok(())
}
