use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::colormap::{CORAL, STEEL_BLUE};
use super::{
    axis_desc_font, category_tick_font, draw_err, render_png, segment_label, tick_font,
    title_font, Canvas, ChartError, FONT,
};
use crate::stats::{CategoryCount, CategoryMean};

pub const SIZE: (u32, u32) = (1400, 800);

/// Rating axis of the mean chart.
pub const MEAN_AXIS: (f64, f64) = (7.0, 10.0);

/// One bar per category, value printed above it.
struct BarSpec<'a> {
    title: &'a str,
    y_desc: &'a str,
    labels: Vec<String>,
    values: Vec<f64>,
    y_range: (f64, f64),
    color: RGBColor,
    /// Offset of the value label above the bar top, in axis units.
    label_lift: f64,
    format: fn(f64) -> String,
}

pub fn avg_rating_by_genre(means: &[CategoryMean]) -> Result<Vec<u8>, ChartError> {
    let spec = BarSpec {
        title: "Average Rating by Genre",
        y_desc: "Average Rating",
        labels: means.iter().map(|m| m.category.clone()).collect(),
        values: means.iter().map(|m| m.mean).collect(),
        y_range: MEAN_AXIS,
        color: STEEL_BLUE,
        label_lift: 0.05,
        format: |v| format!("{v:.2}"),
    };
    render_png(SIZE, |root| draw_bars(root, &spec))
}

pub fn movie_count_by_genre(counts: &[CategoryCount]) -> Result<Vec<u8>, ChartError> {
    let values: Vec<f64> = counts.iter().map(|c| c.count as f64).collect();
    let spec = BarSpec {
        title: "Number of Movies by Genre",
        y_desc: "Number of Movies",
        labels: counts.iter().map(|c| c.category.clone()).collect(),
        y_range: count_axis(&values),
        values,
        color: CORAL,
        label_lift: 0.3,
        format: |v| format!("{v:.0}"),
    };
    render_png(SIZE, |root| draw_bars(root, &spec))
}

/// Zero-based count axis with headroom for the value labels.
pub fn count_axis(values: &[f64]) -> (f64, f64) {
    let max = values.iter().copied().fold(0.0, f64::max);
    (0.0, (max * 1.1).max(max + 1.0))
}

fn draw_bars(root: &Canvas<'_>, spec: &BarSpec<'_>) -> Result<(), ChartError> {
    let n = spec.labels.len();
    let (y_min, y_max) = spec.y_range;

    let mut chart = ChartBuilder::on(root)
        .caption(spec.title, title_font())
        .margin(24)
        .x_label_area_size(170)
        .y_label_area_size(80)
        .build_cartesian_2d((0..n).into_segmented(), y_min..y_max)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(WHITE)
        .bold_line_style(BLACK.mix(0.12))
        .x_desc("Genre")
        .y_desc(spec.y_desc)
        .axis_desc_style(axis_desc_font())
        .x_labels(n + 1)
        .x_label_formatter(&|v| segment_label(v, &spec.labels))
        .x_label_style(category_tick_font())
        .y_label_style(tick_font())
        .y_label_formatter(&|v| format!("{v:.1}"))
        .draw()
        .map_err(draw_err)?;

    let (plot_width, _) = chart.plotting_area().dim_in_pixel();
    let gap = plot_width / (n.max(1) as u32) / 6;

    chart
        .draw_series(spec.values.iter().enumerate().map(|(i, &v)| {
            let top = v.clamp(y_min, y_max);
            let mut bar = Rectangle::new(
                [(SegmentValue::Exact(i), y_min), (SegmentValue::Exact(i + 1), top)],
                spec.color.mix(0.75).filled(),
            );
            bar.set_margin(0, 0, gap, gap);
            bar
        }))
        .map_err(draw_err)?;

    chart
        .draw_series(spec.values.iter().enumerate().map(|(i, &v)| {
            let mut outline = Rectangle::new(
                [
                    (SegmentValue::Exact(i), y_min),
                    (SegmentValue::Exact(i + 1), v.clamp(y_min, y_max)),
                ],
                BLACK.stroke_width(1),
            );
            outline.set_margin(0, 0, gap, gap);
            outline
        }))
        .map_err(draw_err)?;

    let value_style = TextStyle::from((FONT, 14).into_font()).pos(Pos::new(HPos::Center, VPos::Bottom));
    chart
        .draw_series(spec.values.iter().enumerate().map(|(i, &v)| {
            let y = (v + spec.label_lift).min(y_max);
            Text::new((spec.format)(v), (SegmentValue::CenterOf(i), y), value_style.clone())
        }))
        .map_err(draw_err)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_axis_leaves_headroom() {
        assert_eq!(count_axis(&[2.0, 1.0]), (0.0, 3.0));
        let (lo, hi) = count_axis(&[40.0, 12.0]);
        assert_eq!(lo, 0.0);
        assert!((hi - 44.0).abs() < 1e-9);
        assert_eq!(count_axis(&[]), (0.0, 1.0));
    }

    #[test]
    #[ignore = "needs a system sans-serif font"]
    fn renders_mean_chart_png() {
        let means = vec![
            CategoryMean {
                category: "Drama".into(),
                mean: 8.5,
                count: 2,
            },
            CategoryMean {
                category: "Comedy".into(),
                mean: 8.0,
                count: 2,
            },
        ];
        let png = avg_rating_by_genre(&means).unwrap();
        assert_eq!(&png[..4], b"\x89PNG");
    }

    #[test]
    #[ignore = "needs a system sans-serif font"]
    fn renders_count_chart_png() {
        let counts = vec![CategoryCount {
            category: "Drama".into(),
            count: 3,
        }];
        let png = movie_count_by_genre(&counts).unwrap();
        assert_eq!(&png[..4], b"\x89PNG");
    }
}
