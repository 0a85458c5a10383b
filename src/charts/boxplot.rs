use plotters::prelude::*;

use super::colormap::set2;
use super::{
    axis_desc_font, category_tick_font, draw_err, render_png, segment_label, tick_font,
    title_font, Canvas, ChartError,
};
use crate::stats::BoxStats;

pub const SIZE: (u32, u32) = (1600, 800);

/// Rating axis of the distribution chart.
pub const RATING_AXIS: (f64, f64) = (6.0, 10.0);

pub fn rating_distribution_by_genre(boxes: &[BoxStats]) -> Result<Vec<u8>, ChartError> {
    render_png(SIZE, |root| draw_boxes(root, boxes))
}

fn draw_boxes(root: &Canvas<'_>, boxes: &[BoxStats]) -> Result<(), ChartError> {
    let n = boxes.len();
    let labels: Vec<String> = boxes.iter().map(|b| b.category.clone()).collect();
    let (y_min, y_max) = RATING_AXIS;
    let clamp = |v: f64| v.clamp(y_min, y_max);

    let mut chart = ChartBuilder::on(root)
        .caption("Rating Distribution by Genre", title_font())
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
        .y_desc("Rating")
        .axis_desc_style(axis_desc_font())
        .x_labels(n + 1)
        .x_label_formatter(&|v| segment_label(v, &labels))
        .x_label_style(category_tick_font())
        .y_label_style(tick_font())
        .y_label_formatter(&|v| format!("{v:.1}"))
        .draw()
        .map_err(draw_err)?;

    let (plot_width, _) = chart.plotting_area().dim_in_pixel();
    let segment = plot_width / (n.max(1) as u32);
    let box_pad = segment / 5;
    let cap_pad = segment * 3 / 8;

    // span between two y values across segment `i`, inset by `pad` pixels each side
    let span = |i: usize, lo: f64, hi: f64, pad: u32, style: ShapeStyle| {
        let mut rect = Rectangle::new(
            [(SegmentValue::Exact(i), clamp(lo)), (SegmentValue::Exact(i + 1), clamp(hi))],
            style,
        );
        rect.set_margin(0, 0, pad, pad);
        rect
    };

    chart
        .draw_series(
            boxes
                .iter()
                .enumerate()
                .map(|(i, b)| span(i, b.q1, b.q3, box_pad, set2(i).filled())),
        )
        .map_err(draw_err)?;
    chart
        .draw_series(
            boxes
                .iter()
                .enumerate()
                .map(|(i, b)| span(i, b.q1, b.q3, box_pad, BLACK.stroke_width(1))),
        )
        .map_err(draw_err)?;
    // medians
    chart
        .draw_series(
            boxes
                .iter()
                .enumerate()
                .map(|(i, b)| span(i, b.median, b.median, box_pad, BLACK.stroke_width(2))),
        )
        .map_err(draw_err)?;
    // whisker caps
    chart
        .draw_series(boxes.iter().enumerate().flat_map(|(i, b)| {
            [
                span(i, b.whisker_low, b.whisker_low, cap_pad, BLACK.stroke_width(1)),
                span(i, b.whisker_high, b.whisker_high, cap_pad, BLACK.stroke_width(1)),
            ]
        }))
        .map_err(draw_err)?;
    // whisker stems
    chart
        .draw_series(boxes.iter().enumerate().flat_map(|(i, b)| {
            let stem = |lo: f64, hi: f64| {
                PathElement::new(
                    vec![
                        (SegmentValue::CenterOf(i), clamp(lo)),
                        (SegmentValue::CenterOf(i), clamp(hi)),
                    ],
                    BLACK,
                )
            };
            [stem(b.whisker_low, b.q1), stem(b.q3, b.whisker_high)]
        }))
        .map_err(draw_err)?;
    chart
        .draw_series(boxes.iter().enumerate().flat_map(|(i, b)| {
            b.outliers.iter().filter(move |v| (y_min..=y_max).contains(*v)).map(move |&v| {
                Circle::new((SegmentValue::CenterOf(i), v), 3, BLACK.stroke_width(1))
            })
        }))
        .map_err(draw_err)?;

    Ok(())
}
