use crate::common::*;

use crate::model::chart::chart_spec::*;
use crate::model::dataset::{column::*, dataset::*};
use crate::renderer::charts::bar::*;
use crate::renderer::{canvas::*, frame::*, grouping::*, theme::*};
use crate::utils_modules::stats_utils::{data_range, histogram, padded_range};

use plotters::prelude::*;

pub const HISTOGRAM_BINS: usize = 30;

#[doc = r#"
    Distribution of x.

    A numeric x is split into equal-width bins over its full range, one translucent layer
    per hue value. A categorical x is drawn as counts per category instead.
"#]
pub fn draw_histogram(
    root: &CanvasArea<'_>,
    spec: &ChartSpec,
    data: &Dataset,
) -> anyhow::Result<()> {
    let x_column: &Column = data.require_column(spec.x_column())?;
    let groups: Vec<HueGroup> = hue_groups(data, spec.hue().as_deref())?;

    if x_column.is_numeric() {
        draw_binned(root, spec, x_column, &groups)
    } else {
        draw_counts(root, spec, x_column, &groups)
    }
}

fn draw_binned(
    root: &CanvasArea<'_>,
    spec: &ChartSpec,
    x_column: &Column,
    groups: &[HueGroup],
) -> anyhow::Result<()> {
    let x_values: Vec<Option<f64>> = x_column.numbers()?;
    let all: Vec<f64> = x_values.iter().flatten().copied().collect();
    let (lo, hi) = data_range(&all)
        .ok_or_else(|| anyhow!("Column '{}' has no values to plot", x_column.name()))?;

    /* a single repeated value still gets one visible bin */
    let (lo, hi) = if hi > lo { (lo, hi) } else { (lo - 0.5, hi + 0.5) };

    let layers: Vec<(Vec<f64>, Vec<usize>)> = groups
        .iter()
        .map(|group| {
            let binned = histogram(&present(&x_values, &group.rows), lo, hi, HISTOGRAM_BINS);
            (binned.edges, binned.counts)
        })
        .collect();

    let tallest: usize = layers
        .iter()
        .flat_map(|(_, counts)| counts.iter().copied())
        .max()
        .unwrap_or(0);

    let frame: Frame = Frame::new(
        spec.title().to_string(),
        AxisScale::Numeric(padded_range(lo, hi, 0.02)),
        AxisScale::Numeric(0.0..(tallest.max(1) as f64 * 1.08)),
        spec.x_column().to_string(),
        "count".to_string(),
    );

    let mut chart: Plot<'_, '_> = draw_frame(root, &frame)?;
    let alpha: f64 = if groups.len() > 1 { 0.55 } else { 0.85 };

    for (idx, (group, (edges, counts))) in groups.iter().zip(&layers).enumerate() {
        let color: RGBColor = series_color(idx);

        let anno = chart.draw_series(counts.iter().enumerate().filter(|(_, n)| **n > 0).map(
            |(bin, n)| {
                Rectangle::new(
                    [(edges[bin], *n as f64), (edges[bin + 1], 0.0)],
                    color.mix(alpha).filled(),
                )
            },
        ))?;
        if let Some(name) = &group.name {
            anno.label(name.as_str()).legend(legend_swatch(color));
        }

        chart.draw_series(counts.iter().enumerate().filter(|(_, n)| **n > 0).map(
            |(bin, n)| {
                Rectangle::new(
                    [(edges[bin], *n as f64), (edges[bin + 1], 0.0)],
                    BACKGROUND.stroke_width(1),
                )
            },
        ))?;
    }

    finish_frame(root, &mut chart, &frame, spec.hue().is_some())
}

fn draw_counts(
    root: &CanvasArea<'_>,
    spec: &ChartSpec,
    x_column: &Column,
    groups: &[HueGroup],
) -> anyhow::Result<()> {
    let labels: Vec<String> = category_labels(x_column)?;

    let heights: Vec<Vec<Option<f64>>> = groups
        .iter()
        .map(|group| {
            count_by_label(x_column, &group.rows, &labels)
                .into_iter()
                .map(|n| if n > 0 { Some(n as f64) } else { None })
                .collect()
        })
        .collect();

    let frame: Frame = Frame::new(
        spec.title().to_string(),
        AxisScale::Categorical(labels),
        value_axis_with_zero(heights.iter().flatten().flatten().copied()),
        spec.x_column().to_string(),
        "count".to_string(),
    );

    let mut chart: Plot<'_, '_> = draw_frame(root, &frame)?;
    draw_dodged_bars(&mut chart, groups, &heights)?;
    finish_frame(root, &mut chart, &frame, spec.hue().is_some())
}
