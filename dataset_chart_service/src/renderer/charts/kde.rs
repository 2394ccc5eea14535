use crate::common::*;

use crate::model::chart::chart_spec::*;
use crate::model::dataset::{column::*, dataset::*};
use crate::renderer::{canvas::*, frame::*, grouping::*, theme::*};
use crate::utils_modules::stats_utils::*;

use plotters::prelude::*;

const GRID_POINTS: usize = 200;
/* the evaluation grid reaches this many bandwidths past the data */
const CUT_BANDWIDTHS: f64 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct DensityCurve {
    pub name: Option<String>,
    pub points: Vec<(f64, f64)>,
}

#[doc = r#"
    Gaussian kernel density of x per hue group, on a grid shared by every group.

    Each group uses its own Scott bandwidth and is scaled by its share of all rows, so the
    curves add up to the density of the whole column. Groups without spread are left out.
"#]
pub fn density_curves(
    x_column: &Column,
    groups: &[HueGroup],
) -> anyhow::Result<Vec<DensityCurve>> {
    let x_values: Vec<Option<f64>> = x_column.numbers()?;
    let all: Vec<f64> = x_values.iter().flatten().copied().collect();

    if all.len() < 2 {
        return Err(anyhow!(
            "A density estimate needs at least two numeric values in column '{}', found {}",
            x_column.name(),
            all.len()
        ));
    }

    let samples: Vec<(Option<String>, Vec<f64>, f64)> = groups
        .iter()
        .filter_map(|group| {
            let values: Vec<f64> = present(&x_values, &group.rows);
            let bandwidth: f64 = scott_bandwidth(&values)?;
            Some((group.name.clone(), values, bandwidth))
        })
        .collect();

    if samples.is_empty() {
        return Err(anyhow!(
            "Column '{}' has no spread to estimate a density from",
            x_column.name()
        ));
    }

    let (lo, hi) = data_range(&all)
        .ok_or_else(|| anyhow!("Column '{}' has no values to plot", x_column.name()))?;
    let widest: f64 = samples.iter().map(|(_, _, bw)| *bw).fold(0.0, f64::max);
    let grid: Vec<f64> = linspace(
        lo - CUT_BANDWIDTHS * widest,
        hi + CUT_BANDWIDTHS * widest,
        GRID_POINTS,
    );

    let total: f64 = all.len() as f64;

    Ok(samples
        .into_iter()
        .map(|(name, values, bandwidth)| {
            let share: f64 = values.len() as f64 / total;
            let points: Vec<(f64, f64)> = grid
                .iter()
                .copied()
                .zip(gaussian_kde(&values, &grid, bandwidth))
                .map(|(x, d)| (x, d * share))
                .collect();
            DensityCurve { name, points }
        })
        .collect())
}

pub fn draw_kde(root: &CanvasArea<'_>, spec: &ChartSpec, data: &Dataset) -> anyhow::Result<()> {
    let x_column: &Column = data.require_column(spec.x_column())?;
    let groups: Vec<HueGroup> = hue_groups(data, spec.hue().as_deref())?;
    let curves: Vec<DensityCurve> = density_curves(x_column, &groups)?;

    let xs: Vec<f64> = curves.iter().flat_map(|c| c.points.iter().map(|p| p.0)).collect();
    let (x_lo, x_hi) = data_range(&xs).unwrap_or((0.0, 1.0));
    let peak: f64 = curves
        .iter()
        .flat_map(|c| c.points.iter().map(|p| p.1))
        .fold(0.0, f64::max);

    let frame: Frame = Frame::new(
        spec.title().to_string(),
        AxisScale::Numeric(x_lo..x_hi),
        AxisScale::Numeric(0.0..(if peak > 0.0 { peak * 1.08 } else { 1.0 })),
        spec.x_column().to_string(),
        "density".to_string(),
    );

    let mut chart: Plot<'_, '_> = draw_frame(root, &frame)?;

    for (idx, curve) in curves.iter().enumerate() {
        let color: RGBColor = series_color(idx);

        chart.draw_series(
            AreaSeries::new(curve.points.iter().copied(), 0.0, color.mix(0.2).filled())
                .border_style(color.stroke_width(2)),
        )?;

        if let Some(name) = &curve.name {
            chart
                .draw_series(std::iter::empty::<PathElement<(f64, f64)>>())?
                .label(name.as_str())
                .legend(legend_swatch(color));
        }
    }

    finish_frame(root, &mut chart, &frame, spec.hue().is_some())
}
