use crate::common::*;

use crate::model::chart::chart_spec::*;
use crate::model::dataset::{column::*, dataset::*};
use crate::renderer::{canvas::*, frame::*, grouping::*, theme::*};
use crate::utils_modules::stats_utils::*;

use plotters::prelude::*;

const SLOT_WIDTH: f64 = 0.8;
const GRID_POINTS: usize = 100;
/* density support reaches this many bandwidths past the data */
const CUT_BANDWIDTHS: f64 = 2.0;

const INNER_BAR_COLOR: RGBColor = RGBColor(35, 35, 35);

#[derive(Debug, Clone)]
struct Violin {
    stats: BoxStats,
    /* (grid, density); absent when the group has no spread to estimate a density from */
    outline: Option<(Vec<f64>, Vec<f64>)>,
}

fn violin(values: &[f64]) -> Option<Violin> {
    let stats: BoxStats = box_stats(values)?;

    let outline: Option<(Vec<f64>, Vec<f64>)> = scott_bandwidth(values).and_then(|bw| {
        let (lo, hi) = data_range(values)?;
        let grid: Vec<f64> = linspace(lo - CUT_BANDWIDTHS * bw, hi + CUT_BANDWIDTHS * bw, GRID_POINTS);
        let density: Vec<f64> = gaussian_kde(values, &grid, bw);
        Some((grid, density))
    });

    Some(Violin { stats, outline })
}

#[doc = r#"
    Mirrored kernel density per x category, dodged by hue.
    Widths are scaled against the widest violin; each carries its quartile bar and median.
"#]
pub fn draw_violin(root: &CanvasArea<'_>, spec: &ChartSpec, data: &Dataset) -> anyhow::Result<()> {
    let x_column: &Column = data.require_column(spec.x_column())?;
    let y_name: &str = spec.require_y()?;
    let y_values: Vec<Option<f64>> = measure(data, y_name)?;

    let labels: Vec<String> = category_labels(x_column)?;
    let groups: Vec<HueGroup> = hue_groups(data, spec.hue().as_deref())?;

    let violins: Vec<Vec<Option<Violin>>> = groups
        .iter()
        .map(|group| {
            values_by_label(x_column, &y_values, &group.rows, &labels)
                .iter()
                .map(|values| violin(values))
                .collect()
        })
        .collect();

    let mut extent: Vec<f64> = Vec::new();
    let mut peak: f64 = 0.0;
    for v in violins.iter().flatten().flatten() {
        extent.push(v.stats.whisker_low);
        extent.push(v.stats.whisker_high);
        if let Some((grid, density)) = &v.outline {
            extent.extend(grid.first().copied());
            extent.extend(grid.last().copied());
            peak = density.iter().copied().fold(peak, f64::max);
        }
    }

    let (lo, hi) = data_range(&extent)
        .ok_or_else(|| anyhow!("Column '{}' has no numeric values to plot", y_name))?;

    let frame: Frame = Frame::new(
        spec.title().to_string(),
        AxisScale::Categorical(labels),
        AxisScale::Numeric(padded_range(lo, hi, 0.05)),
        spec.x_column().to_string(),
        y_name.to_string(),
    );

    let mut chart: Plot<'_, '_> = draw_frame(root, &frame)?;

    for (idx, (group, row)) in groups.iter().zip(&violins).enumerate() {
        let color: RGBColor = series_color(idx);
        let (offset, width) = dodge(idx, groups.len(), SLOT_WIDTH);
        let max_half: f64 = width * 0.48;

        for (slot, shape) in row.iter().enumerate() {
            let Some(v) = shape else { continue };
            let center: f64 = slot as f64 + offset;

            if let Some((grid, density)) = &v.outline {
                let half_width = |d: f64| -> f64 {
                    if peak > 0.0 {
                        d / peak * max_half
                    } else {
                        0.0
                    }
                };

                let mut outline: Vec<(f64, f64)> = grid
                    .iter()
                    .zip(density)
                    .map(|(y, d)| (center - half_width(*d), *y))
                    .collect();
                outline.extend(
                    grid.iter()
                        .zip(density)
                        .rev()
                        .map(|(y, d)| (center + half_width(*d), *y)),
                );

                chart.draw_series(std::iter::once(Polygon::new(
                    outline.clone(),
                    color.mix(0.9).filled(),
                )))?;
                chart.draw_series(std::iter::once(PathElement::new(
                    outline,
                    TEXT_COLOR.stroke_width(1),
                )))?;
            }

            let s: &BoxStats = &v.stats;
            chart.draw_series([
                PathElement::new(
                    vec![(center, s.whisker_low), (center, s.whisker_high)],
                    INNER_BAR_COLOR.stroke_width(1),
                ),
                PathElement::new(
                    vec![(center, s.q1), (center, s.q3)],
                    INNER_BAR_COLOR.stroke_width(5),
                ),
            ])?;
            chart.draw_series(std::iter::once(Circle::new(
                (center, s.median),
                3,
                WHITE.filled(),
            )))?;
        }

        if let Some(name) = &group.name {
            chart
                .draw_series(std::iter::empty::<Polygon<(f64, f64)>>())?
                .label(name.as_str())
                .legend(legend_swatch(color));
        }
    }

    finish_frame(root, &mut chart, &frame, spec.hue().is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spread_data_gets_a_density_outline() {
        let v: Violin = violin(&[1.0, 2.0, 2.5, 3.0, 4.0]).unwrap();
        let (grid, density) = v.outline.unwrap();
        assert_eq!(grid.len(), GRID_POINTS);
        assert!(grid[0] < 1.0 && grid[GRID_POINTS - 1] > 4.0);
        assert!(density.iter().all(|d| *d >= 0.0));
    }

    #[test]
    fn constant_data_has_no_outline() {
        let v: Violin = violin(&[5.0, 5.0, 5.0]).unwrap();
        assert!(v.outline.is_none());
        assert_eq!(v.stats.median, 5.0);
        assert!(violin(&[]).is_none());
    }
}
