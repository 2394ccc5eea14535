use crate::common::*;

use crate::model::chart::chart_spec::*;
use crate::model::dataset::{cell_value::*, column::*, dataset::*};
use crate::renderer::{canvas::*, frame::*, grouping::*, theme::*};
use crate::utils_modules::stats_utils::*;

use plotters::prelude::*;

#[doc = r#"
    Positions of the distinct x values: numeric x is sorted ascending and keeps its value,
    categorical x keeps first-seen order on category slots.
"#]
fn x_layout(x_column: &Column) -> anyhow::Result<(AxisScale, Vec<String>, Vec<f64>)> {
    if x_column.is_numeric() {
        let mut values: Vec<f64> = x_column
            .values()
            .iter()
            .filter_map(|cell| cell.as_f64())
            .collect();
        values.sort_by(|a, b| a.total_cmp(b));
        values.dedup();

        let (lo, hi) = data_range(&values)
            .ok_or_else(|| anyhow!("Column '{}' has no values to plot", x_column.name()))?;
        let labels: Vec<String> = values.iter().map(|v| format_number(*v)).collect();

        return Ok((AxisScale::Numeric(padded_range(lo, hi, 0.03)), labels, values));
    }

    let labels: Vec<String> = category_labels(x_column)?;
    let positions: Vec<f64> = (0..labels.len()).map(|slot| slot as f64).collect();
    Ok((AxisScale::Categorical(labels.clone()), labels, positions))
}

#[doc = "Mean of y per distinct x, joined by a line with circle markers; one line per hue value."]
pub fn draw_line(root: &CanvasArea<'_>, spec: &ChartSpec, data: &Dataset) -> anyhow::Result<()> {
    let x_column: &Column = data.require_column(spec.x_column())?;
    let y_name: &str = spec.require_y()?;
    let y_values: Vec<Option<f64>> = measure(data, y_name)?;

    let (x_axis, keys, positions) = x_layout(x_column)?;
    let groups: Vec<HueGroup> = hue_groups(data, spec.hue().as_deref())?;

    let lines: Vec<Vec<(f64, f64)>> = groups
        .iter()
        .map(|group| {
            mean_by_label(x_column, &y_values, &group.rows, &keys)
                .into_iter()
                .zip(&positions)
                .filter_map(|(mean, x)| mean.map(|y| (*x, y)))
                .collect()
        })
        .collect();

    let all_y: Vec<f64> = lines.iter().flatten().map(|(_, y)| *y).collect();
    let (y_lo, y_hi) = data_range(&all_y)
        .ok_or_else(|| anyhow!("Column '{}' has no numeric values to plot", y_name))?;

    let frame: Frame = Frame::new(
        spec.title().to_string(),
        x_axis,
        AxisScale::Numeric(padded_range(y_lo, y_hi, 0.08)),
        spec.x_column().to_string(),
        y_name.to_string(),
    );

    let mut chart: Plot<'_, '_> = draw_frame(root, &frame)?;

    for (idx, (group, points)) in groups.iter().zip(&lines).enumerate() {
        let color: RGBColor = series_color(idx);

        let anno = chart.draw_series(LineSeries::new(
            points.iter().copied(),
            color.stroke_width(2),
        ))?;
        if let Some(name) = &group.name {
            anno.label(name.as_str()).legend(legend_swatch(color));
        }

        chart.draw_series(
            points
                .iter()
                .map(|point| Circle::new(*point, 4, color.filled())),
        )?;
    }

    finish_frame(root, &mut chart, &frame, spec.hue().is_some())
}
