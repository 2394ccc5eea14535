use crate::common::*;

use crate::model::chart::chart_spec::*;
use crate::model::dataset::{column::*, dataset::*};
use crate::renderer::{canvas::*, frame::*, grouping::*, theme::*};
use crate::utils_modules::stats_utils::*;

use plotters::prelude::*;

const SLOT_WIDTH: f64 = 0.8;

#[doc = "Quartile box, 1.5 IQR whiskers and outlier markers per x category, dodged by hue."]
pub fn draw_box(root: &CanvasArea<'_>, spec: &ChartSpec, data: &Dataset) -> anyhow::Result<()> {
    let x_column: &Column = data.require_column(spec.x_column())?;
    let y_name: &str = spec.require_y()?;
    let y_values: Vec<Option<f64>> = measure(data, y_name)?;

    let labels: Vec<String> = category_labels(x_column)?;
    let groups: Vec<HueGroup> = hue_groups(data, spec.hue().as_deref())?;

    let stats: Vec<Vec<Option<BoxStats>>> = groups
        .iter()
        .map(|group| {
            values_by_label(x_column, &y_values, &group.rows, &labels)
                .iter()
                .map(|values| box_stats(values))
                .collect()
        })
        .collect();

    let extent: Vec<f64> = stats
        .iter()
        .flatten()
        .flatten()
        .flat_map(|s| {
            let mut ends: Vec<f64> = vec![s.whisker_low, s.whisker_high];
            ends.extend(s.outliers.iter().copied());
            ends
        })
        .collect();
    let (lo, hi) = data_range(&extent)
        .ok_or_else(|| anyhow!("Column '{}' has no numeric values to plot", y_name))?;

    let frame: Frame = Frame::new(
        spec.title().to_string(),
        AxisScale::Categorical(labels),
        AxisScale::Numeric(padded_range(lo, hi, 0.08)),
        spec.x_column().to_string(),
        y_name.to_string(),
    );

    let mut chart: Plot<'_, '_> = draw_frame(root, &frame)?;

    for (idx, (group, boxes)) in groups.iter().zip(&stats).enumerate() {
        let color: RGBColor = series_color(idx);
        let (offset, width) = dodge(idx, groups.len(), SLOT_WIDTH);
        let half: f64 = width * 0.45;

        for (slot, summary) in boxes.iter().enumerate() {
            let Some(s) = summary else { continue };
            let center: f64 = slot as f64 + offset;

            chart.draw_series(std::iter::once(Rectangle::new(
                [(center - half, s.q3), (center + half, s.q1)],
                color.mix(0.85).filled(),
            )))?;
            chart.draw_series(std::iter::once(Rectangle::new(
                [(center - half, s.q3), (center + half, s.q1)],
                TEXT_COLOR.stroke_width(1),
            )))?;

            let strokes: [Vec<(f64, f64)>; 5] = [
                vec![(center - half, s.median), (center + half, s.median)],
                vec![(center, s.q3), (center, s.whisker_high)],
                vec![(center, s.q1), (center, s.whisker_low)],
                vec![(center - half / 2.0, s.whisker_high), (center + half / 2.0, s.whisker_high)],
                vec![(center - half / 2.0, s.whisker_low), (center + half / 2.0, s.whisker_low)],
            ];
            chart.draw_series(
                strokes
                    .into_iter()
                    .map(|path| PathElement::new(path, TEXT_COLOR.stroke_width(2))),
            )?;

            chart.draw_series(
                s.outliers
                    .iter()
                    .map(|v| Circle::new((center, *v), 4, TEXT_COLOR.stroke_width(1))),
            )?;
        }

        if let Some(name) = &group.name {
            chart
                .draw_series(std::iter::empty::<Rectangle<(f64, f64)>>())?
                .label(name.as_str())
                .legend(legend_swatch(color));
        }
    }

    finish_frame(root, &mut chart, &frame, spec.hue().is_some())
}
