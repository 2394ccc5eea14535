use crate::common::*;

use crate::model::chart::chart_spec::*;
use crate::model::dataset::{column::*, dataset::*};
use crate::renderer::{canvas::*, frame::*, grouping::*, theme::*};

use plotters::prelude::*;

const SLOT_WIDTH: f64 = 0.8;

#[doc = r#"
    Side-by-side bars, one bar per hue group inside each category slot.
    `heights[group][slot]` is the bar height; `None` leaves the slot empty for that group.
"#]
pub fn draw_dodged_bars(
    chart: &mut Plot<'_, '_>,
    groups: &[HueGroup],
    heights: &[Vec<Option<f64>>],
) -> anyhow::Result<()> {
    for (idx, (group, bars)) in groups.iter().zip(heights).enumerate() {
        let color: RGBColor = series_color(idx);
        let (offset, width) = dodge(idx, groups.len(), SLOT_WIDTH);

        let anno = chart.draw_series(bars.iter().enumerate().filter_map(|(slot, height)| {
            let height: f64 = (*height)?;
            let left: f64 = slot as f64 + offset - width / 2.0;
            let right: f64 = slot as f64 + offset + width / 2.0;
            Some(Rectangle::new(
                [(left, height.max(0.0)), (right, height.min(0.0))],
                color.filled(),
            ))
        }))?;

        if let Some(name) = &group.name {
            anno.label(name.as_str()).legend(legend_swatch(color));
        }
    }

    Ok(())
}

#[doc = "Mean of y per x category (first-seen order), dodged by hue."]
pub fn draw_bar(root: &CanvasArea<'_>, spec: &ChartSpec, data: &Dataset) -> anyhow::Result<()> {
    let x_column: &Column = data.require_column(spec.x_column())?;
    let y_name: &str = spec.require_y()?;
    let y_values: Vec<Option<f64>> = measure(data, y_name)?;

    let labels: Vec<String> = category_labels(x_column)?;
    let groups: Vec<HueGroup> = hue_groups(data, spec.hue().as_deref())?;

    let heights: Vec<Vec<Option<f64>>> = groups
        .iter()
        .map(|group| mean_by_label(x_column, &y_values, &group.rows, &labels))
        .collect();

    if heights.iter().flatten().all(Option::is_none) {
        return Err(anyhow!("Column '{}' has no numeric values to plot", y_name));
    }

    let frame: Frame = Frame::new(
        spec.title().to_string(),
        AxisScale::Categorical(labels),
        value_axis_with_zero(heights.iter().flatten().flatten().copied()),
        spec.x_column().to_string(),
        y_name.to_string(),
    );

    let mut chart: Plot<'_, '_> = draw_frame(root, &frame)?;
    draw_dodged_bars(&mut chart, &groups, &heights)?;
    finish_frame(root, &mut chart, &frame, spec.hue().is_some())
}
