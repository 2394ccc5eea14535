use crate::model::chart::chart_spec::*;
use crate::model::dataset::dataset::*;
use crate::renderer::{canvas::*, frame::*, grouping::*, theme::*};

use plotters::prelude::*;

pub fn draw_scatter(root: &CanvasArea<'_>, spec: &ChartSpec, data: &Dataset) -> anyhow::Result<()> {
    let y_name: &str = spec.require_y()?;
    let (x_axis, xs) = axis_positions(data.require_column(spec.x_column())?)?;
    let (y_axis, ys) = axis_positions(data.require_column(y_name)?)?;
    let groups: Vec<HueGroup> = hue_groups(data, spec.hue().as_deref())?;

    let frame: Frame = Frame::new(
        spec.title().to_string(),
        x_axis,
        y_axis,
        spec.x_column().to_string(),
        y_name.to_string(),
    );

    let mut chart: Plot<'_, '_> = draw_frame(root, &frame)?;

    for (idx, group) in groups.iter().enumerate() {
        let color: RGBColor = series_color(idx);
        let points: Vec<(f64, f64)> = group
            .rows
            .iter()
            .filter_map(|&row| Some((xs[row]?, ys[row]?)))
            .collect();

        let anno = chart.draw_series(
            points
                .iter()
                .map(|point| Circle::new(*point, 5, color.mix(0.8).filled())),
        )?;
        if let Some(name) = &group.name {
            anno.label(name.as_str()).legend(legend_swatch(color));
        }
    }

    finish_frame(root, &mut chart, &frame, spec.hue().is_some())
}
