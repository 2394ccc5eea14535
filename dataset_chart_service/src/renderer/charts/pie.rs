use crate::common::*;

use crate::model::chart::chart_spec::*;
use crate::model::dataset::{column::*, dataset::*};
use crate::renderer::{canvas::*, frame::*, grouping::*, theme::*};

use plotters::prelude::*;
use plotters_backend::text_anchor::{HPos, Pos, VPos};

/* Slices start at twelve o'clock and run counter-clockwise */
const START_ANGLE_DEG: f64 = 90.0;

#[doc = r#"
    Slice sizes: the y column summed per x label, labels in first-seen order.
    Negative values or a zero total cannot be drawn as proportions.
"#]
pub fn pie_slices(
    x_column: &Column,
    y_name: &str,
    y_values: &[Option<f64>],
) -> anyhow::Result<Vec<(String, f64)>> {
    if y_values.iter().flatten().any(|v| *v < 0.0) {
        return Err(anyhow!(
            "Pie chart values must be non-negative, column '{}' has negative values",
            y_name
        ));
    }

    let labels: Vec<String> = category_labels(x_column)?;
    let rows: Vec<usize> = (0..y_values.len()).collect();

    let slices: Vec<(String, f64)> = labels
        .iter()
        .cloned()
        .zip(values_by_label(x_column, y_values, &rows, &labels))
        .map(|(label, values)| (label, values.iter().sum::<f64>()))
        .collect();

    let total: f64 = slices.iter().map(|(_, v)| v).sum();
    if total <= 0.0 || !total.is_finite() {
        return Err(anyhow!(
            "Pie chart values in column '{}' sum to zero, nothing to draw",
            y_name
        ));
    }

    Ok(slices)
}

fn polar(center: (i32, i32), radius: f64, angle_rad: f64) -> (i32, i32) {
    (
        center.0 + (radius * angle_rad.cos()).round() as i32,
        center.1 - (radius * angle_rad.sin()).round() as i32,
    )
}

#[doc = "Proportions of y per x label, with percentages inside and labels outside each slice."]
pub fn draw_pie(root: &CanvasArea<'_>, spec: &ChartSpec, data: &Dataset) -> anyhow::Result<()> {
    let x_column: &Column = data.require_column(spec.x_column())?;
    let y_name: &str = spec.require_y()?;
    let y_values: Vec<Option<f64>> = measure(data, y_name)?;

    let slices: Vec<(String, f64)> = pie_slices(x_column, y_name, &y_values)?;
    let total: f64 = slices.iter().map(|(_, v)| v).sum();

    let area: CanvasArea<'_> = root
        .titled(spec.title(), caption_style())
        .context("[draw_pie] failed to draw the title")?;
    let (width, height) = area.dim_in_pixel();
    let center: (i32, i32) = (width as i32 / 2, height as i32 / 2);
    let radius: f64 = width.min(height) as f64 * 0.36;

    let mut start: f64 = START_ANGLE_DEG;

    for (idx, (label, value)) in slices.iter().enumerate() {
        let sweep: f64 = 360.0 * value / total;
        if sweep <= 0.0 {
            continue;
        }

        let color: RGBColor = series_color(idx);
        let steps: usize = (sweep.ceil() as usize).max(2);
        let mut outline: Vec<(i32, i32)> = vec![center];
        outline.extend((0..=steps).map(|step| {
            let angle: f64 = start + sweep * step as f64 / steps as f64;
            polar(center, radius, angle.to_radians())
        }));

        area.draw(&Polygon::new(outline.clone(), color.filled()))?;
        outline.push(center);
        area.draw(&PathElement::new(outline, BACKGROUND.stroke_width(2)))?;

        let middle: f64 = (start + sweep / 2.0).to_radians();

        area.draw(&Text::new(
            format!("{:.1}%", 100.0 * value / total),
            polar(center, radius * 0.65, middle),
            tick_style().pos(Pos::new(HPos::Center, VPos::Center)),
        ))?;

        let h_pos: HPos = if middle.cos() >= 0.0 {
            HPos::Left
        } else {
            HPos::Right
        };
        area.draw(&Text::new(
            shorten_label(label),
            polar(center, radius * 1.08, middle),
            tick_style().pos(Pos::new(h_pos, VPos::Center)),
        ))?;

        start += sweep;
    }

    Ok(())
}
