use crate::common::*;

use crate::model::chart::chart_spec::*;
use crate::model::dataset::{column::*, dataset::*};
use crate::renderer::{canvas::*, frame::*, grouping::*, theme::*};
use crate::utils_modules::stats_utils::*;

use plotters::prelude::*;
use plotters_backend::text_anchor::{HPos, Pos, VPos};

const COLOR_BAR_MARGIN: u32 = 120;
const COLOR_BAR_GAP: i32 = 24;
const COLOR_BAR_WIDTH: i32 = 22;
const COLOR_BAR_STEPS: i32 = 64;

const DARK_TEXT: RGBColor = RGBColor(30, 30, 30);

#[doc = r#"
    Mean of y pivoted with one row per x value and one column per hue value,
    both sorted ascending. `cells[row][col]` is `None` where no row has that pair.
"#]
#[derive(Debug, Clone, PartialEq)]
pub struct PivotTable {
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    pub cells: Vec<Vec<Option<f64>>>,
}

impl PivotTable {
    pub fn build(data: &Dataset, x_name: &str, hue_name: &str, y_name: &str) -> anyhow::Result<Self> {
        let x_column: &Column = data.require_column(x_name)?;
        let hue_column: &Column = data.require_column(hue_name)?;
        let y_values: Vec<Option<f64>> = measure(data, y_name)?;

        let row_labels: Vec<String> = sorted_category_labels(x_column)?;
        let col_labels: Vec<String> = sorted_category_labels(hue_column)?;

        let col_rows: Vec<Vec<usize>> = col_labels
            .iter()
            .map(|label| {
                hue_column
                    .values()
                    .iter()
                    .enumerate()
                    .filter(|(_, cell)| !cell.is_missing() && cell.label() == *label)
                    .map(|(row, _)| row)
                    .collect()
            })
            .collect();

        let by_col: Vec<Vec<Option<f64>>> = col_rows
            .iter()
            .map(|rows| mean_by_label(x_column, &y_values, rows, &row_labels))
            .collect();

        let cells: Vec<Vec<Option<f64>>> = (0..row_labels.len())
            .map(|r| by_col.iter().map(|col| col[r]).collect())
            .collect();

        if cells.iter().flatten().all(Option::is_none) {
            return Err(anyhow!("Column '{}' has no numeric values to plot", y_name));
        }

        Ok(PivotTable {
            row_labels,
            col_labels,
            cells,
        })
    }

    pub fn value_range(&self) -> (f64, f64) {
        let flat: Vec<f64> = self.cells.iter().flatten().flatten().copied().collect();
        data_range(&flat).unwrap_or((0.0, 1.0))
    }
}

fn normalise(value: f64, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        (value - lo) / (hi - lo)
    } else {
        0.5
    }
}

#[doc = "Annotated pivot heatmap on a yellow-orange-red scale with a colour bar on the right."]
pub fn draw_heatmap(root: &CanvasArea<'_>, spec: &ChartSpec, data: &Dataset) -> anyhow::Result<()> {
    let y_name: &str = spec.require_y()?;
    let hue_name: &str = spec.require_hue()?;
    let pivot: PivotTable = PivotTable::build(data, spec.x_column(), hue_name, y_name)?;
    let (lo, hi) = pivot.value_range();

    let n_rows: usize = pivot.row_labels.len();

    /* first pivot row at the top */
    let y_labels: Vec<String> = pivot.row_labels.iter().rev().cloned().collect();

    let frame: Frame = Frame::new(
        spec.title().to_string(),
        AxisScale::Categorical(pivot.col_labels.clone()),
        AxisScale::Categorical(y_labels),
        hue_name.to_string(),
        spec.x_column().to_string(),
    )
    .with_right_margin(COLOR_BAR_MARGIN);

    let mut chart: Plot<'_, '_> = draw_frame(root, &frame)?;

    for (r, row) in pivot.cells.iter().enumerate() {
        let y: f64 = (n_rows - 1 - r) as f64;

        for (c, cell) in row.iter().enumerate() {
            let Some(value) = cell else { continue };
            let x: f64 = c as f64;
            let t: f64 = normalise(*value, lo, hi);

            chart.draw_series(std::iter::once(Rectangle::new(
                [(x - 0.5, y + 0.5), (x + 0.5, y - 0.5)],
                heat_color(t).filled(),
            )))?;

            let ink: RGBColor = if t < 0.6 { DARK_TEXT } else { WHITE };
            chart.draw_series(std::iter::once(Text::new(
                format!("{:.2}", value),
                (x, y),
                tick_style()
                    .color(&ink)
                    .pos(Pos::new(HPos::Center, VPos::Center)),
            )))?;
        }
    }

    finish_frame(root, &mut chart, &frame, false)?;
    draw_color_bar(root, &chart, lo, hi)
}

fn draw_color_bar(root: &CanvasArea<'_>, chart: &Plot<'_, '_>, lo: f64, hi: f64) -> anyhow::Result<()> {
    let (x_pixels, y_pixels) = chart.plotting_area().get_pixel_range();
    let left: i32 = x_pixels.end + COLOR_BAR_GAP;
    let right: i32 = left + COLOR_BAR_WIDTH;
    let (top, bottom) = (y_pixels.start, y_pixels.end);
    let height: i32 = (bottom - top).max(1);

    for step in 0..COLOR_BAR_STEPS {
        let y0: i32 = bottom - height * (step + 1) / COLOR_BAR_STEPS;
        let y1: i32 = bottom - height * step / COLOR_BAR_STEPS;
        let t: f64 = (step as f64 + 0.5) / COLOR_BAR_STEPS as f64;
        root.draw(&Rectangle::new([(left, y0), (right, y1)], heat_color(t).filled()))?;
    }
    root.draw(&Rectangle::new([(left, top), (right, bottom)], AXIS_COLOR.stroke_width(1)))?;

    for t in [0.0, 0.5, 1.0] {
        let y: i32 = bottom - (height as f64 * t).round() as i32;
        root.draw(&Text::new(
            format_tick(lo + (hi - lo) * t),
            (right + 6, y),
            tick_style().pos(Pos::new(HPos::Left, VPos::Center)),
        ))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, cells: &[&str]) -> Column {
        Column::from_raw(
            name.to_string(),
            cells.iter().map(|c| c.to_string()).collect(),
        )
    }

    #[test]
    fn pivot_averages_pairs_and_sorts_both_axes() {
        let data: Dataset = Dataset::new(
            "pivot.csv",
            vec![
                column("month", &["Feb", "Jan", "Jan", "Feb"]),
                column("region", &["South", "North", "North", "North"]),
                column("sales", &["4", "1", "3", "8"]),
            ],
        )
        .unwrap();

        let pivot: PivotTable = PivotTable::build(&data, "month", "region", "sales").unwrap();

        assert_eq!(pivot.row_labels, vec!["Feb", "Jan"]);
        assert_eq!(pivot.col_labels, vec!["North", "South"]);
        assert_eq!(
            pivot.cells,
            vec![vec![Some(8.0), Some(4.0)], vec![Some(2.0), None]]
        );
        assert_eq!(pivot.value_range(), (2.0, 8.0));
    }

    #[test]
    fn flat_values_sit_mid_scale() {
        assert_eq!(normalise(3.0, 3.0, 3.0), 0.5);
        assert_eq!(normalise(5.0, 0.0, 10.0), 0.5);
    }
}
