use crate::common::*;

use crate::renderer::{canvas::*, rotated_label::*, text_safe_backend::*, theme::*};

use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters_backend::text_anchor::{HPos, Pos, VPos};
use plotters_backend::BackendCoord;

use std::f64::consts::FRAC_1_SQRT_2;

/* Tick labels longer than this are shortened with a trailing ellipsis */
pub const MAX_LABEL_CHARS: usize = 24;

const NUMERIC_TICK_HINT: usize = 8;
const MAX_CATEGORY_TICKS: usize = 40;

pub type Plot<'a, 'b> =
    ChartContext<'a, ChartBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

pub fn shorten_label(label: &str) -> String {
    if label.chars().count() <= MAX_LABEL_CHARS {
        return label.to_string();
    }
    let head: String = label.chars().take(MAX_LABEL_CHARS - 3).collect();
    format!("{}...", head)
}

fn group_thousands(value: i64) -> String {
    let digits: String = value.unsigned_abs().to_string();
    let mut grouped: String = String::new();

    for (idx, c) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[doc = "Axis tick text: integers with thousands separators, fractions trimmed to a few decimals."]
pub fn format_tick(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return group_thousands(value as i64);
    }

    let decimals: usize = if value.abs() >= 100.0 {
        1
    } else if value.abs() >= 1.0 {
        2
    } else {
        3
    };
    let text: String = format!("{:.*}", decimals, value);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[doc = r#"
    One chart axis.

    * `Categorical` - one slot per label, label `i` centred on position `i`.
    * `Numeric` - a continuous value range.
"#]
#[derive(Debug, Clone, PartialEq)]
pub enum AxisScale {
    Categorical(Vec<String>),
    Numeric(Range<f64>),
}

impl AxisScale {
    pub fn range(&self) -> Range<f64> {
        match self {
            AxisScale::Categorical(labels) => -0.5..(labels.len().max(1) as f64 - 0.5),
            AxisScale::Numeric(range) => range.clone(),
        }
    }

    pub fn ticks(&self) -> Vec<(f64, String)> {
        match self {
            AxisScale::Categorical(labels) => {
                let stride: usize = labels.len().div_ceil(MAX_CATEGORY_TICKS).max(1);
                labels
                    .iter()
                    .enumerate()
                    .step_by(stride)
                    .map(|(idx, label)| (idx as f64, shorten_label(label)))
                    .collect()
            }
            AxisScale::Numeric(range) => {
                let coord: RangedCoordf64 = range.clone().into();
                coord
                    .key_points(NUMERIC_TICK_HINT)
                    .into_iter()
                    .map(|v| (v, format_tick(v)))
                    .collect()
            }
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, AxisScale::Numeric(_))
    }
}

#[derive(Debug, Clone, Getters, new)]
#[getset(get = "pub")]
pub struct Frame {
    title: String,
    x: AxisScale,
    y: AxisScale,
    x_desc: String,
    y_desc: String,
    #[new(value = "20")]
    right_margin: u32,
}

impl Frame {
    pub fn with_right_margin(mut self, right_margin: u32) -> Self {
        self.right_margin = right_margin;
        self
    }
}

fn longest_tick_px(ticks: &[(f64, String)]) -> f64 {
    ticks
        .iter()
        .map(|(_, label)| estimate_text_px(label, TICK_FONT_SIZE).0)
        .max()
        .unwrap_or(0) as f64
}

#[doc = "Height below the plot that fits the longest 45 degree tick label plus the axis description."]
fn x_label_area(ticks: &[(f64, String)]) -> u32 {
    let drop: f64 = (longest_tick_px(ticks) + TICK_FONT_SIZE) * FRAC_1_SQRT_2;
    ((drop + DESC_FONT_SIZE + 24.0).ceil() as u32).clamp(48, 240)
}

fn y_label_area(ticks: &[(f64, String)]) -> u32 {
    ((longest_tick_px(ticks) + DESC_FONT_SIZE + 28.0).ceil() as u32).clamp(48, 240)
}

#[doc = r#"
    Lays out a titled cartesian chart on `root` and draws its axes and grid.

    Tick labels are left empty here: they are drawn by `finish_frame` once the series are
    in place, so x labels can be rotated.
"#]
pub fn draw_frame<'a, 'b>(root: &'a CanvasArea<'b>, frame: &Frame) -> anyhow::Result<Plot<'a, 'b>> {
    let x_ticks: Vec<(f64, String)> = frame.x.ticks();
    let y_ticks: Vec<(f64, String)> = frame.y.ticks();
    let x_range: Range<f64> = frame.x.range();
    let y_range: Range<f64> = frame.y.range();

    let mut chart: Plot<'a, 'b> = ChartBuilder::on(root)
        .caption(&frame.title, caption_style())
        .margin(20)
        .margin_right(frame.right_margin)
        .x_label_area_size(x_label_area(&x_ticks))
        .y_label_area_size(y_label_area(&y_ticks))
        .build_cartesian_2d(x_range.clone(), y_range.clone())
        .context("[draw_frame] failed to lay out the chart area")?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc(frame.x_desc.as_str())
        .y_desc(frame.y_desc.as_str())
        .axis_style(ShapeStyle::from(&AXIS_COLOR).stroke_width(2))
        .axis_desc_style(desc_style())
        .x_label_formatter(&|_| String::new())
        .y_label_formatter(&|_| String::new())
        .draw()
        .context("[draw_frame] failed to draw the axes")?;

    chart.draw_series(y_ticks.iter().map(|(y, _)| {
        PathElement::new(
            vec![(x_range.start, *y), (x_range.end, *y)],
            GRID_COLOR.stroke_width(1),
        )
    }))?;

    if frame.x.is_numeric() {
        chart.draw_series(x_ticks.iter().map(|(x, _)| {
            PathElement::new(
                vec![(*x, y_range.start), (*x, y_range.end)],
                GRID_COLOR.stroke_width(1),
            )
        }))?;
    }

    Ok(chart)
}

#[doc = "Draws the tick labels (x at 45 degrees) and, when series were labelled, the legend."]
pub fn finish_frame<'a, 'b: 'a>(
    root: &CanvasArea<'_>,
    chart: &mut Plot<'a, 'b>,
    frame: &Frame,
    with_legend: bool,
) -> anyhow::Result<()> {
    let x_floor: f64 = frame.x.range().start;
    let y_floor: f64 = frame.y.range().start;

    for (x, label) in frame.x.ticks() {
        let (px, py) = chart.backend_coord(&(x, y_floor));
        root.draw(&RotatedLabel::new(label, (px + 4, py + 10), tick_style()))?;
    }

    for (y, label) in frame.y.ticks() {
        let (px, py) = chart.backend_coord(&(x_floor, y));
        root.draw(&Text::new(
            label,
            (px - 8, py),
            tick_style().pos(Pos::new(HPos::Right, VPos::Center)),
        ))?;
    }

    if with_legend {
        chart
            .configure_series_labels()
            .background_style(&BACKGROUND.mix(0.85))
            .border_style(&AXIS_COLOR)
            .label_font(tick_style())
            .position(SeriesLabelPosition::UpperRight)
            .draw()
            .context("[finish_frame] failed to draw the legend")?;
    }

    Ok(())
}

pub fn legend_swatch(color: RGBColor) -> impl Fn(BackendCoord) -> Rectangle<BackendCoord> {
    move |(x, y)| Rectangle::new([(x, y - 5), (x + 12, y + 5)], color.filled())
}

#[doc = "Centre offset and width of member `index` of `count` bars sharing one category slot."]
pub fn dodge(index: usize, count: usize, slot_width: f64) -> (f64, f64) {
    let count: usize = count.max(1);
    let width: f64 = slot_width / count as f64;
    (-slot_width / 2.0 + width * (index as f64 + 0.5), width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_labels_are_shortened() {
        assert_eq!(shorten_label("Laptop"), "Laptop");
        let long: String = "x".repeat(30);
        let short: String = shorten_label(&long);
        assert_eq!(short.chars().count(), MAX_LABEL_CHARS);
        assert!(short.ends_with("..."));
    }

    #[test]
    fn ticks_are_readable() {
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(-0.0), "0");
        assert_eq!(format_tick(45000.0), "45,000");
        assert_eq!(format_tick(-1234567.0), "-1,234,567");
        assert_eq!(format_tick(0.30000000000000004), "0.3");
        assert_eq!(format_tick(2.5), "2.5");
        assert_eq!(format_tick(150.26), "150.3");
    }

    #[test]
    fn categorical_axis_centres_labels_on_slots() {
        let axis: AxisScale = AxisScale::Categorical(vec!["a".into(), "b".into(), "c".into()]);
        assert_eq!(axis.range(), -0.5..2.5);
        assert_eq!(
            axis.ticks(),
            vec![(0.0, "a".to_string()), (1.0, "b".to_string()), (2.0, "c".to_string())]
        );
    }

    #[test]
    fn crowded_categorical_axis_is_thinned() {
        let labels: Vec<String> = (0..100).map(|i| format!("c{}", i)).collect();
        let ticks: Vec<(f64, String)> = AxisScale::Categorical(labels).ticks();
        assert!(ticks.len() <= MAX_CATEGORY_TICKS);
        assert_eq!(ticks[0].1, "c0");
    }

    #[test]
    fn numeric_axis_ticks_stay_in_range() {
        let ticks: Vec<(f64, String)> = AxisScale::Numeric(0.0..50000.0).ticks();
        assert!(!ticks.is_empty());
        assert!(ticks.iter().all(|(v, _)| (0.0..=50000.0).contains(v)));
    }

    #[test]
    fn dodged_bars_fill_the_slot() {
        assert_eq!(dodge(0, 1, 0.8), (0.0, 0.8));
        let (left, width) = dodge(0, 2, 0.8);
        let (right, _) = dodge(1, 2, 0.8);
        assert!((width - 0.4).abs() < 1e-12);
        assert!((left + 0.2).abs() < 1e-12);
        assert!((right - 0.2).abs() < 1e-12);
    }

    #[test]
    fn framed_chart_with_legend_paints() {
        let frame: Frame = Frame::new(
            "Frame".to_string(),
            AxisScale::Categorical(vec!["North".into(), "South".into()]),
            AxisScale::Numeric(0.0..10.0),
            "region".to_string(),
            "sales".to_string(),
        );

        let mut canvas: Canvas = Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        canvas
            .paint(|root| {
                let mut chart: Plot<'_, '_> = draw_frame(root, &frame)?;
                chart
                    .draw_series(std::iter::once(Circle::new((0.0, 5.0), 4, series_color(0).filled())))?
                    .label("North")
                    .legend(legend_swatch(series_color(0)));
                finish_frame(root, &mut chart, &frame, true)
            })
            .unwrap();

        let png_bytes: Vec<u8> = canvas.into_png().unwrap();
        assert_eq!(&png_bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn label_areas_grow_with_label_length() {
        let short: Vec<(f64, String)> = vec![(0.0, "a".into())];
        let long: Vec<(f64, String)> = vec![(0.0, "a".repeat(24))];
        assert!(x_label_area(&long) > x_label_area(&short));
        assert!(y_label_area(&long) > y_label_area(&short));
    }
}
