pub mod canvas;
pub mod charts;
pub mod frame;
pub mod grouping;
pub mod rotated_label;
pub mod text_safe_backend;
pub mod theme;

use crate::common::*;

use crate::enums::chart_type::*;
use crate::model::chart::chart_spec::*;
use crate::model::dataset::dataset::*;

use canvas::*;
use charts::{
    bar::*, box_plot::*, heatmap::*, histogram::*, kde::*, line::*, pie::*, scatter::*, violin::*,
};

#[doc = "Draws the requested chart of `data` on `root`."]
pub fn draw_chart(root: &CanvasArea<'_>, spec: &ChartSpec, data: &Dataset) -> anyhow::Result<()> {
    match spec.chart_type() {
        ChartType::Bar => draw_bar(root, spec, data),
        ChartType::Line => draw_line(root, spec, data),
        ChartType::Pie => draw_pie(root, spec, data),
        ChartType::Scatter => draw_scatter(root, spec, data),
        ChartType::Box => draw_box(root, spec, data),
        ChartType::Violin => draw_violin(root, spec, data),
        ChartType::Heatmap => draw_heatmap(root, spec, data),
        ChartType::Histogram => draw_histogram(root, spec, data),
        ChartType::Kde => draw_kde(root, spec, data),
    }
}

#[doc = r#"
    Renders `spec` over `data` into a PNG image of `CANVAS_WIDTH` x `CANVAS_HEIGHT` pixels.
    CPU bound: async callers run it on a blocking thread.
"#]
pub fn render_png(spec: &ChartSpec, data: &Dataset) -> anyhow::Result<Vec<u8>> {
    let mut canvas: Canvas = Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT);

    canvas
        .paint(|root| draw_chart(root, spec, data))
        .with_context(|| format!("Failed to render {} chart", spec.chart_type()))?;

    canvas.into_png()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::chart::row_condition::*;
    use crate::model::dataset::sample_dataset::*;

    fn spec(chart_type: ChartType, x: &str, y: Option<&str>, hue: Option<&str>) -> ChartSpec {
        ChartSpec::new(
            chart_type,
            x.to_string(),
            y.map(str::to_string),
            hue.map(str::to_string),
            format!("{} chart", chart_type),
            Vec::<RowCondition>::new(),
        )
    }

    fn png_size(bytes: &[u8]) -> (u32, u32) {
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let reader = png::Decoder::new(bytes).read_info().unwrap();
        (reader.info().width, reader.info().height)
    }

    #[test]
    fn every_chart_type_renders_the_sample_dataset() {
        let data: Arc<Dataset> = sample_dataset();
        let cases: Vec<ChartSpec> = vec![
            spec(ChartType::Bar, "product", Some("sales"), None),
            spec(ChartType::Bar, "category", Some("sales"), Some("region")),
            spec(ChartType::Line, "month", Some("sales"), None),
            spec(ChartType::Line, "quantity", Some("sales"), Some("region")),
            spec(ChartType::Pie, "category", Some("sales"), None),
            spec(ChartType::Scatter, "sales", Some("profit_margin"), Some("category")),
            spec(ChartType::Scatter, "product", Some("sales"), None),
            spec(ChartType::Box, "category", Some("sales"), None),
            spec(ChartType::Box, "category", Some("sales"), Some("region")),
            spec(ChartType::Violin, "region", Some("sales"), None),
            spec(ChartType::Violin, "category", Some("profit_margin"), Some("region")),
            spec(ChartType::Heatmap, "product", Some("sales"), Some("region")),
            spec(ChartType::Histogram, "sales", None, None),
            spec(ChartType::Histogram, "sales", None, Some("region")),
            spec(ChartType::Histogram, "category", None, None),
            spec(ChartType::Kde, "sales", None, None),
            spec(ChartType::Kde, "sales", None, Some("category")),
        ];

        for case in &cases {
            let image: Vec<u8> = render_png(case, &data)
                .unwrap_or_else(|e| panic!("{:?} failed: {:#}", case, e));
            assert_eq!(png_size(&image), (CANVAS_WIDTH, CANVAS_HEIGHT), "{:?}", case);
        }
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let err = render_png(
            &spec(ChartType::Bar, "does_not_exist", Some("sales"), None),
            &sample_dataset(),
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("does_not_exist"));
    }

    #[test]
    fn text_measure_is_rejected() {
        let err = render_png(
            &spec(ChartType::Bar, "product", Some("region"), None),
            &sample_dataset(),
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("not numeric"));
    }

    #[test]
    fn heatmap_requires_hue() {
        let err = render_png(
            &spec(ChartType::Heatmap, "product", Some("sales"), None),
            &sample_dataset(),
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("hue"));
    }

    #[test]
    fn single_row_density_is_rejected() {
        let data: Dataset = sample_dataset().filter_rows(|row| row == 0);
        let err = render_png(&spec(ChartType::Kde, "sales", None, None), &data).unwrap_err();
        assert!(format!("{:#}", err).contains("at least two"));
    }

    #[test]
    fn long_labels_still_render() {
        let data: Dataset = Dataset::new(
            "long.csv",
            vec![
                crate::model::dataset::column::Column::from_raw(
                    "name".to_string(),
                    vec![
                        "An extraordinarily long category label".to_string(),
                        "short".to_string(),
                    ],
                ),
                crate::model::dataset::column::Column::from_raw(
                    "value".to_string(),
                    vec!["3".to_string(), "5".to_string()],
                ),
            ],
        )
        .unwrap();

        let image: Vec<u8> =
            render_png(&spec(ChartType::Bar, "name", Some("value"), None), &data).unwrap();
        assert_eq!(png_size(&image), (CANVAS_WIDTH, CANVAS_HEIGHT));
    }
}
