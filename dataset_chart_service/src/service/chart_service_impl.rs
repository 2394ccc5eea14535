use crate::common::*;

use crate::traits::service_traits::{chart_service::*, dataset_service::*};

use crate::dto::chart_response::*;
use crate::errors::app_error::*;
use crate::model::chart::{chart_request::*, chart_spec::*, row_condition::*};
use crate::model::dataset::dataset::*;

use crate::renderer::*;

use base64::{engine::general_purpose::STANDARD, Engine as _};

#[derive(Debug, new)]
pub struct ChartServiceImpl<D: DatasetService> {
    dataset_service: Arc<D>,
}

#[doc = r#"
    Filters the snapshot and draws the chart. Runs on a blocking thread.
    An empty view is refused here so no chart is ever drawn without data.
"#]
fn render_filtered(spec: &ChartSpec, dataset: &Dataset) -> Result<Vec<u8>, AppError> {
    let view: Dataset = apply_conditions(dataset, spec.conditions()).map_err(AppError::render)?;

    if view.is_empty() {
        let reason: &str = if spec.conditions().is_empty() {
            "the dataset has no rows to plot"
        } else {
            "no rows match the applied filters"
        };
        return Err(AppError::Render(reason.to_string()));
    }

    render_png(spec, &view).map_err(AppError::render)
}

#[async_trait]
impl<D> ChartService for ChartServiceImpl<D>
where
    D: DatasetService + 'static,
{
    async fn render_chart(&self, request: &ChartRequest) -> Result<ChartResponse, AppError> {
        let spec: ChartSpec = request.resolve()?;
        let dataset: Arc<Dataset> = self.dataset_service.snapshot().ok_or(AppError::NoDataset)?;

        info!(
            "Chart requested: type={} x={} y={:?} hue={:?} filters={} on '{}'",
            spec.chart_type(),
            spec.x_column(),
            spec.y_column(),
            spec.hue(),
            spec.conditions().len(),
            dataset.source_name()
        );

        let started: Instant = Instant::now();
        let chart_type: String = spec.chart_type().to_string();

        let handle: tokio::task::JoinHandle<Result<Vec<u8>, AppError>> =
            tokio::task::spawn_blocking(move || {
                /* ---- 여기부터는 동기 코드 (plotters) ---- */
                render_filtered(&spec, &dataset)
            });

        let image: Vec<u8> = handle.await.map_err(|e| {
            AppError::Render(format!(
                "[ChartServiceImpl->render_chart] rendering task failed: {}",
                e
            ))
        })??;

        info!(
            "{} chart rendered in {} ms ({} bytes)",
            chart_type,
            started.elapsed().as_millis(),
            image.len()
        );

        Ok(ChartResponse::new(true, STANDARD.encode(image)))
    }
}
