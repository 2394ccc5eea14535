use crate::common::*;

use crate::traits::service_traits::{chart_service::*, dataset_service::*};

use crate::dto::{chart_response::*, upload_result::*};
use crate::errors::app_error::*;
use crate::model::chart::chart_request::*;
use crate::model::dataset::dataset::*;

/* multipart field carrying the uploaded table */
const UPLOAD_FIELD: &str = "file";

#[derive(Debug, new)]
pub struct MainController<D: DatasetService, C: ChartService> {
    dataset_service: Arc<D>,
    chart_service: Arc<C>,
    max_upload_bytes: usize,
}

impl<D, C> MainController<D, C>
where
    D: DatasetService + 'static,
    C: ChartService + 'static,
{
    #[doc = r#"
        HTTP routes of the service.

        * `POST /api/upload` - multipart upload (field `file`) replacing the current dataset
        * `GET  /api/data` - rows of the current dataset
        * `GET  /api/columns` - column names in file order
        * `GET  /api/filters` - filterable columns and their distinct values
        * `POST /api/chart` - renders a chart and returns it as base64 PNG
        * `GET  /health` - liveness probe
    "#]
    pub fn router(self) -> Router {
        let body_limit: usize = self.max_upload_bytes;

        Router::new()
            .route("/health", get(health_check))
            .route("/api/upload", post(upload_file::<D, C>))
            .route("/api/data", get(get_data::<D, C>))
            .route("/api/columns", get(get_columns::<D, C>))
            .route("/api/filters", get(get_filters::<D, C>))
            .route("/api/chart", post(generate_chart::<D, C>))
            .layer(DefaultBodyLimit::max(body_limit))
            .with_state(Arc::new(self))
    }

    #[doc = r#"
        Serves the routes on `listener` until Ctrl+C or SIGTERM.
        In-flight requests are allowed to finish before the function returns.
    "#]
    pub async fn serve(self, listener: TcpListener) -> anyhow::Result<()> {
        let local_addr: SocketAddr = listener
            .local_addr()
            .context("[MainController->serve] listener has no local address")?;
        info!("Server listening on http://{}", local_addr);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("[MainController->serve] server terminated abnormally")?;

        info!("Server stopped");
        Ok(())
    }

    #[doc = "Pulls the `file` field out of the multipart body as (file name, content)."]
    async fn read_upload(
        multipart: Result<Multipart, MultipartRejection>,
    ) -> Result<(String, Vec<u8>), AppError> {
        let mut multipart: Multipart = multipart.map_err(|e| {
            AppError::InvalidUpload(format!("Malformed upload body: {}", e.body_text()))
        })?;

        loop {
            let field = multipart.next_field().await.map_err(|e| {
                AppError::InvalidUpload(format!("Malformed upload body: {}", e.body_text()))
            })?;

            let Some(field) = field else {
                return Err(AppError::InvalidUpload("No file uploaded".to_string()));
            };

            if field.name() != Some(UPLOAD_FIELD) {
                continue;
            }

            let file_name: String = field.file_name().unwrap_or_default().to_string();
            let bytes = field.bytes().await.map_err(|e| {
                AppError::InvalidUpload(format!("Failed to read uploaded file: {}", e.body_text()))
            })?;

            return Ok((file_name, bytes.to_vec()));
        }
    }
}

fn log_failure<T>(route: &str, result: Result<T, AppError>) -> Result<T, AppError> {
    if let Err(e) = &result {
        error!("[{}] {} - {}", route, e.status_code(), e);
    }
    result
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn upload_file<D, C>(
    State(controller): State<Arc<MainController<D, C>>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResult>, AppError>
where
    D: DatasetService + 'static,
    C: ChartService + 'static,
{
    let result: Result<UploadResult, AppError> = async {
        let (file_name, bytes) = MainController::<D, C>::read_upload(multipart).await?;
        info!("Upload received: '{}' ({} bytes)", file_name, bytes.len());
        controller.dataset_service.upload(&file_name, bytes).await
    }
    .await;

    log_failure("POST /api/upload", result).map(Json)
}

async fn get_data<D, C>(
    State(controller): State<Arc<MainController<D, C>>>,
) -> Json<Vec<Map<String, Value>>>
where
    D: DatasetService + 'static,
    C: ChartService + 'static,
{
    Json(controller.dataset_service.rows())
}

async fn get_columns<D, C>(State(controller): State<Arc<MainController<D, C>>>) -> Json<Vec<String>>
where
    D: DatasetService + 'static,
    C: ChartService + 'static,
{
    Json(controller.dataset_service.columns())
}

async fn get_filters<D, C>(
    State(controller): State<Arc<MainController<D, C>>>,
) -> Json<FilterOptionSet>
where
    D: DatasetService + 'static,
    C: ChartService + 'static,
{
    Json(controller.dataset_service.filter_options())
}

async fn generate_chart<D, C>(
    State(controller): State<Arc<MainController<D, C>>>,
    payload: Result<Json<ChartRequest>, JsonRejection>,
) -> Result<Json<ChartResponse>, AppError>
where
    D: DatasetService + 'static,
    C: ChartService + 'static,
{
    let result: Result<ChartResponse, AppError> = match payload {
        Ok(Json(request)) => controller.chart_service.render_chart(&request).await,
        Err(rejection) => Err(AppError::InvalidRequest(format!(
            "Invalid chart request: {}",
            rejection.body_text()
        ))),
    };

    log_failure("POST /api/chart", result).map(Json)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("[shutdown_signal] failed to install Ctrl+C handler: {:?}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("[shutdown_signal] failed to install SIGTERM handler: {:?}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
