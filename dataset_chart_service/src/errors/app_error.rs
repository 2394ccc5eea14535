use crate::common::*;

#[doc = "Failures surfaced at the HTTP boundary. Each maps to a status code and an `{error}` body."]
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidUpload(String),
    #[error("{0}")]
    InvalidFormat(String),
    #[error("{0}")]
    Parse(String),
    #[error("{0}")]
    InvalidRequest(String),
    #[error("No dataset has been uploaded yet")]
    NoDataset,
    #[error("Unsupported chart type: '{0}'")]
    UnsupportedChartType(String),
    #[error("{0}")]
    Render(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    #[doc = "Converts an internal `anyhow` chain into a render failure, keeping every context layer."]
    pub fn render(err: anyhow::Error) -> Self {
        AppError::Render(format!("{:#}", err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status: StatusCode = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
