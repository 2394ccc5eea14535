use crate::common::*;

use crate::dto::chart_response::*;
use crate::errors::app_error::*;
use crate::model::chart::chart_request::*;

#[async_trait]
pub trait ChartService: Send + Sync {
    #[doc = "
        Render the requested chart over the current dataset and return it as base64 PNG
        # Arguments
        * `request` - Chart type, column selectors, title and filters as sent by the client
    "]
    async fn render_chart(&self, request: &ChartRequest) -> Result<ChartResponse, AppError>;
}
