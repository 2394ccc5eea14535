use crate::common::*;

use crate::dto::upload_result::*;
use crate::errors::app_error::*;
use crate::model::dataset::dataset::*;

#[async_trait]
pub trait DatasetService: Send + Sync {
    #[doc = "
        Parse an uploaded file and make it the current dataset
        # Arguments
        * `file_name` - Client-side file name, used for format sniffing
        * `bytes` - Raw file content
    "]
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadResult, AppError>;

    #[doc = "Dataset every read should observe, after the empty-dataset policy is applied"]
    fn snapshot(&self) -> Option<Arc<Dataset>>;

    fn columns(&self) -> Vec<String>;

    fn filter_options(&self) -> FilterOptionSet;

    fn rows(&self) -> Vec<Map<String, Value>>;
}
