use crate::common::*;

use crate::model::dataset::dataset::*;

#[derive(Debug, Clone, Serialize, Getters, new)]
#[getset(get = "pub")]
pub struct UploadResult {
    pub message: String,
    pub source: String,
    pub uploaded_at: DateTime<Utc>,
    pub rows: usize,
    pub columns: Vec<String>,
    pub filters: FilterOptionSet,
}

impl UploadResult {
    pub fn from_dataset(dataset: &Dataset, filters: FilterOptionSet) -> Self {
        UploadResult::new(
            "File uploaded successfully".to_string(),
            dataset.source_name().to_string(),
            *dataset.loaded_at(),
            *dataset.row_count(),
            dataset.column_names(),
            filters,
        )
    }
}
