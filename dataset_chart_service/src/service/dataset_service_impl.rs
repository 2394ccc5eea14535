use crate::common::*;

use crate::traits::repository_traits::dataset_repository::*;
use crate::traits::service_traits::dataset_service::*;

use crate::dto::upload_result::*;
use crate::enums::{empty_policy::*, upload_format::*};
use crate::errors::app_error::*;
use crate::model::configs::dataset_config::*;
use crate::model::dataset::{dataset::*, sample_dataset::*};

use crate::utils_modules::table_parser::*;

#[derive(Debug, new)]
pub struct DatasetServiceImpl<R: DatasetRepository> {
    repository: Arc<R>,
    dataset_config: DatasetConfig,
}

impl<R> DatasetServiceImpl<R>
where
    R: DatasetRepository,
{
    #[doc = "Parses the raw upload off the async runtime. Parser failures keep their full context chain."]
    async fn parse_upload(
        &self,
        file_name: &str,
        format: UploadFormat,
        bytes: Vec<u8>,
    ) -> Result<Dataset, AppError> {
        let source_name: String = file_name.to_string();

        let handle: tokio::task::JoinHandle<anyhow::Result<Dataset>> =
            tokio::task::spawn_blocking(move || match format {
                UploadFormat::Csv => parse_csv(&source_name, &bytes),
                UploadFormat::Json => parse_json_records(&source_name, &bytes),
            });

        handle
            .await
            .map_err(|e| {
                AppError::Parse(format!(
                    "[DatasetServiceImpl->parse_upload] parser task failed: {}",
                    e
                ))
            })?
            .map_err(|e| AppError::Parse(format!("{:#}", e)))
    }
}

#[async_trait]
impl<R> DatasetService for DatasetServiceImpl<R>
where
    R: DatasetRepository,
{
    async fn upload(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadResult, AppError> {
        let file_name: &str = file_name.trim();

        if file_name.is_empty() {
            return Err(AppError::InvalidUpload("No file selected".to_string()));
        }

        let format: UploadFormat = UploadFormat::from_file_name(file_name).ok_or_else(|| {
            AppError::InvalidFormat(format!(
                "Invalid file format: '{}'. Please upload a .csv or .json file",
                file_name
            ))
        })?;

        let byte_len: usize = bytes.len();
        let parsed: Dataset = self.parse_upload(file_name, format, bytes).await?;

        /* 파싱이 끝난 뒤에만 교체한다. 실패한 업로드는 기존 데이터를 건드리지 않음 */
        let dataset: Arc<Dataset> = self.repository.replace(parsed);

        info!(
            "Dataset replaced by '{}' ({}, {} bytes): {} rows x {} columns",
            dataset.source_name(),
            format,
            byte_len,
            dataset.row_count(),
            dataset.columns().len()
        );

        let filters: FilterOptionSet =
            dataset.filter_options(*self.dataset_config.filter_distinct_threshold());

        Ok(UploadResult::from_dataset(&dataset, filters))
    }

    fn snapshot(&self) -> Option<Arc<Dataset>> {
        if let Some(dataset) = self.repository.current() {
            return Some(dataset);
        }

        match self.dataset_config.empty_policy() {
            EmptyPolicy::Sample => Some(sample_dataset()),
            EmptyPolicy::Strict => None,
        }
    }

    fn columns(&self) -> Vec<String> {
        self.snapshot()
            .map(|dataset| dataset.column_names())
            .unwrap_or_default()
    }

    fn filter_options(&self) -> FilterOptionSet {
        self.snapshot()
            .map(|dataset| dataset.filter_options(*self.dataset_config.filter_distinct_threshold()))
            .unwrap_or_default()
    }

    fn rows(&self) -> Vec<Map<String, Value>> {
        self.snapshot()
            .map(|dataset| dataset.rows())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::dataset_repository_impl::*;

    fn service(policy: EmptyPolicy) -> DatasetServiceImpl<DatasetRepositoryImpl> {
        DatasetServiceImpl::new(
            Arc::new(DatasetRepositoryImpl::new()),
            DatasetConfig::new(policy, 10),
        )
    }

    const PEOPLE_CSV: &[u8] = b"name,age,city\nAnn,31,Oslo\nBo,45,Rome\nCy,28,Oslo\n";

    #[tokio::test]
    async fn upload_replaces_dataset_and_reports_columns() {
        let svc = service(EmptyPolicy::Sample);

        let result: UploadResult = svc.upload("people.csv", PEOPLE_CSV.to_vec()).await.unwrap();

        assert_eq!(result.message(), "File uploaded successfully");
        assert_eq!(result.columns(), &vec!["name", "age", "city"]);
        assert_eq!(*result.rows(), 3);
        assert_eq!(result.filters()["city"], json!(["Oslo", "Rome"]));
        assert_eq!(svc.columns(), vec!["name", "age", "city"]);
        assert_eq!(svc.rows()[1]["age"], json!(45));
    }

    #[tokio::test]
    async fn missing_file_name_is_invalid_upload() {
        let svc = service(EmptyPolicy::Sample);
        let err: AppError = svc.upload("   ", PEOPLE_CSV.to_vec()).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidUpload(_)));
    }

    #[tokio::test]
    async fn wrong_extension_is_invalid_format_and_keeps_previous_data() {
        let svc = service(EmptyPolicy::Sample);
        svc.upload("people.csv", PEOPLE_CSV.to_vec()).await.unwrap();

        let err: AppError = svc.upload("notes.txt", b"a,b\n1,2\n".to_vec()).await.unwrap_err();

        assert!(matches!(err, AppError::InvalidFormat(_)));
        assert_eq!(svc.columns(), vec!["name", "age", "city"]);
    }

    #[tokio::test]
    async fn unparseable_upload_is_parse_error_and_keeps_previous_data() {
        let svc = service(EmptyPolicy::Sample);
        svc.upload("people.csv", PEOPLE_CSV.to_vec()).await.unwrap();

        let err: AppError = svc
            .upload("broken.csv", b"a,b\n1,2,3\n".to_vec())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));

        let err: AppError = svc.upload("empty.json", b"[]".to_vec()).await.unwrap_err();
        assert!(matches!(err, AppError::Parse(_)));

        assert_eq!(svc.columns(), vec!["name", "age", "city"]);
    }

    #[tokio::test]
    async fn reupload_discards_previous_columns() {
        let svc = service(EmptyPolicy::Sample);
        svc.upload("people.csv", PEOPLE_CSV.to_vec()).await.unwrap();
        svc.upload("points.json", br#"[{"x": 1, "y": 2.5}, {"x": 2, "y": 3.5}]"#.to_vec())
            .await
            .unwrap();

        assert_eq!(svc.columns(), vec!["x", "y"]);
        assert!(svc.filter_options().get("city").is_none());
    }

    #[test]
    fn sample_policy_serves_sample_before_upload() {
        let svc = service(EmptyPolicy::Sample);
        let snapshot: Arc<Dataset> = svc.snapshot().unwrap();
        assert_eq!(snapshot.source_name(), SAMPLE_SOURCE_NAME);
        assert_eq!(svc.columns().len(), 8);
        assert_eq!(svc.rows().len(), 12);
    }

    #[test]
    fn strict_policy_serves_nothing_before_upload() {
        let svc = service(EmptyPolicy::Strict);
        assert!(svc.snapshot().is_none());
        assert!(svc.columns().is_empty());
        assert!(svc.filter_options().is_empty());
        assert!(svc.rows().is_empty());
    }
}
