use crate::common::*;

use crate::model::dataset::dataset::*;

pub trait DatasetRepository: Send + Sync {
    #[doc = "Swaps in `dataset` as the current one and returns the shared handle now stored."]
    fn replace(&self, dataset: Dataset) -> Arc<Dataset>;

    #[doc = "Snapshot of the current dataset, or `None` before the first upload."]
    fn current(&self) -> Option<Arc<Dataset>>;
}
