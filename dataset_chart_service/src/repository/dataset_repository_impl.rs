use crate::common::*;

use crate::model::dataset::dataset::*;
use crate::traits::repository_traits::dataset_repository::*;

use std::sync::PoisonError;

#[doc = r#"
    In-memory holder of the single current dataset.

    Writers swap the whole `Arc` under a short write lock and readers clone it out under a
    read lock, so a reader always sees one complete dataset, old or new.
"#]
#[derive(Debug, Default)]
pub struct DatasetRepositoryImpl {
    slot: RwLock<Option<Arc<Dataset>>>,
}

impl DatasetRepositoryImpl {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DatasetRepository for DatasetRepositoryImpl {
    fn replace(&self, dataset: Dataset) -> Arc<Dataset> {
        let dataset: Arc<Dataset> = Arc::new(dataset);
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(Arc::clone(&dataset));
        dataset
    }

    fn current(&self) -> Option<Arc<Dataset>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils_modules::table_parser::*;

    #[test]
    fn empty_until_first_replace() {
        let repo: DatasetRepositoryImpl = DatasetRepositoryImpl::new();
        assert!(repo.current().is_none());

        let dataset: Dataset = parse_csv("a.csv", b"a\n1\n").unwrap();
        repo.replace(dataset);
        assert_eq!(repo.current().unwrap().column_names(), vec!["a"]);
    }

    #[test]
    fn replace_does_not_disturb_existing_snapshots() {
        let repo: DatasetRepositoryImpl = DatasetRepositoryImpl::new();
        repo.replace(parse_csv("old.csv", b"old\n1\n").unwrap());

        let before: Arc<Dataset> = repo.current().unwrap();
        repo.replace(parse_csv("new.csv", b"new\n2\n").unwrap());

        assert_eq!(before.column_names(), vec!["old"]);
        assert_eq!(repo.current().unwrap().column_names(), vec!["new"]);
    }

    #[test]
    fn concurrent_readers_see_whole_datasets() {
        let repo: Arc<DatasetRepositoryImpl> = Arc::new(DatasetRepositoryImpl::new());
        repo.replace(parse_csv("a.csv", b"a,b\n1,2\n").unwrap());

        let writer = {
            let repo = Arc::clone(&repo);
            std::thread::spawn(move || {
                for i in 0..200 {
                    let csv: String = format!("x{},y{}\n1,2\n", i, i);
                    repo.replace(parse_csv("w.csv", csv.as_bytes()).unwrap());
                }
            })
        };

        for _ in 0..200 {
            let snapshot: Arc<Dataset> = repo.current().unwrap();
            assert_eq!(snapshot.column_names().len(), 2);
            assert_eq!(*snapshot.row_count(), 1);
        }

        writer.join().unwrap();
    }
}
