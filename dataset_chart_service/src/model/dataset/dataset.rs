use crate::common::*;

use crate::model::dataset::{cell_value::*, column::*};

#[doc = "Ordered mapping column name → distinct values offered as filter choices."]
pub type FilterOptionSet = Map<String, Value>;

#[derive(Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct Dataset {
    source_name: String,
    loaded_at: DateTime<Utc>,
    columns: Vec<Column>,
    row_count: usize,
}

impl Dataset {
    pub fn new(source_name: &str, columns: Vec<Column>) -> anyhow::Result<Self> {
        let row_count: usize = columns.first().map(|c| c.len()).unwrap_or(0);

        if let Some(ragged) = columns.iter().find(|c| c.len() != row_count) {
            return Err(anyhow!(
                "[Dataset->new] Column '{}' has {} values, expected {}",
                ragged.name(),
                ragged.len(),
                row_count
            ));
        }

        Ok(Dataset {
            source_name: source_name.to_string(),
            loaded_at: Utc::now(),
            columns,
            row_count,
        })
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name().to_string()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn require_column(&self, name: &str) -> anyhow::Result<&Column> {
        self.column(name)
            .ok_or_else(|| anyhow!("Column '{}' not found in dataset", name))
    }

    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    #[doc = "Row-oriented records, keys in column order."]
    pub fn rows(&self) -> Vec<Map<String, Value>> {
        (0..self.row_count)
            .map(|row| {
                self.columns
                    .iter()
                    .map(|column| (column.name().to_string(), column.values()[row].to_json()))
                    .collect::<Map<String, Value>>()
            })
            .collect()
    }

    #[doc = r#"
        Distinct values of every column a client may filter on.

        A column qualifies when it is categorical or has fewer than `distinct_threshold`
        distinct present values. Values keep first-seen order and columns keep file order.
    "#]
    pub fn filter_options(&self, distinct_threshold: usize) -> FilterOptionSet {
        let mut options: FilterOptionSet = Map::new();

        for column in &self.columns {
            let distinct: Vec<&CellValue> = column.distinct_values();

            if !column.is_numeric() || distinct.len() < distinct_threshold {
                let values: Vec<Value> = distinct.iter().map(|cell| cell.to_json()).collect();
                options.insert(column.name().to_string(), Value::Array(values));
            }
        }

        options
    }

    #[doc = "Transient view holding only the rows `keep` accepts. The source is never touched."]
    pub fn filter_rows<F>(&self, keep: F) -> Dataset
    where
        F: Fn(usize) -> bool,
    {
        let indices: Vec<usize> = (0..self.row_count).filter(|&row| keep(row)).collect();

        Dataset {
            source_name: self.source_name.clone(),
            loaded_at: self.loaded_at,
            columns: self.columns.iter().map(|c| c.take(&indices)).collect(),
            row_count: indices.len(),
        }
    }
}
