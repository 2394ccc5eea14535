use crate::common::*;

use crate::enums::column_kind::*;
use crate::model::dataset::{cell_value::*, column::*, dataset::*};

pub const SAMPLE_SOURCE_NAME: &str = "sample";

static SAMPLE_DATASET: once_lazy<Arc<Dataset>> = once_lazy::new(|| Arc::new(build_sample_dataset()));

#[doc = "Built-in product sales table served before the first upload under the `sample` policy."]
pub fn sample_dataset() -> Arc<Dataset> {
    Arc::clone(&SAMPLE_DATASET)
}

fn text_column(name: &str, cells: [&str; 6]) -> Column {
    let values: Vec<CellValue> = cells
        .iter()
        .chain(cells.iter())
        .map(|c| CellValue::Text(c.to_string()))
        .collect();

    Column::new(name.to_string(), ColumnKind::Categorical, values)
}

fn number_column(name: &str, cells: [f64; 6]) -> Column {
    let values: Vec<CellValue> = cells
        .iter()
        .chain(cells.iter())
        .map(|n| CellValue::Number(*n))
        .collect();

    Column::new(name.to_string(), ColumnKind::Numeric, values)
}

fn build_sample_dataset() -> Dataset {
    let columns: Vec<Column> = vec![
        text_column(
            "product",
            ["Laptop", "Smartphone", "Headphones", "Chair", "Desk", "Lamp"],
        ),
        text_column(
            "category",
            ["Electronics", "Electronics", "Electronics", "Furniture", "Furniture", "Furniture"],
        ),
        text_column("region", ["North", "South", "East", "West", "North", "South"]),
        number_column("sales", [45000.0, 35000.0, 15000.0, 12000.0, 20000.0, 5000.0]),
        number_column("quantity", [30.0, 50.0, 100.0, 20.0, 15.0, 40.0]),
        text_column(
            "month",
            ["January", "January", "February", "February", "March", "March"],
        ),
        number_column("year", [2023.0; 6]),
        number_column("profit_margin", [0.15, 0.25, 0.35, 0.20, 0.30, 0.40]),
    ];

    /* every column above has exactly twelve cells */
    match Dataset::new(SAMPLE_SOURCE_NAME, columns) {
        Ok(dataset) => dataset,
        Err(e) => unreachable!("sample dataset is rectangular: {:?}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_has_eight_columns_and_twelve_rows() {
        let dataset: Arc<Dataset> = sample_dataset();
        assert_eq!(
            dataset.column_names(),
            vec![
                "product",
                "category",
                "region",
                "sales",
                "quantity",
                "month",
                "year",
                "profit_margin"
            ]
        );
        assert_eq!(*dataset.row_count(), 12);
    }

    #[test]
    fn sample_filter_options_cover_small_numeric_columns() {
        let options: FilterOptionSet = sample_dataset().filter_options(10);
        assert_eq!(options["year"], json!([2023]));
        assert_eq!(options["region"], json!(["North", "South", "East", "West"]));
        assert!(options.contains_key("sales"));
    }
}
