use crate::common::*;

use crate::model::dataset::{cell_value::*, column::*, dataset::*};

#[derive(Debug, Clone, PartialEq)]
pub enum RowCondition {
    Equals {
        column: String,
        value: Value,
    },
    Between {
        column: String,
        min: Option<f64>,
        max: Option<f64>,
    },
}

impl RowCondition {
    pub fn column(&self) -> &str {
        match self {
            RowCondition::Equals { column, .. } | RowCondition::Between { column, .. } => column,
        }
    }

    fn accepts(&self, cell: &CellValue) -> bool {
        match self {
            RowCondition::Equals { value, .. } => cell.matches(value),
            RowCondition::Between { min, max, .. } => match cell.as_f64() {
                Some(n) => min.map_or(true, |lo| n >= lo) && max.map_or(true, |hi| n <= hi),
                None => false,
            },
        }
    }
}

#[doc = r#"
    Restricts the dataset to rows satisfying every condition and returns the resulting view.
    A condition naming an absent column is an error rather than a silent no-op.
"#]
pub fn apply_conditions(dataset: &Dataset, conditions: &[RowCondition]) -> anyhow::Result<Dataset> {
    let columns: Vec<&Column> = conditions
        .iter()
        .map(|condition| {
            dataset
                .require_column(condition.column())
                .context("Cannot apply filter")
        })
        .collect::<anyhow::Result<_>>()?;

    Ok(dataset.filter_rows(|row| {
        conditions
            .iter()
            .zip(&columns)
            .all(|(condition, column)| condition.accepts(&column.values()[row]))
    }))
}
