use crate::common::*;

use crate::enums::column_kind::*;
use crate::model::dataset::cell_value::*;

#[derive(Debug, Clone, Getters, new)]
#[getset(get = "pub")]
pub struct Column {
    name: String,
    kind: ColumnKind,
    values: Vec<CellValue>,
}

impl Column {
    #[doc = r#"
        Builds a column from raw text cells and infers its kind.

        The column is numeric when at least one cell is present and every present cell
        parses as a finite number. Otherwise every present cell is kept as text.
    "#]
    pub fn from_raw(name: String, raw_cells: Vec<String>) -> Self {
        let numeric: bool = raw_cells
            .iter()
            .filter(|raw| !is_missing_marker(raw))
            .try_fold(false, |_, raw| {
                raw.trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .map(|_| true)
            })
            .unwrap_or(false);

        let integral: bool = numeric
            && raw_cells
                .iter()
                .filter(|raw| !is_missing_marker(raw))
                .all(|raw| raw.trim().parse::<i64>().is_ok());

        let values: Vec<CellValue> = raw_cells
            .into_iter()
            .map(|raw| {
                if is_missing_marker(&raw) {
                    CellValue::Missing
                } else if integral {
                    raw.trim()
                        .parse::<i64>()
                        .map(CellValue::Integer)
                        .unwrap_or(CellValue::Missing)
                } else if numeric {
                    raw.trim()
                        .parse::<f64>()
                        .map(CellValue::Number)
                        .unwrap_or(CellValue::Missing)
                } else {
                    CellValue::Text(raw)
                }
            })
            .collect();

        let kind: ColumnKind = if numeric {
            ColumnKind::Numeric
        } else {
            ColumnKind::Categorical
        };

        Column::new(name, kind, values)
    }

    #[doc = r#"
        Builds a column from already-typed cells.
        Integers mixed with fractional numbers widen to floats; mixed text columns degrade to text.
    "#]
    pub fn from_cells(name: String, cells: Vec<CellValue>) -> Self {
        let present: Vec<&CellValue> = cells.iter().filter(|c| !c.is_missing()).collect();
        let numeric: bool = !present.is_empty() && present.iter().all(|c| c.as_f64().is_some());

        if numeric {
            let widen: bool = present.iter().any(|c| matches!(c, CellValue::Number(_)));
            let values: Vec<CellValue> = cells
                .into_iter()
                .map(|cell| match cell {
                    CellValue::Integer(i) if widen => CellValue::Number(i as f64),
                    other => other,
                })
                .collect();
            return Column::new(name, ColumnKind::Numeric, values);
        }

        let values: Vec<CellValue> = cells
            .into_iter()
            .map(|cell| match cell {
                CellValue::Integer(i) => CellValue::Text(i.to_string()),
                CellValue::Number(n) => CellValue::Text(format_number(n)),
                other => other,
            })
            .collect();

        Column::new(name, ColumnKind::Categorical, values)
    }

    pub fn is_numeric(&self) -> bool {
        self.kind == ColumnKind::Numeric
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[doc = "Distinct present values in first-seen order."]
    pub fn distinct_values(&self) -> Vec<&CellValue> {
        let mut seen: HashSet<String> = HashSet::new();

        self.values
            .iter()
            .filter(|cell| !cell.is_missing())
            .filter(|cell| seen.insert(cell.label()))
            .collect()
    }

    #[doc = "Numeric view of the column; fails for text columns so the caller can report the column by name."]
    pub fn numbers(&self) -> anyhow::Result<Vec<Option<f64>>> {
        if !self.is_numeric() {
            return Err(anyhow!(
                "Column '{}' is not numeric and cannot be used as a measure",
                self.name
            ));
        }

        Ok(self.values.iter().map(|cell| cell.as_f64()).collect())
    }

    pub fn take(&self, indices: &[usize]) -> Column {
        let values: Vec<CellValue> = indices
            .iter()
            .filter_map(|&i| self.values.get(i).cloned())
            .collect();

        Column::new(self.name.clone(), self.kind, values)
    }
}
