use crate::common::*;

use crate::model::dataset::{cell_value::*, column::*, dataset::*};
use crate::renderer::frame::*;
use crate::utils_modules::stats_utils::*;

#[doc = "Rows sharing one hue value. Without a hue column there is a single unnamed group."]
#[derive(Debug, Clone, PartialEq)]
pub struct HueGroup {
    pub name: Option<String>,
    pub rows: Vec<usize>,
}

pub fn hue_groups(data: &Dataset, hue: Option<&str>) -> anyhow::Result<Vec<HueGroup>> {
    let Some(hue) = hue else {
        return Ok(vec![HueGroup {
            name: None,
            rows: (0..*data.row_count()).collect(),
        }]);
    };

    let column: &Column = data.require_column(hue)?;
    let mut order: Vec<String> = Vec::new();
    let mut members: HashMap<String, Vec<usize>> = HashMap::new();

    for (row, cell) in column.values().iter().enumerate() {
        if cell.is_missing() {
            continue;
        }
        let label: String = cell.label();
        if !members.contains_key(&label) {
            order.push(label.clone());
        }
        members.entry(label).or_default().push(row);
    }

    if order.is_empty() {
        return Err(anyhow!("Hue column '{}' has no values to group by", hue));
    }

    Ok(order
        .into_iter()
        .map(|name| {
            let rows: Vec<usize> = members.remove(&name).unwrap_or_default();
            HueGroup {
                name: Some(name),
                rows,
            }
        })
        .collect())
}

#[doc = "Distinct present labels of `column` in first-seen order; fails when nothing is left to plot."]
pub fn category_labels(column: &Column) -> anyhow::Result<Vec<String>> {
    let labels: Vec<String> = column
        .distinct_values()
        .into_iter()
        .map(|cell| cell.label())
        .collect();

    if labels.is_empty() {
        return Err(anyhow!("Column '{}' has no values to plot", column.name()));
    }
    Ok(labels)
}

#[doc = "Distinct present labels of `column` in ascending value order."]
pub fn sorted_category_labels(column: &Column) -> anyhow::Result<Vec<String>> {
    let mut cells: Vec<&CellValue> = column.distinct_values();
    cells.sort_by(|a, b| a.sort_cmp(b));

    if cells.is_empty() {
        return Err(anyhow!("Column '{}' has no values to plot", column.name()));
    }
    Ok(cells.into_iter().map(|cell| cell.label()).collect())
}

#[doc = "Numeric values of the named column, one entry per row."]
pub fn measure(data: &Dataset, name: &str) -> anyhow::Result<Vec<Option<f64>>> {
    data.require_column(name)?.numbers()
}

#[doc = "Present values of `values` restricted to `rows`."]
pub fn present(values: &[Option<f64>], rows: &[usize]) -> Vec<f64> {
    rows.iter().filter_map(|&row| values.get(row).copied().flatten()).collect()
}

#[doc = "Slot of each row's label within `labels`, or `None` for missing or unknown labels."]
fn label_slots(keys: &Column, rows: &[usize], labels: &[String]) -> Vec<(usize, Option<usize>)> {
    let index: HashMap<&str, usize> = labels
        .iter()
        .enumerate()
        .map(|(slot, label)| (label.as_str(), slot))
        .collect();

    rows.iter()
        .map(|&row| {
            let slot: Option<usize> = keys
                .values()
                .get(row)
                .filter(|cell| !cell.is_missing())
                .and_then(|cell| index.get(cell.label().as_str()).copied());
            (row, slot)
        })
        .collect()
}

#[doc = "Values of `values` per label of `keys`, over the given rows."]
pub fn values_by_label(
    keys: &Column,
    values: &[Option<f64>],
    rows: &[usize],
    labels: &[String],
) -> Vec<Vec<f64>> {
    let mut grouped: Vec<Vec<f64>> = vec![Vec::new(); labels.len()];

    for (row, slot) in label_slots(keys, rows, labels) {
        if let (Some(slot), Some(Some(value))) = (slot, values.get(row)) {
            grouped[slot].push(*value);
        }
    }

    grouped
}

pub fn mean_by_label(
    keys: &Column,
    values: &[Option<f64>],
    rows: &[usize],
    labels: &[String],
) -> Vec<Option<f64>> {
    values_by_label(keys, values, rows, labels)
        .iter()
        .map(|group| mean(group))
        .collect()
}

pub fn count_by_label(keys: &Column, rows: &[usize], labels: &[String]) -> Vec<usize> {
    let mut counts: Vec<usize> = vec![0; labels.len()];

    for (_, slot) in label_slots(keys, rows, labels) {
        if let Some(slot) = slot {
            counts[slot] += 1;
        }
    }

    counts
}

#[doc = r#"
    Axis for a column plotted point by point, and each row's position on it.
    Numeric columns keep their values; other columns map each label to its category slot.
"#]
pub fn axis_positions(column: &Column) -> anyhow::Result<(AxisScale, Vec<Option<f64>>)> {
    if column.is_numeric() {
        let positions: Vec<Option<f64>> = column.numbers()?;
        let flat: Vec<f64> = positions.iter().flatten().copied().collect();
        let (lo, hi) = data_range(&flat)
            .ok_or_else(|| anyhow!("Column '{}' has no values to plot", column.name()))?;
        return Ok((AxisScale::Numeric(padded_range(lo, hi, 0.05)), positions));
    }

    let labels: Vec<String> = category_labels(column)?;
    let index: HashMap<&str, usize> = labels
        .iter()
        .enumerate()
        .map(|(slot, label)| (label.as_str(), slot))
        .collect();

    let positions: Vec<Option<f64>> = column
        .values()
        .iter()
        .map(|cell| {
            if cell.is_missing() {
                return None;
            }
            index.get(cell.label().as_str()).map(|&slot| slot as f64)
        })
        .collect();

    Ok((AxisScale::Categorical(labels), positions))
}

#[doc = "Value axis covering `values` and zero, padded at both ends."]
pub fn value_axis_with_zero<I>(values: I) -> AxisScale
where
    I: IntoIterator<Item = f64>,
{
    let mut flat: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
    flat.push(0.0);

    let (lo, hi) = data_range(&flat).unwrap_or((0.0, 1.0));
    let padded: Range<f64> = padded_range(lo, hi, 0.05);

    /* bars grow from zero, so no padding below a zero floor */
    let start: f64 = if lo >= 0.0 { 0.0 } else { padded.start };
    let end: f64 = if hi <= 0.0 { 0.0 } else { padded.end };

    if start < end {
        AxisScale::Numeric(start..end)
    } else {
        AxisScale::Numeric(0.0..1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str, cells: &[&str]) -> Column {
        Column::from_raw(
            name.to_string(),
            cells.iter().map(|c| c.to_string()).collect(),
        )
    }

    fn fixture() -> Dataset {
        Dataset::new(
            "fixture.csv",
            vec![
                column("product", &["b", "a", "b", "c", ""]),
                column("sales", &["10", "20", "30", "", "50"]),
                column("region", &["N", "S", "S", "N", "N"]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn without_hue_every_row_is_one_group() {
        let groups: Vec<HueGroup> = hue_groups(&fixture(), None).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, None);
        assert_eq!(groups[0].rows, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn hue_groups_keep_first_seen_order() {
        let groups: Vec<HueGroup> = hue_groups(&fixture(), Some("region")).unwrap();
        let names: Vec<Option<String>> = groups.iter().map(|g| g.name.clone()).collect();
        assert_eq!(names, vec![Some("N".to_string()), Some("S".to_string())]);
        assert_eq!(groups[0].rows, vec![0, 3, 4]);
        assert!(hue_groups(&fixture(), Some("missing")).is_err());
    }

    #[test]
    fn means_per_label_skip_missing_cells() {
        let data: Dataset = fixture();
        let keys: &Column = data.column("product").unwrap();
        let sales: Vec<Option<f64>> = measure(&data, "sales").unwrap();
        let labels: Vec<String> = category_labels(keys).unwrap();

        assert_eq!(labels, vec!["b", "a", "c"]);
        assert_eq!(
            mean_by_label(keys, &sales, &[0, 1, 2, 3, 4], &labels),
            vec![Some(20.0), Some(20.0), None]
        );
        assert_eq!(count_by_label(keys, &[0, 1, 2, 3, 4], &labels), vec![2, 1, 1]);
    }

    #[test]
    fn measure_rejects_text_columns() {
        let err = measure(&fixture(), "region").unwrap_err();
        assert!(err.to_string().contains("region"));
    }

    #[test]
    fn categorical_positions_follow_label_slots() {
        let data: Dataset = fixture();
        let (axis, positions) = axis_positions(data.column("region").unwrap()).unwrap();
        assert_eq!(axis, AxisScale::Categorical(vec!["N".into(), "S".into()]));
        assert_eq!(positions, vec![Some(0.0), Some(1.0), Some(1.0), Some(0.0), Some(0.0)]);
    }

    #[test]
    fn value_axis_starts_at_zero_for_positive_values() {
        match value_axis_with_zero(vec![10.0, 20.0]) {
            AxisScale::Numeric(range) => {
                assert_eq!(range.start, 0.0);
                assert!(range.end > 20.0);
            }
            other => panic!("unexpected axis {:?}", other),
        }
    }

    #[test]
    fn sorted_labels_order_numbers_numerically() {
        let keys: Column = column("year", &["2024", "2023", "2100", "2023"]);
        assert_eq!(sorted_category_labels(&keys).unwrap(), vec!["2023", "2024", "2100"]);
    }
}
