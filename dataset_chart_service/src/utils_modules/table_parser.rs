use crate::common::*;

use crate::model::dataset::{cell_value::*, column::*, dataset::*};

#[doc = r#"
    Header names as the table will expose them.

    Blank headers become `Unnamed: <index>` and repeated names get a `.1`, `.2`, ... suffix,
    so every column stays addressable by name.
"#]
fn normalize_headers<'a, I>(raw_headers: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut headers: Vec<String> = Vec::new();

    for (idx, raw) in raw_headers.into_iter().enumerate() {
        let base: String = if raw.trim().is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            raw.to_string()
        };

        let mut name: String = base.clone();
        while let Some(count) = seen.get_mut(&name) {
            *count += 1;
            name = format!("{}.{}", base, count);
        }
        seen.insert(name.clone(), 0);
        headers.push(name);
    }

    headers
}

#[doc = r#"
    Parses comma-separated text with a header row into a `Dataset`.

    1. The first record is the header; an input without one has no columns to parse.
    2. A record shorter than the header is padded with missing cells. A longer one is an
       error, since its extra fields belong to no column.
    3. Each column's kind is inferred from its cells (see `Column::from_raw`).

    # Errors
    The underlying reader message is kept: invalid UTF-8, missing header, too many fields.
"#]
pub fn parse_csv(source_name: &str, bytes: &[u8]) -> anyhow::Result<Dataset> {
    let mut reader: csv::Reader<&[u8]> = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = {
        let raw: &csv::StringRecord = reader.headers()?;
        if raw.is_empty() || (raw.len() == 1 && raw[0].trim().is_empty()) {
            return Err(anyhow!("No columns to parse from file"));
        }
        normalize_headers(raw.iter())
    };

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];

    for record in reader.records() {
        let record: csv::StringRecord = record?;

        if record.len() > headers.len() {
            let line: u64 = record.position().map(|pos| pos.line()).unwrap_or(0);
            return Err(anyhow!(
                "Error tokenizing data. Expected {} fields in line {}, saw {}",
                headers.len(),
                line,
                record.len()
            ));
        }

        for (idx, column) in cells.iter_mut().enumerate() {
            column.push(record.get(idx).unwrap_or_default().to_string());
        }
    }

    let columns: Vec<Column> = headers
        .into_iter()
        .zip(cells)
        .map(|(name, raw_cells)| Column::from_raw(name, raw_cells))
        .collect();

    Dataset::new(source_name, columns)
}

fn cell_from_json(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Missing,
        Value::Number(n) => n
            .as_i64()
            .map(CellValue::Integer)
            .or_else(|| n.as_f64().map(CellValue::Number))
            .unwrap_or(CellValue::Missing),
        Value::String(s) if is_missing_marker(s) => CellValue::Missing,
        Value::String(s) => CellValue::Text(s.clone()),
        Value::Bool(b) => CellValue::Text(b.to_string()),
        other => CellValue::Text(other.to_string()),
    }
}

#[doc = r#"
    Parses a JSON array of records (or a single record) into a `Dataset`.
    Columns appear in first-seen key order; a key absent from a record is a missing cell.
"#]
pub fn parse_json_records(source_name: &str, bytes: &[u8]) -> anyhow::Result<Dataset> {
    let parsed: Value = serde_json::from_slice(bytes)?;

    let records: Vec<Value> = match parsed {
        Value::Array(records) => records,
        record @ Value::Object(_) => vec![record],
        _ => return Err(anyhow!("JSON content must be an array of records")),
    };

    if records.is_empty() {
        return Err(anyhow!("The file appears to be empty"));
    }

    let mut names: Vec<String> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (row, record) in records.iter().enumerate() {
        let object: &Map<String, Value> = record
            .as_object()
            .ok_or_else(|| anyhow!("Record {} is not a JSON object", row))?;

        for key in object.keys() {
            if !index.contains_key(key) {
                index.insert(key.clone(), names.len());
                names.push(key.clone());
            }
        }
    }

    if names.is_empty() {
        return Err(anyhow!("No columns to parse from file"));
    }

    let columns: Vec<Column> = names
        .into_iter()
        .map(|name| {
            let cells: Vec<CellValue> = records
                .iter()
                .map(|record| record.get(&name).map(cell_from_json).unwrap_or(CellValue::Missing))
                .collect();
            Column::from_cells(name, cells)
        })
        .collect();

    Dataset::new(source_name, columns)
}
