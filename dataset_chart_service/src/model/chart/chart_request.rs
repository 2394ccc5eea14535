use crate::common::*;

use crate::enums::chart_type::*;
use crate::errors::app_error::*;
use crate::model::chart::{chart_spec::*, row_condition::*};

#[doc = "Numeric slicer: keeps rows whose value lies within `[min, max]`. Either bound may be open."]
#[derive(Debug, Clone, Deserialize, Serialize, Getters, new)]
#[getset(get = "pub")]
pub struct RangeFilter {
    pub column: String,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
}

#[doc = "Body of `POST /api/chart` exactly as clients send it."]
#[derive(Debug, Clone, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct ChartRequest {
    #[serde(rename = "type", default = "default_chart_type")]
    pub chart_type: String,
    #[serde(default = "default_x_column")]
    pub x_column: String,
    #[serde(default = "default_y_column")]
    pub y_column: Option<String>,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub hue: Option<String>,
    #[serde(default)]
    pub filter_column: Option<String>,
    #[serde(default)]
    pub filter_value: Option<Value>,
    #[serde(default, rename = "categoryFilter")]
    pub category_filter: Option<String>,
    #[serde(default, rename = "regionFilter")]
    pub region_filter: Option<String>,
    #[serde(default)]
    pub filters: Option<Map<String, Value>>,
    #[serde(default)]
    pub range_filter: Option<RangeFilter>,
}

fn default_chart_type() -> String {
    "bar".to_string()
}

fn default_x_column() -> String {
    "product".to_string()
}

fn default_y_column() -> Option<String> {
    Some("sales".to_string())
}

fn default_title() -> String {
    "Chart".to_string()
}

/* Select boxes send "" for "None"/"All" */
fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn is_blank_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

impl ChartRequest {
    #[doc = r#"
        Validates the request and turns it into a `ChartSpec`.

        The chart type is parsed before anything else so an unknown tag is rejected
        before the dataset is read. Blank selectors are dropped, and every filter form
        the clients use is flattened into one list of row conditions.
    "#]
    pub fn resolve(&self) -> Result<ChartSpec, AppError> {
        let chart_type: ChartType = self.chart_type.parse()?;

        let x_column: String = non_blank(&Some(self.x_column.clone())).ok_or_else(|| {
            AppError::InvalidRequest("x_column must name a column".to_string())
        })?;

        let mut conditions: Vec<RowCondition> = Vec::new();

        if let (Some(column), Some(value)) = (non_blank(&self.filter_column), &self.filter_value)
        {
            if !is_blank_value(value) {
                conditions.push(RowCondition::Equals {
                    column,
                    value: value.clone(),
                });
            }
        }

        for (column, value) in [
            ("category", &self.category_filter),
            ("region", &self.region_filter),
        ] {
            if let Some(value) = non_blank(value) {
                conditions.push(RowCondition::Equals {
                    column: column.to_string(),
                    value: Value::String(value),
                });
            }
        }

        if let Some(filters) = &self.filters {
            for (column, value) in filters {
                if !is_blank_value(value) {
                    conditions.push(RowCondition::Equals {
                        column: column.clone(),
                        value: value.clone(),
                    });
                }
            }
        }

        if let Some(range) = &self.range_filter {
            if range.min.is_some() || range.max.is_some() {
                conditions.push(RowCondition::Between {
                    column: range.column.clone(),
                    min: range.min,
                    max: range.max,
                });
            }
        }

        Ok(ChartSpec::new(
            chart_type,
            x_column,
            non_blank(&self.y_column).filter(|_| chart_type.uses_y()),
            non_blank(&self.hue),
            self.title.clone(),
            conditions,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: Value) -> ChartRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn distribution_charts_drop_the_y_column() {
        let spec: ChartSpec = request(json!({
            "type": "kde", "x_column": "sales", "y_column": "profit"
        }))
        .resolve()
        .unwrap();
        assert!(spec.y_column().is_none());

        let spec: ChartSpec = request(json!({ "type": "histogram" })).resolve().unwrap();
        assert!(spec.y_column().is_none());

        let spec: ChartSpec = request(json!({ "type": "box" })).resolve().unwrap();
        assert_eq!(spec.y_column().as_deref(), Some("sales"));
    }

    #[test]
    fn empty_body_uses_defaults() {
        let spec: ChartSpec = request(json!({})).resolve().unwrap();
        assert_eq!(*spec.chart_type(), ChartType::Bar);
        assert_eq!(spec.x_column(), "product");
        assert_eq!(spec.y_column().as_deref(), Some("sales"));
        assert_eq!(spec.title(), "Chart");
        assert!(spec.hue().is_none());
        assert!(spec.conditions().is_empty());
    }

    #[test]
    fn blank_hue_and_filters_are_ignored() {
        let spec: ChartSpec = request(json!({
            "type": "line",
            "x_column": "month",
            "y_column": "sales",
            "hue": "",
            "categoryFilter": "",
            "regionFilter": "  ",
            "filter_column": "region",
            "filter_value": "",
            "filters": { "category": "", "region": null }
        }))
        .resolve()
        .unwrap();

        assert!(spec.hue().is_none());
        assert!(spec.conditions().is_empty());
    }

    #[test]
    fn every_filter_form_becomes_a_condition() {
        let spec: ChartSpec = request(json!({
            "type": "scatter",
            "x_column": "sales",
            "y_column": "quantity",
            "filter_column": "year",
            "filter_value": 2023,
            "categoryFilter": "Electronics",
            "regionFilter": "North",
            "filters": { "month": "January" },
            "range_filter": { "column": "sales", "min": 1000.0 }
        }))
        .resolve()
        .unwrap();

        assert_eq!(spec.conditions().len(), 5);
        assert_eq!(
            spec.conditions()[1],
            RowCondition::Equals {
                column: "category".into(),
                value: json!("Electronics")
            }
        );
        assert_eq!(
            spec.conditions()[4],
            RowCondition::Between {
                column: "sales".into(),
                min: Some(1000.0),
                max: None
            }
        );
    }

    #[test]
    fn unknown_type_fails_before_anything_else() {
        let result = request(json!({ "type": "not_a_type", "x_column": "" })).resolve();
        assert!(matches!(result, Err(AppError::UnsupportedChartType(tag)) if tag == "not_a_type"));
    }

    #[test]
    fn blank_x_column_is_an_invalid_request() {
        let result = request(json!({ "type": "bar", "x_column": " " })).resolve();
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    }
}
