use crate::common::*;

use crate::enums::chart_type::*;
use crate::model::chart::row_condition::*;

#[doc = "A validated chart request: closed chart type, normalised selectors and row conditions."]
#[derive(Debug, Clone, PartialEq, Getters, new)]
#[getset(get = "pub")]
pub struct ChartSpec {
    chart_type: ChartType,
    x_column: String,
    y_column: Option<String>,
    hue: Option<String>,
    title: String,
    conditions: Vec<RowCondition>,
}

impl ChartSpec {
    pub fn require_y(&self) -> anyhow::Result<&str> {
        self.y_column.as_deref().ok_or_else(|| {
            anyhow!(
                "A y_column is required for a {} chart",
                self.chart_type.as_str()
            )
        })
    }

    pub fn require_hue(&self) -> anyhow::Result<&str> {
        self.hue.as_deref().ok_or_else(|| {
            anyhow!(
                "A hue column is required for a {} chart",
                self.chart_type.as_str()
            )
        })
    }
}
