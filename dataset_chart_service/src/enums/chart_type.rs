use crate::common::*;

use crate::errors::app_error::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartType {
    Bar,
    Line,
    Pie,
    Scatter,
    Box,
    Violin,
    Heatmap,
    Histogram,
    Kde,
}

impl ChartType {
    #[cfg(test)]
    pub const ALL: [ChartType; 9] = [
        ChartType::Bar,
        ChartType::Line,
        ChartType::Pie,
        ChartType::Scatter,
        ChartType::Box,
        ChartType::Violin,
        ChartType::Heatmap,
        ChartType::Histogram,
        ChartType::Kde,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Pie => "pie",
            ChartType::Scatter => "scatter",
            ChartType::Box => "box",
            ChartType::Violin => "violin",
            ChartType::Heatmap => "heatmap",
            ChartType::Histogram => "histogram",
            ChartType::Kde => "kde",
        }
    }

    #[doc = "Whether the chart reads the y column. Distribution charts only look at x."]
    pub fn uses_y(&self) -> bool {
        !matches!(self, ChartType::Histogram | ChartType::Kde)
    }
}

impl FromStr for ChartType {
    type Err = AppError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "bar" => Ok(ChartType::Bar),
            "line" => Ok(ChartType::Line),
            "pie" => Ok(ChartType::Pie),
            "scatter" => Ok(ChartType::Scatter),
            "box" => Ok(ChartType::Box),
            "violin" => Ok(ChartType::Violin),
            "heatmap" => Ok(ChartType::Heatmap),
            "histogram" | "hist" => Ok(ChartType::Histogram),
            "kde" | "density" => Ok(ChartType::Kde),
            _ => Err(AppError::UnsupportedChartType(tag.to_string())),
        }
    }
}

impl Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_variant_parses_from_its_own_tag() {
        for chart_type in ChartType::ALL {
            assert_eq!(chart_type.as_str().parse::<ChartType>().unwrap(), chart_type);
        }
    }

    #[test]
    fn tags_are_trimmed_and_case_insensitive() {
        assert_eq!(" Bar ".parse::<ChartType>().unwrap(), ChartType::Bar);
        assert_eq!("DENSITY".parse::<ChartType>().unwrap(), ChartType::Kde);
        assert_eq!("hist".parse::<ChartType>().unwrap(), ChartType::Histogram);
    }

    #[test]
    fn unknown_tag_is_rejected_with_its_name() {
        match "not_a_type".parse::<ChartType>() {
            Err(AppError::UnsupportedChartType(tag)) => assert_eq!(tag, "not_a_type"),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
