pub mod chart_request;
pub mod chart_spec;
pub mod row_condition;
