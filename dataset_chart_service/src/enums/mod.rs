pub mod chart_type;
pub mod column_kind;
pub mod empty_policy;
pub mod upload_format;
