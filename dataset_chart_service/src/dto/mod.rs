pub mod chart_response;
pub mod upload_result;
