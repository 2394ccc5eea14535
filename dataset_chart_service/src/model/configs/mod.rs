pub mod dataset_config;
pub mod logging_config;
pub mod server_config;
pub mod total_config;
