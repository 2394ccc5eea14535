use crate::common::*;

use crate::model::configs::{dataset_config::*, logging_config::*, server_config::*};

use crate::utils_modules::io_utils::*;

use crate::env_configuration::env_config::*;

static TOTAL_CONFIG: once_lazy<TotalConfig> = once_lazy::new(initialize_server_config);

#[doc = "Function to initialize Server configuration information instances"]
pub fn initialize_server_config() -> TotalConfig {
    info!("initialize_server_config() START!");
    TotalConfig::new()
}

#[derive(Debug, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct TotalConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[doc = "HTTP listener 설정 정보"]
pub fn get_server_config_info() -> &'static ServerConfig {
    &TOTAL_CONFIG.server
}

#[doc = "Dataset store 설정 정보"]
pub fn get_dataset_config_info() -> &'static DatasetConfig {
    &TOTAL_CONFIG.dataset
}

#[doc = "Logger 설정 정보"]
pub fn get_logging_config_info() -> &'static LoggingConfig {
    &TOTAL_CONFIG.logging
}

impl TotalConfig {
    fn new() -> Self {
        match read_toml_from_file::<TotalConfig>(&SERVER_CONFIG_PATH) {
            Ok(config) => config,
            Err(e) => {
                let err_msg = "Failed to convert the data from SERVER_CONFIG_PATH into the TotalConfig structure.";
                error!("[TotalConfig->new] {} {:?}", err_msg, e);
                eprintln!("[TotalConfig->new] {} {:?}", err_msg, e);
                std::process::exit(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::empty_policy::*;

    #[test]
    fn parses_full_config() {
        let raw: &str = r#"
            [server]
            host = "127.0.0.1"
            port = 8080
            max_upload_bytes = 1024

            [dataset]
            empty_policy = "strict"
            filter_distinct_threshold = 5

            [logging]
            level = "debug"
            directory = "/tmp/logs"
            keep_files = 3
        "#;

        let config: TotalConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.server().bind_addr(), "127.0.0.1:8080");
        assert_eq!(*config.server().max_upload_bytes(), 1024);
        assert_eq!(*config.dataset().empty_policy(), EmptyPolicy::Strict);
        assert_eq!(*config.dataset().filter_distinct_threshold(), 5);
        assert_eq!(config.logging().level(), "debug");
    }

    #[test]
    fn optional_sections_fall_back_to_defaults() {
        let raw: &str = r#"
            [server]
            host = "0.0.0.0"
            port = 5000
        "#;

        let config: TotalConfig = toml::from_str(raw).unwrap();
        assert_eq!(*config.dataset().empty_policy(), EmptyPolicy::Sample);
        assert_eq!(*config.dataset().filter_distinct_threshold(), 10);
        assert_eq!(*config.server().max_upload_bytes(), 16 * 1024 * 1024);
        assert_eq!(*config.logging().keep_files(), 10);
    }

    #[test]
    fn unknown_empty_policy_is_rejected() {
        let raw: &str = r#"
            [server]
            host = "0.0.0.0"
            port = 5000

            [dataset]
            empty_policy = "lenient"
        "#;

        assert!(toml::from_str::<TotalConfig>(raw).is_err());
    }
}
