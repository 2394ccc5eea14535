use crate::common::*;

use crate::model::configs::logging_config::*;

fn log_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(
        w,
        "[{}] [{}] [{}:{}] {}",
        now.format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.module_path().unwrap_or("<unnamed>"),
        record.line().unwrap_or(0),
        &record.args()
    )
}

#[doc = r#"
    전역 로거를 설정하는 함수.

    로그는 설정된 디렉토리에 일 단위로 회전되는 파일로 기록되며, 동시에 stdout 으로도 출력된다.
    반환된 `LoggerHandle` 이 drop 되면 파일 기록이 중단되므로 main 에서 보관해야 한다.

    # Arguments
    * `logging_config` - 로그 레벨, 디렉토리, 보관 파일 개수

    # Returns
    * `anyhow::Result<LoggerHandle>`
"#]
pub fn set_global_logger(logging_config: &LoggingConfig) -> anyhow::Result<LoggerHandle> {
    let handle: LoggerHandle = Logger::try_with_str(logging_config.level())
        .context("[set_global_logger] invalid log level")?
        .log_to_file(
            FileSpec::default()
                .directory(logging_config.directory())
                .basename("dataset_chart_service"),
        )
        .rotate(
            Criterion::Age(Age::Day),
            Naming::Timestamps,
            Cleanup::KeepLogFiles(*logging_config.keep_files()),
        )
        .format_for_files(log_format)
        .format_for_stdout(log_format)
        .duplicate_to_stdout(Duplicate::All)
        .start()
        .context("[set_global_logger] failed to start logger")?;

    Ok(handle)
}
