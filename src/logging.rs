// src/logging.rs

use crate::{config::Config, errors::PlatformResult, models::ApiCallLog};
use flexi_logger::{
    detailed_format, Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming,
};
use tracing::info;

const LOG_BASENAME: &str = "unified-platform";
const MAX_LOG_BYTES: u64 = 5_000_000;

/// Starts the file logger. The returned handle must stay alive for the
/// lifetime of the process or buffered lines are lost.
///
/// The TUI owns the terminal, so only plain mode echoes warnings to stderr.
pub fn init_logging(config: &Config, echo_stderr: bool) -> PlatformResult<LoggerHandle> {
    std::fs::create_dir_all(&config.log_dir)?;

    let duplicate = if echo_stderr {
        Duplicate::Warn
    } else {
        Duplicate::None
    };

    let handle = Logger::try_with_str(&config.log_level)?
        .log_to_file(
            FileSpec::default()
                .directory(&config.log_dir)
                .basename(LOG_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(3),
        )
        .append()
        .format_for_files(detailed_format)
        .duplicate_to_stderr(duplicate)
        .start()?;

    info!(
        "logging to {} at level {}",
        config.log_dir.display(),
        config.log_level
    );
    Ok(handle)
}

/// One line per HTTP call, in the same layout the in-app log panel shows.
pub fn format_api_call(log: &ApiCallLog) -> String {
    format!(
        "[{}] {} - {} - Status: {} - Time: {}ms",
        log.timestamp.format("%H:%M:%S"),
        log.endpoint,
        log.request_summary,
        log.response_status,
        log.response_time_ms
    )
}

pub fn log_api_call(log: &ApiCallLog) {
    info!(
        endpoint = %log.endpoint,
        status = log.response_status,
        elapsed_ms = log.response_time_ms as u64,
        "{}",
        log.request_summary
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn api_call_line_layout() {
        let log = ApiCallLog {
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 5).unwrap(),
            endpoint: "http://a/api/chat".to_string(),
            request_summary: "chat A (3 messages)".to_string(),
            response_status: 200,
            response_time_ms: 42,
        };
        assert_eq!(
            format_api_call(&log),
            "[09:30:05] http://a/api/chat - chat A (3 messages) - Status: 200 - Time: 42ms"
        );
    }
}
