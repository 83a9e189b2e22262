//! Logging Infrastructure
//!
//! `RUST_LOG` 优先于 `LOG_LEVEL`。设置日志目录后按天滚动写入文件，
//! 否则输出到 stdout。

use std::path::Path;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

const LOG_FILE_PREFIX: &str = "deal-server";

/// Initialize the logger with optional JSON format and file output
pub fn init_logger_with_file(
    log_level: Option<&str>,
    json: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    let writer = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(Path::new(dir))?;
            BoxMakeWriter::new(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX))
        }
        None => BoxMakeWriter::new(std::io::stdout),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(log_dir.is_none())
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))
}
