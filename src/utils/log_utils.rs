use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::Path;

const FILE_PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%S%.fZ)(utc)} {l} {t} - {m}{n}";

/// Terminal output goes through `tracing_subscriber`, which also picks up
/// `log` records. With a log file configured, `log4rs` appends there
/// instead so the console stays readable.
pub fn init_logging(log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = FileAppender::builder()
                .encoder(Box::new(PatternEncoder::new(FILE_PATTERN)))
                .build(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;

            let config = Config::builder()
                .appender(Appender::builder().build("file", Box::new(file)))
                .build(Root::builder().appender("file").build(LevelFilter::Info))
                .context("Invalid log4rs configuration")?;

            log4rs::init_config(config).context("Logger already initialised")?;
        }
        None => {
            tracing_subscriber::fmt::try_init().map_err(|e| anyhow!(e.to_string()))?;
        }
    }
    Ok(())
}
