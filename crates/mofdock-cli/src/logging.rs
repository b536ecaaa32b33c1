use crate::error::{CliError, Result};
use std::fs::File;
use std::path::PathBuf;
use tracing_subscriber::{filter::LevelFilter, fmt, fmt::format::FmtSpan, prelude::*};

fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::ERROR;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// The log file keeps the per-site solver diagnostics even when the
/// terminal is quiet.
fn file_level_filter(terminal: LevelFilter) -> LevelFilter {
    terminal.max(LevelFilter::DEBUG)
}

/// Installs the global subscriber. The terminal follows `-v`/`-q`; the
/// optional log file also records when each docking run closes.
pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let terminal_level = level_filter(verbosity, quiet);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .compact()
        .with_filter(terminal_level);

    let file_layer = log_file
        .map(|path| -> Result<_> {
            let file = File::create(&path).map_err(CliError::Io)?;
            Ok(fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_thread_ids(true)
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(file_level_filter(terminal_level)))
        })
        .transpose()?;

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::Once;
    use tracing::{debug, error, info, trace, warn};

    static INIT: Once = Once::new();

    fn ensure_global_logger_is_set() {
        INIT.call_once(|| {
            setup_logging(3, false, None).expect("Failed to set up global logger for tests");
        });
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_filter(0, false), LevelFilter::WARN);
        assert_eq!(level_filter(1, false), LevelFilter::INFO);
        assert_eq!(level_filter(2, false), LevelFilter::DEBUG);
        assert_eq!(level_filter(7, false), LevelFilter::TRACE);
        assert_eq!(level_filter(3, true), LevelFilter::ERROR);
    }

    #[test]
    fn file_level_never_drops_below_debug() {
        assert_eq!(file_level_filter(LevelFilter::ERROR), LevelFilter::DEBUG);
        assert_eq!(file_level_filter(LevelFilter::INFO), LevelFilter::DEBUG);
        assert_eq!(file_level_filter(LevelFilter::TRACE), LevelFilter::TRACE);
    }

    #[test]
    #[serial]
    fn initialization_and_macros_work() {
        ensure_global_logger_is_set();

        error!("This is an error");
        warn!("This is a warning");
        info!(site = 0, "Placed cluster at site 0.");
        debug!("This is debug");
        trace!("This is trace");
    }

    #[test]
    #[serial]
    fn file_layer_records_structured_fields() {
        let temp_dir = tempfile::tempdir().unwrap();
        let log_path = temp_dir.path().join("dock.log");

        let file = File::create(&log_path).unwrap();
        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_thread_ids(true);
        let subscriber = tracing_subscriber::registry().with(file_layer);

        tracing::subscriber::with_default(subscriber, || {
            debug!(site = 3, offset = 1.5, "Solved bond position.");
        });

        let content = std::fs::read_to_string(log_path).unwrap();
        assert!(content.contains("Solved bond position."));
        assert!(content.contains("site=3"));
        assert!(content.contains("DEBUG"));
        assert!(content.contains("ThreadId"));
    }

    #[test]
    #[serial]
    fn invalid_log_file_path_propagates_error() {
        let invalid_path = PathBuf::from("/");

        if cfg!(unix) && invalid_path.is_dir() {
            let result = setup_logging(0, false, Some(invalid_path));
            assert!(matches!(result, Err(CliError::Io(_))));
        }
    }
}
