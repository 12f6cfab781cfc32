use log::LevelFilter;

use crate::stderr_buffer::BufferedStderr;

/// Environment variable that overrides the log filter (env_logger syntax).
pub const LOG_ENV: &str = "ICH_RISK_LOG";

/// Install the global logger.
///
/// `verbose` raises the default level from `warn` to `debug`. Output goes
/// through the stderr buffer so the TUI can hold messages until the
/// terminal is restored.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let result = env_logger::Builder::new()
        .filter_level(level)
        .parse_env(LOG_ENV)
        .format_timestamp(None)
        .format_target(false)
        .target(env_logger::Target::Pipe(Box::new(BufferedStderr)))
        .try_init();

    if let Err(e) = result {
        eprintln!("Logger already initialized: {}", e);
    }
}
