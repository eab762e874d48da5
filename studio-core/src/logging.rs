//! Process-wide logger setup.

use crate::config::LoggingConfig;

/// Install the `env_logger` backend for the `log` facade.
///
/// The configured level is the default filter; `RUST_LOG` overrides it.
/// Calling this more than once is harmless, later calls are ignored.
pub fn init(config: &LoggingConfig) {
    let env = env_logger::Env::default().default_filter_or(config.level.to_ascii_lowercase());
    let installed = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .format_module_path(false)
        .try_init()
        .is_ok();

    if installed {
        log::debug!("Logger initialised at level '{}'", config.level);
    }
}
