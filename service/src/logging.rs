use crate::config::Config;
use log::{LevelFilter, SetLoggerError};
use simplelog::{self, ColorChoice, ConfigBuilder};

/// Dependencies whose logs are dropped below Trace level.
const FILTERED_MODULES: &[&str] = &["hyper", "reqwest", "rustls", "tower", "axum", "mockito"];

pub struct Logger {}

impl Logger {
    /// Installs the global terminal logger.
    ///
    /// Dependency logs only show at Trace level. Production output is uncolored
    /// so log collectors do not receive ANSI escapes.
    pub fn init_logger(config: &Config) -> Result<(), SetLoggerError> {
        let apply_filters = Self::should_filter_dependencies(config.log_level_filter);

        simplelog::TermLogger::init(
            config.log_level_filter,
            Self::build_log_config(apply_filters),
            simplelog::TerminalMode::Mixed,
            Self::color_choice(config),
        )
    }

    fn should_filter_dependencies(level: LevelFilter) -> bool {
        level != LevelFilter::Trace
    }

    fn color_choice(config: &Config) -> ColorChoice {
        if config.is_production() {
            ColorChoice::Never
        } else {
            ColorChoice::Auto
        }
    }

    fn build_log_config(apply_filters: bool) -> simplelog::Config {
        let mut builder = ConfigBuilder::new();
        builder.set_time_format_rfc3339();

        if apply_filters {
            for module in FILTERED_MODULES {
                builder.add_filter_ignore_str(module);
            }
        }

        builder.build()
    }
}
