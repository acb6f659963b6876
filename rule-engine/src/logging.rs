use crate::error::{RuleError, RuleResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration for the rule engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Whether to include thread names in logs
    pub include_thread_names: bool,

    /// Whether to include file and line number information
    pub include_file_info: bool,

    /// Whether to enable colored output
    pub enable_colors: bool,

    /// Module-specific log levels
    pub module_levels: HashMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let mut module_levels = HashMap::new();
        module_levels.insert("rule_engine".to_string(), "info".to_string());
        module_levels.insert("message_view".to_string(), "warn".to_string());

        Self {
            level: "info".to_string(),
            include_thread_names: false,
            include_file_info: false,
            enable_colors: true,
            module_levels,
        }
    }
}

impl LoggingConfig {
    pub fn validate(&self) -> RuleResult<()> {
        if !levels::is_valid_level(&self.level) {
            return Err(RuleError::configuration(
                "logging",
                &format!("invalid log level '{}'", self.level),
            ));
        }
        for (module, level) in &self.module_levels {
            if !levels::is_valid_level(level) {
                return Err(RuleError::configuration(
                    "logging",
                    &format!("invalid log level '{}' for module '{}'", level, module),
                ));
            }
        }
        Ok(())
    }
}

/// Initialize logging based on the provided configuration
///
/// `RUST_LOG` directives, when set, take precedence over `config.level`.
pub fn init_logging(config: &LoggingConfig) -> RuleResult<()> {
    config.validate()?;

    let mut filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    for (module, level) in &config.module_levels {
        let directive = format!("{}={}", module, level);
        filter = filter.add_directive(directive.parse().map_err(|e| {
            RuleError::configuration("logging", &format!("invalid log directive: {}", e))
        })?);
    }

    // Try to initialize logging, ignore if already initialized
    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_names(config.include_thread_names)
                .with_file(config.include_file_info)
                .with_line_number(config.include_file_info)
                .with_ansi(config.enable_colors)
                .with_writer(std::io::stderr),
        )
        .try_init();

    match result {
        Ok(_) => tracing::debug!(level = %config.level, "Logging initialized"),
        Err(_) => tracing::debug!("Logging already initialized, skipping"),
    }

    Ok(())
}

/// Log level utilities
pub mod levels {
    /// Check if a log level string is valid
    pub fn is_valid_level(level: &str) -> bool {
        matches!(
            level.to_lowercase().as_str(),
            "trace" | "debug" | "info" | "warn" | "error" | "off"
        )
    }
}
