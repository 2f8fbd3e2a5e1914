use crate::primitives::*;
use std::sync::OnceLock;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Global logger instance - ensures single initialization
static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Logger implementation on top of a `tracing` subscriber
#[derive(Debug)]
pub struct Logger {
    config: LoggerConfig,
}

/// `EnvFilter` directives used when `RUST_LOG` is unset: our crates at the
/// configured level, everything else at warn
pub fn default_filter(level: LogLevel) -> String {
    let lvl = level.as_directive();
    format!("safestate_lib={lvl},safestate={lvl},warn")
}

impl Logger {
    /// Initialize the global logger
    pub fn init(config: LoggerConfig) -> Result<&'static Self, LoggerError> {
        if GLOBAL_LOGGER.get().is_some() {
            return Err(LoggerError::AlreadyInitialized);
        }

        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter(config.level)));

        // Reports own stdout, so logs default to stderr
        let fmt_layer = match (config.output, config.format) {
            (LogOutput::Stderr, LogFormat::Text) => fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(config.ansi)
                .compact()
                .boxed(),
            (LogOutput::Stderr, LogFormat::Json) => fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false)
                .json()
                .boxed(),
            (LogOutput::Stderr, LogFormat::Pretty) => fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(config.ansi)
                .pretty()
                .boxed(),
            (LogOutput::Stdout, LogFormat::Text) => fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(config.ansi)
                .compact()
                .boxed(),
            (LogOutput::Stdout, LogFormat::Json) => fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(false)
                .json()
                .boxed(),
            (LogOutput::Stdout, LogFormat::Pretty) => fmt::layer()
                .with_writer(std::io::stdout)
                .with_ansi(config.ansi)
                .pretty()
                .boxed(),
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| LoggerError::InitializationFailed {
                reason: e.to_string(),
            })?;

        let level = config.level;
        let format = config.format;
        let output = config.output;

        let logger = GLOBAL_LOGGER.get_or_init(|| Logger { config });

        tracing::debug!(
            level = ?level,
            format = ?format,
            output = ?output,
            "Logger initialized"
        );

        Ok(logger)
    }

    /// Get reference to the global logger instance
    pub fn global() -> Option<&'static Self> {
        GLOBAL_LOGGER.get()
    }

    /// Log an info message with optional context, if the configured level allows it
    pub fn info(&self, message: &str, context: Option<LogContext>) {
        if !LogLevel::Info.should_log(self.config.level) {
            return;
        }
        if let Some(ctx) = context {
            tracing::info!(
                operation = %ctx.operation,
                processes = ctx.processes,
                resources = ctx.resources,
                "{}", message
            );
        } else {
            tracing::info!("{}", message);
        }
    }
}

/// Span wrapping one analysis run
#[macro_export]
macro_rules! analysis_span {
    ($operation:expr) => {
        tracing::info_span!("analysis", operation = $operation)
    };
    ($operation:expr, processes = $n:expr, resources = $m:expr) => {
        tracing::info_span!(
            "analysis",
            operation = $operation,
            processes = $n,
            resources = $m
        )
    };
}

/// Quick logging macro that uses the global logger if available, falls back to tracing
#[macro_export]
macro_rules! log_info {
    ($msg:expr) => {
        if let Some(logger) = $crate::logger::Logger::global() {
            logger.info($msg, None);
        } else {
            tracing::info!("{}", $msg);
        }
    };
    ($msg:expr, $ctx:expr) => {
        if let Some(logger) = $crate::logger::Logger::global() {
            logger.info($msg, Some($ctx));
        } else {
            tracing::info!("{}", $msg);
        }
    };
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
