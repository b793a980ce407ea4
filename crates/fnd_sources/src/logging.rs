use std::collections::VecDeque;
use std::sync::Once;
use tracing::Level;

static INIT: Once = Once::new();

/// Tags log lines with a stack of prefixes, e.g. the keyword being analyzed.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    prefixes: VecDeque<String>,
}

impl Logger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefixes.push_back(prefix.into());
        self
    }

    fn format(&self, message: &str) -> String {
        let prefix: String = self.prefixes.iter().map(|p| format!("{} ", p)).collect();
        format!("{}{}", prefix, message)
    }

    pub fn info(&self, message: &str) {
        tracing::info!("{}", self.format(message));
    }

    pub fn warn(&self, message: &str) {
        tracing::warn!("{}", self.format(message));
    }

    pub fn error(&self, message: &str) {
        tracing::error!("{}", self.format(message));
    }

    pub fn debug(&self, message: &str) {
        tracing::debug!("{}", self.format(message));
    }
}

/// Install the stderr fmt subscriber once. Stdout is left for reports.
pub fn init_logging(level: Level) -> Logger {
    if !tracing::dispatcher::has_been_set() {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init();
        });
    }
    Logger::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_stack() {
        assert_eq!(Logger::new().format("fetched"), "fetched");
        let logger = Logger::new().with_prefix("[iphone]").with_prefix("📰");
        assert_eq!(logger.format("fetched"), "[iphone] 📰 fetched");
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging(Level::DEBUG);
        init_logging(Level::INFO).info("second init is a no-op");
    }
}
