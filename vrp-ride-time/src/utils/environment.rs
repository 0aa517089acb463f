use std::sync::Arc;

/// A logger type which is called with various information regarding the work done.
pub type InfoLogger = Arc<dyn Fn(&str) + Send + Sync>;

/// Keeps track of environment specific settings shared by features.
#[derive(Clone)]
pub struct Environment {
    /// An information logger.
    pub logger: InfoLogger,
    /// Specifies whether diagnostic messages of individual evaluations are sent to the logger.
    pub is_verbose: bool,
}

impl Environment {
    /// Creates a new instance of `Environment`.
    pub fn new(logger: InfoLogger, is_verbose: bool) -> Self {
        Self { logger, is_verbose }
    }

    /// Creates an environment which swallows all messages.
    pub fn silent() -> Self {
        Self { logger: Arc::new(|_| {}), is_verbose: false }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self { logger: Arc::new(|msg| println!("{msg}")), is_verbose: false }
    }
}
