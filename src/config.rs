//! Process-wide runtime mode.
//!
//! The only environment-sensitive behavior in this crate is whether error
//! responses include stack renderings by default. That default comes from a
//! [`RuntimeMode`] resolved once per process and threaded into option
//! resolution; explicit options always take precedence.

use std::sync::OnceLock;

/// Environment variables consulted, in order, by [`RuntimeMode::from_env`].
pub const MODE_ENV_VARS: [&str; 2] = ["STINS_ENV", "APP_ENV"];

/// Whether the process runs in production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RuntimeMode {
    /// Any mode other than production, including an unset variable.
    #[default]
    Development,
    /// Stack renderings are withheld from error responses by default.
    Production,
}

impl RuntimeMode {
    /// Interprets a mode string. Only `production` selects
    /// [`RuntimeMode::Production`]; every other value, including none, is
    /// development.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some("production") => RuntimeMode::Production,
            _ => RuntimeMode::Development,
        }
    }

    /// Reads the mode from the first set variable in [`MODE_ENV_VARS`].
    pub fn from_env() -> Self {
        let value = MODE_ENV_VARS
            .iter()
            .find_map(|name| std::env::var(name).ok());
        Self::from_env_value(value.as_deref())
    }

    /// The mode for this process, read from the environment on first use.
    pub fn current() -> Self {
        static CURRENT: OnceLock<RuntimeMode> = OnceLock::new();
        *CURRENT.get_or_init(|| {
            let mode = Self::from_env();
            tracing::debug!(?mode, "resolved runtime mode");
            mode
        })
    }

    /// Returns true in production.
    pub fn is_production(self) -> bool {
        self == RuntimeMode::Production
    }

    /// Default for including stack renderings in error responses.
    pub fn include_stack_by_default(self) -> bool {
        !self.is_production()
    }
}
