//! Console settings, read from the environment.

use std::env;

use stockledger_observability::ObservabilityConfig;

pub const PROMPT_ENV: &str = "STOCKLEDGER_PROMPT";
pub const CONFIRM_DELETE_ENV: &str = "STOCKLEDGER_CONFIRM_DELETE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Printed before each input line.
    pub prompt: String,
    /// Ask for a `y`/`n` confirmation before deleting.
    pub confirm_deletes: bool,
    pub logging: ObservabilityConfig,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prompt: "> ".to_string(),
            confirm_deletes: true,
            logging: ObservabilityConfig::default(),
        }
    }
}

impl ConsoleConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self {
            logging: ObservabilityConfig::from_lookup(&lookup),
            ..Self::default()
        };

        if let Some(prompt) = lookup(PROMPT_ENV) {
            config.prompt = prompt;
        }
        if let Some(raw) = lookup(CONFIRM_DELETE_ENV) {
            config.confirm_deletes = !matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "0" | "false" | "no" | "off"
            );
        }
        config
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_confirm_deletes(mut self, confirm: bool) -> Self {
        self.confirm_deletes = confirm;
        self
    }
}
