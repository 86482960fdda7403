//! Runtime configuration: defaults < environment < CLI flags

use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "./events";
pub const DEFAULT_OUTPUT: &str = "./event-structures.plantuml";

pub const ENV_INPUT: &str = "EVENTUML_INPUT";
pub const ENV_OUTPUT: &str = "EVENTUML_OUTPUT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory (or single file) scanned for Go sources
    pub input: PathBuf,
    /// Diagram file to write
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl Config {
    /// Load from environment variables on top of the defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(v) = lookup(ENV_INPUT).filter(|v| !v.is_empty()) {
            config.input = PathBuf::from(v);
        }

        if let Some(v) = lookup(ENV_OUTPUT).filter(|v| !v.is_empty()) {
            config.output = PathBuf::from(v);
        }

        config
    }

    /// Apply command-line flags
    pub fn with_overrides(mut self, input: Option<PathBuf>, output: Option<PathBuf>) -> Self {
        if let Some(input) = input {
            self.input = input;
        }
        if let Some(output) = output {
            self.output = output;
        }
        self
    }
}
