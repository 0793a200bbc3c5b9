use serde::{Deserialize, Serialize};

fn default_capacity() -> usize {
    100
}

fn default_echo() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Lines the diagnostics queue holds before producers block
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Mirror every diagnostic as a `tracing` event
    #[serde(default = "default_echo")]
    pub echo: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            echo: default_echo(),
        }
    }
}
