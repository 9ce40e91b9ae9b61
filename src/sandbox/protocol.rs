use serde::Deserialize;

use crate::input::DEFAULT_PROMPT;

/// One line written by the child on its stdout
#[derive(Deserialize, Debug, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub(super) enum Request {
    Print {
        text: String,
    },
    Input {
        #[serde(default = "default_prompt")]
        prompt: String,
    },
    Turn {
        degrees: f64,
    },
    Move {
        length: f64,
    },
    Reset,
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}
