use std::collections::VecDeque;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::output::Transcript;

/// Prompt shown when a program asks for input without one
pub const DEFAULT_PROMPT: &str = "Enter data >";

/// A scripted value handed to the learner's program in place of typed input
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Text(String),
}

impl Scalar {
    /// The value returned when the queue has run dry
    pub fn empty() -> Self {
        Self::Text(String::new())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Pre-scripted values standing in for interactive input
#[derive(Debug, Default)]
pub struct InputQueue {
    values: VecDeque<Scalar>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends values in argument order
    pub fn enqueue<I, V>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Scalar>,
    {
        self.values.extend(values.into_iter().map(Into::into));
        self
    }

    /// Pops the head value and echoes it into the transcript
    ///
    /// Reading past the end is not an error: the program gets an empty
    /// string and nothing is echoed.
    pub fn consume(&mut self, prompt: &str, transcript: &mut Transcript) -> Scalar {
        match self.values.pop_front() {
            Some(value) => {
                transcript.push_input(format!("{prompt} {value}"));
                value
            }
            None => Scalar::empty(),
        }
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_until_exhausted() {
        let mut queue = InputQueue::new();
        let mut transcript = Transcript::default();
        queue.enqueue([1_i64, 2]);

        assert_eq!(queue.consume(DEFAULT_PROMPT, &mut transcript), Scalar::Int(1));
        assert_eq!(queue.consume(DEFAULT_PROMPT, &mut transcript), Scalar::Int(2));
        assert_eq!(queue.consume(DEFAULT_PROMPT, &mut transcript), Scalar::empty());
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn test_consume_echoes_prompt_and_value() {
        let mut queue = InputQueue::new();
        let mut transcript = Transcript::default();
        queue.enqueue(["Human 12"]);

        queue.consume("Name?", &mut transcript);
        assert_eq!(transcript.entries()[0].text, "Name? Human 12");
    }

    #[test]
    fn test_scalar_json_is_untagged() {
        assert_eq!(serde_json::to_string(&Scalar::Int(40)).unwrap(), "40");
        assert_eq!(
            serde_json::to_string(&Scalar::from("Human 7")).unwrap(),
            "\"Human 7\""
        );
    }
}
