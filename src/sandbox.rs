mod facility;
mod process_runner;
mod protocol;

// Re-export the traits and common types
pub use facility::{Bindings, ExecutionFacility};
pub use process_runner::ProcessExecutor;

use std::fmt;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;
use thiserror::Error;

use crate::config::Config;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The program raised an error
    Runtime,
    /// The program ran past the time limit
    Timeout,
    /// The attempt was cancelled from outside
    Cancelled,
    /// The program could not be run at all
    System,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Runtime => "Runtime Error",
            Self::Timeout => "Time Limit Exceeded",
            Self::Cancelled => "Cancelled",
            Self::System => "System Error",
        };
        f.write_str(name)
    }
}

/// A learner's program that did not finish normally
#[derive(Serialize, Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct ExecutionFailure {
    pub kind: FailureKind,
    pub message: String,
    /// Interpreter backtrace, empty when there is none
    pub trace: String,
}

impl ExecutionFailure {
    pub fn runtime(message: impl Into<String>, trace: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Runtime,
            message: message.into(),
            trace: trace.into(),
        }
    }

    pub fn timeout(limit: Duration) -> Self {
        Self {
            kind: FailureKind::Timeout,
            message: format!("Program did not finish within {} ms", limit.as_millis()),
            trace: String::new(),
        }
    }

    pub fn cancelled() -> Self {
        Self {
            kind: FailureKind::Cancelled,
            message: "Program was cancelled".to_string(),
            trace: String::new(),
        }
    }

    pub fn system(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::System,
            message: message.into(),
            trace: String::new(),
        }
    }

    /// Human-readable text shown to the learner
    pub fn report(&self) -> String {
        if self.trace.trim().is_empty() {
            self.to_string()
        } else {
            self.trace.clone()
        }
    }
}

/// Whether `program` can be found on `PATH`
pub fn interpreter_available(program: &str) -> bool {
    std::process::Command::new("which")
        .arg(program)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Creates the execution facility described by the configuration
pub fn create_execution_facility(config: &Config) -> Result<Box<dyn ExecutionFacility>> {
    let interpreter = &config.interpreter;
    match interpreter.command.first() {
        Some(program) if !interpreter_available(program) => {
            log::warn!("Interpreter {program} not found on PATH, attempts will fail");
        }
        None => anyhow::bail!("Interpreter {} has an empty command", interpreter.name),
        _ => {}
    }

    let time_limit = config.time_limit.map(Duration::from);
    log::info!("Creating ProcessExecutor ({})", interpreter.name);
    let executor = ProcessExecutor::build(interpreter, time_limit)?;
    Ok(Box::new(executor))
}
