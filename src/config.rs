use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use serde::Deserialize;

use crate::exercise::ExerciseType;
use crate::set::ExerciseSet;

#[derive(Parser)]
#[command(name = "grader", version = "1.0", about, long_about = None)]
pub struct CliArgs {
    /// Path to the configuration file
    #[arg(long = "config", short = 'c')]
    pub config_path: Option<PathBuf>,

    /// Exercise to work on, numbered from 1
    #[arg(long, short = 'e', default_value_t = 1)]
    pub exercise: usize,

    /// Program to run against the exercise
    #[arg(long, short = 's')]
    pub source: Option<PathBuf>,

    /// Seed for scripted inputs, overrides the configuration
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the attempt report as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// List the exercises and exit
    #[arg(long, short = 'l', default_value_t = false)]
    pub list: bool,
}

impl CliArgs {
    /// Load the configuration from the given file, or the default location
    ///
    /// A missing file at the default location is not an error, the
    /// built-in configuration is used instead.
    pub fn to_config(&self) -> Result<Config> {
        let mut config = match &self.config_path {
            Some(path) => Config::load(path)?,
            None => {
                let path = default_config_path()?;
                if path.exists() {
                    Config::load(&path)?
                } else {
                    log::debug!("No config at {}, using defaults", path.display());
                    Config::default()
                }
            }
        };

        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

/// `config.json` in the user's configuration directory
pub fn default_config_path() -> Result<PathBuf> {
    use directories::ProjectDirs;

    let proj_dirs = ProjectDirs::from("", "", "grader")
        .ok_or_else(|| anyhow!("Unable to find user directory"))?;
    Ok(proj_dirs.config_dir().join("config.json"))
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub interpreter: InterpreterConfig,
    /// Wall-clock limit per attempt, `null` for none
    #[serde(default = "default_time_limit")]
    pub time_limit: Option<MilliSecond>,
    /// Fixed seed for scripted inputs, entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_exercises")]
    pub exercises: Vec<ExerciseConfig>,
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Registers the configured exercises in order
    pub fn build_exercise_set(&self) -> ExerciseSet {
        let mut set = ExerciseSet::default();
        for exercise in &self.exercises {
            let registered = set.register(exercise.kind.build());
            if let Some(title) = &exercise.title {
                registered.set_title(title.clone());
            }
        }
        set
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            interpreter: InterpreterConfig::default(),
            time_limit: default_time_limit(),
            seed: None,
            exercises: default_exercises(),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct InterpreterConfig {
    pub name: String,
    pub file_name: String,
    pub command: Vec<String>,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            name: "Python".to_string(),
            file_name: "main.py".to_string(),
            command: ["python3", "-u", "%PRELUDE%", "%INPUT%"]
                .map(String::from)
                .to_vec(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ExerciseConfig {
    #[serde(rename = "type")]
    pub kind: ExerciseType,
    pub title: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MilliSecond(pub u64);

impl From<MilliSecond> for Duration {
    fn from(value: MilliSecond) -> Self {
        Duration::from_millis(value.0)
    }
}

fn default_time_limit() -> Option<MilliSecond> {
    Some(MilliSecond(10_000))
}

fn default_exercises() -> Vec<ExerciseConfig> {
    ExerciseType::ALL
        .into_iter()
        .map(|kind| ExerciseConfig { kind, title: None })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let config = Config::load("data/example.json").unwrap();
        assert_eq!(config.interpreter.file_name, "main.py");
        assert_eq!(config.time_limit, Some(MilliSecond(2000)));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.exercises[0].kind, ExerciseType::SimplePrinting);
        assert_eq!(config.exercises[2].title.as_deref(), Some("Square"));
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.interpreter.command[0], "python3");
        assert_eq!(config.time_limit, Some(MilliSecond(10_000)));
        assert_eq!(config.exercises.len(), 10);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_null_time_limit_disables_it() {
        let config: Config = serde_json::from_str(r#"{"time_limit": null}"#).unwrap();
        assert_eq!(config.time_limit, None);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = serde_json::from_str::<Config>(r#"{"timeout_ms": 500}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_exercise_rejected() {
        let result = serde_json::from_str::<Config>(r#"{"exercises": [{"type": "draw_circle"}]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_build_exercise_set() {
        let config = Config::load("data/example.json").unwrap();
        let set = config.build_exercise_set();
        assert_eq!(set.len(), 3);
        assert_eq!(set.get(3).unwrap().title(), "Square");
        assert!(set.get(3).unwrap().uses_graphics());
    }
}
