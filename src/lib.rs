pub mod config;
pub mod exercise;
pub mod graphics;
pub mod input;
pub mod output;
pub mod runner;
pub mod sandbox;
pub mod set;
pub mod turtle;

pub fn create_timestamp() -> String {
    use chrono::{SecondsFormat, Utc};
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
