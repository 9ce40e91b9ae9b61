use std::process::ExitCode;

use anyhow::{Context, anyhow};
use clap::Parser;

use grader::config::CliArgs;
use grader::output::EntryKind;
use grader::runner::{Notifier, Runner};
use grader::sandbox::create_execution_facility;

/// Prints messages for the learner on stderr, after the transcript
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn show(&mut self, message: &str) {
        eprintln!("{}", message.trim_end());
    }

    fn hide(&mut self) {}
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let cli = CliArgs::parse();
    let config = cli.to_config().context("Failed to load configuration")?;
    let mut set = config.build_exercise_set();

    if cli.list {
        for exercise in set.iter() {
            println!("{:>2}. {}", exercise.id(), exercise.label());
        }
        return Ok(ExitCode::SUCCESS);
    }

    let index = cli
        .exercise
        .checked_sub(1)
        .ok_or_else(|| anyhow!("Exercises are numbered from 1"))?;
    let exercise = set.select(index)?;
    println!("{}\n{}\n", exercise.title(), exercise.instructions());

    let Some(source_path) = &cli.source else {
        return Ok(ExitCode::SUCCESS);
    };
    let source = std::fs::read_to_string(source_path)
        .with_context(|| format!("Failed to read {}", source_path.display()))?;

    let facility = create_execution_facility(&config)?;
    let mut runner = Runner::new(facility);
    if let Some(seed) = config.seed {
        runner = runner.with_seed(seed);
    }

    let report = runner.run(&mut set, &source, &mut TerminalNotifier)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for entry in report.transcript.entries() {
            match entry.kind {
                EntryKind::Input => println!("{}", entry.text),
                EntryKind::Output => print!("{}", entry.text),
            }
        }
        println!("\nScore: {}", report.score);
    }

    Ok(if report.passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
