use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::runtime::{Handle, Runtime};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::config::InterpreterConfig;

use super::facility::{Bindings, ExecutionFacility};
use super::protocol::Request;
use super::ExecutionFailure;

const PRELUDE: &str = include_str!("prelude.py");
const PRELUDE_FILE_NAME: &str = "grader_prelude.py";

// Keeps work directories apart when several executors share a process
static EXECUTOR_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Runs the learner's program as a child interpreter process
///
/// The child loads a prelude that replaces `input`, `print` and `turtle`
/// with calls over a JSON-lines protocol on its stdin/stdout, then
/// executes the learner's file. Anything written to stderr becomes the
/// failure trace. No isolation beyond a separate process and a wall-clock
/// limit is attempted.
///
/// The executor drives the child on its own current-thread runtime, so
/// `execute` must not be called from inside another tokio runtime. Doing so
/// fails with a system error instead of running the program.
pub struct ProcessExecutor {
    /// Command template, `%PRELUDE%` and `%INPUT%` are substituted
    command: Vec<String>,
    /// File name the learner's source is written to
    file_name: String,
    time_limit: Option<Duration>,
    work_dir: PathBuf,
    runtime: Runtime,
    token: CancellationToken,
}

impl ProcessExecutor {
    pub fn build(interpreter: &InterpreterConfig, time_limit: Option<Duration>) -> Result<Self> {
        let work_dir = Self::create_work_directory()?;
        fs::write(work_dir.join(PRELUDE_FILE_NAME), PRELUDE)
            .context("Failed to write interpreter prelude")?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to build process runtime")?;

        log::info!(
            "ProcessExecutor for {} initialized in {}",
            interpreter.name,
            work_dir.display()
        );
        if time_limit.is_none() {
            log::warn!("No time limit set, a non-terminating program will hang the grader");
        }

        Ok(Self {
            command: interpreter.command.clone(),
            file_name: interpreter.file_name.clone(),
            time_limit,
            work_dir,
            runtime,
            token: CancellationToken::new(),
        })
    }

    /// Token that stops the running attempt and every later one
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Creates a working directory for this executor
    fn create_work_directory() -> Result<PathBuf> {
        let instance = EXECUTOR_COUNTER.fetch_add(1, Ordering::SeqCst);
        let work_dir = std::env::temp_dir()
            .join("grader")
            .join(format!("{}-{instance}", std::process::id()));
        fs::create_dir_all(&work_dir)
            .with_context(|| format!("Failed to create {}", work_dir.display()))?;
        Ok(work_dir)
    }

    /// Generates the interpreter command by applying template substitutions
    fn generate_command(&self) -> Vec<String> {
        let mut mapping = HashMap::<&str, &str>::new();
        mapping.insert("%PRELUDE%", PRELUDE_FILE_NAME);
        mapping.insert("%INPUT%", &self.file_name);

        self.command
            .iter()
            .map(|s| {
                let mut t = s.clone();
                for (k, v) in mapping.iter() {
                    t = t.replace(k, v);
                }
                t
            })
            .collect()
    }

    /// Spawns the interpreter and serves its requests until it exits
    async fn run_program(
        &self,
        command: &[String],
        bindings: &mut dyn Bindings,
    ) -> Result<(), ExecutionFailure> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| ExecutionFailure::system("Empty interpreter command"))?;

        let mut child = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .current_dir(&self.work_dir)
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ExecutionFailure::system(format!("Failed to spawn {program}: {e}")))?;

        let (Some(mut stdin), Some(stdout), Some(mut stderr)) =
            (child.stdin.take(), child.stdout.take(), child.stderr.take())
        else {
            return Err(ExecutionFailure::system("Child process pipes unavailable"));
        };

        // Drained on the side so a chatty program can't fill the pipe
        let stderr_task = tokio::spawn(async move {
            let mut buffer = String::new();
            let _ = stderr.read_to_string(&mut buffer).await;
            buffer
        });

        let mut lines = BufReader::new(stdout).lines();
        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| ExecutionFailure::system(format!("Failed to read from program: {e}")))?
        {
            let request = serde_json::from_str::<Request>(&line).map_err(|e| {
                log::warn!("Malformed line from program {line:?}: {e}");
                ExecutionFailure::system(format!("Malformed message from program: {e}"))
            })?;

            match request {
                Request::Print { text } => bindings.print(&text),
                Request::Input { prompt } => {
                    let value = bindings.input(&prompt);
                    let reply = match serde_json::to_string(&value) {
                        Ok(reply) => reply + "\n",
                        Err(e) => return Err(ExecutionFailure::system(e.to_string())),
                    };
                    if let Err(e) = stdin.write_all(reply.as_bytes()).await {
                        log::warn!("Program stopped listening for input: {e}");
                    } else if let Err(e) = stdin.flush().await {
                        log::warn!("Failed to flush input to program: {e}");
                    }
                }
                Request::Turn { degrees } => bindings.turn(degrees),
                Request::Move { length } => bindings.move_by(length),
                Request::Reset => bindings.reset(),
            }
        }
        drop(stdin);

        let status = child
            .wait()
            .await
            .map_err(|e| ExecutionFailure::system(format!("Failed to wait for program: {e}")))?;
        let trace = stderr_task.await.unwrap_or_default();

        if status.success() {
            Ok(())
        } else {
            let message = trace
                .lines()
                .rev()
                .find(|line| !line.trim().is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("Process exited with code: {:?}", status.code()));
            Err(ExecutionFailure::runtime(message, trace))
        }
    }
}

impl ExecutionFacility for ProcessExecutor {
    fn execute(&self, source: &str, bindings: &mut dyn Bindings) -> Result<(), ExecutionFailure> {
        if Handle::try_current().is_ok() {
            return Err(ExecutionFailure::system(
                "ProcessExecutor cannot run inside an async runtime",
            ));
        }

        fs::write(self.work_dir.join(&self.file_name), format!("{source}\n"))
            .map_err(|e| ExecutionFailure::system(format!("Failed to write source: {e}")))?;

        let command = self.generate_command();
        log::debug!("Running {command:?}");

        self.runtime.block_on(async {
            let run = self.run_program(&command, bindings);
            let limited = async {
                match self.time_limit {
                    Some(limit) => timeout(limit, run)
                        .await
                        .unwrap_or_else(|_| Err(ExecutionFailure::timeout(limit))),
                    None => run.await,
                }
            };

            tokio::select! {
                biased;
                _ = self.token.cancelled() => Err(ExecutionFailure::cancelled()),
                result = limited => result,
            }
        })
    }
}

impl Drop for ProcessExecutor {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_dir_all(&self.work_dir) {
            log::debug!("Failed to remove {}: {e}", self.work_dir.display());
        }
    }
}
