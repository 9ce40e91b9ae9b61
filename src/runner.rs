use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::create_timestamp;
use crate::exercise::Exercise;
use crate::graphics::GraphicsTrace;
use crate::input::{InputQueue, Scalar};
use crate::output::{OutputCapture, Transcript};
use crate::sandbox::{Bindings, ExecutionFacility, ExecutionFailure};
use crate::set::{ExerciseSet, Score, SetError};
use crate::turtle::{DrawingSurface, Turtle};

pub const SUCCESS_MESSAGE: &str = "Congratulations! You have finished this question!";

/// Where messages for the learner end up
pub trait Notifier {
    fn show(&mut self, message: &str);

    fn hide(&mut self);
}

/// Discards every message
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn show(&mut self, _message: &str) {}

    fn hide(&mut self) {}
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AttemptState {
    Idle,
    Prepared,
    Executing,
    Checked,
}

/// Outcome of one attempt, as shown to the learner
#[derive(Serialize, Debug)]
pub struct AttemptReport {
    pub exercise_id: usize,
    pub key: String,
    pub title: String,
    pub passed: bool,
    pub failure: Option<ExecutionFailure>,
    pub score: Score,
    pub token_text: String,
    pub transcript: Transcript,
    pub graphics: Option<GraphicsTrace>,
    pub started_time: String,
    pub finished_time: String,
}

/// The exercise's input and output plus the drawing surface, wired up for
/// one run of the learner's program
struct AttemptBindings<'a> {
    queue: &'a mut InputQueue,
    output: &'a mut OutputCapture,
    surface: &'a mut dyn DrawingSurface,
}

impl Bindings for AttemptBindings<'_> {
    fn input(&mut self, prompt: &str) -> Scalar {
        self.queue.consume(prompt, self.output.transcript_mut())
    }

    fn print(&mut self, text: &str) {
        self.output.write(text);
    }

    fn turn(&mut self, degrees: f64) {
        self.surface.turn(degrees);
    }

    fn move_by(&mut self, length: f64) {
        self.surface.move_by(length);
    }

    fn reset(&mut self) {
        self.surface.reset();
    }
}

/// Drives attempts at the selected exercise
///
/// An attempt runs to completion before the next one can start: the
/// exercise is cleared and given fresh scripted input, the program is
/// executed against it, and the exercise's predicate decides the verdict.
pub struct Runner {
    facility: Box<dyn ExecutionFacility>,
    surface: Box<dyn DrawingSurface>,
    rng: StdRng,
    state: AttemptState,
}

impl Runner {
    pub fn new(facility: Box<dyn ExecutionFacility>) -> Self {
        Self {
            facility,
            surface: Box::new(Turtle::new()),
            rng: StdRng::from_os_rng(),
            state: AttemptState::Idle,
        }
    }

    /// Makes scripted inputs reproducible
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_surface(mut self, surface: Box<dyn DrawingSurface>) -> Self {
        self.surface = surface;
        self
    }

    pub fn state(&self) -> AttemptState {
        self.state
    }

    /// Runs `source` against the currently selected exercise
    pub fn run(
        &mut self,
        set: &mut ExerciseSet,
        source: &str,
        notifier: &mut dyn Notifier,
    ) -> Result<AttemptReport, SetError> {
        let exercise = set.current_mut()?;
        let started_time = create_timestamp();
        notifier.hide();

        self.prepare(exercise);
        let failure = self.execute(exercise, source);
        if let Some(failure) = &failure {
            log::info!("Exercise {} raised {failure}", exercise.id());
            notifier.show(&failure.report());
        }
        let passed = self.check(exercise);

        let report = AttemptReport {
            exercise_id: exercise.id(),
            key: exercise.key(),
            title: exercise.title().to_string(),
            passed,
            failure,
            token_text: exercise.output().tokens_as_text(),
            transcript: exercise.output().transcript().clone(),
            graphics: exercise.graphics().cloned(),
            score: set.score(),
            started_time,
            finished_time: create_timestamp(),
        };

        if passed {
            notifier.show(SUCCESS_MESSAGE);
        }
        log::info!(
            "Exercise {} {}, score {}",
            report.exercise_id,
            if passed { "passed" } else { "not passed" },
            report.score
        );

        self.transition(AttemptState::Idle);
        Ok(report)
    }

    fn transition(&mut self, next: AttemptState) {
        log::debug!("Attempt {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    /// Clears the previous attempt and scripts new input
    fn prepare(&mut self, exercise: &mut Exercise) {
        exercise.clear();
        self.surface.reset();
        exercise.reinit(&mut self.rng);
        self.transition(AttemptState::Prepared);
    }

    fn execute(&mut self, exercise: &mut Exercise, source: &str) -> Option<ExecutionFailure> {
        self.transition(AttemptState::Executing);

        let (queue, output) = exercise.io_mut();
        let mut bindings = AttemptBindings {
            queue,
            output,
            surface: self.surface.as_mut(),
        };
        let result = self.facility.execute(source, &mut bindings);

        exercise.record_trace(&self.surface.trace());
        result.err()
    }

    /// Judges whatever the program left behind, even after a failure
    fn check(&mut self, exercise: &mut Exercise) -> bool {
        let passed = exercise.check();
        self.transition(AttemptState::Checked);
        passed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exercise::catalogue;

    fn runner_for<F>(program: F) -> Runner
    where
        F: Fn(&str, &mut dyn Bindings) -> Result<(), ExecutionFailure> + 'static,
    {
        Runner::new(Box::new(program)).with_seed(3)
    }

    #[test]
    fn test_state_returns_to_idle() {
        let mut set = ExerciseSet::new(catalogue());
        let mut runner = runner_for(|_: &str, io: &mut dyn Bindings| {
            io.print("hello world");
            Ok(())
        });
        assert_eq!(runner.state(), AttemptState::Idle);
        let report = runner.run(&mut set, "", &mut NullNotifier).unwrap();
        assert!(report.passed);
        assert_eq!(runner.state(), AttemptState::Idle);
    }

    #[test]
    fn test_failure_still_checked() {
        let mut set = ExerciseSet::new(catalogue());
        let mut runner = runner_for(|_: &str, io: &mut dyn Bindings| {
            io.print("Hello World");
            Err(ExecutionFailure::runtime("boom", ""))
        });
        let report = runner.run(&mut set, "", &mut NullNotifier).unwrap();
        assert!(report.passed);
        assert_eq!(report.failure.unwrap().message, "boom");
    }

    #[test]
    fn test_turtle_trace_reaches_exercise() {
        let mut set = ExerciseSet::new(catalogue());
        set.select(8).unwrap();
        let mut runner = runner_for(|_: &str, io: &mut dyn Bindings| {
            for _ in 0..4 {
                io.move_by(30.0);
                io.turn(90.0);
            }
            Ok(())
        });
        let report = runner.run(&mut set, "", &mut NullNotifier).unwrap();
        assert!(report.passed);
        assert_eq!(report.graphics.unwrap().len(), 4);
    }
}
