mod arithmetic;
mod counting;
mod drawing;
mod printing;

pub use arithmetic::{AddingUpNumbers, InputtingNumbers};
pub use counting::{CountingFromOne, CountingFromZero, CountingInSteps, CountingWhileOmitting};
pub use drawing::{DrawHexagon, DrawSquare};
pub use printing::{InputAndOutput, SimplePrinting};

use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::graphics::GraphicsTrace;
use crate::input::InputQueue;
use crate::output::OutputCapture;

/// Why a predicate could not reach a verdict
///
/// Always graded as "not complete", never reported to the learner.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckFailure {
    #[error("expected an integer, found {0:?}")]
    NotAnInteger(String),
    #[error("exercise has no drawing attached")]
    MissingTrace,
}

/// Behaviour shared by every exercise
pub trait ExerciseKind: Send {
    fn title(&self) -> &str;

    fn instructions(&self) -> &str;

    /// Whether the exercise grades a drawing instead of printed text
    fn uses_graphics(&self) -> bool {
        false
    }

    /// Scripts fresh input for the next attempt
    fn reinit(&mut self, _rng: &mut dyn RngCore, _queue: &mut InputQueue) {}

    /// Judges the captured effects of the last attempt
    fn check(
        &self,
        output: &OutputCapture,
        graphics: Option<&GraphicsTrace>,
    ) -> Result<bool, CheckFailure>;
}

/// One registered exercise together with the state of its latest attempt
pub struct Exercise {
    id: usize,
    title: String,
    kind: Box<dyn ExerciseKind>,
    is_complete: bool,
    input_queue: InputQueue,
    output: OutputCapture,
    graphics: Option<GraphicsTrace>,
}

impl Exercise {
    pub(crate) fn new(id: usize, kind: Box<dyn ExerciseKind>) -> Self {
        let graphics = kind.uses_graphics().then(GraphicsTrace::new);
        Self {
            id,
            title: kind.title().to_string(),
            kind,
            is_complete: false,
            input_queue: InputQueue::new(),
            output: OutputCapture::new(),
            graphics,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Name a host stores the learner's source under
    pub fn key(&self) -> String {
        format!("q{}", self.id)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn instructions(&self) -> &str {
        self.kind.instructions()
    }

    pub fn uses_graphics(&self) -> bool {
        self.graphics.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.is_complete
    }

    pub fn set_complete(&mut self, value: bool) -> bool {
        self.is_complete = value;
        value
    }

    /// Title prefixed with a checkbox showing completion
    pub fn label(&self) -> String {
        let checkbox = if self.is_complete { '☑' } else { '☐' };
        format!("{checkbox} {}", self.title)
    }

    /// Forgets the inputs and effects of the previous attempt
    pub fn clear(&mut self) {
        self.input_queue.clear();
        self.output.clear();
        if let Some(graphics) = self.graphics.as_mut() {
            graphics.clear();
        }
    }

    pub fn reinit(&mut self, rng: &mut dyn RngCore) {
        self.kind.reinit(rng, &mut self.input_queue);
    }

    /// Runs the predicate and stores the verdict as the completion state
    pub fn check(&mut self) -> bool {
        let passed = match self.kind.check(&self.output, self.graphics.as_ref()) {
            Ok(passed) => passed,
            Err(e) => {
                log::debug!("Check of exercise {} failed: {e}", self.id);
                false
            }
        };
        self.set_complete(passed)
    }

    pub fn input_queue(&self) -> &InputQueue {
        &self.input_queue
    }

    pub fn output(&self) -> &OutputCapture {
        &self.output
    }

    pub fn graphics(&self) -> Option<&GraphicsTrace> {
        self.graphics.as_ref()
    }

    /// Borrows input and output together for the duration of a run
    pub fn io_mut(&mut self) -> (&mut InputQueue, &mut OutputCapture) {
        (&mut self.input_queue, &mut self.output)
    }

    /// Replaces the attached trace with what the drawing surface reported
    ///
    /// Ignored for text-only exercises.
    pub fn record_trace(&mut self, trace: &GraphicsTrace) {
        if let Some(graphics) = self.graphics.as_mut() {
            graphics.clear();
            for (&angle, &length) in trace.angles().iter().zip(trace.lengths()) {
                graphics.record_segment(angle, length);
            }
        }
    }
}

impl std::fmt::Debug for Exercise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exercise")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("is_complete", &self.is_complete)
            .finish_non_exhaustive()
    }
}

/// The built-in exercises, by configuration name
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    SimplePrinting,
    InputAndOutput,
    InputtingNumbers,
    CountingFromZero,
    CountingFromOne,
    CountingInSteps,
    CountingWhileOmitting,
    AddingUpNumbers,
    DrawSquare,
    DrawHexagon,
}

impl ExerciseType {
    pub const ALL: [ExerciseType; 10] = [
        Self::SimplePrinting,
        Self::InputAndOutput,
        Self::InputtingNumbers,
        Self::CountingFromZero,
        Self::CountingFromOne,
        Self::CountingInSteps,
        Self::CountingWhileOmitting,
        Self::AddingUpNumbers,
        Self::DrawSquare,
        Self::DrawHexagon,
    ];

    pub fn build(self) -> Box<dyn ExerciseKind> {
        match self {
            Self::SimplePrinting => Box::new(SimplePrinting),
            Self::InputAndOutput => Box::new(InputAndOutput::default()),
            Self::InputtingNumbers => Box::new(InputtingNumbers::default()),
            Self::CountingFromZero => Box::new(CountingFromZero),
            Self::CountingFromOne => Box::new(CountingFromOne),
            Self::CountingInSteps => Box::new(CountingInSteps),
            Self::CountingWhileOmitting => Box::new(CountingWhileOmitting),
            Self::AddingUpNumbers => Box::new(AddingUpNumbers::default()),
            Self::DrawSquare => Box::new(DrawSquare),
            Self::DrawHexagon => Box::new(DrawHexagon),
        }
    }
}

/// All ten exercises in their usual order
pub fn catalogue() -> Vec<Box<dyn ExerciseKind>> {
    ExerciseType::ALL.into_iter().map(ExerciseType::build).collect()
}

/// Parses the whole token text as one integer
fn parse_integer(text: &str) -> Result<i64, CheckFailure> {
    text.parse()
        .map_err(|_| CheckFailure::NotAnInteger(text.to_string()))
}

/// Parses every token as an integer, failing on the first that isn't
fn parse_integers(output: &OutputCapture) -> Result<Vec<i64>, CheckFailure> {
    output.tokens().iter().map(|token| parse_integer(token)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_exercises_are_incomplete() {
        for (i, kind) in catalogue().into_iter().enumerate() {
            let mut exercise = Exercise::new(i + 1, kind);
            assert!(!exercise.check(), "{} passed untouched", exercise.title());
            assert!(!exercise.is_complete());
        }
    }

    #[test]
    fn test_graphics_attached_only_for_drawings() {
        let square = Exercise::new(9, ExerciseType::DrawSquare.build());
        let printing = Exercise::new(1, ExerciseType::SimplePrinting.build());
        assert!(square.uses_graphics());
        assert!(square.graphics().is_some());
        assert!(!printing.uses_graphics());
        assert!(printing.graphics().is_none());
    }

    #[test]
    fn test_label_tracks_completion() {
        let mut exercise = Exercise::new(1, ExerciseType::SimplePrinting.build());
        assert_eq!(exercise.label(), "☐ Simple printing");
        exercise.output.write("Hello world");
        exercise.check();
        assert_eq!(exercise.label(), "☑ Simple printing");
        assert_eq!(exercise.key(), "q1");
    }

    #[test]
    fn test_check_is_repeatable() {
        let mut exercise = Exercise::new(4, ExerciseType::CountingFromZero.build());
        exercise.output.write("0 1 2 3 4 5 6 7 8 9");
        assert!(exercise.check());
        assert!(exercise.check());
        assert_eq!(exercise.output().tokens().len(), 10);
    }

    #[test]
    fn test_later_failing_check_clears_completion() {
        let mut exercise = Exercise::new(1, ExerciseType::SimplePrinting.build());
        exercise.output.write("hello world");
        assert!(exercise.check());
        exercise.clear();
        exercise.output.write("goodbye");
        assert!(!exercise.check());
        assert!(!exercise.is_complete());
    }

    #[test]
    fn test_exercise_type_names() {
        let kind: ExerciseType = serde_json::from_str("\"counting_while_omitting\"").unwrap();
        assert_eq!(kind, ExerciseType::CountingWhileOmitting);
        assert!(serde_json::from_str::<ExerciseType>("\"draw_circle\"").is_err());
    }

    #[test]
    fn test_parse_integers_rejects_words() {
        let mut output = OutputCapture::new();
        output.write("1 two 3");
        assert_eq!(
            parse_integers(&output),
            Err(CheckFailure::NotAnInteger("two".to_string()))
        );
    }
}
