use crate::input::Scalar;

use super::ExecutionFailure;

/// What an executed program can reach: input, print and the turtle
///
/// Implemented by the attempt in progress. An execution facility forwards
/// every call the learner's program makes to these methods, in order.
pub trait Bindings {
    /// Next scripted value, or an empty string once none are left
    fn input(&mut self, prompt: &str) -> Scalar;

    fn print(&mut self, text: &str);

    fn turn(&mut self, degrees: f64);

    fn move_by(&mut self, length: f64);

    fn reset(&mut self);
}

/// Trait for the different ways of running a learner's program
///
/// A facility runs the program once, synchronously, wired to `bindings`.
/// It returns `Err` if the program failed at runtime or could not be run
/// to completion, and `Ok` once it has finished normally.
pub trait ExecutionFacility {
    fn execute(&self, source: &str, bindings: &mut dyn Bindings) -> Result<(), ExecutionFailure>;
}

/// Programs written as Rust closures, mostly for tests and embedding
impl<F> ExecutionFacility for F
where
    F: Fn(&str, &mut dyn Bindings) -> Result<(), ExecutionFailure>,
{
    fn execute(&self, source: &str, bindings: &mut dyn Bindings) -> Result<(), ExecutionFailure> {
        self(source, bindings)
    }
}
