use rand::Rng;

use super::*;

/// Q1: print "Hello world"
pub struct SimplePrinting;

impl ExerciseKind for SimplePrinting {
    fn title(&self) -> &str {
        "Simple printing"
    }

    fn instructions(&self) -> &str {
        "Print the text 'Hello world' on the screen."
    }

    fn check(
        &self,
        output: &OutputCapture,
        _graphics: Option<&GraphicsTrace>,
    ) -> Result<bool, CheckFailure> {
        Ok(output.tokens_as_text().contains("hello world"))
    }
}

/// Q2: greet a randomly named user
#[derive(Default)]
pub struct InputAndOutput {
    name: Option<String>,
}

impl ExerciseKind for InputAndOutput {
    fn title(&self) -> &str {
        "Input and output"
    }

    fn instructions(&self) -> &str {
        "Ask for the user's name, then say hello to them by name."
    }

    fn reinit(&mut self, rng: &mut dyn RngCore, queue: &mut InputQueue) {
        let id: u32 = rng.random_range(1..=10000);
        let name = format!("Human {id}");
        queue.enqueue([name.as_str()]);
        self.name = Some(name);
    }

    fn check(
        &self,
        output: &OutputCapture,
        _graphics: Option<&GraphicsTrace>,
    ) -> Result<bool, CheckFailure> {
        let Some(name) = &self.name else {
            return Ok(false);
        };
        Ok(output.tokens_as_text() == format!("hello {name}").to_lowercase())
    }
}
