use rand::Rng;

use super::*;

/// Q3: add two scripted numbers
#[derive(Default)]
pub struct InputtingNumbers {
    expected: Option<i64>,
}

impl ExerciseKind for InputtingNumbers {
    fn title(&self) -> &str {
        "Inputting numbers"
    }

    fn instructions(&self) -> &str {
        "Ask the user to enter two numbers. Then display the sum of the numbers."
    }

    fn reinit(&mut self, rng: &mut dyn RngCore, queue: &mut InputQueue) {
        let a: i64 = rng.random_range(1..=100);
        let b: i64 = rng.random_range(1..=100);
        queue.enqueue([a, b]);
        self.expected = Some(a + b);
    }

    fn check(
        &self,
        output: &OutputCapture,
        _graphics: Option<&GraphicsTrace>,
    ) -> Result<bool, CheckFailure> {
        let Some(expected) = self.expected else {
            return Ok(false);
        };
        Ok(parse_integer(&output.tokens_as_text())? == expected)
    }
}

/// Q8: total ten scripted numbers
#[derive(Default)]
pub struct AddingUpNumbers {
    total: Option<i64>,
}

const ADDEND_COUNT: usize = 10;

impl ExerciseKind for AddingUpNumbers {
    fn title(&self) -> &str {
        "Adding up numbers"
    }

    fn instructions(&self) -> &str {
        "Ask the user to enter 10 numbers. Then print the total of all 10 numbers."
    }

    fn reinit(&mut self, rng: &mut dyn RngCore, queue: &mut InputQueue) {
        let values: Vec<i64> = (0..ADDEND_COUNT)
            .map(|_| rng.random_range(1..=30))
            .collect();
        self.total = Some(values.iter().sum());
        queue.enqueue(values);
    }

    fn check(
        &self,
        output: &OutputCapture,
        _graphics: Option<&GraphicsTrace>,
    ) -> Result<bool, CheckFailure> {
        let Some(total) = self.total else {
            return Ok(false);
        };
        Ok(parse_integer(&output.tokens_as_text())? == total)
    }
}
