use super::*;

/// Compares every printed token, as an integer, against `expected`
fn prints_exactly(
    output: &OutputCapture,
    expected: impl IntoIterator<Item = i64>,
) -> Result<bool, CheckFailure> {
    let values = parse_integers(output)?;
    Ok(values.into_iter().eq(expected))
}

/// Q4: 0 to 9
pub struct CountingFromZero;

impl ExerciseKind for CountingFromZero {
    fn title(&self) -> &str {
        "Counting from zero"
    }

    fn instructions(&self) -> &str {
        "Print the numbers from 0 to 9 on the screen."
    }

    fn check(
        &self,
        output: &OutputCapture,
        _graphics: Option<&GraphicsTrace>,
    ) -> Result<bool, CheckFailure> {
        prints_exactly(output, 0..10)
    }
}

/// Q5: 1 to 100
pub struct CountingFromOne;

impl ExerciseKind for CountingFromOne {
    fn title(&self) -> &str {
        "Counting from 1"
    }

    fn instructions(&self) -> &str {
        "Print the numbers from 1 to 100 on the screen."
    }

    fn check(
        &self,
        output: &OutputCapture,
        _graphics: Option<&GraphicsTrace>,
    ) -> Result<bool, CheckFailure> {
        prints_exactly(output, 1..=100)
    }
}

/// Q6: the 7 times table up to 700
pub struct CountingInSteps;

impl ExerciseKind for CountingInSteps {
    fn title(&self) -> &str {
        "Counting in steps"
    }

    fn instructions(&self) -> &str {
        "Print all the numbers in the 7 times table from 7 to 700."
    }

    fn check(
        &self,
        output: &OutputCapture,
        _graphics: Option<&GraphicsTrace>,
    ) -> Result<bool, CheckFailure> {
        prints_exactly(output, (7..=700).step_by(7))
    }
}

/// Q7: 7 to 700 skipping multiples of 7
pub struct CountingWhileOmitting;

impl ExerciseKind for CountingWhileOmitting {
    fn title(&self) -> &str {
        "Counting while omitting numbers"
    }

    fn instructions(&self) -> &str {
        "Print all numbers from 7 to 700 except for numbers which are divisible by 7."
    }

    fn check(
        &self,
        output: &OutputCapture,
        _graphics: Option<&GraphicsTrace>,
    ) -> Result<bool, CheckFailure> {
        prints_exactly(output, (7..=700).filter(|x| x % 7 != 0))
    }
}
