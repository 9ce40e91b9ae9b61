use super::*;

fn draws_regular_polygon(
    graphics: Option<&GraphicsTrace>,
    num_sides: usize,
) -> Result<bool, CheckFailure> {
    let trace = graphics.ok_or(CheckFailure::MissingTrace)?;
    Ok(trace.is_regular_polygon(num_sides))
}

/// Q9
pub struct DrawSquare;

impl ExerciseKind for DrawSquare {
    fn title(&self) -> &str {
        "Draw a square"
    }

    fn instructions(&self) -> &str {
        "Use the turtle to draw a square."
    }

    fn uses_graphics(&self) -> bool {
        true
    }

    fn check(
        &self,
        _output: &OutputCapture,
        graphics: Option<&GraphicsTrace>,
    ) -> Result<bool, CheckFailure> {
        draws_regular_polygon(graphics, 4)
    }
}

/// Q10
pub struct DrawHexagon;

impl ExerciseKind for DrawHexagon {
    fn title(&self) -> &str {
        "Draw a hexagon"
    }

    fn instructions(&self) -> &str {
        "Use the turtle to draw a regular hexagon."
    }

    fn uses_graphics(&self) -> bool {
        true
    }

    fn check(
        &self,
        _output: &OutputCapture,
        graphics: Option<&GraphicsTrace>,
    ) -> Result<bool, CheckFailure> {
        draws_regular_polygon(graphics, 6)
    }
}
