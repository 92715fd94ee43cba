use std::fmt;

use crate::objective::format_number;
use crate::solve::SolveResult;

pub const SEPARATOR: &str = "------------------------------------------------------";

/// Decimal places shown for the optimal value and quantities
pub const DISPLAY_PRECISION: i32 = 5;

/// Round to [`DISPLAY_PRECISION`] decimal places for display.
/// Values too large to scale are already whole and come back unchanged.
pub fn round_for_display(value: f64) -> f64 {
    let factor = 10f64.powi(DISPLAY_PRECISION);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / factor;
    if rounded == 0.0 { 0.0 } else { rounded }
}

fn display_value(value: f64) -> String {
    format_number(round_for_display(value))
}

/// Human-readable rendering of a [`SolveResult`].
///
/// ```text
/// ------------------------------------------------------
/// MAXIMIZE: z = 16a + 20.5b + 14c
/// ------------------------------------------------------
/// OPTIMAL VALUE: 4960
/// ------------------------------------------------------
/// QUANTITIES:
/// a: 0
/// b: 160
/// c: 120
/// ------------------------------------------------------
/// Optimization terminated successfully. (Simplex: Optimal)
/// ```
///
/// Non-optimal results keep the objective block and show only the message.
pub struct Report<'a> {
    result: &'a SolveResult,
}

impl<'a> Report<'a> {
    pub fn new(result: &'a SolveResult) -> Self {
        Self { result }
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.result;
        writeln!(f, "{}", SEPARATOR)?;
        writeln!(f, "{}", result.objective_line)?;
        writeln!(f, "{}", SEPARATOR)?;

        if let (Some(value), Some(quantities)) = (result.optimal_value, &result.quantities) {
            writeln!(f, "OPTIMAL VALUE: {}", display_value(value))?;
            writeln!(f, "{}", SEPARATOR)?;
            writeln!(f, "QUANTITIES:")?;
            for (name, &quantity) in result.variable_names.iter().zip(quantities) {
                writeln!(f, "{}: {}", name, display_value(quantity))?;
            }
            writeln!(f, "{}", SEPARATOR)?;
        }

        write!(f, "{}", result.message)
    }
}
