use std::fmt;

use crate::error::SolveError;

/// Whether the objective is maximized or minimized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Maximize,
    Minimize,
}

impl Direction {
    pub fn parse(problem_type: &str) -> Result<Self, SolveError> {
        match problem_type.trim().to_ascii_lowercase().as_str() {
            "max" | "maximize" => Ok(Direction::Maximize),
            "min" | "minimize" => Ok(Direction::Minimize),
            _ => Err(SolveError::InvalidProblemType(problem_type.to_string())),
        }
    }

    /// -1 for maximization, since the engine only minimizes
    pub fn sign(&self) -> f64 {
        match self {
            Direction::Maximize => -1.0,
            Direction::Minimize => 1.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::Maximize => "MAXIMIZE",
            Direction::Minimize => "MINIMIZE",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The objective handed to the engine: negated for maximization
pub fn canonical_objective(direction: Direction, coefficients: &[f64]) -> Vec<f64> {
    let sign = direction.sign();
    coefficients.iter().map(|c| sign * c).collect()
}

/// Shortest decimal form of `value`; integral values print without a decimal point.
pub fn format_number(value: f64) -> String {
    // Avoid printing "-0"
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// Symbolic form of a linear objective, e.g. `16a - 20.5b + 14c`.
///
/// A coefficient of 1 omits the numeral and -1 becomes a bare minus. Zero
/// terms are kept (`a - b + 0c`).
pub fn expression(coefficients: &[f64], names: &[String]) -> String {
    let mut out = String::new();

    for (i, (&coef, name)) in coefficients.iter().zip(names).enumerate() {
        if i == 0 {
            if coef == 1.0 {
                out.push_str(name);
            } else if coef == -1.0 {
                out.push('-');
                out.push_str(name);
            } else {
                out.push_str(&format_number(coef));
                out.push_str(name);
            }
            continue;
        }

        out.push_str(if coef < 0.0 { " - " } else { " + " });
        let magnitude = coef.abs();
        if magnitude != 1.0 {
            out.push_str(&format_number(magnitude));
        }
        out.push_str(name);
    }

    out
}

/// `MAXIMIZE: z = <expr>` or `MINIMIZE: z = <expr>`
pub fn objective_line(direction: Direction, coefficients: &[f64], names: &[String]) -> String {
    format!("{}: z = {}", direction.label(), expression(coefficients, names))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::variable_names;

    #[test]
    fn test_parse_direction() {
        assert_eq!(Direction::parse("max"), Ok(Direction::Maximize));
        assert_eq!(Direction::parse("MIN"), Ok(Direction::Minimize));
        assert_eq!(Direction::parse("maximize"), Ok(Direction::Maximize));
        assert_eq!(
            Direction::parse("maxx"),
            Err(SolveError::InvalidProblemType("maxx".to_string()))
        );
    }

    #[test]
    fn test_canonical_objective() {
        let c = [16.0, -20.5, 0.0];
        assert_eq!(canonical_objective(Direction::Minimize, &c), vec![16.0, -20.5, 0.0]);
        assert_eq!(canonical_objective(Direction::Maximize, &c), vec![-16.0, 20.5, 0.0]);
    }

    #[test]
    fn test_flip_is_self_inverse() {
        let c = [3.0, -1.25, 7.0];
        let twice = canonical_objective(Direction::Maximize, &canonical_objective(Direction::Maximize, &c));
        assert_eq!(twice, c.to_vec());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(16.0), "16");
        assert_eq!(format_number(20.5), "20.5");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.1), "0.1");
        assert_eq!(format_number(4960.0), "4960");
    }

    #[test]
    fn test_expression_mixed_signs() {
        let names = variable_names(3);
        assert_eq!(expression(&[16.0, -20.5, 14.0], &names), "16a - 20.5b + 14c");
    }

    #[test]
    fn test_expression_unit_and_zero_coefficients() {
        let names = variable_names(3);
        assert_eq!(expression(&[1.0, -1.0, 0.0], &names), "a - b + 0c");
        assert_eq!(expression(&[-1.0, 1.0, -2.0], &names), "-a + b - 2c");
        assert_eq!(expression(&[0.0, 0.5, -0.25], &names), "0a + 0.5b - 0.25c");
    }

    #[test]
    fn test_expression_flipped_convention() {
        let names = variable_names(3);
        let flipped = canonical_objective(Direction::Maximize, &[16.0, 20.5, 14.0]);
        assert_eq!(expression(&flipped, &names), "-16a - 20.5b - 14c");
    }

    #[test]
    fn test_objective_line() {
        let names = variable_names(3);
        assert_eq!(
            objective_line(Direction::Maximize, &[16.0, 20.5, 14.0], &names),
            "MAXIMIZE: z = 16a + 20.5b + 14c"
        );
        assert_eq!(
            objective_line(Direction::Minimize, &[10.0, 15.0, 25.0], &names),
            "MINIMIZE: z = 10a + 15b + 25c"
        );
    }
}
