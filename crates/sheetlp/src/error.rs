use thiserror::Error;

/// Problems detected in the input before the engine is invoked.
///
/// Infeasible or unbounded programs are not errors; they come back as a
/// [`SolveStatus`](crate::SolveStatus) on the result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error("Invalid problem type '{0}'. Please choose 'max' or 'min'")]
    InvalidProblemType(String),
    #[error("The objective function has no coefficients")]
    EmptyObjective,
    #[error(
        "The lengths of constraints_left ({left}), constraints_right ({right}) and constraints_signs ({signs}) must be equal"
    )]
    RowCountMismatch { left: usize, right: usize, signs: usize },
    #[error(
        "Your objective function has {expected} coefficients, but constraint row {row} has {found} coefficients"
    )]
    RowLengthMismatch { row: usize, expected: usize, found: usize },
    #[error("Invalid sign '{sign}' in constraint row {row}{hint}", hint = sign_hint(.sign))]
    InvalidConstraintSign { row: usize, sign: String },
    #[error("Expected one bound pair per variable ({expected}), got {found}")]
    BoundsLengthMismatch { expected: usize, found: usize },
    #[error("Variable {name} (index {variable}) has lower bound {lower} above upper bound {upper}")]
    InfeasibleBounds {
        variable: usize,
        name: String,
        lower: f64,
        upper: f64,
    },
    #[error("Variable {name} (index {variable}) has a bound that is not a number")]
    NanBound { variable: usize, name: String },
}

fn sign_hint(sign: &str) -> &'static str {
    match sign.trim() {
        "<" | ">" => ". Use of '<' and '>' is prohibited; use '<=' or '>=' instead",
        _ => ". Expected '<=', '>=' or '='",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_sign_gets_hint() {
        let err = SolveError::InvalidConstraintSign {
            row: 2,
            sign: ">".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("row 2"), "{}", msg);
        assert!(msg.contains("'>='"), "{}", msg);
    }

    #[test]
    fn test_infeasible_bounds_names_variable() {
        let err = SolveError::InfeasibleBounds {
            variable: 0,
            name: "a".to_string(),
            lower: 5.0,
            upper: 3.0,
        };
        assert_eq!(
            err.to_string(),
            "Variable a (index 0) has lower bound 5 above upper bound 3"
        );
    }

    #[test]
    fn test_nan_bound_names_variable() {
        let err = SolveError::NanBound {
            variable: 27,
            name: "ab".to_string(),
        };
        assert_eq!(err.to_string(), "Variable ab (index 27) has a bound that is not a number");
    }
}
