use std::fmt;

use crate::error::SolveError;

/// Comparison between a constraint row and its right-hand side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintSign {
    /// Less than or equal (<=)
    Le,
    /// Greater than or equal (>=)
    Ge,
    /// Equal (=)
    Eq,
}

impl ConstraintSign {
    /// Parse the sign written in row `row`
    pub fn parse(token: &str, row: usize) -> Result<Self, SolveError> {
        match token.trim() {
            "<=" | "≤" | "=<" => Ok(ConstraintSign::Le),
            ">=" | "≥" | "=>" => Ok(ConstraintSign::Ge),
            "=" | "==" => Ok(ConstraintSign::Eq),
            _ => Err(SolveError::InvalidConstraintSign {
                row,
                sign: token.to_string(),
            }),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            ConstraintSign::Le => "<=",
            ConstraintSign::Ge => ">=",
            ConstraintSign::Eq => "=",
        }
    }
}

impl fmt::Display for ConstraintSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Constraints split into the `<=` and `=` systems the engine accepts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedConstraints {
    pub le_matrix: Vec<Vec<f64>>,
    pub le_vector: Vec<f64>,
    pub eq_matrix: Vec<Vec<f64>>,
    pub eq_vector: Vec<f64>,
    /// Input row index of each `<=` row
    pub le_rows: Vec<usize>,
    /// Input row index of each `=` row
    pub eq_rows: Vec<usize>,
}

/// Check that the three constraint lists line up and every row has one
/// coefficient per variable.
pub fn check_shape<S: AsRef<str>>(
    num_variables: usize,
    left: &[Vec<f64>],
    right: &[f64],
    signs: &[S],
) -> Result<(), SolveError> {
    if left.len() != right.len() || left.len() != signs.len() {
        return Err(SolveError::RowCountMismatch {
            left: left.len(),
            right: right.len(),
            signs: signs.len(),
        });
    }
    for (row, coefficients) in left.iter().enumerate() {
        if coefficients.len() != num_variables {
            return Err(SolveError::RowLengthMismatch {
                row,
                expected: num_variables,
                found: coefficients.len(),
            });
        }
    }
    Ok(())
}

/// Sort constraint rows into `<=` and `=` systems.
///
/// `>=` rows are negated into `<=` rows (`a·x >= b` is `-a·x <= -b`).
/// Input order is kept within each system.
pub fn normalize<S: AsRef<str>>(
    num_variables: usize,
    left: &[Vec<f64>],
    right: &[f64],
    signs: &[S],
) -> Result<NormalizedConstraints, SolveError> {
    check_shape(num_variables, left, right, signs)?;

    let parsed = signs
        .iter()
        .enumerate()
        .map(|(row, sign)| ConstraintSign::parse(sign.as_ref(), row))
        .collect::<Result<Vec<_>, _>>()?;

    let mut out = NormalizedConstraints::default();
    for (row, ((coefficients, &rhs), sign)) in left.iter().zip(right).zip(parsed).enumerate() {
        match sign {
            ConstraintSign::Le => {
                out.le_matrix.push(coefficients.clone());
                out.le_vector.push(rhs);
                out.le_rows.push(row);
            }
            ConstraintSign::Ge => {
                out.le_matrix.push(coefficients.iter().map(|c| -c).collect());
                out.le_vector.push(-rhs);
                out.le_rows.push(row);
            }
            ConstraintSign::Eq => {
                out.eq_matrix.push(coefficients.clone());
                out.eq_vector.push(rhs);
                out.eq_rows.push(row);
            }
        }
    }
    Ok(out)
}
