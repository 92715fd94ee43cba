/// A linear program in the canonical form the engine accepts:
///
/// minimize `objective · x`
/// subject to `le_matrix · x <= le_vector`,
///            `eq_matrix · x == eq_vector`,
///            `bounds[i].lower <= x[i] <= bounds[i].upper`
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalProblem {
    /// Coefficients to minimize, one per variable
    pub objective: Vec<f64>,
    /// Rows of the `<=` system (may be empty)
    pub le_matrix: Vec<Vec<f64>>,
    /// Right-hand sides of the `<=` system
    pub le_vector: Vec<f64>,
    /// Rows of the `=` system (may be empty)
    pub eq_matrix: Vec<Vec<f64>>,
    /// Right-hand sides of the `=` system
    pub eq_vector: Vec<f64>,
    /// One bound pair per variable
    pub bounds: Vec<VariableBounds>,
}

/// Lower and upper limit of a single variable. Infinite values mean "no limit".
///
/// With the `serde` feature an infinite side is written as `null`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "BoundsRepr", into = "BoundsRepr"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableBounds {
    pub lower: f64,
    pub upper: f64,
}

impl VariableBounds {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// `(-inf, +inf)`
    pub fn free() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    /// `[0, +inf)`
    pub fn non_negative() -> Self {
        Self::new(0.0, f64::INFINITY)
    }

    pub fn is_free(&self) -> bool {
        self.lower == f64::NEG_INFINITY && self.upper == f64::INFINITY
    }

    pub fn contains(&self, value: f64, tolerance: f64) -> bool {
        value >= self.lower - tolerance && value <= self.upper + tolerance
    }
}

impl Default for VariableBounds {
    fn default() -> Self {
        Self::non_negative()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct BoundsRepr {
    #[serde(default)]
    lower: Option<f64>,
    #[serde(default)]
    upper: Option<f64>,
}

#[cfg(feature = "serde")]
impl From<BoundsRepr> for VariableBounds {
    fn from(repr: BoundsRepr) -> Self {
        Self::new(
            repr.lower.unwrap_or(f64::NEG_INFINITY),
            repr.upper.unwrap_or(f64::INFINITY),
        )
    }
}

#[cfg(feature = "serde")]
impl From<VariableBounds> for BoundsRepr {
    fn from(bounds: VariableBounds) -> Self {
        Self {
            lower: bounds.lower.is_finite().then_some(bounds.lower),
            upper: bounds.upper.is_finite().then_some(bounds.upper),
        }
    }
}

impl CanonicalProblem {
    /// A problem with only an objective: no constraints, every variable non-negative.
    pub fn new(objective: Vec<f64>) -> Self {
        let n = objective.len();
        Self {
            objective,
            le_matrix: Vec::new(),
            le_vector: Vec::new(),
            eq_matrix: Vec::new(),
            eq_vector: Vec::new(),
            bounds: vec![VariableBounds::non_negative(); n],
        }
    }

    pub fn add_le(&mut self, coefficients: Vec<f64>, rhs: f64) {
        self.le_matrix.push(coefficients);
        self.le_vector.push(rhs);
    }

    pub fn add_eq(&mut self, coefficients: Vec<f64>, rhs: f64) {
        self.eq_matrix.push(coefficients);
        self.eq_vector.push(rhs);
    }

    pub fn set_bounds(&mut self, bounds: Vec<VariableBounds>) {
        self.bounds = bounds;
    }

    pub fn num_variables(&self) -> usize {
        self.objective.len()
    }

    pub fn num_le_rows(&self) -> usize {
        self.le_matrix.len()
    }

    pub fn num_eq_rows(&self) -> usize {
        self.eq_matrix.len()
    }

    /// Describe the first structural inconsistency, if any.
    pub(crate) fn shape_error(&self) -> Option<String> {
        let n = self.num_variables();
        if self.le_matrix.len() != self.le_vector.len() {
            return Some(format!(
                "<= system has {} rows but {} right-hand sides",
                self.le_matrix.len(),
                self.le_vector.len()
            ));
        }
        if self.eq_matrix.len() != self.eq_vector.len() {
            return Some(format!(
                "= system has {} rows but {} right-hand sides",
                self.eq_matrix.len(),
                self.eq_vector.len()
            ));
        }
        if let Some(i) = self.le_matrix.iter().position(|row| row.len() != n) {
            return Some(format!("<= row {} does not have {} coefficients", i, n));
        }
        if let Some(i) = self.eq_matrix.iter().position(|row| row.len() != n) {
            return Some(format!("= row {} does not have {} coefficients", i, n));
        }
        if self.bounds.len() != n {
            return Some(format!("expected {} bound pairs, got {}", n, self.bounds.len()));
        }

        if !all_finite(&self.objective)
            || !all_finite(&self.le_vector)
            || !all_finite(&self.eq_vector)
            || !self.le_matrix.iter().all(|row| all_finite(row))
            || !self.eq_matrix.iter().all(|row| all_finite(row))
        {
            return Some("problem data contains NaN or infinite values".to_string());
        }
        if self.bounds.iter().any(|b| b.lower.is_nan() || b.upper.is_nan()) {
            return Some("bounds contain NaN".to_string());
        }
        None
    }
}

fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_problem_defaults_to_non_negative() {
        let problem = CanonicalProblem::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(problem.num_variables(), 3);
        assert_eq!(problem.num_le_rows(), 0);
        assert_eq!(problem.num_eq_rows(), 0);
        assert!(problem.bounds.iter().all(|b| *b == VariableBounds::non_negative()));
        assert!(problem.shape_error().is_none());
    }

    #[test]
    fn test_shape_error_reports_short_row() {
        let mut problem = CanonicalProblem::new(vec![1.0, 2.0]);
        problem.add_le(vec![1.0, 1.0], 4.0);
        problem.add_eq(vec![1.0], 1.0);
        let err = problem.shape_error().expect("row 0 of = system is short");
        assert!(err.contains("= row 0"), "{}", err);
    }

    #[test]
    fn test_shape_error_rejects_nan() {
        let mut problem = CanonicalProblem::new(vec![1.0, f64::NAN]);
        problem.add_le(vec![1.0, 1.0], 4.0);
        assert!(problem.shape_error().is_some());
    }

    #[test]
    fn test_bounds_helpers() {
        assert!(VariableBounds::free().is_free());
        assert!(!VariableBounds::non_negative().is_free());
        let b = VariableBounds::new(1.0, 2.0);
        assert!(b.contains(1.5, 0.0));
        assert!(b.contains(2.0 + 1e-12, 1e-9));
        assert!(!b.contains(0.5, 1e-9));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_round_trip_keeps_infinite_bounds() {
        let mut problem = CanonicalProblem::new(vec![1.0, 2.0, 3.0]);
        problem.add_le(vec![1.0, 1.0, 1.0], 4.0);
        problem.set_bounds(vec![
            VariableBounds::non_negative(),
            VariableBounds::free(),
            VariableBounds::new(-1.0, 2.5),
        ]);

        let json = serde_json::to_string(&problem).unwrap();
        assert!(json.contains(r#"{"lower":0.0,"upper":null}"#), "{}", json);
        assert!(json.contains(r#"{"lower":null,"upper":null}"#), "{}", json);

        let back: CanonicalProblem = serde_json::from_str(&json).unwrap();
        assert_eq!(back, problem);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_missing_bound_sides_mean_no_limit() {
        let bounds: VariableBounds = serde_json::from_str(r#"{"lower":1.5}"#).unwrap();
        assert_eq!(bounds, VariableBounds::new(1.5, f64::INFINITY));
    }
}
