use sheetlp_engine::Method;

/// A linear program laid out the way a spreadsheet solver takes it.
///
/// Every list is positional: column `i` of each constraint row, entry `i`
/// of `objective_function` and entry `i` of `bounds` all refer to the same
/// decision variable, and row `r` of `constraints_left`, `constraints_right`
/// and `constraints_signs` describe the same constraint.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Problem {
    /// `"max"` or `"min"`
    pub problem_type: String,
    /// Objective coefficients; its length is the number of decision variables
    pub objective_function: Vec<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub constraints_left: Vec<Vec<f64>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub constraints_right: Vec<f64>,
    /// `"<="`, `">="` or `"="` per row
    #[cfg_attr(feature = "serde", serde(default))]
    pub constraints_signs: Vec<String>,
    /// Lower bound of 0 for variables without another lower limit
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub make_unconstrained_non_negative: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub minimum_for_all: Option<f64>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub maximum_for_all: Option<f64>,
    /// Explicit `(lower, upper)` per variable; `None` on either side means no limit
    #[cfg_attr(feature = "serde", serde(default))]
    pub bounds: Option<Vec<(Option<f64>, Option<f64>)>>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub method: Method,
    /// Print the report to stdout after solving
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub display_result: bool,
}

#[cfg(feature = "serde")]
fn default_true() -> bool {
    true
}

impl Problem {
    pub fn new(problem_type: impl Into<String>, objective_function: Vec<f64>) -> Self {
        Self {
            problem_type: problem_type.into(),
            objective_function,
            constraints_left: Vec::new(),
            constraints_right: Vec::new(),
            constraints_signs: Vec::new(),
            make_unconstrained_non_negative: true,
            minimum_for_all: None,
            maximum_for_all: None,
            bounds: None,
            method: Method::default(),
            display_result: true,
        }
    }

    /// Append one constraint row
    pub fn add_constraint(&mut self, coefficients: Vec<f64>, sign: impl Into<String>, rhs: f64) {
        self.constraints_left.push(coefficients);
        self.constraints_signs.push(sign.into());
        self.constraints_right.push(rhs);
    }

    pub fn constraint(mut self, coefficients: Vec<f64>, sign: impl Into<String>, rhs: f64) -> Self {
        self.add_constraint(coefficients, sign, rhs);
        self
    }

    /// Replace all constraints at once
    pub fn with_constraints<S: Into<String>>(
        mut self,
        left: Vec<Vec<f64>>,
        right: Vec<f64>,
        signs: Vec<S>,
    ) -> Self {
        self.constraints_left = left;
        self.constraints_right = right;
        self.constraints_signs = signs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_make_unconstrained_non_negative(mut self, enabled: bool) -> Self {
        self.make_unconstrained_non_negative = enabled;
        self
    }

    pub fn with_minimum_for_all(mut self, minimum: f64) -> Self {
        self.minimum_for_all = Some(minimum);
        self
    }

    pub fn with_maximum_for_all(mut self, maximum: f64) -> Self {
        self.maximum_for_all = Some(maximum);
        self
    }

    pub fn with_bounds(mut self, bounds: Vec<(Option<f64>, Option<f64>)>) -> Self {
        self.bounds = Some(bounds);
        self
    }

    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn with_display_result(mut self, display: bool) -> Self {
        self.display_result = display;
        self
    }

    pub fn num_variables(&self) -> usize {
        self.objective_function.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints_left.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let problem = Problem::new("min", vec![1.0, 2.0]);
        assert!(problem.make_unconstrained_non_negative);
        assert!(problem.display_result);
        assert_eq!(problem.method, Method::Simplex);
        assert_eq!(problem.minimum_for_all, None);
        assert_eq!(problem.bounds, None);
        assert_eq!(problem.num_variables(), 2);
        assert_eq!(problem.num_constraints(), 0);
    }

    #[test]
    fn test_constraint_rows_stay_aligned() {
        let problem = Problem::new("max", vec![1.0, 1.0])
            .constraint(vec![1.0, 0.0], "<=", 4.0)
            .constraint(vec![0.0, 1.0], ">=", 1.0);
        assert_eq!(problem.num_constraints(), 2);
        assert_eq!(problem.constraints_signs, vec!["<=", ">="]);
        assert_eq!(problem.constraints_right, vec![4.0, 1.0]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{
            "problem_type": "max",
            "objective_function": [16, 20.5, 14],
            "constraints_left": [[4, 6, 2]],
            "constraints_right": [2000],
            "constraints_signs": ["<="],
            "bounds": [[0, null], [null, 5], [1, 2]]
        }"#;
        let problem: Problem = serde_json::from_str(json).unwrap();
        assert!(problem.make_unconstrained_non_negative);
        assert!(problem.display_result);
        assert_eq!(problem.method, Method::Simplex);
        assert_eq!(problem.objective_function, vec![16.0, 20.5, 14.0]);
        assert_eq!(
            problem.bounds,
            Some(vec![(Some(0.0), None), (None, Some(5.0)), (Some(1.0), Some(2.0))])
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_method() {
        let json = r#"{"problem_type": "min", "objective_function": [1], "method": "bland", "display_result": false}"#;
        let problem: Problem = serde_json::from_str(json).unwrap();
        assert_eq!(problem.method, Method::Bland);
        assert!(!problem.display_result);
    }
}
