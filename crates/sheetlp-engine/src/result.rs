/// Outcome reported by an engine run
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// An optimal solution was found
    Optimal,
    /// The iteration limit was reached before optimality
    IterationLimit,
    /// The problem is infeasible (no solution exists)
    Infeasible,
    /// The problem is unbounded
    Unbounded,
    /// The engine could not produce a trustworthy answer
    NumericalFailure,
}

impl EngineStatus {
    /// Numeric status code: 0 optimal, 1 iteration limit, 2 infeasible,
    /// 3 unbounded, 4 numerical failure.
    pub fn code(&self) -> u8 {
        match self {
            EngineStatus::Optimal => 0,
            EngineStatus::IterationLimit => 1,
            EngineStatus::Infeasible => 2,
            EngineStatus::Unbounded => 3,
            EngineStatus::NumericalFailure => 4,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            EngineStatus::Optimal => "Optimization terminated successfully. (Simplex: Optimal)",
            EngineStatus::IterationLimit => "The iteration limit was reached before an optimal solution was found.",
            EngineStatus::Infeasible => "The problem is infeasible. (Simplex: Infeasible)",
            EngineStatus::Unbounded => "The problem is unbounded. (Simplex: Unbounded)",
            EngineStatus::NumericalFailure => "Numerical difficulties encountered.",
        }
    }

    pub fn is_optimal(&self) -> bool {
        matches!(self, EngineStatus::Optimal)
    }

    pub fn is_infeasible(&self) -> bool {
        matches!(self, EngineStatus::Infeasible)
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, EngineStatus::Unbounded)
    }
}

/// The result of solving a canonical LP problem
#[derive(Debug, Clone, PartialEq)]
pub struct EngineResult {
    /// True only when `status` is `Optimal`
    pub success: bool,
    pub status: EngineStatus,
    /// Human-readable description of the outcome
    pub message: String,
    /// Optimal point, present only on success
    pub x: Option<Vec<f64>>,
    /// Objective value at `x`, present only on success
    pub fun: Option<f64>,
    /// Total pivots performed across both phases
    pub iterations: usize,
}

impl EngineResult {
    pub fn optimal(x: Vec<f64>, fun: f64, iterations: usize) -> Self {
        Self {
            success: true,
            status: EngineStatus::Optimal,
            message: EngineStatus::Optimal.default_message().to_string(),
            x: Some(x),
            fun: Some(fun),
            iterations,
        }
    }

    /// A non-optimal outcome with the status' default message
    pub fn failed(status: EngineStatus, iterations: usize) -> Self {
        Self::failed_with_message(status, status.default_message(), iterations)
    }

    pub fn failed_with_message(status: EngineStatus, message: impl Into<String>, iterations: usize) -> Self {
        Self {
            success: false,
            status,
            message: message.into(),
            x: None,
            fun: None,
            iterations,
        }
    }

    pub fn status_code(&self) -> u8 {
        self.status.code()
    }
}
