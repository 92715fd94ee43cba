use log::{debug, warn};
use sheetlp_engine::{CanonicalProblem, EngineResult, EngineStatus, LpEngine, SimplexEngine};

use crate::bounds::{self, BoundsSpec};
use crate::error::SolveError;
use crate::naming::variable_names;
use crate::objective::{self, Direction};
use crate::problem::Problem;
use crate::report::Report;
use crate::signs;

/// Outcome of a solve attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    Optimal,
    Infeasible,
    Unbounded,
    IterationLimit,
    /// The engine gave up or produced an answer it could not verify
    SolverFailure,
}

impl From<EngineStatus> for SolveStatus {
    fn from(status: EngineStatus) -> Self {
        match status {
            EngineStatus::Optimal => SolveStatus::Optimal,
            EngineStatus::Infeasible => SolveStatus::Infeasible,
            EngineStatus::Unbounded => SolveStatus::Unbounded,
            EngineStatus::IterationLimit => SolveStatus::IterationLimit,
            EngineStatus::NumericalFailure => SolveStatus::SolverFailure,
        }
    }
}

/// The structured result of [`solve`]. Values are kept at full precision;
/// only the [`Report`] rounds them.
#[derive(Debug, Clone, PartialEq)]
pub struct SolveResult {
    pub status: SolveStatus,
    /// Engine status code (0 optimal, 1 iteration limit, 2 infeasible, 3 unbounded, 4 failure)
    pub status_code: u8,
    /// Optimal objective value in the problem's own direction
    pub optimal_value: Option<f64>,
    /// One value per decision variable, in index order
    pub quantities: Option<Vec<f64>>,
    /// The engine's message, passed through verbatim
    pub message: String,
    pub iterations: usize,
    pub direction: Direction,
    pub variable_names: Vec<String>,
    /// `MAXIMIZE: z = ...` / `MINIMIZE: z = ...`
    pub objective_line: String,
}

impl SolveResult {
    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }

    pub fn report(&self) -> Report<'_> {
        Report::new(self)
    }

    /// Quantity of the variable displayed as `name`
    pub fn quantity(&self, name: &str) -> Option<f64> {
        let index = self.variable_names.iter().position(|n| n == name)?;
        self.quantities.as_ref()?.get(index).copied()
    }
}

/// A problem rewritten into the engine's canonical form
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub direction: Direction,
    pub variable_names: Vec<String>,
    pub canonical: CanonicalProblem,
    /// Objective expression with the user's signs
    pub expression: String,
    /// Objective expression as the engine minimizes it
    pub canonical_expression: String,
    pub objective_line: String,
    /// Input row index of each `<=` row of `canonical`
    pub le_rows: Vec<usize>,
    /// Input row index of each `=` row of `canonical`
    pub eq_rows: Vec<usize>,
}

/// Validate `problem` and build its canonical form without solving it
pub fn translate(problem: &Problem) -> Result<Translation, SolveError> {
    let direction = Direction::parse(&problem.problem_type)?;
    let n = problem.num_variables();
    if n == 0 {
        return Err(SolveError::EmptyObjective);
    }

    let constraints = signs::normalize(
        n,
        &problem.constraints_left,
        &problem.constraints_right,
        &problem.constraints_signs,
    )?;

    let spec = BoundsSpec {
        make_unconstrained_non_negative: problem.make_unconstrained_non_negative,
        minimum_for_all: problem.minimum_for_all,
        maximum_for_all: problem.maximum_for_all,
        explicit: problem.bounds.as_deref(),
    };
    let bounds = bounds::resolve(&spec, n)?;

    let names = variable_names(n);
    let objective = objective::canonical_objective(direction, &problem.objective_function);
    let expression = objective::expression(&problem.objective_function, &names);
    let canonical_expression = objective::expression(&objective, &names);
    let objective_line = objective::objective_line(direction, &problem.objective_function, &names);

    let canonical = CanonicalProblem {
        objective,
        le_matrix: constraints.le_matrix,
        le_vector: constraints.le_vector,
        eq_matrix: constraints.eq_matrix,
        eq_vector: constraints.eq_vector,
        bounds,
    };

    Ok(Translation {
        direction,
        variable_names: names,
        canonical,
        expression,
        canonical_expression,
        objective_line,
        le_rows: constraints.le_rows,
        eq_rows: constraints.eq_rows,
    })
}

/// Solve `problem` with the bundled simplex engine.
///
/// Malformed input is returned as an error before anything is printed.
/// Infeasible and unbounded programs are not errors; they are reported
/// through [`SolveResult::status`]. The report is printed to stdout when
/// `problem.display_result` is set.
pub fn solve(problem: &Problem) -> Result<SolveResult, SolveError> {
    solve_with(problem, &SimplexEngine::new())
}

/// Solve `problem` with any [`LpEngine`]
pub fn solve_with<E: LpEngine + ?Sized>(problem: &Problem, engine: &E) -> Result<SolveResult, SolveError> {
    let translation = translate(problem)?;
    debug!(
        "{} variables, {} <= rows, {} = rows; engine minimizes z = {}",
        translation.variable_names.len(),
        translation.canonical.num_le_rows(),
        translation.canonical.num_eq_rows(),
        translation.canonical_expression
    );

    let outcome = engine.solve(&translation.canonical, problem.method);
    debug!(
        "engine finished with {:?} after {} iterations",
        outcome.status, outcome.iterations
    );

    let result = interpret(translation, outcome);
    if problem.display_result {
        println!("{}", result.report());
    }
    Ok(result)
}

/// Map the engine's answer back onto the user's problem
fn interpret(translation: Translation, outcome: EngineResult) -> SolveResult {
    let outcome = check_solution_length(outcome, translation.variable_names.len());
    let status = SolveStatus::from(outcome.status);
    let (optimal_value, quantities) = match (status, outcome.fun, outcome.x) {
        (SolveStatus::Optimal, Some(fun), Some(x)) => (Some(translation.direction.sign() * fun), Some(x)),
        _ => (None, None),
    };

    SolveResult {
        status,
        status_code: outcome.status.code(),
        optimal_value,
        quantities,
        message: outcome.message,
        iterations: outcome.iterations,
        direction: translation.direction,
        variable_names: translation.variable_names,
        objective_line: translation.objective_line,
    }
}

/// An optimal answer must carry one value per variable
fn check_solution_length(outcome: EngineResult, num_variables: usize) -> EngineResult {
    match &outcome.x {
        Some(x) if outcome.status == EngineStatus::Optimal && x.len() != num_variables => {
            warn!(
                "engine returned {} values for {} variables",
                x.len(),
                num_variables
            );
            EngineResult::failed_with_message(
                EngineStatus::NumericalFailure,
                format!(
                    "The engine returned {} values for {} variables",
                    x.len(),
                    num_variables
                ),
                outcome.iterations,
            )
        }
        _ => outcome,
    }
}
