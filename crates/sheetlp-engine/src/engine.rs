use crate::method::Method;
use crate::problem::CanonicalProblem;
use crate::result::EngineResult;

/// A linear programming engine that minimizes a [`CanonicalProblem`].
///
/// Implementations report infeasible, unbounded and failed runs through
/// [`EngineResult::status`] rather than panicking or returning errors, so
/// any conforming solver can sit behind the translation layer.
pub trait LpEngine {
    fn solve(&self, problem: &CanonicalProblem, method: Method) -> EngineResult;
}

impl<E: LpEngine + ?Sized> LpEngine for &E {
    fn solve(&self, problem: &CanonicalProblem, method: Method) -> EngineResult {
        (**self).solve(problem, method)
    }
}
