mod engine;
mod method;
mod problem;
mod result;
mod simplex;

pub use engine::LpEngine;
pub use method::{Method, UnknownMethod};
pub use problem::{CanonicalProblem, VariableBounds};
pub use result::{EngineResult, EngineStatus};
pub use simplex::SimplexEngine;
