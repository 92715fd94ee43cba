//! Solve linear programs described the way a spreadsheet solver takes them:
//! a direction, an objective row, a constraint matrix, a right-hand-side
//! column and one comparison sign per row.
//!
//! ```no_run
//! use sheetlp::{solve, Problem};
//!
//! let problem = Problem::new("max", vec![16.0, 20.5, 14.0])
//!     .constraint(vec![4.0, 6.0, 2.0], "<=", 2000.0)
//!     .constraint(vec![3.0, 8.0, 6.0], "<=", 2000.0)
//!     .constraint(vec![9.0, 6.0, 4.0], "<=", 1440.0)
//!     .constraint(vec![30.0, 40.0, 25.0], "<=", 9600.0);
//!
//! let result = solve(&problem)?;
//! assert_eq!(result.quantities.map(|q| q.len()), Some(3));
//! # Ok::<(), sheetlp::SolveError>(())
//! ```

pub mod bounds;
pub mod error;
pub mod naming;
pub mod objective;
pub mod problem;
pub mod report;
pub mod signs;
pub mod solve;

pub use bounds::{BoundsSpec, LowerRule, Resolution, UpperRule};
pub use error::SolveError;
pub use naming::{variable_name, variable_names};
pub use objective::{Direction, expression, format_number};
pub use problem::Problem;
pub use report::Report;
pub use signs::{ConstraintSign, NormalizedConstraints};
pub use solve::{SolveResult, SolveStatus, Translation, solve, solve_with, translate};

pub use sheetlp_engine::{
    CanonicalProblem, EngineResult, EngineStatus, LpEngine, Method, SimplexEngine, VariableBounds,
};
