use log::{debug, trace};

use crate::engine::LpEngine;
use crate::method::Method;
use crate::problem::CanonicalProblem;
use crate::result::{EngineResult, EngineStatus};

/// Consecutive degenerate pivots tolerated before Dantzig pricing hands over to Bland's rule
const DEGENERATE_STREAK_LIMIT: usize = 50;

/// Relative tolerance used when checking the recovered point against the original problem
const VERIFY_TOLERANCE: f64 = 1e-6;

/// Two-phase simplex solver for canonical LP problems
pub struct SimplexEngine {
    /// Maximum pivots (both phases combined) before giving up
    max_iterations: usize,
    /// Tolerance for floating point comparisons
    tolerance: f64,
}

impl Default for SimplexEngine {
    fn default() -> Self {
        Self {
            max_iterations: 10000,
            tolerance: 1e-9,
        }
    }
}

impl LpEngine for SimplexEngine {
    fn solve(&self, problem: &CanonicalProblem, method: Method) -> EngineResult {
        SimplexEngine::solve(self, problem, method)
    }
}

impl SimplexEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    pub fn with_tolerance(mut self, tol: f64) -> Self {
        self.tolerance = tol;
        self
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Minimize the problem using the two-phase simplex method
    pub fn solve(&self, problem: &CanonicalProblem, method: Method) -> EngineResult {
        if let Some(reason) = problem.shape_error() {
            debug!("rejecting malformed canonical problem: {}", reason);
            return EngineResult::failed_with_message(
                EngineStatus::NumericalFailure,
                format!("Invalid problem: {}", reason),
                0,
            );
        }

        let substitution = match Substitution::new(problem) {
            Ok(s) => s,
            Err(variable) => {
                let b = problem.bounds[variable];
                return EngineResult::failed_with_message(
                    EngineStatus::Infeasible,
                    format!(
                        "The problem is infeasible: variable {} has lower bound {} above upper bound {}.",
                        variable, b.lower, b.upper
                    ),
                    0,
                );
            }
        };

        let rows = substitution.standard_rows(problem);
        let mut tableau = Tableau::build(&rows, substitution.width);
        let mut iterations = 0;

        debug!(
            "simplex ({}): {} columns, {} rows, {} slack, {} artificial",
            method,
            tableau.n_vars,
            rows.len(),
            tableau.n_slack,
            tableau.n_artificial
        );

        // Phase 1: Find initial basic feasible solution
        if tableau.n_artificial > 0 {
            match self.phase1(&mut tableau, method, &mut iterations) {
                PhaseOutcome::Optimal => {}
                PhaseOutcome::Unbounded => {
                    return EngineResult::failed_with_message(
                        EngineStatus::NumericalFailure,
                        "Numerical difficulties encountered: phase 1 objective became unbounded.",
                        iterations,
                    );
                }
                PhaseOutcome::IterationLimit => {
                    return EngineResult::failed(EngineStatus::IterationLimit, iterations);
                }
            }

            let infeasibility = tableau.artificial_sum();
            debug!("phase 1 finished after {} pivots, infeasibility {:e}", iterations, infeasibility);
            if infeasibility > self.feasibility_tolerance(&rows) {
                return EngineResult::failed(EngineStatus::Infeasible, iterations);
            }
            self.drive_out_artificials(&mut tableau);
        }

        // Phase 2: Optimize
        tableau.load_objective(&substitution.objective(problem));
        match self.phase2(&mut tableau, method, &mut iterations) {
            PhaseOutcome::Optimal => {}
            PhaseOutcome::Unbounded => return EngineResult::failed(EngineStatus::Unbounded, iterations),
            PhaseOutcome::IterationLimit => {
                return EngineResult::failed(EngineStatus::IterationLimit, iterations);
            }
        }
        debug!("phase 2 finished, {} pivots in total", iterations);

        let standard_values = tableau.values(self.tolerance);
        let x = substitution.recover(&standard_values);
        if let Some(reason) = self.verify(problem, &x) {
            debug!("recovered point failed verification: {}", reason);
            return EngineResult::failed_with_message(
                EngineStatus::NumericalFailure,
                format!("Numerical difficulties encountered: {}.", reason),
                iterations,
            );
        }

        let fun = problem
            .objective
            .iter()
            .zip(&x)
            .map(|(c, v)| c * v)
            .sum();
        EngineResult::optimal(x, fun, iterations)
    }

    fn feasibility_tolerance(&self, rows: &[StandardRow]) -> f64 {
        let scale = rows.iter().map(|r| r.rhs.abs()).fold(0.0, f64::max);
        self.tolerance.max(1e-9) * (1.0 + scale) * 10.0
    }

    fn phase1(&self, tableau: &mut Tableau, method: Method, iterations: &mut usize) -> PhaseOutcome {
        // Maximize -sum(artificials), i.e. minimize the artificials
        let obj_row = tableau.obj_row();
        let n_cols = tableau.n_cols();
        let art_start = tableau.art_start();

        for j in 0..n_cols {
            tableau.data[obj_row][j] = 0.0;
        }
        for j in art_start..(art_start + tableau.n_artificial) {
            tableau.data[obj_row][j] = -1.0;
        }

        // Cancel the coefficient of every basic artificial
        for i in 0..obj_row {
            if tableau.basic_vars[i] >= art_start {
                for j in 0..n_cols {
                    tableau.data[obj_row][j] += tableau.data[i][j];
                }
            }
        }

        self.iterate(tableau, n_cols - 1, method, iterations)
    }

    fn phase2(&self, tableau: &mut Tableau, method: Method, iterations: &mut usize) -> PhaseOutcome {
        // Exclude artificial variable columns from pivoting
        let exclude_from = tableau.art_start();
        self.iterate(tableau, exclude_from, method, iterations)
    }

    fn iterate(
        &self,
        tableau: &mut Tableau,
        col_limit: usize,
        method: Method,
        iterations: &mut usize,
    ) -> PhaseOutcome {
        let mut bland = method == Method::Bland;
        let mut degenerate_streak = 0;

        loop {
            let Some(pivot_col) = self.find_pivot_column(tableau, col_limit, bland) else {
                return PhaseOutcome::Optimal;
            };
            let Some(pivot_row) = self.find_pivot_row(tableau, pivot_col, bland) else {
                return PhaseOutcome::Unbounded;
            };
            if *iterations >= self.max_iterations {
                return PhaseOutcome::IterationLimit;
            }

            if tableau.rhs(pivot_row).abs() <= self.tolerance {
                degenerate_streak += 1;
                if !bland && degenerate_streak > DEGENERATE_STREAK_LIMIT {
                    debug!("{} degenerate pivots in a row, switching to Bland's rule", degenerate_streak);
                    bland = true;
                }
            } else {
                degenerate_streak = 0;
            }

            trace!("pivot {}: row {} column {}", *iterations, pivot_row, pivot_col);
            tableau.pivot(pivot_row, pivot_col);
            *iterations += 1;
        }
    }

    /// Entering column: the most positive reduced cost, or the first positive one under Bland's rule
    fn find_pivot_column(&self, tableau: &Tableau, col_limit: usize, bland: bool) -> Option<usize> {
        let obj_row = tableau.obj_row();

        if bland {
            return (0..col_limit).find(|&j| tableau.data[obj_row][j] > self.tolerance);
        }

        let mut max_val = self.tolerance;
        let mut max_col = None;
        for j in 0..col_limit {
            if tableau.data[obj_row][j] > max_val {
                max_val = tableau.data[obj_row][j];
                max_col = Some(j);
            }
        }
        max_col
    }

    /// Leaving row by the minimum ratio test. Ties go to the smallest basic index under Bland's rule.
    fn find_pivot_row(&self, tableau: &Tableau, col: usize, bland: bool) -> Option<usize> {
        let mut min_ratio = f64::INFINITY;
        let mut min_row: Option<usize> = None;

        for i in 0..tableau.obj_row() {
            let val = tableau.data[i][col];
            if val <= self.tolerance {
                continue;
            }
            let ratio = (tableau.rhs(i) / val).max(0.0);
            let better = match min_row {
                None => true,
                Some(current) => {
                    if ratio < min_ratio - self.tolerance {
                        true
                    } else if bland && ratio <= min_ratio + self.tolerance {
                        tableau.basic_vars[i] < tableau.basic_vars[current]
                    } else {
                        false
                    }
                }
            };
            if better {
                min_ratio = ratio;
                min_row = Some(i);
            }
        }

        min_row
    }

    /// Pivot zero-level artificials out of the basis. Rows with no usable
    /// column are redundant and stay inert for phase 2.
    fn drive_out_artificials(&self, tableau: &mut Tableau) {
        let art_start = tableau.art_start();
        for i in 0..tableau.obj_row() {
            if tableau.basic_vars[i] < art_start {
                continue;
            }
            let column = (0..art_start)
                .filter(|&j| tableau.data[i][j].abs() > self.tolerance)
                .max_by(|&a, &b| tableau.data[i][a].abs().total_cmp(&tableau.data[i][b].abs()));
            match column {
                Some(j) => tableau.pivot(i, j),
                None => trace!("row {} is redundant", i),
            }
        }
    }

    fn verify(&self, problem: &CanonicalProblem, x: &[f64]) -> Option<String> {
        if let Some(i) = x.iter().position(|v| !v.is_finite()) {
            return Some(format!("variable {} is not finite", i));
        }

        let slack = |rhs: f64| VERIFY_TOLERANCE * (1.0 + rhs.abs());

        for (i, (row, &rhs)) in problem.le_matrix.iter().zip(&problem.le_vector).enumerate() {
            let lhs = dot(row, x);
            if lhs > rhs + slack(rhs) {
                return Some(format!("<= row {} evaluates to {} above {}", i, lhs, rhs));
            }
        }
        for (i, (row, &rhs)) in problem.eq_matrix.iter().zip(&problem.eq_vector).enumerate() {
            let lhs = dot(row, x);
            if (lhs - rhs).abs() > slack(rhs) {
                return Some(format!("= row {} evaluates to {} instead of {}", i, lhs, rhs));
            }
        }
        for (i, (bounds, &value)) in problem.bounds.iter().zip(x).enumerate() {
            let scale = bounds.lower.abs().min(bounds.upper.abs());
            if !bounds.contains(value, slack(if scale.is_finite() { scale } else { 0.0 })) {
                return Some(format!("variable {} = {} lies outside its bounds", i, value));
            }
        }
        None
    }
}

fn dot(row: &[f64], x: &[f64]) -> f64 {
    row.iter().zip(x).map(|(a, v)| a * v).sum()
}

enum PhaseOutcome {
    Optimal,
    Unbounded,
    IterationLimit,
}

/// How an original variable is expressed in terms of non-negative standard columns
#[derive(Debug, Clone, Copy, PartialEq)]
enum VariableMap {
    /// x = lower + x'
    Shifted { col: usize, lower: f64 },
    /// x = upper - x'
    Mirrored { col: usize, upper: f64 },
    /// x = x+ - x-
    Split { pos: usize, neg: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowKind {
    Le,
    Eq,
}

#[derive(Debug, Clone)]
struct StandardRow {
    coefficients: Vec<f64>,
    kind: RowKind,
    rhs: f64,
}

/// Change of variables that turns arbitrary bounds into `x' >= 0`
struct Substitution {
    maps: Vec<VariableMap>,
    /// Extra `x' <= upper - lower` rows for shifted variables with a finite upper bound
    upper_rows: Vec<(usize, f64)>,
    /// Number of standard columns
    width: usize,
}

impl Substitution {
    /// Fails with the index of the first variable whose bounds admit no value
    fn new(problem: &CanonicalProblem) -> Result<Self, usize> {
        let mut maps = Vec::with_capacity(problem.num_variables());
        let mut upper_rows = Vec::new();
        let mut width = 0;

        for (i, b) in problem.bounds.iter().enumerate() {
            if b.lower > b.upper || b.lower == f64::INFINITY || b.upper == f64::NEG_INFINITY {
                return Err(i);
            }
            if b.lower.is_finite() {
                maps.push(VariableMap::Shifted { col: width, lower: b.lower });
                if b.upper.is_finite() {
                    upper_rows.push((width, b.upper - b.lower));
                }
                width += 1;
            } else if b.upper.is_finite() {
                maps.push(VariableMap::Mirrored { col: width, upper: b.upper });
                width += 1;
            } else {
                maps.push(VariableMap::Split { pos: width, neg: width + 1 });
                width += 2;
            }
        }

        Ok(Self { maps, upper_rows, width })
    }

    /// Rewrite `a · x` as `a' · x' + offset`
    fn transform(&self, coefficients: &[f64]) -> (Vec<f64>, f64) {
        let mut out = vec![0.0; self.width];
        let mut offset = 0.0;
        for (map, &a) in self.maps.iter().zip(coefficients) {
            match *map {
                VariableMap::Shifted { col, lower } => {
                    out[col] = a;
                    offset += a * lower;
                }
                VariableMap::Mirrored { col, upper } => {
                    out[col] = -a;
                    offset += a * upper;
                }
                VariableMap::Split { pos, neg } => {
                    out[pos] = a;
                    out[neg] = -a;
                }
            }
        }
        (out, offset)
    }

    fn standard_rows(&self, problem: &CanonicalProblem) -> Vec<StandardRow> {
        let le = problem.le_matrix.iter().zip(&problem.le_vector).map(|r| (r, RowKind::Le));
        let eq = problem.eq_matrix.iter().zip(&problem.eq_vector).map(|r| (r, RowKind::Eq));

        let mut rows: Vec<StandardRow> = le
            .chain(eq)
            .map(|((row, &rhs), kind)| {
                let (coefficients, offset) = self.transform(row);
                StandardRow { coefficients, kind, rhs: rhs - offset }
            })
            .collect();

        for &(col, limit) in &self.upper_rows {
            let mut coefficients = vec![0.0; self.width];
            coefficients[col] = 1.0;
            rows.push(StandardRow { coefficients, kind: RowKind::Le, rhs: limit });
        }
        rows
    }

    fn objective(&self, problem: &CanonicalProblem) -> Vec<f64> {
        self.transform(&problem.objective).0
    }

    fn recover(&self, standard: &[f64]) -> Vec<f64> {
        self.maps
            .iter()
            .map(|map| match *map {
                VariableMap::Shifted { col, lower } => lower + standard[col],
                VariableMap::Mirrored { col, upper } => upper - standard[col],
                VariableMap::Split { pos, neg } => standard[pos] - standard[neg],
            })
            .collect()
    }
}

struct Tableau {
    /// Constraint rows followed by the objective row; the last column holds the RHS
    data: Vec<Vec<f64>>,
    basic_vars: Vec<usize>,
    n_vars: usize,
    n_slack: usize,
    n_artificial: usize,
}

impl Tableau {
    fn build(rows: &[StandardRow], n_vars: usize) -> Self {
        let n_constraints = rows.len();

        // Count slack and artificial variables needed
        let mut n_slack = 0;
        let mut n_artificial = 0;
        for row in rows {
            match row.kind {
                RowKind::Le => {
                    n_slack += 1;
                    if row.rhs < 0.0 {
                        n_artificial += 1;
                    }
                }
                RowKind::Eq => n_artificial += 1,
            }
        }

        let total_cols = n_vars + n_slack + n_artificial + 1; // +1 for RHS
        let mut tableau = Tableau {
            data: vec![vec![0.0; total_cols]; n_constraints + 1],
            basic_vars: vec![0; n_constraints],
            n_vars,
            n_slack,
            n_artificial,
        };

        let mut slack_idx = n_vars;
        let mut artificial_idx = n_vars + n_slack;

        for (i, row) in rows.iter().enumerate() {
            // RHS must be non-negative; flip the whole row otherwise
            let flip = row.rhs < 0.0;
            let sign = if flip { -1.0 } else { 1.0 };
            for (j, &coef) in row.coefficients.iter().enumerate() {
                tableau.data[i][j] = sign * coef;
            }
            tableau.data[i][total_cols - 1] = sign * row.rhs;

            match row.kind {
                RowKind::Le if !flip => {
                    tableau.data[i][slack_idx] = 1.0;
                    tableau.basic_vars[i] = slack_idx;
                    slack_idx += 1;
                }
                RowKind::Le => {
                    // -a·x >= -b after the flip: surplus plus artificial
                    tableau.data[i][slack_idx] = -1.0;
                    slack_idx += 1;
                    tableau.data[i][artificial_idx] = 1.0;
                    tableau.basic_vars[i] = artificial_idx;
                    artificial_idx += 1;
                }
                RowKind::Eq => {
                    tableau.data[i][artificial_idx] = 1.0;
                    tableau.basic_vars[i] = artificial_idx;
                    artificial_idx += 1;
                }
            }
        }

        tableau
    }

    fn obj_row(&self) -> usize {
        self.data.len() - 1
    }

    fn n_cols(&self) -> usize {
        self.data[0].len()
    }

    fn art_start(&self) -> usize {
        self.n_vars + self.n_slack
    }

    fn rhs(&self, row: usize) -> f64 {
        self.data[row][self.n_cols() - 1]
    }

    fn artificial_sum(&self) -> f64 {
        let art_start = self.art_start();
        (0..self.obj_row())
            .filter(|&i| self.basic_vars[i] >= art_start)
            .map(|i| self.rhs(i).abs())
            .sum()
    }

    /// Install a minimization objective over the structural columns and
    /// price out the current basis
    fn load_objective(&mut self, objective: &[f64]) {
        let obj_row = self.obj_row();
        let n_cols = self.n_cols();

        // The objective row stores -c: a positive entry improves the objective
        for j in 0..n_cols {
            self.data[obj_row][j] = if j < objective.len() { -objective[j] } else { 0.0 };
        }
        for i in 0..obj_row {
            let basic = self.basic_vars[i];
            let ratio = self.data[obj_row][basic];
            if ratio != 0.0 {
                for j in 0..n_cols {
                    self.data[obj_row][j] -= ratio * self.data[i][j];
                }
            }
        }
    }

    fn pivot(&mut self, row: usize, col: usize) {
        let n_rows = self.data.len();
        let n_cols = self.n_cols();

        self.basic_vars[row] = col;

        // Scale pivot row
        let pivot_val = self.data[row][col];
        for j in 0..n_cols {
            self.data[row][j] /= pivot_val;
        }

        // Eliminate column in other rows
        for i in 0..n_rows {
            if i != row {
                let factor = self.data[i][col];
                if factor != 0.0 {
                    for j in 0..n_cols {
                        self.data[i][j] -= factor * self.data[row][j];
                    }
                }
            }
        }
    }

    /// Values of the structural columns at the current basis
    fn values(&self, tolerance: f64) -> Vec<f64> {
        let mut values = vec![0.0; self.n_vars];
        for i in 0..self.obj_row() {
            let basic = self.basic_vars[i];
            if basic < self.n_vars {
                let v = self.rhs(i);
                values[basic] = if v.abs() <= tolerance { 0.0 } else { v };
            }
        }
        values
    }
}
