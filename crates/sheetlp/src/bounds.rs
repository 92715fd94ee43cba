//! Bound resolution.
//!
//! Four inputs can limit a variable: the explicit per-variable `bounds`
//! list, `minimum_for_all`, `maximum_for_all` and the
//! `make_unconstrained_non_negative` flag. Each side of the pair is
//! decided by an ordered list of rules; the first rule that applies wins.

use sheetlp_engine::VariableBounds;

use crate::error::SolveError;
use crate::naming::variable_name;

/// The bound inputs of a problem
#[derive(Debug, Clone, Copy)]
pub struct BoundsSpec<'a> {
    pub make_unconstrained_non_negative: bool,
    pub minimum_for_all: Option<f64>,
    pub maximum_for_all: Option<f64>,
    pub explicit: Option<&'a [(Option<f64>, Option<f64>)]>,
}

impl Default for BoundsSpec<'_> {
    fn default() -> Self {
        Self {
            make_unconstrained_non_negative: true,
            minimum_for_all: None,
            maximum_for_all: None,
            explicit: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LowerRule {
    /// The variable's entry in `bounds`
    Explicit,
    MinimumForAll,
    /// 0 from `make_unconstrained_non_negative`
    NonNegative,
    Unbounded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpperRule {
    /// The variable's entry in `bounds`
    Explicit,
    MaximumForAll,
    Unbounded,
}

/// Highest precedence first
pub const LOWER_RULES: [LowerRule; 4] = [
    LowerRule::Explicit,
    LowerRule::MinimumForAll,
    LowerRule::NonNegative,
    LowerRule::Unbounded,
];

/// Highest precedence first
pub const UPPER_RULES: [UpperRule; 3] = [UpperRule::Explicit, UpperRule::MaximumForAll, UpperRule::Unbounded];

impl LowerRule {
    /// The lower bound this rule sets for variable `index`, if it applies.
    /// `Explicit` does not apply to an index past the end of `spec.explicit`.
    pub fn apply(&self, spec: &BoundsSpec<'_>, index: usize) -> Option<f64> {
        match self {
            LowerRule::Explicit => spec
                .explicit
                .and_then(|pairs| pairs.get(index))
                .map(|pair| pair.0.unwrap_or(f64::NEG_INFINITY)),
            LowerRule::MinimumForAll => spec.minimum_for_all,
            LowerRule::NonNegative => spec.make_unconstrained_non_negative.then_some(0.0),
            LowerRule::Unbounded => Some(f64::NEG_INFINITY),
        }
    }
}

impl UpperRule {
    /// The upper bound this rule sets for variable `index`, if it applies
    pub fn apply(&self, spec: &BoundsSpec<'_>, index: usize) -> Option<f64> {
        match self {
            UpperRule::Explicit => spec
                .explicit
                .and_then(|pairs| pairs.get(index))
                .map(|pair| pair.1.unwrap_or(f64::INFINITY)),
            UpperRule::MaximumForAll => spec.maximum_for_all,
            UpperRule::Unbounded => Some(f64::INFINITY),
        }
    }
}

/// Resolved bounds of one variable and the rules that produced them
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub bounds: VariableBounds,
    pub lower_rule: LowerRule,
    pub upper_rule: UpperRule,
}

/// Run both rule lists for variable `index`
pub fn resolve_variable(spec: &BoundsSpec<'_>, index: usize) -> Resolution {
    let (lower_rule, lower) = LOWER_RULES
        .iter()
        .find_map(|rule| rule.apply(spec, index).map(|value| (*rule, value)))
        .unwrap_or((LowerRule::Unbounded, f64::NEG_INFINITY));
    let (upper_rule, upper) = UPPER_RULES
        .iter()
        .find_map(|rule| rule.apply(spec, index).map(|value| (*rule, value)))
        .unwrap_or((UpperRule::Unbounded, f64::INFINITY));

    Resolution {
        bounds: VariableBounds::new(lower, upper),
        lower_rule,
        upper_rule,
    }
}

/// Resolve the bound pair of every variable
pub fn resolve(spec: &BoundsSpec<'_>, num_variables: usize) -> Result<Vec<VariableBounds>, SolveError> {
    if let Some(pairs) = spec.explicit {
        if pairs.len() != num_variables {
            return Err(SolveError::BoundsLengthMismatch {
                expected: num_variables,
                found: pairs.len(),
            });
        }
    }

    (0..num_variables)
        .map(|index| {
            let bounds = resolve_variable(spec, index).bounds;
            if bounds.lower.is_nan() || bounds.upper.is_nan() {
                return Err(SolveError::NanBound {
                    variable: index,
                    name: variable_name(index),
                });
            }
            if bounds.lower > bounds.upper {
                return Err(SolveError::InfeasibleBounds {
                    variable: index,
                    name: variable_name(index),
                    lower: bounds.lower,
                    upper: bounds.upper,
                });
            }
            Ok(bounds)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_non_negative() {
        let spec = BoundsSpec::default();
        let resolution = resolve_variable(&spec, 0);
        assert_eq!(resolution.bounds, VariableBounds::non_negative());
        assert_eq!(resolution.lower_rule, LowerRule::NonNegative);
        assert_eq!(resolution.upper_rule, UpperRule::Unbounded);
    }

    #[test]
    fn test_free_when_non_negativity_disabled() {
        let spec = BoundsSpec {
            make_unconstrained_non_negative: false,
            ..BoundsSpec::default()
        };
        let resolution = resolve_variable(&spec, 0);
        assert!(resolution.bounds.is_free());
        assert_eq!(resolution.lower_rule, LowerRule::Unbounded);
    }

    #[test]
    fn test_minimum_for_all_beats_non_negativity() {
        for flag in [true, false] {
            let spec = BoundsSpec {
                make_unconstrained_non_negative: flag,
                minimum_for_all: Some(-2.5),
                ..BoundsSpec::default()
            };
            let resolution = resolve_variable(&spec, 0);
            assert_eq!(resolution.bounds.lower, -2.5);
            assert_eq!(resolution.lower_rule, LowerRule::MinimumForAll);
        }
    }

    #[test]
    fn test_zero_minimum_for_all_is_honored() {
        let spec = BoundsSpec {
            make_unconstrained_non_negative: false,
            minimum_for_all: Some(0.0),
            ..BoundsSpec::default()
        };
        assert_eq!(resolve_variable(&spec, 0).bounds.lower, 0.0);
    }

    #[test]
    fn test_maximum_for_all() {
        let spec = BoundsSpec {
            maximum_for_all: Some(10.0),
            ..BoundsSpec::default()
        };
        let resolution = resolve_variable(&spec, 0);
        assert_eq!(resolution.bounds, VariableBounds::new(0.0, 10.0));
        assert_eq!(resolution.upper_rule, UpperRule::MaximumForAll);
    }

    #[test]
    fn test_explicit_bounds_are_authoritative() {
        let pairs = [(Some(1.0), Some(2.0)), (None, Some(-1.0)), (Some(-3.0), None), (None, None)];
        let spec = BoundsSpec {
            make_unconstrained_non_negative: true,
            minimum_for_all: Some(0.5),
            maximum_for_all: Some(100.0),
            explicit: Some(&pairs),
        };
        let resolved = resolve(&spec, 4).unwrap();
        assert_eq!(
            resolved,
            vec![
                VariableBounds::new(1.0, 2.0),
                VariableBounds::new(f64::NEG_INFINITY, -1.0),
                VariableBounds::new(-3.0, f64::INFINITY),
                VariableBounds::free(),
            ]
        );
        let resolution = resolve_variable(&spec, 3);
        assert_eq!(resolution.lower_rule, LowerRule::Explicit);
        assert_eq!(resolution.upper_rule, UpperRule::Explicit);
    }

    #[test]
    fn test_bounds_length_mismatch() {
        let pairs = [(Some(0.0), None)];
        let spec = BoundsSpec {
            explicit: Some(&pairs),
            ..BoundsSpec::default()
        };
        assert_eq!(
            resolve(&spec, 2),
            Err(SolveError::BoundsLengthMismatch { expected: 2, found: 1 })
        );
    }

    #[test]
    fn test_crossed_explicit_bounds() {
        let pairs = [(Some(0.0), Some(1.0)), (Some(5.0), Some(3.0))];
        let spec = BoundsSpec {
            explicit: Some(&pairs),
            ..BoundsSpec::default()
        };
        assert_eq!(
            resolve(&spec, 2),
            Err(SolveError::InfeasibleBounds {
                variable: 1,
                name: "b".to_string(),
                lower: 5.0,
                upper: 3.0,
            })
        );
    }

    #[test]
    fn test_maximum_below_non_negative_default() {
        let spec = BoundsSpec {
            maximum_for_all: Some(-1.0),
            ..BoundsSpec::default()
        };
        assert!(matches!(
            resolve(&spec, 3),
            Err(SolveError::InfeasibleBounds { variable: 0, .. })
        ));
    }

    #[test]
    fn test_nan_limit_is_rejected() {
        let spec = BoundsSpec {
            minimum_for_all: Some(f64::NAN),
            ..BoundsSpec::default()
        };
        assert_eq!(
            resolve(&spec, 2),
            Err(SolveError::NanBound {
                variable: 0,
                name: "a".to_string(),
            })
        );

        let pairs = [(Some(0.0), Some(1.0)), (None, Some(f64::NAN))];
        let spec = BoundsSpec {
            explicit: Some(&pairs),
            ..BoundsSpec::default()
        };
        assert!(matches!(
            resolve(&spec, 2),
            Err(SolveError::NanBound { variable: 1, .. })
        ));
    }

    #[test]
    fn test_explicit_rule_skips_missing_entry() {
        let pairs = [(Some(1.0), Some(2.0))];
        let spec = BoundsSpec {
            maximum_for_all: Some(7.0),
            explicit: Some(&pairs),
            ..BoundsSpec::default()
        };
        assert_eq!(LowerRule::Explicit.apply(&spec, 3), None);
        assert_eq!(UpperRule::Explicit.apply(&spec, 3), None);

        let resolution = resolve_variable(&spec, 3);
        assert_eq!(resolution.bounds, VariableBounds::new(0.0, 7.0));
        assert_eq!(resolution.lower_rule, LowerRule::NonNegative);
        assert_eq!(resolution.upper_rule, UpperRule::MaximumForAll);
    }

    #[test]
    fn test_rule_order() {
        assert_eq!(LOWER_RULES[0], LowerRule::Explicit);
        assert_eq!(LOWER_RULES[3], LowerRule::Unbounded);
        assert_eq!(UPPER_RULES[0], UpperRule::Explicit);
        assert_eq!(UPPER_RULES[2], UpperRule::Unbounded);
    }
}
