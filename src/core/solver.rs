pub const BISECTION_ITERATIONS: u32 = 50;
pub const CONVERGENCE_TOLERANCE: f64 = 0.01;

#[derive(Debug, Clone, Copy)]
pub struct SearchBounds {
    pub search_min: f64,
    pub search_max: f64,
    pub tolerance: f64,
    pub max_iterations: u32,
}

impl SearchBounds {
    pub const fn new(search_min: f64, search_max: f64) -> Self {
        Self {
            search_min,
            search_max,
            tolerance: CONVERGENCE_TOLERANCE,
            max_iterations: BISECTION_ITERATIONS,
        }
    }
}

/// Finds `x` in `[search_min, search_max]` with `eval(x)` close to `target`.
///
/// `eval` must be non-decreasing over the bounds. Returns as soon as a midpoint lands within
/// `tolerance` of the target, otherwise the closest midpoint seen once the iteration budget is
/// spent.
pub fn bisect_increasing<F>(eval: F, target: f64, bounds: SearchBounds) -> f64
where
    F: Fn(f64) -> f64,
{
    let mut lo = bounds.search_min;
    let mut hi = bounds.search_max;
    let mut best_value = lo;
    let mut best_diff = f64::INFINITY;

    for _ in 0..bounds.max_iterations {
        let mid = (lo + hi) * 0.5;
        let achieved = eval(mid);
        let diff = (achieved - target).abs();

        if diff < best_diff {
            best_diff = diff;
            best_value = mid;
        }
        if diff < bounds.tolerance {
            return mid;
        }

        if achieved < target {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    best_value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    #[test]
    fn finds_root_of_linear_function() {
        let x = bisect_increasing(|x| 3.0 * x, 150.0, SearchBounds::new(0.0, 100.0));
        assert_close(x, 50.0, CONVERGENCE_TOLERANCE);
    }

    #[test]
    fn returns_immediately_when_first_midpoint_is_within_tolerance() {
        let x = bisect_increasing(|x| x, 50.005, SearchBounds::new(0.0, 100.0));
        assert_eq!(x, 50.0);
    }

    #[test]
    fn returns_best_candidate_when_tolerance_is_never_met() {
        // Jumps over the target at x = 4, so no midpoint lands within tolerance.
        let bounds = SearchBounds {
            max_iterations: 20,
            ..SearchBounds::new(0.0, 10.0)
        };
        let step = |x: f64| if x < 4.0 { x / 100.0 } else { 1.0 + x / 100.0 };
        let x = bisect_increasing(step, 0.5, bounds);
        assert_close(x, 4.0, 1e-4);
    }

    #[test]
    fn converges_against_upper_bound_when_target_is_above_range() {
        let bounds = SearchBounds {
            max_iterations: 30,
            ..SearchBounds::new(0.0, 1.0)
        };
        let x = bisect_increasing(|x| x, 5.0, bounds);
        assert_close(x, 1.0, 1e-6);
    }
}
