//! Small numeric helpers shared by both search variants.

/// The UCB exploration term: `c * sqrt(ln(parent_n) / child_n)`.
///
/// Returns `f64::INFINITY` for an unvisited child, since such a child must
/// always be preferred over any visited one (invariant 5 of the spec).
pub fn ucb_exploration(parent_n: u64, child_n: u64, exploration_constant: f64) -> f64 {
    if child_n == 0 {
        return f64::INFINITY;
    }
    exploration_constant * ((parent_n as f64).ln() / child_n as f64).sqrt()
}

/// The full UCB value: `q + c * sqrt(ln(parent_n) / child_n)`.
pub fn ucb_value(q: f64, child_n: u64, parent_n: u64, exploration_constant: f64) -> f64 {
    q + ucb_exploration(parent_n, child_n, exploration_constant)
}

/// The incremental-mean update used by backup: folds `sample` into the
/// running mean `q` which has accumulated `n` prior samples (`n` is the
/// post-increment count, i.e. the edge has just been visited for the `n`-th
/// time).
pub fn incremental_mean(q: f64, n: u64, sample: f64) -> f64 {
    q + (sample - q) / n as f64
}

/// Progressive widening threshold: `ceil(k * n.max(1)^alpha)`, always >= 1.
///
/// Evaluating with `n.max(1)` matches the spec's requirement that the
/// allowed count at zero visits equals `ceil(k)` rather than `ceil(0) = 0`,
/// so the first widening check can always add exactly one child.
pub fn widening_threshold(k: f64, alpha: f64, n: u64) -> u64 {
    let n = n.max(1) as f64;
    (k * n.powf(alpha)).ceil().max(1.0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unvisited_child_is_always_preferred() {
        assert_eq!(ucb_exploration(10, 0, 1.414), f64::INFINITY);
        assert_eq!(ucb_value(0.0, 0, 10, 1.414), f64::INFINITY);
    }

    #[test]
    fn ucb_matches_hand_computed_value() {
        // c=1.0, parent_n=100, child_n=4: ln(100)=4.60517..., /4 = 1.1513, sqrt = 1.073
        let v = ucb_value(2.0, 4, 100, 1.0);
        assert!((v - (2.0 + 1.0730517)).abs() < 1e-4);
    }

    #[test]
    fn incremental_mean_overwrites_on_first_sample() {
        // n transitions 0 -> 1: q must become exactly the first sample,
        // regardless of the seam's init_Q value.
        let q = incremental_mean(11.73, 1, 5.0);
        assert_eq!(q, 5.0);
    }

    #[test]
    fn incremental_mean_averages_subsequent_samples() {
        let mut q = incremental_mean(0.0, 1, 4.0);
        q = incremental_mean(q, 2, 8.0);
        assert_eq!(q, 6.0);
    }

    #[test]
    fn widening_threshold_is_at_least_one_at_zero_visits() {
        assert_eq!(widening_threshold(2.0, 0.5, 0), 2);
        assert_eq!(widening_threshold(0.5, 0.5, 0), 1);
    }

    #[test]
    fn widening_threshold_grows_sublinearly() {
        let at_1 = widening_threshold(1.0, 0.5, 1);
        let at_100 = widening_threshold(1.0, 0.5, 100);
        assert_eq!(at_1, 1);
        assert_eq!(at_100, 10);
    }
}
