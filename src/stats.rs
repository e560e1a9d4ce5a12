//! Diagnostics collected during a planning call.
//!
//! Mirrors the teacher crate's search statistics: a profiler-style summary
//! the embedder can log or assert on, not a visualization.

use std::time::Duration;

/// Statistics collected during one [`crate::vanilla::VanillaSolver::action`] or
/// [`crate::dpw::DPWSolver::action`] call.
#[derive(Debug, Clone)]
pub struct SearchStatistics {
    /// Number of simulations actually run.
    pub iterations: usize,

    /// Wall-clock time spent in the call.
    pub total_time: Duration,

    /// Number of state-nodes in the tree after the call.
    pub tree_size: usize,

    /// Maximum simulation depth reached (0 at the root).
    pub max_depth: usize,

    /// Whether the call stopped early because `max_time` elapsed.
    pub stopped_early: bool,
}

impl SearchStatistics {
    /// Creates a new, empty statistics object; `tree_size` starts at 1 to
    /// account for the root node inserted before the iteration loop begins.
    pub fn new() -> Self {
        SearchStatistics {
            iterations: 0,
            total_time: Duration::from_secs(0),
            tree_size: 1,
            max_depth: 0,
            stopped_early: false,
        }
    }

    /// Average wall-clock time per iteration, in microseconds.
    pub fn avg_time_per_iteration_us(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.total_time.as_micros() as f64 / self.iterations as f64
    }

    /// Iterations completed per second of wall-clock time.
    pub fn iterations_per_second(&self) -> f64 {
        if self.total_time.as_secs_f64() <= 0.0 {
            return 0.0;
        }
        self.iterations as f64 / self.total_time.as_secs_f64()
    }

    /// A human-readable summary, suitable for a debug log line.
    pub fn summary(&self) -> String {
        format!(
            "MCTS planning statistics:\n\
             - Iterations: {}\n\
             - Total time: {:.3} seconds\n\
             - Tree size: {} nodes\n\
             - Max depth: {}\n\
             - Avg time per iteration: {:.3} us\n\
             - Iterations per second: {:.1}\n\
             - Stopped early: {}",
            self.iterations,
            self.total_time.as_secs_f64(),
            self.tree_size,
            self.max_depth,
            self.avg_time_per_iteration_us(),
            self.iterations_per_second(),
            self.stopped_early
        )
    }
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self::new()
    }
}
