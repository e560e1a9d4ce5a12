//! Configuration for the vanilla solver.

use std::time::Duration;

use crate::mdp::MDP;
use crate::policy::estimation::ValueEstimator;
use crate::seam::{NSeam, QSeam};
use crate::{MCTSError, Result};

/// Configuration for [`crate::vanilla::VanillaSolver`].
///
/// Built with the same `with_*` builder style the teacher crate uses for
/// `MCTSConfig`; unlike the teacher's config this one cannot derive `Clone`
/// or `Debug`, since the seams it carries may be arbitrary boxed closures or
/// trait objects.
pub struct VanillaConfig<M: MDP> {
    /// Simulations run per `action` call.
    pub n_iterations: usize,
    /// Maximum simulation depth.
    pub depth: u32,
    /// UCB exploration constant `c`.
    pub exploration_constant: f64,
    /// Seed for the solver's `StdRng`.
    pub seed: u64,
    /// Optional wall-clock budget, checked between simulations.
    pub max_time: Option<Duration>,
    /// Whether the tree persists across `action` calls (`true`) or is
    /// rebuilt from scratch at the top of every call (`false`).
    pub keep_tree: bool,
    /// Initializer for a new edge's visit count.
    pub init_n: NSeam<M>,
    /// Initializer for a new edge's Q estimate.
    pub init_q: QSeam<M>,
    /// Leaf value estimator.
    pub estimate_value: ValueEstimator<M>,
}

impl<M: MDP> Default for VanillaConfig<M> {
    fn default() -> Self {
        VanillaConfig {
            n_iterations: 10_000,
            depth: 50,
            exploration_constant: std::f64::consts::SQRT_2,
            seed: 0,
            max_time: None,
            keep_tree: true,
            init_n: NSeam::Constant(0),
            init_q: QSeam::Constant(0.0),
            estimate_value: ValueEstimator::User(crate::seam::ValueSeam::Constant(0.0)),
        }
    }
}

impl<M: MDP> VanillaConfig<M> {
    pub fn with_n_iterations(mut self, n: usize) -> Self {
        self.n_iterations = n;
        self
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_time(mut self, max_time: Duration) -> Self {
        self.max_time = Some(max_time);
        self
    }

    pub fn with_keep_tree(mut self, keep_tree: bool) -> Self {
        self.keep_tree = keep_tree;
        self
    }

    pub fn with_init_n(mut self, seam: NSeam<M>) -> Self {
        self.init_n = seam;
        self
    }

    pub fn with_init_q(mut self, seam: QSeam<M>) -> Self {
        self.init_q = seam;
        self
    }

    pub fn with_estimate_value(mut self, estimator: ValueEstimator<M>) -> Self {
        self.estimate_value = estimator;
        self
    }

    /// Validates configuration invariants that can be checked without
    /// reference to any particular MDP instance or state.
    pub fn validate(&self) -> Result<()> {
        if self.n_iterations == 0 {
            return Err(MCTSError::InvalidConfiguration(
                "n_iterations must be > 0".into(),
            ));
        }
        if self.depth == 0 {
            return Err(MCTSError::InvalidConfiguration("depth must be > 0".into()));
        }
        if self.exploration_constant < 0.0 {
            return Err(MCTSError::InvalidConfiguration(
                "exploration_constant must be >= 0".into(),
            ));
        }
        Ok(())
    }
}
