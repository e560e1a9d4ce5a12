//! Configuration for the DPW solver.

use std::time::Duration;

use crate::mdp::MDP;
use crate::policy::estimation::ValueEstimator;
use crate::seam::{ActionSeam, NSeam, QSeam};
use crate::{MCTSError, Result};

/// Configuration for [`crate::dpw::DPWSolver`].
///
/// Carries everything [`crate::vanilla::VanillaConfig`] does, plus the four
/// progressive-widening parameters and the `next_action` seam action
/// widening dispatches through.
pub struct DPWConfig<M: MDP> {
    pub n_iterations: usize,
    pub depth: u32,
    pub exploration_constant: f64,
    pub seed: u64,
    pub max_time: Option<Duration>,
    pub keep_tree: bool,
    pub init_n: NSeam<M>,
    pub init_q: QSeam<M>,
    pub estimate_value: ValueEstimator<M>,

    /// Action-widening scale `k_action`.
    pub k_action: f64,
    /// Action-widening exponent `alpha_action`.
    pub alpha_action: f64,
    /// State-widening scale `k_state`.
    pub k_state: f64,
    /// State-widening exponent `alpha_state`.
    pub alpha_state: f64,
    /// When `false`, the full action set is enumerated once at node creation
    /// and never widened (`actions(mdp, s)` must be implemented).
    pub enable_action_pw: bool,
    /// Proposes a new action during action widening. Required when
    /// `enable_action_pw` is `true`.
    pub next_action: Option<ActionSeam<M>>,
}

impl<M: MDP> Default for DPWConfig<M> {
    fn default() -> Self {
        DPWConfig {
            n_iterations: 10_000,
            depth: 50,
            exploration_constant: std::f64::consts::SQRT_2,
            seed: 0,
            max_time: None,
            keep_tree: true,
            init_n: NSeam::Constant(0),
            init_q: QSeam::Constant(0.0),
            estimate_value: ValueEstimator::User(crate::seam::ValueSeam::Constant(0.0)),
            k_action: 5.0,
            alpha_action: 0.5,
            k_state: 5.0,
            alpha_state: 0.5,
            enable_action_pw: true,
            next_action: None,
        }
    }
}

impl<M: MDP> DPWConfig<M> {
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

    pub fn with_action_widening(mut self, k_action: f64, alpha_action: f64) -> Self {
        self.k_action = k_action;
        self.alpha_action = alpha_action;
        self
    }

    pub fn with_state_widening(mut self, k_state: f64, alpha_state: f64) -> Self {
        self.k_state = k_state;
        self.alpha_state = alpha_state;
        self
    }

    pub fn with_enable_action_pw(mut self, enable: bool) -> Self {
        self.enable_action_pw = enable;
        self
    }

    pub fn with_next_action(mut self, seam: ActionSeam<M>) -> Self {
        self.next_action = Some(seam);
        self
    }

    /// Validates configuration, including the DPW-specific "unsupported
    /// combination" from the spec's error taxonomy: action widening enabled
    /// without a `next_action` seam fails here, at construction, rather than
    /// on first dispatch.
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
        for (name, value) in [
            ("k_action", self.k_action),
            ("alpha_action", self.alpha_action),
            ("k_state", self.k_state),
            ("alpha_state", self.alpha_state),
        ] {
            if !(value > 0.0) {
                return Err(MCTSError::InvalidConfiguration(format!(
                    "{name} must be > 0"
                )));
            }
        }
        if self.enable_action_pw && self.next_action.is_none() {
            return Err(MCTSError::MissingNextActionSeam);
        }
        Ok(())
    }
}
