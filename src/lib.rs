//! # mdp-mcts
//!
//! An online Monte Carlo Tree Search planner for sequential decision problems
//! modeled as Markov Decision Processes (MDPs).
//!
//! The crate ships two interchangeable search variants:
//!
//! - [`vanilla`]: finite, enumerable action spaces. Every legal action gets a
//!   state-action node at the time its parent state is created.
//! - [`dpw`]: Double Progressive Widening, for large or continuous state and
//!   action spaces. Action and successor-state children are grown
//!   incrementally, capped as a sublinear function of visit count.
//!
//! Both variants share the same selection/expansion/simulation/backup loop
//! (see [`policy`]) and the same domain-knowledge seams (see [`seam`]): a
//! caller plugs in `init_N`, `init_Q`, `estimate_value`, and (DPW only)
//! `next_action` as a constant, a function, or an opaque object.
//!
//! ## Basic usage
//!
//! ```
//! use mdp_mcts::mdp::MDP;
//! use mdp_mcts::policy::estimation::ValueEstimator;
//! use mdp_mcts::seam::{NSeam, QSeam, ValueSeam};
//! use mdp_mcts::vanilla::{VanillaConfig, VanillaSolver};
//! use rand::rngs::StdRng;
//!
//! #[derive(Clone, Debug, PartialEq, Eq, Hash)]
//! struct CounterState(i32);
//!
//! #[derive(Clone, Debug, PartialEq, Eq, Hash)]
//! enum Step { Up, Down }
//!
//! struct Counter;
//!
//! impl MDP for Counter {
//!     type State = CounterState;
//!     type Action = Step;
//!
//!     fn actions(&self, _s: &CounterState) -> Vec<Step> {
//!         vec![Step::Up, Step::Down]
//!     }
//!
//!     fn generate_sr(&self, s: &CounterState, a: &Step, _rng: &mut StdRng) -> (CounterState, f64) {
//!         match a {
//!             Step::Up => (CounterState(s.0 + 1), 1.0),
//!             Step::Down => (CounterState(s.0 - 1), -1.0),
//!         }
//!     }
//!
//!     fn discount(&self) -> f64 { 0.95 }
//!     fn is_terminal(&self, s: &CounterState) -> bool { s.0.abs() >= 5 }
//! }
//!
//! let config = VanillaConfig::default()
//!     .with_n_iterations(64)
//!     .with_depth(10)
//!     .with_init_n(NSeam::Constant(0))
//!     .with_init_q(QSeam::Constant(0.0))
//!     .with_estimate_value(ValueEstimator::User(ValueSeam::Constant(0.0)))
//!     .with_seed(7);
//!
//! let mut solver = VanillaSolver::new(Counter, config);
//! let best = solver.action(&CounterState(0)).unwrap();
//! println!("best action: {:?}", best);
//! ```

pub mod dpw;
pub mod mdp;
pub mod policy;
pub mod seam;
pub mod stats;
pub mod utils;
pub mod vanilla;

pub use mdp::MDP;
pub use stats::SearchStatistics;

/// Error type for planner configuration, model-contract, and seam failures.
#[derive(thiserror::Error, Debug)]
pub enum MCTSError {
    /// `actions(mdp, s)` returned no legal actions at a non-terminal state.
    #[error("no legal actions available from a non-terminal state")]
    NoLegalActions,

    /// A solver configuration parameter was out of its documented range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// `discount(mdp)` returned a value outside `[0, 1]`.
    #[error("invalid discount factor {0}, expected a value in [0, 1]")]
    InvalidDiscount(f64),

    /// The generative model returned a non-finite reward.
    #[error("generative model returned a non-finite reward: {0}")]
    NonFiniteReward(f64),

    /// DPW action progressive widening was enabled without a `next_action` seam.
    #[error("DPW action progressive widening requires a next_action seam")]
    MissingNextActionSeam,

    /// A user-supplied seam failed; the message is the seam's own description.
    #[error("seam failed: {0}")]
    SeamFailure(String),
}

/// Result type for planner operations.
pub type Result<T> = std::result::Result<T, MCTSError>;
