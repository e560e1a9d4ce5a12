//! Traits defining the Markov Decision Process interface consumed by the planner.
//!
//! The [`MDP`] trait is the single collaborator a caller must implement to use
//! either search variant. It is intentionally narrow: the planner drives the
//! model exclusively through generative sampling, never through an explicit
//! transition distribution.

use std::fmt::Debug;
use std::hash::Hash;

use rand::rngs::StdRng;

/// Marker trait for planner states.
///
/// A state must support equality and hashing so the tree stores can key nodes
/// by state, and must be cheap enough to clone since the planner clones states
/// as it walks simulated trajectories.
pub trait State: Clone + Eq + Hash + Debug + Send + Sync {}
impl<T: Clone + Eq + Hash + Debug + Send + Sync> State for T {}

/// Marker trait for planner actions.
///
/// The vanilla variant only needs actions to be cloned and compared for the
/// purposes of display; the DPW variant additionally keys a node's action
/// children by `Action`, hence the `Hash` bound is carried on both variants
/// for a single shared trait rather than split by solver.
pub trait Action: Clone + Eq + Hash + Debug + Send + Sync {}
impl<T: Clone + Eq + Hash + Debug + Send + Sync> Action for T {}

/// The model interface the search driver consumes.
///
/// Implementations are read-only from the planner's perspective: every
/// stochastic decision the model makes takes the engine's RNG explicitly so
/// that an entire planning call is reproducible from one seed.
pub trait MDP: Send + Sync {
    /// The state type of this model.
    type State: State;
    /// The action type of this model.
    type Action: Action;

    /// Returns the legal actions at `s`.
    ///
    /// Required for the vanilla variant (one state-action node is created per
    /// legal action) and for the DPW variant only when action progressive
    /// widening is disabled.
    fn actions(&self, s: &Self::State) -> Vec<Self::Action>;

    /// Samples a successor state and reward for `(s, a)`.
    fn generate_sr(&self, s: &Self::State, a: &Self::Action, rng: &mut StdRng)
        -> (Self::State, f64);

    /// The discount factor γ ∈ [0, 1].
    fn discount(&self) -> f64;

    /// Whether `s` is a terminal state (no further actions are legal).
    fn is_terminal(&self, s: &Self::State) -> bool;
}
