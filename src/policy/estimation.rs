//! Leaf value estimation.
//!
//! Implements §4.4 of the spec as a tagged variant rather than a trait
//! hierarchy: a freshly inserted leaf's value comes either directly from the
//! `estimate_value` seam, or from simulating a rollout policy forward for the
//! remaining depth and returning the discounted return.

use rand::rngs::StdRng;

use crate::mdp::MDP;
use crate::seam::ValueSeam;
use crate::{MCTSError, Result};

/// Object-form rollout policy: proposes an action to take during a rollout.
pub trait RolloutPolicy<M: MDP>: Send + Sync {
    fn act(&self, mdp: &M, s: &M::State, rng: &mut StdRng) -> std::result::Result<M::Action, String>;
}

/// A rollout action-selection rule: function or object.
pub enum RolloutActor<M: MDP> {
    Function(Box<dyn Fn(&M, &M::State, &mut StdRng) -> M::Action + Send + Sync>),
    Object(Box<dyn RolloutPolicy<M>>),
}

impl<M: MDP> RolloutActor<M> {
    fn act(&self, mdp: &M, s: &M::State, rng: &mut StdRng) -> Result<M::Action> {
        match self {
            RolloutActor::Function(f) => Ok(f(mdp, s, rng)),
            RolloutActor::Object(obj) => obj.act(mdp, s, rng).map_err(MCTSError::SeamFailure),
        }
    }
}

/// The leaf value estimator: either a direct seam, or a rollout.
pub enum ValueEstimator<M: MDP> {
    /// Evaluate the `estimate_value` seam directly; no MDP interaction.
    User(ValueSeam<M>),
    /// Simulate `actor` forward from the leaf for the remaining depth and
    /// return the discounted return.
    Rollout(RolloutActor<M>),
}

impl<M: MDP> ValueEstimator<M> {
    /// Estimates the value of freshly inserted state `s` with `depth` steps remaining.
    pub fn estimate(&self, mdp: &M, s: &M::State, depth: u32, rng: &mut StdRng) -> Result<f64> {
        match self {
            ValueEstimator::User(seam) => seam.dispatch(mdp, s, depth, rng),
            ValueEstimator::Rollout(actor) => rollout(mdp, actor, s, depth, rng),
        }
    }
}

/// Runs one rollout trajectory from `s` for up to `depth` steps, returning the
/// discounted return. Matches §4.4 step by step: the loop stops the instant
/// it hits a terminal state, and every sample is drawn through `rng` so a
/// whole planning call remains reproducible from one seed.
fn rollout<M: MDP>(
    mdp: &M,
    actor: &RolloutActor<M>,
    s: &M::State,
    depth: u32,
    rng: &mut StdRng,
) -> Result<f64> {
    let gamma = mdp.discount();
    let mut total = 0.0;
    let mut discount_acc = 1.0;
    let mut state = s.clone();

    for _ in 0..depth {
        if mdp.is_terminal(&state) {
            break;
        }
        let action = actor.act(mdp, &state, rng)?;
        let (next_state, reward) = mdp.generate_sr(&state, &action, rng);
        total += discount_acc * reward;
        discount_acc *= gamma;
        state = next_state;
    }

    Ok(total)
}
