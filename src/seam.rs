//! Domain-knowledge seams: the pluggable extension points the search driver
//! consults while growing the tree.
//!
//! Each seam accepts any of three concrete forms — a constant, a pure
//! function of the documented arguments, or an opaque object dispatched
//! through a named trait — mirroring how the teacher crate lets a caller
//! supply a `Box<dyn SelectionPolicy<S>>` in place of a built-in policy.
//! Object-form seams may hold their own state (a counter, a nested RNG);
//! the engine never assumes a seam is pure.

use rand::rngs::StdRng;

use crate::mdp::MDP;
use crate::{MCTSError, Result};

/// Object-form initializer for a new state-action edge's visit count.
///
/// Returns `Err` to report a seam failure, surfaced to the caller as
/// [`MCTSError::SeamFailure`]; the constant and function forms of this seam
/// are infallible and never produce that variant themselves.
pub trait InitN<M: MDP>: Send + Sync {
    fn init_n(&self, mdp: &M, s: &M::State, a: &M::Action) -> std::result::Result<u64, String>;
}

/// Object-form initializer for a new state-action edge's Q estimate.
pub trait InitQ<M: MDP>: Send + Sync {
    fn init_q(&self, mdp: &M, s: &M::State, a: &M::Action) -> std::result::Result<f64, String>;
}

/// Object-form leaf value estimator.
pub trait EstimateValue<M: MDP>: Send + Sync {
    fn estimate_value(
        &self,
        mdp: &M,
        s: &M::State,
        depth: u32,
        rng: &mut StdRng,
    ) -> std::result::Result<f64, String>;
}

/// Object-form action proposer consulted by DPW action widening.
pub trait NextAction<M: MDP>: Send + Sync {
    fn next_action(
        &self,
        mdp: &M,
        s: &M::State,
        existing: &[M::Action],
        rng: &mut StdRng,
    ) -> std::result::Result<M::Action, String>;
}

/// A seam that initializes a new edge's visit count: constant, function, or object.
pub enum NSeam<M: MDP> {
    Constant(u64),
    Function(Box<dyn Fn(&M, &M::State, &M::Action) -> u64 + Send + Sync>),
    Object(Box<dyn InitN<M>>),
}

impl<M: MDP> NSeam<M> {
    pub fn dispatch(&self, mdp: &M, s: &M::State, a: &M::Action) -> Result<u64> {
        match self {
            NSeam::Constant(n) => Ok(*n),
            NSeam::Function(f) => Ok(f(mdp, s, a)),
            NSeam::Object(obj) => obj.init_n(mdp, s, a).map_err(MCTSError::SeamFailure),
        }
    }
}

/// A seam that initializes a new edge's Q estimate: constant, function, or object.
pub enum QSeam<M: MDP> {
    Constant(f64),
    Function(Box<dyn Fn(&M, &M::State, &M::Action) -> f64 + Send + Sync>),
    Object(Box<dyn InitQ<M>>),
}

impl<M: MDP> QSeam<M> {
    pub fn dispatch(&self, mdp: &M, s: &M::State, a: &M::Action) -> Result<f64> {
        match self {
            QSeam::Constant(q) => Ok(*q),
            QSeam::Function(f) => Ok(f(mdp, s, a)),
            QSeam::Object(obj) => obj.init_q(mdp, s, a).map_err(MCTSError::SeamFailure),
        }
    }
}

/// A seam that proposes the leaf value of a freshly inserted state: constant, function, or object.
pub enum ValueSeam<M: MDP> {
    Constant(f64),
    Function(Box<dyn Fn(&M, &M::State, u32) -> f64 + Send + Sync>),
    Object(Box<dyn EstimateValue<M>>),
}

impl<M: MDP> ValueSeam<M> {
    pub fn dispatch(&self, mdp: &M, s: &M::State, depth: u32, rng: &mut StdRng) -> Result<f64> {
        match self {
            ValueSeam::Constant(v) => Ok(*v),
            ValueSeam::Function(f) => Ok(f(mdp, s, depth)),
            ValueSeam::Object(obj) => obj
                .estimate_value(mdp, s, depth, rng)
                .map_err(MCTSError::SeamFailure),
        }
    }
}

/// A seam that proposes a new action for DPW action widening: function or object.
///
/// There is no meaningful constant form for this seam (a fixed action would
/// never let the tree widen past one child), so only the function and object
/// forms are represented.
pub enum ActionSeam<M: MDP> {
    Function(Box<dyn Fn(&M, &M::State, &[M::Action], &mut StdRng) -> M::Action + Send + Sync>),
    Object(Box<dyn NextAction<M>>),
}

impl<M: MDP> ActionSeam<M> {
    pub fn dispatch(
        &self,
        mdp: &M,
        s: &M::State,
        existing: &[M::Action],
        rng: &mut StdRng,
    ) -> Result<M::Action> {
        match self {
            ActionSeam::Function(f) => Ok(f(mdp, s, existing, rng)),
            ActionSeam::Object(obj) => obj
                .next_action(mdp, s, existing, rng)
                .map_err(MCTSError::SeamFailure),
        }
    }
}
