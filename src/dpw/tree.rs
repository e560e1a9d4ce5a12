//! The DPW tree store: action children are grown one at a time by action
//! progressive widening, and each action's successor children are grown one
//! at a time by state progressive widening.

use std::collections::HashMap;

use crate::mdp::{Action, State};

/// One observed `(s', r)` sample from a `(s, a)` pair, in sampling order.
#[derive(Debug, Clone)]
pub struct Transition<S: State> {
    pub state: S,
    pub reward: f64,
}

/// A DPW state-action edge. `transitions` preserves sampling order so that
/// uniform reuse over the sequence naturally weights each distinct successor
/// by how often it was actually observed, without a separate frequency
/// table to keep in sync.
#[derive(Debug, Clone)]
pub struct DPWStateActionNode<S: State, A: Action> {
    pub action: A,
    pub n: u64,
    pub q: f64,
    pub transitions: Vec<Transition<S>>,
    successor_counts: HashMap<S, u64>,
}

impl<S: State, A: Action> DPWStateActionNode<S, A> {
    pub fn new(action: A, n: u64, q: f64) -> Self {
        DPWStateActionNode {
            action,
            n,
            q,
            transitions: Vec::new(),
            successor_counts: HashMap::new(),
        }
    }

    /// Number of *distinct* successor states observed so far.
    pub fn n_a_children(&self) -> usize {
        self.successor_counts.len()
    }

    /// Records a freshly sampled `(s', r)`, updating both the ordered
    /// sequence and the distinct-successor count.
    pub fn record_transition(&mut self, state: S, reward: f64) {
        *self.successor_counts.entry(state.clone()).or_insert(0) += 1;
        self.transitions.push(Transition { state, reward });
    }

    /// Checks invariant 2: `n == sum(count(s'))` over observed successors.
    pub fn n_matches_transition_counts(&self) -> bool {
        self.n == self.successor_counts.values().sum()
    }
}

/// A DPW state node. `a_children` is insertion-ordered and searched linearly
/// since DPW deliberately keeps the branching factor small (capped by
/// progressive widening), making a linear scan cheaper in practice than
/// maintaining a second index structure.
#[derive(Debug, Clone)]
pub struct DPWStateNode<S: State, A: Action> {
    pub state: S,
    pub total_n: u64,
    pub a_children: Vec<(A, DPWStateActionNode<S, A>)>,
}

impl<S: State, A: Action> DPWStateNode<S, A> {
    pub fn find_action(&self, a: &A) -> Option<usize> {
        self.a_children.iter().position(|(action, _)| action == a)
    }

    /// Checks the DPW analogue of invariant 1: `total_n == sum(child.n)`.
    pub fn total_n_matches_children(&self) -> bool {
        self.total_n == self.a_children.iter().map(|(_, c)| c.n).sum()
    }
}

/// A dense arena of DPW state-nodes addressed by `state -> index`.
#[derive(Debug)]
pub struct DPWTree<S: State, A: Action> {
    index: HashMap<S, usize>,
    nodes: Vec<DPWStateNode<S, A>>,
}

impl<S: State, A: Action> DPWTree<S, A> {
    pub fn new() -> Self {
        DPWTree {
            index: HashMap::new(),
            nodes: Vec::new(),
        }
    }

    pub fn contains(&self, s: &S) -> bool {
        self.index.contains_key(s)
    }

    /// Inserts a freshly created node for `s`. Panics if `s` is already
    /// present; see [`crate::vanilla::tree::VanillaTree::insert`].
    pub fn insert(&mut self, state: S, a_children: Vec<(A, DPWStateActionNode<S, A>)>) -> usize {
        assert!(!self.index.contains_key(&state), "state already in tree");
        let idx = self.nodes.len();
        self.nodes.push(DPWStateNode {
            state: state.clone(),
            total_n: 0,
            a_children,
        });
        self.index.insert(state, idx);
        idx
    }

    pub fn index_of(&self, s: &S) -> Option<usize> {
        self.index.get(s).copied()
    }

    pub fn get(&self, idx: usize) -> &DPWStateNode<S, A> {
        &self.nodes[idx]
    }

    pub fn get_mut(&mut self, idx: usize) -> &mut DPWStateNode<S, A> {
        &mut self.nodes[idx]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.nodes.clear();
    }
}

impl<S: State, A: Action> Default for DPWTree<S, A> {
    fn default() -> Self {
        Self::new()
    }
}
