//! The DPW search driver: double progressive widening over both the action
//! and successor-state dimensions, for large or continuous spaces.

use std::time::Instant;

use log::{debug, error, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dpw::config::DPWConfig;
use crate::dpw::tree::{DPWStateActionNode, DPWTree};
use crate::mdp::MDP;
use crate::policy::backpropagation::backup_edge;
use crate::policy::selection::select_ucb;
use crate::stats::SearchStatistics;
use crate::utils::widening_threshold;
use crate::{MCTSError, Result};

/// Monte Carlo Tree Search with Double Progressive Widening.
pub struct DPWSolver<M: MDP> {
    mdp: M,
    config: DPWConfig<M>,
    tree: DPWTree<M::State, M::Action>,
    rng: StdRng,
    statistics: SearchStatistics,
}

impl<M: MDP> std::fmt::Debug for DPWSolver<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DPWSolver")
            .field("tree", &self.tree)
            .field("statistics", &self.statistics)
            .finish_non_exhaustive()
    }
}

impl<M: MDP> DPWSolver<M> {
    /// Builds a solver, failing immediately if the configuration is invalid
    /// (per the spec's "unsupported combination" error: action widening
    /// enabled without a `next_action` seam).
    pub fn new(mdp: M, config: DPWConfig<M>) -> Result<Self> {
        config.validate()?;
        let rng = StdRng::seed_from_u64(config.seed);
        Ok(DPWSolver {
            mdp,
            config,
            tree: DPWTree::new(),
            rng,
            statistics: SearchStatistics::new(),
        })
    }

    pub fn mdp(&self) -> &M {
        &self.mdp
    }

    pub fn tree(&self) -> &DPWTree<M::State, M::Action> {
        &self.tree
    }

    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    pub fn clear_tree(&mut self) {
        self.tree.clear();
    }

    pub fn visualize_tree(&self, root_state: &M::State) -> String {
        let mut out = String::new();
        if let Some(idx) = self.tree.index_of(root_state) {
            let node = self.tree.get(idx);
            out.push_str(&format!("root (visits: {})\n", node.total_n));
            for (action, child) in &node.a_children {
                out.push_str(&format!(
                    "  {:?} (n: {}, q: {:.3}, successors: {})\n",
                    action,
                    child.n,
                    child.q,
                    child.n_a_children()
                ));
            }
        }
        out
    }

    pub fn action(&mut self, root_state: &M::State) -> Result<M::Action> {
        let gamma = self.mdp.discount();
        if !(0.0..=1.0).contains(&gamma) {
            return Err(MCTSError::InvalidDiscount(gamma));
        }
        if self.mdp.is_terminal(root_state) {
            return Err(MCTSError::NoLegalActions);
        }
        if !self.config.keep_tree {
            self.tree.clear();
        }
        if !self.tree.contains(root_state) {
            self.insert_leaf(root_state)?;
        }

        self.statistics = SearchStatistics::new();
        let start = Instant::now();
        debug!(
            "dpw plan start: n_iterations={} depth={} enable_action_pw={}",
            self.config.n_iterations, self.config.depth, self.config.enable_action_pw
        );

        for i in 0..self.config.n_iterations {
            if let Some(max_time) = self.config.max_time {
                if start.elapsed() >= max_time {
                    self.statistics.stopped_early = true;
                    warn!("dpw plan stopped early after {} iterations", i);
                    break;
                }
            }
            self.simulate(root_state, self.config.depth, 0)?;
            self.statistics.iterations = i + 1;
        }

        self.statistics.total_time = start.elapsed();
        self.statistics.tree_size = self.tree.len();
        debug!(
            "dpw plan done: {}",
            self.statistics.summary().replace('\n', " | ")
        );

        let idx = self
            .tree
            .index_of(root_state)
            .expect("root must be in the tree after at least one simulation");
        let node = self.tree.get(idx);
        if node.a_children.is_empty() {
            error!("root state has no widened actions");
            return Err(MCTSError::NoLegalActions);
        }

        let mut best_idx = 0;
        let mut best_q = f64::NEG_INFINITY;
        for (i, (_, child)) in node.a_children.iter().enumerate() {
            if child.q > best_q {
                best_q = child.q;
                best_idx = i;
            }
        }
        Ok(node.a_children[best_idx].0.clone())
    }

    fn simulate(&mut self, state: &M::State, remaining: u32, level: usize) -> Result<f64> {
        self.statistics.max_depth = self.statistics.max_depth.max(level);

        if remaining == 0 || self.mdp.is_terminal(state) {
            return Ok(0.0);
        }

        if !self.tree.contains(state) {
            self.insert_leaf(state)?;
            let value =
                self.config
                    .estimate_value
                    .estimate(&self.mdp, state, remaining, &mut self.rng)?;
            return Ok(value);
        }

        let idx = self.tree.index_of(state).unwrap();
        self.widen_actions(idx, state)?;

        let (action_idx, action) = {
            let node = self.tree.get(idx);
            let stats: Vec<(u64, f64)> = node
                .a_children
                .iter()
                .map(|(_, c)| (c.n, c.q))
                .collect();
            let selected = select_ucb(&stats, node.total_n, self.config.exploration_constant);
            (selected, node.a_children[selected].0.clone())
        };

        let (next_state, reward) = self.widen_or_reuse_successor(idx, action_idx, state, &action)?;

        let future = self.simulate(&next_state, remaining - 1, level + 1)?;
        let sample = reward + self.mdp.discount() * future;

        let node = self.tree.get_mut(idx);
        let child = &mut node.a_children[action_idx].1;
        let (new_n, new_q) = backup_edge(child.n, child.q, sample);
        child.n = new_n;
        child.q = new_q;
        node.total_n += 1;

        Ok(sample)
    }

    fn insert_leaf(&mut self, state: &M::State) -> Result<()> {
        let a_children = if self.config.enable_action_pw {
            Vec::new()
        } else {
            let actions = self.mdp.actions(state);
            if actions.is_empty() {
                return Err(MCTSError::NoLegalActions);
            }
            let mut a_children = Vec::with_capacity(actions.len());
            for a in actions {
                let n = self.config.init_n.dispatch(&self.mdp, state, &a)?;
                let q = self.config.init_q.dispatch(&self.mdp, state, &a)?;
                a_children.push((a.clone(), DPWStateActionNode::new(a, n, q)));
            }
            a_children
        };
        self.tree.insert(state.clone(), a_children);
        Ok(())
    }

    /// Action progressive widening at `state` (arena index `idx`): adds at
    /// most one new action child, only when the widening count allows it and
    /// the proposed action isn't already present. A no-op when action
    /// widening is disabled (the full set was enumerated at node creation).
    fn widen_actions(&mut self, idx: usize, state: &M::State) -> Result<()> {
        if !self.config.enable_action_pw {
            return Ok(());
        }

        let node = self.tree.get(idx);
        let allowed = widening_threshold(self.config.k_action, self.config.alpha_action, node.total_n);
        if (node.a_children.len() as u64) >= allowed {
            return Ok(());
        }

        let existing: Vec<M::Action> = node.a_children.iter().map(|(a, _)| a.clone()).collect();
        let seam = self
            .config
            .next_action
            .as_ref()
            .expect("validated at construction: enable_action_pw requires next_action");
        let proposed = seam.dispatch(&self.mdp, state, &existing, &mut self.rng)?;

        if node.find_action(&proposed).is_some() {
            return Ok(());
        }

        let n = self.config.init_n.dispatch(&self.mdp, state, &proposed)?;
        let q = self.config.init_q.dispatch(&self.mdp, state, &proposed)?;
        let node = self.tree.get_mut(idx);
        node.a_children
            .push((proposed.clone(), DPWStateActionNode::new(proposed, n, q)));
        Ok(())
    }

    /// State progressive widening at edge `(state, action)`: samples a fresh
    /// successor when the widening count allows it, otherwise reuses one of
    /// the previously observed successors uniformly at random (which, since
    /// the sequence records every sample, naturally reproduces the observed
    /// sampling frequency of each distinct state).
    fn widen_or_reuse_successor(
        &mut self,
        idx: usize,
        action_idx: usize,
        state: &M::State,
        action: &M::Action,
    ) -> Result<(M::State, f64)> {
        let allowed = {
            let node = self.tree.get(idx);
            let child = &node.a_children[action_idx].1;
            widening_threshold(self.config.k_state, self.config.alpha_state, child.n)
        };

        let observed = self.tree.get(idx).a_children[action_idx].1.n_a_children() as u64;

        if observed < allowed {
            let (next_state, reward) = self.mdp.generate_sr(state, action, &mut self.rng);
            if !reward.is_finite() {
                return Err(MCTSError::NonFiniteReward(reward));
            }
            let node = self.tree.get_mut(idx);
            node.a_children[action_idx]
                .1
                .record_transition(next_state.clone(), reward);
            Ok((next_state, reward))
        } else {
            let node = self.tree.get(idx);
            let child = &node.a_children[action_idx].1;
            let sample_idx = self.rng.gen_range(0..child.transitions.len());
            let transition = &child.transitions[sample_idx];
            Ok((transition.state.clone(), transition.reward))
        }
    }
}
