//! The vanilla search driver: finite, enumerable action spaces.

use std::time::Instant;

use log::{debug, error, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::mdp::MDP;
use crate::policy::backpropagation::backup_edge;
use crate::policy::selection::select_ucb;
use crate::stats::SearchStatistics;
use crate::vanilla::config::VanillaConfig;
use crate::vanilla::tree::{StateActionNode, VanillaTree};
use crate::{MCTSError, Result};

/// Monte Carlo Tree Search over a finite, enumerable action space.
///
/// One `VanillaSolver` owns one tree and one RNG. Calling [`action`] runs
/// `config.n_iterations` simulations rooted at the given state and returns
/// the arg-max child by accumulated `q`; the tree persists across calls when
/// `config.keep_tree` is set.
pub struct VanillaSolver<M: MDP> {
    mdp: M,
    config: VanillaConfig<M>,
    tree: VanillaTree<M::State, M::Action>,
    rng: StdRng,
    statistics: SearchStatistics,
}

impl<M: MDP> VanillaSolver<M> {
    pub fn new(mdp: M, config: VanillaConfig<M>) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        VanillaSolver {
            mdp,
            config,
            tree: VanillaTree::new(),
            rng,
            statistics: SearchStatistics::new(),
        }
    }

    /// The underlying model, for inspection.
    pub fn mdp(&self) -> &M {
        &self.mdp
    }

    /// The current tree, for inspection (per-state `(a, n, q)` children).
    pub fn tree(&self) -> &VanillaTree<M::State, M::Action> {
        &self.tree
    }

    /// Statistics from the most recent `action` call.
    pub fn statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Empties the tree. The next `action` call rebuilds it from scratch.
    pub fn clear_tree(&mut self) {
        self.tree.clear();
    }

    /// Returns a textual dump of the tree rooted at `root_state`, for
    /// ad-hoc debugging. Not a graphical visualization (see Non-goals).
    pub fn visualize_tree(&self, root_state: &M::State) -> String {
        let mut out = String::new();
        if let Some(idx) = self.tree.index_of(root_state) {
            let node = self.tree.get(idx);
            out.push_str(&format!("root (visits: {})\n", node.total_n));
            for child in &node.children {
                out.push_str(&format!(
                    "  {:?} (n: {}, q: {:.3})\n",
                    child.action, child.n, child.q
                ));
            }
        }
        out
    }

    /// Runs `config.n_iterations` simulations from `root_state` and returns
    /// the best action at the root.
    pub fn action(&mut self, root_state: &M::State) -> Result<M::Action> {
        self.config.validate()?;
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
            "vanilla plan start: n_iterations={} depth={}",
            self.config.n_iterations, self.config.depth
        );

        for i in 0..self.config.n_iterations {
            if let Some(max_time) = self.config.max_time {
                if start.elapsed() >= max_time {
                    self.statistics.stopped_early = true;
                    warn!("vanilla plan stopped early after {} iterations", i);
                    break;
                }
            }
            self.simulate(root_state, self.config.depth, 0)?;
            self.statistics.iterations = i + 1;
        }

        self.statistics.total_time = start.elapsed();
        self.statistics.tree_size = self.tree.len();
        debug!(
            "vanilla plan done: {}",
            self.statistics.summary().replace('\n', " | ")
        );

        let idx = self
            .tree
            .index_of(root_state)
            .expect("root must be in the tree after at least one simulation");
        let node = self.tree.get(idx);
        if node.children.is_empty() {
            error!("root state has no legal actions");
            return Err(MCTSError::NoLegalActions);
        }

        let mut best_idx = 0;
        let mut best_q = f64::NEG_INFINITY;
        for (i, child) in node.children.iter().enumerate() {
            if child.q > best_q {
                best_q = child.q;
                best_idx = i;
            }
        }
        Ok(node.children[best_idx].action.clone())
    }

    /// One simulation trajectory, per §4.1. `level` is the recursion depth
    /// from the root, tracked purely for [`SearchStatistics::max_depth`].
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
        let (action_idx, action) = {
            let node = self.tree.get(idx);
            let stats: Vec<(u64, f64)> = node.children.iter().map(|c| (c.n, c.q)).collect();
            let selected = select_ucb(&stats, node.total_n, self.config.exploration_constant);
            (selected, node.children[selected].action.clone())
        };

        let (next_state, reward) = self.mdp.generate_sr(state, &action, &mut self.rng);
        if !reward.is_finite() {
            return Err(MCTSError::NonFiniteReward(reward));
        }

        let future = self.simulate(&next_state, remaining - 1, level + 1)?;
        let sample = reward + self.mdp.discount() * future;

        let node = self.tree.get_mut(idx);
        let child = &mut node.children[action_idx];
        let (new_n, new_q) = backup_edge(child.n, child.q, sample);
        child.n = new_n;
        child.q = new_q;
        node.total_n += 1;

        Ok(sample)
    }

    fn insert_leaf(&mut self, state: &M::State) -> Result<()> {
        let actions = self.mdp.actions(state);
        if actions.is_empty() {
            return Err(MCTSError::NoLegalActions);
        }
        let mut children = Vec::with_capacity(actions.len());
        for a in actions {
            let n = self.config.init_n.dispatch(&self.mdp, state, &a)?;
            let q = self.config.init_q.dispatch(&self.mdp, state, &a)?;
            children.push(StateActionNode { action: a, n, q });
        }
        self.tree.insert(state.clone(), children);
        Ok(())
    }
}
