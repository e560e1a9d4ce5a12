//! The Double Progressive Widening MCTS variant: large or continuous state
//! and action spaces.

pub mod config;
pub mod solver;
pub mod tree;

pub use config::DPWConfig;
pub use solver::DPWSolver;
pub use tree::{DPWStateActionNode, DPWStateNode, DPWTree, Transition};
