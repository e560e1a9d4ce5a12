//! The vanilla MCTS variant: finite, enumerable action spaces.

pub mod config;
pub mod solver;
pub mod tree;

pub use config::VanillaConfig;
pub use solver::VanillaSolver;
pub use tree::{StateActionNode, StateNode, VanillaTree};
