//! DPW MCTS planning a route through the same grid world, widening actions
//! and successor states incrementally instead of enumerating the full
//! (here, small, but standing in for a large/continuous) action set.
//!
//! Run with `cargo run --example grid_world_dpw`.

use mdp_mcts::dpw::{DPWConfig, DPWSolver};
use mdp_mcts::mdp::MDP;
use mdp_mcts::seam::{ActionSeam, NSeam, QSeam};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

const WIDTH: i32 = 10;
const HEIGHT: i32 = 10;
const GOAL: (i32, i32) = (9, 3);
const MOVES: [Move; 4] = [Move::North, Move::South, Move::East, Move::West];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct Pos(i32, i32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Move {
    North,
    South,
    East,
    West,
}

impl Move {
    fn apply(self, p: Pos) -> Pos {
        let Pos(x, y) = p;
        let (nx, ny) = match self {
            Move::North => (x, y + 1),
            Move::South => (x, y - 1),
            Move::East => (x + 1, y),
            Move::West => (x - 1, y),
        };
        Pos(nx.clamp(0, WIDTH - 1), ny.clamp(0, HEIGHT - 1))
    }
}

struct GridWorld;

impl MDP for GridWorld {
    type State = Pos;
    type Action = Move;

    fn actions(&self, _s: &Pos) -> Vec<Move> {
        MOVES.to_vec()
    }

    fn generate_sr(&self, s: &Pos, a: &Move, _rng: &mut StdRng) -> (Pos, f64) {
        let next = a.apply(*s);
        let reward = if (next.0, next.1) == GOAL { 10.0 } else { -1.0 };
        (next, reward)
    }

    fn discount(&self) -> f64 {
        0.95
    }

    fn is_terminal(&self, s: &Pos) -> bool {
        (s.0, s.1) == GOAL
    }
}

/// Proposes the first move not yet tried at this node, falling back to a
/// uniform random move once every direction has been added.
fn propose_move(_mdp: &GridWorld, _s: &Pos, existing: &[Move], rng: &mut StdRng) -> Move {
    for &m in &MOVES {
        if !existing.contains(&m) {
            return m;
        }
    }
    *MOVES.choose(rng).unwrap()
}

fn main() -> mdp_mcts::Result<()> {
    env_logger::init();

    let config: DPWConfig<GridWorld> = DPWConfig::default()
        .with_n_iterations(8)
        .with_depth(4)
        .with_init_n(NSeam::Constant(0))
        .with_init_q(QSeam::Constant(0.0))
        .with_action_widening(2.0, 0.5)
        .with_state_widening(2.0, 0.5)
        .with_enable_action_pw(true)
        .with_next_action(ActionSeam::Function(Box::new(propose_move)))
        .with_seed(7);

    let mut solver = DPWSolver::new(GridWorld, config)?;
    let root = Pos(1, 1);
    let best = solver.action(&root)?;

    println!("best action from {root:?}: {best:?}");
    println!("{}", solver.statistics().summary());
    println!("{}", solver.visualize_tree(&root));

    Ok(())
}
