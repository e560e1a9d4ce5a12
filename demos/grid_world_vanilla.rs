//! Vanilla MCTS planning a route through a small grid world.
//!
//! Run with `cargo run --example grid_world_vanilla`.

use mdp_mcts::mdp::MDP;
use mdp_mcts::policy::estimation::{RolloutActor, ValueEstimator};
use mdp_mcts::seam::{NSeam, QSeam};
use mdp_mcts::vanilla::{VanillaConfig, VanillaSolver};
use rand::rngs::StdRng;

const WIDTH: i32 = 10;
const HEIGHT: i32 = 10;
const GOAL: (i32, i32) = (9, 3);

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
        vec![Move::North, Move::South, Move::East, Move::West]
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

/// Moves one step closer to the goal along whichever axis is further away;
/// used as the vanilla solver's rollout policy.
fn greedy_toward_goal(_mdp: &GridWorld, s: &Pos, _rng: &mut StdRng) -> Move {
    let dx = GOAL.0 - s.0;
    let dy = GOAL.1 - s.1;
    if dx.abs() >= dy.abs() {
        if dx > 0 {
            Move::East
        } else {
            Move::West
        }
    } else if dy > 0 {
        Move::North
    } else {
        Move::South
    }
}

fn main() -> mdp_mcts::Result<()> {
    env_logger::init();

    let config = VanillaConfig::default()
        .with_n_iterations(5)
        .with_depth(20)
        .with_init_n(NSeam::Constant(0))
        .with_init_q(QSeam::Constant(0.0))
        .with_estimate_value(ValueEstimator::Rollout(RolloutActor::Function(Box::new(
            greedy_toward_goal,
        ))))
        .with_seed(42);

    let mut solver = VanillaSolver::new(GridWorld, config);
    let root = Pos(5, 1);
    let best = solver.action(&root)?;

    println!("best action from {root:?}: {best:?}");
    println!("{}", solver.statistics().summary());
    println!("{}", solver.visualize_tree(&root));

    Ok(())
}
