//! Integration tests for the double progressive widening solver.

use mdp_mcts::dpw::{DPWConfig, DPWSolver};
use mdp_mcts::mdp::MDP;
use mdp_mcts::policy::estimation::ValueEstimator;
use mdp_mcts::seam::{ActionSeam, EstimateValue, InitN, InitQ, NSeam, NextAction, QSeam, ValueSeam};
use mdp_mcts::MCTSError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// A line world with a large, effectively unbounded action space (any
/// positive or negative step size), standing in for a continuous action
/// domain that cannot be enumerated up front.
const GOAL: i32 = 6;
const STEPS: [i32; 5] = [-2, -1, 1, 2, 3];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct Line(i32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct Step(i32);

struct LineWorld;

impl MDP for LineWorld {
    type State = Line;
    type Action = Step;

    fn actions(&self, _s: &Line) -> Vec<Step> {
        STEPS.iter().copied().map(Step).collect()
    }

    fn generate_sr(&self, s: &Line, a: &Step, _rng: &mut StdRng) -> (Line, f64) {
        let next = Line((s.0 + a.0).max(0));
        let reward = if next.0 >= GOAL { 10.0 } else { -1.0 };
        (next, reward)
    }

    fn discount(&self) -> f64 {
        0.9
    }

    fn is_terminal(&self, s: &Line) -> bool {
        s.0 >= GOAL
    }
}

fn propose_step(_mdp: &LineWorld, _s: &Line, existing: &[Step], rng: &mut StdRng) -> Step {
    for &v in &STEPS {
        if !existing.contains(&Step(v)) {
            return Step(v);
        }
    }
    Step(*STEPS.choose(rng).unwrap())
}

fn config(n_iterations: usize, seed: u64) -> DPWConfig<LineWorld> {
    DPWConfig::default()
        .with_n_iterations(n_iterations)
        .with_depth(6)
        .with_exploration_constant(1.414)
        .with_init_n(NSeam::Constant(0))
        .with_init_q(QSeam::Constant(0.0))
        .with_action_widening(2.0, 0.5)
        .with_state_widening(2.0, 0.5)
        .with_enable_action_pw(true)
        .with_next_action(ActionSeam::Function(Box::new(propose_step)))
        .with_seed(seed)
}

#[test]
fn constructing_with_action_widening_but_no_next_action_fails() {
    let config: DPWConfig<LineWorld> = DPWConfig::default().with_enable_action_pw(true);
    let err = DPWSolver::new(LineWorld, config).unwrap_err();
    assert!(matches!(err, MCTSError::MissingNextActionSeam));
}

#[test]
fn disabling_action_widening_does_not_require_next_action() {
    let config: DPWConfig<LineWorld> = DPWConfig::default()
        .with_enable_action_pw(false)
        .with_n_iterations(10);
    assert!(DPWSolver::new(LineWorld, config).is_ok());
}

#[test]
fn action_child_count_never_exceeds_the_widening_bound() {
    let mut s = DPWSolver::new(LineWorld, config(200, 11)).unwrap();
    s.action(&Line(0)).unwrap();
    let idx = s.tree().index_of(&Line(0)).unwrap();
    let node = s.tree().get(idx);
    let allowed = (2.0_f64 * (node.total_n.max(1) as f64).powf(0.5)).ceil() as u64;
    assert!((node.a_children.len() as u64) <= allowed);
}

#[test]
fn same_seed_reproduces_the_same_action() {
    let mut a = DPWSolver::new(LineWorld, config(300, 5)).unwrap();
    let mut b = DPWSolver::new(LineWorld, config(300, 5)).unwrap();
    assert_eq!(a.action(&Line(0)).unwrap(), b.action(&Line(0)).unwrap());
}

#[test]
fn state_widening_bounds_distinct_observed_successors() {
    let mut s = DPWSolver::new(LineWorld, config(400, 2)).unwrap();
    s.action(&Line(0)).unwrap();
    let idx = s.tree().index_of(&Line(0)).unwrap();
    let node = s.tree().get(idx);
    for (_, child) in &node.a_children {
        let allowed = (2.0_f64 * (child.n.max(1) as f64).powf(0.5)).ceil() as u64;
        assert!(child.n_a_children() as u64 <= allowed);
    }
}

#[test]
fn terminal_root_has_no_legal_actions() {
    let mut s = DPWSolver::new(LineWorld, config(50, 1)).unwrap();
    let err = s.action(&Line(GOAL)).unwrap_err();
    assert!(matches!(err, MCTSError::NoLegalActions));
}

#[test]
fn invariants_hold_across_the_whole_tree_after_a_real_plan() {
    let mut s = DPWSolver::new(LineWorld, config(300, 11)).unwrap();
    s.action(&Line(0)).unwrap();
    for idx in 0..s.tree().len() {
        let node = s.tree().get(idx);
        assert!(node.total_n_matches_children());
        for (_, child) in &node.a_children {
            assert!(child.n_matches_transition_counts());
        }
    }
}

/// A grid used by scenarios S3/S4: actions step on one axis; nothing is
/// terminal, so every trajectory runs out on the depth cutoff instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct GridPos(i32, i32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Dir {
    Up,
    Down,
    Left,
    Right,
}

const ALL_DIRS: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

struct ScenarioGrid;

impl MDP for ScenarioGrid {
    type State = GridPos;
    type Action = Dir;

    fn actions(&self, _s: &GridPos) -> Vec<Dir> {
        ALL_DIRS.to_vec()
    }

    fn generate_sr(&self, s: &GridPos, a: &Dir, _rng: &mut StdRng) -> (GridPos, f64) {
        let next = match a {
            Dir::Up => GridPos(s.0, s.1 + 1),
            Dir::Down => GridPos(s.0, s.1 - 1),
            Dir::Left => GridPos(s.0 - 1, s.1),
            Dir::Right => GridPos(s.0 + 1, s.1),
        };
        (next, 0.0)
    }

    fn discount(&self) -> f64 {
        0.9
    }

    fn is_terminal(&self, _s: &GridPos) -> bool {
        false
    }
}

/// `init_Q` returns `11.73` iff `s = (1, 2)`, else `0.0` — matches S3/S4 verbatim.
fn scenario_init_q(_mdp: &ScenarioGrid, s: &GridPos, _a: &Dir) -> f64 {
    if *s == GridPos(1, 2) {
        11.73
    } else {
        0.0
    }
}

/// Proposes `Up` when it's absent, otherwise a uniform random action.
fn scenario_next_action(
    _mdp: &ScenarioGrid,
    _s: &GridPos,
    existing: &[Dir],
    rng: &mut StdRng,
) -> Dir {
    if !existing.contains(&Dir::Up) {
        Dir::Up
    } else {
        *ALL_DIRS.choose(rng).unwrap()
    }
}

fn scenario_config(seed: u64) -> DPWConfig<ScenarioGrid> {
    DPWConfig::default()
        .with_n_iterations(8)
        .with_depth(4)
        .with_init_n(NSeam::Constant(0))
        .with_init_q(QSeam::Function(Box::new(scenario_init_q)))
        .with_action_widening(5.0, 0.5)
        .with_state_widening(5.0, 0.5)
        .with_enable_action_pw(true)
        .with_next_action(ActionSeam::Function(Box::new(scenario_next_action)))
        .with_seed(seed)
}

/// S3 (DPW, functional seams): after the call, `:up`'s child of `(1,1)`
/// exists and has been visited at least once.
#[test]
fn scenario_s3_dpw_functional_seams() {
    let mut solver = DPWSolver::new(ScenarioGrid, scenario_config(3)).unwrap();
    solver.action(&GridPos(1, 1)).unwrap();

    let idx = solver.tree().index_of(&GridPos(1, 1)).unwrap();
    let node = solver.tree().get(idx);
    let up = node.a_children.iter().find(|(a, _)| *a == Dir::Up);
    assert!(up.is_some(), "widening must have created the :up child");
    assert!(up.unwrap().1.n >= 1, "the :up child must have been selected at least once");
}

/// A single opaque object routing all four seams through one type, as S4
/// requires. Delegates to the exact same logic as the S3 function forms so
/// the two trees are directly comparable.
struct ScenarioObjectSeams;

impl InitN<ScenarioGrid> for ScenarioObjectSeams {
    fn init_n(
        &self,
        _mdp: &ScenarioGrid,
        _s: &GridPos,
        _a: &Dir,
    ) -> std::result::Result<u64, String> {
        Ok(0)
    }
}

impl InitQ<ScenarioGrid> for ScenarioObjectSeams {
    fn init_q(
        &self,
        mdp: &ScenarioGrid,
        s: &GridPos,
        a: &Dir,
    ) -> std::result::Result<f64, String> {
        Ok(scenario_init_q(mdp, s, a))
    }
}

impl EstimateValue<ScenarioGrid> for ScenarioObjectSeams {
    fn estimate_value(
        &self,
        _mdp: &ScenarioGrid,
        _s: &GridPos,
        _depth: u32,
        _rng: &mut StdRng,
    ) -> std::result::Result<f64, String> {
        Ok(0.0)
    }
}

impl NextAction<ScenarioGrid> for ScenarioObjectSeams {
    fn next_action(
        &self,
        mdp: &ScenarioGrid,
        s: &GridPos,
        existing: &[Dir],
        rng: &mut StdRng,
    ) -> std::result::Result<Dir, String> {
        Ok(scenario_next_action(mdp, s, existing, rng))
    }
}

fn scenario_object_config(seed: u64) -> DPWConfig<ScenarioGrid> {
    DPWConfig::default()
        .with_n_iterations(8)
        .with_depth(4)
        .with_init_n(NSeam::Object(Box::new(ScenarioObjectSeams)))
        .with_init_q(QSeam::Object(Box::new(ScenarioObjectSeams)))
        .with_estimate_value(ValueEstimator::User(ValueSeam::Object(Box::new(
            ScenarioObjectSeams,
        ))))
        .with_action_widening(5.0, 0.5)
        .with_state_widening(5.0, 0.5)
        .with_enable_action_pw(true)
        .with_next_action(ActionSeam::Object(Box::new(ScenarioObjectSeams)))
        .with_seed(seed)
}

/// S4 (DPW, object seam): the same behavior as S3 but all four seams routed
/// through a single opaque object; tree identical to S3 given the same seed.
#[test]
fn scenario_s4_object_seams_match_s3_functional_seams() {
    let mut functional = DPWSolver::new(ScenarioGrid, scenario_config(3)).unwrap();
    let mut object = DPWSolver::new(ScenarioGrid, scenario_object_config(3)).unwrap();

    let f_action = functional.action(&GridPos(1, 1)).unwrap();
    let o_action = object.action(&GridPos(1, 1)).unwrap();
    assert_eq!(f_action, o_action);

    let f_idx = functional.tree().index_of(&GridPos(1, 1)).unwrap();
    let o_idx = object.tree().index_of(&GridPos(1, 1)).unwrap();
    let f_node = functional.tree().get(f_idx);
    let o_node = object.tree().get(o_idx);

    assert_eq!(f_node.total_n, o_node.total_n);
    assert_eq!(f_node.a_children.len(), o_node.a_children.len());
    for ((fa, fc), (oa, oc)) in f_node.a_children.iter().zip(o_node.a_children.iter()) {
        assert_eq!(fa, oa);
        assert_eq!(fc.n, oc.n);
        assert_eq!(fc.q, oc.q);
    }
}
