//! Builder and validation tests for `VanillaConfig` and `DPWConfig`.

use mdp_mcts::dpw::DPWConfig;
use mdp_mcts::mdp::MDP;
use mdp_mcts::seam::{ActionSeam, NSeam, QSeam};
use mdp_mcts::vanilla::VanillaConfig;
use mdp_mcts::MCTSError;
use rand::rngs::StdRng;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct S;
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct A;

struct Trivial;
impl MDP for Trivial {
    type State = S;
    type Action = A;
    fn actions(&self, _s: &S) -> Vec<A> {
        vec![A]
    }
    fn generate_sr(&self, _s: &S, _a: &A, _rng: &mut StdRng) -> (S, f64) {
        (S, 1.0)
    }
    fn discount(&self) -> f64 {
        0.9
    }
    fn is_terminal(&self, _s: &S) -> bool {
        false
    }
}

#[test]
fn vanilla_default_is_valid() {
    let config: VanillaConfig<Trivial> = VanillaConfig::default();
    assert!(config.validate().is_ok());
}

#[test]
fn vanilla_rejects_zero_iterations() {
    let config: VanillaConfig<Trivial> = VanillaConfig::default().with_n_iterations(0);
    assert!(matches!(
        config.validate(),
        Err(MCTSError::InvalidConfiguration(_))
    ));
}

#[test]
fn vanilla_rejects_zero_depth() {
    let config: VanillaConfig<Trivial> = VanillaConfig::default().with_depth(0);
    assert!(matches!(
        config.validate(),
        Err(MCTSError::InvalidConfiguration(_))
    ));
}

#[test]
fn vanilla_rejects_negative_exploration_constant() {
    let config: VanillaConfig<Trivial> = VanillaConfig::default().with_exploration_constant(-1.0);
    assert!(matches!(
        config.validate(),
        Err(MCTSError::InvalidConfiguration(_))
    ));
}

#[test]
fn vanilla_builder_methods_set_fields() {
    let config: VanillaConfig<Trivial> = VanillaConfig::default()
        .with_n_iterations(50)
        .with_depth(3)
        .with_seed(7)
        .with_max_time(Duration::from_millis(10))
        .with_keep_tree(false);
    assert_eq!(config.n_iterations, 50);
    assert_eq!(config.depth, 3);
    assert_eq!(config.seed, 7);
    assert_eq!(config.max_time, Some(Duration::from_millis(10)));
    assert!(!config.keep_tree);
}

#[test]
fn dpw_default_requires_next_action_because_action_pw_is_on_by_default() {
    let config: DPWConfig<Trivial> = DPWConfig::default();
    assert!(matches!(
        config.validate(),
        Err(MCTSError::MissingNextActionSeam)
    ));
}

#[test]
fn dpw_with_next_action_and_defaults_is_valid() {
    let config: DPWConfig<Trivial> = DPWConfig::default().with_next_action(ActionSeam::Function(
        Box::new(|_mdp: &Trivial, _s: &S, _existing: &[A], _rng: &mut StdRng| A),
    ));
    assert!(config.validate().is_ok());
}

#[test]
fn dpw_disabling_action_pw_does_not_require_next_action() {
    let config: DPWConfig<Trivial> = DPWConfig::default().with_enable_action_pw(false);
    assert!(config.validate().is_ok());
}

#[test]
fn dpw_rejects_non_positive_widening_parameters() {
    let config: DPWConfig<Trivial> = DPWConfig::default()
        .with_enable_action_pw(false)
        .with_action_widening(0.0, 0.5);
    assert!(matches!(
        config.validate(),
        Err(MCTSError::InvalidConfiguration(_))
    ));
}

#[test]
fn dpw_builder_sets_widening_fields() {
    let config: DPWConfig<Trivial> = DPWConfig::default()
        .with_action_widening(3.0, 0.25)
        .with_state_widening(4.0, 0.75);
    assert_eq!(config.k_action, 3.0);
    assert_eq!(config.alpha_action, 0.25);
    assert_eq!(config.k_state, 4.0);
    assert_eq!(config.alpha_state, 0.75);
}

