//! Integration test: construction, action specs, and the observation probe.

use proptest::prelude::*;
use tessera_core::{DType, Reward, RewardKind, StepType};
use tessera_env::{ActionBounds, ConfigError, EnvConfig, EnvError, Environment};
use tessera_test_utils::{named_distiller, raw_board_distiller, MockFactory, MockGame};

// ── Configuration errors ────────────────────────────────────────

#[test]
fn no_actions_is_rejected_before_any_engine_is_built() {
    let factory = MockFactory::default();
    let probe = factory.probe();
    let err = Environment::new(factory, raw_board_distiller(), EnvConfig::default()).unwrap_err();
    assert!(matches!(err, EnvError::Config(ConfigError::NoActions)));
    assert_eq!(probe.created(), 0);
}

#[test]
fn empty_per_slot_bounds_count_as_absent() {
    let config = EnvConfig::default()
        .with_discrete(ActionBounds::PerSlot(Vec::new()))
        .with_continuous(ActionBounds::PerSlot(Vec::new()));
    let err = Environment::new(MockFactory::default(), raw_board_distiller(), config).unwrap_err();
    assert!(matches!(err, EnvError::Config(ConfigError::NoActions)));
}

#[test]
fn inverted_bounds_are_rejected() {
    let config = EnvConfig::default().with_continuous((1.0, -1.0));
    let err = Environment::new(MockFactory::default(), raw_board_distiller(), config).unwrap_err();
    assert!(matches!(
        err,
        EnvError::Config(ConfigError::InvalidBounds { .. })
    ));
}

// ── The construction probe ──────────────────────────────────────

#[test]
fn probe_episode_is_discarded() {
    let factory = MockFactory::default();
    let probe = factory.probe();
    let env = Environment::new(
        factory,
        raw_board_distiller(),
        EnvConfig::default().with_discrete((0, 3)),
    )
    .unwrap();

    assert_eq!(probe.created(), 1);
    assert_eq!(probe.begun(), 1);
    assert_eq!(probe.live(), 0);
    assert!(probe.actions().is_empty());
    assert_eq!(env.state(), None);
    assert!(!env.is_running());
    assert_eq!(env.last_observations(), None);
}

#[test]
fn bare_array_spec_is_keyed_board() {
    let env = Environment::new(
        MockFactory::default(),
        raw_board_distiller(),
        EnvConfig::default().with_discrete((0, 3)),
    )
    .unwrap();
    let spec = env.observation_spec();
    assert_eq!(spec.len(), 1);
    let board = &spec["board"];
    assert_eq!(board.shape.as_slice(), &[3, 4]);
    assert_eq!(board.dtype, DType::U8);
    assert_eq!(board.name, "board");
}

#[test]
fn named_spec_keeps_distiller_keys() {
    let mut env = Environment::new(
        MockFactory::default(),
        named_distiller(),
        EnvConfig::default().with_discrete((0, 3)),
    )
    .unwrap();
    let spec = env.observation_spec().clone();
    assert_eq!(spec.keys().collect::<Vec<_>>(), vec!["chars", "agent"]);
    assert_eq!(spec["chars"].dtype, DType::U8);
    assert_eq!(spec["agent"].shape.as_slice(), &[1, 3, 4]);
    assert_eq!(spec["agent"].dtype, DType::F32);

    let ts = env.reset(None).unwrap();
    assert!(!ts.observation.contains_key("board"));
    let agent = ts.observation["agent"].to_f64_vec();
    assert_eq!(agent[0], 1.0);
    assert_eq!(agent.iter().sum::<f64>(), 1.0);
}

#[test]
fn spec_is_stable_across_episodes() {
    let game = MockGame::default().terminating_after(3);
    let mut env = Environment::new(
        MockFactory::new(game),
        named_distiller(),
        EnvConfig::default().with_discrete((0, 3)),
    )
    .unwrap();
    let spec = env.observation_spec().clone();

    let mut episodes = 0;
    let mut ts = env.reset(None).unwrap();
    while episodes < 3 {
        for (key, array) in &ts.observation {
            spec[key].validate(array).unwrap();
        }
        if ts.step_type == StepType::Last {
            episodes += 1;
        }
        ts = env.step(1).unwrap();
    }
    assert_eq!(env.observation_spec(), &spec);
}

// ── Reward compatibility ────────────────────────────────────────

#[test]
fn incompatible_first_reward_is_a_type_mismatch() {
    let factory =
        MockFactory::new(MockGame::default().with_first_reward(Reward::Vector(vec![1.0, 2.0])));
    let probe = factory.probe();
    let config = EnvConfig::default()
        .with_discrete((0, 3))
        .with_default_reward(Reward::Vector(vec![0.0; 3]));

    let err = Environment::new(factory, raw_board_distiller(), config).unwrap_err();
    assert!(matches!(
        err,
        EnvError::TypeMismatch {
            probe: RewardKind::Vector { len: 2 },
            default: RewardKind::Vector { len: 3 },
        }
    ));
    assert_eq!(probe.live(), 0);
}

#[test]
fn numeric_first_rewards_are_compatible() {
    for (first, default) in [
        (Reward::Int(1), Reward::Float(0.0)),
        (Reward::Float(1.5), Reward::Int(0)),
        (Reward::Vector(vec![1.0, 2.0]), Reward::Float(0.0)),
    ] {
        let factory = MockFactory::new(MockGame::default().with_first_reward(first));
        let config = EnvConfig::default()
            .with_discrete((0, 3))
            .with_default_reward(default);
        assert!(Environment::new(factory, raw_board_distiller(), config).is_ok());
    }
}

// ── Engine failures during the probe ────────────────────────────

#[test]
fn factory_failure_fails_construction() {
    let factory = MockFactory::default().failing_from(0);
    let err = Environment::new(
        factory,
        raw_board_distiller(),
        EnvConfig::default().with_discrete((0, 3)),
    )
    .unwrap_err();
    assert!(matches!(err, EnvError::Engine(_)));
    assert!(err.to_string().contains("factory refused"));
}

#[test]
fn begin_failure_fails_construction_and_releases_engine() {
    let factory = MockFactory::new(MockGame::default().failing_begin_from(0));
    let calls = factory.probe();
    let err = Environment::new(
        factory,
        raw_board_distiller(),
        EnvConfig::default().with_discrete((0, 3)),
    )
    .unwrap_err();

    let EnvError::Engine(inner) = &err else {
        panic!("expected engine error, got {err:?}");
    };
    assert_eq!(inner.inner().to_string(), "engine 0 failed to start");
    assert_eq!(calls.created(), 1);
    assert_eq!(calls.live(), 0);
}

// ── Action spec properties ──────────────────────────────────────

proptest! {
    #[test]
    fn arity_matches_configured_slots(
        discrete in 0usize..4,
        continuous in 0usize..4,
    ) {
        prop_assume!(discrete + continuous > 0);
        let config = EnvConfig::default()
            .with_discrete(vec![(0, 5); discrete])
            .with_continuous(vec![(-1.0, 1.0); continuous]);
        let env = Environment::new(MockFactory::default(), raw_board_distiller(), config).unwrap();

        prop_assert_eq!(env.action_arity(), discrete + continuous);
        prop_assert_eq!(env.action_spec().arity(), discrete + continuous);
        prop_assert_eq!(env.action_spec().discrete().is_some(), discrete > 0);
        prop_assert_eq!(env.action_spec().continuous().is_some(), continuous > 0);
    }
}
