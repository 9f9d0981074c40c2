//! Integration test: a hand-written engine plugged in through the facade.
//!
//! The engine tracks a 1-D position moved by a continuous action; its
//! observation is a plain struct distilled by a closure.

use ndarray::{arr1, ArrayD, IxDyn};
use tessera::prelude::*;

#[derive(Clone)]
struct Position {
    x: f64,
    goal: f64,
}

struct Slider {
    pos: Position,
    ticks: u64,
}

impl Engine for Slider {
    type Observation = Position;

    fn begin(&mut self) -> Result<EngineStep<Position>, EngineError> {
        Ok(EngineStep::new(self.pos.clone(), None, 1.0))
    }

    fn advance(&mut self, action: &EngineAction) -> Result<EngineStep<Position>, EngineError> {
        let EngineAction::Scalar(delta) = action else {
            return Err(EngineError::from("slider takes one value"));
        };
        self.pos.x += delta.as_f64();
        self.ticks += 1;
        let reward = self.terminated().then_some(Reward::Float(10.0));
        Ok(EngineStep::new(self.pos.clone(), reward, 0.99))
    }

    fn terminated(&self) -> bool {
        self.pos.x >= self.pos.goal
    }

    fn elapsed_ticks(&self) -> u64 {
        self.ticks
    }
}

struct SliderFactory;

impl GameFactory for SliderFactory {
    type Engine = Slider;
    type Layout = f64;

    fn create(&mut self, goal: Option<&f64>) -> Result<Slider, EngineError> {
        Ok(Slider {
            pos: Position {
                x: 0.0,
                goal: goal.copied().unwrap_or(1.0),
            },
            ticks: 0,
        })
    }
}

fn distill(pos: &Position) -> Distilled {
    let mut out = Observations::new();
    out.insert("x".into(), ObsArray::F64(arr1(&[pos.x]).into_dyn()));
    out.insert(
        "goal".into(),
        ObsArray::F32(ArrayD::from_elem(IxDyn(&[1]), pos.goal as f32)),
    );
    Distilled::Named(out)
}

fn slider_env() -> Environment<SliderFactory> {
    let config = EnvConfig::default()
        .with_continuous((-0.5, 0.5))
        .with_max_iterations(10);
    Environment::new(SliderFactory, distill, config).unwrap()
}

#[test]
fn spec_reflects_named_distiller() {
    let env = slider_env();
    let spec = env.observation_spec();
    assert_eq!(spec.keys().collect::<Vec<_>>(), vec!["x", "goal"]);
    assert_eq!(spec["x"].dtype, DType::F64);
    assert_eq!(spec["goal"].dtype, DType::F32);

    let continuous = env.action_spec().continuous().unwrap();
    assert_eq!(continuous.minimum, vec![-0.5]);
    assert_eq!(continuous.maximum, vec![0.5]);
    assert!(env.action_spec().discrete().is_none());
}

#[test]
fn slider_reaches_goal() {
    let mut env = slider_env();
    let mut ts = env.reset(Some(&1.0)).unwrap();
    let mut total = 0.0;
    while !ts.last() {
        ts = env.step(0.25).unwrap();
        total += ts.reward.as_ref().and_then(Reward::as_scalar).unwrap_or(0.0);
    }
    assert_eq!(env.episode_ticks(), Some(4));
    assert_eq!(total, 10.0);
    assert_eq!(ts.observation["x"].to_f64_vec(), vec![1.0]);
}

#[test]
fn iteration_cap_applies_to_custom_engines() {
    let mut env = slider_env();
    env.reset(Some(&100.0)).unwrap();
    let mut steps = 0;
    loop {
        steps += 1;
        if env.step(0.0).unwrap().last() {
            break;
        }
    }
    assert_eq!(steps, 10);
}
