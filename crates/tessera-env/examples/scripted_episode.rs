//! Runs a few episodes of the mock walking game with a fixed action cycle,
//! logging the adapter's lifecycle events.
//!
//! ```text
//! cargo run -p tessera-env --example scripted_episode
//! ```

use tessera_core::Scalar;
use tessera_env::{EnvConfig, Environment};
use tessera_test_utils::{named_distiller, MockFactory, MockGame};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let game = MockGame::default().terminating_after(6);
    let config = EnvConfig::default()
        .with_discrete(vec![(0, 3), (0, 1)])
        .with_continuous((-1.0, 1.0))
        .with_max_iterations(20);
    let mut env = Environment::new(MockFactory::new(game), named_distiller(), config)?;

    println!("action spec: {:?}", env.action_spec());
    for (key, spec) in env.observation_spec() {
        println!("observation {key}: {:?} {}", spec.shape.as_slice(), spec.dtype);
    }

    let mut ts = env.reset(None)?;
    println!("reset: {}", ts.step_type);
    let mut episode_return = 0.0;
    let mut episodes = 0;
    for i in 0..20i64 {
        let action = vec![
            Scalar::Int(i % 4),
            Scalar::Int(i % 2),
            Scalar::Float((i as f64 * 0.3).sin()),
        ];
        ts = env.step(action)?;
        if ts.mid() || ts.last() {
            episode_return += ts.reward.as_ref().and_then(|r| r.as_scalar()).unwrap_or(0.0);
        }
        if ts.last() {
            episodes += 1;
            println!("episode {episodes} return {episode_return}");
            episode_return = 0.0;
        }
    }
    println!("final state: {}", ts.step_type);
    Ok(())
}
