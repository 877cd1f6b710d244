//! End-to-end IRD loop example.
//!
//! Demonstrates: generate a connected instance → plan under the true
//! reward → re-plan under proxy rewards → roll out the proxy-optimal
//! policy and score it under the true reward.
//!
//! Run with `RUST_LOG=debug` to see planner and generator events.

use ird_bench::{connected_instance, reference_profile, sampled_params};
use ird_core::State;
use ird_mdp::{Environment, Mdp};
use ird_planner::{evaluate_policy_exact, PlannerConfig, ValueIteration};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = reference_profile().with_pr_reward(0.6);
    let mdp = connected_instance(&config, 42).unwrap();
    println!("=== IRD Gridworld Example ===\n{mdp}\n");

    let planner = ValueIteration::new(PlannerConfig::default()).unwrap();
    let truth = mdp.default_params().clone();
    let optimal = planner.solve(&mdp, &truth).unwrap();
    let start = mdp.start_state();
    println!(
        "true reward: V(start) = {:.4} after {} sweeps",
        optimal.value(start).unwrap_or(0.0),
        optimal.iterations()
    );

    for (i, proxy) in sampled_params(&mdp, 5, 7).iter().enumerate() {
        let policy = planner.solve(&mdp, proxy).unwrap().policy();
        let under_truth =
            evaluate_policy_exact(&mdp, &truth, |s| policy.get(&s).copied(), 0.95).unwrap();

        let mut env = Environment::new(&mdp, i as u64);
        let trajectory = env.rollout(|s| policy.get(&s).copied(), 200).unwrap();
        let true_return: f64 = trajectory
            .iter()
            .map(|t| mdp.reward(&truth, t.state, t.action).unwrap_or(0.0))
            .sum();
        let exited = trajectory.last().map(|t| t.next_state) == Some(State::Terminal);

        tracing::info!(proxy = i, steps = trajectory.len(), exited, "rollout");
        println!(
            "proxy {i}: expected true value {:.4}, sampled return {:.4} in {} steps",
            under_truth.get(&start).copied().unwrap_or(0.0),
            true_return,
            trajectory.len()
        );
    }
}
