//! Benchmark profiles and utilities for the IRD gridworld stack.
//!
//! Provides pre-built generator profiles for benchmarks and examples:
//!
//! - [`reference_profile`]: 16x16 grid (196 interior cells), noise 0.2
//! - [`stress_profile`]: 48x48 grid (~2K interior cells), noise 0.2
//! - [`connected_instance`]: a seeded connected instance of a profile
//! - [`sampled_params`]: seeded proxy-reward hypotheses for an instance

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use ird_gen::{generate_random_connected, random_reward, GenError, GeneratorConfig};
use ird_mdp::{GridworldMdp, Mdp, MdpConfig, RewardParams};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Reference profile: 16x16 grid, noisy moves, frequent extra rewards.
pub fn reference_profile() -> GeneratorConfig {
    GeneratorConfig::new(16, 16)
        .with_pr_reward(0.8)
        .with_mdp(MdpConfig {
            living_reward: -0.01,
            noise: 0.2,
        })
}

/// Stress profile: 48x48 grid with the same dynamics as
/// [`reference_profile`].
pub fn stress_profile() -> GeneratorConfig {
    GeneratorConfig {
        height: 48,
        width: 48,
        ..reference_profile()
    }
}

/// Generate the connected instance of `config` for `seed`.
pub fn connected_instance(config: &GeneratorConfig, seed: u64) -> Result<GridworldMdp, GenError> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_random_connected(config, &mut rng)
}

/// `n` reward hypotheses for `mdp`, each redrawing every reward slot.
pub fn sampled_params(mdp: &GridworldMdp, n: usize, seed: u64) -> Vec<RewardParams> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let defaults = mdp.default_params();
    (0..n)
        .map(|_| {
            let values = (0..defaults.arity()).map(|_| random_reward(&mut rng)).collect();
            defaults.with_values(values)
        })
        .collect()
}
