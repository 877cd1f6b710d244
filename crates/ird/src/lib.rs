//! IRD: gridworld MDPs, exact planning and instance generation for
//! inverse reward design experiments.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all IRD sub-crates. For most users, adding `ird` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use ird::prelude::*;
//!
//! // Three moves east/south, then EXIT on the +3 cell.
//! let mdp = GridworldMdp::from_rows(
//!     &["XXXXX", "XA  X", "X X3X", "XXXXX"],
//!     MdpConfig::default(),
//! )
//! .unwrap();
//!
//! let planner = ValueIteration::new(PlannerConfig::default().with_gamma(1.0)).unwrap();
//! let solution = planner.solve(&mdp, mdp.default_params()).unwrap();
//! let v = solution.value(mdp.start_state()).unwrap();
//! assert!((v - 2.97).abs() < 1e-9);
//!
//! // Re-pose the same MDP under a proxy reward.
//! let proxy = mdp.default_params().with_overrides([(0, -3.0)]).unwrap();
//! let solution = planner.solve(&mdp, &proxy).unwrap();
//! assert!(solution.value(mdp.start_state()).unwrap() < 0.0);
//!
//! // Step a seeded environment; noise 0 makes the move certain.
//! let mut env = Environment::new(&mdp, 42);
//! let (next, reward) = env.step(Direction::East).unwrap();
//! assert_eq!(next, State::At(Point::new(2, 1)));
//! assert_eq!(reward, -0.01);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `ird-core` | Directions, points, states |
//! | [`grid`] | `ird-grid` | Cells, grid parsing and validation, layouts, numeric encoding |
//! | [`mdp`] | `ird-mdp` | `Mdp` trait, gridworld and N-state MDPs, reward parameters, environment |
//! | [`planner`] | `ird-planner` | Value iteration, Q-tables, exact policy evaluation |
//! | [`gen`] | `ird-gen` | Disjoint sets and random instance generators |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core vocabulary (`ird-core`).
///
/// [`types::Direction`], [`types::Point`] and the [`types::State`]
/// wrapper with its terminal sentinel.
pub use ird_core as types;

/// Grid encoding and validation (`ird-grid`).
///
/// Parse [`grid::Grid`]s from character rows or tokens, validate them
/// into [`grid::Layout`]s, render and export them numerically.
pub use ird_grid as grid;

/// MDP model and environment driver (`ird-mdp`).
///
/// The [`mdp::Mdp`] trait with [`mdp::GridworldMdp`] and
/// [`mdp::NStateMdp`], explicit [`mdp::RewardParams`], and the seeded
/// [`mdp::Environment`].
pub use ird_mdp as mdp;

/// Exact planners (`ird-planner`).
///
/// [`planner::ValueIteration`] is the reference oracle; compare other
/// planners against it with [`planner::q_tables_match`].
pub use ird_planner as planner;

/// Random instance generators (`ird-gen`).
///
/// [`gen::generate_random`] and the reachability-preserving
/// [`gen::generate_random_connected`].
pub use ird_gen as gen;

/// Common imports for typical IRD usage.
///
/// ```rust
/// use ird::prelude::*;
/// ```
///
/// This imports the most frequently used types: the direction and state
/// vocabulary, grids, MDPs and reward parameters, the planner, and the
/// generators.
pub mod prelude {
    // Core vocabulary
    pub use ird_core::{Direction, Point, State};

    // Grids
    pub use ird_grid::{Cell, Grid, Layout};

    // MDPs and environment
    pub use ird_mdp::{
        Choice, Distribution, Environment, GridworldMdp, Mdp, MdpConfig, NStateMdp,
        RewardParams, Transition,
    };

    // Planning
    pub use ird_planner::{
        evaluate_policy_exact, q_tables_match, PlannerConfig, Solution, ValueIteration,
    };

    // Generation
    pub use ird_gen::{generate_random, generate_random_connected, GeneratorConfig};

    // Errors
    pub use ird_gen::GenError;
    pub use ird_grid::GridError;
    pub use ird_mdp::{MdpError, SampleError, StepError};
    pub use ird_planner::PlannerError;
}
