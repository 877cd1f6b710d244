//! Stateful environment driver over a borrowed MDP.
//!
//! [`Environment`] holds the current state, a reward hypothesis and a
//! seeded RNG. Each [`step()`](Environment::step) draws one uniform
//! number and walks the transition distribution's cumulative mass, so
//! two environments with the same seed and action sequence produce the
//! same trajectory.

use ird_core::State;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::error::{MdpError, StepError};
use crate::mdp::{ActionList, Mdp, StateOf};
use crate::params::RewardParams;

/// One step of a trajectory.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition<P, A> {
    /// State the action was taken in.
    pub state: State<P>,
    /// Action taken.
    pub action: A,
    /// Sampled successor.
    pub next_state: State<P>,
    /// Reward received.
    pub reward: f64,
}

/// Single-agent cursor over an MDP.
pub struct Environment<'m, M: Mdp> {
    mdp: &'m M,
    params: RewardParams,
    state: StateOf<M>,
    seed: u64,
    rng: ChaCha8Rng,
}

impl<'m, M: Mdp> Environment<'m, M> {
    /// Start at the MDP's start state under its default rewards.
    pub fn new(mdp: &'m M, seed: u64) -> Self {
        Self {
            mdp,
            params: mdp.default_params().clone(),
            state: mdp.start_state(),
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Evaluate rewards under `params` instead of the defaults.
    pub fn with_params(mut self, params: RewardParams) -> Result<Self, MdpError> {
        self.mdp.check_params(&params)?;
        self.params = params;
        Ok(self)
    }

    /// The MDP being driven.
    pub fn mdp(&self) -> &'m M {
        self.mdp
    }

    /// Reward parameters in effect.
    pub fn params(&self) -> &RewardParams {
        &self.params
    }

    /// The seed the RNG was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Current state.
    pub fn current_state(&self) -> StateOf<M> {
        self.state
    }

    /// Legal actions in the current state.
    pub fn actions(&self) -> ActionList<M::Action> {
        self.mdp.actions(self.state)
    }

    /// Whether the current state is terminal.
    pub fn is_done(&self) -> bool {
        self.mdp.is_terminal(self.state)
    }

    /// Take `action`, returning the sampled next state and the reward.
    ///
    /// The state only advances when the step succeeds.
    ///
    /// # Errors
    ///
    /// [`StepError::Mdp`] for an illegal action and [`StepError::Sample`]
    /// if the transition distribution is not normalized.
    pub fn step(&mut self, action: M::Action) -> Result<(StateOf<M>, f64), StepError> {
        let dist = self.mdp.transition(self.state, action)?;
        let reward = self.mdp.reward(&self.params, self.state, action)?;
        let u: f64 = self.rng.random();
        let next = dist.sample(u)?;
        trace!(state = ?self.state, ?action, next = ?next, reward, "step");
        self.state = next;
        Ok((next, reward))
    }

    /// Return to the start state. The RNG stream continues.
    pub fn reset(&mut self) {
        debug!(from = ?self.state, "environment reset");
        self.state = self.mdp.start_state();
    }

    /// Teleport to `state`, e.g. a randomly drawn start cell.
    pub fn set_state(&mut self, state: StateOf<M>) {
        self.state = state;
    }

    /// Follow `policy` until the episode ends, the policy returns
    /// `None`, or `max_steps` steps have been taken.
    pub fn rollout(
        &mut self,
        mut policy: impl FnMut(StateOf<M>) -> Option<M::Action>,
        max_steps: usize,
    ) -> Result<Vec<Transition<M::Position, M::Action>>, StepError> {
        let mut trajectory = Vec::new();
        while trajectory.len() < max_steps && !self.is_done() {
            let state = self.state;
            let Some(action) = policy(state) else { break };
            let (next_state, reward) = self.step(action)?;
            trajectory.push(Transition {
                state,
                action,
                next_state,
                reward,
            });
        }
        debug!(steps = trajectory.len(), done = self.is_done(), "rollout finished");
        Ok(trajectory)
    }
}

impl<M: Mdp> std::fmt::Debug for Environment<'_, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("state", &self.state)
            .field("seed", &self.seed)
            .field("params", &self.params)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Distribution, GridworldMdp, MdpConfig, SampleError};
    use ird_core::{Direction, Point};

    const GOLDEN: [&str; 4] = ["XXXXX", "XA  X", "X X3X", "XXXXX"];

    fn golden(noise: f64) -> GridworldMdp {
        GridworldMdp::from_rows(
            &GOLDEN,
            MdpConfig {
                noise,
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn deterministic_walk_to_exit() {
        let m = golden(0.0);
        let mut env = Environment::new(&m, 1);
        assert_eq!(env.current_state(), State::At(Point::new(1, 1)));
        assert_eq!(env.actions().len(), 4);

        let mut total = 0.0;
        for a in [Direction::East, Direction::East, Direction::South] {
            let (_, r) = env.step(a).unwrap();
            total += r;
        }
        assert_eq!(env.current_state(), State::At(Point::new(3, 2)));
        let (next, r) = env.step(Direction::Exit).unwrap();
        total += r;
        assert_eq!(next, State::Terminal);
        assert!(env.is_done());
        assert!(env.actions().is_empty());
        assert!((total - 2.97).abs() < 1e-12);
    }

    #[test]
    fn illegal_step_leaves_state_untouched() {
        let m = golden(0.0);
        let mut env = Environment::new(&m, 0);
        let err = env.step(Direction::Exit).unwrap_err();
        assert!(matches!(err, StepError::Mdp(MdpError::IllegalAction { .. })));
        assert_eq!(env.current_state(), m.start_state());
    }

    #[test]
    fn reset_returns_to_start() {
        let m = golden(0.0);
        let mut env = Environment::new(&m, 0);
        env.step(Direction::East).unwrap();
        env.reset();
        assert_eq!(env.current_state(), m.start_state());
        env.set_state(State::At(Point::new(3, 1)));
        assert_eq!(env.current_state(), State::At(Point::new(3, 1)));
    }

    #[test]
    fn same_seed_same_trajectory() {
        let m = golden(0.4);
        let run = |seed| {
            let mut env = Environment::new(&m, seed);
            env.rollout(
                |s| match s {
                    State::At(p) if p == Point::new(3, 2) => Some(Direction::Exit),
                    State::At(_) => Some(Direction::East),
                    State::Terminal => None,
                },
                50,
            )
            .unwrap()
        };
        assert_eq!(run(11), run(11));
    }

    #[test]
    fn rollout_respects_max_steps_and_policy_stop() {
        let m = golden(0.0);
        let mut env = Environment::new(&m, 0);
        let t = env.rollout(|_| Some(Direction::North), 5).unwrap();
        assert_eq!(t.len(), 5);
        assert!(t.iter().all(|x| x.next_state == m.start_state()));

        let mut env = Environment::new(&m, 0);
        assert!(env.rollout(|_| None, 5).unwrap().is_empty());
    }

    #[test]
    fn custom_params_change_rewards() {
        let m = golden(0.0);
        let params = RewardParams::new(vec![-10.0], 0.0);
        let mut env = Environment::new(&m, 0).with_params(params).unwrap();
        env.set_state(State::At(Point::new(3, 2)));
        assert_eq!(env.step(Direction::Exit).unwrap().1, -10.0);
        assert!(Environment::new(&m, 0)
            .with_params(RewardParams::new(vec![], 0.0))
            .is_err());
        assert!(matches!(
            Environment::new(&m, 0).with_params(RewardParams::new(vec![3.0], f64::NAN)),
            Err(MdpError::NonFiniteLivingReward { .. })
        ));
    }

    /// An MDP whose transition mass does not sum to one.
    struct Leaky {
        params: RewardParams,
        mass: f64,
    }

    impl Mdp for Leaky {
        type Position = u8;
        type Action = u8;

        fn states(&self) -> Vec<State<u8>> {
            vec![State::At(0), State::Terminal]
        }
        fn start_state(&self) -> State<u8> {
            State::At(0)
        }
        fn actions(&self, state: State<u8>) -> ActionList<u8> {
            match state {
                State::At(_) => ActionList::from_slice(&[0]),
                State::Terminal => ActionList::new(),
            }
        }
        fn reward(&self, _: &RewardParams, _: State<u8>, _: u8) -> Result<f64, MdpError> {
            Ok(0.0)
        }
        fn transition(&self, _: State<u8>, _: u8) -> Result<Distribution<State<u8>>, MdpError> {
            Ok([(State::At(0), self.mass), (State::Terminal, self.mass)]
                .into_iter()
                .collect())
        }
        fn default_params(&self) -> &RewardParams {
            &self.params
        }
    }

    #[test]
    fn malformed_distributions_are_reported() {
        let short = Leaky {
            params: RewardParams::new(vec![], 0.0),
            mass: 0.0,
        };
        let mut env = Environment::new(&short, 3);
        assert!(matches!(
            env.step(0),
            Err(StepError::Sample(SampleError::ProbabilityBelowOne { .. }))
        ));

        let heavy = Leaky {
            params: RewardParams::new(vec![], 0.0),
            mass: 1.5,
        };
        let mut env = Environment::new(&heavy, 3);
        assert!(matches!(
            env.step(0),
            Err(StepError::Sample(SampleError::ProbabilityAboveOne { .. }))
        ));
        assert_eq!(env.current_state(), State::At(0));

        let over = Leaky {
            params: RewardParams::new(vec![], 0.0),
            mass: 0.9,
        };
        let mut env = Environment::new(&over, 3);
        let mut overflowed = false;
        for _ in 0..64 {
            env.set_state(State::At(0));
            match env.step(0) {
                Err(StepError::Sample(SampleError::ProbabilityAboveOne { .. })) => {
                    overflowed = true;
                    break;
                }
                Ok(_) => {}
                Err(e) => panic!("unexpected error {e}"),
            }
        }
        assert!(overflowed);
    }
}
