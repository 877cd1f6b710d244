//! Gridworld MDP: navigate a walled grid to one of several reward cells.
//!
//! In a reward cell the only legal action is EXIT, which pays the
//! cell's reward and ends the episode. Everywhere else the agent picks
//! a cardinal direction and pays the living reward. With noise `p`, a
//! move lands on the intended cell with probability `1 - p` and drifts
//! to each perpendicular neighbour with probability `p / 2`. Moves into
//! a wall (or off the grid) leave the agent where it is.

use std::fmt;

use ird_core::{Direction, Point, State};
use ird_grid::{Grid, Layout, NumericEncoding};
use rand::Rng;
use smallvec::smallvec;

use crate::config::MdpConfig;
use crate::distribution::Distribution;
use crate::error::MdpError;
use crate::mdp::{ActionList, Mdp};
use crate::params::RewardParams;

/// A gridworld built from a validated [`Layout`].
///
/// Reward slots follow the layout's row-major reward order, so
/// `default_params().values[i]` is the reward of the i-th reward cell.
#[derive(Clone, Debug)]
pub struct GridworldMdp {
    layout: Layout,
    noise: f64,
    defaults: RewardParams,
}

impl GridworldMdp {
    /// Validate `grid` and `config` and build the MDP.
    pub fn new(grid: &Grid, config: MdpConfig) -> Result<Self, MdpError> {
        Self::from_layout(grid.validate()?, config)
    }

    /// Build from character rows.
    ///
    /// # Examples
    ///
    /// ```
    /// use ird_core::{Direction, Point, State};
    /// use ird_mdp::{GridworldMdp, Mdp, MdpConfig};
    ///
    /// let mdp = GridworldMdp::from_rows(&["XXXX", "XA1X", "XXXX"], MdpConfig::default()).unwrap();
    /// let reward_cell = State::At(Point::new(2, 1));
    /// assert_eq!(mdp.actions(reward_cell).as_slice(), &[Direction::Exit]);
    /// ```
    pub fn from_rows<S: AsRef<str>>(rows: &[S], config: MdpConfig) -> Result<Self, MdpError> {
        Self::new(&Grid::from_rows(rows)?, config)
    }

    /// Build from an already validated layout.
    pub fn from_layout(layout: Layout, config: MdpConfig) -> Result<Self, MdpError> {
        config.validate()?;
        let values = layout.rewards().values().copied().collect();
        let defaults = RewardParams::new(values, config.living_reward);
        defaults.check(layout.rewards().len())?;
        Ok(Self {
            layout,
            noise: config.noise,
            defaults,
        })
    }

    /// Replace the default reward parameters.
    ///
    /// `params` must provide one finite value per reward cell and a
    /// finite living reward.
    pub fn with_params(mut self, params: RewardParams) -> Result<Self, MdpError> {
        self.check_params(&params)?;
        self.defaults = params;
        Ok(self)
    }

    /// The underlying layout.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.layout.height()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.layout.width()
    }

    /// Drift probability.
    pub fn noise(&self) -> f64 {
        self.noise
    }

    /// Living reward of the default parameters.
    pub fn living_reward(&self) -> f64 {
        self.defaults.living_reward
    }

    /// Start coordinate.
    pub fn start(&self) -> Point {
        self.layout.start()
    }

    /// Reward-slot index of `p`, if it is a reward cell.
    pub fn reward_slot(&self, p: Point) -> Option<usize> {
        self.layout.rewards().get_index_of(&p)
    }

    /// Reward cells in slot order.
    pub fn reward_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.layout.rewards().keys().copied()
    }

    /// Numeric export of walls, default rewards and start.
    pub fn to_numeric(&self) -> NumericEncoding {
        self.layout.to_numeric()
    }

    /// A uniformly random cell that is neither a wall nor a reward.
    ///
    /// The start cell always qualifies, so this never fails.
    pub fn random_start_state<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        let candidates: Vec<Point> = self
            .layout
            .open_points()
            .filter(|p| self.reward_slot(*p).is_none())
            .collect();
        if candidates.is_empty() {
            return self.layout.start();
        }
        candidates[rng.random_range(0..candidates.len())]
    }

    /// Where a cardinal move from `p` ends up without noise.
    fn attempt_move(&self, p: Point, direction: Direction) -> Point {
        match direction.move_point(p) {
            Ok(next) if !self.layout.is_wall(next) => next,
            _ => p,
        }
    }
}

impl Mdp for GridworldMdp {
    type Position = Point;
    type Action = Direction;

    fn states(&self) -> Vec<State<Point>> {
        self.layout
            .open_points()
            .map(State::At)
            .chain(std::iter::once(State::Terminal))
            .collect()
    }

    fn start_state(&self) -> State<Point> {
        State::At(self.layout.start())
    }

    fn actions(&self, state: State<Point>) -> ActionList<Direction> {
        match state {
            State::Terminal => ActionList::new(),
            State::At(p) if self.layout.is_wall(p) => ActionList::new(),
            State::At(p) if self.reward_slot(p).is_some() => smallvec![Direction::Exit],
            State::At(_) => ActionList::from_slice(&Direction::CARDINAL),
        }
    }

    fn reward(
        &self,
        params: &RewardParams,
        state: State<Point>,
        action: Direction,
    ) -> Result<f64, MdpError> {
        self.ensure_legal(state, action)?;
        let slot = match (state, action) {
            (State::At(p), Direction::Exit) => self.reward_slot(p),
            _ => None,
        };
        match slot {
            Some(i) => params.values.get(i).copied().ok_or(MdpError::RewardArity {
                expected: self.reward_slots(),
                found: params.arity(),
            }),
            None => Ok(params.living_reward),
        }
    }

    fn transition(
        &self,
        state: State<Point>,
        action: Direction,
    ) -> Result<Distribution<State<Point>>, MdpError> {
        self.ensure_legal(state, action)?;
        let p = match state {
            State::At(p) if action.is_cardinal() => p,
            _ => return Ok(Distribution::certain(State::Terminal)),
        };

        let intended = State::At(self.attempt_move(p, action));
        if self.noise == 0.0 {
            return Ok(Distribution::certain(intended));
        }

        let mut dist = Distribution::new();
        dist.add(intended, 1.0 - self.noise);
        for side in action.adjacent().map_err(|e| MdpError::InvalidModel {
            reason: e.to_string(),
        })? {
            dist.add(State::At(self.attempt_move(p, side)), self.noise / 2.0);
        }
        Ok(dist)
    }

    fn default_params(&self) -> &RewardParams {
        &self.defaults
    }
}

impl fmt::Display for GridworldMdp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.layout, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const GOLDEN: [&str; 4] = ["XXXXX", "XA  X", "X X3X", "XXXXX"];

    fn at(x: i32, y: i32) -> State<Point> {
        State::At(Point::new(x, y))
    }

    fn mdp(rows: &[&str], noise: f64) -> GridworldMdp {
        GridworldMdp::from_rows(
            rows,
            MdpConfig {
                noise,
                ..Default::default()
            },
        )
        .unwrap()
    }

    // ── States and actions ──────────────────────────────────────

    #[test]
    fn states_are_row_major_with_terminal_last() {
        let m = mdp(&GOLDEN, 0.0);
        assert_eq!(
            m.states(),
            vec![
                at(1, 1),
                at(2, 1),
                at(3, 1),
                at(1, 2),
                at(3, 2),
                State::Terminal
            ]
        );
    }

    #[test]
    fn action_sets() {
        let m = mdp(&GOLDEN, 0.0);
        assert_eq!(m.actions(State::Terminal).len(), 0);
        assert_eq!(m.actions(at(0, 0)).len(), 0);
        assert_eq!(m.actions(at(2, 2)).len(), 0);
        assert_eq!(m.actions(at(3, 2)).as_slice(), &[Direction::Exit]);
        assert_eq!(m.actions(at(1, 1)).as_slice(), &Direction::CARDINAL);
        assert_eq!(m.actions(at(40, 40)).len(), 0);
    }

    #[test]
    fn terminal_only_for_sentinel() {
        let m = mdp(&GOLDEN, 0.0);
        assert!(m.is_terminal(State::Terminal));
        assert!(!m.is_terminal(at(3, 2)));
        assert!(!m.is_terminal(at(1, 1)));
    }

    // ── Rewards ─────────────────────────────────────────────────

    #[test]
    fn rewards_pay_on_exit_and_living_elsewhere() {
        let m = mdp(&GOLDEN, 0.0);
        let p = m.default_params();
        assert_eq!(m.reward(p, at(3, 2), Direction::Exit), Ok(3.0));
        assert_eq!(m.reward(p, at(1, 1), Direction::East), Ok(-0.01));
        // Bumping into a wall still costs the living reward.
        assert_eq!(m.reward(p, at(1, 1), Direction::North), Ok(-0.01));
    }

    #[test]
    fn reward_rejects_illegal_actions() {
        let m = mdp(&GOLDEN, 0.0);
        let p = m.default_params();
        assert!(matches!(
            m.reward(p, at(1, 1), Direction::Exit),
            Err(MdpError::IllegalAction { .. })
        ));
        assert!(matches!(
            m.reward(p, at(3, 2), Direction::North),
            Err(MdpError::IllegalAction { .. })
        ));
        assert!(m.reward(p, State::Terminal, Direction::Exit).is_err());
    }

    #[test]
    fn reward_params_reskin_without_mutation() {
        let m = mdp(&["XXXXXX", "X1A 2X", "XXXXXX"], 0.0);
        assert_eq!(m.reward_slot(Point::new(1, 1)), Some(0));
        assert_eq!(m.reward_slot(Point::new(4, 1)), Some(1));
        let proxy = m.default_params().with_overrides([(1, -5.0)]).unwrap();
        assert_eq!(m.reward(&proxy, at(4, 1), Direction::Exit), Ok(-5.0));
        assert_eq!(m.reward(&proxy, at(1, 1), Direction::Exit), Ok(1.0));
        assert_eq!(
            m.reward(m.default_params(), at(4, 1), Direction::Exit),
            Ok(2.0)
        );
    }

    #[test]
    fn with_params_replaces_defaults() {
        let m = mdp(&["XXXXXX", "X1A 2X", "XXXXXX"], 0.0)
            .with_params(RewardParams::new(vec![7.0, 8.0], -1.0))
            .unwrap();
        assert_eq!(m.living_reward(), -1.0);
        let p = m.default_params();
        assert_eq!(m.reward(p, at(1, 1), Direction::Exit), Ok(7.0));
        assert_eq!(m.reward(p, at(2, 1), Direction::East), Ok(-1.0));

        let bad = mdp(&GOLDEN, 0.0).with_params(RewardParams::new(vec![1.0, 2.0], 0.0));
        assert!(matches!(bad, Err(MdpError::RewardArity { .. })));
        let bad = mdp(&GOLDEN, 0.0).with_params(RewardParams::new(vec![1.0], f64::NAN));
        assert!(matches!(bad, Err(MdpError::NonFiniteLivingReward { .. })));
    }

    #[test]
    fn reward_with_short_params_fails() {
        let m = mdp(&["XXXXXX", "X1A 2X", "XXXXXX"], 0.0);
        let short = RewardParams::new(vec![1.0], -0.01);
        assert!(matches!(
            m.reward(&short, at(4, 1), Direction::Exit),
            Err(MdpError::RewardArity {
                expected: 2,
                found: 1
            })
        ));
        assert!(m.check_params(&short).is_err());
    }

    // ── Transitions ─────────────────────────────────────────────

    #[test]
    fn exit_goes_to_terminal() {
        let m = mdp(&GOLDEN, 0.2);
        let d = m.transition(at(3, 2), Direction::Exit).unwrap();
        assert_eq!(d.iter().collect::<Vec<_>>(), vec![(State::Terminal, 1.0)]);
    }

    #[test]
    fn noiseless_move_is_deterministic() {
        let m = mdp(&GOLDEN, 0.0);
        let d = m.transition(at(1, 1), Direction::East).unwrap();
        assert_eq!(d.iter().collect::<Vec<_>>(), vec![(at(2, 1), 1.0)]);
    }

    #[test]
    fn wall_collision_self_loops() {
        let m = mdp(&GOLDEN, 0.0);
        let d = m.transition(at(1, 1), Direction::North).unwrap();
        assert_eq!(d.iter().collect::<Vec<_>>(), vec![(at(1, 1), 1.0)]);
        let d = m.transition(at(2, 1), Direction::South).unwrap();
        assert_eq!(d.probability(at(2, 1)), 1.0);
    }

    #[test]
    fn noise_splits_mass_perpendicular() {
        let rows = ["XXXXX", "X   X", "X A X", "X  1X", "XXXXX"];
        let m = mdp(&rows, 0.2);
        let d = m.transition(at(2, 2), Direction::North).unwrap();
        assert_eq!(d.len(), 3);
        assert!((d.probability(at(2, 1)) - 0.8).abs() < 1e-12);
        assert!((d.probability(at(3, 2)) - 0.1).abs() < 1e-12);
        assert!((d.probability(at(1, 2)) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn noisy_wall_collisions_merge_into_self() {
        // From (1,1) moving north: the wall and the west drift both
        // bounce back to (1,1), so their mass is summed.
        let m = mdp(&GOLDEN, 0.2);
        let d = m.transition(at(1, 1), Direction::North).unwrap();
        assert_eq!(d.len(), 2);
        assert!((d.probability(at(1, 1)) - 0.9).abs() < 1e-12);
        assert!((d.probability(at(2, 1)) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn transition_rejects_illegal_actions() {
        let m = mdp(&GOLDEN, 0.0);
        assert!(matches!(
            m.transition(at(1, 1), Direction::Exit),
            Err(MdpError::IllegalAction { .. })
        ));
        assert!(m.transition(State::Terminal, Direction::North).is_err());
        assert!(m.transition(at(0, 0), Direction::South).is_err());
    }

    // ── Construction ────────────────────────────────────────────

    #[test]
    fn construction_fails_fast() {
        assert!(matches!(
            GridworldMdp::from_rows(&["XXXX", "XA X", "XXXX"], MdpConfig::default()),
            Err(MdpError::Grid(_))
        ));
        assert!(matches!(
            GridworldMdp::from_rows(
                &GOLDEN,
                MdpConfig {
                    noise: 2.0,
                    ..Default::default()
                }
            ),
            Err(MdpError::Config(_))
        ));
    }

    #[test]
    fn display_renders_layout() {
        let m = mdp(&GOLDEN, 0.0);
        assert_eq!(m.to_string(), GOLDEN.join("\n"));
    }

    #[test]
    fn numeric_export() {
        let m = mdp(&GOLDEN, 0.0);
        let enc = m.to_numeric();
        assert_eq!(enc.rewards[[2, 3]], 3.0);
        assert_eq!(enc.walls[[2, 2]], 1);
        assert_eq!(enc.start, Point::new(1, 1));
    }

    #[test]
    fn random_start_avoids_walls_and_rewards() {
        let m = mdp(&["XXXXXX", "XA 1 X", "X X  X", "XXXXXX"], 0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..200 {
            let p = m.random_start_state(&mut rng);
            assert!(!m.layout().is_wall(p));
            assert!(m.reward_slot(p).is_none());
        }
    }

    // ── Compliance ──────────────────────────────────────────────

    #[test]
    fn compliance_noiseless() {
        compliance::run_full_compliance(&mdp(&GOLDEN, 0.0));
    }

    #[test]
    fn compliance_noisy() {
        let rows = ["XXXXXX", "X  1 X", "X XA X", "X9   X", "XXXXXX"];
        compliance::run_full_compliance(&mdp(&rows, 0.3));
    }

    proptest! {
        #[test]
        fn noise_symmetry_in_open_field(noise in 0.0f64..=1.0, d in 0usize..4) {
            // 5x5 interior, agent in the centre: no wall is adjacent.
            let rows = ["XXXXXXX", "X     X", "X     X", "X  A  X", "X     X", "X    1X", "XXXXXXX"];
            let m = mdp(&rows, noise);
            let dir = Direction::CARDINAL[d];
            let centre = Point::new(3, 3);
            let dist = m.transition(State::At(centre), dir).unwrap();
            let intended = State::At(dir.move_point(centre).unwrap());
            prop_assert!((dist.total() - 1.0).abs() < 1e-9);
            prop_assert!((dist.probability(intended) - (1.0 - noise)).abs() < 1e-12);
            for side in dir.adjacent().unwrap() {
                let s = State::At(side.move_point(centre).unwrap());
                prop_assert!((dist.probability(s) - noise / 2.0).abs() < 1e-12);
            }
        }
    }
}
