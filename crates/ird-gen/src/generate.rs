//! Random gridworld instances.
//!
//! Both generators start from an all-wall grid, fill the interior, then
//! place a `+3` reward and the start marker. Extra rewards are nonzero
//! integers drawn uniformly from `[-9, 9]`.
//!
//! Markers go on free cells. When none is left, a marker overwrites a
//! uniformly chosen reward cell instead; the start and the mandatory
//! `+3` are never overwritten. Each fallback emits a `warn!` event.

use ird_core::{Direction, Point};
use ird_grid::{Cell, Grid};
use ird_mdp::GridworldMdp;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use tracing::{debug, warn};

use crate::config::GeneratorConfig;
use crate::disjoint::DisjointSets;
use crate::error::GenError;

/// Reward of the marker every generated instance carries.
pub const GUARANTEED_REWARD: f64 = 3.0;

/// A nonzero integer reward, uniform over `[-9, -1] ∪ [1, 9]`.
pub fn random_reward<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let k: i32 = rng.random_range(0..18);
    f64::from(if k < 9 { k - 9 } else { k - 8 })
}

/// Interior cells under construction, indexed `cells[y][x]`.
struct Canvas {
    cells: Vec<Vec<Cell>>,
}

impl Canvas {
    fn walls(height: usize, width: usize) -> Self {
        Self {
            cells: vec![vec![Cell::Wall; width]; height],
        }
    }

    fn get(&self, p: Point) -> Cell {
        self.cells[p.y as usize][p.x as usize]
    }

    fn set(&mut self, p: Point, cell: Cell) {
        self.cells[p.y as usize][p.x as usize] = cell;
    }

    /// Put `cell` on a random point of `region` accepted by `free`, or on
    /// a random reward cell of `region` outside `protected` when no free
    /// point exists.
    fn place<R: Rng + ?Sized>(
        &mut self,
        cell: Cell,
        region: &[Point],
        free: impl Fn(Cell) -> bool,
        protected: &[Point],
        rng: &mut R,
    ) -> Option<Point> {
        let mut spots: Vec<Point> = region.iter().copied().filter(|&p| free(self.get(p))).collect();
        if spots.is_empty() {
            spots = region
                .iter()
                .copied()
                .filter(|p| self.get(*p).reward().is_some() && !protected.contains(p))
                .collect();
            warn!(
                marker = ?cell,
                candidates = spots.len(),
                "no free cell left, overwriting an existing reward"
            );
        }
        let p = *spots.choose(rng)?;
        self.set(p, cell);
        Some(p)
    }

    fn into_mdp(self, config: &GeneratorConfig) -> Result<GridworldMdp, GenError> {
        let grid = Grid::from_cells(self.cells);
        Ok(GridworldMdp::new(&grid, config.mdp.clone())?)
    }
}

fn interior(config: &GeneratorConfig) -> Result<Vec<Point>, GenError> {
    config.validate()?;
    let cells = config.interior_cells();
    if cells < 2 {
        return Err(GenError::TooSmall { interior: cells });
    }
    Ok((1..config.height - 1)
        .flat_map(|y| (1..config.width - 1).map(move |x| Point::new(x as i32, y as i32)))
        .collect())
}

/// Place the `+3` marker, then the start.
fn place_markers<R: Rng + ?Sized>(
    canvas: &mut Canvas,
    region: &[Point],
    free: impl Fn(Cell) -> bool + Copy,
    rng: &mut R,
) -> Result<(Point, Point), GenError> {
    let goal = canvas
        .place(Cell::Reward(GUARANTEED_REWARD), region, free, &[], rng)
        .ok_or(GenError::NoFreeCell { marker: "reward" })?;
    let start = canvas
        .place(Cell::Start, region, free, &[goal], rng)
        .ok_or(GenError::NoFreeCell { marker: "start" })?;
    Ok((goal, start))
}

/// Sample every interior cell independently, then place the markers.
///
/// Each interior cell is a reward with probability `pr_reward`, otherwise
/// empty with probability `1 - pr_wall`, otherwise a wall. The markers
/// replace walls or empty cells. Rewards may be unreachable from the
/// start.
pub fn generate_random<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<GridworldMdp, GenError> {
    let region = interior(config)?;
    let mut canvas = Canvas::walls(config.height, config.width);
    for &p in &region {
        if rng.random::<f64>() < config.pr_reward {
            canvas.set(p, Cell::Reward(random_reward(rng)));
        } else if rng.random::<f64>() >= config.pr_wall {
            canvas.set(p, Cell::Empty);
        }
    }
    place_markers(
        &mut canvas,
        &region,
        |c| matches!(c, Cell::Wall | Cell::Empty),
        rng,
    )?;
    canvas.into_mdp(config)
}

/// Carve a connected region, then place the markers and extra rewards
/// inside it, so every reward is reachable from the start.
///
/// Interior cells are carved in random order and joined with carved
/// cardinal neighbours until at least half the interior (and at least two
/// cells) is carved and the carved cells form one component. After the
/// markers, further rewards are added while a uniform draw is below
/// `pr_reward`, at most one per carved cell.
pub fn generate_random_connected<R: Rng + ?Sized>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<GridworldMdp, GenError> {
    let mut order = interior(config)?;
    let min_free = order.len().div_ceil(2).max(2);
    order.shuffle(rng);

    let mut canvas = Canvas::walls(config.height, config.width);
    let mut sets = DisjointSets::new();
    let mut carved = Vec::with_capacity(order.len());
    while sets.num_elements() < min_free || !sets.is_connected() {
        // The full interior is connected, so this only ends the loop
        // once every cell is carved.
        let Some(p) = order.pop() else { break };
        canvas.set(p, Cell::Empty);
        sets.add_singleton(p);
        carved.push(p);
        for d in Direction::CARDINAL {
            if let Ok(q) = d.move_point(p) {
                sets.union(&p, &q);
            }
        }
    }

    let free = |c: Cell| matches!(c, Cell::Empty);
    let (goal, start) = place_markers(&mut canvas, &carved, free, rng)?;
    let mut extras = 0;
    while extras < carved.len() && rng.random::<f64>() < config.pr_reward {
        let reward = Cell::Reward(random_reward(rng));
        if canvas.place(reward, &carved, free, &[goal, start], rng).is_none() {
            warn!("no reward cell left to overwrite, dropping extra reward");
        }
        extras += 1;
    }
    debug!(
        carved = carved.len(),
        extras,
        sets = sets.num_sets(),
        "generated connected gridworld"
    );
    canvas.into_mdp(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ird_core::State;
    use ird_mdp::Mdp;
    use ird_test_utils::assert_fully_connected;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn random_reward_is_nonzero_and_bounded() {
        let mut r = rng(0);
        let mut seen = std::collections::BTreeSet::new();
        for _ in 0..2000 {
            let v = random_reward(&mut r);
            assert!(v != 0.0 && (-9.0..=9.0).contains(&v));
            seen.insert(v as i32);
        }
        assert_eq!(seen.len(), 18);
    }

    #[test]
    fn too_small_interior() {
        let c = GeneratorConfig::new(3, 3);
        assert!(matches!(
            generate_random(&c, &mut rng(0)),
            Err(GenError::TooSmall { interior: 1 })
        ));
        assert!(matches!(
            generate_random_connected(&c, &mut rng(0)),
            Err(GenError::TooSmall { interior: 1 })
        ));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let c = GeneratorConfig::new(6, 6).with_pr_wall(-0.5);
        assert!(matches!(
            generate_random(&c, &mut rng(0)),
            Err(GenError::Config(_))
        ));
    }

    #[test]
    fn unconstrained_always_has_start_and_guaranteed_reward() {
        let c = GeneratorConfig::new(7, 9).with_pr_wall(0.4).with_pr_reward(0.2);
        let mut r = rng(42);
        for _ in 0..50 {
            let mdp = generate_random(&c, &mut r).unwrap();
            assert_eq!(mdp.height(), 7);
            assert_eq!(mdp.width(), 9);
            assert!(mdp.layout().rewards().values().any(|&v| v == GUARANTEED_REWARD));
            assert!(mdp.layout().rewards().values().all(|&v| v != 0.0));
        }
    }

    #[test]
    fn unconstrained_all_rewards_falls_back() {
        // Every interior cell starts as a reward, so both markers must
        // overwrite rewards.
        let c = GeneratorConfig::new(4, 4).with_pr_reward(1.0);
        let mdp = generate_random(&c, &mut rng(3)).unwrap();
        assert_eq!(mdp.layout().rewards().len(), 3);
        assert!(mdp.layout().rewards().values().any(|&v| v == GUARANTEED_REWARD));
        assert!(mdp.reward_slot(mdp.start()).is_none());
    }

    #[test]
    fn connected_instances_are_fully_reachable() {
        let c = GeneratorConfig::new(8, 10).with_pr_reward(0.7);
        let mut r = rng(9);
        for _ in 0..50 {
            let mdp = generate_random_connected(&c, &mut r).unwrap();
            assert_fully_connected(mdp.layout());
            let open = mdp.layout().open_points().count();
            assert!(open >= c.interior_cells().div_ceil(2));
            assert!(!mdp.layout().reachable_rewards(mdp.start()).is_empty());
        }
    }

    #[test]
    fn connected_minimal_interior() {
        // Two interior cells: one becomes +3, the other the start.
        let c = GeneratorConfig::new(3, 4).with_pr_reward(1.0);
        let mdp = generate_random_connected(&c, &mut rng(5)).unwrap();
        assert_eq!(mdp.layout().rewards().len(), 1);
        assert_eq!(
            mdp.layout().rewards().values().copied().collect::<Vec<_>>(),
            vec![GUARANTEED_REWARD]
        );
        assert_eq!(mdp.actions(State::At(mdp.start())).len(), 4);
    }

    #[test]
    fn connected_saturated_rewards_keep_markers() {
        // pr_reward 1 fills every carved cell, then keeps overwriting
        // rewards until the extra budget runs out.
        let c = GeneratorConfig::new(5, 5).with_pr_reward(1.0);
        let mdp = generate_random_connected(&c, &mut rng(17)).unwrap();
        assert_fully_connected(mdp.layout());
        assert!(mdp.layout().rewards().values().any(|&v| v == GUARANTEED_REWARD));
        assert!(mdp.reward_slot(mdp.start()).is_none());
    }

    #[test]
    fn same_seed_same_instance() {
        let c = GeneratorConfig::new(9, 9).with_pr_reward(0.5);
        let a = generate_random_connected(&c, &mut rng(77)).unwrap();
        let b = generate_random_connected(&c, &mut rng(77)).unwrap();
        assert_eq!(a.layout(), b.layout());
        let a = generate_random(&c, &mut rng(77)).unwrap();
        let b = generate_random(&c, &mut rng(77)).unwrap();
        assert_eq!(a.to_string(), b.to_string());
    }
}
