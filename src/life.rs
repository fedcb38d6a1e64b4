//! Conway's Game of Life on the LED grid
//!
//! [`Life`] is a two-phase state machine:
//!
//! - **Running**: each tick derives the live mask from what the grid is
//!   *showing* (any channel nonzero), counts neighbors on a zero-padded 8x8
//!   board, applies the B3/S23 rule and shows the survivors in fresh random
//!   colors. The state before the tick is kept in a 4-entry history; if the
//!   new state equals any entry the pattern has a period of at most 4 and
//!   the machine converges.
//! - **Converged**: the rule keeps being applied to the frozen state for
//!   [`GRACE_STEPS`] ticks so the final pattern keeps shimmering, then the
//!   next tick reseeds the board at random.
//!
//! ## Example
//!
//! ```
//! use blinkgrid::life::{apply_rule, neighbor_counts};
//!
//! let mut blinker = [[false; 8]; 8];
//! blinker[3][2] = true;
//! blinker[3][3] = true;
//! blinker[3][4] = true;
//!
//! let next = apply_rule(&blinker, &neighbor_counts(&blinker));
//! assert!(next[2][3] && next[3][3] && next[4][3]);
//! assert!(!next[3][2] && !next[3][4]);
//! ```

use embedded_hal::delay::DelayNs;
use heapless::Deque;
use rand::Rng;

use crate::config::{CHANNELS, HEIGHT, WIDTH};
use crate::error::Error;
use crate::grid::{BLANK_FRAME, Grid, Pixels};
use crate::interface::LedInterface;

type LifeResult<T, I> = core::result::Result<T, Error<I>>;

/// Which cells are alive, `[row][col]`
pub type AliveState = [[bool; WIDTH]; HEIGHT];

/// Live neighbor count per cell, `[row][col]`
pub type NeighborCounts = [[u8; WIDTH]; HEIGHT];

/// Number of past states compared against
pub const HISTORY_LEN: usize = 4;

/// Grace ticks shown after convergence
///
/// Each grace frame is held for a full tick; the tick after the last one
/// reseeds the board.
pub const GRACE_STEPS: u32 = 50;

/// Sleep between ticks, in milliseconds
pub const TICK_INTERVAL_MS: u32 = 20;

/// Exclusive upper bound of each channel of a live cell's color
pub const COLOR_LIMIT: i32 = 50;

/// Color of live cells right after seeding
pub const SEED_COLOR: [i32; CHANNELS] = [1, 1, 1];

/// Cells showing any nonzero channel
pub fn lit_mask(pixels: &Pixels) -> AliveState {
    let mut mask = [[false; WIDTH]; HEIGHT];
    for (out_row, row) in mask.iter_mut().zip(pixels) {
        for (out, color) in out_row.iter_mut().zip(row) {
            *out = color.is_lit();
        }
    }
    mask
}

/// Count live neighbors of every cell; cells off the board count as dead
pub fn neighbor_counts(mask: &AliveState) -> NeighborCounts {
    let mut counts = [[0u8; WIDTH]; HEIGHT];
    for (row, out_row) in counts.iter_mut().enumerate() {
        for (col, count) in out_row.iter_mut().enumerate() {
            for r in row.saturating_sub(1)..=(row + 1).min(HEIGHT - 1) {
                for c in col.saturating_sub(1)..=(col + 1).min(WIDTH - 1) {
                    if (r, c) != (row, col) && mask[r][c] {
                        *count += 1;
                    }
                }
            }
        }
    }
    counts
}

/// Apply B3/S23 to `alive` given its neighbor counts
///
/// A cell dies with fewer than 2 or more than 3 neighbors, a live cell
/// survives with 2, and any cell with exactly 3 is alive next.
pub fn apply_rule(alive: &AliveState, counts: &NeighborCounts) -> AliveState {
    let mut next = [[false; WIDTH]; HEIGHT];
    for row in 0..HEIGHT {
        for col in 0..WIDTH {
            let count = counts[row][col];
            let dies = !(2..=3).contains(&count);
            let survives = alive[row][col] && count == 2;
            let born = count == 3;
            next[row][col] = (alive[row][col] || survives || born) && !dies;
        }
    }
    next
}

/// Number of live cells
pub fn population(state: &AliveState) -> usize {
    state.iter().flatten().filter(|alive| **alive).count()
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Phase {
    Running,
    Converged { remaining: u32 },
}

/// What a call to [`Life::tick`] did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// The board advanced one generation
    Evolved,
    /// The new state repeats a recent one; the grace period starts
    Converged,
    /// Grace period tick; `remaining` more grace ticks follow before the
    /// reseeding tick
    Grace {
        /// Grace ticks left
        remaining: u32,
    },
    /// The grace period ended and the board was reseeded
    Restarted,
}

/// Game of Life simulation
pub struct Life<R> {
    rng: R,
    alive: AliveState,
    history: Deque<AliveState, HISTORY_LEN>,
    phase: Phase,
    generation: u64,
}

impl<R: Rng> Life<R> {
    /// Seed a random board and show it
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interface`] if the grid update fails.
    pub fn new<I, D>(rng: R, grid: &mut Grid<I>, delay: &mut D) -> LifeResult<Self, I>
    where
        I: LedInterface,
        D: DelayNs,
    {
        let mut life = Self::blank(rng);
        life.initialize(grid, delay)?;
        Ok(life)
    }

    /// Start from a given board and show it
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interface`] if the grid update fails.
    pub fn with_state<I, D>(
        rng: R,
        alive: AliveState,
        grid: &mut Grid<I>,
        delay: &mut D,
    ) -> LifeResult<Self, I>
    where
        I: LedInterface,
        D: DelayNs,
    {
        let mut life = Self::blank(rng);
        life.seed(alive, grid, delay)?;
        Ok(life)
    }

    fn blank(rng: R) -> Self {
        Self {
            rng,
            alive: [[false; WIDTH]; HEIGHT],
            history: Deque::new(),
            phase: Phase::Running,
            generation: 0,
        }
    }

    /// Reseed every cell alive with probability 1/2
    pub fn initialize<I, D>(&mut self, grid: &mut Grid<I>, delay: &mut D) -> LifeResult<(), I>
    where
        I: LedInterface,
        D: DelayNs,
    {
        let mut alive = [[false; WIDTH]; HEIGHT];
        for cell in alive.iter_mut().flatten() {
            *cell = self.rng.gen_bool(0.5);
        }
        self.seed(alive, grid, delay)?;
        log::info!("Life seeded with {} live cells", population(&self.alive));
        Ok(())
    }

    fn seed<I, D>(
        &mut self,
        alive: AliveState,
        grid: &mut Grid<I>,
        delay: &mut D,
    ) -> LifeResult<(), I>
    where
        I: LedInterface,
        D: DelayNs,
    {
        self.alive = alive;
        self.history.clear();
        self.phase = Phase::Running;
        self.generation = 0;

        let mut frame = BLANK_FRAME;
        for (out_row, row) in frame.iter_mut().zip(&self.alive) {
            for (cell, alive) in out_row.iter_mut().zip(row) {
                if *alive {
                    *cell = SEED_COLOR;
                }
            }
        }
        grid.update(&frame, delay)?;
        Ok(())
    }

    /// Advance one tick
    ///
    /// # Errors
    ///
    /// Returns [`Error::Interface`] if the grid update fails.
    pub fn tick<I, D>(&mut self, grid: &mut Grid<I>, delay: &mut D) -> LifeResult<TickOutcome, I>
    where
        I: LedInterface,
        D: DelayNs,
    {
        match self.phase {
            Phase::Running => {
                if self.history.is_full() {
                    self.history.pop_front();
                }
                if self.history.push_back(self.alive).is_err() {
                    log::warn!("Life history full, state not recorded");
                }

                self.alive = self.evolve(grid, delay)?;
                self.generation += 1;

                if self.history.iter().any(|past| *past == self.alive) {
                    log::info!(
                        "Life converged after {} generations ({} live cells)",
                        self.generation,
                        population(&self.alive)
                    );
                    self.phase = Phase::Converged {
                        remaining: GRACE_STEPS,
                    };
                    Ok(TickOutcome::Converged)
                } else {
                    Ok(TickOutcome::Evolved)
                }
            }
            Phase::Converged { remaining: 0 } => {
                self.initialize(grid, delay)?;
                Ok(TickOutcome::Restarted)
            }
            Phase::Converged { remaining } => {
                self.evolve(grid, delay)?;
                let remaining = remaining - 1;
                self.phase = Phase::Converged { remaining };
                Ok(TickOutcome::Grace { remaining })
            }
        }
    }

    /// Compute the next state from the displayed mask and show it in random
    /// colors
    fn evolve<I, D>(&mut self, grid: &mut Grid<I>, delay: &mut D) -> LifeResult<AliveState, I>
    where
        I: LedInterface,
        D: DelayNs,
    {
        let counts = neighbor_counts(&lit_mask(grid.pixels()));
        let next = apply_rule(&self.alive, &counts);

        let mut frame = BLANK_FRAME;
        for (out_row, row) in frame.iter_mut().zip(&next) {
            for (cell, alive) in out_row.iter_mut().zip(row) {
                let color: [i32; CHANNELS] =
                    core::array::from_fn(|_| self.rng.gen_range(0..COLOR_LIMIT));
                *cell = color.map(|channel| channel * i32::from(*alive));
            }
        }
        grid.update(&frame, delay)?;
        Ok(next)
    }

    /// Current logical state
    pub fn alive(&self) -> &AliveState {
        &self.alive
    }

    /// Generations since the last seeding
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the grace period is running
    pub fn is_converged(&self) -> bool {
        matches!(self.phase, Phase::Converged { .. })
    }

    /// Number of states in the history
    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Builder;
    use crate::grid::Region;
    use crate::interface::Mode;
    use crate::mock::{MockDelay, MockInterface};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn test_grid() -> Grid<MockInterface> {
        let config = Builder::new().build().unwrap();
        Grid::new(
            MockInterface::new(Mode::Addressable),
            config,
            &mut MockDelay::default(),
        )
        .unwrap()
    }

    fn state(cells: &[(usize, usize)]) -> AliveState {
        let mut state = [[false; WIDTH]; HEIGHT];
        for &(row, col) in cells {
            state[row][col] = true;
        }
        state
    }

    const BLOCK: [(usize, usize); 4] = [(3, 3), (3, 4), (4, 3), (4, 4)];

    #[test]
    fn test_lone_cell_dies() {
        let alive = state(&[(4, 4)]);
        let counts = neighbor_counts(&alive);
        assert_eq!(counts[4][4], 0);
        assert_eq!(apply_rule(&alive, &counts), [[false; WIDTH]; HEIGHT]);
    }

    #[test]
    fn test_blinker_turns_vertical() {
        let horizontal = state(&[(3, 2), (3, 3), (3, 4)]);
        let vertical = state(&[(2, 3), (3, 3), (4, 3)]);
        assert_eq!(apply_rule(&horizontal, &neighbor_counts(&horizontal)), vertical);
        assert_eq!(apply_rule(&vertical, &neighbor_counts(&vertical)), horizontal);
    }

    #[test]
    fn test_neighbor_counts_zero_padded() {
        let full = [[true; WIDTH]; HEIGHT];
        let counts = neighbor_counts(&full);
        assert_eq!(counts[0][0], 3);
        assert_eq!(counts[0][4], 5);
        assert_eq!(counts[4][4], 8);
        assert_eq!(counts[7][7], 3);
    }

    #[test]
    fn test_birth_needs_exactly_three() {
        let alive = state(&[(0, 0), (0, 2), (2, 0)]);
        let counts = neighbor_counts(&alive);
        assert_eq!(counts[1][1], 3);
        assert!(apply_rule(&alive, &counts)[1][1]);

        let two = state(&[(0, 0), (0, 2)]);
        assert!(!apply_rule(&two, &neighbor_counts(&two))[1][1]);
    }

    #[test]
    fn test_overcrowded_cell_dies() {
        let alive = state(&[(3, 3), (2, 2), (2, 4), (4, 2), (4, 4)]);
        let counts = neighbor_counts(&alive);
        assert_eq!(counts[3][3], 4);
        assert!(!apply_rule(&alive, &counts)[3][3]);
    }

    #[test]
    fn test_lit_mask_any_channel() {
        let mut grid = test_grid();
        let mut frame = BLANK_FRAME;
        frame[0][0] = [0, 0, 1];
        frame[5][6] = [-3, 0, 0];
        grid.update(&frame, &mut MockDelay::default()).unwrap();

        let mask = lit_mask(grid.pixels());
        assert_eq!(mask, state(&[(0, 0)]));
    }

    #[test]
    fn test_seed_shows_seed_color() {
        let mut grid = test_grid();
        let mut delay = MockDelay::default();
        let life = Life::with_state(StdRng::seed_from_u64(1), state(&BLOCK), &mut grid, &mut delay)
            .unwrap();

        assert_eq!(life.alive(), &state(&BLOCK));
        assert_eq!(grid.frame()[3][3], SEED_COLOR);
        assert_eq!(grid.frame()[0][0], [0, 0, 0]);
    }

    #[test]
    fn test_random_seed_is_shown() {
        let mut grid = test_grid();
        let mut delay = MockDelay::default();
        let life = Life::new(StdRng::seed_from_u64(3), &mut grid, &mut delay).unwrap();

        assert_eq!(&lit_mask(grid.pixels()), life.alive());
        assert_eq!(life.generation(), 0);
        assert_eq!(life.history_len(), 0);
    }

    #[test]
    fn test_tick_colors_survivors_only() {
        let mut grid = test_grid();
        let mut delay = MockDelay::default();
        let horizontal = state(&[(3, 2), (3, 3), (3, 4)]);
        let mut life =
            Life::with_state(StdRng::seed_from_u64(5), horizontal, &mut grid, &mut delay).unwrap();

        assert_eq!(life.tick(&mut grid, &mut delay).unwrap(), TickOutcome::Evolved);

        let vertical = state(&[(2, 3), (3, 3), (4, 3)]);
        assert_eq!(life.alive(), &vertical);
        for (row, cells) in grid.pixels().iter().enumerate() {
            for (col, color) in cells.iter().enumerate() {
                let channels = color.channels();
                if vertical[row][col] {
                    assert!(channels.iter().all(|c| i32::from(*c) < COLOR_LIMIT));
                } else {
                    assert_eq!(channels, [0, 0, 0]);
                }
            }
        }
    }

    #[test]
    fn test_still_life_converges_on_next_tick() {
        let mut grid = test_grid();
        let mut delay = MockDelay::default();
        let mut life =
            Life::with_state(StdRng::seed_from_u64(9), state(&BLOCK), &mut grid, &mut delay)
                .unwrap();

        assert_eq!(life.tick(&mut grid, &mut delay).unwrap(), TickOutcome::Converged);
        assert_eq!(life.alive(), &state(&BLOCK));
        assert!(life.is_converged());
    }

    #[test]
    fn test_restart_after_grace_period() {
        let mut grid = test_grid();
        let mut delay = MockDelay::default();
        let mut life =
            Life::with_state(StdRng::seed_from_u64(11), state(&BLOCK), &mut grid, &mut delay)
                .unwrap();
        assert_eq!(life.tick(&mut grid, &mut delay).unwrap(), TickOutcome::Converged);

        for expected in (0..GRACE_STEPS).rev() {
            assert_eq!(
                life.tick(&mut grid, &mut delay).unwrap(),
                TickOutcome::Grace {
                    remaining: expected
                }
            );
            // The frozen block keeps being shown
            assert_eq!(life.alive(), &state(&BLOCK));
        }

        // The last grace frame is still on the grid until the next tick
        assert!(life.is_converged());
        assert_eq!(life.alive(), &state(&BLOCK));

        assert_eq!(life.tick(&mut grid, &mut delay).unwrap(), TickOutcome::Restarted);
        assert!(!life.is_converged());
        assert_eq!(life.history_len(), 0);
        assert_eq!(life.generation(), 0);
        assert_eq!(&lit_mask(grid.pixels()), life.alive());
    }

    #[test]
    fn test_tick_counts_neighbors_on_display() {
        let mut grid = test_grid();
        let mut delay = MockDelay::default();
        let mut life =
            Life::with_state(StdRng::seed_from_u64(23), state(&[]), &mut grid, &mut delay).unwrap();

        // Light a horizontal line the simulation does not know about
        grid.write_region(Region::new(3, 2, 1, 3), &[[5, 5, 5]; 3], &mut delay)
            .unwrap();

        assert_eq!(life.tick(&mut grid, &mut delay).unwrap(), TickOutcome::Evolved);
        // Births come from the lit cells; the logical state had no survivors
        assert_eq!(life.alive(), &state(&[(2, 3), (4, 3)]));
    }

    #[test]
    fn test_blinker_converges_with_period_two() {
        let mut grid = test_grid();
        let mut delay = MockDelay::default();
        let horizontal = state(&[(3, 2), (3, 3), (3, 4)]);
        let mut life =
            Life::with_state(StdRng::seed_from_u64(13), horizontal, &mut grid, &mut delay).unwrap();

        assert_eq!(life.tick(&mut grid, &mut delay).unwrap(), TickOutcome::Evolved);
        assert_eq!(life.tick(&mut grid, &mut delay).unwrap(), TickOutcome::Converged);
        assert_eq!(life.alive(), &horizontal);
    }

    #[test]
    fn test_empty_board_converges() {
        let mut grid = test_grid();
        let mut delay = MockDelay::default();
        let mut life =
            Life::with_state(StdRng::seed_from_u64(2), state(&[]), &mut grid, &mut delay).unwrap();
        assert_eq!(life.tick(&mut grid, &mut delay).unwrap(), TickOutcome::Converged);
    }

    #[test]
    fn test_history_keeps_four_states() {
        let mut grid = test_grid();
        let mut delay = MockDelay::default();
        // A glider needs 4 generations to repeat its shape, shifted, so it
        // never matches its own history on an open board
        let glider = state(&[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)]);
        let mut life =
            Life::with_state(StdRng::seed_from_u64(17), glider, &mut grid, &mut delay).unwrap();

        for _ in 0..6 {
            assert_eq!(life.tick(&mut grid, &mut delay).unwrap(), TickOutcome::Evolved);
        }
        assert_eq!(life.history_len(), HISTORY_LEN);
    }
}
