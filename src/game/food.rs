use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::grid::{Cell, Grid};
use super::state::Snake;

/// Cosmetic kind of a food item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoodVariant {
    Apple,
    Cherry,
    Berry,
    Golden,
}

impl FoodVariant {
    pub const ALL: [FoodVariant; 4] = [
        FoodVariant::Apple,
        FoodVariant::Cherry,
        FoodVariant::Berry,
        FoodVariant::Golden,
    ];
}

/// Food on the board. Replaced on consumption, never moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodItem {
    pub cell: Cell,
    pub variant: FoodVariant,
}

impl FoodItem {
    pub fn new(cell: Cell, variant: FoodVariant) -> Self {
        Self { cell, variant }
    }
}

/// Picks free cells for food, uniformly over the cells the snake leaves open
pub struct FoodPlacer {
    rng: StdRng,
}

impl FoodPlacer {
    /// Above this share of occupied cells, free cells are enumerated instead of sampled
    const CROWDED_NUMERATOR: usize = 4;
    const CROWDED_DENOMINATOR: usize = 5;

    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Place food on a free cell.
    ///
    /// Returns `None` when the snake covers the whole grid.
    pub fn place(&mut self, grid: &Grid, snake: &Snake) -> Option<FoodItem> {
        let cell = self.free_cell(grid, snake)?;
        let variant = FoodVariant::ALL[self.rng.gen_range(0..FoodVariant::ALL.len())];
        Some(FoodItem::new(cell, variant))
    }

    fn free_cell(&mut self, grid: &Grid, snake: &Snake) -> Option<Cell> {
        let total = grid.cell_count();
        let occupied = snake.cells().filter(|c| grid.contains(**c)).count();

        if occupied >= total {
            return None;
        }

        if occupied * Self::CROWDED_DENOMINATOR > total * Self::CROWDED_NUMERATOR {
            let free: Vec<Cell> = grid.cells().filter(|c| !snake.contains(*c)).collect();
            return free.choose(&mut self.rng).copied();
        }

        // At least a fifth of the board is free, so this ends quickly
        let n = grid.size() as i32;
        loop {
            let cell = Cell::new(self.rng.gen_range(0..n), self.rng.gen_range(0..n));
            if !snake.contains(cell) {
                return Some(cell);
            }
        }
    }
}

impl Default for FoodPlacer {
    fn default() -> Self {
        Self::new()
    }
}
