// grid.rs - Toroidal cell grid and the generation step

use rand::Rng;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Exact number of live neighbours that brings a cell to life.
pub const BIRTH_NEIGHBORS: usize = 3;

/// An n×n grid of live/dead cells whose edges wrap around.
///
/// Only the birth clause is applied on each step: a cell is alive in the next
/// generation iff it has exactly [`BIRTH_NEIGHBORS`] live neighbours, whatever
/// its current state. Live cells with two neighbours do not survive.
#[derive(Debug, Clone)]
pub struct CellGrid {
    size       : usize,
    cells      : Vec<bool>,    // row-major, size * size
    next       : Vec<bool>,    // scratch buffer swapped in by step()
    generation : u64,
}

impl CellGrid {
    /// Creates an all-dead grid of `size` × `size` cells.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "grid size must be at least 1");
        Self {
            size,
            cells      : vec![false; size * size],
            next       : vec![false; size * size],
            generation : 0,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.size && col < self.size).then(|| row * self.size + col)
    }

    /// Cell state; anything outside the grid reads as dead.
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.index(row, col).is_some_and(|i| self.cells[i])
    }

    /// Sets a single cell. Coordinates outside the grid are ignored.
    pub fn set_cell(&mut self, row: usize, col: usize, alive: bool) {
        if let Some(i) = self.index(row, col) {
            self.cells[i] = alive;
        }
    }

    /// The 8 Moore neighbours of `(row, col)`, wrapping at every edge.
    pub fn neighbors(&self, row: usize, col: usize) -> [(usize, usize); 8] {
        let n = self.size;
        let above = if row == 0 { n - 1 } else { row - 1 };
        let below = if row + 1 >= n { 0 } else { row + 1 };
        let left  = if col == 0 { n - 1 } else { col - 1 };
        let right = if col + 1 >= n { 0 } else { col + 1 };

        [
            (above, left), (above, col), (above, right),
            (row,   left),               (row,   right),
            (below, left), (below, col), (below, right),
        ]
    }

    pub fn live_neighbors(&self, row: usize, col: usize) -> usize {
        self.neighbors(row, col)
            .iter()
            .filter(|&&(nr, nc)| self.cells[nr * self.size + nc])
            .count()
    }

    /// Advances one generation.
    pub fn step(&mut self) {
        let n = self.size;
        for row in 0..n {
            for col in 0..n {
                self.next[row * n + col] = self.live_neighbors(row, col) == BIRTH_NEIGHBORS;
            }
        }

        std::mem::swap(&mut self.cells, &mut self.next);
        self.generation += 1;

        log::debug!(
            "generation {} computed, population {}",
            self.generation,
            self.population()
        );
    }

    /// Kills every cell and sets the generation back to 0.
    pub fn reset(&mut self) {
        self.cells.fill(false);
        self.generation = 0;
    }

    /// Makes each cell alive independently with the given probability.
    /// The generation counter is left alone.
    pub fn randomize<R: Rng>(&mut self, probability: f64, rng: &mut R) {
        for cell in &mut self.cells {
            *cell = rng.gen_range(0.0..1.0) < probability;
        }
    }

    pub fn population(&self) -> usize {
        self.live_cells().count()
    }

    /// Iterator over the coordinates of every live cell, row by row.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let n = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(move |(i, _)| (i / n, i % n))
    }

    /// Hash of the cell states, used to spot repeating generations.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.cells.hash(&mut hasher);
        hasher.finish()
    }
}

// The scratch buffer carries no state between steps.
impl PartialEq for CellGrid {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.generation == other.generation && self.cells == other.cells
    }
}

impl Eq for CellGrid {}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::BTreeSet;

    fn alive_set(grid: &CellGrid) -> BTreeSet<(usize, usize)> {
        grid.live_cells().collect()
    }

    #[test]
    fn test_new_grid_is_dead() {
        let grid = CellGrid::new(7);
        assert_eq!(grid.size(), 7);
        assert_eq!(grid.generation(), 0);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    #[should_panic]
    fn test_zero_size_rejected() {
        let _ = CellGrid::new(0);
    }

    #[test]
    fn test_neighbors_wrap_at_origin() {
        for n in [3, 5, 10] {
            let grid = CellGrid::new(n);
            let neighbors = grid.neighbors(0, 0);
            assert!(neighbors.contains(&(n - 1, 0)));
            assert!(neighbors.contains(&(0, n - 1)));
            assert!(neighbors.contains(&(n - 1, n - 1)));
            assert!(neighbors.contains(&(1, 1)));
            assert!(!neighbors.contains(&(0, 0)));
        }
    }

    #[test]
    fn test_neighbors_wrap_at_far_corner() {
        let grid = CellGrid::new(6);
        let neighbors = grid.neighbors(5, 5);
        assert!(neighbors.contains(&(0, 0)));
        assert!(neighbors.contains(&(0, 5)));
        assert!(neighbors.contains(&(5, 0)));
        assert!(neighbors.contains(&(4, 4)));
    }

    #[test]
    fn test_single_cell_grid_counts_itself() {
        let mut grid = CellGrid::new(1);
        grid.set_cell(0, 0, true);
        assert_eq!(grid.live_neighbors(0, 0), 8);
        grid.step();
        assert!(!grid.is_alive(0, 0));
    }

    #[test]
    fn test_birth_only_rule_for_every_count() {
        // Neighbours of (2, 2) on a 5x5 grid, filled in order.
        let ring = [(1, 1), (1, 2), (1, 3), (2, 1), (2, 3), (3, 1), (3, 2), (3, 3)];

        for count in 0..=8 {
            for center_alive in [false, true] {
                let mut grid = CellGrid::new(5);
                grid.set_cell(2, 2, center_alive);
                for &(r, c) in &ring[..count] {
                    grid.set_cell(r, c, true);
                }
                assert_eq!(grid.live_neighbors(2, 2), count);

                grid.step();
                assert_eq!(
                    grid.is_alive(2, 2),
                    count == BIRTH_NEIGHBORS,
                    "count {count}, center alive {center_alive}"
                );
            }
        }
    }

    #[test]
    fn test_live_cell_with_two_neighbors_dies() {
        // Canonical Life would keep (2, 2); the birth-only rule does not.
        let mut grid = CellGrid::new(5);
        grid.set_cell(2, 2, true);
        grid.set_cell(2, 1, true);
        grid.set_cell(2, 3, true);
        grid.step();
        assert!(!grid.is_alive(2, 2));
    }

    #[test]
    fn test_blinker_under_birth_only_rule() {
        let mut grid = CellGrid::new(5);
        for col in 1..=3 {
            grid.set_cell(2, col, true);
        }

        // Only (1, 2) and (3, 2) see exactly three live cells.
        grid.step();
        assert_eq!(alive_set(&grid), BTreeSet::from([(1, 2), (3, 2)]));

        // Two cells can never give anyone three neighbours.
        grid.step();
        assert!(alive_set(&grid).is_empty());
        assert_eq!(grid.generation(), 2);
    }

    #[test]
    fn test_birth_across_the_seam() {
        let mut grid = CellGrid::new(5);
        grid.set_cell(4, 4, true);
        grid.set_cell(4, 0, true);
        grid.set_cell(0, 4, true);
        grid.step();
        assert!(grid.is_alive(0, 0));
    }

    #[test]
    fn test_generation_counts_steps_until_reset() {
        let mut grid = CellGrid::new(4);
        for expected in 1..=5 {
            grid.step();
            assert_eq!(grid.generation(), expected);
        }
        grid.set_cell(1, 1, true);
        assert_eq!(grid.generation(), 5);

        grid.reset();
        assert_eq!(grid.generation(), 0);
        assert_eq!(grid.population(), 0);
        assert_eq!(grid.size(), 4);
    }

    #[test]
    fn test_set_cell_out_of_range_is_ignored() {
        let mut grid = CellGrid::new(3);
        let before = grid.clone();
        grid.set_cell(3, 0, true);
        grid.set_cell(0, 3, true);
        grid.set_cell(usize::MAX, usize::MAX, true);
        assert_eq!(grid, before);
        assert!(!grid.is_alive(3, 0));
    }

    #[test]
    fn test_randomize_is_seeded_and_keeps_generation() {
        let mut a = CellGrid::new(40);
        let mut b = CellGrid::new(40);
        a.step();
        a.randomize(0.1, &mut StdRng::seed_from_u64(7));
        b.randomize(0.1, &mut StdRng::seed_from_u64(7));

        assert_eq!(a.generation(), 1);
        assert_eq!(alive_set(&a), alive_set(&b));

        // 1600 cells at 10%: roughly 160 live.
        let pop = a.population();
        assert!(pop > 60 && pop < 300, "population {pop}");
    }

    #[test]
    fn test_randomize_extremes() {
        let mut grid = CellGrid::new(10);
        let mut rng = StdRng::seed_from_u64(1);
        grid.randomize(1.0, &mut rng);
        assert_eq!(grid.population(), 100);
        grid.randomize(0.0, &mut rng);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_fingerprint_tracks_state() {
        let mut grid = CellGrid::new(5);
        let empty = grid.fingerprint();
        grid.set_cell(1, 1, true);
        assert_ne!(grid.fingerprint(), empty);
        grid.set_cell(1, 1, false);
        assert_eq!(grid.fingerprint(), empty);
    }
}
