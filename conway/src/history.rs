use crate::CellGrid;

const HISTORY_LEN: usize = 10;

/// Ring of the last few grid fingerprints, used to notice when a running
/// simulation has settled into a still life or a short oscillation.
#[derive(Debug, Clone, Default)]
pub struct CycleHistory {
    hashes : [u64; HISTORY_LEN],
    count  : usize,    // total fingerprints recorded; ring slot is count % HISTORY_LEN
}

impl CycleHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the grid's current state. Returns true if the same state was
    /// seen within the last `HISTORY_LEN` recorded generations.
    pub fn check(&mut self, grid: &CellGrid) -> bool {
        let hash = grid.fingerprint();
        let seen = self.count.min(HISTORY_LEN);
        if self.hashes[..seen].contains(&hash) {
            return true;
        }

        self.hashes[self.count % HISTORY_LEN] = hash;
        self.count += 1;
        false
    }

    pub fn clear(&mut self) {
        self.hashes = [0; HISTORY_LEN];
        self.count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid_repeats_after_one_step() {
        let mut grid = CellGrid::new(6);
        let mut history = CycleHistory::new();
        assert!(!history.check(&grid));
        grid.step();
        assert!(history.check(&grid));
    }

    #[test]
    fn test_fresh_history_ignores_unfilled_slots() {
        // An all-zero slot must not match a state that was never recorded.
        let grid = CellGrid::new(3);
        let mut history = CycleHistory::new();
        assert!(!history.check(&grid));
    }

    #[test]
    fn test_clear_forgets() {
        let grid = CellGrid::new(4);
        let mut history = CycleHistory::new();
        history.check(&grid);
        history.clear();
        assert!(!history.check(&grid));
    }

    #[test]
    fn test_changing_states_are_not_cycles() {
        let mut grid = CellGrid::new(8);
        let mut history = CycleHistory::new();
        for i in 0..5 {
            grid.set_cell(i, i, true);
            assert!(!history.check(&grid));
        }
    }
}
