//! Toroidal cellular automaton: the cell grid, its presets and settings.

pub mod grid;
pub mod history;
pub mod patterns;
pub mod settings;

pub use grid::{BIRTH_NEIGHBORS, CellGrid};
pub use history::CycleHistory;
pub use patterns::{PATTERNS, Pattern, apply_pattern};
pub use settings::{Settings, SettingsError};
