// app.rs - Game state behind the window: grid, render surface and tick source

use crate::ticker::Ticker;
use conway::{CellGrid, CycleHistory, PATTERNS, Settings, patterns};
use egui::Color32;
use grid_display::RenderSurface;
use rand::SeedableRng;
use rand::rngs::StdRng;

pub struct GameOfLife {
    pub grid             : CellGrid,
    pub surface          : RenderSurface,
    pub settings         : Settings,
    pub ticker           : Ticker,
    pub history          : CycleHistory,
    pub rng              : StdRng,
    pub live_color       : Color32,
    pub dead_color       : Color32,
    pub selected_pattern : usize,
    pub texture          : Option<egui::TextureHandle>,
}

impl GameOfLife {
    pub fn new(settings: Settings, ticker: Ticker) -> Self {
        let n = settings.grid_size;
        let rng = settings.seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        let dead_color = Color32::BLACK;

        Self {
            grid             : CellGrid::new(n),
            surface          : RenderSurface::new(n, n, settings.cell_extent)
                                   .with_default_color(dead_color),
            settings,
            ticker,
            history          : CycleHistory::new(),
            rng,
            live_color       : Color32::RED,
            dead_color,
            selected_pattern : 0,
            texture          : None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    /// Start or pause the periodic ticks. `ctx` is woken on every tick.
    pub fn toggle_running(&mut self, ctx: &egui::Context) {
        if self.ticker.is_running() {
            self.ticker.stop();
            log::info!("paused at generation {}", self.grid.generation());
        } else {
            let ctx = ctx.clone();
            self.ticker.start(move || ctx.request_repaint());
            log::info!("running every {:?}", self.ticker.interval());
        }
    }
}

/// Operations the UI drives on the game.
pub trait GameOfLifeInterface {
    fn next_generation(&mut self);
    fn show_board(&mut self);
    fn reset(&mut self);
    fn randomize(&mut self);
    fn apply_selected_pattern(&mut self);
    fn paint_cell(&mut self, row: usize, col: usize, alive: bool);
}

impl GameOfLifeInterface for GameOfLife {
    fn next_generation(&mut self) {
        self.grid.step();
        self.show_board();

        if self.history.check(&self.grid) && self.ticker.is_running() {
            self.ticker.stop();
            log::warn!(
                "generation {} repeats a recent state, pausing",
                self.grid.generation()
            );
        }
    }

    fn show_board(&mut self) {
        show_board(&self.grid, &mut self.surface, self.live_color, self.dead_color);
    }

    fn reset(&mut self) {
        self.grid.reset();
        self.surface.clear();
        self.history.clear();
        log::info!("board reset");
    }

    fn randomize(&mut self) {
        self.grid.randomize(self.settings.random_density, &mut self.rng);
        self.show_board();
        self.history.clear();
        log::info!(
            "board randomised at density {}, {} cells alive",
            self.settings.random_density,
            self.grid.population()
        );
    }

    fn apply_selected_pattern(&mut self) {
        if let Some(pattern) = PATTERNS.get(self.selected_pattern) {
            patterns::apply_pattern(&mut self.grid, pattern);
            self.show_board();
            self.history.clear();
            log::info!("loaded pattern {}", pattern.name);
        }
    }

    /// Pointer edit: the cell takes the live or dead color straight away.
    fn paint_cell(&mut self, row: usize, col: usize, alive: bool) {
        self.grid.set_cell(row, col, alive);
        let color = if alive { self.live_color } else { self.dead_color };
        self.surface.set_color(row, col, Some(color));
        self.history.clear();
    }
}

/// Writes every cell's color into the surface as one deferred batch, so the
/// raster is redrawn once instead of cell by cell.
pub fn show_board(grid: &CellGrid, surface: &mut RenderSurface, live: Color32, dead: Color32) {
    surface.set_autopaint(false);
    for row in 0..grid.size() {
        for col in 0..grid.size() {
            let color = if grid.is_alive(row, col) { live } else { dead };
            surface.set_color(row, col, Some(color));
        }
    }
    surface.set_autopaint(true);
}
