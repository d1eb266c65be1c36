// main.rs - Conway's Game of Life on a wrapping board
//
// Usage: conway_app [settings.json]

use eframe::egui;
use thiserror::Error;

mod app;
mod ticker;
mod ui;

use app::GameOfLife;
use conway::Settings;
use ticker::Ticker;

#[derive(Debug, Error)]
enum LaunchError {
    #[error("failed to start the tick runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("window error: {0}")]
    Window(String),
}

fn main() -> Result<(), LaunchError> {
    env_logger::init();

    let settings = load_settings();
    log::info!(
        "{0}x{0} board, {1} px cells, tick every {2} ms",
        settings.grid_size,
        settings.cell_extent,
        settings.tick_interval_ms
    );

    let ticker = Ticker::new(settings.tick_interval())?;
    let game = GameOfLife::new(settings, ticker);

    let [width, height] = game.surface.preferred_size();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([width as f32 + 40.0, height as f32 + 170.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game Of Life",
        options,
        Box::new(move |_cc| Box::new(game)),
    )
    .map_err(|err| LaunchError::Window(err.to_string()))
}

/// Settings from the JSON file named on the command line, or the defaults.
fn load_settings() -> Settings {
    let Some(path) = std::env::args().nth(1) else {
        return Settings::default();
    };

    match Settings::load(&path) {
        Ok(settings) => {
            log::info!("settings loaded from {path}");
            settings
        }
        Err(err) => {
            log::error!("{err}; falling back to defaults");
            Settings::default()
        }
    }
}
