// ui.rs - eframe front end: controls, board texture and pointer editing

use crate::app::{GameOfLife, GameOfLifeInterface};
use conway::PATTERNS;
use eframe::egui;
use egui::{Color32, Rect, Stroke, TextureOptions, Vec2};
use grid_display::Repaint;
use std::time::Duration;

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // At most one generation per frame; late ticks are not replayed
        if self.ticker.take_tick() && self.is_running() {
            self.next_generation();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Conway's Game Of Life");

            // Controls
            ui.horizontal(|ui| {
                let running = self.is_running();
                let button_text = if running { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.toggle_running(ctx);
                }

                // Anything that edits the board waits until the simulation is paused
                if ui.add_enabled(!running, egui::Button::new("⏭ One Step")).clicked() {
                    self.next_generation();
                }

                if ui.add_enabled(!running, egui::Button::new("🎲 Randomise")).clicked() {
                    self.randomize();
                }

                if ui.add_enabled(!running, egui::Button::new("⏹ Reset")).clicked() {
                    self.reset();
                }

                if ui.button("Quit").clicked() {
                    log::info!("quit requested");
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }

                ui.separator();

                ui.label(format!("Generation Count: {}", self.grid.generation()));
            });

            ui.separator();

            ui.horizontal(|ui| {
                let running = self.is_running();

                // Pattern dropdown
                ui.label("Pattern:");
                let selected = PATTERNS.get(self.selected_pattern).map_or("", |p| p.name);
                egui::ComboBox::from_id_source("pattern_selector")
                    .selected_text(selected)
                    .show_ui(ui, |ui| {
                        for (i, pattern) in PATTERNS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_pattern, i, pattern.name);
                        }
                    });

                if ui.add_enabled(!running, egui::Button::new("Apply Pattern")).clicked() {
                    self.apply_selected_pattern();
                }

                ui.separator();

                // Speed control
                ui.label("Speed:");
                let mut speed = 1000.0 / self.ticker.interval().as_millis().max(1) as f32;
                if ui.add(egui::Slider::new(&mut speed, 0.5..=60.0).suffix(" gen/sec")).changed() {
                    let interval = Duration::from_millis((1000.0 / speed).max(1.0) as u64);
                    let waker = ctx.clone();
                    self.ticker.set_interval(interval, move || waker.request_repaint());
                }
            });

            ui.separator();

            ui.label("Click or drag to bring cells to life, Ctrl+click to kill them (while paused).");

            self.board(ui);

            ui.separator();

            // Statistics
            let total = self.grid.size() * self.grid.size();
            let live_cells = self.grid.population();
            ui.horizontal(|ui| {
                ui.label(format!("Live cells: {}", live_cells));
                ui.label(format!("Dead cells: {}", total - live_cells));
                ui.label(format!("Population: {:.1}%", live_cells as f32 / total as f32 * 100.0));
            });
        });
    }
}

impl GameOfLife {
    fn board(&mut self, ui: &mut egui::Ui) {
        let [width, height] = self.surface.preferred_size();
        let desired = Vec2::new(width as f32, height as f32);
        let (response, painter) = ui.allocate_painter(desired, egui::Sense::click_and_drag());
        let rect = response.rect;

        // Pointer edits land before the raster is refreshed for this frame
        if !self.is_running() && response.is_pointer_button_down_on() {
            if let Some(pos) = response.interact_pointer_pos() {
                let local = pos - rect.min;
                if let Some((row, col)) = self.surface.mapper().cell_at(local.x, local.y) {
                    let kill = ui.input(|i| i.modifiers.ctrl);
                    self.paint_cell(row, col, !kill);
                }
            }
        }

        self.surface.draw([rect.width().round() as usize, rect.height().round() as usize]);
        self.upload_texture(ui.ctx());

        if let Some(texture) = &self.texture {
            let uv = Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
            painter.image(texture.id(), rect, uv, Color32::WHITE);
        }
        painter.rect_stroke(rect.expand(3.0), 0.0, Stroke::new(5.0, Color32::YELLOW));
    }

    /// Copies whatever the surface repainted into the GPU texture.
    fn upload_texture(&mut self, ctx: &egui::Context) {
        let repaint = self.surface.take_repaint();
        let raster = self.surface.raster();

        match (&mut self.texture, repaint) {
            (Some(_), Repaint::Idle) => {}
            (Some(texture), Repaint::Cells(rects)) => {
                for rect in rects {
                    if let Some(region) = raster.region(rect) {
                        texture.set_partial([rect.x, rect.y], region, TextureOptions::NEAREST);
                    }
                }
            }
            (texture, _) => {
                let Some(image) = raster.snapshot() else {
                    return;
                };
                match texture {
                    Some(texture) => texture.set(image, TextureOptions::NEAREST),
                    None => *texture = Some(ctx.load_texture("board", image, TextureOptions::NEAREST)),
                }
            }
        }
    }
}
