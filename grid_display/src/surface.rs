// surface.rs - Off-screen color raster for a grid of cells

use crate::CoordinateMapper;
use egui::{Color32, ColorImage};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// How per-cell color changes reach the raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaintMode {
    /// Every `set_color` rasterizes its cell straight away (autopaint on).
    #[default]
    Immediate,
    /// Colors are only buffered; switching back to `Immediate` redraws everything.
    Deferred,
}

/// A rectangle in raster pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x      : usize,
    pub y      : usize,
    pub width  : usize,
    pub height : usize,
}

/// What the display needs to re-read from the raster since it last asked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Repaint {
    #[default]
    Idle,
    Cells(Vec<PixelRect>),
    Full,
}

impl Repaint {
    fn add_region(&mut self, rect: PixelRect) {
        match self {
            Repaint::Full => {}
            Repaint::Cells(rects) => rects.push(rect),
            Repaint::Idle => *self = Repaint::Cells(vec![rect]),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Repaint::Idle)
    }
}

/// Shared handle to the backing image.
///
/// Rasterization and readback go through the same lock, so a reader on another
/// thread never observes a half-drawn cell or a half-finished full redraw.
#[derive(Debug, Clone, Default)]
pub struct Raster {
    image: Arc<Mutex<Option<ColorImage>>>,
}

impl Raster {
    // Plain pixels; a panic mid-write leaves nothing worth refusing to read.
    fn lock(&self) -> MutexGuard<'_, Option<ColorImage>> {
        self.image.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// `[width, height]` of the image, or `None` before the first draw.
    pub fn size(&self) -> Option<[usize; 2]> {
        self.lock().as_ref().map(|image| image.size)
    }

    pub fn snapshot(&self) -> Option<ColorImage> {
        self.lock().clone()
    }

    #[cfg(test)]
    pub(crate) fn pixel(&self, x: usize, y: usize) -> Option<Color32> {
        let guard = self.lock();
        let image = guard.as_ref()?;
        let [width, height] = image.size;
        (x < width && y < height).then(|| image.pixels[y * width + x])
    }

    /// Copy of the part of `rect` that lies inside the image.
    pub fn region(&self, rect: PixelRect) -> Option<ColorImage> {
        let guard = self.lock();
        let image = guard.as_ref()?;
        let [width, height] = image.size;
        if rect.x >= width || rect.y >= height {
            return None;
        }

        let w = rect.width.min(width - rect.x);
        let h = rect.height.min(height - rect.y);
        let mut pixels = Vec::with_capacity(w * h);
        for y in rect.y..rect.y + h {
            let start = y * width + rect.x;
            pixels.extend_from_slice(&image.pixels[start..start + w]);
        }
        Some(ColorImage { size: [w, h], pixels })
    }
}

fn paint_rect(image: &mut ColorImage, rect: PixelRect, color: Color32) {
    let [width, height] = image.size;
    let x1 = (rect.x + rect.width).min(width);
    let y1 = (rect.y + rect.height).min(height);
    for y in rect.y.min(y1)..y1 {
        let row = y * width;
        image.pixels[row + rect.x.min(x1)..row + x1].fill(color);
    }
}

/// A rows × columns grid of colored cells drawn into an off-screen raster.
///
/// Colors are buffered per cell. The raster follows the display's pixel size:
/// it is (re)allocated by [`RenderSurface::draw`] whenever that size changes.
/// Each cell is a fixed `cell_extent` square placed at its rounded grid
/// position, so neighbouring cells may overlap by a pixel but never leave a gap.
#[derive(Debug)]
pub struct RenderSurface {
    rows              : usize,
    columns           : usize,
    cell_extent       : usize,
    default_color     : Color32,            // drawn for cells with no color
    colors            : Vec<Option<Color32>>,
    mode              : PaintMode,
    needs_full_redraw : bool,
    display_size      : [usize; 2],         // [width, height] in pixels
    raster            : Raster,
    repaint           : Repaint,
}

impl RenderSurface {
    /// # Panics
    ///
    /// Panics if `rows` or `columns` is zero.
    pub fn new(rows: usize, columns: usize, cell_extent: usize) -> Self {
        assert!(rows > 0 && columns > 0, "surface needs at least one cell");
        Self {
            rows,
            columns,
            cell_extent,
            default_color     : Color32::BLACK,
            colors            : vec![None; rows * columns],
            mode              : PaintMode::Immediate,
            needs_full_redraw : false,
            display_size      : [cell_extent * columns, cell_extent * rows],
            raster            : Raster::default(),
            repaint           : Repaint::Idle,
        }
    }

    pub fn with_default_color(mut self, color: Color32) -> Self {
        self.default_color = color;
        self
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Natural `[width, height]`: one `cell_extent` per cell.
    pub fn preferred_size(&self) -> [usize; 2] {
        [self.cell_extent * self.columns, self.cell_extent * self.rows]
    }

    pub fn display_size(&self) -> [usize; 2] {
        self.display_size
    }

    pub fn mode(&self) -> PaintMode {
        self.mode
    }

    pub fn autopaint(&self) -> bool {
        self.mode == PaintMode::Immediate
    }

    pub fn needs_full_redraw(&self) -> bool {
        self.needs_full_redraw
    }

    pub fn raster(&self) -> Raster {
        self.raster.clone()
    }

    pub fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(self.rows, self.columns, self.display_size)
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.columns).then(|| row * self.columns + col)
    }

    /// Buffered color; `None` for absent colors and out-of-range cells.
    pub fn color(&self, row: usize, col: usize) -> Option<Color32> {
        self.index(row, col).and_then(|i| self.colors[i])
    }

    /// Sets one cell's color (`None` clears it). Out-of-range cells are ignored.
    pub fn set_color(&mut self, row: usize, col: usize, color: Option<Color32>) {
        let Some(i) = self.index(row, col) else {
            return;
        };
        self.colors[i] = color;

        if self.raster.size().is_none() {
            self.repaint = Repaint::Full;
        } else if self.mode == PaintMode::Immediate {
            if let Some(rect) = self.draw_cell(row, col) {
                self.repaint.add_region(rect);
            }
        }
    }

    pub fn set_mode(&mut self, mode: PaintMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        if mode == PaintMode::Immediate {
            self.force_redraw();
        }
    }

    pub fn set_autopaint(&mut self, autopaint: bool) {
        self.set_mode(if autopaint { PaintMode::Immediate } else { PaintMode::Deferred });
    }

    /// Gives every cell `color` and redraws at once, whatever the paint mode.
    pub fn fill(&mut self, color: Option<Color32>) {
        self.colors.fill(color);
        self.force_redraw();
    }

    pub fn clear(&mut self) {
        self.fill(None);
    }

    /// Redraws every cell now if a raster exists, otherwise on the next draw.
    pub fn force_redraw(&mut self) {
        self.needs_full_redraw = true;
        self.repaint = Repaint::Full;
        if self.raster.size().is_some() {
            self.refresh();
        }
    }

    /// Records a new display size. The raster is reallocated on the next draw;
    /// until then cells keep being placed for the raster's current size.
    pub fn resize(&mut self, display_size: [usize; 2]) {
        if display_size != self.display_size {
            self.display_size = display_size;
            self.needs_full_redraw = true;
        }
    }

    /// Brings the raster up to date for `display_size` and hands it out.
    pub fn draw(&mut self, display_size: [usize; 2]) -> Raster {
        self.display_size = display_size;
        self.refresh();
        self.raster.clone()
    }

    /// Takes the pending repaint request, leaving `Repaint::Idle`.
    pub fn take_repaint(&mut self) -> Repaint {
        std::mem::take(&mut self.repaint)
    }

    /// Pixel rectangle of a cell on an image of `size` pixels.
    fn cell_rect(&self, row: usize, col: usize, size: [usize; 2]) -> PixelRect {
        let mapper = CoordinateMapper::new(self.rows, self.columns, size);
        PixelRect {
            x      : mapper.column_to_pixel(col),
            y      : mapper.row_to_pixel(row),
            width  : self.cell_extent,
            height : self.cell_extent,
        }
    }

    fn cell_color(&self, i: usize) -> Color32 {
        self.colors[i].unwrap_or(self.default_color)
    }

    /// Rasterizes one cell. Returns the pixel rectangle it covers, or `None`
    /// when the cell is out of range or there is no raster yet.
    pub fn draw_cell(&self, row: usize, col: usize) -> Option<PixelRect> {
        let i = self.index(row, col)?;
        let mut guard = self.raster.lock();
        let image = guard.as_mut()?;
        let rect = self.cell_rect(row, col, image.size);
        paint_rect(image, rect, self.cell_color(i));
        Some(rect)
    }

    fn refresh(&mut self) {
        let mut guard = self.raster.lock();

        if guard.as_ref().is_none_or(|image| image.size != self.display_size) {
            log::debug!(
                "allocating {}x{} raster",
                self.display_size[0],
                self.display_size[1]
            );
            *guard = Some(ColorImage::new(self.display_size, self.default_color));
            self.needs_full_redraw = true;
            self.repaint = Repaint::Full;
        }

        if self.needs_full_redraw {
            if let Some(image) = guard.as_mut() {
                let size = image.size;
                for row in 0..self.rows {
                    for col in 0..self.columns {
                        let i = row * self.columns + col;
                        paint_rect(image, self.cell_rect(row, col, size), self.cell_color(i));
                    }
                }
            }
            self.needs_full_redraw = false;
        }
    }
}
