// mapper.rs - Pixel <-> cell coordinate conversion

/// Converts between display pixels and grid indices for a grid of
/// `rows` × `columns` cells stretched over `display` pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    rows    : usize,
    columns : usize,
    display : [usize; 2],    // [width, height]
}

impl CoordinateMapper {
    pub fn new(rows: usize, columns: usize, display: [usize; 2]) -> Self {
        Self { rows, columns, display }
    }

    pub fn column_width(&self) -> f64 {
        self.display[0] as f64 / self.columns as f64
    }

    pub fn row_height(&self) -> f64 {
        self.display[1] as f64 / self.rows as f64
    }

    /// Column containing pixel `x`.
    ///
    /// Anything at or past the last column returns `columns`, one past the last
    /// valid index, and negative `x` gives a negative column. Range-check before
    /// indexing.
    pub fn pixel_to_column(&self, x: f32) -> isize {
        to_index(x, self.column_width(), self.columns)
    }

    /// Row containing pixel `y`; clamps to `rows` like [`Self::pixel_to_column`].
    pub fn pixel_to_row(&self, y: f32) -> isize {
        to_index(y, self.row_height(), self.rows)
    }

    /// Left edge of column `col`, rounded to the nearest pixel.
    pub fn column_to_pixel(&self, col: usize) -> usize {
        (self.column_width() * col as f64).round() as usize
    }

    /// Top edge of row `row`, rounded to the nearest pixel.
    pub fn row_to_pixel(&self, row: usize) -> usize {
        (self.row_height() * row as f64).round() as usize
    }

    /// The in-bounds cell under `(x, y)` as `(row, col)`, if any.
    pub fn cell_at(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        let row = self.pixel_to_row(y);
        let col = self.pixel_to_column(x);
        let in_range = |i: isize, len: usize| i >= 0 && (i as usize) < len;

        (in_range(row, self.rows) && in_range(col, self.columns)).then(|| (row as usize, col as usize))
    }
}

fn to_index(pixel: f32, cell_size: f64, count: usize) -> isize {
    if cell_size <= 0.0 {
        // Nothing is on screen; report past-the-end so callers reject it.
        return count as isize;
    }
    let index = (pixel as f64 / cell_size).floor() as isize;
    if index >= count as isize { count as isize } else { index }
}
