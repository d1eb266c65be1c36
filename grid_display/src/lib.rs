//! Off-screen raster for a grid of colored cells, plus pixel/cell mapping.

pub mod mapper;
pub mod surface;

pub use mapper::CoordinateMapper;
pub use surface::{PaintMode, PixelRect, Raster, RenderSurface, Repaint};
