use qrsvg_core::ModuleMatrix;

use crate::draw::Rect;
use crate::Color;

/// Side length of one module when a `dimension`-wide matrix is drawn `size` wide. `None` for an empty matrix.
/// # Example
/// ```
/// use qrsvg_render::raster::pixel_size;
/// assert_eq!(pixel_size(30.0, 3), Some(10.0));
/// assert_eq!(pixel_size(100.0, 21), Some(100.0 / 21.0));
/// assert_eq!(pixel_size(100.0, 0), None);
/// ```
pub fn pixel_size(size: f64, dimension: usize) -> Option<f64> {
    (dimension > 0).then(|| size / dimension as f64)
}

/// Rectangle covering the whole drawing.
pub fn background(size: f64, fill: &Color) -> Rect {
    Rect {
        x: 0.0,
        y: 0.0,
        width: size,
        height: size,
        fill: fill.normalized(),
    }
}

/// Convert every dark module of `matrix` into a square, row by row, for a drawing of side `size`. Light modules
/// produce nothing: the background shows through.
pub fn rasterize(matrix: &ModuleMatrix, size: f64, fill: &Color) -> Vec<Rect> {
    let Some(pixel) = pixel_size(size, matrix.size()) else {
        return Vec::new();
    };
    let fill = fill.normalized();
    matrix
        .dark_positions()
        .map(|(row, column)| Rect {
            x: column as f64 * pixel,
            y: row as f64 * pixel,
            width: pixel,
            height: pixel,
            fill: fill.clone(),
        })
        .collect()
}
