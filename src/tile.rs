//! Partitioning of the output buffer into rectangular tiles.
//!
//! Each [`Tile`] owns mutable borrows of exactly the row spans it covers, so
//! tiles can be handed to different threads without any locking on the
//! buffer itself.

use crate::prelude::*;

/// A `block_size_x × block_size_y` rectangle of the image. Tiles on the right
/// and bottom edges are clamped to the pixels that remain.
pub struct Tile<'a> {
    /// Tile column and row in the tile grid.
    pub col: usize,
    pub row: usize,
    /// Position in FIFO dispatch order (row-major over the tile grid).
    pub index: usize,
    /// Image coordinates of the top-left pixel.
    pub x0: usize,
    pub y0: usize,
    rows: Vec<&'a mut [Color]>,
}

impl<'a> Tile<'a> {
    fn empty(col: usize, row: usize, index: usize, x0: usize, y0: usize) -> Self {
        Self {
            col,
            row,
            index,
            x0,
            y0,
            rows: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, |r| r.len())
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn pixel_count(&self) -> usize {
        self.width() * self.height()
    }

    /// Writes the pixel at tile-local coordinates.
    pub fn set(&mut self, local_x: usize, local_y: usize, color: Color) {
        self.rows[local_y][local_x] = color;
    }

    pub fn get(&self, local_x: usize, local_y: usize) -> Color {
        self.rows[local_y][local_x]
    }
}

/// Splits a row-major buffer of `image_width`-wide rows into tiles, ordered
/// row by row over the tile grid. The tiles cover every pixel exactly once.
pub fn split_into_tiles(
    pixels: &mut [Color],
    image_width: usize,
    block_size_x: usize,
    block_size_y: usize,
) -> Vec<Tile<'_>> {
    assert!(
        image_width > 0 && block_size_x > 0 && block_size_y > 0,
        "tile grid dimensions must be non-zero"
    );
    let image_height = pixels.len().div_ceil(image_width);
    let tiles_x = image_width.div_ceil(block_size_x);
    let tiles_y = image_height.div_ceil(block_size_y);

    let mut tiles: Vec<Tile<'_>> = (0..tiles_y)
        .flat_map(|row| {
            (0..tiles_x).map(move |col| {
                Tile::empty(
                    col,
                    row,
                    row * tiles_x + col,
                    col * block_size_x,
                    row * block_size_y,
                )
            })
        })
        .collect();

    for (y, line) in pixels.chunks_mut(image_width).enumerate() {
        let row = y / block_size_y;
        for (col, span) in line.chunks_mut(block_size_x).enumerate() {
            tiles[row * tiles_x + col].rows.push(span);
        }
    }

    tiles
}
