//! Sprites and sprite sheets.

/// A fixed rectangular bitmap with one occupancy bit per cell.
///
/// Sprites are immutable for the lifetime of a run: they are owned by the
/// problem setup and shared read-only by every candidate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Sprite {
    /// Creates a sprite from a row-major bitmap.
    ///
    /// # Panics
    ///
    /// Panics if the bitmap does not hold exactly `width * height` cells, or
    /// if either dimension is zero.
    #[must_use]
    pub fn from_bits(width: usize, height: usize, cells: Vec<bool>) -> Self {
        assert!(width > 0 && height > 0, "sprite dimensions must be positive");
        assert_eq!(cells.len(), width * height, "sprite bitmap size mismatch");
        Self {
            width,
            height,
            cells,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn is_occupied(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x]
    }

    /// Iterates over the `(x, y)` offsets of occupied cells, row by row.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).filter_map(move |x| self.is_occupied(x, y).then_some((x, y)))
        })
    }
}

/// The fixed set of sprites a packing problem places.
///
/// Also fixes the packing bounds: the grid is as wide as all sprites side by
/// side and as tall as all sprites stacked, so any placement the encodings can
/// express fits.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    sprites: Vec<Sprite>,
    bounds: (usize, usize),
}

/// Sprite-sheet input that cannot describe a valid problem.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum SheetError {
    #[display("sprite sheet is empty")]
    Empty,
    #[display("index grid claims {width}x{height} cells but holds {len}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        len: usize,
    },
    #[display("sprite index {index} has no cells in the grid")]
    MissingIndex { index: u8 },
}

impl SpriteSheet {
    /// Builds a sheet from explicit sprites.
    pub fn from_sprites(sprites: Vec<Sprite>) -> Result<Self, SheetError> {
        if sprites.is_empty() {
            return Err(SheetError::Empty);
        }
        let width = sprites.iter().map(Sprite::width).sum();
        let height = sprites.iter().map(Sprite::height).sum();
        Ok(Self {
            sprites,
            bounds: (width, height),
        })
    }

    /// Builds a sheet from a pixel-index grid.
    ///
    /// Every cell of the row-major `indexes` grid names the sprite it belongs
    /// to; sprite `i` becomes the bitmap of its bounding box, with cells of
    /// other sprites inside that box left unoccupied. Every index up to the
    /// largest one present must occur at least once.
    pub fn from_index_grid(width: usize, height: usize, indexes: &[u8]) -> Result<Self, SheetError> {
        if indexes.len() != width * height {
            return Err(SheetError::DimensionMismatch {
                width,
                height,
                len: indexes.len(),
            });
        }
        let Some(max_index) = indexes.iter().max() else {
            return Err(SheetError::Empty);
        };
        let sprite_count = usize::from(*max_index) + 1;

        // bounding box per sprite index: (min_x, min_y, max_x, max_y)
        let mut boxes: Vec<Option<(usize, usize, usize, usize)>> = vec![None; sprite_count];
        for y in 0..height {
            for x in 0..width {
                let id = usize::from(indexes[y * width + x]);
                boxes[id] = Some(match boxes[id] {
                    Some((min_x, min_y, max_x, max_y)) => {
                        (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
                    }
                    None => (x, y, x, y),
                });
            }
        }

        let mut sprites = Vec::with_capacity(sprite_count);
        for (id, bounding_box) in boxes.iter().enumerate() {
            let Some((min_x, min_y, max_x, max_y)) = *bounding_box else {
                #[expect(clippy::cast_possible_truncation)]
                return Err(SheetError::MissingIndex { index: id as u8 });
            };
            let sprite_width = max_x - min_x + 1;
            let sprite_height = max_y - min_y + 1;
            let mut cells = Vec::with_capacity(sprite_width * sprite_height);
            for y in min_y..=max_y {
                for x in min_x..=max_x {
                    cells.push(usize::from(indexes[y * width + x]) == id);
                }
            }
            sprites.push(Sprite::from_bits(sprite_width, sprite_height, cells));
        }
        Self::from_sprites(sprites)
    }

    #[must_use]
    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Packing area dimensions: the sum of all sprite widths by the sum of all
    /// sprite heights.
    #[must_use]
    pub fn packing_bounds(&self) -> (usize, usize) {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index_grid_extracts_bitmaps() {
        #[rustfmt::skip]
        let indexes = [
            0, 0, 1, 1,
            0, 0, 1, 1,
            2, 2, 2, 2,
        ];
        let sheet = SpriteSheet::from_index_grid(4, 3, &indexes).unwrap();
        assert_eq!(sheet.len(), 3);
        assert_eq!(sheet.packing_bounds(), (2 + 2 + 4, 2 + 2 + 1));

        let sprites = sheet.sprites();
        assert_eq!((sprites[0].width(), sprites[0].height()), (2, 2));
        assert_eq!((sprites[1].width(), sprites[1].height()), (2, 2));
        assert_eq!((sprites[2].width(), sprites[2].height()), (4, 1));
        assert!(sprites.iter().all(|sprite| {
            (0..sprite.height()).all(|y| (0..sprite.width()).all(|x| sprite.is_occupied(x, y)))
        }));
    }

    #[test]
    fn test_from_index_grid_masks_foreign_cells() {
        // sprite 0's bounding box spans the whole row; the cell belonging to
        // sprite 1 must stay unoccupied in sprite 0's bitmap
        let sheet = SpriteSheet::from_index_grid(3, 1, &[0, 1, 0]).unwrap();
        let zero = &sheet.sprites()[0];
        assert_eq!((zero.width(), zero.height()), (3, 1));
        assert_eq!(
            zero.occupied_cells().collect::<Vec<_>>(),
            vec![(0, 0), (2, 0)]
        );

        let one = &sheet.sprites()[1];
        assert_eq!((one.width(), one.height()), (1, 1));
        assert!(one.is_occupied(0, 0));
    }

    #[test]
    fn test_from_index_grid_rejects_gaps() {
        // index 1 never occurs even though index 2 does
        let err = SpriteSheet::from_index_grid(2, 1, &[0, 2]).unwrap_err();
        assert!(matches!(err, SheetError::MissingIndex { index: 1 }));
    }

    #[test]
    fn test_from_index_grid_rejects_bad_dimensions() {
        assert!(matches!(
            SpriteSheet::from_index_grid(3, 2, &[0, 0, 0]),
            Err(SheetError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            SpriteSheet::from_index_grid(0, 0, &[]),
            Err(SheetError::Empty)
        ));
    }

    #[test]
    fn test_occupied_cells_order() {
        let sprite = Sprite::from_bits(2, 2, vec![true, false, false, true]);
        assert_eq!(
            sprite.occupied_cells().collect::<Vec<_>>(),
            vec![(0, 0), (1, 1)]
        );
    }
}
