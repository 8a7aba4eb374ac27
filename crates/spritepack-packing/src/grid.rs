//! Occupancy-grid fitness evaluation.
//!
//! A candidate placement is rasterized additively onto a cell-count grid:
//! every sprite adds one to each cell it covers, so counts above one are
//! overlap. One full scan then yields the bounding rectangle of occupied cells
//! and the total overlap, from which the score derives.

use spritepack_search::Score;

use crate::sprite::Sprite;

/// Position of a sprite's top-left corner on the packing grid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GridPos {
    pub x: usize,
    pub y: usize,
}

/// Overlap penalty formula.
///
/// Both historical variants are implemented; each makes one unit of overlap
/// outweigh any bounding-box improvement reachable from a near-feasible
/// placement, so the search eliminates overlap before it optimizes tightness.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum PenaltyKind {
    /// `max(width, height) * overlap`.
    MaxSide,
    /// `width * height * overlap`, the stronger variant.
    #[default]
    Area,
}

impl PenaltyKind {
    #[must_use]
    pub fn penalty(self, width: u64, height: u64, overlap: u64) -> u64 {
        match self {
            PenaltyKind::MaxSide => width.max(height) * overlap,
            PenaltyKind::Area => width * height * overlap,
        }
    }
}

/// Cell-count grid the placements are rasterized onto.
///
/// One grid is allocated per problem and reused as scratch space: it is
/// cleared at the start of every evaluation and is never shared between
/// evaluations.
#[derive(Debug, Clone)]
pub struct CellGrid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl CellGrid {
    /// Creates an empty grid.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Self {
            width,
            height,
            cells: vec![0; width * height],
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

    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Whether the sprite lies in the legal range at `pos` and covers no
    /// already-occupied cell. Unlike [`blit`](Self::blit) this is a total
    /// query: out-of-range offsets simply do not fit.
    #[must_use]
    pub fn fits(&self, sprite: &Sprite, pos: GridPos) -> bool {
        if pos.x + sprite.width() >= self.width || pos.y + sprite.height() >= self.height {
            return false;
        }
        sprite
            .occupied_cells()
            .all(|(x, y)| self.cells[(pos.y + y) * self.width + (pos.x + x)] == 0)
    }

    /// Rasterizes the sprite additively at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if the placement leaves the legal range; an out-of-bounds
    /// placement is a misconfigured evaluation, never something to score.
    pub fn blit(&mut self, sprite: &Sprite, pos: GridPos) {
        assert!(
            pos.x + sprite.width() < self.width && pos.y + sprite.height() < self.height,
            "sprite placement exceeds grid bounds"
        );
        for (x, y) in sprite.occupied_cells() {
            self.cells[(pos.y + y) * self.width + (pos.x + x)] += 1;
        }
    }

    /// Scans the grid once and scores it: bounding-box area of occupied cells
    /// plus the overlap penalty.
    #[must_use]
    pub fn measure(&self, penalty: PenaltyKind) -> Score {
        let mut bounding_box: Option<(usize, usize, usize, usize)> = None;
        let mut overlap: u64 = 0;
        for (index, &count) in self.cells.iter().enumerate() {
            if count == 0 {
                continue;
            }
            let (x, y) = (index % self.width, index / self.width);
            overlap += u64::from(count) - 1;
            bounding_box = Some(match bounding_box {
                Some((min_x, min_y, max_x, max_y)) => {
                    (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
                }
                None => (x, y, x, y),
            });
        }
        let Some((min_x, min_y, max_x, max_y)) = bounding_box else {
            return Score {
                score: 0,
                raw_score: 0,
                overlap: 0,
            };
        };
        let width = (max_x - min_x + 1) as u64;
        let height = (max_y - min_y + 1) as u64;
        let raw_score = width * height;
        Score {
            score: raw_score + penalty.penalty(width, height, overlap),
            raw_score,
            overlap,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(side: usize) -> Sprite {
        Sprite::from_bits(side, side, vec![true; side * side])
    }

    #[test]
    fn test_blit_accumulates_counts() {
        let mut grid = CellGrid::new(8, 8);
        grid.blit(&square(2), GridPos { x: 1, y: 1 });
        grid.blit(&square(2), GridPos { x: 2, y: 2 });

        // the two squares share exactly the cell at (2, 2)
        let score = grid.measure(PenaltyKind::Area);
        assert_eq!(score.overlap, 1);
        assert_eq!(score.raw_score, 3 * 3);
        assert_eq!(score.score, 9 + 9);
    }

    #[test]
    fn test_measure_bounding_box_ignores_empty_cells() {
        let mut grid = CellGrid::new(10, 10);
        grid.blit(&square(1), GridPos { x: 2, y: 3 });
        grid.blit(&square(1), GridPos { x: 6, y: 5 });

        let score = grid.measure(PenaltyKind::Area);
        assert_eq!(score.overlap, 0);
        assert_eq!(score.raw_score, (6 - 2 + 1) * (5 - 3 + 1));
        assert_eq!(score.score, score.raw_score);
    }

    #[test]
    fn test_tighter_feasible_placement_scores_lower() {
        let mut tight = CellGrid::new(12, 12);
        tight.blit(&square(2), GridPos { x: 0, y: 0 });
        tight.blit(&square(2), GridPos { x: 2, y: 0 });

        let mut loose = CellGrid::new(12, 12);
        loose.blit(&square(2), GridPos { x: 0, y: 0 });
        loose.blit(&square(2), GridPos { x: 6, y: 0 });

        for penalty in [PenaltyKind::Area, PenaltyKind::MaxSide] {
            assert!(tight.measure(penalty).score < loose.measure(penalty).score);
        }
    }

    #[test]
    fn test_overlap_dominates_equal_bounding_boxes() {
        // same 3x3 bounding box, one placement overlapping
        let mut feasible = CellGrid::new(12, 12);
        feasible.blit(&square(2), GridPos { x: 0, y: 0 });
        feasible.blit(&square(1), GridPos { x: 2, y: 2 });

        let mut overlapping = CellGrid::new(12, 12);
        overlapping.blit(&square(2), GridPos { x: 0, y: 0 });
        overlapping.blit(&square(2), GridPos { x: 1, y: 1 });
        overlapping.blit(&square(1), GridPos { x: 2, y: 2 });

        for penalty in [PenaltyKind::Area, PenaltyKind::MaxSide] {
            let bad = overlapping.measure(penalty);
            assert!(bad.overlap > 0);
            assert!(bad.score > feasible.measure(penalty).score);
        }
    }

    #[test]
    fn test_penalty_variants() {
        assert_eq!(PenaltyKind::MaxSide.penalty(4, 3, 2), 8);
        assert_eq!(PenaltyKind::Area.penalty(4, 3, 2), 24);
        assert_eq!(PenaltyKind::Area.penalty(4, 3, 0), 0);
    }

    #[test]
    fn test_fits_is_a_total_query() {
        let mut grid = CellGrid::new(6, 6);
        assert!(grid.fits(&square(2), GridPos { x: 3, y: 3 }));
        // touching the last row or column is out of the legal range
        assert!(!grid.fits(&square(2), GridPos { x: 4, y: 0 }));
        assert!(!grid.fits(&square(2), GridPos { x: 0, y: 4 }));

        grid.blit(&square(2), GridPos { x: 3, y: 3 });
        assert!(!grid.fits(&square(2), GridPos { x: 2, y: 2 }));
        assert!(grid.fits(&square(2), GridPos { x: 0, y: 0 }));
    }

    #[test]
    #[should_panic(expected = "exceeds grid bounds")]
    fn test_blit_rejects_out_of_range_placement() {
        let mut grid = CellGrid::new(4, 4);
        grid.blit(&square(2), GridPos { x: 3, y: 0 });
    }

    #[test]
    fn test_clear_resets_all_counts() {
        let mut grid = CellGrid::new(5, 5);
        grid.blit(&square(2), GridPos { x: 0, y: 0 });
        grid.clear();
        let score = grid.measure(PenaltyKind::Area);
        assert_eq!((score.score, score.raw_score, score.overlap), (0, 0, 0));
    }
}
