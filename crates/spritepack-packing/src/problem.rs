//! Sprite packing as a [`CandidateProblem`].
//!
//! One problem instance owns the sprite sheet, the configured encoding and
//! penalty, and the scratch occupancy grid. Evaluation rasterizes a genome's
//! placements onto the grid and scores it; all genetic operators dispatch on
//! the genome variant, so the hot evaluation loop needs no dynamic dispatch.

use std::io;

use rand::{Rng, seq::SliceRandom as _};
use spritepack_search::{CandidateProblem, Score};

use crate::{
    genome::{DirectionalGene, Genome, order_crossover},
    grid::{CellGrid, GridPos, PenaltyKind},
    sprite::{Sprite, SpriteSheet},
};

/// How a genome's genetic material is interpreted as placements.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum PlacementEncoding {
    /// Genes are absolute positions, read directly.
    #[default]
    Cartesian,
    /// Genes are a placement order plus a sweep direction; positions are
    /// resolved by a directional line search at evaluation time.
    Directional,
}

/// The sprite-packing problem: a fixed sprite sheet searched for a
/// tight, overlap-free arrangement.
#[derive(Debug)]
pub struct SpritePackingProblem {
    sheet: SpriteSheet,
    encoding: PlacementEncoding,
    penalty: PenaltyKind,
    // scratch buffer, cleared at the start of every evaluation
    grid: CellGrid,
}

impl SpritePackingProblem {
    /// Creates a problem over `sheet` with the packing area implied by it.
    ///
    /// # Panics
    ///
    /// Panics if any sprite is as large as the packing bounds on either axis;
    /// such a sprite would have no legal placement range.
    #[must_use]
    pub fn new(sheet: SpriteSheet, encoding: PlacementEncoding, penalty: PenaltyKind) -> Self {
        let (width, height) = sheet.packing_bounds();
        for sprite in sheet.sprites() {
            assert!(
                sprite.width() < width && sprite.height() < height,
                "sprite leaves no legal placement range within the packing bounds"
            );
        }
        Self {
            grid: CellGrid::new(width, height),
            sheet,
            encoding,
            penalty,
        }
    }

    #[must_use]
    pub fn sheet(&self) -> &SpriteSheet {
        &self.sheet
    }

    #[must_use]
    pub fn encoding(&self) -> PlacementEncoding {
        self.encoding
    }

    #[must_use]
    pub fn grid_size(&self) -> (usize, usize) {
        (self.grid.width(), self.grid.height())
    }

    /// Exclusive upper bounds of the legal position range for `sprite`.
    fn position_range(&self, sprite: &Sprite) -> (usize, usize) {
        (
            self.grid.width() - sprite.width(),
            self.grid.height() - sprite.height(),
        )
    }

    fn random_position<R>(&self, sprite: &Sprite, rng: &mut R) -> GridPos
    where
        R: Rng + ?Sized,
    {
        let (bound_x, bound_y) = self.position_range(sprite);
        GridPos {
            x: rng.random_range(0..bound_x),
            y: rng.random_range(0..bound_y),
        }
    }

    /// Resolves directional genes to concrete placements, in rank order.
    ///
    /// Each sprite walks an integer Bresenham line whose slope derives from
    /// its direction fraction and takes the first offset where it fits; if no
    /// offset on the line fits, the line's last offset clamped into the legal
    /// range. Every accepted placement is rasterized immediately so later
    /// sprites in the order see the earlier ones.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[expect(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
    fn place_directional(&mut self, genes: &mut [DirectionalGene]) {
        let (grid_width, grid_height) = (self.grid.width(), self.grid.height());
        for rank in 0..genes.len() {
            let slot = genes
                .iter()
                .position(|gene| gene.rank == rank)
                .expect("genome ranks form a permutation");
            let sprite = &self.sheet.sprites()[slot];
            let direction = genes[slot].direction;
            debug_assert!((0.0..=1.0).contains(&direction));

            let horizontal = direction < 0.5;
            let (dx, dy) = if horizontal {
                let dy = f64::from(direction) * 2.0 * grid_height as f64;
                (grid_width, dy as usize)
            } else {
                let dy = f64::from(1.0 - direction) * 2.0 * grid_width as f64;
                (grid_height, dy as usize)
            };

            let mut position = GridPos::default();
            let mut minor = 0_usize;
            let mut error = 2 * dy as i64 - dx as i64;
            for major in 0..dx {
                let offset = if horizontal {
                    GridPos { x: major, y: minor }
                } else {
                    GridPos { x: minor, y: major }
                };
                if self.grid.fits(sprite, offset) {
                    position = offset;
                    break;
                }
                if major + 1 == dx {
                    // end of the line: clamp the last offset into the legal range
                    let (bound_x, bound_y) = self.position_range(sprite);
                    position = GridPos {
                        x: offset.x.min(bound_x - 1),
                        y: offset.y.min(bound_y - 1),
                    };
                    break;
                }
                if error > 0 {
                    minor += 1;
                    error -= 2 * dx as i64;
                }
                error += 2 * dy as i64;
            }

            genes[slot].position = position;
            self.grid.blit(sprite, position);
        }
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[expect(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
    fn mutate_cartesian<R>(&self, positions: &mut [GridPos], rate: f32, distance: f32, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        for (position, sprite) in positions.iter_mut().zip(self.sheet.sprites()) {
            for axis in 0..2 {
                if rng.random::<f32>() <= rate {
                    let (bound, size) = if axis == 0 {
                        (self.grid.width(), sprite.width())
                    } else {
                        (self.grid.height(), sprite.height())
                    };
                    let max_distance = (bound as f32 * distance) as i64;
                    let delta = rng.random_range(-max_distance..=max_distance);
                    let value = if axis == 0 {
                        &mut position.x
                    } else {
                        &mut position.y
                    };
                    *value = (*value as i64 + delta).clamp(0, (bound - size - 1) as i64) as usize;
                }
            }
        }
    }
}

fn mutate_directional<R>(genes: &mut [DirectionalGene], rate: f32, distance: f32, rng: &mut R)
where
    R: Rng + ?Sized,
{
    for slot in 0..genes.len() {
        if rng.random::<f32>() <= rate {
            let delta = (rng.random::<f32>() - 0.5) * 2.0 * distance;
            let direction = &mut genes[slot].direction;
            *direction = (*direction + delta).clamp(0.0, 1.0);
        }
        if rng.random::<f32>() <= rate {
            let a = rng.random_range(0..genes.len());
            let b = rng.random_range(0..genes.len());
            genes.swap(a, b);
        }
    }
}

impl CandidateProblem for SpritePackingProblem {
    type Candidate = Genome;

    fn allocate_candidate(&self) -> Genome {
        let count = self.sheet.len();
        match self.encoding {
            PlacementEncoding::Cartesian => Genome::Cartesian(vec![GridPos::default(); count]),
            PlacementEncoding::Directional => {
                Genome::Directional(vec![DirectionalGene::default(); count])
            }
        }
    }

    fn initialize<R>(&self, genome: &mut Genome, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        match genome {
            Genome::Cartesian(positions) => {
                for (position, sprite) in positions.iter_mut().zip(self.sheet.sprites()) {
                    *position = self.random_position(sprite, rng);
                }
            }
            Genome::Directional(genes) => {
                for (slot, (gene, sprite)) in
                    genes.iter_mut().zip(self.sheet.sprites()).enumerate()
                {
                    *gene = DirectionalGene {
                        rank: slot,
                        position: self.random_position(sprite, rng),
                        direction: rng.random::<f32>(),
                    };
                }
                // the placement order is part of the genetic material
                genes.shuffle(rng);
            }
        }
    }

    fn evaluate(&mut self, genome: &mut Genome) -> Score {
        self.grid.clear();
        match genome {
            Genome::Cartesian(positions) => {
                for (position, sprite) in positions.iter().zip(self.sheet.sprites()) {
                    self.grid.blit(sprite, *position);
                }
            }
            Genome::Directional(genes) => self.place_directional(genes),
        }
        self.grid.measure(self.penalty)
    }

    fn crossover<R>(
        &self,
        mother: &Genome,
        father: &Genome,
        child0: &mut Genome,
        child1: &mut Genome,
        rng: &mut R,
    ) where
        R: Rng + ?Sized,
    {
        let count = self.sheet.len();
        match (mother, father, child0, child1) {
            (
                Genome::Cartesian(mother),
                Genome::Cartesian(father),
                Genome::Cartesian(child0),
                Genome::Cartesian(child1),
            ) => {
                // single cut point; positions are independent per sprite, so
                // no repair is needed
                let cut = rng.random_range(0..count);
                child0[..cut].copy_from_slice(&mother[..cut]);
                child0[cut..].copy_from_slice(&father[cut..]);
                child1[..cut].copy_from_slice(&father[..cut]);
                child1[cut..].copy_from_slice(&mother[cut..]);
            }
            (
                Genome::Directional(mother),
                Genome::Directional(father),
                Genome::Directional(child0),
                Genome::Directional(child1),
            ) => {
                let cut0 = rng.random_range(0..count);
                let cut1 = rng.random_range(0..count);
                let (lo, hi) = (cut0.min(cut1), cut0.max(cut1));
                order_crossover(mother, father, child0, lo, hi);
                order_crossover(father, mother, child1, lo, hi);
            }
            _ => unreachable!("genome encodings never mix within one problem"),
        }
    }

    fn mutate<R>(&self, genome: &mut Genome, rate: f32, distance: f32, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        match genome {
            Genome::Cartesian(positions) => self.mutate_cartesian(positions, rate, distance, rng),
            Genome::Directional(genes) => mutate_directional(genes, rate, distance, rng),
        }
    }

    /// Writes one `x,y,index` row per occupied cell of every placed sprite.
    fn render(&self, genome: &Genome, out: &mut dyn io::Write) -> io::Result<()> {
        writeln!(out, "x,y,index")?;
        for (index, sprite) in self.sheet.sprites().iter().enumerate() {
            let position = match genome {
                Genome::Cartesian(positions) => positions[index],
                Genome::Directional(genes) => genes[index].position,
            };
            for (x, y) in sprite.occupied_cells() {
                writeln!(out, "{},{},{}", position.x + x, position.y + y, index)?;
            }
        }
        Ok(())
    }
}
