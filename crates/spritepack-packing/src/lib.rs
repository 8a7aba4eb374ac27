//! Sprite packing as a searchable problem.
//!
//! The packing task: place a fixed set of 2-D sprites inside an implicit
//! packing area so that nothing overlaps and the bounding box of the placed
//! sprites is as tight as possible. This crate supplies the problem data
//! ([`SpriteSheet`]), the occupancy-grid fitness evaluator ([`CellGrid`]), two
//! interchangeable placement encodings ([`Genome`]), and the genetic operators
//! wiring it all into the [`spritepack_search::CandidateProblem`] capability
//! ([`SpritePackingProblem`]).
//!
//! # Scoring
//!
//! A candidate placement is rasterized additively onto a cell-count grid; the
//! score is the area of the bounding rectangle of occupied cells plus an
//! overlap penalty large enough that removing a single unit of overlap always
//! beats any bounding-box improvement. Zero overlap is what makes a placement
//! feasible.

pub use self::{
    genome::{DirectionalGene, Genome},
    grid::{CellGrid, GridPos, PenaltyKind},
    problem::{PlacementEncoding, SpritePackingProblem},
    sprite::{SheetError, Sprite, SpriteSheet},
};

pub mod genome;
pub mod grid;
pub mod problem;
pub mod sprite;
