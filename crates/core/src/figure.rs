//! Figure module - the active piece
//!
//! A figure is a shape reference plus an anchor and an orientation index. Offsets
//! live in the shared [`Shape`]; only the anchor and orientation ever change, and
//! only through the physics layer once a placement is confirmed legal.

use std::sync::Arc;

use crate::shape::{Shape, ShapeId};
use crate::types::{Coord, RotationDirection, ShapeTag};

/// Active falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Figure {
    shape: Arc<Shape>,
    orientation: usize,
    anchor: Coord,
}

impl Figure {
    pub(crate) fn new(shape: Arc<Shape>, orientation: usize, anchor: Coord) -> Self {
        let orientation = orientation % shape.orientation_count();
        Self {
            shape,
            orientation,
            anchor,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn shape_id(&self) -> &ShapeId {
        self.shape.id()
    }

    pub fn tag(&self) -> ShapeTag {
        self.shape.tag()
    }

    pub fn orientation(&self) -> usize {
        self.orientation
    }

    pub fn orientation_count(&self) -> usize {
        self.shape.orientation_count()
    }

    pub fn anchor(&self) -> Coord {
        self.anchor
    }

    /// Absolute cells for a hypothetical placement. Pure; the basis of every collision check.
    pub fn cells_at(&self, anchor: Coord, orientation: usize) -> impl Iterator<Item = Coord> + '_ {
        let (row, col) = anchor;
        self.shape
            .offsets(orientation)
            .iter()
            .map(move |&(dr, dc)| (row + dr, col + dc))
    }

    /// Absolute cells at the current placement.
    pub fn cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells_at(self.anchor, self.orientation)
    }

    /// Orientation index a rotation would lead to. Does not mutate.
    pub fn rotate(&self, direction: RotationDirection) -> usize {
        direction.apply(self.orientation, self.orientation_count())
    }

    /// Anchor a translation would lead to. Does not mutate.
    pub fn translate(&self, delta_row: i16, delta_col: i16) -> Coord {
        (self.anchor.0 + delta_row, self.anchor.1 + delta_col)
    }

    /// Commit a placement that the caller has already checked.
    pub(crate) fn place(&mut self, anchor: Coord, orientation: usize) {
        self.anchor = anchor;
        self.orientation = orientation % self.orientation_count();
    }
}
