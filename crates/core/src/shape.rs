//! Shape catalog - declarative piece templates and the immutable registry
//!
//! A shape is plain data: an identity plus one offset list per orientation. Rotation
//! is table-driven (the next entry in the list), so only grid-aligned states exist.
//!
//! The registry is built once at startup, validated on every insert, then shared
//! read-only (`Arc<ShapeRegistry>`) with every [`FigureBuilder`](crate::FigureBuilder).

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::RegistryError;
use crate::types::{Offset, ShapeTag};

/// Largest accepted magnitude of a shape offset, on either axis.
pub const MAX_SHAPE_OFFSET: i16 = 64;

/// Shape identity, e.g. `"T"` or a catalog-defined name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeId(String);

impl ShapeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ShapeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ShapeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Unvalidated shape description, as authored or imported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeTemplate {
    pub id: ShapeId,
    pub orientations: Vec<Vec<Offset>>,
}

impl ShapeTemplate {
    pub fn new(id: impl Into<ShapeId>, orientations: Vec<Vec<Offset>>) -> Self {
        Self {
            id: id.into(),
            orientations,
        }
    }

    /// Build from 0/1 matrices, one per orientation. Non-zero entries are occupied;
    /// the offset of an entry is its `(row, col)` inside the matrix.
    pub fn from_matrices<M, R>(id: impl Into<ShapeId>, matrices: &[M]) -> Self
    where
        M: AsRef<[R]>,
        R: AsRef<[u8]>,
    {
        let orientations = matrices
            .iter()
            .map(|matrix| {
                let mut offsets = Vec::new();
                for (row, cells) in matrix.as_ref().iter().enumerate() {
                    for (col, &cell) in cells.as_ref().iter().enumerate() {
                        if cell != 0 {
                            offsets.push((row as i16, col as i16));
                        }
                    }
                }
                offsets
            })
            .collect();
        Self::new(id, orientations)
    }

    /// Build from row pictures, one picture per orientation: `#` is occupied.
    pub fn from_pictures(id: impl Into<ShapeId>, pictures: &[&[&str]]) -> Self {
        let matrices: Vec<Vec<Vec<u8>>> = pictures
            .iter()
            .map(|rows| {
                rows.iter()
                    .map(|row| row.chars().map(|ch| u8::from(ch == '#')).collect())
                    .collect()
            })
            .collect();
        Self::from_matrices(id, &matrices)
    }
}

/// Column/row extent of one orientation's offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub min_row: i16,
    pub max_row: i16,
    pub min_col: i16,
    pub max_col: i16,
}

impl Extent {
    fn of(offsets: &[Offset]) -> Self {
        let mut extent = Extent {
            min_row: i16::MAX,
            max_row: i16::MIN,
            min_col: i16::MAX,
            max_col: i16::MIN,
        };
        for &(row, col) in offsets {
            extent.min_row = extent.min_row.min(row);
            extent.max_row = extent.max_row.max(row);
            extent.min_col = extent.min_col.min(col);
            extent.max_col = extent.max_col.max(col);
        }
        extent
    }

    pub fn width(&self) -> u16 {
        (self.max_col - self.min_col + 1) as u16
    }

    pub fn height(&self) -> u16 {
        (self.max_row - self.min_row + 1) as u16
    }
}

/// A registered, validated shape. Offsets never change after registration.
#[derive(Debug, PartialEq, Eq)]
pub struct Shape {
    id: ShapeId,
    tag: ShapeTag,
    orientations: Vec<Box<[Offset]>>,
    extents: Vec<Extent>,
}

impl Shape {
    pub fn id(&self) -> &ShapeId {
        &self.id
    }

    pub fn tag(&self) -> ShapeTag {
        self.tag
    }

    pub fn orientation_count(&self) -> usize {
        self.orientations.len()
    }

    /// Offsets for an orientation; the index wraps around the registered count.
    pub fn offsets(&self, orientation: usize) -> &[Offset] {
        &self.orientations[orientation % self.orientations.len()]
    }

    pub fn extent(&self, orientation: usize) -> Extent {
        self.extents[orientation % self.extents.len()]
    }

    /// Widest orientation, in columns.
    pub fn max_width(&self) -> u16 {
        self.extents.iter().map(Extent::width).max().unwrap_or(0)
    }
}

/// Immutable-after-startup shape catalog keyed by identity.
#[derive(Debug, Default)]
pub struct ShapeRegistry {
    shapes: Vec<Arc<Shape>>,
    by_id: HashMap<ShapeId, usize>,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the seven canonical pieces.
    pub fn with_presets() -> Self {
        let mut registry = Self::new();
        for template in preset_templates() {
            // Preset data is well-formed and identities are distinct.
            if let Err(err) = registry.register(template) {
                log::error!("preset shape rejected: {err}");
            }
        }
        registry
    }

    /// Validate and add a shape. Returns the tag assigned to it.
    pub fn register(&mut self, template: ShapeTemplate) -> Result<ShapeTag, RegistryError> {
        let ShapeTemplate { id, orientations } = template;

        if self.by_id.contains_key(&id) {
            return Err(RegistryError::DuplicateShape(id));
        }
        if orientations.is_empty() {
            return Err(RegistryError::NoOrientations(id));
        }
        if let Some(index) = orientations.iter().position(Vec::is_empty) {
            return Err(RegistryError::EmptyOrientation { id, index });
        }
        let out_of_range = |(row, col): Offset| {
            !(-MAX_SHAPE_OFFSET..=MAX_SHAPE_OFFSET).contains(&row)
                || !(-MAX_SHAPE_OFFSET..=MAX_SHAPE_OFFSET).contains(&col)
        };
        for (index, offsets) in orientations.iter().enumerate() {
            if let Some(&offset) = offsets.iter().find(|&&offset| out_of_range(offset)) {
                return Err(RegistryError::OffsetOutOfRange { id, index, offset });
            }
        }
        let tag = ShapeTag::try_from(self.shapes.len() + 1)
            .map_err(|_| RegistryError::TooManyShapes)?;

        let orientations: Vec<Box<[Offset]>> = orientations
            .into_iter()
            .map(|mut offsets| {
                offsets.sort_unstable();
                offsets.dedup();
                offsets.into_boxed_slice()
            })
            .collect();
        let extents = orientations.iter().map(|o| Extent::of(o)).collect();

        log::debug!(
            "registered shape {id} with {} orientations (tag {tag})",
            orientations.len()
        );
        self.by_id.insert(id.clone(), self.shapes.len());
        self.shapes.push(Arc::new(Shape {
            id,
            tag,
            orientations,
            extents,
        }));
        Ok(tag)
    }

    /// Register every template, stopping at the first failure.
    pub fn register_all<I>(&mut self, templates: I) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = ShapeTemplate>,
    {
        for template in templates {
            self.register(template)?;
        }
        Ok(())
    }

    /// Reject shapes that are wider than the field in any orientation.
    pub fn check_fits(&self, field_width: u16) -> Result<(), RegistryError> {
        for shape in &self.shapes {
            let width = shape.max_width();
            if width > field_width {
                return Err(RegistryError::ShapeTooWide {
                    id: shape.id.clone(),
                    width,
                    field_width,
                });
            }
        }
        Ok(())
    }

    pub fn get(&self, id: &ShapeId) -> Option<&Arc<Shape>> {
        self.by_id.get(id).map(|&idx| &self.shapes[idx])
    }

    pub fn by_index(&self, index: usize) -> Option<&Arc<Shape>> {
        self.shapes.get(index)
    }

    pub fn by_tag(&self, tag: ShapeTag) -> Option<&Arc<Shape>> {
        (tag as usize).checked_sub(1).and_then(|idx| self.shapes.get(idx))
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Shape>> {
        self.shapes.iter()
    }
}

/// The seven canonical pieces, four orientation states each.
pub fn preset_templates() -> Vec<ShapeTemplate> {
    vec![
        ShapeTemplate::from_pictures(
            "I",
            &[
                &["####"],
                &["#", "#", "#", "#"],
                &["####"],
                &["#", "#", "#", "#"],
            ],
        ),
        ShapeTemplate::from_pictures(
            "L",
            &[
                &["###", "#.."],
                &["#..", "#..", "##."],
                &["..#", "###"],
                &["##", ".#", ".#"],
            ],
        ),
        ShapeTemplate::from_pictures("O", &[&["##", "##"], &["##", "##"], &["##", "##"], &["##", "##"]]),
        ShapeTemplate::from_pictures(
            "Z",
            &[
                &["##.", ".##"],
                &[".#", "##", "#."],
                &["##.", ".##"],
                &[".#", "##", "#."],
            ],
        ),
        ShapeTemplate::from_pictures(
            "S",
            &[
                &[".##", "##."],
                &["#.", "##", ".#"],
                &[".##", "##."],
                &["#.", "##", ".#"],
            ],
        ),
        ShapeTemplate::from_pictures(
            "J",
            &[
                &["###", "..#"],
                &["##", "#.", "#."],
                &["#..", "###"],
                &[".#", ".#", "##"],
            ],
        ),
        ShapeTemplate::from_pictures(
            "T",
            &[
                &["###", ".#."],
                &["#.", "##", "#."],
                &[".#.", "###"],
                &[".#", "##", ".#"],
            ],
        ),
    ]
}
