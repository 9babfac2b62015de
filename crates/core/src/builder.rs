//! FigureBuilder - constructs figures from the registered shape catalog
//!
//! Usage per new piece:
//!
//! ```
//! use std::sync::Arc;
//! use blockfall_core::{FigureBuilder, GameConfig, ShapeRegistry};
//!
//! let registry = Arc::new(ShapeRegistry::with_presets());
//! let mut builder = FigureBuilder::new(registry, &GameConfig::default()).unwrap();
//!
//! // Force a specific configuration for the next result.
//! builder.set_state("O", 0, (0, 4));
//! let figure = builder.get_result().unwrap();
//! assert_eq!(figure.shape_id().as_str(), "O");
//! assert_eq!(figure.anchor(), (0, 4));
//!
//! // Without explicit state the builder selects from the catalog.
//! builder.reset();
//! assert!(builder.get_result().is_ok());
//! ```

use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::{GameConfig, SpawnPolicy};
use crate::error::BuildError;
use crate::figure::Figure;
use crate::selection::ShapeSelector;
use crate::shape::{Shape, ShapeId, ShapeRegistry};
use crate::types::Coord;

/// Explicit configuration requested through `set_state`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ForcedState {
    shape: ShapeId,
    orientation: usize,
    anchor: Option<Coord>,
}

/// Builds one figure per "piece in play" episode.
#[derive(Debug, Clone)]
pub struct FigureBuilder {
    registry: Arc<ShapeRegistry>,
    field_width: u16,
    spawn: SpawnPolicy,
    selector: ShapeSelector,
    rng: Pcg32,
    forced: Option<ForcedState>,
}

impl FigureBuilder {
    pub fn new(registry: Arc<ShapeRegistry>, config: &GameConfig) -> Result<Self, BuildError> {
        let selector = ShapeSelector::new(&config.selection, &registry)?;
        Ok(Self {
            registry,
            field_width: config.field_width,
            spawn: config.spawn,
            selector,
            rng: Pcg32::seed_from_u64(config.seed),
            forced: None,
        })
    }

    pub fn registry(&self) -> &Arc<ShapeRegistry> {
        &self.registry
    }

    /// Clear any transient build state; the next result is selected from the catalog.
    pub fn reset(&mut self) {
        self.forced = None;
    }

    /// Force shape, orientation and anchor of the next result.
    pub fn set_state(&mut self, shape: impl Into<ShapeId>, orientation: usize, anchor: Coord) {
        self.forced = Some(ForcedState {
            shape: shape.into(),
            orientation,
            anchor: Some(anchor),
        });
    }

    /// Force shape and orientation of the next result; the anchor follows the spawn policy.
    pub fn set_shape(&mut self, shape: impl Into<ShapeId>, orientation: usize) {
        self.forced = Some(ForcedState {
            shape: shape.into(),
            orientation,
            anchor: None,
        });
    }

    pub fn has_forced_state(&self) -> bool {
        self.forced.is_some()
    }

    /// Produce the next figure. Forced state is consumed by this call.
    pub fn get_result(&mut self) -> Result<Figure, BuildError> {
        if let Some(forced) = self.forced.take() {
            let shape = self
                .registry
                .get(&forced.shape)
                .cloned()
                .ok_or(BuildError::UnknownShape(forced.shape.clone()))?;
            let count = shape.orientation_count();
            if forced.orientation >= count {
                return Err(BuildError::InvalidOrientation {
                    id: forced.shape,
                    index: forced.orientation,
                    count,
                });
            }
            let anchor = match forced.anchor {
                Some(anchor) => anchor,
                None => self.spawn_anchor(&shape, forced.orientation),
            };
            return Ok(Figure::new(shape, forced.orientation, anchor));
        }

        let index = self
            .selector
            .draw(self.registry.len(), &mut self.rng)
            .ok_or(BuildError::NoShapeConfigured)?;
        let shape = self
            .registry
            .by_index(index)
            .cloned()
            .ok_or(BuildError::NoShapeConfigured)?;
        let anchor = self.spawn_anchor(&shape, 0);
        Ok(Figure::new(shape, 0, anchor))
    }

    /// Anchor placing the orientation's top cells on row 0.
    fn spawn_anchor(&mut self, shape: &Shape, orientation: usize) -> Coord {
        let extent = shape.extent(orientation);
        let slack = self.field_width.saturating_sub(extent.width());
        let left = match self.spawn {
            SpawnPolicy::Center => slack / 2,
            SpawnPolicy::Random => self.rng.random_range(0..=slack),
        };
        (-extent.min_row, left as i16 - extent.min_col)
    }
}
