//! Shape selection - which catalog entry the builder produces next
//!
//! - **Uniform**: independent draws, every shape equally likely
//! - **Bag**: every shape once per shuffled bag, so no shape starves
//! - **Sequence**: a fixed cyclic order, for deterministic sessions. Registered shapes
//!   the sequence leaves out are appended in registration order, so a sequence sets
//!   the opening and the cycle still covers the whole catalog.
//!
//! All policies keep every registered shape reachable.

use rand::seq::SliceRandom;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::config::SelectionPolicy;
use crate::error::BuildError;
use crate::shape::{ShapeId, ShapeRegistry};

/// Selection state over registry indices.
#[derive(Debug, Clone)]
pub enum ShapeSelector {
    Uniform,
    Bag { bag: Vec<usize>, next: usize },
    Sequence { order: Vec<usize>, next: usize },
}

impl ShapeSelector {
    /// Resolve a policy against the registry. Sequence identities must be registered.
    pub fn new(policy: &SelectionPolicy, registry: &ShapeRegistry) -> Result<Self, BuildError> {
        match policy {
            SelectionPolicy::Uniform => Ok(ShapeSelector::Uniform),
            SelectionPolicy::Bag => Ok(ShapeSelector::Bag {
                bag: Vec::new(),
                next: 0,
            }),
            SelectionPolicy::Sequence(ids) => {
                let mut order = Vec::with_capacity(ids.len());
                for id in ids {
                    let id = ShapeId::new(id.as_str());
                    let index = registry
                        .iter()
                        .position(|shape| shape.id() == &id)
                        .ok_or(BuildError::UnknownShape(id))?;
                    order.push(index);
                }
                let missing: Vec<usize> = (0..registry.len())
                    .filter(|index| !order.contains(index))
                    .collect();
                order.extend(missing);
                Ok(ShapeSelector::Sequence { order, next: 0 })
            }
        }
    }

    /// Draw the next registry index out of `count` shapes. None when nothing is selectable.
    pub fn draw(&mut self, count: usize, rng: &mut Pcg32) -> Option<usize> {
        if count == 0 {
            return None;
        }
        match self {
            ShapeSelector::Uniform => Some(rng.random_range(0..count)),
            ShapeSelector::Bag { bag, next } => {
                if *next >= bag.len() {
                    bag.clear();
                    bag.extend(0..count);
                    bag.shuffle(rng);
                    *next = 0;
                }
                let index = bag[*next];
                *next += 1;
                Some(index)
            }
            ShapeSelector::Sequence { order, next } => {
                if order.is_empty() {
                    return None;
                }
                let index = order[*next % order.len()];
                *next = (*next + 1) % order.len();
                Some(index)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_bag_yields_each_shape_once_per_round() {
        let registry = ShapeRegistry::with_presets();
        let mut selector = ShapeSelector::new(&SelectionPolicy::Bag, &registry).unwrap();
        let mut rng = Pcg32::seed_from_u64(12345);
        for _ in 0..3 {
            let round: HashSet<usize> = (0..7)
                .map(|_| selector.draw(7, &mut rng).unwrap())
                .collect();
            assert_eq!(round.len(), 7);
        }
    }

    #[test]
    fn test_uniform_reaches_every_shape() {
        let registry = ShapeRegistry::with_presets();
        let mut selector = ShapeSelector::new(&SelectionPolicy::Uniform, &registry).unwrap();
        let mut rng = Pcg32::seed_from_u64(7);
        let seen: HashSet<usize> = (0..500)
            .map(|_| selector.draw(7, &mut rng).unwrap())
            .collect();
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn test_sequence_opens_with_listed_shapes_then_cycles_catalog() {
        let registry = ShapeRegistry::with_presets();
        let policy = SelectionPolicy::Sequence(vec!["O".into(), "I".into()]);
        let mut selector = ShapeSelector::new(&policy, &registry).unwrap();
        let mut rng = Pcg32::seed_from_u64(1);
        let drawn: Vec<_> = (0..9).map(|_| selector.draw(7, &mut rng).unwrap()).collect();
        assert_eq!(drawn, vec![2, 0, 1, 3, 4, 5, 6, 2, 0]);
    }

    #[test]
    fn test_single_shape_sequence_reaches_every_shape() {
        let registry = ShapeRegistry::with_presets();
        let policy = SelectionPolicy::Sequence(vec!["O".into()]);
        let mut selector = ShapeSelector::new(&policy, &registry).unwrap();
        let mut rng = Pcg32::seed_from_u64(1);
        let seen: HashSet<usize> = (0..7)
            .map(|_| selector.draw(7, &mut rng).unwrap())
            .collect();
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn test_repeated_ids_are_kept() {
        let registry = ShapeRegistry::with_presets();
        let policy = SelectionPolicy::Sequence(vec!["T".into(), "T".into()]);
        let mut selector = ShapeSelector::new(&policy, &registry).unwrap();
        let mut rng = Pcg32::seed_from_u64(1);
        let drawn: Vec<_> = (0..3).map(|_| selector.draw(7, &mut rng).unwrap()).collect();
        assert_eq!(drawn, vec![6, 6, 0]);
    }

    #[test]
    fn test_sequence_with_unknown_shape_fails() {
        let registry = ShapeRegistry::with_presets();
        let policy = SelectionPolicy::Sequence(vec!["Q".into()]);
        assert_eq!(
            ShapeSelector::new(&policy, &registry).unwrap_err(),
            BuildError::UnknownShape("Q".into())
        );
    }

    #[test]
    fn test_empty_catalog_draws_nothing() {
        let mut selector = ShapeSelector::Uniform;
        let mut rng = Pcg32::seed_from_u64(1);
        assert_eq!(selector.draw(0, &mut rng), None);
    }
}
