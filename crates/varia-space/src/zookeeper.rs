//! Computation of the allowed dimension subspace.

use std::sync::{Arc, OnceLock};

use varia_dimension::{ContentDimensionId, ContentDimensionSource, ContentDimensionValue};

use crate::point_set::DimensionSpacePointSet;
use crate::weighted::WeightedDimensionSpacePoint;

/// One legal combination of dimension values, in priority order.
pub type DimensionValueCombination = Vec<(ContentDimensionId, ContentDimensionValue)>;

/// Keeper of the allowed dimension subspace.
///
/// Takes the Cartesian product of all configured dimensions' values and
/// prunes it by the pairwise combination constraints: a combination is legal
/// iff for every ordered pair of dimensions `(d1, d2)` the value chosen for
/// `d1` allows the value chosen for `d2`. With no dimensions configured the
/// subspace consists of the single empty point.
///
/// Both the combinations and the derived point set are computed lazily once
/// and cached; the zookeeper is immutable afterwards and safe to share across
/// readers.
pub struct ContentDimensionZookeeper {
    source: Arc<dyn ContentDimensionSource>,
    combinations: OnceLock<Vec<DimensionValueCombination>>,
    subspace: OnceLock<DimensionSpacePointSet>,
}

impl ContentDimensionZookeeper {
    /// Create a zookeeper over the given dimension source.
    pub fn new(source: Arc<dyn ContentDimensionSource>) -> Self {
        Self {
            source,
            combinations: OnceLock::new(),
            subspace: OnceLock::new(),
        }
    }

    /// The dimension source this zookeeper derives the subspace from.
    pub fn source(&self) -> &Arc<dyn ContentDimensionSource> {
        &self.source
    }

    /// All legal dimension value combinations, in enumeration order
    /// (dimension priority order, values in declaration order, later
    /// dimensions cycling fastest).
    pub fn allowed_combinations(&self) -> &[DimensionValueCombination] {
        self.combinations.get_or_init(|| {
            let mut combinations: Vec<DimensionValueCombination> = vec![Vec::new()];
            for dimension in self.source.content_dimensions_ordered_by_priority() {
                let mut extended = Vec::new();
                for combination in &combinations {
                    for value in dimension.values() {
                        let allowed = combination.iter().all(|(chosen_id, chosen_value)| {
                            chosen_value
                                .constraints
                                .allows_combination_with(dimension.id(), &value.value)
                                && value
                                    .constraints
                                    .allows_combination_with(chosen_id, &chosen_value.value)
                        });
                        if allowed {
                            let mut next = combination.clone();
                            next.push((dimension.id().clone(), value.clone()));
                            extended.push(next);
                        }
                    }
                }
                combinations = extended;
            }
            tracing::debug!(
                combination_count = combinations.len(),
                "allowed dimension value combinations computed"
            );
            combinations
        })
    }

    /// The allowed dimension subspace as a point set.
    pub fn allowed_dimension_subspace(&self) -> &DimensionSpacePointSet {
        self.subspace.get_or_init(|| {
            self.allowed_combinations()
                .iter()
                .map(|combination| {
                    WeightedDimensionSpacePoint::from_ordered_values(combination.clone())
                        .dimension_space_point()
                        .clone()
                })
                .collect()
        })
    }
}
