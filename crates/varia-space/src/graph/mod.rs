//! The inter-dimensional variation graph.
//!
//! Materializes the generalization/specialization relation over the allowed
//! dimension subspace: every allowed point becomes a weighted node, every
//! legal variation an edge with a relative weight. Built lazily in a single
//! pass, immutable afterwards; share it read-only and pass it explicitly to
//! consumers.

use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

use varia_dimension::ContentDimensionSource;

use crate::errors::DimensionSpaceError;
use crate::point::{DimensionSpacePoint, DimensionSpacePointHash};
use crate::point_set::DimensionSpacePointSet;
use crate::weighted::WeightedDimensionSpacePoint;
use crate::zookeeper::ContentDimensionZookeeper;


/// How two dimension space points relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantType {
    /// The same point.
    Same,
    /// The subject specializes the object.
    Specialization,
    /// The subject generalizes the object.
    Generalization,
    /// Neither specializes the other.
    Peer,
}

/// All variation edges, grouped by direction and weight.
#[derive(Default)]
struct Variations {
    /// All generalizations of a point, indexed by specialization hash.
    indexed_generalizations: BTreeMap<DimensionSpacePointHash, DimensionSpacePointSet>,
    /// All specializations of a point, indexed by generalization hash.
    indexed_specializations: BTreeMap<DimensionSpacePointHash, DimensionSpacePointSet>,
    /// Generalizations by relative weight, indexed by specialization hash.
    /// Weights are collision-free on this side (see `normalize`).
    weighted_generalizations: BTreeMap<DimensionSpacePointHash, BTreeMap<u64, DimensionSpacePoint>>,
    /// Specializations by relative weight, indexed by generalization hash.
    /// Several specializations can share a weight.
    weighted_specializations:
        BTreeMap<DimensionSpacePointHash, BTreeMap<u64, DimensionSpacePointSet>>,
    /// The canonical direct generalization, indexed by specialization hash.
    primary_generalizations: BTreeMap<DimensionSpacePointHash, DimensionSpacePoint>,
    /// Shared empty values handed out for points without edges.
    empty_point_set: DimensionSpacePointSet,
    empty_weight_map: BTreeMap<u64, DimensionSpacePoint>,
    empty_weight_sets: BTreeMap<u64, DimensionSpacePointSet>,
}

/// The variation graph over the allowed dimension subspace.
///
/// Build once per dimension configuration; all sections initialize lazily on
/// first use and are cached. Safe to share across concurrent readers.
pub struct InterDimensionalVariationGraph {
    source: Arc<dyn ContentDimensionSource>,
    zookeeper: ContentDimensionZookeeper,
    weighted_points: OnceLock<BTreeMap<DimensionSpacePointHash, WeightedDimensionSpacePoint>>,
    weight_normalization_base: OnceLock<u64>,
    variations: OnceLock<Variations>,
}

impl InterDimensionalVariationGraph {
    /// Create a graph over the given dimension source.
    pub fn new(source: Arc<dyn ContentDimensionSource>) -> Self {
        let zookeeper = ContentDimensionZookeeper::new(Arc::clone(&source));
        Self {
            source,
            zookeeper,
            weighted_points: OnceLock::new(),
            weight_normalization_base: OnceLock::new(),
            variations: OnceLock::new(),
        }
    }

    /// The dimension source the graph was built from.
    pub fn source(&self) -> &Arc<dyn ContentDimensionSource> {
        &self.source
    }

    /// The subspace keeper the graph was built from.
    pub fn zookeeper(&self) -> &ContentDimensionZookeeper {
        &self.zookeeper
    }

    /// The allowed dimension subspace.
    pub fn dimension_space_points(&self) -> &DimensionSpacePointSet {
        self.zookeeper.allowed_dimension_subspace()
    }

    /// All weighted points of the allowed subspace, indexed by hash.
    pub fn weighted_dimension_space_points(
        &self,
    ) -> &BTreeMap<DimensionSpacePointHash, WeightedDimensionSpacePoint> {
        self.weighted_points.get_or_init(|| {
            let points: BTreeMap<_, _> = self
                .zookeeper
                .allowed_combinations()
                .iter()
                .map(|combination| {
                    let weighted =
                        WeightedDimensionSpacePoint::from_ordered_values(combination.clone());
                    (weighted.hash().clone(), weighted)
                })
                .collect();
            tracing::debug!(point_count = points.len(), "weighted dimension space points built");
            points
        })
    }

    /// Look up a weighted point by hash.
    pub fn get_weighted_dimension_space_point_by_hash(
        &self,
        hash: &DimensionSpacePointHash,
    ) -> Option<&WeightedDimensionSpacePoint> {
        self.weighted_dimension_space_points().get(hash)
    }

    /// Look up the weighted variant of a plain point.
    ///
    /// Returns `None` — not an error — for points outside the allowed
    /// subspace.
    pub fn get_weighted_dimension_space_point(
        &self,
        point: &DimensionSpacePoint,
    ) -> Option<&WeightedDimensionSpacePoint> {
        self.get_weighted_dimension_space_point_by_hash(point.hash())
    }

    /// The base of the positional weight notation: one more than the largest
    /// maximum depth among all dimensions.
    pub fn weight_normalization_base(&self) -> u64 {
        *self.weight_normalization_base.get_or_init(|| {
            self.source
                .content_dimensions_ordered_by_priority()
                .iter()
                .map(|dimension| u64::from(dimension.maximum_depth().value()) + 1)
                .max()
                .unwrap_or(0)
        })
    }

    /// All generalizations of a point (transitive, within the subspace).
    pub fn indexed_generalizations(
        &self,
        specialization: &DimensionSpacePoint,
    ) -> &DimensionSpacePointSet {
        let variations = self.variations();
        variations
            .indexed_generalizations
            .get(specialization.hash())
            .unwrap_or(&variations.empty_point_set)
    }

    /// All specializations of a point (transitive, within the subspace).
    pub fn indexed_specializations(
        &self,
        generalization: &DimensionSpacePoint,
    ) -> &DimensionSpacePointSet {
        let variations = self.variations();
        variations
            .indexed_specializations
            .get(generalization.hash())
            .unwrap_or(&variations.empty_point_set)
    }

    /// Generalizations of a point keyed by relative weight, nearest first.
    pub fn weighted_generalizations(
        &self,
        specialization: &DimensionSpacePoint,
    ) -> &BTreeMap<u64, DimensionSpacePoint> {
        let variations = self.variations();
        variations
            .weighted_generalizations
            .get(specialization.hash())
            .unwrap_or(&variations.empty_weight_map)
    }

    /// Specializations of a point keyed by relative weight, nearest first.
    pub fn weighted_specializations(
        &self,
        generalization: &DimensionSpacePoint,
    ) -> &BTreeMap<u64, DimensionSpacePointSet> {
        let variations = self.variations();
        variations
            .weighted_specializations
            .get(generalization.hash())
            .unwrap_or(&variations.empty_weight_sets)
    }

    /// The canonical direct generalization of a point: the one reached by
    /// rolling back the lowest-priority differing dimension one step.
    ///
    /// `None` for points whose coordinates are all root values.
    pub fn primary_generalization(
        &self,
        specialization: &DimensionSpacePoint,
    ) -> Option<&DimensionSpacePoint> {
        self.variations()
            .primary_generalizations
            .get(specialization.hash())
    }

    /// The points without any generalization, indexed by hash.
    pub fn root_generalizations(&self) -> DimensionSpacePointSet {
        self.weighted_dimension_space_points()
            .values()
            .filter(|weighted| {
                self.indexed_generalizations(weighted.dimension_space_point())
                    .is_empty()
            })
            .map(|weighted| weighted.dimension_space_point().clone())
            .collect()
    }

    /// All specializations of `origin`, `origin` itself included on request,
    /// minus an optional excluded set.
    ///
    /// Fails with [`DimensionSpaceError::DimensionSpacePointNotFound`] when
    /// `origin` lies outside the allowed subspace.
    pub fn specialization_set(
        &self,
        origin: &DimensionSpacePoint,
        include_origin: bool,
        excluded_set: Option<&DimensionSpacePointSet>,
    ) -> Result<DimensionSpacePointSet, DimensionSpaceError> {
        if !self.zookeeper.allowed_dimension_subspace().contains(origin) {
            return Err(DimensionSpaceError::DimensionSpacePointNotFound {
                point: origin.clone(),
            });
        }

        let mut specializations = DimensionSpacePointSet::empty();
        if include_origin {
            let _ = specializations.insert(origin.clone());
        }
        for specialization in self.indexed_specializations(origin) {
            if excluded_set.is_none_or(|excluded| !excluded.contains(specialization)) {
                let _ = specializations.insert(specialization.clone());
            }
        }
        Ok(specializations)
    }

    /// How `subject` relates to `object`.
    pub fn variant_type(
        &self,
        subject: &DimensionSpacePoint,
        object: &DimensionSpacePoint,
    ) -> VariantType {
        if subject == object {
            return VariantType::Same;
        }
        if self.indexed_generalizations(object).contains(subject) {
            return VariantType::Generalization;
        }
        if self.indexed_specializations(object).contains(subject) {
            return VariantType::Specialization;
        }
        VariantType::Peer
    }

    fn variations(&self) -> &Variations {
        self.variations.get_or_init(|| self.build_variations())
    }

    /// Single-pass edge construction.
    ///
    /// Points are processed in ascending total-depth order, so when a point
    /// is reached, the generalization closure of each of its direct
    /// generalizations is already complete. For every direct generalization
    /// `g` of a point `s` (one dimension rolled back one step, and only if
    /// `g` is itself allowed), `s` gains `g` plus all of `g`'s
    /// generalizations; weights are differences of the positional scalar
    /// weights. A chain broken by a disallowed intermediate point yields no
    /// edge.
    fn build_variations(&self) -> Variations {
        let subspace = self.zookeeper.allowed_dimension_subspace();
        let base = self.weight_normalization_base();
        let weighted_points = self.weighted_dimension_space_points();

        let normalized_weights: BTreeMap<DimensionSpacePointHash, u64> = weighted_points
            .iter()
            .map(|(hash, point)| (hash.clone(), point.weight().normalize(base)))
            .collect();

        let mut ordered: Vec<&WeightedDimensionSpacePoint> = weighted_points.values().collect();
        ordered.sort_by_key(|point| (point.weight().total(), point.hash().clone()));

        let mut variations = Variations::default();
        let mut lowest_direct_weights: BTreeMap<DimensionSpacePointHash, u64> = BTreeMap::new();
        let mut edge_count = 0usize;

        for specialization in ordered {
            let specialization_hash = specialization.hash().clone();
            let specialization_weight = normalized_weights[&specialization_hash];

            for (dimension_id, value) in specialization.dimension_values() {
                let dimension = self
                    .source
                    .get_dimension(dimension_id)
                    .expect("dimensions of allowed points are configured");
                let Some(parent_value) = dimension.generalization(value) else {
                    continue;
                };
                let generalization = specialization
                    .dimension_space_point()
                    .vary(dimension_id, parent_value.value.clone());
                if !subspace.contains(&generalization) {
                    continue;
                }

                let mut to_record = vec![generalization.clone()];
                if let Some(transitive) = variations.indexed_generalizations.get(generalization.hash())
                {
                    to_record.extend(transitive.iter().cloned());
                }

                for recorded in to_record {
                    let relative_weight =
                        specialization_weight - normalized_weights[recorded.hash()];

                    let newly_indexed = variations
                        .indexed_generalizations
                        .entry(specialization_hash.clone())
                        .or_default()
                        .insert(recorded.clone());
                    if newly_indexed {
                        edge_count += 1;
                    }
                    let _ = variations
                        .indexed_specializations
                        .entry(recorded.hash().clone())
                        .or_default()
                        .insert(specialization.dimension_space_point().clone());

                    let previous = variations
                        .weighted_generalizations
                        .entry(specialization_hash.clone())
                        .or_default()
                        .insert(relative_weight, recorded.clone());
                    debug_assert!(
                        previous.as_ref().is_none_or(|prior| prior == &recorded),
                        "distinct generalizations of one point must not share a relative weight"
                    );
                    let _ = variations
                        .weighted_specializations
                        .entry(recorded.hash().clone())
                        .or_default()
                        .entry(relative_weight)
                        .or_default()
                        .insert(specialization.dimension_space_point().clone());
                }

                let direct_weight = specialization_weight - normalized_weights[generalization.hash()];
                let is_lowest = lowest_direct_weights
                    .get(&specialization_hash)
                    .is_none_or(|&lowest| direct_weight < lowest);
                if is_lowest {
                    let _ = variations
                        .primary_generalizations
                        .insert(specialization_hash.clone(), generalization);
                    let _ = lowest_direct_weights.insert(specialization_hash.clone(), direct_weight);
                }
            }
        }

        tracing::debug!(
            point_count = weighted_points.len(),
            edge_count,
            "variation graph built"
        );
        variations
    }
}
