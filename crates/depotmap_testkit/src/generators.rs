//! Property-based test generators using proptest.
//!
//! Provides strategies for generating random houses, paths and
//! sequences of map edits.

use proptest::prelude::*;

/// Strategy for generating house names, including some longer than the
/// record field.
pub fn house_name_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z][A-Za-z0-9 ]{0,31}").expect("Invalid regex")
}

/// Strategy for generating map positions.
pub fn position_strategy() -> impl Strategy<Value = (i32, i32)> {
    (-1000i32..1000, -1000i32..1000)
}

/// Strategy for generating non-negative path weights.
pub fn weight_strategy() -> impl Strategy<Value = i32> {
    0i32..100
}

/// One edit applied to a map.
///
/// Houses and paths are chosen by index into the live entities at the time
/// the operation is applied, so every generated sequence is meaningful.
#[derive(Debug, Clone)]
pub enum MapOperation {
    /// Add a house
    AddHouse {
        /// Name
        name: String,
        /// Position
        position: (i32, i32),
    },
    /// Remove a house other than the depot
    RemoveHouse {
        /// Index among live non-depot houses
        index: usize,
    },
    /// Move a house
    MoveHouse {
        /// Index among live houses
        index: usize,
        /// New position
        position: (i32, i32),
    },
    /// Add a path
    AddPath {
        /// Index of the source among live houses
        from: usize,
        /// Index of the destination among live houses
        to: usize,
        /// Weight
        weight: i32,
    },
    /// Remove a path
    RemovePath {
        /// Index among live paths
        index: usize,
    },
    /// Change a path's weight
    SetWeight {
        /// Index among live paths
        index: usize,
        /// New weight
        weight: i32,
    },
}

/// Strategy for generating map operations.
pub fn map_operation_strategy() -> impl Strategy<Value = MapOperation> {
    let index = 0usize..64;
    prop_oneof![
        3 => (house_name_strategy(), position_strategy())
            .prop_map(|(name, position)| MapOperation::AddHouse { name, position }),
        1 => index.clone().prop_map(|index| MapOperation::RemoveHouse { index }),
        1 => (index.clone(), position_strategy())
            .prop_map(|(index, position)| MapOperation::MoveHouse { index, position }),
        4 => (index.clone(), index.clone(), weight_strategy())
            .prop_map(|(from, to, weight)| MapOperation::AddPath { from, to, weight }),
        1 => index.clone().prop_map(|index| MapOperation::RemovePath { index }),
        1 => (index, weight_strategy())
            .prop_map(|(index, weight)| MapOperation::SetWeight { index, weight }),
    ]
}

/// Strategy for generating a sequence of operations.
pub fn operation_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<MapOperation>> {
    prop::collection::vec(map_operation_strategy(), min_ops..max_ops)
}

/// Strategy for generating a random graph: a house count and weighted edges
/// between houses `0..count`.
pub fn graph_strategy(max_houses: u32) -> impl Strategy<Value = (u32, Vec<(u32, u32, i32)>)> {
    (2..=max_houses).prop_flat_map(|count| {
        let edges = prop::collection::vec((0..count, 0..count, weight_strategy()), 0..(count as usize * 3));
        (Just(count), edges)
    })
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}
