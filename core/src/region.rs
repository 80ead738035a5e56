//! Region resolution and one-hot encoding.
//!
//! Maps a free-text customer state to one of four coarse regions, then to a
//! fixed-order one-hot vector. The one-hot order [east, north, south, west]
//! is the column order the model was trained on and must never change.

use serde::{Deserialize, Serialize};

/// Coarse geographic region derived from a customer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    North,
    South,
    East,
    West,
}

/// One-hot column order, as trained. Fixed contract; never reorder.
pub const ONE_HOT_ORDER: [Region; 4] = [Region::East, Region::North, Region::South, Region::West];

/// Case-insensitive state → region table. Keys are stored lowercase.
const STATE_TO_REGION: &[(&str, Region)] = &[
    ("jammu & kashmir", Region::North),
    ("himachal pradesh", Region::North),
    ("punjab", Region::North),
    ("uttar pradesh", Region::North),
    ("delhi", Region::North),
    ("rajasthan", Region::North),
    ("uttaranchal", Region::North),
    ("chhattisgarh", Region::North),
    ("haryana", Region::North),
    ("west bengal", Region::East),
    ("orissa", Region::East),
    ("arunachal pradesh", Region::East),
    ("maharashtra", Region::West),
    ("goa", Region::West),
    ("gujarat", Region::West),
    ("madhya pradesh", Region::West),
    ("tamil nadu", Region::South),
    ("karnataka", Region::South),
    ("kerala", Region::South),
    ("andhra pradesh", Region::South),
];

impl Region {
    /// Resolve a free-text state name, case-insensitively.
    ///
    /// `None` means the state is not in the table. Callers must treat that as
    /// a validation failure; a prediction is never made with an unresolved
    /// (or silently zeroed) region.
    pub fn resolve(state_name: &str) -> Option<Region> {
        let needle = state_name.trim().to_lowercase();
        STATE_TO_REGION
            .iter()
            .find(|(state, _)| *state == needle)
            .map(|(_, region)| *region)
    }

    /// One-hot encoding in the fixed [east, north, south, west] order.
    /// Exactly one position is 1.0.
    pub fn encode(self) -> [f64; 4] {
        let mut one_hot = [0.0; 4];
        one_hot[self.one_hot_index()] = 1.0;
        one_hot
    }

    /// Position of this region in the fixed one-hot order.
    pub fn one_hot_index(self) -> usize {
        match self {
            Region::East => 0,
            Region::North => 1,
            Region::South => 2,
            Region::West => 3,
        }
    }

    /// Lowercase display name.
    pub fn label(self) -> &'static str {
        match self {
            Region::North => "north",
            Region::South => "south",
            Region::East => "east",
            Region::West => "west",
        }
    }

    /// Match the capitalized suffix of a `customer_region_*` schema column.
    pub fn from_column_suffix(suffix: &str) -> Option<Region> {
        match suffix {
            "East" => Some(Region::East),
            "North" => Some(Region::North),
            "South" => Some(Region::South),
            "West" => Some(Region::West),
            _ => None,
        }
    }

    /// All known state names, lowercase, in table order.
    pub fn known_states() -> impl Iterator<Item = &'static str> {
        STATE_TO_REGION.iter().map(|(state, _)| *state)
    }
}
