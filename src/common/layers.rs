//! Collision layers and the pairwise layer compatibility table.

use std::ops::{BitAnd, BitOr, Not};

/// Bitmask of up to 32 collision layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layers(pub u32);

impl Layers {
    pub const NONE: Layers = Layers(0);
    pub const ALL: Layers = Layers(u32::MAX);
    pub const DEFAULT: Layers = Layers(1);
    pub const COUNT: usize = 32;

    /// The single layer with index `index`; `NONE` when out of range.
    pub const fn layer(index: usize) -> Layers {
        if index < Self::COUNT {
            Layers(1 << index)
        } else {
            Layers::NONE
        }
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True when both masks share at least one layer.
    pub fn intersects(self, other: Layers) -> bool {
        self.0 & other.0 != 0
    }

    pub fn contains(self, other: Layers) -> bool {
        self.0 & other.0 == other.0
    }

    /// Indices of the layers set in this mask, ascending.
    pub fn indices(self) -> impl Iterator<Item = usize> {
        (0..Self::COUNT).filter(move |&i| self.0 & (1 << i) != 0)
    }
}

impl Default for Layers {
    fn default() -> Self {
        Layers::DEFAULT
    }
}

impl BitOr for Layers {
    type Output = Layers;

    fn bitor(self, rhs: Layers) -> Layers {
        Layers(self.0 | rhs.0)
    }
}

impl BitAnd for Layers {
    type Output = Layers;

    fn bitand(self, rhs: Layers) -> Layers {
        Layers(self.0 & rhs.0)
    }
}

impl Not for Layers {
    type Output = Layers;

    fn not(self) -> Layers {
        Layers(!self.0)
    }
}

/// Symmetric table of which layers may collide with which.
///
/// Row `i` holds the mask of layers that layer `i` collides with. Every
/// layer collides with every other layer by default.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayerTable {
    rows: [u32; Layers::COUNT],
}

impl LayerTable {
    /// A table in which every layer collides with every layer.
    pub fn new() -> Self {
        LayerTable { rows: [u32::MAX; Layers::COUNT] }
    }

    /// Enables or disables collisions between every layer in `a` and every layer in `b`.
    pub fn set_should_collide(&mut self, a: Layers, b: Layers, should_collide: bool) {
        for i in a.indices() {
            for j in b.indices() {
                self.set_pair(i, j, should_collide);
                self.set_pair(j, i, should_collide);
            }
        }
    }

    fn set_pair(&mut self, row: usize, column: usize, enabled: bool) {
        if enabled {
            self.rows[row] |= 1 << column;
        } else {
            self.rows[row] &= !(1 << column);
        }
    }

    /// True when any layer in `a` may collide with any layer in `b`.
    pub fn should_collide(&self, a: Layers, b: Layers) -> bool {
        a.indices().any(|i| self.rows[i] & b.0 != 0)
    }
}

impl Default for LayerTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_masks() {
        let player = Layers::layer(1);
        let enemy = Layers::layer(2);
        let both = player | enemy;
        assert!(both.contains(player));
        assert!(both.intersects(enemy));
        assert!(!player.intersects(enemy));
        assert_eq!(both.indices().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(Layers::layer(40), Layers::NONE);
        assert_eq!(!Layers::NONE, Layers::ALL);
        assert_eq!(both & player, player);
    }

    #[test]
    fn test_table_defaults_to_colliding() {
        let table = LayerTable::new();
        assert!(table.should_collide(Layers::layer(0), Layers::layer(31)));
        assert!(!table.should_collide(Layers::NONE, Layers::ALL));
    }

    #[test]
    fn test_table_is_symmetric() {
        let mut table = LayerTable::new();
        let player = Layers::layer(1);
        let pickup = Layers::layer(3);
        table.set_should_collide(player, pickup, false);
        assert!(!table.should_collide(player, pickup));
        assert!(!table.should_collide(pickup, player));
        assert!(table.should_collide(player, player));
        assert!(table.should_collide(player | Layers::layer(0), pickup));

        table.set_should_collide(pickup, player, true);
        assert!(table.should_collide(player, pickup));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_table_serde_round_trip() {
        let mut table = LayerTable::new();
        table.set_should_collide(Layers::layer(1), Layers::layer(3), false);
        let json = serde_json::to_string(&table).unwrap();
        let restored: LayerTable = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, table);
        assert!(!restored.should_collide(Layers::layer(3), Layers::layer(1)));
        assert_eq!(serde_json::to_string(&Layers::layer(2)).unwrap(), "4");
    }
}
