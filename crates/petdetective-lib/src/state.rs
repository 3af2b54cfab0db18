use crate::graph::NodeId;

/// Most pickups a [`PickupSet`] can hold.
pub const MAX_PICKUPS: usize = u64::BITS as usize;

/// Set of pickup indices stored as a bit mask.
///
/// Indices refer to [`crate::Problem::pickups`], which is sorted by name, so
/// iteration yields pets in name order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PickupSet(u64);

impl PickupSet {
    pub const EMPTY: Self = Self(0);

    /// The set `{0, 1, .., count - 1}`.
    pub fn first(count: usize) -> Self {
        if count >= MAX_PICKUPS {
            Self(u64::MAX)
        } else {
            Self((1u64 << count) - 1)
        }
    }

    pub fn contains(self, index: usize) -> bool {
        index < MAX_PICKUPS && self.0 & (1u64 << index) != 0
    }

    #[must_use]
    pub fn with(self, index: usize) -> Self {
        debug_assert!(index < MAX_PICKUPS);
        Self(self.0 | (1u64 << index))
    }

    #[must_use]
    pub fn without(self, index: usize) -> Self {
        debug_assert!(index < MAX_PICKUPS);
        Self(self.0 & !(1u64 << index))
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    #[must_use]
    pub fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    pub fn is_disjoint(self, other: Self) -> bool {
        self.0 & other.0 == 0
    }

    /// Members in ascending index order.
    pub fn iter(self) -> PickupIter {
        PickupIter(self.0)
    }
}

impl IntoIterator for PickupSet {
    type Item = usize;
    type IntoIter = PickupIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the members of a [`PickupSet`].
#[derive(Debug, Clone)]
pub struct PickupIter(u64);

impl Iterator for PickupIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(index)
    }
}

/// One node of the search: where the vehicle is, what it carries, what it has
/// delivered, how much fuel is left, and the actions that led here.
///
/// Every state owns its trace; children receive an extended copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub location: NodeId,
    pub cargo: PickupSet,
    pub delivered: PickupSet,
    pub fuel: u32,
    pub trace: Vec<String>,
}

impl SearchState {
    /// Key used for dominance pruning. Fuel and trace are deliberately absent.
    pub fn key(&self) -> StateKey {
        StateKey {
            location: self.location,
            cargo: self.cargo,
            delivered: self.delivered,
        }
    }
}

/// `(location, cargo, delivered)` triple identifying equivalent states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateKey {
    pub location: NodeId,
    pub cargo: PickupSet,
    pub delivered: PickupSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_operations() {
        let set = PickupSet::EMPTY.with(0).with(3).with(5);
        assert_eq!(set.len(), 3);
        assert!(set.contains(3));
        assert!(!set.contains(4));
        assert!(!set.contains(200));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 3, 5]);

        let removed = set.without(3);
        assert_eq!(removed.iter().collect::<Vec<_>>(), vec![0, 5]);
        assert!(removed.is_disjoint(PickupSet::EMPTY.with(3)));
        assert_eq!(set.difference(removed), PickupSet::EMPTY.with(3));
        assert_eq!(removed.union(PickupSet::EMPTY.with(3)), set);
    }

    #[test]
    fn first_covers_full_width() {
        assert!(PickupSet::first(0).is_empty());
        assert_eq!(PickupSet::first(3).iter().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(PickupSet::first(64).len(), 64);
        assert!(PickupSet::first(64).contains(63));
    }
}
