use std::collections::{BTreeMap, BTreeSet};
use std::hash::Hash;

/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;

/// Type alias for sets whose iteration order is determined by the order on their elements.
pub type OrderedSet<S> = BTreeSet<S>;
/// Type alias for maps whose iteration order is determined by the order on their keys.
pub type OrderedMap<K, V> = BTreeMap<K, V>;

/// Represents a bijective mapping between `L` and `R`, that is a mapping which associates
/// each `L` with precisely one `R` and vice versa.
pub type Bijection<L, R> = bimap::BiBTreeMap<L, R>;

/// A set of state indices, used wherever sets of states are manipulated internally.
pub type IndexSet = bit_set::BitSet;

/// A partition is a different view on an equivalence relation, by grouping elements of
/// type `I` into their respective classes under the relation.
#[derive(Debug, Clone)]
pub struct Partition<I: Hash + Eq>(Vec<BTreeSet<I>>);

impl<I: Hash + Eq> std::ops::Deref for Partition<I> {
    type Target = Vec<BTreeSet<I>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'a, I: Hash + Eq> IntoIterator for &'a Partition<I> {
    type Item = &'a BTreeSet<I>;
    type IntoIter = std::slice::Iter<'a, BTreeSet<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<I: Hash + Eq> PartialEq for Partition<I> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|o| other.contains(o))
    }
}
impl<I: Hash + Eq> Eq for Partition<I> {}

impl<I: Hash + Eq + Ord> Partition<I> {
    /// Returns the size of the partition, i.e. the number of classes.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Builds a new partition from an iterator that yields iterators which yield elements
    /// of type `I`. Empty classes are dropped.
    pub fn new<X: IntoIterator<Item = I>, Y: IntoIterator<Item = X>>(iter: Y) -> Self {
        Self(
            iter.into_iter()
                .map(|it| it.into_iter().collect::<BTreeSet<_>>())
                .filter(|class| !class.is_empty())
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Partition;

    #[test]
    fn partition_equality_ignores_class_order() {
        let left = Partition::new([vec![0, 1], vec![2]]);
        let right = Partition::new([vec![2], vec![1, 0]]);
        assert_eq!(left, right);
        assert_ne!(left, Partition::new([vec![0], vec![1, 2]]));
    }

    #[test]
    fn partition_drops_empty_classes() {
        let p = Partition::new([vec![], vec![3, 4], vec![]]);
        assert_eq!(p.size(), 1);
        assert!(p[0].contains(&4));
        assert!(p.iter().all(|class| !class.contains(&5)));
    }
}
