//! Element-to-multiplicity storage shared by all bag variants

use crate::{error::BagError, policy::Ordering};
use indexmap::{Equivalent, IndexMap, map::Entry};
use std::{
    hash::{DefaultHasher, Hash, Hasher},
    num::NonZeroUsize,
};

/// Mapping from distinct values to their multiplicities
///
/// Zero multiplicities are never stored. Entries are kept in insertion order
/// unless explicitly reordered, which ordered bags expose and unordered bags
/// merely use as a deterministic iteration order.
#[derive(Clone, Debug)]
pub(crate) struct CountStore<T> {
    /// Mapping from distinct values to their multiplicities
    pub(crate) value_to_multiplicity: IndexMap<T, NonZeroUsize>,

    /// Number of elements = sum of all multiplicities
    pub(crate) n_elements: usize,
}
//
impl<T> CountStore<T> {
    pub(crate) fn new() -> Self {
        Self {
            value_to_multiplicity: IndexMap::new(),
            n_elements: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            value_to_multiplicity: IndexMap::with_capacity(capacity),
            n_elements: 0,
        }
    }

    /// Number of distinct values
    pub(crate) fn len(&self) -> usize {
        self.value_to_multiplicity.len()
    }

    pub(crate) fn clear(&mut self) {
        self.value_to_multiplicity.clear();
        self.n_elements = 0;
    }

    /// Update `self.n_elements` to match `self.value_to_multiplicity`
    ///
    /// Only needed after bulk `IndexMap` operations that do not provide the
    /// right hooks to update the element count incrementally.
    fn reset_n_elements(&mut self) {
        self.n_elements = self
            .value_to_multiplicity
            .values()
            .map(|x| x.get())
            .sum();
    }
}
//
impl<T: Hash + Eq> CountStore<T> {
    pub(crate) fn get<Q>(&self, value: &Q) -> Option<NonZeroUsize>
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        self.value_to_multiplicity.get(value).copied()
    }

    /// Multiplicity of `value`, with absent values counting as zero
    pub(crate) fn count<Q>(&self, value: &Q) -> usize
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        self.get(value).map_or(0, NonZeroUsize::get)
    }

    /// Add `count` occurences of `value`, returning the previous multiplicity
    ///
    /// On overflow, the store is left unchanged.
    pub(crate) fn add(
        &mut self,
        value: T,
        count: NonZeroUsize,
    ) -> Result<Option<NonZeroUsize>, BagError> {
        let n_elements = self
            .n_elements
            .checked_add(count.get())
            .ok_or(BagError::CountOverflow)?;
        let result = match self.value_to_multiplicity.entry(value) {
            Entry::Vacant(v) => {
                v.insert(count);
                None
            }
            Entry::Occupied(mut o) => {
                let old_count = *o.get();
                *o.get_mut() = old_count
                    .checked_add(count.get())
                    .ok_or(BagError::CountOverflow)?;
                Some(old_count)
            }
        };
        self.n_elements = n_elements;
        Ok(result)
    }

    /// Set the multiplicity of `value`, removing it if `count` is zero, and
    /// return the previous multiplicity
    pub(crate) fn replace<O: Ordering>(
        &mut self,
        value: T,
        count: usize,
    ) -> Result<Option<NonZeroUsize>, BagError> {
        let Some(count) = NonZeroUsize::new(count) else {
            return Ok(self.remove_all::<O, _>(&value));
        };
        let old_count = self.count(&value);
        let n_elements = (self.n_elements - old_count)
            .checked_add(count.get())
            .ok_or(BagError::CountOverflow)?;
        let result = self.value_to_multiplicity.insert(value, count);
        self.n_elements = n_elements;
        Ok(result)
    }

    /// Remove one occurence of `value`, returning the previous multiplicity
    pub(crate) fn remove_one<O: Ordering, Q>(&mut self, value: &Q) -> Option<NonZeroUsize>
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        let multiplicity = self.value_to_multiplicity.get_mut(value)?;
        let old_multiplicity = *multiplicity;
        match NonZeroUsize::new(old_multiplicity.get() - 1) {
            Some(new_multiplicity) => {
                *multiplicity = new_multiplicity;
                self.n_elements -= 1;
            }
            None => {
                self.remove_all::<O, _>(value);
            }
        }
        Some(old_multiplicity)
    }

    /// Remove all occurences of `value`, returning the previous multiplicity
    pub(crate) fn remove_all<O: Ordering, Q>(&mut self, value: &Q) -> Option<NonZeroUsize>
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        // Ordered bags must not disturb the order of the remaining values
        let result = if O::ORDERED {
            self.value_to_multiplicity.shift_remove(value)
        } else {
            self.value_to_multiplicity.swap_remove(value)
        };
        self.n_elements -= result.map_or(0, |nz| nz.get());
        result
    }

    pub(crate) fn pop_last(&mut self) -> Option<(T, NonZeroUsize)> {
        self.value_to_multiplicity
            .pop()
            .inspect(|(_value, count)| self.n_elements -= count.get())
    }

    pub(crate) fn pop_first(&mut self) -> Option<(T, NonZeroUsize)> {
        self.value_to_multiplicity
            .shift_remove_index(0)
            .inspect(|(_value, count)| self.n_elements -= count.get())
    }

    pub(crate) fn retain(&mut self, mut f: impl FnMut(&T, NonZeroUsize) -> bool) {
        self.value_to_multiplicity.retain(|value, count| f(value, *count));
        self.reset_n_elements();
    }

    /// Truth that both stores hold the same multiplicities, regardless of
    /// their order
    pub(crate) fn same_counts(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.n_elements == other.n_elements
            && self
                .value_to_multiplicity
                .iter()
                .all(|(value, &count)| other.get(value) == Some(count))
    }

    /// Truth that every multiplicity of `self` is at most the matching
    /// multiplicity of `other`
    pub(crate) fn is_contained_in(&self, other: &Self) -> bool {
        self.len() <= other.len()
            && self.n_elements <= other.n_elements
            && self
                .value_to_multiplicity
                .iter()
                .all(|(value, &count)| other.get(value).is_some_and(|other| count <= other))
    }

    /// Order-independent hash of the (value, multiplicity) pairs
    ///
    /// Each pair is hashed on its own with a fixed-key hasher and the results
    /// are summed, so two stores with the same contents in a different order
    /// produce the same hash.
    pub(crate) fn content_hash(&self) -> u64 {
        let mut sum = 0u64;
        for (value, count) in &self.value_to_multiplicity {
            let mut hasher = DefaultHasher::new();
            value.hash(&mut hasher);
            count.hash(&mut hasher);
            sum = sum.wrapping_add(hasher.finish());
        }
        let mut hasher = DefaultHasher::new();
        (self.len(), self.n_elements, sum).hash(&mut hasher);
        hasher.finish()
    }

    /// Build a store with the entries of `self` whose multiplicities are
    /// mapped through `f`, which must not increase them
    ///
    /// Values mapped to zero are dropped, others keep their relative order.
    pub(crate) fn shrink_counts(&self, mut f: impl FnMut(&T, usize) -> usize) -> Self
    where
        T: Clone,
    {
        let mut result = Self::with_capacity(self.len());
        for (value, count) in &self.value_to_multiplicity {
            let new_count = f(value, count.get());
            debug_assert!(new_count <= count.get());
            if let Some(new_count) = NonZeroUsize::new(new_count) {
                result.value_to_multiplicity.insert(value.clone(), new_count);
                result.n_elements += new_count.get();
            }
        }
        result
    }

    /// Build a store with the entries of `self` whose multiplicities are
    /// mapped through a fallible `f`
    pub(crate) fn map_counts(
        &self,
        mut f: impl FnMut(usize) -> Result<usize, BagError>,
    ) -> Result<Self, BagError>
    where
        T: Clone,
    {
        let mut result = Self::with_capacity(self.len());
        for (value, count) in &self.value_to_multiplicity {
            if let Some(new_count) = NonZeroUsize::new(f(count.get())?) {
                result.add(value.clone(), new_count)?;
            }
        }
        Ok(result)
    }

    /// Combine the multiplicities of `self` and `other` value by value
    ///
    /// The result lists the values of `self` first, in their order, followed
    /// by the values that only `other` contains, in `other`'s order. Absent
    /// values are passed to `f` as a zero multiplicity.
    pub(crate) fn merge_with(
        &self,
        other: &Self,
        mut f: impl FnMut(usize, usize) -> Result<usize, BagError>,
    ) -> Result<Self, BagError>
    where
        T: Clone,
    {
        let mut result = Self::with_capacity(self.len().max(other.len()));
        for (value, count) in &self.value_to_multiplicity {
            let merged = f(count.get(), other.count(value))?;
            if let Some(merged) = NonZeroUsize::new(merged) {
                result.add(value.clone(), merged)?;
            }
        }
        for (value, count) in &other.value_to_multiplicity {
            if self.value_to_multiplicity.contains_key(value) {
                continue;
            }
            if let Some(merged) = NonZeroUsize::new(f(0, count.get())?) {
                result.add(value.clone(), merged)?;
            }
        }
        Ok(result)
    }
}
//
impl<T> Default for CountStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::policy::{Ordered, Unordered};

    fn nonzero(x: usize) -> NonZeroUsize {
        NonZeroUsize::new(x).unwrap()
    }

    fn store(contents: &str) -> CountStore<char> {
        let mut store = CountStore::new();
        for c in contents.chars() {
            store.add(c, nonzero(1)).unwrap();
        }
        store
    }

    fn values(store: &CountStore<char>) -> String {
        store.value_to_multiplicity.keys().collect()
    }

    #[test]
    fn add_and_count() {
        let store = store("abracadabra");
        assert_eq!(store.len(), 5);
        assert_eq!(store.n_elements, 11);
        assert_eq!(store.count(&'a'), 5);
        assert_eq!(store.count(&'x'), 0);
        assert_eq!(values(&store), "abrcd");
    }

    #[test]
    fn overflow_leaves_store_unchanged() {
        let mut store = store("a");
        store.add('a', nonzero(usize::MAX - 1)).unwrap();
        assert_eq!(store.add('a', nonzero(1)), Err(BagError::CountOverflow));
        assert_eq!(store.count(&'a'), usize::MAX);
        assert_eq!(store.add('c', nonzero(5)), Err(BagError::CountOverflow));
        assert_eq!(store.count(&'c'), 0);
        assert_eq!(store.n_elements, usize::MAX);
    }

    #[test]
    fn ordered_removal_keeps_order() {
        let mut ordered = store("abcd");
        assert_eq!(ordered.remove_all::<Ordered, _>(&'b'), Some(nonzero(1)));
        assert_eq!(values(&ordered), "acd");

        let mut unordered = store("abcd");
        assert_eq!(unordered.remove_all::<Unordered, _>(&'b'), Some(nonzero(1)));
        assert_eq!(unordered.len(), 3);
        assert_eq!(unordered.n_elements, 3);
        assert_eq!(unordered.remove_all::<Unordered, _>(&'b'), None);
    }

    #[test]
    fn replace_and_remove_one() {
        let mut store = store("aab");
        assert_eq!(store.replace::<Ordered>('a', 7), Ok(Some(nonzero(2))));
        assert_eq!(store.n_elements, 8);
        assert_eq!(store.replace::<Ordered>('a', 0), Ok(Some(nonzero(7))));
        assert_eq!(store.n_elements, 1);
        assert_eq!(store.remove_one::<Ordered, _>(&'b'), Some(nonzero(1)));
        assert_eq!(store.len(), 0);
        assert_eq!(store.n_elements, 0);
        assert_eq!(store.remove_one::<Ordered, _>(&'b'), None);
    }

    #[test]
    fn content_hash_ignores_order() {
        assert_eq!(store("ababb").content_hash(), store("bbbaa").content_hash());
        assert_ne!(store("ababb").content_hash(), store("abab").content_hash());
        assert!(store("ababb").same_counts(&store("bbbaa")));
    }

    #[test]
    fn merge_order() {
        let merged = store("cab")
            .merge_with(&store("dba"), |x, y| Ok(x + y))
            .unwrap();
        assert_eq!(values(&merged), "cabd");
        assert_eq!(merged.n_elements, 6);
    }
}
