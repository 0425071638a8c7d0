//! Operations that depend on the order of distinct values, available on
//! ordered variants only

use crate::{
    bag::BagBase,
    error::BagError,
    iter::Elements,
    policy::{Mutability, Mutable, Ordered},
};
use indexmap::Equivalent;
use std::{hash::Hash, iter::Rev, num::NonZeroUsize};

impl<T: Hash + Eq, M: Mutability> BagBase<T, M, Ordered> {
    /// Position of `value` in the order of distinct values
    ///
    /// # Errors
    ///
    /// [`BagError::NotFound`] if the value is not present in the bag.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::{BagError, FrozenOrderedBag};
    ///
    /// let bag = FrozenOrderedBag::from_iter("aaabbc".chars());
    /// assert_eq!(bag.index(&'a'), Ok(0));
    /// assert_eq!(bag.index(&'b'), Ok(1));
    /// assert_eq!(bag.index(&'c'), Ok(2));
    /// assert_eq!(bag.index(&'x'), Err(BagError::NotFound));
    /// ```
    pub fn index<Q>(&self, value: &Q) -> Result<usize, BagError>
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        self.store
            .value_to_multiplicity
            .get_index_of(value)
            .ok_or(BagError::NotFound)
    }

    /// Iterator over all elements of the bag, from last to first
    ///
    /// This is [`elements()`](Self::elements) in reverse order.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::OrderedBag;
    ///
    /// let bag = OrderedBag::from_iter("abracadabra".chars());
    /// assert_eq!(bag.reversed().collect::<String>(), "dcrrbbaaaaa");
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn reversed(&self) -> Rev<Elements<'_, T, Ordered>> {
        self.elements().rev()
    }

    /// First value in iteration order, along with its multiplicity
    #[must_use = "Only effect is to produce a result"]
    pub fn first(&self) -> Option<(&T, NonZeroUsize)> {
        self.store
            .value_to_multiplicity
            .first()
            .map(|(value, &count)| (value, count))
    }

    /// Last value in iteration order, along with its multiplicity
    #[must_use = "Only effect is to produce a result"]
    pub fn last(&self) -> Option<(&T, NonZeroUsize)> {
        self.store
            .value_to_multiplicity
            .last()
            .map(|(value, &count)| (value, count))
    }

    /// Value at position `index` in iteration order, along with its
    /// multiplicity
    #[must_use = "Only effect is to produce a result"]
    pub fn get_index(&self, index: usize) -> Option<(&T, NonZeroUsize)> {
        self.store
            .value_to_multiplicity
            .get_index(index)
            .map(|(value, &count)| (value, count))
    }

    /// Truth that `self` and `other` hold the same multiplicities for the same
    /// values, in the same order
    ///
    /// Unlike `==`, this takes the order of distinct values into account.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::{FrozenOrderedBag, OrderedBag};
    ///
    /// let bag = OrderedBag::from_iter("ababb".chars());
    /// assert!(bag.eq_ordered(&FrozenOrderedBag::from_iter("aabbb".chars())));
    /// assert!(!bag.eq_ordered(&FrozenOrderedBag::from_iter("bbbaa".chars())));
    /// assert_eq!(bag, FrozenOrderedBag::from_iter("bbbaa".chars()));
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn eq_ordered<M2: Mutability>(&self, other: &BagBase<T, M2, Ordered>) -> bool {
        self.n_elements() == other.n_elements() && self.iter().eq(other.iter())
    }
}

impl<T: Hash + Eq> BagBase<T, Mutable, Ordered> {
    /// Move a value to the end of the iteration order, or to the start if
    /// `last` is `false`
    ///
    /// # Errors
    ///
    /// [`BagError::NotFound`] if the value is not present in the bag.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::OrderedBag;
    ///
    /// let mut bag = OrderedBag::from_iter("aaabbc".chars());
    /// bag.move_to_end(&'a', true)?;
    /// assert_eq!(bag.elements().collect::<String>(), "bbcaaa");
    /// bag.move_to_end(&'c', false)?;
    /// assert_eq!(bag.elements().collect::<String>(), "cbbaaa");
    /// # Ok::<(), nifty_bags::BagError>(())
    /// ```
    pub fn move_to_end<Q>(&mut self, value: &Q, last: bool) -> Result<(), BagError>
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        let map = &mut self.store.value_to_multiplicity;
        let from = map.get_index_of(value).ok_or(BagError::NotFound)?;
        let to = if last { map.len() - 1 } else { 0 };
        tracing::trace!(from, to, "moving bag value");
        map.move_index(from, to);
        Ok(())
    }

    /// Sort distinct values in their natural order
    ///
    /// The sort is stable, though that is irrelevant for values that are
    /// all distinct under `Eq`, unless `Ord` disagrees with it.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::OrderedBag;
    ///
    /// let mut bag = OrderedBag::from_iter("cbbaaa".chars());
    /// bag.sort();
    /// assert_eq!(bag.elements().collect::<String>(), "aaabbc");
    /// ```
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        tracing::trace!(len = self.len(), "sorting bag values");
        self.store.value_to_multiplicity.sort_keys();
    }

    /// Sort distinct values by the key that `f` extracts from them
    ///
    /// The sort is stable: values with equal keys keep their relative order.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::OrderedBag;
    ///
    /// let mut bag = OrderedBag::from_iter("aaabbc".chars());
    /// bag.sort_by_key(|c| "cba".find(*c));
    /// assert_eq!(bag.elements().collect::<String>(), "cbbaaa");
    ///
    /// // Sorting by multiplicity is possible through `sort_by()`
    /// bag.sort_by(|_, count1, _, count2| count1.cmp(&count2));
    /// assert_eq!(bag.elements().collect::<String>(), "cbbaaa");
    /// ```
    pub fn sort_by_key<K: Ord>(&mut self, mut f: impl FnMut(&T) -> K) {
        tracing::trace!(len = self.len(), "sorting bag values");
        self.store
            .value_to_multiplicity
            .sort_by(|value1, _, value2, _| f(value1).cmp(&f(value2)));
    }

    /// Sort distinct values with a comparator that also receives their
    /// multiplicities
    ///
    /// The sort is stable.
    pub fn sort_by(
        &mut self,
        mut compare: impl FnMut(&T, NonZeroUsize, &T, NonZeroUsize) -> std::cmp::Ordering,
    ) {
        tracing::trace!(len = self.len(), "sorting bag values");
        self.store
            .value_to_multiplicity
            .sort_by(|value1, count1, value2, count2| compare(value1, *count1, value2, *count2));
    }

    /// Remove the first value of the iteration order and all its occurences,
    /// returning it along with its multiplicity.
    ///
    /// See [`pop_item()`](Self::pop_item) to remove the last value instead.
    ///
    /// # Errors
    ///
    /// [`BagError::Empty`] if the bag is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::OrderedBag;
    /// use std::num::NonZeroUsize;
    ///
    /// let mut bag = OrderedBag::from_iter("abracadabra".chars());
    /// assert_eq!(bag.pop_first_item()?, ('a', NonZeroUsize::new(5).unwrap()));
    /// assert_eq!(bag.distinct().collect::<String>(), "brcd");
    /// # Ok::<(), nifty_bags::BagError>(())
    /// ```
    pub fn pop_first_item(&mut self) -> Result<(T, NonZeroUsize), BagError> {
        self.store.pop_first().ok_or(BagError::Empty)
    }
}
