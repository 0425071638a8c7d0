//! Operations that modify a bag in place, available on mutable variants only

use crate::{
    bag::BagBase,
    count::{IntoCount, validate_count},
    error::BagError,
    policy::{Mutable, Ordering},
};
use indexmap::Equivalent;
use std::{hash::Hash, num::NonZeroUsize};

impl<T: Hash + Eq, O: Ordering> BagBase<T, Mutable, O> {
    /// Clears the bag, removing all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::Bag;
    ///
    /// let mut bag = Bag::from_iter("meow".chars());
    /// bag.clear();
    /// assert!(bag.is_empty());
    /// assert_eq!(bag, Bag::new());
    /// ```
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Insert one occurence of a value, returning the previous multiplicity
    /// of this value if it was already present.
    ///
    /// New values are appended at the end of the iteration order.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::Bag;
    /// use std::num::NonZeroUsize;
    ///
    /// let mut bag = Bag::new();
    /// assert!(bag.insert(123).is_none());
    /// assert_eq!(bag.insert(123), NonZeroUsize::new(1));
    /// assert_eq!(bag.n_elements(), 2);
    /// ```
    ///
    /// # Panics
    ///
    /// If the number of elements overflows a `usize`.
    #[inline]
    pub fn insert(&mut self, value: T) -> Option<NonZeroUsize> {
        self.insert_multiple(value, NonZeroUsize::MIN)
    }

    /// Insert multiple occurences of a value, returning the previous
    /// multiplicity of this value if it was already present.
    ///
    /// # Panics
    ///
    /// If the number of elements overflows a `usize`.
    #[inline]
    pub fn insert_multiple(&mut self, value: T, count: NonZeroUsize) -> Option<NonZeroUsize> {
        self.store
            .add(value, count)
            .expect("Multiplicity counter has overflown")
    }

    /// Set the multiplicity of a value, returning the previous multiplicity
    /// of this value if it was present.
    ///
    /// Setting a multiplicity of zero removes the value from the bag. Setting
    /// the multiplicity of a value that is already present keeps its position
    /// in the iteration order.
    ///
    /// # Errors
    ///
    /// [`BagError::InvalidCount`] if `count` is rejected by
    /// [`validate_count()`], [`BagError::CountOverflow`] if the number of
    /// elements overflows. The bag is left unchanged in both cases.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::{Bag, BagError, CountError};
    ///
    /// let mut bag = Bag::from_iter("abracadabra".chars());
    /// bag.set_count('a', 7)?;
    /// assert_eq!(bag, Bag::from_iter("abracadabraaa".chars()));
    ///
    /// bag.set_count('a', bag.get(&'a') - 1)?;
    /// assert_eq!(bag.get(&'a'), 6);
    ///
    /// bag.set_count('a', 0.0)?;
    /// assert!(!bag.contains(&'a'));
    ///
    /// assert_eq!(
    ///     bag.set_count('b', -1),
    ///     Err(BagError::InvalidCount(CountError::Negative))
    /// );
    /// assert_eq!(bag.get(&'b'), 2);
    /// # Ok::<(), BagError>(())
    /// ```
    pub fn set_count<C: IntoCount>(
        &mut self,
        value: T,
        count: C,
    ) -> Result<Option<NonZeroUsize>, BagError> {
        let count = validate_count(count)?;
        self.store.replace::<O>(value, count)
    }

    /// Returns the multiplicity of `value`, first setting it to `default` if
    /// the value is not present.
    ///
    /// This is the bag counterpart of a map's `setdefault()` operation. The
    /// returned multiplicity can be zero if `default` is zero, in which case
    /// the bag is left unchanged.
    ///
    /// # Errors
    ///
    /// [`BagError::InvalidCount`] if the value is absent and `default` is
    /// rejected by [`validate_count()`].
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::OrderedBag;
    ///
    /// let mut bag = OrderedBag::from_iter("abracadabra".chars());
    /// assert_eq!(bag.get_or_insert('a', 7)?, 5);
    /// assert_eq!(bag.get_or_insert('x', 7)?, 7);
    /// assert_eq!(bag, OrderedBag::from_iter("abracadabraxxxxxxx".chars()));
    /// # Ok::<(), nifty_bags::BagError>(())
    /// ```
    pub fn get_or_insert<C: IntoCount>(&mut self, value: T, default: C) -> Result<usize, BagError> {
        if let Some(count) = self.store.get(&value) {
            return Ok(count.get());
        }
        let default = validate_count(default)?;
        self.store.replace::<O>(value, default)?;
        Ok(default)
    }

    /// Remove a single occurence of a value, returning the previous
    /// multiplicity of this value, or `None` if it was not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::Bag;
    /// use std::num::NonZeroUsize;
    ///
    /// let mut bag = Bag::from_iter([1, 2, 2]);
    /// assert_eq!(bag.remove(&2), NonZeroUsize::new(2));
    /// assert_eq!(bag.remove(&2), NonZeroUsize::new(1));
    /// assert_eq!(bag.remove(&2), None);
    /// assert_eq!(bag.n_elements(), 1);
    /// ```
    #[inline]
    #[must_use = "Invalid removal should be handled"]
    pub fn remove<Q>(&mut self, value: &Q) -> Option<NonZeroUsize>
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        self.store.remove_one::<O, _>(value)
    }

    /// Remove all occurences of a value, returning the previous multiplicity
    /// of this value, or `None` if it was not present.
    ///
    /// Other values keep their relative order in ordered bags.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::Bag;
    ///
    /// let mut bag = Bag::from_iter("abracadabra".chars());
    /// assert_eq!(bag.remove_all(&'a').map_or(7, |n| n.get()), 5);
    /// assert_eq!(bag, Bag::from_iter("brcdbr".chars()));
    /// assert_eq!(bag.remove_all(&'x').map_or(7, |n| n.get()), 7);
    /// assert_eq!(bag, Bag::from_iter("brcdbr".chars()));
    /// ```
    #[inline]
    #[must_use = "Invalid removal should be handled"]
    pub fn remove_all<Q>(&mut self, value: &Q) -> Option<NonZeroUsize>
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        self.store.remove_all::<O, _>(value)
    }

    /// Remove a value and all its occurences from the bag, returning it
    /// along with its multiplicity.
    ///
    /// For ordered bags, this is the last value of the iteration order. For
    /// unordered bags, which value is removed is unspecified.
    ///
    /// # Errors
    ///
    /// [`BagError::Empty`] if the bag is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::{BagError, OrderedBag};
    /// use std::num::NonZeroUsize;
    ///
    /// let mut bag = OrderedBag::from_iter("abracadabra".chars());
    /// assert_eq!(bag.pop_item()?, ('d', NonZeroUsize::MIN));
    /// assert_eq!(bag.pop_item()?, ('c', NonZeroUsize::MIN));
    /// assert_eq!(bag, OrderedBag::from_iter("abraaabra".chars()));
    ///
    /// bag.clear();
    /// assert_eq!(bag.pop_item(), Err(BagError::Empty));
    /// # Ok::<(), BagError>(())
    /// ```
    pub fn pop_item(&mut self) -> Result<(T, NonZeroUsize), BagError> {
        self.store.pop_last().ok_or(BagError::Empty)
    }

    /// Overwrite the multiplicities of `self` with those of `other`
    ///
    /// Values of `other` that `self` already contains take the multiplicity
    /// they have in `other`, and values that `self` does not contain are
    /// inserted. Values that only `self` contains are left alone. This is a
    /// map-style update, use `+=` to add up multiplicities instead.
    ///
    /// # Errors
    ///
    /// [`BagError::CountOverflow`] if the number of elements overflows, in
    /// which case the bag is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::{Bag, FrozenBag};
    ///
    /// let mut bag = Bag::from_iter("abracadabra".chars());
    /// bag.update(&bag.clone())?;
    /// assert_eq!(bag, Bag::from_iter("abracadabra".chars()));
    ///
    /// bag.update(&FrozenBag::from_iter("axx".chars()))?;
    /// assert_eq!(bag, Bag::from_iter("abrcdbrxx".chars()));
    /// # Ok::<(), nifty_bags::BagError>(())
    /// ```
    pub fn update<M2, O2>(&mut self, other: &BagBase<T, M2, O2>) -> Result<(), BagError>
    where
        T: Clone,
    {
        let mut store = self.store.clone();
        for (value, &count) in &other.store.value_to_multiplicity {
            store.replace::<O>(value.clone(), count.get())?;
        }
        self.store = store;
        Ok(())
    }

    /// Retains only the values specified by the predicate.
    ///
    /// In other words, remove all values `v` with multiplicity `m` for which
    /// `f(&v, m)` returns `false`. The values are visited in iteration order,
    /// which is preserved for ordered bags.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::OrderedBag;
    ///
    /// let mut bag = OrderedBag::from_iter("abracadabra".chars());
    /// bag.retain(|_, count| count.get() >= 2);
    /// assert_eq!(bag.distinct().collect::<String>(), "abr");
    /// assert_eq!(bag.n_elements(), 9);
    /// ```
    pub fn retain(&mut self, f: impl FnMut(&T, NonZeroUsize) -> bool) {
        self.store.retain(f);
    }
}

impl<T: Hash + Eq, O: Ordering> Extend<T> for BagBase<T, Mutable, O> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Hash + Eq, O: Ordering> Extend<(T, NonZeroUsize)> for BagBase<T, Mutable, O> {
    /// More efficient alternative to [`Extend<T>`] for cases where you know in
    /// advance that you are going to insert several copies of a value
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::Bag;
    /// use std::num::NonZeroUsize;
    ///
    /// let mut bag = Bag::from_iter([1, 2, 3]);
    /// let nonzero = |x| NonZeroUsize::new(x).unwrap();
    /// bag.extend([(3, nonzero(3)), (4, nonzero(2))]);
    /// assert_eq!(bag, Bag::from_iter([1, 2, 3, 3, 3, 3, 4, 4]));
    /// ```
    fn extend<I: IntoIterator<Item = (T, NonZeroUsize)>>(&mut self, iter: I) {
        for (value, count) in iter {
            self.insert_multiple(value, count);
        }
    }
}
