//! The generic bag type and the operations shared by all variants

use crate::{
    FrozenBagBag,
    count::{IntoCount, validate_count},
    error::BagError,
    iter::{Elements, IntoIter, Iter},
    policy::{Frozen, Mutability, Ordering},
    store::CountStore,
};
use indexmap::Equivalent;
use std::{
    cmp,
    fmt::{self, Debug},
    hash::{Hash, Hasher},
    iter::FusedIterator,
    marker::PhantomData,
    num::NonZeroUsize,
};

/// A bag, also known as a multiset, parametrized by its [`Mutability`] and
/// [`Ordering`] policies.
///
/// You will usually not name this type directly, but one of its four
/// aliases: [`Bag`](crate::Bag), [`FrozenBag`](crate::FrozenBag),
/// [`OrderedBag`](crate::OrderedBag) and
/// [`FrozenOrderedBag`](crate::FrozenOrderedBag). You can learn more about
/// the differences between them in the [crate-level
/// documentation](crate).
///
/// In all the following documentation, we will use the following
/// terminology:
///
/// - "values" refers to a unique value as defined by equality of the [`Eq`]
///   implementation of type `T`
/// - "elements" refers to possibly duplicate occurences of a value within the
///   bag.
/// - "multiplicity" or "count" refers to the number of occurences of a value
///   within the bag, i.e. the number of elements that are equal to this value.
///
/// As with the standard library's `HashMap`, it is a logic error for a value
/// to be modified in such a way that its hash or equality changes while it is
/// in the bag.
pub struct BagBase<T, M, O> {
    /// Values and their multiplicities
    pub(crate) store: CountStore<T>,

    /// Hash of the contents, computed at construction time for frozen bags
    /// and left at zero for mutable ones
    content_hash: u64,

    policy: PhantomData<(M, O)>,
}
//
impl<T, M: Mutability, O: Ordering> BagBase<T, M, O> {
    /// Number of distinct values in the bag
    ///
    /// See also [`n_elements()`](Self::n_elements) for a count of elements,
    /// including duplicate occurences of a value.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::Bag;
    ///
    /// let bag = Bag::from_iter("abracadabra".chars());
    /// assert_eq!(bag.len(), 5);
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Number of elements in the bag, including duplicate occurences of a
    /// value
    ///
    /// This is tracked as the bag is modified, so it does not need to be
    /// recomputed on every call.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::FrozenBag;
    ///
    /// let bag = FrozenBag::from_iter("abracadabra".chars());
    /// assert_eq!(bag.n_elements(), 11);
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn n_elements(&self) -> usize {
        self.store.n_elements
    }

    /// Truth that the bag contains no elements
    #[must_use = "Only effect is to produce a result"]
    pub fn is_empty(&self) -> bool {
        self.store.len() == 0
    }

    /// Iterator over all distinct values in the bag, along with their
    /// multiplicities, in the bag's iteration order.
    ///
    /// For ordered bags, this is the insertion order (unless modified by
    /// reordering operations) and the iterator is double-ended. For unordered
    /// bags, the order is deterministic but unspecified.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::OrderedBag;
    /// use std::num::NonZeroUsize;
    ///
    /// let bag = OrderedBag::from_iter("abbccc".chars());
    /// let nonzero = |x| NonZeroUsize::new(x).unwrap();
    /// assert!(bag.iter().rev().eq([
    ///     (&'c', nonzero(3)),
    ///     (&'b', nonzero(2)),
    ///     (&'a', nonzero(1)),
    /// ]));
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn iter(&self) -> Iter<'_, T, O> {
        self.into_iter()
    }

    /// Iterator over all distinct values in the bag, in the bag's iteration
    /// order
    #[must_use = "Only effect is to produce a result"]
    pub fn distinct(&self) -> impl ExactSizeIterator<Item = &T> + FusedIterator + Clone {
        self.store.value_to_multiplicity.keys()
    }

    /// Iterator over the multiplicities of the distinct values of the bag, in
    /// the bag's iteration order
    #[must_use = "Only effect is to produce a result"]
    pub fn counts(
        &self,
    ) -> impl ExactSizeIterator<Item = NonZeroUsize> + FusedIterator + Clone {
        self.store.value_to_multiplicity.values().copied()
    }

    /// Iterator over all elements of the bag, where each value is repeated as
    /// many times as its multiplicity.
    ///
    /// Repetitions of a value are yielded consecutively, and values are
    /// yielded in the bag's iteration order. Calling this method again
    /// produces a fresh iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::OrderedBag;
    ///
    /// let bag = OrderedBag::from_iter("abab".chars());
    /// assert_eq!(bag.elements().collect::<String>(), "aabb");
    /// assert_eq!(bag.elements().count(), bag.n_elements());
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn elements(&self) -> Elements<'_, T, O> {
        Elements::new(self.store.value_to_multiplicity.iter(), self.n_elements())
    }

    /// Distinct values sorted by decreasing multiplicity
    ///
    /// Values with equal multiplicities are listed in the bag's iteration
    /// order. If `n` is specified, only the `n` most common values are
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::OrderedBag;
    /// use std::num::NonZeroUsize;
    ///
    /// let bag = OrderedBag::from_iter("abracadabra".chars());
    /// let nonzero = |x| NonZeroUsize::new(x).unwrap();
    /// assert_eq!(bag.most_common(Some(1)), [(&'a', nonzero(5))]);
    /// assert_eq!(
    ///     bag.most_common(Some(3)),
    ///     [(&'a', nonzero(5)), (&'b', nonzero(2)), (&'r', nonzero(2))]
    /// );
    /// assert_eq!(bag.most_common(None).len(), 5);
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn most_common(&self, n: Option<usize>) -> Vec<(&T, NonZeroUsize)> {
        let mut result = self.iter().collect::<Vec<_>>();
        // Stable sort keeps ties in iteration order
        result.sort_by(|(_, count1), (_, count2)| count2.cmp(count1));
        if let Some(n) = n {
            result.truncate(n);
        }
        result
    }

    /// Convert this bag into another variant without copying its contents
    ///
    /// The iteration order is preserved, so an ordered bag that goes through
    /// an unordered variant and back without being modified keeps its order.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::{Bag, FrozenBag};
    ///
    /// let mut bag = Bag::from_iter("meow".chars());
    /// bag.insert('w');
    /// let frozen: FrozenBag<char> = bag.into_variant();
    /// assert_eq!(frozen.n_elements(), 5);
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn into_variant<M2: Mutability, O2: Ordering>(self) -> BagBase<T, M2, O2>
    where
        T: Hash + Eq,
    {
        BagBase::from_store(self.store)
    }
}
//
impl<T: Hash + Eq, M: Mutability, O: Ordering> BagBase<T, M, O> {
    /// Makes a new, empty bag.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::FrozenBag;
    ///
    /// let bag = FrozenBag::<i32>::new();
    /// assert!(bag.is_empty());
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn new() -> Self {
        Self::from_store(CountStore::new())
    }

    /// Wrap a store, computing the cached hash if the bag is frozen
    pub(crate) fn from_store(store: CountStore<T>) -> Self {
        let content_hash = if M::FROZEN { store.content_hash() } else { 0 };
        Self {
            store,
            content_hash,
            policy: PhantomData,
        }
    }

    /// Build a bag from `(value, count)` pairs
    ///
    /// Counts can be of any type that implements [`IntoCount`], and are
    /// validated with [`validate_count()`]. Zero counts are ignored, and
    /// counts of repeated values are added up. This accepts any map type,
    /// including the `(value, count)` iterator of another bag.
    ///
    /// # Errors
    ///
    /// [`BagError::InvalidCount`] if any count is negative, fractional, or
    /// otherwise not a valid multiplicity. [`BagError::CountOverflow`] if the
    /// total number of elements does not fit in a `usize`.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::{Bag, BagError, CountError};
    ///
    /// let bag = Bag::from_counts([('a', 0.0), ('b', 2.0), ('c', 1.0)])?;
    /// assert_eq!(bag, Bag::from_iter("bbc".chars()));
    ///
    /// assert_eq!(
    ///     Bag::from_counts([('a', 1.1)]),
    ///     Err(BagError::InvalidCount(CountError::Fractional))
    /// );
    /// # Ok::<(), BagError>(())
    /// ```
    pub fn from_counts<I, C>(pairs: I) -> Result<Self, BagError>
    where
        I: IntoIterator<Item = (T, C)>,
        C: IntoCount,
    {
        let mut store = CountStore::new();
        for (value, count) in pairs {
            if let Some(count) = NonZeroUsize::new(validate_count(count)?) {
                store.add(value, count)?;
            }
        }
        Ok(Self::from_store(store))
    }

    /// Number of occurences of `value` in the bag, which is zero if the value
    /// is not present
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::Bag;
    ///
    /// let bag = Bag::from_iter(["x", "y", "x"]);
    /// assert_eq!(bag.get("x"), 2);
    /// assert_eq!(bag.get("missing value"), 0);
    /// ```
    #[inline]
    #[must_use = "Only effect is to produce a result"]
    pub fn get<Q>(&self, value: &Q) -> usize
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        self.store.count(value)
    }

    /// Number of occurences of `value` in the bag, or `None` if this value is
    /// not present
    #[inline]
    #[must_use = "Only effect is to produce a result"]
    pub fn multiplicity<Q>(&self, value: &Q) -> Option<NonZeroUsize>
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        self.store.get(value)
    }

    /// Returns `true` if the bag contains at least one occurence of a value
    #[inline]
    #[must_use = "Only effect is to produce a result"]
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<T>,
    {
        self.store.value_to_multiplicity.contains_key(value)
    }

    /// Returns `true` if the bag is contained in `other`, i.e. every value of
    /// `self` occurs at least as many times in `other`.
    ///
    /// This is the `<=` relation of the bag partial order.
    #[must_use = "Only effect is to produce a result"]
    pub fn is_subset<M2, O2>(&self, other: &BagBase<T, M2, O2>) -> bool {
        self.store.is_contained_in(&other.store)
    }

    /// Returns `true` if `other` is contained in the bag.
    ///
    /// This is the `>=` relation of the bag partial order.
    #[must_use = "Only effect is to produce a result"]
    pub fn is_superset<M2, O2>(&self, other: &BagBase<T, M2, O2>) -> bool {
        other.store.is_contained_in(&self.store)
    }

    /// Returns `true` if `self` has no values in common with `other`
    #[must_use = "Only effect is to produce a result"]
    pub fn is_disjoint<M2, O2>(&self, other: &BagBase<T, M2, O2>) -> bool {
        let (small, large) = if self.store.len() <= other.store.len() {
            (&self.store, &other.store)
        } else {
            (&other.store, &self.store)
        };
        small
            .value_to_multiplicity
            .keys()
            .all(|value| !large.value_to_multiplicity.contains_key(value))
    }

    /// Bag of the multiplicities of this bag
    ///
    /// Each key of the result is a multiplicity found in `self`, and is
    /// associated with the number of distinct values of `self` that have this
    /// multiplicity. The result is always a frozen, unordered bag.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::{Bag, FrozenBagBag};
    ///
    /// let bag = Bag::from_iter("meeeow".chars());
    /// assert_eq!(
    ///     bag.frozen_bag_bag(),
    ///     FrozenBagBag::from_counts([(3, 1), (1, 3)])?
    /// );
    /// # Ok::<(), nifty_bags::BagError>(())
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn frozen_bag_bag(&self) -> FrozenBagBag {
        let mut store = CountStore::new();
        for count in self.counts() {
            // There are fewer distinct values than elements, so this can't
            // overflow if the source bag did not.
            store
                .add(count.get(), NonZeroUsize::MIN)
                .expect("Multiplicity counter has overflown");
        }
        FrozenBagBag::from_store(store)
    }

    /// Build a bag of the same variant whose values are `f(value)`
    ///
    /// If several values are mapped to equal results, their multiplicities
    /// are added up. Since `Clone` duplicates each value with `T::clone()`,
    /// this is the tool of choice to get a deep copy of a bag of shared
    /// pointers.
    ///
    /// # Errors
    ///
    /// [`BagError::CountOverflow`] if merged multiplicities overflow.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::FrozenBag;
    ///
    /// let bag = FrozenBag::from_iter([1, 2, 3, 4, 4]);
    /// let parity = bag.map_elements(|x| x % 2)?;
    /// assert_eq!(parity, FrozenBag::from_counts([(0, 3), (1, 2)])?);
    /// # Ok::<(), nifty_bags::BagError>(())
    /// ```
    pub fn map_elements<U, F>(&self, mut f: F) -> Result<BagBase<U, M, O>, BagError>
    where
        U: Hash + Eq,
        F: FnMut(&T) -> U,
    {
        let mut store = CountStore::with_capacity(self.len());
        for (value, count) in self.iter() {
            store.add(f(value), count)?;
        }
        Ok(BagBase::from_store(store))
    }
}

impl<T: Clone, M, O> Clone for BagBase<T, M, O> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            content_hash: self.content_hash,
            policy: PhantomData,
        }
    }
}

impl<T: Debug, M: Mutability, O: Ordering> Debug for BagBase<T, M, O> {
    /// Displays the bag as a constructor call over its `(value, count)`
    /// pairs, e.g. `FrozenBag({'a': 2, 'b': 3})` for unordered bags and
    /// `OrderedBag(OrderedMap([('a', 2), ('b', 3)]))` for ordered ones.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs = self
            .store
            .value_to_multiplicity
            .iter()
            .map(|(value, count)| (value, count.get()));
        write!(f, "{}{}Bag(", M::NAME, O::NAME)?;
        if O::ORDERED {
            f.write_str("OrderedMap(")?;
            f.debug_list().entries(pairs).finish()?;
            f.write_str(")")?;
        } else {
            f.debug_map().entries(pairs).finish()?;
        }
        f.write_str(")")
    }
}

impl<T: Hash + Eq, M: Mutability, O: Ordering> Default for BagBase<T, M, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Hash + Eq, M: Mutability, O: Ordering> Eq for BagBase<T, M, O> {}

impl<T: Clone + Hash + Eq, M: Mutability, O: Ordering, M2, O2> From<&BagBase<T, M2, O2>>
    for BagBase<T, M, O>
{
    /// Copy a bag of any variant into a bag of this variant, preserving its
    /// iteration order
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::{FrozenOrderedBag, OrderedBag};
    ///
    /// let mut bag = OrderedBag::from_iter("aaabbc".chars());
    /// bag.move_to_end(&'a', true)?;
    /// let frozen = FrozenOrderedBag::from(&bag);
    /// assert_eq!(frozen.distinct().collect::<String>(), "bca");
    /// # Ok::<(), nifty_bags::BagError>(())
    /// ```
    fn from(other: &BagBase<T, M2, O2>) -> Self {
        Self::from_store(other.store.clone())
    }
}

impl<T: Hash + Eq, M: Mutability, O: Ordering> FromIterator<T> for BagBase<T, M, O> {
    /// Build a bag where every item of the iterator counts as one occurence
    ///
    /// # Panics
    ///
    /// If the number of elements overflows a `usize`.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        <Self as FromIterator<(T, NonZeroUsize)>>::from_iter(
            iter.into_iter().map(|value| (value, NonZeroUsize::MIN)),
        )
    }
}

impl<T: Hash + Eq, M: Mutability, O: Ordering> FromIterator<(T, NonZeroUsize)>
    for BagBase<T, M, O>
{
    /// More efficient alternative to [`FromIterator<T>`] for cases where you
    /// know in advance that a value occurs several times
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::FrozenBag;
    /// use std::num::NonZeroUsize;
    ///
    /// let nonzero = |x| NonZeroUsize::new(x).unwrap();
    /// assert_eq!(
    ///     FrozenBag::from_iter([1, 2, 2, 2, 3, 3]),
    ///     FrozenBag::from_iter([(1, nonzero(1)), (2, nonzero(3)), (3, nonzero(2))])
    /// );
    /// ```
    ///
    /// # Panics
    ///
    /// If the number of elements overflows a `usize`.
    fn from_iter<I: IntoIterator<Item = (T, NonZeroUsize)>>(iter: I) -> Self {
        let mut store = CountStore::new();
        for (value, count) in iter {
            store
                .add(value, count)
                .expect("Multiplicity counter has overflown");
        }
        Self::from_store(store)
    }
}

impl<T: Hash + Eq, O: Ordering> Hash for BagBase<T, Frozen, O> {
    /// Frozen bags are hashed using a hash of their contents computed at
    /// construction time, which does not depend on the iteration order.
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.content_hash)
    }
}

impl<'a, T, M: Mutability, O: Ordering> IntoIterator for &'a BagBase<T, M, O> {
    type Item = (&'a T, NonZeroUsize);
    type IntoIter = Iter<'a, T, O>;

    fn into_iter(self) -> Self::IntoIter {
        Iter::new(self.store.value_to_multiplicity.iter())
    }
}

impl<T, M: Mutability, O: Ordering> IntoIterator for BagBase<T, M, O> {
    type Item = (T, NonZeroUsize);
    type IntoIter = IntoIter<T, O>;

    /// Gets an iterator for moving out the bag's `(value, multiplicity)`
    /// pairs in iteration order.
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.store.value_to_multiplicity.into_iter())
    }
}

impl<T: Hash + Eq, M, O, M2, O2> PartialEq<BagBase<T, M2, O2>> for BagBase<T, M, O> {
    /// Bags are equal when they contain the same values with the same
    /// multiplicities. Order is ignored, even between ordered bags: use
    /// [`eq_ordered()`](BagBase::eq_ordered) to take it into account.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::{Bag, FrozenOrderedBag, OrderedBag};
    ///
    /// let ordered = OrderedBag::from_iter("ababb".chars());
    /// assert_eq!(ordered, FrozenOrderedBag::from_iter("bbbaa".chars()));
    /// assert_eq!(ordered, Bag::from_iter("babab".chars()));
    /// ```
    fn eq(&self, other: &BagBase<T, M2, O2>) -> bool {
        self.store.same_counts(&other.store)
    }
}

impl<T: Hash + Eq, M, O, M2, O2> PartialOrd<BagBase<T, M2, O2>> for BagBase<T, M, O> {
    /// Bags are partially ordered by containment: `a <= b` if every value
    /// occurs at most as many times in `a` as in `b`. Bags where neither
    /// contains the other are incomparable.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::FrozenBag;
    ///
    /// let abc = FrozenBag::from_iter("abc".chars());
    /// let aabc = FrozenBag::from_iter("aabc".chars());
    /// let abbc = FrozenBag::from_iter("abbc".chars());
    /// assert!(abc < aabc);
    /// assert!(abbc >= abc);
    /// assert!(!(aabc <= abbc) && !(aabc >= abbc));
    /// assert_eq!(aabc.partial_cmp(&abbc), None);
    /// ```
    fn partial_cmp(&self, other: &BagBase<T, M2, O2>) -> Option<cmp::Ordering> {
        let le = self.store.is_contained_in(&other.store);
        let ge = other.store.is_contained_in(&self.store);
        match (le, ge) {
            (true, true) => Some(cmp::Ordering::Equal),
            (true, false) => Some(cmp::Ordering::Less),
            (false, true) => Some(cmp::Ordering::Greater),
            (false, false) => None,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{Bag, BagError, CountError, FrozenBag, FrozenBagBag, FrozenOrderedBag, OrderedBag};
    use num::{BigInt, rational::BigRational};
    use std::{collections::HashSet, num::NonZeroUsize, rc::Rc};

    fn nonzero(x: usize) -> NonZeroUsize {
        NonZeroUsize::new(x).unwrap()
    }

    /// Checks that apply to every variant, mirroring each other's behavior
    macro_rules! common_checks {
        ($($name:ident => $bag:ident,)*) => {$(
            mod $name {
                use super::*;

                fn bag(contents: &str) -> $bag<char> {
                    $bag::from_iter(contents.chars())
                }

                #[test]
                fn abracadabra() {
                    let bag = bag("abracadabra");
                    assert_eq!(bag.len(), 5);
                    assert_eq!(bag.n_elements(), 11);
                    assert_eq!(
                        bag.distinct().copied().collect::<HashSet<_>>(),
                        "abracadabra".chars().collect::<HashSet<_>>()
                    );
                    assert_eq!(
                        bag.counts().map(NonZeroUsize::get).collect::<HashSet<_>>(),
                        HashSet::from([1, 2, 5])
                    );
                    assert_eq!(
                        bag.iter().map(|(&c, n)| (c, n.get())).collect::<HashSet<_>>(),
                        HashSet::from([('a', 5), ('r', 2), ('b', 2), ('c', 1), ('d', 1)])
                    );
                    assert_eq!(bag.get(&'a'), 5);
                    assert_eq!(bag.get(&'x'), 0);
                    assert!(bag.contains(&'a'));
                    assert!(bag.contains(&'r'));
                    assert!(!bag.contains(&'R'));
                    assert_eq!(bag.multiplicity(&'b'), Some(nonzero(2)));
                    assert_eq!(bag.multiplicity(&'x'), None);
                    assert!(!$bag::from_counts([('x', 0)]).unwrap().contains(&'x'));

                    assert_eq!(bag.most_common(Some(1)), [(&'a', nonzero(5))]);
                    assert_eq!(
                        bag.most_common(Some(3)).into_iter().collect::<HashSet<_>>(),
                        HashSet::from([(&'a', nonzero(5)), (&'b', nonzero(2)), (&'r', nonzero(2))])
                    );
                    assert_eq!(bag.most_common(None).len(), bag.len());

                    assert_eq!($bag::from_iter(bag.elements().copied()), bag);
                    assert_eq!(bag.elements().count(), bag.n_elements());
                    assert_eq!(bag.elements().len(), bag.n_elements());
                    assert_eq!(bag.clone(), bag);
                }

                #[test]
                fn emptiness() {
                    assert!(!bag("meow").is_empty());
                    assert!($bag::<char>::new().is_empty());
                    assert!(bag("").is_empty());
                    assert!($bag::<char>::default().is_empty());
                    assert!($bag::from_counts([('d', 0)]).unwrap().is_empty());
                }

                #[test]
                fn zero_counts_are_ignored() {
                    assert_eq!($bag::from_counts([('a', 0), ('b', 1)]).unwrap(), bag("b"));
                    assert_eq!(
                        $bag::from_counts([('a', 0), ('b', 1)]).unwrap(),
                        $bag::from_counts([('c', 0), ('b', 1)]).unwrap()
                    );
                    assert_eq!($bag::from_counts([('a', 0)]).unwrap(), $bag::new());
                }

                #[test]
                fn only_positive_integers_or_zero() {
                    let three = BigRational::new(BigInt::from(30), BigInt::from(10));
                    let floats = $bag::from_counts([('a', 0.0), ('b', 0.0), ('c', 1.0), ('d', 2.0)])
                        .unwrap();
                    let decimal = $bag::from_counts([('e', three)]).unwrap();
                    assert_eq!(&floats + &decimal, bag("cddeee"));
                    assert_eq!(
                        $bag::from_counts([('a', 1.1)]),
                        Err(BagError::InvalidCount(CountError::Fractional))
                    );
                    assert_eq!(
                        $bag::from_counts([('a', -2)]),
                        Err(BagError::InvalidCount(CountError::Negative))
                    );
                    assert_eq!(
                        $bag::from_counts([('a', BigInt::from(-3))]),
                        Err(BagError::InvalidCount(CountError::Negative))
                    );
                    assert_eq!(
                        $bag::from_counts([('a', f64::INFINITY)]),
                        Err(BagError::InvalidCount(CountError::NonFinite))
                    );
                    assert_eq!(
                        $bag::from_counts([('a', f64::NEG_INFINITY)]),
                        Err(BagError::InvalidCount(CountError::NonFinite))
                    );
                }

                #[test]
                #[allow(clippy::eq_op, clippy::nonminimal_bool)]
                fn comparison() {
                    let bag_0 = bag("c");
                    let bag_1 = bag("abc");
                    let bag_2 = bag("aabc");
                    let bag_3 = bag("abbc");
                    let bag_4 = bag("aabbcc");
                    let hierarchy = [
                        (&bag_4, vec![&bag_3, &bag_2, &bag_1, &bag_0]),
                        (&bag_3, vec![&bag_1, &bag_0]),
                        (&bag_2, vec![&bag_1, &bag_0]),
                        (&bag_1, vec![&bag_0]),
                        (&bag_0, vec![]),
                    ];
                    for (item, smaller_items) in &hierarchy {
                        for smaller_item in smaller_items {
                            assert!(!(*item <= *smaller_item));
                            assert!(!(*item < *smaller_item));
                            assert!(*item >= *smaller_item);
                            assert!(*item > *smaller_item);
                            assert!(*item != *smaller_item);
                            assert!(smaller_item.is_subset(*item));
                            assert!(item.is_superset(*smaller_item));
                        }
                        assert!(*item <= *item && *item >= *item);
                        assert!(!(*item < *item));
                    }
                    assert_eq!(bag_2.partial_cmp(&bag_3), None);
                    assert!(bag("ab").is_disjoint(&bag("cd")));
                    assert!(!bag("ab").is_disjoint(&bag("bcd")));
                }

                #[test]
                fn frozen_bag_bag() {
                    assert_eq!(
                        bag("meeeow").frozen_bag_bag(),
                        FrozenBagBag::from_counts([(3, 1), (1, 3)]).unwrap()
                    );
                    assert!(bag("").frozen_bag_bag().is_empty());
                }

                #[test]
                fn debug() {
                    let debug = format!("{:?}", bag("ababb"));
                    let name = stringify!($bag);
                    assert!(debug.starts_with(&format!("{name}(")), "{debug}");
                    assert!(debug.contains("'a', 2") || debug.contains("'a': 2"), "{debug}");
                }

                #[test]
                fn shallow_and_deep_copies() {
                    let shared = Rc::new(String::from("o"));
                    let bag = $bag::from_counts([(Rc::clone(&shared), 3)]).unwrap();
                    let shallow = bag.clone();
                    let deep = bag.map_elements(|o| Rc::new((**o).clone())).unwrap();
                    assert_eq!(shallow, bag);
                    assert_eq!(deep, bag);
                    let (shallow_value, _) = shallow.iter().next().unwrap();
                    let (deep_value, _) = deep.iter().next().unwrap();
                    assert!(Rc::ptr_eq(shallow_value, &shared));
                    assert!(!Rc::ptr_eq(deep_value, &shared));
                }

                #[test]
                fn conversions() {
                    let bag = bag("abracadabra");
                    assert_eq!(Bag::from(&bag), bag);
                    assert_eq!(FrozenBag::from(&bag), bag);
                    assert_eq!(OrderedBag::from(&bag), bag);
                    assert_eq!(FrozenOrderedBag::from(&bag), bag);
                    let order = bag.distinct().copied().collect::<String>();
                    let converted: FrozenOrderedBag<char> = bag.clone().into_variant();
                    assert_eq!(converted.distinct().copied().collect::<String>(), order);
                    assert_eq!(converted, bag);
                }
            }
        )*};
    }
    common_checks!(
        bag => Bag,
        frozen_bag => FrozenBag,
        ordered_bag => OrderedBag,
        frozen_ordered_bag => FrozenOrderedBag,
    );

    #[test]
    fn debug_format() {
        let unordered = format!("{:?}", Bag::from_iter("ababb".chars()));
        assert!(
            unordered == "Bag({'a': 2, 'b': 3})" || unordered == "Bag({'b': 3, 'a': 2})",
            "{unordered}"
        );
        assert_eq!(
            format!("{:?}", FrozenBag::from_iter("ababb".chars())),
            "FrozenBag({'a': 2, 'b': 3})"
        );
        assert_eq!(
            format!("{:?}", OrderedBag::from_iter("ababb".chars())),
            "OrderedBag(OrderedMap([('a', 2), ('b', 3)]))"
        );
        assert_eq!(
            format!("{:?}", FrozenOrderedBag::from_iter("ababb".chars())),
            "FrozenOrderedBag(OrderedMap([('a', 2), ('b', 3)]))"
        );
    }

    #[test]
    fn frozen_hash() {
        let bag = FrozenBag::from_iter("abracadabra".chars());
        assert_eq!(HashSet::from([bag.clone(), bag.clone()]).len(), 1);

        let empty = FrozenBag::<char>::new();
        let zero = FrozenBag::from_counts([('a', 0)]).unwrap();
        assert_eq!(HashSet::from([empty.clone(), zero.clone()]), HashSet::from([empty]));

        let bb = FrozenBag::from_counts([('a', 0.0), ('b', 2.0), ('c', 0.0)]).unwrap();
        assert_eq!(HashSet::from([bb, FrozenBag::from_iter("bb".chars())]).len(), 1);

        // Equal ordered bags hash equally regardless of their order
        let ordered = FrozenOrderedBag::from_iter("ababb".chars());
        let reordered = FrozenOrderedBag::from_iter("bbbaa".chars());
        assert_eq!(HashSet::from([ordered, reordered]).len(), 1);
    }

    #[test]
    fn disjointness_across_variants() {
        let bag = Bag::from_iter("abracadabra".chars());
        assert!(bag.is_disjoint(&FrozenOrderedBag::from_iter("xyz".chars())));
        assert!(FrozenOrderedBag::from_iter("xyz".chars()).is_disjoint(&bag));
        assert!(!bag.is_disjoint(&OrderedBag::from_iter("xyzzyc".chars())));
        assert!(!FrozenBag::from_iter("c".chars()).is_disjoint(&bag));
        assert!(bag.is_disjoint(&FrozenBag::new()));
    }

    #[test]
    fn most_common_ties_follow_order() {
        let bag = OrderedBag::from_iter("rbbraaa".chars());
        assert_eq!(
            bag.most_common(None),
            [(&'a', nonzero(3)), (&'r', nonzero(2)), (&'b', nonzero(2))]
        );
    }
}
