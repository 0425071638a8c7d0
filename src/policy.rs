//! Compile-time policies that distinguish the four bag variants
//!
//! Every bag is a [`BagBase<T, M, O>`](crate::BagBase) where `M` is one of
//! the [`Mutability`] markers and `O` is one of the [`Ordering`] markers.
//! Operations that are only meaningful for some variants are implemented on
//! `BagBase` with the corresponding marker fixed, so using them on the wrong
//! variant is a compile-time error.

use std::fmt::Debug;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Mutable {}
    impl Sealed for super::Frozen {}
    impl Sealed for super::Unordered {}
    impl Sealed for super::Ordered {}
}

/// Whether a bag can be modified after construction
///
/// This trait is sealed: [`Mutable`] and [`Frozen`] are its only
/// implementations.
pub trait Mutability: sealed::Sealed + Copy + Debug + Default + 'static {
    /// Truth that bags of this kind are immutable and hashable
    const FROZEN: bool;

    /// Prefix of the variant name in `Debug` output
    const NAME: &'static str;
}

/// Marker for bags that can be modified in place
///
/// Mutable bags do not implement [`Hash`], so they cannot be used as keys of
/// a hash map or as elements of a hash set or of another bag:
///
/// ```compile_fail
/// use nifty_bags::Bag;
/// use std::collections::HashSet;
///
/// let mut set = HashSet::new();
/// set.insert(Bag::from_iter("abc".chars()));
/// ```
///
/// ```compile_fail
/// use nifty_bags::{Bag, OrderedBag};
///
/// let bags = Bag::from_iter([OrderedBag::from_iter("abc".chars())]);
/// ```
///
/// Their frozen counterparts can:
///
/// ```
/// use nifty_bags::{Bag, FrozenBag, FrozenOrderedBag};
/// use std::collections::HashSet;
///
/// let mut set = HashSet::new();
/// set.insert(FrozenBag::from_iter("abc".chars()));
/// let bags = Bag::from_iter([FrozenOrderedBag::from_iter("abc".chars())]);
/// assert_eq!(bags.len(), 1);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Mutable;
//
impl Mutability for Mutable {
    const FROZEN: bool = false;
    const NAME: &'static str = "";
}

/// Marker for immutable, hashable bags
///
/// Frozen bags have none of the mutating methods and compound assignment
/// operators, whether they are ordered or not:
///
/// ```compile_fail
/// use nifty_bags::FrozenBag;
///
/// let mut bag = FrozenBag::from_iter("abc".chars());
/// bag.insert('d');
/// ```
///
/// ```compile_fail
/// use nifty_bags::FrozenOrderedBag;
///
/// let mut bag = FrozenOrderedBag::from_iter("abc".chars());
/// bag.set_count('a', 2);
/// ```
///
/// ```compile_fail
/// use nifty_bags::FrozenBag;
///
/// let mut bag = FrozenBag::from_iter("abc".chars());
/// let _ = bag.remove_all(&'a');
/// ```
///
/// ```compile_fail
/// use nifty_bags::FrozenBag;
///
/// let mut bag = FrozenBag::from_iter("abc".chars());
/// bag += &FrozenBag::from_iter("d".chars());
/// ```
///
/// ```compile_fail
/// use nifty_bags::FrozenOrderedBag;
///
/// let mut bag = FrozenOrderedBag::from_iter("abc".chars());
/// bag *= 2;
/// ```
///
/// Operators build new bags instead:
///
/// ```
/// use nifty_bags::FrozenBag;
///
/// let bag = FrozenBag::from_iter("abc".chars());
/// let bigger = &bag + &FrozenBag::from_iter("d".chars());
/// assert_eq!(bag.n_elements(), 3);
/// assert_eq!(bigger.n_elements(), 4);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Frozen;
//
impl Mutability for Frozen {
    const FROZEN: bool = true;
    const NAME: &'static str = "Frozen";
}

/// Whether a bag tracks the order of its distinct elements
///
/// This trait is sealed: [`Unordered`] and [`Ordered`] are its only
/// implementations.
pub trait Ordering: sealed::Sealed + Copy + Debug + Default + 'static {
    /// Truth that the order of distinct elements is part of the bag's state
    const ORDERED: bool;

    /// Infix of the variant name in `Debug` output
    const NAME: &'static str;
}

/// Marker for bags whose iteration order is deterministic but unspecified
///
/// Since that order carries no meaning, unordered bags have none of the
/// order-based operations:
///
/// ```compile_fail
/// use nifty_bags::FrozenBag;
///
/// let bag = FrozenBag::from_iter("abc".chars());
/// let _ = bag.index(&'a');
/// ```
///
/// ```compile_fail
/// use nifty_bags::Bag;
///
/// let mut bag = Bag::from_iter("abc".chars());
/// let _ = bag.move_to_end(&'a', true);
/// ```
///
/// ```compile_fail
/// use nifty_bags::Bag;
///
/// let mut bag = Bag::from_iter("abc".chars());
/// bag.sort();
/// ```
///
/// ```compile_fail
/// use nifty_bags::Bag;
///
/// let bag = Bag::from_iter("abc".chars());
/// let _ = bag.reversed();
/// ```
///
/// Their iterators are not double-ended either:
///
/// ```compile_fail
/// use nifty_bags::Bag;
///
/// let bag = Bag::from_iter("abc".chars());
/// let _ = bag.iter().rev();
/// ```
///
/// ```compile_fail
/// use nifty_bags::FrozenBag;
///
/// let bag = FrozenBag::from_iter("abc".chars());
/// let _ = bag.elements().next_back();
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Unordered;
//
impl Ordering for Unordered {
    const ORDERED: bool = false;
    const NAME: &'static str = "";
}

/// Marker for bags that remember the insertion order of distinct elements
///
/// ```
/// use nifty_bags::{FrozenOrderedBag, OrderedBag};
///
/// let mut bag = OrderedBag::from_iter("abc".chars());
/// bag.move_to_end(&'a', true)?;
/// bag.sort();
/// let frozen = FrozenOrderedBag::from(&bag);
/// assert_eq!(frozen.index(&'c'), Ok(2));
/// assert_eq!(frozen.reversed().collect::<String>(), "cba");
/// assert_eq!(frozen.iter().rev().next().map(|(c, _)| *c), Some('c'));
/// # Ok::<(), nifty_bags::BagError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Ordered;
//
impl Ordering for Ordered {
    const ORDERED: bool = true;
    const NAME: &'static str = "Ordered";
}
