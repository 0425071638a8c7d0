//! Bags, also known as multisets, in four flavors.
//!
//! A bag is a generalization of the notion of mathematical set where multiple
//! elements that are equal to each other can be present simultaneously. It
//! can equivalently be seen as a map from distinct values to positive integer
//! multiplicities, which is how this crate stores it.
//!
//! This crate provides bag variants along two independent axes:
//!
//! - Mutability: a [`Bag`] can be modified in place, whereas a [`FrozenBag`]
//!   is immutable once built. In exchange, frozen bags implement [`Hash`]
//!   and can be used as keys of a `HashMap` or elements of another bag.
//! - Ordering: an [`OrderedBag`] remembers the order in which distinct values
//!   were first inserted and provides order-based operations like
//!   [`index()`](BagBase::index), [`reversed()`](BagBase::reversed) and
//!   [`move_to_end()`](BagBase::move_to_end). Unordered bags iterate in a
//!   deterministic but unspecified order.
//!
//! The [`FrozenOrderedBag`] combines both properties. All four variants are
//! aliases of a single generic [`BagBase`] type, so they share one
//! implementation and one set of documentation. An operation that does not
//! make sense for a variant, like inserting into a frozen bag, is not merely
//! an error at run time: the method does not exist and the code does not
//! compile.
//!
//! Bags of all variants can be compared and combined with each other. The
//! result of a binary operation has the variant of its left-hand side:
//!
//! ```
//! use nifty_bags::{Bag, FrozenBag};
//!
//! let word = FrozenBag::from_iter("abracadabra".chars());
//! let mut letters = Bag::from_iter("abc".chars());
//! letters += &word;
//! assert_eq!(letters.get(&'a'), 6);
//! assert_eq!(&word - &letters, FrozenBag::new());
//! assert!(word < letters);
//! ```
//!
//! Multiplicities can be specified using any numeric type that implements
//! [`IntoCount`], as long as the value is a non-negative integer. This
//! includes floats with an integral value and the arbitrary-precision
//! numbers of the [`num`] crate. Zero counts are accepted, but never stored.
//!
//! # Optional features
//!
//! - `serde`: (de)serialization of bags as maps from values to multiplicities.

mod bag;
mod count;
mod error;
mod iter;
mod mutate;
mod ops;
mod ordered;
pub mod policy;
#[cfg(feature = "serde")]
mod serde;
mod store;

pub use crate::{
    bag::BagBase,
    count::{CountError, IntoCount, validate_count},
    error::BagError,
    iter::{Elements, IntoIter, Iter},
    policy::{Frozen, Mutability, Mutable, Ordered, Ordering, Unordered},
};
pub use indexmap::Equivalent;

/// Mutable, unordered bag
pub type Bag<T> = BagBase<T, Mutable, Unordered>;

/// Immutable, hashable, unordered bag
pub type FrozenBag<T> = BagBase<T, Frozen, Unordered>;

/// Mutable bag that remembers the order of its distinct values
pub type OrderedBag<T> = BagBase<T, Mutable, Ordered>;

/// Immutable, hashable bag that remembers the order of its distinct values
pub type FrozenOrderedBag<T> = BagBase<T, Frozen, Ordered>;

/// Bag of multiplicities, as produced by
/// [`frozen_bag_bag()`](BagBase::frozen_bag_bag)
pub type FrozenBagBag = FrozenBag<usize>;
