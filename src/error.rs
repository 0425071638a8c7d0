//! Errors reported by bag operations

use crate::count::CountError;
use thiserror::Error;

/// Errors that can occur when building, querying or transforming a bag
///
/// Operand type mismatches and unsupported capabilities (e.g. calling
/// [`move_to_end()`](crate::OrderedBag::move_to_end) on an unordered bag or
/// mutating a frozen bag) are not represented here, because they are rejected
/// at compile time.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum BagError {
    /// A count value was rejected by [`validate_count()`](crate::validate_count)
    #[error("invalid count: {0}")]
    InvalidCount(#[from] CountError),

    /// The requested element is not present in the bag
    #[error("element is not present in the bag")]
    NotFound,

    /// Tried to pop an item from an empty bag
    #[error("cannot pop from an empty bag")]
    Empty,

    /// Tried to divide by zero, or by an empty bag
    #[error("division by zero")]
    DivisionByZero,

    /// A multiplicity does not fit in a `usize`
    #[error("multiplicity counter has overflown")]
    CountOverflow,
}
