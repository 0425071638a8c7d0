//! Validation of user-provided multiplicities
//!
//! Bags only ever store positive integer multiplicities, but counts can be
//! specified using any numeric type as long as the value is a non-negative
//! integer. This module defines the [`IntoCount`] conversion that all
//! count-accepting entry points go through.

use num::{BigInt, BigUint, Signed, ToPrimitive, Zero, rational::Ratio};
use thiserror::Error;

/// Reasons why a value cannot be used as a bag multiplicity
#[derive(Clone, Copy, Debug, Error, Eq, Hash, PartialEq)]
pub enum CountError {
    /// The value is smaller than zero
    #[error("count must not be negative")]
    Negative,

    /// The value has a fractional part
    #[error("count must be an integer")]
    Fractional,

    /// The value is infinite or NaN
    #[error("count must be finite")]
    NonFinite,

    /// The value does not fit in a `usize`
    #[error("count is too large")]
    TooLarge,
}

/// Conversion of a numeric value into a bag multiplicity
///
/// Zero is a valid count, which bags interpret as "absent". This trait is
/// implemented for all primitive integer and floating-point types, for
/// [`NonZeroUsize`](std::num::NonZeroUsize), and for the arbitrary-precision
/// integers and rationals of the [`num`] crate. Text, byte strings and tuples
/// do not implement it, so they cannot be used as counts.
pub trait IntoCount {
    /// Validate `self` and convert it to a multiplicity
    fn into_count(self) -> Result<usize, CountError>;
}

/// Validate a count value, as done by every bag entry point that accepts
/// user-provided counts
///
/// # Examples
///
/// ```
/// use nifty_bags::{validate_count, CountError};
///
/// assert_eq!(validate_count(3u8), Ok(3));
/// assert_eq!(validate_count(2.0f64), Ok(2));
/// assert_eq!(validate_count(0), Ok(0));
/// assert_eq!(validate_count(-2), Err(CountError::Negative));
/// assert_eq!(validate_count(1.1), Err(CountError::Fractional));
/// assert_eq!(validate_count(f64::INFINITY), Err(CountError::NonFinite));
/// ```
pub fn validate_count<C: IntoCount>(count: C) -> Result<usize, CountError> {
    count.into_count().inspect_err(|error| {
        tracing::debug!(%error, "rejected bag count");
    })
}

macro_rules! impl_unsigned {
    ($($t:ty),*) => {$(
        impl IntoCount for $t {
            #[inline]
            fn into_count(self) -> Result<usize, CountError> {
                usize::try_from(self).map_err(|_| CountError::TooLarge)
            }
        }
    )*};
}
impl_unsigned!(u8, u16, u32, u64, u128, usize);

macro_rules! impl_signed {
    ($($t:ty),*) => {$(
        impl IntoCount for $t {
            #[inline]
            fn into_count(self) -> Result<usize, CountError> {
                if self < 0 {
                    return Err(CountError::Negative);
                }
                usize::try_from(self).map_err(|_| CountError::TooLarge)
            }
        }
    )*};
}
impl_signed!(i8, i16, i32, i64, i128, isize);

macro_rules! impl_float {
    ($($t:ty),*) => {$(
        impl IntoCount for $t {
            fn into_count(self) -> Result<usize, CountError> {
                if !self.is_finite() {
                    return Err(CountError::NonFinite);
                }
                if self < 0.0 {
                    return Err(CountError::Negative);
                }
                if self.fract() != 0.0 {
                    return Err(CountError::Fractional);
                }
                // Above checks guarantee that this is a non-negative integer,
                // so the only way for the conversion to fail is overflow.
                self.to_usize().ok_or(CountError::TooLarge)
            }
        }
    )*};
}
impl_float!(f32, f64);

impl IntoCount for std::num::NonZeroUsize {
    #[inline]
    fn into_count(self) -> Result<usize, CountError> {
        Ok(self.get())
    }
}

impl IntoCount for BigUint {
    fn into_count(self) -> Result<usize, CountError> {
        self.to_usize().ok_or(CountError::TooLarge)
    }
}

impl IntoCount for BigInt {
    fn into_count(self) -> Result<usize, CountError> {
        if self.is_negative() {
            return Err(CountError::Negative);
        }
        self.to_usize().ok_or(CountError::TooLarge)
    }
}

/// Rationals are accepted as long as they reduce to a non-negative integer,
/// which makes them the natural carrier for decimal counts like `3.0`.
impl<I> IntoCount for Ratio<I>
where
    I: Clone + num::Integer + IntoCount,
{
    fn into_count(self) -> Result<usize, CountError> {
        if self.numer().is_zero() {
            return Ok(0);
        }
        // Sign is checked first, as for floats
        if self < Ratio::zero() {
            return Err(CountError::Negative);
        }
        if !self.is_integer() {
            return Err(CountError::Fractional);
        }
        self.to_integer().into_count()
    }
}

impl<C: IntoCount + Copy> IntoCount for &C {
    #[inline]
    fn into_count(self) -> Result<usize, CountError> {
        (*self).into_count()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use num::rational::BigRational;
    use std::num::NonZeroUsize;

    #[test]
    fn integers() {
        assert_eq!(validate_count(0u8), Ok(0));
        assert_eq!(validate_count(42u64), Ok(42));
        assert_eq!(validate_count(7i32), Ok(7));
        assert_eq!(validate_count(0i64), Ok(0));
        assert_eq!(validate_count(-2i32), Err(CountError::Negative));
        assert_eq!(validate_count(-3isize), Err(CountError::Negative));
        assert_eq!(validate_count(u128::MAX), Err(CountError::TooLarge));
        assert_eq!(validate_count(NonZeroUsize::new(5).unwrap()), Ok(5));
        assert_eq!(validate_count(&9u16), Ok(9));
    }

    #[test]
    fn floats() {
        assert_eq!(validate_count(0.0f64), Ok(0));
        assert_eq!(validate_count(-0.0f64), Ok(0));
        assert_eq!(validate_count(2.0f32), Ok(2));
        assert_eq!(validate_count(1.1f64), Err(CountError::Fractional));
        assert_eq!(validate_count(-2.0f64), Err(CountError::Negative));
        assert_eq!(validate_count(f64::INFINITY), Err(CountError::NonFinite));
        assert_eq!(
            validate_count(f64::NEG_INFINITY),
            Err(CountError::NonFinite)
        );
        assert_eq!(validate_count(f32::NAN), Err(CountError::NonFinite));
        assert_eq!(validate_count(1e300f64), Err(CountError::TooLarge));
    }

    #[test]
    fn big_numbers() {
        assert_eq!(validate_count(BigUint::from(12u32)), Ok(12));
        assert_eq!(validate_count(BigInt::from(12)), Ok(12));
        assert_eq!(validate_count(BigInt::from(-3)), Err(CountError::Negative));
        assert_eq!(
            validate_count(BigUint::from(u128::MAX) * BigUint::from(4u8)),
            Err(CountError::TooLarge)
        );
    }

    #[test]
    fn rationals() {
        // 3.0 written as a decimal fraction
        let three = BigRational::new(BigInt::from(30), BigInt::from(10));
        assert_eq!(validate_count(three), Ok(3));
        let zero = BigRational::new(BigInt::from(0), BigInt::from(10));
        assert_eq!(validate_count(zero), Ok(0));
        let minus_three = BigRational::from_integer(BigInt::from(-3));
        assert_eq!(validate_count(minus_three), Err(CountError::Negative));
        assert_eq!(
            validate_count(Ratio::new(11i64, 10)),
            Err(CountError::Fractional)
        );
        assert_eq!(
            validate_count(Ratio::new(-11i64, 10)),
            Err(CountError::Negative)
        );
        assert_eq!(validate_count(Ratio::new(8i64, 2)), Ok(4));
    }
}
