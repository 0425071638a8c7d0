//! Bag arithmetic
//!
//! Every operation is available as a named method, which reports failures
//! through [`BagError`]. Operators are provided as a thin layer of sugar on
//! top of these methods, and panic on failure like the standard integer
//! operators do.
//!
//! The other operand of a bag-by-bag operation can be any bag variant, and
//! the result has the variant of the left-hand side. For ordered results,
//! values of the left-hand side come first, in their order, followed by new
//! values from the right-hand side, in theirs.

use crate::{
    bag::BagBase,
    error::BagError,
    policy::{Mutability, Mutable, Ordering},
};
use std::{
    hash::Hash,
    ops::{
        Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, Div, DivAssign, Mul, MulAssign,
        Rem, RemAssign, Sub, SubAssign,
    },
};

impl<T: Clone + Hash + Eq, M: Mutability, O: Ordering> BagBase<T, M, O> {
    /// Bag where each multiplicity is the sum of those of `self` and `other`
    ///
    /// # Errors
    ///
    /// [`BagError::CountOverflow`] if the number of elements overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::Bag;
    ///
    /// let a = Bag::from_iter("abbccc".chars());
    /// let b = Bag::from_iter("bcc".chars());
    /// assert_eq!(a.add_counts(&b)?, Bag::from_iter("abbcccbcc".chars()));
    /// assert_eq!(&a + &b, Bag::from_iter("abbcccbcc".chars()));
    /// # Ok::<(), nifty_bags::BagError>(())
    /// ```
    pub fn add_counts<M2, O2>(&self, other: &BagBase<T, M2, O2>) -> Result<Self, BagError> {
        self.store
            .merge_with(&other.store, |x, y| {
                x.checked_add(y).ok_or(BagError::CountOverflow)
            })
            .map(Self::from_store)
    }

    /// Bag where each multiplicity is that of `self` minus that of `other`,
    /// values with no remaining occurences being dropped
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::FrozenBag;
    ///
    /// let bag = FrozenBag::from_iter("abracadabra".chars());
    /// let a = FrozenBag::from_iter("a".chars());
    /// assert_eq!(bag.subtract_floored(&a), FrozenBag::from_iter("abracadabr".chars()));
    /// assert_eq!(&a - &bag, FrozenBag::new());
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn subtract_floored<M2, O2>(&self, other: &BagBase<T, M2, O2>) -> Self {
        Self::from_store(
            self.store
                .shrink_counts(|value, count| count.saturating_sub(other.store.count(value))),
        )
    }

    /// Bag where each multiplicity is the largest of those of `self` and
    /// `other`
    ///
    /// # Errors
    ///
    /// [`BagError::CountOverflow`] if the number of elements overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::Bag;
    ///
    /// let bag = Bag::from_iter("abracadabra".chars());
    /// let other = Bag::from_iter("axyzz".chars());
    /// assert_eq!(bag.union_max(&other)?, Bag::from_iter("abracadabraxyzz".chars()));
    /// # Ok::<(), nifty_bags::BagError>(())
    /// ```
    pub fn union_max<M2, O2>(&self, other: &BagBase<T, M2, O2>) -> Result<Self, BagError> {
        self.store
            .merge_with(&other.store, |x, y| Ok(x.max(y)))
            .map(Self::from_store)
    }

    /// Bag where each multiplicity is the smallest of those of `self` and
    /// `other`
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::Bag;
    ///
    /// let bag = Bag::from_iter("abracadabra".chars());
    /// let other = Bag::from_iter("axyzz".chars());
    /// assert_eq!(bag.intersect_min(&other), Bag::from_iter("a".chars()));
    /// ```
    #[must_use = "Only effect is to produce a result"]
    pub fn intersect_min<M2, O2>(&self, other: &BagBase<T, M2, O2>) -> Self {
        Self::from_store(
            self.store
                .shrink_counts(|value, count| count.min(other.store.count(value))),
        )
    }

    /// Bag where each multiplicity is multiplied by `factor`
    ///
    /// Multiplying by zero gives an empty bag.
    ///
    /// # Errors
    ///
    /// [`BagError::CountOverflow`] if the number of elements overflows.
    pub fn scalar_multiply(&self, factor: usize) -> Result<Self, BagError> {
        self.store
            .map_counts(|count| count.checked_mul(factor).ok_or(BagError::CountOverflow))
            .map(Self::from_store)
    }

    /// Bag where each multiplicity is divided by `divisor`, rounding down
    ///
    /// Values whose multiplicity is smaller than `divisor` are dropped.
    ///
    /// # Errors
    ///
    /// [`BagError::DivisionByZero`] if `divisor` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::Bag;
    ///
    /// let bag = Bag::from_iter("abbccc".chars());
    /// assert_eq!(bag.scalar_floor_div(2)?, Bag::from_iter("bc".chars()));
    /// assert_eq!(&bag / 3, Bag::from_iter("c".chars()));
    /// # Ok::<(), nifty_bags::BagError>(())
    /// ```
    pub fn scalar_floor_div(&self, divisor: usize) -> Result<Self, BagError> {
        if divisor == 0 {
            return Err(BagError::DivisionByZero);
        }
        Ok(Self::from_store(
            self.store.shrink_counts(|_, count| count / divisor),
        ))
    }

    /// Bag where each multiplicity is replaced by its remainder modulo
    /// `divisor`
    ///
    /// # Errors
    ///
    /// [`BagError::DivisionByZero`] if `divisor` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::Bag;
    ///
    /// let bag = Bag::from_iter("abracadabra".chars());
    /// assert_eq!(bag.scalar_modulo(2)?, Bag::from_iter("acd".chars()));
    /// # Ok::<(), nifty_bags::BagError>(())
    /// ```
    pub fn scalar_modulo(&self, divisor: usize) -> Result<Self, BagError> {
        if divisor == 0 {
            return Err(BagError::DivisionByZero);
        }
        Ok(Self::from_store(
            self.store.shrink_counts(|_, count| count % divisor),
        ))
    }

    /// Bag where each multiplicity is raised to the power `exponent`
    ///
    /// # Errors
    ///
    /// [`BagError::CountOverflow`] if a multiplicity or the number of elements
    /// overflows.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::Bag;
    ///
    /// let bag = Bag::from_iter("abracadabra".chars());
    /// let squared = bag.scalar_pow(2)?;
    /// assert_eq!(squared.get(&'a'), 25);
    /// assert_eq!(squared.get(&'b'), 4);
    /// assert_eq!(squared.get(&'c'), 1);
    /// assert_eq!(bag.scalar_pow(0)?, Bag::from_iter("abrcd".chars()));
    /// # Ok::<(), nifty_bags::BagError>(())
    /// ```
    pub fn scalar_pow(&self, exponent: u32) -> Result<Self, BagError> {
        self.store
            .map_counts(|count| count.checked_pow(exponent).ok_or(BagError::CountOverflow))
            .map(Self::from_store)
    }

    /// Number of times that `other` fits into `self`
    ///
    /// This is the largest integer `k` such that `other` multiplied by `k` is
    /// contained in `self`.
    ///
    /// # Errors
    ///
    /// [`BagError::DivisionByZero`] if `other` is empty, as it then fits into
    /// any bag infinitely many times.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::Bag;
    ///
    /// let bag = Bag::from_iter("abracadabra".chars());
    /// assert_eq!(bag.times_contained(&Bag::from_iter("aabr".chars()))?, 2);
    /// assert_eq!(bag.times_contained(&Bag::from_iter("x".chars()))?, 0);
    /// assert_eq!(&bag / &Bag::from_iter("a".chars()), 5);
    /// # Ok::<(), nifty_bags::BagError>(())
    /// ```
    pub fn times_contained<M2, O2>(&self, other: &BagBase<T, M2, O2>) -> Result<usize, BagError> {
        let times = other
            .store
            .value_to_multiplicity
            .iter()
            .map(|(value, count)| self.store.count(value) / count.get())
            .min()
            .ok_or(BagError::DivisionByZero)?;
        tracing::trace!(times, "divided bag by bag");
        Ok(times)
    }

    /// What remains of `self` after taking out `other` as many times as
    /// possible
    ///
    /// This is `self - other * self.times_contained(other)`.
    ///
    /// # Errors
    ///
    /// [`BagError::DivisionByZero`] if `other` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::Bag;
    ///
    /// let bag = Bag::from_iter("abbccc".chars());
    /// let other = Bag::from_iter("bcc".chars());
    /// assert_eq!(bag.remainder(&other)?, Bag::from_iter("abc".chars()));
    /// assert_eq!(&bag % &other, Bag::from_iter("abc".chars()));
    /// # Ok::<(), nifty_bags::BagError>(())
    /// ```
    pub fn remainder<M2, O2>(&self, other: &BagBase<T, M2, O2>) -> Result<Self, BagError> {
        self.div_rem(other).map(|(_, rest)| rest)
    }

    /// Both [`times_contained()`](Self::times_contained) and
    /// [`remainder()`](Self::remainder) in one go
    ///
    /// # Errors
    ///
    /// [`BagError::DivisionByZero`] if `other` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use nifty_bags::FrozenBag;
    ///
    /// let bag = FrozenBag::from_iter("abracadabra".chars());
    /// let (times, rest) = bag.div_rem(&FrozenBag::from_iter("aabr".chars()))?;
    /// assert_eq!(times, 2);
    /// assert_eq!(rest, FrozenBag::from_iter("acd".chars()));
    /// # Ok::<(), nifty_bags::BagError>(())
    /// ```
    pub fn div_rem<M2, O2>(&self, other: &BagBase<T, M2, O2>) -> Result<(usize, Self), BagError> {
        let times = self.times_contained(other)?;
        // other * times is contained in self, so this can neither underflow
        // nor overflow
        let rest = self.store.shrink_counts(|value, count| {
            count - other.store.count(value) * times
        });
        Ok((times, Self::from_store(rest)))
    }
}

/// Turn the failure of an operator's named counterpart into a panic
fn expect_op<R>(result: Result<R, BagError>, op: &str) -> R {
    match result {
        Ok(r) => r,
        Err(error) => panic!("bag {op} failed: {error}"),
    }
}

impl<T, M, O, M2, O2> Add<&BagBase<T, M2, O2>> for &BagBase<T, M, O>
where
    T: Clone + Hash + Eq,
    M: Mutability,
    O: Ordering,
{
    type Output = BagBase<T, M, O>;

    /// Operator form of [`add_counts()`](BagBase::add_counts)
    ///
    /// # Panics
    ///
    /// If the number of elements overflows.
    fn add(self, rhs: &BagBase<T, M2, O2>) -> Self::Output {
        expect_op(self.add_counts(rhs), "addition")
    }
}

impl<T, M, O, M2, O2> BitAnd<&BagBase<T, M2, O2>> for &BagBase<T, M, O>
where
    T: Clone + Hash + Eq,
    M: Mutability,
    O: Ordering,
{
    type Output = BagBase<T, M, O>;

    /// Operator form of [`intersect_min()`](BagBase::intersect_min)
    fn bitand(self, rhs: &BagBase<T, M2, O2>) -> Self::Output {
        self.intersect_min(rhs)
    }
}

impl<T, M, O, M2, O2> BitOr<&BagBase<T, M2, O2>> for &BagBase<T, M, O>
where
    T: Clone + Hash + Eq,
    M: Mutability,
    O: Ordering,
{
    type Output = BagBase<T, M, O>;

    /// Operator form of [`union_max()`](BagBase::union_max)
    ///
    /// # Panics
    ///
    /// If the number of elements overflows.
    fn bitor(self, rhs: &BagBase<T, M2, O2>) -> Self::Output {
        expect_op(self.union_max(rhs), "union")
    }
}

impl<T, M, O, M2, O2> Sub<&BagBase<T, M2, O2>> for &BagBase<T, M, O>
where
    T: Clone + Hash + Eq,
    M: Mutability,
    O: Ordering,
{
    type Output = BagBase<T, M, O>;

    /// Operator form of [`subtract_floored()`](BagBase::subtract_floored)
    fn sub(self, rhs: &BagBase<T, M2, O2>) -> Self::Output {
        self.subtract_floored(rhs)
    }
}

impl<T, M, O> Mul<usize> for &BagBase<T, M, O>
where
    T: Clone + Hash + Eq,
    M: Mutability,
    O: Ordering,
{
    type Output = BagBase<T, M, O>;

    /// Operator form of [`scalar_multiply()`](BagBase::scalar_multiply)
    ///
    /// # Panics
    ///
    /// If the multiplicities overflow.
    fn mul(self, rhs: usize) -> Self::Output {
        expect_op(self.scalar_multiply(rhs), "multiplication")
    }
}

impl<T, M, O> Mul<&BagBase<T, M, O>> for usize
where
    T: Clone + Hash + Eq,
    M: Mutability,
    O: Ordering,
{
    type Output = BagBase<T, M, O>;

    /// Operator form of [`scalar_multiply()`](BagBase::scalar_multiply)
    ///
    /// # Panics
    ///
    /// If the multiplicities overflow.
    fn mul(self, rhs: &BagBase<T, M, O>) -> Self::Output {
        rhs * self
    }
}

impl<T, M, O> Div<usize> for &BagBase<T, M, O>
where
    T: Clone + Hash + Eq,
    M: Mutability,
    O: Ordering,
{
    type Output = BagBase<T, M, O>;

    /// Operator form of [`scalar_floor_div()`](BagBase::scalar_floor_div)
    ///
    /// # Panics
    ///
    /// If `rhs` is zero.
    fn div(self, rhs: usize) -> Self::Output {
        expect_op(self.scalar_floor_div(rhs), "division")
    }
}

impl<T, M, O, M2, O2> Div<&BagBase<T, M2, O2>> for &BagBase<T, M, O>
where
    T: Clone + Hash + Eq,
    M: Mutability,
    O: Ordering,
{
    type Output = usize;

    /// Operator form of [`times_contained()`](BagBase::times_contained)
    ///
    /// # Panics
    ///
    /// If `rhs` is empty.
    fn div(self, rhs: &BagBase<T, M2, O2>) -> usize {
        expect_op(self.times_contained(rhs), "division")
    }
}

impl<T, M, O> Rem<usize> for &BagBase<T, M, O>
where
    T: Clone + Hash + Eq,
    M: Mutability,
    O: Ordering,
{
    type Output = BagBase<T, M, O>;

    /// Operator form of [`scalar_modulo()`](BagBase::scalar_modulo)
    ///
    /// # Panics
    ///
    /// If `rhs` is zero.
    fn rem(self, rhs: usize) -> Self::Output {
        expect_op(self.scalar_modulo(rhs), "remainder")
    }
}

impl<T, M, O, M2, O2> Rem<&BagBase<T, M2, O2>> for &BagBase<T, M, O>
where
    T: Clone + Hash + Eq,
    M: Mutability,
    O: Ordering,
{
    type Output = BagBase<T, M, O>;

    /// Operator form of [`remainder()`](BagBase::remainder)
    ///
    /// # Panics
    ///
    /// If `rhs` is empty.
    fn rem(self, rhs: &BagBase<T, M2, O2>) -> Self::Output {
        expect_op(self.remainder(rhs), "remainder")
    }
}

// Compound assignment is only available on mutable bags. It computes the
// result through the named operation, then replaces the contents of `self`,
// so a failed operation leaves `self` untouched.
macro_rules! assign_ops {
    ($($trait:ident::$method:ident($rhs:ty) => $op:tt),* $(,)?) => {$(
        impl<T, O, M2, O2> $trait<$rhs> for BagBase<T, Mutable, O>
        where
            T: Clone + Hash + Eq,
            O: Ordering,
        {
            fn $method(&mut self, rhs: $rhs) {
                self.store = (&*self $op rhs).store;
            }
        }
    )*};
}
assign_ops!(
    AddAssign::add_assign(&BagBase<T, M2, O2>) => +,
    SubAssign::sub_assign(&BagBase<T, M2, O2>) => -,
    BitOrAssign::bitor_assign(&BagBase<T, M2, O2>) => |,
    BitAndAssign::bitand_assign(&BagBase<T, M2, O2>) => &,
    RemAssign::rem_assign(&BagBase<T, M2, O2>) => %,
);

macro_rules! scalar_assign_ops {
    ($($trait:ident::$method:ident => $op:tt),* $(,)?) => {$(
        impl<T, O> $trait<usize> for BagBase<T, Mutable, O>
        where
            T: Clone + Hash + Eq,
            O: Ordering,
        {
            fn $method(&mut self, rhs: usize) {
                self.store = (&*self $op rhs).store;
            }
        }
    )*};
}
scalar_assign_ops!(
    MulAssign::mul_assign => *,
    DivAssign::div_assign => /,
    RemAssign::rem_assign => %,
);
