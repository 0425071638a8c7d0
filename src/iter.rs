//! Iterators over bags
//!
//! Iterators over ordered bags are double-ended, which is what
//! [`reversed()`](crate::BagBase::reversed) builds upon. Iterators over
//! unordered bags are not, since their order carries no meaning.

use crate::policy::{Ordered, Ordering};
use indexmap::map;
use std::{iter::FusedIterator, marker::PhantomData, num::NonZeroUsize};

/// An iterator over the distinct values of a bag, along with their
/// multiplicities.
///
/// This `struct` is created by the [`iter()`](crate::BagBase::iter) method.
/// See its documentation for more.
#[derive(Debug)]
pub struct Iter<'a, T, O> {
    inner: map::Iter<'a, T, NonZeroUsize>,
    ordering: PhantomData<O>,
}
//
impl<'a, T, O: Ordering> Iter<'a, T, O> {
    pub(crate) fn new(inner: map::Iter<'a, T, NonZeroUsize>) -> Self {
        Self {
            inner,
            ordering: PhantomData,
        }
    }
}
//
impl<T, O> Clone for Iter<'_, T, O> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            ordering: PhantomData,
        }
    }
}
//
impl<T> DoubleEndedIterator for Iter<'_, T, Ordered> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, &v)| (k, v))
    }
}
//
impl<T, O> ExactSizeIterator for Iter<'_, T, O> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}
//
impl<T, O> FusedIterator for Iter<'_, T, O> {}
//
impl<'a, T, O> Iterator for Iter<'a, T, O> {
    type Item = (&'a T, NonZeroUsize);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, &v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }

    fn count(self) -> usize
    where
        Self: Sized,
    {
        self.inner.count()
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.inner.nth(n).map(|(k, &v)| (k, v))
    }
}

/// An iterator over the elements of a bag, where each value is repeated as
/// many times as its multiplicity.
///
/// This `struct` is created by the [`elements()`](crate::BagBase::elements)
/// method. See its documentation for more.
#[derive(Debug)]
pub struct Elements<'a, T, O> {
    /// Distinct values that were not reached from either side yet
    entries: map::Iter<'a, T, NonZeroUsize>,

    /// Value being repeated at the front, with remaining repetitions
    front: Option<(&'a T, usize)>,

    /// Value being repeated at the back, with remaining repetitions
    back: Option<(&'a T, usize)>,

    /// Number of elements left to yield
    remaining: usize,

    ordering: PhantomData<O>,
}
//
impl<'a, T, O: Ordering> Elements<'a, T, O> {
    pub(crate) fn new(entries: map::Iter<'a, T, NonZeroUsize>, n_elements: usize) -> Self {
        Self {
            entries,
            front: None,
            back: None,
            remaining: n_elements,
            ordering: PhantomData,
        }
    }
}

/// Yield one repetition from a partially consumed value, if any is left
fn take_one<'a, T>(slot: &mut Option<(&'a T, usize)>) -> Option<&'a T> {
    let (value, left) = slot.as_mut()?;
    if *left == 0 {
        *slot = None;
        return None;
    }
    *left -= 1;
    Some(*value)
}
//
impl<T, O> Clone for Elements<'_, T, O> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            front: self.front,
            back: self.back,
            remaining: self.remaining,
            ordering: PhantomData,
        }
    }
}
//
impl<T> DoubleEndedIterator for Elements<'_, T, Ordered> {
    fn next_back(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(value) = take_one(&mut self.back) {
                self.remaining -= 1;
                return Some(value);
            }
            match self.entries.next_back() {
                Some((value, count)) => self.back = Some((value, count.get())),
                None => {
                    // Finish the value that the front side started on
                    let value = take_one(&mut self.front)?;
                    self.remaining -= 1;
                    return Some(value);
                }
            }
        }
    }
}
//
impl<T, O> ExactSizeIterator for Elements<'_, T, O> {
    fn len(&self) -> usize {
        self.remaining
    }
}
//
impl<T, O> FusedIterator for Elements<'_, T, O> {}
//
impl<'a, T, O> Iterator for Elements<'a, T, O> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(value) = take_one(&mut self.front) {
                self.remaining -= 1;
                return Some(value);
            }
            match self.entries.next() {
                Some((value, count)) => self.front = Some((value, count.get())),
                None => {
                    // Finish the value that the back side started on
                    let value = take_one(&mut self.back)?;
                    self.remaining -= 1;
                    return Some(value);
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn count(self) -> usize
    where
        Self: Sized,
    {
        self.remaining
    }
}

/// An owning iterator over the distinct values of a bag, along with their
/// multiplicities.
///
/// This struct is created by the [`into_iter`](IntoIterator::into_iter)
/// method on [`BagBase`](crate::BagBase) (provided by the [`IntoIterator`]
/// trait). See its documentation for more.
#[derive(Debug)]
pub struct IntoIter<T, O> {
    inner: map::IntoIter<T, NonZeroUsize>,
    ordering: PhantomData<O>,
}
//
impl<T, O: Ordering> IntoIter<T, O> {
    pub(crate) fn new(inner: map::IntoIter<T, NonZeroUsize>) -> Self {
        Self {
            inner,
            ordering: PhantomData,
        }
    }
}
//
impl<T> DoubleEndedIterator for IntoIter<T, Ordered> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}
//
impl<T, O> ExactSizeIterator for IntoIter<T, O> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}
//
impl<T, O> FusedIterator for IntoIter<T, O> {}
//
impl<T, O> Iterator for IntoIter<T, O> {
    type Item = (T, NonZeroUsize);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::policy::Unordered;
    use indexmap::IndexMap;

    fn map(pairs: &[(char, usize)]) -> IndexMap<char, NonZeroUsize> {
        pairs
            .iter()
            .map(|&(c, n)| (c, NonZeroUsize::new(n).unwrap()))
            .collect()
    }

    #[test]
    fn elements_forward() {
        let pairs = map(&[('a', 2), ('b', 1), ('c', 3)]);
        let elements = Elements::<_, Unordered>::new(pairs.iter(), 6);
        assert_eq!(elements.len(), 6);
        assert_eq!(elements.copied().collect::<String>(), "aabccc");
    }

    #[test]
    fn elements_backward() {
        let pairs = map(&[('a', 2), ('b', 1), ('c', 3)]);
        let elements = Elements::<_, Ordered>::new(pairs.iter(), 6);
        assert_eq!(elements.rev().copied().collect::<String>(), "cccbaa");
    }

    #[test]
    fn elements_from_both_ends() {
        let pairs = map(&[('a', 2), ('b', 3)]);
        let mut elements = Elements::<_, Ordered>::new(pairs.iter(), 5);
        assert_eq!(elements.next(), Some(&'a'));
        assert_eq!(elements.next_back(), Some(&'b'));
        assert_eq!(elements.next(), Some(&'a'));
        assert_eq!(elements.len(), 2);
        assert_eq!(elements.next(), Some(&'b'));
        assert_eq!(elements.next_back(), Some(&'b'));
        assert_eq!(elements.next(), None);
        assert_eq!(elements.next_back(), None);
        assert_eq!(elements.len(), 0);

        // Both sides working on the same value
        let single = map(&[('x', 3)]);
        let mut elements = Elements::<_, Ordered>::new(single.iter(), 3);
        assert_eq!(elements.next(), Some(&'x'));
        assert_eq!(elements.next_back(), Some(&'x'));
        assert_eq!(elements.next_back(), Some(&'x'));
        assert_eq!(elements.next(), None);
    }
}
