use crate::Element;
use crate::error::{Error, Result};

/// Checks `index < limit`.
#[inline(always)]
pub(crate) fn check_index(index: usize, limit: usize) -> Result<()> {
    if index < limit {
        Ok(())
    } else {
        Err(Error::invalid("index", index))
    }
}

/// Checks a non-empty span `index..index + length` starting inside `limit`
/// and ending at or before `end_limit`.
///
/// The end is exclusive when `strict` is set, i.e. the span must stop short of
/// `end_limit`.
#[inline]
pub(crate) fn check_span(
    index: usize,
    length: usize,
    limit: usize,
    end_limit: usize,
    strict: bool,
) -> Result<()> {
    check_index(index, limit)?;
    if length == 0 {
        return Err(Error::invalid("length", 0));
    }
    let fits = match index.checked_add(length) {
        Some(end) if strict => end < end_limit,
        Some(end) => end <= end_limit,
        None => false,
    };
    if fits {
        Ok(())
    } else {
        Err(Error::invalid("length", length))
    }
}

macro_rules! impl_slice_eq {
    ($($rhs:ty),+ $(,)?) => {
        $(
            impl<const N: usize> core::cmp::PartialEq<$rhs> for $crate::SpillVec<N> {
                #[inline]
                fn eq(&self, other: &$rhs) -> bool {
                    core::cmp::PartialEq::eq(self.as_slice(), &other[..])
                }
            }
        )+
    };
}

impl_slice_eq!([Element], &[Element], &mut [Element], alloc::vec::Vec<Element>);

impl<const N: usize, const P: usize> core::cmp::PartialEq<[Element; P]> for crate::SpillVec<N> {
    #[inline]
    fn eq(&self, other: &[Element; P]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<const N: usize, const P: usize> core::cmp::PartialEq<&[Element; P]> for crate::SpillVec<N> {
    #[inline]
    fn eq(&self, other: &&[Element; P]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<const N: usize, const P: usize> core::cmp::PartialEq<crate::SpillVec<P>>
    for crate::SpillVec<N>
{
    /// Compares live elements only; capacity and storage location are ignored.
    #[inline]
    fn eq(&self, other: &crate::SpillVec<P>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<const N: usize> Eq for crate::SpillVec<N> {}

impl<const N: usize> core::cmp::PartialOrd for crate::SpillVec<N> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> core::cmp::Ord for crate::SpillVec<N> {
    #[inline]
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl<const N: usize> core::hash::Hash for crate::SpillVec<N> {
    #[inline]
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        core::hash::Hash::hash(self.as_slice(), state);
    }
}

impl<const N: usize> core::fmt::Debug for crate::SpillVec<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Debug::fmt(self.as_slice(), f)
    }
}

impl<const N: usize> core::convert::AsRef<[Element]> for crate::SpillVec<N> {
    #[inline]
    fn as_ref(&self) -> &[Element] {
        self.as_slice()
    }
}

impl<const N: usize> core::convert::AsMut<[Element]> for crate::SpillVec<N> {
    #[inline]
    fn as_mut(&mut self) -> &mut [Element] {
        self.as_mut_slice()
    }
}

impl<const N: usize> core::borrow::Borrow<[Element]> for crate::SpillVec<N> {
    #[inline]
    fn borrow(&self) -> &[Element] {
        self.as_slice()
    }
}

impl<I: core::slice::SliceIndex<[Element]>, const N: usize> core::ops::Index<I>
    for crate::SpillVec<N>
{
    type Output = <I as core::slice::SliceIndex<[Element]>>::Output;
    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        core::ops::Index::index(self.as_slice(), index)
    }
}

impl<I: core::slice::SliceIndex<[Element]>, const N: usize> core::ops::IndexMut<I>
    for crate::SpillVec<N>
{
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        core::ops::IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<'a, const N: usize> IntoIterator for &'a crate::SpillVec<N> {
    type Item = &'a Element;
    type IntoIter = core::slice::Iter<'a, Element>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, const N: usize> IntoIterator for &'a mut crate::SpillVec<N> {
    type Item = &'a mut Element;
    type IntoIter = core::slice::IterMut<'a, Element>;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}
