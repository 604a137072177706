//! Backing buffers for [`SpillVec`](crate::SpillVec).
//!
//! Exactly one buffer is live at a time. The enum tag *is* the active view and
//! the capacity is read off the variant, so the two can never disagree.
//!
//! Every slot of either buffer is initialised. Slots that were never written
//! read as `0`; slots vacated by removal keep their last value.

use alloc::vec::Vec;

use crate::Element;
use crate::error::{Error, Result};

/// The live buffer of a container.
#[derive(Clone, Debug)]
pub(crate) enum Storage<const N: usize> {
    /// `N` slots embedded in the container.
    Inline([Element; N]),
    /// A separately allocated buffer. Its length is the capacity.
    Heap(Vec<Element>),
}

impl<const N: usize> Storage<N> {
    #[inline]
    pub(crate) const fn inline() -> Self {
        Self::Inline([0; N])
    }

    /// Inline storage if `capacity <= N`, otherwise a heap buffer of exactly
    /// `capacity` slots.
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self> {
        if capacity > N {
            alloc_slots(capacity).map(Self::Heap)
        } else {
            Ok(Self::inline())
        }
    }

    #[inline]
    pub(crate) fn capacity(&self) -> usize {
        match self {
            Self::Inline(_) => N,
            Self::Heap(buf) => buf.len(),
        }
    }

    #[inline(always)]
    pub(crate) const fn is_inline(&self) -> bool {
        matches!(self, Self::Inline(_))
    }

    /// All addressable slots, live or not.
    #[inline]
    pub(crate) fn slots(&self) -> &[Element] {
        match self {
            Self::Inline(buf) => buf.as_slice(),
            Self::Heap(buf) => buf.as_slice(),
        }
    }

    #[inline]
    pub(crate) fn slots_mut(&mut self) -> &mut [Element] {
        match self {
            Self::Inline(buf) => buf.as_mut_slice(),
            Self::Heap(buf) => buf.as_mut_slice(),
        }
    }

    /// Grows the buffer to exactly `new_capacity` slots, moving to the heap
    /// if needed. Every existing slot keeps its value.
    ///
    /// On failure the buffer is untouched.
    pub(crate) fn grow_to(&mut self, new_capacity: usize) -> Result<()> {
        debug_assert!(new_capacity > self.capacity());
        match self {
            Self::Inline(buf) => {
                let mut heap = alloc_slots(new_capacity)?;
                heap[..N].copy_from_slice(&buf[..]);
                log::trace!("spilled {} inline slots to a heap buffer of {new_capacity}", N);
                *self = Self::Heap(heap);
            }
            Self::Heap(buf) => {
                let old = buf.len();
                realloc_slots(buf, new_capacity)?;
                log::trace!("grew heap buffer from {old} to {new_capacity} slots");
            }
        }
        Ok(())
    }

    /// Sets a heap buffer of exactly `new_capacity` slots (`new_capacity > N`),
    /// carrying over the first `live` slots.
    pub(crate) fn set_heap_capacity(&mut self, new_capacity: usize, live: usize) -> Result<()> {
        debug_assert!(new_capacity > N);
        match self {
            Self::Inline(buf) => {
                let mut heap = alloc_slots(new_capacity)?;
                let live = live.min(N);
                heap[..live].copy_from_slice(&buf[..live]);
                log::trace!("moved {live} inline elements to a heap buffer of {new_capacity}");
                *self = Self::Heap(heap);
            }
            Self::Heap(buf) => {
                let old = buf.len();
                if new_capacity > old {
                    realloc_slots(buf, new_capacity)?;
                } else {
                    buf.truncate(new_capacity);
                    buf.shrink_to_fit();
                }
                log::trace!("resized heap buffer from {old} to {new_capacity} slots");
            }
        }
        Ok(())
    }

    /// Returns to inline storage, carrying over the first `keep` slots
    /// (`keep <= N`) and releasing any heap buffer.
    pub(crate) fn return_inline(&mut self, keep: usize) {
        debug_assert!(keep <= N);
        if let Self::Heap(heap) = self {
            let mut buf = [0; N];
            let keep = keep.min(heap.len());
            buf[..keep].copy_from_slice(&heap[..keep]);
            log::trace!("released heap buffer of {} slots, kept {keep}", heap.len());
            *self = Self::Inline(buf);
        }
    }
}

/// Allocates a zeroed buffer of exactly `slots` elements without aborting on
/// out-of-memory.
pub(crate) fn alloc_slots(slots: usize) -> Result<Vec<Element>> {
    let mut buf = Vec::new();
    if buf.try_reserve_exact(slots).is_err() {
        log::debug!("failed to allocate {slots} slots");
        return Err(Error::AllocationFailure { requested: slots });
    }
    buf.resize(slots, 0);
    Ok(buf)
}

/// Extends `buf` to `slots` elements; the reallocation may move it.
fn realloc_slots(buf: &mut Vec<Element>, slots: usize) -> Result<()> {
    let additional = slots - buf.len();
    if buf.try_reserve_exact(additional).is_err() {
        log::debug!("failed to grow heap buffer from {} to {slots} slots", buf.len());
        return Err(Error::AllocationFailure { requested: slots });
    }
    buf.resize(slots, 0);
    Ok(())
}
