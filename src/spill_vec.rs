use alloc::vec::Vec;
use core::iter::FusedIterator;

use crate::error::{Error, Result};
use crate::storage::{Storage, alloc_slots};
use crate::utils::{check_index, check_span};
use crate::{EMPTY_SENTINEL, Element, INLINE_CAPACITY, UNCHECKED_SENTINEL};

/// A vector of [`Element`]s stored inline while small, moved to the heap when
/// capacity is insufficient.
///
/// The container owns exactly one buffer: `N` inline slots or a heap buffer
/// larger than `N`. Which one is live is a property of the storage itself, so
/// [`uses_inline_storage`](SpillVec::uses_inline_storage) and
/// [`capacity`](SpillVec::capacity) always agree.
///
/// Every growth-causing mutation goes through
/// [`ensure_capacity`](SpillVec::ensure_capacity), which grows the buffer to
/// `capacity * 2 + additional` slots when `len + additional` reaches the
/// capacity.
///
/// # Example
///
/// ```
/// use spillvec::SpillVec;
///
/// let mut vec: SpillVec<4> = SpillVec::new();
/// assert_eq!(vec.len(), 0);
/// assert_eq!(vec.capacity(), 4);
///
/// vec.push(10)?;
/// vec.push(20)?;
/// assert_eq!(vec, [10, 20]);
///
/// vec.insert_range(1, &[11, 12])?;
/// assert!(!vec.uses_inline_storage());
/// assert_eq!(vec, [10, 11, 12, 20]);
///
/// vec.clear();
/// assert!(vec.uses_inline_storage());
/// # Ok::<(), spillvec::Error>(())
/// ```
/// Creates a [`SpillVec`] containing the arguments.
///
/// - `spillvec![]` is [`SpillVec::new`].
/// - `spillvec![a, b, c]` converts the array `[a, b, c]`, staying inline when
///   it fits.
/// - `spillvec![value; n]` is [`SpillVec::make_filled(n, n, value)`] and,
///   like it, returns a [`Result`](crate::Result): `n == 0` is rejected.
///
/// [`SpillVec::make_filled(n, n, value)`]: SpillVec::make_filled
///
/// # Examples
///
/// ```
/// # use spillvec::{SpillVec, spillvec};
/// let vec: SpillVec = spillvec![];
/// assert!(vec.is_empty());
///
/// let vec: SpillVec<4> = spillvec![1, 2, 3];
/// assert_eq!(vec, [1, 2, 3]);
/// assert!(vec.uses_inline_storage());
///
/// let vec: SpillVec<4> = spillvec![7; 6]?;
/// assert_eq!(vec, [7; 6]);
/// assert_eq!(vec.capacity(), 6);
/// # Ok::<(), spillvec::Error>(())
/// ```
#[macro_export]
macro_rules! spillvec {
    [] => { $crate::SpillVec::new() };
    [$elem:expr; $n:expr] => {{
        let n: usize = $n;
        $crate::SpillVec::make_filled(n, n, $elem)
    }};
    [$($item:expr),+ $(,)?] => { $crate::SpillVec::from([ $($item),+ ]) };
}

#[derive(Clone)]
pub struct SpillVec<const N: usize = INLINE_CAPACITY> {
    storage: Storage<N>,
    len: usize,
}

impl<const N: usize> SpillVec<N> {
    /// Constructs an empty `SpillVec` using its inline slots.
    ///
    /// Equivalent to `make(N)`, but infallible and usable in const context.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::SpillVec;
    /// let vec: SpillVec = SpillVec::new();
    /// assert_eq!(vec.capacity(), spillvec::INLINE_CAPACITY);
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self {
            storage: Storage::inline(),
            len: 0,
        }
    }

    /// Creates an empty container able to hold `capacity` elements.
    ///
    /// A heap buffer of exactly `capacity` slots is allocated only when
    /// `capacity > N`; otherwise the inline slots are used and the capacity is
    /// `N`.
    ///
    /// # Errors
    /// - [`Error::InvalidArgument`] if `capacity == 0`.
    /// - [`Error::AllocationFailure`] if the heap buffer cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::SpillVec;
    /// let vec: SpillVec<8> = SpillVec::make(3)?;
    /// assert_eq!(vec.capacity(), 8);
    /// assert!(vec.uses_inline_storage());
    ///
    /// let vec: SpillVec<8> = SpillVec::make(20)?;
    /// assert_eq!(vec.capacity(), 20);
    /// assert!(!vec.uses_inline_storage());
    /// # Ok::<(), spillvec::Error>(())
    /// ```
    pub fn make(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::invalid("capacity", 0));
        }
        Ok(Self {
            storage: Storage::with_capacity(capacity)?,
            len: 0,
        })
    }

    /// Creates a container of `length` copies of `value`, with room for
    /// `capacity` elements.
    ///
    /// # Errors
    /// - [`Error::InvalidArgument`] unless `0 < length <= capacity`.
    /// - [`Error::AllocationFailure`] if the heap buffer cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::SpillVec;
    /// let vec: SpillVec<4> = SpillVec::make_filled(6, 3, -1)?;
    /// assert_eq!(vec, [-1, -1, -1]);
    /// assert_eq!(vec.capacity(), 6);
    /// # Ok::<(), spillvec::Error>(())
    /// ```
    pub fn make_filled(capacity: usize, length: usize, value: Element) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::invalid("capacity", 0));
        }
        if length == 0 || length > capacity {
            return Err(Error::invalid("length", length));
        }
        let mut vec = Self::make(capacity)?;
        vec.storage.slots_mut()[..length].fill(value);
        vec.len = length;
        Ok(vec)
    }

    /// Creates a container holding a copy of `src`, with twice its length as
    /// capacity to leave room for growth.
    ///
    /// The capacity is never below `N`.
    ///
    /// # Errors
    /// - [`Error::InvalidArgument`] if `src` is empty.
    /// - [`Error::AllocationFailure`] if the heap buffer cannot be allocated.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::SpillVec;
    /// let vec: SpillVec<4> = SpillVec::from_sequence(&[10, 20, 30])?;
    /// assert_eq!(vec.capacity(), 6);
    /// assert_eq!(vec, [10, 20, 30]);
    /// # Ok::<(), spillvec::Error>(())
    /// ```
    pub fn from_sequence(src: &[Element]) -> Result<Self> {
        let length = src.len();
        if length == 0 {
            return Err(Error::invalid("length", 0));
        }
        let capacity = length
            .checked_mul(2)
            .ok_or(Error::AllocationFailure { requested: usize::MAX })?;
        let mut vec = Self::make(capacity)?;
        vec.storage.slots_mut()[..length].copy_from_slice(src);
        vec.len = length;
        Ok(vec)
    }

    /// Clones the container, reporting allocation failure instead of aborting.
    ///
    /// The clone has the same capacity and length. A heap buffer of the same
    /// size is allocated whenever the capacity exceeds `N`, however few
    /// elements are live.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::SpillVec;
    /// let mut vec: SpillVec<4> = SpillVec::make(50)?;
    /// vec.push(7)?;
    ///
    /// let copy = vec.try_clone()?;
    /// assert_eq!(copy.capacity(), 50);
    /// assert_eq!(copy, [7]);
    /// # Ok::<(), spillvec::Error>(())
    /// ```
    pub fn try_clone(&self) -> Result<Self> {
        let storage = match &self.storage {
            Storage::Inline(buf) => Storage::Inline(*buf),
            Storage::Heap(buf) => {
                let mut heap = alloc_slots(buf.len())?;
                heap[..self.len].copy_from_slice(&buf[..self.len]);
                Storage::Heap(heap)
            }
        };
        Ok(Self {
            storage,
            len: self.len,
        })
    }

    /// Destroys the container, releasing its heap buffer if one is attached.
    ///
    /// This is what dropping does; it exists for call sites that want the end
    /// of the container's life spelled out.
    #[inline]
    pub fn destroy(self) {
        drop(self);
    }

    /// Returns `true` if the elements live in the inline slots.
    ///
    /// # Example
    ///
    /// ```
    /// # use spillvec::SpillVec;
    /// let mut vec: SpillVec<8> = SpillVec::new();
    /// assert!(vec.uses_inline_storage());
    ///
    /// vec.reserve(10)?;
    /// assert!(!vec.uses_inline_storage());
    /// # Ok::<(), spillvec::Error>(())
    /// ```
    #[inline(always)]
    pub const fn uses_inline_storage(&self) -> bool {
        self.storage.is_inline()
    }

    /// Returns the number of live elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Alias of [`len`](SpillVec::len).
    #[inline]
    pub const fn size(&self) -> usize {
        self.len
    }

    /// Returns `true` if the container holds no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of addressable slots; never less than `N`.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Guarantees room for `additional` more elements.
    ///
    /// When `len + additional` reaches the capacity the buffer grows to
    /// `capacity * 2 + additional` slots. This includes `additional == 0` on a
    /// full container. Inline contents are moved to a new
    /// heap buffer; an existing heap buffer is reallocated, possibly to a new
    /// address.
    ///
    /// # Errors
    /// [`Error::AllocationFailure`] if the buffer cannot grow or the new
    /// capacity overflows. Length, capacity and contents are then unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::SpillVec;
    /// let mut vec: SpillVec<4> = SpillVec::new();
    /// vec.ensure_capacity(3)?;
    /// assert_eq!(vec.capacity(), 4);
    ///
    /// vec.ensure_capacity(4)?;
    /// assert_eq!(vec.capacity(), 12);
    /// # Ok::<(), spillvec::Error>(())
    /// ```
    pub fn ensure_capacity(&mut self, additional: usize) -> Result<()> {
        let capacity = self.capacity();
        let required = self
            .len
            .checked_add(additional)
            .ok_or(Error::AllocationFailure { requested: usize::MAX })?;
        if required < capacity {
            return Ok(());
        }
        let new_capacity = capacity
            .checked_mul(2)
            .and_then(|c| c.checked_add(additional))
            .ok_or(Error::AllocationFailure { requested: usize::MAX })?;
        self.storage.grow_to(new_capacity)
    }

    /// Alias of [`ensure_capacity`](SpillVec::ensure_capacity).
    #[inline]
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        self.ensure_capacity(additional)
    }

    /// Sets the capacity from a requested size.
    ///
    /// - `new_size <= N`: contents move back inline (the first `new_size`
    ///   slots are kept), the heap buffer is released, the capacity becomes
    ///   `N` and **the length becomes `new_size`**, even when that is more
    ///   than the previous length. The extra slots expose whatever they hold.
    /// - `new_size > N`: the heap buffer is allocated or reallocated to
    ///   exactly `new_size` slots. Contents are kept; the length is only
    ///   reduced if it no longer fits.
    ///
    /// # Errors
    /// - [`Error::InvalidArgument`] if `new_size == 0`.
    /// - [`Error::AllocationFailure`] if the buffer cannot be provided; the
    ///   container is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// # use spillvec::SpillVec;
    /// let mut vec: SpillVec<4> = SpillVec::from_sequence(&[1, 2, 3, 4, 5])?;
    /// vec.resize(16)?;
    /// assert_eq!(vec.capacity(), 16);
    /// assert_eq!(vec, [1, 2, 3, 4, 5]);
    ///
    /// vec.resize(2)?;
    /// assert!(vec.uses_inline_storage());
    /// assert_eq!(vec, [1, 2]);
    /// # Ok::<(), spillvec::Error>(())
    /// ```
    pub fn resize(&mut self, new_size: usize) -> Result<()> {
        if new_size == 0 {
            return Err(Error::invalid("new_size", 0));
        }
        if new_size <= N {
            self.storage.return_inline(new_size);
            self.len = new_size;
        } else {
            self.storage.set_heap_capacity(new_size, self.len)?;
            self.len = self.len.min(new_size);
        }
        Ok(())
    }

    /// Drops the capacity to the current length; same as `resize(len)`.
    ///
    /// # Errors
    /// - [`Error::OutOfRange`] if the container is empty.
    /// - [`Error::AllocationFailure`] as for [`resize`](SpillVec::resize).
    pub fn shrink(&mut self) -> Result<()> {
        if self.len == 0 {
            return Err(Error::OutOfRange);
        }
        self.resize(self.len)
    }

    /// Removes every element and returns to the inline slots, releasing any
    /// heap buffer.
    ///
    /// # Examples
    /// ```
    /// # use spillvec::SpillVec;
    /// let mut vec: SpillVec<2> = SpillVec::from_sequence(&[1, 2, 3])?;
    /// assert!(!vec.uses_inline_storage());
    /// vec.clear();
    /// assert!(vec.uses_inline_storage());
    /// assert_eq!(vec.capacity(), 2);
    /// assert!(vec.is_empty());
    /// # Ok::<(), spillvec::Error>(())
    /// ```
    pub fn clear(&mut self) {
        if !self.storage.is_inline() {
            log::trace!("clearing {} elements from the heap", self.len);
            self.storage = Storage::inline();
        }
        self.len = 0;
    }

    /// Reads the slot at `index`, checked against the **capacity**.
    ///
    /// Slots between the length and the capacity can be read; they hold the
    /// last value stored there, or `0`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if `index >= capacity`.
    ///
    /// # Examples
    /// ```
    /// # use spillvec::SpillVec;
    /// let mut vec: SpillVec<4> = SpillVec::new();
    /// vec.push(5)?;
    /// assert_eq!(vec.get(0)?, 5);
    /// assert_eq!(vec.get(3)?, 0);
    /// assert!(vec.get(4).is_err());
    /// # Ok::<(), spillvec::Error>(())
    /// ```
    #[inline]
    pub fn get(&self, index: usize) -> Result<Element> {
        let slots = self.storage.slots();
        check_index(index, slots.len())?;
        Ok(slots[index])
    }

    /// Reads the slot at `index`, returning [`UNCHECKED_SENTINEL`] instead of
    /// failing when `index >= capacity`.
    #[inline]
    pub fn get_unchecked(&self, index: usize) -> Element {
        self.storage
            .slots()
            .get(index)
            .copied()
            .unwrap_or(UNCHECKED_SENTINEL)
    }

    /// Overwrites the live element at `index`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if `index >= len`.
    #[inline]
    pub fn set(&mut self, index: usize, value: Element) -> Result<()> {
        check_index(index, self.len)?;
        self.storage.slots_mut()[index] = value;
        Ok(())
    }

    /// Returns the first live element, or `None` if empty.
    #[inline]
    pub fn first(&self) -> Option<Element> {
        self.as_slice().first().copied()
    }

    /// Returns the last live element, or `None` if empty.
    #[inline]
    pub fn last(&self) -> Option<Element> {
        self.as_slice().last().copied()
    }

    /// Extracts a slice of the live elements.
    ///
    /// The borrow ends before any mutation that could move the buffer.
    #[inline]
    pub fn as_slice(&self) -> &[Element] {
        &self.storage.slots()[..self.len]
    }

    /// Extracts a mutable slice of the live elements.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Element] {
        &mut self.storage.slots_mut()[..self.len]
    }

    /// Returns an iterator over the live elements.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Element> {
        self.as_slice().iter()
    }

    /// Appends an element.
    ///
    /// # Time complexity
    /// Amortized O(1): the growth policy at least doubles the capacity.
    ///
    /// # Errors
    /// [`Error::AllocationFailure`] if growth fails; the value is not added.
    ///
    /// # Examples
    /// ```
    /// # use spillvec::SpillVec;
    /// let mut vec: SpillVec<4> = SpillVec::new();
    /// vec.push(1)?;
    /// vec.push(2)?;
    /// assert_eq!(vec, [1, 2]);
    /// # Ok::<(), spillvec::Error>(())
    /// ```
    #[inline]
    pub fn push(&mut self, value: Element) -> Result<()> {
        self.ensure_capacity(1)?;
        self.storage.slots_mut()[self.len] = value;
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the last element.
    ///
    /// This function does not affect the storage location.
    ///
    /// # Errors
    /// [`Error::OutOfRange`] if the container is empty.
    ///
    /// # Examples
    /// ```
    /// # use spillvec::{Error, SpillVec};
    /// let mut vec: SpillVec<4> = SpillVec::from_sequence(&[1, 2])?;
    /// assert_eq!(vec.pop(), Ok(2));
    /// assert_eq!(vec.pop(), Ok(1));
    /// assert_eq!(vec.pop(), Err(Error::OutOfRange));
    /// # Ok::<(), spillvec::Error>(())
    /// ```
    #[inline]
    pub fn pop(&mut self) -> Result<Element> {
        if self.len == 0 {
            return Err(Error::OutOfRange);
        }
        self.len -= 1;
        Ok(self.storage.slots()[self.len])
    }

    /// Like [`pop`](SpillVec::pop), but returns [`EMPTY_SENTINEL`] when empty.
    #[inline]
    pub fn pop_or_sentinel(&mut self) -> Element {
        self.pop().unwrap_or(EMPTY_SENTINEL)
    }

    /// Inserts `value` at `index`, shifting the elements from `index` onwards
    /// one slot to the right.
    ///
    /// # Errors
    /// - [`Error::InvalidArgument`] if `index >= len`.
    /// - [`Error::AllocationFailure`] if growth fails.
    ///
    /// # Examples
    /// ```
    /// # use spillvec::SpillVec;
    /// let mut vec: SpillVec<4> = SpillVec::from_sequence(&[1, 2, 3])?;
    /// vec.insert(1, 9)?;
    /// assert_eq!(vec, [1, 9, 2, 3]);
    /// # Ok::<(), spillvec::Error>(())
    /// ```
    pub fn insert(&mut self, index: usize, value: Element) -> Result<()> {
        check_index(index, self.len)?;
        self.ensure_capacity(1)?;
        let len = self.len;
        let slots = self.storage.slots_mut();
        slots.copy_within(index..len, index + 1);
        slots[index] = value;
        self.len += 1;
        Ok(())
    }

    /// Inserts a copy of `src` at `index`, shifting the tail right by
    /// `src.len()`. Returns the number of inserted elements.
    ///
    /// The bounds are checked against the capacity *before* any growth:
    /// `index < capacity` and `index + src.len() < capacity`. In addition
    /// `index <= len`, so no gap is ever opened past the end.
    ///
    /// # Errors
    /// - [`Error::InvalidArgument`] if a bound is violated or `src` is empty.
    /// - [`Error::AllocationFailure`] if growth fails.
    ///
    /// # Examples
    /// ```
    /// # use spillvec::SpillVec;
    /// let mut vec: SpillVec<4> = SpillVec::from_sequence(&[1, 2, 3])?;
    /// assert_eq!(vec.insert_range(1, &[99, 98])?, 2);
    /// assert_eq!(vec, [1, 99, 98, 2, 3]);
    /// # Ok::<(), spillvec::Error>(())
    /// ```
    pub fn insert_range(&mut self, index: usize, src: &[Element]) -> Result<usize> {
        let length = src.len();
        let capacity = self.capacity();
        check_span(index, length, capacity, capacity, true)?;
        if index > self.len {
            return Err(Error::invalid("index", index));
        }
        self.ensure_capacity(length)?;
        let len = self.len;
        let slots = self.storage.slots_mut();
        slots.copy_within(index..len, index + length);
        slots[index..index + length].copy_from_slice(src);
        self.len += length;
        Ok(length)
    }

    /// Removes and returns the element at `index`, shifting the tail left.
    ///
    /// Removing the last element is a [`pop`](SpillVec::pop).
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if `index >= len`.
    ///
    /// # Examples
    /// ```
    /// # use spillvec::SpillVec;
    /// let mut vec: SpillVec<4> = SpillVec::from_sequence(&[1, 2, 3])?;
    /// assert_eq!(vec.remove(0)?, 1);
    /// assert_eq!(vec, [2, 3]);
    /// # Ok::<(), spillvec::Error>(())
    /// ```
    pub fn remove(&mut self, index: usize) -> Result<Element> {
        check_index(index, self.len)?;
        if index + 1 == self.len {
            return self.pop();
        }
        let len = self.len;
        let slots = self.storage.slots_mut();
        let value = slots[index];
        slots.copy_within(index + 1..len, index);
        self.len -= 1;
        Ok(value)
    }

    /// Removes `length` elements starting at `index`, shifting the tail left.
    /// Returns the number of removed elements.
    ///
    /// The range must end before the last element: `index + length < len`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if `index >= len`, `length == 0` or the
    /// range reaches the end.
    ///
    /// # Examples
    /// ```
    /// # use spillvec::SpillVec;
    /// let mut vec: SpillVec<4> = SpillVec::from_sequence(&[1, 99, 98, 2, 3])?;
    /// assert_eq!(vec.erase_range(1, 2)?, 2);
    /// assert_eq!(vec, [1, 2, 3]);
    /// # Ok::<(), spillvec::Error>(())
    /// ```
    pub fn erase_range(&mut self, index: usize, length: usize) -> Result<usize> {
        check_span(index, length, self.len, self.len, true)?;
        let len = self.len;
        self.storage
            .slots_mut()
            .copy_within(index + length..len, index);
        self.len -= length;
        Ok(length)
    }

    /// Copies every live element into `buffer`, returning how many were
    /// copied.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if `buffer` is shorter than `len`.
    pub fn to_array(&self, buffer: &mut [Element]) -> Result<usize> {
        if self.len == 0 {
            return Ok(0);
        }
        self.extract(buffer, 0, self.len)
    }

    /// Copies the live elements `index..index + length` into the front of
    /// `buffer`, returning `length`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if `index >= len`, `length == 0`,
    /// `index + length > len` or `buffer` is shorter than `length`.
    ///
    /// # Examples
    /// ```
    /// # use spillvec::SpillVec;
    /// let vec: SpillVec<4> = SpillVec::from_sequence(&[1, 2, 3, 4])?;
    /// let mut out = [0; 2];
    /// assert_eq!(vec.extract(&mut out, 1, 2)?, 2);
    /// assert_eq!(out, [2, 3]);
    /// # Ok::<(), spillvec::Error>(())
    /// ```
    pub fn extract(&self, buffer: &mut [Element], index: usize, length: usize) -> Result<usize> {
        check_span(index, length, self.len, self.len, false)?;
        if buffer.len() < length {
            return Err(Error::invalid("buffer", buffer.len()));
        }
        buffer[..length].copy_from_slice(&self.as_slice()[index..index + length]);
        Ok(length)
    }

    /// Exchanges the whole state of two containers without touching the
    /// elements one by one.
    #[inline]
    pub fn swap_with(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    /// Sets every live element to `value`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if the container is empty.
    #[inline]
    pub fn fill(&mut self, value: Element) -> Result<()> {
        self.fill_range(0, self.len, value)
    }

    /// Sets the live elements `index..index + length` to `value`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if `index >= len`, `length == 0` or
    /// `index + length > len`.
    ///
    /// # Examples
    /// ```
    /// # use spillvec::SpillVec;
    /// let mut vec: SpillVec<4> = SpillVec::from_sequence(&[1, 2, 3, 4])?;
    /// vec.fill_range(1, 2, 0)?;
    /// assert_eq!(vec, [1, 0, 0, 4]);
    /// # Ok::<(), spillvec::Error>(())
    /// ```
    pub fn fill_range(&mut self, index: usize, length: usize, value: Element) -> Result<()> {
        check_span(index, length, self.len, self.len, false)?;
        self.storage.slots_mut()[index..index + length].fill(value);
        Ok(())
    }

    /// Converts into a [`Vec`] holding exactly the live elements.
    pub fn into_vec(self) -> Vec<Element> {
        match self.storage {
            Storage::Inline(buf) => buf[..self.len].to_vec(),
            Storage::Heap(mut buf) => {
                buf.truncate(self.len);
                buf
            }
        }
    }
}

/// Exchanges the whole state of `a` and `b`.
///
/// Heap buffers change owner; nothing is reallocated.
///
/// # Examples
/// ```
/// # use spillvec::{SpillVec, swap};
/// let mut a: SpillVec<2> = SpillVec::from_sequence(&[1, 2, 3])?;
/// let mut b: SpillVec<2> = SpillVec::new();
/// swap(&mut a, &mut b);
/// assert!(a.is_empty());
/// assert_eq!(b, [1, 2, 3]);
/// # Ok::<(), spillvec::Error>(())
/// ```
#[inline]
pub fn swap<const N: usize>(a: &mut SpillVec<N>, b: &mut SpillVec<N>) {
    a.swap_with(b);
}

impl<const N: usize> Default for SpillVec<N> {
    /// Same as [`SpillVec::new`].
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> TryFrom<&[Element]> for SpillVec<N> {
    type Error = Error;

    /// Same as [`SpillVec::from_sequence`].
    #[inline]
    fn try_from(value: &[Element]) -> Result<Self> {
        Self::from_sequence(value)
    }
}

impl<const N: usize> From<Vec<Element>> for SpillVec<N> {
    /// Keeps small contents inline; otherwise the vector becomes the heap
    /// buffer with capacity equal to its length.
    fn from(mut value: Vec<Element>) -> Self {
        let len = value.len();
        if len <= N {
            let mut buf = [0; N];
            buf[..len].copy_from_slice(&value);
            Self {
                storage: Storage::Inline(buf),
                len,
            }
        } else {
            value.shrink_to_fit();
            Self {
                storage: Storage::Heap(value),
                len,
            }
        }
    }
}

impl<const N: usize, const P: usize> From<[Element; P]> for SpillVec<N> {
    #[inline]
    fn from(value: [Element; P]) -> Self {
        if P <= N {
            let mut buf = [0; N];
            buf[..P].copy_from_slice(&value);
            Self {
                storage: Storage::Inline(buf),
                len: P,
            }
        } else {
            Vec::from(value).into()
        }
    }
}

impl<const N: usize> FromIterator<Element> for SpillVec<N> {
    #[inline]
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<Element>>().into()
    }
}

impl<const N: usize> Extend<Element> for SpillVec<N> {
    /// # Panics
    /// Panics if the buffer cannot grow, like [`Vec::extend`].
    fn extend<I: IntoIterator<Item = Element>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (hint, _) = iter.size_hint();
        if hint > 0 {
            if let Err(err) = self.ensure_capacity(hint) {
                panic!("{err}");
            }
        }
        for item in iter {
            if let Err(err) = self.push(item) {
                panic!("{err}");
            }
        }
    }
}

impl<'a, const N: usize> Extend<&'a Element> for SpillVec<N> {
    #[inline]
    fn extend<I: IntoIterator<Item = &'a Element>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<const N: usize> IntoIterator for SpillVec<N> {
    type Item = Element;
    type IntoIter = IntoIter<N>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            end: self.len,
            vec: self,
            start: 0,
        }
    }
}

/// An iterator that consumes a [`SpillVec`] and yields its elements by value.
#[derive(Clone)]
pub struct IntoIter<const N: usize = INLINE_CAPACITY> {
    vec: SpillVec<N>,
    start: usize,
    end: usize,
}

impl<const N: usize> IntoIter<N> {
    /// Returns the remaining elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[Element] {
        &self.vec.as_slice()[self.start..self.end]
    }
}

impl<const N: usize> Iterator for IntoIter<N> {
    type Item = Element;

    #[inline]
    fn next(&mut self) -> Option<Element> {
        if self.start == self.end {
            return None;
        }
        let item = self.vec.as_slice()[self.start];
        self.start += 1;
        Some(item)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.end - self.start;
        (len, Some(len))
    }
}

impl<const N: usize> DoubleEndedIterator for IntoIter<N> {
    #[inline]
    fn next_back(&mut self) -> Option<Element> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        Some(self.vec.as_slice()[self.end])
    }
}

impl<const N: usize> ExactSizeIterator for IntoIter<N> {}

impl<const N: usize> FusedIterator for IntoIter<N> {}

impl<const N: usize> core::fmt::Debug for IntoIter<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use alloc::vec;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    type Small = SpillVec<4>;

    fn contents<const N: usize>(vec: &SpillVec<N>) -> Vec<Element> {
        vec.as_slice().to_vec()
    }

    #[test]
    fn make_respects_inline_floor() {
        for capacity in 1..40 {
            let vec = Small::make(capacity).unwrap();
            assert_eq!(vec.size(), 0);
            assert!(vec.capacity() >= capacity.max(4));
            assert_eq!(vec.uses_inline_storage(), capacity <= 4);
        }
        assert_eq!(Small::make(0).unwrap_err().kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn unsatisfiable_capacity_is_an_allocation_failure() {
        assert_eq!(
            Small::make(usize::MAX).unwrap_err().kind(),
            ErrorKind::AllocationFailure
        );
        assert_eq!(
            Small::make_filled(usize::MAX, 1, 0).unwrap_err().kind(),
            ErrorKind::AllocationFailure
        );
    }

    #[test]
    fn make_filled_validates_length() {
        let vec = Small::make_filled(10, 10, 3).unwrap();
        assert_eq!(vec, [3; 10]);
        assert_eq!(vec.capacity(), 10);

        assert_eq!(
            Small::make_filled(3, 4, 0).unwrap_err(),
            Error::invalid("length", 4)
        );
        assert_eq!(
            Small::make_filled(3, 0, 0).unwrap_err(),
            Error::invalid("length", 0)
        );
        assert_eq!(
            Small::make_filled(0, 0, 0).unwrap_err(),
            Error::invalid("capacity", 0)
        );
    }

    #[test]
    fn worked_push_example() {
        let mut vec = Small::make(4).unwrap();
        for v in [1, 2, 3] {
            vec.push(v).unwrap();
        }
        assert_eq!(vec.size(), 3);
        assert_eq!(vec.capacity(), 4);
        assert_eq!(vec, [1, 2, 3]);

        vec.push(4).unwrap();
        vec.push(5).unwrap();
        assert!(vec.capacity() >= 6);
        assert_eq!(vec.size(), 5);
        assert_eq!(vec, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn from_sequence_doubles_capacity() {
        let vec = Small::from_sequence(&[10, 20, 30]).unwrap();
        assert_eq!(vec.capacity(), 6);
        assert_eq!(vec.size(), 3);
        assert_eq!(vec, [10, 20, 30]);

        let vec: SpillVec = SpillVec::from_sequence(&[10, 20, 30]).unwrap();
        assert_eq!(vec.capacity(), INLINE_CAPACITY);
        assert!(vec.uses_inline_storage());

        assert_eq!(
            Small::from_sequence(&[]).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }

    #[test]
    fn push_pop_reverses() {
        let mut vec = Small::new();
        for v in 0..50 {
            vec.push(v).unwrap();
        }
        for v in (0..50).rev() {
            assert_eq!(vec.pop(), Ok(v));
        }
        assert_eq!(vec.size(), 0);
        assert_eq!(vec.pop(), Err(Error::OutOfRange));
        assert_eq!(vec.pop_or_sentinel(), EMPTY_SENTINEL);
    }

    #[test]
    fn growth_preserves_order() {
        for k in 1..20 {
            let mut vec = Small::new();
            for v in 0..(4 + k) as Element {
                vec.push(v * 3).unwrap();
            }
            assert!(!vec.uses_inline_storage());
            let expected: Vec<Element> = (0..(4 + k) as Element).map(|v| v * 3).collect();
            assert_eq!(vec, expected);
        }
    }

    #[test]
    fn growth_policy_is_double_plus_requirement() {
        let mut vec = Small::new();
        vec.ensure_capacity(4).unwrap();
        assert_eq!(vec.capacity(), 12);
        vec.ensure_capacity(11).unwrap();
        assert_eq!(vec.capacity(), 12);
        vec.ensure_capacity(12).unwrap();
        assert_eq!(vec.capacity(), 36);
        vec.ensure_capacity(0).unwrap();
        assert_eq!(vec.capacity(), 36);
    }

    #[test]
    fn zero_additional_grows_only_when_full() {
        let mut vec = Small::make(64).unwrap();
        for v in 0..6 {
            vec.push(v).unwrap();
        }
        vec.ensure_capacity(0).unwrap();
        assert_eq!(vec.capacity(), 64);

        vec.shrink().unwrap();
        assert_eq!(vec.capacity(), 6);
        vec.ensure_capacity(0).unwrap();
        assert_eq!(vec.capacity(), 12);
        assert_eq!(vec, [0, 1, 2, 3, 4, 5]);

        vec.shrink().unwrap();
        vec.extend(core::iter::empty::<Element>());
        assert_eq!(vec.capacity(), 6);
    }

    #[test]
    fn failed_growth_leaves_state_intact() {
        let mut vec = Small::from_sequence(&[1, 2, 3]).unwrap();
        let err = vec.ensure_capacity(usize::MAX).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AllocationFailure);
        assert_eq!(vec, [1, 2, 3]);
        assert_eq!(vec.capacity(), 6);

        let err = vec.ensure_capacity(usize::MAX / 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AllocationFailure);
        assert_eq!(vec, [1, 2, 3]);
        assert_eq!(vec.capacity(), 6);

        assert_eq!(vec.resize(usize::MAX).unwrap_err().kind(), ErrorKind::AllocationFailure);
        assert_eq!(vec, [1, 2, 3]);
        assert_eq!(vec.capacity(), 6);
    }

    #[test]
    fn resize_is_idempotent() {
        for n in [1, 3, 4, 5, 9, 30] {
            let mut vec = Small::from_sequence(&[1, 2, 3, 4, 5, 6, 7]).unwrap();
            vec.resize(n).unwrap();
            let (len, cap) = (vec.size(), vec.capacity());
            let snapshot = contents(&vec);
            vec.resize(n).unwrap();
            assert_eq!((vec.size(), vec.capacity()), (len, cap));
            assert_eq!(contents(&vec), snapshot);
        }
    }

    #[test]
    fn resize_below_inline_sets_length() {
        let mut vec = Small::from_sequence(&[1, 2]).unwrap();
        assert!(vec.uses_inline_storage());
        vec.resize(4).unwrap();
        assert_eq!(vec.size(), 4);
        assert_eq!(vec, [1, 2, 0, 0]);

        let mut vec = Small::from_sequence(&[1, 2, 3, 4, 5]).unwrap();
        vec.resize(3).unwrap();
        assert!(vec.uses_inline_storage());
        assert_eq!(vec.capacity(), 4);
        assert_eq!(vec, [1, 2, 3]);

        assert_eq!(vec.resize(0).unwrap_err(), Error::invalid("new_size", 0));
    }

    #[test]
    fn resize_above_inline_keeps_length() {
        let mut vec = Small::from_sequence(&[1, 2, 3]).unwrap();
        vec.resize(20).unwrap();
        assert_eq!(vec.capacity(), 20);
        assert_eq!(vec, [1, 2, 3]);

        let mut vec = Small::make_filled(10, 10, 1).unwrap();
        vec.resize(6).unwrap();
        assert_eq!(vec.capacity(), 6);
        assert_eq!(vec.size(), 6);
    }

    #[test]
    fn shrink_matches_length() {
        let mut vec = Small::make(64).unwrap();
        for v in 0..6 {
            vec.push(v).unwrap();
        }
        vec.shrink().unwrap();
        assert_eq!(vec.capacity(), 6);
        assert_eq!(vec, [0, 1, 2, 3, 4, 5]);

        let mut empty = Small::new();
        assert_eq!(empty.shrink(), Err(Error::OutOfRange));
    }

    #[test]
    fn get_is_checked_against_capacity() {
        let mut vec = Small::new();
        vec.push(8).unwrap();
        assert_eq!(vec.get(0), Ok(8));
        assert_eq!(vec.get(3), Ok(0));
        assert_eq!(vec.get(4), Err(Error::invalid("index", 4)));
        assert_eq!(vec.get_unchecked(3), 0);
        assert_eq!(vec.get_unchecked(4), UNCHECKED_SENTINEL);

        vec.push(9).unwrap();
        vec.pop().unwrap();
        assert_eq!(vec.get(1), Ok(9));
    }

    #[test]
    fn set_is_checked_against_length() {
        let mut vec = Small::from_sequence(&[1, 2]).unwrap();
        vec.set(1, 5).unwrap();
        assert_eq!(vec, [1, 5]);
        assert_eq!(vec.set(2, 0), Err(Error::invalid("index", 2)));
        assert_eq!(vec, [1, 5]);
    }

    #[test]
    fn insert_then_remove_restores() {
        let original = [4, 8, 15, 16, 23, 42];
        for i in 0..original.len() {
            let mut vec = Small::from_sequence(&original).unwrap();
            vec.insert(i, -7).unwrap();
            assert_eq!(vec.get(i), Ok(-7));
            assert_eq!(vec.size(), original.len() + 1);
            assert_eq!(vec.remove(i), Ok(-7));
            assert_eq!(vec, original);
        }
    }

    #[test]
    fn insert_rejects_index_at_or_past_length() {
        let mut vec = Small::new();
        assert_eq!(vec.insert(0, 1), Err(Error::invalid("index", 0)));
        vec.push(1).unwrap();
        assert_eq!(vec.insert(1, 2), Err(Error::invalid("index", 1)));
        assert_eq!(vec, [1]);
    }

    #[test]
    fn insert_across_spill() {
        let mut vec = Small::from_sequence(&[1, 2]).unwrap();
        vec.insert(0, 0).unwrap();
        vec.insert(1, 9).unwrap();
        assert!(!vec.uses_inline_storage());
        assert_eq!(vec, [0, 9, 1, 2]);
    }

    #[test]
    fn insert_range_and_erase_range_examples() {
        let mut vec = Small::from_sequence(&[1, 2, 3]).unwrap();
        assert_eq!(vec.insert_range(1, &[99, 98]), Ok(2));
        assert_eq!(vec, [1, 99, 98, 2, 3]);

        assert_eq!(vec.erase_range(1, 2), Ok(2));
        assert_eq!(vec, [1, 2, 3]);
    }

    #[test]
    fn insert_range_bounds() {
        let mut vec = Small::from_sequence(&[1, 2, 3]).unwrap();
        assert_eq!(vec.insert_range(6, &[1]), Err(Error::invalid("index", 6)));
        assert_eq!(vec.insert_range(0, &[]), Err(Error::invalid("length", 0)));
        assert_eq!(
            vec.insert_range(3, &[7, 7, 7]),
            Err(Error::invalid("length", 3))
        );
        assert_eq!(vec.insert_range(4, &[7]), Err(Error::invalid("index", 4)));
        assert_eq!(vec, [1, 2, 3]);

        assert_eq!(vec.insert_range(3, &[4, 5]), Ok(2));
        assert_eq!(vec, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn erase_range_bounds() {
        let mut vec = Small::from_sequence(&[1, 2, 3, 4]).unwrap();
        assert_eq!(vec.erase_range(4, 1), Err(Error::invalid("index", 4)));
        assert_eq!(vec.erase_range(0, 0), Err(Error::invalid("length", 0)));
        assert_eq!(vec.erase_range(2, 2), Err(Error::invalid("length", 2)));
        assert_eq!(vec, [1, 2, 3, 4]);
        assert_eq!(vec.erase_range(0, 3), Ok(3));
        assert_eq!(vec, [4]);
    }

    #[test]
    fn remove_last_is_pop() {
        let mut vec = Small::from_sequence(&[1, 2, 3]).unwrap();
        assert_eq!(vec.remove(2), Ok(3));
        assert_eq!(vec.remove(5), Err(Error::invalid("index", 5)));
        assert_eq!(vec, [1, 2]);
    }

    #[test]
    fn clone_copies_capacity() {
        let mut vec = Small::make(50).unwrap();
        vec.push(1).unwrap();
        let copy = vec.try_clone().unwrap();
        assert_eq!(copy.capacity(), 50);
        assert!(!copy.uses_inline_storage());
        assert_eq!(copy, [1]);

        let derived = vec.clone();
        assert_eq!(derived.capacity(), 50);

        vec.set(0, 2).unwrap();
        assert_eq!(copy, [1]);
    }

    #[test]
    fn swap_twice_restores() {
        let mut a = Small::from_sequence(&[1, 2, 3, 4, 5]).unwrap();
        let mut b = Small::from_sequence(&[9]).unwrap();
        let (a_cap, b_cap) = (a.capacity(), b.capacity());

        swap(&mut a, &mut b);
        assert_eq!(a, [9]);
        assert_eq!(b, [1, 2, 3, 4, 5]);
        assert!(a.uses_inline_storage());
        assert!(!b.uses_inline_storage());

        a.swap_with(&mut b);
        assert_eq!(a, [1, 2, 3, 4, 5]);
        assert_eq!(b, [9]);
        assert_eq!((a.capacity(), b.capacity()), (a_cap, b_cap));
    }

    #[test]
    fn fill_and_fill_range() {
        let mut vec = Small::from_sequence(&[1, 2, 3, 4]).unwrap();
        vec.fill(7).unwrap();
        assert_eq!(vec, [7, 7, 7, 7]);
        vec.fill_range(3, 1, 0).unwrap();
        assert_eq!(vec, [7, 7, 7, 0]);
        assert_eq!(vec.fill_range(3, 2, 0), Err(Error::invalid("length", 2)));

        let mut empty = Small::new();
        assert_eq!(empty.fill(1).unwrap_err().kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn ends_and_iteration() {
        let mut vec = Small::new();
        assert_eq!((vec.first(), vec.last()), (None, None));
        vec.extend([3, 1, 4, 1, 5]);
        assert_eq!((vec.first(), vec.last()), (Some(3), Some(5)));
        assert_eq!(vec.iter().sum::<Element>(), 14);
        for v in &mut vec {
            *v *= 2;
        }
        assert_eq!(vec[1..3], [2, 8]);
    }

    #[test]
    fn clear_releases_heap() {
        let mut vec = Small::from_sequence(&[1, 2, 3, 4, 5]).unwrap();
        vec.clear();
        assert!(vec.uses_inline_storage());
        assert_eq!(vec.capacity(), 4);
        assert!(vec.is_empty());
        vec.clear();
        assert!(vec.is_empty());
    }

    #[test]
    fn extract_and_to_array() {
        let vec = Small::from_sequence(&[5, 6, 7]).unwrap();
        let mut out = [0; 3];
        assert_eq!(vec.to_array(&mut out), Ok(3));
        assert_eq!(out, [5, 6, 7]);

        let mut short = [0; 1];
        assert_eq!(vec.to_array(&mut short), Err(Error::invalid("buffer", 1)));
        assert_eq!(vec.extract(&mut out, 1, 3), Err(Error::invalid("length", 3)));
        assert_eq!(Small::new().to_array(&mut out), Ok(0));
    }

    #[test]
    fn macro_forms() {
        let vec: Small = crate::spillvec![];
        assert!(vec.is_empty());
        assert!(vec.uses_inline_storage());

        let vec: Small = crate::spillvec![4, 5, 6, 7, 8,];
        assert_eq!(vec, [4, 5, 6, 7, 8]);
        assert!(!vec.uses_inline_storage());

        let vec: Small = crate::spillvec![-1; 3].unwrap();
        assert_eq!(vec, [-1, -1, -1]);
        assert_eq!(vec.capacity(), 4);

        let err = crate::spillvec![0; 0].map(|v: Small| v.len()).unwrap_err();
        assert_eq!(err, Error::invalid("capacity", 0));
    }

    #[test]
    fn conversions() {
        let vec: Small = [1, 2].into();
        assert!(vec.uses_inline_storage());
        let vec: Small = [1, 2, 3, 4, 5].into();
        assert!(!vec.uses_inline_storage());
        assert_eq!(vec.capacity(), 5);

        let vec: Small = (0..3).collect();
        assert_eq!(vec, [0, 1, 2]);
        assert_eq!(vec.clone().into_vec(), vec![0, 1, 2]);

        let mut vec = Small::try_from(&[1][..]).unwrap();
        vec.extend([2, 3, 4, 5]);
        vec.extend(&[6]);
        assert_eq!(vec, [1, 2, 3, 4, 5, 6]);

        let collected: Vec<Element> = vec.into_iter().rev().collect();
        assert_eq!(collected, [6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn matches_vec_model() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut vec = Small::new();
        let mut model: Vec<Element> = Vec::new();

        for _ in 0..2000 {
            match rng.random_range(0..6) {
                0 | 1 => {
                    let v = rng.random_range(-100..100);
                    vec.push(v).unwrap();
                    model.push(v);
                }
                2 => assert_eq!(vec.pop().ok(), model.pop()),
                3 if !model.is_empty() => {
                    let i = rng.random_range(0..model.len());
                    let v = rng.random_range(-100..100);
                    vec.insert(i, v).unwrap();
                    model.insert(i, v);
                }
                4 if !model.is_empty() => {
                    let i = rng.random_range(0..model.len());
                    assert_eq!(vec.remove(i).ok(), Some(model.remove(i)));
                }
                5 if model.len() > 2 && rng.random_bool(0.1) => {
                    vec.shrink().unwrap();
                    assert_eq!(vec.capacity(), model.len().max(4));
                }
                _ => {}
            }
            assert_eq!(vec, model);
            assert!(vec.len() <= vec.capacity());
            assert!(vec.capacity() >= 4);
            assert_eq!(vec.uses_inline_storage(), vec.capacity() == 4);
        }
    }
}
