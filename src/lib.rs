//! ## Intro
//!
//! A growable vector of `i64` that keeps small contents inline and spills to a
//! heap buffer once they outgrow it.
//!
//! [`SpillVec`] owns exactly one buffer at a time: `N` slots embedded in the
//! container itself, or a separately allocated buffer. Growth moves the data to
//! the heap; shrinking or clearing brings it back inline and releases the
//! allocation.
//!
//! ```
//! # use spillvec::SpillVec;
//! let mut vec: SpillVec<4> = SpillVec::make(4)?;
//! vec.push(1)?;
//! vec.push(2)?;
//! vec.push(3)?;
//! assert!(vec.uses_inline_storage());
//! assert_eq!(vec.capacity(), 4);
//!
//! // Growth spills to the heap: `capacity * 2 + additional` slots.
//! vec.push(4)?;
//! assert!(!vec.uses_inline_storage());
//! assert_eq!(vec.capacity(), 9);
//! assert_eq!(vec, [1, 2, 3, 4]);
//!
//! // Shrinking to the element count brings small contents back inline.
//! vec.shrink()?;
//! assert!(vec.uses_inline_storage());
//! # Ok::<(), spillvec::Error>(())
//! ```
//!
//! Literal contents can be written with the [`spillvec!`] macro:
//!
//! ```
//! # use spillvec::{SpillVec, spillvec};
//! let vec: SpillVec = spillvec![3, 1, 4];
//! assert_eq!(vec.len(), 3);
//! ```
//!
//! ## Errors
//!
//! Every fallible operation returns [`Result`]. A failed call leaves the
//! container exactly as it was; this includes allocation failures, which are
//! reported as [`Error::AllocationFailure`] instead of aborting.
//!
//! ## Capacity contract
//!
//! Capacity never drops below `N`. Reads through [`SpillVec::get`] are checked
//! against the capacity, writes through [`SpillVec::set`] against the length.
//! Slots past the length hold whatever was last stored there (`0` if never
//! written).
//!
//! ## Rendering
//!
//! The [`display`] module renders any [`ElementView`] as text, in one of three
//! [`DisplayMode`]s, into a formatter, a fixed byte buffer or (with `std`) an
//! I/O stream.
//!
//! ## `no_std` support
//!
//! This crate requires only `core` and `alloc`.
//!
//! ## Optional features
//!
//! ### `std`
//!
//! Enables [`render_io`](crate::display::render_io) for [`std::io::Write`]
//! streams.
//!
//! ### `serde`
//!
//! When this optional dependency is enabled, [`SpillVec`] implements
//! `Serialize` and `Deserialize` as a sequence.
#![no_std]

extern crate alloc;

mod error;
mod storage;
mod utils;

pub mod display;
pub mod spill_vec;

#[cfg(feature = "std")]
mod std_io;

#[cfg(feature = "serde")]
mod serde;

#[doc(inline)]
pub use display::{DisplayMode, ElementView};
pub use error::{Error, ErrorKind, Result};
#[doc(inline)]
pub use spill_vec::{SpillVec, swap};

/// The element type held by every container.
pub type Element = i64;

/// Default number of inline slots.
pub const INLINE_CAPACITY: usize = 10;

/// Returned by [`SpillVec::get_unchecked`] for an index past the capacity.
pub const UNCHECKED_SENTINEL: Element = Element::MAX;

/// Returned by [`SpillVec::pop_or_sentinel`] on an empty container.
pub const EMPTY_SENTINEL: Element = Element::MIN;

/// A `SpillVec` with 4 inline slots, for tiny sequences.
///
/// This is an alias for [`SpillVec<4>`].
///
/// # Examples
///
/// ```
/// # use spillvec::SmallSpillVec;
/// let mut vec = SmallSpillVec::new();
/// assert_eq!(vec.capacity(), 4);
///
/// vec.push(1)?;
/// vec.push(2)?;
/// vec.push(3)?;
/// assert!(vec.uses_inline_storage());
///
/// // The push that reaches the capacity spills: 4 * 2 + 1 slots.
/// vec.push(4)?;
/// assert!(!vec.uses_inline_storage());
/// assert_eq!(vec.capacity(), 9);
/// # Ok::<(), spillvec::Error>(())
/// ```
pub type SmallSpillVec = SpillVec<4>;

/// A `SpillVec` with 32 inline slots.
///
/// With the growth policy it holds 31 pushed elements before spilling.
///
/// # Examples
///
/// ```
/// # use spillvec::WideSpillVec;
/// let mut vec = WideSpillVec::new();
/// for i in 0..31 {
///     vec.push(i)?;
/// }
/// assert!(vec.uses_inline_storage());
/// assert_eq!(vec.len(), 31);
///
/// vec.push(31)?;
/// assert!(!vec.uses_inline_storage());
/// assert_eq!(vec.capacity(), 65);
/// # Ok::<(), spillvec::Error>(())
/// ```
pub type WideSpillVec = SpillVec<32>;
