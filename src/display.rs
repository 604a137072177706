//! Textual rendering of element sequences.
//!
//! Rendering only sees an [`ElementView`]: a length and a per-index reader.
//! Capacity and storage location are not part of the view.
//!
//! ```
//! use spillvec::{DisplayMode, SpillVec, display};
//!
//! let vec: SpillVec = SpillVec::from_sequence(&[1, -2, 3])?;
//!
//! let mut out = String::new();
//! let written = display::render_fmt(&vec, &mut out, DisplayMode::SingleLine).unwrap();
//! assert_eq!(out, "{1, -2, 3}\n");
//! assert_eq!(written, out.len());
//!
//! let mut buf = [0u8; 16];
//! let n = display::render_into(&vec, &mut buf, DisplayMode::Raw)?;
//! assert_eq!(&buf[..n], b"1 -2 3");
//! # Ok::<(), spillvec::Error>(())
//! ```

use core::fmt::{self, Write};

use crate::error::{Error, Result};
use crate::{Element, SpillVec};

#[cfg(feature = "std")]
pub use crate::std_io::render_io;

/// Read-only access to an ordered sequence of elements.
pub trait ElementView {
    /// Number of elements.
    fn len(&self) -> usize;

    /// The element at `index`; only called with `index < len()`.
    fn element(&self, index: usize) -> Element;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const N: usize> ElementView for SpillVec<N> {
    #[inline]
    fn len(&self) -> usize {
        SpillVec::len(self)
    }

    #[inline]
    fn element(&self, index: usize) -> Element {
        self.get_unchecked(index)
    }
}

impl ElementView for [Element] {
    #[inline]
    fn len(&self) -> usize {
        <[Element]>::len(self)
    }

    #[inline]
    fn element(&self, index: usize) -> Element {
        self[index]
    }
}

/// Layout used when rendering a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DisplayMode {
    /// `{1, 2, 3}` followed by a newline.
    #[default]
    SingleLine,
    /// One element per line, newline after the last.
    OnePerLine,
    /// Space separated, no trailing newline.
    Raw,
}

impl DisplayMode {
    #[inline]
    const fn separator(self) -> &'static str {
        match self {
            DisplayMode::SingleLine => ", ",
            DisplayMode::OnePerLine => "\n",
            DisplayMode::Raw => " ",
        }
    }
}

/// Writes the rendering without its trailing newline.
fn write_body<V, W>(view: &V, out: &mut W, mode: DisplayMode) -> fmt::Result
where
    V: ElementView + ?Sized,
    W: Write + ?Sized,
{
    if mode == DisplayMode::SingleLine {
        out.write_char('{')?;
    }
    for index in 0..view.len() {
        if index > 0 {
            out.write_str(mode.separator())?;
        }
        write!(out, "{}", view.element(index))?;
    }
    if mode == DisplayMode::SingleLine {
        out.write_char('}')?;
    }
    Ok(())
}

pub(crate) fn write_all<V, W>(view: &V, out: &mut W, mode: DisplayMode) -> fmt::Result
where
    V: ElementView + ?Sized,
    W: Write + ?Sized,
{
    write_body(view, out, mode)?;
    if mode != DisplayMode::Raw {
        out.write_char('\n')?;
    }
    Ok(())
}

/// Counts what passes through to the inner writer.
struct Counting<'a, W: ?Sized> {
    inner: &'a mut W,
    written: usize,
}

impl<W: Write + ?Sized> Write for Counting<'_, W> {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.inner.write_str(s)?;
        self.written += s.len();
        Ok(())
    }
}

/// Discards everything, keeping only the count.
struct Sink(usize);

impl Write for Sink {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}

/// Writes as much as fits into a byte buffer, then refuses.
struct SliceWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = self.buf.len() - self.pos;
        let n = room.min(s.len());
        self.buf[self.pos..self.pos + n].copy_from_slice(&s.as_bytes()[..n]);
        self.pos += n;
        if n < s.len() { Err(fmt::Error) } else { Ok(()) }
    }
}

/// [`SliceWriter`] over UTF-16 code units.
struct WideSliceWriter<'a> {
    buf: &'a mut [u16],
    pos: usize,
}

impl Write for WideSliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for unit in s.encode_utf16() {
            let Some(slot) = self.buf.get_mut(self.pos) else {
                return Err(fmt::Error);
            };
            *slot = unit;
            self.pos += 1;
        }
        Ok(())
    }
}

/// Renders `view` into a string buffer or formatter, returning the number of
/// characters written.
///
/// # Errors
/// Whatever the writer reports.
pub fn render_fmt<V, W>(
    view: &V,
    out: &mut W,
    mode: DisplayMode,
) -> core::result::Result<usize, fmt::Error>
where
    V: ElementView + ?Sized,
    W: Write + ?Sized,
{
    let mut counting = Counting {
        inner: out,
        written: 0,
    };
    write_all(view, &mut counting, mode)?;
    Ok(counting.written)
}

/// Number of characters a full rendering of `view` takes.
pub fn rendered_len<V: ElementView + ?Sized>(view: &V, mode: DisplayMode) -> usize {
    let mut sink = Sink(0);
    // Sink never fails.
    let _ = write_all(view, &mut sink, mode);
    sink.0
}

/// Renders `view` into `buf`, truncating if it does not fit, and returns the
/// number of bytes written.
///
/// Output was truncated iff the result is below
/// [`rendered_len`](crate::display::rendered_len).
///
/// # Errors
/// [`Error::InvalidArgument`] if `buf` is empty.
///
/// # Examples
/// ```
/// # use spillvec::{DisplayMode, SpillVec, display};
/// let vec: SpillVec = SpillVec::from_sequence(&[10, 20, 30])?;
/// let mut buf = [0u8; 6];
/// let n = display::render_into(&vec, &mut buf, DisplayMode::SingleLine)?;
/// assert_eq!(&buf[..n], b"{10, 2");
/// assert!(n < display::rendered_len(&vec, DisplayMode::SingleLine));
/// # Ok::<(), spillvec::Error>(())
/// ```
pub fn render_into<V>(view: &V, buf: &mut [u8], mode: DisplayMode) -> Result<usize>
where
    V: ElementView + ?Sized,
{
    if buf.is_empty() {
        return Err(Error::invalid("buflen", 0));
    }
    let mut writer = SliceWriter { buf, pos: 0 };
    // A refusal only means the buffer is full.
    let _ = write_all(view, &mut writer, mode);
    Ok(writer.pos)
}

/// Renders `view` into a buffer of UTF-16 code units, truncating if it does
/// not fit, and returns the number of code units written.
///
/// The output is ASCII, so one code unit is one character and the count
/// compares directly with [`rendered_len`](crate::display::rendered_len).
///
/// # Errors
/// [`Error::InvalidArgument`] if `buf` is empty.
///
/// # Examples
/// ```
/// # use spillvec::{DisplayMode, SpillVec, display};
/// let vec: SpillVec = SpillVec::from_sequence(&[1, 2])?;
/// let mut buf = [0u16; 8];
/// let n = display::render_into_wide(&vec, &mut buf, DisplayMode::Raw)?;
/// assert_eq!(String::from_utf16(&buf[..n]).unwrap(), "1 2");
/// # Ok::<(), spillvec::Error>(())
/// ```
pub fn render_into_wide<V>(view: &V, buf: &mut [u16], mode: DisplayMode) -> Result<usize>
where
    V: ElementView + ?Sized,
{
    if buf.is_empty() {
        return Err(Error::invalid("buflen", 0));
    }
    let mut writer = WideSliceWriter { buf, pos: 0 };
    // A refusal only means the buffer is full.
    let _ = write_all(view, &mut writer, mode);
    Ok(writer.pos)
}

impl<const N: usize> fmt::Display for SpillVec<N> {
    /// Renders the single-line form, `{1, 2, 3}`, without a newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_body(self, f, DisplayMode::SingleLine)
    }
}
