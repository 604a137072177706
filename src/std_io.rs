extern crate std;

use core::fmt;
use std::io::{self, Write};

use crate::display::{self, DisplayMode, ElementView};
use crate::SpillVec;

/// Forwards formatted text to an I/O stream, keeping the first I/O error.
struct IoAdapter<'a, W: ?Sized> {
    inner: &'a mut W,
    written: usize,
    error: Option<io::Error>,
}

impl<W: Write + ?Sized> fmt::Write for IoAdapter<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        match self.inner.write_all(s.as_bytes()) {
            Ok(()) => {
                self.written += s.len();
                Ok(())
            }
            Err(err) => {
                self.error = Some(err);
                Err(fmt::Error)
            }
        }
    }
}

/// Renders `view` to an I/O stream, returning the number of characters
/// written.
///
/// # Errors
/// The first error reported by the stream.
///
/// # Examples
/// ```
/// # use spillvec::{DisplayMode, SpillVec, display};
/// let vec: SpillVec = SpillVec::from_sequence(&[4, 5])?;
/// let mut out: Vec<u8> = Vec::new();
/// let n = display::render_io(&vec, &mut out, DisplayMode::OnePerLine).unwrap();
/// assert_eq!(out, b"4\n5\n");
/// assert_eq!(n, 4);
/// # Ok::<(), spillvec::Error>(())
/// ```
pub fn render_io<V, W>(view: &V, out: &mut W, mode: DisplayMode) -> io::Result<usize>
where
    V: ElementView + ?Sized,
    W: Write + ?Sized,
{
    let mut adapter = IoAdapter {
        inner: out,
        written: 0,
        error: None,
    };
    match display::write_all(view, &mut adapter, mode) {
        Ok(()) => Ok(adapter.written),
        Err(_) => Err(adapter
            .error
            .unwrap_or_else(|| io::Error::other("formatter error"))),
    }
}

impl<const N: usize> SpillVec<N> {
    /// Renders the live elements to an I/O stream.
    ///
    /// See [`render_io`](crate::display::render_io).
    #[inline]
    pub fn write_to<W>(&self, out: &mut W, mode: DisplayMode) -> io::Result<usize>
    where
        W: Write + ?Sized,
    {
        render_io(self, out, mode)
    }
}
