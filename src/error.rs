use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for [`SpillVec`](crate::SpillVec) operations.
///
/// Every failing operation is a no-op: the container keeps its last valid
/// state, including after an allocation failure.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum Error {
    /// A required handle was missing.
    ///
    /// Safe references cannot be null, so the crate itself never produces this;
    /// it completes the taxonomy for callers bridging nullable handles.
    #[error("Null reference: a required container or buffer was missing")]
    NullReference,
    /// A precondition on an index, length or capacity was violated
    #[error("Invalid argument: {parameter} = {value}")]
    InvalidArgument {
        /// Name of the offending parameter
        parameter: &'static str,
        /// Provided value
        value: usize,
    },
    /// The heap buffer could not be allocated or grown
    #[error("Allocation failure: could not provide {requested} slots")]
    AllocationFailure {
        /// Number of element slots requested
        requested: usize,
    },
    /// Nothing to remove: the container is empty
    #[error("Out of range: the container is empty")]
    OutOfRange,
}

/// The bare error taxonomy, without context.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ErrorKind {
    /// See [`Error::NullReference`].
    NullReference,
    /// See [`Error::InvalidArgument`].
    InvalidArgument,
    /// See [`Error::AllocationFailure`].
    AllocationFailure,
    /// See [`Error::OutOfRange`].
    OutOfRange,
}

impl Error {
    /// Returns the kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::NullReference => ErrorKind::NullReference,
            Error::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Error::AllocationFailure { .. } => ErrorKind::AllocationFailure,
            Error::OutOfRange => ErrorKind::OutOfRange,
        }
    }

    #[inline]
    pub(crate) const fn invalid(parameter: &'static str, value: usize) -> Self {
        Error::InvalidArgument { parameter, value }
    }
}
