// nexus-nodelist/src/error.rs

//! Error types for checked list operations.

use core::fmt;

/// Index outside the live range of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutOfBounds {
    /// The index that was requested.
    pub index: usize,
    /// Length of the list at the time of the call.
    pub len: usize,
}

impl fmt::Display for OutOfBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "index {} out of bounds for length {}", self.index, self.len)
    }
}

impl std::error::Error for OutOfBounds {}

/// Backing buffer could not grow.
///
/// The list is left exactly as it was before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowError {
    /// Requested capacity overflows `usize` or `isize::MAX` bytes.
    CapacityOverflow,
    /// The allocator returned null for the requested capacity.
    AllocFailed {
        /// Capacity (in slots) that was requested.
        capacity: usize,
    },
}

impl fmt::Display for GrowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow => write!(f, "capacity overflow"),
            Self::AllocFailed { capacity } => {
                write!(f, "failed to allocate buffer of {} slots", capacity)
            }
        }
    }
}

impl std::error::Error for GrowError {}

/// Positional insertion failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertError {
    /// Index greater than the list length.
    OutOfBounds(OutOfBounds),
    /// Buffer was full and could not grow.
    Grow(GrowError),
}

impl From<OutOfBounds> for InsertError {
    fn from(err: OutOfBounds) -> Self {
        Self::OutOfBounds(err)
    }
}

impl From<GrowError> for InsertError {
    fn from(err: GrowError) -> Self {
        Self::Grow(err)
    }
}

impl fmt::Display for InsertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(err) => write!(f, "insert: {}", err),
            Self::Grow(err) => write!(f, "insert: {}", err),
        }
    }
}

impl std::error::Error for InsertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::OutOfBounds(err) => Some(err),
            Self::Grow(err) => Some(err),
        }
    }
}
