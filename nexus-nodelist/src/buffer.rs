//! Raw backing buffer for [`NodeList`](crate::NodeList).
//!
//! A single heap allocation of `capacity` handle slots. The buffer never
//! tracks which slots are live; that is the list's job. Growth goes through
//! `alloc`/`realloc`, both of which leave the old block untouched on failure,
//! so a failed grow leaves the buffer exactly as it was.

use core::mem;
use core::ptr::NonNull;
use std::alloc::{Layout, alloc, dealloc, handle_alloc_error, realloc};

use crate::GrowError;

/// Smallest non-zero capacity the buffer grows to.
///
/// Growing from an empty list jumps straight to this many slots, then doubles.
pub const MIN_NON_ZERO_CAPACITY: usize = 4;

/// Heap buffer of `capacity` uninitialized `H` slots.
pub(crate) struct RawBuffer<H> {
    ptr: NonNull<H>,
    capacity: usize,
}

impl<H: Copy> RawBuffer<H> {
    /// Creates a buffer without allocating.
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
        }
    }

    /// Creates a buffer with exactly `capacity` slots.
    ///
    /// A capacity of 0 does not allocate.
    pub(crate) fn try_with_capacity(capacity: usize) -> Result<Self, GrowError> {
        let mut buf = Self::new();
        if capacity > 0 {
            buf.try_resize(capacity)?;
        }
        Ok(buf)
    }

    #[inline]
    pub(crate) const fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub(crate) const fn as_ptr(&self) -> *mut H {
        self.ptr.as_ptr()
    }

    /// Ensures room for `len + additional` slots using the doubling policy.
    ///
    /// New capacity is `max(MIN_NON_ZERO_CAPACITY, 2 * capacity, len + additional)`.
    #[inline]
    pub(crate) fn try_grow(&mut self, len: usize, additional: usize) -> Result<(), GrowError> {
        let required = len
            .checked_add(additional)
            .ok_or(GrowError::CapacityOverflow)?;
        if required <= self.capacity {
            return Ok(());
        }

        let doubled = self.capacity.saturating_mul(2);
        let new_capacity = required.max(doubled).max(MIN_NON_ZERO_CAPACITY);
        self.try_resize(new_capacity)
    }

    /// Moves the contents into an allocation of exactly `new_capacity` slots.
    ///
    /// On error nothing has changed: the old pointer and capacity are kept.
    #[cold]
    fn try_resize(&mut self, new_capacity: usize) -> Result<(), GrowError> {
        debug_assert!(new_capacity > self.capacity, "buffer never shrinks");

        if mem::size_of::<H>() == 0 {
            self.capacity = new_capacity;
            return Ok(());
        }

        let new_layout = Layout::array::<H>(new_capacity).map_err(|_| GrowError::CapacityOverflow)?;

        let raw = if self.capacity == 0 {
            unsafe { alloc(new_layout) }
        } else {
            // Safety: the current layout was valid when it was allocated
            let old_layout = unsafe {
                Layout::from_size_align_unchecked(
                    mem::size_of::<H>() * self.capacity,
                    mem::align_of::<H>(),
                )
            };
            unsafe { realloc(self.ptr.as_ptr().cast::<u8>(), old_layout, new_layout.size()) }
        };

        let Some(ptr) = NonNull::new(raw.cast::<H>()) else {
            return Err(GrowError::AllocFailed {
                capacity: new_capacity,
            });
        };

        log::trace!(
            "node list buffer grew: {} -> {} slots",
            self.capacity,
            new_capacity
        );

        self.ptr = ptr;
        self.capacity = new_capacity;
        Ok(())
    }
}

/// Reports a failed grow on the fail-fast path and terminates the operation.
///
/// Allocation failures go to the global allocation error handler, capacity
/// overflow panics.
#[cold]
#[track_caller]
pub(crate) fn grow_failed<H>(err: GrowError) -> ! {
    log::error!("node list: {}", err);
    match err {
        GrowError::AllocFailed { capacity } => match Layout::array::<H>(capacity) {
            Ok(layout) => handle_alloc_error(layout),
            Err(_) => panic!("capacity overflow"),
        },
        GrowError::CapacityOverflow => panic!("capacity overflow"),
    }
}

impl<H> Drop for RawBuffer<H> {
    fn drop(&mut self) {
        // Handles are Copy: nothing to drop in place, only the block itself.
        if self.capacity == 0 || mem::size_of::<H>() == 0 {
            return;
        }

        unsafe {
            let layout = Layout::from_size_align_unchecked(
                mem::size_of::<H>() * self.capacity,
                mem::align_of::<H>(),
            );
            dealloc(self.ptr.as_ptr().cast::<u8>(), layout);
        }
    }
}

// Safety: RawBuffer uniquely owns its allocation, same as Vec<H>
unsafe impl<H: Send> Send for RawBuffer<H> {}
unsafe impl<H: Sync> Sync for RawBuffer<H> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_does_not_allocate() {
        let buf: RawBuffer<u32> = RawBuffer::new();
        assert_eq!(buf.capacity(), 0);
    }

    #[test]
    fn with_capacity_is_exact() {
        let buf: RawBuffer<u32> = RawBuffer::try_with_capacity(7).unwrap();
        assert_eq!(buf.capacity(), 7);
    }

    #[test]
    fn grow_from_zero_uses_floor() {
        let mut buf: RawBuffer<u32> = RawBuffer::new();
        buf.try_grow(0, 1).unwrap();
        assert_eq!(buf.capacity(), MIN_NON_ZERO_CAPACITY);
    }

    #[test]
    fn grow_doubles() {
        let mut buf: RawBuffer<u32> = RawBuffer::try_with_capacity(4).unwrap();
        buf.try_grow(4, 1).unwrap();
        assert_eq!(buf.capacity(), 8);
        buf.try_grow(8, 1).unwrap();
        assert_eq!(buf.capacity(), 16);
    }

    #[test]
    fn grow_covers_large_request() {
        let mut buf: RawBuffer<u32> = RawBuffer::try_with_capacity(4).unwrap();
        buf.try_grow(4, 100).unwrap();
        assert_eq!(buf.capacity(), 104);
    }

    #[test]
    fn grow_noop_when_room() {
        let mut buf: RawBuffer<u32> = RawBuffer::try_with_capacity(8).unwrap();
        buf.try_grow(3, 2).unwrap();
        assert_eq!(buf.capacity(), 8);
    }

    #[test]
    fn grow_preserves_contents() {
        let mut buf: RawBuffer<u64> = RawBuffer::try_with_capacity(4).unwrap();
        unsafe {
            for i in 0..4 {
                buf.as_ptr().add(i).write(i as u64 * 10);
            }
        }
        buf.try_grow(4, 1).unwrap();
        let contents: Vec<u64> = (0..4).map(|i| unsafe { *buf.as_ptr().add(i) }).collect();
        assert_eq!(contents, vec![0, 10, 20, 30]);
    }

    #[test]
    fn overflow_leaves_buffer_unchanged() {
        let mut buf: RawBuffer<u64> = RawBuffer::try_with_capacity(4).unwrap();
        let before = buf.as_ptr();

        assert_eq!(buf.try_grow(4, usize::MAX), Err(GrowError::CapacityOverflow));
        assert_eq!(buf.try_grow(0, usize::MAX / 2), Err(GrowError::CapacityOverflow));

        assert_eq!(buf.capacity(), 4);
        assert_eq!(buf.as_ptr(), before);
    }

    #[test]
    fn zero_sized_handles() {
        let mut buf: RawBuffer<()> = RawBuffer::new();
        buf.try_grow(0, 10).unwrap();
        assert_eq!(buf.capacity(), 10);
    }
}
