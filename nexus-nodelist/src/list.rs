//! Ordered list of node handles with positional insert and remove.
//!
//! A [`NodeList`] is the child collection of one parent node in a tree owned
//! elsewhere. It stores handles, never nodes: dropping the list, removing a
//! handle, or clearing the list has no effect on the nodes themselves.
//!
//! # Fail-fast vs Checked
//!
//! Every operation with a precondition comes in two flavours:
//!
//! ```
//! use nexus_nodelist::{NodeList, OutOfBounds};
//!
//! let mut children: NodeList<u32> = NodeList::new();
//! children.push(10);
//!
//! // Checked - contract violations come back as values
//! assert_eq!(children.try_remove(1), Err(OutOfBounds { index: 1, len: 1 }));
//!
//! // Fail-fast - contract violations log and panic
//! assert_eq!(children.remove(0), 10);
//! ```
//!
//! A checked call that fails leaves the list exactly as it was.
//!
//! # Example
//!
//! ```
//! use nexus_nodelist::NodeList;
//!
//! let (a, b, c) = (1u32, 2u32, 3u32);
//!
//! let mut children: NodeList<u32> = NodeList::with_capacity(0);
//! children.push(a);
//! children.push(b);
//! children.insert(1, c);
//! assert_eq!(children.as_slice(), &[a, c, b]);
//!
//! // Remove by identity - not finding it is a normal outcome
//! assert_eq!(children.remove_node(b), Some(b));
//! assert_eq!(children.remove_node(b), None);
//! assert_eq!(children.len(), 2);
//! ```

use core::fmt;
use core::iter::FusedIterator;
use core::ptr;
use core::slice;

use crate::buffer::{self, RawBuffer};
use crate::{GrowError, Handle, InsertError, OutOfBounds};

/// Growable, order-preserving list of non-owning node handles.
///
/// Slots `[0, len)` of the backing buffer hold live handles in positional
/// order; slots `[len, capacity)` are uninitialized. The buffer doubles when
/// full (starting at [`MIN_NON_ZERO_CAPACITY`](crate::MIN_NON_ZERO_CAPACITY))
/// and never shrinks.
pub struct NodeList<H: Handle = u32> {
    buf: RawBuffer<H>,
    len: usize,
}

impl<H: Handle> NodeList<H> {
    /// Creates an empty list without allocating.
    #[inline]
    pub const fn new() -> Self {
        Self {
            buf: RawBuffer::new(),
            len: 0,
        }
    }

    /// Creates an empty list with exactly `capacity` slots.
    ///
    /// A capacity of 0 allocates nothing; the first insertion grows the buffer.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow. Aborts via [`std::alloc::handle_alloc_error`]
    /// if the allocation fails.
    #[track_caller]
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(list) => list,
            Err(err) => buffer::grow_failed::<H>(err),
        }
    }

    /// Creates an empty list with exactly `capacity` slots.
    ///
    /// # Errors
    ///
    /// Returns [`GrowError`] if the buffer cannot be allocated.
    pub fn try_with_capacity(capacity: usize) -> Result<Self, GrowError> {
        Ok(Self {
            buf: RawBuffer::try_with_capacity(capacity)?,
            len: 0,
        })
    }

    /// Returns the number of handles in the list.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no handles.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots in the backing buffer.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    // ========================================================================
    // Append
    // ========================================================================

    /// Appends a handle at position `len`.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow. Aborts via [`std::alloc::handle_alloc_error`]
    /// if growing the buffer fails.
    #[inline]
    #[track_caller]
    pub fn push(&mut self, node: H) {
        if let Err(err) = self.try_push(node) {
            buffer::grow_failed::<H>(err);
        }
    }

    /// Appends a handle at position `len`.
    ///
    /// # Errors
    ///
    /// Returns [`GrowError`] if the buffer is full and cannot grow. The list
    /// is unchanged in that case.
    #[inline]
    pub fn try_push(&mut self, node: H) -> Result<(), GrowError> {
        if self.len == self.buf.capacity() {
            self.buf.try_grow(self.len, 1)?;
        }

        unsafe {
            self.buf.as_ptr().add(self.len).write(node);
        }
        self.len += 1;
        Ok(())
    }

    // ========================================================================
    // Positional insert / remove
    // ========================================================================

    /// Inserts a handle at `index`, shifting later handles right.
    ///
    /// `index == len` appends.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`, or if the buffer cannot grow.
    #[track_caller]
    pub fn insert(&mut self, index: usize, node: H) {
        match self.try_insert(index, node) {
            Ok(()) => {}
            Err(InsertError::OutOfBounds(err)) => contract_violation("insert", err),
            Err(InsertError::Grow(err)) => buffer::grow_failed::<H>(err),
        }
    }

    /// Inserts a handle at `index`, shifting later handles right.
    ///
    /// # Errors
    ///
    /// - [`InsertError::OutOfBounds`] if `index > len`
    /// - [`InsertError::Grow`] if the buffer is full and cannot grow
    ///
    /// The list is unchanged on error.
    pub fn try_insert(&mut self, index: usize, node: H) -> Result<(), InsertError> {
        if index > self.len {
            return Err(OutOfBounds {
                index,
                len: self.len,
            }
            .into());
        }

        if self.len == self.buf.capacity() {
            self.buf.try_grow(self.len, 1)?;
        }

        // Safety: index <= len < capacity
        unsafe { self.insert_unchecked(index, node) };
        Ok(())
    }

    /// Removes and returns the handle at `index`, shifting later handles left.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    #[track_caller]
    pub fn remove(&mut self, index: usize) -> H {
        match self.try_remove(index) {
            Ok(node) => node,
            Err(err) => contract_violation("remove", err),
        }
    }

    /// Removes and returns the handle at `index`, shifting later handles left.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if `index >= len`. The list is unchanged.
    #[inline]
    pub fn try_remove(&mut self, index: usize) -> Result<H, OutOfBounds> {
        if index >= self.len {
            return Err(OutOfBounds {
                index,
                len: self.len,
            });
        }

        // Safety: index < len
        Ok(unsafe { self.remove_unchecked(index) })
    }

    /// Removes the first handle that refers to the same node as `node`.
    ///
    /// Returns the removed handle, or `None` if no handle matched. A miss is
    /// a normal outcome and leaves the list untouched.
    pub fn remove_node(&mut self, node: H) -> Option<H> {
        let index = self.index_of(node)?;
        // Safety: index_of only returns live positions
        Some(unsafe { self.remove_unchecked(index) })
    }

    /// Removes all handles, keeping the buffer.
    ///
    /// The referenced nodes are not touched.
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
    }

    // ========================================================================
    // Capacity
    // ========================================================================

    /// Ensures room for at least `additional` more handles.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow. Aborts via [`std::alloc::handle_alloc_error`]
    /// if the allocation fails.
    #[track_caller]
    pub fn reserve(&mut self, additional: usize) {
        if let Err(err) = self.try_reserve(additional) {
            buffer::grow_failed::<H>(err);
        }
    }

    /// Ensures room for at least `additional` more handles.
    ///
    /// # Errors
    ///
    /// Returns [`GrowError`] if the buffer cannot grow. The list is unchanged.
    #[inline]
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), GrowError> {
        self.buf.try_grow(self.len, additional)
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns the handle at `index`, or `None` if `index >= len`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<H> {
        self.as_slice().get(index).copied()
    }

    /// Returns the handle at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if `index >= len`.
    #[inline]
    pub fn try_get(&self, index: usize) -> Result<H, OutOfBounds> {
        self.get(index).ok_or(OutOfBounds {
            index,
            len: self.len,
        })
    }

    /// Returns the handle at `index` without bounds checking.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len`.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> H {
        debug_assert!(index < self.len);
        unsafe { *self.buf.as_ptr().add(index) }
    }

    /// Returns the first handle, or `None` if empty.
    #[inline]
    pub fn first(&self) -> Option<H> {
        self.get(0)
    }

    /// Returns the last handle, or `None` if empty.
    #[inline]
    pub fn last(&self) -> Option<H> {
        self.len.checked_sub(1).and_then(|i| self.get(i))
    }

    /// Returns the position of the first handle referring to `node`.
    pub fn index_of(&self, node: H) -> Option<usize> {
        self.as_slice().iter().position(|h| h.same_node(&node))
    }

    /// Returns `true` if some handle refers to `node`.
    #[inline]
    pub fn contains(&self, node: H) -> bool {
        self.index_of(node).is_some()
    }

    /// Returns the live handles as a slice, in order.
    #[inline]
    pub fn as_slice(&self) -> &[H] {
        // Safety: [0, len) is initialized; dangling is fine for len == 0
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    /// Returns an iterator over the handles, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, H> {
        Iter {
            inner: self.as_slice().iter(),
        }
    }

    // ========================================================================
    // Unchecked internals
    // ========================================================================

    /// # Safety
    ///
    /// `index <= len` and `len < capacity`.
    #[inline]
    unsafe fn insert_unchecked(&mut self, index: usize, node: H) {
        debug_assert!(index <= self.len && self.len < self.buf.capacity());
        unsafe {
            let slot = self.buf.as_ptr().add(index);
            if index < self.len {
                // Overlapping move, high end first
                ptr::copy(slot, slot.add(1), self.len - index);
            }
            slot.write(node);
        }
        self.len += 1;
    }

    /// # Safety
    ///
    /// `index < len`.
    #[inline]
    unsafe fn remove_unchecked(&mut self, index: usize) -> H {
        debug_assert!(index < self.len);
        let node = unsafe {
            let slot = self.buf.as_ptr().add(index);
            let node = slot.read();
            ptr::copy(slot.add(1), slot, self.len - index - 1);
            node
        };
        self.len -= 1;
        node
    }
}

/// Reports an out-of-range index on the fail-fast path.
#[cold]
#[track_caller]
fn contract_violation(op: &'static str, err: OutOfBounds) -> ! {
    log::error!("NodeList::{}: {}", op, err);
    panic!("NodeList::{}: {}", op, err);
}

// =============================================================================
// Trait impls
// =============================================================================

impl<H: Handle> Default for NodeList<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: Handle> Clone for NodeList<H> {
    fn clone(&self) -> Self {
        let mut list = Self::with_capacity(self.len);
        unsafe {
            ptr::copy_nonoverlapping(self.buf.as_ptr(), list.buf.as_ptr(), self.len);
        }
        list.len = self.len;
        list
    }
}

impl<H: Handle + fmt::Debug> fmt::Debug for NodeList<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<H: Handle> PartialEq for NodeList<H> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.same_node(&b))
    }
}

impl<H: Handle> Eq for NodeList<H> {}

impl<H: Handle> core::ops::Index<usize> for NodeList<H> {
    type Output = H;

    #[track_caller]
    fn index(&self, index: usize) -> &H {
        match self.as_slice().get(index) {
            Some(node) => node,
            None => contract_violation(
                "index",
                OutOfBounds {
                    index,
                    len: self.len,
                },
            ),
        }
    }
}

impl<H: Handle> Extend<H> for NodeList<H> {
    fn extend<I: IntoIterator<Item = H>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for node in iter {
            self.push(node);
        }
    }
}

impl<H: Handle> FromIterator<H> for NodeList<H> {
    fn from_iter<I: IntoIterator<Item = H>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a, H: Handle> IntoIterator for &'a NodeList<H> {
    type Item = H;
    type IntoIter = Iter<'a, H>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// =============================================================================
// Iterator
// =============================================================================

/// Iterator over copied handles, front to back.
pub struct Iter<'a, H> {
    inner: slice::Iter<'a, H>,
}

impl<H: Handle> Iterator for Iter<'_, H> {
    type Item = H;

    #[inline]
    fn next(&mut self) -> Option<H> {
        self.inner.next().copied()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<H: Handle> DoubleEndedIterator for Iter<'_, H> {
    #[inline]
    fn next_back(&mut self) -> Option<H> {
        self.inner.next_back().copied()
    }
}

impl<H: Handle> ExactSizeIterator for Iter<'_, H> {}

impl<H: Handle> FusedIterator for Iter<'_, H> {}
