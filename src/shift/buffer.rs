// src/shift/buffer.rs
//! Core shift buffer structure with lazy head compaction
//!
//! This module provides the fundamental [`ShiftBuffer`] type: a single
//! contiguous allocation holding a window of live elements that drifts
//! forward as elements are extracted from the head and appended at the tail.
//!
//! # Storage Strategy
//!
//! Extraction never moves surviving elements; it only advances the window.
//! The cost of reclaiming the freed head space is deferred to the next
//! append that would otherwise run off the end of the allocation, which
//! either slides the window back to slot 0 or grows the allocation:
//!
//! 1. **In place**: the tail has room, elements are constructed directly.
//! 2. **Compaction**: the append fits once the head space is reclaimed and
//!    at least half the allocation is reclaimable.
//! 3. **Growth**: capacity doubles (or more, for oversized batches) and the
//!    live window relocates to the front of the new block.
//!
//! Capacity never shrinks automatically; the buffer is sized by watermark.

use super::raw::{RawStorage, SliceGuard};
use crate::error::Result;
use std::cmp;
use std::fmt;
use std::mem;
use std::ptr;

/// Capacity, in slots, of buffers created through [`ShiftBuffer::new`].
pub const DEFAULT_CAPACITY: usize = 256;

/// A contiguous FIFO staging buffer for producer/consumer pipelines.
///
/// A producer appends elements at the tail ([`write`](Self::write) clones
/// them in, [`shove`](Self::shove) moves them in); a consumer removes the
/// oldest elements from the head ([`read`](Self::read)). Elements come back
/// out in exactly the order they went in.
///
/// Unlike a ring buffer, the live elements always form one contiguous run,
/// so extraction is a straight copy with no wraparound bookkeeping. Unlike a
/// naive array-backed queue, extraction does not shift the survivors; the
/// head offset drifts forward and the freed space is reclaimed lazily on a
/// later append.
///
/// # Element Requirements
///
/// The buffer never default-constructs elements. `T` only needs `Clone` for
/// the cloning operations (`write`, `peek`, the buffer's own `Clone`), and
/// [`Zeroize`](zeroize::Zeroize) only for [`burn`](Self::burn).
///
/// # Panic Safety
///
/// A panicking `T::clone` or `T::drop` never leaks an element or corrupts
/// the buffer. `write` unwinds to the pre-call state; `read` and `skip` keep
/// every element they already committed and remain usable afterwards.
///
/// # Examples
///
/// ```
/// use shiftbuf::ShiftBuffer;
///
/// let mut buf = ShiftBuffer::new();
/// buf.write(b"hello ");
/// buf.write(b"world");
///
/// let mut out = [0u8; 11];
/// buf.read(&mut out)?;
/// assert_eq!(&out, b"hello world");
/// assert!(buf.is_empty());
/// # Ok::<(), shiftbuf::BufferError>(())
/// ```
pub struct ShiftBuffer<T> {
    /// Slot allocation; holds no constructed element outside the live window
    pub(super) storage: RawStorage<T>,
    /// Offset of the first live element
    pub(super) head: usize,
    /// Number of live elements starting at `head`
    pub(super) len: usize,
}

// SAFETY: the buffer owns its elements exclusively, so sending or sharing it
// is exactly as safe as sending or sharing the elements themselves.
unsafe impl<T: Send> Send for ShiftBuffer<T> {}
unsafe impl<T: Sync> Sync for ShiftBuffer<T> {}

impl<T> ShiftBuffer<T> {
    /// Creates an empty buffer with the default capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftbuf::ShiftBuffer;
    ///
    /// let buf = ShiftBuffer::<u8>::new();
    /// assert_eq!(buf.len(), 0);
    /// assert!(buf.capacity() >= 1);
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty buffer with room for at least `capacity` elements.
    ///
    /// A capacity of zero is rounded up to one slot; the buffer always owns
    /// at least one slot so that growth can double from somewhere.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds the maximum slot count for `T`.
    /// Prefer [`try_with_capacity`](Self::try_with_capacity) for fallible
    /// construction.
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftbuf::ShiftBuffer;
    ///
    /// let buf = ShiftBuffer::<u8>::with_capacity(512);
    /// assert!(buf.capacity() >= 512);
    /// ```
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::try_with_capacity(capacity).expect("Buffer capacity exceeds maximum")
    }

    /// Creates an empty buffer with room for at least `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::SizeTooBig`](crate::BufferError::SizeTooBig)
    /// if `capacity` slots of `T` cannot be laid out as a single allocation.
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftbuf::ShiftBuffer;
    ///
    /// let buf = ShiftBuffer::<u64>::try_with_capacity(1024)?;
    /// assert!(buf.capacity() >= 1024);
    ///
    /// assert!(ShiftBuffer::<u64>::try_with_capacity(usize::MAX / 2).is_err());
    /// # Ok::<(), shiftbuf::BufferError>(())
    /// ```
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        let storage = RawStorage::try_allocate(cmp::max(capacity, 1))?;
        Ok(Self {
            storage,
            head: 0,
            len: 0,
        })
    }

    /// Returns the number of live elements in the buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftbuf::ShiftBuffer;
    ///
    /// let mut buf = ShiftBuffer::new();
    /// buf.write(&[1u8, 2, 3]);
    /// assert_eq!(buf.len(), 3);
    /// ```
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the buffer contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftbuf::ShiftBuffer;
    ///
    /// let buf = ShiftBuffer::<u8>::new();
    /// assert!(buf.is_empty());
    /// ```
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots the buffer has reserved.
    ///
    /// Capacity only ever grows over a buffer's lifetime. For zero-sized
    /// element types this reports `usize::MAX`.
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftbuf::ShiftBuffer;
    ///
    /// let buf = ShiftBuffer::<u8>::with_capacity(64);
    /// assert_eq!(buf.capacity(), 64);
    /// ```
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Ensures a following append of `additional` elements cannot reallocate.
    ///
    /// Reclaims head space or grows the allocation as required; does nothing
    /// when the tail already has room.
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftbuf::ShiftBuffer;
    ///
    /// let mut buf = ShiftBuffer::<u8>::with_capacity(8);
    /// buf.reserve(100);
    /// assert!(buf.capacity() >= 100);
    /// ```
    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.make_room(additional);
    }

    /// Makes the tail run `[head + len, capacity)` at least `extra` slots
    /// long, preferring (in order) the space already there, compaction, and
    /// reallocation.
    ///
    /// Compaction only triggers when it reclaims at least half the
    /// allocation; a smaller freed head region is not worth an O(len) slide
    /// per append, and growth restores the doubling amortisation instead.
    pub(super) fn make_room(&mut self, extra: usize) {
        let capacity = self.storage.capacity();
        let free_tail = capacity - self.head - self.len;
        if extra <= free_tail {
            return;
        }

        let required = self.len.checked_add(extra).expect("capacity overflow");
        if required <= capacity && self.head >= capacity / 2 {
            // Slide the live window down to slot 0. Source and destination
            // may overlap, so this must be a memmove.
            //
            // SAFETY: `[head, head + len)` are initialised slots and
            // `[0, len)` is in bounds; a Rust move is a bitwise copy, so no
            // element operation runs and nothing here can fail.
            unsafe {
                ptr::copy(self.storage.slot(self.head), self.storage.base(), self.len);
            }
            self.head = 0;
        } else {
            self.grow(required);
        }
    }

    /// Replaces the allocation with one holding at least `required` slots
    /// and relocates the live window to its front.
    fn grow(&mut self, required: usize) {
        let new_capacity = cmp::max(
            self.storage.capacity().saturating_mul(2),
            required.checked_next_power_of_two().unwrap_or(required),
        );
        let new_storage = RawStorage::allocate(new_capacity);
        // SAFETY: distinct allocations cannot overlap; the live window is
        // initialised in the old block and `len <= new_capacity`. The old
        // block goes back to the allocator holding nothing but moved-out
        // bits, so its teardown frees memory without touching elements.
        unsafe {
            ptr::copy_nonoverlapping(
                self.storage.slot(self.head),
                new_storage.base(),
                self.len,
            );
        }
        self.storage = new_storage;
        self.head = 0;
    }
}

impl<T: Clone> Clone for ShiftBuffer<T> {
    /// Duplicates the buffer: an independent allocation of the same capacity
    /// holding clones of the live elements, with the window reset to slot 0.
    ///
    /// If an element's `Clone` panics, the clones constructed so far and the
    /// new allocation are released before the panic continues; the source
    /// buffer is untouched either way.
    fn clone(&self) -> Self {
        let storage: RawStorage<T> = RawStorage::allocate(self.storage.capacity());
        let mut guard = SliceGuard::new(storage.base());
        for index in 0..self.len {
            // SAFETY: `head + index` is a live slot of the source and
            // `initialized` is in bounds of the fresh allocation.
            let value = unsafe { &*self.storage.slot(self.head + index) }.clone();
            unsafe { ptr::write(storage.base().add(guard.initialized), value) };
            guard.initialized += 1;
        }
        mem::forget(guard);
        Self {
            storage,
            head: 0,
            len: self.len,
        }
    }
}

impl<T> Drop for ShiftBuffer<T> {
    fn drop(&mut self) {
        if mem::needs_drop::<T>() && self.len > 0 {
            let head = mem::replace(&mut self.head, 0);
            let len = mem::replace(&mut self.len, 0);
            // SAFETY: exactly `[head, head + len)` held live elements and the
            // bookkeeping above already declared them gone. The storage field
            // frees the block afterwards even if one of these drops panics.
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.storage.slot(head), len));
            }
        }
    }
}

impl<T> Default for ShiftBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ShiftBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShiftBuffer")
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty_with_default_capacity() {
        let buf = ShiftBuffer::<u8>::new();
        assert_eq!(buf.len(), 0);
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_custom_capacity() {
        let buf = ShiftBuffer::<u8>::with_capacity(512);
        assert!(buf.capacity() >= 512);

        // Zero rounds up to a single slot.
        let buf = ShiftBuffer::<u8>::with_capacity(0);
        assert!(buf.capacity() >= 1);
    }

    #[test]
    fn test_try_with_capacity_rejects_oversize() {
        assert_eq!(
            ShiftBuffer::<u64>::try_with_capacity(usize::MAX / 4).unwrap_err(),
            crate::BufferError::SizeTooBig
        );
    }

    #[test]
    fn test_reserve_grows_once() {
        let mut buf = ShiftBuffer::<u8>::with_capacity(4);
        buf.reserve(100);
        let capacity = buf.capacity();
        assert!(capacity >= 100);

        // Already reserved space must not trigger another reallocation.
        buf.reserve(100);
        assert_eq!(buf.capacity(), capacity);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut buf = ShiftBuffer::new();
        buf.write(&[1u8, 2, 3]);

        let mut copy = buf.clone();
        assert_eq!(copy.len(), 3);
        assert_eq!(copy.capacity(), buf.capacity());

        let mut out = [0u8; 3];
        copy.read(&mut out).unwrap();
        assert_eq!(out, [1, 2, 3]);
        assert_eq!(copy.len(), 0);
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn test_move_transfers_storage() {
        let mut buf = ShiftBuffer::new();
        buf.write(&[9u8, 8, 7]);

        let mut moved = buf;
        let mut out = [0u8; 3];
        moved.read(&mut out).unwrap();
        assert_eq!(out, [9, 8, 7]);
    }

    #[test]
    fn test_debug_summary_has_no_elements() {
        let mut buf = ShiftBuffer::new();
        buf.write(&[1u8, 2]);
        let rendered = format!("{:?}", buf);
        assert!(rendered.contains("len: 2"));
        assert!(!rendered.contains('1'));
    }

    #[test]
    fn test_send_sync_bounds() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<ShiftBuffer<Vec<u8>>>();
        assert_sync::<ShiftBuffer<Vec<u8>>>();
    }
}
