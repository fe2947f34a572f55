// src/shift/ops.rs
//! Append, extract and erase operations

use super::buffer::ShiftBuffer;
use super::raw::SliceGuard;
use crate::error::{BufferError, Result};
use std::mem;
use std::ptr;
use zeroize::Zeroize;

impl<T> ShiftBuffer<T> {
    /// Appends clones of `items` at the tail.
    ///
    /// The sources are left untouched; the buffer owns the clones. If a
    /// clone panics, the clones constructed so far are destroyed and the
    /// buffer is exactly as it was before the call.
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftbuf::ShiftBuffer;
    ///
    /// let frame = vec![String::from("a"), String::from("b")];
    /// let mut buf = ShiftBuffer::new();
    /// buf.write(&frame);
    ///
    /// assert_eq!(buf.len(), 2);
    /// assert_eq!(frame.len(), 2); // sources still owned by the caller
    /// ```
    pub fn write(&mut self, items: &[T])
    where
        T: Clone,
    {
        if items.is_empty() {
            return;
        }
        self.make_room(items.len());
        // SAFETY: `make_room` guarantees `items.len()` raw slots after the
        // live window. `len` is only bumped once the whole batch is in;
        // until then the guard owns the partial run, so a panicking clone
        // unwinds to the pre-call state.
        unsafe {
            let tail = self.storage.slot(self.head + self.len);
            let mut guard = SliceGuard::new(tail);
            for item in items {
                ptr::write(tail.add(guard.initialized), item.clone());
                guard.initialized += 1;
            }
            mem::forget(guard);
        }
        self.len += items.len();
    }

    /// Appends every element of `items` at the tail by moving it.
    ///
    /// No element is cloned or dropped: ownership transfers in one bitwise
    /// copy. The vector is left empty, but its allocation stays with the
    /// caller for reuse.
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftbuf::ShiftBuffer;
    ///
    /// let mut batch = vec![String::from("x"), String::from("y")];
    /// let mut buf = ShiftBuffer::new();
    /// buf.shove(&mut batch);
    ///
    /// assert_eq!(buf.len(), 2);
    /// assert!(batch.is_empty());
    /// ```
    pub fn shove(&mut self, items: &mut Vec<T>) {
        let count = items.len();
        if count == 0 {
            return;
        }
        self.make_room(count);
        // SAFETY: the vector's first `count` slots are initialised and the
        // buffer has `count` raw slots at the tail; the regions belong to
        // different allocations. Clearing the vector's length afterwards
        // completes the ownership transfer, and nothing in between unwinds.
        unsafe {
            ptr::copy_nonoverlapping(
                items.as_ptr(),
                self.storage.slot(self.head + self.len),
                count,
            );
            items.set_len(0);
        }
        self.len += count;
    }

    /// Appends a single element at the tail.
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftbuf::ShiftBuffer;
    ///
    /// let mut buf = ShiftBuffer::new();
    /// buf.push(1u8);
    /// buf.push(2);
    /// assert_eq!(buf.len(), 2);
    /// ```
    pub fn push(&mut self, value: T) {
        self.make_room(1);
        // SAFETY: `make_room` guarantees one raw slot after the live window.
        unsafe { ptr::write(self.storage.slot(self.head + self.len), value) };
        self.len += 1;
    }

    /// Extracts the oldest `dst.len()` elements into `dst`, oldest first.
    ///
    /// Every destination slot must already be initialised; its previous
    /// value is dropped as the extracted element replaces it. Extraction is
    /// committed element by element: should the drop of an overwritten
    /// destination value panic, the elements delivered so far (including the
    /// one whose arrival triggered the panic) are already out of the buffer,
    /// nothing is leaked, and the buffer remains usable.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Underflow`] if `dst.len()` exceeds
    /// [`len`](Self::len); the buffer is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftbuf::ShiftBuffer;
    ///
    /// let mut buf = ShiftBuffer::new();
    /// buf.write(&[1u8, 2, 3, 4]);
    ///
    /// let mut out = [0u8; 3];
    /// buf.read(&mut out)?;
    /// assert_eq!(out, [1, 2, 3]);
    /// assert_eq!(buf.len(), 1);
    ///
    /// let mut too_many = [0u8; 2];
    /// assert!(buf.read(&mut too_many).is_err());
    /// # Ok::<(), shiftbuf::BufferError>(())
    /// ```
    pub fn read(&mut self, dst: &mut [T]) -> Result<()> {
        let requested = dst.len();
        if requested > self.len {
            return Err(BufferError::Underflow {
                requested,
                available: self.len,
            });
        }
        for slot in dst.iter_mut() {
            // Take the head element and commit its removal before the old
            // destination value is dropped; a panicking drop then unwinds
            // with the element already delivered instead of owned twice.
            //
            // SAFETY: `len > 0` here, so `head` is a live slot; the
            // bookkeeping below forgets it before any code that can unwind.
            let value = unsafe { ptr::read(self.storage.slot(self.head)) };
            self.head += 1;
            self.len -= 1;
            let old = mem::replace(slot, value);
            drop(old);
        }
        if self.len == 0 {
            self.head = 0;
        }
        Ok(())
    }

    /// Clones the oldest `dst.len()` elements into `dst` without consuming
    /// them.
    ///
    /// The previous destination values are dropped, as with
    /// [`read`](Self::read); the buffer itself is not modified.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Underflow`] if `dst.len()` exceeds
    /// [`len`](Self::len).
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftbuf::ShiftBuffer;
    ///
    /// let mut buf = ShiftBuffer::new();
    /// buf.write(&[7u8, 8, 9]);
    ///
    /// let mut ahead = [0u8; 2];
    /// buf.peek(&mut ahead)?;
    /// assert_eq!(ahead, [7, 8]);
    /// assert_eq!(buf.len(), 3);
    /// # Ok::<(), shiftbuf::BufferError>(())
    /// ```
    pub fn peek(&self, dst: &mut [T]) -> Result<()>
    where
        T: Clone,
    {
        let requested = dst.len();
        if requested > self.len {
            return Err(BufferError::Underflow {
                requested,
                available: self.len,
            });
        }
        for (index, slot) in dst.iter_mut().enumerate() {
            // SAFETY: `index < len`, so `head + index` is a live slot.
            let value = unsafe { &*self.storage.slot(self.head + index) }.clone();
            let old = mem::replace(slot, value);
            drop(old);
        }
        Ok(())
    }

    /// Discards the oldest `count` elements, dropping them in place.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Underflow`] if `count` exceeds
    /// [`len`](Self::len); the buffer is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftbuf::ShiftBuffer;
    ///
    /// let mut buf = ShiftBuffer::new();
    /// buf.write(&[1u8, 2, 3, 4, 5]);
    ///
    /// buf.skip(2)?;
    /// let mut out = [0u8; 3];
    /// buf.read(&mut out)?;
    /// assert_eq!(out, [3, 4, 5]);
    /// # Ok::<(), shiftbuf::BufferError>(())
    /// ```
    pub fn skip(&mut self, count: usize) -> Result<()> {
        if count > self.len {
            return Err(BufferError::Underflow {
                requested: count,
                available: self.len,
            });
        }
        for _ in 0..count {
            // SAFETY: `len > 0`, so `head` is a live slot; it is committed
            // as gone before the drop so that a panicking destructor cannot
            // cause a second drop later.
            let slot = unsafe { self.storage.slot(self.head) };
            self.head += 1;
            self.len -= 1;
            unsafe { ptr::drop_in_place(slot) };
        }
        if self.len == 0 {
            self.head = 0;
        }
        Ok(())
    }

    /// Removes every element, dropping each exactly once. Capacity is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftbuf::ShiftBuffer;
    ///
    /// let mut buf = ShiftBuffer::new();
    /// buf.write(b"leftovers");
    /// buf.clear();
    /// assert!(buf.is_empty());
    /// ```
    pub fn clear(&mut self) {
        let head = mem::replace(&mut self.head, 0);
        let len = mem::replace(&mut self.len, 0);
        if mem::needs_drop::<T>() && len > 0 {
            // SAFETY: exactly `[head, head + len)` held live elements, and
            // the bookkeeping above already declared them gone.
            unsafe {
                ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.storage.slot(head), len));
            }
        }
    }
}

impl<T: Zeroize> ShiftBuffer<T> {
    /// Securely erases every live element, then removes them.
    ///
    /// Each element is zeroized in place with compiler-resistant clearing
    /// before being dropped, so staged sensitive data (key material, packet
    /// plaintext) does not linger in the allocation.
    ///
    /// # Examples
    ///
    /// ```
    /// use shiftbuf::ShiftBuffer;
    ///
    /// let mut buf = ShiftBuffer::new();
    /// buf.write(b"session secret");
    /// buf.burn();
    /// assert!(buf.is_empty());
    /// ```
    pub fn burn(&mut self) {
        for index in 0..self.len {
            // SAFETY: `head + index` is a live slot; zeroizing in place
            // keeps it a valid element until `clear` drops it.
            unsafe { &mut *self.storage.slot(self.head + index) }.zeroize();
        }
        self.clear();
    }
}

impl<T> Extend<T> for ShiftBuffer<T> {
    /// Appends every yielded element by moving it, in iteration order.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        let (low, _) = iter.size_hint();
        self.reserve(low);
        for value in iter {
            self.push(value);
        }
    }
}
