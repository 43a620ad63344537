//! Growable array with amortized reallocation and fragment splicing.
//!
//! `GrowArray` keeps its own notion of allocated capacity instead of
//! relying on `Vec`'s doubling, so growth and reclamation follow a single
//! policy: grow to [`next_size`] once the length passes the capacity, and
//! give memory back once fewer than a quarter of the slots are in use.
//!
//! ## Fragments
//!
//! Fragment operations address a half-open sub-range `[start, end)`.
//! Negative indices count from the back: `-1` is one past the last
//! element, `-2` the last element, and so on. `(-1, -1)` is therefore the
//! append point and `(0, -1)` the whole array.
//!
//! ```
//! use werf_buffer::GrowArray;
//!
//! let mut line = GrowArray::from(&b"hxllo"[..]);
//! line.fragment_replace(1, 2, b"e").unwrap();
//! line.fragment_replace(-1, -1, b"!").unwrap(); // append
//! assert_eq!(&line[..], b"hello!");
//! ```

use std::ops::{Deref, DerefMut, Range};

use crate::{BufferError, BufferResult};

/// Smallest capacity ever allocated, in elements.
pub const MIN_CAPACITY: usize = 8;

/// Returns the capacity to allocate for `n` elements: the next power of
/// two, scaled by 1.5, never below `min`.
pub fn next_size(n: usize, min: usize) -> usize {
    let pow = n.checked_next_power_of_two().unwrap_or(usize::MAX);
    if pow < min {
        min
    } else {
        pow.saturating_add(pow / 2)
    }
}

/// A contiguous buffer with amortized O(1) growth and in-place splicing.
///
/// Element access goes through `Deref<Target = [T]>`. Any call that takes
/// `&mut self` may move the backing store, which the borrow checker
/// already enforces for slices handed out earlier.
#[derive(Debug)]
pub struct GrowArray<T> {
    data: Vec<T>,
    capacity: usize,
    reallocations: usize,
}

impl<T> GrowArray<T> {
    /// Creates an empty array without allocating.
    pub const fn new() -> Self {
        Self {
            data: Vec::new(),
            capacity: 0,
            reallocations: 0,
        }
    }

    /// Number of elements in use.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Allocated capacity under the growth policy.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// How many times the backing store has been reallocated.
    #[inline]
    pub fn reallocations(&self) -> usize {
        self.reallocations
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Resolves possibly negative fragment bounds to absolute indices.
    pub fn resolve(&self, start: isize, end: isize) -> BufferResult<(usize, usize)> {
        let len = self.data.len();
        let invalid = || BufferError::InvalidRange { start, end, len };

        let absolute = |idx: isize| {
            if idx >= 0 {
                usize::try_from(idx).ok()
            } else {
                (len + 1).checked_sub(idx.unsigned_abs())
            }
        };

        let s = absolute(start).ok_or_else(invalid)?;
        let e = absolute(end).ok_or_else(invalid)?;
        if s > e || e > len {
            return Err(invalid());
        }
        Ok((s, e))
    }

    /// Appends one element.
    pub fn push(&mut self, value: T) {
        let len = self.data.len() + 1;
        if len > self.capacity {
            self.reallocate(next_size(len, MIN_CAPACITY));
        }
        self.data.push(value);
    }

    /// Drops every element past `len`.
    pub fn truncate(&mut self, len: usize) {
        if len < self.data.len() {
            self.data.truncate(len);
            self.reclaim();
        }
    }

    /// Removes `n` elements from the end.
    pub fn shrink_by(&mut self, n: usize) -> BufferResult<()> {
        let len = self.data.len();
        if n > len {
            return Err(BufferError::Underflow { requested: n, len });
        }
        self.truncate(len - n);
        Ok(())
    }

    /// Runs `f` on every element of the fragment, in index order.
    pub fn fragment_apply<F>(&mut self, start: isize, end: isize, mut f: F) -> BufferResult<()>
    where
        F: FnMut(&mut T),
    {
        let (start, end) = self.resolve(start, end)?;
        self.data[start..end].iter_mut().for_each(&mut f);
        Ok(())
    }

    /// Frees the backing store entirely.
    pub fn release(&mut self) {
        if self.capacity > 0 {
            self.data = Vec::new();
            self.capacity = 0;
            self.reallocations += 1;
        }
    }

    fn reclaim(&mut self) {
        let len = self.data.len();
        if len.saturating_mul(4) < self.capacity {
            self.reallocate(next_size(len, MIN_CAPACITY));
        }
    }

    fn reallocate(&mut self, capacity: usize) {
        if capacity == self.capacity {
            return;
        }
        if capacity > self.data.capacity() {
            self.data.reserve_exact(capacity - self.data.len());
        } else {
            self.data.shrink_to(capacity);
        }
        self.capacity = capacity;
        self.reallocations += 1;
    }
}

impl<T: Default> GrowArray<T> {
    /// Sets the length to `len`, filling new slots with `T::default()`.
    pub fn resize(&mut self, len: usize) {
        if len < self.data.len() {
            self.data.truncate(len);
        }
        if len > self.capacity || len.saturating_mul(4) < self.capacity {
            self.reallocate(next_size(len, MIN_CAPACITY));
        }
        self.data.resize_with(len, T::default);
    }

    /// Grows (positive `delta`) or shrinks (negative `delta`) the array.
    pub fn extend_by(&mut self, delta: isize) -> BufferResult<()> {
        if delta >= 0 {
            self.resize(self.data.len() + delta.unsigned_abs());
            Ok(())
        } else {
            self.shrink_by(delta.unsigned_abs())
        }
    }

    /// Resizes the fragment `[start, end)` to `len` elements, shifting the
    /// tail of the array to make or close the gap.
    ///
    /// Growing allocates before the tail moves right; shrinking moves the
    /// tail left before the excess is dropped. Surviving elements of the
    /// fragment keep their leading positions and new slots hold
    /// `T::default()`. Returns the absolute range of the resized fragment.
    pub fn fragment_resize(
        &mut self,
        start: isize,
        end: isize,
        len: usize,
    ) -> BufferResult<Range<usize>> {
        let (start, end) = self.resolve(start, end)?;
        let old = end - start;

        if len > old {
            let shift = len - old;
            self.resize(self.data.len() + shift);
            self.data[end..].rotate_right(shift);
        } else if len < old {
            let shift = old - len;
            self.data[end - shift..].rotate_left(shift);
            self.shrink_by(shift)?;
        }

        Ok(start..start + len)
    }
}

impl<T: Default + Clone> GrowArray<T> {
    /// Replaces the fragment `[start, end)` with a copy of `items`.
    pub fn fragment_replace(&mut self, start: isize, end: isize, items: &[T]) -> BufferResult<()> {
        let slots = self.fragment_resize(start, end, items.len())?;
        self.data[slots].clone_from_slice(items);
        Ok(())
    }
}

impl<T> Default for GrowArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for GrowArray<T> {
    fn clone(&self) -> Self {
        let mut data = Vec::with_capacity(self.capacity);
        data.extend_from_slice(&self.data);
        Self {
            data,
            capacity: self.capacity,
            reallocations: 0,
        }
    }
}

impl<T: PartialEq> PartialEq for GrowArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<T: Eq> Eq for GrowArray<T> {}

impl<T> Deref for GrowArray<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        &self.data
    }
}

impl<T> DerefMut for GrowArray<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T: Default + Clone> From<&[T]> for GrowArray<T> {
    fn from(items: &[T]) -> Self {
        let mut array = Self::new();
        array.resize(items.len());
        array.data.clone_from_slice(items);
        array
    }
}
