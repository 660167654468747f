/*!
Bounded string deque.

Holds at most `capacity` strings. Growing past the capacity silently drops
the oldest strings from the front; survivors keep their relative order.
*/

use std::any::Any;
use std::fmt;
use std::num::NonZeroUsize;
use std::ops::Deref;

use crate::core::{
    deque::{
        input::Input,
        string::{StringDeque, impl_append_operators},
    },
    error::{Error, Result},
};

/// String deque that evicts its oldest entries once full
pub struct CircularDeque {
    inner: StringDeque,
    capacity: NonZeroUsize,
}

impl CircularDeque {
    /// Create an empty deque holding at most `capacity` strings
    pub fn new(capacity: usize) -> Result<Self> {
        let capacity = NonZeroUsize::new(capacity)
            .ok_or_else(|| Error::Construction("capacity must be greater than zero".into()))?;
        Ok(Self {
            inner: StringDeque::new(),
            capacity,
        })
    }

    /// Create a deque pre-filled with `data`, keeping only the newest `capacity` values
    pub fn with_data<D: fmt::Display>(
        capacity: usize,
        data: impl Into<Input<D>>,
        separator: impl Into<String>,
    ) -> Result<Self> {
        let mut deque = Self::new(capacity)?.with_separator(separator);
        deque.insert(data);
        Ok(deque)
    }

    /// Replace the separator, builder style
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.inner.set_separator(separator);
        self
    }

    /// Maximum number of stored strings
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// True once another insertion would evict
    pub fn is_full(&self) -> bool {
        self.inner.len() == self.capacity.get()
    }

    /// Stringify and append one value
    pub fn append<D: fmt::Display>(&mut self, value: D) {
        self.inner.append(value);
        self.evict();
    }

    /// Stringify and append every value, in order
    pub fn extend<I>(&mut self, values: I)
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        self.inner.extend(values);
        self.evict();
    }

    /// Append a single value or a sequence of values
    pub fn insert<D: fmt::Display>(&mut self, values: impl Into<Input<D>>) {
        self.inner.insert(values);
        self.evict();
    }

    /// Pre-process each value, then stringify and append the results
    pub fn insert_with<V, R, P>(&mut self, values: impl Into<Input<V>>, pre_process: P) -> Result<()>
    where
        R: fmt::Display,
        P: FnMut(V) -> Result<R>,
    {
        self.inner.insert_with(values, pre_process)?;
        self.evict();
        Ok(())
    }

    /// Append strings as they are
    pub fn insert_stored(&mut self, values: impl Into<Input<String>>) {
        self.inner.insert_stored(values);
        self.evict();
    }

    /// Append type-erased values, each of which must be a `String`
    pub fn insert_dynamic(&mut self, values: Vec<Box<dyn Any>>) -> Result<()> {
        self.inner.insert_dynamic(values)?;
        self.evict();
        Ok(())
    }

    /// Stringify `value` and store it at `index`
    pub fn set<D: fmt::Display>(&mut self, index: isize, value: D) -> Result<()> {
        self.inner.set(index, value)
    }

    /// Remove and return the element at `index`
    pub fn draw(&mut self, index: isize) -> Result<String> {
        self.inner.draw(index)
    }

    /// Remove and return the last element
    pub fn draw_last(&mut self) -> Result<String> {
        self.inner.draw_last()
    }

    /// Delete the element at `index`
    pub fn remove(&mut self, index: isize) -> Result<()> {
        self.inner.remove(index)
    }

    /// Remove every element
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    /// Set the separator used by later renders
    pub fn set_separator(&mut self, separator: impl Into<String>) {
        self.inner.set_separator(separator);
    }

    fn evict(&mut self) {
        let evicted = self.inner.inner.evict_to(self.capacity.get());
        if evicted > 0 {
            log::trace!("Evicted {} oldest entries at capacity {}", evicted, self.capacity);
        }
    }
}

impl Deref for CircularDeque {
    type Target = StringDeque;

    fn deref(&self) -> &StringDeque {
        &self.inner
    }
}

impl fmt::Display for CircularDeque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl fmt::Debug for CircularDeque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CircularDeque")
            .field("capacity", &self.capacity)
            .field("inner", &self.inner)
            .finish()
    }
}

impl_append_operators!(CircularDeque);
