/*!
Write-once-read-many string deque.

Strings can be appended and drawn, but a stored string is never replaced in
place, removed by index or cleared in bulk. Those calls fail with
[`Error::OperationNotSupported`] and leave the deque as it was.
*/

use std::any::Any;
use std::fmt;
use std::ops::Deref;

use crate::core::{
    deque::{
        input::Input,
        string::{StringDeque, impl_append_operators},
    },
    error::{Error, Result},
};

const CONTAINER: &str = "WormDeque";

/// Append-only string deque
#[derive(Default)]
pub struct WormDeque {
    inner: StringDeque,
}

impl WormDeque {
    /// Create an empty deque with an empty separator
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a deque pre-filled with `data`
    pub fn with_data<D: fmt::Display>(data: impl Into<Input<D>>, separator: impl Into<String>) -> Self {
        Self {
            inner: StringDeque::with_data(data, separator),
        }
    }

    /// Replace the separator, builder style
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.inner.set_separator(separator);
        self
    }

    /// Stringify and append one value
    pub fn append<D: fmt::Display>(&mut self, value: D) {
        self.inner.append(value);
    }

    /// Stringify and append every value, in order
    pub fn extend<I>(&mut self, values: I)
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        self.inner.extend(values);
    }

    /// Append a single value or a sequence of values
    pub fn insert<D: fmt::Display>(&mut self, values: impl Into<Input<D>>) {
        self.inner.insert(values);
    }

    /// Pre-process each value, then stringify and append the results
    pub fn insert_with<V, R, P>(&mut self, values: impl Into<Input<V>>, pre_process: P) -> Result<()>
    where
        R: fmt::Display,
        P: FnMut(V) -> Result<R>,
    {
        self.inner.insert_with(values, pre_process)
    }

    /// Append strings as they are
    pub fn insert_stored(&mut self, values: impl Into<Input<String>>) {
        self.inner.insert_stored(values);
    }

    /// Append type-erased values, each of which must be a `String`
    pub fn insert_dynamic(&mut self, values: Vec<Box<dyn Any>>) -> Result<()> {
        self.inner.insert_dynamic(values)
    }

    /// Always fails; stored strings are never replaced
    pub fn set<D: fmt::Display>(&mut self, _index: isize, _value: D) -> Result<()> {
        Err(Error::not_supported(CONTAINER, "set"))
    }

    /// Always fails; stored strings are never removed by index
    pub fn remove(&mut self, _index: isize) -> Result<()> {
        Err(Error::not_supported(CONTAINER, "remove"))
    }

    /// Always fails; the deque is never emptied in bulk
    pub fn clear(&mut self) -> Result<()> {
        Err(Error::not_supported(CONTAINER, "clear"))
    }

    /// Remove and return the element at `index`
    pub fn draw(&mut self, index: isize) -> Result<String> {
        self.inner.draw(index)
    }

    /// Remove and return the last element
    pub fn draw_last(&mut self) -> Result<String> {
        self.inner.draw_last()
    }

    /// Set the separator used by later renders
    pub fn set_separator(&mut self, separator: impl Into<String>) {
        self.inner.set_separator(separator);
    }
}

impl Deref for WormDeque {
    type Target = StringDeque;

    fn deref(&self) -> &StringDeque {
        &self.inner
    }
}

impl fmt::Display for WormDeque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl fmt::Debug for WormDeque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WormDeque").field(&self.inner).finish()
    }
}

impl_append_operators!(WormDeque);
