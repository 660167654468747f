/*!
The generic convert-format deque.

Items are converted once, on insertion, and rendered lazily: the joined
string is rebuilt from the stored items on every call to
[`ConvertFormatDeque::render`], so it always reflects the current items and
the current separator.
*/

use std::any::{Any, type_name};
use std::collections::VecDeque;
use std::collections::vec_deque;
use std::fmt;
use std::marker::PhantomData;

use crate::core::{
    constants::DEFAULT_SEPARATOR,
    deque::{
        conversion::{Conversion, FnConversion},
        input::Input,
    },
    error::{Error, Result},
};

/// Ordered sequence of converted items, joined with a separator on demand
pub struct ConvertFormatDeque<T, U, C = FnConversion<T, U>> {
    items: VecDeque<T>,
    conversion: C,
    separator: String,
    _input: PhantomData<fn(U)>,
}

impl<T, U> ConvertFormatDeque<T, U, FnConversion<T, U>> {
    /// Create an empty deque from a convert and a format closure
    pub fn new<FC, FF>(convert: FC, format: FF) -> Self
    where
        FC: FnMut(U) -> Result<T> + 'static,
        FF: Fn(&T) -> String + 'static,
    {
        Self::from_conversion(FnConversion::new(convert, format), DEFAULT_SEPARATOR)
    }

    /// Create a deque pre-filled with `data`
    ///
    /// A single value becomes one element; a sequence is converted element by
    /// element, in order. Fails with the first conversion error.
    pub fn with_data<FC, FF>(
        convert: FC,
        format: FF,
        data: impl Into<Input<U>>,
        separator: impl Into<String>,
    ) -> Result<Self>
    where
        FC: FnMut(U) -> Result<T> + 'static,
        FF: Fn(&T) -> String + 'static,
    {
        Self::from_conversion_with_data(FnConversion::new(convert, format), data, separator)
    }
}

impl<T, U, C> ConvertFormatDeque<T, U, C>
where
    C: Conversion<U, Item = T>,
{
    /// Create an empty deque around an existing conversion
    pub fn from_conversion(conversion: C, separator: impl Into<String>) -> Self {
        Self {
            items: VecDeque::new(),
            conversion,
            separator: separator.into(),
            _input: PhantomData,
        }
    }

    /// Create a deque around an existing conversion, pre-filled with `data`
    pub fn from_conversion_with_data(
        conversion: C,
        data: impl Into<Input<U>>,
        separator: impl Into<String>,
    ) -> Result<Self> {
        let mut deque = Self::from_conversion(conversion, separator);
        deque.insert(data)?;
        Ok(deque)
    }

    /// Replace the separator, builder style
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Get the conversion
    pub fn conversion(&self) -> &C {
        &self.conversion
    }

    #[cfg(feature = "encryption")]
    pub(crate) fn conversion_mut(&mut self) -> &mut C {
        &mut self.conversion
    }

    /// Convert and append one element at the back
    pub fn append(&mut self, value: U) -> Result<()> {
        let item = self.conversion.convert(value)?;
        self.items.push_back(item);
        Ok(())
    }

    /// Convert and append every element, in order
    ///
    /// Either every value converts and is appended, or none is.
    pub fn extend<I: IntoIterator<Item = U>>(&mut self, values: I) -> Result<()> {
        let converted = self.convert_all(values)?;
        self.items.extend(converted);
        Ok(())
    }

    /// Append a single value or a sequence of values
    pub fn insert(&mut self, values: impl Into<Input<U>>) -> Result<()> {
        self.extend(values.into())
    }

    /// Pre-process each value into the input type, then convert and append
    pub fn insert_with<V, P>(&mut self, values: impl Into<Input<V>>, mut pre_process: P) -> Result<()>
    where
        P: FnMut(V) -> Result<U>,
    {
        let converted = values
            .into()
            .into_iter()
            .map(|value| pre_process(value).and_then(|input| self.conversion.convert(input)))
            .collect::<Result<Vec<_>>>()?;
        self.items.extend(converted);
        Ok(())
    }

    /// Append values that are already of the stored type, skipping conversion
    pub fn insert_stored(&mut self, values: impl Into<Input<T>>) {
        self.items.extend(values.into());
    }

    /// Append type-erased values that must already be of the stored type
    ///
    /// Every value is checked before any is appended; the first value of the
    /// wrong type fails the whole call with [`Error::TypeMismatch`].
    pub fn insert_dynamic(&mut self, values: Vec<Box<dyn Any>>) -> Result<()>
    where
        T: 'static,
    {
        let mut checked = Vec::with_capacity(values.len());
        for (position, value) in values.into_iter().enumerate() {
            match value.downcast::<T>() {
                Ok(item) => checked.push(*item),
                Err(_other) => {
                    return Err(Error::TypeMismatch {
                        expected: type_name::<T>(),
                        found: format!("a value of another type at element {}", position),
                    });
                }
            }
        }
        self.items.extend(checked);
        Ok(())
    }

    /// Append one value, consuming and returning the deque
    pub fn with(mut self, value: U) -> Result<Self> {
        self.append(value)?;
        Ok(self)
    }

    /// Append every value, consuming and returning the deque
    pub fn with_all<I: IntoIterator<Item = U>>(mut self, values: I) -> Result<Self> {
        self.extend(values)?;
        Ok(self)
    }

    /// Get the element at `index`; negative indices count from the back
    pub fn get(&self, index: isize) -> Result<&T> {
        let position = self.resolve(index)?;
        self.items.get(position).ok_or(Error::index(index, self.items.len()))
    }

    /// Convert `value` and store it at `index`
    ///
    /// The index is checked before `value` is converted.
    pub fn set(&mut self, index: isize, value: U) -> Result<()> {
        let position = self.resolve(index)?;
        let item = self.conversion.convert(value)?;
        self.items[position] = item;
        Ok(())
    }

    /// Remove and return the element at `index`, in its stored form
    pub fn draw(&mut self, index: isize) -> Result<T> {
        let position = self.resolve(index)?;
        self.items.remove(position).ok_or(Error::index(index, self.items.len()))
    }

    /// Remove and return the last element
    pub fn draw_last(&mut self) -> Result<T> {
        self.draw(-1)
    }

    /// Delete the element at `index`
    pub fn remove(&mut self, index: isize) -> Result<()> {
        self.draw(index).map(drop)
    }

    /// Remove every element
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of stored elements
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First element, if any
    pub fn front(&self) -> Option<&T> {
        self.items.front()
    }

    /// Last element, if any
    pub fn back(&self) -> Option<&T> {
        self.items.back()
    }

    /// Iterate over the stored elements, front to back
    pub fn iter(&self) -> vec_deque::Iter<'_, T> {
        self.items.iter()
    }

    /// Membership test
    ///
    /// True if `candidate` is stored as an element, or if its formatted form
    /// occurs anywhere in the rendered string. The second tier is a textual
    /// substring search, so it also matches text spanning a separator
    /// (`"1,2"` is "in" a deque of `1` and `2` joined by `,`) and fragments
    /// of a single element.
    pub fn contains(&self, candidate: &T) -> bool
    where
        T: PartialEq,
    {
        self.items.contains(candidate)
            || self.render().contains(&self.conversion.format(candidate))
    }

    /// Join the formatted elements with the current separator
    pub fn render(&self) -> String {
        self.render_with_separator(&self.separator)
    }

    /// Join the formatted elements with `separator`, leaving the stored one alone
    pub fn render_with_separator(&self, separator: &str) -> String {
        let mut rendered = String::new();
        for (position, item) in self.items.iter().enumerate() {
            if position > 0 {
                rendered.push_str(separator);
            }
            rendered.push_str(&self.conversion.format(item));
        }
        rendered
    }

    /// Get the separator
    pub fn separator(&self) -> &str {
        &self.separator
    }

    /// Set the separator used by later renders
    pub fn set_separator(&mut self, separator: impl Into<String>) {
        self.separator = separator.into();
    }

    /// Drop elements from the front until at most `capacity` remain.
    /// Returns how many were dropped.
    pub(crate) fn evict_to(&mut self, capacity: usize) -> usize {
        let excess = self.items.len().saturating_sub(capacity);
        for _ in 0..excess {
            self.items.pop_front();
        }
        excess
    }

    fn convert_all<I: IntoIterator<Item = U>>(&mut self, values: I) -> Result<Vec<T>> {
        values
            .into_iter()
            .map(|value| self.conversion.convert(value))
            .collect()
    }

    fn resolve(&self, index: isize) -> Result<usize> {
        let len = self.items.len();
        let position = if index < 0 {
            len.checked_sub(index.unsigned_abs())
        } else {
            Some(index.unsigned_abs())
        };
        position
            .filter(|&position| position < len)
            .ok_or(Error::index(index, len))
    }
}

impl<T, U, C> fmt::Display for ConvertFormatDeque<T, U, C>
where
    C: Conversion<U, Item = T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.render())
    }
}

impl<T: fmt::Debug, U, C> fmt::Debug for ConvertFormatDeque<T, U, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConvertFormatDeque")
            .field("items", &self.items)
            .field("separator", &self.separator)
            .finish_non_exhaustive()
    }
}

impl<'a, T, U, C> IntoIterator for &'a ConvertFormatDeque<T, U, C> {
    type Item = &'a T;
    type IntoIter = vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
