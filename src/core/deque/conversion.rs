/*!
Conversion pipeline for the deques.

A deque holds one [`Conversion`]: `convert` turns an accepted input into the
stored element type, `format` turns a stored element into its rendering.
Neither is allowed to look at the deque itself.
*/

use std::fmt;

use crate::core::error::Result;

/// Trait for the convert/format pair owned by a deque
pub trait Conversion<U> {
    /// Stored element type
    type Item;

    /// Convert an input value into the stored type
    fn convert(&mut self, value: U) -> Result<Self::Item>;

    /// Render a stored element
    fn format(&self, item: &Self::Item) -> String;
}

/// Boxed convert function
pub type ConvertFn<T, U> = Box<dyn FnMut(U) -> Result<T>>;

/// Boxed format function
pub type FormatFn<T> = Box<dyn Fn(&T) -> String>;

/// Conversion built from a pair of closures
pub struct FnConversion<T, U> {
    convert: ConvertFn<T, U>,
    format: FormatFn<T>,
}

impl<T, U> FnConversion<T, U> {
    /// Create a conversion from closures
    pub fn new<C, F>(convert: C, format: F) -> Self
    where
        C: FnMut(U) -> Result<T> + 'static,
        F: Fn(&T) -> String + 'static,
    {
        Self {
            convert: Box::new(convert),
            format: Box::new(format),
        }
    }
}

impl<T, U> Conversion<U> for FnConversion<T, U> {
    type Item = T;

    fn convert(&mut self, value: U) -> Result<T> {
        (self.convert)(value)
    }

    fn format(&self, item: &T) -> String {
        (self.format)(item)
    }
}

impl<T, U> fmt::Debug for FnConversion<T, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnConversion").finish_non_exhaustive()
    }
}

/// Identity conversion over strings
#[derive(Debug, Clone, Copy, Default)]
pub struct Stringify;

impl Conversion<String> for Stringify {
    type Item = String;

    fn convert(&mut self, value: String) -> Result<String> {
        Ok(value)
    }

    fn format(&self, item: &String) -> String {
        item.clone()
    }
}
