/*!
String deque.

Stores `String`s; anything that implements `Display` can be inserted and is
stringified on the way in. The `+`, `+=`, `|` and `|=` operators append at
the back no matter which side of the operator the deque is on.
*/

use std::any::Any;
use std::collections::vec_deque;
use std::fmt;

use crate::core::{
    constants::DEFAULT_SEPARATOR,
    deque::{
        conversion::Stringify,
        convert_format::ConvertFormatDeque,
        input::Input,
    },
    error::Result,
};

/// Deque of strings joined lazily with a separator
pub struct StringDeque {
    pub(crate) inner: ConvertFormatDeque<String, String, Stringify>,
}

impl StringDeque {
    /// Create an empty deque with an empty separator
    pub fn new() -> Self {
        Self {
            inner: ConvertFormatDeque::from_conversion(Stringify, DEFAULT_SEPARATOR),
        }
    }

    /// Create a deque pre-filled with `data`
    pub fn with_data<D: fmt::Display>(data: impl Into<Input<D>>, separator: impl Into<String>) -> Self {
        let mut deque = Self::new().with_separator(separator);
        deque.insert(data);
        deque
    }

    /// Replace the separator, builder style
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.inner.set_separator(separator);
        self
    }

    /// Stringify and append one value
    pub fn append<D: fmt::Display>(&mut self, value: D) {
        self.inner.insert_stored(value.to_string());
    }

    /// Stringify and append every value, in order
    pub fn extend<I>(&mut self, values: I)
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        self.inner
            .insert_stored(Input::many(values.into_iter().map(|value| value.to_string())));
    }

    /// Append a single value or a sequence of values
    pub fn insert<D: fmt::Display>(&mut self, values: impl Into<Input<D>>) {
        self.extend(values.into());
    }

    /// Pre-process each value, then stringify and append the results
    pub fn insert_with<V, R, P>(&mut self, values: impl Into<Input<V>>, mut pre_process: P) -> Result<()>
    where
        R: fmt::Display,
        P: FnMut(V) -> Result<R>,
    {
        self.inner
            .insert_with(values, |value| pre_process(value).map(|out| out.to_string()))
    }

    /// Append strings as they are
    pub fn insert_stored(&mut self, values: impl Into<Input<String>>) {
        self.inner.insert_stored(values);
    }

    /// Append type-erased values, each of which must be a `String`
    pub fn insert_dynamic(&mut self, values: Vec<Box<dyn Any>>) -> Result<()> {
        self.inner.insert_dynamic(values)
    }

    /// Get the element at `index`; negative indices count from the back
    pub fn get(&self, index: isize) -> Result<&str> {
        self.inner.get(index).map(String::as_str)
    }

    /// Stringify `value` and store it at `index`
    pub fn set<D: fmt::Display>(&mut self, index: isize, value: D) -> Result<()> {
        self.inner.set(index, value.to_string())
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

    /// Number of stored elements
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// First element, if any
    pub fn front(&self) -> Option<&str> {
        self.inner.front().map(String::as_str)
    }

    /// Last element, if any
    pub fn back(&self) -> Option<&str> {
        self.inner.back().map(String::as_str)
    }

    /// Iterate over the stored strings, front to back
    pub fn iter(&self) -> vec_deque::Iter<'_, String> {
        self.inner.iter()
    }

    /// True if `candidate` is an element or occurs in the rendered string
    pub fn contains(&self, candidate: &str) -> bool {
        self.inner.contains(&candidate.to_owned())
    }

    /// Join the elements with the current separator
    pub fn render(&self) -> String {
        self.inner.render()
    }

    /// Join the elements with `separator`, leaving the stored one alone
    pub fn render_with_separator(&self, separator: &str) -> String {
        self.inner.render_with_separator(separator)
    }

    /// Get the separator
    pub fn separator(&self) -> &str {
        self.inner.separator()
    }

    /// Set the separator used by later renders
    pub fn set_separator(&mut self, separator: impl Into<String>) {
        self.inner.set_separator(separator);
    }
}

impl Default for StringDeque {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StringDeque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl fmt::Debug for StringDeque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringDeque")
            .field("items", &self.inner.iter().collect::<Vec<_>>())
            .field("separator", &self.inner.separator())
            .finish()
    }
}

impl<'a> IntoIterator for &'a StringDeque {
    type Item = &'a String;
    type IntoIter = vec_deque::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

/// Implement the append operators for a string deque type.
///
/// The type needs inherent `append<D: Display>(&mut self, D)` and
/// `extend<I: IntoIterator<Item: Display>>(&mut self, I)` methods.
macro_rules! impl_append_operators {
    (@scalars $deque:ty; $($scalar:ty),*) => {
        $(
            impl ::std::ops::Add<$deque> for $scalar {
                type Output = $deque;

                fn add(self, mut deque: $deque) -> $deque {
                    deque.append(self);
                    deque
                }
            }
        )*
    };
    ($deque:ty) => {
        impl<D: ::std::fmt::Display> ::std::ops::AddAssign<D> for $deque {
            fn add_assign(&mut self, value: D) {
                self.append(value);
            }
        }

        impl<D: ::std::fmt::Display> ::std::ops::Add<D> for $deque {
            type Output = $deque;

            fn add(mut self, value: D) -> $deque {
                self.append(value);
                self
            }
        }

        impl<D: ::std::fmt::Display> ::std::ops::BitOrAssign<Vec<D>> for $deque {
            fn bitor_assign(&mut self, values: Vec<D>) {
                self.extend(values);
            }
        }

        impl<D: ::std::fmt::Display, const N: usize> ::std::ops::BitOrAssign<[D; N]> for $deque {
            fn bitor_assign(&mut self, values: [D; N]) {
                self.extend(values);
            }
        }

        impl<D: ::std::fmt::Display> ::std::ops::BitOr<Vec<D>> for $deque {
            type Output = $deque;

            fn bitor(mut self, values: Vec<D>) -> $deque {
                self.extend(values);
                self
            }
        }

        impl<D: ::std::fmt::Display, const N: usize> ::std::ops::BitOr<[D; N]> for $deque {
            type Output = $deque;

            fn bitor(mut self, values: [D; N]) -> $deque {
                self.extend(values);
                self
            }
        }

        impl<D: ::std::fmt::Display> ::std::ops::BitOr<$deque> for Vec<D> {
            type Output = $deque;

            fn bitor(self, mut deque: $deque) -> $deque {
                deque.extend(self);
                deque
            }
        }

        impl<D: ::std::fmt::Display, const N: usize> ::std::ops::BitOr<$deque> for [D; N] {
            type Output = $deque;

            fn bitor(self, mut deque: $deque) -> $deque {
                deque.extend(self);
                deque
            }
        }

        impl ::std::ops::Add<$deque> for &str {
            type Output = $deque;

            fn add(self, mut deque: $deque) -> $deque {
                deque.append(self);
                deque
            }
        }

        impl ::std::ops::Add<$deque> for String {
            type Output = $deque;

            fn add(self, mut deque: $deque) -> $deque {
                deque.append(self);
                deque
            }
        }

        impl_append_operators!(
            @scalars $deque;
            i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char
        );
    };
}

pub(crate) use impl_append_operators;

impl_append_operators!(StringDeque);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;

    fn lines() -> StringDeque {
        StringDeque::new().with_separator("\n")
    }

    #[test]
    fn test_init_variants() -> Result<()> {
        let a = StringDeque::with_data("test", "\n");
        let b = StringDeque::with_data(1i32, "\n");
        let c = StringDeque::with_data(vec!["test"], "\n");
        assert_eq!(a.get(0)?, "test");
        assert_eq!(b.get(0)?, "1");
        assert_eq!(c.get(0)?, "test");
        assert_eq!(a.len(), 1);
        Ok(())
    }

    #[test]
    fn test_empty() {
        assert_eq!(lines().render(), "");
        assert!(lines().is_empty());
    }

    #[test]
    fn test_add_both_sides() {
        let deque = lines() + "Line 1" + 2;
        assert_eq!(deque.render(), "Line 1\n2");

        let deque = "Line 1" + lines();
        let deque = 2i32 + deque;
        assert_eq!(deque.render(), "Line 1\n2");
    }

    #[test]
    fn test_add_assign() {
        let mut deque = lines();
        deque += "Line 1";
        deque += 2;
        assert_eq!(deque.to_string(), "Line 1\n2");
    }

    #[test]
    fn test_bitor_both_sides() {
        let deque = ["Line1", "Line2"] | lines();
        let deque = vec![3, 4] | deque;
        assert_eq!(deque.render(), "Line1\nLine2\n3\n4");

        let deque = lines() | vec!["a", "b"];
        assert_eq!(deque.render(), "a\nb");
    }

    #[test]
    fn test_operators_accept_arrays_and_every_scalar() {
        let deque = lines() | ["a", "b"];
        let deque = ["c"] | deque;
        assert_eq!(deque.render(), "a\nb\nc");

        let deque = 5u64 + lines();
        let deque = 7u8 + deque;
        let deque = -3i64 + deque;
        let deque = 1.5f32 + deque;
        let deque = 9usize + deque;
        let deque = 'x' + deque;
        assert_eq!(deque.render(), "5\n7\n-3\n1.5\n9\nx");

        let right = lines() + 5u64 + 7u8;
        let left = 7u8 + (5u64 + lines());
        assert_eq!(right.len(), left.len());
        assert_eq!(right.render(), "5\n7");
    }

    #[test]
    fn test_len() {
        let mut deque = lines() + "Line1";
        deque += 2;
        let mut deque = ["Line3", "4"] | deque;
        deque |= vec![5, 6];
        assert_eq!(deque.len(), 6);
    }

    #[test]
    fn test_str() {
        let mut deque = lines();
        deque += "first line";
        let deque = deque + "line 2";
        let mut deque = ["several more", "and another"] | deque;
        deque |= ["final"];
        assert_eq!(
            deque.render(),
            "first line\nline 2\nseveral more\nand another\nfinal"
        );
    }

    #[test]
    fn test_draw() -> Result<()> {
        let mut deque = lines();
        deque += "line 1";
        assert_eq!(deque.draw_last()?, "line 1");
        assert!(deque.is_empty());
        Ok(())
    }

    #[test]
    fn test_insert_with_pre_process() -> Result<()> {
        let mut deque = lines();
        deque.insert_with((1..=9).collect::<Vec<i32>>(), |v: i32| Ok(v * 2))?;
        assert_eq!(deque.render(), "2\n4\n6\n8\n10\n12\n14\n16\n18");
        Ok(())
    }

    #[test]
    fn test_insert_without_pre_process() {
        let mut deque = lines();
        deque.insert((1..=3).collect::<Vec<i32>>());
        deque.insert(4i32);
        assert_eq!(deque.render(), "1\n2\n3\n4");
    }

    #[test]
    fn test_insert_dynamic_rejects_non_strings() -> Result<()> {
        let mut deque = lines();
        deque += "test";
        let result = deque.insert_dynamic(vec![Box::new(1u8)]);
        assert!(matches!(result, Err(Error::TypeMismatch { .. })));
        assert_eq!(deque.render(), "test");

        deque.insert_dynamic(vec![Box::new(String::from("more"))])?;
        assert_eq!(deque.render(), "test\nmore");
        Ok(())
    }

    #[test]
    fn test_separator_override() {
        let mut deque = StringDeque::new().with_separator("!");
        deque |= [1, 2, 3, 4, 5, 6, 7, 8, 9, 0];
        assert_eq!(deque.render_with_separator("\n"), "1\n2\n3\n4\n5\n6\n7\n8\n9\n0");
        assert_eq!(format!("{:>24}", deque), "     1!2!3!4!5!6!7!8!9!0");
    }

    #[test]
    fn test_contains() {
        let mut deque = StringDeque::new().with_separator(",");
        deque |= [1, 2];
        assert!(deque.contains("1"));
        assert!(deque.contains("1,2"));
        assert!(!deque.contains("3"));
    }

    #[test]
    fn test_set_and_clear() -> Result<()> {
        let mut deque = lines();
        assert!(matches!(deque.set(0, "test"), Err(Error::IndexOutOfRange { .. })));
        assert!(matches!(deque.set(1, 1), Err(Error::IndexOutOfRange { .. })));

        deque += "old";
        deque.set(0, "new")?;
        assert_eq!(deque.get(0)?, "new");

        deque += "line 2";
        deque.clear();
        assert_eq!(deque.len(), 0);
        assert_eq!(deque.render(), "");
        Ok(())
    }
}
