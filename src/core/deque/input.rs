/*!
Insertion input for the deques.

A call site decides once whether it is handing over a single value or a
sequence of values. Strings always arrive as a single value; they are never
split into characters.
*/

/// One value or a sequence of values to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input<U> {
    /// A single logical element
    One(U),
    /// Several elements, appended in order
    Many(Vec<U>),
}

impl<U> Input<U> {
    /// Wrap a single value
    pub fn one(value: U) -> Self {
        Input::One(value)
    }

    /// Wrap a sequence of values
    pub fn many<I: IntoIterator<Item = U>>(values: I) -> Self {
        Input::Many(values.into_iter().collect())
    }

    /// Number of elements this input will insert
    pub fn len(&self) -> usize {
        match self {
            Input::One(_) => 1,
            Input::Many(values) => values.len(),
        }
    }

    /// True for an empty sequence
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into the elements in insertion order
    pub fn into_vec(self) -> Vec<U> {
        match self {
            Input::One(value) => vec![value],
            Input::Many(values) => values,
        }
    }

    /// Apply `f` to every element, keeping the shape
    pub fn map<V, F: FnMut(U) -> V>(self, mut f: F) -> Input<V> {
        match self {
            Input::One(value) => Input::One(f(value)),
            Input::Many(values) => Input::Many(values.into_iter().map(&mut f).collect()),
        }
    }
}

impl<U> IntoIterator for Input<U> {
    type Item = U;
    type IntoIter = std::vec::IntoIter<U>;

    fn into_iter(self) -> Self::IntoIter {
        self.into_vec().into_iter()
    }
}

impl<U> From<Vec<U>> for Input<U> {
    fn from(values: Vec<U>) -> Self {
        Input::Many(values)
    }
}

impl<U, const N: usize> From<[U; N]> for Input<U> {
    fn from(values: [U; N]) -> Self {
        Input::Many(values.into())
    }
}

impl<U: Clone> From<&[U]> for Input<U> {
    fn from(values: &[U]) -> Self {
        Input::Many(values.to_vec())
    }
}

impl From<String> for Input<String> {
    fn from(value: String) -> Self {
        Input::One(value)
    }
}

impl From<&str> for Input<String> {
    fn from(value: &str) -> Self {
        Input::One(value.to_owned())
    }
}

macro_rules! impl_scalar_input {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Input<$ty> {
                fn from(value: $ty) -> Self {
                    Input::One(value)
                }
            }
        )*
    };
}

impl_scalar_input!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char);
