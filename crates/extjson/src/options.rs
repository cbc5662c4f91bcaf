/// Configuration options for decoding extended JSON.
///
/// # Examples
///
/// ```rust
/// use extjson::{DecodeOptions, Number, Value};
///
/// let options = DecodeOptions::default().with_use_number(true);
/// let value = extjson::from_str_with_options("12.50", &options).unwrap();
/// assert_eq!(value, Value::Number(Number::Text("12.50".into())));
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Whether numeric literals are kept as their source text.
    ///
    /// When `false`, integers that fit an `i64` decode to
    /// [`Number::Int64`](crate::Number::Int64), other numbers to
    /// [`Number::Float64`](crate::Number::Float64), and integers that would
    /// overflow keep their text in [`Number::Text`](crate::Number::Text).
    /// When `true`, every finite numeric literal is returned as
    /// [`Number::Text`](crate::Number::Text) so the caller can pick the
    /// representation. `NaN` and `Infinity` are always floats.
    ///
    /// Constructor arguments (`NumberLong("…")`, `Date(…)`) are converted by
    /// their constructor regardless of this setting.
    ///
    /// # Default
    ///
    /// `false`
    pub use_number: bool,
}

impl DecodeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_use_number(mut self, use_number: bool) -> Self {
        self.use_number = use_number;
        self
    }
}
