//! Query parameters for Canvas API calls.
//!
//! This module provides [`Parameter`] and [`Parameters`], an ordered list of
//! name/value pairs that renders to a URL query string.

use std::fmt;

/// A single query parameter for an API call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parameter {
    /// The name of the parameter. Emitted verbatim.
    pub name: String,
    /// The value of the parameter. Percent-encoded when emitted.
    pub value: String,
}

impl Parameter {
    /// Creates a new parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An ordered set of query parameters.
///
/// Insertion order is preserved in the emitted query string and duplicate
/// names are kept, which is how Canvas expects array parameters such as
/// `include[]` to be sent.
///
/// # Example
///
/// ```rust
/// use canvas_tools::clients::Parameters;
///
/// let parameters = Parameters::new()
///     .with("include[]", "term")
///     .with("include[]", "teachers")
///     .with("search_term", "intro to rust");
///
/// assert_eq!(
///     parameters.to_query_string(),
///     "?include[]=term&include[]=teachers&search_term=intro%20to%20rust"
/// );
/// assert_eq!(Parameters::new().to_query_string(), "");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Parameters(Vec<Parameter>);

impl Parameters {
    /// Creates an empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a parameter.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push(Parameter::new(name, value));
    }

    /// Appends a parameter and returns the set, for chaining.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the parameters in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.0.iter()
    }

    /// Converts the parameters to a query string suffix.
    ///
    /// Returns an empty string when there are no parameters, otherwise `?`
    /// followed by `name=value` pairs joined with `&`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        if self.0.is_empty() {
            return String::new();
        }

        let pairs: Vec<String> = self
            .0
            .iter()
            .map(|p| format!("{}={}", p.name, urlencoding::encode(&p.value)))
            .collect();
        format!("?{}", pairs.join("&"))
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl<K, V> FromIterator<(K, V)> for Parameters
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| Parameter::new(name, value))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
