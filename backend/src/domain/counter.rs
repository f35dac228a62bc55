//! Named counters held in the cache store.
//!
//! A counter springs into existence at zero the first time it is incremented
//! and is only ever observed through the value an increment returns.

use std::fmt;

/// Key of the request counter exposed by `POST /counter`.
pub const HITS_COUNTER_KEY: &str = "hits";

/// Validation errors returned by [`CounterKey::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterKeyValidationError {
    Empty,
    ContainsWhitespace,
}

impl fmt::Display for CounterKeyValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "counter key must not be empty"),
            Self::ContainsWhitespace => write!(f, "counter key must not contain whitespace"),
        }
    }
}

impl std::error::Error for CounterKeyValidationError {}

/// Cache key naming a counter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CounterKey(String);

impl CounterKey {
    /// Validate and construct a [`CounterKey`].
    ///
    /// # Examples
    /// ```
    /// use backend::domain::CounterKey;
    ///
    /// let key = CounterKey::new("hits").expect("valid key");
    /// assert_eq!(key.as_ref(), "hits");
    /// assert!(CounterKey::new("").is_err());
    /// ```
    pub fn new(key: impl Into<String>) -> Result<Self, CounterKeyValidationError> {
        let key = key.into();
        if key.is_empty() {
            return Err(CounterKeyValidationError::Empty);
        }
        if key.chars().any(char::is_whitespace) {
            return Err(CounterKeyValidationError::ContainsWhitespace);
        }
        Ok(Self(key))
    }

    /// The `hits` counter incremented by the HTTP surface.
    pub fn hits() -> Self {
        Self(HITS_COUNTER_KEY.to_owned())
    }
}

impl AsRef<str> for CounterKey {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for CounterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}
