//! Ordered `key=value` pairs trailing a starlist line

use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimals used for numeric keywords unless a precision is given
pub const DEFAULT_DECIMALS: u8 = 2;

/// A single keyword value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum KeywordValue {
    /// Numeric value printed with a fixed number of decimals
    Number { value: f64, decimals: u8 },
    /// Free text, printed with interior whitespace and `=` replaced by `_`
    Text(String),
}

impl KeywordValue {
    pub fn number(value: f64) -> Self {
        KeywordValue::Number {
            value,
            decimals: DEFAULT_DECIMALS,
        }
    }

    pub fn with_decimals(value: f64, decimals: u8) -> Self {
        KeywordValue::Number { value, decimals }
    }
}

impl fmt::Display for KeywordValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeywordValue::Number { value, decimals } => {
                write!(f, "{:.*}", *decimals as usize, value)
            }
            KeywordValue::Text(text) => {
                // A value must stay one `key=value` token
                let words: Vec<&str> = text.split_whitespace().collect();
                write!(f, "{}", words.join("_").replace('=', "_"))
            }
        }
    }
}

impl From<f64> for KeywordValue {
    fn from(value: f64) -> Self {
        KeywordValue::number(value)
    }
}

impl From<&str> for KeywordValue {
    fn from(text: &str) -> Self {
        KeywordValue::Text(text.to_string())
    }
}

impl From<String> for KeywordValue {
    fn from(text: String) -> Self {
        KeywordValue::Text(text)
    }
}

/// Keywords in insertion order. Re-inserting a key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Keywords {
    entries: Vec<(String, KeywordValue)>,
}

impl Keywords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<KeywordValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&KeywordValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &KeywordValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `key=value` tokens in order
    pub fn to_tokens(&self) -> Vec<String> {
        self.iter().map(|(k, v)| format!("{}={}", k, v)).collect()
    }
}

impl<K: Into<String>, V: Into<KeywordValue>> FromIterator<(K, V)> for Keywords {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut keywords = Keywords::new();
        for (k, v) in iter {
            keywords.insert(k, v);
        }
        keywords
    }
}
