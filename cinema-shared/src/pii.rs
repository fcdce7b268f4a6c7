use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Customer contact data (name, email, phone) that must reach the booking
/// backend untouched but must never show up in `tracing` output.
///
/// `Debug` and `Display` print a redacted form; serialization writes the real
/// value because the wrapped field is part of the outgoing booking payload.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Masked<T>(pub T);

impl<T> Masked<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: AsRef<str>> Masked<T> {
    /// Redacted rendering: first character kept, rest starred.
    pub fn redacted(&self) -> String {
        let s = self.0.as_ref();
        match s.chars().next() {
            Some(first) => format!("{}{}", first, "*".repeat(7)),
            None => String::new(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.0.as_ref().trim().is_empty()
    }
}

impl<T: AsRef<str>> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Masked({})", self.redacted())
    }
}

impl<T: AsRef<str>> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl From<String> for Masked<String> {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Masked<String> {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
