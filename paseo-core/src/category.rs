//! Point-of-interest categories compared without regard to case.
//!
//! # Examples
//! ```
//! use paseo_core::Category;
//!
//! assert_eq!(Category::new("Museo"), Category::new("museo"));
//! assert_eq!(Category::new(" Templo ").as_str(), "Templo");
//! ```

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A category label such as `Museo`, `Templo` or `Restaurante`.
///
/// The original label is kept for display; equality and hashing use the
/// trimmed, Unicode-lowercased key.
#[derive(Debug, Clone)]
pub struct Category {
    label: String,
    key: String,
}

impl Category {
    /// Construct a category from its label.
    pub fn new(label: impl Into<String>) -> Self {
        let raw: String = label.into();
        let trimmed = raw.trim().to_owned();
        let key = trimmed.to_lowercase();
        Self {
            label: trimmed,
            key,
        }
    }

    /// Label as supplied, minus surrounding whitespace.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.label
    }

    /// Case-insensitive comparison key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether `label` names this category.
    #[must_use]
    pub fn matches(&self, label: &str) -> bool {
        self.key == label.trim().to_lowercase()
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label)
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Self::new(label)
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label)
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}
