//! The closed set of label categories.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Label category.
///
/// The set is closed: labels always carry exactly one of these, and
/// spreadsheet imports must match one (case-insensitively, after trimming).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Medical,
    Nutricosmetic,
    Facial,
    Body,
    Hair,
    Podiatric,
    Intimate,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Medical,
        Category::Nutricosmetic,
        Category::Facial,
        Category::Body,
        Category::Hair,
        Category::Podiatric,
        Category::Intimate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Medical => "medical",
            Category::Nutricosmetic => "nutricosmetic",
            Category::Facial => "facial",
            Category::Body => "body",
            Category::Hair => "hair",
            Category::Podiatric => "podiatric",
            Category::Intimate => "intimate",
        }
    }

    /// Parse a category from external input (trimmed, case-insensitive).
    pub fn parse(input: &str) -> DomainResult<Self> {
        let normalized = input.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| {
                DomainError::validation(format!("'{}' is not a valid category", input.trim()))
            })
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
