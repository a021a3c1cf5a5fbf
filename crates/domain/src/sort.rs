//! Sort specifications attached to list endpoints

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// Sort direction of one property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Returns the direction as a lowercase string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `(property, direction)` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    /// Property name to sort by.
    pub property: String,
    /// Direction for this property.
    #[serde(default)]
    pub direction: SortDirection,
}

impl FromStr for SortOrder {
    type Err = DomainError;

    /// Parses `property` or `property,direction`.
    fn from_str(s: &str) -> DomainResult<Self> {
        let (property, direction) = match s.split_once(',') {
            Some((property, direction)) => (property.trim(), direction.trim()),
            None => (s.trim(), "asc"),
        };
        if property.is_empty() {
            return Err(DomainError::InvalidSort(s.to_string()));
        }
        let direction = match direction.to_ascii_lowercase().as_str() {
            "asc" => SortDirection::Asc,
            "desc" => SortDirection::Desc,
            _ => return Err(DomainError::InvalidSort(s.to_string())),
        };
        Ok(Self {
            property: property.to_string(),
            direction,
        })
    }
}

/// Ordered list of sort entries; earlier entries take priority.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortSpec {
    orders: Vec<SortOrder>,
}

impl SortSpec {
    /// Creates an empty sort specification.
    #[must_use]
    pub const fn new() -> Self {
        Self { orders: Vec::new() }
    }

    /// Adds an ascending entry.
    #[must_use]
    pub fn asc(self, property: impl Into<String>) -> Self {
        self.by(property, SortDirection::Asc)
    }

    /// Adds a descending entry.
    #[must_use]
    pub fn desc(self, property: impl Into<String>) -> Self {
        self.by(property, SortDirection::Desc)
    }

    /// Adds an entry with an explicit direction.
    #[must_use]
    pub fn by(mut self, property: impl Into<String>, direction: SortDirection) -> Self {
        self.orders.push(SortOrder {
            property: property.into(),
            direction,
        });
        self
    }

    /// Returns the entries in priority order.
    #[must_use]
    pub fn orders(&self) -> &[SortOrder] {
        &self.orders
    }

    /// Returns true if there are no entries.
    #[must_use]
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

impl FromIterator<SortOrder> for SortSpec {
    fn from_iter<T: IntoIterator<Item = SortOrder>>(iter: T) -> Self {
        Self {
            orders: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builder_keeps_order() {
        let spec = SortSpec::new().desc("created").asc("name");
        let names: Vec<_> = spec.orders().iter().map(|o| o.property.as_str()).collect();
        assert_eq!(names, vec!["created", "name"]);
        assert_eq!(spec.orders()[0].direction, SortDirection::Desc);
    }

    #[test]
    fn test_parse_sort_order() {
        let order: SortOrder = "age, DESC".parse().unwrap();
        assert_eq!(order.property, "age");
        assert_eq!(order.direction, SortDirection::Desc);

        let order: SortOrder = "name".parse().unwrap();
        assert_eq!(order.direction, SortDirection::Asc);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(",asc".parse::<SortOrder>().is_err());
        assert!("name,sideways".parse::<SortOrder>().is_err());
    }
}
