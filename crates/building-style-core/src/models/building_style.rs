//! Building style metadata record.

use std::collections::BTreeMap;
use std::fmt;

/// Full set of building styles, keyed by style id.
pub type Catalog = BTreeMap<u32, BuildingStyleInfo>;

/// Name, author and description of one building style.
///
/// Fields are never absent: anything missing at construction or decode
/// time becomes an empty string. Values are immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BuildingStyleInfo {
    name: String,
    author: String,
    description: String,
}

impl BuildingStyleInfo {
    pub fn new(
        name: impl Into<String>,
        author: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            author: author.into(),
            description: description.into(),
        }
    }

    /// Build a record from optional parts, substituting empty strings for missing ones.
    pub fn from_parts(
        name: Option<String>,
        author: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            name: name.unwrap_or_default(),
            author: author.unwrap_or_default(),
            description: description.unwrap_or_default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for BuildingStyleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_defaults_missing_fields() {
        let info = BuildingStyleInfo::from_parts(Some("Chicago".to_string()), None, None);
        assert_eq!(info.name(), "Chicago");
        assert_eq!(info.author(), "");
        assert_eq!(info.description(), "");

        let empty = BuildingStyleInfo::from_parts(None, None, None);
        assert_eq!(empty, BuildingStyleInfo::default());
    }

    #[test]
    fn test_display_is_name() {
        let info = BuildingStyleInfo::new("Houston", "Maxis", "Texas skyline");
        assert_eq!(info.to_string(), "Houston");
    }
}
