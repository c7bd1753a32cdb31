//! Filterable catalog attributes and their relaxation priority

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An enumerable catalog dimension that can constrain a query.
///
/// Variants are declared most-important first. [`Attribute::ALL`] is the only
/// place the priority order lives; both substitution and removal derive their
/// visiting order from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Gender,
    MasterCategory,
    SubCategory,
    ArticleType,
    BaseColour,
    Usage,
    Season,
}

impl Attribute {
    /// All attributes, most important first.
    pub const ALL: [Attribute; 7] = [
        Attribute::Gender,
        Attribute::MasterCategory,
        Attribute::SubCategory,
        Attribute::ArticleType,
        Attribute::BaseColour,
        Attribute::Usage,
        Attribute::Season,
    ];

    /// Wire name used by the catalog API and in filter mappings
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Gender => "gender",
            Attribute::MasterCategory => "mastercategory",
            Attribute::SubCategory => "subcategory",
            Attribute::ArticleType => "articletype",
            Attribute::BaseColour => "basecolour",
            Attribute::Usage => "usage",
            Attribute::Season => "season",
        }
    }

    /// Short name used in audit labels
    pub fn label(&self) -> &'static str {
        match self {
            Attribute::BaseColour => "colour",
            other => other.as_str(),
        }
    }

    /// Zero-based rank; lower is more important.
    pub fn priority(&self) -> usize {
        Self::ALL
            .iter()
            .position(|a| a == self)
            .unwrap_or(Self::ALL.len())
    }

    /// Whether a missing value may be replaced by a lexical near-match
    /// before the attribute is dropped.
    pub fn is_substitutable(&self) -> bool {
        matches!(self, Attribute::BaseColour | Attribute::SubCategory)
    }

    /// Attributes least important first.
    pub fn relaxation_order() -> impl Iterator<Item = Attribute> {
        Self::ALL.into_iter().rev()
    }

    /// Substitutable attributes in the order the engine tries them.
    pub fn substitution_order() -> impl Iterator<Item = Attribute> {
        Self::relaxation_order().filter(Attribute::is_substitutable)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known attribute
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown attribute: {0}")]
pub struct UnknownAttribute(pub String);

impl FromStr for Attribute {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| UnknownAttribute(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_follows_declaration() {
        assert_eq!(Attribute::Gender.priority(), 0);
        assert_eq!(Attribute::Season.priority(), 6);
        assert!(Attribute::SubCategory.priority() < Attribute::BaseColour.priority());
    }

    #[test]
    fn test_relaxation_order_is_least_important_first() {
        let order: Vec<_> = Attribute::relaxation_order().collect();
        assert_eq!(order.first(), Some(&Attribute::Season));
        assert_eq!(order.last(), Some(&Attribute::Gender));
    }

    #[test]
    fn test_substitution_order_tries_colour_before_subcategory() {
        let order: Vec<_> = Attribute::substitution_order().collect();
        assert_eq!(order, vec![Attribute::BaseColour, Attribute::SubCategory]);
    }

    #[test]
    fn test_wire_names_round_trip() {
        for attribute in Attribute::ALL {
            assert_eq!(attribute.as_str().parse::<Attribute>(), Ok(attribute));
        }
        assert!("colour".parse::<Attribute>().is_err());
        assert!("BaseColour".parse::<Attribute>().is_err());
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&Attribute::MasterCategory).unwrap();
        assert_eq!(json, "\"mastercategory\"");
        let parsed: Attribute = serde_json::from_str("\"basecolour\"").unwrap();
        assert_eq!(parsed, Attribute::BaseColour);
    }
}
