//! Ordered record of every filter combination queried in one search

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::filters::FilterSet;

/// One issued catalog query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    pub label: String,
    pub filters: FilterSet,
}

/// Labels and filter sets in the order the queries were issued.
///
/// Serialises as a JSON object whose keys keep issue order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditTrail {
    entries: Vec<AuditEntry>,
}

impl AuditTrail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, label: impl Into<String>, filters: &FilterSet) {
        self.entries.push(AuditEntry {
            label: label.into(),
            filters: filters.clone(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    /// Filters recorded under `label`
    pub fn get(&self, label: &str) -> Option<&FilterSet> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| &e.filters)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }
}

impl Serialize for AuditTrail {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.label, &entry.filters)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::Attribute;

    #[test]
    fn test_serializes_in_issue_order() {
        let mut trail = AuditTrail::new();
        trail.record("attempt 1", &FilterSet::new().with(Attribute::Season, "Summer"));
        trail.record("fallback", &FilterSet::new());

        let json = serde_json::to_string(&trail).unwrap();
        assert_eq!(json, r#"{"attempt 1":{"season":"Summer"},"fallback":{}}"#);
        assert_eq!(trail.labels().collect::<Vec<_>>(), vec!["attempt 1", "fallback"]);
    }
}
