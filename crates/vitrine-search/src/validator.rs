//! Strict validation of interpreted filters

use tracing::debug;

use crate::attribute::Attribute;
use crate::filters::{CandidateFilters, FilterSet};
use crate::values::DomainValues;

/// Keep only the pairs whose key names a known attribute and whose value is an
/// exact, case-sensitive member of that attribute's legal values.
///
/// Nothing is coerced or case-folded. An empty result is returned as-is; the
/// caller decides what default to substitute.
pub fn validate(candidates: &CandidateFilters, values: &DomainValues) -> FilterSet {
    let mut filters = FilterSet::new();
    for (key, value) in candidates {
        let Ok(attribute) = key.parse::<Attribute>() else {
            debug!("Dropping filter on unknown attribute {key:?}");
            continue;
        };
        if values.contains(attribute, value) {
            filters.insert(attribute, value.clone());
        } else {
            debug!("Dropping {attribute}={value:?}: not a legal value");
        }
    }
    filters
}
