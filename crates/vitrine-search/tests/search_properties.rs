//! Property-based tests for search invariants

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use proptest::prelude::*;
use vitrine_search::{
    validate, Attribute, CandidateFilters, CatalogClient, CatalogError, CatalogItem,
    DomainValueCache, DomainValues, FilterSet, RelaxationEngine, SearchConfig,
    SimilaritySuggester,
};

/// Hands out the given pages in order, then empty pages
struct PagedCatalog {
    pages: Mutex<Vec<Vec<i64>>>,
}

#[async_trait]
impl CatalogClient for PagedCatalog {
    async fn query(
        &self,
        _filters: &FilterSet,
        limit: usize,
    ) -> Result<Vec<CatalogItem>, CatalogError> {
        let mut pages = self.pages.lock().unwrap();
        let page = if pages.is_empty() {
            Vec::new()
        } else {
            pages.remove(0)
        };
        Ok(page
            .into_iter()
            .take(limit)
            .map(|id| CatalogItem::new(id, "item"))
            .collect())
    }
}

fn arb_vocabulary() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[A-Za-z]{1,8}", 0..12)
}

proptest! {
    /// Property: returned items never share an identifier
    #[test]
    fn prop_results_are_unique(
        pages in prop::collection::vec(prop::collection::vec(0i64..25, 0..15), 0..20),
        target in 1usize..12,
        seed in any::<u64>(),
    ) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let values = DomainValues::new()
            .with(Attribute::Gender, ["Men"])
            .with(Attribute::BaseColour, ["Green", "Grey", "Olive"])
            .with(Attribute::SubCategory, ["Gloves", "Topwear"]);
        let engine = RelaxationEngine::new(
            Arc::new(PagedCatalog { pages: Mutex::new(pages) }),
            Arc::new(DomainValueCache::fixed(values)),
            SearchConfig::default(),
        )
        .with_suggester(SimilaritySuggester::seeded(seed));
        let candidates: CandidateFilters = [
            ("gender".to_string(), "Men".to_string()),
            ("basecolour".to_string(), "Green".to_string()),
            ("subcategory".to_string(), "Gloves".to_string()),
        ]
        .into_iter()
        .collect();

        let outcome = runtime.block_on(engine.search_with(&candidates, target, 6)).unwrap();

        let ids: HashSet<i64> = outcome.items.iter().map(|i| i.product_id).collect();
        prop_assert_eq!(ids.len(), outcome.items.len());
        prop_assert!(outcome.items.len() <= 10);
        prop_assert!(outcome.total_found >= outcome.items.len());
    }

    /// Property: suggestions are legal, distinct, bounded and never the target
    #[test]
    fn prop_suggestions_are_legal_alternates(
        legal in arb_vocabulary(),
        target in "[A-Za-z]{0,8}",
        max_count in 0usize..5,
        seed in any::<u64>(),
    ) {
        let suggester = SimilaritySuggester::seeded(seed);
        let alternates = suggester.suggest(&legal, &target, max_count);

        prop_assert!(alternates.len() <= max_count);
        let unique: HashSet<&String> = alternates.iter().collect();
        prop_assert_eq!(unique.len(), alternates.len());
        for value in &alternates {
            prop_assert!(legal.contains(value));
            prop_assert!(!value.eq_ignore_ascii_case(&target));
        }
    }

    /// Property: validation keeps exactly the legal pairs
    #[test]
    fn prop_validation_keeps_only_legal_pairs(
        legal in arb_vocabulary(),
        chosen in "[A-Za-z]{1,8}",
    ) {
        let values = DomainValues::new().with(Attribute::BaseColour, legal.clone());
        let candidates: CandidateFilters =
            [("basecolour".to_string(), chosen.clone())].into_iter().collect();

        let filters = validate(&candidates, &values);

        prop_assert_eq!(filters.get(Attribute::BaseColour).is_some(), legal.contains(&chosen));
    }
}
