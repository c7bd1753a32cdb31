//! Alternate value suggestions for substitution

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Proposes legal alternates for a value that produced too few hits.
///
/// A legal value is a near-match when it starts with the target's first two
/// characters or contains the target's first three, both compared
/// case-insensitively. With no near-match the suggester samples uniformly from
/// the vocabulary so the engine always has something new to try. The random
/// source is owned here so tests can pin it with [`SimilaritySuggester::seeded`].
pub struct SimilaritySuggester {
    rng: Mutex<StdRng>,
}

impl SimilaritySuggester {
    /// Suggester seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic suggester for tests and replays
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Up to `max_count` distinct legal values other than `target`
    pub fn suggest(&self, legal: &[String], target: &str, max_count: usize) -> Vec<String> {
        if target.is_empty() || max_count == 0 {
            return Vec::new();
        }

        let target_lower = target.to_lowercase();
        let prefix: String = target_lower.chars().take(2).collect();
        let stem: String = target_lower.chars().take(3).collect();

        let mut pool: Vec<&String> = Vec::new();
        for value in legal {
            if value.to_lowercase() != target_lower && !pool.contains(&value) {
                pool.push(value);
            }
        }

        let matches: Vec<String> = pool
            .iter()
            .filter(|v| {
                let lower = v.to_lowercase();
                lower.starts_with(&prefix) || lower.contains(&stem)
            })
            .take(max_count)
            .map(|v| (*v).clone())
            .collect();

        if !matches.is_empty() {
            return matches;
        }

        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        pool.choose_multiple(&mut *rng, max_count)
            .map(|v| (*v).clone())
            .collect()
    }
}

impl Default for SimilaritySuggester {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colours() -> Vec<String> {
        ["Black", "Green", "Grey", "Sea Green", "Lime Green", "Olive", "Red"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_near_matches_in_vocabulary_order() {
        let suggester = SimilaritySuggester::seeded(7);
        let alternates = suggester.suggest(&colours(), "Green", 3);
        assert_eq!(alternates, vec!["Grey", "Sea Green", "Lime Green"]);
    }

    #[test]
    fn test_partial_target_matches_full_value() {
        let suggester = SimilaritySuggester::seeded(7);
        let alternates = suggester.suggest(&colours(), "Gree", 1);
        assert_eq!(alternates, vec!["Green"]);
    }

    #[test]
    fn test_matching_ignores_case_and_excludes_target() {
        let suggester = SimilaritySuggester::seeded(7);
        let alternates = suggester.suggest(&colours(), "olive", 3);
        assert!(!alternates.iter().any(|v| v.eq_ignore_ascii_case("olive")));
    }

    #[test]
    fn test_random_fallback_is_legal_and_bounded() {
        let legal = colours();
        let suggester = SimilaritySuggester::seeded(42);
        let alternates = suggester.suggest(&legal, "Purple", 3);

        assert_eq!(alternates.len(), 3);
        for value in &alternates {
            assert!(legal.contains(value));
        }
        let mut unique = alternates.clone();
        unique.dedup();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_same_seed_same_fallback() {
        let legal = colours();
        let a = SimilaritySuggester::seeded(99).suggest(&legal, "Purple", 3);
        let b = SimilaritySuggester::seeded(99).suggest(&legal, "Purple", 3);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_inputs() {
        let suggester = SimilaritySuggester::seeded(1);
        assert!(suggester.suggest(&colours(), "", 3).is_empty());
        assert!(suggester.suggest(&[], "Green", 3).is_empty());
        assert!(suggester.suggest(&colours(), "Green", 0).is_empty());
    }
}
