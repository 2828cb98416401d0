//! Substring matching policy shared by the scorer and the place catalog.
//!
//! Exact-then-substring-in-both-directions is deliberately naive. Its
//! false positives and negatives are part of the observable contract, so
//! keep it as-is rather than swapping in edit-distance matching.

/// True when either string contains the other. Empty strings never match;
/// a report missing a field drops out of matching instead of matching
/// everything.
pub fn either_contains(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(b) || b.contains(a)
}

/// True when `value` matches at least one candidate.
pub fn matches_any<S: AsRef<str>>(value: &str, candidates: &[S]) -> bool {
    candidates.iter().any(|c| either_contains(value, c.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_either_direction() {
        assert!(either_contains("渋谷ロフト", "ロフト"));
        assert!(either_contains("ロフト", "渋谷ロフト"));
        assert!(!either_contains("ロフト", "ハンズ"));
    }

    #[test]
    fn test_empty_never_matches() {
        assert!(!either_contains("", "渋谷"));
        assert!(!either_contains("渋谷", ""));
        assert!(!either_contains("", ""));
    }

    #[test]
    fn test_case_sensitive() {
        assert!(!either_contains("LOFT", "loft"));
    }

    #[test]
    fn test_matches_any() {
        let targets = vec!["渋谷".to_string(), "新宿".to_string()];
        assert!(matches_any("渋谷区神南", &targets));
        assert!(!matches_any("池袋", &targets));
    }
}
