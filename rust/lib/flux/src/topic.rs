//! Topic pattern matching.
//!
//! Patterns and topics are `/`-separated. `+` matches exactly one level,
//! `#` matches the remaining levels (zero or more) and must be last.

/// Check whether a concrete topic path matches a subscription pattern.
pub fn matches(pattern: &str, topic: &str) -> bool {
    let mut pat = pattern.split('/');
    let mut top = topic.split('/');

    loop {
        match (pat.next(), top.next()) {
            (Some("#"), _) => return true,
            (Some("+"), Some(_)) => {}
            (Some(p), Some(t)) if p == t => {}
            (None, None) => return true,
            _ => return false,
        }
    }
}

/// Validate a pattern: `#` may only appear as the final level.
pub fn is_valid_pattern(pattern: &str) -> bool {
    if pattern.is_empty() {
        return false;
    }
    let levels: Vec<&str> = pattern.split('/').collect();
    levels
        .iter()
        .enumerate()
        .all(|(i, level)| *level != "#" || i == levels.len() - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match() {
        assert!(matches("categories/page", "categories/page"));
        assert!(!matches("categories/page", "resources/page"));
    }

    #[test]
    fn exact_does_not_match_prefix_or_child() {
        assert!(!matches("categories", "categories/page"));
        assert!(!matches("categories/page", "categories"));
    }

    #[test]
    fn single_level_wildcard() {
        assert!(matches("+/page", "categories/page"));
        assert!(matches("+/page", "resources/page"));
        assert!(!matches("+/page", "resources/filter"));
        assert!(!matches("resources/+", "resources"));
        assert!(!matches("resources/+", "resources/page/extra"));
    }

    #[test]
    fn multi_level_wildcard() {
        assert!(matches("resources/#", "resources/page"));
        assert!(matches("resources/#", "resources/a/b/c"));
        assert!(matches("#", "app/route"));
        assert!(!matches("resources/#", "categories/page"));
    }

    #[test]
    fn multi_level_matches_parent_level() {
        assert!(matches("resources/#", "resources"));
    }

    #[test]
    fn pattern_validation() {
        assert!(is_valid_pattern("#"));
        assert!(is_valid_pattern("resources/#"));
        assert!(is_valid_pattern("+/page"));
        assert!(!is_valid_pattern("#/page"));
        assert!(!is_valid_pattern(""));
    }
}
