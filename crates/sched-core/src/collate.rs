//! Human-facing string ordering for venue and track names.

use std::cmp::Ordering;

/// Compares two names the way a reader expects them listed.
///
/// Letters compare case-insensitively first, so `"ai Summit"` sorts next
/// to `"AI Summit"` rather than after every capitalised name. Among names
/// that differ only in case, lowercase sorts first. Byte order breaks any
/// remaining tie, which keeps this a total order.
pub fn compare(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded
        .then_with(|| {
            a.chars()
                .map(|c| (c.is_uppercase(), c))
                .cmp(b.chars().map(|c| (c.is_uppercase(), c)))
        })
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_insensitive_first() {
        assert_eq!(compare("apple", "Banana"), Ordering::Less);
        assert_eq!(compare("Banana", "apple"), Ordering::Greater);
    }

    #[test]
    fn lowercase_before_uppercase_on_tie() {
        assert_eq!(compare("stage", "Stage"), Ordering::Less);
        assert_eq!(compare("Stage", "stage"), Ordering::Greater);
    }

    #[test]
    fn equal_only_when_identical() {
        assert_eq!(compare("Stage 1", "Stage 1"), Ordering::Equal);
        assert_ne!(compare("Stage 1", "Stage 10"), Ordering::Equal);
    }

    #[test]
    fn sort_is_deterministic() {
        let mut a = vec!["b", "A", "a", "B", "ab"];
        let mut b = vec!["B", "ab", "a", "b", "A"];
        a.sort_by(|x, y| compare(x, y));
        b.sort_by(|x, y| compare(x, y));
        assert_eq!(a, b);
        assert_eq!(a, vec!["a", "A", "ab", "b", "B"]);
    }
}
