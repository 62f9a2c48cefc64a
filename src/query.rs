use crate::types::ContentRecord;

/// Per-character lowercasing. Snippets and highlighting fold the same way, so anything
/// the filter matches can also be located in the text.
pub fn fold_case(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// Trim and lowercase a raw search input.
pub fn normalize_term(raw: &str) -> String {
    fold_case(raw.trim())
}

/// True when the (already lowercased) term occurs in the record's title or content.
pub fn matches(record: &ContentRecord, term: &str) -> bool {
    fold_case(&record.title).contains(term) || fold_case(&record.content).contains(term)
}

/// Case-insensitive substring filter over title and content. Keeps collection order.
/// An empty or whitespace-only term yields no results.
pub fn search(term: &str, collection: &[ContentRecord]) -> Vec<ContentRecord> {
    let term = normalize_term(term);
    if term.is_empty() { return Vec::new(); }
    collection.iter().filter(|r| matches(r, &term)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::test_content;
    use crate::mapping::normalize_all;

    fn record(id: &str, title: &str, content: &str) -> ContentRecord {
        ContentRecord { id: id.into(), title: title.into(), content: content.into(), ..Default::default() }
    }

    fn ids(rs: &[ContentRecord]) -> Vec<&str> { rs.iter().map(|r| r.id.as_str()).collect() }

    #[test]
    fn blank_terms_return_nothing() {
        let c = vec![record("1", "anything", "at all")];
        assert!(search("", &c).is_empty());
        assert!(search("   \t", &c).is_empty());
    }

    #[test]
    fn matches_title_or_content_case_insensitively() {
        let c = vec![
            record("1", "Rust Guide", ""),
            record("2", "Other", "all about RUST here"),
            record("3", "Nothing", "relevant"),
        ];
        assert_eq!(ids(&search("rust", &c)), vec!["1", "2"]);
        assert_eq!(ids(&search("  RuSt ", &c)), vec!["1", "2"]);
    }

    #[test]
    fn no_tokenization_across_fields() {
        // "guide other" spans title and content but is not a substring of either.
        let c = vec![record("1", "Guide", "other")];
        assert!(search("guide other", &c).is_empty());
    }

    #[test]
    fn keeps_collection_order_and_is_idempotent() {
        let c: Vec<_> = (0..10).map(|i| record(&i.to_string(), &format!("item {}", i), "")).rev().collect();
        let first = search("item", &c);
        let second = search("item", &c);
        assert_eq!(first, second);
        assert_eq!(first, c);
    }

    #[test]
    fn built_in_content_scenarios() {
        let c = normalize_all(&test_content());
        assert_eq!(ids(&search("team", &c)), vec!["2"]);
        // "our" also occurs in "our website", "your needs" and "Discover our".
        assert_eq!(ids(&search("our", &c)), vec!["1", "2", "3"]);
        assert_eq!(ids(&search("about", &c)), vec!["2"]);
        assert!(search("pricing", &c).is_empty());
    }

    #[test]
    fn expanding_lowercase_forms_still_match() {
        let c = vec![record("1", "İstanbul guide", ""), record("2", "ΟΔΟΣ", "")];
        assert_eq!(ids(&search("İSTANBUL", &c)), vec!["1"]);
        assert_eq!(ids(&search("οδοσ", &c)), vec!["2"]);
    }
}
