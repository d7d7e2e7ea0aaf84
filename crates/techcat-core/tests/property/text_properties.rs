//! Property tests for the shared text helpers.

use proptest::prelude::*;

use techcat_core::text::{normalize_name, slugify, title_case, token_set, tokenize};

proptest! {
    #[test]
    fn prop_normalize_is_idempotent(raw in "[A-Za-zÀ-ÿ0-9 \\t!?.,:;+/()-]{0,40}") {
        let once = normalize_name(&raw);
        prop_assert_eq!(normalize_name(&once), once.clone());
        prop_assert!(!once.starts_with(' ') && !once.ends_with(' '));
        prop_assert!(!once.contains("  "));
    }

    #[test]
    fn prop_normalize_ignores_case(raw in "[A-Za-z0-9 +/-]{0,30}") {
        prop_assert_eq!(normalize_name(&raw.to_uppercase()), normalize_name(&raw.to_lowercase()));
    }

    #[test]
    fn prop_slug_is_an_identifier(raw in "\\PC{0,40}") {
        let slug = slugify(&raw);
        prop_assert!(!slug.is_empty());
        prop_assert!(!slug.starts_with('_') && !slug.ends_with('_'));
        prop_assert!(!slug.contains("__"));
        prop_assert!(slug.chars().all(|c| c == '_' || c.is_alphanumeric()));
    }

    #[test]
    fn prop_title_case_preserves_letters(raw in "[a-z]{1,8}( [a-z]{1,8}){0,3}") {
        let titled = title_case(&raw);
        prop_assert_eq!(titled.to_lowercase(), raw.clone());
        for word in titled.split(' ') {
            prop_assert!(word.chars().next().is_some_and(|c| c.is_uppercase()));
        }
    }

    #[test]
    fn prop_token_set_is_union_of_tokens(a in "[a-z ]{0,20}", b in "[a-z ]{0,20}") {
        let set = token_set([a.as_str(), b.as_str()]);
        for t in tokenize(&a).into_iter().chain(tokenize(&b)) {
            prop_assert!(set.contains(&t));
        }
        prop_assert!(set.len() <= tokenize(&a).len() + tokenize(&b).len());
    }
}
