use std::collections::BTreeSet;

/// Words ignored by vocabulary comparisons.
const STOPWORDS: &[&str] = &["a", "an", "and", "by", "for", "in", "of", "on", "the", "to", "with"];

/// Lower-case alphanumeric tokens, stopwords removed.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_lowercase())
        .filter(|s| !STOPWORDS.contains(&s.as_str()))
        .collect()
}

/// Token set across several names.
pub fn token_set<'a>(names: impl IntoIterator<Item = &'a str>) -> BTreeSet<String> {
    names.into_iter().flat_map(tokenize).collect()
}
