//! Inverted token index for keyword-overlap candidate retrieval.

use std::collections::{BTreeSet, HashMap};

use techcat_core::text::tokenize;

pub struct KeywordIndex {
    tokens: Vec<BTreeSet<String>>,
    postings: HashMap<String, Vec<usize>>,
}

impl KeywordIndex {
    /// Index each text by position.
    pub fn build<S: AsRef<str>>(texts: &[S]) -> Self {
        let tokens: Vec<BTreeSet<String>> = texts
            .iter()
            .map(|t| tokenize(t.as_ref()).into_iter().collect())
            .collect();
        let mut postings: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, set) in tokens.iter().enumerate() {
            for token in set {
                postings.entry(token.clone()).or_default().push(i);
            }
        }
        Self { tokens, postings }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Up to `top_k` other entries sharing a token with `i`, ranked by
    /// Jaccard overlap (ties by position).
    pub fn candidates(&self, i: usize, top_k: usize) -> Vec<usize> {
        let Some(own) = self.tokens.get(i) else {
            return Vec::new();
        };
        let mut shared: HashMap<usize, usize> = HashMap::new();
        for token in own {
            if let Some(posting) = self.postings.get(token) {
                for &j in posting {
                    if j != i {
                        *shared.entry(j).or_default() += 1;
                    }
                }
            }
        }
        let mut ranked: Vec<(usize, f64)> = shared
            .into_iter()
            .map(|(j, common)| {
                let union = own.len() + self.tokens[j].len() - common;
                (j, common as f64 / union as f64)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.into_iter().take(top_k).map(|(j, _)| j).collect()
    }
}
