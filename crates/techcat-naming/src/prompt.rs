//! Prompt text for chat-completion naming providers.

use techcat_core::models::NamingRequest;

/// Variants listed per prompt; the rest are summarized by count.
const MAX_LISTED_VARIANTS: usize = 40;

pub fn system_prompt() -> &'static str {
    "You consolidate technology names extracted from patents and papers into a \
     catalog. Given name variants that refer to one technology, answer with one \
     JSON object with keys: canonical_name (Title Case, concise, no vendor names), \
     domain (exactly one value from the allowed list), description (one sentence), \
     confidence (number from 0 to 1), rationale (one sentence)."
}

pub fn user_prompt(request: &NamingRequest) -> String {
    let mut lines = Vec::with_capacity(request.variants.len() + 6);
    lines.push(format!("Industry: {}", request.industry));
    lines.push(format!(
        "Allowed domains: {}",
        request.domain_taxonomy.join(", ")
    ));
    lines.push(format!(
        "Cluster {} (average similarity {:.2}) variants:",
        request.cluster_id, request.avg_similarity
    ));
    for variant in request.variants.iter().take(MAX_LISTED_VARIANTS) {
        let roles = if variant.roles.is_empty() {
            String::new()
        } else {
            format!(", roles: {}", variant.roles.join("/"))
        };
        lines.push(format!(
            "- {} ({} mentions{})",
            variant.name, variant.occurrence_count, roles
        ));
    }
    if request.variants.len() > MAX_LISTED_VARIANTS {
        lines.push(format!(
            "... and {} more variants",
            request.variants.len() - MAX_LISTED_VARIANTS
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use techcat_core::models::VariantSummary;

    fn request(n: usize) -> NamingRequest {
        NamingRequest {
            cluster_id: "cluster_0001".to_string(),
            variants: (0..n)
                .map(|i| VariantSummary {
                    name: format!("variant {i}"),
                    occurrence_count: 1,
                    roles: vec!["component".to_string()],
                    doc_types: vec![],
                })
                .collect(),
            avg_similarity: 0.9,
            domain_taxonomy: vec!["Propulsion".to_string(), "Avionics".to_string()],
            industry: "eVTOL".to_string(),
        }
    }

    #[test]
    fn prompt_lists_taxonomy_and_variants() {
        let text = user_prompt(&request(2));
        assert!(text.contains("Allowed domains: Propulsion, Avionics"));
        assert!(text.contains("- variant 1 (1 mentions, roles: component)"));
    }

    #[test]
    fn long_clusters_are_truncated() {
        let text = user_prompt(&request(45));
        assert!(text.contains("... and 5 more variants"));
        assert!(!text.contains("variant 44"));
    }
}
