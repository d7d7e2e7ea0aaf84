//! Offline naming provider.
//!
//! Picks the most frequent variant as the canonical name and infers a
//! domain from keyword hints. Deterministic, so it is also the namer the
//! tests and air-gapped runs use.

use async_trait::async_trait;
use techcat_core::errors::{NamingError, TechcatResult};
use techcat_core::models::{NamingRequest, NamingResponse};
use techcat_core::text::{title_case, tokenize};
use techcat_core::traits::ICanonicalNamer;

/// Keyword hints per domain of the default taxonomy.
const DOMAIN_HINTS: &[(&str, &[&str])] = &[
    ("Energy Storage", &["battery", "batteries", "cell", "cells", "electrolyte", "anode", "cathode", "lithium", "wh"]),
    ("Propulsion", &["rotor", "tiltrotor", "propeller", "propulsion", "motor", "thrust", "fan", "ducted"]),
    ("Power Electronics", &["inverter", "converter", "power", "voltage", "charger", "charging"]),
    ("Flight Control", &["control", "fly", "stability", "actuator"]),
    ("Avionics", &["avionics", "sensor", "display", "lidar", "radar"]),
    ("Autonomy", &["autonomous", "autonomy", "pilotless", "detect", "avoid"]),
    ("Airframe", &["airframe", "wing", "fuselage", "tiltwing"]),
    ("Materials", &["composite", "carbon", "fiber", "alloy", "material"]),
    ("Manufacturing", &["manufacturing", "additive", "printing", "assembly"]),
    ("Infrastructure", &["vertiport", "vertiports", "infrastructure", "pad"]),
    ("Communications", &["communication", "datalink", "5g", "satcom"]),
    ("Software", &["software", "algorithm", "simulation"]),
];

pub struct HeuristicNamer;

impl HeuristicNamer {
    fn infer_domain(request: &NamingRequest) -> Option<String> {
        let tokens: Vec<String> = request
            .variants
            .iter()
            .flat_map(|v| tokenize(&v.name))
            .collect();

        let mut best: Option<(&str, usize)> = None;
        for &(domain, hints) in DOMAIN_HINTS {
            if !request.domain_taxonomy.iter().any(|d| d == domain) {
                continue;
            }
            let hits = tokens.iter().filter(|t| hints.contains(&t.as_str())).count();
            if hits > 0 && best.map_or(true, |(_, h)| hits > h) {
                best = Some((domain, hits));
            }
        }
        best.map(|(d, _)| d.to_string())
    }
}

#[async_trait]
impl ICanonicalNamer for HeuristicNamer {
    async fn name_cluster(&self, request: &NamingRequest) -> TechcatResult<NamingResponse> {
        let top = request
            .variants
            .iter()
            .max_by(|a, b| {
                a.occurrence_count
                    .cmp(&b.occurrence_count)
                    .then_with(|| b.name.cmp(&a.name))
            })
            .ok_or_else(|| NamingError::EmptyName {
                cluster_id: request.cluster_id.clone(),
            })?;

        let canonical_name = title_case(&top.name);
        let others: Vec<&str> = request
            .variants
            .iter()
            .filter(|v| v.name != top.name)
            .map(|v| v.name.as_str())
            .take(5)
            .collect();
        let description = if others.is_empty() {
            format!("{canonical_name} as referenced in {} industry documents.", request.industry)
        } else {
            format!("{canonical_name}, also referred to as {}.", others.join(", "))
        };

        Ok(NamingResponse {
            canonical_name,
            domain: Self::infer_domain(request),
            description,
            confidence: Some((0.5 + 0.5 * request.avg_similarity).clamp(0.0, 1.0)),
            rationale: format!(
                "Most frequent of {} variants ({} mentions).",
                request.variants.len(),
                top.occurrence_count
            ),
        })
    }

    fn name(&self) -> &str {
        "heuristic"
    }
}
