// Single source of truth for all default values.

// --- Catalog matching ---
pub const DEFAULT_MATCH_FUZZY_WEIGHT: f64 = 0.4;
pub const DEFAULT_MATCH_SEMANTIC_WEIGHT: f64 = 0.6;
pub const DEFAULT_ACCEPTANCE_THRESHOLD: f64 = 0.85;

// --- First-pass clustering ---
pub const DEFAULT_CLUSTER_FUZZY_WEIGHT: f64 = 0.4;
pub const DEFAULT_CLUSTER_SEMANTIC_WEIGHT: f64 = 0.6;
pub const DEFAULT_CLUSTER_EDGE_THRESHOLD: f64 = 0.85;
pub const DEFAULT_TOP_K: usize = 20;
pub const DEFAULT_COMMUNITY_SEED: u64 = 42;
pub const DEFAULT_COMMUNITY_MAX_PASSES: usize = 50;
pub const DEFAULT_COMMUNITY_ALGORITHM: &str = "louvain";

// --- Canonical-name re-clustering ---
pub const DEFAULT_CANONICAL_FUZZY_WEIGHT: f64 = 0.30;
pub const DEFAULT_CANONICAL_SEMANTIC_WEIGHT: f64 = 0.70;
pub const DEFAULT_CANONICAL_EDGE_THRESHOLD: f64 = 0.75;
pub const DEFAULT_HIGH_TIER: f64 = 0.85;
pub const DEFAULT_MEDIUM_TIER: f64 = 0.80;
pub const DEFAULT_MIN_VARIANT_OVERLAP: f64 = 0.30;
pub const DEFAULT_DESCRIPTION_PREFIX_CHARS: usize = 100;

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_PROVIDER: &str = "hashed";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_EMBEDDING_ENDPOINT: &str = "https://api.openai.com/v1/embeddings";
pub const DEFAULT_EMBEDDING_API_KEY_ENV: &str = "TECHCAT_EMBEDDING_API_KEY";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 256;
pub const DEFAULT_EMBEDDING_BATCH_SIZE: usize = 64;
pub const DEFAULT_EMBEDDING_CACHE_SIZE: u64 = 100_000;
pub const DEFAULT_EMBEDDING_TIMEOUT_SECS: u64 = 30;

// --- Naming ---
pub const DEFAULT_NAMING_PROVIDER: &str = "heuristic";
pub const DEFAULT_NAMING_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_NAMING_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_NAMING_API_KEY_ENV: &str = "TECHCAT_NAMING_API_KEY";
pub const DEFAULT_NAMING_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_INDUSTRY: &str = "eVTOL";

// --- Concurrency ---
pub const DEFAULT_MAX_CONCURRENT_CALLS: usize = 20;

// --- Output ---
pub const DEFAULT_ARTIFACT_DIR: &str = "artifacts";
pub const DEFAULT_CATALOG_VERSION: &str = "1.0.0";
pub const DEFAULT_MIN_COVERAGE: f64 = 0.95;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;

/// Closed domain taxonomy offered to the naming capability.
pub fn default_domain_taxonomy() -> Vec<String> {
    [
        "Propulsion",
        "Energy Storage",
        "Power Electronics",
        "Avionics",
        "Flight Control",
        "Autonomy",
        "Airframe",
        "Materials",
        "Manufacturing",
        "Infrastructure",
        "Communications",
        "Software",
        "Safety & Certification",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Domain pairs the second-pass domain gate treats as compatible.
pub fn default_related_domains() -> Vec<(String, String)> {
    [
        ("Propulsion", "Power Electronics"),
        ("Propulsion", "Energy Storage"),
        ("Energy Storage", "Power Electronics"),
        ("Avionics", "Flight Control"),
        ("Flight Control", "Autonomy"),
        ("Avionics", "Software"),
        ("Autonomy", "Software"),
        ("Airframe", "Materials"),
        ("Materials", "Manufacturing"),
        ("Avionics", "Communications"),
    ]
    .iter()
    .map(|(a, b)| (a.to_string(), b.to_string()))
    .collect()
}
