/// Resolver version, stamped into run summaries.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Domain assigned when the naming capability returns none or one outside the taxonomy.
pub const UNKNOWN_DOMAIN: &str = "Unknown";

/// Schema version of the checkpoint artifacts.
pub const ARTIFACT_SCHEMA_VERSION: &str = "1";

/// Characters kept by mention normalization besides letters, digits and spaces.
pub const NORMALIZATION_KEPT_PUNCTUATION: &[char] = &['-', '(', ')', '/', '+'];
