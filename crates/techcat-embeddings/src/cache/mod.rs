mod exact_text;

pub use exact_text::{CacheStats, ExactTextCache};
