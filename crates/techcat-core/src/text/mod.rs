//! Text helpers shared by every stage.

mod normalize;
mod slug;
mod tokens;

pub use normalize::{normalize_name, title_case};
pub use slug::slugify;
pub use tokens::{token_set, tokenize};
