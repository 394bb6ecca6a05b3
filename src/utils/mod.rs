pub mod text;

pub use text::{char_prefix, normalize_whitespace, truncate_with_ellipsis, word_count};
