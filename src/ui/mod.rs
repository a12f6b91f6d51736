//! Terminal output for parsed entries.

mod articles;

pub use articles::{render_item, render_news};
