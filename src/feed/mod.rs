//! Feed retrieval and parsing.
//!
//! - [`extract`] - Literal tag-pair extraction with an explicit scan cursor
//! - [`parser`] - Splits a document into `<item>` blocks and builds [`NewsItem`]s
//! - [`fetcher`] - HTTP retrieval with retries, timeouts and a size limit
//!
//! Parsing never fails. Malformed or missing markup produces empty fields or
//! fewer entries, so a broken feed cannot abort a run over many feeds.
//!
//! # Example
//!
//! ```
//! use feedline::feed::parse_feed;
//!
//! let doc = "<channel><title>News</title>\
//!            <item><title>Hello</title><link>https://example.com</link></item>\
//!            </channel>";
//! let news = parse_feed(doc);
//! assert_eq!(news.len(), 1);
//! assert_eq!(news[0].channel_title, "News");
//! assert_eq!(news[0].title, "Hello");
//! ```

mod extract;
mod fetcher;
mod parser;

pub use extract::{extract, extract_within, Extraction};
pub use fetcher::{build_client, fetch_all, fetch_document, FeedDocument, FetchError, FetchOptions};
pub use parser::{parse_feed, NewsItem};
