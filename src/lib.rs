//! feedline: print the latest entries of your subscribed RSS feeds.
//!
//! The parsing core lives in [`feed`]: a lenient, literal tag matcher that
//! never fails, plus the item segmentation built on it. Everything else is
//! plumbing around it: the subscription file ([`storage`]), HTTP retrieval
//! ([`feed::fetch_all`]), configuration ([`config`]) and terminal output
//! ([`ui`], [`theme`]).

pub mod app;
pub mod config;
pub mod feed;
pub mod storage;
pub mod theme;
pub mod ui;
pub mod util;
