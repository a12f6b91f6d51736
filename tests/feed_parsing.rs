//! Integration tests for the parsing core: tag extraction and item segmentation.
//!
//! These exercise the public API only, the way the CLI and other callers use it.

use feedline::feed::{extract, extract_within, parse_feed, NewsItem};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn rss(channel_title: &str, items: &[(&str, &str, &str)]) -> String {
    let mut doc = format!(
        "<?xml version=\"1.0\"?>\n<rss version=\"2.0\"><channel>\n<title>{}</title>\n",
        channel_title
    );
    for (title, link, date) in items {
        doc.push_str(&format!(
            "<item><title>{}</title><link>{}</link><pubDate>{}</pubDate></item>\n",
            title, link, date
        ));
    }
    doc.push_str("</channel></rss>");
    doc
}

// ============================================================================
// Extraction
// ============================================================================

#[test]
fn test_extract_basic_contract() {
    let found = extract("<a>hello</a>", "<a>", "</a>");
    assert_eq!((found.text, found.next), ("hello", Some(12)));

    let missing = extract("no tags here", "<a>", "</a>");
    assert_eq!((missing.text, missing.next), ("", None));

    let empty = extract("<a></a>", "<a>", "</a>");
    assert_eq!((empty.text, empty.next), ("", Some(7)));
}

#[test]
fn test_window_keeps_item_titles_apart() {
    let doc = "<item><link>x</link></item><item><title>Second</title></item>";
    let first_end = extract(doc, "<item>", "</item>").next.unwrap();

    let unbounded = extract(doc, "<title>", "</title>");
    assert_eq!(unbounded.text, "Second");

    let bounded = extract_within(doc, "<title>", "</title>", 0, first_end);
    assert_eq!(bounded.text, "");
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_two_items_share_channel_title() {
    let doc = rss(
        "Daily",
        &[
            ("One", "https://d.example/1", "Mon"),
            ("Two", "https://d.example/2", "Tue"),
        ],
    );
    let news = parse_feed(&doc);
    assert_eq!(
        news,
        vec![
            NewsItem {
                channel_title: "Daily".into(),
                title: "One".into(),
                link: "https://d.example/1".into(),
                pub_date: "Mon".into(),
            },
            NewsItem {
                channel_title: "Daily".into(),
                title: "Two".into(),
                link: "https://d.example/2".into(),
                pub_date: "Tue".into(),
            },
        ]
    );
}

#[test]
fn test_cdata_title_is_unwrapped() {
    let doc = rss("Daily", &[("<![CDATA[Real Title]]>", "l", "d")]);
    assert_eq!(parse_feed(&doc)[0].title, "Real Title");
}

#[test]
fn test_empty_and_itemless_documents() {
    assert!(parse_feed("").is_empty());
    assert!(parse_feed(&rss("Nothing here", &[])).is_empty());
    assert!(parse_feed("<title>x</title><link>y</link><pubDate>z</pubDate>").is_empty());
}

#[test]
fn test_atom_feed_yields_nothing() {
    let atom = r#"<feed xmlns="http://www.w3.org/2005/Atom"><title>A</title>
<entry><title>E</title></entry></feed>"#;
    assert!(parse_feed(atom).is_empty());
}

#[test]
fn test_one_bad_item_does_not_hide_the_rest() {
    let doc = "<channel><title>C</title>\
               <item><title>broken<link>l1</link></item>\
               <item><title>fine</title><link>l2</link></item></channel>";
    let news = parse_feed(doc);
    assert_eq!(news.len(), 2);
    assert_eq!(news[0].title, "");
    assert_eq!(news[0].link, "l1");
    assert_eq!(news[1].title, "fine");
}

proptest! {
    #[test]
    fn prop_parse_is_idempotent(doc in "(<item>|</item>|<title>|</title>|<link>|</link>|[a-z ]{0,8}){0,24}") {
        prop_assert_eq!(parse_feed(&doc), parse_feed(&doc));
    }

    #[test]
    fn prop_item_count_matches_generated_items(
        titles in proptest::collection::vec("[A-Za-z][A-Za-z ]{0,15}", 0..8),
    ) {
        let items: Vec<(&str, &str, &str)> =
            titles.iter().map(|t| (t.as_str(), "https://x.example", "today")).collect();
        let news = parse_feed(&rss("Gen", &items));
        prop_assert_eq!(news.len(), titles.len());
        for (item, title) in news.iter().zip(&titles) {
            prop_assert_eq!(&item.title, title);
            prop_assert_eq!(item.channel_title.as_str(), "Gen");
        }
    }
}
