use super::extract::{extract, extract_within};

const ITEM: (&str, &str) = ("<item>", "</item>");
const TITLE: (&str, &str) = ("<title>", "</title>");
const LINK: (&str, &str) = ("<link>", "</link>");
const PUB_DATE: (&str, &str) = ("<pubDate>", "</pubDate>");
const CDATA: (&str, &str) = ("<![CDATA[", "]]>");

/// One entry of a feed, tagged with the title of the channel it came from.
///
/// Any field may be empty when the corresponding tag was absent or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsItem {
    pub channel_title: String,
    pub title: String,
    pub link: String,
    pub pub_date: String,
}

/// Splits a feed document into its `<item>` blocks and extracts the entries.
///
/// Parsing is lenient by contract: missing fields become empty strings, and
/// the scan stops at the first item block that is missing or empty. An
/// empty document, or one without item blocks, yields no entries.
///
/// The channel title is the first `<title>` that closes before the first
/// item does, which assumes the feed-level metadata precedes the items.
pub fn parse_feed(document: &str) -> Vec<NewsItem> {
    let first = extract(document, ITEM.0, ITEM.1);
    let title_window_end = first.next.unwrap_or(document.len());
    let channel_title = extract_within(document, TITLE.0, TITLE.1, 0, title_window_end).text;

    let mut news = Vec::new();
    let mut item = first;
    while item.has_text() {
        news.push(parse_item(channel_title, item.text));

        let Some(cursor) = item.next else {
            break;
        };
        item = extract_within(document, ITEM.0, ITEM.1, cursor, document.len());
    }

    tracing::debug!(
        channel = %channel_title,
        items = news.len(),
        "Parsed feed document"
    );
    news
}

fn parse_item(channel_title: &str, item: &str) -> NewsItem {
    NewsItem {
        channel_title: channel_title.to_string(),
        title: field(item, TITLE),
        link: field(item, LINK),
        pub_date: field(item, PUB_DATE),
    }
}

/// Raw text of a tag inside an item, replaced by its CDATA payload if it has one.
fn field(item: &str, (open, close): (&str, &str)) -> String {
    let raw = extract(item, open, close).text;
    let cdata = extract(raw, CDATA.0, CDATA.1);
    if cdata.has_text() {
        cdata.text.to_string()
    } else {
        raw.to_string()
    }
}
