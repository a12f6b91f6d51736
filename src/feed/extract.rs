/// Text found between a pair of literal tags, plus where the next scan resumes.
///
/// `next` is the byte offset just past the matched close tag, or `None` when
/// no close tag exists after the search start. A close tag can be found (and
/// `next` set) while `text` is still empty, e.g. when the tag lies beyond the
/// search window or the tags enclose nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extraction<'a> {
    pub text: &'a str,
    pub next: Option<usize>,
}

impl Extraction<'static> {
    const NOT_FOUND: Extraction<'static> = Extraction {
        text: "",
        next: None,
    };
}

impl Extraction<'_> {
    /// True when the tag pair enclosed non-empty text inside the window.
    ///
    /// A pair that encloses nothing, such as `<a></a>`, has no text even
    /// though its close tag was matched and `next` is set.
    pub fn has_text(&self) -> bool {
        !self.text.is_empty()
    }
}

/// Extracts the text between the first `open`/`close` pair in `document`.
///
/// Shorthand for [`extract_within`] over the whole document.
pub fn extract<'a>(document: &'a str, open: &str, close: &str) -> Extraction<'a> {
    extract_within(document, open, close, 0, document.len())
}

/// Extracts the text between the first `open`/`close` pair whose open tag
/// starts at or after `start` and whose close tag ends at or before `end`.
///
/// Offsets are bytes. A `start` inside a multi-byte char is moved forward to
/// the next char boundary; a `start` past the end finds nothing.
///
/// Matching is literal substring search; there is no notion of nesting,
/// attributes, or namespaces. Absence never fails: it shows up as empty
/// text and, when no close tag exists past the open tag, a `None` cursor.
///
/// The close tag is searched from the start of the matched open tag, so a
/// close tag spelled like the open tag matches the open tag itself and
/// encloses nothing.
///
/// # Examples
///
/// ```
/// use feedline::feed::extract;
///
/// let doc = "<a>hello</a>";
/// let found = extract(doc, "<a>", "</a>");
/// assert_eq!(found.text, "hello");
/// assert_eq!(found.next, Some(12));
/// ```
pub fn extract_within<'a>(
    document: &'a str,
    open: &str,
    close: &str,
    start: usize,
    end: usize,
) -> Extraction<'a> {
    // A start inside a multi-byte char resumes at the next char boundary.
    let Some(start) = (start..=document.len()).find(|&i| document.is_char_boundary(i)) else {
        return Extraction::NOT_FOUND;
    };
    let haystack = &document[start..];
    let Some(open_start) = haystack.find(open).map(|i| start + i) else {
        return Extraction::NOT_FOUND;
    };
    let Some(close_start) = document[open_start..].find(close).map(|i| open_start + i) else {
        return Extraction::NOT_FOUND;
    };

    let open_end = open_start + open.len();
    let close_end = close_start + close.len();

    let text = if close_start >= open_end && close_end <= end.min(document.len()) {
        &document[open_end..close_start]
    } else {
        ""
    };

    Extraction {
        text,
        next: Some(close_end),
    }
}
