use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use rand::Rng;
use std::io::{self, Write};

use crate::feed::NewsItem;
use crate::theme::ChannelColors;

/// Writes one entry as four lines: channel and date, title, link, blank.
///
/// The channel title is drawn in `color`, the entry title in bold and the
/// link underlined. With `use_color` off the same text is written plain.
pub fn render_item<W: Write>(
    out: &mut W,
    item: &NewsItem,
    color: Color,
    use_color: bool,
) -> io::Result<()> {
    let separator = if item.channel_title.is_empty() { "" } else { "\t" };
    let header = format!("{}{}{}", item.channel_title, separator, item.pub_date);

    if !use_color {
        return writeln!(out, "{}\n{}\n{}\n", header, item.title, item.link);
    }

    queue!(
        out,
        SetForegroundColor(color),
        Print(header),
        Print("\n"),
        SetAttribute(Attribute::Bold),
        Print(&item.title),
        Print("\n"),
        SetAttribute(Attribute::NormalIntensity),
        SetAttribute(Attribute::Underlined),
        Print(&item.link),
        Print("\n"),
        SetAttribute(Attribute::NoUnderline),
        ResetColor,
        Print("\n"),
    )
}

/// Writes every entry, coloring each channel consistently across calls.
pub fn render_news<W: Write, R: Rng>(
    out: &mut W,
    news: &[NewsItem],
    colors: &mut ChannelColors<R>,
    use_color: bool,
) -> io::Result<()> {
    for item in news {
        let color = colors.color_for(&item.channel_title);
        render_item(out, item, color, use_color)?;
    }
    out.flush()
}
