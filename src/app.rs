use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::config::Config;
use crate::feed::{build_client, fetch_all, parse_feed, FetchOptions, NewsItem};
use crate::storage::{AddOutcome, ChannelStore, RemoveOutcome};
use crate::theme::ChannelColors;
use crate::ui::render_news;

/// Everything one invocation of the reader needs: where the subscriptions
/// live and how to fetch and print them.
pub struct App {
    config: Config,
    store: ChannelStore,
    use_color: bool,
}

impl App {
    pub fn new(config: Config, store: ChannelStore, use_color: bool) -> Self {
        Self {
            config,
            store,
            use_color,
        }
    }

    pub fn store(&self) -> &ChannelStore {
        &self.store
    }

    /// Fetches and parses every subscription, in subscription order.
    ///
    /// Feeds that fail to download contribute no entries.
    pub async fn collect_news(&self) -> Result<Vec<NewsItem>> {
        let urls = self.store.read().context("Failed to read channel list")?;
        if urls.is_empty() {
            tracing::info!(path = %self.store.path().display(), "No channels subscribed");
            return Ok(Vec::new());
        }

        let client = build_client(&self.config.user_agent).context("Failed to build HTTP client")?;
        let options = FetchOptions::from(&self.config);
        let documents = fetch_all(&client, &urls, &options).await;

        let news: Vec<NewsItem> = documents
            .iter()
            .flat_map(|doc| {
                let items = parse_feed(&doc.body);
                if items.is_empty() && !doc.body.is_empty() {
                    tracing::warn!(feed = %doc.url, "Feed contained no items");
                }
                items
            })
            .collect();

        tracing::info!(feeds = urls.len(), items = news.len(), "Collected news");
        Ok(news)
    }

    /// Fetches every subscription and prints its entries to `out`.
    pub async fn show_news<W: Write>(&self, out: &mut W) -> Result<usize> {
        let news = self.collect_news().await?;
        let mut colors = ChannelColors::new();
        render_news(out, &news, &mut colors, self.use_color)
            .context("Failed to write news to terminal")?;
        Ok(news.len())
    }

    pub fn add_channel<W: Write>(&self, url: &str, out: &mut W) -> Result<AddOutcome> {
        let outcome = self.store.add(url)?;
        match outcome {
            AddOutcome::Added => writeln!(out, "added channel:\n\t{}", url.trim())?,
            AddOutcome::AlreadySubscribed => {
                writeln!(out, "you're already subscribed to that channel...")?
            }
        }
        Ok(outcome)
    }

    pub fn remove_channel<W: Write>(&self, url: &str, out: &mut W) -> Result<RemoveOutcome> {
        let outcome = self.store.remove(url)?;
        match outcome {
            RemoveOutcome::Removed => {
                writeln!(out, "you're no longer subscribed to\n\t{}", url.trim())?
            }
            RemoveOutcome::NotSubscribed => {
                writeln!(out, "you aren't subscribed to that channel...")?
            }
        }
        Ok(outcome)
    }

    pub fn list_channels<W: Write>(&self, out: &mut W) -> Result<()> {
        let channels = self.store.list()?;
        writeln!(out, "rss channels list:")?;
        for channel in channels {
            writeln!(out, "{}", channel)?;
        }
        Ok(())
    }

    /// Removes all subscriptions once the user answers `y`.
    ///
    /// With `assume_yes` the question is skipped. Returns whether the list
    /// was cleared.
    pub fn clear_channels<R: BufRead, W: Write>(
        &self,
        assume_yes: bool,
        input: &mut R,
        out: &mut W,
    ) -> Result<bool> {
        if !assume_yes {
            writeln!(out, "delete all current rss channels...\nare you sure (y/n)?")?;
            out.flush()?;

            let mut answer = String::new();
            input
                .read_line(&mut answer)
                .context("Failed to read confirmation")?;
            if answer.trim() != "y" {
                tracing::debug!(answer = %answer.trim(), "Clear not confirmed");
                return Ok(false);
            }
        }

        self.store.clear()?;
        writeln!(out, "all rss channels cleared...")?;
        Ok(true)
    }
}
