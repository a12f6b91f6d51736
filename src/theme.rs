//! Channel colors for terminal output.
//!
//! Every channel gets one of six bright colors the first time one of its
//! entries is printed, and keeps it for the rest of the run.

use crossterm::style::Color;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::HashMap;

/// Colors a channel title can be drawn in.
pub const PALETTE: [Color; 6] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
];

/// Channel title → color, first assignment wins.
#[derive(Debug)]
pub struct ChannelColors<R> {
    assigned: HashMap<String, Color>,
    rng: R,
}

impl ChannelColors<rand::rngs::ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::rng())
    }
}

impl Default for ChannelColors<rand::rngs::ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> ChannelColors<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            assigned: HashMap::new(),
            rng,
        }
    }

    /// Color for `channel_title`, picking a random one on first sight.
    pub fn color_for(&mut self, channel_title: &str) -> Color {
        if let Some(color) = self.assigned.get(channel_title) {
            return *color;
        }
        let color = PALETTE.choose(&mut self.rng).copied().unwrap_or(Color::Reset);
        self.assigned.insert(channel_title.to_string(), color);
        color
    }

    /// Number of channels that have been given a color.
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}
