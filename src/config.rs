//! Configuration to acknowledge developer preferences as well as set defaults.
//!
//! Specifically, we try to find a waymark.toml, and if present we load settings from there.
//! This provides the attention window, scroll-stop margins, scroll smoothness and log file.

use crate::document::ScrollMargin;
use crate::error::NavError;
use crate::observe::AttentionWindow;
use facet::Facet;
use std::fs;

#[derive(Facet, Clone)]
/// User preferences loaded from waymark.toml or falling back to defaults.
pub struct Config {
    #[facet(default = 10)]
    /// Attention window inset from the top of the viewport, in percent.
    pub attention_top: u8,
    #[facet(default = 60)]
    /// Attention window inset from the bottom of the viewport, in percent.
    pub attention_bottom: u8,
    #[facet(default = 3)]
    /// Rows left above a section when navigation scrolls to it.
    pub scroll_margin_top: u32,
    #[facet(default = 2)]
    /// Rows of a section kept visible below its heading on short viewports.
    pub scroll_margin_bottom: u32,
    #[facet(default = 4)]
    /// Divisor of the remaining distance per animation frame; larger is smoother.
    pub scroll_ease: u32,
    #[facet(default = String::new())]
    /// File to write logs to. Empty disables logging.
    pub log_file: String,
}

impl Config {
    #[must_use]
    /// Load configuration from waymark.toml if present.
    ///
    /// # Panics
    ///
    /// Panics if the default configuration cannot be parsed.
    pub fn load() -> Self {
        if let Ok(contents) = fs::read_to_string("waymark.toml") {
            if let Ok(config) = facet_toml::from_str::<Self>(&contents) {
                return config;
            }
        }
        facet_toml::from_str::<Self>("").unwrap()
    }

    /// The attention window these insets describe.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::InvalidAttentionWindow`] if the insets leave no band.
    pub fn attention_window(&self) -> Result<AttentionWindow, NavError> {
        AttentionWindow::new(self.attention_top, self.attention_bottom)
    }

    #[must_use]
    /// Scroll-stop margins given to every section.
    pub fn scroll_margin(&self) -> ScrollMargin {
        ScrollMargin {
            top: self.scroll_margin_top,
            bottom: self.scroll_margin_bottom,
        }
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
