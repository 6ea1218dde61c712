//! The visible slice of the document and its scroll animation.
//!
//! Programmatic scrolls set a target offset that `tick` approaches a fraction of the remaining
//! distance at a time, so the motion eases out. Manual scrolling cancels any animation.

use crate::navigator::{ScrollHost, ScrollRequest};

/// Scroll position, size, and in-flight smooth scroll of the document pane.
pub struct Viewport {
    offset: u32,
    height: u32,
    content_rows: u32,
    target: Option<u32>,
    ease: u32,
}

impl Viewport {
    #[must_use]
    /// Viewport at the top of a document `content_rows` tall.
    ///
    /// `ease` divides the remaining distance on every tick; larger is smoother.
    pub fn new(height: u32, content_rows: u32, ease: u32) -> Self {
        Self {
            offset: 0,
            height,
            content_rows,
            target: None,
            ease: ease.max(1),
        }
    }

    #[must_use]
    /// First visible row.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    #[must_use]
    /// Visible rows.
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    /// Offset an in-flight smooth scroll is heading for.
    pub fn target(&self) -> Option<u32> {
        self.target
    }

    #[must_use]
    /// Whether a smooth scroll is in flight.
    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    /// Updates the visible height, e.g. after a terminal resize.
    pub fn resize(&mut self, height: u32) {
        self.height = height;
    }

    /// Updates the document height and pulls the offset back inside it.
    pub fn set_content_rows(&mut self, rows: u32) {
        self.content_rows = rows;
        self.offset = self.offset.min(self.max_offset());
        self.target = self.target.map(|t| t.min(self.max_offset()));
    }

    /// Furthest offset: the last row may scroll up to the top of the pane.
    fn max_offset(&self) -> u32 {
        self.content_rows.saturating_sub(1)
    }

    /// Scrolls by `delta` rows immediately, cancelling any animation.
    pub fn scroll_by(&mut self, delta: i64) {
        self.target = None;
        let next = i64::from(self.offset).saturating_add(delta);
        let clamped = next.clamp(0, i64::from(self.max_offset()));
        self.offset = u32::try_from(clamped).unwrap_or(self.offset);
    }

    /// Scrolls by one page in the given direction.
    pub fn page(&mut self, down: bool) {
        let rows = i64::from(self.height.saturating_sub(1).max(1));
        self.scroll_by(if down { rows } else { -rows });
    }

    /// Advances the smooth scroll one step. Returns whether the offset moved.
    pub fn tick(&mut self) -> bool {
        let Some(target) = self.target else {
            return false;
        };
        let distance = target.abs_diff(self.offset);
        if distance == 0 {
            self.target = None;
            return false;
        }
        let step = (distance / self.ease).max(1);
        self.offset = if target > self.offset {
            self.offset + step
        } else {
            self.offset - step
        };
        if self.offset == target {
            self.target = None;
        }
        true
    }

    /// Runs the animation to completion.
    pub fn settle(&mut self) {
        while self.tick() {}
    }

    #[must_use]
    /// Where a start-aligned scroll to `request` comes to rest.
    ///
    /// The top margin is left above the node; on a viewport too short for both margins the
    /// bottom margin wins so that many rows of the node stay visible.
    pub fn rest_offset(&self, request: &ScrollRequest) -> u32 {
        let above = request.top.saturating_sub(request.margin.top);
        let keep_visible = request
            .top
            .saturating_add(request.margin.bottom)
            .saturating_sub(self.height);
        above.max(keep_visible).min(request.top).min(self.max_offset())
    }
}

impl ScrollHost for Viewport {
    fn scroll_into_view(&mut self, request: ScrollRequest) {
        let rest = self.rest_offset(&request);
        tracing::debug!(from = self.offset, to = rest, "smooth scroll");
        self.target = Some(rest);
    }
}

#[cfg(test)]
#[path = "tests/viewport.rs"]
mod tests;
