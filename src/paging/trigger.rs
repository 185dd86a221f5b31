//! Deciding when scrolling should load the next page.
//!
//! The check is level-triggered: every scroll or intersection event is
//! evaluated again. Only the cursor's state keeps one crossing from loading
//! several pages, since [`Cursor::request_next`] refuses while a fetch is in
//! flight.

use super::cursor::{Cursor, CursorState};
use super::{Identified, ListFilters};

/// Threshold used by long feeds (polls, community content).
pub const FEED_THRESHOLD_PX: u32 = 1000;
/// Threshold used by compact lists (chats, folders, pickers).
pub const COMPACT_THRESHOLD_PX: u32 = 200;

/// Scroll geometry of the list container, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollMetrics {
    pub scroll_top: u32,
    pub viewport_height: u32,
    pub content_height: u32,
}

impl ScrollMetrics {
    pub fn distance_to_bottom(&self) -> u32 {
        self.content_height
            .saturating_sub(self.scroll_top.saturating_add(self.viewport_height))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollEvent {
    /// The container scrolled
    Scrolled(ScrollMetrics),
    /// The sentinel after the last row changed visibility
    Sentinel { visible: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollTrigger {
    threshold_px: u32,
}

impl ScrollTrigger {
    pub fn new(threshold_px: u32) -> Self {
        Self { threshold_px }
    }

    pub fn feed() -> Self {
        Self::new(FEED_THRESHOLD_PX)
    }

    pub fn compact() -> Self {
        Self::new(COMPACT_THRESHOLD_PX)
    }

    pub fn threshold_px(&self) -> u32 {
        self.threshold_px
    }

    /// Whether the event puts the view near the end of its content.
    pub fn is_near_end(&self, event: &ScrollEvent) -> bool {
        match event {
            ScrollEvent::Scrolled(metrics) => metrics.distance_to_bottom() <= self.threshold_px,
            ScrollEvent::Sentinel { visible } => *visible,
        }
    }

    /// Whether the event should load the next page of `cursor`.
    pub fn should_load_more<F: ListFilters, T: Identified>(
        &self,
        event: &ScrollEvent,
        cursor: &Cursor<F, T>,
    ) -> bool {
        *cursor.state() == CursorState::Ready && self.is_near_end(event)
    }
}

impl Default for ScrollTrigger {
    fn default() -> Self {
        Self::feed()
    }
}
