//! Scroll-position tracking for the horizontally scrolling strip
//!
//! The tracker never owns the scroll offset. It projects the container's
//! reported metrics into boundary flags and an active item index, and turns
//! navigation into scroll requests for the rendering layer. A request does
//! not move `active_index`; that only changes when the resulting scroll
//! notification comes back through [`ScrollTracker::on_scroll`].

use crate::config::StripLayout;
use crate::types::Direction;

/// Raw measurements read from the scroll container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub scroll_left: f32,
    pub scroll_width: f32,
    pub client_width: f32,
}

impl ScrollMetrics {
    pub fn max_scroll(&self) -> f32 {
        (self.scroll_width - self.client_width).max(0.0)
    }
}

/// Derived view of the container, recomputed on every notification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollViewState {
    pub scroll_offset: f32,
    pub can_scroll_left: bool,
    pub can_scroll_right: bool,
    pub active_index: usize,
}

impl Default for ScrollViewState {
    fn default() -> Self {
        // Before the first notification the strip sits at its left edge.
        Self {
            scroll_offset: 0.0,
            can_scroll_left: false,
            can_scroll_right: true,
            active_index: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Smooth,
    Instant,
}

/// Outbound request to move the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub left: f32,
    pub behavior: ScrollBehavior,
}

#[derive(Debug, Clone)]
pub struct ScrollTracker {
    layout: StripLayout,
    total_items: usize,
    metrics: Option<ScrollMetrics>,
    state: ScrollViewState,
}

impl ScrollTracker {
    pub fn new(layout: StripLayout, total_items: usize) -> Self {
        Self {
            layout,
            total_items,
            metrics: None,
            state: ScrollViewState::default(),
        }
    }

    pub fn layout(&self) -> &StripLayout {
        &self.layout
    }

    pub fn state(&self) -> ScrollViewState {
        self.state
    }

    pub fn last_metrics(&self) -> Option<ScrollMetrics> {
        self.metrics
    }

    /// Recompute the view state from a scroll notification.
    pub fn on_scroll(
        &mut self,
        metrics: ScrollMetrics,
        viewport_width: f32,
    ) -> ScrollViewState {
        let threshold = self.layout.edge_threshold;
        let left = metrics.scroll_left;
        let stride = self.layout.stride_for(viewport_width).max(1.0);

        let last = self.total_items.saturating_sub(1);
        let raw = (left / stride).round();
        let active_index = if raw <= 0.0 {
            0
        } else {
            (raw as usize).min(last)
        };

        self.state = ScrollViewState {
            scroll_offset: left,
            can_scroll_left: left > threshold,
            can_scroll_right: left
                < metrics.scroll_width - metrics.client_width - threshold,
            active_index,
        };
        self.metrics = Some(metrics);

        log::trace!(
            "strip scrolled to {left:.1}px \
             (active={active_index}, left={}, right={})",
            self.state.can_scroll_left,
            self.state.can_scroll_right
        );
        self.state
    }

    /// Request the container to bring item `index` to its left edge.
    pub fn scroll_to_index(
        &self,
        index: usize,
        viewport_width: f32,
    ) -> ScrollRequest {
        let index = index.min(self.total_items.saturating_sub(1));
        let stride = self.layout.stride_for(viewport_width);
        let mut left = index as f32 * stride;
        if let Some(metrics) = self.metrics {
            left = left.min(metrics.max_scroll());
        }
        ScrollRequest {
            left,
            behavior: ScrollBehavior::Smooth,
        }
    }

    /// Arrow-button navigation: one stride from the current offset. `None`
    /// when the boundary disables that direction.
    pub fn scroll_by(
        &self,
        direction: Direction,
        viewport_width: f32,
    ) -> Option<ScrollRequest> {
        let stride = self.layout.stride_for(viewport_width);
        let current = self.state.scroll_offset;
        let target = match direction {
            Direction::Forward if self.state.can_scroll_right => {
                current + stride
            }
            Direction::Backward if self.state.can_scroll_left => {
                current - stride
            }
            _ => return None,
        };
        let max = self
            .metrics
            .map(|m| m.max_scroll())
            .unwrap_or(f32::INFINITY);
        Some(ScrollRequest {
            left: target.clamp(0.0, max),
            behavior: ScrollBehavior::Smooth,
        })
    }
}
