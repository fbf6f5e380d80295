use crate::store::ANCHOR;
use crate::{Edge, Rect};

/// Tracks the scrollable extent and the viewport offset.
///
/// Placeholder positions live in content coordinates around [`ANCHOR`]. The viewport scrolls
/// over `0..total_extent`, and a content position `p` is shown at `p + container_origin`.
/// Prepending moves the container origin instead of the existing placeholders, and the scroll
/// offset is compensated so that visible content does not jump.
#[derive(Clone, Debug)]
pub struct ExtentController {
    viewport: Rect,
    scroll_offset: i64,
    container_origin: i64,
    total_extent: i64,
    header: u32,
    footer: u32,
}

impl ExtentController {
    pub fn new(viewport: Rect) -> Self {
        Self {
            viewport,
            scroll_offset: 0,
            container_origin: -ANCHOR,
            total_extent: 0,
            header: 0,
            footer: 0,
        }
    }

    /// Applies a structural change of `amount` at `edge`.
    ///
    /// At the bottom only the extent changes. At the top the container moves by `amount` and
    /// the scroll offset follows as far as the new extent allows, so already visible content
    /// stays put; a negative amount pulls the offset back, floored at 0.
    pub fn added_space(&mut self, edge: Edge, amount: i64) {
        if amount == 0 {
            return;
        }
        self.total_extent += amount;
        if edge == Edge::Top {
            self.container_origin += amount;
            if amount > 0 {
                let slack = (self.total_extent - self.viewport.main as i64).max(0);
                self.scroll_offset += amount.min(slack);
            } else {
                self.scroll_offset = (self.scroll_offset + amount).max(0);
            }
        }
        rtrace!(
            edge = ?edge,
            amount,
            total = self.total_extent,
            offset = self.scroll_offset,
            "ExtentController::added_space"
        );
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn set_viewport(&mut self, rect: Rect) -> bool {
        if self.viewport == rect {
            return false;
        }
        self.viewport = rect;
        true
    }

    pub fn scroll_offset(&self) -> i64 {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: i64) -> bool {
        if self.scroll_offset == offset {
            return false;
        }
        self.scroll_offset = offset;
        true
    }

    pub fn total_extent(&self) -> i64 {
        self.total_extent
    }

    pub fn container_origin(&self) -> i64 {
        self.container_origin
    }

    pub fn max_scroll_offset(&self) -> i64 {
        (self.total_extent - self.viewport.main as i64).max(0)
    }

    pub fn clamp_scroll_offset(&self, offset: i64) -> i64 {
        offset.clamp(0, self.max_scroll_offset())
    }

    pub fn distance_to_bottom(&self) -> i64 {
        self.max_scroll_offset() - self.scroll_offset
    }

    /// Converts a content position to scroll coordinates.
    pub fn to_scroll(&self, position: i64) -> i64 {
        position + self.container_origin
    }

    /// Converts a scroll coordinate to a content position.
    pub fn to_content(&self, point: i64) -> i64 {
        point - self.container_origin
    }

    /// Visible span in content coordinates as `(start, end)`.
    pub fn visible_span(&self) -> (i64, i64) {
        let start = self.to_content(self.scroll_offset);
        (start, start + self.viewport.main as i64)
    }

    pub fn header(&self) -> u32 {
        self.header
    }

    pub fn footer(&self) -> u32 {
        self.footer
    }

    pub fn set_header(&mut self, extent: u32) {
        let delta = extent as i64 - self.header as i64;
        self.header = extent;
        self.added_space(Edge::Top, delta);
    }

    pub fn set_footer(&mut self, extent: u32) {
        let delta = extent as i64 - self.footer as i64;
        self.footer = extent;
        self.added_space(Edge::Bottom, delta);
    }

    /// Forgets all content, keeping the viewport, header and footer.
    pub fn reset(&mut self) {
        self.scroll_offset = 0;
        self.container_origin = self.header as i64 - ANCHOR;
        self.total_extent = self.header as i64 + self.footer as i64;
    }
}
