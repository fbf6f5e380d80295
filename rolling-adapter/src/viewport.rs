use rolling::Rect;

/// The scroll container a [`crate::Controller`] drives.
///
/// Offsets and extents are in scroll coordinates: `0` is the top of the scrollable region and
/// `content_extent` its size.
pub trait Viewport {
    /// Visible size along the scroll axis (`main`) and across it (`cross`).
    fn visible_rect(&self) -> Rect;

    fn offset(&self) -> i64;

    fn set_offset(&mut self, offset: i64);

    fn set_content_extent(&mut self, extent: i64);
}

/// A viewport with no UI behind it. Useful for tests, simulations and server-side layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeadlessViewport {
    pub rect: Rect,
    pub offset: i64,
    pub content_extent: i64,
}

impl HeadlessViewport {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            ..Self::default()
        }
    }

    /// Largest offset that still shows content, as a real scroll container would clamp it.
    pub fn max_offset(&self) -> i64 {
        (self.content_extent - self.rect.main as i64).max(0)
    }

    /// Simulates a user drag or wheel: moves by `delta`, clamped to the content.
    pub fn scroll_by(&mut self, delta: i64) {
        self.offset = (self.offset + delta).clamp(0, self.max_offset());
    }
}

impl Viewport for HeadlessViewport {
    fn visible_rect(&self) -> Rect {
        self.rect
    }

    fn offset(&self) -> i64 {
        self.offset
    }

    fn set_offset(&mut self, offset: i64) {
        self.offset = offset;
    }

    fn set_content_extent(&mut self, extent: i64) {
        self.content_extent = extent;
    }
}
