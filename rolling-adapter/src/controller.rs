use rolling::{Align, Cell, RollingList};

use crate::{Easing, Tween, Viewport};

/// Keeps a [`RollingList`] and the scroll container showing it in sync.
///
/// The engine owns the authoritative offset: it compensates the offset when content is added
/// above the viewport and may follow the bottom. The controller reads the container after user
/// input and writes the content extent and offset back after every engine change.
///
/// Adapters drive it by calling:
/// - `on_scroll` / `on_resize` when the container reports a change
/// - `update` (or `list_mut` followed by `sync`) to mutate the list
/// - `tick(now_ms)` each frame while [`Controller::is_animating`]
#[derive(Debug)]
pub struct Controller<C: Cell, V: Viewport> {
    list: RollingList<C>,
    viewport: V,
    tween: Option<Tween>,
    follow_bottom: bool,
}

impl<C: Cell, V: Viewport> Controller<C, V> {
    pub fn new(list: RollingList<C>, viewport: V) -> Self {
        let mut c = Self {
            list,
            viewport,
            tween: None,
            follow_bottom: false,
        };
        c.pull();
        c
    }

    pub fn list(&self) -> &RollingList<C> {
        &self.list
    }

    /// Direct access to the engine. Call [`Controller::sync`] afterwards.
    pub fn list_mut(&mut self) -> &mut RollingList<C> {
        &mut self.list
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut V {
        &mut self.viewport
    }

    pub fn into_parts(self) -> (RollingList<C>, V) {
        (self.list, self.viewport)
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn cancel_animation(&mut self) {
        self.tween = None;
        self.follow_bottom = false;
    }

    /// Call this when the container reports a scroll offset change (e.g. user wheel/drag).
    ///
    /// This cancels any active tween.
    pub fn on_scroll(&mut self) {
        self.cancel_animation();
        self.pull();
    }

    /// Call this when the container changes size. An active tween keeps running.
    pub fn on_resize(&mut self) {
        self.pull();
    }

    /// Runs `f` against the engine, then pushes the result to the container.
    ///
    /// An active tween is shifted along with any offset compensation the engine applied, and a
    /// tween heading for the bottom is retargeted to the new bottom.
    pub fn update<R>(&mut self, now_ms: u64, f: impl FnOnce(&mut RollingList<C>) -> R) -> R {
        let before = self.list.scroll_offset();
        let out = f(&mut self.list);
        let delta = self.list.scroll_offset() - before;

        if let Some(tween) = &mut self.tween {
            tween.shift(delta);
            if self.follow_bottom {
                let bottom = self.list.max_scroll_offset();
                let elapsed = now_ms.saturating_sub(tween.start_ms);
                let remaining = tween.duration_ms.saturating_sub(elapsed);
                tween.retarget(now_ms, bottom, remaining);
            }
        }
        self.sync();
        out
    }

    /// Pushes the engine's content extent and offset to the container.
    pub fn sync(&mut self) {
        self.viewport.set_content_extent(self.list.total_extent());
        let offset = self.list.scroll_offset();
        if self.viewport.offset() != offset {
            rtrace!(offset, "Controller::sync");
            self.viewport.set_offset(offset);
        }
    }

    /// Advances the active tween, if any, and returns the applied offset.
    pub fn tick(&mut self, now_ms: u64) -> Option<i64> {
        let tween = self.tween?;

        let off = tween.sample(now_ms);
        self.list.set_scroll_offset_clamped(off);

        if tween.is_done(now_ms) {
            rtrace!(offset = self.list.scroll_offset(), "Controller::tick done");
            self.tween = None;
            self.follow_bottom = false;
        }

        self.sync();
        Some(self.list.scroll_offset())
    }

    /// Scrolls to a cell immediately (no animation). Returns the applied, clamped offset.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn scroll_to_index(&mut self, index: isize, align: Align) -> i64 {
        self.cancel_animation();
        let off = self.list.scroll_to_index(index, align);
        self.sync();
        off
    }

    /// Scrolls to the end of the content immediately. Returns the applied offset.
    pub fn scroll_to_bottom(&mut self) -> i64 {
        self.cancel_animation();
        let off = self.list.scroll_to_bottom();
        self.sync();
        off
    }

    /// Starts a tween to a cell. Returns the clamped target offset.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn start_tween_to_index(
        &mut self,
        index: isize,
        align: Align,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> i64 {
        let to = self.list.scroll_to_index_offset(index, align);
        self.start_tween_to_offset(to, now_ms, duration_ms, easing)
    }

    /// Starts a tween to an offset. Returns the clamped target offset.
    pub fn start_tween_to_offset(
        &mut self,
        offset: i64,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> i64 {
        let to = offset.clamp(0, self.list.max_scroll_offset());
        let from = self.list.scroll_offset();
        rdebug!(from, to, duration_ms, "Controller::start_tween");
        self.tween = Some(Tween::new(from, to, now_ms, duration_ms, easing));
        self.follow_bottom = false;
        to
    }

    /// Starts a tween to the end of the content that keeps following it while cells are added
    /// through [`Controller::update`].
    pub fn start_tween_to_bottom(&mut self, now_ms: u64, duration_ms: u64, easing: Easing) -> i64 {
        let bottom = self.list.max_scroll_offset();
        let to = self.start_tween_to_offset(bottom, now_ms, duration_ms, easing);
        self.follow_bottom = true;
        to
    }

    /// Routes a tap at `point` (relative to the visible rect) to the engine.
    pub fn tap(&self, point: i64) -> Option<isize> {
        self.list.tap(self.list.scroll_offset() + point)
    }

    /// Reads geometry and offset from the container into the engine, then writes back whatever
    /// the engine adjusted.
    fn pull(&mut self) {
        let rect = self.viewport.visible_rect();
        let offset = self.viewport.offset();
        self.list.set_viewport_and_scroll(rect, offset);
        self.sync();
    }
}
