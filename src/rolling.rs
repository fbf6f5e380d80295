use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell as StateCell;
use core::fmt;

use crate::edge::EdgeLoader;
use crate::extent::ExtentController;
use crate::store::PlaceholderStore;
use crate::window::{Pass, WindowValidator};
use crate::{
    Align, Cell, CellFrame, Edge, EdgeState, EdgeStates, IndexRange, LoadTicket, Rect,
    RecyclePool, RollingOptions, ViewportState, WindowState, reflow,
};

/// A headless, bidirectionally growable virtual list.
///
/// The list keeps one placeholder (position, size, kind) per logical item and materializes
/// cells only around the viewport, recycling them through a per-kind pool. Items can be added
/// at either edge; cells added at the top get negative user indexes.
///
/// The engine is not synchronized and never blocks: every operation runs to completion on the
/// owning thread. The only deferred work is edge loading, which the host resolves later with
/// [`RollingList::complete_edge_load`]. Callbacks receive shared data only, so they cannot
/// mutate the list while a pass is running; queue such work and apply it afterwards.
pub struct RollingList<C: Cell> {
    options: RollingOptions<C>,
    pool: RecyclePool<C>,
    store: PlaceholderStore<C>,
    window: WindowValidator,
    extent: ExtentController,
    edges: EdgeLoader,

    notify_depth: StateCell<usize>,
    notify_pending: StateCell<bool>,
}

impl<C: Cell> RollingList<C> {
    pub fn new(options: RollingOptions<C>) -> Self {
        let viewport = options.initial_viewport.unwrap_or_default();
        rdebug!(
            viewport_main = viewport.main,
            hot_area_factor = options.hot_area_factor,
            warm_cell_count = options.warm_cell_count,
            "RollingList::new"
        );
        Self {
            options,
            pool: RecyclePool::new(),
            store: PlaceholderStore::new(),
            window: WindowValidator::default(),
            extent: ExtentController::new(viewport),
            edges: EdgeLoader::new(),
            notify_depth: StateCell::new(0),
            notify_pending: StateCell::new(false),
        }
    }

    pub fn options(&self) -> &RollingOptions<C> {
        &self.options
    }

    pub fn set_options(&mut self, options: RollingOptions<C>) {
        self.options = options;
        rtrace!(
            hot_area_factor = self.options.hot_area_factor,
            warm_cell_count = self.options.warm_cell_count,
            "RollingList::set_options"
        );
        self.revalidate();
    }

    /// Clones the current options, applies `f`, then delegates to `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut RollingOptions<C>)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    // Recycling.

    /// Registers the factory for `kind`.
    ///
    /// # Panics
    ///
    /// Panics if `kind` is already registered.
    pub fn register_kind(
        &mut self,
        kind: C::Kind,
        factory: impl Fn(C::Kind) -> C + Send + Sync + 'static,
    ) {
        self.pool.register(kind, factory);
    }

    /// Eagerly creates `n` cells of `kind`.
    ///
    /// # Panics
    ///
    /// Panics if `kind` was never registered.
    pub fn preallocate(&mut self, kind: C::Kind, n: usize) {
        self.pool.preallocate(kind, n);
    }

    pub fn pool(&self) -> &RecyclePool<C> {
        &self.pool
    }

    pub fn store(&self) -> &PlaceholderStore<C> {
        &self.store
    }

    // Viewport.

    pub fn viewport(&self) -> Rect {
        self.extent.viewport()
    }

    pub fn set_viewport(&mut self, rect: Rect) {
        if self.extent.set_viewport(rect) {
            rtrace!(main = rect.main, cross = rect.cross, "set_viewport");
            self.revalidate();
        }
    }

    pub fn scroll_offset(&self) -> i64 {
        self.extent.scroll_offset()
    }

    /// Moves the viewport. The offset is not clamped, so hosts can report overscroll.
    pub fn set_scroll_offset(&mut self, offset: i64) {
        if self.extent.set_scroll_offset(offset) {
            rtrace!(offset, "set_scroll_offset");
            self.revalidate();
        }
    }

    pub fn set_scroll_offset_clamped(&mut self, offset: i64) {
        let clamped = self.extent.clamp_scroll_offset(offset);
        self.set_scroll_offset(clamped);
    }

    /// Applies viewport geometry and offset together, validating once.
    pub fn set_viewport_and_scroll(&mut self, rect: Rect, offset: i64) {
        let resized = self.extent.set_viewport(rect);
        let moved = self.extent.set_scroll_offset(offset);
        if resized || moved {
            rtrace!(main = rect.main, offset, "set_viewport_and_scroll");
            self.revalidate();
        }
    }

    /// Size of the scrollable region: header, all placeholders and footer.
    pub fn total_extent(&self) -> i64 {
        self.extent.total_extent()
    }

    pub fn max_scroll_offset(&self) -> i64 {
        self.extent.max_scroll_offset()
    }

    /// Scroll coordinate of the content anchor; `scroll = position + container_origin`.
    pub fn container_origin(&self) -> i64 {
        self.extent.container_origin()
    }

    pub fn viewport_state(&self) -> ViewportState {
        ViewportState {
            rect: self.extent.viewport(),
            offset: self.extent.scroll_offset(),
            total_extent: self.extent.total_extent(),
        }
    }

    pub fn is_close_to_bottom(&self) -> bool {
        self.extent.distance_to_bottom() <= self.options.close_to_bottom_threshold as i64
    }

    /// Scrolls so the end of the content (footer included) is at the bottom of the viewport.
    pub fn scroll_to_bottom(&mut self) -> i64 {
        let offset = self.extent.max_scroll_offset();
        self.set_scroll_offset(offset);
        offset
    }

    pub fn scroll_to_top(&mut self) -> i64 {
        self.set_scroll_offset(0);
        0
    }

    // Header and footer.

    pub fn header_extent(&self) -> Option<u32> {
        Some(self.extent.header()).filter(|&h| h > 0)
    }

    pub fn footer_extent(&self) -> Option<u32> {
        Some(self.extent.footer()).filter(|&h| h > 0)
    }

    /// Sets (or removes) a header pinned above the first cell.
    pub fn set_header_extent(&mut self, extent: Option<u32>) {
        self.extent.set_header(extent.unwrap_or(0));
        self.revalidate();
    }

    /// Sets (or removes) a footer pinned below the last cell.
    pub fn set_footer_extent(&mut self, extent: Option<u32>) {
        self.extent.set_footer(extent.unwrap_or(0));
        self.revalidate();
    }

    /// Frame of the header in scroll coordinates (its `index` is meaningless).
    pub fn header_frame(&self) -> Option<CellFrame> {
        let size = self.header_extent()?;
        Some(CellFrame {
            index: self.store.index_offset() - 1,
            start: self.extent.to_scroll(self.store.content_top()) - size as i64,
            size,
        })
    }

    /// Frame of the footer in scroll coordinates (its `index` is meaningless).
    pub fn footer_frame(&self) -> Option<CellFrame> {
        let size = self.footer_extent()?;
        Some(CellFrame {
            index: self.end_index(),
            start: self.extent.to_scroll(self.store.content_bottom()),
            size,
        })
    }

    // Indexes.

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// User index of the first cell. Drops by `n` for every `n` cells added at the top.
    pub fn index_offset(&self) -> isize {
        self.store.index_offset()
    }

    /// One past the user index of the last cell.
    pub fn end_index(&self) -> isize {
        self.store.user_index(self.store.len())
    }

    fn store_index(&self, index: isize) -> usize {
        match self.store.store_index(index) {
            Some(i) => i,
            None => panic!(
                "RollingList: index {index} out of range ({}..{})",
                self.index_offset(),
                self.end_index()
            ),
        }
    }

    fn insertion_index(&self, index: isize) -> usize {
        let i = index - self.store.index_offset();
        assert!(
            i >= 0 && i as usize <= self.store.len(),
            "RollingList: insertion index {index} out of range ({}..={})",
            self.index_offset(),
            self.end_index()
        );
        i as usize
    }

    // Structural mutations.

    /// Adds `count` cells of `kind` at `edge`.
    ///
    /// Each new cell is populated once to measure it (unless `fixed_cell_extent` is set). Cells
    /// added at the top take the user indexes just below the current first index.
    ///
    /// # Panics
    ///
    /// Panics if `kind` was never registered.
    pub fn add_cells(&mut self, edge: Edge, kind: C::Kind, count: usize) {
        self.assert_registered(kind);
        if count == 0 {
            return;
        }
        rdebug!(edge = ?edge, kind = ?kind, count, "add_cells");
        match edge {
            Edge::Top => {
                let first = self.store.index_offset() - count as isize;
                let items = self.measure_many(kind, first, count);
                let total = self.store.insert_at_head(items);
                self.window.shift_for_insert(0, count);
                self.extent.added_space(Edge::Top, total);
            }
            Edge::Bottom => {
                let follow = self.options.auto_scroll_to_bottom && self.is_close_to_bottom();
                let first = self.end_index();
                let items = self.measure_many(kind, first, count);
                let total = self.store.insert_at_tail(items);
                self.extent.added_space(Edge::Bottom, total);
                if follow {
                    let bottom = self.extent.max_scroll_offset();
                    self.extent.set_scroll_offset(bottom);
                }
            }
        }
        self.revalidate();
    }

    /// Inserts `count` cells of `kind` before the cell at user index `index`, pushing the
    /// following cells down. `index == end_index()` appends.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside `index_offset()..=end_index()` or `kind` is unregistered.
    pub fn insert_cells(&mut self, index: isize, kind: C::Kind, count: usize) {
        self.assert_registered(kind);
        let at = self.insertion_index(index);
        if count == 0 {
            return;
        }
        rdebug!(index, kind = ?kind, count, "insert_cells");
        let items = self.measure_many(kind, index, count);
        let total = self.store.insert_at(at, items);
        self.window.shift_for_insert(at, count);
        self.extent.added_space(Edge::Bottom, total);
        self.revalidate();
    }

    /// Removes `count` cells starting at user index `index`. Materialized cells go back to the
    /// pool before their placeholders are dropped.
    ///
    /// # Panics
    ///
    /// Panics if the range is not fully inside the list.
    pub fn remove_cells(&mut self, index: isize, count: usize) {
        if count == 0 {
            return;
        }
        let at = self.store_index(index);
        rdebug!(index, count, "remove_cells");
        let removed = self.store.remove_range(at, count, &mut self.pool);
        self.window.shift_for_remove(at, count);
        self.extent.added_space(Edge::Bottom, -removed);
        self.revalidate();
    }

    /// Changes the kind of the cell at `index` and measures it again.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range or `kind` is unregistered.
    pub fn replace_cell(&mut self, index: isize, kind: C::Kind) {
        self.assert_registered(kind);
        let at = self.store_index(index);
        rdebug!(index, kind = ?kind, "replace_cell");
        if let Some(p) = self.store.get_mut(at) {
            if let Some(cell) = p.detach() {
                self.pool.enqueue(cell);
            }
            p.set_kind(kind);
        }
        let size = self.measure(kind, index);
        self.apply_resize(at, size);
        self.revalidate();
    }

    /// Populates the cell at `index` again and applies any size change.
    ///
    /// A materialized cell is repopulated in place; otherwise a pooled cell is populated just
    /// to measure it.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn reload_cell(&mut self, index: isize) {
        let at = self.store_index(index);
        rtrace!(index, "reload_cell");
        let size = self.remeasure(at);
        self.apply_resize(at, size);
        self.revalidate();
    }

    /// Populates every cell again and re-lays out the whole list.
    ///
    /// This is `O(n)` populate calls; prefer `reload_cell` for targeted updates.
    pub fn reload_all(&mut self) {
        rdebug!(len = self.store.len(), "reload_all");
        let sizes: Vec<u32> = (0..self.store.len()).map(|i| self.remeasure(i)).collect();
        let (top, bottom) = reflow::resize_all(&mut self.store, &sizes);
        self.extent.added_space(Edge::Top, top);
        self.extent.added_space(Edge::Bottom, bottom);
        self.revalidate();
    }

    /// Removes every cell, drops the pooled cells, resets the index offset, the viewport
    /// offset and both edges. Outstanding load tickets become stale.
    pub fn clear(&mut self) {
        rdebug!(len = self.store.len(), "clear");
        self.store.clear(&mut self.pool);
        self.pool.clear();
        self.window.reset();
        self.extent.reset();
        self.edges.reset_all();
        self.revalidate();
    }

    // Queries.

    /// User index of the cell under `point` (scroll coordinates).
    pub fn index_at_point(&self, point: i64) -> Option<isize> {
        let position = self.extent.to_content(point);
        self.store
            .index_covering(position)
            .map(|i| self.store.user_index(i))
    }

    /// The cell under `point`, paired with whether it is currently materialized.
    pub fn cell_at_point(&self, point: i64) -> Option<(isize, Option<&C>)> {
        let position = self.extent.to_content(point);
        let i = self.store.index_covering(position)?;
        let cell = self.store.get(i).and_then(|p| p.cell());
        Some((self.store.user_index(i), cell))
    }

    /// Routes a tap at `point` to the `on_item_tapped` callback. Returns the tapped index.
    pub fn tap(&self, point: i64) -> Option<isize> {
        let (index, cell) = self.cell_at_point(point)?;
        if let Some(cb) = &self.options.on_item_tapped {
            cb(cell, index);
        }
        Some(index)
    }

    /// Frame of the cell at user index `index`, in scroll coordinates.
    pub fn frame_of_cell(&self, index: isize) -> Option<CellFrame> {
        let i = self.store.store_index(index)?;
        self.frame_at(i)
    }

    pub fn cell(&self, index: isize) -> Option<&C> {
        let i = self.store.store_index(index)?;
        self.store.get(i)?.cell()
    }

    pub fn cell_mut(&mut self, index: isize) -> Option<&mut C> {
        let i = self.store.store_index(index)?;
        self.store.get_mut(i)?.cell_mut()
    }

    pub fn materialized_count(&self) -> usize {
        let warm = self.window.warm();
        (warm.start_index..warm.end_index)
            .filter(|&i| self.store.get(i).is_some_and(|p| p.is_materialized()))
            .count()
    }

    /// Calls `f` for every materialized cell, in order, with its frame.
    pub fn for_each_materialized(&self, mut f: impl FnMut(CellFrame, &C)) {
        let warm = self.window.warm();
        for i in warm.start_index..warm.end_index {
            let Some(p) = self.store.get(i) else {
                break;
            };
            if let Some(cell) = p.cell() {
                f(self.frame_of(i, p.position(), p.size()), cell);
            }
        }
    }

    /// Calls `f` with the frame of every cell in the hot window.
    pub fn for_each_hot_frame(&self, mut f: impl FnMut(CellFrame)) {
        let hot = self.window.hot();
        for i in hot.start_index..hot.end_index {
            if let Some(frame) = self.frame_at(i) {
                f(frame);
            }
        }
    }

    pub fn hot_range(&self) -> IndexRange {
        self.window.hot()
    }

    pub fn warm_range(&self) -> IndexRange {
        self.window.warm()
    }

    pub fn window_state(&self) -> WindowState {
        WindowState {
            hot: self.window.hot(),
            warm: self.window.warm(),
            index_offset: self.store.index_offset(),
        }
    }

    // Scrolling to cells.

    /// Scrolls to a cell (no animation). Returns the applied, clamped offset.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn scroll_to_index(&mut self, index: isize, align: Align) -> i64 {
        let offset = self.scroll_to_index_offset(index, align);
        self.set_scroll_offset(offset);
        offset
    }

    /// Computes the clamped offset that would bring a cell into view.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn scroll_to_index_offset(&self, index: isize, align: Align) -> i64 {
        let at = self.store_index(index);
        let Some(frame) = self.frame_at(at) else {
            return self.extent.scroll_offset();
        };
        let view = self.extent.viewport().main as i64;

        let target = match align {
            Align::Start => frame.start,
            Align::End => frame.end() - view,
            Align::Center => frame.start + frame.size as i64 / 2 - view / 2,
            Align::Auto => {
                let cur = self.extent.scroll_offset();
                if frame.start >= cur && frame.end() <= cur + view {
                    cur
                } else if frame.start < cur {
                    frame.start
                } else {
                    frame.end() - view
                }
            }
        };

        self.extent.clamp_scroll_offset(target)
    }

    // Edge loading.

    pub fn edge_state(&self, edge: Edge) -> EdgeState {
        self.edges.state(edge)
    }

    pub fn edge_states(&self) -> EdgeStates {
        EdgeStates {
            top: self.edges.state(Edge::Top),
            bottom: self.edges.state(Edge::Bottom),
        }
    }

    /// Resolves a load started by `on_edge_reached`.
    ///
    /// `has_more = false` marks the edge exhausted until [`Self::reset_edge`] or
    /// [`Self::clear`]. Returns `false` (and changes nothing) for stale tickets.
    pub fn complete_edge_load(&mut self, ticket: LoadTicket, has_more: bool) -> bool {
        if !self.edges.complete(ticket, has_more) {
            return false;
        }
        if has_more {
            self.check_edges();
        }
        self.notify();
        true
    }

    /// Makes an exhausted (or stuck loading) edge eligible for loading again.
    pub fn reset_edge(&mut self, edge: Edge) {
        rdebug!(edge = ?edge, "reset_edge");
        self.edges.reset(edge);
        self.check_edges();
        self.notify();
    }

    // Internals.

    fn assert_registered(&self, kind: C::Kind) {
        assert!(
            self.pool.is_registered(kind),
            "RollingList: kind {kind:?} is not registered"
        );
    }

    fn frame_of(&self, store_index: usize, position: i64, size: u32) -> CellFrame {
        CellFrame {
            index: self.store.user_index(store_index),
            start: self.extent.to_scroll(position),
            size,
        }
    }

    fn frame_at(&self, store_index: usize) -> Option<CellFrame> {
        let p = self.store.get(store_index)?;
        Some(self.frame_of(store_index, p.position(), p.size()))
    }

    /// Populates a scratch cell to learn the extent of a new item.
    fn measure(&mut self, kind: C::Kind, index: isize) -> u32 {
        if let Some(fixed) = self.options.fixed_cell_extent {
            return fixed;
        }
        let mut cell = self.pool.dequeue(kind);
        (self.options.populate)(&mut cell, index);
        let size = cell.extent();
        debug_assert!(
            cell.kind() == kind,
            "factory for {kind:?} produced a cell of kind {:?}",
            cell.kind()
        );
        self.pool.enqueue(cell);
        size
    }

    fn measure_many(
        &mut self,
        kind: C::Kind,
        first: isize,
        count: usize,
    ) -> Vec<(C::Kind, u32)> {
        (0..count)
            .map(|i| (kind, self.measure(kind, first + i as isize)))
            .collect()
    }

    /// Populates the placeholder at `store_index` again and returns its new extent.
    fn remeasure(&mut self, store_index: usize) -> u32 {
        let index = self.store.user_index(store_index);
        let populate = Arc::clone(&self.options.populate);
        let fixed = self.options.fixed_cell_extent;
        let Some(p) = self.store.get_mut(store_index) else {
            return 0;
        };
        let kind = p.kind();
        if let Some(cell) = p.cell_mut() {
            populate(cell, index);
            return fixed.unwrap_or_else(|| cell.extent());
        }
        self.measure(kind, index)
    }

    fn apply_resize(&mut self, store_index: usize, size: u32) {
        if let Some((edge, delta)) = reflow::resize(&mut self.store, store_index, size) {
            self.extent.added_space(edge, delta);
        }
    }

    /// Re-runs the window validator and edge checks, then notifies.
    fn revalidate(&mut self) {
        let (start, _) = self.extent.visible_span();
        let pass = Pass {
            start,
            extent: self.extent.viewport().main,
            hot_area_factor: self.options.hot_area_factor,
            warm_cell_count: self.options.warm_cell_count,
            fixed_extent: self.options.fixed_cell_extent.is_some(),
        };
        let populate = Arc::clone(&self.options.populate);
        let extent = &mut self.extent;
        self.window.validate(
            &mut self.store,
            &mut self.pool,
            &*populate,
            pass,
            |edge, delta| extent.added_space(edge, delta),
        );
        self.check_edges();
        self.notify();
    }

    fn check_edges(&mut self) {
        let view = self.extent.viewport().main;
        if view == 0 {
            return;
        }
        let threshold = (view as f32 * self.options.edge_load_factor) as i64;
        let (start, end) = self.extent.visible_span();
        let near = [
            (Edge::Top, start - self.store.content_top() < threshold),
            (Edge::Bottom, self.store.content_bottom() - end < threshold),
        ];
        for (edge, is_near) in near {
            if !is_near {
                continue;
            }
            let Some(ticket) = self.edges.begin(edge) else {
                continue;
            };
            match self.options.on_edge_reached.clone() {
                Some(cb) => cb(ticket),
                // Nobody to ask; stay idle so a callback installed later is still reached.
                None => self.edges.abandon(ticket),
            }
        }
    }
}

impl<C: Cell> fmt::Debug for RollingList<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RollingList")
            .field("options", &self.options)
            .field("store", &self.store)
            .field("pool", &self.pool)
            .field("window", &self.window)
            .field("extent", &self.extent)
            .field("edges", &self.edges)
            .finish_non_exhaustive()
    }
}
