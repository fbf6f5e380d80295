use alloc::sync::Arc;

use crate::rolling::RollingList;
use crate::{Cell, LoadTicket, Rect};

/// Fills a (possibly recycled) cell with the content for a user index.
///
/// The callback may change the cell's extent; the engine measures it afterwards.
pub type PopulateCallback<C> = Arc<dyn Fn(&mut C, isize) + Send + Sync>;

/// Fired when the viewport nears an edge that is idle.
///
/// The callback must not block. Resolve the request later through
/// [`RollingList::complete_edge_load`] with the same ticket.
pub type EdgeReachedCallback = Arc<dyn Fn(LoadTicket) + Send + Sync>;

/// Fired by [`RollingList::tap`] with the cell under the point (if materialized) and its user
/// index.
pub type ItemTappedCallback<C> = Arc<dyn Fn(Option<&C>, isize) + Send + Sync>;

/// Fired after any state change. Use [`RollingList::batch_update`] to coalesce.
pub type OnChangeCallback<C> = Arc<dyn Fn(&RollingList<C>) + Send + Sync>;

/// Configuration for [`RollingList`].
///
/// Cheap to clone: callbacks are stored in `Arc`s.
pub struct RollingOptions<C: Cell> {
    pub populate: PopulateCallback<C>,
    pub on_edge_reached: Option<EdgeReachedCallback>,
    pub on_item_tapped: Option<ItemTappedCallback<C>>,
    pub on_change: Option<OnChangeCallback<C>>,

    /// How much of the viewport is kept materialized, as a multiple of its extent.
    ///
    /// Values below 1 are treated as 1. The default of 2 keeps half a viewport above and below.
    pub hot_area_factor: f32,

    /// Extra cells around the hot window that may stay materialized (half on each side).
    pub warm_cell_count: usize,

    /// Distance from an edge, as a fraction of the viewport extent, that triggers loading.
    pub edge_load_factor: f32,

    /// Distance from the bottom that still counts as "close to bottom".
    pub close_to_bottom_threshold: u32,

    /// Follow the bottom when cells are added there while the viewport was close to it.
    pub auto_scroll_to_bottom: bool,

    /// When set, every cell takes this extent and populated cells are never measured.
    pub fixed_cell_extent: Option<u32>,

    pub initial_viewport: Option<Rect>,
}

impl<C: Cell> Clone for RollingOptions<C> {
    fn clone(&self) -> Self {
        Self {
            populate: Arc::clone(&self.populate),
            on_edge_reached: self.on_edge_reached.clone(),
            on_item_tapped: self.on_item_tapped.clone(),
            on_change: self.on_change.clone(),
            hot_area_factor: self.hot_area_factor,
            warm_cell_count: self.warm_cell_count,
            edge_load_factor: self.edge_load_factor,
            close_to_bottom_threshold: self.close_to_bottom_threshold,
            auto_scroll_to_bottom: self.auto_scroll_to_bottom,
            fixed_cell_extent: self.fixed_cell_extent,
            initial_viewport: self.initial_viewport,
        }
    }
}

impl<C: Cell> RollingOptions<C> {
    pub fn new(populate: impl Fn(&mut C, isize) + Send + Sync + 'static) -> Self {
        Self {
            populate: Arc::new(populate),
            on_edge_reached: None,
            on_item_tapped: None,
            on_change: None,
            hot_area_factor: 2.0,
            warm_cell_count: 10,
            edge_load_factor: 0.5,
            close_to_bottom_threshold: 20,
            auto_scroll_to_bottom: false,
            fixed_cell_extent: None,
            initial_viewport: None,
        }
    }

    pub fn with_populate(mut self, populate: impl Fn(&mut C, isize) + Send + Sync + 'static) -> Self {
        self.populate = Arc::new(populate);
        self
    }

    pub fn with_on_edge_reached(
        mut self,
        on_edge_reached: Option<impl Fn(LoadTicket) + Send + Sync + 'static>,
    ) -> Self {
        self.on_edge_reached = on_edge_reached.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_item_tapped(
        mut self,
        on_item_tapped: Option<impl Fn(Option<&C>, isize) + Send + Sync + 'static>,
    ) -> Self {
        self.on_item_tapped = on_item_tapped.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&RollingList<C>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_hot_area_factor(mut self, hot_area_factor: f32) -> Self {
        self.hot_area_factor = hot_area_factor;
        self
    }

    pub fn with_warm_cell_count(mut self, warm_cell_count: usize) -> Self {
        self.warm_cell_count = warm_cell_count;
        self
    }

    pub fn with_edge_load_factor(mut self, edge_load_factor: f32) -> Self {
        self.edge_load_factor = edge_load_factor;
        self
    }

    pub fn with_close_to_bottom_threshold(mut self, threshold: u32) -> Self {
        self.close_to_bottom_threshold = threshold;
        self
    }

    pub fn with_auto_scroll_to_bottom(mut self, auto_scroll_to_bottom: bool) -> Self {
        self.auto_scroll_to_bottom = auto_scroll_to_bottom;
        self
    }

    pub fn with_fixed_cell_extent(mut self, fixed_cell_extent: Option<u32>) -> Self {
        self.fixed_cell_extent = fixed_cell_extent;
        self
    }

    pub fn with_initial_viewport(mut self, initial_viewport: Option<Rect>) -> Self {
        self.initial_viewport = initial_viewport;
        self
    }
}

impl<C: Cell> core::fmt::Debug for RollingOptions<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RollingOptions")
            .field("hot_area_factor", &self.hot_area_factor)
            .field("warm_cell_count", &self.warm_cell_count)
            .field("edge_load_factor", &self.edge_load_factor)
            .field("close_to_bottom_threshold", &self.close_to_bottom_threshold)
            .field("auto_scroll_to_bottom", &self.auto_scroll_to_bottom)
            .field("fixed_cell_extent", &self.fixed_cell_extent)
            .field("initial_viewport", &self.initial_viewport)
            .field("on_edge_reached", &self.on_edge_reached.is_some())
            .field("on_item_tapped", &self.on_item_tapped.is_some())
            .finish_non_exhaustive()
    }
}
