use crate::store::PlaceholderStore;
use crate::{Cell, Edge, IndexRange, RecyclePool};

/// Inputs for one validation pass.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Pass {
    /// Visible span start in content coordinates.
    pub start: i64,
    /// Visible span length.
    pub extent: u32,
    pub hot_area_factor: f32,
    pub warm_cell_count: usize,
    /// When set, populated cells are not measured.
    pub fixed_extent: bool,
}

/// Upper bound for the hot margin; any larger factor already covers every placeholder.
const MAX_HOT_MARGIN: i64 = i64::MAX / 4;

impl Pass {
    /// Visible span grown by `(hot_area_factor - 1) * extent / 2` on each side.
    pub(crate) fn hot_span(&self) -> (i64, i64) {
        let factor = self.hot_area_factor.max(1.0);
        let margin = ((factor - 1.0) * self.extent as f32 / 2.0) as i64;
        let margin = margin.min(MAX_HOT_MARGIN);
        let end = self.start.saturating_add(self.extent as i64);
        (
            self.start.saturating_sub(margin),
            end.saturating_add(margin),
        )
    }
}

/// Keeps the hot window materialized and everything outside the warm window recycled.
///
/// Invariant after [`WindowValidator::validate`]: `hot ⊆ warm ⊆ 0..len`, every placeholder in
/// `hot` holds a cell, and no placeholder outside `warm` does.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct WindowValidator {
    hot: IndexRange,
    warm: IndexRange,
}

impl WindowValidator {
    pub(crate) fn hot(&self) -> IndexRange {
        self.hot
    }

    pub(crate) fn warm(&self) -> IndexRange {
        self.warm
    }

    pub(crate) fn shift_for_insert(&mut self, at: usize, count: usize) {
        self.hot.shift_for_insert(at, count);
        self.warm.shift_for_insert(at, count);
    }

    pub(crate) fn shift_for_remove(&mut self, at: usize, count: usize) {
        self.hot.shift_for_remove(at, count);
        self.warm.shift_for_remove(at, count);
    }

    pub(crate) fn reset(&mut self) {
        self.hot = IndexRange::EMPTY;
        self.warm = IndexRange::EMPTY;
    }

    pub(crate) fn validate<C: Cell>(
        &mut self,
        store: &mut PlaceholderStore<C>,
        pool: &mut RecyclePool<C>,
        populate: &dyn Fn(&mut C, isize),
        pass: Pass,
        mut on_reflow: impl FnMut(Edge, i64),
    ) {
        let len = store.len();
        if len == 0 {
            self.reset();
            return;
        }

        let (hot_start, hot_end) = pass.hot_span();

        // The placeholder just before the insertion point may end exactly at `hot_start`; it
        // is kept so that boundary positions do not flicker.
        let top = store.index_at_position(hot_start).saturating_sub(1);
        let mut index = top;
        loop {
            if let Some(change) = materialize(store, pool, populate, index, pass.fixed_extent) {
                on_reflow(change.0, change.1);
            }
            let end = store.get(index).map_or(hot_end, |p| p.end());
            if end >= hot_end || index + 1 >= len {
                break;
            }
            index += 1;
        }
        let bottom = index;

        let half = pass.warm_cell_count / 2;
        let hot = IndexRange::new(top, bottom + 1);
        let warm = IndexRange::new(
            top.saturating_sub(half),
            bottom.saturating_add(1).saturating_add(half).min(len),
        );

        let prev = self.warm;
        for i in prev.start_index..prev.end_index.min(len) {
            if warm.contains(i) {
                continue;
            }
            if let Some(cell) = store.get_mut(i).and_then(|p| p.detach()) {
                rtrace!(index = i, "dematerialize");
                pool.enqueue(cell);
            }
        }

        self.hot = hot;
        self.warm = warm;
    }
}

/// Attaches a populated cell to the placeholder at `index` unless it already has one.
///
/// Returns the extent change when the populated cell measured differently from the
/// placeholder.
pub(crate) fn materialize<C: Cell>(
    store: &mut PlaceholderStore<C>,
    pool: &mut RecyclePool<C>,
    populate: &dyn Fn(&mut C, isize),
    index: usize,
    fixed_extent: bool,
) -> Option<(Edge, i64)> {
    let user_index = store.user_index(index);
    let placeholder = store.get_mut(index)?;
    if placeholder.is_materialized() {
        return None;
    }
    let mut cell = pool.dequeue(placeholder.kind());
    populate(&mut cell, user_index);
    let measured = cell.extent();
    rtrace!(index = user_index, measured, "materialize");
    placeholder.attach(cell);
    if fixed_extent {
        return None;
    }
    crate::reflow::resize(store, index, measured)
}
