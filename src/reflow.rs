use crate::store::{ANCHOR, PlaceholderStore};
use crate::{Cell, Edge};

/// Resizes one placeholder and shifts its neighbors to keep the store contiguous.
///
/// Placeholders that start above the anchor grow upwards: everything at or above them moves
/// by `-delta` and the change is reported for the top edge. Everything else grows downwards.
/// Returns the edge and signed amount the total extent changed by, or `None` for no change.
pub(crate) fn resize<C: Cell>(
    store: &mut PlaceholderStore<C>,
    index: usize,
    new_size: u32,
) -> Option<(Edge, i64)> {
    let (position, size) = {
        let p = store.get(index)?;
        (p.position(), p.size())
    };
    let delta = new_size as i64 - size as i64;
    if delta == 0 {
        return None;
    }
    rtrace!(index, size, new_size, "reflow::resize");
    if position < ANCHOR {
        store.shift_positions(0..index, -delta);
        store.set_size(index, position - delta, new_size);
        Some((Edge::Top, delta))
    } else {
        store.set_size(index, position, new_size);
        store.shift_positions(index + 1..store.len(), delta);
        Some((Edge::Bottom, delta))
    }
}

/// Resizes every placeholder at once.
///
/// The first placeholder at or below the anchor keeps its position; the ones above it grow
/// upwards and the rest downwards, as if each had been resized individually. Returns the
/// `(top, bottom)` growth of the content.
pub(crate) fn resize_all<C: Cell>(store: &mut PlaceholderStore<C>, sizes: &[u32]) -> (i64, i64) {
    debug_assert_eq!(sizes.len(), store.len(), "reflow::resize_all: size count mismatch");
    let old_top = store.content_top();
    let old_bottom = store.content_bottom();
    let pivot = store.index_at_position(ANCHOR);
    let pivot_position = store
        .get(pivot)
        .map_or(old_bottom, |p| p.position());

    let mut position = pivot_position;
    for i in (0..pivot).rev() {
        position -= sizes[i] as i64;
        store.set_size(i, position, sizes[i]);
    }
    let mut position = pivot_position;
    for (i, &size) in sizes.iter().enumerate().skip(pivot) {
        store.set_size(i, position, size);
        position += size as i64;
    }

    (
        old_top - store.content_top(),
        store.content_bottom() - old_bottom,
    )
}
