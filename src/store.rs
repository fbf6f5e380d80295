use alloc::vec::Vec;
use core::fmt;
use core::ops::Range;

use crate::{Cell, RecyclePool};

/// Position of the coordinate origin. An empty store reports this as both its top and bottom,
/// so growth in either direction starts from the same point.
pub const ANCHOR: i64 = 0;

/// Lightweight record for one logical list item.
pub struct Placeholder<C: Cell> {
    position: i64,
    size: u32,
    kind: C::Kind,
    cell: Option<C>,
}

impl<C: Cell> Placeholder<C> {
    fn new(kind: C::Kind, position: i64, size: u32) -> Self {
        Self {
            position,
            size,
            kind,
            cell: None,
        }
    }

    pub fn position(&self) -> i64 {
        self.position
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn end(&self) -> i64 {
        self.position + self.size as i64
    }

    pub fn kind(&self) -> C::Kind {
        self.kind
    }

    pub fn cell(&self) -> Option<&C> {
        self.cell.as_ref()
    }

    pub fn cell_mut(&mut self) -> Option<&mut C> {
        self.cell.as_mut()
    }

    pub fn is_materialized(&self) -> bool {
        self.cell.is_some()
    }

    pub(crate) fn attach(&mut self, cell: C) {
        assert!(self.cell.is_none(), "Placeholder: cell attached twice");
        self.cell = Some(cell);
    }

    pub(crate) fn detach(&mut self) -> Option<C> {
        self.cell.take()
    }

    pub(crate) fn set_kind(&mut self, kind: C::Kind) {
        debug_assert!(self.cell.is_none(), "Placeholder: kind changed while materialized");
        self.kind = kind;
    }
}

impl<C: Cell> fmt::Debug for Placeholder<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Placeholder")
            .field("position", &self.position)
            .field("size", &self.size)
            .field("kind", &self.kind)
            .field("materialized", &self.cell.is_some())
            .finish()
    }
}

/// Ordered, contiguous sequence of placeholders.
///
/// Invariant: `items[i + 1].position == items[i].position + items[i].size`.
///
/// Store indexes are always `0..len`. User indexes are `store_index + index_offset`, where the
/// offset drops by `n` each time `n` items are added at the head.
pub struct PlaceholderStore<C: Cell> {
    items: Vec<Placeholder<C>>,
    index_offset: isize,
}

impl<C: Cell> Default for PlaceholderStore<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Cell> PlaceholderStore<C> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index_offset: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Placeholder<C>> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Placeholder<C>> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Placeholder<C>> {
        self.items.iter()
    }

    /// User index of store index 0. Never positive.
    pub fn index_offset(&self) -> isize {
        self.index_offset
    }

    pub fn user_index(&self, store_index: usize) -> isize {
        store_index as isize + self.index_offset
    }

    /// Maps a user index to a store index, if it addresses an existing placeholder.
    pub fn store_index(&self, user_index: isize) -> Option<usize> {
        let i = user_index.checked_sub(self.index_offset)?;
        usize::try_from(i).ok().filter(|&i| i < self.items.len())
    }

    pub fn content_top(&self) -> i64 {
        self.items.first().map_or(ANCHOR, |p| p.position)
    }

    pub fn content_bottom(&self) -> i64 {
        self.items.last().map_or(ANCHOR, |p| p.end())
    }

    /// Total size of all placeholders.
    pub fn content_extent(&self) -> i64 {
        self.content_bottom() - self.content_top()
    }

    /// Binary search over positions.
    ///
    /// Returns the index of the first placeholder whose position is `>= position` (the
    /// insertion point). The placeholder containing `position` is at the returned index when it
    /// starts exactly there, otherwise at the returned index minus one.
    pub fn index_at_position(&self, position: i64) -> usize {
        self.items.partition_point(|p| p.position < position)
    }

    /// Index of the placeholder covering `position`, if any.
    pub fn index_covering(&self, position: i64) -> Option<usize> {
        let i = self.items.partition_point(|p| p.position <= position);
        let i = i.checked_sub(1)?;
        (position < self.items[i].end()).then_some(i)
    }

    /// Inserts items above the current head, walking backwards from the content top.
    ///
    /// Items are given in top-to-bottom order. Returns the total inserted size.
    pub fn insert_at_head(&mut self, items: impl IntoIterator<Item = (C::Kind, u32)>) -> i64 {
        let mut fresh = Self::lay_out(items, 0);
        let total = fresh.last().map_or(0, Placeholder::end);
        let top = self.content_top() - total;
        for p in &mut fresh {
            p.position += top;
        }
        self.index_offset -= fresh.len() as isize;
        self.items.splice(0..0, fresh);
        total
    }

    /// Appends items after the current tail. Returns the total inserted size.
    pub fn insert_at_tail(&mut self, items: impl IntoIterator<Item = (C::Kind, u32)>) -> i64 {
        let bottom = self.content_bottom();
        let fresh = Self::lay_out(items, bottom);
        let total = fresh.last().map_or(0, |p| p.end() - bottom);
        self.items.extend(fresh);
        total
    }

    /// Inserts items before `store_index`, pushing everything after them down.
    ///
    /// Returns the total inserted size.
    ///
    /// # Panics
    ///
    /// Panics if `store_index > len`.
    pub fn insert_at(
        &mut self,
        store_index: usize,
        items: impl IntoIterator<Item = (C::Kind, u32)>,
    ) -> i64 {
        assert!(
            store_index <= self.items.len(),
            "PlaceholderStore: insert index {store_index} out of range (len={})",
            self.items.len()
        );
        let start = self
            .items
            .get(store_index)
            .map_or_else(|| self.content_bottom(), |p| p.position);
        let fresh = Self::lay_out(items, start);
        let count = fresh.len();
        let total = fresh.last().map_or(0, |p| p.end() - start);
        self.items.splice(store_index..store_index, fresh);
        self.shift_positions(store_index + count..self.items.len(), total);
        total
    }

    /// Removes `count` placeholders starting at `store_index`, returning their cells to
    /// `pool` first. Everything after the range moves up. Returns the total removed size.
    ///
    /// # Panics
    ///
    /// Panics if the range extends past the end of the store.
    pub fn remove_range(
        &mut self,
        store_index: usize,
        count: usize,
        pool: &mut RecyclePool<C>,
    ) -> i64 {
        let end = store_index
            .checked_add(count)
            .filter(|&end| end <= self.items.len());
        let Some(end) = end else {
            panic!(
                "PlaceholderStore: remove range {store_index}+{count} out of range (len={})",
                self.items.len()
            );
        };
        let mut removed = 0i64;
        for p in self.items.drain(store_index..end) {
            removed += p.size as i64;
            if let Some(cell) = p.cell {
                pool.enqueue(cell);
            }
        }
        self.shift_positions(store_index..self.items.len(), -removed);
        removed
    }

    /// Detaches every cell into `pool` and forgets all placeholders.
    pub fn clear(&mut self, pool: &mut RecyclePool<C>) {
        for p in self.items.drain(..) {
            if let Some(cell) = p.cell {
                pool.enqueue(cell);
            }
        }
        self.index_offset = 0;
    }

    pub(crate) fn shift_positions(&mut self, range: Range<usize>, delta: i64) {
        if delta == 0 {
            return;
        }
        for p in &mut self.items[range] {
            p.position += delta;
        }
    }

    /// Changes a placeholder's size in place without touching its neighbors.
    pub(crate) fn set_size(&mut self, store_index: usize, position: i64, size: u32) {
        let p = &mut self.items[store_index];
        p.position = position;
        p.size = size;
    }

    fn lay_out(
        items: impl IntoIterator<Item = (C::Kind, u32)>,
        start: i64,
    ) -> Vec<Placeholder<C>> {
        let mut position = start;
        items
            .into_iter()
            .map(|(kind, size)| {
                let p = Placeholder::new(kind, position, size);
                position += size as i64;
                p
            })
            .collect()
    }
}

impl<C: Cell> fmt::Debug for PlaceholderStore<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaceholderStore")
            .field("len", &self.items.len())
            .field("index_offset", &self.index_offset)
            .field("content_top", &self.content_top())
            .field("content_bottom", &self.content_bottom())
            .finish()
    }
}
