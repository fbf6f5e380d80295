use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::Cell;
use crate::key::KindMap;

/// Creates a fresh, unpopulated cell of the given kind.
pub type CellFactory<C> = Arc<dyn Fn(<C as Cell>::Kind) -> C + Send + Sync>;

struct Bucket<C: Cell> {
    factory: CellFactory<C>,
    stack: Vec<C>,
}

/// Per-kind stacks of detached cells, backed by a factory on miss.
///
/// The pool itself is unbounded: the window validator bounds how many cells are live at any
/// time, so everything handed back here is kept for reuse until [`RecyclePool::clear`].
pub struct RecyclePool<C: Cell> {
    buckets: KindMap<C::Kind, Bucket<C>>,
    live: usize,
}

impl<C: Cell> Default for RecyclePool<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Cell> RecyclePool<C> {
    pub fn new() -> Self {
        Self {
            buckets: KindMap::new(),
            live: 0,
        }
    }

    /// Associates a factory with `kind`.
    ///
    /// # Panics
    ///
    /// Panics if `kind` is already registered.
    pub fn register(
        &mut self,
        kind: C::Kind,
        factory: impl Fn(C::Kind) -> C + Send + Sync + 'static,
    ) {
        assert!(
            !self.buckets.contains_key(&kind),
            "RecyclePool: kind {kind:?} registered twice"
        );
        rdebug!(kind = ?kind, "RecyclePool::register");
        self.buckets.insert(
            kind,
            Bucket {
                factory: Arc::new(factory),
                stack: Vec::new(),
            },
        );
    }

    pub fn is_registered(&self, kind: C::Kind) -> bool {
        self.buckets.contains_key(&kind)
    }

    /// Eagerly creates `n` cells of `kind` so later materialization does not hit the factory.
    ///
    /// # Panics
    ///
    /// Panics if `kind` was never registered.
    pub fn preallocate(&mut self, kind: C::Kind, n: usize) {
        let bucket = self.bucket_mut(kind);
        bucket.stack.reserve(n);
        for _ in 0..n {
            let cell = (bucket.factory)(kind);
            bucket.stack.push(cell);
        }
        self.live += n;
    }

    /// Returns a detached cell to its kind's stack.
    ///
    /// Cells built outside the pool are accepted but are not counted by
    /// [`RecyclePool::live_count`].
    ///
    /// # Panics
    ///
    /// Panics if the cell's kind was never registered.
    pub fn enqueue(&mut self, cell: C) {
        let kind = cell.kind();
        self.bucket_mut(kind).stack.push(cell);
    }

    /// Pops a reusable cell, or creates a new one when the stack is empty.
    ///
    /// # Panics
    ///
    /// Panics if `kind` was never registered.
    pub fn dequeue(&mut self, kind: C::Kind) -> C {
        let bucket = self.bucket_mut(kind);
        if let Some(cell) = bucket.stack.pop() {
            return cell;
        }
        let cell = (bucket.factory)(kind);
        self.live += 1;
        cell
    }

    /// Drops every pooled cell. Factories stay registered.
    pub fn clear(&mut self) {
        let mut dropped = 0usize;
        for bucket in self.buckets.values_mut() {
            dropped += bucket.stack.len();
            bucket.stack.clear();
        }
        // Foreign cells were pooled without ever being counted as live.
        self.live = self.live.saturating_sub(dropped);
    }

    /// Number of cells waiting in all stacks.
    pub fn pooled_count(&self) -> usize {
        self.buckets.values().map(|b| b.stack.len()).sum()
    }

    pub fn pooled_count_of(&self, kind: C::Kind) -> usize {
        self.buckets.get(&kind).map_or(0, |b| b.stack.len())
    }

    /// Number of cells created by this pool's factories that still exist, pooled or handed out.
    pub fn live_count(&self) -> usize {
        self.live
    }

    fn bucket_mut(&mut self, kind: C::Kind) -> &mut Bucket<C> {
        match self.buckets.get_mut(&kind) {
            Some(bucket) => bucket,
            None => panic!("RecyclePool: kind {kind:?} is not registered"),
        }
    }
}

impl<C: Cell> fmt::Debug for RecyclePool<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecyclePool")
            .field("kinds", &self.buckets.len())
            .field("pooled", &self.pooled_count())
            .field("live", &self.live)
            .finish_non_exhaustive()
    }
}
