//! A headless, bidirectional virtual list engine.
//!
//! The engine keeps a lightweight placeholder (position, size, kind) for every logical item and
//! materializes real cells only in a "hot" window around the viewport, recycling them through
//! per-kind pools. Items can be added at either end, so a chat history can grow upwards while
//! new messages arrive at the bottom, without the visible content jumping.
//!
//! The pieces:
//! - [`RecyclePool`]: per-kind stacks of detached cells, factory-backed on miss.
//! - [`PlaceholderStore`]: ordered, contiguous placeholders with `O(log n)` position lookup and
//!   user indexes that go negative as cells are prepended.
//! - A window validator that keeps the hot range materialized and recycles everything beyond a
//!   wider warm range.
//! - [`ExtentController`]: total extent and scroll offset, compensated when content is added
//!   above the viewport.
//! - [`EdgeLoader`]: per-edge "load more" state machine with reentrancy protection.
//! - Height reflow: a cell that measures differently after populate shifts its neighbors.
//!
//! It is UI-agnostic. A host layer (see the `rolling-adapter` crate) is expected to provide:
//! - viewport size and scroll offset
//! - cell factories and a populate callback
//! - placement of materialized cells using [`RollingList::for_each_materialized`]
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod edge;
mod extent;
mod key;
mod options;
mod pool;
mod reflow;
mod rolling;
mod state;
mod store;
mod types;
mod window;


pub use edge::{EdgeLoader, LoadTicket};
pub use extent::ExtentController;
pub use key::{Cell, CellKind};
pub use options::{
    EdgeReachedCallback, ItemTappedCallback, OnChangeCallback, PopulateCallback, RollingOptions,
};
pub use pool::{CellFactory, RecyclePool};
pub use rolling::RollingList;
pub use state::{EdgeStates, ViewportState, WindowState};
pub use store::{ANCHOR, Placeholder, PlaceholderStore};
pub use types::{Align, CellFrame, Edge, EdgeState, IndexRange, Rect};
