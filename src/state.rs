use crate::{EdgeState, IndexRange, Rect};

/// A lightweight, serializable snapshot of the viewport geometry and scroll position.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportState {
    pub rect: Rect,
    pub offset: i64,
    pub total_extent: i64,
}

/// The materialization window after the most recent validation pass.
///
/// Ranges are store indexes; add `index_offset` to get user indexes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowState {
    pub hot: IndexRange,
    pub warm: IndexRange,
    pub index_offset: isize,
}

/// Loading state of both edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeStates {
    pub top: EdgeState,
    pub bottom: EdgeState,
}
