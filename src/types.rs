/// One end of the logical item sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    Top,
    Bottom,
}

impl Edge {
    pub const BOTH: [Self; 2] = [Self::Top, Self::Bottom];

    pub(crate) fn slot(self) -> usize {
        match self {
            Self::Top => 0,
            Self::Bottom => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    Start,
    Center,
    End,
    Auto,
}

/// Viewport size: `main` is the scroll axis, `cross` the other one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub main: u32,
    pub cross: u32,
}

/// A half-open range of store indexes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl IndexRange {
    pub const EMPTY: Self = Self {
        start_index: 0,
        end_index: 0,
    };

    pub fn new(start_index: usize, end_index: usize) -> Self {
        Self {
            start_index,
            end_index,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }

    pub fn contains_range(&self, other: &Self) -> bool {
        other.is_empty()
            || (other.start_index >= self.start_index && other.end_index <= self.end_index)
    }

    /// Adjusts the range for `count` indexes inserted at `at`.
    pub(crate) fn shift_for_insert(&mut self, at: usize, count: usize) {
        if self.start_index >= at {
            self.start_index += count;
        }
        if self.end_index > at {
            self.end_index += count;
        }
        if self.end_index < self.start_index {
            self.end_index = self.start_index;
        }
    }

    /// Adjusts the range for `count` indexes removed at `at`.
    pub(crate) fn shift_for_remove(&mut self, at: usize, count: usize) {
        let fix = |i: usize| {
            if i <= at {
                i
            } else if i >= at + count {
                i - count
            } else {
                at
            }
        };
        self.start_index = fix(self.start_index);
        self.end_index = fix(self.end_index);
    }
}

/// Position of a cell along the scroll axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellFrame {
    /// User-facing index (may be negative for cells added at the top).
    pub index: isize,
    /// Start offset in scroll coordinates (what the viewport scrolls over).
    pub start: i64,
    pub size: u32,
}

impl CellFrame {
    pub fn end(&self) -> i64 {
        self.start + self.size as i64
    }

    pub fn contains(&self, point: i64) -> bool {
        point >= self.start && point < self.end()
    }
}

/// Loading state of one edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EdgeState {
    #[default]
    Idle,
    Loading,
    Exhausted,
}
