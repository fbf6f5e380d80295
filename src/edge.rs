use crate::{Edge, EdgeState};

/// Handle for one in-flight "load more" request.
///
/// Pass it back to `RollingList::complete_edge_load` once the request resolves. Tickets issued
/// before a reset of their edge are stale and their completion is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoadTicket {
    edge: Edge,
    generation: u64,
}

impl LoadTicket {
    pub fn edge(&self) -> Edge {
        self.edge
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Per-edge `Idle -> Loading -> Idle | Exhausted` state machine.
#[derive(Clone, Debug, Default)]
pub struct EdgeLoader {
    states: [EdgeState; 2],
    generations: [u64; 2],
}

impl EdgeLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, edge: Edge) -> EdgeState {
        self.states[edge.slot()]
    }

    /// Moves an idle edge to `Loading` and hands out a ticket. Any other state yields `None`.
    pub fn begin(&mut self, edge: Edge) -> Option<LoadTicket> {
        let slot = edge.slot();
        if self.states[slot] != EdgeState::Idle {
            return None;
        }
        self.states[slot] = EdgeState::Loading;
        rdebug!(edge = ?edge, generation = self.generations[slot], "edge load started");
        Some(LoadTicket {
            edge,
            generation: self.generations[slot],
        })
    }

    /// Resolves a load. Returns `false` when the ticket is stale or the edge is not loading.
    pub fn complete(&mut self, ticket: LoadTicket, has_more: bool) -> bool {
        let slot = ticket.edge.slot();
        if ticket.generation != self.generations[slot] {
            rwarn!(
                edge = ?ticket.edge,
                generation = ticket.generation,
                current = self.generations[slot],
                "ignoring stale edge load completion"
            );
            return false;
        }
        if self.states[slot] != EdgeState::Loading {
            rwarn!(edge = ?ticket.edge, state = ?self.states[slot], "edge is not loading");
            return false;
        }
        self.states[slot] = if has_more {
            EdgeState::Idle
        } else {
            EdgeState::Exhausted
        };
        rdebug!(edge = ?ticket.edge, has_more, "edge load finished");
        true
    }

    /// Returns a just-started edge to `Idle` when there was nobody to hand the ticket to.
    pub fn abandon(&mut self, ticket: LoadTicket) {
        let slot = ticket.edge.slot();
        if ticket.generation == self.generations[slot]
            && self.states[slot] == EdgeState::Loading
        {
            self.states[slot] = EdgeState::Idle;
        }
    }

    /// Returns an edge to `Idle` and invalidates its outstanding ticket, if any.
    pub fn reset(&mut self, edge: Edge) {
        let slot = edge.slot();
        self.states[slot] = EdgeState::Idle;
        self.generations[slot] = self.generations[slot].wrapping_add(1);
    }

    pub fn reset_all(&mut self) {
        for edge in Edge::BOTH {
            self.reset(edge);
        }
    }
}
