use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use rolling::{Cell, Edge, EdgeState, LoadTicket, Rect, RollingList, RollingOptions};
use tracing_subscriber::EnvFilter;

const WIDTH: u32 = 360;
const CHAR_WIDTH: u32 = 8;
const LINE_HEIGHT: u32 = 18;
const TEXT_INSETS: u32 = 2 * 9;
const MARGINS: u32 = 2 * 2;
const MIN_BUBBLE: u32 = 20;
const HISTORY_PAGES: usize = 3;
const PAGE: usize = 15;

const LINES: &[&str] = &[
    "you have to keep going",
    "the days run away like wild horses over the hills",
    "what matters most is how well you walk through the fire",
    "some people never go crazy, what truly horrible lives they must lead",
    "find what you love and let it kill you",
    "we are here to drink beer",
    "an intellectual says a simple thing in a hard way",
    "if you're going to try, go all the way",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Side {
    Left,
    Right,
}

#[derive(Debug)]
struct Bubble {
    side: Side,
    text: String,
    extent: u32,
}

impl Cell for Bubble {
    type Kind = Side;

    fn kind(&self) -> Side {
        self.side
    }

    fn extent(&self) -> u32 {
        self.extent
    }
}

impl Bubble {
    fn set_text(&mut self, text: String) {
        // Left bubbles leave a wide margin on the right and vice versa.
        let text_width = WIDTH.saturating_sub(100 + 10 + 30);
        let per_line = (text_width / CHAR_WIDTH).max(1) as usize;
        let lines = wrapped_lines(&text, per_line).max(1) as u32;
        self.extent = (lines * LINE_HEIGHT + TEXT_INSETS).max(MIN_BUBBLE) + MARGINS;
        self.text = text;
    }
}

fn wrapped_lines(text: &str, per_line: usize) -> usize {
    let mut lines = 0;
    let mut used = 0;
    for word in text.split_whitespace() {
        let len = word.chars().count();
        if used == 0 {
            lines += 1;
            used = len;
        } else if used + 1 + len <= per_line {
            used += 1 + len;
        } else {
            lines += 1;
            used = len;
        }
    }
    lines
}

/// Every third message comes from the other side.
fn side_for(index: isize) -> Side {
    if index.rem_euclid(3) == 0 {
        Side::Left
    } else {
        Side::Right
    }
}

fn add_messages(list: &mut RollingList<Bubble>, edge: Edge, count: usize) {
    // Messages are added one by one so each can pick its side.
    list.batch_update(|list| {
        for _ in 0..count {
            let next = match edge {
                Edge::Top => list.index_offset() - 1,
                Edge::Bottom => list.end_index(),
            };
            list.add_cells(edge, side_for(next), 1);
        }
    });
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let pending = Arc::new(Mutex::new(VecDeque::<LoadTicket>::new()));

    let options = RollingOptions::new(|bubble: &mut Bubble, index: isize| {
        let line = LINES[index.unsigned_abs() % LINES.len()];
        bubble.set_text(format!("{index}. {line}"));
    })
    .with_initial_viewport(Some(Rect {
        main: 480,
        cross: WIDTH,
    }))
    .with_auto_scroll_to_bottom(true)
    .with_on_edge_reached(Some({
        let pending = Arc::clone(&pending);
        move |ticket: LoadTicket| {
            // The list cannot be mutated from inside a pass; answer from the main loop.
            if let Ok(mut pending) = pending.lock() {
                pending.push_back(ticket);
            }
        }
    }))
    .with_on_item_tapped(Some(|bubble: Option<&Bubble>, index: isize| {
        let text = bubble.map_or("<not in memory>", |b| b.text.as_str());
        println!("tapped {index}: {text}");
    }));

    let mut list = RollingList::new(options);
    for side in [Side::Left, Side::Right] {
        list.register_kind(side, |side| Bubble {
            side,
            text: String::new(),
            extent: 0,
        });
        list.preallocate(side, 8);
    }
    list.set_header_extent(Some(44));
    list.set_footer_extent(Some(52));

    add_messages(&mut list, Edge::Bottom, 30);
    tracing::info!(
        total = list.total_extent(),
        offset = list.scroll_offset(),
        "initial conversation loaded"
    );

    let mut pages = 0usize;
    for step in 0..40 {
        // Read history: scroll up a little each frame.
        let offset = list.scroll_offset();
        list.set_scroll_offset_clamped(offset - 150);

        loop {
            let next = pending.lock().ok().and_then(|mut p| p.pop_front());
            let Some(ticket) = next else {
                break;
            };
            match ticket.edge() {
                Edge::Top => {
                    let has_more = pages < HISTORY_PAGES;
                    if has_more {
                        pages += 1;
                        add_messages(&mut list, Edge::Top, PAGE);
                    }
                    list.complete_edge_load(ticket, has_more);
                }
                Edge::Bottom => {
                    // Nothing newer on the server.
                    list.complete_edge_load(ticket, false);
                }
            }
        }

        let window = list.window_state();
        println!(
            "step={step:2} offset={:6} total={:6} first_index={:4} hot={:?} live={}",
            list.scroll_offset(),
            list.total_extent(),
            window.index_offset,
            window.hot,
            list.pool().live_count(),
        );

        if list.edge_state(Edge::Top) == EdgeState::Exhausted && list.scroll_offset() == 0 {
            break;
        }
    }

    list.tap(list.scroll_offset() + 100);

    // A new message arrives while reading history: no jump, since we are far from the bottom.
    add_messages(&mut list, Edge::Bottom, 1);
    println!("after incoming message: offset={}", list.scroll_offset());

    list.scroll_to_bottom();
    add_messages(&mut list, Edge::Bottom, 2);
    println!(
        "following the bottom: offset={} max={}",
        list.scroll_offset(),
        list.max_scroll_offset()
    );

    if let Some(header) = list.header_frame() {
        println!("header at {} ({}px)", header.start, header.size);
    }
}
