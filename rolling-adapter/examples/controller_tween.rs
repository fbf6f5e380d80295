use rolling::{Align, Cell, Edge, Rect, RollingList, RollingOptions};
use rolling_adapter::{Controller, Easing, HeadlessViewport};

#[derive(Debug)]
struct Line {
    extent: u32,
}

impl Cell for Line {
    type Kind = ();

    fn kind(&self) -> Self::Kind {}

    fn extent(&self) -> u32 {
        self.extent
    }
}

fn main() {
    // Example: a controller driving tween scrolling against a headless scroll container.
    //
    // A host would:
    // - forward container scroll/resize events (on_scroll / on_resize)
    // - start a tween (e.g. in response to "jump to message")
    // - call tick(now_ms) in a frame loop and render the materialized cells
    let mut list = RollingList::new(RollingOptions::new(|line: &mut Line, index: isize| {
        line.extent = 16 + (index.rem_euclid(3) as u32) * 8;
    }));
    list.register_kind((), |_| Line { extent: 0 });

    let viewport = HeadlessViewport::new(Rect {
        main: 320,
        cross: 480,
    });
    let mut c = Controller::new(list, viewport);
    c.update(0, |l| l.add_cells(Edge::Bottom, (), 5_000));

    let target = c.start_tween_to_index(2_000, Align::Center, 0, 240, Easing::SmoothStep);
    println!("target_offset={target}");

    let mut now_ms = 0u64;
    while let Some(off) = c.tick(now_ms) {
        if now_ms.is_multiple_of(80) {
            println!("t={now_ms} off={off} hot={:?}", c.list().hot_range());
        }
        now_ms += 16;
    }

    println!(
        "done: off={} extent={} hot={:?}",
        c.viewport().offset,
        c.viewport().content_extent,
        c.list().hot_range()
    );
}
