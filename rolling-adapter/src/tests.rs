use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use rolling::{Align, Cell, Edge, Rect, RollingList, RollingOptions};
use std::sync::Mutex;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
enum Row {
    Short,
    Tall,
}

#[derive(Debug)]
struct RowCell {
    row: Row,
    extent: u32,
}

impl Cell for RowCell {
    type Kind = Row;

    fn kind(&self) -> Row {
        self.row
    }

    fn extent(&self) -> u32 {
        self.extent
    }
}

fn rows(options: RollingOptions<RowCell>) -> RollingList<RowCell> {
    let mut list = RollingList::new(options);
    for row in [Row::Short, Row::Tall] {
        list.register_kind(row, |row| RowCell { row, extent: 0 });
    }
    list
}

fn options() -> RollingOptions<RowCell> {
    RollingOptions::new(|cell: &mut RowCell, _index: isize| {
        cell.extent = match cell.row {
            Row::Short => 10,
            Row::Tall => 40,
        };
    })
}

fn controller(main: u32) -> Controller<RowCell, HeadlessViewport> {
    let viewport = HeadlessViewport::new(Rect { main, cross: 100 });
    Controller::new(rows(options()), viewport)
}

#[test]
fn viewport_receives_extent_and_compensated_offset() {
    let mut c = controller(100);
    c.update(0, |l| l.add_cells(Edge::Bottom, Row::Tall, 10));
    assert_eq!(c.viewport().content_extent, 400);

    c.viewport_mut().scroll_by(200);
    c.on_scroll();
    assert_eq!(c.list().scroll_offset(), 200);
    let top = c.list().index_at_point(200);
    assert_eq!(top, Some(5));

    c.update(0, |l| l.add_cells(Edge::Top, Row::Short, 3));

    assert_eq!(c.viewport().content_extent, 430);
    assert_eq!(c.viewport().offset, 230);
    assert_eq!(c.list().index_at_point(c.viewport().offset), top);
}

#[test]
fn resize_keeps_offset_and_revalidates() {
    let mut c = controller(50);
    c.update(0, |l| l.add_cells(Edge::Bottom, Row::Short, 100));
    let hot = c.list().hot_range().len();

    c.viewport_mut().rect.main = 200;
    c.on_resize();

    assert_eq!(c.list().viewport().main, 200);
    assert!(c.list().hot_range().len() > hot);
}

#[test]
fn tween_drives_both_engine_and_viewport() {
    let mut c = controller(50);
    c.update(0, |l| l.add_cells(Edge::Bottom, Row::Short, 100));

    let to = c.start_tween_to_index(50, Align::Start, 0, 100, Easing::SmoothStep);
    assert_eq!(to, 500);

    let mut last = 0i64;
    for now_ms in [0u64, 10, 20, 40, 80, 100, 120] {
        if let Some(off) = c.tick(now_ms) {
            assert!(off >= last);
            assert_eq!(c.viewport().offset, off);
            last = off;
        }
    }
    assert!(!c.is_animating());
    assert_eq!(c.list().scroll_offset(), to);
    assert!(c.list().cell(50).is_some());
}

#[test]
fn user_scroll_cancels_tween() {
    let mut c = controller(50);
    c.update(0, |l| l.add_cells(Edge::Bottom, Row::Short, 100));
    c.start_tween_to_offset(800, 0, 100, Easing::Linear);
    c.tick(50);
    assert!(c.is_animating());

    c.viewport_mut().scroll_by(-10);
    c.on_scroll();

    assert!(!c.is_animating());
    assert_eq!(c.tick(60), None);
}

#[test]
fn tween_to_bottom_follows_appended_cells() {
    let mut c = controller(50);
    c.update(0, |l| l.add_cells(Edge::Bottom, Row::Short, 100));
    assert_eq!(c.start_tween_to_bottom(0, 100, Easing::Linear), 950);

    c.tick(50);
    c.update(50, |l| l.add_cells(Edge::Bottom, Row::Short, 10));
    assert!(c.is_animating());

    assert_eq!(c.tick(100), Some(1050));
    assert!(!c.is_animating());
    assert_eq!(c.viewport().offset, 1050);
    assert!(c.list().is_close_to_bottom());
}

#[test]
fn tween_shifts_with_prepended_content() {
    let mut c = controller(50);
    c.update(0, |l| l.add_cells(Edge::Bottom, Row::Short, 100));
    c.scroll_to_index(50, Align::Start);
    let to = c.start_tween_to_offset(700, 0, 100, Easing::Linear);
    assert_eq!(to, 700);

    c.update(10, |l| l.add_cells(Edge::Top, Row::Tall, 2));
    assert_eq!(c.list().scroll_offset(), 580);

    assert_eq!(c.tick(100), Some(780));
    assert_eq!(c.list().index_at_point(780), Some(70));
}

#[test]
fn scroll_to_bottom_is_immediate() {
    let mut c = controller(100);
    c.update(0, |l| l.add_cells(Edge::Bottom, Row::Tall, 5));
    assert_eq!(c.scroll_to_bottom(), 100);
    assert_eq!(c.viewport().offset, 100);
    assert!(!c.is_animating());
}

#[test]
fn tap_is_relative_to_visible_rect() {
    let taps = Arc::new(Mutex::new(Vec::new()));
    let list = rows(options().with_on_item_tapped(Some({
        let taps = Arc::clone(&taps);
        move |cell: Option<&RowCell>, index: isize| {
            taps.lock().unwrap().push((cell.is_some(), index));
        }
    })));
    let mut c = Controller::new(list, HeadlessViewport::new(Rect { main: 40, cross: 1 }));
    c.update(0, |l| l.add_cells(Edge::Bottom, Row::Short, 20));
    c.viewport_mut().scroll_by(100);
    c.on_scroll();

    assert_eq!(c.tap(5), Some(10));
    assert_eq!(c.tap(500), None);
    assert_eq!(*taps.lock().unwrap(), [(true, 10)]);
}

#[test]
fn tween_samples_endpoints() {
    let t = Tween::new(100, -20, 10, 0, Easing::EaseInOutCubic);
    assert_eq!(t.duration_ms, 1);
    assert_eq!(t.sample(0), 100);
    assert_eq!(t.sample(11), -20);
    assert!(t.is_done(11));

    let mut t = Tween::new(0, 100, 0, 100, Easing::Linear);
    assert_eq!(t.sample(50), 50);
    t.retarget(50, 200, 100);
    assert_eq!((t.from, t.to, t.start_ms), (50, 200, 50));
    t.shift(-50);
    assert_eq!((t.from, t.to), (0, 150));
}

#[test]
fn tween_keeps_precision_at_large_offsets() {
    let base = 1i64 << 40;
    let t = Tween::new(base, base + 1_000, 0, 100, Easing::Linear);
    assert_eq!(t.sample(50), base + 500);
    assert_eq!(t.sample(25), base + 250);
    assert_eq!(t.sample(100), base + 1_000);

    let t = Tween::new(base + 1_000, base, 0, 100, Easing::SmoothStep);
    assert_eq!(t.sample(50), base + 500);
    assert_eq!(Easing::EaseInOutCubic.sample(0.5), 0.5);
}
