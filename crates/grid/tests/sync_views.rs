use std::cell::RefCell;
use std::rc::Rc;

use foundation::time::Time;
use foundation::{WORLD_CELLS, WORLD_SIDE};
use grid::sync::{GridView, MinimapView, ViewportSync, ViewportView};
use grid::{Direction, GridConfig, Viewport};
use pretty_assertions::assert_eq;
use store::{InMemoryKeyValueStore, KeyValueStore, StoredViewport};

struct Page {
    sync: ViewportSync<InMemoryKeyValueStore>,
    grid: Rc<RefCell<GridView>>,
    minimap: Rc<RefCell<MinimapView>>,
    now: f64,
}

impl Page {
    fn new() -> Self {
        let mut sync = ViewportSync::new(InMemoryKeyValueStore::new());
        let grid = Rc::new(RefCell::new(GridView::new(&GridConfig::default())));
        let minimap = Rc::new(RefCell::new(MinimapView::new()));

        let g = Rc::clone(&grid);
        sync.subscribe(move |store| {
            g.borrow_mut().refresh_from(store).unwrap();
        });
        let m = Rc::clone(&minimap);
        sync.subscribe(move |store| {
            m.borrow_mut().refresh_from(store).unwrap();
        });

        Self {
            sync,
            grid,
            minimap,
            now: 0.0,
        }
    }

    fn publish(&mut self, v: Viewport) {
        self.now += 0.016;
        assert_eq!(self.sync.publish(&v, Time(self.now)).unwrap(), 2);
    }

    fn grid_viewport(&self) -> Viewport {
        *self.grid.borrow().viewport()
    }

    fn minimap_viewport(&self) -> Viewport {
        *self.minimap.borrow().viewport()
    }
}

#[test]
fn minimap_click_reaches_grid() {
    let mut page = Page::new();
    let config = GridConfig::default();

    let resized = page.grid.borrow_mut().resize_window(1280.0, 720.0, &config);
    page.publish(resized.unwrap());
    assert_eq!(page.minimap_viewport(), page.grid_viewport());

    let jumped = page.minimap.borrow_mut().click(100.0, 50.0, 200.0, 200.0);
    page.publish(jumped);

    let expected = (WORLD_SIDE as f64 * 0.25).floor() as u32 * WORLD_SIDE
        + (WORLD_SIDE as f64 * 0.5).floor() as u32;
    assert_eq!(page.grid_viewport().start_index(), expected);
    assert_eq!(page.grid_viewport(), page.minimap_viewport());
}

#[test]
fn observers_read_exactly_what_was_written() {
    let mut page = Page::new();
    let written = Viewport::new(12_345, 1_000, 50);
    page.publish(written);

    assert_eq!(page.grid_viewport(), written);
    assert_eq!(page.minimap_viewport(), written);
    assert_eq!(
        StoredViewport::load(page.sync.store()).unwrap(),
        StoredViewport {
            start_pixel: Some(12_345),
            pixels_per_row: Some(50),
            visible_pixels: Some(1_000),
        }
    );
}

#[test]
fn nudge_down_from_minimap_moves_grid_by_rows() {
    let mut page = Page::new();
    page.publish(Viewport::new(0, 1_000, 50));

    let nudged = page.minimap.borrow_mut().nudge(Direction::Down, 10);
    page.publish(nudged);

    assert_eq!(page.grid_viewport().start_index(), 500);
    assert_eq!(page.grid_viewport().rows_per_viewport(), 20);
}

#[test]
fn repeated_right_nudges_clamp_at_world_end() {
    let mut page = Page::new();
    page.publish(Viewport::new(99_000, 2_000, 200));
    assert_eq!(page.grid_viewport().start_index(), 98_000);

    for _ in 0..5 {
        let nudged = page.grid.borrow_mut().nudge(Direction::Right, 10);
        page.publish(nudged);
        assert_eq!(page.minimap_viewport().start_index(), WORLD_CELLS - 2_000);
    }
}

#[test]
fn external_store_change_is_picked_up_on_signal() {
    let mut page = Page::new();
    page.publish(Viewport::new(0, 1_000, 50));

    // Another writer updates the shared store directly.
    let mut external = page.sync.store().clone();
    external.set_item("startPixel", "4200").unwrap();
    let mut sync = ViewportSync::new(external);
    let m = Rc::clone(&page.minimap);
    sync.subscribe(move |store| {
        m.borrow_mut().refresh_from(store).unwrap();
    });
    assert_eq!(sync.signal(Time(1.0)), 1);
    assert_eq!(page.minimap_viewport().start_index(), 4_200);
    assert_eq!(page.grid_viewport().start_index(), 0);
}

#[test]
fn corrupt_values_are_ignored_per_key() {
    let mut store = InMemoryKeyValueStore::new();
    store.set_item("startPixel", "not-a-number").unwrap();
    store.set_item("pixelsPerRow", "40").unwrap();

    let mut grid = GridView::default();
    assert!(grid.refresh_from(&store).unwrap());
    assert_eq!(grid.viewport().columns_per_row(), 40);
    assert_eq!(grid.viewport().start_index(), 0);
}
