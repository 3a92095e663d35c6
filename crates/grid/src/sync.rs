//! Cross-view viewport synchronization.
//!
//! The full grid and the minimap never hold a reference to each other. A
//! [`ViewportSync`] owns the key-value store that is the single source of truth
//! for the viewport; a view that changes the viewport publishes it (all three
//! keys, wholesale) and every subscriber is handed the store to re-read.

use foundation::CellIndex;
use foundation::time::Time;
use runtime::{Event, EventBus, Frame, Notifier, SubscriberId};
use store::{KeyValueStore, StoreError, StoredViewport};
use tracing::debug;

use crate::config::GridConfig;
use crate::interaction::{GridEvent, Interaction};
use crate::minimap::click_fraction;
use crate::picking::pick_cell;
use crate::render::CellLayout;
use crate::viewport::{Direction, Viewport};
use crate::world::ProjectWorld;

#[derive(Debug)]
pub struct ViewportSync<S> {
    store: S,
    notifier: Notifier<S>,
    frame: Frame,
    bus: EventBus,
}

impl<S: KeyValueStore> ViewportSync<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            notifier: Notifier::new(),
            frame: Frame::first(),
            bus: EventBus::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn read(&self) -> Result<StoredViewport, StoreError> {
        StoredViewport::load(&self.store)
    }

    /// Registers a view; the callback receives the store and must re-read it.
    pub fn subscribe(&mut self, callback: impl FnMut(&S) + 'static) -> SubscriberId {
        self.notifier.subscribe(callback)
    }

    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.notifier.unsubscribe(id)
    }

    /// Writes the viewport wholesale, then notifies every subscriber.
    ///
    /// Returns the number of subscribers notified. On a write error nobody is
    /// notified.
    pub fn publish(&mut self, viewport: &Viewport, now: Time) -> Result<usize, StoreError> {
        viewport.to_stored().save(&mut self.store)?;
        self.frame = self.frame.next(now);
        let message = format!(
            "start={} columns={} visible={}",
            viewport.start_index(),
            viewport.columns_per_row(),
            viewport.visible_count()
        );
        debug!(frame = self.frame.index, "{message}");
        self.bus.emit(self.frame, "viewport", message);
        Ok(self.notifier.notify(&self.store))
    }

    /// Re-notifies without writing, for changes made to the store by someone
    /// else (another tab, a host page script).
    pub fn signal(&mut self, now: Time) -> usize {
        self.frame = self.frame.next(now);
        self.bus.emit(self.frame, "storage", "external change");
        self.notifier.notify(&self.store)
    }

    pub fn events(&self) -> &[Event] {
        self.bus.events()
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.bus.drain()
    }
}

/// A view that displays the shared viewport from its own copy.
pub trait ViewportView {
    fn viewport(&self) -> &Viewport;
    fn viewport_mut(&mut self) -> &mut Viewport;

    /// Re-reads the shared store into the local copy. Returns `true` on change.
    fn refresh_from<K: KeyValueStore + ?Sized>(&mut self, store: &K) -> Result<bool, StoreError> {
        let stored = StoredViewport::load(store)?;
        Ok(self.viewport_mut().apply_stored(stored))
    }

    /// Applies a nudge locally and returns the viewport to publish.
    fn nudge(&mut self, direction: Direction, step: u32) -> Viewport {
        self.viewport_mut().nudge(direction, step);
        *self.viewport()
    }
}

/// Full-page grid: owns the visible cell count and per-view hover/selection.
#[derive(Debug, Clone)]
pub struct GridView {
    viewport: Viewport,
    interaction: Interaction,
    layout: CellLayout,
}

impl Default for GridView {
    fn default() -> Self {
        Self::new(&GridConfig::default())
    }
}

impl GridView {
    pub fn new(config: &GridConfig) -> Self {
        Self {
            viewport: Viewport::default(),
            interaction: Interaction::new(),
            layout: CellLayout::from_config(config),
        }
    }

    pub fn layout(&self) -> CellLayout {
        self.layout
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// Recomputes the visible window for a new window size. Returns the
    /// viewport to publish when it changed.
    pub fn resize_window(&mut self, window_w: f64, window_h: f64, config: &GridConfig) -> Option<Viewport> {
        let (w, h) = config.available_area(window_w, window_h);
        if self.viewport.resize(w, h, self.layout.footprint_px()) {
            Some(self.viewport)
        } else {
            None
        }
    }

    pub fn pointer_move(&mut self, world: &ProjectWorld, x_px: f64, y_px: f64) -> Vec<GridEvent> {
        let target = pick_cell(&self.viewport, self.layout, x_px, y_px);
        self.interaction.pointer_move(world, target)
    }

    pub fn pointer_leave(&mut self) -> Option<GridEvent> {
        self.interaction.pointer_leave()
    }

    pub fn click(&mut self, world: &ProjectWorld, x_px: f64, y_px: f64) -> Option<GridEvent> {
        let target = pick_cell(&self.viewport, self.layout, x_px, y_px);
        self.interaction.click(world, target)
    }

    pub fn close_selection(&mut self) -> Option<GridEvent> {
        self.interaction.close()
    }

    pub fn hovered(&self) -> Option<CellIndex> {
        self.interaction.hovered()
    }
}

impl ViewportView for GridView {
    fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }
}

/// Sidebar overview: click-to-jump and nudge controls.
#[derive(Debug, Default, Clone)]
pub struct MinimapView {
    viewport: Viewport,
}

impl MinimapView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Jumps to a panel-relative click and returns the viewport to publish.
    pub fn click(&mut self, x_px: f64, y_px: f64, panel_w_px: f64, panel_h_px: f64) -> Viewport {
        let (fx, fy) = click_fraction(x_px, y_px, panel_w_px, panel_h_px);
        self.viewport.jump_to_fraction(fx, fy);
        self.viewport
    }
}

impl ViewportView for MinimapView {
    fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use store::InMemoryKeyValueStore;

    #[test]
    fn publish_writes_all_keys_and_notifies() {
        let mut sync = ViewportSync::new(InMemoryKeyValueStore::new());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = Rc::clone(&seen);
        sync.subscribe(move |store: &InMemoryKeyValueStore| {
            s.borrow_mut().push(StoredViewport::load(store).unwrap());
        });

        let v = Viewport::new(500, 1_000, 50);
        assert_eq!(sync.publish(&v, Time(0.0)).unwrap(), 1);
        assert_eq!(*seen.borrow(), vec![v.to_stored()]);
        assert_eq!(sync.read().unwrap(), v.to_stored());
        assert_eq!(sync.events().len(), 1);
        assert_eq!(sync.events()[0].message, "start=500 columns=50 visible=1000");
    }

    #[test]
    fn signal_renotifies_without_writing() {
        let mut sync = ViewportSync::new(InMemoryKeyValueStore::new());
        let count = Rc::new(RefCell::new(0));
        let c = Rc::clone(&count);
        let id = sync.subscribe(move |_| *c.borrow_mut() += 1);
        assert_eq!(sync.signal(Time(1.0)), 1);
        assert!(sync.read().unwrap().is_empty());
        assert!(sync.unsubscribe(id));
        assert_eq!(sync.signal(Time(2.0)), 0);
        assert_eq!(*count.borrow(), 1);
        assert_eq!(sync.drain_events().len(), 2);
    }

    #[test]
    fn grid_resize_reports_changes_once() {
        let config = GridConfig::default();
        let mut grid = GridView::new(&config);
        let v = grid.resize_window(1280.0, 720.0, &config).unwrap();
        assert_eq!(v.columns_per_row(), 93);
        assert!(grid.resize_window(1280.0, 720.0, &config).is_none());
    }
}
