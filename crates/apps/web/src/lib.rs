use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

use foundation::time::Time;
use gloo_timers::future::TimeoutFuture;
use grid::minimap::MinimapModel;
use grid::sync::{GridView, MinimapView, ViewportSync, ViewportView};
use grid::{Direction, GridConfig, ProjectWorld, Viewport};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use site::{ProjectDirectory, Route, Submission, SubmissionForm, SubmitError};
use store::{InMemoryKeyValueStore, KeyValueStore, LocalStorageKeyValueStore, RecordStore, StoreError};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};

mod panes;
use panes::{Canvas, GridPane, MinimapPane};

mod title;

// Guard to prevent double-initialization of global state (relevant during hot reload).
static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// How often the submission flow re-checks its timers.
const SUBMISSION_POLL_MS: u32 = 50;

pub(crate) fn now() -> Time {
    Time::from_millis(js_sys::Date::now())
}

pub(crate) fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

pub(crate) fn log_error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(msg));
}

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Viewport persistence: `localStorage` when the browser allows it, memory otherwise.
#[derive(Debug)]
enum PageStore {
    Local(LocalStorageKeyValueStore),
    Memory(InMemoryKeyValueStore),
}

impl PageStore {
    fn new() -> Self {
        match LocalStorageKeyValueStore::new("") {
            Ok(s) => PageStore::Local(s),
            Err(err) => {
                log(&format!("viewport kept in memory: {err}"));
                PageStore::Memory(InMemoryKeyValueStore::new())
            }
        }
    }
}

impl KeyValueStore for PageStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            PageStore::Local(s) => s.get_item(key),
            PageStore::Memory(s) => s.get_item(key),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            PageStore::Local(s) => s.set_item(key, value),
            PageStore::Memory(s) => s.set_item(key, value),
        }
    }

    fn remove_item(&mut self, key: &str) -> Result<bool, StoreError> {
        match self {
            PageStore::Local(s) => s.remove_item(key),
            PageStore::Memory(s) => s.remove_item(key),
        }
    }
}

/// Everything one page load owns. The grid and minimap panes only meet
/// through `sync`.
struct PageState {
    config: GridConfig,
    minimap_model: Rc<MinimapModel>,
    sync: ViewportSync<PageStore>,
    grid: Rc<RefCell<GridPane>>,
    minimap: Rc<RefCell<MinimapPane>>,
    directory: ProjectDirectory,
    submission: Submission,
}

impl PageState {
    fn new() -> Self {
        let config = GridConfig::default();
        let seed = js_sys::Date::now() as u64;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let world = Rc::new(ProjectWorld::generate(config.project_count, &mut rng));
        let minimap_model = Rc::new(MinimapModel::build(&world, &config));

        let grid = Rc::new(RefCell::new(GridPane {
            view: GridView::new(&config),
            world: Rc::clone(&world),
            canvas: None,
        }));
        let minimap = Rc::new(RefCell::new(MinimapPane {
            view: MinimapView::new(),
            model: Rc::clone(&minimap_model),
            canvas: None,
        }));

        let mut sync = ViewportSync::new(PageStore::new());

        // Pick up a viewport left behind by an earlier visit.
        if let Err(err) = grid.borrow_mut().view.refresh_from(sync.store()) {
            log_error(&format!("viewport restore failed: {err}"));
        }
        if let Err(err) = minimap.borrow_mut().view.refresh_from(sync.store()) {
            log_error(&format!("viewport restore failed: {err}"));
        }

        let g = Rc::clone(&grid);
        sync.subscribe(move |store| {
            let mut pane = g.borrow_mut();
            match pane.view.refresh_from(store) {
                Ok(_) => pane.draw(),
                Err(err) => log_error(&format!("grid refresh failed: {err}")),
            }
        });
        let m = Rc::clone(&minimap);
        sync.subscribe(move |store| {
            let mut pane = m.borrow_mut();
            match pane.view.refresh_from(store) {
                Ok(_) => pane.draw(),
                Err(err) => log_error(&format!("minimap refresh failed: {err}")),
            }
        });

        log(&format!(
            "generated {} projects on {} cells (seed {seed})",
            world.len(),
            world.occupied_cells()
        ));

        Self {
            config,
            minimap_model,
            sync,
            grid,
            minimap,
            directory: ProjectDirectory::new(RecordStore::new(), seed),
            submission: Submission::new(),
        }
    }

    /// Writes the viewport to the shared store; both panes redraw from it.
    fn publish(&mut self, viewport: Viewport) -> Result<(), JsValue> {
        self.sync.publish(&viewport, now()).map_err(js_err)?;
        for event in self.sync.drain_events() {
            log(&format!("[{}] {}: {}", event.frame_index, event.kind, event.message));
        }
        Ok(())
    }
}

thread_local! {
    static PAGE: RefCell<Option<PageState>> = const { RefCell::new(None) };
}

/// Runs `f` against the page state, creating it on first use.
fn with_page<F, R>(f: F) -> Result<R, JsValue>
where
    F: FnOnce(&mut PageState) -> Result<R, JsValue>,
{
    PAGE.try_with(|cell| {
        let mut slot = cell.borrow_mut();
        let page = slot.get_or_insert_with(PageState::new);
        f(page)
    })
    .unwrap_or_else(|_| Err(JsValue::from_str("page state unavailable")))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Avoid double-initialization (can happen during hot-reload edge cases).
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    console_error_panic_hook::set_once();
    Ok(())
}

#[wasm_bindgen]
pub fn init_grid_canvas(canvas_id: &str) -> Result<(), JsValue> {
    let canvas = Canvas::from_element_id(canvas_id)?;
    with_page(|page| {
        let mut pane = page.grid.borrow_mut();
        pane.canvas = Some(canvas);
        pane.draw();
        Ok(())
    })
}

#[wasm_bindgen]
pub fn init_minimap_canvas(canvas_id: &str) -> Result<(), JsValue> {
    let canvas = Canvas::from_element_id(canvas_id)?;
    with_page(|page| {
        let mut pane = page.minimap.borrow_mut();
        pane.canvas = Some(canvas);
        pane.draw();
        Ok(())
    })
}

/// Call on load and on every window `resize`.
#[wasm_bindgen]
pub fn set_window_size(width: f64, height: f64) -> Result<(), JsValue> {
    with_page(|page| {
        let config = page.config;
        let resized = page
            .grid
            .borrow_mut()
            .view
            .resize_window(width, height, &config);
        match resized {
            Some(viewport) => page.publish(viewport),
            None => Ok(()),
        }
    })
}

/// Pointer position relative to the grid canvas.
#[wasm_bindgen]
pub fn grid_pointer_move(x_px: f64, y_px: f64) -> Result<(), JsValue> {
    with_page(|page| {
        let mut guard = page.grid.borrow_mut();
        let pane = &mut *guard;
        if !pane.view.pointer_move(&pane.world, x_px, y_px).is_empty() {
            pane.draw();
        }
        Ok(())
    })
}

#[wasm_bindgen]
pub fn grid_pointer_leave() -> Result<(), JsValue> {
    with_page(|page| {
        let mut pane = page.grid.borrow_mut();
        if pane.view.pointer_leave().is_some() {
            pane.draw();
        }
        Ok(())
    })
}

/// Returns the clicked project's card as JSON, if the cell is occupied.
#[wasm_bindgen]
pub fn grid_click(x_px: f64, y_px: f64) -> Result<Option<String>, JsValue> {
    with_page(|page| {
        let mut guard = page.grid.borrow_mut();
        let pane = &mut *guard;
        if pane.view.click(&pane.world, x_px, y_px).is_none() {
            return Ok(None);
        }
        match pane.view.interaction().selected_project(&pane.world) {
            Some(project) => serde_json::to_string(&project.card())
                .map(Some)
                .map_err(js_err),
            None => Ok(None),
        }
    })
}

#[wasm_bindgen]
pub fn close_project_card() -> Result<(), JsValue> {
    with_page(|page| {
        page.grid.borrow_mut().view.close_selection();
        Ok(())
    })
}

#[wasm_bindgen]
pub fn hovered_project_name() -> Result<Option<String>, JsValue> {
    with_page(|page| {
        let pane = page.grid.borrow();
        Ok(pane
            .view
            .interaction()
            .hovered_project(&pane.world)
            .map(|p| p.name.clone()))
    })
}

/// Click position relative to the minimap canvas.
#[wasm_bindgen]
pub fn minimap_click(x_px: f64, y_px: f64) -> Result<(), JsValue> {
    with_page(|page| {
        let jumped = {
            let mut pane = page.minimap.borrow_mut();
            let (w, h) = pane.panel_size();
            pane.view.click(x_px, y_px, w, h)
        };
        page.publish(jumped)
    })
}

/// `up`, `down`, `left` or `right`.
#[wasm_bindgen]
pub fn nudge(direction: &str) -> Result<(), JsValue> {
    let direction = Direction::parse(direction)
        .ok_or_else(|| JsValue::from_str(&format!("unknown direction: {direction}")))?;
    with_page(|page| {
        let step = page.config.nudge_step;
        let nudged = page.minimap.borrow_mut().view.nudge(direction, step);
        page.publish(nudged)
    })
}

/// Forward the window `storage` event: another tab changed the viewport.
#[wasm_bindgen]
pub fn storage_changed() -> Result<(), JsValue> {
    with_page(|page| {
        page.sync.signal(now());
        page.sync.drain_events();
        Ok(())
    })
}

#[wasm_bindgen]
pub fn project_count_label() -> Result<String, JsValue> {
    with_page(|page| Ok(page.minimap_model.count_label()))
}

#[wasm_bindgen]
pub fn start_title(element_id: &str, text: &str) -> Result<(), JsValue> {
    title::start(element_id, text)
}

#[wasm_bindgen]
pub fn stop_title(element_id: &str) -> bool {
    title::stop(element_id)
}

/// Resolves to the success message once the simulated request completes, then
/// navigates to the project list after the redirect delay. Rejects with the
/// validation or failure message.
#[wasm_bindgen]
pub fn submit_project(form_json: String) -> js_sys::Promise {
    future_to_promise(async move {
        let form: SubmissionForm = serde_json::from_str(&form_json).map_err(js_err)?;
        with_page(|page| page.submission.submit(&form, now()).map_err(js_err))?;

        let message = match poll_until(|| {
            with_page(|page| {
                page.submission.poll(now());
                Ok(page.submission.success_message())
            })
        })
        .await
        {
            Ok(message) => message,
            Err(err) => {
                let reason = format!("{err:?}");
                let _ = with_page(|page| {
                    page.submission.fail(reason.clone());
                    Ok(())
                });
                return Err(js_err(SubmitError::Failed(reason)));
            }
        };

        spawn_local(async {
            let redirect = poll_until(|| {
                with_page(|page| {
                    page.submission.poll(now());
                    Ok(page.submission.redirect().cloned())
                })
            })
            .await;
            match redirect {
                Ok(route) => {
                    let _ = with_page(|page| {
                        page.submission = Submission::new();
                        Ok(())
                    });
                    if let Err(err) = navigate(&route) {
                        log_error(&format!("redirect failed: {:?}", err));
                    }
                }
                Err(err) => log_error(&format!("redirect failed: {:?}", err)),
            }
        });

        Ok(JsValue::from_str(message))
    })
}

fn poll_until<T>(
    mut step: impl FnMut() -> Result<Option<T>, JsValue>,
) -> impl Future<Output = Result<T, JsValue>> {
    async move {
        loop {
            if let Some(value) = step()? {
                return Ok(value);
            }
            TimeoutFuture::new(SUBMISSION_POLL_MS).await;
        }
    }
}

fn navigate(route: &Route) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    window.location().set_href(&route.path())
}

/// `{ "name": .., "path": .. }` for a request path.
#[wasm_bindgen]
pub fn resolve_route(path: &str) -> Result<String, JsValue> {
    let route = Route::parse(path);
    let value = match &route {
        Route::ProjectDetail(id) => serde_json::json!({
            "name": route.name(),
            "path": route.path(),
            "id": id,
        }),
        _ => serde_json::json!({ "name": route.name(), "path": route.path() }),
    };
    serde_json::to_string(&value).map_err(js_err)
}

#[wasm_bindgen]
pub fn list_projects(limit: usize) -> Result<String, JsValue> {
    with_page(|page| {
        let records = page.directory.list(limit).map_err(js_err)?;
        serde_json::to_string(&records).map_err(js_err)
    })
}

/// `{ "project": .., "related": [..] }`, or `None` for an unknown id.
#[wasm_bindgen]
pub fn project_detail(id: u32) -> Result<Option<String>, JsValue> {
    with_page(|page| {
        let Some(project) = page.directory.get(id).map_err(js_err)? else {
            return Ok(None);
        };
        let related = page.directory.related(id, 3);
        let value = serde_json::json!({ "project": project, "related": related });
        serde_json::to_string(&value).map(Some).map_err(js_err)
    })
}

#[wasm_bindgen]
pub fn current_viewport() -> Result<String, JsValue> {
    with_page(|page| {
        let stored = page.sync.read().map_err(js_err)?;
        let value = serde_json::json!({
            "startPixel": stored.start_pixel,
            "pixelsPerRow": stored.pixels_per_row,
            "visiblePixels": stored.visible_pixels,
        });
        serde_json::to_string(&value).map_err(js_err)
    })
}
