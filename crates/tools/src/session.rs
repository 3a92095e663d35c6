//! Headless page: the same grid/minimap wiring the browser app uses, driven
//! by a scripted list of actions.

use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

use foundation::time::Time;
use grid::sync::{GridView, MinimapView, ViewportSync, ViewportView};
use grid::{Direction, ProjectWorld, Viewport};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use store::{InMemoryKeyValueStore, StoreError};
use tracing::{info, warn};

use crate::config::ToolConfig;

/// Fixed step between scripted UI events.
const TICK_S: f64 = 1.0 / 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Nudge(Direction),
    /// Minimap click at a normalized panel position.
    Jump { x: f64, y: f64 },
    /// New window size in pixels.
    Resize { w: f64, h: f64 },
}

impl FromStr for Action {
    type Err = ToolError;

    /// `up`, `down`, `left`, `right`, `jump:X,Y` or `resize:WxH`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(direction) = Direction::parse(s) {
            return Ok(Action::Nudge(direction));
        }
        let bad = || ToolError::Action(s.to_string());
        match s.trim().split_once(':') {
            Some(("jump", args)) => {
                let (x, y) = args.split_once(',').ok_or_else(bad)?;
                Ok(Action::Jump {
                    x: x.trim().parse().map_err(|_| bad())?,
                    y: y.trim().parse().map_err(|_| bad())?,
                })
            }
            Some(("resize", args)) => {
                let (w, h) = args.split_once('x').ok_or_else(bad)?;
                Ok(Action::Resize {
                    w: w.trim().parse().map_err(|_| bad())?,
                    h: h.trim().parse().map_err(|_| bad())?,
                })
            }
            _ => Err(bad()),
        }
    }
}

#[derive(Debug)]
pub enum ToolError {
    Action(String),
    Store(StoreError),
    Json(serde_json::Error),
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolError::Action(s) => write!(
                f,
                "unknown action {s:?} (expected up|down|left|right|jump:X,Y|resize:WxH)"
            ),
            ToolError::Store(e) => write!(f, "store: {e}"),
            ToolError::Json(e) => write!(f, "json: {e}"),
        }
    }
}

impl std::error::Error for ToolError {}

impl From<StoreError> for ToolError {
    fn from(e: StoreError) -> Self {
        ToolError::Store(e)
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(e: serde_json::Error) -> Self {
        ToolError::Json(e)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewportReport {
    pub start_index: u32,
    pub visible_count: u32,
    pub columns_per_row: u32,
    pub rows_per_viewport: u32,
    pub row: u32,
    pub col: u32,
}

impl From<&Viewport> for ViewportReport {
    fn from(v: &Viewport) -> Self {
        let coord = v.current_coord();
        Self {
            start_index: v.start_index(),
            visible_count: v.visible_count(),
            columns_per_row: v.columns_per_row(),
            rows_per_viewport: v.rows_per_viewport(),
            row: coord.row,
            col: coord.col,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventReport {
    pub frame: u64,
    pub kind: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub seed: u64,
    pub projects: usize,
    pub occupied_cells: usize,
    pub grid: ViewportReport,
    pub minimap: ViewportReport,
    pub events: Vec<EventReport>,
}

pub struct Session {
    config: ToolConfig,
    world: ProjectWorld,
    sync: ViewportSync<InMemoryKeyValueStore>,
    grid: Rc<RefCell<GridView>>,
    minimap: Rc<RefCell<MinimapView>>,
    now: Time,
}

impl Session {
    /// Generates the world and lays the grid out for the configured window.
    pub fn new(config: ToolConfig) -> Result<Self, ToolError> {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let world = ProjectWorld::generate(config.grid.project_count, &mut rng);
        info!(
            seed = config.seed,
            projects = world.len(),
            occupied = world.occupied_cells(),
            "world generated"
        );

        let grid = Rc::new(RefCell::new(GridView::new(&config.grid)));
        let minimap = Rc::new(RefCell::new(MinimapView::new()));
        let mut sync = ViewportSync::new(InMemoryKeyValueStore::new());

        let g = Rc::clone(&grid);
        sync.subscribe(move |store| {
            if let Err(err) = g.borrow_mut().refresh_from(store) {
                warn!(%err, "grid refresh failed");
            }
        });
        let m = Rc::clone(&minimap);
        sync.subscribe(move |store| {
            if let Err(err) = m.borrow_mut().refresh_from(store) {
                warn!(%err, "minimap refresh failed");
            }
        });

        let mut session = Self {
            config,
            world,
            sync,
            grid,
            minimap,
            now: Time::ZERO,
        };
        session.apply(Action::Resize {
            w: session.config.window_w,
            h: session.config.window_h,
        })?;
        Ok(session)
    }

    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    pub fn world(&self) -> &ProjectWorld {
        &self.world
    }

    /// The viewport as the grid view currently sees it.
    pub fn viewport(&self) -> Viewport {
        *self.grid.borrow().viewport()
    }

    pub fn apply(&mut self, action: Action) -> Result<(), ToolError> {
        let next = match action {
            Action::Resize { w, h } => {
                let resized = self
                    .grid
                    .borrow_mut()
                    .resize_window(w, h, &self.config.grid);
                match resized {
                    Some(v) => v,
                    None => return Ok(()),
                }
            }
            Action::Nudge(direction) => self
                .minimap
                .borrow_mut()
                .nudge(direction, self.config.grid.nudge_step),
            Action::Jump { x, y } => {
                let mut minimap = self.minimap.borrow_mut();
                minimap.viewport_mut().jump_to_fraction(x, y);
                *minimap.viewport()
            }
        };
        self.now = self.now.after(TICK_S);
        self.sync.publish(&next, self.now)?;
        Ok(())
    }

    pub fn apply_all(&mut self, actions: &[Action]) -> Result<(), ToolError> {
        for action in actions {
            self.apply(*action)?;
        }
        Ok(())
    }

    pub fn report(&self) -> SimulationReport {
        SimulationReport {
            seed: self.config.seed,
            projects: self.world.len(),
            occupied_cells: self.world.occupied_cells(),
            grid: ViewportReport::from(&*self.grid.borrow().viewport()),
            minimap: ViewportReport::from(&*self.minimap.borrow().viewport()),
            events: self
                .sync
                .events()
                .iter()
                .map(|e| EventReport {
                    frame: e.frame_index,
                    kind: e.kind,
                    message: e.message.clone(),
                })
                .collect(),
        }
    }
}
