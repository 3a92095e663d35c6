use foundation::CellIndex;

use crate::project::Project;
use crate::world::ProjectWorld;

/// Pointer-driven notifications emitted by a grid view.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GridEvent {
    HoverEnter(CellIndex),
    HoverLeave(CellIndex),
    Selected(CellIndex),
    SelectionCleared,
}

/// Hover and selection state owned by a single view; never shared.
///
/// Hover only lands on occupied cells, matching what the info overlay can show.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Interaction {
    hovered: Option<CellIndex>,
    selected: Option<CellIndex>,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<CellIndex> {
        self.hovered
    }

    pub fn selected(&self) -> Option<CellIndex> {
        self.selected
    }

    pub fn hovered_project<'w>(&self, world: &'w ProjectWorld) -> Option<&'w Project> {
        self.hovered.and_then(|i| world.project_at(i))
    }

    pub fn selected_project<'w>(&self, world: &'w ProjectWorld) -> Option<&'w Project> {
        self.selected.and_then(|i| world.project_at(i))
    }

    /// Pointer moved over `target` (or over nothing pickable).
    pub fn pointer_move(&mut self, world: &ProjectWorld, target: Option<CellIndex>) -> Vec<GridEvent> {
        let next = target.filter(|i| world.project_at(*i).is_some());
        if next == self.hovered {
            return Vec::new();
        }
        let mut events = Vec::with_capacity(2);
        if let Some(prev) = self.hovered {
            events.push(GridEvent::HoverLeave(prev));
        }
        if let Some(cell) = next {
            events.push(GridEvent::HoverEnter(cell));
        }
        self.hovered = next;
        events
    }

    pub fn pointer_leave(&mut self) -> Option<GridEvent> {
        self.hovered.take().map(GridEvent::HoverLeave)
    }

    /// Selects the clicked cell if a project occupies it.
    pub fn click(&mut self, world: &ProjectWorld, target: Option<CellIndex>) -> Option<GridEvent> {
        let cell = target?;
        world.project_at(cell)?;
        self.selected = Some(cell);
        Some(GridEvent::Selected(cell))
    }

    /// Closes the detail panel.
    pub fn close(&mut self) -> Option<GridEvent> {
        self.selected.take().map(|_| GridEvent::SelectionCleared)
    }
}
