use foundation::{GridCoord, WORLD_CELLS, WORLD_SIDE};
use store::StoredViewport;
use tracing::debug;

/// Directional nudge issued by the grid or the minimap controls.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// The contiguous window of world space currently shown at full size.
///
/// Invariants maintained by every mutating operation:
/// - `columns_per_row >= 1`
/// - `start_index <= max(0, WORLD_CELLS - visible_count)`
///
/// [`Viewport::new`] takes its values as given so externally supplied state can
/// be represented; the next navigation or resize re-establishes the clamp.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Viewport {
    start_index: u32,
    visible_count: u32,
    columns_per_row: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            start_index: 0,
            visible_count: 2_000,
            columns_per_row: 200,
        }
    }
}

impl Viewport {
    pub fn new(start_index: u32, visible_count: u32, columns_per_row: u32) -> Self {
        Self {
            start_index,
            visible_count,
            columns_per_row: columns_per_row.max(1),
        }
    }

    pub fn start_index(&self) -> u32 {
        self.start_index
    }

    pub fn visible_count(&self) -> u32 {
        self.visible_count
    }

    pub fn columns_per_row(&self) -> u32 {
        self.columns_per_row
    }

    /// `ceil(visible_count / columns_per_row)`.
    pub fn rows_per_viewport(&self) -> u32 {
        self.visible_count.div_ceil(self.columns_per_row)
    }

    /// One past the last rendered index.
    pub fn end_index(&self) -> u32 {
        (self.start_index as u64 + self.visible_count as u64).min(WORLD_CELLS as u64) as u32
    }

    /// Position of `start_index` on the world square.
    pub fn current_coord(&self) -> GridCoord {
        GridCoord::from_linear(self.start_index)
    }

    /// Clamps a candidate start into `[0, max(0, WORLD_CELLS - visible_count)]`.
    ///
    /// Total for every input; when the window is larger than the world the
    /// upper bound floors at 0 instead of going negative.
    pub fn clamp_start(candidate: i64, visible_count: u32) -> u32 {
        let upper = (WORLD_CELLS as i64 - visible_count as i64).max(0);
        candidate.clamp(0, upper) as u32
    }

    /// World index addressed by a normalized `(x, y)` position on the minimap.
    ///
    /// Unclamped; fractions outside `0..1` address cells outside the world.
    pub fn jump_target(x_frac: f64, y_frac: f64) -> i64 {
        let side = WORLD_SIDE as i64;
        let row = floor_to_i64(y_frac * WORLD_SIDE as f64);
        let col = floor_to_i64(x_frac * WORLD_SIDE as f64);
        row.saturating_mul(side).saturating_add(col)
    }

    /// Recomputes how many cells fit into the available area.
    ///
    /// Returns `true` if anything changed. Calling it again with the same area is a no-op.
    pub fn resize(&mut self, available_w_px: f64, available_h_px: f64, footprint_px: f64) -> bool {
        let footprint = if footprint_px.is_finite() && footprint_px > 0.0 {
            footprint_px
        } else {
            1.0
        };
        let columns = fit_count(available_w_px, footprint);
        let rows = fit_count(available_h_px, footprint);
        let visible = (columns as u64 * rows as u64).min(u32::MAX as u64) as u32;

        let before = *self;
        self.columns_per_row = columns;
        self.visible_count = visible;
        self.start_index = Self::clamp_start(self.start_index as i64, visible);

        let changed = before != *self;
        if changed {
            debug!(columns, rows, visible, start = self.start_index, "viewport resized");
        }
        changed
    }

    /// Moves the window by `step` cells horizontally or `step` rows vertically.
    pub fn nudge(&mut self, direction: Direction, step: u32) -> bool {
        let step = step as i64;
        let row_step = step * self.columns_per_row as i64;
        let start = self.start_index as i64;
        let candidate = match direction {
            Direction::Up => start - row_step,
            Direction::Down => start + row_step,
            Direction::Left => start - step,
            Direction::Right => start + step,
        };
        let changed = self.set_start(candidate);
        debug!(
            direction = direction.as_str(),
            start = self.start_index,
            "viewport nudged"
        );
        changed
    }

    /// Jumps to the cell under a normalized minimap position.
    pub fn jump_to_fraction(&mut self, x_frac: f64, y_frac: f64) -> bool {
        let target = Self::jump_target(x_frac, y_frac);
        let changed = self.set_start(target);
        debug!(x_frac, y_frac, target, start = self.start_index, "viewport jumped");
        changed
    }

    pub fn set_start(&mut self, candidate: i64) -> bool {
        let start = Self::clamp_start(candidate, self.visible_count);
        let changed = start != self.start_index;
        self.start_index = start;
        changed
    }

    pub fn to_stored(&self) -> StoredViewport {
        StoredViewport {
            start_pixel: Some(self.start_index as i64),
            pixels_per_row: Some(self.columns_per_row as i64),
            visible_pixels: Some(self.visible_count as i64),
        }
    }

    /// Adopts whichever stored values are present, then re-clamps the start.
    pub fn apply_stored(&mut self, stored: StoredViewport) -> bool {
        let before = *self;
        if let Some(columns) = stored.pixels_per_row {
            self.columns_per_row = columns.clamp(1, WORLD_CELLS as i64) as u32;
        }
        if let Some(visible) = stored.visible_pixels {
            self.visible_count = visible.clamp(0, u32::MAX as i64) as u32;
        }
        let start = stored.start_pixel.unwrap_or(self.start_index as i64);
        self.start_index = Self::clamp_start(start, self.visible_count);
        before != *self
    }
}

fn floor_to_i64(v: f64) -> i64 {
    // Float-to-int casts saturate; NaN becomes 0.
    v.floor() as i64
}

fn fit_count(available_px: f64, footprint_px: f64) -> u32 {
    let n = (available_px / footprint_px).floor() as u32;
    n.clamp(1, WORLD_CELLS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn nudge_down_moves_by_rows() {
        let mut v = Viewport::new(0, 1_000, 50);
        assert_eq!(v.rows_per_viewport(), 20);
        assert!(v.nudge(Direction::Down, 10));
        assert_eq!(v.start_index(), 500);
        assert!(v.nudge(Direction::Up, 10));
        assert_eq!(v.start_index(), 0);
        assert!(!v.nudge(Direction::Up, 10));
    }

    #[test]
    fn nudge_right_clamps_at_world_end() {
        let mut v = Viewport::new(99_000, 2_000, 200);
        for _ in 0..5 {
            v.nudge(Direction::Right, 10);
            assert_eq!(v.start_index(), 98_000);
        }
        v.nudge(Direction::Left, 10);
        assert_eq!(v.start_index(), 97_990);
    }

    #[test]
    fn clamp_floors_at_zero_when_window_exceeds_world() {
        assert_eq!(Viewport::clamp_start(5_000, 150_000), 0);
        assert_eq!(Viewport::clamp_start(-1, 10), 0);
        assert_eq!(Viewport::clamp_start(i64::MAX, 10), WORLD_CELLS - 10);
        let mut v = Viewport::new(0, 150_000, 500);
        v.nudge(Direction::Down, 10);
        assert_eq!(v.start_index(), 0);
    }

    #[test]
    fn resize_fits_whole_cells() {
        let mut v = Viewport::default();
        assert!(v.resize(1024.0, 720.0, 11.0));
        assert_eq!(v.columns_per_row(), 93);
        assert_eq!(v.rows_per_viewport(), 65);
        assert_eq!(v.visible_count(), 93 * 65);
        assert!(!v.resize(1024.0, 720.0, 11.0));
    }

    #[test]
    fn resize_handles_degenerate_input() {
        let mut v = Viewport::default();
        v.resize(0.0, -50.0, 11.0);
        assert_eq!((v.columns_per_row(), v.visible_count()), (1, 1));
        v.resize(f64::NAN, 100.0, 0.0);
        assert_eq!(v.columns_per_row(), 1);
        assert_eq!(v.visible_count(), 100);
        v.resize(f64::INFINITY, f64::INFINITY, 10.0);
        assert_eq!(v.columns_per_row(), WORLD_CELLS);
        assert_eq!(v.start_index(), 0);
    }

    #[test]
    fn resize_reclamps_start() {
        let mut v = Viewport::new(99_900, 100, 10);
        v.resize(110.0, 110.0, 11.0);
        assert_eq!(v.visible_count(), 100);
        assert_eq!(v.start_index(), 99_900);
        v.resize(220.0, 220.0, 11.0);
        assert_eq!(v.start_index(), WORLD_CELLS - 400);
    }

    #[test]
    fn jump_uses_world_side() {
        assert_eq!(Viewport::jump_target(0.0, 0.0), 0);
        assert_eq!(Viewport::jump_target(0.5, 0.5), 158 * 316 + 158);
        assert_eq!(Viewport::jump_target(f64::NAN, -0.5), -158 * 316);

        let mut v = Viewport::new(0, 100, 10);
        v.jump_to_fraction(0.5, 0.5);
        assert_eq!(v.start_index(), 158 * 316 + 158);
        v.jump_to_fraction(0.999, 0.999);
        assert_eq!(v.start_index(), 315 * 316 + 315);
        v.jump_to_fraction(2.0, 2.0);
        assert_eq!(v.start_index(), WORLD_CELLS - 100);

        let mut wide = Viewport::new(0, 1_000, 50);
        wide.jump_to_fraction(0.999, 0.999);
        assert_eq!(wide.start_index(), WORLD_CELLS - 1_000);
    }

    #[test]
    fn stored_round_trip_and_partial_apply() {
        let v = Viewport::new(640, 1_200, 40);
        let mut other = Viewport::default();
        assert!(other.apply_stored(v.to_stored()));
        assert_eq!(other, v);

        let mut partial = Viewport::new(10, 1_000, 50);
        partial.apply_stored(StoredViewport {
            start_pixel: Some(200_000),
            ..Default::default()
        });
        assert_eq!(partial, Viewport::new(WORLD_CELLS - 1_000, 1_000, 50));

        partial.apply_stored(StoredViewport {
            pixels_per_row: Some(0),
            visible_pixels: Some(-4),
            start_pixel: None,
        });
        assert_eq!(partial.columns_per_row(), 1);
        assert_eq!(partial.visible_count(), 0);
    }

    #[test]
    fn current_coord_and_end_index() {
        let v = Viewport::new(316 * 2 + 5, 1_000, 50);
        assert_eq!(v.current_coord(), GridCoord { row: 2, col: 5 });
        assert_eq!(Viewport::new(99_500, 1_000, 50).end_index(), WORLD_CELLS);
    }

    #[test]
    fn direction_parse() {
        for d in Direction::ALL {
            assert_eq!(Direction::parse(d.as_str()), Some(d));
        }
        assert_eq!(Direction::parse(" DOWN "), Some(Direction::Down));
        assert_eq!(Direction::parse("sideways"), None);
    }

    proptest! {
        #[test]
        fn clamp_stays_in_bounds(candidate in any::<i64>(), visible in any::<u32>()) {
            let s = Viewport::clamp_start(candidate, visible) as i64;
            prop_assert!(s >= 0);
            prop_assert!(s <= (WORLD_CELLS as i64 - visible as i64).max(0));
        }

        #[test]
        fn resize_never_exceeds_area(w in 1.0f64..5_000.0, h in 1.0f64..5_000.0, fp in 1.0f64..40.0) {
            let mut v = Viewport::default();
            v.resize(w, h, fp);
            prop_assert!(v.columns_per_row() >= 1);
            prop_assert_eq!(v.visible_count(), v.columns_per_row() * v.rows_per_viewport());
            let cols_bound = (w / fp).floor().max(1.0);
            let rows_bound = (h / fp).floor().max(1.0);
            prop_assert!(v.visible_count() as f64 <= cols_bound * rows_bound);
        }

        #[test]
        fn jump_is_idempotent(x in -1.0f64..2.0, y in -1.0f64..2.0, visible in 1u32..120_000) {
            let mut a = Viewport::new(0, visible, 100);
            a.jump_to_fraction(x, y);
            let first = a.start_index();
            a.jump_to_fraction(x, y);
            prop_assert_eq!(a.start_index(), first);
            prop_assert!(first <= WORLD_CELLS.saturating_sub(visible));
        }

        #[test]
        fn navigation_preserves_invariant(start in 0u32..WORLD_CELLS, visible in 1u32..20_000, cols in 1u32..400, dir in 0usize..4) {
            let mut v = Viewport::new(start, visible, cols);
            v.nudge(Direction::ALL[dir], 10);
            prop_assert!(v.start_index() as u64 + v.visible_count() as u64 <= WORLD_CELLS as u64);
        }
    }
}
