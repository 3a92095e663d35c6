use tracing::warn;

use crate::{KeyValueStore, StoreError};

pub const START_PIXEL_KEY: &str = "startPixel";
pub const PIXELS_PER_ROW_KEY: &str = "pixelsPerRow";
pub const VISIBLE_PIXELS_KEY: &str = "visiblePixels";

/// Viewport values as persisted in the shared key-value store.
///
/// Each key is a plain decimal integer, unversioned and overwritten wholesale.
/// Absent or unreadable keys load as `None`; values are not range-checked here,
/// clamping is the viewport's job.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct StoredViewport {
    pub start_pixel: Option<i64>,
    pub pixels_per_row: Option<i64>,
    pub visible_pixels: Option<i64>,
}

impl StoredViewport {
    pub fn load(store: &(impl KeyValueStore + ?Sized)) -> Result<Self, StoreError> {
        Ok(Self {
            start_pixel: read_int(store, START_PIXEL_KEY)?,
            pixels_per_row: read_int(store, PIXELS_PER_ROW_KEY)?,
            visible_pixels: read_int(store, VISIBLE_PIXELS_KEY)?,
        })
    }

    /// Writes every present value; absent values leave their key untouched.
    ///
    /// All or nothing: if any write fails, keys already written are put back
    /// to their previous contents before the error is returned.
    pub fn save(&self, store: &mut (impl KeyValueStore + ?Sized)) -> Result<(), StoreError> {
        let fields = [
            (START_PIXEL_KEY, self.start_pixel),
            (PIXELS_PER_ROW_KEY, self.pixels_per_row),
            (VISIBLE_PIXELS_KEY, self.visible_pixels),
        ];
        let mut written: Vec<(&str, Option<String>)> = Vec::with_capacity(fields.len());
        for (key, value) in fields {
            let Some(v) = value else { continue };
            let previous = match store.get_item(key) {
                Ok(previous) => previous,
                Err(err) => {
                    rollback(store, written);
                    return Err(err);
                }
            };
            if let Err(err) = store.set_item(key, &v.to_string()) {
                rollback(store, written);
                return Err(err);
            }
            written.push((key, previous));
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.start_pixel.is_none() && self.pixels_per_row.is_none() && self.visible_pixels.is_none()
    }
}

fn rollback(store: &mut (impl KeyValueStore + ?Sized), written: Vec<(&str, Option<String>)>) {
    for (key, previous) in written.into_iter().rev() {
        let restored = match previous {
            Some(value) => store.set_item(key, &value),
            None => store.remove_item(key).map(|_| ()),
        };
        if let Err(err) = restored {
            warn!(key, "could not restore stored viewport value: {err}");
        }
    }
}

fn read_int(store: &(impl KeyValueStore + ?Sized), key: &str) -> Result<Option<i64>, StoreError> {
    let Some(raw) = store.get_item(key)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.parse::<i64>() {
        Ok(v) => Ok(Some(v)),
        Err(e) => {
            warn!(key, value = raw, "ignoring unreadable stored viewport value: {e}");
            Ok(None)
        }
    }
}
