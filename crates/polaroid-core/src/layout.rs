//! Collage placement: where each polaroid sits and which one is on top.
//!
//! Positions live in an arena keyed by photo id. Any structural change to the
//! input (different ids, different order, different bounds) throws the arena
//! away and recomputes it; drags patch single records in place.

use std::collections::HashMap;

use rand::Rng;
use tracing::debug;

use crate::consts::{
    DEFAULT_CONTAINER_HEIGHT, DEFAULT_CONTAINER_WIDTH, DEFAULT_ELEMENT_HEIGHT,
    DEFAULT_ELEMENT_WIDTH, LAYOUT_PADDING,
};
use crate::error::{PolaroidError, Result};
use crate::photo::{Photo, Position};

/// Container and element footprint, in the same units as photo positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutBounds {
    pub container_width: f64,
    pub container_height: f64,
    pub element_width: f64,
    pub element_height: f64,
    pub padding: f64,
}

impl Default for LayoutBounds {
    fn default() -> Self {
        Self {
            container_width: DEFAULT_CONTAINER_WIDTH,
            container_height: DEFAULT_CONTAINER_HEIGHT,
            element_width: DEFAULT_ELEMENT_WIDTH,
            element_height: DEFAULT_ELEMENT_HEIGHT,
            padding: LAYOUT_PADDING,
        }
    }
}

impl LayoutBounds {
    pub fn new(
        container_width: f64,
        container_height: f64,
        element_width: f64,
        element_height: f64,
    ) -> Result<Self> {
        let bounds = Self {
            container_width,
            container_height,
            element_width,
            element_height,
            padding: LAYOUT_PADDING,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> Result<()> {
        let dims = [
            self.container_width,
            self.container_height,
            self.element_width,
            self.element_height,
        ];
        if dims.iter().any(|d| !d.is_finite() || *d < 0.0)
            || !self.padding.is_finite()
            || self.padding < 0.0
        {
            return Err(PolaroidError::InvalidBounds {
                container_width: self.container_width,
                container_height: self.container_height,
                element_width: self.element_width,
                element_height: self.element_height,
            });
        }
        Ok(())
    }

    /// Largest x an element may take while staying inside the container.
    pub fn max_x(&self) -> f64 {
        self.container_width - self.element_width
    }

    /// Largest y an element may take while staying inside the container.
    pub fn max_y(&self) -> f64 {
        self.container_height - self.element_height
    }

    /// Clamp into [0, max]. A container smaller than the element pins to 0.
    pub fn clamp(&self, x: f64, y: f64) -> (f64, f64) {
        (x.min(self.max_x()).max(0.0), y.min(self.max_y()).max(0.0))
    }

    /// Uniform point in [padding, max - padding] on both axes.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> (f64, f64) {
        let span_x = (self.max_x() - self.padding * 2.0).max(0.0);
        let span_y = (self.max_y() - self.padding * 2.0).max(0.0);
        let x = rng.gen::<f64>() * span_x + self.padding;
        let y = rng.gen::<f64>() * span_y + self.padding;
        (x, y)
    }
}

/// Working placement of one photo.
#[derive(Clone, Debug, PartialEq)]
pub struct PhotoPosition {
    pub photo_id: String,
    pub x: f64,
    pub y: f64,
    pub z_index: i64,
}

/// Place every photo: saved positions are clamped into bounds, missing ones
/// are drawn at random. Earlier photos start lower in the stack.
pub fn compute_initial_positions<R: Rng + ?Sized>(
    photos: &[Photo],
    bounds: &LayoutBounds,
    rng: &mut R,
) -> Vec<PhotoPosition> {
    let len = photos.len() as i64;
    photos
        .iter()
        .enumerate()
        .map(|(index, photo)| {
            let (raw_x, raw_y) = match photo.position {
                Some(Position { x, y }) => (x, y),
                None => bounds.random_point(rng),
            };
            let (x, y) = bounds.clamp(raw_x, raw_y);
            PhotoPosition {
                photo_id: photo.id.clone(),
                x,
                y,
                z_index: len - index as i64,
            }
        })
        .collect()
}

/// Photo actions raised from the collage. The host owns the photo list and
/// decides what to do; the layout only forwards the request.
///
/// All methods default to no-ops.
pub trait LayoutCallbacks {
    fn on_delete(&mut self, _photo: &Photo) {}
    fn on_toggle_favorite(&mut self, _photo: &Photo) {}
    fn on_edit(&mut self, _photo: &Photo) {}
}

/// Host that ignores every collage action.
#[derive(Debug, Default)]
pub struct NoLayoutCallbacks;
impl LayoutCallbacks for NoLayoutCallbacks {}

/// Arena of positions for the photos currently on the collage.
#[derive(Debug, Default)]
pub struct Layout {
    bounds: LayoutBounds,
    positions: Vec<PhotoPosition>,
    index: HashMap<String, usize>,
    dragging: Option<String>,
    computed: bool,
}

impl Layout {
    pub fn new(bounds: LayoutBounds) -> Self {
        Self {
            bounds,
            ..Default::default()
        }
    }

    pub fn bounds(&self) -> &LayoutBounds {
        &self.bounds
    }

    /// Recompute the whole arena if the photo sequence or bounds changed.
    ///
    /// Returns `true` when a recompute happened.
    pub fn sync<R: Rng + ?Sized>(
        &mut self,
        photos: &[Photo],
        bounds: LayoutBounds,
        rng: &mut R,
    ) -> bool {
        let same_ids = photos.len() == self.positions.len()
            && photos
                .iter()
                .zip(&self.positions)
                .all(|(photo, pos)| photo.id == pos.photo_id);
        if self.computed && same_ids && bounds == self.bounds {
            return false;
        }

        self.bounds = bounds;
        self.computed = true;
        self.positions = compute_initial_positions(photos, &self.bounds, rng);
        self.index = self
            .positions
            .iter()
            .enumerate()
            .map(|(i, p)| (p.photo_id.clone(), i))
            .collect();
        if self
            .dragging
            .as_ref()
            .is_some_and(|id| !self.index.contains_key(id))
        {
            self.dragging = None;
        }
        debug!(photos = photos.len(), "Recomputed collage layout");
        true
    }

    pub fn position(&self, photo_id: &str) -> Option<&PhotoPosition> {
        self.index.get(photo_id).map(|&i| &self.positions[i])
    }

    /// Positions in input order.
    pub fn positions(&self) -> &[PhotoPosition] {
        &self.positions
    }

    /// Positions bottom to top, the order they should be drawn in.
    pub fn render_order(&self) -> Vec<&PhotoPosition> {
        let mut ordered: Vec<&PhotoPosition> = self.positions.iter().collect();
        ordered.sort_by_key(|p| p.z_index);
        ordered
    }

    pub fn max_z_index(&self) -> Option<i64> {
        self.positions.iter().map(|p| p.z_index).max()
    }

    /// Mark `photo_id` as being dragged. Unknown ids are ignored.
    pub fn begin_drag(&mut self, photo_id: &str) -> bool {
        if !self.index.contains_key(photo_id) {
            return false;
        }
        self.dragging = Some(photo_id.to_string());
        true
    }

    pub fn dragging(&self) -> Option<&str> {
        self.dragging.as_deref()
    }

    /// Drop a photo at (x, y) and bring it to the top.
    ///
    /// Coordinates are clamped to be non-negative only; use
    /// [`Layout::clamp_to_bounds`] to pull it back inside the container.
    pub fn on_drag_end(&mut self, photo_id: &str, x: f64, y: f64) -> Option<PhotoPosition> {
        self.dragging = None;
        let slot = *self.index.get(photo_id)?;
        let top = self.max_z_index().unwrap_or(0) + 1;

        let pos = &mut self.positions[slot];
        pos.x = x.max(0.0);
        pos.y = y.max(0.0);
        pos.z_index = top;
        debug!(photo_id, x = pos.x, y = pos.y, z = top, "Photo dropped");
        Some(pos.clone())
    }

    /// Re-clamp one photo against the current bounds.
    pub fn clamp_to_bounds(&mut self, photo_id: &str) -> Option<PhotoPosition> {
        let slot = *self.index.get(photo_id)?;
        let (x, y) = self.bounds.clamp(self.positions[slot].x, self.positions[slot].y);
        let pos = &mut self.positions[slot];
        pos.x = x;
        pos.y = y;
        Some(pos.clone())
    }

    /// Write the arena back into the photo records so the caller can persist it.
    ///
    /// Returns the number of records updated.
    pub fn commit_positions(&self, photos: &mut [Photo]) -> usize {
        let mut updated = 0;
        for photo in photos.iter_mut() {
            if let Some(pos) = self.position(&photo.id) {
                photo.position = Some(Position { x: pos.x, y: pos.y });
                updated += 1;
            }
        }
        updated
    }

    /// Ask the host to delete a photo on the collage.
    ///
    /// The arena is left as is; it follows on the next [`Layout::sync`] once
    /// the host has removed the record. Returns `false` for unknown ids.
    pub fn request_delete<C: LayoutCallbacks + ?Sized>(
        &self,
        photos: &[Photo],
        photo_id: &str,
        callbacks: &mut C,
    ) -> bool {
        self.forward(photos, photo_id, |photo| callbacks.on_delete(photo))
    }

    pub fn request_toggle_favorite<C: LayoutCallbacks + ?Sized>(
        &self,
        photos: &[Photo],
        photo_id: &str,
        callbacks: &mut C,
    ) -> bool {
        self.forward(photos, photo_id, |photo| callbacks.on_toggle_favorite(photo))
    }

    pub fn request_edit<C: LayoutCallbacks + ?Sized>(
        &self,
        photos: &[Photo],
        photo_id: &str,
        callbacks: &mut C,
    ) -> bool {
        self.forward(photos, photo_id, |photo| callbacks.on_edit(photo))
    }

    fn forward<F: FnOnce(&Photo)>(&self, photos: &[Photo], photo_id: &str, action: F) -> bool {
        if !self.index.contains_key(photo_id) {
            return false;
        }
        let Some(photo) = photos.iter().find(|p| p.id == photo_id) else {
            return false;
        };
        debug!(photo_id, "Collage action forwarded");
        action(photo);
        true
    }
}
