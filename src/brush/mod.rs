//! Rolling-expand UV brush.
//!
//! A stroke is anchored at the panel-space point where the left button went
//! down. As the cursor moves away from the anchor, every UV coordinate of
//! the current object is pushed radially away from the anchor by the growth
//! of the drag distance since the previous update. Moving back toward the
//! anchor pulls coordinates in again.
//!
//! The push is attenuated by a falloff weight. The effective radius depends
//! on the panel zoom and shrinks relative to the drag as the drag gets
//! longer, so small drags act on a wide area and long drags only keep
//! moving the coordinates closest to the anchor.

use crate::scene::MeshObject;
use glam::Vec2;

/// Fraction of the drag growth applied to the coordinates.
pub const BRUSH_DAMPING: f32 = 0.3;

/// Panel pixels that map to a falloff threshold of 1.
pub const FALLOFF_PIXELS: f32 = 700.0;

/// Drags shorter than this (in panel units) do nothing.
pub const MIN_DRAG_DISTANCE: f32 = 1e-6;

/// Falloff for a coordinate `dist` panel units from the anchor while the
/// drag is `drag_distance` long, at panel zoom `scale`. In `[0, 1]`.
pub fn falloff_weight(dist: f32, scale: f32, drag_distance: f32) -> f32 {
    let threshold = dist * scale / FALLOFF_PIXELS;
    (1.0 - threshold * threshold / drag_distance).max(0.0)
}

/// Displacement of one coordinate for a radial step of `step` panel units.
///
/// A coordinate sitting exactly on the anchor has full weight but no
/// direction to move in, so it stays where it is.
pub fn radial_displacement(
    uv: Vec2,
    anchor: Vec2,
    step: f32,
    scale: f32,
    drag_distance: f32,
) -> Vec2 {
    let offset = uv - anchor;
    let dist = offset.length();
    if dist == 0.0 {
        return Vec2::ZERO;
    }
    offset / dist * step * falloff_weight(dist, scale, drag_distance)
}

/// Apply one radial step to every UV coordinate of `object`.
pub fn expand_uvs<O: MeshObject>(
    object: &mut O,
    anchor: Vec2,
    step: f32,
    scale: f32,
    drag_distance: f32,
) {
    let mut uvs: Vec<Vec2> = Vec::new();
    for f in 0..object.face_count() {
        uvs.clear();
        uvs.extend_from_slice(object.face_uvs(f));
        for uv in uvs.iter_mut() {
            *uv += radial_displacement(*uv, anchor, step, scale, drag_distance);
        }
        object.set_face_uvs(f, &uvs);
    }
}

/// Outcome of one [`BrushStroke::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrokeUpdate {
    /// The cursor is on the anchor; nothing was touched.
    Degenerate,
    Applied { distance: f32, step: f32 },
}

/// State of one left-button drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushStroke {
    anchor: Vec2,
    last_distance: f32,
    moved: bool,
}

impl BrushStroke {
    pub fn begin(anchor: Vec2) -> Self {
        Self {
            anchor,
            last_distance: 0.0,
            moved: false,
        }
    }

    /// Panel-space point where the drag started.
    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }

    pub fn last_distance(&self) -> f32 {
        self.last_distance
    }

    /// Whether any update has modified the mesh.
    pub fn moved(&self) -> bool {
        self.moved
    }

    pub fn update<O: MeshObject>(
        &mut self,
        object: &mut O,
        cursor: Vec2,
        scale: f32,
    ) -> StrokeUpdate {
        let distance = (cursor - self.anchor).length();
        if distance <= MIN_DRAG_DISTANCE {
            return StrokeUpdate::Degenerate;
        }

        let step = (distance - self.last_distance) * BRUSH_DAMPING;
        expand_uvs(object, self.anchor, step, scale, distance);

        self.last_distance = distance;
        self.moved = true;
        StrokeUpdate::Applied { distance, step }
    }
}
