//! UV overlay drawn on top of the 3D viewport.
//!
//! Everything here is rebuilt from scratch every frame: the textured UV
//! panel, the UV wireframe of the current object and the gesture markers.
//! Nothing is cached between frames.

use super::{
    DrawKind, DrawObject, PanelTransform, Rgb, ScreenProjection, DRAG_MARKER_DEPTH, PANEL_DEPTH,
    SCREEN_MARKER_DEPTH, WIREFRAME_DEPTH,
};
use crate::scene::{Document, MeshObject};
use glam::{Vec2, Vec3};

pub const SHIFT_MARKER_COLOR: Rgb = Rgb::new(1.0, 0.0, 1.0);
pub const DRAG_MARKER_COLOR: Rgb = Rgb::new(1.0, 1.0, 0.0);

const PANEL_CORNERS: [Vec2; 4] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(0.0, 1.0),
];

#[derive(Debug, Clone, Copy)]
pub struct OverlayParams {
    pub panel: PanelTransform,
    pub wire_color: Rgb,
    pub shift_held: bool,
    pub drag_start: Option<Vec2>,
}

pub fn draw_uv_overlay<D: Document, P: ScreenProjection>(
    doc: &D,
    projection: &P,
    params: &OverlayParams,
) -> Vec<DrawObject> {
    let mut out = Vec::new();
    out.extend(draw_uv_panel(doc, projection, &params.panel));
    out.extend(draw_uv_wireframe(doc, projection, &params.panel, params.wire_color));

    if params.shift_held {
        let origin = projection.screen_to_world(Vec3::new(0.0, 0.0, SCREEN_MARKER_DEPTH));
        out.push(draw_marker(origin, SHIFT_MARKER_COLOR));
    }

    if let Some(start) = params.drag_start {
        let position = params
            .panel
            .panel_to_world(projection, start, DRAG_MARKER_DEPTH);
        out.push(draw_marker(position, DRAG_MARKER_COLOR));
    }

    out
}

/// Unit UV square textured with the current material.
fn draw_uv_panel<D: Document, P: ScreenProjection>(
    doc: &D,
    projection: &P,
    panel: &PanelTransform,
) -> Option<DrawObject> {
    let material = doc.current_material_index()?;

    let mut object = DrawObject::new(DrawKind::Face);
    let indices: Vec<usize> = PANEL_CORNERS
        .iter()
        .map(|&uv| object.add_vertex(panel.panel_to_world(projection, uv, PANEL_DEPTH)))
        .collect();
    let face = object.add_face(&indices);
    object.set_face_uvs(face, &PANEL_CORNERS);
    object.set_face_material(face, material);
    Some(object)
}

/// UV outline of every face of the current object, one segment per pair
/// of consecutive corners.
fn draw_uv_wireframe<D: Document, P: ScreenProjection>(
    doc: &D,
    projection: &P,
    panel: &PanelTransform,
    color: Rgb,
) -> Option<DrawObject> {
    let mesh = doc.current_object()?;

    let mut lines = DrawObject::new(DrawKind::Line);
    lines.set_color(color);

    for f in 0..mesh.face_count() {
        let uvs = mesh.face_uvs(f);
        if uvs.len() < 2 {
            continue;
        }
        let indices: Vec<usize> = uvs
            .iter()
            .map(|&uv| lines.add_vertex(panel.panel_to_world(projection, uv, WIREFRAME_DEPTH)))
            .collect();
        for pair in indices.windows(2) {
            lines.add_face(pair);
        }
    }

    Some(lines)
}

fn draw_marker(position: Vec3, color: Rgb) -> DrawObject {
    let mut dot = DrawObject::new(DrawKind::Point);
    dot.set_color(color);
    let i = dot.add_vertex(position);
    dot.add_face(&[i]);
    dot
}
