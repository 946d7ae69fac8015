mod transform;
mod uv_overlay;
mod viewport;

pub use transform::{
    PanelTransform, DEFAULT_PANEL_SCALE, DRAG_MARKER_DEPTH, MIN_ZOOM_SCALE, PANEL_DEPTH,
    SCREEN_MARKER_DEPTH, WIREFRAME_DEPTH,
};
pub use uv_overlay::{draw_uv_overlay, OverlayParams, DRAG_MARKER_COLOR, SHIFT_MARKER_COLOR};
pub use viewport::OrthoViewport;

use glam::{Vec2, Vec3};

/// Host scene projection from screen pixels plus depth to world space.
pub trait ScreenProjection {
    /// `screen.x`/`screen.y` are pixels, `screen.z` is a normalized depth in
    /// `[0, 1]` with 1 at the far plane.
    fn screen_to_world(&self, screen: Vec3) -> Vec3;
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Decode a `0x00BBGGRR` packed color.
    pub fn from_packed_bgr(packed: u32) -> Self {
        let channel = |shift: u32| ((packed >> shift) & 0xFF) as f32 / 255.0;
        Self {
            r: channel(0),
            g: channel(8),
            b: channel(16),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    Point,
    Line,
    Face,
}

/// One face of a [`DrawObject`]: corner indices plus optional UVs and material.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawFace {
    pub indices: Vec<usize>,
    pub uvs: Vec<Vec2>,
    pub material: Option<usize>,
}

/// Transient drawing object handed to the host for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawObject {
    kind: DrawKind,
    vertices: Vec<Vec3>,
    faces: Vec<DrawFace>,
    color: Option<Rgb>,
}

impl DrawObject {
    pub fn new(kind: DrawKind) -> Self {
        Self {
            kind,
            vertices: Vec::new(),
            faces: Vec::new(),
            color: None,
        }
    }

    pub fn kind(&self) -> DrawKind {
        self.kind
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[DrawFace] {
        &self.faces
    }

    /// Flat color, `None` means the host default.
    pub fn color(&self) -> Option<Rgb> {
        self.color
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.color = Some(color);
    }

    pub fn add_vertex(&mut self, position: Vec3) -> usize {
        self.vertices.push(position);
        self.vertices.len() - 1
    }

    pub fn add_face(&mut self, indices: &[usize]) -> usize {
        self.faces.push(DrawFace {
            indices: indices.to_vec(),
            uvs: Vec::new(),
            material: None,
        });
        self.faces.len() - 1
    }

    pub fn set_face_uvs(&mut self, face: usize, uvs: &[Vec2]) {
        if let Some(f) = self.faces.get_mut(face) {
            f.uvs = uvs.to_vec();
        }
    }

    pub fn set_face_material(&mut self, face: usize, material: usize) {
        if let Some(f) = self.faces.get_mut(face) {
            f.material = Some(material);
        }
    }

    /// Line segments as world-space endpoint pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.faces
            .iter()
            .filter(|f| f.indices.len() == 2)
            .map(|f| (self.vertices[f.indices[0]], self.vertices[f.indices[1]]))
    }
}
