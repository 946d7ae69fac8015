pub mod selection;
pub mod serialization;

use glam::{Vec2, Vec3};
use std::collections::BTreeSet;

/// Read/write view of one mesh object owned by the host document.
///
/// Faces are index lists into the object's vertex array; every face corner
/// carries its own UV coordinate, so two faces sharing a 3D vertex can still
/// have different UVs.
pub trait MeshObject {
    fn vertex_count(&self) -> usize;

    fn vertex(&self, index: usize) -> Option<Vec3>;

    fn face_count(&self) -> usize;

    /// Vertex indices of a face, empty for an invalid face.
    fn face_points(&self, face: usize) -> &[usize];

    /// UV coordinates of a face, one per face corner.
    fn face_uvs(&self, face: usize) -> &[Vec2];

    fn set_face_uvs(&mut self, face: usize, uvs: &[Vec2]);

    fn is_locked(&self) -> bool {
        false
    }

    fn is_visible(&self) -> bool {
        true
    }
}

/// The host document: objects, the current object/material and the
/// element selection.
pub trait Document {
    type Object: MeshObject;

    fn object_count(&self) -> usize;

    fn object(&self, index: usize) -> Option<&Self::Object>;

    fn object_mut(&mut self, index: usize) -> Option<&mut Self::Object>;

    fn current_object_index(&self) -> Option<usize>;

    fn current_material_index(&self) -> Option<usize>;

    fn is_vertex_selected(&self, object: usize, vertex: usize) -> bool;

    /// `line` is the corner index of the face; the edge runs to the next corner.
    fn is_line_selected(&self, object: usize, face: usize, line: usize) -> bool;

    fn is_face_selected(&self, object: usize, face: usize) -> bool;

    fn add_select_vertex(&mut self, object: usize, vertex: usize);

    fn add_select_line(&mut self, object: usize, face: usize, line: usize);

    fn add_select_face(&mut self, object: usize, face: usize);

    fn delete_select_vertex(&mut self, object: usize, vertex: usize);

    fn delete_select_line(&mut self, object: usize, face: usize, line: usize);

    fn delete_select_face(&mut self, object: usize, face: usize);

    /// Deselect every vertex, edge and face.
    fn clear_select(&mut self);

    fn current_object(&self) -> Option<&Self::Object> {
        self.current_object_index()
            .and_then(|index| self.object(index))
    }

    fn current_object_mut(&mut self) -> Option<&mut Self::Object> {
        let index = self.current_object_index()?;
        self.object_mut(index)
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MemoryFace {
    pub points: Vec<usize>,
    pub uvs: Vec<Vec2>,
}

impl MemoryFace {
    pub fn new(points: Vec<usize>, uvs: Vec<Vec2>) -> Self {
        Self { points, uvs }
    }
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MemoryObject {
    pub name: String,
    pub vertices: Vec<Vec3>,
    pub faces: Vec<MemoryFace>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

impl MemoryObject {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            vertices: Vec::new(),
            faces: Vec::new(),
            locked: false,
            visible: true,
        }
    }

    pub fn add_vertex(&mut self, position: Vec3) -> usize {
        self.vertices.push(position);
        self.vertices.len() - 1
    }

    pub fn add_face(&mut self, points: &[usize], uvs: &[Vec2]) -> usize {
        let mut face_uvs = uvs.to_vec();
        face_uvs.resize(points.len(), Vec2::ZERO);
        self.faces.push(MemoryFace::new(points.to_vec(), face_uvs));
        self.faces.len() - 1
    }
}

impl MeshObject for MemoryObject {
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    fn vertex(&self, index: usize) -> Option<Vec3> {
        self.vertices.get(index).copied()
    }

    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn face_points(&self, face: usize) -> &[usize] {
        self.faces
            .get(face)
            .map(|f| f.points.as_slice())
            .unwrap_or(&[])
    }

    fn face_uvs(&self, face: usize) -> &[Vec2] {
        self.faces
            .get(face)
            .map(|f| f.uvs.as_slice())
            .unwrap_or(&[])
    }

    fn set_face_uvs(&mut self, face: usize, uvs: &[Vec2]) {
        if let Some(f) = self.faces.get_mut(face) {
            let n = f.uvs.len().min(uvs.len());
            f.uvs[..n].copy_from_slice(&uvs[..n]);
        }
    }

    fn is_locked(&self) -> bool {
        self.locked
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MemorySelection {
    #[serde(default)]
    vertices: BTreeSet<(usize, usize)>,
    #[serde(default)]
    lines: BTreeSet<(usize, usize, usize)>,
    #[serde(default)]
    faces: BTreeSet<(usize, usize)>,
}

impl MemorySelection {
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.lines.is_empty() && self.faces.is_empty()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.lines.clear();
        self.faces.clear();
    }
}

/// Self-contained document used by the replay driver and the tests.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MemoryDocument {
    objects: Vec<MemoryObject>,
    #[serde(default)]
    current_object: Option<usize>,
    #[serde(default)]
    current_material: Option<usize>,
    #[serde(default)]
    selection: MemorySelection,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn objects(&self) -> &[MemoryObject] {
        &self.objects
    }

    pub fn add_object(&mut self, object: MemoryObject) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    pub fn set_current_object(&mut self, index: Option<usize>) {
        self.current_object = index;
    }

    pub fn set_current_material(&mut self, index: Option<usize>) {
        self.current_material = index;
    }

    pub fn selection(&self) -> &MemorySelection {
        &self.selection
    }
}

impl Document for MemoryDocument {
    type Object = MemoryObject;

    fn object_count(&self) -> usize {
        self.objects.len()
    }

    fn object(&self, index: usize) -> Option<&MemoryObject> {
        self.objects.get(index)
    }

    fn object_mut(&mut self, index: usize) -> Option<&mut MemoryObject> {
        self.objects.get_mut(index)
    }

    fn current_object_index(&self) -> Option<usize> {
        self.current_object
    }

    fn current_material_index(&self) -> Option<usize> {
        self.current_material
    }

    fn is_vertex_selected(&self, object: usize, vertex: usize) -> bool {
        self.selection.vertices.contains(&(object, vertex))
    }

    fn is_line_selected(&self, object: usize, face: usize, line: usize) -> bool {
        self.selection.lines.contains(&(object, face, line))
    }

    fn is_face_selected(&self, object: usize, face: usize) -> bool {
        self.selection.faces.contains(&(object, face))
    }

    fn add_select_vertex(&mut self, object: usize, vertex: usize) {
        self.selection.vertices.insert((object, vertex));
    }

    fn add_select_line(&mut self, object: usize, face: usize, line: usize) {
        self.selection.lines.insert((object, face, line));
    }

    fn add_select_face(&mut self, object: usize, face: usize) {
        self.selection.faces.insert((object, face));
    }

    fn delete_select_vertex(&mut self, object: usize, vertex: usize) {
        self.selection.vertices.remove(&(object, vertex));
    }

    fn delete_select_line(&mut self, object: usize, face: usize, line: usize) {
        self.selection.lines.remove(&(object, face, line));
    }

    fn delete_select_face(&mut self, object: usize, face: usize) {
        self.selection.faces.remove(&(object, face));
    }

    fn clear_select(&mut self) {
        self.selection.clear();
    }
}

/// A single quad object with its UVs covering the unit square.
pub fn unit_quad_object(name: &str) -> MemoryObject {
    let mut object = MemoryObject::new(name);
    let corners = [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ];
    let points: Vec<usize> = corners
        .iter()
        .map(|c| object.add_vertex(Vec3::new(c.x, c.y, 0.0)))
        .collect();
    object.add_face(&points, &corners);
    object
}
