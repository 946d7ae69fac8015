//! Selection queries over a [`Document`].
//!
//! The host lets the user select whole faces, single edges or single
//! vertices. [`gather_selection`] flattens all three granularities into one
//! sorted list of unique vertices so vertex-level operations do not need to
//! care how the selection was made.

use super::{Document, MeshObject};
use glam::Vec3;
use std::cmp::Ordering;

/// Host-wide edit options captured when the tool is activated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EditOptions {
    /// Restrict edits to the current object.
    #[serde(default)]
    pub current_object_only: bool,
}

/// Which objects an enumeration visits. Objects without vertices are
/// always skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectFilter {
    pub skip_locked: bool,
    pub skip_hidden: bool,
    /// Honor [`EditOptions::current_object_only`].
    pub apply_edit_option: bool,
}

impl ObjectFilter {
    pub const NONE: Self = Self {
        skip_locked: false,
        skip_hidden: false,
        apply_edit_option: false,
    };

    pub const ALL: Self = Self {
        skip_locked: true,
        skip_hidden: true,
        apply_edit_option: true,
    };

    fn accepts<O: MeshObject>(
        &self,
        index: usize,
        object: &O,
        current: Option<usize>,
        options: EditOptions,
    ) -> bool {
        if object.vertex_count() == 0 {
            return false;
        }
        if self.skip_locked && object.is_locked() {
            return false;
        }
        if self.skip_hidden && !object.is_visible() {
            return false;
        }
        if self.apply_edit_option && options.current_object_only && current != Some(index) {
            return false;
        }
        true
    }
}

/// Iterate `(index, object)` pairs of the objects accepted by `filter`.
pub fn eligible_objects<'a, D: Document>(
    doc: &'a D,
    filter: ObjectFilter,
    options: EditOptions,
) -> impl Iterator<Item = (usize, &'a D::Object)> + 'a {
    let current = doc.current_object_index();
    (0..doc.object_count()).filter_map(move |index| {
        let object = doc.object(index)?;
        filter
            .accepts(index, object, current, options)
            .then_some((index, object))
    })
}

/// A vertex identified by object index and vertex index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectVertex {
    pub object: usize,
    pub vertex: usize,
}

impl SelectVertex {
    pub fn new(object: usize, vertex: usize) -> Self {
        Self { object, vertex }
    }

    /// Lexicographic order by object, then vertex.
    pub fn cmp_object_vertex(a: &Self, b: &Self) -> Ordering {
        a.object.cmp(&b.object).then(a.vertex.cmp(&b.vertex))
    }
}

/// Sort `items` with `compare` and drop entries that compare equal.
pub fn sorted_unique_by<T, F>(mut items: Vec<T>, mut compare: F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    items.sort_by(&mut compare);
    items.dedup_by(|a, b| compare(&*a, &*b) == Ordering::Equal);
    items
}

/// Unique selected vertices of every object with vertices, in
/// `(object, vertex)` order.
pub fn gather_selection<D: Document>(doc: &D) -> Vec<SelectVertex> {
    gather_selection_with(doc, ObjectFilter::NONE, EditOptions::default())
}

pub fn gather_selection_with<D: Document>(
    doc: &D,
    filter: ObjectFilter,
    options: EditOptions,
) -> Vec<SelectVertex> {
    let mut found = Vec::new();

    for (o, object) in eligible_objects(doc, filter, options) {
        for f in 0..object.face_count() {
            let points = object.face_points(f);
            let n = points.len();
            if n == 0 {
                continue;
            }

            if doc.is_face_selected(o, f) {
                found.extend(points.iter().map(|&v| SelectVertex::new(o, v)));
                continue;
            }

            for (p, &v) in points.iter().enumerate() {
                if doc.is_line_selected(o, f, p) {
                    found.push(SelectVertex::new(o, v));
                    found.push(SelectVertex::new(o, points[(p + 1) % n]));
                }
                if doc.is_vertex_selected(o, v) {
                    found.push(SelectVertex::new(o, v));
                }
            }
        }
    }

    sorted_unique_by(found, SelectVertex::cmp_object_vertex)
}

/// Indices of the faces of `object` that reference `vertex`.
pub fn faces_containing_vertex<O: MeshObject>(object: &O, vertex: usize) -> Vec<usize> {
    (0..object.face_count())
        .filter(|&f| object.face_points(f).contains(&vertex))
        .collect()
}

/// One selectable element of a mesh object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectElement {
    Vertex { object: usize, vertex: usize },
    /// Edge starting at corner `line` of `face`.
    Edge { object: usize, face: usize, line: usize },
    Face { object: usize, face: usize },
}

impl SelectElement {
    pub fn object(&self) -> usize {
        match *self {
            Self::Vertex { object, .. } | Self::Edge { object, .. } | Self::Face { object, .. } => {
                object
            }
        }
    }

    /// Representative position: the vertex itself, the edge midpoint or the
    /// face centroid. Unresolvable elements map to the origin.
    pub fn point<D: Document>(&self, doc: &D) -> Vec3 {
        let Some(object) = doc.object(self.object()) else {
            return Vec3::ZERO;
        };
        let position = |v: usize| object.vertex(v).unwrap_or(Vec3::ZERO);

        match *self {
            Self::Vertex { vertex, .. } => position(vertex),
            Self::Edge { face, line, .. } => {
                let points = object.face_points(face);
                if line >= points.len() {
                    return Vec3::ZERO;
                }
                let next = points[(line + 1) % points.len()];
                (position(points[line]) + position(next)) * 0.5
            }
            Self::Face { face, .. } => {
                let points = object.face_points(face);
                if points.is_empty() {
                    return Vec3::ZERO;
                }
                let sum: Vec3 = points.iter().map(|&v| position(v)).sum();
                sum / points.len() as f32
            }
        }
    }

    pub fn select<D: Document>(&self, doc: &mut D) {
        match *self {
            Self::Vertex { object, vertex } => doc.add_select_vertex(object, vertex),
            Self::Edge { object, face, line } => doc.add_select_line(object, face, line),
            Self::Face { object, face } => doc.add_select_face(object, face),
        }
    }

    pub fn deselect<D: Document>(&self, doc: &mut D) {
        match *self {
            Self::Vertex { object, vertex } => doc.delete_select_vertex(object, vertex),
            Self::Edge { object, face, line } => doc.delete_select_line(object, face, line),
            Self::Face { object, face } => doc.delete_select_face(object, face),
        }
    }

    pub fn is_selected<D: Document>(&self, doc: &D) -> bool {
        match *self {
            Self::Vertex { object, vertex } => doc.is_vertex_selected(object, vertex),
            Self::Edge { object, face, line } => doc.is_line_selected(object, face, line),
            Self::Face { object, face } => doc.is_face_selected(object, face),
        }
    }
}
