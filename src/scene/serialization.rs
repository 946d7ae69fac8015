use crate::scene::MemoryDocument;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SerializationError>;

pub fn save_document_to_file(doc: &MemoryDocument, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(doc)?;
    std::fs::write(path, json)?;
    Ok(())
}

pub fn load_document_from_file(path: &Path) -> Result<MemoryDocument> {
    let json = std::fs::read_to_string(path)?;
    let doc: MemoryDocument = serde_json::from_str(&json)?;
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use crate::scene::{unit_quad_object, Document, MemoryDocument, MeshObject};
    use glam::Vec2;

    fn temp_path(tag: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        let nonce = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        path.push(format!("rollex_{}_{}_{}.json", tag, std::process::id(), nonce));
        path
    }

    #[test]
    fn test_empty_document_serialization() {
        let doc = MemoryDocument::new();
        let json = serde_json::to_string_pretty(&doc).unwrap();
        let loaded: MemoryDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.object_count(), 0);
        assert_eq!(loaded.current_object_index(), None);
    }

    #[test]
    fn test_minimal_json_uses_defaults() {
        let json = r#"{
            "objects": [{
                "name": "Tri",
                "vertices": [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
                "faces": [{ "points": [0, 1, 2], "uvs": [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]] }]
            }],
            "current_object": 0
        }"#;
        let doc: MemoryDocument = serde_json::from_str(json).unwrap();
        let object = doc.current_object().unwrap();
        assert!(object.is_visible());
        assert!(!object.is_locked());
        assert_eq!(object.face_uvs(0)[2], Vec2::new(0.0, 1.0));
        assert_eq!(doc.current_material_index(), None);
        assert!(doc.selection().is_empty());
    }

    #[test]
    fn test_save_load_via_file() {
        let mut doc = MemoryDocument::new();
        let index = doc.add_object(unit_quad_object("Quad"));
        doc.set_current_object(Some(index));
        doc.set_current_material(Some(2));
        doc.add_select_face(index, 0);
        doc.add_select_line(index, 0, 1);

        let path = temp_path("document");
        super::save_document_to_file(&doc, &path).unwrap();
        let loaded = super::load_document_from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded, doc);
        assert!(loaded.is_line_selected(index, 0, 1));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = temp_path("missing");
        let err = super::load_document_from_file(&path).unwrap_err();
        assert!(matches!(err, super::SerializationError::Io(_)));
    }
}
