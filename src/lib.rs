//! Rollex - rolling-expand UV brush for mesh editors.
//!
//! The tool draws the current material as a panel behind the scene with the
//! current object's UV wireframe on top of it, and lets the user push UV
//! coordinates radially away from a point by dragging on that panel.
//!
//! - [`scene`]: document and mesh access traits, an in-memory document,
//!   selection queries
//! - [`render`]: panel placement, overlay drawing objects, a reference
//!   orthographic projection
//! - [`brush`]: falloff and the per-stroke expansion state
//! - [`app`]: [`UvTool`], input routing, host callbacks, scripted replay
//! - [`settings`]: the host settings the tool reads

pub mod app;
pub mod brush;
pub mod render;
pub mod scene;
pub mod settings;

pub use app::host::{Host, RecordingHost};
pub use app::input::{Key, MouseButton, MouseState, ToolEvent};
pub use app::{EventResponse, UvTool};
pub use brush::BrushStroke;
pub use render::{DrawObject, PanelTransform, Rgb, ScreenProjection};
pub use scene::{Document, MemoryDocument, MeshObject};
pub use settings::{JsonSettings, SettingsStore};
