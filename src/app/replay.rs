//! Scripted tool sessions.
//!
//! A replay script is a JSON list of activation toggles, draw requests and
//! input events. Running it drives a [`UvTool`] against a document exactly
//! as the host would, which is how the command-line binary exercises the
//! tool without a host application.

use super::host::RecordingHost;
use super::input::ToolEvent;
use super::{EventResponse, UvTool};
use crate::render::OrthoViewport;
use crate::scene::serialization::SerializationError;
use crate::scene::MemoryDocument;
use crate::settings::{SettingsError, SettingsStore};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("document error: {0}")]
    Document(#[from] SerializationError),
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),
}

pub type Result<T> = std::result::Result<T, ReplayError>;

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReplayViewport {
    pub width: u32,
    pub height: u32,
    /// Half-height of the orthographic view volume.
    pub zoom: f32,
}

impl Default for ReplayViewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            zoom: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ReplayStep {
    Activate { on: bool },
    Draw,
    Input { event: ToolEvent },
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ReplayScript {
    #[serde(default)]
    pub viewport: ReplayViewport,
    pub steps: Vec<ReplayStep>,
}

impl ReplayScript {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let script: ReplayScript = serde_json::from_str(&json)?;
        Ok(script)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ReplaySummary {
    pub events: usize,
    pub consumed: usize,
    pub draws: usize,
    pub draw_objects: usize,
    pub scene_redraws: usize,
    pub full_redraws: usize,
    pub undo_checkpoints: usize,
}

/// Run `script` against `doc`, returning what the host was asked to do.
pub fn run_replay<S: SettingsStore + ?Sized>(
    doc: &mut MemoryDocument,
    settings: &S,
    script: &ReplayScript,
) -> ReplaySummary {
    let viewport = OrthoViewport::looking_down_z(
        script.viewport.width,
        script.viewport.height,
        script.viewport.zoom,
    );
    let mut host = RecordingHost::new();
    let mut tool = UvTool::new();
    let mut summary = ReplaySummary::default();

    for (index, step) in script.steps.iter().enumerate() {
        match step {
            ReplayStep::Activate { on } => {
                tool.activate(&mut host, settings, *on);
                log::info!("step {}: {} {}", index, UvTool::NAME, if *on { "on" } else { "off" });
            }
            ReplayStep::Draw => {
                let objects = tool.draw(&*doc, &viewport);
                log::debug!("step {}: drew {} objects", index, objects.len());
                summary.draws += 1;
                summary.draw_objects += objects.len();
            }
            ReplayStep::Input { event } => {
                summary.events += 1;
                if !tool.is_active() {
                    log::trace!("step {}: tool inactive, {:?} not delivered", index, event);
                    continue;
                }
                if tool.handle_event(doc, &mut host, event) == EventResponse::Consumed {
                    summary.consumed += 1;
                }
            }
        }
    }

    summary.scene_redraws = host.scene_redraws;
    summary.full_redraws = host.full_redraws;
    summary.undo_checkpoints = host.undo_checkpoints;
    summary
}
