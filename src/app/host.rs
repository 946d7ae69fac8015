use crate::scene::selection::EditOptions;

/// Services the host application provides to the tool besides the document.
pub trait Host {
    /// Repaint the scene the event came from.
    fn redraw_scene(&mut self);

    /// Repaint every scene, recomputing derived display data.
    fn redraw_all_scenes(&mut self);

    /// Record the current document state as an undo checkpoint.
    fn update_undo(&mut self);

    fn edit_options(&self) -> EditOptions {
        EditOptions::default()
    }
}

/// Host that only counts requests; drives the replay tool and the tests.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordingHost {
    pub scene_redraws: usize,
    pub full_redraws: usize,
    pub undo_checkpoints: usize,
    pub edit_options: EditOptions,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Host for RecordingHost {
    fn redraw_scene(&mut self) {
        self.scene_redraws += 1;
    }

    fn redraw_all_scenes(&mut self) {
        self.full_redraws += 1;
    }

    fn update_undo(&mut self) {
        log::debug!("undo checkpoint {}", self.undo_checkpoints + 1);
        self.undo_checkpoints += 1;
    }

    fn edit_options(&self) -> EditOptions {
        self.edit_options
    }
}
