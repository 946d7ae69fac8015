pub mod host;
pub mod input;
pub mod replay;

use crate::brush::{BrushStroke, StrokeUpdate};
use crate::render::{
    draw_uv_overlay, DrawObject, OverlayParams, PanelTransform, Rgb, ScreenProjection,
};
use crate::scene::selection::{gather_selection_with, EditOptions, ObjectFilter, SelectVertex};
use crate::scene::Document;
use crate::settings::{load_uv_color, SettingsStore, DEFAULT_UV_COLOR};
use glam::Vec2;
use host::Host;
use input::{DragMode, Gesture, InputState, Key, MouseButton, MouseState, ToolEvent};

/// Panel pixels added or removed per wheel notch.
pub const WHEEL_ZOOM_STEP: f32 = 60.0;

/// Whether an event was used by the tool or should fall through to the
/// host's default handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    Consumed,
    Ignored,
}

impl EventResponse {
    pub fn is_consumed(self) -> bool {
        self == Self::Consumed
    }
}

/// The UV rolling-expand tool.
///
/// One instance lives for the whole host session. Panel placement survives
/// activation cycles; gesture state does not.
pub struct UvTool {
    active: bool,
    panel: PanelTransform,
    wire_color: Rgb,
    stroke: Option<BrushStroke>,
    input: InputState,
    edit_options: EditOptions,
}

impl Default for UvTool {
    fn default() -> Self {
        Self::new()
    }
}

impl UvTool {
    pub const NAME: &'static str = "UV RollingExpand";

    pub fn new() -> Self {
        Self {
            active: false,
            panel: PanelTransform::default(),
            wire_color: Rgb::from_packed_bgr(DEFAULT_UV_COLOR),
            stroke: None,
            input: InputState::default(),
            edit_options: EditOptions::default(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn panel(&self) -> &PanelTransform {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut PanelTransform {
        &mut self.panel
    }

    pub fn wire_color(&self) -> Rgb {
        self.wire_color
    }

    pub fn shift_held(&self) -> bool {
        self.input.shift_held
    }

    /// Panel-space anchor of the active brush stroke.
    pub fn drag_start(&self) -> Option<Vec2> {
        self.stroke.map(|stroke| stroke.anchor())
    }

    pub fn stroke(&self) -> Option<&BrushStroke> {
        self.stroke.as_ref()
    }

    pub fn gesture(&self) -> Gesture {
        if self.stroke.is_some() {
            return Gesture::Brush;
        }
        match self.input.pointer_drag.map(|drag| drag.mode) {
            Some(DragMode::Pan) => Gesture::Panning,
            Some(DragMode::Zoom) => Gesture::Zooming,
            None => Gesture::Idle,
        }
    }

    /// Turn the tool on or off. Any gesture in progress is dropped without
    /// an undo checkpoint. Returns `on` unchanged.
    pub fn activate<H: Host, S: SettingsStore + ?Sized>(
        &mut self,
        host: &mut H,
        settings: &S,
        on: bool,
    ) -> bool {
        self.active = on;
        if self.stroke.take().is_some() {
            log::debug!("brush stroke dropped by activation change");
        }
        self.input.reset();

        if on {
            self.edit_options = host.edit_options();
            self.wire_color = load_uv_color(settings);
        }

        host.redraw_all_scenes();
        on
    }

    /// Overlay drawing objects for this frame; empty while inactive.
    pub fn draw<D: Document, P: ScreenProjection>(
        &self,
        doc: &D,
        projection: &P,
    ) -> Vec<DrawObject> {
        if !self.active {
            return Vec::new();
        }
        let params = OverlayParams {
            panel: self.panel,
            wire_color: self.wire_color,
            shift_held: self.input.shift_held,
            drag_start: self.drag_start(),
        };
        draw_uv_overlay(doc, projection, &params)
    }

    /// Selected vertices of the editable objects under the captured edit
    /// options.
    pub fn selection<D: Document>(&self, doc: &D) -> Vec<SelectVertex> {
        gather_selection_with(doc, ObjectFilter::ALL, self.edit_options)
    }

    pub fn handle_event<D: Document, H: Host>(
        &mut self,
        doc: &mut D,
        host: &mut H,
        event: &ToolEvent,
    ) -> EventResponse {
        match *event {
            ToolEvent::MouseMove { ref mouse } => self.on_mouse_move(mouse),
            ToolEvent::ButtonDown { button, ref mouse } => match button {
                MouseButton::Left => self.on_left_button_down(doc, mouse),
                MouseButton::Middle => self.on_middle_button_down(mouse),
                MouseButton::Right => self.on_right_button_down(mouse),
            },
            ToolEvent::ButtonMove { button, ref mouse } => match button {
                MouseButton::Left => self.on_left_button_move(doc, host, mouse),
                MouseButton::Middle => self.on_middle_button_move(host, mouse),
                MouseButton::Right => self.on_right_button_move(host, mouse),
            },
            ToolEvent::ButtonUp { button, ref mouse } => match button {
                MouseButton::Left => self.on_left_button_up(host, mouse),
                MouseButton::Middle => self.on_middle_button_up(mouse),
                MouseButton::Right => self.on_right_button_up(mouse),
            },
            ToolEvent::Wheel { ref mouse } => self.on_mouse_wheel(host, mouse),
            ToolEvent::KeyDown { key } => self.on_key_down(host, key),
            ToolEvent::KeyUp { key } => self.on_key_up(host, key),
        }
    }

    pub fn on_mouse_move(&mut self, _mouse: &MouseState) -> EventResponse {
        EventResponse::Ignored
    }

    pub fn on_left_button_down<D: Document>(
        &mut self,
        doc: &D,
        mouse: &MouseState,
    ) -> EventResponse {
        if doc.current_material_index().is_none() {
            log::trace!("brush needs a current material");
            return EventResponse::Ignored;
        }
        if doc.current_object().is_none() {
            log::trace!("brush needs a current object");
            return EventResponse::Ignored;
        }

        let anchor = self.panel.screen_to_panel(mouse.pos.as_vec2());
        self.stroke = Some(BrushStroke::begin(anchor));
        EventResponse::Consumed
    }

    pub fn on_left_button_move<D: Document, H: Host>(
        &mut self,
        doc: &mut D,
        host: &mut H,
        mouse: &MouseState,
    ) -> EventResponse {
        let Some(stroke) = self.stroke.as_mut() else {
            return EventResponse::Ignored;
        };
        let Some(object) = doc.current_object_mut() else {
            return EventResponse::Ignored;
        };

        let cursor = self.panel.screen_to_panel(mouse.pos.as_vec2());
        match stroke.update(object, cursor, self.panel.scale) {
            StrokeUpdate::Degenerate => {}
            StrokeUpdate::Applied { distance, step } => {
                log::trace!("brush distance {:.5} step {:.5}", distance, step);
                host.redraw_scene();
            }
        }
        EventResponse::Consumed
    }

    pub fn on_left_button_up<H: Host>(
        &mut self,
        host: &mut H,
        _mouse: &MouseState,
    ) -> EventResponse {
        if let Some(stroke) = self.stroke.take() {
            if stroke.moved() {
                host.redraw_all_scenes();
                host.update_undo();
            }
        }
        EventResponse::Consumed
    }

    pub fn on_middle_button_down(&mut self, mouse: &MouseState) -> EventResponse {
        self.begin_pointer_drag(DragMode::Pan, mouse)
    }

    pub fn on_middle_button_move<H: Host>(
        &mut self,
        host: &mut H,
        mouse: &MouseState,
    ) -> EventResponse {
        let Some(delta) = self.input.drag_delta(DragMode::Pan, mouse.pos) else {
            return EventResponse::Ignored;
        };
        self.panel.pan(delta.as_vec2());
        host.redraw_scene();
        EventResponse::Consumed
    }

    pub fn on_middle_button_up(&mut self, _mouse: &MouseState) -> EventResponse {
        self.input.end_drag();
        EventResponse::Ignored
    }

    pub fn on_right_button_down(&mut self, mouse: &MouseState) -> EventResponse {
        self.begin_pointer_drag(DragMode::Zoom, mouse)
    }

    pub fn on_right_button_move<H: Host>(
        &mut self,
        host: &mut H,
        mouse: &MouseState,
    ) -> EventResponse {
        let Some(delta) = self.input.drag_delta(DragMode::Zoom, mouse.pos) else {
            return EventResponse::Ignored;
        };
        self.panel.zoom(delta.x as f32);
        host.redraw_scene();
        EventResponse::Consumed
    }

    pub fn on_right_button_up(&mut self, _mouse: &MouseState) -> EventResponse {
        self.input.end_drag();
        EventResponse::Ignored
    }

    pub fn on_mouse_wheel<H: Host>(&mut self, host: &mut H, mouse: &MouseState) -> EventResponse {
        log::debug!("wheel {} shift {}", mouse.wheel, self.input.shift_held);
        if !self.input.shift_held {
            return EventResponse::Ignored;
        }

        let step = if mouse.wheel < 0 {
            -WHEEL_ZOOM_STEP
        } else {
            WHEEL_ZOOM_STEP
        };
        self.panel.zoom(step);
        host.redraw_scene();
        EventResponse::Consumed
    }

    pub fn on_key_down<H: Host>(&mut self, host: &mut H, key: Key) -> EventResponse {
        self.modifier_key(host, key, true)
    }

    pub fn on_key_up<H: Host>(&mut self, host: &mut H, key: Key) -> EventResponse {
        self.modifier_key(host, key, false)
    }

    fn modifier_key<H: Host>(&mut self, host: &mut H, key: Key, pressed: bool) -> EventResponse {
        if !self.input.handle_key(key, pressed) {
            return EventResponse::Ignored;
        }
        host.redraw_all_scenes();
        EventResponse::Consumed
    }

    fn begin_pointer_drag(&mut self, mode: DragMode, mouse: &MouseState) -> EventResponse {
        if !mouse.shift {
            return EventResponse::Ignored;
        }
        self.input.begin_drag(mode, mouse.pos);
        EventResponse::Consumed
    }
}

#[cfg(test)]
mod tests {
    use super::host::RecordingHost;
    use super::*;
    use crate::brush::falloff_weight;
    use crate::render::{DrawKind, OrthoViewport, MIN_ZOOM_SCALE};
    use crate::scene::{unit_quad_object, MemoryDocument, MeshObject};
    use crate::settings::{JsonSettings, UV_COLOR_KEY, UV_COLOR_SECTION};

    fn quad_document() -> MemoryDocument {
        let mut doc = MemoryDocument::new();
        let index = doc.add_object(unit_quad_object("Quad"));
        doc.set_current_object(Some(index));
        doc.set_current_material(Some(0));
        doc
    }

    fn active_tool(host: &mut RecordingHost) -> UvTool {
        let mut tool = UvTool::new();
        assert!(tool.activate(host, &JsonSettings::new(), true));
        tool
    }

    fn quad_uvs(doc: &MemoryDocument) -> Vec<Vec2> {
        doc.current_object().unwrap().face_uvs(0).to_vec()
    }

    #[test]
    fn quad_scenario_commits_undo_on_release() {
        let mut doc = quad_document();
        let mut host = RecordingHost::new();
        let mut tool = active_tool(&mut host);
        let scale = tool.panel().scale;

        // Default panel maps panel (0, 0) to screen (0, 0) and 0.1 to 80 px.
        let down = tool.on_left_button_down(&doc, &MouseState::at(0, 0));
        assert!(down.is_consumed());
        assert_eq!(tool.drag_start(), Some(Vec2::ZERO));
        assert_eq!(tool.gesture(), Gesture::Brush);

        let moved = tool.on_left_button_move(&mut doc, &mut host, &MouseState::at(80, 0));
        assert!(moved.is_consumed());
        let stroke = *tool.stroke().unwrap();
        assert!((stroke.last_distance() - 0.1).abs() < 1e-6);
        assert!(stroke.moved());
        assert_eq!(host.scene_redraws, 1);

        assert_eq!(falloff_weight(0.0, scale, 0.1), 1.0);
        assert!(falloff_weight(Vec2::ONE.length(), scale, 0.1) < 1e-6);
        let uvs = quad_uvs(&doc);
        assert_eq!(uvs[0], Vec2::ZERO);
        assert_eq!(uvs[2], Vec2::ONE);

        let full_before = host.full_redraws;
        let up = tool.on_left_button_up(&mut host, &MouseState::at(80, 0));
        assert!(up.is_consumed());
        assert_eq!(host.undo_checkpoints, 1);
        assert_eq!(host.full_redraws, full_before + 1);
        assert_eq!(tool.drag_start(), None);
        assert_eq!(tool.gesture(), Gesture::Idle);
    }

    #[test]
    fn zoomed_out_stroke_moves_every_corner_radially() {
        let mut doc = quad_document();
        let mut host = RecordingHost::new();
        let mut tool = active_tool(&mut host);
        *tool.panel_mut() = PanelTransform::new(MIN_ZOOM_SCALE, Vec2::ZERO);

        tool.on_left_button_down(&doc, &MouseState::at(0, 0));
        tool.on_left_button_move(&mut doc, &mut host, &MouseState::at(10, 0));

        let uvs = quad_uvs(&doc);
        let weight_edge = falloff_weight(1.0, MIN_ZOOM_SCALE, 0.1);
        let weight_diag = falloff_weight(2.0f32.sqrt(), MIN_ZOOM_SCALE, 0.1);
        assert_eq!(uvs[0], Vec2::ZERO);
        assert!((uvs[1].x - (1.0 + 0.03 * weight_edge)).abs() < 1e-5);
        assert!(uvs[1].y.abs() < 1e-6);
        let diag = 0.03 * weight_diag / 2.0f32.sqrt();
        assert!((uvs[2] - Vec2::splat(1.0 + diag)).length() < 1e-5);
        assert!((uvs[3].y - (1.0 + 0.03 * weight_edge)).abs() < 1e-5);
    }

    #[test]
    fn degenerate_move_changes_nothing_and_skips_undo() {
        let mut doc = quad_document();
        let before = doc.clone();
        let mut host = RecordingHost::new();
        let mut tool = active_tool(&mut host);

        tool.on_left_button_down(&doc, &MouseState::at(40, 40));
        let response = tool.on_left_button_move(&mut doc, &mut host, &MouseState::at(40, 40));
        assert!(response.is_consumed());
        assert_eq!(doc, before);
        assert_eq!(host.scene_redraws, 0);

        tool.on_left_button_up(&mut host, &MouseState::at(40, 40));
        assert_eq!(host.undo_checkpoints, 0);
    }

    #[test]
    fn brush_requires_material_and_object() {
        let mut host = RecordingHost::new();
        let mut tool = active_tool(&mut host);

        let mut doc = quad_document();
        doc.set_current_material(None);
        assert_eq!(
            tool.on_left_button_down(&doc, &MouseState::at(5, 5)),
            EventResponse::Ignored
        );
        assert_eq!(tool.drag_start(), None);

        let mut doc = quad_document();
        doc.set_current_object(None);
        assert_eq!(
            tool.on_left_button_down(&doc, &MouseState::at(5, 5)),
            EventResponse::Ignored
        );
        assert_eq!(
            tool.on_left_button_move(&mut doc, &mut host, &MouseState::at(50, 5)),
            EventResponse::Ignored
        );
        assert_eq!(tool.gesture(), Gesture::Idle);
    }

    #[test]
    fn deactivation_mid_drag_drops_stroke_without_undo() {
        let mut doc = quad_document();
        let mut host = RecordingHost::new();
        let mut tool = active_tool(&mut host);
        *tool.panel_mut() = PanelTransform::new(MIN_ZOOM_SCALE, Vec2::ZERO);

        tool.on_left_button_down(&doc, &MouseState::at(0, 0));
        tool.on_left_button_move(&mut doc, &mut host, &MouseState::at(20, 0));
        let edited = doc.clone();

        assert!(!tool.activate(&mut host, &JsonSettings::new(), false));
        assert_eq!(tool.drag_start(), None);
        assert_eq!(host.undo_checkpoints, 0);

        // Release after deactivation must not commit either.
        tool.on_left_button_up(&mut host, &MouseState::at(20, 0));
        assert_eq!(host.undo_checkpoints, 0);
        assert_eq!(doc, edited);
    }

    #[test]
    fn shift_middle_drag_pans() {
        let mut doc = quad_document();
        let mut host = RecordingHost::new();
        let mut tool = active_tool(&mut host);

        let plain = tool.on_middle_button_down(&MouseState::at(10, 10));
        assert_eq!(plain, EventResponse::Ignored);
        assert_eq!(
            tool.on_middle_button_move(&mut host, &MouseState::at(12, 12)),
            EventResponse::Ignored
        );

        let events = [
            ToolEvent::ButtonDown {
                button: MouseButton::Middle,
                mouse: MouseState::at(10, 10).with_shift(),
            },
            ToolEvent::ButtonMove {
                button: MouseButton::Middle,
                mouse: MouseState::at(15, 7),
            },
            ToolEvent::ButtonMove {
                button: MouseButton::Middle,
                mouse: MouseState::at(25, 9),
            },
        ];
        for event in &events {
            assert!(tool.handle_event(&mut doc, &mut host, event).is_consumed());
        }
        assert_eq!(tool.gesture(), Gesture::Panning);
        assert_eq!(tool.panel().offset, Vec2::new(15.0, -1.0));

        // Right-button motion does not zoom during a pan.
        assert_eq!(
            tool.on_right_button_move(&mut host, &MouseState::at(100, 9)),
            EventResponse::Ignored
        );

        let up = tool.on_middle_button_up(&MouseState::at(25, 9));
        assert_eq!(up, EventResponse::Ignored);
        assert_eq!(tool.gesture(), Gesture::Idle);
    }

    #[test]
    fn shift_right_drag_zooms_horizontally() {
        let mut host = RecordingHost::new();
        let mut tool = active_tool(&mut host);

        tool.on_right_button_down(&MouseState::at(100, 100).with_shift());
        assert_eq!(tool.gesture(), Gesture::Zooming);
        tool.on_right_button_move(&mut host, &MouseState::at(160, 20));
        assert_eq!(tool.panel().scale, 860.0);
        assert_eq!(tool.panel().offset, Vec2::splat(-30.0));

        tool.on_right_button_move(&mut host, &MouseState::at(-5000, 20));
        assert_eq!(tool.panel().scale, MIN_ZOOM_SCALE);
        tool.on_right_button_up(&MouseState::at(-5000, 20));
        assert_eq!(tool.gesture(), Gesture::Idle);
    }

    #[test]
    fn wheel_zoom_needs_shift_key() {
        let mut host = RecordingHost::new();
        let mut tool = active_tool(&mut host);

        let wheel_down = MouseState::at(0, 0).with_wheel(-120);
        assert_eq!(tool.on_mouse_wheel(&mut host, &wheel_down), EventResponse::Ignored);

        let redraws = host.full_redraws;
        assert!(tool.on_key_down(&mut host, Key::Shift).is_consumed());
        assert_eq!(host.full_redraws, redraws + 1);
        assert_eq!(tool.on_key_down(&mut host, Key::Shift), EventResponse::Ignored);

        assert!(tool.on_mouse_wheel(&mut host, &wheel_down).is_consumed());
        assert_eq!(tool.panel().scale, 740.0);
        let wheel_up = MouseState::at(0, 0).with_wheel(120);
        tool.on_mouse_wheel(&mut host, &wheel_up);
        tool.on_mouse_wheel(&mut host, &wheel_up);
        assert_eq!(tool.panel().scale, 860.0);

        assert!(tool.on_key_up(&mut host, Key::Shift).is_consumed());
        assert_eq!(tool.on_key_up(&mut host, Key::Other(17)), EventResponse::Ignored);
        assert!(!tool.shift_held());
    }

    #[test]
    fn draw_reflects_state() {
        let doc = quad_document();
        let viewport = OrthoViewport::looking_down_z(800, 600, 1.0);
        let mut host = RecordingHost::new();
        let mut tool = UvTool::new();
        assert!(tool.draw(&doc, &viewport).is_empty());

        let mut settings = JsonSettings::new();
        settings.set_u32(UV_COLOR_SECTION, UV_COLOR_KEY, 0x00FF0000);
        tool.activate(&mut host, &settings, true);
        assert_eq!(tool.wire_color(), Rgb::new(0.0, 0.0, 1.0));

        let idle = tool.draw(&doc, &viewport);
        assert_eq!(idle.len(), 2);
        assert_eq!(idle[1].color(), Some(Rgb::new(0.0, 0.0, 1.0)));

        tool.on_key_down(&mut host, Key::Shift);
        tool.on_left_button_down(&doc, &MouseState::at(400, 300));
        let busy = tool.draw(&doc, &viewport);
        assert_eq!(busy.len(), 4);
        assert!(busy[2..].iter().all(|object| object.kind() == DrawKind::Point));
    }

    #[test]
    fn panel_survives_reactivation() {
        let mut host = RecordingHost::new();
        let mut tool = active_tool(&mut host);
        tool.on_key_down(&mut host, Key::Shift);
        tool.on_mouse_wheel(&mut host, &MouseState::at(0, 0).with_wheel(1));

        tool.activate(&mut host, &JsonSettings::new(), false);
        tool.activate(&mut host, &JsonSettings::new(), true);
        assert_eq!(tool.panel().scale, 860.0);
        assert!(!tool.shift_held());
    }

    #[test]
    fn selection_honors_captured_edit_options() {
        let mut doc = quad_document();
        doc.add_object(unit_quad_object("Other"));
        doc.add_select_face(0, 0);
        doc.add_select_face(1, 0);

        let mut host = RecordingHost::new();
        host.edit_options.current_object_only = true;
        let tool = active_tool(&mut host);
        let selected = tool.selection(&doc);
        assert_eq!(selected.len(), 4);
        assert!(selected.iter().all(|v| v.object == 0));
    }
}
