use glam::IVec2;

/// Pointer state delivered with every mouse event.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MouseState {
    /// Cursor position in screen pixels.
    pub pos: IVec2,
    /// Shift held according to the host at the time of the event.
    #[serde(default)]
    pub shift: bool,
    /// Wheel rotation, negative toward the user.
    #[serde(default)]
    pub wheel: i32,
}

impl MouseState {
    pub fn at(x: i32, y: i32) -> Self {
        Self {
            pos: IVec2::new(x, y),
            ..Self::default()
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_wheel(mut self, wheel: i32) -> Self {
        self.wheel = wheel;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Shift,
    Other(u32),
}

/// One input callback from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ToolEvent {
    MouseMove { mouse: MouseState },
    ButtonDown { button: MouseButton, mouse: MouseState },
    ButtonMove { button: MouseButton, mouse: MouseState },
    ButtonUp { button: MouseButton, mouse: MouseState },
    Wheel { mouse: MouseState },
    KeyDown { key: Key },
    KeyUp { key: Key },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Pan,
    Zoom,
}

/// Middle/right button drag in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerDrag {
    pub mode: DragMode,
    pub last: IVec2,
}

/// What the tool is currently doing with the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Idle,
    Brush,
    Panning,
    Zooming,
}

#[derive(Default, Debug, Clone, Copy)]
pub struct InputState {
    pub shift_held: bool,
    pub pointer_drag: Option<PointerDrag>,
}

impl InputState {
    /// Track modifier keys. Returns true when the modifier state changed.
    pub fn handle_key(&mut self, key: Key, pressed: bool) -> bool {
        match key {
            Key::Shift if self.shift_held != pressed => {
                self.shift_held = pressed;
                true
            }
            _ => false,
        }
    }

    pub fn begin_drag(&mut self, mode: DragMode, pos: IVec2) {
        self.pointer_drag = Some(PointerDrag { mode, last: pos });
    }

    /// Screen delta since the last recorded point of a `mode` drag, recording
    /// `pos` as the new point. `None` when no such drag is active.
    pub fn drag_delta(&mut self, mode: DragMode, pos: IVec2) -> Option<IVec2> {
        let drag = self.pointer_drag.as_mut().filter(|drag| drag.mode == mode)?;
        let delta = pos - drag.last;
        drag.last = pos;
        Some(delta)
    }

    pub fn end_drag(&mut self) {
        self.pointer_drag = None;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
