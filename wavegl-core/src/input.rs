/// Mapping of pointer and keyboard input onto the transform state
use crate::transform::TransformState;

/// Screen pixels of drag per world unit of translation
pub const DRAG_PIXELS_PER_UNIT: f32 = 100.0;
/// Translation along Z per scroll-wheel tick
pub const SCROLL_STEP: f32 = 0.25;

/// Mouse buttons held during a drag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PointerButtons {
    pub primary: bool,
    pub secondary: bool,
}

impl PointerButtons {
    pub const NONE: Self = Self {
        primary: false,
        secondary: false,
    };
    pub const PRIMARY: Self = Self {
        primary: true,
        secondary: false,
    };
    pub const SECONDARY: Self = Self {
        primary: false,
        secondary: true,
    };
}

/// Apply a pointer drag
///
/// The primary button pans (screen Y points down, world Y points up), the
/// secondary button orbits. Primary takes precedence when both are held.
pub fn apply_drag(state: &mut TransformState, dx: f32, dy: f32, buttons: PointerButtons) {
    if buttons.primary {
        state
            .translation
            .translate(dx / DRAG_PIXELS_PER_UNIT, -dy / DRAG_PIXELS_PER_UNIT, 0.0);
    } else if buttons.secondary {
        state.rotation.rotate(dy, dx);
    }
}

/// Apply scroll-wheel ticks, regardless of held buttons
pub fn apply_scroll(state: &mut TransformState, ticks: f32) {
    state.translation.translate(0.0, 0.0, ticks * SCROLL_STEP);
}

/// Turns absolute pointer positions into drag deltas
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerTracker {
    last: (f32, f32),
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-anchor on a move, press or scroll without producing a delta
    pub fn anchor(&mut self, x: f32, y: f32) {
        self.last = (x, y);
    }

    /// Delta since the previous position; the new position becomes the anchor
    pub fn drag_to(&mut self, x: f32, y: f32) -> (f32, f32) {
        let delta = (x - self.last.0, y - self.last.1);
        self.last = (x, y);
        delta
    }
}

/// Keyboard commands understood by the frontends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Switch between accelerator and host vertex generation
    ToggleStrategy,
    Quit,
}

impl KeyCommand {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            't' => Some(Self::ToggleStrategy),
            'q' => Some(Self::Quit),
            _ => None,
        }
    }
}
