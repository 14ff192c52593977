//! Pointer, wheel and form-input math shared by both viewers.

use crate::constants::DRAG_ROTATE_SPEED;
use glam::{Vec2, Vec3};

/// Click-drag orbiting of the parts group.
#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub active: bool,
    pub last: Vec2,
}

impl DragState {
    pub fn begin(&mut self, x: f32, y: f32) {
        self.active = true;
        self.last = Vec2::new(x, y);
    }

    /// Rotation delta (x, y) in radians for a move to `(x, y)`, or `None`
    /// when no drag is in progress.
    pub fn drag_to(&mut self, x: f32, y: f32) -> Option<Vec2> {
        if !self.active {
            return None;
        }
        let delta = Vec2::new(x, y) - self.last;
        self.last = Vec2::new(x, y);
        Some(Vec2::new(delta.y, delta.x) * DRAG_ROTATE_SPEED)
    }

    pub fn end(&mut self) {
        self.active = false;
    }
}

/// Apply a drag delta from [`DragState::drag_to`] to a rotation.
#[inline]
pub fn apply_orbit(rotation: &mut Vec3, delta: Vec2) {
    rotation.x += delta.x;
    rotation.y += delta.y;
}

/// Camera distance along Z, clamped to a range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomState {
    pub current: f32,
    pub min: f32,
    pub max: f32,
    pub wheel_step: f32,
}

impl ZoomState {
    pub fn new(current: f32, min: f32, max: f32, wheel_step: f32) -> Self {
        Self {
            current: current.clamp(min, max),
            min,
            max,
            wheel_step,
        }
    }

    pub fn set(&mut self, value: f32) -> f32 {
        self.current = value.clamp(self.min, self.max);
        self.current
    }

    /// One wheel notch: positive `delta_y` zooms out.
    pub fn wheel(&mut self, delta_y: f64) -> f32 {
        let dir = if delta_y > 0.0 { 1.0 } else { -1.0 };
        self.set(self.current + dir * self.wheel_step)
    }
}

/// Two-finger pinch relative to the distance when it began.
#[derive(Default, Clone, Copy, Debug)]
pub struct PinchState {
    pub initial_distance: f32,
    pub initial_zoom: f32,
}

impl PinchState {
    pub fn begin(&mut self, a: Vec2, b: Vec2, zoom: f32) {
        self.initial_distance = a.distance(b);
        self.initial_zoom = zoom;
    }

    /// Zoom value for the current finger positions, unclamped.
    pub fn zoom_for(&self, a: Vec2, b: Vec2) -> Option<f32> {
        let d = a.distance(b);
        if self.initial_distance <= f32::EPSILON || d <= f32::EPSILON {
            return None;
        }
        Some(self.initial_zoom / (d / self.initial_distance))
    }
}

/// Leading-number parse in the style of form inputs: `"12.5mm"` is 12.5,
/// garbage is `None`.
pub fn parse_leading_float(s: &str) -> Option<f32> {
    let s = s.trim_start();
    let mut end = 0;
    let mut best = None;
    for (i, c) in s.char_indices() {
        if !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')) {
            break;
        }
        end = i + c.len_utf8();
        if let Ok(v) = s[..end].parse::<f32>() {
            best = Some(v);
        }
    }
    best.filter(|v| v.is_finite())
}

/// Parse a form value, falling back to `default` for garbage *and* for 0.
pub fn number_or(s: &str, default: f32) -> f32 {
    match parse_leading_float(s) {
        Some(v) if v != 0.0 => v,
        _ => default,
    }
}

/// Idle bob height of the displayed model.
#[inline]
pub fn float_offset(time_sec: f32, frequency: f32, amplitude: f32) -> f32 {
    (time_sec * frequency).sin() * amplitude
}
