//! View-side state shared with the web frontend: camera and per-viewer
//! configuration.
//!
//! These types avoid platform APIs; the web crate turns them into uniforms.

use crate::constants::*;
use glam::{Mat4, Vec3};

/// Perspective camera whose orientation is fixed at its initial look-at.
///
/// Moving `eye` translates the camera without re-aiming it, which is how the
/// camera position inputs behave on the product pages.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Camera at `eye` looking at `target`.
    pub fn looking_at(eye: Vec3, target: Vec3) -> Self {
        Self {
            eye,
            forward: (target - eye).try_normalize().unwrap_or(Vec3::NEG_Z),
            up: Vec3::Y,
            aspect: 1.0,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.eye, self.forward, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3, // points from the light towards the scene
    pub intensity: f32,
}

impl DirectionalLight {
    pub const fn from_position(position: Vec3, intensity: f32) -> Self {
        // Lights aim at the origin.
        Self {
            direction: Vec3::new(-position.x, -position.y, -position.z),
            intensity,
        }
    }
}

/// Static per-viewer settings.
#[derive(Clone, Copy, Debug)]
pub struct ViewerConfig {
    pub background: u32,
    pub camera_eye: Vec3,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub default_zoom: f32,
    pub wheel_step: f32,
    pub ambient: f32,
    pub lights: &'static [DirectionalLight],
    pub exposure: f32,
    pub asset_base: &'static str,
}

pub const LAMP_CONFIG: ViewerConfig = ViewerConfig {
    background: 0x333333,
    camera_eye: LAMP_CAMERA_EYE,
    min_zoom: LAMP_MIN_ZOOM,
    max_zoom: LAMP_MAX_ZOOM,
    default_zoom: LAMP_DEFAULT_ZOOM,
    wheel_step: LAMP_WHEEL_STEP,
    ambient: 0.2,
    lights: &[
        DirectionalLight::from_position(Vec3::new(20.0, 30.0, 20.0), 0.8), // key
        DirectionalLight::from_position(Vec3::new(-20.0, 15.0, -15.0), 0.3), // fill
    ],
    exposure: TONE_MAPPING_EXPOSURE,
    asset_base: "../3d-files",
};

pub const CONNECTOR_CONFIG: ViewerConfig = ViewerConfig {
    background: 0xffffff,
    camera_eye: CONNECTOR_CAMERA_EYE,
    min_zoom: CONNECTOR_MIN_ZOOM,
    max_zoom: CONNECTOR_MAX_ZOOM,
    default_zoom: CONNECTOR_DEFAULT_ZOOM,
    wheel_step: CONNECTOR_WHEEL_STEP,
    ambient: 0.15,
    lights: &[
        DirectionalLight::from_position(Vec3::new(15.0, 20.0, 15.0), 0.683), // key
        DirectionalLight::from_position(Vec3::new(-15.0, 10.0, -10.0), 0.243514), // fill
        DirectionalLight::from_position(Vec3::new(0.0, -5.0, -15.0), 0.15), // rim
    ],
    exposure: TONE_MAPPING_EXPOSURE,
    asset_base: ".",
};

impl ViewerConfig {
    pub fn default_camera(&self) -> Camera {
        Camera::looking_at(self.camera_eye, Vec3::ZERO)
    }
}
