use glam::Vec3;

// Shared layout/animation tuning constants used by both viewers.

// Lamp layout
pub const LAMP_SPACING: f32 = 15.0; // distance between parts along X
pub const LAMP_PART_SCALE: f32 = 0.3; // uniform scale applied to every lamp part

// Connector layout
pub const CONNECTOR_TARGET_SIZE: f32 = 10.0; // largest bounding-box dimension after scaling
pub const CONNECTOR_STATIC_Z: f32 = 0.0;
pub const CONNECTOR_MOVING_Z: f32 = 8.0; // moving half starts here, same as SNAP_START_DEPTH

// Snap animation
pub const SNAP_DURATION_SEC: f64 = 2.0;
pub const SNAP_START_DEPTH: f32 = 8.0; // far away
pub const SNAP_MATED_DEPTH: f32 = 5.3; // connected
pub const SNAP_APPROACH_END: f32 = 0.6; // fraction of progress
pub const SNAP_HOLD_END: f32 = 0.7;
pub const SNAP_INITIAL_DELAY_SEC: f64 = 1.0; // after the pair is assembled
pub const SNAP_LOOP_DELAY_SEC: f64 = 2.0; // pause between cycles

// Idle motion (connector viewer)
pub const FLOAT_FREQUENCY: f32 = 0.5; // rad/s
pub const FLOAT_AMPLITUDE: f32 = 0.3;
pub const DEFAULT_ROTATION_SPEED: f32 = 0.5;

// Interaction
pub const DRAG_ROTATE_SPEED: f32 = 0.01; // radians per pixel
pub const LAMP_WHEEL_STEP: f32 = 2.0;
pub const CONNECTOR_WHEEL_STEP: f32 = 0.5; // zoomSpeed 0.1 * 5

// Zoom ranges (camera z)
pub const LAMP_MIN_ZOOM: f32 = 20.0;
pub const LAMP_MAX_ZOOM: f32 = 100.0;
pub const LAMP_DEFAULT_ZOOM: f32 = 50.0;
pub const CONNECTOR_MIN_ZOOM: f32 = 10.0;
pub const CONNECTOR_MAX_ZOOM: f32 = 50.0;
pub const CONNECTOR_DEFAULT_ZOOM: f32 = 25.0;

// Cameras
pub const CAMERA_FOVY_DEG: f32 = 60.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const LAMP_CAMERA_EYE: Vec3 = Vec3::new(0.0, 20.0, 50.0);
pub const CONNECTOR_CAMERA_EYE: Vec3 = Vec3::new(0.0, 8.0, 25.0);

// Persistence keys
pub const TRANSFORMS_STORAGE_KEY: &str = "lampy_part_transforms";
pub const CAMERA_STORAGE_KEY: &str = "lampy_camera_settings";

// Loading progress (percent)
pub const LOAD_PROGRESS_START: f32 = 55.0;
pub const LOAD_PROGRESS_END: f32 = 95.0;

// Tone mapping
pub const TONE_MAPPING_EXPOSURE: f32 = 0.85;
