// Viewer tuning constants shared by the web and native front-ends.

// Frame fitting
pub const CANONICAL_SIZE: f32 = 2.0; // largest dimension of a fitted model, world units
pub const INITIAL_DISTANCE_MULTIPLIER: f32 = 1000.0; // raw camera seed = largest extent * this

// Pointer orbit
pub const POINTER_SENSITIVITY: f32 = 0.5; // full-width sweep = π * sensitivity radians each side

// Motion smoothing
pub const SMOOTHING_FACTOR: f32 = 0.1; // fraction of the remaining gap closed per tick
pub const SMOOTHING_REFERENCE_HZ: f32 = 60.0; // refresh rate the factor was tuned at

// Zoom
pub const ZOOM_SPEED: f32 = 0.0005; // distance units per wheel pixel
pub const MIN_ZOOM: f32 = 2.0;
pub const MAX_ZOOM: f32 = 5.0;
pub const WHEEL_LINE_PX: f32 = 16.0; // pixels per wheel "line" when the host reports lines

// Camera
pub const CAMERA_FOV_Y_DEGREES: f32 = 75.0;
pub const CAMERA_Z_NEAR: f32 = 0.1;
pub const CAMERA_Z_FAR: f32 = 1000.0;
pub const CAMERA_START_DISTANCE: f32 = 5.0; // before any model is fitted

// Scene (colors are sRGB as written in hex)
pub const BACKGROUND_RGB: [f32; 3] = [0.949, 0.949, 0.949]; // #F2F2F2
pub const AMBIENT_RGB: [f32; 3] = [1.0, 1.0, 1.0];
pub const AMBIENT_INTENSITY: f32 = 0.8;
pub const DIRECTIONAL_RGB: [f32; 3] = [1.0, 1.0, 1.0];
pub const DIRECTIONAL_INTENSITY: f32 = 1.0;
pub const DIRECTIONAL_POSITION: [f32; 3] = [5.0, 10.0, 7.0]; // light shines from here toward the origin
pub const HEMISPHERE_SKY_RGB: [f32; 3] = [1.0, 1.0, 0.733]; // #FFFFBB
pub const HEMISPHERE_GROUND_RGB: [f32; 3] = [0.031, 0.031, 0.125]; // #080820
pub const HEMISPHERE_INTENSITY: f32 = 0.5;

// Default asset reference
pub const DEFAULT_MODEL_REFERENCE: &str = "assets/model.glb";
