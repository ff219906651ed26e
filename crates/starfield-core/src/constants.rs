// Shared tuning constants for the starfield backdrop and the nav controller.

// Simulation clock
pub const TIME_STEP: f32 = 0.01; // simulation seconds added per tick (not wall clock)

// Damping factors applied once per tick
pub const POINTER_DAMPING: f32 = 0.02; // smoothed pointer chases the raw target
pub const CAMERA_DAMPING: f32 = 0.05; // camera x/y chase the pointer-derived target

// Pointer mapping
pub const POINTER_HALF_RANGE: f32 = 10.0; // raw target spans [-10, 10] on each axis

// Twinkle: size = base * (sin(t * (TWINKLE_RATE_BASE + L) + i * TWINKLE_PHASE_STEP) * AMP + MID)
pub const TWINKLE_RATE_BASE: f32 = 2.0;
pub const TWINKLE_PHASE_STEP: f32 = 0.1;
pub const TWINKLE_AMPLITUDE: f32 = 0.3;
pub const TWINKLE_MIDPOINT: f32 = 0.7;

// Parallax: layer L moves by PARALLAX_BASE + PARALLAX_STEP * L world units per pointer unit
pub const PARALLAX_BASE: f32 = 10.0;
pub const PARALLAX_STEP: f32 = 5.0;

// Rotation about z is this fraction of the x rate
pub const ROTATION_Z_FROM_X: f32 = 0.5;

// Camera
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 5000.0;
pub const CAMERA_REST_Z: f32 = 1000.0; // dolly centre
pub const CAMERA_POINTER_GAIN: f32 = 150.0; // world units per pointer unit
pub const CAMERA_BREATH_RATE: f32 = 0.1; // radians of breathing phase per simulation second
pub const CAMERA_BREATH_DEPTH: f32 = 50.0; // dolly amplitude in world units

// Render surface
pub const MAX_PIXEL_RATIO: f64 = 2.0;
pub const CLEAR_COLOR: [f32; 3] = [10.0 / 255.0, 10.0 / 255.0, 15.0 / 255.0]; // #0a0a0f

// Nav controller
pub const NAV_BREAKPOINT_PX: f64 = 768.0; // below this width the nav is disabled
pub const NAV_HIDE_RATIO: f32 = 0.1; // hero ratio above which the nav stays hidden
pub const NAV_OBSERVER_THRESHOLDS: [f32; 4] = [0.0, 0.1, 0.5, 1.0];
pub const NAV_REVEAL_DELAY_MS: u32 = 10; // layout settle time before the fade-in classes flip

// Page elements
pub const HERO_ELEMENT_ID: &str = "home-hero";
pub const NAV_ELEMENT_ID: &str = "mainNav";
pub const PROTECTED_LINK_ID: &str = "zaenalos-vm";
pub const PROTECTED_LINK_NOTICE: &str = "Sorry, but this is a private project.";
