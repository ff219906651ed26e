// DOM-facing constants for the web frontend.

// Class sets toggled on the nav element
pub const NAV_HIDDEN_CLASSES: [&str; 3] = ["opacity-0", "-translate-y-4", "pointer-events-none"];
pub const NAV_SHOWN_CLASSES: [&str; 3] = ["opacity-100", "translate-y-0", "pointer-events-auto"];

// Backdrop canvas created at startup
pub const CANVAS_ID: &str = "starfield-canvas";
pub const CANVAS_STYLE: &str =
    "position:fixed;top:0;left:0;width:100vw;height:100vh;z-index:-1;pointer-events:none";

// Anchor links that scroll smoothly instead of jumping
pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

// Renderer
pub const MAX_POINT_PX: f32 = 64.0; // largest sprite diameter in physical pixels
