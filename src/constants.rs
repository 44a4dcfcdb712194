pub const RENDER_WIDTH: i32 = 1920;           // Width of the render texture
pub const RENDER_HEIGHT: i32 = 1080;          // Height of the render texture
pub const FPS: u32 = 60;                      // Frames per second
pub const FRAME_TIME: f32 = 1.0 / FPS as f32; // Time per frame (seconds)

pub const TRANSITION_DURATION: f32 = 0.7;     // Cross-fade between slides (seconds)
pub const INACTIVE_SCALE: f32 = 0.98;         // Scale of hidden slides when the policy scales
pub const FRAME_PADDING: f32 = 32.0;          // Padding around the letterboxed image (pixels)

pub const RICH_TICK_MS: u64 = 2000;           // Auto-play interval, rich policy
pub const SIMPLE_TICK_MS: u64 = 4000;         // Auto-play interval, simple policy
pub const COOLDOWN_MS: u64 = 2000;            // Auto-play suppression after manual navigation

pub const DEFAULT_ASSET_DIR: &str = "assets";
pub const PLACEHOLDER_FILE: &str = "placeholder.png";
pub const DEFAULT_SLIDE_COUNT: u32 = 6;
