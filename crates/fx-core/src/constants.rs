// Shared tuning constants for the hero effects.

// Liquid shader
pub const TIME_SCALE: f64 = 0.0005; // raw rAF timestamp (ms) -> shader time units
pub const QUAD_VERTEX_COUNT: i32 = 6; // two triangles covering clip space
pub const FULLSCREEN_QUAD: [[f32; 2]; 6] = [
    [-1.0, -1.0],
    [1.0, -1.0],
    [-1.0, 1.0],
    [-1.0, 1.0],
    [1.0, -1.0],
    [1.0, 1.0],
];

// Shader interface names (must match the GLSL sources verbatim)
pub const A_POSITION: &str = "a_position";
pub const U_TIME: &str = "u_time";
pub const U_RESOLUTION: &str = "u_resolution";
pub const U_MOUSE: &str = "u_mouse";

// Spring trail
pub const TRAIL_LINE_COUNT: usize = 5;
pub const TRAIL_POINTS_PER_LINE: usize = 20;
pub const TRAIL_SPRING: f32 = 0.06; // pull of the head toward the pointer
pub const TRAIL_FRICTION: f32 = 0.85; // velocity retained per frame
pub const TRAIL_FOLLOW: f32 = 0.9; // lerp factor of each point toward its predecessor
pub const TRAIL_THICKNESS: f32 = 20.0; // CSS pixels at the thickest point
pub const TRAIL_DPR: f32 = 2.0; // backing-buffer scale of the trail canvas

pub const TRAIL_COLORS: [[f32; 3]; TRAIL_LINE_COUNT] = [
    [1.0, 0.0, 0.0], // #ff0000
    [0.0, 1.0, 0.0], // #00ff00
    [0.0, 0.0, 1.0], // #0000ff
    [1.0, 1.0, 0.0], // #ffff00
    [0.0, 1.0, 1.0], // #00ffff
];

// Frame driver
pub const FAULT_LOG_EVERY: u64 = 120; // after the first fault, log one in N
