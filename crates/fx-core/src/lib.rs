pub mod clock;
pub mod constants;
pub mod driver;
pub mod error;
pub mod gl;
pub mod liquid;
pub mod shader;
pub mod state;
pub mod trail;

pub use clock::*;
pub use driver::*;
pub use error::*;
pub use gl::*;
pub use liquid::*;
pub use shader::*;
pub use state::*;
pub use trail::*;

// Shaders bundled as string constants
pub static LIQUID_VERT: &str = include_str!("../shaders/liquid.vert");
pub static LIQUID_FRAG: &str = include_str!("../shaders/liquid.frag");
pub static TRAIL_VERT: &str = include_str!("../shaders/trail.vert");
pub static TRAIL_FRAG: &str = include_str!("../shaders/trail.frag");
