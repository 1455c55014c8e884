use crate::constants::TIME_SCALE;

/// Converts animation-frame timestamps into the shader's `u_time`.
///
/// The scale is a pacing constant the shader was tuned against, not a unit
/// conversion. The value never goes backwards while the loop runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShaderClock {
    current: f32,
}

impl ShaderClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, timestamp_ms: f64) -> f32 {
        let t = (timestamp_ms * TIME_SCALE) as f32;
        if t > self.current {
            self.current = t;
        }
        self.current
    }

    pub fn current(&self) -> f32 {
        self.current
    }
}
