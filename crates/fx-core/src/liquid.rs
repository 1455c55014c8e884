//! Swirling liquid background: a full-screen quad whose fragment shader is fed
//! resolution, time and pointer every frame.

use crate::clock::ShaderClock;
use crate::constants::*;
use crate::driver::Animation;
use crate::error::RenderError;
use crate::gl::{BufferUsage, GlBackend, Primitive};
use crate::shader::{ShaderProgram, VertexBuffer};
use crate::state::{PointerState, Surface, SurfaceState, ViewportState};
use crate::{LIQUID_FRAG, LIQUID_VERT};

/// Shader sources for the liquid scene.
#[derive(Clone, Debug)]
pub struct LiquidParams {
    pub vertex_src: &'static str,
    pub fragment_src: &'static str,
}

impl Default for LiquidParams {
    fn default() -> Self {
        Self {
            vertex_src: LIQUID_VERT,
            fragment_src: LIQUID_FRAG,
        }
    }
}

struct LiquidPipeline<G: GlBackend> {
    program: ShaderProgram<G>,
    quad: VertexBuffer<G>,
    a_position: Option<u32>,
    u_resolution: Option<G::UniformLocation>,
    u_time: Option<G::UniformLocation>,
    u_mouse: Option<G::UniformLocation>,
}

impl<G: GlBackend> LiquidPipeline<G> {
    /// Build, logging instead of failing; `None` leaves the scene blank.
    fn create(gl: &G, params: &LiquidParams) -> Option<Self> {
        match Self::new(gl, params) {
            Ok(p) => {
                if p.a_position.is_none() {
                    log::warn!("[liquid] program has no `{}` attribute", A_POSITION);
                }
                Some(p)
            }
            Err(e) => {
                log::error!("[liquid] pipeline disabled: {}", e);
                None
            }
        }
    }

    fn new(gl: &G, params: &LiquidParams) -> Result<Self, RenderError> {
        let program = ShaderProgram::build(gl, params.vertex_src, params.fragment_src)?;
        let quad = VertexBuffer::new(gl)?;
        quad.bind();
        gl.array_buffer_data(bytemuck::cast_slice(FULLSCREEN_QUAD.as_slice()), BufferUsage::Static);
        Ok(Self {
            a_position: program.attrib_location(A_POSITION),
            u_resolution: program.uniform_location(U_RESOLUTION),
            u_time: program.uniform_location(U_TIME),
            u_mouse: program.uniform_location(U_MOUSE),
            program,
            quad,
        })
    }
}

pub struct LiquidScene<G: GlBackend, S: Surface> {
    gl: G,
    surface: S,
    // None when the shaders failed to build; frames then draw nothing
    pipeline: Option<LiquidPipeline<G>>,
    params: LiquidParams,
    state: SurfaceState,
    clock: ShaderClock,
    // between context loss and restore
    suspended: bool,
}

impl<G: GlBackend, S: Surface> LiquidScene<G, S> {
    /// Build the scene. A shader or buffer failure is logged and leaves the
    /// scene in a non-drawing state instead of failing.
    pub fn new(gl: G, surface: S, params: LiquidParams) -> Self {
        Self {
            pipeline: LiquidPipeline::create(&gl, &params),
            gl,
            surface,
            params,
            state: SurfaceState::new(),
            clock: ShaderClock::new(),
            suspended: false,
        }
    }

    pub fn is_renderable(&self) -> bool {
        self.pipeline.is_some()
    }

    pub fn on_pointer_move(&mut self, raw_x: f32, raw_y: f32) {
        self.state.on_pointer_move(&self.surface, raw_x, raw_y);
    }

    pub fn sync_viewport(&mut self) -> bool {
        self.state.sync_viewport(&self.surface, &self.gl)
    }

    pub fn pointer(&self) -> PointerState {
        self.state.pointer()
    }

    pub fn viewport(&self) -> ViewportState {
        self.state.viewport()
    }

}

impl<G: GlBackend, S: Surface> Animation for LiquidScene<G, S> {
    fn frame(&mut self, timestamp_ms: f64) -> Result<(), RenderError> {
        let time = self.clock.advance(timestamp_ms);
        if self.suspended {
            return Ok(());
        }
        if self.gl.is_context_lost() {
            return Err(RenderError::ContextLost);
        }
        self.state.sync_viewport(&self.surface, &self.gl);

        let Some(p) = &self.pipeline else {
            return Ok(());
        };
        let gl = &self.gl;
        p.program.bind();
        p.quad.bind();
        if let Some(loc) = p.a_position {
            gl.enable_vertex_attrib_array(loc);
            gl.vertex_attrib_pointer_f32(loc, 2, 0, 0);
        }

        let vp = self.state.viewport();
        let mouse = self.state.pointer();
        gl.uniform2f(p.u_resolution.as_ref(), vp.width as f32, vp.height as f32);
        gl.uniform1f(p.u_time.as_ref(), time);
        gl.uniform2f(p.u_mouse.as_ref(), mouse.x, mouse.y);

        gl.draw_arrays(Primitive::Triangles, 0, QUAD_VERTEX_COUNT);
        Ok(())
    }

    fn context_lost(&mut self) {
        self.pipeline = None;
        self.suspended = true;
    }

    fn context_restored(&mut self) {
        self.pipeline = LiquidPipeline::create(&self.gl, &self.params);
        self.state.reset_gl();
        self.suspended = false;
    }
}
