//! Spring-physics pointer trail: a few tapered lines whose heads chase the
//! pointer and whose bodies follow the head.

use crate::constants::*;
use crate::driver::Animation;
use crate::error::RenderError;
use crate::gl::{BufferUsage, GlBackend, Primitive};
use crate::shader::{ShaderProgram, VertexBuffer};
use crate::state::{Surface, SurfaceRect, SurfaceState};
use crate::{TRAIL_FRAG, TRAIL_VERT};
use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use smallvec::SmallVec;

#[derive(Clone, Debug)]
pub struct TrailParams {
    pub lines: usize,
    pub points_per_line: usize,
    pub spring: f32,
    pub friction: f32,
    pub follow: f32,
    pub thickness: f32,
    pub dpr: f32,
    pub colors: Vec<[f32; 3]>,
}

impl Default for TrailParams {
    fn default() -> Self {
        Self {
            lines: TRAIL_LINE_COUNT,
            points_per_line: TRAIL_POINTS_PER_LINE,
            spring: TRAIL_SPRING,
            friction: TRAIL_FRICTION,
            follow: TRAIL_FOLLOW,
            thickness: TRAIL_THICKNESS,
            dpr: TRAIL_DPR,
            colors: TRAIL_COLORS.to_vec(),
        }
    }
}

pub type TrailPoints = SmallVec<[Vec2; TRAIL_POINTS_PER_LINE]>;

/// Page coordinates to normalised device coordinates of the surface
/// (x right, y up, both in -1..1 inside the box).
#[inline]
pub fn page_to_ndc(raw_x: f32, raw_y: f32, rect: &SurfaceRect) -> Vec2 {
    let w = rect.width.max(1.0);
    let h = rect.height.max(1.0);
    Vec2::new(
        ((raw_x - rect.left) / w) * 2.0 - 1.0,
        ((raw_y - rect.top) / h) * -2.0 + 1.0,
    )
}

/// Point simulation, independent of any GL state.
#[derive(Clone, Debug)]
pub struct SpringTrail {
    lines: Vec<TrailPoints>,
    // one velocity drives every head
    velocity: Vec2,
    target: Vec2,
    spring: f32,
    friction: f32,
    follow: f32,
}

impl SpringTrail {
    pub fn new(params: &TrailParams) -> Self {
        let points_per_line = params.points_per_line.max(2);
        let lines = (0..params.lines)
            .map(|_| SmallVec::from_elem(Vec2::ZERO, points_per_line))
            .collect();
        Self {
            lines,
            velocity: Vec2::ZERO,
            target: Vec2::ZERO,
            spring: params.spring,
            friction: params.friction,
            follow: params.follow,
        }
    }

    pub fn set_target(&mut self, ndc: Vec2) {
        self.target = ndc;
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn lines(&self) -> &[TrailPoints] {
        &self.lines
    }

    /// Advance one frame.
    pub fn step(&mut self) {
        for points in self.lines.iter_mut().rev() {
            for j in (0..points.len()).rev() {
                if j == 0 {
                    let pull = (self.target - points[0]) * self.spring;
                    self.velocity = (self.velocity + pull) * self.friction;
                    points[0] += self.velocity;
                } else {
                    points[j] = points[j].lerp(points[j - 1], self.follow);
                }
            }
        }
    }

    /// Append triangle-strip vertices for one line: two per point.
    pub fn write_strip(&self, line: usize, out: &mut Vec<TrailVertex>) {
        let Some(points) = self.lines.get(line) else {
            return;
        };
        let last = points.len() - 1;
        for (i, &p) in points.iter().enumerate() {
            let prev = points[i.saturating_sub(1)];
            let next = points[(i + 1).min(last)];
            let progress = i as f32 / last as f32;
            for side in [-1.0, 1.0] {
                out.push(TrailVertex {
                    position: p.to_array(),
                    prev: prev.to_array(),
                    next: next.to_array(),
                    side,
                    progress,
                });
            }
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TrailVertex {
    pub position: [f32; 2],
    pub prev: [f32; 2],
    pub next: [f32; 2],
    pub side: f32,
    pub progress: f32,
}

const VERTEX_STRIDE: i32 = std::mem::size_of::<TrailVertex>() as i32;

// (attribute, components, byte offset)
const TRAIL_ATTRIBUTES: [(&str, i32, i32); 5] = [
    ("position", 2, 0),
    ("prev", 2, 8),
    ("next", 2, 16),
    ("side", 1, 24),
    ("progress", 1, 28),
];

struct TrailPipeline<G: GlBackend> {
    program: ShaderProgram<G>,
    buffer: VertexBuffer<G>,
    attributes: Vec<(u32, i32, i32)>,
    u_resolution: Option<G::UniformLocation>,
    u_thickness: Option<G::UniformLocation>,
    u_dpr: Option<G::UniformLocation>,
    u_color: Option<G::UniformLocation>,
}

impl<G: GlBackend> TrailPipeline<G> {
    fn create(gl: &G) -> Option<Self> {
        Self::new(gl)
            .map_err(|e| log::error!("[trail] pipeline disabled: {}", e))
            .ok()
    }

    fn new(gl: &G) -> Result<Self, RenderError> {
        let program = ShaderProgram::build(gl, TRAIL_VERT, TRAIL_FRAG)?;
        let buffer = VertexBuffer::new(gl)?;
        let attributes = TRAIL_ATTRIBUTES
            .iter()
            .filter_map(|&(name, size, offset)| {
                program
                    .attrib_location(name)
                    .map(|loc| (loc, size, offset))
            })
            .collect();
        Ok(Self {
            u_resolution: program.uniform_location("uResolution"),
            u_thickness: program.uniform_location("uThickness"),
            u_dpr: program.uniform_location("uDPR"),
            u_color: program.uniform_location("uColor"),
            attributes,
            program,
            buffer,
        })
    }
}

pub struct TrailScene<G: GlBackend, S: Surface> {
    gl: G,
    surface: S,
    pipeline: Option<TrailPipeline<G>>,
    state: SurfaceState,
    trail: SpringTrail,
    params: TrailParams,
    vertices: Vec<TrailVertex>,
    suspended: bool,
}

impl<G: GlBackend, S: Surface> TrailScene<G, S> {
    pub fn new(gl: G, surface: S, params: TrailParams) -> Self {
        Self {
            pipeline: TrailPipeline::create(&gl),
            trail: SpringTrail::new(&params),
            vertices: Vec::with_capacity(params.lines * params.points_per_line * 2),
            gl,
            surface,
            state: SurfaceState::new(),
            params,
            suspended: false,
        }
    }

    pub fn is_renderable(&self) -> bool {
        self.pipeline.is_some()
    }

    pub fn on_pointer_move(&mut self, raw_x: f32, raw_y: f32) {
        let rect = self.surface.bounding_rect();
        self.trail.set_target(page_to_ndc(raw_x, raw_y, &rect));
    }

    pub fn trail(&self) -> &SpringTrail {
        &self.trail
    }
}

impl<G: GlBackend, S: Surface> Animation for TrailScene<G, S> {
    fn frame(&mut self, _timestamp_ms: f64) -> Result<(), RenderError> {
        if self.suspended {
            return Ok(());
        }
        if self.gl.is_context_lost() {
            return Err(RenderError::ContextLost);
        }
        self.state.sync_viewport(&self.surface, &self.gl);
        self.trail.step();

        let gl = &self.gl;
        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear_color_buffer();

        let Some(p) = &self.pipeline else {
            return Ok(());
        };

        self.vertices.clear();
        for line in 0..self.trail.lines().len() {
            self.trail.write_strip(line, &mut self.vertices);
        }

        p.program.bind();
        p.buffer.bind();
        gl.array_buffer_data(bytemuck::cast_slice(self.vertices.as_slice()), BufferUsage::Dynamic);
        for &(loc, size, offset) in &p.attributes {
            gl.enable_vertex_attrib_array(loc);
            gl.vertex_attrib_pointer_f32(loc, size, VERTEX_STRIDE, offset);
        }

        let vp = self.state.viewport();
        gl.uniform2f(p.u_resolution.as_ref(), vp.width as f32, vp.height as f32);
        gl.uniform1f(p.u_thickness.as_ref(), self.params.thickness);
        gl.uniform1f(p.u_dpr.as_ref(), self.params.dpr);

        let per_line = (self.params.points_per_line.max(2) * 2) as i32;
        for line in 0..self.trail.lines().len() {
            let [r, g, b] = self
                .params
                .colors
                .get(line % self.params.colors.len().max(1))
                .copied()
                .unwrap_or([1.0, 1.0, 1.0]);
            gl.uniform3f(p.u_color.as_ref(), r, g, b);
            gl.draw_arrays(Primitive::TriangleStrip, line as i32 * per_line, per_line);
        }
        Ok(())
    }

    fn context_lost(&mut self) {
        self.pipeline = None;
        self.suspended = true;
    }

    fn context_restored(&mut self) {
        self.pipeline = TrailPipeline::create(&self.gl);
        self.state.reset_gl();
        self.suspended = false;
    }
}
