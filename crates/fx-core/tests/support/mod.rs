// Host-side doubles for the GL backend and the drawable surface.

#![allow(dead_code)]

use fx_core::{BufferUsage, GlBackend, Primitive, ShaderStage, Surface, SurfaceRect};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Clone, Debug, PartialEq)]
pub enum GlCall {
    UseProgram(Option<u32>),
    BindArrayBuffer(Option<u32>),
    BufferData { bytes: usize, usage: BufferUsage },
    EnableAttrib(u32),
    AttribPointer { index: u32, size: i32, stride: i32, offset: i32 },
    Uniform1f(String, f32),
    Uniform2f(String, f32, f32),
    Uniform3f(String, f32, f32, f32),
    Viewport(i32, i32, i32, i32),
    ClearColor([f32; 4]),
    Clear,
    DrawArrays(Primitive, i32, i32),
}

#[derive(Default)]
struct Objects {
    next_id: u32,
    shader_sources: Vec<(u32, String)>,
    program_shaders: Vec<(u32, Vec<u32>)>,
    live_shaders: Vec<u32>,
    live_programs: Vec<u32>,
    live_buffers: Vec<u32>,
}

impl Objects {
    fn alloc(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn program_source(&self, program: u32) -> String {
        let shaders = self
            .program_shaders
            .iter()
            .find(|(p, _)| *p == program)
            .map(|(_, s)| s.clone())
            .unwrap_or_default();
        self.shader_sources
            .iter()
            .filter(|(id, _)| shaders.contains(id))
            .map(|(_, src)| src.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// GL double that records calls. A shader "compiles" when its source has a
/// `void main` and no `#error`; a program "links" unless `fail_link` is set.
/// Locations exist for every `uniform`/`attribute` declared in the sources.
/// Losing the context kills every object, as a browser does.
#[derive(Clone, Default)]
pub struct RecordingGl {
    calls: Rc<RefCell<Vec<GlCall>>>,
    objects: Rc<RefCell<Objects>>,
    stale_binds: Rc<Cell<u32>>,
    pub context_lost: Rc<Cell<bool>>,
    pub fail_link: Rc<Cell<bool>>,
}

impl RecordingGl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<GlCall> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn draws(&self) -> Vec<GlCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, GlCall::DrawArrays(..)))
            .collect()
    }

    pub fn last_uniform2f(&self, name: &str) -> Option<(f32, f32)> {
        self.calls().into_iter().rev().find_map(|c| match c {
            GlCall::Uniform2f(n, x, y) if n == name => Some((x, y)),
            _ => None,
        })
    }

    pub fn last_uniform1f(&self, name: &str) -> Option<f32> {
        self.calls().into_iter().rev().find_map(|c| match c {
            GlCall::Uniform1f(n, x) if n == name => Some(x),
            _ => None,
        })
    }

    pub fn viewports(&self) -> Vec<GlCall> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, GlCall::Viewport(..)))
            .collect()
    }

    pub fn live_shaders(&self) -> usize {
        self.objects.borrow().live_shaders.len()
    }

    pub fn live_programs(&self) -> usize {
        self.objects.borrow().live_programs.len()
    }

    pub fn live_buffers(&self) -> usize {
        self.objects.borrow().live_buffers.len()
    }

    pub fn lose_context(&self) {
        self.context_lost.set(true);
        let mut o = self.objects.borrow_mut();
        o.live_shaders.clear();
        o.live_programs.clear();
        o.live_buffers.clear();
    }

    pub fn restore_context(&self) {
        self.context_lost.set(false);
    }

    /// Binds of a program or buffer that no longer exists.
    pub fn stale_binds(&self) -> u32 {
        self.stale_binds.get()
    }

    fn record(&self, call: GlCall) {
        self.calls.borrow_mut().push(call);
    }

    fn declares(&self, program: u32, qualifier: &str, name: &str) -> bool {
        let source = self.objects.borrow().program_source(program);
        source.lines().any(|line| {
            let line = line.trim();
            line.starts_with(qualifier)
                && line
                    .trim_end_matches(';')
                    .split_whitespace()
                    .last()
                    .is_some_and(|n| n == name)
        })
    }
}

impl GlBackend for RecordingGl {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type UniformLocation = String;

    fn is_context_lost(&self) -> bool {
        self.context_lost.get()
    }

    fn create_shader(&self, _stage: ShaderStage) -> Option<u32> {
        let mut o = self.objects.borrow_mut();
        let id = o.alloc();
        o.live_shaders.push(id);
        Some(id)
    }

    fn shader_source(&self, shader: &u32, source: &str) {
        self.objects
            .borrow_mut()
            .shader_sources
            .push((*shader, source.to_string()));
    }

    fn compile_shader(&self, _shader: &u32) {}

    fn compile_status(&self, shader: &u32) -> bool {
        let o = self.objects.borrow();
        o.shader_sources
            .iter()
            .find(|(id, _)| id == shader)
            .is_some_and(|(_, src)| src.contains("void main") && !src.contains("#error"))
    }

    fn shader_info_log(&self, _shader: &u32) -> String {
        "ERROR: 0:1: syntax error".to_string()
    }

    fn delete_shader(&self, shader: &u32) {
        self.objects.borrow_mut().live_shaders.retain(|s| s != shader);
    }

    fn create_program(&self) -> Option<u32> {
        let mut o = self.objects.borrow_mut();
        let id = o.alloc();
        o.live_programs.push(id);
        o.program_shaders.push((id, Vec::new()));
        Some(id)
    }

    fn attach_shader(&self, program: &u32, shader: &u32) {
        let mut o = self.objects.borrow_mut();
        if let Some((_, shaders)) = o.program_shaders.iter_mut().find(|(p, _)| p == program) {
            shaders.push(*shader);
        }
    }

    fn link_program(&self, _program: &u32) {}

    fn link_status(&self, _program: &u32) -> bool {
        !self.fail_link.get()
    }

    fn program_info_log(&self, _program: &u32) -> String {
        "ERROR: varying mismatch".to_string()
    }

    fn delete_program(&self, program: &u32) {
        self.objects.borrow_mut().live_programs.retain(|p| p != program);
    }

    fn use_program(&self, program: Option<&u32>) {
        if program.is_some_and(|p| !self.objects.borrow().live_programs.contains(p)) {
            self.stale_binds.set(self.stale_binds.get() + 1);
        }
        self.record(GlCall::UseProgram(program.copied()));
    }

    fn attrib_location(&self, program: &u32, name: &str) -> Option<u32> {
        let source = self.objects.borrow().program_source(*program);
        source
            .lines()
            .map(str::trim)
            .filter(|l| l.starts_with("attribute"))
            .position(|l| l.trim_end_matches(';').split_whitespace().last() == Some(name))
            .map(|i| i as u32)
    }

    fn uniform_location(&self, program: &u32, name: &str) -> Option<String> {
        self.declares(*program, "uniform", name).then(|| name.to_string())
    }

    fn create_buffer(&self) -> Option<u32> {
        let mut o = self.objects.borrow_mut();
        let id = o.alloc();
        o.live_buffers.push(id);
        Some(id)
    }

    fn bind_array_buffer(&self, buffer: Option<&u32>) {
        if buffer.is_some_and(|b| !self.objects.borrow().live_buffers.contains(b)) {
            self.stale_binds.set(self.stale_binds.get() + 1);
        }
        self.record(GlCall::BindArrayBuffer(buffer.copied()));
    }

    fn array_buffer_data(&self, bytes: &[u8], usage: BufferUsage) {
        self.record(GlCall::BufferData {
            bytes: bytes.len(),
            usage,
        });
    }

    fn delete_buffer(&self, buffer: &u32) {
        self.objects.borrow_mut().live_buffers.retain(|b| b != buffer);
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(GlCall::EnableAttrib(index));
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, size: i32, stride: i32, offset: i32) {
        self.record(GlCall::AttribPointer {
            index,
            size,
            stride,
            offset,
        });
    }

    fn uniform1f(&self, location: Option<&String>, x: f32) {
        if let Some(name) = location {
            self.record(GlCall::Uniform1f(name.clone(), x));
        }
    }

    fn uniform2f(&self, location: Option<&String>, x: f32, y: f32) {
        if let Some(name) = location {
            self.record(GlCall::Uniform2f(name.clone(), x, y));
        }
    }

    fn uniform3f(&self, location: Option<&String>, x: f32, y: f32, z: f32) {
        if let Some(name) = location {
            self.record(GlCall::Uniform3f(name.clone(), x, y, z));
        }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(GlCall::Viewport(x, y, width, height));
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.record(GlCall::ClearColor([r, g, b, a]));
    }

    fn clear_color_buffer(&self) {
        self.record(GlCall::Clear);
    }

    fn draw_arrays(&self, mode: Primitive, first: i32, count: i32) {
        self.record(GlCall::DrawArrays(mode, first, count));
    }
}

/// Surface double: the test sets the displayed size and layout box; backing
/// reallocations are counted.
#[derive(Clone)]
pub struct FakeSurface {
    display: Rc<Cell<(u32, u32)>>,
    backing: Rc<Cell<(u32, u32)>>,
    rect: Rc<Cell<SurfaceRect>>,
    allocations: Rc<Cell<u32>>,
}

impl FakeSurface {
    /// Canvas of the given displayed size placed at `(left, top)`, with the
    /// browser's default 300x150 backing buffer.
    pub fn new(left: f32, top: f32, width: u32, height: u32) -> Self {
        Self {
            display: Rc::new(Cell::new((width, height))),
            backing: Rc::new(Cell::new((300, 150))),
            rect: Rc::new(Cell::new(SurfaceRect {
                left,
                top,
                width: width as f32,
                height: height as f32,
            })),
            allocations: Rc::new(Cell::new(0)),
        }
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.display.set((width, height));
        let mut r = self.rect.get();
        r.width = width as f32;
        r.height = height as f32;
        self.rect.set(r);
    }

    pub fn allocations(&self) -> u32 {
        self.allocations.get()
    }
}

impl Surface for FakeSurface {
    fn display_size(&self) -> (u32, u32) {
        self.display.get()
    }

    fn backing_size(&self) -> (u32, u32) {
        self.backing.get()
    }

    fn set_backing_size(&self, width: u32, height: u32) {
        self.backing.set((width, height));
        self.allocations.set(self.allocations.get() + 1);
    }

    fn bounding_rect(&self) -> SurfaceRect {
        self.rect.get()
    }
}
