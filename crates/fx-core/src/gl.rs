//! Minimal GL surface the scenes draw through.
//!
//! The web front-end implements this over `WebGlRenderingContext`; host tests
//! implement it with a recorder. Method names follow the WebGL calls they
//! stand for. Handle types are whatever the implementation uses to name GPU
//! objects, and `Clone` must be cheap (scenes keep their own copy of the
//! backend so that resources can be released on drop).

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Triangles,
    TriangleStrip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    Static,
    Dynamic,
}

pub trait GlBackend: Clone {
    type Shader;
    type Program;
    type Buffer;
    type UniformLocation;

    fn is_context_lost(&self) -> bool;

    // shaders and programs
    fn create_shader(&self, stage: ShaderStage) -> Option<Self::Shader>;
    fn shader_source(&self, shader: &Self::Shader, source: &str);
    fn compile_shader(&self, shader: &Self::Shader);
    fn compile_status(&self, shader: &Self::Shader) -> bool;
    fn shader_info_log(&self, shader: &Self::Shader) -> String;
    fn delete_shader(&self, shader: &Self::Shader);

    fn create_program(&self) -> Option<Self::Program>;
    fn attach_shader(&self, program: &Self::Program, shader: &Self::Shader);
    fn link_program(&self, program: &Self::Program);
    fn link_status(&self, program: &Self::Program) -> bool;
    fn program_info_log(&self, program: &Self::Program) -> String;
    fn delete_program(&self, program: &Self::Program);
    fn use_program(&self, program: Option<&Self::Program>);

    /// `None` when the program has no active attribute of that name.
    fn attrib_location(&self, program: &Self::Program, name: &str) -> Option<u32>;
    /// `None` when the program has no active uniform of that name.
    fn uniform_location(
        &self,
        program: &Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation>;

    // vertex data
    fn create_buffer(&self) -> Option<Self::Buffer>;
    fn bind_array_buffer(&self, buffer: Option<&Self::Buffer>);
    fn array_buffer_data(&self, bytes: &[u8], usage: BufferUsage);
    fn delete_buffer(&self, buffer: &Self::Buffer);
    fn enable_vertex_attrib_array(&self, index: u32);
    /// Float attribute of `size` components at `offset` bytes into a vertex of `stride` bytes.
    fn vertex_attrib_pointer_f32(&self, index: u32, size: i32, stride: i32, offset: i32);

    // uniforms; a `None` location is a silent no-op
    fn uniform1f(&self, location: Option<&Self::UniformLocation>, x: f32);
    fn uniform2f(&self, location: Option<&Self::UniformLocation>, x: f32, y: f32);
    fn uniform3f(&self, location: Option<&Self::UniformLocation>, x: f32, y: f32, z: f32);

    // framebuffer
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32);
    fn clear_color_buffer(&self);
    fn draw_arrays(&self, mode: Primitive, first: i32, count: i32);
}
