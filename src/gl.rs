use fx_core::{BufferUsage, GlBackend, Primitive, ShaderStage};
use web_sys as web;
use web_sys::WebGlRenderingContext as GL;

/// WebGL 1 context behind the engine's GL trait.
#[derive(Clone)]
pub struct WebGl(pub GL);

impl GlBackend for WebGl {
    type Shader = web::WebGlShader;
    type Program = web::WebGlProgram;
    type Buffer = web::WebGlBuffer;
    type UniformLocation = web::WebGlUniformLocation;

    fn is_context_lost(&self) -> bool {
        self.0.is_context_lost()
    }

    fn create_shader(&self, stage: ShaderStage) -> Option<Self::Shader> {
        let kind = match stage {
            ShaderStage::Vertex => GL::VERTEX_SHADER,
            ShaderStage::Fragment => GL::FRAGMENT_SHADER,
        };
        self.0.create_shader(kind)
    }

    fn shader_source(&self, shader: &Self::Shader, source: &str) {
        self.0.shader_source(shader, source);
    }

    fn compile_shader(&self, shader: &Self::Shader) {
        self.0.compile_shader(shader);
    }

    fn compile_status(&self, shader: &Self::Shader) -> bool {
        self.0
            .get_shader_parameter(shader, GL::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false)
    }

    fn shader_info_log(&self, shader: &Self::Shader) -> String {
        self.0
            .get_shader_info_log(shader)
            .unwrap_or_else(|| "unknown error".to_string())
    }

    fn delete_shader(&self, shader: &Self::Shader) {
        self.0.delete_shader(Some(shader));
    }

    fn create_program(&self) -> Option<Self::Program> {
        self.0.create_program()
    }

    fn attach_shader(&self, program: &Self::Program, shader: &Self::Shader) {
        self.0.attach_shader(program, shader);
    }

    fn link_program(&self, program: &Self::Program) {
        self.0.link_program(program);
    }

    fn link_status(&self, program: &Self::Program) -> bool {
        self.0
            .get_program_parameter(program, GL::LINK_STATUS)
            .as_bool()
            .unwrap_or(false)
    }

    fn program_info_log(&self, program: &Self::Program) -> String {
        self.0
            .get_program_info_log(program)
            .unwrap_or_else(|| "unknown error".to_string())
    }

    fn delete_program(&self, program: &Self::Program) {
        self.0.delete_program(Some(program));
    }

    fn use_program(&self, program: Option<&Self::Program>) {
        self.0.use_program(program);
    }

    fn attrib_location(&self, program: &Self::Program, name: &str) -> Option<u32> {
        // -1 means "no such active attribute"
        u32::try_from(self.0.get_attrib_location(program, name)).ok()
    }

    fn uniform_location(
        &self,
        program: &Self::Program,
        name: &str,
    ) -> Option<Self::UniformLocation> {
        self.0.get_uniform_location(program, name)
    }

    fn create_buffer(&self) -> Option<Self::Buffer> {
        self.0.create_buffer()
    }

    fn bind_array_buffer(&self, buffer: Option<&Self::Buffer>) {
        self.0.bind_buffer(GL::ARRAY_BUFFER, buffer);
    }

    fn array_buffer_data(&self, bytes: &[u8], usage: BufferUsage) {
        let usage = match usage {
            BufferUsage::Static => GL::STATIC_DRAW,
            BufferUsage::Dynamic => GL::DYNAMIC_DRAW,
        };
        self.0.buffer_data_with_u8_array(GL::ARRAY_BUFFER, bytes, usage);
    }

    fn delete_buffer(&self, buffer: &Self::Buffer) {
        self.0.delete_buffer(Some(buffer));
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.0.enable_vertex_attrib_array(index);
    }

    fn vertex_attrib_pointer_f32(&self, index: u32, size: i32, stride: i32, offset: i32) {
        self.0.vertex_attrib_pointer_with_i32(index, size, GL::FLOAT, false, stride, offset);
    }

    fn uniform1f(&self, location: Option<&Self::UniformLocation>, x: f32) {
        self.0.uniform1f(location, x);
    }

    fn uniform2f(&self, location: Option<&Self::UniformLocation>, x: f32, y: f32) {
        self.0.uniform2f(location, x, y);
    }

    fn uniform3f(&self, location: Option<&Self::UniformLocation>, x: f32, y: f32, z: f32) {
        self.0.uniform3f(location, x, y, z);
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.0.viewport(x, y, width, height);
    }

    fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        self.0.clear_color(r, g, b, a);
    }

    fn clear_color_buffer(&self) {
        self.0.clear(GL::COLOR_BUFFER_BIT);
    }

    fn draw_arrays(&self, mode: Primitive, first: i32, count: i32) {
        let mode = match mode {
            Primitive::Triangles => GL::TRIANGLES,
            Primitive::TriangleStrip => GL::TRIANGLE_STRIP,
        };
        self.0.draw_arrays(mode, first, count);
    }
}
