use crate::error::RenderError;
use crate::gl::{GlBackend, ShaderStage};

/// A linked vertex + fragment program. Deleting the GPU objects is tied to
/// drop, so a scene releases its program simply by going away.
pub struct ShaderProgram<G: GlBackend> {
    gl: G,
    program: G::Program,
    vertex: G::Shader,
    fragment: G::Shader,
}

impl<G: GlBackend> ShaderProgram<G> {
    /// Compile both stages and link them.
    ///
    /// On any failure every object created so far is deleted and nothing
    /// usable is returned.
    pub fn build(gl: &G, vertex_src: &str, fragment_src: &str) -> Result<Self, RenderError> {
        let vertex = compile_stage(gl, ShaderStage::Vertex, vertex_src)?;
        let fragment = match compile_stage(gl, ShaderStage::Fragment, fragment_src) {
            Ok(s) => s,
            Err(e) => {
                gl.delete_shader(&vertex);
                return Err(e);
            }
        };

        let Some(program) = gl.create_program() else {
            gl.delete_shader(&vertex);
            gl.delete_shader(&fragment);
            return Err(RenderError::ResourceAllocation("shader program"));
        };
        gl.attach_shader(&program, &vertex);
        gl.attach_shader(&program, &fragment);
        gl.link_program(&program);
        if !gl.link_status(&program) {
            let log = gl.program_info_log(&program);
            gl.delete_program(&program);
            gl.delete_shader(&vertex);
            gl.delete_shader(&fragment);
            return Err(RenderError::ProgramLink { log });
        }

        Ok(Self {
            gl: gl.clone(),
            program,
            vertex,
            fragment,
        })
    }

    pub fn bind(&self) {
        self.gl.use_program(Some(&self.program));
    }

    pub fn attrib_location(&self, name: &str) -> Option<u32> {
        self.gl.attrib_location(&self.program, name)
    }

    pub fn uniform_location(&self, name: &str) -> Option<G::UniformLocation> {
        self.gl.uniform_location(&self.program, name)
    }
}

impl<G: GlBackend> Drop for ShaderProgram<G> {
    fn drop(&mut self) {
        self.gl.delete_program(&self.program);
        self.gl.delete_shader(&self.vertex);
        self.gl.delete_shader(&self.fragment);
    }
}

fn compile_stage<G: GlBackend>(
    gl: &G,
    stage: ShaderStage,
    source: &str,
) -> Result<G::Shader, RenderError> {
    let shader = gl
        .create_shader(stage)
        .ok_or(RenderError::ResourceAllocation("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);
    if !gl.compile_status(&shader) {
        let log = gl.shader_info_log(&shader);
        gl.delete_shader(&shader);
        return Err(RenderError::ShaderCompile { stage, log });
    }
    Ok(shader)
}

/// Vertex buffer owned by a scene; deleted on drop.
pub struct VertexBuffer<G: GlBackend> {
    gl: G,
    buffer: G::Buffer,
}

impl<G: GlBackend> VertexBuffer<G> {
    pub fn new(gl: &G) -> Result<Self, RenderError> {
        let buffer = gl
            .create_buffer()
            .ok_or(RenderError::ResourceAllocation("vertex buffer"))?;
        Ok(Self {
            gl: gl.clone(),
            buffer,
        })
    }

    pub fn bind(&self) {
        self.gl.bind_array_buffer(Some(&self.buffer));
    }
}

impl<G: GlBackend> Drop for VertexBuffer<G> {
    fn drop(&mut self) {
        self.gl.delete_buffer(&self.buffer);
    }
}
