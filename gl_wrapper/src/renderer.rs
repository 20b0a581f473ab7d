use std::ffi::{c_char, c_void, CStr};

use crate::geometry::Geometry;
use crate::program::{Program, Uniform, UniformValue};

pub struct GlRenderer {
    current_program: u32,
}

impl GlRenderer {
    pub fn new() -> Self {
        Self { current_program: 0 }
    }

    fn use_program(&mut self, program: &Program) {
        let p_id = program.get_id();
        if self.current_program != p_id {
            unsafe { gl::UseProgram(p_id) }
            self.current_program = p_id;
        }
    }

    pub fn draw(&mut self, geometry: &Geometry, program: &Program) {
        self.use_program(program);

        unsafe {
            gl::BindVertexArray(geometry.vao());
            if geometry.is_indexed() {
                gl::DrawElements(
                    gl::TRIANGLES,
                    geometry.elements() as i32,
                    gl::UNSIGNED_INT,
                    std::ptr::null::<c_void>(),
                );
            } else {
                gl::DrawArrays(gl::TRIANGLES, 0, geometry.elements() as i32);
            }
            gl::BindVertexArray(0);
        }
    }

    /// Uploads a uniform value, binding its program first.
    pub fn set_uniform(&mut self, program: &Program, uniform: &Uniform, value: UniformValue) {
        debug_assert_eq!(program.get_id(), uniform.program());
        self.use_program(program);

        let loc = uniform.location();

        unsafe {
            match value {
                UniformValue::Vec4([x, y, z, w]) => gl::Uniform4f(loc, x, y, z, w),
            }
        }
    }

    /// Reads a GL string such as `gl::VERSION` or `gl::RENDERER`.
    pub fn gl_string(&self, name: gl::types::GLenum) -> Option<String> {
        unsafe {
            let ptr = gl::GetString(name);
            if ptr.is_null() {
                return None;
            }

            Some(CStr::from_ptr(ptr as *const c_char).to_string_lossy().to_string())
        }
    }

    pub fn resize(&self, width: u32, height: u32) {
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }
    }

    pub fn clear_color(&self, r: f32, g: f32, b: f32, a: f32) {
        unsafe {
            gl::ClearColor(r, g, b, a);
            gl::Clear(gl::COLOR_BUFFER_BIT);
        }
    }
}

impl Default for GlRenderer {
    fn default() -> Self {
        Self::new()
    }
}
