use gl::types::{GLenum, GLint, GLuint};
use std::ffi::{c_char, CString};
use std::fmt::{Display, Formatter};
use thiserror::Error;

use crate::{info_log_to_string, INFO_LOG_LEN};

pub struct ProgramBuilder {
    vert: CString,
    frag: CString,
}

impl ProgramBuilder {
    pub fn new(vert_src: &str, frag_src: &str) -> Result<Self, PBError> {
        Ok(Self {
            vert: CString::new(vert_src).map_err(|_| PBError::InvalidSource(Stage::Vertex))?,
            frag: CString::new(frag_src).map_err(|_| PBError::InvalidSource(Stage::Fragment))?,
        })
    }

    pub fn build(self) -> Result<Program, PBError> {
        let vert = compile(Stage::Vertex, &self.vert)?;

        let frag = match compile(Stage::Fragment, &self.frag) {
            Ok(frag) => frag,
            Err(e) => {
                unsafe { gl::DeleteShader(vert) };
                return Err(e);
            }
        };

        let mut success: GLint = 0;

        unsafe {
            let program = gl::CreateProgram();
            gl::AttachShader(program, vert);
            gl::AttachShader(program, frag);
            gl::LinkProgram(program);

            gl::DetachShader(program, vert);
            gl::DetachShader(program, frag);
            gl::DeleteShader(vert);
            gl::DeleteShader(frag);

            gl::GetProgramiv(program, gl::LINK_STATUS, (&mut success) as *mut i32);
            if success != 1 {
                let mut buf = [0_u8; INFO_LOG_LEN];

                gl::GetProgramInfoLog(
                    program,
                    INFO_LOG_LEN as i32,
                    std::ptr::null_mut(),
                    buf.as_mut_ptr() as *mut c_char,
                );
                gl::DeleteProgram(program);

                return Err(PBError::Linking(info_log_to_string(&buf)));
            }

            log::debug!("linked program {program}");

            Ok(Program { id: program })
        }
    }
}

fn compile(stage: Stage, src: &CString) -> Result<GLuint, PBError> {
    let mut success: GLint = 0;

    unsafe {
        let shader = gl::CreateShader(stage.gl_kind());

        gl::ShaderSource(
            shader,
            1,
            (&src.as_ptr()) as *const *const c_char,
            std::ptr::null(),
        );

        gl::CompileShader(shader);
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, (&mut success) as *mut i32);
        if success != 1 {
            let mut buf = [0_u8; INFO_LOG_LEN];

            gl::GetShaderInfoLog(
                shader,
                INFO_LOG_LEN as i32,
                std::ptr::null_mut(),
                buf.as_mut_ptr() as *mut c_char,
            );
            gl::DeleteShader(shader);

            return Err(PBError::Compilation {
                stage,
                log: info_log_to_string(&buf),
            });
        }

        Ok(shader)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    Vertex,
    Fragment,
}

impl Stage {
    fn gl_kind(&self) -> GLenum {
        match self {
            Stage::Vertex => gl::VERTEX_SHADER,
            Stage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Vertex => write!(f, "vertex"),
            Stage::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PBError {
    #[error("{0} shader source contains a NUL byte")]
    InvalidSource(Stage),
    #[error("{stage} shader compilation failed: {log}")]
    Compilation { stage: Stage, log: String },
    #[error("program linking failed: {0}")]
    Linking(String),
    #[error("uniform `{0}` not found in program")]
    MissingUniform(String),
}

pub struct Program {
    id: GLuint,
}

impl Program {
    pub fn get_id(&self) -> GLuint {
        self.id
    }

    pub fn uniform(&self, name: &str) -> Result<Uniform, PBError> {
        let c_name = CString::new(name).map_err(|_| PBError::MissingUniform(name.to_string()))?;

        let location = unsafe { gl::GetUniformLocation(self.id, c_name.as_ptr()) };

        if location < 0 {
            return Err(PBError::MissingUniform(name.to_string()));
        }

        Ok(Uniform {
            program: self.id,
            location,
        })
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) }
    }
}

/// Location of a uniform inside the program it was looked up from.
#[derive(Copy, Clone, Debug)]
pub struct Uniform {
    program: GLuint,
    location: GLint,
}

impl Uniform {
    pub fn program(&self) -> GLuint {
        self.program
    }

    pub fn location(&self) -> GLint {
        self.location
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum UniformValue {
    Vec4([f32; 4]),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nul_in_source_is_rejected() {
        let res = ProgramBuilder::new("void main() {}\0", "void main() {}");
        assert!(matches!(res, Err(PBError::InvalidSource(Stage::Vertex))));

        let res = ProgramBuilder::new("void main() {}", "void\0 main() {}");
        assert!(matches!(res, Err(PBError::InvalidSource(Stage::Fragment))));
    }

    #[test]
    fn compilation_error_names_stage() {
        let err = PBError::Compilation {
            stage: Stage::Fragment,
            log: "0:3(1): syntax error".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "fragment shader compilation failed: 0:3(1): syntax error"
        );
    }
}
