use std::ffi::c_void;
use thiserror::Error;

pub struct GeometryBuilder<'a> {
    attributes: Vec<VertexAttribute>,
    data: &'a [f32],
    indices: Option<&'a [u32]>,
}

impl<'a> GeometryBuilder<'a> {
    pub fn new(data: &'a [f32]) -> Self {
        Self {
            data,
            attributes: Vec::new(),
            indices: None,
        }
    }

    pub fn with_attribute(mut self, attr: VertexAttribute) -> Self {
        self.attributes.push(attr);
        self
    }

    /// Draws the vertices as an indexed triangle list.
    pub fn with_indices(mut self, indices: &'a [u32]) -> Self {
        self.indices = Some(indices);
        self
    }

    /// Checks the data against the attributes before touching GL.
    pub fn validate(&self) -> Result<VertexLayout, GBError> {
        let layout = VertexLayout::new(&self.attributes);

        if layout.components() == 0 {
            return Err(GBError::NoAttributes);
        }

        if self.data.is_empty() || self.data.len() % layout.components() != 0 {
            return Err(GBError::InvalidDataLength);
        }

        if let Some(indices) = self.indices {
            if indices.is_empty() || indices.len() % 3 != 0 {
                return Err(GBError::InvalidIndexCount);
            }

            let vertices = self.data.len() / layout.components();

            if let Some(idx) = indices.iter().find(|i| **i as usize >= vertices) {
                return Err(GBError::IndexOutOfRange {
                    index: *idx,
                    vertices,
                });
            }
        }

        Ok(layout)
    }

    pub fn build(self) -> Result<Geometry, GBError> {
        let layout = self.validate()?;

        let mut vao = 0;
        let mut vbo = 0;
        let mut ebo = None;

        unsafe {
            gl::GenVertexArrays(1, (&mut vao) as *mut u32);
            gl::GenBuffers(1, (&mut vbo) as *mut u32);

            gl::BindVertexArray(vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

            gl::BufferData(
                gl::ARRAY_BUFFER,
                std::mem::size_of_val(self.data) as isize,
                self.data.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            for (i, (attr, offset)) in self.attributes.iter().zip(layout.offsets()).enumerate() {
                gl::VertexAttribPointer(
                    i as u32,
                    attr.size() as i32,
                    gl::FLOAT,
                    gl::FALSE,
                    layout.stride() as i32,
                    *offset as *const c_void,
                );
                gl::EnableVertexAttribArray(i as u32);
            }

            // the element buffer binding is part of the VAO state, so it
            // stays bound until the VAO is unbound
            if let Some(indices) = self.indices {
                let mut id = 0;
                gl::GenBuffers(1, (&mut id) as *mut u32);
                gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, id);
                gl::BufferData(
                    gl::ELEMENT_ARRAY_BUFFER,
                    std::mem::size_of_val(indices) as isize,
                    indices.as_ptr() as *const c_void,
                    gl::STATIC_DRAW,
                );
                ebo = Some(id);
            }

            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
            gl::BindVertexArray(0);
        }

        let vertices = self.data.len() / layout.components();
        let elements = self.indices.map(|i| i.len()).unwrap_or(vertices);

        log::debug!(
            "uploaded geometry vao={vao} vertices={vertices} elements={elements} indexed={}",
            ebo.is_some()
        );

        Ok(Geometry {
            vao,
            vbo,
            ebo,
            elements,
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GBError {
    #[error("Geometry needs at least one vertex attribute")]
    NoAttributes,
    #[error("Invalid data length for given attributes")]
    InvalidDataLength,
    #[error("Index count must be a non-zero multiple of 3")]
    InvalidIndexCount,
    #[error("Index {index} out of range for {vertices} vertices")]
    IndexOutOfRange { index: u32, vertices: usize },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VertexAttribute {
    Float,
    Vec2,
    Vec3,
}

impl VertexAttribute {
    pub fn size(&self) -> usize {
        match self {
            VertexAttribute::Float => 1,
            VertexAttribute::Vec2 => 2,
            VertexAttribute::Vec3 => 3,
        }
    }
}

/// Interleaved, tightly packed float layout of one vertex.
#[derive(Debug, PartialEq, Eq)]
pub struct VertexLayout {
    components: usize,
    offsets: Vec<usize>,
}

impl VertexLayout {
    pub fn new(attributes: &[VertexAttribute]) -> Self {
        let mut components = 0;
        let mut offsets = Vec::with_capacity(attributes.len());

        for attr in attributes {
            offsets.push(components * std::mem::size_of::<f32>());
            components += attr.size();
        }

        Self {
            components,
            offsets,
        }
    }

    /// Floats per vertex.
    pub fn components(&self) -> usize {
        self.components
    }

    /// Bytes per vertex.
    pub fn stride(&self) -> usize {
        self.components * std::mem::size_of::<f32>()
    }

    /// Byte offset of each attribute inside a vertex.
    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }
}

pub struct Geometry {
    vao: u32,
    vbo: u32,
    ebo: Option<u32>,
    elements: usize,
}

impl Geometry {
    pub fn vao(&self) -> u32 {
        self.vao
    }

    /// Number of vertices a draw call submits.
    pub fn elements(&self) -> usize {
        self.elements
    }

    pub fn is_indexed(&self) -> bool {
        self.ebo.is_some()
    }
}

impl Drop for Geometry {
    fn drop(&mut self) {
        unsafe {
            if let Some(ebo) = &self.ebo {
                gl::DeleteBuffers(1, ebo as *const u32);
            }
            gl::DeleteBuffers(1, (&self.vbo) as *const u32);
            gl::DeleteVertexArrays(1, (&self.vao) as *const u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_interleaved() {
        let layout = VertexLayout::new(&[VertexAttribute::Vec3, VertexAttribute::Vec2]);

        assert_eq!(layout.components(), 5);
        assert_eq!(layout.stride(), 20);
        assert_eq!(layout.offsets(), &[0, 12]);
    }

    #[test]
    fn validate_needs_attributes() {
        let data = [0.0; 6];
        let res = GeometryBuilder::new(&data).validate();

        assert_eq!(res, Err(GBError::NoAttributes));
    }

    #[test]
    fn validate_data_length() {
        let data = [0.0; 7];
        let res = GeometryBuilder::new(&data)
            .with_attribute(VertexAttribute::Vec3)
            .validate();

        assert_eq!(res, Err(GBError::InvalidDataLength));
    }

    #[test]
    fn validate_indices() {
        let data = [0.0; 9];

        let res = GeometryBuilder::new(&data)
            .with_attribute(VertexAttribute::Vec3)
            .with_indices(&[0, 1])
            .validate();
        assert_eq!(res, Err(GBError::InvalidIndexCount));

        let res = GeometryBuilder::new(&data)
            .with_attribute(VertexAttribute::Vec3)
            .with_indices(&[0, 1, 3])
            .validate();
        assert_eq!(
            res,
            Err(GBError::IndexOutOfRange {
                index: 3,
                vertices: 3
            })
        );

        let res = GeometryBuilder::new(&data)
            .with_attribute(VertexAttribute::Vec3)
            .with_indices(&[0, 1, 2])
            .validate();
        assert!(res.is_ok());
    }
}
