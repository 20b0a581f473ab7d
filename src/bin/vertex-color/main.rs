use std::time::Duration;

use clap::Parser;

use gl_wrapper::geometry::{Geometry, GeometryBuilder, VertexAttribute};
use gl_wrapper::program::{Program, ProgramBuilder};
use gl_wrapper::renderer::GlRenderer;

use triangles::args::Args;
use triangles::mesh::{interleave, COLORS, INDICES, POSITIONS};
use triangles::{exit_with, App, Config, Scene, SceneError};

/// Colors are given per vertex and interpolated across each triangle.
struct VertexColor {
    geometry: Geometry,
    program: Program,
}

impl VertexColor {
    fn build() -> Result<Self, SceneError> {
        let program = ProgramBuilder::new(
            include_str!("../../gl_shaders/vertex_color.glsl"),
            include_str!("../../gl_shaders/interpolated.glsl"),
        )?
        .build()?;

        let data = interleave(&POSITIONS, &COLORS);

        let geometry = GeometryBuilder::new(&data)
            .with_attribute(VertexAttribute::Vec3)
            .with_attribute(VertexAttribute::Vec3)
            .with_indices(&INDICES)
            .build()?;

        Ok(Self { geometry, program })
    }
}

impl Scene for VertexColor {
    fn draw(&mut self, renderer: &mut GlRenderer, _elapsed: Duration) {
        renderer.draw(&self.geometry, &self.program);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = <Args as Parser>::parse();

    let config = Config::resolve(&args).unwrap_or_else(|e| exit_with(e));
    let app = App::new(&config, "Triangle - Vertex Color").unwrap_or_else(|e| exit_with(e));
    let scene = VertexColor::build().unwrap_or_else(|e| exit_with(e));

    app.run(scene);
}
