use std::time::Duration;

use clap::Parser;

use gl_wrapper::geometry::{Geometry, GeometryBuilder, VertexAttribute};
use gl_wrapper::program::{Program, ProgramBuilder};
use gl_wrapper::renderer::GlRenderer;

use triangles::args::Args;
use triangles::mesh::{INDICES, POSITIONS};
use triangles::{exit_with, App, Config, Scene, SceneError};

struct SingleColor {
    geometry: Geometry,
    program: Program,
}

impl SingleColor {
    fn build() -> Result<Self, SceneError> {
        let program = ProgramBuilder::new(
            include_str!("../../gl_shaders/position.glsl"),
            include_str!("../../gl_shaders/solid.glsl"),
        )?
        .build()?;

        let geometry = GeometryBuilder::new(&POSITIONS)
            .with_attribute(VertexAttribute::Vec3)
            .with_indices(&INDICES)
            .build()?;

        Ok(Self { geometry, program })
    }
}

impl Scene for SingleColor {
    fn draw(&mut self, renderer: &mut GlRenderer, _elapsed: Duration) {
        renderer.draw(&self.geometry, &self.program);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = <Args as Parser>::parse();

    let config = Config::resolve(&args).unwrap_or_else(|e| exit_with(e));
    let app = App::new(&config, "Triangle - Single Color").unwrap_or_else(|e| exit_with(e));
    let scene = SingleColor::build().unwrap_or_else(|e| exit_with(e));

    app.run(scene);
}
