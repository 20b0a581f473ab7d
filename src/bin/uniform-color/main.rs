use std::time::Duration;

use clap::Parser;

use gl_wrapper::geometry::{Geometry, GeometryBuilder, VertexAttribute};
use gl_wrapper::program::{Program, ProgramBuilder, Uniform, UniformValue};
use gl_wrapper::renderer::GlRenderer;

use triangles::args::Args;
use triangles::mesh::{INDICES, POSITIONS};
use triangles::{exit_with, App, ColorCycler, Config, Scene, SceneError};

struct UniformColor {
    geometry: Geometry,
    program: Program,
    u_color: Uniform,
    cycler: ColorCycler,
}

impl UniformColor {
    fn build(seed: Option<u64>) -> Result<Self, SceneError> {
        let program = ProgramBuilder::new(
            include_str!("../../gl_shaders/position.glsl"),
            include_str!("../../gl_shaders/uniform_color.glsl"),
        )?
        .build()?;

        let u_color = program.uniform("u_color")?;

        let geometry = GeometryBuilder::new(&POSITIONS)
            .with_attribute(VertexAttribute::Vec3)
            .with_indices(&INDICES)
            .build()?;

        Ok(Self {
            geometry,
            program,
            u_color,
            cycler: ColorCycler::new(seed),
        })
    }
}

impl Scene for UniformColor {
    fn draw(&mut self, renderer: &mut GlRenderer, elapsed: Duration) {
        let color = self.cycler.color_at(elapsed);

        renderer.set_uniform(
            &self.program,
            &self.u_color,
            UniformValue::Vec4(color.to_array()),
        );
        renderer.draw(&self.geometry, &self.program);
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = <Args as Parser>::parse();

    let config = Config::resolve(&args).unwrap_or_else(|e| exit_with(e));
    let app = App::new(&config, "Triangle - Uniform Color").unwrap_or_else(|e| exit_with(e));
    let scene = UniformColor::build(args.seed).unwrap_or_else(|e| exit_with(e));

    app.run(scene);
}
