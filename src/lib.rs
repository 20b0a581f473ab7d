pub mod app;
pub mod args;
pub mod color;
pub mod config;
pub mod mesh;

pub use app::{App, AppError, Scene, SceneError};
pub use color::{Color, ColorCycler};
pub use config::Config;

/// Reports a fatal error and terminates the process.
pub fn exit_with<E: std::error::Error>(e: E) -> ! {
    log::error!("{e}");
    std::process::exit(1);
}
