mod component;
mod listener;
mod render;
mod state;

pub use component::MatrixCanvas;
