//! Presentation layer
//!
//! Sprite lookup is shared by all targets; drawing is browser only.

#[cfg(target_arch = "wasm32")]
mod canvas;
pub mod sprites;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use sprites::Sprite;
